//! Layout overrides that make the embedded document fill the host container.
//!
//! Inline declarations go on the widget's own elements; everything that must
//! also cover elements created later lives in one owned stylesheet, which is
//! replaced rather than appended so applying it twice changes nothing.

use crate::config::check_css_value;
use crate::constants::{BODY, LEGEND, MAP, MAP_CONTAINER, NAV_CONTAINER};
use crate::error::BridgeResult;

/// Inline declarations for every element matching `selector`.
/// An empty value removes the property.
pub struct StyleRule {
    pub selector: &'static str,
    pub declarations: &'static [(&'static str, &'static str)],
}

pub const ELEMENT_RULES: &[StyleRule] = &[
    StyleRule {
        selector: BODY,
        declarations: &[
            ("overflow", "hidden"),
            ("margin", "0"),
            ("padding", "0"),
            ("left", ""),
            ("right", ""),
        ],
    },
    StyleRule {
        selector: MAP_CONTAINER,
        declarations: &[
            ("border", "none"),
            ("width", "100%"),
            ("height", "100%"),
            ("margin", "0"),
            ("position", "static"),
            ("cursor", "auto"),
        ],
    },
    StyleRule {
        selector: MAP,
        declarations: &[
            ("height", "100vw"),
            ("width", "100vw"),
            ("box-shadow", "none"),
            ("position", "static"),
        ],
    },
    // Hidden, never removed: the widget completes its initialisation through it.
    StyleRule {
        selector: NAV_CONTAINER,
        declarations: &[("display", "none")],
    },
    // Keeps the overview legend from covering the top of the map.
    StyleRule {
        selector: LEGEND,
        declarations: &[("border", "none"), ("top", "-0.2em")],
    },
];

/// Owned stylesheet: solid background in place of the widget's imagery, no
/// text selection and a pointer cursor everywhere.
pub fn stylesheet(background_colour: &str) -> BridgeResult<String> {
    check_css_value("background colour", background_colour)?;
    let colour = background_colour.trim();
    Ok(format!(
        "body:after{{background: {colour};}}\n\
         body{{background: {colour}; cursor: pointer; user-select: none; -webkit-user-select: none;}}"
    ))
}

/// Id of the one `<style>` element the bridge owns in the widget's `<head>`.
pub const OWNED_STYLE_ID: &str = "navmap-bridge-style";

/// The document operations normalisation needs.
pub trait StyleTarget {
    /// Apply `rule` to every matching element; returns how many matched.
    fn restyle(&mut self, rule: &StyleRule) -> usize;
    fn has_stylesheet(&self, id: &str) -> bool;
    fn create_stylesheet(&mut self, id: &str) -> BridgeResult<()>;
    fn set_stylesheet_text(&mut self, id: &str, css: &str) -> BridgeResult<()>;
}

/// Make the embedded document fill the host container. Safe to repeat.
/// A bad colour fails before anything is touched.
pub fn normalize<T: StyleTarget>(target: &mut T, background_colour: &str) -> BridgeResult<usize> {
    let css = stylesheet(background_colour)?;
    let touched: usize = ELEMENT_RULES.iter().map(|rule| target.restyle(rule)).sum();
    write_stylesheet(target, &css)?;
    log::info!("[normalize] restyled {touched} elements");
    Ok(touched)
}

/// Swap the background colour without touching anything else.
pub fn apply_background<T: StyleTarget>(target: &mut T, colour: &str) -> BridgeResult<()> {
    let css = stylesheet(colour)?;
    write_stylesheet(target, &css)
}

fn write_stylesheet<T: StyleTarget>(target: &mut T, css: &str) -> BridgeResult<()> {
    if !target.has_stylesheet(OWNED_STYLE_ID) {
        target.create_stylesheet(OWNED_STYLE_ID)?;
    }
    target.set_stylesheet_text(OWNED_STYLE_ID, css)
}
