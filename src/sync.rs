use crate::dom;
use crate::events::click;
use crate::Shared;
use navmap_core::constants::{
    CURRENT_SELECTION_VAR, CURRENT_SYSTEM_VAR, SUGGESTIONS, SYSTEM_TITLE, UPDATE_FRAGMENT_FN,
};
use navmap_core::{BridgeResult, DisplaySync, NavigationContext, SyncSurface};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Navigation scalars as the widget exposes them on `window`.
pub struct WidgetNavigation {
    window: web::Window,
    fragment_key: String,
}

impl WidgetNavigation {
    pub fn new(window: web::Window, fragment_key: impl Into<String>) -> Self {
        Self {
            window,
            fragment_key: fragment_key.into(),
        }
    }
}

impl NavigationContext for WidgetNavigation {
    fn current_system(&self) -> Option<String> {
        dom::global_string(&self.window, CURRENT_SYSTEM_VAR)
    }

    fn current_selection(&self) -> Option<String> {
        dom::global_string(&self.window, CURRENT_SELECTION_VAR)
    }

    fn write_selection(&mut self, id: &str) -> BridgeResult<()> {
        dom::set_global(&self.window, CURRENT_SELECTION_VAR, &JsValue::from_str(id))
    }

    fn propagate(&mut self, id: &str) -> BridgeResult<()> {
        dom::call_global(
            &self.window,
            UPDATE_FRAGMENT_FN,
            &[JsValue::from_str(&self.fragment_key), JsValue::from_str(id)],
        )
        .map(|_| ())
    }
}

struct DomSurface {
    document: web::Document,
    shared: Rc<Shared>,
}

impl SyncSurface for DomSurface {
    fn adjust_title(&mut self, font_size: &str) {
        for el in dom::query_all(&self.document, SYSTEM_TITLE) {
            dom::set_declarations(&el, &[("font-size", font_size)]);
        }
    }

    fn click_delegate_bound(&self) -> bool {
        click::is_bound(&self.document)
    }

    fn bind_click_delegate(&mut self) -> BridgeResult<()> {
        click::bind(&self.document, self.shared.clone())
    }

    fn clear_suggestions(&mut self) {
        dom::remove_all(&self.document, SUGGESTIONS);
    }
}

/// After-render callback installed on both render entry points.
pub(crate) fn after_render(shared: &Rc<Shared>) -> anyhow::Result<()> {
    let (_, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
    let font_size = shared.config.borrow().title_font_size.clone();

    let display = DisplaySync::new(shared.pending.clone(), font_size);
    let mut surface = DomSurface {
        document,
        shared: shared.clone(),
    };
    display.after_render(&mut surface)?;
    Ok(())
}
