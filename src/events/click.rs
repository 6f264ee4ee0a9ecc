use crate::constants::BRIDGE_BOUND_ATTR;
use crate::sync::WidgetNavigation;
use crate::Shared;
use navmap_core::constants::{CLICKABLE_SELECTOR, INTERNAL_NICKNAME_ATTR};
use navmap_core::{BridgeError, BridgeResult, ClickTarget};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn is_bound(document: &web::Document) -> bool {
    document
        .body()
        .is_some_and(|body| body.has_attribute(BRIDGE_BOUND_ATTR))
}

/// Attach the one delegated click listener to `<body>`, which the widget never
/// re-creates. Clicked descendants are classified when the event fires, so
/// renders that rebuild the map need no rebinding.
pub(crate) fn bind(document: &web::Document, shared: Rc<Shared>) -> BridgeResult<()> {
    let body = document
        .body()
        .ok_or_else(|| BridgeError::missing("<body>"))?;
    if body.has_attribute(BRIDGE_BOUND_ATTR) {
        return Ok(());
    }
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        handle_click(&ev, &shared);
    }) as Box<dyn FnMut(_)>);
    body.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .map_err(|e| BridgeError::Binding(format!("cannot listen for clicks: {e:?}")))?;
    _ = body.set_attribute(BRIDGE_BOUND_ATTR, "bound");
    closure.forget();
    Ok(())
}

fn handle_click(ev: &web::MouseEvent, shared: &Rc<Shared>) {
    let Some(clicked) = ev
        .target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
    else {
        return;
    };
    let hit = match clicked.closest(CLICKABLE_SELECTOR) {
        Ok(Some(el)) => el,
        _ => return,
    };
    // `class` attribute rather than `className`, which is not a string on SVG elements
    let classes = hit.get_attribute("class").unwrap_or_default();
    let target = ClickTarget::classify(
        classes.split_whitespace(),
        hit.get_attribute(INTERNAL_NICKNAME_ATTR).as_deref(),
    );

    let Some(window) = web::window() else {
        return;
    };
    let fragment_key = shared.config.borrow().fragment_key.clone();
    let mut nav = WidgetNavigation::new(window, fragment_key);
    // The host hears about the new selection once `updateFragment` changes the URL.
    let result = shared.tracker.borrow_mut().handle_click(&target, &mut nav);
    if let Err(e) = result {
        log::warn!("[sync] click not applied: {e}");
    }
}
