use crate::sync::WidgetNavigation;
use crate::Shared;
use navmap_core::fragment::displayed_from_fragment;
use navmap_core::DisplayNotifier;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Name the URL fragment currently displays.
pub(crate) fn current_displayed(window: &web::Window, shared: &Shared) -> String {
    let hash = window.location().hash().unwrap_or_default();
    let config = shared.config.borrow();
    displayed_from_fragment(&hash, &config.fragment_key, &config.overview_name)
}

fn record_displayed(window: &web::Window, shared: &Shared) {
    let displayed = current_displayed(window, shared);
    if shared.history.borrow_mut().record(&displayed) {
        log::debug!("[history] recorded {displayed}");
    }
}

fn fragment_changed(window: &web::Window, shared: &Shared) {
    record_displayed(window, shared);
    let (notifier, fragment_key) = {
        let config = shared.config.borrow();
        (
            DisplayNotifier::new(config.overview_name.clone()),
            config.fragment_key.clone(),
        )
    };
    let nav = WidgetNavigation::new(window.clone(), fragment_key);
    if let Some(nickname) = notifier.fragment_changed(&nav, shared) {
        log::debug!("[sync] display changed to {nickname}");
    }
}

// Feed fragment changes into the back/forward history and the host's
// display-changed callback. Wired once per page.
pub(crate) fn wire_hashchange(window: &web::Window, shared: Rc<Shared>) {
    static WIRED: AtomicBool = AtomicBool::new(false);
    if WIRED.swap(true, Ordering::SeqCst) {
        return;
    }
    record_displayed(window, &shared);

    let win = window.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::Event| {
        fragment_changed(&win, &shared);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
    closure.forget();
}
