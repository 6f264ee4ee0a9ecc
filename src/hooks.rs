use crate::constants::HOOK_MARKER_PROP;
use crate::dom;
use js_sys::{Function, Reflect};
use navmap_core::{BridgeError, BridgeResult, Install, RenderEntry, RenderHooks};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

fn is_bridge_wrapper(function: &Function) -> bool {
    Reflect::get(function, &JsValue::from_str(HOOK_MARKER_PROP))
        .map(|v| v.is_truthy())
        .unwrap_or(false)
}

/// Point the widget's global for `entry` at a wrapper that routes every call
/// through `hooks`. A global that already holds a bridge wrapper is left alone.
pub fn wrap_entry_point(
    window: &web::Window,
    entry: RenderEntry,
    hooks: &Rc<RenderHooks>,
) -> BridgeResult<Install> {
    let name = entry.global_name();
    let original = dom::global_function(window, name)?;
    if is_bridge_wrapper(&original) {
        hooks.mark_wrapped(entry);
        log::info!("[hooks] {name} already wrapped");
        return Ok(Install::AlreadyInstalled);
    }

    let dispatch_hooks = hooks.clone();
    // `Fn` so a render triggered from inside an after-render callback can re-enter.
    let wrapper = Closure::wrap(Box::new(move |arg: JsValue| -> Result<JsValue, JsValue> {
        dispatch_hooks.dispatch(entry, || match entry {
            RenderEntry::Location => original.call1(&JsValue::UNDEFINED, &arg),
            RenderEntry::Overview => original.call0(&JsValue::UNDEFINED),
        })
    }) as Box<dyn Fn(JsValue) -> Result<JsValue, JsValue>>);

    let function: &Function = wrapper.as_ref().unchecked_ref();
    Reflect::set(function, &JsValue::from_str(HOOK_MARKER_PROP), &JsValue::TRUE)
        .map_err(|e| BridgeError::Binding(format!("cannot mark {name} wrapper: {e:?}")))?;
    dom::set_global(window, name, function)?;
    wrapper.forget();

    hooks.mark_wrapped(entry);
    log::info!("[hooks] wrapped {name}");
    Ok(Install::Installed)
}
