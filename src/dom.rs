use js_sys::{Array, Function, Reflect};
use navmap_core::{BridgeError, BridgeResult};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("bad selector {selector:?}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}

pub fn remove_all(document: &web::Document, selector: &str) -> usize {
    let elements = query_all(document, selector);
    for el in &elements {
        el.remove();
    }
    elements.len()
}

/// Write inline declarations; an empty value removes the property.
pub fn set_declarations(el: &web::Element, declarations: &[(&str, &str)]) {
    let Some(html) = el.dyn_ref::<web::HtmlElement>() else {
        return;
    };
    let style = html.style();
    for (property, value) in declarations {
        if value.is_empty() {
            _ = style.remove_property(property);
        } else {
            _ = style.set_property(property, value);
        }
    }
}

pub fn style_children(el: &web::Element, declarations: &[(&str, &str)]) {
    let children = el.children();
    for i in 0..children.length() {
        if let Some(child) = children.item(i) {
            set_declarations(&child, declarations);
        }
    }
}

// ---------------- Page globals ----------------

pub fn global(window: &web::Window, name: &str) -> Option<JsValue> {
    Reflect::get(window, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

pub fn global_function(window: &web::Window, name: &str) -> BridgeResult<Function> {
    global(window, name)
        .and_then(|v| v.dyn_into::<Function>().ok())
        .ok_or_else(|| BridgeError::missing(format!("global function `{name}`")))
}

/// Read a global scalar as a string; numbers are stringified.
pub fn global_string(window: &web::Window, name: &str) -> Option<String> {
    let value = global(window, name)?;
    value
        .as_string()
        .or_else(|| value.as_f64().map(|n| n.to_string()))
        .filter(|s| !s.is_empty())
}

pub fn set_global(window: &web::Window, name: &str, value: &JsValue) -> BridgeResult<()> {
    match Reflect::set(window, &JsValue::from_str(name), value) {
        Ok(true) => Ok(()),
        Ok(false) => Err(BridgeError::Binding(format!("`{name}` is not writable"))),
        Err(e) => Err(BridgeError::Binding(format!("cannot set `{name}`: {e:?}"))),
    }
}

pub fn call_global(window: &web::Window, name: &str, args: &[JsValue]) -> BridgeResult<JsValue> {
    let function = global_function(window, name)?;
    let args: Array = args.iter().collect();
    function
        .apply(&JsValue::UNDEFINED, &args)
        .map_err(|e| BridgeError::Binding(format!("`{name}` threw: {e:?}")))
}

pub fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}
