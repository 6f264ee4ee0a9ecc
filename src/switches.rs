use crate::dom;
use navmap_core::constants::ACTIVATE_CONFIG_FN;
use navmap_core::{BridgeError, BridgeResult, SwitchBoard};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Switch values live in the navmap's own settings checkboxes.
pub struct DomSwitchBoard {
    window: web::Window,
    document: web::Document,
}

impl DomSwitchBoard {
    pub fn new(window: web::Window, document: web::Document) -> Self {
        Self { window, document }
    }

    fn checkbox(&self, element_id: &str) -> BridgeResult<web::HtmlInputElement> {
        self.document
            .get_element_by_id(element_id)
            .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
            .ok_or_else(|| BridgeError::missing(format!("checkbox #{element_id}")))
    }
}

impl SwitchBoard for DomSwitchBoard {
    fn checked(&self, element_id: &str) -> BridgeResult<bool> {
        Ok(self.checkbox(element_id)?.checked())
    }

    fn set_checked(&mut self, element_id: &str, value: bool) -> BridgeResult<()> {
        self.checkbox(element_id)?.set_checked(value);
        Ok(())
    }

    fn activate(&mut self) -> BridgeResult<()> {
        dom::call_global(&self.window, ACTIVATE_CONFIG_FN, &[]).map(|_| ())
    }
}
