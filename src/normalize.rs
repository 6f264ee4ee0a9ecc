use crate::dom;
use navmap_core::layout::StyleRule;
use navmap_core::{BridgeError, BridgeResult};
use web_sys as web;

/// The widget document as a target for layout overrides.
pub struct DomStyleTarget<'a> {
    document: &'a web::Document,
}

impl<'a> DomStyleTarget<'a> {
    pub fn new(document: &'a web::Document) -> Self {
        Self { document }
    }
}

impl navmap_core::layout::StyleTarget for DomStyleTarget<'_> {
    fn restyle(&mut self, rule: &StyleRule) -> usize {
        let elements = dom::query_all(self.document, rule.selector);
        for el in &elements {
            dom::set_declarations(el, rule.declarations);
        }
        elements.len()
    }

    fn has_stylesheet(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn create_stylesheet(&mut self, id: &str) -> BridgeResult<()> {
        let head = self
            .document
            .head()
            .ok_or_else(|| BridgeError::missing("<head>"))?;
        let el = self
            .document
            .create_element("style")
            .map_err(|e| BridgeError::Binding(format!("cannot create <style>: {e:?}")))?;
        el.set_id(id);
        head.append_child(&el)
            .map_err(|e| BridgeError::Binding(format!("cannot attach <style>: {e:?}")))?;
        Ok(())
    }

    fn set_stylesheet_text(&mut self, id: &str, css: &str) -> BridgeResult<()> {
        let el = self
            .document
            .get_element_by_id(id)
            .ok_or_else(|| BridgeError::missing(format!("#{id}")))?;
        el.set_text_content(Some(css));
        Ok(())
    }
}

pub fn normalize(document: &web::Document, background_colour: &str) -> BridgeResult<()> {
    navmap_core::layout::normalize(&mut DomStyleTarget::new(document), background_colour)
        .map(|_| ())
}

pub fn apply_background(document: &web::Document, colour: &str) -> BridgeResult<()> {
    navmap_core::layout::apply_background(&mut DomStyleTarget::new(document), colour)
}
