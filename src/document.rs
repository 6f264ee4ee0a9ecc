use crate::dom;
use js_sys::{Array, Reflect};
use navmap_core::constants::{
    ENTRY_DEFAULT_COLOUR, ENTRY_DEFAULT_WEIGHT, ENTRY_HIGHLIGHT_COLOUR, ENTRY_HIGHLIGHT_WEIGHT,
    MAP_OBJECT_CTOR, RENDER_OVERVIEW_FN, SEARCH_FIELD_ID, SUGGESTIONS, SYSTEM_ENTRY,
    SYSTEM_NICKNAME_ATTR,
};
use navmap_core::{
    BridgeError, BridgeResult, MapDocument, Marker, MarkerRole, RenderHooks, SearchStatus,
};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// The embedded navmap page, seen through the widget's fixed element contract.
pub struct NavmapDocument {
    window: web::Window,
    document: web::Document,
    hooks: Rc<RenderHooks>,
}

impl NavmapDocument {
    pub fn new(window: web::Window, document: web::Document, hooks: Rc<RenderHooks>) -> Self {
        Self {
            window,
            document,
            hooks,
        }
    }

    fn search_field(&self) -> BridgeResult<web::HtmlInputElement> {
        self.document
            .get_element_by_id(SEARCH_FIELD_ID)
            .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
            .ok_or_else(|| BridgeError::missing(format!("#{SEARCH_FIELD_ID}")))
    }

    // Compared attribute by attribute so identifiers never need selector escaping.
    fn entries(&self, id: &str) -> Vec<web::Element> {
        dom::query_all(&self.document, &format!("[{SYSTEM_NICKNAME_ATTR}]"))
            .into_iter()
            .filter(|el| el.get_attribute(SYSTEM_NICKNAME_ATTR).as_deref() == Some(id))
            .collect()
    }
}

impl MapDocument for NavmapDocument {
    fn search_text(&self) -> BridgeResult<String> {
        Ok(self.search_field()?.value())
    }

    fn set_search_text(&mut self, text: &str) -> BridgeResult<()> {
        self.search_field()?.set_value(text);
        Ok(())
    }

    fn run_search(&mut self) -> BridgeResult<SearchStatus> {
        let field = self.search_field()?;
        let before = self.hooks.total_renders();

        let init = web::KeyboardEventInit::new();
        init.set_bubbles(true);
        let keyup = web::KeyboardEvent::new_with_keyboard_event_init_dict("keyup", &init)
            .map_err(|e| BridgeError::Binding(format!("cannot create keyup: {e:?}")))?;
        field
            .dispatch_event(&keyup)
            .map_err(|e| BridgeError::Binding(format!("search pipeline threw: {e:?}")))?;

        // The render hook counts renders, so a navigation during dispatch is the
        // completion signal; otherwise the pipeline is still running.
        if self.hooks.total_renders() > before {
            Ok(SearchStatus::Completed)
        } else {
            Ok(SearchStatus::Pending)
        }
    }

    fn clear_suggestions(&mut self) {
        let removed = dom::remove_all(&self.document, SUGGESTIONS);
        log::debug!("[view] removed {removed} suggestion lists");
    }

    fn render_overview(&mut self) -> BridgeResult<()> {
        dom::call_global(&self.window, RENDER_OVERVIEW_FN, &[]).map(|_| ())
    }

    fn has_entry(&self, id: &str) -> bool {
        !self.entries(id).is_empty()
    }

    fn reset_highlights(&mut self) {
        for el in dom::query_all(&self.document, SYSTEM_ENTRY) {
            dom::style_children(
                &el,
                &[("color", ENTRY_DEFAULT_COLOUR), ("font-weight", ENTRY_DEFAULT_WEIGHT)],
            );
        }
    }

    fn highlight_entry(&mut self, id: &str) {
        for el in self.entries(id) {
            dom::style_children(
                &el,
                &[("color", ENTRY_HIGHLIGHT_COLOUR), ("font-weight", ENTRY_HIGHLIGHT_WEIGHT)],
            );
        }
    }

    type MarkerHandle = web::Element;

    fn ensure_marker_support(&self) -> BridgeResult<()> {
        dom::global_function(&self.window, MAP_OBJECT_CTOR).map(|_| ())
    }

    fn markers(&self, role: MarkerRole) -> Vec<web::Element> {
        dom::query_all(&self.document, role.selector())
    }

    fn remove_markers(&mut self, markers: Vec<web::Element>) -> usize {
        for el in &markers {
            el.remove();
        }
        markers.len()
    }

    fn spawn_marker(&mut self, marker: &Marker) -> BridgeResult<()> {
        let ctor = dom::global_function(&self.window, MAP_OBJECT_CTOR)?;
        let args = Array::new();
        args.push(&JsValue::from_str(marker.role.classes()));
        for component in marker.components() {
            args.push(&JsValue::from_f64(component));
        }
        // The widget's constructor attaches the marker to the map itself.
        Reflect::construct(&ctor, &args)
            .map(|_| ())
            .map_err(|e| BridgeError::Binding(format!("{MAP_OBJECT_CTOR} threw: {e:?}")))
    }
}
