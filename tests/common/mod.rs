// In-memory stand-ins for the embedded navmap document, shared by the
// host-side integration tests.

#![allow(dead_code)]

use navmap_core::{
    BridgeError, BridgeResult, DisplaySync, MapDocument, Marker, MarkerRole, PendingCleanup,
    RenderEntry, RenderHooks, SearchStatus, SyncSurface, ViewController,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: String,
    pub highlighted: bool,
}

#[derive(Debug)]
pub struct MapState {
    pub search_field_present: bool,
    pub search_throws: bool,
    pub search_text: String,
    pub async_search: bool,
    pub pending_query: Option<String>,
    pub locations: Vec<String>,
    pub suggestion_lists: usize,
    pub shown: Option<String>,
    pub entries: Vec<Entry>,
    pub marker_support: bool,
    pub spawn_throws: bool,
    pub markers: Vec<Marker>,
    pub title_font_size: Option<String>,
    pub click_delegates: usize,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            search_field_present: true,
            search_throws: false,
            search_text: String::new(),
            async_search: false,
            pending_query: None,
            locations: vec!["Manhattan".into(), "New York".into(), "Sol".into()],
            suggestion_lists: 0,
            shown: None,
            entries: ["Li01", "Li02", "Rh01"]
                .iter()
                .map(|id| Entry {
                    id: id.to_string(),
                    highlighted: false,
                })
                .collect(),
            marker_support: true,
            spawn_throws: false,
            markers: Vec::new(),
            title_font_size: None,
            click_delegates: 0,
        }
    }
}

impl MapState {
    pub fn highlighted(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.highlighted)
            .map(|e| e.id.as_str())
            .collect()
    }
}

pub struct FakeMap {
    pub state: Rc<RefCell<MapState>>,
    pub hooks: Rc<RenderHooks>,
}

impl FakeMap {
    fn render_location(&self, name: String) {
        let state = self.state.clone();
        let _: Result<(), ()> = self.hooks.dispatch(RenderEntry::Location, move || {
            state.borrow_mut().shown = Some(name);
            Ok(())
        });
    }

    /// Let an asynchronous search pipeline finish.
    pub fn finish_pending_search(&self) {
        let query = self.state.borrow_mut().pending_query.take();
        if let Some(query) = query {
            let matched = self.state.borrow().locations.contains(&query);
            if matched {
                self.render_location(query);
            }
        }
    }
}

impl MapDocument for FakeMap {
    fn search_text(&self) -> BridgeResult<String> {
        let state = self.state.borrow();
        if !state.search_field_present {
            return Err(BridgeError::missing("#searchField"));
        }
        Ok(state.search_text.clone())
    }

    fn set_search_text(&mut self, text: &str) -> BridgeResult<()> {
        let mut state = self.state.borrow_mut();
        if !state.search_field_present {
            return Err(BridgeError::missing("#searchField"));
        }
        state.search_text = text.to_string();
        Ok(())
    }

    fn run_search(&mut self) -> BridgeResult<SearchStatus> {
        let (query, matched, is_async) = {
            let mut state = self.state.borrow_mut();
            if state.search_throws {
                return Err(BridgeError::Binding("search pipeline threw".into()));
            }
            state.suggestion_lists = 1;
            let query = state.search_text.clone();
            let matched = state.locations.contains(&query);
            (query, matched, state.async_search)
        };
        if is_async {
            self.state.borrow_mut().pending_query = Some(query);
            return Ok(SearchStatus::Pending);
        }
        if matched {
            self.render_location(query);
            Ok(SearchStatus::Completed)
        } else {
            Ok(SearchStatus::Pending)
        }
    }

    fn clear_suggestions(&mut self) {
        self.state.borrow_mut().suggestion_lists = 0;
    }

    fn render_overview(&mut self) -> BridgeResult<()> {
        let state = self.state.clone();
        self.hooks.dispatch(RenderEntry::Overview, move || {
            state.borrow_mut().shown = None;
            Ok(())
        })
    }

    fn has_entry(&self, id: &str) -> bool {
        self.state.borrow().entries.iter().any(|e| e.id == id)
    }

    fn reset_highlights(&mut self) {
        for e in self.state.borrow_mut().entries.iter_mut() {
            e.highlighted = false;
        }
    }

    fn highlight_entry(&mut self, id: &str) {
        for e in self.state.borrow_mut().entries.iter_mut() {
            if e.id == id {
                e.highlighted = true;
            }
        }
    }

    // Index into `MapState::markers`; new markers are only ever appended.
    type MarkerHandle = usize;

    fn ensure_marker_support(&self) -> BridgeResult<()> {
        if self.state.borrow().marker_support {
            Ok(())
        } else {
            Err(BridgeError::missing("global function `mapObject`"))
        }
    }

    fn markers(&self, role: MarkerRole) -> Vec<usize> {
        let state = self.state.borrow();
        (0..state.markers.len())
            .filter(|&i| state.markers[i].role == role)
            .collect()
    }

    fn remove_markers(&mut self, mut markers: Vec<usize>) -> usize {
        let mut state = self.state.borrow_mut();
        markers.sort_unstable_by(|a, b| b.cmp(a));
        for &i in &markers {
            state.markers.remove(i);
        }
        markers.len()
    }

    fn spawn_marker(&mut self, marker: &Marker) -> BridgeResult<()> {
        let mut state = self.state.borrow_mut();
        if state.spawn_throws {
            return Err(BridgeError::Binding("mapObject threw".into()));
        }
        state.markers.push(marker.clone());
        Ok(())
    }
}

pub struct FakeSurface {
    pub state: Rc<RefCell<MapState>>,
}

impl SyncSurface for FakeSurface {
    fn adjust_title(&mut self, font_size: &str) {
        self.state.borrow_mut().title_font_size = Some(font_size.to_string());
    }

    fn click_delegate_bound(&self) -> bool {
        self.state.borrow().click_delegates > 0
    }

    fn bind_click_delegate(&mut self) -> BridgeResult<()> {
        self.state.borrow_mut().click_delegates += 1;
        Ok(())
    }

    fn clear_suggestions(&mut self) {
        self.state.borrow_mut().suggestion_lists = 0;
    }
}

pub struct Harness {
    pub view: ViewController<FakeMap>,
    pub state: Rc<RefCell<MapState>>,
    pub hooks: Rc<RenderHooks>,
    pub pending: PendingCleanup,
}

/// A view controller over a fake map, with display sync installed on both
/// render entry points the way the web layer installs it.
pub fn harness() -> Harness {
    let state = Rc::new(RefCell::new(MapState::default()));
    let hooks = Rc::new(RenderHooks::new());
    let pending = PendingCleanup::default();
    let display = Rc::new(DisplaySync::new(pending.clone(), "2em"));
    for entry in RenderEntry::ALL {
        let display = display.clone();
        let state = state.clone();
        hooks.install(entry, "display-sync", move || {
            display.after_render(&mut FakeSurface {
                state: state.clone(),
            })?;
            Ok(())
        });
    }
    let view = ViewController::new(
        FakeMap {
            state: state.clone(),
            hooks: hooks.clone(),
        },
        pending.clone(),
    );
    Harness {
        view,
        state,
        hooks,
        pending,
    }
}
