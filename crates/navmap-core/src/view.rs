use glam::DVec3;
use std::cell::Cell;
use std::rc::Rc;

use crate::constants::{CURRENT_POSITION_CLASSES, CURRENT_POSITION_SELECTOR};
use crate::error::BridgeResult;

/// Outcome of triggering the widget's search pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The search navigated (rendered) before returning.
    Completed,
    /// No render happened yet; completion will arrive through the render hook.
    Pending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerRole {
    CurrentPosition,
}

impl MarkerRole {
    /// Class list given to the widget's marker constructor.
    pub fn classes(self) -> &'static str {
        match self {
            MarkerRole::CurrentPosition => CURRENT_POSITION_CLASSES,
        }
    }

    /// Selector matching every rendered marker with this role.
    pub fn selector(self) -> &'static str {
        match self {
            MarkerRole::CurrentPosition => CURRENT_POSITION_SELECTOR,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub role: MarkerRole,
    pub position: DVec3,
    pub orientation: DVec3,
    pub speed: f64,
}

impl Marker {
    pub fn current_position(x: f64, y: f64, z: f64) -> Self {
        Self {
            role: MarkerRole::CurrentPosition,
            position: DVec3::new(x, y, z),
            orientation: DVec3::ZERO,
            speed: 0.0,
        }
    }

    /// Numeric constructor arguments, in the widget's order.
    pub fn components(&self) -> [f64; 7] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.orientation.x,
            self.orientation.y,
            self.orientation.z,
            self.speed,
        ]
    }
}

/// Suggestion cleanup deferred until the search pipeline signals completion.
///
/// Shared between the view controller (which requests it) and the display
/// sync handler (which performs it after the next render).
#[derive(Clone, Debug, Default)]
pub struct PendingCleanup(Rc<Cell<bool>>);

impl PendingCleanup {
    pub fn request(&self) {
        self.0.set(true);
    }

    /// Clear the request, returning whether one was outstanding.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }

    pub fn is_pending(&self) -> bool {
        self.0.get()
    }
}

/// The parts of the embedded document the view controller drives.
pub trait MapDocument {
    fn search_text(&self) -> BridgeResult<String>;
    fn set_search_text(&mut self, text: &str) -> BridgeResult<()>;
    /// Feed the current search text to the widget's search pipeline.
    fn run_search(&mut self) -> BridgeResult<SearchStatus>;
    fn clear_suggestions(&mut self);
    /// Call the overview render entry point (through its installed hook).
    fn render_overview(&mut self) -> BridgeResult<()>;

    fn has_entry(&self, id: &str) -> bool;
    fn reset_highlights(&mut self);
    fn highlight_entry(&mut self, id: &str);

    /// A rendered marker, as the document refers to it.
    type MarkerHandle;

    fn ensure_marker_support(&self) -> BridgeResult<()>;
    fn markers(&self, role: MarkerRole) -> Vec<Self::MarkerHandle>;
    fn remove_markers(&mut self, markers: Vec<Self::MarkerHandle>) -> usize;
    fn spawn_marker(&mut self, marker: &Marker) -> BridgeResult<()>;
}

/// Command surface the host uses to steer the widget.
pub struct ViewController<D> {
    document: D,
    pending: PendingCleanup,
    highlighted: Option<String>,
}

impl<D: MapDocument> ViewController<D> {
    pub fn new(document: D, pending: PendingCleanup) -> Self {
        Self {
            document,
            pending,
            highlighted: None,
        }
    }

    /// Search for `name` and clear the suggestion list once the search has
    /// navigated. A search that finds nothing leaves the view unchanged.
    pub fn display_location(&mut self, name: &str) -> BridgeResult<SearchStatus> {
        let previous = self.document.search_text()?;
        self.document.set_search_text(name)?;
        let status = match self.document.run_search() {
            Ok(status) => status,
            Err(e) => {
                if let Err(restore) = self.document.set_search_text(&previous) {
                    log::warn!("[view] could not restore search text: {restore}");
                }
                return Err(e);
            }
        };
        match status {
            SearchStatus::Completed => {
                self.pending.take();
                self.document.clear_suggestions();
            }
            SearchStatus::Pending => {
                log::debug!("[view] search for {name:?} pending; deferring suggestion cleanup");
                self.pending.request();
            }
        }
        Ok(status)
    }

    pub fn display_overview(&mut self) -> BridgeResult<()> {
        self.document.render_overview()
    }

    /// Reset every entry, then highlight `id`. Returns false (and changes
    /// nothing) when no entry matches.
    pub fn highlight_selection(&mut self, id: &str) -> bool {
        if !self.document.has_entry(id) {
            log::debug!("[view] no entry {id:?} to highlight");
            return false;
        }
        self.document.reset_highlights();
        self.document.highlight_entry(id);
        self.highlighted = Some(id.to_string());
        true
    }

    /// Replace every current-position marker with one at `(x, y, z)`.
    /// The old markers go only once the new one exists.
    pub fn place_marker(&mut self, x: f64, y: f64, z: f64) -> BridgeResult<Marker> {
        self.document.ensure_marker_support()?;
        let marker = Marker::current_position(x, y, z);
        let previous = self.document.markers(marker.role);
        self.document.spawn_marker(&marker)?;
        let removed = self.document.remove_markers(previous);
        log::debug!("[view] marker at {:?} (replaced {removed})", marker.position);
        Ok(marker)
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn document(&self) -> &D {
        &self.document
    }
}
