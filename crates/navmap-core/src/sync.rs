//! Post-render synchronisation and the canonical selection state machine.

use crate::constants::{GRID_CLASS, LOCATION_CLASS, ZONE_CLASS};
use crate::error::BridgeResult;
use crate::view::PendingCleanup;

/// Canonical selection shared with the widget and the host's URL layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Unset,
    /// A location or zone inside the shown system.
    Element(String),
    /// The shown system itself (grid click).
    System(String),
}

impl Selection {
    pub fn id(&self) -> Option<&str> {
        match self {
            Selection::Unset => None,
            Selection::Element(id) | Selection::System(id) => Some(id),
        }
    }
}

/// What a click landed on, decided from the clicked element at event time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Location(Option<String>),
    Zone(Option<String>),
    Grid,
    Other,
}

impl ClickTarget {
    pub fn classify<'a>(
        classes: impl IntoIterator<Item = &'a str>,
        internal_id: Option<&str>,
    ) -> Self {
        let id = internal_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let mut grid = false;
        for class in classes {
            match class {
                LOCATION_CLASS => return ClickTarget::Location(id),
                ZONE_CLASS => return ClickTarget::Zone(id),
                GRID_CLASS => grid = true,
                _ => {}
            }
        }
        if grid {
            ClickTarget::Grid
        } else {
            ClickTarget::Other
        }
    }
}

/// Accessors over the navigation scalars the widget and host own.
///
/// Only the selection may be written; the shown system belongs to the widget.
pub trait NavigationContext {
    fn current_system(&self) -> Option<String>;
    fn current_selection(&self) -> Option<String>;
    fn write_selection(&mut self, id: &str) -> BridgeResult<()>;
    /// Push `id` into the host's navigation fragment.
    fn propagate(&mut self, id: &str) -> BridgeResult<()>;
}

#[derive(Debug, Default)]
pub struct SelectionTracker {
    selection: Selection,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Apply a click. Returns the new selection id, or `None` when the click
    /// does not select anything.
    pub fn handle_click<C: NavigationContext>(
        &mut self,
        target: &ClickTarget,
        nav: &mut C,
    ) -> BridgeResult<Option<String>> {
        let next = match target {
            ClickTarget::Location(Some(id)) | ClickTarget::Zone(Some(id)) => {
                Selection::Element(id.clone())
            }
            ClickTarget::Grid => match nav.current_system() {
                Some(system) => Selection::System(system),
                None => {
                    log::debug!("[sync] grid click with no system shown");
                    return Ok(None);
                }
            },
            ClickTarget::Location(None) | ClickTarget::Zone(None) => {
                log::debug!("[sync] clicked element has no identifier");
                return Ok(None);
            }
            ClickTarget::Other => return Ok(None),
        };
        let id = match next.id() {
            Some(id) => id.to_string(),
            None => return Ok(None),
        };
        nav.write_selection(&id)?;
        self.selection = next;
        nav.propagate(&id)?;
        log::info!("[sync] selection -> {id}");
        Ok(Some(id))
    }
}

/// The host's display-changed callback.
pub trait DisplayListener {
    fn display_changed(&self, nickname: &str);
}

/// Tells the host what the widget selected each time the navigation fragment
/// changes, except while the overview is shown.
#[derive(Clone, Debug)]
pub struct DisplayNotifier {
    overview_name: String,
}

impl DisplayNotifier {
    pub fn new(overview_name: impl Into<String>) -> Self {
        Self {
            overview_name: overview_name.into(),
        }
    }

    /// Returns the nickname passed to `listener`, if any.
    pub fn fragment_changed<C, L>(&self, nav: &C, listener: &L) -> Option<String>
    where
        C: NavigationContext,
        L: DisplayListener + ?Sized,
    {
        let nickname = nav.current_selection()?;
        if nickname == self.overview_name {
            return None;
        }
        listener.display_changed(&nickname);
        Some(nickname)
    }
}

/// Document operations the display sync handler needs after each render.
pub trait SyncSurface {
    fn adjust_title(&mut self, font_size: &str);
    fn click_delegate_bound(&self) -> bool;
    /// Bind the single delegated click listener on a stable ancestor.
    fn bind_click_delegate(&mut self) -> BridgeResult<()>;
    fn clear_suggestions(&mut self);
}

/// Runs after every render of either entry point.
pub struct DisplaySync {
    pending: PendingCleanup,
    title_font_size: String,
}

impl DisplaySync {
    pub fn new(pending: PendingCleanup, title_font_size: impl Into<String>) -> Self {
        Self {
            pending,
            title_font_size: title_font_size.into(),
        }
    }

    pub fn after_render<S: SyncSurface>(&self, surface: &mut S) -> BridgeResult<()> {
        surface.adjust_title(&self.title_font_size);
        // Delegation survives re-created children, so binding happens at most once.
        if !surface.click_delegate_bound() {
            surface.bind_click_delegate()?;
            log::info!("[sync] click delegate bound");
        }
        if self.pending.take() {
            surface.clear_suggestions();
        }
        Ok(())
    }
}
