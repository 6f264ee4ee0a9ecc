//! Render hook registry.
//!
//! The widget owns two render entry points. The web layer replaces each global
//! with a wrapper exactly once; the wrapper routes every call through
//! [`RenderHooks::dispatch`], which runs the original render and then every
//! registered after-render callback.

use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

use crate::constants::{RENDER_LOCATION_FN, RENDER_OVERVIEW_FN};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderEntry {
    /// Renders one location; takes the location identifier.
    Location,
    /// Renders the overview; takes no arguments.
    Overview,
}

impl RenderEntry {
    pub const ALL: [RenderEntry; 2] = [RenderEntry::Location, RenderEntry::Overview];

    /// Name of the global function the widget exposes for this entry point.
    pub fn global_name(self) -> &'static str {
        match self {
            RenderEntry::Location => RENDER_LOCATION_FN,
            RenderEntry::Overview => RENDER_OVERVIEW_FN,
        }
    }
}

pub type AfterRender = Rc<dyn Fn() -> anyhow::Result<()>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Install {
    Installed,
    AlreadyInstalled,
}

struct Slot {
    id: String,
    callback: AfterRender,
}

#[derive(Default)]
struct EntryHooks {
    wrapped: bool,
    after: SmallVec<[Slot; 2]>,
    renders: u64,
}

#[derive(Default)]
pub struct RenderHooks {
    entries: RefCell<FnvHashMap<RenderEntry, EntryHooks>>,
}

impl RenderHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` to run after every render of `entry`.
    ///
    /// Installing the same `id` twice leaves the first registration in place,
    /// so a render never runs one callback more than once.
    pub fn install(
        &self,
        entry: RenderEntry,
        id: &str,
        callback: impl Fn() -> anyhow::Result<()> + 'static,
    ) -> Install {
        let mut entries = self.entries.borrow_mut();
        let hooks = entries.entry(entry).or_default();
        if hooks.after.iter().any(|s| s.id == id) {
            log::debug!("[hooks] {id} already installed on {entry:?}");
            return Install::AlreadyInstalled;
        }
        hooks.after.push(Slot {
            id: id.to_string(),
            callback: Rc::new(callback),
        });
        log::info!("[hooks] installed {id} on {entry:?}");
        Install::Installed
    }

    pub fn remove(&self, entry: RenderEntry, id: &str) -> bool {
        let mut entries = self.entries.borrow_mut();
        let Some(hooks) = entries.get_mut(&entry) else {
            return false;
        };
        let before = hooks.after.len();
        hooks.after.retain(|s| s.id != id);
        before != hooks.after.len()
    }

    pub fn callback_count(&self, entry: RenderEntry) -> usize {
        self.entries
            .borrow()
            .get(&entry)
            .map_or(0, |h| h.after.len())
    }

    /// Record that the global for `entry` now points at the wrapper.
    /// Returns false if it already did.
    pub fn mark_wrapped(&self, entry: RenderEntry) -> bool {
        let mut entries = self.entries.borrow_mut();
        let hooks = entries.entry(entry).or_default();
        !std::mem::replace(&mut hooks.wrapped, true)
    }

    pub fn is_wrapped(&self, entry: RenderEntry) -> bool {
        self.entries.borrow().get(&entry).is_some_and(|h| h.wrapped)
    }

    /// Number of completed renders dispatched for `entry`.
    pub fn render_count(&self, entry: RenderEntry) -> u64 {
        self.entries.borrow().get(&entry).map_or(0, |h| h.renders)
    }

    pub fn total_renders(&self) -> u64 {
        RenderEntry::ALL.iter().map(|e| self.render_count(*e)).sum()
    }

    /// Run `original`, then the after-render callbacks.
    ///
    /// The original's result is returned untouched. If it fails the render did
    /// not complete and no callback runs. Callback failures are logged here and
    /// never reach the caller.
    pub fn dispatch<T, E>(
        &self,
        entry: RenderEntry,
        original: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let out = original()?;
        self.run_after(entry);
        Ok(out)
    }

    fn run_after(&self, entry: RenderEntry) {
        // Snapshot so callbacks may render (and re-enter dispatch) themselves.
        let callbacks: SmallVec<[(String, AfterRender); 2]> = {
            let mut entries = self.entries.borrow_mut();
            let hooks = entries.entry(entry).or_default();
            hooks.renders += 1;
            hooks
                .after
                .iter()
                .map(|s| (s.id.clone(), s.callback.clone()))
                .collect()
        };
        for (id, callback) in callbacks {
            if let Err(e) = callback() {
                log::error!("[hooks] {id} after {entry:?} render failed: {e:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn global_names_match_widget() {
        assert_eq!(RenderEntry::Location.global_name(), "generateMap");
        assert_eq!(RenderEntry::Overview.global_name(), "generateUniverseMap");
    }

    #[test]
    fn mark_wrapped_only_once() {
        let hooks = RenderHooks::new();
        assert!(!hooks.is_wrapped(RenderEntry::Overview));
        assert!(hooks.mark_wrapped(RenderEntry::Overview));
        assert!(!hooks.mark_wrapped(RenderEntry::Overview));
        assert!(hooks.is_wrapped(RenderEntry::Overview));
        assert!(!hooks.is_wrapped(RenderEntry::Location));
    }

    #[test]
    fn removed_callback_stops_running() {
        let hooks = RenderHooks::new();
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        hooks.install(RenderEntry::Location, "sync", move || {
            c.set(c.get() + 1);
            Ok(())
        });
        let _: Result<(), ()> = hooks.dispatch(RenderEntry::Location, || Ok(()));
        assert!(hooks.remove(RenderEntry::Location, "sync"));
        assert!(!hooks.remove(RenderEntry::Location, "sync"));
        let _: Result<(), ()> = hooks.dispatch(RenderEntry::Location, || Ok(()));
        assert_eq!(calls.get(), 1);
        assert_eq!(hooks.render_count(RenderEntry::Location), 2);
    }

    #[test]
    fn callback_may_render_reentrantly() {
        let hooks = Rc::new(RenderHooks::new());
        let inner = hooks.clone();
        let overview_calls = Rc::new(Cell::new(0));
        let oc = overview_calls.clone();
        hooks.install(RenderEntry::Location, "chain", move || {
            let _: Result<(), ()> = inner.dispatch(RenderEntry::Overview, || Ok(()));
            Ok(())
        });
        hooks.install(RenderEntry::Overview, "count", move || {
            oc.set(oc.get() + 1);
            Ok(())
        });
        let _: Result<(), ()> = hooks.dispatch(RenderEntry::Location, || Ok(()));
        assert_eq!(overview_calls.get(), 1);
        assert_eq!(hooks.total_renders(), 2);
    }
}
