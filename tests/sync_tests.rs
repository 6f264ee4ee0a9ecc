// Host-side tests for click-driven selection and the display sync handler.

mod common;

use common::{FakeSurface, MapState};
use navmap_core::{
    BridgeError, BridgeResult, ClickTarget, DisplayListener, DisplayNotifier, DisplaySync,
    NavigationContext, PendingCleanup, Selection, SelectionTracker,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct FakeNav {
    system: Option<String>,
    selection: Option<String>,
    propagated: Vec<String>,
    fragment_broken: bool,
}

impl FakeNav {
    fn showing(system: &str) -> Self {
        Self {
            system: Some(system.to_string()),
            ..Self::default()
        }
    }
}

impl NavigationContext for FakeNav {
    fn current_system(&self) -> Option<String> {
        self.system.clone()
    }

    fn current_selection(&self) -> Option<String> {
        self.selection.clone()
    }

    fn write_selection(&mut self, id: &str) -> BridgeResult<()> {
        self.selection = Some(id.to_string());
        Ok(())
    }

    fn propagate(&mut self, id: &str) -> BridgeResult<()> {
        if self.fragment_broken {
            return Err(BridgeError::missing("global function `updateFragment`"));
        }
        self.propagated.push(id.to_string());
        Ok(())
    }
}

fn click(classes: &str, id: Option<&str>) -> ClickTarget {
    ClickTarget::classify(classes.split_whitespace(), id)
}

#[test]
fn zone_click_selects_and_propagates() {
    let mut tracker = SelectionTracker::new();
    let mut nav = FakeNav::showing("Sol");

    let out = tracker
        .handle_click(&click("zone", Some("Z7")), &mut nav)
        .unwrap();

    assert_eq!(out.as_deref(), Some("Z7"));
    assert_eq!(nav.selection.as_deref(), Some("Z7"));
    assert_eq!(nav.propagated, vec!["Z7"]);
    assert_eq!(tracker.selection(), &Selection::Element("Z7".into()));
}

#[test]
fn grid_click_selects_shown_system() {
    let mut tracker = SelectionTracker::new();
    let mut nav = FakeNav::showing("Sol");
    tracker
        .handle_click(&click("object planet", Some("sol_earth")), &mut nav)
        .unwrap();

    tracker.handle_click(&click("grid", None), &mut nav).unwrap();

    assert_eq!(nav.selection.as_deref(), Some("Sol"));
    assert_eq!(nav.propagated, vec!["sol_earth", "Sol"]);
    assert_eq!(tracker.selection(), &Selection::System("Sol".into()));
    // the shown system is read, never written
    assert_eq!(nav.system.as_deref(), Some("Sol"));
}

#[test]
fn clicks_without_identifier_change_nothing() {
    let mut tracker = SelectionTracker::new();
    let mut nav = FakeNav::default();

    assert_eq!(tracker.handle_click(&click("object", None), &mut nav), Ok(None));
    assert_eq!(tracker.handle_click(&click("grid", None), &mut nav), Ok(None));
    assert_eq!(
        tracker.handle_click(&click("mapLegend", Some("x")), &mut nav),
        Ok(None)
    );
    assert_eq!(tracker.selection(), &Selection::Unset);
    assert!(nav.selection.is_none());
    assert!(nav.propagated.is_empty());
}

#[test]
fn propagation_failure_is_reported() {
    let mut tracker = SelectionTracker::new();
    let mut nav = FakeNav {
        fragment_broken: true,
        ..FakeNav::showing("Sol")
    };
    let err = tracker
        .handle_click(&click("zone", Some("Z7")), &mut nav)
        .unwrap_err();
    assert!(err.is_binding());
}

#[test]
fn after_render_binds_once_and_flushes_pending_cleanup() {
    let state = Rc::new(RefCell::new(MapState {
        suggestion_lists: 1,
        ..MapState::default()
    }));
    let pending = PendingCleanup::default();
    let display = DisplaySync::new(pending.clone(), "1.5em");
    let mut surface = FakeSurface {
        state: state.clone(),
    };

    display.after_render(&mut surface).unwrap();
    assert_eq!(state.borrow().suggestion_lists, 1);

    pending.request();
    for _ in 0..5 {
        display.after_render(&mut surface).unwrap();
    }
    let state = state.borrow();
    assert_eq!(state.click_delegates, 1);
    assert_eq!(state.suggestion_lists, 0);
    assert_eq!(state.title_font_size.as_deref(), Some("1.5em"));
    assert!(!pending.is_pending());
}

#[derive(Default)]
struct HostCallback {
    received: RefCell<Vec<String>>,
}

impl DisplayListener for HostCallback {
    fn display_changed(&self, nickname: &str) {
        self.received.borrow_mut().push(nickname.to_string());
    }
}

#[test]
fn fragment_change_after_click_reports_selection() {
    let mut tracker = SelectionTracker::new();
    let mut nav = FakeNav::showing("Li01");
    let host = HostCallback::default();
    let notifier = DisplayNotifier::new("Sirius");

    tracker
        .handle_click(&click("object", Some("li01_01_base")), &mut nav)
        .unwrap();
    let sent = notifier.fragment_changed(&nav, &host);

    assert_eq!(sent.as_deref(), Some("li01_01_base"));
    assert_eq!(*host.received.borrow(), vec!["li01_01_base"]);
}

#[test]
fn overview_and_empty_selection_are_not_reported() {
    let host = HostCallback::default();
    let notifier = DisplayNotifier::new("Sirius");

    assert_eq!(notifier.fragment_changed(&FakeNav::default(), &host), None);
    let overview = FakeNav {
        selection: Some("Sirius".into()),
        ..FakeNav::default()
    };
    assert_eq!(notifier.fragment_changed(&overview, &host), None);
    assert!(host.received.borrow().is_empty());
}
