#![cfg(target_arch = "wasm32")]
use navmap_core::fragment::with_query;
use navmap_core::history::NavHistory;
use gloo_timers::future::sleep;
use navmap_core::{
    BridgeConfig, ConfigBridge, DisplayListener, PendingCleanup, Readiness, ReadinessWait,
    RenderEntry, RenderHooks, SearchStatus, SelectionTracker, ViewController,
};
use std::cell::{RefCell, RefMut};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod document;
mod dom;
mod events;
mod hooks;
mod normalize;
mod switches;
mod sync;

use constants::{READY_POLL_ATTEMPTS, READY_POLL_INTERVAL_MS, SYNC_HOOK_ID};
use document::NavmapDocument;
use switches::DomSwitchBoard;

/// Process-wide adapter state. Survives repeated initialisation so hooks and
/// listeners are installed once per page.
pub(crate) struct Shared {
    pub config: RefCell<BridgeConfig>,
    pub hooks: Rc<RenderHooks>,
    pub pending: PendingCleanup,
    pub tracker: RefCell<SelectionTracker>,
    pub history: RefCell<NavHistory>,
    display_listener: RefCell<Option<js_sys::Function>>,
}

impl Shared {
    fn new(config: BridgeConfig) -> Self {
        Self {
            config: RefCell::new(config),
            hooks: Rc::new(RenderHooks::new()),
            pending: PendingCleanup::default(),
            tracker: RefCell::new(SelectionTracker::new()),
            history: RefCell::new(NavHistory::new()),
            display_listener: RefCell::new(None),
        }
    }
}

/// Delivered on a later task, so the host may call back into the bridge freely.
impl DisplayListener for Shared {
    fn display_changed(&self, nickname: &str) {
        let Some(listener) = self.display_listener.borrow().clone() else {
            return;
        };
        let nickname = nickname.to_string();
        spawn_local(async move {
            if let Err(e) = listener.call1(&JsValue::NULL, &JsValue::from_str(&nickname)) {
                log::warn!("[sync] display listener threw: {:?}", e);
            }
        });
    }
}

thread_local! {
    static SHARED: RefCell<Option<Rc<Shared>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("navmap-bridge loaded");
    Ok(())
}

/// Wait for the widget, adapt its document and return the host's handle.
///
/// May be called again (for example after the host reloads its settings);
/// entry points stay wrapped once and listeners stay bound once.
#[wasm_bindgen]
pub async fn initialise(config_json: String) -> Result<NavmapBridge, JsValue> {
    init(&config_json).await.map_err(|e| {
        log::error!("[init] {:?}", e);
        dom::to_js_error(format!("{e:#}"))
    })
}

async fn wait_for_widget(window: &web::Window) -> anyhow::Result<()> {
    let mut wait = ReadinessWait::new(READY_POLL_ATTEMPTS);
    loop {
        let ready = RenderEntry::ALL
            .iter()
            .all(|e| dom::global_function(window, e.global_name()).is_ok());
        match wait.check(ready)? {
            Readiness::Ready { polls } => {
                log::info!("[init] widget ready after {polls} polls");
                return Ok(());
            }
            Readiness::Retry => sleep(Duration::from_millis(READY_POLL_INTERVAL_MS)).await,
        }
    }
}

async fn init(config_json: &str) -> anyhow::Result<NavmapBridge> {
    let config = BridgeConfig::from_json(config_json)?;
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    wait_for_widget(&window).await?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    normalize::normalize(&document, &config.background_colour)?;
    let table = config.switches.clone();

    let existing = SHARED.with(|slot| slot.borrow().clone());
    let shared = match existing {
        Some(shared) => {
            log::info!("[init] already initialised; refreshing configuration");
            *shared.config.borrow_mut() = config;
            shared
        }
        None => {
            let shared = Rc::new(Shared::new(config));
            SHARED.with(|slot| *slot.borrow_mut() = Some(shared.clone()));
            shared
        }
    };

    for entry in RenderEntry::ALL {
        let sync_shared = shared.clone();
        shared
            .hooks
            .install(entry, SYNC_HOOK_ID, move || sync::after_render(&sync_shared));
        hooks::wrap_entry_point(&window, entry, &shared.hooks)?;
    }
    events::hashchange::wire_hashchange(&window, shared.clone());

    let view = ViewController::new(
        NavmapDocument::new(window.clone(), document.clone(), shared.hooks.clone()),
        shared.pending.clone(),
    );
    let switches = ConfigBridge::new(DomSwitchBoard::new(window, document), table);
    log::info!("[init] bridge ready");
    Ok(NavmapBridge {
        shared,
        view: RefCell::new(view),
        switches: RefCell::new(switches),
    })
}

/// Host-facing command surface.
#[wasm_bindgen]
pub struct NavmapBridge {
    shared: Rc<Shared>,
    view: RefCell<ViewController<NavmapDocument>>,
    switches: RefCell<ConfigBridge<DomSwitchBoard>>,
}

fn busy(what: &str) -> JsValue {
    dom::to_js_error(format!("{what} is busy"))
}

impl NavmapBridge {
    fn view(&self) -> Result<RefMut<'_, ViewController<NavmapDocument>>, JsValue> {
        self.view.try_borrow_mut().map_err(|_| busy("view"))
    }

    fn switches(&self) -> Result<RefMut<'_, ConfigBridge<DomSwitchBoard>>, JsValue> {
        self.switches.try_borrow_mut().map_err(|_| busy("configuration"))
    }
}

#[wasm_bindgen]
impl NavmapBridge {
    /// Search for and display `name`. Returns true if the widget navigated
    /// before returning, false if the search is still pending.
    #[wasm_bindgen(js_name = displayLocation)]
    pub fn display_location(&self, name: &str) -> Result<bool, JsValue> {
        let status = self
            .view()?
            .display_location(name)
            .map_err(dom::to_js_error)?;
        Ok(status == SearchStatus::Completed)
    }

    #[wasm_bindgen(js_name = displayOverview)]
    pub fn display_overview(&self) -> Result<(), JsValue> {
        self.view()?.display_overview().map_err(dom::to_js_error)
    }

    #[wasm_bindgen(js_name = highlightSelection)]
    pub fn highlight_selection(&self, id: &str) -> Result<bool, JsValue> {
        Ok(self.view()?.highlight_selection(id))
    }

    #[wasm_bindgen(js_name = placeMarker)]
    pub fn place_marker(&self, x: f64, y: f64, z: f64) -> Result<(), JsValue> {
        self.view()?
            .place_marker(x, y, z)
            .map(|_| ())
            .map_err(dom::to_js_error)
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self, key: &str) -> Result<bool, JsValue> {
        self.switches()?.get_state(key).map_err(dom::to_js_error)
    }

    #[wasm_bindgen(js_name = setState)]
    pub fn set_state(&self, key: &str, value: bool) -> Result<(), JsValue> {
        self.switches()?
            .set_state(key, value)
            .map_err(dom::to_js_error)
    }

    #[wasm_bindgen(js_name = switchKeys)]
    pub fn switch_keys(&self) -> Result<Vec<String>, JsValue> {
        Ok(self.switches()?.keys().map(str::to_string).collect())
    }

    #[wasm_bindgen(js_name = setBackgroundColour)]
    pub fn set_background_colour(&self, colour: &str) -> Result<(), JsValue> {
        let (_, document) =
            dom::window_document().ok_or_else(|| dom::to_js_error("no document"))?;
        normalize::apply_background(&document, colour).map_err(dom::to_js_error)?;
        self.shared.config.borrow_mut().background_colour = colour.trim().to_string();
        Ok(())
    }

    /// Register (or clear, with `null`) the host's display-changed callback.
    #[wasm_bindgen(js_name = onDisplayChanged)]
    pub fn on_display_changed(&self, listener: Option<js_sys::Function>) {
        *self.shared.display_listener.borrow_mut() = listener;
    }

    /// Name shown according to the URL fragment; the overview name when empty.
    pub fn displayed(&self) -> String {
        match web::window() {
            Some(window) => events::hashchange::current_displayed(&window, &self.shared),
            None => self.shared.config.borrow().overview_name.clone(),
        }
    }

    /// Point the URL fragment at `name`, which makes the widget display it.
    #[wasm_bindgen(js_name = setDisplayed)]
    pub fn set_displayed(&self, name: &str) -> Result<(), JsValue> {
        let window = web::window().ok_or_else(|| dom::to_js_error("no window"))?;
        let location = window.location();
        let hash = location.hash().unwrap_or_default();
        let key = self.shared.config.borrow().fragment_key.clone();
        location.set_hash(&with_query(&hash, &key, name))
    }

    /// The canonical selection, if any click has set one.
    pub fn selection(&self) -> Option<String> {
        self.shared
            .tracker
            .borrow()
            .selection()
            .id()
            .map(str::to_string)
    }

    pub fn highlighted(&self) -> Option<String> {
        self.view
            .try_borrow()
            .ok()
            .and_then(|v| v.highlighted().map(str::to_string))
    }

    #[wasm_bindgen(js_name = goBack)]
    pub fn go_back(&self) -> Result<bool, JsValue> {
        let target = self.shared.history.borrow_mut().go_back();
        self.display_history_target(target)
    }

    #[wasm_bindgen(js_name = goForward)]
    pub fn go_forward(&self) -> Result<bool, JsValue> {
        let target = self.shared.history.borrow_mut().go_forward();
        self.display_history_target(target)
    }

    #[wasm_bindgen(js_name = canGoBack)]
    pub fn can_go_back(&self) -> bool {
        self.shared.history.borrow().can_go_back()
    }

    #[wasm_bindgen(js_name = canGoForward)]
    pub fn can_go_forward(&self) -> bool {
        self.shared.history.borrow().can_go_forward()
    }
}

impl NavmapBridge {
    fn display_history_target(&self, target: Option<String>) -> Result<bool, JsValue> {
        match target {
            Some(name) => {
                self.display_location(&name)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
