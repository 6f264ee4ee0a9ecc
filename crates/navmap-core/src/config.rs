//! Host configuration and the switch bridge.
//!
//! The recognised switch keys are whatever the host's switch table lists; the
//! default table covers the five toggles of the navmap's own settings panel.

use crate::error::{BridgeError, BridgeResult};
use serde::Deserialize;
use std::collections::BTreeMap;

pub const DEFAULT_OVERVIEW_NAME: &str = "Sirius";
pub const DEFAULT_FRAGMENT_KEY: &str = "q";
pub const DEFAULT_BACKGROUND: &str = "transparent";
pub const DEFAULT_TITLE_FONT_SIZE: &str = "2em";

const DEFAULT_SWITCHES: [(&str, &str); 5] = [
    ("show-labels", "switch11"),
    ("show-wrecks", "switch1"),
    ("show-zones", "switch2"),
    ("show-overlay-layer", "switch5"),
    ("auto-scale", "switch4"),
];

/// Maps switch keys to the element id of the checkbox that backs them.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SwitchTable(BTreeMap<String, String>);

impl Default for SwitchTable {
    fn default() -> Self {
        Self(
            DEFAULT_SWITCHES
                .iter()
                .map(|(k, id)| (k.to_string(), id.to_string()))
                .collect(),
        )
    }
}

impl SwitchTable {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Element id for `key`, or a configuration error if the key is not recognised.
    pub fn resolve(&self, key: &str) -> BridgeResult<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| BridgeError::unknown_switch(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Name reported when the overview is displayed (empty fragment).
    pub overview_name: String,
    /// Query key the widget uses in its URL fragment.
    pub fragment_key: String,
    pub background_colour: String,
    pub title_font_size: String,
    pub switches: SwitchTable,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            overview_name: DEFAULT_OVERVIEW_NAME.to_string(),
            fragment_key: DEFAULT_FRAGMENT_KEY.to_string(),
            background_colour: DEFAULT_BACKGROUND.to_string(),
            title_font_size: DEFAULT_TITLE_FONT_SIZE.to_string(),
            switches: SwitchTable::default(),
        }
    }
}

impl BridgeConfig {
    /// Parse host-supplied JSON. Blank input yields the defaults.
    pub fn from_json(json: &str) -> BridgeResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BridgeError::Configuration(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BridgeResult<()> {
        if self.fragment_key.is_empty() || self.fragment_key.contains(['=', '&', '#']) {
            return Err(BridgeError::Configuration(format!(
                "invalid fragment key `{}`",
                self.fragment_key
            )));
        }
        check_css_value("background colour", &self.background_colour)?;
        check_css_value("title font size", &self.title_font_size)?;
        if self.switches.is_empty() {
            return Err(BridgeError::Configuration("empty switch table".into()));
        }
        Ok(())
    }
}

/// Reject values that could escape the declaration they are written into.
pub fn check_css_value(what: &str, value: &str) -> BridgeResult<()> {
    let value = value.trim();
    if value.is_empty() || value.contains(['{', '}', ';', '<', '>']) {
        return Err(BridgeError::Configuration(format!("invalid {what} `{value}`")));
    }
    Ok(())
}

/// Host-owned storage for switch values plus its activation side effect.
pub trait SwitchBoard {
    fn checked(&self, element_id: &str) -> BridgeResult<bool>;
    fn set_checked(&mut self, element_id: &str, value: bool) -> BridgeResult<()>;
    /// Re-derive presentation state from every switch value.
    fn activate(&mut self) -> BridgeResult<()>;
}

pub struct ConfigBridge<B> {
    board: B,
    table: SwitchTable,
}

impl<B: SwitchBoard> ConfigBridge<B> {
    pub fn new(board: B, table: SwitchTable) -> Self {
        Self { board, table }
    }

    pub fn get_state(&self, key: &str) -> BridgeResult<bool> {
        let id = self.table.resolve(key)?;
        self.board.checked(id)
    }

    /// Commit `value`, then run activation exactly once. If activation fails
    /// the previous value is put back.
    pub fn set_state(&mut self, key: &str, value: bool) -> BridgeResult<()> {
        let id = self.table.resolve(key)?;
        let previous = self.board.checked(id)?;
        self.board.set_checked(id, value)?;
        if let Err(e) = self.board.activate() {
            if let Err(restore) = self.board.set_checked(id, previous) {
                log::warn!("[config] could not restore {key}: {restore}");
            }
            return Err(e);
        }
        log::info!("[config] {key}={value}");
        Ok(())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.keys()
    }

    pub fn board(&self) -> &B {
        &self.board
    }
}
