// Identifiers owned by the bridge itself (as opposed to the widget's contract
// in `navmap_core::constants`).

// After-render callback id shared by both entry points
pub const SYNC_HOOK_ID: &str = "display-sync";

// Set on <body> once the delegated click listener is attached
pub const BRIDGE_BOUND_ATTR: &str = "data-navmap-bridge";

// Set on a wrapper function so a second initialisation never wraps it again
pub const HOOK_MARKER_PROP: &str = "__navmapBridgeHook";

// Widget readiness polling
pub const READY_POLL_INTERVAL_MS: u64 = 100;
pub const READY_POLL_ATTEMPTS: u32 = 150; // 15 s before giving up
