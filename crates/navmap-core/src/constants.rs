// Names and selectors exposed by the embedded widget. They form its external
// contract and are fixed on the widget's side.

// Global render entry points
pub const RENDER_LOCATION_FN: &str = "generateMap";
pub const RENDER_OVERVIEW_FN: &str = "generateUniverseMap";

// Shared navigation scalars
pub const CURRENT_SYSTEM_VAR: &str = "currentSystem";
pub const CURRENT_SELECTION_VAR: &str = "currentSystemNickname";

// Host page functions
pub const ACTIVATE_CONFIG_FN: &str = "updateConfigClasses";
pub const UPDATE_FRAGMENT_FN: &str = "updateFragment";
pub const MAP_OBJECT_CTOR: &str = "mapObject";

// Element selectors
pub const BODY: &str = "body";
pub const MAP_CONTAINER: &str = ".mapContainer";
pub const MAP: &str = ".map";
pub const NAV_CONTAINER: &str = ".navContainer";
pub const LEGEND: &str = ".mapLegend";
pub const SYSTEM_ENTRY: &str = ".system";
pub const SYSTEM_TITLE: &str = ".systemTitle";
pub const SUGGESTIONS: &str = ".autocomplete-suggestions";
pub const SEARCH_FIELD_ID: &str = "searchField";

// Clickable element classes, matched on the clicked descendant at event time
pub const LOCATION_CLASS: &str = "object";
pub const ZONE_CLASS: &str = "zone";
pub const GRID_CLASS: &str = "grid";
pub const CLICKABLE_SELECTOR: &str = ".object, .zone, .grid";

// Attributes
pub const INTERNAL_NICKNAME_ATTR: &str = "data-internal-nickname";
pub const SYSTEM_NICKNAME_ATTR: &str = "data-system-nickname";

// Marker classes
pub const CURRENT_POSITION_CLASSES: &str = "playerShip latestPos";
pub const CURRENT_POSITION_SELECTOR: &str = ".playerShip";

// Highlight styling for overview entries
pub const ENTRY_DEFAULT_COLOUR: &str = "white";
pub const ENTRY_DEFAULT_WEIGHT: &str = "normal";
pub const ENTRY_HIGHLIGHT_COLOUR: &str = "gold";
pub const ENTRY_HIGHLIGHT_WEIGHT: &str = "bold";
