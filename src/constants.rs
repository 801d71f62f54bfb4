// DOM naming and pointer sampling constants for the web front end.
//
// Class names match the selectors in `dome.css`; keep both in sync.

// Structure
pub const ROOT_CLASS: &str = "dg-root";
pub const MAIN_CLASS: &str = "dg-main";
pub const STAGE_CLASS: &str = "dg-stage";
pub const SPHERE_CLASS: &str = "dg-sphere";
pub const ITEM_CLASS: &str = "dg-item";
pub const ITEM_IMAGE_CLASS: &str = "dg-item-image";
pub const VIEWER_CLASS: &str = "dg-viewer";
pub const SCRIM_CLASS: &str = "dg-scrim";
pub const FRAME_CLASS: &str = "dg-frame";
pub const OVERLAY_BLUR_CLASS: &str = "dg-overlay-blur";
pub const EDGE_FADE_TOP_CLASS: &str = "dg-edge-fade dg-edge-fade-top";
pub const EDGE_FADE_BOTTOM_CLASS: &str = "dg-edge-fade dg-edge-fade-bottom";

// Overlay
pub const ENLARGE_CLASS: &str = "dg-enlarge";
pub const ENLARGE_CLOSING_CLASS: &str = "dg-enlarge-closing";
pub const ACTION_BAR_CLASS: &str = "dg-action-bar";
pub const CAPTION_CLASS: &str = "dg-caption";
pub const OPEN_BUTTON_CLASS: &str = "dg-open";
pub const OPEN_BUTTON_LABEL: &str = "Open";

// Document-level
pub const SCROLL_LOCK_CLASS: &str = "dg-scroll-lock";
pub const STYLESHEET_ID: &str = "dome-gallery-styles";
pub const TILE_INDEX_ATTR: &str = "data-tile";
pub const ENLARGING_ATTR: &str = "data-enlarging";
pub const TILE_ARIA_FALLBACK: &str = "Open image";

// Release velocity estimation (pointer timestamps are in ms)
pub const VELOCITY_WINDOW_MS: f64 = 100.0; // samples older than this before the newest are ignored
pub const VELOCITY_STALE_MS: f64 = 80.0; // pointer held still this long before release reports zero
pub const VELOCITY_MAX_SAMPLES: usize = 8;
