// Interaction and layout tuning shared by the core and the web front end.
//
// Caller-facing options live in `DomeConfig`; these values are fixed policy.

// Lattice
pub const LATTICE_COLUMN_STEP: i32 = 2; // angular units between neighbouring columns
pub const TILE_SPAN: i32 = 2; // every slot covers 2x2 angular units
pub const EVEN_COLUMN_ROWS: [i32; 5] = [-4, -2, 0, 2, 4];
pub const ODD_COLUMN_ROWS: [i32; 5] = [-3, -1, 1, 3, 5];
pub const ROWS_PER_COLUMN: usize = EVEN_COLUMN_ROWS.len();

// Viewport fitting
pub const AUTO_BASIS_ASPECT: f32 = 1.3; // width/height at which `auto` switches to width
pub const HEIGHT_GUARD_FACTOR: f32 = 1.35; // radius never exceeds height * this
pub const MIN_VIEWER_PAD_PX: f32 = 8.0;

// Gesture disambiguation
pub const TAP_MAX_DISTANCE_SQ_PX: f32 = 16.0; // squared displacement past which a press is a drag
pub const TAP_AFTER_DRAG_VETO_MS: u64 = 80;
pub const OPEN_DWELL_MS: u64 = 250;

// Release velocity (px/ms, as reported by the pointer layer)
pub const REPORTED_VELOCITY_EPSILON: f32 = 0.001;
pub const FALLBACK_VELOCITY_GAIN: f32 = 0.02;
pub const FALLBACK_VELOCITY_MAX: f32 = 1.2;
pub const INERTIA_START_THRESHOLD: f32 = 0.005;

// Inertial decay
pub const INERTIA_MAX_RELEASE_VELOCITY: f32 = 1.4;
pub const INERTIA_VELOCITY_SCALE: f32 = 80.0;
pub const INERTIA_ROTATION_DIVISOR: f32 = 200.0;
pub const INERTIA_FRICTION_BASE: f32 = 0.94;
pub const INERTIA_FRICTION_SPAN: f32 = 0.055;
pub const INERTIA_STOP_BASE: f32 = 0.015;
pub const INERTIA_STOP_SPAN: f32 = 0.01;
pub const INERTIA_MAX_FRAMES_BASE: f32 = 90.0;
pub const INERTIA_MAX_FRAMES_SPAN: f32 = 270.0;

// Transition
pub const TILE_FADE_IN_MS: u64 = 300;
pub const FALLBACK_CAPTION: &str = "Selected image";
