/// Branch name used when a connection does not name one
pub const DEFAULT_BRANCH_NAME: &str = "Main line";

/// Color given to freshly created lines
pub const DEFAULT_LINE_COLOR: &str = "ffffff";

pub const NEW_STATION_NAME: &str = "New Station";

/// File name offered when saving a dataset that was never loaded from disk
pub const DEFAULT_DATASET_FILENAME: &str = "highways.json";

pub const APP_TITLE: &str = "Ice Highway Editor";

/// Zoom level of a fresh viewport (screen pixels per world unit)
pub const INITIAL_ZOOM: f64 = 0.05;
pub const ZOOM_IN_FACTOR: f64 = 1.2;
pub const ZOOM_OUT_FACTOR: f64 = 0.8;
/// Smallest accepted zoom. Below it a pan delta divided by the zoom overflows.
pub const MIN_ZOOM: f64 = 1e-9;

// Hit-test radii, all in screen pixels. Comparisons are strict.
pub const STATION_HIT_RADIUS: f64 = 15.0;
pub const SEGMENT_HIT_TOLERANCE: f64 = 5.0;
pub const VERTEX_HIT_RADIUS: f64 = 8.0;
pub const LABEL_HOVER_RADIUS: f64 = 12.0;

/// Opacity of elements unrelated to the current selection
pub const UNRELATED_ALPHA: f64 = 0.15;

pub const CANVAS_BACKGROUND_COLOR: &str = "#ffffff";
pub const ROAD_CASING_COLOR: &str = "#000000";
pub const FALLBACK_LINE_COLOR: &str = "#000000";
pub const INVALID_COLOR_PREVIEW: &str = "#808080";

// Road stroke widths grow with zoom: base + per_zoom * zoom
pub const CASING_BASE_WIDTH: f64 = 5.0;
pub const CASING_ZOOM_WIDTH: f64 = 8.0;
pub const STROKE_BASE_WIDTH: f64 = 3.0;
pub const STROKE_ZOOM_WIDTH: f64 = 4.0;

pub const VERTEX_HANDLE_SIZE: f64 = 8.0;
pub const VERTEX_HANDLE_COLOR: &str = "#0000ff";
pub const ACTIVE_VERTEX_HANDLE_COLOR: &str = "#ff0000";

pub const STATION_ICON_MIN_SIZE: f64 = 10.0;
pub const STATION_ICON_MAX_SIZE: f64 = 20.0;
pub const STATION_ICON_ZOOM_SCALE: f64 = 150.0;
pub const STATION_ICON_BORDER: f64 = 2.0;
pub const STATION_ICON_COLOR: &str = "#000000";
pub const STATION_ICON_FILL: &str = "#ffffff";
pub const ELEVATOR_STROKE_WIDTH: f64 = 3.0;

pub const LABEL_FONT: &str = "bold 12px sans-serif";
pub const LABEL_COLOR: &str = "#000000";
pub const LABEL_CONTOUR_COLOR: &str = "#ffffff";
pub const LABEL_OFFSET_X: f64 = 12.0;
pub const LABEL_OFFSET_Y: f64 = 5.0;

/// Quick picks offered next to the line color field: (hex, label)
pub const COLOR_PRESETS: [(&str, &str); 6] = [
    ("ff0000", "Red"),
    ("00fff0", "Aqua"),
    ("0000ff", "Blue"),
    ("00ff00", "Green"),
    ("aa0044", "TNIH"),
    ("ff00e3", "Monaco"),
];
