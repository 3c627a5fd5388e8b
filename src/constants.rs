//! Application-wide constants
//!
//! This module contains the magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Application config file location
pub mod config {
    /// Directory name under the platform config/data dirs
    pub const APP_DIR: &str = "flythru-controls";

    /// Application config filename
    pub const FILENAME: &str = "config.json";
}

/// Control state persistence
pub mod storage {
    /// Fixed key the control panel state is stored under
    pub const CONTROLS_STATE_KEY: &str = "flyThruAnimationControlsState";

    /// Extension appended to a storage key to form its file name
    pub const FILE_EXTENSION: &str = "json";
}

/// Render configuration conversions
pub mod render {
    /// Displacement exaggeration applied when the exaggeration box is checked
    pub const STANDARD_EXAGGERATION: f32 = 20.0;

    /// Exaggeration applied when the box is unchecked (true scale)
    pub const NO_EXAGGERATION: f32 = 1.0;

    /// Light brightness at slider value 0
    pub const MIN_BRIGHTNESS: f32 = 0.2;

    /// Brightness added across the full slider range (0.2 + 0.6 = 0.8 at 100)
    pub const BRIGHTNESS_SPAN: f32 = 0.6;
}

/// Slider ranges and compiled-in control defaults
pub mod controls {
    pub const SPEED_MIN: i32 = 5;
    pub const SPEED_MAX: i32 = 30;
    pub const SPEED_STEP: i32 = 5;
    pub const DEFAULT_SPEED: i32 = 30;

    pub const BRIGHTNESS_MIN: i32 = 0;
    pub const BRIGHTNESS_MAX: i32 = 100;
    pub const BRIGHTNESS_STEP: i32 = 1;
    pub const DEFAULT_BRIGHTNESS: i32 = 50;

    /// Unit suffix of the speed readout label
    pub const SPEED_UNITS: &str = "km/hr";
}

/// Validation bounds for the application config
pub mod validation {
    pub const MIN_WINDOW_WIDTH: u16 = 320;
    pub const MAX_WINDOW_WIDTH: u16 = 7680;
    pub const MIN_WINDOW_HEIGHT: u16 = 240;
    pub const MAX_WINDOW_HEIGHT: u16 = 4320;
}

/// Simulated animation loop
pub mod animation {
    /// Ticker thread frame period
    pub const FRAME_INTERVAL_MS: u64 = 16;

    /// Length of the bridge deck the truck crosses before wrapping, in meters
    pub const ROUTE_LENGTH_M: f32 = 120.0;
}
