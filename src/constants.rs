//! Application-wide constants
//!
//! Magic numbers and string literals shared across the crate, kept in one
//! place so validation messages and defaults never drift apart.

/// DPI scaling constants
pub mod dpi {
    /// System baseline DPI (100% scaling)
    pub const BASELINE: u32 = 96;

    /// Baseline DPI as a float, for scale factor division
    pub const BASELINE_F64: f64 = 96.0;
}

/// Proximity and push defaults (logical pixels)
pub mod defaults {
    /// Global proximity threshold used when a monitor has no override
    pub const PROXIMITY_THRESHOLD: i32 = 50;

    /// Global push distance used when a monitor has no override
    pub const PUSH_DISTANCE: i32 = 100;

    /// Neutral sensitivity multiplier
    pub const SENSITIVITY_MULTIPLIER: f64 = 1.0;

    /// Default log level when neither config nor environment sets one
    pub const LOG_LEVEL: &str = "info";
}

/// Validation ceilings for user-supplied values
pub mod validation {
    /// Largest accepted proximity threshold (pixels)
    pub const MAX_PROXIMITY_THRESHOLD: i32 = 500;

    /// Largest accepted push distance (pixels)
    pub const MAX_PUSH_DISTANCE: i32 = 1000;
}

/// Config file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "cursor-avoid";

    /// Config filename
    pub const FILENAME: &str = "config.toml";
}

/// Environment variable names
pub mod env {
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const THRESHOLD: &str = "CURSOR_AVOID_THRESHOLD";
    pub const PUSH_DISTANCE: &str = "CURSOR_AVOID_PUSH_DISTANCE";
}
