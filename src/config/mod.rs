//! Configuration for cursor avoidance
//!
//! - **app**: the top-level TOML file (global threshold, push distance, detector tuning)
//! - **monitor**: per-monitor overrides and wrapping behavior

pub mod app;
pub mod monitor;

// Re-export commonly used types
pub use app::AppConfig;
pub use monitor::{EffectiveSettings, MultiMonitorConfiguration, PerMonitorSettings, WrapPreference};
