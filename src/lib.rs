#![forbid(unsafe_code)]

//! Cursor avoidance core: DPI conversion, proximity measurement, push
//! vectors and per-monitor configuration.

pub mod avoidance;
pub mod config;
pub mod constants;
pub mod dpi;
pub mod proximity;
pub mod types;

pub use avoidance::{AvoidanceDecision, AvoidanceEngine, Monitor};
pub use config::{AppConfig, EffectiveSettings, MultiMonitorConfiguration, PerMonitorSettings, WrapPreference};
pub use dpi::DpiInfo;
pub use proximity::{ProximityAlgorithm, ProximityConfiguration, ProximityDetector, ProximityError};
pub use types::{Point, Rect};
