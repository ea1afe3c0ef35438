//! Multi-monitor overrides
//!
//! Declarative data with on-demand validation. Nothing here is enforced
//! while the values are being edited; `validate()` reports every problem as
//! a readable string and leaves the decision to the caller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::validation::{MAX_PROXIMITY_THRESHOLD, MAX_PUSH_DISTANCE};

/// What to do when a pushed window would leave its monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapPreference {
    /// Wrap whichever axis overflows more, clamp the other
    #[default]
    Smart,
    /// Wrap left/right only
    Horizontal,
    /// Wrap top/bottom only
    Vertical,
    /// Never wrap, keep the window pinned inside the monitor
    Clamp,
}

/// Override record for a single monitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerMonitorSettings {
    pub enabled: bool,

    /// Absent means inherit the global threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_proximity_threshold: Option<i32>,

    /// Absent means inherit the global push distance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_push_distance: Option<i32>,
}

impl Default for PerMonitorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            custom_proximity_threshold: None,
            custom_push_distance: None,
        }
    }
}

impl PerMonitorSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(threshold) = self.custom_proximity_threshold {
            errors.extend(check_range("Custom proximity threshold", threshold, MAX_PROXIMITY_THRESHOLD));
        }
        if let Some(distance) = self.custom_push_distance {
            errors.extend(check_range("Custom push distance", distance, MAX_PUSH_DISTANCE));
        }
        errors
    }
}

/// At most one error: a value cannot be both `<= 0` and above `max`
pub(crate) fn check_range(label: &str, value: i32, max: i32) -> Option<String> {
    if value <= 0 {
        Some(format!("{label} must be greater than 0"))
    } else if value > max {
        Some(format!("{label} should not exceed {max} pixels"))
    } else {
        None
    }
}

/// Threshold and push distance that apply to one monitor after overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectiveSettings {
    pub proximity_threshold: i32,
    pub push_distance: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiMonitorConfiguration {
    pub enable_wrapping: bool,
    pub preferred_wrap_behavior: WrapPreference,
    pub respect_taskbar_areas: bool,

    /// Monitor identifier -> overrides
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub per_monitor_settings: BTreeMap<String, PerMonitorSettings>,
}

impl Default for MultiMonitorConfiguration {
    fn default() -> Self {
        Self {
            enable_wrapping: true,
            preferred_wrap_behavior: WrapPreference::default(),
            respect_taskbar_areas: true,
            per_monitor_settings: BTreeMap::new(),
        }
    }
}

impl MultiMonitorConfiguration {
    /// Every problem across every monitor entry
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (monitor_id, settings) in &self.per_monitor_settings {
            if monitor_id.is_empty() {
                errors.push("Monitor configuration has an empty monitor identifier".to_string());
            }
            errors.extend(
                settings
                    .validate()
                    .into_iter()
                    .map(|error| format!("Monitor '{monitor_id}': {error}")),
            );
        }
        errors
    }

    /// Resolve overrides for `monitor_id` against the global values
    ///
    /// Returns `None` when the monitor is explicitly disabled. Monitors with
    /// no entry inherit everything.
    pub fn effective_settings(
        &self,
        monitor_id: &str,
        global_threshold: i32,
        global_push_distance: i32,
    ) -> Option<EffectiveSettings> {
        let Some(settings) = self.per_monitor_settings.get(monitor_id) else {
            return Some(EffectiveSettings {
                proximity_threshold: global_threshold,
                push_distance: global_push_distance,
            });
        };

        if !settings.enabled {
            return None;
        }

        Some(EffectiveSettings {
            proximity_threshold: settings.custom_proximity_threshold.unwrap_or(global_threshold),
            push_distance: settings.custom_push_distance.unwrap_or(global_push_distance),
        })
    }
}
