//! One avoidance decision for a cursor/window pair
//!
//! Glue between the pure pieces: convert physical input to logical space
//! with the monitor's DPI, resolve that monitor's overrides, measure, push,
//! convert the push back to device pixels and keep the result on screen.
//! The caller owns the cursor hook and the actual window move.

use serde::Serialize;
use tracing::debug;

use crate::config::{AppConfig, MultiMonitorConfiguration, WrapPreference};
use crate::dpi::DpiInfo;
use crate::proximity::{ProximityDetector, ProximityError};
use crate::types::{Point, Rect};

/// Monitor that owns the window, all rectangles in physical pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitor {
    pub id: String,
    pub dpi: DpiInfo,
    pub bounds: Rect,
    /// Bounds minus taskbars/docks
    pub work_area: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AvoidanceDecision {
    /// Monitor has avoidance turned off
    Disabled,
    /// Cursor is not close enough, `distance` in logical pixels
    Clear { distance: f64 },
    /// Move the window by `vector` to `target` (physical pixels)
    Push { distance: f64, vector: Point, target: Rect },
}

#[derive(Debug)]
pub struct AvoidanceEngine {
    detector: ProximityDetector,
    config: AppConfig,
}

impl AvoidanceEngine {
    pub fn new(config: AppConfig) -> Result<Self, ProximityError> {
        let detector = ProximityDetector::new(config.proximity)?;
        Ok(Self { detector, config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn evaluate(&self, cursor: Point, window: Rect, monitor: &Monitor) -> AvoidanceDecision {
        let Some(settings) = self.config.effective_settings(&monitor.id) else {
            debug!(monitor = %monitor.id, "avoidance disabled for monitor");
            return AvoidanceDecision::Disabled;
        };

        let logical_cursor = monitor.dpi.physical_to_logical(cursor);
        let logical_window = monitor.dpi.physical_to_logical_rect(window);
        let distance = self.detector.calculate_proximity(logical_cursor, logical_window);

        if !self.detector.is_within_proximity(
            logical_cursor,
            logical_window,
            f64::from(settings.proximity_threshold),
        ) {
            return AvoidanceDecision::Clear { distance };
        }

        let logical_vector = self
            .detector
            .calculate_push_vector(logical_cursor, logical_window, settings.push_distance);
        let vector = monitor.dpi.logical_to_physical(logical_vector);

        let multi = &self.config.multi_monitor;
        let area = if multi.respect_taskbar_areas {
            monitor.work_area
        } else {
            monitor.bounds
        };
        let target = fit_to_area(window.translated(vector), area, multi);

        debug!(
            monitor = %monitor.id,
            dpi = %monitor.dpi,
            cursor = %cursor,
            distance,
            vector = %vector,
            target = %target,
            "pushing window"
        );

        AvoidanceDecision::Push { distance, vector, target }
    }
}

/// Keep `target` inside `area`, wrapping an overflowing axis when allowed
pub fn fit_to_area(target: Rect, area: Rect, config: &MultiMonitorConfiguration) -> Rect {
    let overflow_x = overflow(target.left(), target.right(), area.left(), area.right());
    let overflow_y = overflow(target.top(), target.bottom(), area.top(), area.bottom());

    let (wrap_x, wrap_y) = if !config.enable_wrapping {
        (false, false)
    } else {
        match config.preferred_wrap_behavior {
            WrapPreference::Clamp => (false, false),
            WrapPreference::Horizontal => (true, false),
            WrapPreference::Vertical => (false, true),
            WrapPreference::Smart => {
                if overflow_x == 0 && overflow_y == 0 {
                    (false, false)
                } else if overflow_x.abs() >= overflow_y.abs() {
                    (true, false)
                } else {
                    (false, true)
                }
            }
        }
    };

    let x = place_axis(target.left(), i64::from(target.width), area.left(), area.right(), overflow_x, wrap_x);
    let y = place_axis(target.top(), i64::from(target.height), area.top(), area.bottom(), overflow_y, wrap_y);

    Rect::new(to_i32(x), to_i32(y), target.width, target.height)
}

/// Negative when past the start edge, positive when past the end edge
fn overflow(start: i64, end: i64, area_start: i64, area_end: i64) -> i64 {
    if start < area_start {
        start - area_start
    } else if end > area_end {
        end - area_end
    } else {
        0
    }
}

fn place_axis(start: i64, size: i64, area_start: i64, area_end: i64, overflow: i64, wrap: bool) -> i64 {
    let max_start = (area_end - size).max(area_start);
    let placed = match (wrap, overflow.signum()) {
        // Left the area at the start, reappear flush with the far edge
        (true, -1) => max_start,
        (true, 1) => area_start,
        _ => start,
    };
    placed.clamp(area_start, max_start)
}

fn to_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
