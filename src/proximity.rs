//! Cursor-to-window proximity and push vectors
//!
//! Everything here assumes the cursor and the window are already in one
//! coordinate space (see [`crate::dpi::DpiInfo`]). Construction is the only
//! fallible step. Per-call bad input (negative threshold, non-positive push
//! distance) returns a neutral result, since these calls run on every pointer
//! move and must never break the calling loop.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::defaults::SENSITIVITY_MULTIPLIER;
use crate::types::{Point, Rect};

/// Errors raised when building a [`ProximityDetector`]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProximityError {
    #[error("Invalid proximity configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

/// How per-axis offsets combine into a single distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProximityAlgorithm {
    #[default]
    EuclideanDistance,
    ManhattanDistance,
    /// Distance to the nearer edge only, never the corner diagonal
    NearestEdgeDistance,
}

impl ProximityAlgorithm {
    /// Combine already-weighted axis offsets
    pub fn combine(self, dx: f64, dy: f64) -> f64 {
        let (ax, ay) = (dx.abs(), dy.abs());
        match self {
            Self::EuclideanDistance => ax.hypot(ay),
            Self::ManhattanDistance => ax + ay,
            Self::NearestEdgeDistance => {
                // Aligned on one axis: only the other axis is outside
                if ax == 0.0 {
                    ay
                } else if ay == 0.0 {
                    ax
                } else {
                    ax.min(ay)
                }
            }
        }
    }
}

/// Tuning for a [`ProximityDetector`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfiguration {
    pub algorithm: ProximityAlgorithm,
    pub horizontal_sensitivity_multiplier: f64,
    pub vertical_sensitivity_multiplier: f64,
}

impl Default for ProximityConfiguration {
    fn default() -> Self {
        Self {
            algorithm: ProximityAlgorithm::default(),
            horizontal_sensitivity_multiplier: SENSITIVITY_MULTIPLIER,
            vertical_sensitivity_multiplier: SENSITIVITY_MULTIPLIER,
        }
    }
}

impl ProximityConfiguration {
    /// Both multipliers must be strictly positive (NaN is rejected too)
    pub fn validate(&self) -> Result<(), ProximityError> {
        check_multiplier("horizontal", self.horizontal_sensitivity_multiplier)?;
        check_multiplier("vertical", self.vertical_sensitivity_multiplier)?;
        Ok(())
    }
}

fn check_multiplier(axis: &str, value: f64) -> Result<(), ProximityError> {
    // `!(x > 0)` so NaN fails as well
    if !(value > 0.0) || !value.is_finite() {
        return Err(ProximityError::InvalidConfiguration {
            reason: format!("{axis} sensitivity multiplier must be a finite value greater than 0, got {value}"),
        });
    }
    Ok(())
}

/// Stateless proximity calculator
///
/// Holds only its validated configuration, so one instance can be shared
/// across threads and called repeatedly with identical results.
#[derive(Debug, Clone, Default)]
pub struct ProximityDetector {
    config: ProximityConfiguration,
}

impl ProximityDetector {
    pub fn new(config: ProximityConfiguration) -> Result<Self, ProximityError> {
        config.validate()?;
        info!(
            algorithm = ?config.algorithm,
            horizontal = config.horizontal_sensitivity_multiplier,
            vertical = config.vertical_sensitivity_multiplier,
            "proximity detector configured"
        );
        Ok(Self { config })
    }

    pub fn configuration(&self) -> &ProximityConfiguration {
        &self.config
    }

    /// Weighted distance from `cursor` to the closed rectangle `window`
    ///
    /// Zero when the cursor is inside or on an edge. Always finite and
    /// non-negative.
    pub fn calculate_proximity(&self, cursor: Point, window: Rect) -> f64 {
        let (closest_x, closest_y) = window.closest_point(cursor);
        let dx = (i64::from(cursor.x) - closest_x) as f64 * self.config.horizontal_sensitivity_multiplier;
        let dy = (i64::from(cursor.y) - closest_y) as f64 * self.config.vertical_sensitivity_multiplier;
        let distance = self.config.algorithm.combine(dx, dy);
        if distance.is_finite() { distance } else { f64::MAX }
    }

    /// Distance is at most `threshold`; a negative threshold is never satisfied
    pub fn is_within_proximity(&self, cursor: Point, window: Rect, threshold: f64) -> bool {
        if !(threshold >= 0.0) {
            debug!(threshold, "negative proximity threshold, treating as out of range");
            return false;
        }
        self.calculate_proximity(cursor, window) <= threshold
    }

    /// Displacement of length `push_distance` that moves `window` away from `cursor`
    ///
    /// The direction runs from the cursor toward a reference point: the
    /// window's center when the cursor is strictly inside it, otherwise the
    /// closest point on the window. When the two coincide the push goes
    /// toward positive X.
    pub fn calculate_push_vector(&self, cursor: Point, window: Rect, push_distance: i32) -> Point {
        if push_distance <= 0 {
            debug!(push_distance, "non-positive push distance, returning zero vector");
            return Point::ZERO;
        }

        let (ref_x, ref_y) = if window.contains_strictly(cursor) {
            window.center()
        } else {
            let (x, y) = window.closest_point(cursor);
            (x as f64, y as f64)
        };

        let dir_x = ref_x - f64::from(cursor.x);
        let dir_y = ref_y - f64::from(cursor.y);
        let length = dir_x.hypot(dir_y);

        let (unit_x, unit_y) = if length == 0.0 {
            (1.0, 0.0)
        } else {
            (dir_x / length, dir_y / length)
        };

        let distance = f64::from(push_distance);
        // An exactly zero component stays exactly zero through the division
        Point::new(
            (unit_x * distance).round() as i32,
            (unit_y * distance).round() as i32,
        )
    }
}
