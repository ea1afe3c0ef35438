//! Per-monitor DPI scaling
//!
//! Converts between logical (DPI-independent) and physical (device pixel)
//! coordinates for a single monitor. Every conversion rounds each axis to the
//! nearest integer on its own, halves away from zero, so a logical to physical
//! to logical round trip lands within one unit per axis of where it started.

use std::fmt;
use tracing::warn;

use crate::constants::dpi::{BASELINE, BASELINE_F64};
use crate::types::{Point, Rect};

/// DPI of one monitor
///
/// Equality and hashing consider only the raw DPI pair; every scale factor is
/// derived from it on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DpiInfo {
    dpi_x: u32,
    dpi_y: u32,
}

impl DpiInfo {
    /// Create from a raw DPI pair
    ///
    /// A zero axis cannot describe a real monitor and would make
    /// `physical_to_logical` divide by zero, so it is replaced by the 96 DPI
    /// baseline.
    pub fn new(dpi_x: u32, dpi_y: u32) -> Self {
        let dpi_x = non_zero_or_baseline(dpi_x, "dpi_x");
        let dpi_y = non_zero_or_baseline(dpi_y, "dpi_y");
        Self { dpi_x, dpi_y }
    }

    pub fn dpi_x(&self) -> u32 {
        self.dpi_x
    }

    pub fn dpi_y(&self) -> u32 {
        self.dpi_y
    }

    pub fn scale_factor_x(&self) -> f64 {
        f64::from(self.dpi_x) / BASELINE_F64
    }

    pub fn scale_factor_y(&self) -> f64 {
        f64::from(self.dpi_y) / BASELINE_F64
    }

    /// Mean of the two axis factors
    pub fn scale_factor(&self) -> f64 {
        (self.scale_factor_x() + self.scale_factor_y()) / 2.0
    }

    /// Either axis is scaled above 100%
    pub fn is_high_dpi(&self) -> bool {
        self.scale_factor_x() > 1.0 || self.scale_factor_y() > 1.0
    }

    pub fn logical_to_physical(&self, point: Point) -> Point {
        Point::new(
            scale(point.x, self.scale_factor_x()),
            scale(point.y, self.scale_factor_y()),
        )
    }

    pub fn physical_to_logical(&self, point: Point) -> Point {
        Point::new(
            unscale(point.x, self.scale_factor_x()),
            unscale(point.y, self.scale_factor_y()),
        )
    }

    /// Scale origin and size separately
    ///
    /// Width and height are treated as distances on their own axis rather than
    /// re-derived from the scaled far corner, so the far edge carries a single
    /// rounding error instead of two.
    pub fn logical_to_physical_rect(&self, rect: Rect) -> Rect {
        let (fx, fy) = (self.scale_factor_x(), self.scale_factor_y());
        Rect::new(
            scale(rect.x, fx),
            scale(rect.y, fy),
            scale(rect.width, fx),
            scale(rect.height, fy),
        )
    }

    pub fn physical_to_logical_rect(&self, rect: Rect) -> Rect {
        let (fx, fy) = (self.scale_factor_x(), self.scale_factor_y());
        Rect::new(
            unscale(rect.x, fx),
            unscale(rect.y, fy),
            unscale(rect.width, fx),
            unscale(rect.height, fy),
        )
    }

    /// Scale a non-directional magnitude, using the horizontal factor
    pub fn scale_distance(&self, distance: i32) -> i32 {
        scale(distance, self.scale_factor_x())
    }

    /// Inverse of [`DpiInfo::scale_distance`]
    pub fn unscale_distance(&self, distance: i32) -> i32 {
        unscale(distance, self.scale_factor_x())
    }
}

impl Default for DpiInfo {
    fn default() -> Self {
        Self {
            dpi_x: BASELINE,
            dpi_y: BASELINE,
        }
    }
}

impl fmt::Display for DpiInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DPI {}x{} (scale {:.2})",
            self.dpi_x,
            self.dpi_y,
            self.scale_factor()
        )
    }
}

fn non_zero_or_baseline(dpi: u32, axis: &str) -> u32 {
    if dpi == 0 {
        warn!(axis = axis, baseline = BASELINE, "zero DPI reported, using baseline");
        BASELINE
    } else {
        dpi
    }
}

// `as i32` saturates, so huge inputs clamp to the i32 range instead of wrapping
fn scale(value: i32, factor: f64) -> i32 {
    (f64::from(value) * factor).round() as i32
}

fn unscale(value: i32, factor: f64) -> i32 {
    (f64::from(value) / factor).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_is_baseline() {
        let dpi = DpiInfo::default();
        assert_eq!(dpi.dpi_x(), 96);
        assert_eq!(dpi.dpi_y(), 96);
        assert_eq!(dpi.scale_factor_x(), 1.0);
        assert_eq!(dpi.scale_factor_y(), 1.0);
        assert_eq!(dpi.scale_factor(), 1.0);
        assert!(!dpi.is_high_dpi());
        assert_eq!(dpi, DpiInfo::new(96, 96));
    }

    #[test]
    fn test_mixed_axis_scale_factors() {
        let dpi = DpiInfo::new(144, 120);
        assert_eq!(dpi.scale_factor_x(), 1.5);
        assert_eq!(dpi.scale_factor_y(), 1.25);
        assert_eq!(dpi.scale_factor(), 1.375);
        assert!(dpi.is_high_dpi());
    }

    #[test]
    fn test_high_dpi_on_single_axis() {
        assert!(DpiInfo::new(96, 97).is_high_dpi());
        assert!(DpiInfo::new(120, 96).is_high_dpi());
        assert!(!DpiInfo::new(72, 96).is_high_dpi());
    }

    #[test]
    fn test_zero_dpi_falls_back_to_baseline() {
        let dpi = DpiInfo::new(0, 144);
        assert_eq!(dpi.dpi_x(), 96);
        assert_eq!(dpi.dpi_y(), 144);
        // No division by zero
        assert_eq!(dpi.physical_to_logical(Point::new(100, 150)), Point::new(100, 100));
    }

    #[test]
    fn test_point_conversion() {
        let dpi = DpiInfo::new(144, 120);
        assert_eq!(dpi.logical_to_physical(Point::new(100, 100)), Point::new(150, 125));
        assert_eq!(dpi.physical_to_logical(Point::new(150, 125)), Point::new(100, 100));
    }

    #[test]
    fn test_point_conversion_rounds_each_axis() {
        let dpi = DpiInfo::new(144, 144);
        // 3 * 1.5 = 4.5 -> 5, -3 * 1.5 = -4.5 -> -5
        assert_eq!(dpi.logical_to_physical(Point::new(3, -3)), Point::new(5, -5));
        // 5 / 1.5 = 3.33 -> 3
        assert_eq!(dpi.physical_to_logical(Point::new(5, 5)), Point::new(3, 3));
    }

    #[test]
    fn test_zero_negative_and_large_inputs() {
        let dpi = DpiInfo::new(192, 192);
        assert_eq!(dpi.logical_to_physical(Point::ZERO), Point::ZERO);
        assert_eq!(dpi.logical_to_physical(Point::new(-50, -75)), Point::new(-100, -150));
        assert_eq!(dpi.physical_to_logical(Point::new(-100, -150)), Point::new(-50, -75));
        // Saturates instead of overflowing
        assert_eq!(dpi.logical_to_physical(Point::new(i32::MAX, i32::MIN)), Point::new(i32::MAX, i32::MIN));
    }

    #[test]
    fn test_round_trip_within_one_unit() {
        let dpis = [(96, 96), (120, 120), (144, 120), (168, 96), (192, 144), (250, 110), (72, 300)];
        for (dx, dy) in dpis {
            let dpi = DpiInfo::new(dx, dy);
            for x in (-257..=257).step_by(7) {
                for y in (-131..=131).step_by(11) {
                    let original = Point::new(x, y);
                    let back = dpi.physical_to_logical(dpi.logical_to_physical(original));
                    assert!(
                        (back.x - original.x).abs() <= 1 && (back.y - original.y).abs() <= 1,
                        "{dpi}: {original} came back as {back}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_rect_conversion() {
        let dpi = DpiInfo::new(192, 192);
        let physical = dpi.logical_to_physical_rect(Rect::new(50, 100, 200, 150));
        assert_eq!(physical, Rect::new(100, 200, 400, 300));
        assert_eq!(dpi.physical_to_logical_rect(physical), Rect::new(50, 100, 200, 150));
    }

    #[test]
    fn test_rect_size_scaled_as_distance() {
        let dpi = DpiInfo::new(144, 144);
        // Origin 1 -> 1.5 -> 2, width 1 -> 1.5 -> 2; corner-derived width would be 3 - 2 = 1
        let physical = dpi.logical_to_physical_rect(Rect::new(1, 1, 1, 1));
        assert_eq!(physical, Rect::new(2, 2, 2, 2));
    }

    #[test]
    fn test_rect_conversion_mixed_axes() {
        let dpi = DpiInfo::new(144, 120);
        let physical = dpi.logical_to_physical_rect(Rect::new(100, 100, 200, 200));
        assert_eq!(physical, Rect::new(150, 125, 300, 250));
    }

    #[test]
    fn test_distance_uses_horizontal_factor() {
        let dpi = DpiInfo::new(192, 96);
        assert_eq!(dpi.scale_distance(50), 100);
        assert_eq!(dpi.unscale_distance(100), 50);
        assert_eq!(dpi.scale_distance(0), 0);
        assert_eq!(dpi.scale_distance(-10), -20);
    }

    #[test]
    fn test_equality_and_hash_follow_raw_dpi() {
        let mut set = HashSet::new();
        set.insert(DpiInfo::new(144, 144));
        set.insert(DpiInfo::new(144, 144));
        set.insert(DpiInfo::new(144, 120));
        assert_eq!(set.len(), 2);
        assert_ne!(DpiInfo::new(144, 120), DpiInfo::new(120, 144));
    }

    #[test]
    fn test_display_contains_raw_values_and_scale() {
        let text = DpiInfo::new(192, 144).to_string();
        assert!(text.contains("192"));
        assert!(text.contains("144"));
        assert!(text.contains("1.75"));

        assert!(DpiInfo::default().to_string().contains("1.00"));
    }
}
