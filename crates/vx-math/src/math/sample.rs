//! Evenly spaced samples of a retention curve, for tables and charts.

use super::curve::RetentionCurve;
use serde::Serialize;

/// One sampled point of a retention curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    /// Actual elapsed fraction of the video, in percent.
    pub actual_percent: f64,
    /// Percentage the progress bar displays at that point.
    pub displayed_percent: f64,
}

impl CurvePoint {
    /// How far the displayed bar runs ahead of real progress, in percentage points.
    pub fn lead(&self) -> f64 {
        self.displayed_percent - self.actual_percent
    }
}

/// Upper bound on the number of samples taken from one curve.
pub const MAX_CURVE_POINTS: usize = 1001;

/// Sample `points` evenly spaced positions from 0% to 100% inclusive.
///
/// The count is clamped to `2..=MAX_CURVE_POINTS`; fewer than two points
/// still yields both endpoints.
pub fn sample_curve(curve: RetentionCurve, points: usize) -> Vec<CurvePoint> {
    let points = points.clamp(2, MAX_CURVE_POINTS);
    let steps = (points - 1) as f64;
    (0..points)
        .map(|i| {
            let fraction = i as f64 / steps;
            CurvePoint {
                actual_percent: fraction * 100.0,
                displayed_percent: curve.display_percent(fraction),
            }
        })
        .collect()
}
