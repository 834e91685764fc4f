//! Retention curve: maps elapsed playback fraction to displayed progress.
//!
//! The displayed percentage is `min(100, f^e * 100)` where `f` is the elapsed
//! fraction `currentTime / duration` and `e` the curve exponent in `[0.1, 1.0]`.
//!
//! - `e == 1.0` is linear progress.
//! - `e < 1.0` front-loads progress: for any `f` in `(0, 1)`, `f^e > f`.
//! - `1^e == 1` for every exponent, so completion always reports exactly 100%.
//!
//! The embed generator emits [`DISPLAY_PERCENT_JS`], the JavaScript rendition of
//! [`display_percent`]. Both live here so the formula exists in one place.

use serde::{Deserialize, Serialize};

/// Smallest accepted curve exponent.
pub const EXPONENT_MIN: f64 = 0.1;

/// Largest accepted curve exponent (linear progress).
pub const EXPONENT_MAX: f64 = 1.0;

/// Exponent used when a configuration does not specify one.
pub const EXPONENT_DEFAULT: f64 = 0.5;

/// JavaScript source of [`display_percent`], embedded verbatim in generated players.
///
/// Keep this in lockstep with the Rust function below: NaN and non-positive
/// fractions map to 0, fractions above 1 are clamped, result capped at 100.
pub const DISPLAY_PERCENT_JS: &str = "function displayPercent(fraction, exponent) {
            if (!(fraction > 0)) return 0;
            if (fraction > 1) fraction = 1;
            return Math.min(100, Math.pow(fraction, exponent) * 100);
        }";

/// Displayed progress percentage for an elapsed fraction.
///
/// `elapsed_fraction` is clamped to `[0, 1]` (NaN counts as 0). The exponent is
/// used as given; callers that accept untrusted exponents should go through
/// [`RetentionCurve::clamped`] first.
///
/// # Example
/// ```
/// use vx_math::display_percent;
///
/// assert_eq!(display_percent(1.0, 0.5), 100.0);
/// assert!((display_percent(0.25, 0.5) - 50.0).abs() < 1e-9);
/// assert_eq!(display_percent(0.25, 1.0), 25.0);
/// ```
pub fn display_percent(elapsed_fraction: f64, exponent: f64) -> f64 {
    if elapsed_fraction.is_nan() || elapsed_fraction <= 0.0 {
        return 0.0;
    }
    let fraction = elapsed_fraction.min(1.0);
    (fraction.powf(exponent) * 100.0).min(100.0)
}

/// Elapsed fraction `current_time / duration`.
///
/// Returns `None` while the duration is unknown (zero, negative, NaN or
/// infinite), mirroring the player's "no-op until metadata is loaded" rule.
pub fn elapsed_fraction(current_time: f64, duration: f64) -> Option<f64> {
    if !duration.is_finite() || duration <= 0.0 || current_time.is_nan() {
        return None;
    }
    Some((current_time / duration).clamp(0.0, 1.0))
}

/// A validated retention curve exponent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RetentionCurve(f64);

impl RetentionCurve {
    /// Create a curve, returning `None` if the exponent is outside
    /// `[EXPONENT_MIN, EXPONENT_MAX]` or not finite.
    pub fn new(exponent: f64) -> Option<Self> {
        if !exponent.is_finite() || !(EXPONENT_MIN..=EXPONENT_MAX).contains(&exponent) {
            return None;
        }
        Some(Self(exponent))
    }

    /// Create a curve, clamping the exponent into range.
    ///
    /// NaN falls back to the linear curve.
    pub fn clamped(exponent: f64) -> Self {
        if exponent.is_nan() {
            return Self::linear();
        }
        Self(exponent.clamp(EXPONENT_MIN, EXPONENT_MAX))
    }

    /// The linear curve (exponent 1.0).
    pub fn linear() -> Self {
        Self(EXPONENT_MAX)
    }

    /// Curve exponent.
    pub fn exponent(&self) -> f64 {
        self.0
    }

    /// True if this curve reports actual progress.
    pub fn is_linear(&self) -> bool {
        self.0 == EXPONENT_MAX
    }

    /// Displayed percentage for an elapsed fraction.
    pub fn display_percent(&self, elapsed_fraction: f64) -> f64 {
        display_percent(elapsed_fraction, self.0)
    }

    /// Displayed percentage for a playback position.
    ///
    /// `None` while the duration is unknown.
    pub fn display_percent_at(&self, current_time: f64, duration: f64) -> Option<f64> {
        elapsed_fraction(current_time, duration).map(|f| self.display_percent(f))
    }

    /// Elapsed fraction at which the bar first shows `percent`.
    ///
    /// Inverse of [`RetentionCurve::display_percent`]: `(p / 100)^(1 / e)`.
    pub fn fraction_for_percent(&self, percent: f64) -> f64 {
        let p = (percent / 100.0).clamp(0.0, 1.0);
        p.powf(1.0 / self.0)
    }

    /// `points` evenly spaced samples from 0% to 100%.
    pub fn sample(&self, points: usize) -> Vec<super::sample::CurvePoint> {
        super::sample::sample_curve(*self, points)
    }
}

impl Default for RetentionCurve {
    fn default() -> Self {
        Self(EXPONENT_DEFAULT)
    }
}

impl TryFrom<f64> for RetentionCurve {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        RetentionCurve::new(value).ok_or_else(|| {
            format!(
                "retention curve exponent must be in [{}, {}], got {}",
                EXPONENT_MIN, EXPONENT_MAX, value
            )
        })
    }
}

impl From<RetentionCurve> for f64 {
    fn from(curve: RetentionCurve) -> Self {
        curve.0
    }
}

impl std::fmt::Display for RetentionCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn completion_is_exactly_one_hundred() {
        for e in [0.1, 0.25, 0.5, 0.75, 1.0] {
            assert_eq!(display_percent(1.0, e), 100.0, "exponent {}", e);
        }
    }

    #[test]
    fn start_is_zero() {
        assert_eq!(display_percent(0.0, 0.5), 0.0);
        assert_eq!(display_percent(-0.3, 0.5), 0.0);
        assert_eq!(display_percent(f64::NAN, 0.5), 0.0);
    }

    #[test]
    fn overshoot_is_capped() {
        assert_eq!(display_percent(1.5, 0.3), 100.0);
        assert_eq!(display_percent(f64::INFINITY, 1.0), 100.0);
    }

    #[test]
    fn square_root_curve() {
        assert!(approx_eq(display_percent(0.25, 0.5), 50.0, 1e-12));
        assert!(approx_eq(display_percent(0.01, 0.5), 10.0, 1e-12));
    }

    #[test]
    fn elapsed_fraction_requires_known_duration() {
        assert_eq!(elapsed_fraction(5.0, 0.0), None);
        assert_eq!(elapsed_fraction(5.0, f64::NAN), None);
        assert_eq!(elapsed_fraction(5.0, f64::INFINITY), None);
        assert_eq!(elapsed_fraction(5.0, 10.0), Some(0.5));
        assert_eq!(elapsed_fraction(12.0, 10.0), Some(1.0));
    }

    #[test]
    fn curve_validation() {
        assert!(RetentionCurve::new(0.1).is_some());
        assert!(RetentionCurve::new(1.0).is_some());
        assert!(RetentionCurve::new(0.05).is_none());
        assert!(RetentionCurve::new(1.01).is_none());
        assert!(RetentionCurve::new(f64::NAN).is_none());
    }

    #[test]
    fn clamped_curve() {
        assert_eq!(RetentionCurve::clamped(3.0).exponent(), 1.0);
        assert_eq!(RetentionCurve::clamped(0.0).exponent(), 0.1);
        assert!(RetentionCurve::clamped(f64::NAN).is_linear());
    }

    #[test]
    fn fraction_for_percent_inverts_display() {
        let curve = RetentionCurve::new(0.5).unwrap();
        let f = curve.fraction_for_percent(50.0);
        assert!(approx_eq(f, 0.25, 1e-12));
        assert!(approx_eq(curve.display_percent(f), 50.0, 1e-9));
    }

    #[test]
    fn try_from_rejects_out_of_range() {
        let ok = RetentionCurve::try_from(0.5).unwrap();
        assert_eq!(ok.exponent(), 0.5);
        let err = RetentionCurve::try_from(4.0).unwrap_err();
        assert!(err.contains("[0.1, 1]"));
    }

    #[test]
    fn js_source_mentions_formula() {
        assert!(DISPLAY_PERCENT_JS.starts_with("function displayPercent("));
        assert!(DISPLAY_PERCENT_JS.contains("Math.pow(fraction, exponent) * 100"));
        assert!(DISPLAY_PERCENT_JS.contains("Math.min(100,"));
    }

    #[test]
    fn sample_matches_free_function() {
        let curve = RetentionCurve::clamped(0.4);
        let points = curve.sample(6);
        assert_eq!(points.len(), 6);
        assert_eq!(points[5].displayed_percent, 100.0);
        assert!((points[1].displayed_percent - curve.display_percent(0.2)).abs() < 1e-12);
    }
}
