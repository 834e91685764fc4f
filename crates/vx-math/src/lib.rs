//! Vortex VSL math utilities.

pub mod math;

pub use math::curve::*;
pub use math::sample::{sample_curve, CurvePoint, MAX_CURVE_POINTS};
