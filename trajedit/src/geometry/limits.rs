// Centralized ingestion limits to harden against untrusted trajectory input

// Trajectory size cap
pub const MAX_POINTS: usize = 2_000_000;

// Numeric bounds (positions and auxiliary values, world units)
pub const COORD_MIN: f64 = -1_000_000.0;
pub const COORD_MAX: f64 =  1_000_000.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && (COORD_MIN..=COORD_MAX).contains(&x) }

/// Finite and inside the coordinate bounds, reported against `param`.
pub fn check_value(param: &'static str, v: f64) -> crate::error::Result<()> {
    if !v.is_finite() {
        return Err(crate::error::EditError::NonFinite { param });
    }
    if !in_coord_bounds(v) {
        return Err(crate::error::EditError::OutOfRange { param, min: COORD_MIN, max: COORD_MAX, got: v });
    }
    Ok(())
}
