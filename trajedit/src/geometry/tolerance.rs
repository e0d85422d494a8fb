// Centralized tolerances for edit change detection

use crate::model::Point3;

pub const EPS_EDIT: f64 = 1e-9; // per-component change threshold (world units)

#[inline] pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool { (a - b).abs() <= eps }

#[inline]
pub fn point_changed(a: Point3, b: Point3, eps: f64) -> bool {
    !(approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps))
}

#[inline]
pub fn aux_changed(a: Option<f64>, b: Option<f64>, eps: f64) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => !approx_eq(a, b, eps),
        (None, None) => false,
        _ => true,
    }
}
