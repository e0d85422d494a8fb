use serde::Serialize;

use crate::geometry::projection::Projector;
use crate::model::ScreenPoint;
use crate::point_set::PointSet;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NearestPick {
    pub index: usize,
    pub dist: f64,
}

/// Axis-aligned screen rectangle, bounds inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub min: ScreenPoint,
    pub max: ScreenPoint,
}

impl ScreenRect {
    pub fn from_corners(a: ScreenPoint, b: ScreenPoint) -> ScreenRect {
        ScreenRect {
            min: ScreenPoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: ScreenPoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }
    pub fn contains(&self, p: ScreenPoint) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Resolves ray-hit candidates to the one whose current position lands
/// closest to the click on screen. Equal distances keep the earlier candidate.
/// Candidates that are out of range or do not project are skipped.
pub fn pick_nearest<P: Projector + ?Sized>(
    points: &PointSet,
    candidates: &[usize],
    click: ScreenPoint,
    projector: &P,
) -> Option<NearestPick> {
    let mut best: Option<NearestPick> = None;
    for &idx in candidates {
        let Some(pos) = points.position(idx) else { continue };
        let Some(sp) = projector.project(pos) else { continue };
        let d = sp.distance(click);
        if !d.is_finite() {
            continue;
        }
        if best.map_or(true, |b| d < b.dist) {
            best = Some(NearestPick { index: idx, dist: d });
        }
    }
    best
}

/// Every point whose projection falls inside the rectangle spanned by the two
/// corners, ascending. Projections are recomputed on every call.
pub fn pick_marquee<P: Projector + ?Sized>(
    points: &PointSet,
    a: ScreenPoint,
    b: ScreenPoint,
    projector: &P,
) -> Vec<usize> {
    let rect = ScreenRect::from_corners(a, b);
    points
        .positions()
        .iter()
        .enumerate()
        .filter_map(|(i, p)| projector.project(*p).filter(|sp| rect.contains(*sp)).map(|_| i))
        .collect()
}

/// A press/release pair that moved no further than `slop` pixels.
pub fn is_click(start: ScreenPoint, end: ScreenPoint, slop: f64) -> bool {
    start.distance(end) <= slop
}
