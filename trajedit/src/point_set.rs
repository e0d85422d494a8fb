use crate::algorithms::reindex::{self, RemovalRecord};
use crate::error::{EditError, Result};
use crate::geometry::bounds::Aabb;
use crate::geometry::limits;
use crate::model::{Point3, Waypoint};

/// Current waypoint sequence plus, per slot, the index it had when loaded.
///
/// `positions`, `aux` (when present) and `correspondence` always have the same
/// length, and `correspondence` is strictly increasing: structural edits only
/// ever take slots out or put the same slots back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    pub(crate) positions: Vec<Point3>,
    pub(crate) aux: Option<Vec<f64>>,
    pub(crate) correspondence: Vec<usize>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates size, channel length and every value, then numbers the
    /// points `0..n`.
    pub fn from_parts(points: Vec<Point3>, aux: Option<Vec<f64>>) -> Result<Self> {
        if points.len() > limits::MAX_POINTS {
            return Err(EditError::TooManyPoints { got: points.len(), max: limits::MAX_POINTS });
        }
        if let Some(col) = &aux {
            if col.len() != points.len() {
                return Err(EditError::LengthMismatch { points: points.len(), aux: col.len() });
            }
            for &v in col {
                limits::check_value("aux", v)?;
            }
        }
        for p in &points {
            for (param, v) in [("x", p.x), ("y", p.y), ("z", p.z)] {
                limits::check_value(param, v)?;
            }
        }
        let correspondence = (0..points.len()).collect();
        Ok(PointSet { positions: points, aux, correspondence })
    }

    /// Replaces everything. On error the set is left as it was.
    pub fn load(&mut self, points: Vec<Point3>, aux: Option<Vec<f64>>) -> Result<()> {
        *self = PointSet::from_parts(points, aux)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
    pub fn has_aux(&self) -> bool {
        self.aux.is_some()
    }
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }
    pub fn aux(&self) -> Option<&[f64]> {
        self.aux.as_deref()
    }
    pub fn correspondence(&self) -> &[usize] {
        &self.correspondence
    }

    pub(crate) fn check(&self, idx: usize) -> Result<()> {
        if idx < self.len() {
            Ok(())
        } else {
            Err(EditError::IndexOutOfRange { index: idx, len: self.len() })
        }
    }

    pub fn get(&self, idx: usize) -> Result<Waypoint> {
        self.check(idx)?;
        Ok(Waypoint {
            pos: self.positions[idx],
            aux: self.aux.as_ref().map(|col| col[idx]),
        })
    }

    pub fn position(&self, idx: usize) -> Option<Point3> {
        self.positions.get(idx).copied()
    }

    /// Writes a full position, and the auxiliary value when one is given and
    /// the channel exists. `aux: None` leaves the stored value alone.
    pub fn set(&mut self, idx: usize, pos: Point3, aux: Option<f64>) -> Result<()> {
        self.check(idx)?;
        self.positions[idx] = pos;
        if let (Some(col), Some(a)) = (self.aux.as_mut(), aux) {
            col[idx] = a;
        }
        Ok(())
    }

    /// Removes the given slots. All indices are checked first; a single bad
    /// index removes nothing. Records come back ascending by `idx`.
    pub fn delete_at(&mut self, indices: &[usize]) -> Result<Vec<RemovalRecord>> {
        for &idx in indices {
            self.check(idx)?;
        }
        Ok(reindex::remove_descending(self, indices))
    }

    /// Reverses a [`PointSet::delete_at`]. Records must be ascending by `idx`
    /// and carry an auxiliary value exactly when the channel exists.
    pub fn restore_at(&mut self, records: &[RemovalRecord]) -> Result<()> {
        let mut len = self.len();
        let mut prev: Option<usize> = None;
        for r in records {
            if prev.is_some_and(|p| r.idx <= p) || r.idx > len {
                return Err(EditError::IndexOutOfRange { index: r.idx, len });
            }
            if r.aux.is_some() != self.has_aux() {
                return Err(EditError::LengthMismatch {
                    points: self.len() + records.len(),
                    aux: self.aux.as_ref().map_or(0, |c| c.len()),
                });
            }
            prev = Some(r.idx);
            len += 1;
        }
        reindex::reinsert_ascending(self, records);
        Ok(())
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }
}
