//! Index bookkeeping for structural edits.
//!
//! Removal walks indices from the highest down so that taking one slot out
//! never shifts a slot still waiting to be removed. Reinsertion walks the
//! records from the lowest up so each insert position is valid against the
//! part of the sequence that has not been touched yet. Running one after the
//! other is an exact round trip.

use serde::{Deserialize, Serialize};

use crate::model::Point3;
use crate::point_set::PointSet;

/// Snapshot of one removed slot, taken before it left the set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemovalRecord {
    pub idx: usize,
    pub pos: Point3,
    pub original_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux: Option<f64>,
}

/// Distinct indices, highest first.
pub fn descending_unique(indices: &[usize]) -> Vec<usize> {
    let mut order = indices.to_vec();
    order.sort_unstable_by(|a, b| b.cmp(a));
    order.dedup();
    order
}

/// Removes `indices` (any order, repeats allowed) from `set` and returns the
/// removal records sorted ascending by `idx`. Indices must already be in range.
pub(crate) fn remove_descending(set: &mut PointSet, indices: &[usize]) -> Vec<RemovalRecord> {
    let order = descending_unique(indices);
    let mut records = Vec::with_capacity(order.len());
    for idx in order {
        records.push(RemovalRecord {
            idx,
            pos: set.positions[idx],
            original_index: set.correspondence[idx],
            aux: set.aux.as_ref().map(|col| col[idx]),
        });
        set.positions.remove(idx);
        set.correspondence.remove(idx);
        if let Some(col) = set.aux.as_mut() {
            col.remove(idx);
        }
    }
    records.sort_by_key(|r| r.idx);
    records
}

/// Puts ascending `records` back at their `idx` slots, lowest first.
pub(crate) fn reinsert_ascending(set: &mut PointSet, records: &[RemovalRecord]) {
    for r in records {
        set.positions.insert(r.idx, r.pos);
        set.correspondence.insert(r.idx, r.original_index);
        if let (Some(col), Some(a)) = (set.aux.as_mut(), r.aux) {
            col.insert(r.idx, a);
        }
    }
}
