use serde::Serialize;

use crate::algorithms::reindex::RemovalRecord;
use crate::error::Result;
use crate::model::Point3;
use crate::point_set::PointSet;
use crate::selection::SelectionState;

/// Before/after snapshot of one edited point. Auxiliary values are recorded
/// only when the point set carries that channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EditRecord {
    pub idx: usize,
    pub prev_pos: Point3,
    pub next_pos: Point3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_aux: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_aux: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UndoOp {
    SingleEdit(EditRecord),
    /// Two or more records.
    BulkEdit { items: Vec<EditRecord> },
    /// Ascending by `idx`.
    Delete { removed: Vec<RemovalRecord> },
}

impl UndoOp {
    /// One record becomes a `SingleEdit`, several a `BulkEdit`, none nothing.
    pub fn from_edits(mut items: Vec<EditRecord>) -> Option<UndoOp> {
        match items.len() {
            0 => None,
            1 => items.pop().map(UndoOp::SingleEdit),
            _ => Some(UndoOp::BulkEdit { items }),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            UndoOp::SingleEdit(_) => "single_edit",
            UndoOp::BulkEdit { .. } => "bulk_edit",
            UndoOp::Delete { .. } => "delete",
        }
    }

    /// Indices touched by the op, as they are after it has been undone.
    pub fn indices(&self) -> Vec<usize> {
        match self {
            UndoOp::SingleEdit(r) => vec![r.idx],
            UndoOp::BulkEdit { items } => items.iter().map(|r| r.idx).collect(),
            UndoOp::Delete { removed } => removed.iter().map(|r| r.idx).collect(),
        }
    }

    /// Writes the inverse into `points` and selects what it touched. Every
    /// index is checked before anything is written.
    pub fn apply_inverse(&self, points: &mut PointSet, selection: &mut SelectionState) -> Result<()> {
        match self {
            UndoOp::SingleEdit(r) => {
                points.set(r.idx, r.prev_pos, r.prev_aux)?;
            }
            UndoOp::BulkEdit { items } => {
                for r in items {
                    points.check(r.idx)?;
                }
                for r in items {
                    points.set(r.idx, r.prev_pos, r.prev_aux)?;
                }
            }
            UndoOp::Delete { removed } => {
                points.restore_at(removed)?;
            }
        }
        selection.set_selection(self.indices());
        Ok(())
    }
}

/// LIFO of undo ops. There is no redo side.
#[derive(Clone, Debug, Default)]
pub struct UndoStack {
    ops: Vec<UndoOp>,
    max_depth: Option<usize>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        UndoStack { ops: Vec::new(), max_depth }
    }

    pub fn push(&mut self, op: UndoOp) {
        self.ops.push(op);
        if let Some(max) = self.max_depth {
            if self.ops.len() > max {
                let drop = self.ops.len() - max;
                self.ops.drain(..drop);
            }
        }
    }

    pub fn pop(&mut self) -> Option<UndoOp> {
        self.ops.pop()
    }
    pub fn peek(&self) -> Option<&UndoOp> {
        self.ops.last()
    }
    pub fn len(&self) -> usize {
        self.ops.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Pops the newest op and applies its inverse. Returns `Ok(None)` on an
    /// empty stack. If the inverse cannot be applied the op stays on the stack.
    pub fn pop_and_apply_inverse(
        &mut self,
        points: &mut PointSet,
        selection: &mut SelectionState,
    ) -> Result<Option<UndoOp>> {
        let Some(top) = self.ops.last() else {
            return Ok(None);
        };
        top.apply_inverse(points, selection)?;
        Ok(self.ops.pop())
    }
}
