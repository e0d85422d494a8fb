use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::limits::check_value;
use crate::geometry::tolerance::point_changed;
use crate::model::Point3;
use crate::undo::EditRecord;
use crate::{EditSession, SceneUpdate};

/// Start positions of the points under the gizmo, ascending by index.
#[derive(Clone, Debug)]
pub(crate) struct DragState {
    starts: Vec<(usize, Point3)>,
}

fn check_position(pos: Point3) -> Result<()> {
    for (param, v) in [("x", pos.x), ("y", pos.y), ("z", pos.z)] {
        check_value(param, v)?;
    }
    Ok(())
}

impl EditSession {
    /// Snapshots the selected points before the gizmo moves them. An active
    /// drag is committed first. Returns `false` without a selection.
    pub fn begin_drag(&mut self) -> bool {
        if self.drag.is_some() {
            self.end_drag();
        }
        if self.selection.is_empty() {
            return false;
        }
        let starts = self
            .selection
            .iter()
            .filter_map(|idx| self.points.position(idx).map(|p| (idx, p)))
            .collect();
        self.drag = Some(DragState { starts });
        true
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Live-moves one dragged point. Nothing is recorded until
    /// [`EditSession::end_drag`]. Returns `false` when `idx` is not part of the
    /// active drag.
    pub fn drag_to(&mut self, idx: usize, pos: Point3) -> Result<bool> {
        check_position(pos)?;
        let dragged = self.drag.as_ref().is_some_and(|d| d.starts.iter().any(|(i, _)| *i == idx));
        if !dragged {
            return Ok(false);
        }
        self.points.set(idx, pos, None)?;
        self.mark(SceneUpdate::Moved { indices: vec![idx] });
        self.bump();
        Ok(true)
    }

    /// Live-moves every dragged point to its start position plus `delta`.
    pub fn drag_by(&mut self, delta: Point3) -> Result<bool> {
        let Some(drag) = self.drag.as_ref() else {
            return Ok(false);
        };
        let moved: Vec<(usize, Point3)> =
            drag.starts.iter().map(|&(idx, start)| (idx, start.add(delta))).collect();
        for (_, p) in &moved {
            check_position(*p)?;
        }
        for &(idx, p) in &moved {
            self.points.set(idx, p, None)?;
        }
        self.mark(SceneUpdate::Moved { indices: moved.iter().map(|(i, _)| *i).collect() });
        self.bump();
        Ok(true)
    }

    /// Finishes the drag and records the points that actually moved, the same
    /// way a field edit would. Returns the number recorded.
    pub fn end_drag(&mut self) -> usize {
        let Some(drag) = self.drag.take() else {
            return 0;
        };
        let eps = self.config.change_epsilon;
        let mut items = Vec::new();
        let mut snapped = Vec::new();
        for (idx, start) in drag.starts {
            let Ok(now) = self.points.get(idx) else { continue };
            if point_changed(start, now.pos, eps) {
                items.push(EditRecord {
                    idx,
                    prev_pos: start,
                    next_pos: now.pos,
                    prev_aux: now.aux,
                    next_aux: now.aux,
                });
            } else if now.pos != start {
                // sub-epsilon jitter is not an edit; snap back to the start
                match self.points.set(idx, start, None) {
                    Ok(()) => snapped.push(idx),
                    Err(e) => warn!(idx, error = %e, "cannot snap dragged point back"),
                }
            }
        }
        if !snapped.is_empty() {
            self.mark(SceneUpdate::Moved { indices: snapped });
            self.bump();
        }
        debug!(moved = items.len(), "drag finished");
        self.record_edits(items)
    }

    /// Puts every dragged point back where the drag began. Returns whether a
    /// drag was active.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let mut indices = Vec::new();
        for (idx, start) in drag.starts {
            if self.points.position(idx) == Some(start) {
                continue;
            }
            match self.points.set(idx, start, None) {
                Ok(()) => indices.push(idx),
                Err(e) => warn!(idx, error = %e, "cannot restore dragged point"),
            }
        }
        if !indices.is_empty() {
            self.mark(SceneUpdate::Moved { indices });
            self.bump();
        }
        true
    }
}
