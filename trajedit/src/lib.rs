pub mod config;
pub mod error;
pub mod model;
pub mod point_set;
pub mod selection;
pub mod store;
pub mod undo;
pub mod geometry {
    pub mod bounds;
    pub mod limits;
    pub mod projection;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod picking;
    pub mod reindex;
}
mod drag;
mod edit;
pub mod json;

pub use algorithms::picking::NearestPick;
pub use algorithms::reindex::RemovalRecord;
pub use config::EditorConfig;
pub use edit::{parse_field, EditFields};
pub use error::{EditError, Result};
pub use geometry::bounds::{Aabb, Framing};
pub use geometry::projection::{Projector, ViewProjection, Viewport};
pub use json::{sanitize_output_name, SaveRequest, SavedOutput, TrajectoryDoc};
pub use model::{AxisMode, GizmoHandles, Point3, ScreenPoint, Waypoint};
pub use point_set::PointSet;
pub use selection::SelectionState;
pub use store::{MemoryStore, TrajectoryStore};
pub use undo::{EditRecord, UndoOp, UndoStack};

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// What the renderer has to refresh since it last asked.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneUpdate {
    /// Point count or order changed; rebuild the visualization. `recenter` is
    /// only set for fresh loads, structural edits keep the current view.
    Rebuild { recenter: bool },
    /// Only these slots moved.
    Moved { indices: Vec<usize> },
}

impl SceneUpdate {
    fn merge(self, next: SceneUpdate) -> SceneUpdate {
        match (self, next) {
            (SceneUpdate::Rebuild { recenter: a }, SceneUpdate::Rebuild { recenter: b }) => {
                SceneUpdate::Rebuild { recenter: a || b }
            }
            (r @ SceneUpdate::Rebuild { .. }, SceneUpdate::Moved { .. }) => r,
            (SceneUpdate::Moved { .. }, r @ SceneUpdate::Rebuild { .. }) => r,
            (SceneUpdate::Moved { indices: a }, SceneUpdate::Moved { indices: b }) => {
                let all: BTreeSet<usize> = a.into_iter().chain(b).collect();
                SceneUpdate::Moved { indices: all.into_iter().collect() }
            }
        }
    }
}

/// The whole editable state for one loaded trajectory: points, selection and
/// undo history, mutated in place by one caller at a time.
pub struct EditSession {
    pub(crate) points: PointSet,
    pub(crate) selection: SelectionState,
    pub(crate) undo: UndoStack,
    pub(crate) config: EditorConfig,
    pub(crate) axis_mode: AxisMode,
    pub(crate) drag: Option<drag::DragState>,
    pub(crate) loaded: bool,
    pub(crate) geom_ver: u64,
    pub(crate) pending: Option<SceneUpdate>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        EditSession {
            points: PointSet::new(),
            selection: SelectionState::new(),
            undo: UndoStack::new(),
            config: EditorConfig::default(),
            axis_mode: AxisMode::Free,
            drag: None,
            loaded: false,
            geom_ver: 1,
            pending: None,
        }
    }

    pub fn with_config(config: EditorConfig) -> Result<Self> {
        config.validate()?;
        let mut s = Self::new();
        s.undo = UndoStack::with_max_depth(config.max_undo_depth);
        s.config = config;
        Ok(s)
    }

    /// Monotonic geometry version; increments on every point mutation.
    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Takes effect immediately, except `max_undo_depth` which applies from
    /// the next load.
    pub fn set_config(&mut self, config: EditorConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_point_size(&mut self, size: f64) -> Result<()> {
        self.config.set_point_size(size)
    }

    pub fn pick_threshold(&self) -> f64 {
        self.config.pick_threshold()
    }

    pub fn axis_mode(&self) -> AxisMode {
        self.axis_mode
    }

    pub fn set_axis_mode(&mut self, mode: AxisMode) {
        self.axis_mode = mode;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Starts over with a new trajectory. Selection and undo history are
    /// discarded; on error nothing changes.
    pub fn load(&mut self, points: Vec<Point3>, aux: Option<Vec<f64>>) -> Result<()> {
        let set = PointSet::from_parts(points, aux)?;
        debug!(points = set.len(), aux = set.has_aux(), "trajectory loaded");
        self.points = set;
        self.selection = SelectionState::new();
        self.undo = UndoStack::with_max_depth(self.config.max_undo_depth);
        self.drag = None;
        self.loaded = true;
        self.pending = Some(SceneUpdate::Rebuild { recenter: true });
        self.bump();
        Ok(())
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }
    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }
    pub fn primary(&self) -> Option<usize> {
        self.selection.primary()
    }

    /// Replaces the selection. Indices must refer to current slots.
    pub fn set_selection(&mut self, indices: &[usize]) -> Result<()> {
        for &idx in indices {
            self.points.check(idx)?;
        }
        self.cancel_drag();
        self.selection.set_selection(indices.iter().copied());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.cancel_drag();
        self.selection.clear();
    }

    /// Selects the candidate closest to `click` on screen. Returns `None`, and
    /// leaves the selection alone, when no candidate resolves.
    pub fn pick_at<P: Projector + ?Sized>(
        &mut self,
        candidates: &[usize],
        click: ScreenPoint,
        projector: &P,
    ) -> Option<NearestPick> {
        let hit = algorithms::picking::pick_nearest(&self.points, candidates, click, projector)?;
        self.cancel_drag();
        self.selection.set_selection([hit.index]);
        Some(hit)
    }

    /// Selects every point inside the screen rectangle. An empty result leaves
    /// the selection alone and returns 0.
    pub fn marquee_select<P: Projector + ?Sized>(
        &mut self,
        a: ScreenPoint,
        b: ScreenPoint,
        projector: &P,
    ) -> usize {
        let hits = algorithms::picking::pick_marquee(&self.points, a, b, projector);
        if hits.is_empty() {
            return 0;
        }
        self.cancel_drag();
        let n = hits.len();
        self.selection.set_selection(hits);
        n
    }

    pub fn is_click(&self, start: ScreenPoint, end: ScreenPoint) -> bool {
        algorithms::picking::is_click(start, end, self.config.click_slop_px)
    }

    /// Removes the selected points as one undoable step and clears the
    /// selection. Returns how many points were removed.
    pub fn delete_selected(&mut self) -> Result<usize> {
        if self.selection.is_empty() {
            return Ok(0);
        }
        self.cancel_drag();
        let removed = self.points.delete_at(&self.selection.to_vec())?;
        let n = removed.len();
        self.undo.push(UndoOp::Delete { removed });
        self.selection.clear();
        self.mark(SceneUpdate::Rebuild { recenter: false });
        self.bump();
        debug!(removed = n, remaining = self.points.len(), "points deleted");
        Ok(n)
    }

    /// Reverts the newest undo entry and selects what it touched. Returns
    /// `false` on an empty stack.
    pub fn undo(&mut self) -> Result<bool> {
        self.cancel_drag();
        let Some(op) = self.undo.pop_and_apply_inverse(&mut self.points, &mut self.selection)? else {
            return Ok(false);
        };
        let update = match &op {
            UndoOp::Delete { .. } => SceneUpdate::Rebuild { recenter: false },
            edit => SceneUpdate::Moved { indices: edit.indices() },
        };
        self.mark(update);
        self.bump();
        debug!(kind = op.kind(), depth = self.undo.len(), "undo applied");
        Ok(true)
    }

    /// Drains what the renderer needs to refresh.
    pub fn take_scene_update(&mut self) -> Option<SceneUpdate> {
        self.pending.take()
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.points.bounds()
    }

    pub fn framing(&self) -> Option<Framing> {
        let bb = self.points.bounds()?;
        Some(Framing::from_bounds(
            &bb,
            self.config.frame_distance_factor,
            self.config.frame_distance_pad,
        ))
    }

    pub(crate) fn mark(&mut self, update: SceneUpdate) {
        self.pending = Some(match self.pending.take() {
            Some(prev) => prev.merge(update),
            None => update,
        });
    }

    pub(crate) fn bump(&mut self) {
        self.geom_ver = self.geom_ver.wrapping_add(1);
    }
}
