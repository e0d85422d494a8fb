use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::limits::in_coord_bounds;
use crate::geometry::tolerance::{aux_changed, point_changed};
use crate::model::Point3;
use crate::undo::{EditRecord, UndoOp};
use crate::{EditSession, SceneUpdate};

/// Values typed into the edit panel. `None` leaves that component untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EditFields {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub aux: Option<f64>,
}

/// Parses one panel field. Blank, non-numeric, non-finite or out-of-bounds
/// text counts as not supplied.
pub fn parse_field(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| in_coord_bounds(*v))
}

impl EditFields {
    pub fn parse(x: &str, y: &str, z: &str, aux: &str) -> EditFields {
        EditFields { x: parse_field(x), y: parse_field(y), z: parse_field(z), aux: parse_field(aux) }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none() && self.aux.is_none()
    }

    /// Drops values a caller could not have typed into a field.
    pub fn sanitized(self) -> EditFields {
        let keep = |v: Option<f64>| v.filter(|v| in_coord_bounds(*v));
        EditFields { x: keep(self.x), y: keep(self.y), z: keep(self.z), aux: keep(self.aux) }
    }

    pub fn apply_to(&self, pos: Point3) -> Point3 {
        Point3 {
            x: self.x.unwrap_or(pos.x),
            y: self.y.unwrap_or(pos.y),
            z: self.z.unwrap_or(pos.z),
        }
    }
}

impl EditSession {
    /// Applies `fields` to every selected point. Points whose result is within
    /// the change epsilon are skipped; the rest become one undo entry. Returns
    /// the number of points changed.
    pub fn apply_edit(&mut self, fields: EditFields) -> Result<usize> {
        let clean = fields.sanitized();
        if clean != fields {
            warn!(?fields, "dropping non-finite or out-of-bounds edit fields");
        }
        if self.selection.is_empty() || clean.is_empty() {
            return Ok(0);
        }
        self.cancel_drag();
        let eps = self.config.change_epsilon;
        let has_aux = self.points.has_aux();
        let mut items = Vec::new();
        for idx in self.selection.iter() {
            let prev = self.points.get(idx)?;
            let next_pos = clean.apply_to(prev.pos);
            let next_aux = if has_aux { clean.aux.or(prev.aux) } else { None };
            if !point_changed(prev.pos, next_pos, eps) && !aux_changed(prev.aux, next_aux, eps) {
                continue;
            }
            items.push(EditRecord { idx, prev_pos: prev.pos, next_pos, prev_aux: prev.aux, next_aux });
        }
        for r in &items {
            self.points.set(r.idx, r.next_pos, r.next_aux)?;
        }
        Ok(self.record_edits(items))
    }

    /// Pushes already-applied edits as a single or bulk undo entry.
    pub(crate) fn record_edits(&mut self, items: Vec<EditRecord>) -> usize {
        let n = items.len();
        let indices: Vec<usize> = items.iter().map(|r| r.idx).collect();
        let Some(op) = UndoOp::from_edits(items) else {
            return 0;
        };
        debug!(changed = n, kind = op.kind(), "edit recorded");
        self.undo.push(op);
        self.mark(SceneUpdate::Moved { indices });
        self.bump();
        n
    }

    /// Panel text for a point: coordinates with five decimals.
    pub fn field_text(&self, idx: usize) -> Result<[String; 3]> {
        let p = self.points.get(idx)?.pos;
        Ok([format!("{:.5}", p.x), format!("{:.5}", p.y), format!("{:.5}", p.z)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_treats_garbage_as_absent() {
        let f = EditFields::parse("1.5", " ", "abc", "inf");
        assert_eq!(f, EditFields { x: Some(1.5), y: None, z: None, aux: None });
        assert_eq!(parse_field("1e7"), None);
        assert_eq!(parse_field("-0.25 "), Some(-0.25));
        assert_eq!(parse_field("NaN"), None);
    }

    #[test]
    fn apply_overrides_only_supplied() {
        let f = EditFields { y: Some(9.0), ..Default::default() };
        assert_eq!(f.apply_to(Point3::new(1.0, 2.0, 3.0)), Point3::new(1.0, 9.0, 3.0));
    }
}
