use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EditError, Result};
use crate::geometry::tolerance::EPS_EDIT;

/// Tunables for an edit session. Missing keys fall back to the defaults, so a
/// partial JSON object is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Per-component absolute difference below which an edit is a no-op.
    pub change_epsilon: f64,
    /// Pointer travel (px) under which a press/release pair counts as a click.
    pub click_slop_px: f64,
    /// Rendered point size in world units.
    pub point_size: f64,
    pub pick_threshold_factor: f64,
    pub min_pick_threshold: f64,
    /// `None` keeps every undo entry.
    pub max_undo_depth: Option<usize>,
    pub frame_distance_factor: f64,
    pub frame_distance_pad: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            change_epsilon: EPS_EDIT,
            click_slop_px: 4.0,
            point_size: 0.001,
            pick_threshold_factor: 0.8,
            min_pick_threshold: 0.001,
            max_undo_depth: None,
            frame_distance_factor: 2.5,
            frame_distance_pad: 0.1,
        }
    }
}

fn finite(param: &'static str, v: f64) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(EditError::NonFinite { param })
    }
}

fn positive(param: &'static str, v: f64) -> Result<()> {
    finite(param, v)?;
    if v <= 0.0 {
        return Err(EditError::OutOfRange { param, min: 0.0, max: f64::INFINITY, got: v });
    }
    Ok(())
}

fn non_negative(param: &'static str, v: f64) -> Result<()> {
    finite(param, v)?;
    if v < 0.0 {
        return Err(EditError::OutOfRange { param, min: 0.0, max: f64::INFINITY, got: v });
    }
    Ok(())
}

impl EditorConfig {
    pub fn from_json_value(v: Value) -> Result<Self> {
        let cfg: EditorConfig =
            serde_json::from_value(v).map_err(|e| EditError::InvalidJson(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("change_epsilon", self.change_epsilon)?;
        non_negative("click_slop_px", self.click_slop_px)?;
        positive("point_size", self.point_size)?;
        positive("pick_threshold_factor", self.pick_threshold_factor)?;
        non_negative("min_pick_threshold", self.min_pick_threshold)?;
        non_negative("frame_distance_factor", self.frame_distance_factor)?;
        non_negative("frame_distance_pad", self.frame_distance_pad)?;
        if self.max_undo_depth == Some(0) {
            return Err(EditError::OutOfRange {
                param: "max_undo_depth",
                min: 1.0,
                max: f64::INFINITY,
                got: 0.0,
            });
        }
        Ok(())
    }

    /// Ray threshold for the external hit-test, derived from the point size.
    pub fn pick_threshold(&self) -> f64 {
        (self.point_size * self.pick_threshold_factor).max(self.min_pick_threshold)
    }

    pub fn set_point_size(&mut self, size: f64) -> Result<()> {
        positive("point_size", size)?;
        self.point_size = size;
        Ok(())
    }
}
