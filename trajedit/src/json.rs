use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{EditError, Result};
use crate::geometry::limits;
use crate::model::Point3;
use crate::EditSession;

pub const DEFAULT_OUTPUT_NAME: &str = "edited.h5";

/// One demo's waypoints as the backend serves them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryDoc {
    pub eef_pos: Vec<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gripper: Option<Vec<f64>>,
}

/// Body of the save call. `keep_indices[i]` is the loaded index of the point
/// now at slot `i`, letting the backend drop deleted rows from parallel data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub file_id: String,
    pub demo_key: String,
    pub eef_pos: Vec<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gripper: Option<Vec<f64>>,
    pub keep_indices: Vec<usize>,
    pub output_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedOutput {
    pub output_name: String,
    pub download_url: String,
}

impl TrajectoryDoc {
    /// Strict parse: shape, caps, numeric bounds and channel length.
    pub fn from_json_value(v: Value) -> Result<TrajectoryDoc> {
        let doc: TrajectoryDoc =
            serde_json::from_value(v).map_err(|e| EditError::InvalidJson(e.to_string()))?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn validate(&self) -> Result<()> {
        if self.eef_pos.len() > limits::MAX_POINTS {
            return Err(EditError::TooManyPoints { got: self.eef_pos.len(), max: limits::MAX_POINTS });
        }
        for p in &self.eef_pos {
            for (param, v) in [("eef_pos.x", p[0]), ("eef_pos.y", p[1]), ("eef_pos.z", p[2])] {
                limits::check_value(param, v)?;
            }
        }
        if let Some(g) = &self.gripper {
            if g.len() != self.eef_pos.len() {
                return Err(EditError::LengthMismatch { points: self.eef_pos.len(), aux: g.len() });
            }
            for &v in g {
                limits::check_value("gripper", v)?;
            }
        }
        Ok(())
    }

    pub fn into_parts(self) -> (Vec<Point3>, Option<Vec<f64>>) {
        (self.eef_pos.into_iter().map(Point3::from).collect(), self.gripper)
    }
}

/// Reduces a user-supplied file name to a bare `.h5`/`.hdf5` file name.
pub fn sanitize_output_name(name: &str) -> String {
    let base = name.trim().rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or("");
    let mut out = base.replace("..", "").trim().to_string();
    if out.is_empty() {
        out = DEFAULT_OUTPUT_NAME.to_string();
    }
    if !out.ends_with(".h5") && !out.ends_with(".hdf5") {
        out.push_str(".h5");
    }
    out
}

impl EditSession {
    pub fn load_doc(&mut self, doc: TrajectoryDoc) -> Result<()> {
        doc.validate()?;
        let (points, aux) = doc.into_parts();
        self.load(points, aux)
    }

    pub fn load_json(&mut self, v: Value) -> Result<()> {
        let doc = TrajectoryDoc::from_json_value(v).inspect_err(|e| {
            warn!(code = e.code(), error = %e, "rejecting trajectory document");
        })?;
        self.load_doc(doc)
    }

    /// Current points in document form.
    pub fn to_doc(&self) -> TrajectoryDoc {
        TrajectoryDoc {
            eef_pos: self.points.positions().iter().map(|p| p.to_array()).collect(),
            gripper: self.points.aux().map(|a| a.to_vec()),
        }
    }

    pub fn save_request(&self, file_id: &str, demo_key: &str, output_name: &str) -> Result<SaveRequest> {
        if !self.loaded {
            return Err(EditError::NotLoaded);
        }
        let doc = self.to_doc();
        Ok(SaveRequest {
            file_id: file_id.to_string(),
            demo_key: demo_key.to_string(),
            eef_pos: doc.eef_pos,
            gripper: doc.gripper,
            keep_indices: self.points.correspondence().to_vec(),
            output_name: sanitize_output_name(output_name),
        })
    }
}
