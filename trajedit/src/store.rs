use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::error::{EditError, Result};
use crate::json::{sanitize_output_name, SaveRequest, SavedOutput, TrajectoryDoc};
use crate::EditSession;

/// Backend that owns the recorded trajectories. Calls are request/response;
/// a failed call must not have partially applied anything on the caller side.
pub trait TrajectoryStore {
    fn load(&mut self, file_id: &str, demo_key: &str) -> Result<TrajectoryDoc>;
    fn save(&mut self, req: &SaveRequest) -> Result<SavedOutput>;
}

/// In-process store keyed by upload id and demo key.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    files: HashMap<String, BTreeMap<String, TrajectoryDoc>>,
    outputs: HashMap<String, SaveRequest>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file_id: &str, demo_key: &str, doc: TrajectoryDoc) {
        self.files.entry(file_id.to_string()).or_default().insert(demo_key.to_string(), doc);
    }

    /// Demo keys of an upload, sorted.
    pub fn demo_keys(&self, file_id: &str) -> Vec<String> {
        self.files.get(file_id).map(|m| m.keys().cloned().collect()).unwrap_or_default()
    }

    pub fn output(&self, name: &str) -> Option<&SaveRequest> {
        self.outputs.get(name)
    }
}

impl TrajectoryStore for MemoryStore {
    fn load(&mut self, file_id: &str, demo_key: &str) -> Result<TrajectoryDoc> {
        let demos = self
            .files
            .get(file_id)
            .ok_or_else(|| EditError::Store(format!("uploaded file '{}' not found", file_id)))?;
        demos
            .get(demo_key)
            .cloned()
            .ok_or_else(|| EditError::Store(format!("demo key '{}' not found", demo_key)))
    }

    fn save(&mut self, req: &SaveRequest) -> Result<SavedOutput> {
        if !self.files.get(&req.file_id).is_some_and(|m| m.contains_key(&req.demo_key)) {
            return Err(EditError::Store(format!("demo key '{}' not found", req.demo_key)));
        }
        if req.keep_indices.len() != req.eef_pos.len() {
            return Err(EditError::InvalidArray {
                param: "keep_indices",
                expected: req.eef_pos.len(),
                got: req.keep_indices.len(),
            });
        }
        let name = sanitize_output_name(&req.output_name);
        self.outputs.insert(name.clone(), req.clone());
        Ok(SavedOutput { download_url: format!("/api/download/{}", name), output_name: name })
    }
}

impl EditSession {
    /// Loads one demo from `store`. A store failure leaves the session as it was.
    pub fn load_from<S: TrajectoryStore + ?Sized>(
        &mut self,
        store: &mut S,
        file_id: &str,
        demo_key: &str,
    ) -> Result<()> {
        let doc = store.load(file_id, demo_key).inspect_err(|e| {
            warn!(file_id, demo_key, error = %e, "trajectory load failed");
        })?;
        self.load_doc(doc)
    }

    /// Hands the current points and correspondence to `store`. The session is
    /// never modified, so a failed save can simply be retried.
    pub fn save_to<S: TrajectoryStore + ?Sized>(
        &self,
        store: &mut S,
        file_id: &str,
        demo_key: &str,
        output_name: &str,
    ) -> Result<SavedOutput> {
        let req = self.save_request(file_id, demo_key, output_name)?;
        let out = store.save(&req).inspect_err(|e| {
            warn!(file_id, demo_key, error = %e, "trajectory save failed");
        })?;
        debug!(output = %out.output_name, points = req.eef_pos.len(), "trajectory saved");
        Ok(out)
    }
}
