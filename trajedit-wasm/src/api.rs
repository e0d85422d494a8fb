use crate::Editor;
use js_sys::{Float64Array, Uint32Array};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;
use crate::error;
use crate::interop::{arr_f64, arr_u32, arr_u8, new_obj, set_kv, to_u32, to_usize, warn};
use trajedit::geometry::limits;
use trajedit::{
    AxisMode, EditError, EditFields, EditorConfig, Point3, ScreenPoint, TrajectoryDoc,
    ViewProjection, Viewport,
};

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn camera(view_proj: &[f64], left: f64, top: f64, width: f64, height: f64) -> trajedit::Result<ViewProjection> {
    let vp = Viewport::new(left, top, width, height)?;
    ViewProjection::from_slice(view_proj, vp)
}

fn screen(param_x: &'static str, x: f64, param_y: &'static str, y: f64) -> Result<ScreenPoint, JsValue> {
    if !x.is_finite() {
        return Err(error::non_finite(param_x));
    }
    if !y.is_finite() {
        return Err(error::non_finite(param_y));
    }
    Ok(ScreenPoint::new(x, y))
}

fn strict_field(param: &'static str, v: Option<f64>) -> Result<Option<f64>, JsValue> {
    match v {
        Some(x) if !x.is_finite() => Err(error::non_finite(param)),
        Some(x) if !limits::in_coord_bounds(x) => Err(error::from_edit(&EditError::OutOfRange {
            param,
            min: limits::COORD_MIN,
            max: limits::COORD_MAX,
            got: x,
        })),
        other => Ok(other),
    }
}

fn strict_fields(x: Option<f64>, y: Option<f64>, z: Option<f64>, aux: Option<f64>) -> Result<EditFields, JsValue> {
    Ok(EditFields {
        x: strict_field("x", x)?,
        y: strict_field("y", y)?,
        z: strict_field("z", z)?,
        aux: strict_field("aux", aux)?,
    })
}

fn flat_doc(positions: &[f64], aux: Option<Vec<f64>>) -> trajedit::Result<TrajectoryDoc> {
    if positions.len() % 3 != 0 {
        return Err(EditError::RaggedArray { param: "positions", stride: 3, got: positions.len() });
    }
    let eef_pos = positions.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
    Ok(TrajectoryDoc { eef_pos, gripper: aux })
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Editor {
        crate::Editor::rs_new()
    }
    pub fn geom_version(&self) -> u64 {
        self.rs_geom_version()
    }

    // Config
    pub fn configure_res(&mut self, cfg: JsValue) -> JsValue {
        let val = match serde_wasm_bindgen::from_value::<serde_json::Value>(cfg) {
            Ok(v) => v,
            Err(e) => return error::err("invalid_json", e.to_string(), None),
        };
        let r = EditorConfig::from_json_value(val).and_then(|c| self.inner.set_config(c));
        error::wrap(r, |_| JsValue::from_bool(true))
    }
    pub fn set_point_size_res(&mut self, size: f64) -> JsValue {
        let r = self.inner.set_point_size(size);
        error::wrap(r, |_| JsValue::from_f64(self.inner.pick_threshold()))
    }
    pub fn pick_threshold(&self) -> f64 {
        self.inner.pick_threshold()
    }

    // Load
    pub fn load(&mut self, positions: &[f64], aux: Option<Vec<f64>>) -> bool {
        flat_doc(positions, aux).and_then(|d| self.inner.load_doc(d)).is_ok()
    }
    pub fn load_res(&mut self, positions: &[f64], aux: Option<Vec<f64>>) -> JsValue {
        let r = flat_doc(positions, aux).and_then(|d| self.inner.load_doc(d));
        error::wrap(r, |_| JsValue::from_f64(self.inner.points().len() as f64))
    }
    pub fn load_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => {
                let r = self.inner.load_json(val);
                error::wrap(r, |_| JsValue::from_f64(self.inner.points().len() as f64))
            }
            Err(e) => error::err("invalid_json", format!("{}", e), None),
        }
    }
    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }
    pub fn point_count(&self) -> u32 {
        self.inner.points().len() as u32
    }
    pub fn has_aux(&self) -> bool {
        self.inner.points().has_aux()
    }

    // Typed arrays getters
    pub fn get_point_data(&self) -> JsValue {
        let pts = self.inner.points();
        let flat: Vec<f64> = pts.positions().iter().flat_map(|p| p.to_array()).collect();
        let mut mask = vec![0u8; pts.len()];
        for i in self.inner.selection().iter() {
            if let Some(m) = mask.get_mut(i) { *m = 1; }
        }
        let obj = new_obj();
        set_kv(&obj, "positions", &arr_f64(&flat).into());
        match pts.aux() {
            Some(a) => set_kv(&obj, "aux", &arr_f64(a).into()),
            None => set_kv(&obj, "aux", &JsValue::NULL),
        }
        set_kv(&obj, "keep_indices", &arr_u32(&to_u32(pts.correspondence())).into());
        set_kv(&obj, "selected", &arr_u8(&mask).into());
        obj.into()
    }
    pub fn get_point_res(&self, idx: u32) -> JsValue {
        match self.inner.points().get(idx as usize) {
            Ok(w) => {
                let obj = new_obj();
                set_kv(&obj, "x", &JsValue::from_f64(w.pos.x));
                set_kv(&obj, "y", &JsValue::from_f64(w.pos.y));
                set_kv(&obj, "z", &JsValue::from_f64(w.pos.z));
                if let Some(a) = w.aux {
                    set_kv(&obj, "aux", &JsValue::from_f64(a));
                }
                error::ok(obj.into())
            }
            Err(e) => error::from_edit(&e),
        }
    }
    pub fn field_text_res(&self, idx: u32) -> JsValue {
        match self.inner.field_text(idx as usize) {
            Ok(t) => serde_wasm_bindgen::to_value(&t).map_or_else(error::serialize, error::ok),
            Err(e) => error::from_edit(&e),
        }
    }

    // Selection
    pub fn set_selection(&mut self, indices: &[u32]) -> bool {
        self.inner.set_selection(&to_usize(indices)).is_ok()
    }
    pub fn set_selection_res(&mut self, indices: &[u32]) -> JsValue {
        let r = self.inner.set_selection(&to_usize(indices));
        error::wrap(r, |_| JsValue::from_f64(self.inner.selection().len() as f64))
    }
    pub fn clear_selection(&mut self) {
        self.inner.clear_selection()
    }
    pub fn selection(&self) -> Uint32Array {
        arr_u32(&to_u32(&self.inner.selection().to_vec()))
    }
    pub fn primary(&self) -> Option<u32> {
        self.inner.primary().map(|i| i as u32)
    }

    // Picking
    #[allow(clippy::too_many_arguments)]
    pub fn pick_res(
        &mut self,
        candidates: &[u32],
        x: f64,
        y: f64,
        view_proj: &[f64],
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> JsValue {
        let click = match screen("x", x, "y", y) {
            Ok(p) => p,
            Err(e) => return e,
        };
        let cam = match camera(view_proj, left, top, width, height) {
            Ok(c) => c,
            Err(e) => return error::from_edit(&e),
        };
        match self.inner.pick_at(&to_usize(candidates), click, &cam) {
            Some(hit) => serde_wasm_bindgen::to_value(&hit).map_or_else(error::serialize, error::ok),
            None => error::ok(JsValue::NULL),
        }
    }
    #[allow(clippy::too_many_arguments)]
    pub fn marquee_res(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        view_proj: &[f64],
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> JsValue {
        let a = match screen("x0", x0, "y0", y0) {
            Ok(p) => p,
            Err(e) => return e,
        };
        let b = match screen("x1", x1, "y1", y1) {
            Ok(p) => p,
            Err(e) => return e,
        };
        let cam = match camera(view_proj, left, top, width, height) {
            Ok(c) => c,
            Err(e) => return error::from_edit(&e),
        };
        let n = self.inner.marquee_select(a, b, &cam);
        error::ok(JsValue::from_f64(n as f64))
    }
    pub fn is_click(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        self.inner.is_click(ScreenPoint::new(x0, y0), ScreenPoint::new(x1, y1))
    }

    // Edits
    pub fn apply_edit_text(&mut self, x: &str, y: &str, z: &str, aux: &str) -> u32 {
        match self.inner.apply_edit(EditFields::parse(x, y, z, aux)) {
            Ok(n) => n as u32,
            Err(e) => {
                warn(&format!("trajedit: edit failed: {}", e));
                0
            }
        }
    }
    pub fn apply_edit_res(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>, aux: Option<f64>) -> JsValue {
        let fields = match strict_fields(x, y, z, aux) {
            Ok(f) => f,
            Err(e) => return e,
        };
        error::wrap(self.inner.apply_edit(fields), |n| JsValue::from_f64(n as f64))
    }
    pub fn delete_selected(&mut self) -> u32 {
        self.inner.delete_selected().map_or(0, |n| n as u32)
    }
    pub fn delete_selected_res(&mut self) -> JsValue {
        error::wrap(self.inner.delete_selected(), |n| JsValue::from_f64(n as f64))
    }
    pub fn undo(&mut self) -> bool {
        self.inner.undo().unwrap_or(false)
    }
    pub fn undo_res(&mut self) -> JsValue {
        error::wrap(self.inner.undo(), JsValue::from_bool)
    }
    pub fn undo_depth(&self) -> u32 {
        self.inner.undo_depth() as u32
    }
    /// Newest undo entry, tagged by `kind`, or null. A serialization failure
    /// comes back as a `serialize` error envelope.
    pub fn undo_peek(&self) -> JsValue {
        match self.inner.undo_stack().peek() {
            Some(op) => serde_wasm_bindgen::to_value(op).unwrap_or_else(error::serialize),
            None => JsValue::NULL,
        }
    }

    // Gizmo drag
    pub fn begin_drag(&mut self) -> bool {
        self.inner.begin_drag()
    }
    pub fn drag_to_res(&mut self, idx: u32, x: f64, y: f64, z: f64) -> JsValue {
        error::wrap(self.inner.drag_to(idx as usize, Point3::new(x, y, z)), JsValue::from_bool)
    }
    pub fn drag_by_res(&mut self, dx: f64, dy: f64, dz: f64) -> JsValue {
        error::wrap(self.inner.drag_by(Point3::new(dx, dy, dz)), JsValue::from_bool)
    }
    pub fn end_drag(&mut self) -> u32 {
        self.inner.end_drag() as u32
    }
    pub fn cancel_drag(&mut self) -> bool {
        self.inner.cancel_drag()
    }
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    // Axis constraint
    pub fn set_axis_mode_res(&mut self, mode: &str) -> JsValue {
        let r = mode.parse::<AxisMode>().map(|m| self.inner.set_axis_mode(m));
        error::wrap(r, |_| JsValue::from_str(self.inner.axis_mode().as_str()))
    }
    pub fn axis_mode(&self) -> String {
        self.inner.axis_mode().to_string()
    }
    pub fn visible_handles(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.axis_mode().visible_handles()).unwrap_or_else(error::serialize)
    }

    // Rendering sync
    pub fn take_scene_update(&mut self) -> JsValue {
        match self.inner.take_scene_update() {
            Some(u) => serde_wasm_bindgen::to_value(&u).unwrap_or_else(error::serialize),
            None => JsValue::NULL,
        }
    }
    pub fn framing(&self) -> JsValue {
        let Some(f) = self.inner.framing() else {
            return JsValue::NULL;
        };
        let obj = new_obj();
        set_kv(&obj, "target", &arr_f64(&f.target.to_array()).into());
        set_kv(&obj, "distance", &JsValue::from_f64(f.distance));
        set_kv(&obj, "camera", &arr_f64(&f.camera_position().to_array()).into());
        obj.into()
    }
    pub fn positions(&self) -> Float64Array {
        let flat: Vec<f64> = self.inner.points().positions().iter().flat_map(|p| p.to_array()).collect();
        arr_f64(&flat)
    }

    // Save
    pub fn save_request_res(&self, file_id: &str, demo_key: &str, output_name: &str) -> JsValue {
        match self.inner.save_request(file_id, demo_key, output_name) {
            Ok(req) => {
                let ser = serde_wasm_bindgen::Serializer::json_compatible();
                serde::Serialize::serialize(&req, &ser).map_or_else(error::serialize, error::ok)
            }
            Err(e) => error::from_edit(&e),
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Editor::rs_new()
    }
}
