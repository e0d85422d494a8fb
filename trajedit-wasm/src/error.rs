use wasm_bindgen::prelude::*;
use js_sys::Object;
use trajedit::EditError;

use crate::interop::{new_obj, set_kv, warn};

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

fn num(o: &Object, k: &str, v: f64) { set_kv(o, k, &JsValue::from_f64(v)); }

/// Envelope for a core error; `data` carries the structured fields so callers
/// can branch without parsing the message.
pub fn from_edit(e: &EditError) -> JsValue {
    warn(&format!("trajedit: {} ({})", e, e.code()));
    let d = new_obj();
    match e {
        EditError::IndexOutOfRange { index, len } => {
            num(&d, "index", *index as f64);
            num(&d, "len", *len as f64);
        }
        EditError::LengthMismatch { points, aux } => {
            num(&d, "points", *points as f64);
            num(&d, "aux", *aux as f64);
        }
        EditError::InvalidArray { param, expected, got } => {
            set_kv(&d, "param", &JsValue::from_str(param));
            num(&d, "expected", *expected as f64);
            num(&d, "got", *got as f64);
        }
        EditError::RaggedArray { param, stride, got } => {
            set_kv(&d, "param", &JsValue::from_str(param));
            num(&d, "stride", *stride as f64);
            num(&d, "got", *got as f64);
        }
        EditError::NonFinite { param } => set_kv(&d, "param", &JsValue::from_str(param)),
        EditError::OutOfRange { param, min, max, got } => {
            set_kv(&d, "param", &JsValue::from_str(param));
            num(&d, "min", *min);
            num(&d, "max", *max);
            num(&d, "got", *got);
        }
        EditError::TooManyPoints { got, max } => {
            num(&d, "got", *got as f64);
            num(&d, "max", *max as f64);
        }
        EditError::InvalidMode(got) => set_kv(&d, "got", &JsValue::from_str(got)),
        EditError::InvalidJson(_) | EditError::Store(_) | EditError::NotLoaded => {
            return err(e.code(), e.to_string(), None);
        }
    }
    err(e.code(), e.to_string(), Some(d.into()))
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

pub fn serialize(e: serde_wasm_bindgen::Error) -> JsValue {
    warn(&format!("trajedit: serialization failed: {}", e));
    err("serialize", e.to_string(), None)
}

/// Folds a core result into the envelope.
pub fn wrap<T, F>(r: trajedit::Result<T>, f: F) -> JsValue
where
    F: FnOnce(T) -> JsValue,
{
    match r {
        Ok(v) => ok(f(v)),
        Err(e) => from_edit(&e),
    }
}
