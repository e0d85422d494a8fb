use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

/// Browser handle on one edit session. The page owns rendering and ray
/// casting; everything that changes points goes through here.
#[wasm_bindgen]
pub struct Editor { pub(crate) inner: trajedit::EditSession }

impl Editor {
    pub fn rs_new() -> Editor { Editor { inner: trajedit::EditSession::new() } }
    pub fn rs_geom_version(&self) -> u64 { self.inner.geom_version() }
}
