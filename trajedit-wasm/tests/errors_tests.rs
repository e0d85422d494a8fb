use js_sys::{Object, Reflect};
use trajedit_wasm::Editor;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const IDENTITY: [f64; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

fn is_err(v: &JsValue, code: &str) -> bool {
    if let Ok(ok) =
        Reflect::get(v, &JsValue::from_str("ok")).and_then(|x| x.as_bool().ok_or(JsValue::NULL))
    {
        if ok {
            return false;
        }
        if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
            if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) {
                return c.as_string().map_or(false, |s| s == code);
            }
        }
    }
    false
}

fn data(v: &JsValue, k: &str) -> JsValue {
    let err = Reflect::get(v, &JsValue::from_str("error")).unwrap();
    let d = Reflect::get(&err, &JsValue::from_str("data")).unwrap();
    Reflect::get(&d, &JsValue::from_str(k)).unwrap()
}

fn editor() -> Editor {
    let mut ed = Editor::new();
    assert!(ed.load(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0], None));
    ed
}

#[wasm_bindgen_test]
fn invalid_indices_do_not_mutate() {
    let mut ed = editor();
    ed.set_selection(&[1]);
    let ver = ed.geom_version();

    let r = ed.set_selection_res(&[0, 3]);
    assert!(is_err(&r, "invalid_index"));
    assert_eq!(data(&r, "index").as_f64(), Some(3.0));
    assert_eq!(data(&r, "len").as_f64(), Some(3.0));
    assert_eq!(ed.selection().to_vec(), vec![1]);
    assert!(!ed.set_selection(&[9]));

    assert!(is_err(&ed.get_point_res(3), "invalid_index"));
    assert!(is_err(&ed.field_text_res(5), "invalid_index"));
    assert_eq!(ed.geom_version(), ver, "state mutated on error");
}

#[wasm_bindgen_test]
fn strict_edit_values() {
    let mut ed = editor();
    ed.set_selection(&[0]);
    let ver = ed.geom_version();
    assert!(is_err(&ed.apply_edit_res(Some(f64::NAN), None, None, None), "non_finite"));
    let r = ed.apply_edit_res(None, None, Some(2.0e6), None);
    assert!(is_err(&r, "out_of_range"));
    assert_eq!(data(&r, "param").as_string().as_deref(), Some("z"));
    assert_eq!(ed.undo_depth(), 0);
    assert_eq!(ed.geom_version(), ver);

    // the text path drops what it cannot parse instead
    assert_eq!(ed.apply_edit_text("abc", "", "1e9", ""), 0);
    assert_eq!(ed.undo_depth(), 0);
}

#[wasm_bindgen_test]
fn load_shape_errors() {
    let mut ed = editor();
    let r = ed.load_res(&[0.0, 1.0, 2.0, 3.0], None);
    assert!(is_err(&r, "invalid_array"));
    assert_eq!(data(&r, "stride").as_f64(), Some(3.0));
    assert_eq!(data(&r, "got").as_f64(), Some(4.0));
    let r = ed.load_res(&[0.0, 1.0, 2.0], Some(vec![0.0, 1.0]));
    assert!(is_err(&r, "length_mismatch"));
    assert!(is_err(&ed.load_res(&[f64::INFINITY, 0.0, 0.0], None), "non_finite"));
    assert_eq!(ed.point_count(), 3);

    assert!(is_err(&ed.load_json_res(JsValue::from_str("nope")), "invalid_json"));
    let doc = Object::new();
    Reflect::set(&doc, &JsValue::from_str("eef_pos"), &JsValue::from_f64(1.0)).unwrap();
    assert!(is_err(&ed.load_json_res(doc.into()), "invalid_json"));
    assert_eq!(ed.point_count(), 3);
}

#[wasm_bindgen_test]
fn camera_and_pointer_errors() {
    let mut ed = editor();
    assert!(is_err(&ed.pick_res(&[0], f64::NAN, 0.0, &IDENTITY, 0.0, 0.0, 10.0, 10.0), "non_finite"));
    assert!(is_err(&ed.pick_res(&[0], 0.0, 0.0, &IDENTITY[..15], 0.0, 0.0, 10.0, 10.0), "invalid_array"));
    assert!(is_err(&ed.pick_res(&[0], 0.0, 0.0, &IDENTITY, 0.0, 0.0, 0.0, 10.0), "out_of_range"));
    assert!(is_err(
        &ed.marquee_res(0.0, 0.0, f64::INFINITY, 1.0, &IDENTITY, 0.0, 0.0, 10.0, 10.0),
        "non_finite"
    ));
    // a miss is not an error
    let r = ed.pick_res(&[], 0.0, 0.0, &IDENTITY, 0.0, 0.0, 10.0, 10.0);
    assert!(Reflect::get(&r, &JsValue::from_str("value")).unwrap().is_null());
}

#[wasm_bindgen_test]
fn mode_config_and_save_errors() {
    let mut ed = Editor::new();
    assert!(is_err(&ed.set_axis_mode_res("w"), "invalid_mode"));
    assert_eq!(ed.axis_mode(), "free");
    assert!(is_err(&ed.set_point_size_res(-1.0), "out_of_range"));
    assert!(is_err(&ed.save_request_res("f", "d", "x"), "not_loaded"));

    let cfg = Object::new();
    Reflect::set(&cfg, &JsValue::from_str("click_slop_px"), &JsValue::from_str("far")).unwrap();
    assert!(is_err(&ed.configure_res(cfg.into()), "invalid_json"));
}

#[wasm_bindgen_test]
fn drag_errors_keep_points() {
    let mut ed = editor();
    ed.set_selection(&[2]);
    assert!(ed.begin_drag());
    assert!(is_err(&ed.drag_to_res(2, 0.0, f64::NAN, 0.0), "non_finite"));
    assert!(is_err(&ed.drag_by_res(5.0e6, 0.0, 0.0), "out_of_range"));
    assert!(ed.is_dragging());
    assert!(ed.cancel_drag());
    assert_eq!(ed.end_drag(), 0);
    assert_eq!(ed.undo_depth(), 0);
}
