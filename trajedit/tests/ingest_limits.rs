use serde_json::json;
use trajedit::geometry::limits::MAX_POINTS;
use trajedit::{EditFields, EditSession, EditorConfig, Point3};

fn loaded() -> EditSession {
    let mut s = EditSession::new();
    s.load_json(json!({"eef_pos": [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]], "gripper": [0.0, 1.0]}))
        .unwrap();
    s
}

#[test]
fn json_length_mismatch_keeps_previous_state() {
    let mut s = loaded();
    s.set_selection(&[1]).unwrap();
    let ver = s.geom_version();
    let err = s
        .load_json(json!({"eef_pos": [[0.0, 0.0, 0.0]], "gripper": [0.0, 1.0]}))
        .unwrap_err();
    assert_eq!(err.code(), "length_mismatch");
    assert_eq!(s.points().len(), 2);
    assert_eq!(s.selection().to_vec(), vec![1]);
    assert_eq!(s.geom_version(), ver);
}

#[test]
fn json_rows_must_have_three_columns() {
    let mut s = EditSession::new();
    let err = s.load_json(json!({"eef_pos": [[0.0, 0.0]]})).unwrap_err();
    assert_eq!(err.code(), "invalid_json");
    let err = s.load_json(json!({"positions": []})).unwrap_err();
    assert_eq!(err.code(), "invalid_json");
    assert!(!s.is_loaded());
}

#[test]
fn json_numbers_outside_world_bounds() {
    let mut s = EditSession::new();
    let err = s.load_json(json!({"eef_pos": [[1.0e7, 0.0, 0.0]]})).unwrap_err();
    assert_eq!(err.code(), "out_of_range");
    let err = s
        .load_json(json!({"eef_pos": [[0.0, 0.0, 0.0]], "gripper": [-2.0e6]}))
        .unwrap_err();
    assert_eq!(err.code(), "out_of_range");
}

#[test]
fn direct_load_checks_values_too() {
    let mut s = loaded();
    let ver = s.geom_version();
    let err = s.load(vec![Point3::new(f64::NAN, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)], None).unwrap_err();
    assert_eq!(err.code(), "non_finite");
    let err = s.load(vec![Point3::new(0.0, 3.0e6, 0.0)], None).unwrap_err();
    assert_eq!(err.code(), "out_of_range");
    let err = s.load(vec![Point3::ZERO], Some(vec![f64::NAN])).unwrap_err();
    assert_eq!(err.code(), "non_finite");
    assert_eq!(s.points().len(), 2);
    assert_eq!(s.geom_version(), ver);

    // with only finite points loaded, rewriting a field with its own value is a no-op
    s.set_selection(&[0]).unwrap();
    for _ in 0..3 {
        assert_eq!(s.apply_edit(EditFields { y: Some(0.0), ..Default::default() }).unwrap(), 0);
    }
    assert_eq!(s.undo_depth(), 0);
}

#[test]
fn point_cap_exceeded() {
    let mut s = EditSession::new();
    let pts = vec![Point3::ZERO; MAX_POINTS + 1];
    let err = s.load(pts, None).unwrap_err();
    assert_eq!(err.code(), "too_many_points");
    assert!(!s.is_loaded());
}

#[test]
fn empty_trajectory_is_accepted() {
    let mut s = EditSession::new();
    s.load_json(json!({"eef_pos": []})).unwrap();
    assert!(s.is_loaded());
    assert!(s.points().is_empty());
    assert!(s.framing().is_none());
    assert_eq!(s.marquee_select(
        trajedit::ScreenPoint::new(0.0, 0.0),
        trajedit::ScreenPoint::new(10.0, 10.0),
        &|p: Point3| Some(trajedit::ScreenPoint::new(p.x, p.y)),
    ), 0);
}

#[test]
fn unusable_edit_values_are_dropped() {
    let mut s = loaded();
    s.set_selection(&[0]).unwrap();
    let f = EditFields { x: Some(f64::NAN), y: Some(f64::NEG_INFINITY), z: Some(5.0e6), aux: Some(f64::NAN) };
    assert_eq!(s.apply_edit(f).unwrap(), 0);
    assert_eq!(s.undo_depth(), 0);
    assert_eq!(s.points().positions()[0], Point3::ZERO);
}

#[test]
fn config_values_are_validated() {
    let err = EditorConfig::from_json_value(json!({"click_slop_px": "four"})).unwrap_err();
    assert_eq!(err.code(), "invalid_json");
    let err = EditSession::with_config(EditorConfig { max_undo_depth: Some(0), ..Default::default() })
        .err()
        .unwrap();
    assert_eq!(err.code(), "out_of_range");

    let mut s = EditSession::new();
    assert_eq!(s.set_point_size(f64::NAN).unwrap_err().code(), "non_finite");
    s.set_point_size(0.01).unwrap();
    assert!((s.pick_threshold() - 0.008).abs() < 1e-12);
    s.set_point_size(0.0005).unwrap();
    assert_eq!(s.pick_threshold(), 0.001);
}
