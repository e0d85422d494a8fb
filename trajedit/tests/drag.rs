use trajedit::{EditError, EditFields, EditSession, Point3, SceneUpdate, UndoOp};

fn p(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

fn line(aux: bool) -> EditSession {
    let mut s = EditSession::new();
    let pts = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)];
    s.load(pts, aux.then(|| vec![0.0, 0.5, 1.0])).unwrap();
    s.take_scene_update();
    s
}

#[test]
fn single_point_drag_records_single_edit() {
    let mut s = line(false);
    s.set_selection(&[1]).unwrap();
    assert!(s.begin_drag());
    assert!(s.drag_to(1, p(1.0, 2.0, 0.0)).unwrap());
    assert!(s.drag_to(1, p(1.0, 3.0, 0.0)).unwrap());
    assert_eq!(s.undo_depth(), 0);
    assert_eq!(s.take_scene_update(), Some(SceneUpdate::Moved { indices: vec![1] }));

    assert_eq!(s.end_drag(), 1);
    assert!(!s.is_dragging());
    match s.undo_stack().peek() {
        Some(UndoOp::SingleEdit(r)) => {
            assert_eq!(r.prev_pos, p(1.0, 0.0, 0.0));
            assert_eq!(r.next_pos, p(1.0, 3.0, 0.0));
        }
        other => panic!("expected single edit, got {:?}", other),
    }
    s.undo().unwrap();
    assert_eq!(s.points().positions()[1], p(1.0, 0.0, 0.0));
}

#[test]
fn group_drag_records_bulk_edit_with_aux_untouched() {
    let mut s = line(true);
    s.set_selection(&[0, 2]).unwrap();
    assert!(s.begin_drag());
    assert!(s.drag_by(p(0.0, 0.0, 0.5)).unwrap());
    assert!(s.drag_by(p(0.0, 0.0, 1.0)).unwrap());
    assert_eq!(s.points().positions()[0], p(0.0, 0.0, 1.0));
    assert_eq!(s.points().positions()[2], p(2.0, 0.0, 1.0));

    assert_eq!(s.end_drag(), 2);
    match s.undo_stack().peek() {
        Some(UndoOp::BulkEdit { items }) => {
            assert_eq!(items.len(), 2);
            assert_eq!(items[1].prev_aux, Some(1.0));
            assert_eq!(items[1].next_aux, Some(1.0));
        }
        other => panic!("expected bulk edit, got {:?}", other),
    }
    assert_eq!(s.points().aux().unwrap(), &[0.0, 0.5, 1.0]);
}

#[test]
fn drag_back_to_start_is_not_an_edit() {
    let mut s = line(false);
    s.set_selection(&[0, 1]).unwrap();
    s.begin_drag();
    s.drag_by(p(0.3, 0.0, 0.0)).unwrap();
    s.drag_by(p(4e-10, 0.0, 0.0)).unwrap();
    assert_eq!(s.take_scene_update(), Some(SceneUpdate::Moved { indices: vec![0, 1] }));
    let ver = s.geom_version();
    assert_eq!(s.end_drag(), 0);
    assert_eq!(s.undo_depth(), 0);
    assert_eq!(s.points().positions()[0], p(0.0, 0.0, 0.0));
    assert_eq!(s.points().positions()[1], p(1.0, 0.0, 0.0));
    // the renderer last saw the jittered positions
    assert_eq!(s.take_scene_update(), Some(SceneUpdate::Moved { indices: vec![0, 1] }));
    assert!(s.geom_version() > ver);
}

#[test]
fn drag_left_exactly_at_start_changes_nothing() {
    let mut s = line(false);
    s.set_selection(&[2]).unwrap();
    s.begin_drag();
    s.drag_to(2, p(2.0, 0.0, 0.0)).unwrap();
    s.take_scene_update();
    let ver = s.geom_version();
    assert_eq!(s.end_drag(), 0);
    assert_eq!(s.take_scene_update(), None);
    assert_eq!(s.geom_version(), ver);
}

#[test]
fn only_moved_points_are_recorded() {
    let mut s = line(false);
    s.set_selection(&[0, 1, 2]).unwrap();
    s.begin_drag();
    s.drag_to(2, p(2.0, 1.0, 0.0)).unwrap();
    assert_eq!(s.end_drag(), 1);
    assert!(matches!(s.undo_stack().peek(), Some(UndoOp::SingleEdit(r)) if r.idx == 2));
}

#[test]
fn cancel_restores_start_positions() {
    let mut s = line(false);
    s.set_selection(&[1, 2]).unwrap();
    s.begin_drag();
    s.drag_by(p(5.0, 5.0, 5.0)).unwrap();
    s.take_scene_update();
    assert!(s.cancel_drag());
    assert_eq!(s.points().positions()[1], p(1.0, 0.0, 0.0));
    assert_eq!(s.points().positions()[2], p(2.0, 0.0, 0.0));
    assert_eq!(s.take_scene_update(), Some(SceneUpdate::Moved { indices: vec![1, 2] }));
    assert_eq!(s.undo_depth(), 0);
    assert!(!s.cancel_drag());
}

#[test]
fn rejects_bad_targets() {
    let mut s = line(false);
    assert!(!s.begin_drag());
    assert!(!s.drag_by(p(1.0, 0.0, 0.0)).unwrap());

    s.set_selection(&[0]).unwrap();
    s.begin_drag();
    assert!(!s.drag_to(1, p(9.0, 9.0, 9.0)).unwrap());
    assert_eq!(s.points().positions()[1], p(1.0, 0.0, 0.0));

    let err = s.drag_to(0, p(f64::NAN, 0.0, 0.0)).unwrap_err();
    assert_eq!(err, EditError::NonFinite { param: "x" });
    assert_eq!(s.drag_by(p(0.0, 2e6, 0.0)).unwrap_err().code(), "out_of_range");
    assert_eq!(s.points().positions()[0], p(0.0, 0.0, 0.0));
    assert!(s.is_dragging());
}

#[test]
fn other_mutations_cancel_the_drag() {
    let mut s = line(false);
    s.set_selection(&[0]).unwrap();
    s.apply_edit(EditFields { y: Some(1.0), ..Default::default() }).unwrap();

    s.set_selection(&[1]).unwrap();
    s.begin_drag();
    s.drag_to(1, p(7.0, 0.0, 0.0)).unwrap();
    assert!(s.undo().unwrap());
    assert!(!s.is_dragging());
    assert_eq!(s.points().positions()[1], p(1.0, 0.0, 0.0));
    assert_eq!(s.points().positions()[0], p(0.0, 0.0, 0.0));
    assert_eq!(s.undo_depth(), 0);

    s.set_selection(&[2]).unwrap();
    s.begin_drag();
    s.drag_to(2, p(2.0, 2.0, 2.0)).unwrap();
    s.set_selection(&[0]).unwrap();
    assert!(!s.is_dragging());
    assert_eq!(s.points().positions()[2], p(2.0, 0.0, 0.0));
}

#[test]
fn begin_commits_previous_drag() {
    let mut s = line(false);
    s.set_selection(&[0]).unwrap();
    s.begin_drag();
    s.drag_to(0, p(-1.0, 0.0, 0.0)).unwrap();
    assert!(s.begin_drag());
    assert_eq!(s.undo_depth(), 1);
    assert_eq!(s.points().positions()[0], p(-1.0, 0.0, 0.0));
    s.end_drag();
    assert_eq!(s.undo_depth(), 1);
}
