//! Integration tests for pointer gestures driven through the editor

use floor_placement::{
    ContainerBounds, Editor, Floor, Footprint, Gesture, GestureFrame, GestureOutcome, Handle,
    Location, ObjectKind, ObjectPatch, PlacementConfig, PlacementError, Point,
};
use pretty_assertions::assert_eq;

// 1000x1000 px container at the origin: 1% of the plan is 10 px at scale 1.
fn editor_with_two_tables() -> (Editor, String, String) {
    let mut location = Location::new("cafe", "Cafe");
    location.floors.push(Floor::new("floor-1", "Ground"));
    let mut editor = Editor::new(
        location,
        PlacementConfig::default(),
        ContainerBounds::sized(1000.0, 1000.0),
    );
    let left = editor
        .drop_object(ObjectKind::Table, Point::new(500.0, 500.0))
        .unwrap();
    let right = editor
        .drop_object(ObjectKind::Table, Point::new(600.0, 500.0))
        .unwrap();
    (editor, left.id, right.id)
}

fn footprint(editor: &Editor, id: &str) -> Footprint {
    editor
        .active_floor()
        .and_then(|f| f.object(id))
        .map(|o| o.footprint())
        .expect("object exists")
}

fn assert_footprint_close(actual: Footprint, expected: Footprint) {
    const EPS: f64 = 1e-7;
    assert!(
        (actual.center.x - expected.center.x).abs() < EPS
            && (actual.center.y - expected.center.y).abs() < EPS
            && (actual.width - expected.width).abs() < EPS
            && (actual.height - expected.height).abs() < EPS,
        "{:?} != {:?}",
        actual,
        expected
    );
}

fn resize_frame(frame: GestureFrame) -> (Footprint, bool) {
    match frame {
        GestureFrame::Resizing { footprint, applied } => (footprint, applied),
        other => panic!("Expected resize frame, got {:?}", other),
    }
}

#[test]
fn test_resize_stops_at_neighbour() {
    let (mut editor, left, right) = editor_with_two_tables();
    let right_before = footprint(&editor, &right);

    // Bottom-right corner of the left table sits at (525, 525) px.
    editor
        .begin_gesture(Gesture::Resize {
            object_id: left.clone(),
            handle: Handle::BottomRight,
            pointer: Point::new(525.0, 525.0),
        })
        .unwrap();

    // +2% wide: right edge at 54.5, clear of the neighbour at 57.5
    let (valid, applied) = resize_frame(editor.update_gesture(Point::new(545.0, 525.0)).unwrap());
    assert!(applied);
    assert_footprint_close(valid, Footprint::from_edges(47.5, 47.5, 54.5, 52.5));

    // +5.5% wide puts the right edge at 58.0, past the neighbour's left
    // edge at 57.5
    let (kept, applied) = resize_frame(editor.update_gesture(Point::new(580.0, 525.0)).unwrap());
    assert!(!applied);
    assert_eq!(kept, valid);
    assert_eq!(footprint(&editor, &left), valid);

    let outcome = editor.commit_gesture().unwrap();
    match outcome {
        GestureOutcome::Resized(obj) => assert_eq!(obj.footprint(), valid),
        other => panic!("Expected resize outcome, got {:?}", other),
    }
    assert_eq!(footprint(&editor, &right), right_before);
}

#[test]
fn test_cancel_restores_geometry() {
    let (mut editor, left, _) = editor_with_two_tables();
    let before = footprint(&editor, &left);

    editor
        .begin_gesture(Gesture::Resize {
            object_id: left.clone(),
            handle: Handle::TopLeft,
            pointer: Point::new(475.0, 475.0),
        })
        .unwrap();
    editor.update_gesture(Point::new(400.0, 420.0)).unwrap();
    assert_ne!(footprint(&editor, &left), before);

    editor.cancel_gesture().unwrap();
    assert_eq!(footprint(&editor, &left), before);
}

#[test]
fn test_drag_onto_neighbour_rejected_on_commit() {
    let (mut editor, left, right) = editor_with_two_tables();
    let before = footprint(&editor, &left);

    editor
        .begin_gesture(Gesture::Drag {
            object_id: left.clone(),
            pointer: Point::new(500.0, 500.0),
        })
        .unwrap();
    editor.update_gesture(Point::new(590.0, 510.0)).unwrap();

    let err = editor.commit_gesture().unwrap_err();
    assert!(err.is_collision());
    assert_eq!(footprint(&editor, &left), before);
    assert!(editor.active_floor().unwrap().object(&right).is_some());

    // The session is idle again after a rejected commit
    editor
        .begin_gesture(Gesture::Drag {
            object_id: left.clone(),
            pointer: Point::new(500.0, 500.0),
        })
        .unwrap();
    editor.update_gesture(Point::new(300.0, 300.0)).unwrap();
    editor.commit_gesture().unwrap();
    assert_eq!(footprint(&editor, &left).center, Point::new(30.0, 30.0));
}

#[test]
fn test_drop_after_zoom_uses_plan_coordinates() {
    let (mut editor, _, _) = editor_with_two_tables();

    // Zoom in 1.1x around the top-left corner: pointer (110, 110) now maps
    // to the plan point that used to be at (100, 100).
    editor.wheel(Point::new(0.0, 0.0), -1.0);
    let obj = editor
        .drop_object(ObjectKind::Workspace, Point::new(110.0, 110.0))
        .unwrap();

    assert!((obj.position.x - 10.0).abs() < 1e-9);
    assert!((obj.position.y - 10.0).abs() < 1e-9);
}

#[test]
fn test_edits_blocked_while_gesture_active() {
    let (mut editor, left, right) = editor_with_two_tables();
    let floor_before = editor.active_floor().unwrap().clone();

    // Shrink the left table from its top-left corner, freeing (47.5, 47.5)
    editor
        .begin_gesture(Gesture::Resize {
            object_id: left.clone(),
            handle: Handle::TopLeft,
            pointer: Point::new(475.0, 475.0),
        })
        .unwrap();
    editor.update_gesture(Point::new(495.0, 495.0)).unwrap();
    let shrunk = footprint(&editor, &left);

    let in_progress = PlacementError::GestureInProgress { active: "resize" };
    let patch = ObjectPatch::new().with_position(Point::new(47.0, 47.0));
    assert_eq!(editor.update_object(&right, &patch), Err(in_progress.clone()));
    assert_eq!(
        editor.drop_object(ObjectKind::Table, Point::new(470.0, 470.0)),
        Err(in_progress.clone())
    );
    assert_eq!(editor.delete_object(&right), Err(in_progress.clone()));
    assert_eq!(editor.clear_active_floor(), Err(in_progress.clone()));
    assert_eq!(editor.add_floor("Terrace"), Err(in_progress.clone()));
    assert_eq!(editor.delete_active_floor(), Err(in_progress));
    assert_eq!(editor.location().floors.len(), 1);
    assert_eq!(footprint(&editor, &left), shrunk);

    editor.cancel_gesture().unwrap();
    assert_eq!(editor.active_floor().unwrap(), &floor_before);

    let objects = &editor.active_floor().unwrap().objects;
    assert!(!objects[0].footprint().overlaps(&objects[1].footprint()));

    // Edits reach the engine again once the session is idle
    assert!(editor.update_object(&right, &patch).unwrap_err().is_collision());
    editor.add_floor("Terrace").unwrap();
}
