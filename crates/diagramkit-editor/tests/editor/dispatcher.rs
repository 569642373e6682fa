use diagramkit_core::{EditorConfig, EditorEvent, EventBus, EventCategory, Point, Vector};
use diagramkit_editor::{CursorShape, Editor, InputEvent};

fn tool_events(bus: &EventBus) -> Vec<(Option<String>, String)> {
    bus.history()
        .into_iter()
        .filter_map(|event| match event {
            EditorEvent::ToolChanged { previous, current } => Some((previous, current)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_editor_starts_with_selection_tool() {
    let bus = EventBus::with_history();
    let editor = Editor::with_bus(EditorConfig::default(), bus.clone());
    assert_eq!(editor.active_tool_name(), Some("selection"));
    assert_eq!(editor.previous_tool_name(), None);
    assert_eq!(tool_events(&bus), vec![(None, "selection".to_string())]);
}

#[test]
fn test_switch_announces_previous_and_current() {
    let bus = EventBus::with_history();
    let mut editor = Editor::with_bus(EditorConfig::default(), bus.clone());

    assert!(editor.switch_tool_named("pan"));
    assert!(editor.switch_tool_named("connect"));
    assert!(!editor.switch_tool_named("lasso"));

    assert_eq!(editor.active_tool_name(), Some("connect"));
    assert_eq!(editor.previous_tool_name(), Some("pan"));
    assert_eq!(
        tool_events(&bus)[1..],
        [
            (Some("selection".to_string()), "pan".to_string()),
            (Some("pan".to_string()), "connect".to_string()),
        ]
    );
}

#[test]
fn test_pan_gesture_moves_offset() {
    let bus = EventBus::with_history();
    let mut editor = Editor::with_bus(EditorConfig::default(), bus.clone());
    let event = InputEvent::pan_gesture(Point::new(50.0, 50.0), Vector::new(12.0, -4.0));

    assert!(editor.handle_input(&event));
    assert!(editor.handle_input(&event));
    assert_eq!(editor.canvas().view().offset(), Vector::new(24.0, -8.0));
    assert_eq!(bus.history_count(EventCategory::View), 2);
}

#[test]
fn test_magnify_keeps_point_under_pointer() {
    let mut editor = Editor::new(EditorConfig::default());
    let pointer = Point::new(300.0, 200.0);
    let before = editor.canvas().to_design(pointer);

    assert!(editor.handle_input(&InputEvent::magnify(pointer, 2.0)));
    assert!((editor.canvas().zoom() - 2.0).abs() < 1e-9);
    assert!(editor.canvas().to_design(pointer).approx_eq(&before, 1e-9));

    // Repeated pinching saturates at the upper bound.
    for _ in 0..10 {
        editor.handle_input(&InputEvent::magnify(pointer, 2.0));
    }
    assert_eq!(editor.canvas().zoom(), diagramkit_core::constants::MAX_ZOOM);
}

#[test]
fn test_pan_tool_drag() {
    let mut editor = Editor::new(EditorConfig::default());
    editor.switch_tool_named("pan");
    assert_eq!(editor.canvas().cursor(), CursorShape::Grab);

    assert!(editor.handle_input(&InputEvent::press(Point::new(10.0, 10.0))));
    assert_eq!(editor.canvas().cursor(), CursorShape::Grabbing);
    assert!(editor.handle_input(&InputEvent::drag(Point::new(40.0, 20.0))));
    assert!(editor.handle_input(&InputEvent::drag(Point::new(60.0, 35.0))));
    assert_eq!(editor.canvas().view().offset(), Vector::new(50.0, 25.0));

    assert!(editor.handle_input(&InputEvent::release(Point::new(60.0, 35.0))));
    assert_eq!(editor.canvas().cursor(), CursorShape::Grab);

    // Moving without a press no longer pans.
    assert!(!editor.handle_input(&InputEvent::drag(Point::new(200.0, 200.0))));
    assert_eq!(editor.canvas().view().offset(), Vector::new(50.0, 25.0));

    editor.switch_tool_named("selection");
    assert_eq!(editor.canvas().cursor(), CursorShape::Arrow);
}

#[test]
fn test_pan_is_independent_of_zoom() {
    let mut editor = Editor::new(EditorConfig::default());
    editor.canvas_mut().set_zoom(2.5, None);
    editor.switch_tool_named("pan");
    editor.handle_input(&InputEvent::press(Point::new(0.0, 0.0)));
    editor.handle_input(&InputEvent::drag(Point::new(30.0, 0.0)));
    assert_eq!(editor.canvas().view().offset(), Vector::new(30.0, 0.0));
}
