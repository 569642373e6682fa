use diagramkit_core::{
    Diagnostic, EditorEvent, EventBus, EventCategory, EventFilter,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_category_filter_only_receives_matching_events() {
    let bus = EventBus::new();
    let selection_events = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&selection_events);
    bus.subscribe(
        EventFilter::Categories(vec![EventCategory::Selection]),
        move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    );

    bus.publish(EditorEvent::SelectionChanged { count: 1 });
    bus.publish(EditorEvent::DesignChanged { version: 3 });
    bus.publish(EditorEvent::Diagnostic(Diagnostic::new("tool", "no design bound")));
    bus.publish(EditorEvent::SelectionChanged { count: 0 });

    assert_eq!(selection_events.load(Ordering::SeqCst), 2);
}

#[test]
fn test_history_counts_by_category() {
    let bus = EventBus::with_history();
    bus.publish(EditorEvent::ToolChanged {
        previous: None,
        current: "selection".into(),
    });
    bus.publish(EditorEvent::Diagnostic(Diagnostic::new("sync", "missing pictogram")));
    bus.publish(EditorEvent::Diagnostic(Diagnostic::new("sync", "missing pictogram")));

    assert_eq!(bus.history_count(EventCategory::Diagnostic), 2);
    assert_eq!(bus.history_count(EventCategory::Tool), 1);
    assert_eq!(bus.history().len(), 3);

    bus.clear_history();
    assert!(bus.history().is_empty());
}
