use std::collections::HashSet;

use proptest::prelude::*;

use diagramkit_core::{EditorEvent, EntityId, EventBus, EventCategory, ObjectId};
use diagramkit_editor::Selection;

fn id(raw: u64) -> EntityId {
    EntityId::Object(ObjectId(raw))
}

fn members(selection: &Selection) -> HashSet<EntityId> {
    selection.iter().copied().collect()
}

proptest! {
    #[test]
    fn prop_double_toggle_restores_membership(
        initial in prop::collection::vec(0u64..16, 0..8),
        candidate in 0u64..16,
    ) {
        let mut selection = Selection::new(EventBus::new());
        selection.replace_all(initial.iter().copied().map(id));
        let before = members(&selection);

        selection.toggle(id(candidate));
        prop_assert_ne!(selection.contains(id(candidate)), before.contains(&id(candidate)));
        selection.toggle(id(candidate));
        prop_assert_eq!(members(&selection), before);
    }

    #[test]
    fn prop_every_call_notifies_once(ops in prop::collection::vec((0u8..4, 0u64..6), 1..20)) {
        let bus = EventBus::with_history();
        let mut selection = Selection::new(bus.clone());
        for &(op, raw) in &ops {
            match op {
                0 => selection.append(id(raw)),
                1 => selection.remove(id(raw)),
                2 => selection.toggle(id(raw)),
                _ => selection.clear(),
            }
        }
        prop_assert_eq!(bus.history_count(EventCategory::Selection), ops.len());
    }
}

#[test]
fn test_notification_carries_count() {
    let bus = EventBus::with_history();
    let mut selection = Selection::new(bus.clone());
    selection.extend([id(1), id(2), id(2)]);
    assert_eq!(
        bus.history().last(),
        Some(&EditorEvent::SelectionChanged { count: 2 })
    );
}
