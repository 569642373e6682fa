use diagramkit_core::{
    Attributes, DesignController, DesignError, MemoryDesign, Point, Vector,
};

fn node(design: &mut MemoryDesign, type_name: &str, name: &str, at: Point) -> diagramkit_core::ObjectId {
    let mut tx = design.new_transaction();
    let id = tx
        .create_node_at(type_name, Some(name.to_string()), at)
        .unwrap();
    assert!(design.accept(tx).unwrap().committed);
    id
}

#[test]
fn test_remove_cascading_commit_removes_edges() {
    let mut design = MemoryDesign::stock_flow();
    let stock = node(&mut design, "Stock", "population", Point::new(0.0, 0.0));
    let flow = node(&mut design, "Flow", "births", Point::new(100.0, 0.0));

    let mut tx = design.new_transaction();
    let edge = tx.create_edge("Flow", flow, stock).unwrap();
    design.accept(tx).unwrap();
    assert_eq!(design.dependent_edges(stock), vec![edge]);

    let mut tx = design.new_transaction();
    let removed = tx.remove_cascading(flow).unwrap();
    assert_eq!(removed, vec![flow, edge]);
    design.accept(tx).unwrap();

    let snapshot = design.snapshot();
    assert!(snapshot.contains(stock));
    assert!(!snapshot.contains(edge));
    assert!(design.dependent_edges(stock).is_empty());
}

#[test]
fn test_mutate_then_undo_restores_position() {
    let mut design = MemoryDesign::stock_flow();
    let stock = node(&mut design, "Stock", "s", Point::new(10.0, 10.0));

    let mut tx = design.new_transaction();
    tx.mutate(stock).unwrap().translate(Vector::new(5.0, -2.5));
    design.accept(tx).unwrap();
    assert_eq!(
        design.snapshot().get(stock).and_then(|o| o.position),
        Some(Point::new(15.0, 7.5))
    );

    assert!(design.undo());
    assert_eq!(
        design.snapshot().get(stock).and_then(|o| o.position),
        Some(Point::new(10.0, 10.0))
    );
    assert!(design.can_redo());
}

#[test]
fn test_unknown_object_across_boundary() {
    let design = MemoryDesign::stock_flow();
    let mut tx = design.new_transaction();
    let missing = diagramkit_core::ObjectId(42);
    assert_eq!(
        tx.mutate(missing).unwrap_err(),
        DesignError::UnknownObject { id: missing }
    );
    assert!(matches!(
        tx.remove_cascading(missing),
        Err(DesignError::UnknownObject { .. })
    ));
}

#[test]
fn test_empty_transaction_keeps_version() {
    let mut design = MemoryDesign::stock_flow();
    node(&mut design, "Cloud", "c", Point::ZERO);
    let version = design.version();
    let tx = design.new_transaction();
    let outcome = design.accept(tx).unwrap();
    assert!(outcome.committed);
    assert_eq!(outcome.version, version);
    assert!(design.can_undo());
}

#[test]
fn test_attributes_are_kept() {
    let mut design = MemoryDesign::stock_flow();
    let mut attributes = Attributes::new();
    attributes.insert("value".into(), serde_json::json!(12.5));
    attributes.insert("color".into(), serde_json::json!("red"));
    let mut tx = design.new_transaction();
    let id = tx
        .create_node("Stock", Some("s".into()), attributes)
        .unwrap();
    design.accept(tx).unwrap();

    let object = design.snapshot().get(id).unwrap();
    assert_eq!(object.numeric_value(), Some(12.5));
    assert_eq!(object.color(), Some("red"));
}
