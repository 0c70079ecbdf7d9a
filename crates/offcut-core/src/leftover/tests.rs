use super::*;

fn plywood() -> Product {
    Product {
        id: "p1".to_string(),
        name: "Plywood 18mm".to_string(),
        length: 2440.0,
        width: 1220.0,
        thickness: 18.0,
        unit_cost: 0.0,
    }
}

fn sheet(id: &str, size: &str, status: SheetStatus) -> StockSheet {
    StockSheet {
        id: id.to_string(),
        product_id: "p1".to_string(),
        size: size.to_string(),
        date_received: "2024-03-01".to_string(),
        status,
        factory_id: None,
        purchase_id: Some("po-7".to_string()),
    }
}

fn item(product_id: &str, length: f64, width: f64, qty: f64) -> OrderItem {
    OrderItem {
        product_id: product_id.to_string(),
        length,
        width,
        qty,
        unit_cost: 0.0,
        sale_price: 0.0,
    }
}

fn order(order_ref: &str, items: Vec<OrderItem>) -> Order {
    Order {
        id: format!("id-{}", order_ref),
        order_ref: order_ref.to_string(),
        customer_id: None,
        items,
    }
}

#[test]
fn test_single_order_leaves_offcut() {
    let sheets = vec![sheet("s1", "2440x1220", SheetStatus::InUse)];
    let orders = vec![order("ORD-1", vec![item("p1", 600.0, 400.0, 5.0)])];
    let products = vec![plywood()];

    let pieces = calculate_leftovers(&sheets, &orders, &products);

    assert_eq!(pieces.len(), 1);
    let piece = &pieces[0];
    assert_eq!(piece.id, "leftover-s1");
    assert_eq!(piece.product_name, "Plywood 18mm");
    assert!((piece.total_area - 2.9768).abs() < 1e-9);
    assert!((piece.used_area - 1.2).abs() < 1e-9);
    assert!((piece.remaining_area - 1.7768).abs() < 1e-9);
    assert_eq!(piece.status, LeftoverStatus::Available);
    assert_eq!(piece.date_created, "2024-03-01");
    assert_eq!(piece.from_orders, vec!["ORD-1".to_string()]);
}

#[test]
fn test_remaining_dimensions_shrink_width_only() {
    let sheets = vec![sheet("s1", "2000x1000", SheetStatus::Available)];
    let orders = vec![order("ORD-1", vec![item("p1", 1000.0, 500.0, 1.0)])];
    let products = vec![plywood()];

    let pieces = calculate_leftovers(&sheets, &orders, &products);

    assert_eq!(pieces[0].remaining_length, 2000.0);
    assert!((pieces[0].remaining_width - 750.0).abs() < 1e-9);
    assert!((pieces[0].utilization_percent() - 25.0).abs() < 1e-9);
}

#[test]
fn test_used_sheet_marks_leftover_used() {
    let sheets = vec![
        sheet("s1", "2440x1220", SheetStatus::Used),
        sheet("s2", "2440x1220", SheetStatus::Leftover),
    ];
    let orders = vec![order("ORD-1", vec![item("p1", 600.0, 400.0, 5.0)])];
    let products = vec![plywood()];

    let pieces = calculate_leftovers(&sheets, &orders, &products);

    assert_eq!(pieces.len(), 2);
    assert!(pieces.iter().all(|p| p.status == LeftoverStatus::Used));
}

#[test]
fn test_untouched_sheet_has_no_leftover() {
    let sheets = vec![sheet("s1", "2440x1220", SheetStatus::Available)];
    let orders = vec![order("ORD-1", vec![item("other", 600.0, 400.0, 5.0)])];
    let products = vec![plywood()];

    assert!(calculate_leftovers(&sheets, &orders, &products).is_empty());
}

#[test]
fn test_fully_consumed_sheet_has_no_leftover() {
    let sheets = vec![sheet("s1", "1000x1000", SheetStatus::InUse)];
    let orders = vec![order("ORD-1", vec![item("p1", 1000.0, 500.0, 2.0)])];
    let products = vec![plywood()];

    assert!(calculate_leftovers(&sheets, &orders, &products).is_empty());
}

#[test]
fn test_over_consumed_sheet_has_no_leftover() {
    let sheets = vec![sheet("s1", "1000x1000", SheetStatus::InUse)];
    let orders = vec![order("ORD-1", vec![item("p1", 1000.0, 1000.0, 3.0)])];
    let products = vec![plywood()];

    assert!(calculate_leftovers(&sheets, &orders, &products).is_empty());
}

#[test]
fn test_order_refs_are_deduplicated_in_first_seen_order() {
    let sheets = vec![sheet("s1", "2440x1220", SheetStatus::InUse)];
    let orders = vec![
        order(
            "ORD-2",
            vec![item("p1", 100.0, 100.0, 1.0), item("p1", 200.0, 100.0, 2.0)],
        ),
        order("ORD-1", vec![item("p1", 100.0, 100.0, 1.0)]),
        order("ORD-3", vec![item("other", 100.0, 100.0, 1.0)]),
    ];
    let products = vec![plywood()];

    let pieces = calculate_leftovers(&sheets, &orders, &products);

    assert_eq!(
        pieces[0].from_orders,
        vec!["ORD-2".to_string(), "ORD-1".to_string()]
    );
    assert!((pieces[0].used_area - 0.06).abs() < 1e-9);
}

#[test]
fn test_missing_product_is_skipped_with_diagnostic() {
    let mut orphan = sheet("s9", "2440x1220", SheetStatus::InUse);
    orphan.product_id = "ghost".to_string();
    let sheets = vec![orphan, sheet("s1", "2440x1220", SheetStatus::InUse)];
    let orders = vec![order(
        "ORD-1",
        vec![item("p1", 600.0, 400.0, 1.0), item("ghost", 600.0, 400.0, 1.0)],
    )];
    let products = vec![plywood()];

    let report = LeftoverCalculator::new(&sheets, &orders, &products).calculate();

    assert_eq!(report.pieces.len(), 1);
    assert_eq!(report.pieces[0].sheet_id, "s1");
    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::MissingProduct {
            sheet_id: "s9".to_string(),
            product_id: "ghost".to_string(),
        }]
    );
}

#[test]
fn test_malformed_size_is_reported_not_emitted() {
    let sheets = vec![sheet("s1", "big x 1220", SheetStatus::InUse)];
    let orders = vec![order("ORD-1", vec![item("p1", 600.0, 400.0, 1.0)])];
    let products = vec![plywood()];

    let report = LeftoverCalculator::new(&sheets, &orders, &products).calculate();

    assert!(report.pieces.is_empty());
    assert!(matches!(
        report.diagnostics.as_slice(),
        [Diagnostic::MalformedSize { sheet_id, .. }] if sheet_id == "s1"
    ));
}

#[test]
fn test_wrong_token_count_is_reported() {
    let sheets = vec![
        sheet("s1", "2440", SheetStatus::InUse),
        sheet("s2", "2440x1220x18", SheetStatus::InUse),
        sheet("s3", "2440x1220", SheetStatus::InUse),
    ];
    let orders = vec![order("ORD-1", vec![item("p1", 600.0, 400.0, 1.0)])];
    let products = vec![plywood()];

    let report = LeftoverCalculator::new(&sheets, &orders, &products).calculate();

    let flagged: Vec<&str> = report
        .diagnostics
        .iter()
        .filter_map(|d| match d {
            Diagnostic::MalformedSize { sheet_id, .. } => Some(sheet_id.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(flagged, vec!["s1", "s2"]);

    // a zero-width sheet has no area; the extra token is ignored for the rest
    let ids: Vec<&str> = report.pieces.iter().map(|p| p.sheet_id.as_str()).collect();
    assert_eq!(ids, vec!["s2", "s3"]);
    assert_eq!(report.pieces[0].remaining_area, report.pieces[1].remaining_area);
}

#[test]
fn test_parse_sheet_size() {
    assert_eq!(parse_sheet_size("2440x1220"), (2440.0, 1220.0));
    assert_eq!(parse_sheet_size(" 2440 x 1220 "), (2440.0, 1220.0));
    assert_eq!(parse_sheet_size("2440"), (2440.0, 0.0));
    assert_eq!(parse_sheet_size("2440x1220x18"), (2440.0, 1220.0));

    let (length, width) = parse_sheet_size("abcx1220");
    assert!(length.is_nan());
    assert_eq!(width, 1220.0);

    let (length, _) = parse_sheet_size("");
    assert!(length.is_nan());
}

#[test]
fn test_summary_counts() {
    let sheets = vec![
        sheet("s1", "2440x1220", SheetStatus::Available),
        sheet("s2", "2440x1220", SheetStatus::Used),
        sheet("s3", "2440x1220", SheetStatus::InUse),
    ];
    let orders = vec![order("ORD-1", vec![item("p1", 600.0, 400.0, 5.0)])];
    let products = vec![plywood()];

    let report = LeftoverCalculator::new(&sheets, &orders, &products).calculate();

    assert_eq!(report.summary.total_pieces, 3);
    assert_eq!(report.summary.available_count, 2);
    assert_eq!(report.summary.used_count, 1);
    assert!((report.summary.total_remaining_area - 3.0 * 1.7768).abs() < 1e-9);
}

#[test]
fn test_empty_inventory() {
    let inventory = Inventory::default();
    let report = LeftoverCalculator::from_inventory(&inventory).calculate();

    assert!(report.pieces.is_empty());
    assert_eq!(report.summary, LeftoverSummary::default());
}
