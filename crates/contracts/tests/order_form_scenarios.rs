use contracts::domain::a001_sales_order::{
    OrderLines, PriceCompletion, PriceSync, PriceTable, PricesResponse, ProductCatalog,
    ProductOption, StockStatus,
};
use contracts::domain::common::{CustomerId, ProductId};

fn product(id: &str, label: &str, stock: Option<i64>) -> ProductOption {
    ProductOption {
        id: ProductId::new(id),
        label: label.to_string(),
        stock,
    }
}

fn table(entries: &[(&str, f64)]) -> PriceTable {
    entries
        .iter()
        .map(|(id, price)| (ProductId::new(*id), *price))
        .collect()
}

#[test]
fn three_lines_with_discount() {
    let mut lines = OrderLines::default();
    lines.add_line();
    lines.add_line();
    assert_eq!(lines.len(), 3);

    let prices = table(&[("A", 1000.0), ("B", 500.0), ("C", 200.0)]);
    for (key, (pid, qty)) in lines.keys().into_iter().zip([("A", "2"), ("B", "3"), ("C", "1")]) {
        lines.set_product(key, Some(ProductId::new(pid)));
        lines.set_quantity(key, qty);
    }

    assert_eq!(lines.line_totals(&prices), vec![2000.0, 1500.0, 200.0]);
    let summary = lines.summary(&prices, 0.0);
    assert_eq!(summary.subtotal, 3700.0);
    assert_eq!(summary.grand_total, 3700.0);

    let summary = lines.summary(&prices, 700.0);
    assert_eq!(summary.grand_total, 3000.0);
}

#[test]
fn line_total_before_and_after_price_lookup() {
    let mut lines = OrderLines::default();
    let key = lines.keys()[0];
    lines.set_product(key, Some(ProductId::new("P1")));
    lines.set_quantity(key, "3");

    let mut sync = PriceSync::default();
    let token = sync
        .begin(Some(&CustomerId::new("C1")))
        .expect("customer selected");
    assert_eq!(lines.get(key).unwrap().line_total(sync.table()), 0.0);

    let response: PricesResponse = serde_json::from_str(r#"{"prices":{"P1":1000}}"#).unwrap();
    let outcome = sync.complete::<()>(token, Ok(response.into_price_table()));

    assert_eq!(outcome, PriceCompletion::Applied);
    assert_eq!(lines.get(key).unwrap().line_total(sync.table()), 3000.0);
}

#[test]
fn refresh_preserves_selection_and_relabels() {
    let catalog = ProductCatalog::new(vec![
        product("P1", "Rice (900 MMK)", Some(10)),
        product("P2", "Oil", None),
    ]);
    let mut lines = OrderLines::default();
    let key = lines.keys()[0];
    lines.set_product(key, Some(ProductId::new("P2")));

    let mut sync = PriceSync::default();
    let token = sync.begin(Some(&CustomerId::new("C1"))).unwrap();
    sync.complete::<()>(token, Ok(table(&[("P1", 1000.0), ("P2", 2500.0)])));

    assert_eq!(lines.get(key).unwrap().product_id, Some(ProductId::new("P2")));
    assert_eq!(lines.get(key).unwrap().unit_price(sync.table()), 2500.0);
    let labels: Vec<String> = catalog
        .labelled(sync.table())
        .into_iter()
        .map(|(_, label)| label)
        .collect();
    assert_eq!(labels, ["Rice (1,000 MMK)", "Oil (2,500 MMK)"]);
}

#[test]
fn stock_hint_follows_quantity() {
    let catalog = ProductCatalog::new(vec![product("A", "Rice", Some(5))]);
    let mut lines = OrderLines::default();
    let key = lines.keys()[0];
    lines.set_product(key, Some(ProductId::new("A")));

    let status = |lines: &OrderLines| lines.get(key).unwrap().stock_status(&catalog);

    assert_eq!(status(&lines), StockStatus::NoWarning { available: 5 });
    lines.set_quantity(key, "5");
    assert_eq!(status(&lines), StockStatus::Ok { available: 5 });
    lines.set_quantity(key, "6");
    assert_eq!(status(&lines), StockStatus::Insufficient { available: 5 });
    lines.set_product(key, None);
    assert_eq!(status(&lines), StockStatus::NoStockInfo);
}

#[test]
fn remove_never_empties_the_editor() {
    let mut lines = OrderLines::default();
    let extra = lines.add_line();
    let first = lines.keys()[0];

    assert!(lines.remove_line(first));
    assert!(!lines.remove_line(extra));
    assert!(!lines.remove_line(extra));
    assert_eq!(lines.keys(), vec![extra]);
}
