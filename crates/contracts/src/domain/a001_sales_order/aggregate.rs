use super::config::InitialLine;
use super::pricing::{annotate_label, PriceTable};
use super::stock::StockStatus;
use super::summary::OrderSummary;
use crate::domain::common::ProductId;
use serde::{Deserialize, Serialize};

/// Stable key of a line within one editor, used for keyed rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineKey(pub u64);

/// One product choice offered in the line's select
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOption {
    pub id: ProductId,
    /// Display label as rendered by the server (may already carry a price suffix)
    pub label: String,
    /// Units on hand; `None` means the option carries no stock info
    #[serde(default)]
    pub stock: Option<i64>,
}

/// Product choices available to every line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCatalog {
    options: Vec<ProductOption>,
}

impl ProductCatalog {
    pub fn new(options: Vec<ProductOption>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &[ProductOption] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn find(&self, id: &ProductId) -> Option<&ProductOption> {
        self.options.iter().find(|o| &o.id == id)
    }

    pub fn stock_of(&self, id: &ProductId) -> Option<i64> {
        self.find(id).and_then(|o| o.stock)
    }

    /// `(value, label)` pairs with prices from `prices` appended to the labels.
    pub fn labelled(&self, prices: &PriceTable) -> Vec<(String, String)> {
        self.options
            .iter()
            .map(|o| {
                let label = match prices.get(&o.id) {
                    Some(price) if price != 0.0 => annotate_label(&o.label, price),
                    _ => o.label.clone(),
                };
                (o.id.as_str().to_string(), label)
            })
            .collect()
    }
}

/// Parses a quantity field the way a browser `parseInt` would.
///
/// Leading digits are taken, anything after them is ignored. Empty,
/// non-numeric and negative input all count as 0.
pub fn parse_quantity(raw: &str) -> u64 {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 || negative {
        return 0;
    }
    rest[..digits_len].parse::<u64>().unwrap_or(u64::MAX)
}

/// One product/quantity row of the order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub key: LineKey,
    pub product_id: Option<ProductId>,
    /// Raw text of the quantity input, preserved for editing
    pub quantity_input: String,
}

impl OrderLine {
    fn empty(key: LineKey) -> Self {
        Self {
            key,
            product_id: None,
            quantity_input: String::new(),
        }
    }

    pub fn quantity(&self) -> u64 {
        parse_quantity(&self.quantity_input)
    }

    pub fn unit_price(&self, prices: &PriceTable) -> f64 {
        self.product_id
            .as_ref()
            .and_then(|id| prices.get(id))
            .unwrap_or(0.0)
    }

    pub fn line_total(&self, prices: &PriceTable) -> f64 {
        self.quantity() as f64 * self.unit_price(prices)
    }

    pub fn stock_status(&self, catalog: &ProductCatalog) -> StockStatus {
        let stock = self.product_id.as_ref().and_then(|id| catalog.stock_of(id));
        StockStatus::classify(self.quantity(), stock)
    }
}

/// Ordered set of lines. Never empty.
///
/// Only built through the constructors below, all of which create at least
/// one line, so the type does not implement `Deserialize`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLines {
    lines: Vec<OrderLine>,
    next_key: u64,
}

impl Default for OrderLines {
    fn default() -> Self {
        Self::with_empty_lines(1)
    }
}

impl OrderLines {
    /// `count` empty lines; at least one is always created.
    pub fn with_empty_lines(count: usize) -> Self {
        let mut lines = Self {
            lines: Vec::new(),
            next_key: 0,
        };
        for _ in 0..count.max(1) {
            lines.add_line();
        }
        lines
    }

    /// Lines pre-populated from the page; falls back to `item_count` empty lines.
    pub fn from_initial(initial: &[InitialLine], item_count: usize) -> Self {
        if initial.is_empty() {
            return Self::with_empty_lines(item_count);
        }
        let mut lines = Self {
            lines: Vec::with_capacity(initial.len()),
            next_key: 0,
        };
        for item in initial {
            let key = lines.add_line();
            lines.set_product(key, item.product_id());
            lines.set_quantity(key, item.quantity.clone().unwrap_or_default());
        }
        lines
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false: every constructor creates a line and `remove_line` keeps one.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn keys(&self) -> Vec<LineKey> {
        self.lines.iter().map(|l| l.key).collect()
    }

    pub fn get(&self, key: LineKey) -> Option<&OrderLine> {
        self.lines.iter().find(|l| l.key == key)
    }

    fn get_mut(&mut self, key: LineKey) -> Option<&mut OrderLine> {
        self.lines.iter_mut().find(|l| l.key == key)
    }

    /// Appends an empty line and returns its key.
    pub fn add_line(&mut self) -> LineKey {
        let key = LineKey(self.next_key);
        self.next_key += 1;
        self.lines.push(OrderLine::empty(key));
        key
    }

    /// Whether the remove affordance may be shown.
    pub fn can_remove(&self) -> bool {
        self.lines.len() > 1
    }

    /// Removes the line unless it is the last one. Returns whether anything changed.
    pub fn remove_line(&mut self, key: LineKey) -> bool {
        if !self.can_remove() {
            return false;
        }
        let before = self.lines.len();
        self.lines.retain(|l| l.key != key);
        self.lines.len() != before
    }

    pub fn set_product(&mut self, key: LineKey, product_id: Option<ProductId>) -> bool {
        match self.get_mut(key) {
            Some(line) => {
                line.product_id = product_id;
                true
            }
            None => false,
        }
    }

    pub fn set_quantity(&mut self, key: LineKey, raw: impl Into<String>) -> bool {
        match self.get_mut(key) {
            Some(line) => {
                line.quantity_input = raw.into();
                true
            }
            None => false,
        }
    }

    pub fn line_totals(&self, prices: &PriceTable) -> Vec<f64> {
        self.lines.iter().map(|l| l.line_total(prices)).collect()
    }

    pub fn summary(&self, prices: &PriceTable, discount: f64) -> OrderSummary {
        OrderSummary::compute(self.lines.iter().map(|l| l.line_total(prices)), discount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices(entries: &[(&str, f64)]) -> PriceTable {
        entries
            .iter()
            .map(|(id, p)| (ProductId::new(*id), *p))
            .collect()
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity("  12"), 12);
        assert_eq!(parse_quantity("2.9"), 2);
        assert_eq!(parse_quantity("7 boxes"), 7);
        assert_eq!(parse_quantity("+4"), 4);
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("abc"), 0);
        assert_eq!(parse_quantity("-5"), 0);
    }

    #[test]
    fn test_line_total_uses_price_table() {
        let mut lines = OrderLines::default();
        let key = lines.keys()[0];
        lines.set_product(key, Some(ProductId::new("A")));
        lines.set_quantity(key, "4");

        let line = lines.get(key).unwrap();
        assert_eq!(line.line_total(&PriceTable::default()), 0.0);
        assert_eq!(line.line_total(&prices(&[("A", 250.0)])), 1000.0);
    }

    #[test]
    fn test_invalid_quantity_keeps_raw_text() {
        let mut lines = OrderLines::default();
        let key = lines.keys()[0];
        lines.set_product(key, Some(ProductId::new("A")));
        lines.set_quantity(key, "x1");

        let line = lines.get(key).unwrap();
        assert_eq!(line.quantity_input, "x1");
        assert_eq!(line.line_total(&prices(&[("A", 250.0)])), 0.0);
    }

    #[test]
    fn test_last_line_cannot_be_removed() {
        let mut lines = OrderLines::default();
        let key = lines.keys()[0];
        assert!(!lines.can_remove());
        for _ in 0..3 {
            assert!(!lines.remove_line(key));
        }
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_constructors_never_build_an_empty_editor() {
        assert!(!OrderLines::default().is_empty());
        assert!(!OrderLines::with_empty_lines(0).is_empty());
        assert!(!OrderLines::from_initial(&[], 0).is_empty());

        let mut lines = OrderLines::from_initial(&[InitialLine::new(Some("A"), Some("1"))], 0);
        for key in lines.keys() {
            lines.remove_line(key);
        }
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_remove_line() {
        let mut lines = OrderLines::default();
        let second = lines.add_line();
        assert!(lines.can_remove());
        assert!(lines.remove_line(second));
        assert_eq!(lines.len(), 1);
        assert!(!lines.remove_line(LineKey(99)));
    }

    #[test]
    fn test_keys_are_not_reused() {
        let mut lines = OrderLines::default();
        let a = lines.add_line();
        lines.remove_line(a);
        let b = lines.add_line();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut lines = OrderLines::default();
        assert!(!lines.set_quantity(LineKey(42), "1"));
        assert!(!lines.set_product(LineKey(42), None));
    }

    #[test]
    fn test_from_initial() {
        let initial = vec![
            InitialLine::new(Some("A"), Some("2")),
            InitialLine::new(None, None),
        ];
        let lines = OrderLines::from_initial(&initial, 0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.lines()[0].product_id, Some(ProductId::new("A")));
        assert_eq!(lines.lines()[0].quantity(), 2);
        assert_eq!(lines.lines()[1].product_id, None);

        assert_eq!(OrderLines::from_initial(&[], 3).len(), 3);
        assert_eq!(OrderLines::from_initial(&[], 0).len(), 1);
    }

    #[test]
    fn test_catalog_labels_follow_prices() {
        let catalog = ProductCatalog::new(vec![
            ProductOption {
                id: ProductId::new("A"),
                label: "Rice 50kg".to_string(),
                stock: Some(5),
            },
            ProductOption {
                id: ProductId::new("B"),
                label: "Oil 1L".to_string(),
                stock: None,
            },
        ]);

        let labels = catalog.labelled(&prices(&[("A", 45000.0)]));
        assert_eq!(labels[0], ("A".to_string(), "Rice 50kg (45,000 MMK)".to_string()));
        assert_eq!(labels[1], ("B".to_string(), "Oil 1L".to_string()));
        assert_eq!(catalog.stock_of(&ProductId::new("A")), Some(5));
        assert_eq!(catalog.stock_of(&ProductId::new("B")), None);
    }
}
