use crate::domain::common::{AggregateId, ProductId};
use crate::shared::number_format::format_currency;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Currency label appended to option labels
pub const CURRENCY_LABEL: &str = "MMK";

/// Customer-scoped unit prices. Missing products price at 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    prices: HashMap<ProductId, f64>,
}

impl PriceTable {
    pub fn get(&self, id: &ProductId) -> Option<f64> {
        self.prices.get(id).copied()
    }

    pub fn price_of(&self, id: &ProductId) -> f64 {
        self.get(id).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl FromIterator<(ProductId, f64)> for PriceTable {
    fn from_iter<T: IntoIterator<Item = (ProductId, f64)>>(iter: T) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

/// Body of `GET {products_url}?customer_id=...`
///
/// Prices arrive either as JSON numbers or as decimal strings ("1500.00").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricesResponse {
    #[serde(default)]
    pub prices: HashMap<String, serde_json::Value>,
}

impl PricesResponse {
    /// Converts the wire map into a table, skipping entries that are not prices.
    pub fn into_price_table(self) -> PriceTable {
        self.prices
            .into_iter()
            .filter_map(|(id, value)| {
                let product_id = match ProductId::from_string(&id) {
                    Ok(pid) => pid,
                    Err(e) => {
                        log::warn!("Skipping price entry: {}", e);
                        return None;
                    }
                };
                match price_from_json(&value) {
                    Some(price) => Some((product_id, price)),
                    None => {
                        log::warn!("Skipping unparsable price for {}: {}", product_id, value);
                        None
                    }
                }
            })
            .collect()
    }
}

fn price_from_json(value: &serde_json::Value) -> Option<f64> {
    let price = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    price.is_finite().then_some(price)
}

/// Appends ` (N,NNN MMK)` to a product label, replacing a suffix added earlier.
pub fn annotate_label(label: &str, price: f64) -> String {
    format!(
        "{} ({} {})",
        strip_price_suffix(label),
        format_currency(price),
        CURRENCY_LABEL
    )
}

/// Removes a trailing ` (1,234 MMK)` if present.
fn strip_price_suffix(label: &str) -> &str {
    let suffix = format!(" {})", CURRENCY_LABEL);
    let Some(head) = label.strip_suffix(suffix.as_str()) else {
        return label;
    };
    let Some(open) = head.rfind(" (") else {
        return label;
    };
    let amount = &head[open + 2..];
    let is_amount = !amount.is_empty()
        && amount.chars().all(|c| c.is_ascii_digit() || c == ',');
    if is_amount {
        &label[..open]
    } else {
        label
    }
}
