use super::aggregate::{OrderLines, ProductCatalog, ProductOption};
use crate::domain::common::ProductId;
use serde::{Deserialize, Deserializer, Serialize};

/// Page configuration published by the server template as `window.orderFormConfig`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderFormConfig {
    /// Number of lines the page starts with when no `initial_lines` are given
    pub item_count: usize,
    /// Price endpoint; `customer_id` is appended as a query parameter
    pub products_url: String,
    /// Submitted orders are read-only
    pub is_locked: bool,
    pub qty_placeholder: String,
    /// Product choices; when empty they are read from the page markup
    pub products: Vec<ProductOption>,
    pub initial_lines: Vec<InitialLine>,
}

impl Default for OrderFormConfig {
    fn default() -> Self {
        Self {
            item_count: 0,
            products_url: String::new(),
            is_locked: false,
            qty_placeholder: "Qty".to_string(),
            products: Vec::new(),
            initial_lines: Vec::new(),
        }
    }
}

impl OrderFormConfig {
    pub fn initial_order_lines(&self) -> OrderLines {
        OrderLines::from_initial(&self.initial_lines, self.item_count)
    }

    pub fn catalog(&self) -> ProductCatalog {
        ProductCatalog::new(self.products.clone())
    }

    pub fn has_price_endpoint(&self) -> bool {
        !self.products_url.trim().is_empty()
    }
}

/// A line rendered by the server on the edit page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitialLine {
    #[serde(deserialize_with = "string_or_number")]
    pub product_id: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub quantity: Option<String>,
}

impl InitialLine {
    pub fn new(product_id: Option<&str>, quantity: Option<&str>) -> Self {
        Self {
            product_id: product_id.map(str::to_string),
            quantity: quantity.map(str::to_string),
        }
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.product_id.as_deref().and_then(ProductId::from_form_value)
    }
}

/// Django templates emit primary keys and quantities either quoted or bare.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let config: OrderFormConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, OrderFormConfig::default());
        assert_eq!(config.qty_placeholder, "Qty");
        assert!(!config.has_price_endpoint());
        assert_eq!(config.initial_order_lines().len(), 1);
    }

    #[test]
    fn test_camel_case_fields() {
        let body = r#"{
            "itemCount": 2,
            "productsUrl": "/orders/product-prices/",
            "isLocked": true,
            "qtyPlaceholder": "Quantity",
            "products": [{"id": "7", "label": "Rice", "stock": 12}],
            "initialLines": [{"productId": 7, "quantity": 3}]
        }"#;
        let config: OrderFormConfig = serde_json::from_str(body).unwrap();

        assert_eq!(config.item_count, 2);
        assert!(config.is_locked);
        assert!(config.has_price_endpoint());
        assert_eq!(config.catalog().stock_of(&ProductId::new("7")), Some(12));

        let lines = config.initial_order_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.lines()[0].product_id, Some(ProductId::new("7")));
        assert_eq!(lines.lines()[0].quantity(), 3);
    }
}
