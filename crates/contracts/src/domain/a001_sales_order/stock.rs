use serde::{Deserialize, Serialize};

/// Stock hint for one line
///
/// Quantity is compared with the `data-stock` of the selected option.
/// A zero quantity never shows a warning unless stock is negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    /// No product selected, or the option has no stock count
    NoStockInfo,
    /// Stock known, nothing requested yet
    NoWarning { available: i64 },
    Ok { available: i64 },
    Insufficient { available: i64 },
}

impl StockStatus {
    pub fn classify(quantity: u64, stock: Option<i64>) -> Self {
        let Some(available) = stock else {
            return StockStatus::NoStockInfo;
        };
        let requested = i128::from(quantity);
        if requested > i128::from(available) {
            StockStatus::Insufficient { available }
        } else if quantity > 0 {
            StockStatus::Ok { available }
        } else {
            StockStatus::NoWarning { available }
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, StockStatus::Insufficient { .. })
    }

    /// Bootstrap validation class for the quantity input
    pub fn input_class(&self) -> &'static str {
        match self {
            StockStatus::Insufficient { .. } => "is-invalid",
            StockStatus::Ok { .. } => "is-valid",
            _ => "",
        }
    }

    /// Text colour class for the hint
    pub fn hint_class(&self) -> &'static str {
        match self {
            StockStatus::Insufficient { .. } => "text-danger",
            StockStatus::Ok { .. } => "text-success",
            _ => "",
        }
    }

    pub fn hint_text(&self) -> String {
        match self {
            StockStatus::NoStockInfo => String::new(),
            StockStatus::NoWarning { available } | StockStatus::Ok { available } => {
                format!("Available: {}", available)
            }
            StockStatus::Insufficient { available } => {
                format!("Insufficient stock! (Available: {})", available)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            StockStatus::classify(6, Some(5)),
            StockStatus::Insufficient { available: 5 }
        );
        assert_eq!(StockStatus::classify(5, Some(5)), StockStatus::Ok { available: 5 });
        assert_eq!(
            StockStatus::classify(0, Some(5)),
            StockStatus::NoWarning { available: 5 }
        );
        assert_eq!(
            StockStatus::classify(0, Some(0)),
            StockStatus::NoWarning { available: 0 }
        );
        assert_eq!(StockStatus::classify(3, None), StockStatus::NoStockInfo);
    }

    #[test]
    fn test_negative_stock_is_always_insufficient() {
        assert!(StockStatus::classify(0, Some(-1)).is_insufficient());
    }

    #[test]
    fn test_hint_presentation() {
        let short = StockStatus::classify(6, Some(5));
        assert_eq!(short.input_class(), "is-invalid");
        assert_eq!(short.hint_class(), "text-danger");
        assert_eq!(short.hint_text(), "Insufficient stock! (Available: 5)");

        let idle = StockStatus::classify(0, Some(5));
        assert_eq!(idle.input_class(), "");
        assert_eq!(idle.hint_text(), "Available: 5");

        assert_eq!(StockStatus::NoStockInfo.hint_text(), "");
    }
}
