use crate::domain::a001_sales_order::api;
use contracts::domain::a001_sales_order::{
    parse_discount, LineKey, OrderLines, OrderSummary, PriceCompletion, PriceSync, PriceTable,
    ProductCatalog, RequestToken, StockStatus,
};
use contracts::domain::common::{CustomerId, ProductId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::fmt::Display;

/// ViewModel for the order line editor
///
/// Lines, prices and the discount input are the only state; the summary and
/// option labels are memos over them, so they are recomputed on every change.
#[derive(Clone, Copy)]
pub struct OrderEditorViewModel {
    pub lines: RwSignal<OrderLines>,
    pub prices: RwSignal<PriceSync>,
    pub discount_input: RwSignal<String>,
    pub catalog: StoredValue<ProductCatalog>,
    products_url: StoredValue<String>,
    pub summary: Memo<OrderSummary>,
    /// `(value, label)` pairs with current prices in the labels
    pub option_labels: Memo<Vec<(String, String)>>,
}

impl OrderEditorViewModel {
    pub fn new(lines: OrderLines, catalog: ProductCatalog, products_url: String) -> Self {
        let lines = RwSignal::new(lines);
        let prices = RwSignal::new(PriceSync::default());
        let discount_input = RwSignal::new(String::new());
        let catalog = StoredValue::new(catalog);

        let summary = Memo::new(move |_| {
            let discount = parse_discount(&discount_input.get());
            prices.with(|p| lines.with(|l| l.summary(p.table(), discount)))
        });

        let option_labels =
            Memo::new(move |_| prices.with(|p| catalog.with_value(|c| c.labelled(p.table()))));

        Self {
            lines,
            prices,
            discount_input,
            catalog,
            products_url: StoredValue::new(products_url),
            summary,
            option_labels,
        }
    }

    pub fn keys(&self) -> Vec<LineKey> {
        self.lines.with(|l| l.keys())
    }

    pub fn can_remove(&self) -> bool {
        self.lines.with(|l| l.can_remove())
    }

    pub fn is_loading(&self) -> bool {
        self.prices.with(|p| p.is_loading())
    }

    pub fn product_value(&self, key: LineKey) -> String {
        self.lines.with(|l| {
            l.get(key)
                .and_then(|line| line.product_id.as_ref())
                .map(|id| id.as_str().to_string())
                .unwrap_or_default()
        })
    }

    pub fn quantity_input(&self, key: LineKey) -> String {
        self.lines.with(|l| {
            l.get(key)
                .map(|line| line.quantity_input.clone())
                .unwrap_or_default()
        })
    }

    pub fn line_total(&self, key: LineKey) -> f64 {
        self.prices.with(|p| {
            self.lines
                .with(|l| l.get(key).map(|line| line.line_total(p.table())).unwrap_or(0.0))
        })
    }

    pub fn stock_status(&self, key: LineKey) -> StockStatus {
        self.catalog.with_value(|c| {
            self.lines.with(|l| {
                l.get(key)
                    .map(|line| line.stock_status(c))
                    .unwrap_or(StockStatus::NoStockInfo)
            })
        })
    }

    /// Append an empty line
    pub fn add_line(&self) {
        self.lines.update(|l| {
            let key = l.add_line();
            log::debug!("Added order line {:?}", key);
        });
    }

    /// Remove a line; refused while it is the only one
    pub fn remove_line(&self, key: LineKey) {
        self.lines.update(|l| {
            if !l.remove_line(key) {
                log::debug!("Refused to remove order line {:?}", key);
            }
        });
    }

    pub fn set_product(&self, key: LineKey, value: String) {
        let product = ProductId::from_form_value(&value);
        self.lines.update(|l| {
            l.set_product(key, product);
        });
    }

    pub fn set_quantity(&self, key: LineKey, raw: String) {
        self.lines.update(|l| {
            l.set_quantity(key, raw);
        });
    }

    pub fn set_discount(&self, raw: String) {
        self.discount_input.set(raw);
    }

    /// Reload prices for the selected customer
    ///
    /// An empty value only clears the loading indicator. Responses to
    /// superseded lookups are dropped.
    pub fn refresh_prices_command(&self, customer_value: String) {
        let Some((token, customer)) = begin_lookup(self.prices, &customer_value) else {
            return;
        };

        let prices = self.prices;
        let products_url = self.products_url.get_value();
        spawn_local(async move {
            let result = api::fetch_prices(&products_url, &customer).await;
            settle_lookup(prices, token, &customer, result);
        });
    }
}

/// Issues a lookup token for the customer select's value.
///
/// A blank value names no customer: nothing is fetched, the loading flag is
/// cleared and lookups still in flight become stale.
fn begin_lookup(
    prices: RwSignal<PriceSync>,
    customer_value: &str,
) -> Option<(RequestToken, CustomerId)> {
    let customer = CustomerId::from_form_value(customer_value);
    let token = prices.try_update(|p| p.begin(customer.as_ref())).flatten();
    token.zip(customer)
}

/// Applies a finished lookup if it is still the latest one.
fn settle_lookup<E: Display>(
    prices: RwSignal<PriceSync>,
    token: RequestToken,
    customer: &CustomerId,
    result: Result<PriceTable, E>,
) -> Option<PriceCompletion> {
    if let Err(e) = &result {
        log::error!("Error fetching prices for customer {}: {}", customer, e);
    }
    let outcome = prices.try_update(|p| p.complete(token, result));
    match outcome {
        Some(PriceCompletion::Applied) => log::debug!("Applied prices for customer {}", customer),
        Some(PriceCompletion::Stale) => {
            log::debug!("Dropped stale prices for customer {}", customer)
        }
        Some(PriceCompletion::Failed) | None => {}
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, f64)]) -> PriceTable {
        entries
            .iter()
            .map(|(id, p)| (ProductId::new(*id), *p))
            .collect()
    }

    #[test]
    fn test_blank_customer_supersedes_lookup_in_flight() {
        let owner = Owner::new();
        owner.with(|| {
            let prices = RwSignal::new(PriceSync::default());
            let (token, customer) = begin_lookup(prices, "C1").unwrap();
            assert!(prices.with(|p| p.is_loading()));

            assert!(begin_lookup(prices, "").is_none());
            assert!(!prices.with(|p| p.is_loading()));
            assert!(begin_lookup(prices, "   ").is_none());

            let outcome =
                settle_lookup(prices, token, &customer, Ok::<_, String>(table(&[("P1", 1000.0)])));
            assert_eq!(outcome, Some(PriceCompletion::Stale));
            assert!(prices.with(|p| p.table().is_empty()));
            assert!(!prices.with(|p| p.is_loading()));
        });
    }

    #[test]
    fn test_older_response_arriving_last_is_dropped() {
        let owner = Owner::new();
        owner.with(|| {
            let prices = RwSignal::new(PriceSync::default());
            let (first, c1) = begin_lookup(prices, "C1").unwrap();
            let (second, c2) = begin_lookup(prices, "C2").unwrap();

            let applied =
                settle_lookup(prices, second, &c2, Ok::<_, String>(table(&[("P1", 500.0)])));
            assert_eq!(applied, Some(PriceCompletion::Applied));
            assert!(!prices.with(|p| p.is_loading()));

            let stale =
                settle_lookup(prices, first, &c1, Ok::<_, String>(table(&[("P1", 1000.0)])));
            assert_eq!(stale, Some(PriceCompletion::Stale));
            assert_eq!(prices.with(|p| p.table().price_of(&ProductId::new("P1"))), 500.0);
        });
    }

    #[test]
    fn test_failed_lookup_keeps_previous_table() {
        let owner = Owner::new();
        owner.with(|| {
            let prices = RwSignal::new(PriceSync::default());
            let (token, customer) = begin_lookup(prices, "C1").unwrap();
            settle_lookup(prices, token, &customer, Ok::<_, String>(table(&[("P1", 1000.0)])));

            let (token, customer) = begin_lookup(prices, "C1").unwrap();
            let outcome =
                settle_lookup(prices, token, &customer, Err::<PriceTable, _>("offline".to_string()));
            assert_eq!(outcome, Some(PriceCompletion::Failed));
            assert!(!prices.with(|p| p.is_loading()));
            assert_eq!(prices.with(|p| p.table().price_of(&ProductId::new("P1"))), 1000.0);
        });
    }
}
