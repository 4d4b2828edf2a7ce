use crate::shared::api_utils::price_lookup_url;
use contracts::domain::a001_sales_order::{PriceTable, PricesResponse};
use contracts::domain::common::CustomerId;
use gloo_net::http::Request;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PriceLookupError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("HTTP error: {0}")]
    Status(u16),
    #[error("failed to parse response: {0}")]
    Decode(String),
}

/// Fetches the customer's unit prices. No retry, no timeout.
pub async fn fetch_prices(
    products_url: &str,
    customer: &CustomerId,
) -> Result<PriceTable, PriceLookupError> {
    let url = price_lookup_url(products_url, customer.as_str());

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| PriceLookupError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(PriceLookupError::Status(response.status()));
    }

    let body: PricesResponse = response
        .json()
        .await
        .map_err(|e| PriceLookupError::Decode(e.to_string()))?;

    Ok(body.into_price_table())
}
