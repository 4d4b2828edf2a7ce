//! URL helpers for calls back to the server that rendered the page

/// Appends `customer_id` to the price endpoint configured by the page.
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::price_lookup_url;
/// assert_eq!(
///     price_lookup_url("/orders/product-prices/", "12"),
///     "/orders/product-prices/?customer_id=12"
/// );
/// ```
pub fn price_lookup_url(products_url: &str, customer_id: &str) -> String {
    let separator = if products_url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}customer_id={}",
        products_url,
        separator,
        urlencoding::encode(customer_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_lookup_url() {
        assert_eq!(
            price_lookup_url("/orders/prices/", "C1"),
            "/orders/prices/?customer_id=C1"
        );
        assert_eq!(
            price_lookup_url("/orders/prices/?active=1", "C1"),
            "/orders/prices/?active=1&customer_id=C1"
        );
        assert_eq!(
            price_lookup_url("/orders/prices/", "a b"),
            "/orders/prices/?customer_id=a%20b"
        );
    }
}
