//! Sequencing of price lookups
//!
//! Lookups are not cancelled. Each one carries a token and only the
//! response to the most recently issued token may touch the table, so the
//! last request by issue order wins whatever order responses arrive in.

use super::pricing::PriceTable;
use crate::domain::common::CustomerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// What happened to a completed lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceCompletion {
    Applied,
    /// Current request failed; the previous table stays
    Failed,
    /// Superseded by a newer request or a cleared customer
    Stale,
}

/// Price table plus the lookup bookkeeping around it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSync {
    table: PriceTable,
    issued: u64,
    loading: bool,
}

impl PriceSync {
    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Starts a lookup for `customer`.
    ///
    /// Returns `None` when no customer is selected: the loading indicator is
    /// cleared, the table is left as is and outstanding lookups become stale.
    pub fn begin(&mut self, customer: Option<&CustomerId>) -> Option<RequestToken> {
        self.issued += 1;
        match customer {
            Some(_) => {
                self.loading = true;
                Some(RequestToken(self.issued))
            }
            None => {
                self.loading = false;
                None
            }
        }
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Settles a lookup. Only the current token clears the loading flag.
    pub fn complete<E>(
        &mut self,
        token: RequestToken,
        result: Result<PriceTable, E>,
    ) -> PriceCompletion {
        if !self.is_current(token) {
            return PriceCompletion::Stale;
        }
        self.loading = false;
        match result {
            Ok(table) => {
                self.table = table;
                PriceCompletion::Applied
            }
            Err(_) => PriceCompletion::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::ProductId;

    fn table(id: &str, price: f64) -> PriceTable {
        std::iter::once((ProductId::new(id), price)).collect()
    }

    #[test]
    fn test_empty_customer_leaves_table() {
        let mut sync = PriceSync::default();
        let c1 = CustomerId::new("C1");
        let token = sync.begin(Some(&c1)).unwrap();
        assert!(sync.is_loading());
        sync.complete::<()>(token, Ok(table("P1", 1000.0)));

        assert_eq!(sync.begin(None), None);
        assert!(!sync.is_loading());
        assert_eq!(sync.table().price_of(&ProductId::new("P1")), 1000.0);
    }

    #[test]
    fn test_failure_keeps_previous_table() {
        let mut sync = PriceSync::default();
        let c1 = CustomerId::new("C1");
        let first = sync.begin(Some(&c1)).unwrap();
        sync.complete::<()>(first, Ok(table("P1", 1000.0)));

        let second = sync.begin(Some(&c1)).unwrap();
        assert_eq!(
            sync.complete(second, Err("network down")),
            PriceCompletion::Failed
        );
        assert!(!sync.is_loading());
        assert_eq!(sync.table().price_of(&ProductId::new("P1")), 1000.0);
    }

    #[test]
    fn test_out_of_order_responses() {
        let mut sync = PriceSync::default();
        let first = sync.begin(Some(&CustomerId::new("C1"))).unwrap();
        let second = sync.begin(Some(&CustomerId::new("C2"))).unwrap();

        assert_eq!(
            sync.complete::<()>(second, Ok(table("P1", 2000.0))),
            PriceCompletion::Applied
        );
        assert_eq!(
            sync.complete::<()>(first, Ok(table("P1", 1000.0))),
            PriceCompletion::Stale
        );
        assert_eq!(sync.table().price_of(&ProductId::new("P1")), 2000.0);
    }

    #[test]
    fn test_stale_completion_does_not_clear_loading() {
        let mut sync = PriceSync::default();
        let first = sync.begin(Some(&CustomerId::new("C1"))).unwrap();
        let second = sync.begin(Some(&CustomerId::new("C2"))).unwrap();

        sync.complete::<()>(first, Ok(PriceTable::default()));
        assert!(sync.is_loading());
        sync.complete::<()>(second, Ok(PriceTable::default()));
        assert!(!sync.is_loading());
    }

    #[test]
    fn test_clearing_customer_supersedes_lookup() {
        let mut sync = PriceSync::default();
        let token = sync.begin(Some(&CustomerId::new("C1"))).unwrap();
        sync.begin(None);
        assert_eq!(
            sync.complete::<()>(token, Ok(table("P1", 1000.0))),
            PriceCompletion::Stale
        );
        assert!(sync.table().is_empty());
    }
}
