//! Market lifecycle service.
//!
//! Creates markets and drives them through the active → resolved/cancelled
//! state machine. Resolution only records the outcome; no balances move.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{DomainError, Market, MarketDraft, MarketId, MarketParams, MarketStatus};
use crate::error::Result;
use crate::port::outbound::ledger::LedgerStore;

/// Creates markets and manages their status.
pub struct MarketLifecycle<S> {
    store: Arc<S>,
}

impl<S> Clone for MarketLifecycle<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LedgerStore> MarketLifecycle<S> {
    /// Create a lifecycle service over the given store.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate and persist a new market in the `active` state.
    ///
    /// # Errors
    /// Returns `InvalidMarketType` or `InvalidMarketParameters` for a bad
    /// request, or a storage error if the insert fails.
    pub async fn create(
        &self,
        question: &str,
        market_type: &str,
        params: &MarketParams,
    ) -> Result<Market> {
        let draft = match MarketDraft::try_new(question, market_type, params) {
            Ok(draft) => draft,
            Err(e) => {
                debug!(error = %e, market_type, "Market rejected");
                return Err(e.into());
            }
        };

        let market = self.store.insert_market(&draft).await?;
        info!(
            market_id = %market.id,
            market_type = %market.market_type(),
            question = %market.question,
            "Market created"
        );
        Ok(market)
    }

    /// Look up a market.
    ///
    /// # Errors
    /// Returns a storage error if the lookup fails.
    pub async fn get(&self, id: MarketId) -> Result<Option<Market>> {
        self.store.find_market(id).await
    }

    /// List markets newest first, optionally filtered by status.
    ///
    /// # Errors
    /// Returns a storage error if the query fails.
    pub async fn list(&self, status: Option<MarketStatus>) -> Result<Vec<Market>> {
        self.store.list_markets(status).await
    }

    /// Record an outcome and close the market to new bets.
    ///
    /// # Errors
    /// Returns `InvalidMarketParameters` for an empty resolution,
    /// `MarketNotFound`, or `InvalidTransition` if the market is already closed.
    pub async fn resolve(&self, id: MarketId, resolution: &str) -> Result<Market> {
        let resolution = resolution.trim();
        if resolution.is_empty() {
            return Err(DomainError::InvalidMarketParameters {
                reason: "resolution is required".into(),
            }
            .into());
        }

        let market = self
            .store
            .transition_market(id, MarketStatus::Resolved, Some(resolution.to_string()))
            .await?;
        info!(market_id = %id, resolution, "Market resolved");
        Ok(market)
    }

    /// Withdraw the market without an outcome.
    ///
    /// # Errors
    /// Returns `MarketNotFound`, or `InvalidTransition` if the market is
    /// already closed.
    pub async fn cancel(&self, id: MarketId) -> Result<Market> {
        let market = self
            .store
            .transition_market(id, MarketStatus::Cancelled, None)
            .await?;
        info!(market_id = %id, "Market cancelled");
        Ok(market)
    }

    /// Insert the two starter markets when the ledger has none.
    ///
    /// Returns the markets created, empty if the ledger was already seeded.
    ///
    /// # Errors
    /// Returns a storage error if counting or inserting fails.
    pub async fn seed_defaults(&self) -> Result<Vec<Market>> {
        if self.store.count_markets().await? > 0 {
            debug!("Markets present, skipping seed");
            return Ok(Vec::new());
        }

        let drafts = [
            MarketDraft::try_new(
                "Who will win the AI chip race?",
                "binary",
                &MarketParams::binary("NVidia", "Google"),
            )?,
            MarketDraft::try_new(
                "Length of TWiT on Sunday",
                "over_under",
                &MarketParams::over_under(3.5, "hours"),
            )?,
        ];

        let mut seeded = Vec::with_capacity(drafts.len());
        for draft in &drafts {
            seeded.push(self.store.insert_market(draft).await?);
        }
        info!(count = seeded.len(), "Seeded default markets");
        Ok(seeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryLedger;
    use crate::domain::{MarketTerms, MarketType};
    use crate::error::Error;

    fn lifecycle() -> MarketLifecycle<MemoryLedger> {
        MarketLifecycle::new(Arc::new(MemoryLedger::new()))
    }

    #[tokio::test]
    async fn create_persists_active_market() {
        let lifecycle = lifecycle();
        let market = lifecycle
            .create("Who wins?", "binary", &MarketParams::binary("A", "B"))
            .await
            .unwrap();

        assert_eq!(market.status, MarketStatus::Active);
        assert!(market.resolution.is_none());
        assert!(market.resolved_at.is_none());
        assert_eq!(lifecycle.get(market.id).await.unwrap(), Some(market));
    }

    #[tokio::test]
    async fn create_rejects_unknown_type_without_writing() {
        let lifecycle = lifecycle();
        let err = lifecycle
            .create("Who wins?", "ternary", &MarketParams::binary("A", "B"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Domain(DomainError::InvalidMarketType { .. })
        ));
        assert!(lifecycle.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() {
        let lifecycle = lifecycle();
        let err = lifecycle
            .create("How long?", "over_under", &MarketParams::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Domain(DomainError::InvalidMarketParameters { .. })
        ));
    }

    #[tokio::test]
    async fn resolve_requires_text() {
        let lifecycle = lifecycle();
        let market = lifecycle
            .create("Who wins?", "binary", &MarketParams::binary("A", "B"))
            .await
            .unwrap();

        assert!(lifecycle.resolve(market.id, "  ").await.is_err());

        let resolved = lifecycle.resolve(market.id, "A").await.unwrap();
        assert_eq!(resolved.status, MarketStatus::Resolved);
        assert_eq!(resolved.resolution.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn cancel_is_terminal() {
        let lifecycle = lifecycle();
        let market = lifecycle
            .create("Who wins?", "binary", &MarketParams::binary("A", "B"))
            .await
            .unwrap();

        let cancelled = lifecycle.cancel(market.id).await.unwrap();
        assert_eq!(cancelled.status, MarketStatus::Cancelled);
        assert!(cancelled.resolved_at.is_some());

        let err = lifecycle.resolve(market.id, "A").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::InvalidTransition {
                from: MarketStatus::Cancelled,
                to: MarketStatus::Resolved
            })
        ));
    }

    #[tokio::test]
    async fn seed_defaults_runs_once() {
        let lifecycle = lifecycle();

        let seeded = lifecycle.seed_defaults().await.unwrap();
        assert_eq!(seeded.len(), 2);
        assert_eq!(
            seeded[0].terms,
            MarketTerms::Binary {
                option_a: "NVidia".into(),
                option_b: "Google".into()
            }
        );
        assert_eq!(seeded[1].market_type(), MarketType::OverUnder);

        assert!(lifecycle.seed_defaults().await.unwrap().is_empty());
        assert_eq!(lifecycle.list(None).await.unwrap().len(), 2);
    }
}
