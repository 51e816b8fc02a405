//! Market aggregation service.
//!
//! Sentiment and stats are recomputed from the bet rows on every call;
//! nothing is cached between calls, so figures can never drift from the
//! ledger.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::domain::{Market, MarketId, MarketStats, MarketStatus, Sentiment, UserId};
use crate::error::{Error, Result};
use crate::port::outbound::ledger::LedgerStore;

/// A market together with its current standings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketOverview {
    pub market: Market,
    pub sentiment: Sentiment,
    pub stats: MarketStats,
}

/// Read-only aggregation over the bet ledger.
pub struct MarketAggregator<S> {
    store: Arc<S>,
}

impl<S> Clone for MarketAggregator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LedgerStore> MarketAggregator<S> {
    /// Create an aggregator over the given store.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Percentage split of the market's stake across its two options.
    ///
    /// Returns `None` for an unknown market.
    ///
    /// # Errors
    /// Returns a storage error if the ledger cannot be read or the totals
    /// overflow.
    pub async fn sentiment(&self, market_id: MarketId) -> Result<Option<Sentiment>> {
        let Some(market) = self.store.find_market(market_id).await? else {
            return Ok(None);
        };
        let bets = self.store.market_bets(market_id).await?;
        Sentiment::from_bets(market.market_type(), &bets)
            .map(Some)
            .ok_or_else(|| overflow(market_id))
    }

    /// Volume, bet count and the viewer's position for a market.
    ///
    /// An unknown market, or an anonymous viewer, yields zeros.
    ///
    /// # Errors
    /// Returns a storage error if the ledger cannot be read or the totals
    /// overflow.
    pub async fn stats(&self, market_id: MarketId, viewer: Option<UserId>) -> Result<MarketStats> {
        let bets = self.store.market_bets(market_id).await?;
        MarketStats::from_bets(&bets, viewer).ok_or_else(|| overflow(market_id))
    }

    /// Market, sentiment and stats from a single read of the bet rows.
    ///
    /// # Errors
    /// Returns a storage error if the ledger cannot be read.
    pub async fn overview(
        &self,
        market_id: MarketId,
        viewer: Option<UserId>,
    ) -> Result<Option<MarketOverview>> {
        let Some(market) = self.store.find_market(market_id).await? else {
            return Ok(None);
        };
        self.enrich(market, viewer).await.map(Some)
    }

    /// Overviews of every active market, newest first.
    ///
    /// # Errors
    /// Returns a storage error if the ledger cannot be read.
    pub async fn dashboard(&self, viewer: Option<UserId>) -> Result<Vec<MarketOverview>> {
        let markets = self.store.list_markets(Some(MarketStatus::Active)).await?;
        let mut overviews = Vec::with_capacity(markets.len());
        for market in markets {
            overviews.push(self.enrich(market, viewer).await?);
        }
        Ok(overviews)
    }

    async fn enrich(&self, market: Market, viewer: Option<UserId>) -> Result<MarketOverview> {
        let bets = self.store.market_bets(market.id).await?;
        let sentiment =
            Sentiment::from_bets(market.market_type(), &bets).ok_or_else(|| overflow(market.id))?;
        let stats = MarketStats::from_bets(&bets, viewer).ok_or_else(|| overflow(market.id))?;
        Ok(MarketOverview {
            market,
            sentiment,
            stats,
        })
    }
}

fn overflow(market_id: MarketId) -> Error {
    warn!(market_id = %market_id, "Bet totals overflow");
    Error::Storage(format!("market {market_id}: bet totals overflow"))
}
