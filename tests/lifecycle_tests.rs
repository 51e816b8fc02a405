//! Market creation, state transitions, seeding and registration against
//! the SQLite store.

mod harness;

use harness::temp_db::TempDb;
use wagerbook::application::Ledger;
use wagerbook::domain::{DomainError, MarketId, MarketParams, MarketStatus, MarketTerms, MarketType};
use wagerbook::error::Error;

#[tokio::test]
async fn created_markets_round_trip_their_terms() {
    let db = TempDb::create("terms");
    let ledger = Ledger::new(db.store());

    let created = ledger
        .create_market(
            "  Length of TWiT on Sunday  ",
            "over_under",
            &MarketParams::over_under(3.5, "hours"),
        )
        .await
        .unwrap();
    let loaded = ledger.get_market(created.id).await.unwrap().unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.question, "Length of TWiT on Sunday");
    assert_eq!(
        loaded.terms,
        MarketTerms::OverUnder {
            target_value: 3.5,
            unit: "hours".into()
        }
    );
    assert_eq!(loaded.status, MarketStatus::Active);
}

#[tokio::test]
async fn invalid_requests_write_nothing() {
    let db = TempDb::create("invalid-create");
    let ledger = Ledger::new(db.store());

    let err = ledger
        .create_market("Q?", "multi", &MarketParams::binary("A", "B"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::InvalidMarketType { .. })
    ));

    let err = ledger
        .create_market("Q?", "binary", &MarketParams::binary("A", ""))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::InvalidMarketParameters { .. })
    ));

    let err = ledger
        .create_market("", "binary", &MarketParams::binary("A", "B"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::InvalidMarketParameters { .. })
    ));

    assert!(ledger.list_markets(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn listing_is_newest_first_and_filterable() {
    let db = TempDb::create("listing");
    let ledger = Ledger::new(db.store());

    let mut ids = Vec::new();
    for question in ["First?", "Second?", "Third?"] {
        let market = ledger
            .create_market(question, "binary", &MarketParams::binary("Yes", "No"))
            .await
            .unwrap();
        ids.push(market.id);
    }
    ledger.cancel_market(ids[1]).await.unwrap();

    let all: Vec<MarketId> = ledger
        .list_markets(None)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(all, vec![ids[2], ids[1], ids[0]]);

    let active: Vec<MarketId> = ledger
        .list_markets(Some(MarketStatus::Active))
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(active, vec![ids[2], ids[0]]);

    let cancelled = ledger
        .list_markets(Some(MarketStatus::Cancelled))
        .await
        .unwrap();
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].id, ids[1]);
}

#[tokio::test]
async fn terminal_states_are_final() {
    let db = TempDb::create("terminal");
    let ledger = Ledger::new(db.store());
    let market = ledger
        .create_market("Who wins?", "binary", &MarketParams::binary("A", "B"))
        .await
        .unwrap();

    let resolved = ledger.resolve_market(market.id, "B").await.unwrap();
    assert_eq!(resolved.status, MarketStatus::Resolved);
    assert_eq!(resolved.resolution.as_deref(), Some("B"));
    assert!(resolved.resolved_at.is_some());

    let err = ledger.cancel_market(market.id).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::InvalidTransition {
            from: MarketStatus::Resolved,
            to: MarketStatus::Cancelled
        })
    ));

    let still = ledger.get_market(market.id).await.unwrap().unwrap();
    assert_eq!(still, resolved);
}

#[tokio::test]
async fn transitions_on_missing_market_fail() {
    let db = TempDb::create("missing");
    let ledger = Ledger::new(db.store());

    let err = ledger.cancel_market(MarketId::new(77)).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::MarketNotFound { .. })
    ));
}

#[tokio::test]
async fn seeding_is_idempotent_across_restarts() {
    let db = TempDb::create("seed");

    let seeded = Ledger::new(db.store()).seed_defaults().await.unwrap();
    assert_eq!(seeded.len(), 2);
    assert_eq!(seeded[0].question, "Who will win the AI chip race?");
    assert_eq!(seeded[0].market_type(), MarketType::Binary);
    assert_eq!(seeded[1].question, "Length of TWiT on Sunday");
    assert_eq!(seeded[1].market_type(), MarketType::OverUnder);

    let again = Ledger::new(db.store());
    assert!(again.seed_defaults().await.unwrap().is_empty());
    assert_eq!(again.list_markets(None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn usernames_are_unique() {
    let db = TempDb::create("usernames");
    let ledger = Ledger::new(db.store());

    let alice = ledger.register_user("alice", "hash").await.unwrap();
    let err = ledger.register_user("alice", "other").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::UsernameTaken { .. })
    ));

    let found = ledger.find_user_by_username("alice").await.unwrap().unwrap();
    assert_eq!(found.id, alice.id);
    assert_eq!(found.credential, "hash");
}
