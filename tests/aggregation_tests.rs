//! Sentiment and stats over a persisted ledger.

mod harness;

use harness::temp_db::TempDb;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wagerbook::application::Ledger;
use wagerbook::domain::{BetOption, MarketParams, MarketStats};

#[tokio::test]
async fn no_bets_means_even_split() {
    let db = TempDb::create("neutral");
    let ledger = Ledger::new(db.store());
    let market = ledger
        .create_market("Length of TWiT on Sunday", "over_under", &MarketParams::over_under(3.5, "hours"))
        .await
        .unwrap();

    let sentiment = ledger.sentiment(market.id).await.unwrap().unwrap();
    assert_eq!(sentiment.percent(BetOption::Over), Some(dec!(50.0)));
    assert_eq!(sentiment.percent(BetOption::Under), Some(dec!(50.0)));
    assert_eq!(sentiment.percent(BetOption::OptionA), None);

    let stats = ledger.stats(market.id, None).await.unwrap();
    assert_eq!(stats, MarketStats::default());
}

#[tokio::test]
async fn split_follows_money_not_bet_count() {
    let db = TempDb::create("split");
    let ledger = Ledger::new(db.store());
    let market = ledger
        .create_market("Who wins?", "binary", &MarketParams::binary("A", "B"))
        .await
        .unwrap();
    let alice = ledger.register_user("alice", "hash").await.unwrap();
    let bob = ledger.register_user("bob", "hash").await.unwrap();

    ledger.place_bet(alice.id, market.id, "option_a", dec!(300)).await.unwrap();
    for _ in 0..4 {
        ledger.place_bet(bob.id, market.id, "option_b", dec!(25)).await.unwrap();
    }

    let sentiment = ledger.sentiment(market.id).await.unwrap().unwrap();
    assert_eq!(sentiment.percent(BetOption::OptionA), Some(dec!(75.0)));
    assert_eq!(sentiment.percent(BetOption::OptionB), Some(dec!(25.0)));

    let stats = ledger.stats(market.id, Some(bob.id)).await.unwrap();
    assert_eq!(stats.total_volume, dec!(400));
    assert_eq!(stats.total_bets, 5);
    assert_eq!(stats.user_position, dec!(100));
}

#[tokio::test]
async fn shares_are_rounded_to_one_place() {
    let db = TempDb::create("rounding");
    let ledger = Ledger::new(db.store());
    let market = ledger
        .create_market("Who wins?", "binary", &MarketParams::binary("A", "B"))
        .await
        .unwrap();
    let alice = ledger.register_user("alice", "hash").await.unwrap();

    ledger.place_bet(alice.id, market.id, "option_a", dec!(10)).await.unwrap();
    ledger.place_bet(alice.id, market.id, "option_b", dec!(20)).await.unwrap();

    let sentiment = ledger.sentiment(market.id).await.unwrap().unwrap();
    let a = sentiment.percent(BetOption::OptionA).unwrap();
    let b = sentiment.percent(BetOption::OptionB).unwrap();
    assert_eq!(a, dec!(33.3));
    assert_eq!(b, dec!(66.7));
    assert!((a + b - dec!(100)).abs() <= dec!(0.1));
}

#[tokio::test]
async fn reads_are_idempotent() {
    let db = TempDb::create("idempotent");
    let ledger = Ledger::new(db.store());
    let market = ledger
        .create_market("Who wins?", "binary", &MarketParams::binary("A", "B"))
        .await
        .unwrap();
    let alice = ledger.register_user("alice", "hash").await.unwrap();
    ledger.place_bet(alice.id, market.id, "option_b", dec!(7.25)).await.unwrap();

    let first = ledger.overview(market.id, Some(alice.id)).await.unwrap();
    let second = ledger.overview(market.id, Some(alice.id)).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(ledger.get_balance(alice.id).await.unwrap(), dec!(992.75));
}

#[tokio::test]
async fn closed_markets_keep_their_standings() {
    let db = TempDb::create("closed-standings");
    let ledger = Ledger::new(db.store());
    let market = ledger
        .create_market("Who wins?", "binary", &MarketParams::binary("A", "B"))
        .await
        .unwrap();
    let alice = ledger.register_user("alice", "hash").await.unwrap();
    ledger.place_bet(alice.id, market.id, "option_a", dec!(60)).await.unwrap();
    ledger.resolve_market(market.id, "A").await.unwrap();

    let overview = ledger.overview(market.id, None).await.unwrap().unwrap();
    assert_eq!(overview.stats.total_volume, dec!(60));
    assert_eq!(overview.sentiment.percent(BetOption::OptionA), Some(dec!(100.0)));
    assert_eq!(overview.stats.user_position, Decimal::ZERO);

    assert!(ledger.dashboard(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn overview_serializes_for_the_web_layer() {
    let db = TempDb::create("serialize");
    let ledger = Ledger::new(db.store());
    let market = ledger
        .create_market("Who wins?", "binary", &MarketParams::binary("A", "B"))
        .await
        .unwrap();

    let overview = ledger.overview(market.id, None).await.unwrap().unwrap();
    let json = serde_json::to_value(&overview).unwrap();

    assert_eq!(json["market"]["question"], "Who wins?");
    assert_eq!(json["market"]["status"], "active");
    assert_eq!(json["market"]["terms"]["market_type"], "binary");
    assert_eq!(json["sentiment"]["shares"][0]["option"], "option_a");
    assert_eq!(json["stats"]["total_bets"], 0);
}
