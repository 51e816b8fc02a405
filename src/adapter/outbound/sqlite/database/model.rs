//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{bets, markets, users};

/// Database row for a user (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub credential: String,
    pub balance: String,
    pub created_at: String,
}

/// Database row for a user (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub username: String,
    pub credential: String,
    pub balance: String,
    pub created_at: String,
}

/// Database row for a market (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = markets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MarketRow {
    pub id: i32,
    pub question: String,
    pub market_type: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub target_value: Option<f64>,
    pub unit: Option<String>,
    pub status: String,
    pub resolution: Option<String>,
    pub created_at: String,
    pub resolved_at: Option<String>,
}

/// Database row for a market (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = markets)]
pub struct NewMarketRow {
    pub question: String,
    pub market_type: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub target_value: Option<f64>,
    pub unit: Option<String>,
    pub status: String,
    pub created_at: String,
}

/// Database row for a bet (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = bets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BetRow {
    pub id: i32,
    pub user_id: i32,
    pub market_id: i32,
    pub option: String,
    pub amount: String,
    pub placed_at: String,
}

/// Database row for a bet (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = bets)]
pub struct NewBetRow {
    pub user_id: i32,
    pub market_id: i32,
    pub option: String,
    pub amount: String,
    pub placed_at: String,
}
