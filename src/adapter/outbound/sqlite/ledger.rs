//! SQLite ledger store implementation.
//!
//! Provides persistent storage for users, markets and bets using SQLite and
//! Diesel ORM. Bet placement runs inside a `BEGIN IMMEDIATE` transaction:
//! SQLite grants the database write lock before the balance is read, so
//! concurrent placements serialize instead of racing on the same balance.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    BetRow, MarketRow, NewBetRow, NewMarketRow, NewUserRow, UserRow,
};
use crate::adapter::outbound::sqlite::database::schema::{bets, markets, users};
use crate::domain::wager::authorize;
use crate::domain::{
    Bet, BetId, BetOption, DomainError, Market, MarketDraft, MarketId, MarketStatus, MarketTerms,
    MarketType, NewUser, User, UserId, Wager,
};
use crate::error::{Error, Result};
use crate::port::outbound::ledger::LedgerStore;

/// SQLite-backed ledger store.
///
/// Implements the [`LedgerStore`] trait. Diesel calls are blocking, so each
/// operation checks out a pooled connection on tokio's blocking thread pool.
#[derive(Clone)]
pub struct SqliteLedger {
    /// Database connection pool.
    pool: DbPool,
}

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    #[diesel(column_name = "id")]
    id: i32,
}

fn last_insert_rowid(conn: &mut SqliteConnection) -> QueryResult<i32> {
    diesel::sql_query("SELECT last_insert_rowid() AS id")
        .get_result::<LastInsertRowId>(conn)
        .map(|row| row.id)
}

/// Fixed-width RFC 3339 so stored timestamps sort lexicographically.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("timestamp '{value}': {e}")))
}

fn parse_amount(value: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| Error::Parse(format!("amount '{value}': {e}")))
}

impl SqliteLedger {
    /// Create a new SQLite ledger with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Run a blocking Diesel operation on a pooled connection.
    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
            op(&mut conn)
        })
        .await
        .map_err(|e| Error::Storage(format!("blocking task failed: {e}")))?
    }

    fn user_from_row(row: UserRow) -> Result<User> {
        Ok(User {
            id: UserId::new(row.id),
            username: row.username,
            credential: row.credential,
            balance: parse_amount(&row.balance)?,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }

    fn market_to_row(draft: &MarketDraft, created_at: DateTime<Utc>) -> NewMarketRow {
        let mut row = NewMarketRow {
            question: draft.question().to_string(),
            market_type: draft.terms().market_type().as_str().to_string(),
            option_a: None,
            option_b: None,
            target_value: None,
            unit: None,
            status: MarketStatus::Active.as_str().to_string(),
            created_at: timestamp(created_at),
        };
        match draft.terms() {
            MarketTerms::Binary { option_a, option_b } => {
                row.option_a = Some(option_a.clone());
                row.option_b = Some(option_b.clone());
            }
            MarketTerms::OverUnder { target_value, unit } => {
                row.target_value = Some(*target_value);
                row.unit = Some(unit.clone());
            }
        }
        row
    }

    fn market_from_row(row: MarketRow) -> Result<Market> {
        let market_type = MarketType::from_str(&row.market_type)
            .map_err(|e| Error::Parse(format!("market {}: {e}", row.id)))?;
        let missing = |field: &str| Error::Parse(format!("market {}: missing {field}", row.id));

        let terms = match market_type {
            MarketType::Binary => MarketTerms::Binary {
                option_a: row.option_a.clone().ok_or_else(|| missing("option_a"))?,
                option_b: row.option_b.clone().ok_or_else(|| missing("option_b"))?,
            },
            MarketType::OverUnder => MarketTerms::OverUnder {
                target_value: row.target_value.ok_or_else(|| missing("target_value"))?,
                unit: row.unit.clone().ok_or_else(|| missing("unit"))?,
            },
        };

        Ok(Market {
            id: MarketId::new(row.id),
            question: row.question,
            terms,
            status: MarketStatus::from_str(&row.status).map_err(Error::Parse)?,
            resolution: row.resolution,
            created_at: parse_timestamp(&row.created_at)?,
            resolved_at: row.resolved_at.as_deref().map(parse_timestamp).transpose()?,
        })
    }

    fn bet_from_row(row: BetRow) -> Result<Bet> {
        Ok(Bet {
            id: BetId::new(row.id),
            user_id: UserId::new(row.user_id),
            market_id: MarketId::new(row.market_id),
            option: BetOption::from_str(&row.option).map_err(Error::Parse)?,
            amount: parse_amount(&row.amount)?,
            placed_at: parse_timestamp(&row.placed_at)?,
        })
    }

    fn load_market(conn: &mut SqliteConnection, id: MarketId) -> Result<Option<Market>> {
        markets::table
            .find(id.get())
            .select(MarketRow::as_select())
            .first(conn)
            .optional()?
            .map(Self::market_from_row)
            .transpose()
    }

    fn load_user(conn: &mut SqliteConnection, id: UserId) -> Result<Option<User>> {
        users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(conn)
            .optional()?
            .map(Self::user_from_row)
            .transpose()
    }
}

impl LedgerStore for SqliteLedger {
    async fn insert_user(&self, user: &NewUser) -> Result<User> {
        let row = NewUserRow {
            username: user.username().to_string(),
            credential: user.credential().to_string(),
            balance: user.balance().to_string(),
            created_at: timestamp(Utc::now()),
        };

        self.run(move |conn| {
            conn.immediate_transaction(|conn| {
                let inserted = diesel::insert_into(users::table).values(&row).execute(conn);
                match inserted {
                    Err(diesel::result::Error::DatabaseError(
                        DatabaseErrorKind::UniqueViolation,
                        _,
                    )) => {
                        return Err(DomainError::UsernameTaken {
                            username: row.username.clone(),
                        }
                        .into());
                    }
                    other => {
                        other?;
                    }
                }
                let id = last_insert_rowid(conn)?;
                Self::load_user(conn, UserId::new(id))?
                    .ok_or_else(|| Error::Storage(format!("user {id} vanished after insert")))
            })
        })
        .await
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        self.run(move |conn| Self::load_user(conn, id)).await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let username = username.to_string();
        self.run(move |conn| {
            users::table
                .filter(users::username.eq(&username))
                .select(UserRow::as_select())
                .first(conn)
                .optional()?
                .map(Self::user_from_row)
                .transpose()
        })
        .await
    }

    async fn insert_market(&self, draft: &MarketDraft) -> Result<Market> {
        let row = Self::market_to_row(draft, Utc::now());

        self.run(move |conn| {
            conn.immediate_transaction(|conn| {
                diesel::insert_into(markets::table)
                    .values(&row)
                    .execute(conn)?;
                let id = last_insert_rowid(conn)?;
                Self::load_market(conn, MarketId::new(id))?
                    .ok_or_else(|| Error::Storage(format!("market {id} vanished after insert")))
            })
        })
        .await
    }

    async fn find_market(&self, id: MarketId) -> Result<Option<Market>> {
        self.run(move |conn| Self::load_market(conn, id)).await
    }

    async fn list_markets(&self, status: Option<MarketStatus>) -> Result<Vec<Market>> {
        self.run(move |conn| {
            let mut query = markets::table
                .select(MarketRow::as_select())
                .order((markets::created_at.desc(), markets::id.desc()))
                .into_boxed();
            if let Some(status) = status {
                query = query.filter(markets::status.eq(status.as_str()));
            }
            let rows: Vec<MarketRow> = query.load(conn)?;
            rows.into_iter().map(Self::market_from_row).collect()
        })
        .await
    }

    async fn count_markets(&self) -> Result<u64> {
        self.run(|conn| {
            let count: i64 = markets::table.count().get_result(conn)?;
            Ok(u64::try_from(count).unwrap_or_default())
        })
        .await
    }

    async fn transition_market(
        &self,
        id: MarketId,
        to: MarketStatus,
        resolution: Option<String>,
    ) -> Result<Market> {
        self.run(move |conn| {
            conn.immediate_transaction(|conn| {
                let market = Self::load_market(conn, id)?
                    .ok_or(DomainError::MarketNotFound { market_id: id })?;
                let next = market.status.transition(to)?;

                diesel::update(markets::table.find(id.get()))
                    .set((
                        markets::status.eq(next.as_str()),
                        markets::resolution.eq(resolution.as_deref()),
                        markets::resolved_at.eq(Some(timestamp(Utc::now()))),
                    ))
                    .execute(conn)?;

                Self::load_market(conn, id)?
                    .ok_or_else(|| Error::Storage(format!("market {id} vanished after update")))
            })
        })
        .await
    }

    async fn market_bets(&self, id: MarketId) -> Result<Vec<Bet>> {
        self.run(move |conn| {
            let rows: Vec<BetRow> = bets::table
                .filter(bets::market_id.eq(id.get()))
                .select(BetRow::as_select())
                .order(bets::id.asc())
                .load(conn)?;
            rows.into_iter().map(Self::bet_from_row).collect()
        })
        .await
    }

    async fn place_bet(&self, wager: &Wager) -> Result<Bet> {
        let wager = wager.clone();

        let result = self
            .run(move |conn| {
                conn.immediate_transaction(|conn| {
                    let market = Self::load_market(conn, wager.market_id)?;
                    let user = Self::load_user(conn, wager.user_id)?;
                    let auth = authorize(&wager, market.as_ref(), user.as_ref())?;

                    let placed_at = Utc::now().trunc_subsecs(6);
                    let row = NewBetRow {
                        user_id: wager.user_id.get(),
                        market_id: wager.market_id.get(),
                        option: auth.option.as_str().to_string(),
                        amount: auth.amount.to_string(),
                        placed_at: timestamp(placed_at),
                    };
                    diesel::insert_into(bets::table).values(&row).execute(conn)?;
                    let id = last_insert_rowid(conn)?;

                    diesel::update(users::table.find(wager.user_id.get()))
                        .set(users::balance.eq(auth.balance_after.to_string()))
                        .execute(conn)?;

                    Ok(Bet {
                        id: BetId::new(id),
                        user_id: wager.user_id,
                        market_id: wager.market_id,
                        option: auth.option,
                        amount: auth.amount,
                        placed_at,
                    })
                })
            })
            .await;

        match &result {
            Ok(bet) => debug!(bet_id = %bet.id, "Bet transaction committed"),
            Err(e) if e.is_storage_failure() => warn!(error = %e, "Bet transaction rolled back"),
            Err(_) => {}
        }
        result
    }
}
