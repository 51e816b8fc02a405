//! Market definitions and the market lifecycle state machine.
//!
//! A market is a question with exactly two mutually exclusive options. The
//! option pair depends on the [`MarketType`]: binary markets use
//! `option_a`/`option_b`, over/under markets use `over`/`under`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::bet::BetOption;
use super::error::DomainError;
use super::id::MarketId;

/// Kind of question a market asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketType {
    /// Two arbitrary named outcomes.
    Binary,
    /// Over or under a numeric target.
    OverUnder,
}

impl MarketType {
    /// Storage token for this market type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::OverUnder => "over_under",
        }
    }

    /// The two option tokens a bet on this market type may use.
    #[must_use]
    pub const fn legal_options(self) -> [BetOption; 2] {
        match self {
            Self::Binary => [BetOption::OptionA, BetOption::OptionB],
            Self::OverUnder => [BetOption::Over, BetOption::Under],
        }
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(Self::Binary),
            "over_under" => Ok(Self::OverUnder),
            other => Err(DomainError::InvalidMarketType {
                value: other.to_string(),
            }),
        }
    }
}

/// Lifecycle state of a market.
///
/// `Active` is the only initial state. `Resolved` and `Cancelled` are
/// terminal: once a market leaves `Active` it never accepts bets again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketStatus {
    /// Accepting bets.
    #[default]
    Active,
    /// Outcome recorded.
    Resolved,
    /// Withdrawn without an outcome.
    Cancelled,
}

impl MarketStatus {
    /// Storage token for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Resolved => "resolved",
            Self::Cancelled => "cancelled",
        }
    }

    /// True for states with no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Cancelled)
    }

    /// Validate a move to `next`.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidTransition`] unless this is
    /// `Active -> Resolved` or `Active -> Cancelled`.
    pub fn transition(self, next: Self) -> Result<Self, DomainError> {
        match (self, next) {
            (Self::Active, Self::Resolved | Self::Cancelled) => Ok(next),
            (from, to) => Err(DomainError::InvalidTransition { from, to }),
        }
    }
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "resolved" => Ok(Self::Resolved),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown market status '{other}'")),
        }
    }
}

/// Type-specific fields of a market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "market_type", rename_all = "snake_case")]
pub enum MarketTerms {
    /// Binary market with two labelled outcomes.
    Binary {
        /// Label for `option_a`.
        option_a: String,
        /// Label for `option_b`.
        option_b: String,
    },
    /// Over/under market around a numeric target.
    OverUnder {
        /// Threshold the outcome is compared against.
        target_value: f64,
        /// Unit label, e.g. "hours".
        unit: String,
    },
}

impl MarketTerms {
    /// The market type these terms belong to.
    #[must_use]
    pub const fn market_type(&self) -> MarketType {
        match self {
            Self::Binary { .. } => MarketType::Binary,
            Self::OverUnder { .. } => MarketType::OverUnder,
        }
    }

    /// Human readable label for an option, e.g. "NVidia" or "Over 3.5 hours".
    #[must_use]
    pub fn label(&self, option: BetOption) -> Option<String> {
        match (self, option) {
            (Self::Binary { option_a, .. }, BetOption::OptionA) => Some(option_a.clone()),
            (Self::Binary { option_b, .. }, BetOption::OptionB) => Some(option_b.clone()),
            (Self::OverUnder { target_value, unit }, BetOption::Over) => {
                Some(format!("Over {target_value} {unit}"))
            }
            (Self::OverUnder { target_value, unit }, BetOption::Under) => {
                Some(format!("Under {target_value} {unit}"))
            }
            _ => None,
        }
    }
}

/// Raw type-specific fields as a caller submits them.
///
/// Only the fields relevant to the chosen market type are inspected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketParams {
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub target_value: Option<f64>,
    pub unit: Option<String>,
}

impl MarketParams {
    /// Parameters for a binary market.
    pub fn binary(option_a: impl Into<String>, option_b: impl Into<String>) -> Self {
        Self {
            option_a: Some(option_a.into()),
            option_b: Some(option_b.into()),
            ..Self::default()
        }
    }

    /// Parameters for an over/under market.
    pub fn over_under(target_value: f64, unit: impl Into<String>) -> Self {
        Self {
            target_value: Some(target_value),
            unit: Some(unit.into()),
            ..Self::default()
        }
    }
}

/// A validated market that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketDraft {
    question: String,
    terms: MarketTerms,
}

impl MarketDraft {
    /// Validate a market creation request.
    ///
    /// Text fields are trimmed before validation and storage.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidMarketType`] for an unknown type and
    /// [`DomainError::InvalidMarketParameters`] for an empty question or
    /// missing type-specific fields.
    pub fn try_new(
        question: &str,
        market_type: &str,
        params: &MarketParams,
    ) -> Result<Self, DomainError> {
        let market_type = MarketType::from_str(market_type.trim())?;

        let question = question.trim();
        if question.is_empty() {
            return Err(invalid_params("question is required"));
        }

        let terms = match market_type {
            MarketType::Binary => MarketTerms::Binary {
                option_a: required_text(params.option_a.as_deref(), "option_a")?,
                option_b: required_text(params.option_b.as_deref(), "option_b")?,
            },
            MarketType::OverUnder => {
                let target_value = params
                    .target_value
                    .ok_or_else(|| invalid_params("target_value is required"))?;
                if !target_value.is_finite() {
                    return Err(invalid_params("target_value must be a finite number"));
                }
                MarketTerms::OverUnder {
                    target_value,
                    unit: required_text(params.unit.as_deref(), "unit")?,
                }
            }
        };

        Ok(Self {
            question: question.to_string(),
            terms,
        })
    }

    /// The trimmed question text.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The validated type-specific fields.
    #[must_use]
    pub const fn terms(&self) -> &MarketTerms {
        &self.terms
    }
}

fn invalid_params(reason: &str) -> DomainError {
    DomainError::InvalidMarketParameters {
        reason: reason.to_string(),
    }
}

fn required_text(value: Option<&str>, field: &str) -> Result<String, DomainError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(invalid_params(&format!("{field} is required"))),
    }
}

/// A persisted market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub id: MarketId,
    pub question: String,
    pub terms: MarketTerms,
    pub status: MarketStatus,
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Market {
    /// The market's type.
    #[must_use]
    pub const fn market_type(&self) -> MarketType {
        self.terms.market_type()
    }

    /// True while the market accepts bets.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == MarketStatus::Active
    }

    /// Resolve an option token against this market's legal pair.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidOption`] if the token is not one of the
    /// two options legal for the market type.
    pub fn accepts(&self, option: &str) -> Result<BetOption, DomainError> {
        let market_type = self.market_type();
        market_type
            .legal_options()
            .into_iter()
            .find(|legal| legal.as_str() == option)
            .ok_or_else(|| DomainError::InvalidOption {
                option: option.to_string(),
                market_type,
            })
    }
}
