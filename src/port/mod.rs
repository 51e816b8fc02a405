//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  lifecycle · wagering   │
//!                    │      · aggregation      │
//!                    └────────────┬────────────┘
//!                                 │ LedgerStore
//!                  ┌──────────────┴──────────────┐
//!                  ▼                             ▼
//!           ┌─────────────┐              ┌─────────────┐
//!           │   SQLite    │              │  In-memory  │
//!           │   Adapter   │              │   Adapter   │
//!           └─────────────┘              └─────────────┘
//! ```

pub mod outbound;
