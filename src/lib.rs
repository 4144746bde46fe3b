//! # Swiss Pairing
//!
//! A local Swiss-system tournament manager with history-aware pairing.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, matches, standings, pairings)
//! - **pairing**: Next-round pairing engine and match history oracle
//! - **standings**: Win/loss aggregation and rank order
//! - **storage**: JSONL player registry and match log
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod models;
pub mod pairing;
pub mod standings;
pub mod storage;

pub use models::*;
pub use pairing::{compute_pairings, pair_round, HistoryOracle, MatchHistory, PairingError};
