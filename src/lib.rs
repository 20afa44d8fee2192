//! # labmetrics
//!
//! Research activity indicator engine for laboratory record keeping:
//! turns time-stamped membership, project and ranking records into
//! year-indexed scalar indicators.
//!
//! - Temporal windowing and full-time-equivalent prorating
//! - Annual indicators with pluggable merge semantics (sum / average)
//! - Conference and journal ranking resolution with closest-prior-year
//!   fallback (offline tables and the online CORE portal)
//! - A persisted indicator value cache with explicit staleness control

pub mod cache;
pub mod config;
pub mod error;
pub mod indicators;
pub mod models;
pub mod repository;
pub mod services;
pub mod temporal;

pub use cache::{IndicatorCacheRecord, CACHE_AGE_UNBOUNDED};
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use indicators::AnnualIndicator;
pub use temporal::TemporalSpan;
