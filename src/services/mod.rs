//! Ranking resolution and indicator orchestration
//!
//! The two offline resolvers and the online portal client share one
//! resolution rule: the value for a target year is the most recent known
//! value not newer than that year (the journal catalog applies it per
//! catalog file; callers pick the file).

pub mod conference_table;
pub mod core_portal;
pub(crate) mod csv;
pub mod indicator_service;
pub mod journal_catalog;

pub use conference_table::ConferenceRankingTable;
pub use core_portal::{best_ranking, scan_ranked_blocks, CorePortalClient};
pub use indicator_service::{IndicatorSeries, IndicatorService};
pub use journal_catalog::JournalRankingCatalog;
