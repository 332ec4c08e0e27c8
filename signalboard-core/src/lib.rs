//! Signalboard Core — read-only analytics over precomputed trading signals.
//!
//! This crate contains everything below the presentation layer:
//! - Column schema contract for the recommendations CSV
//! - Loaders for the two input tables (recommendations, close prices)
//! - The immutable per-session data context
//! - Filter/sort engine over the recommendations table
//! - Ranking views (top/bottom by Black–Litterman rank)
//! - Ticker drilldown with trailing moving averages
//! - Keyword query resolver (the "Ask" feature)
//! - Overview statistics and CSV export
//!
//! No signal, option, or Black–Litterman computation happens here; both
//! tables are produced upstream and treated as immutable once loaded.

pub mod context;
pub mod data;
pub mod drilldown;
pub mod export;
pub mod filter;
pub mod overview;
pub mod query;
pub mod rank;
pub mod schema;
pub mod table;

pub use context::DashboardContext;
pub use data::LoadError;
pub use filter::{filter_and_sort, FilterCriteria};
pub use query::{resolve, QueryResponse};
pub use table::{RecommendationRow, RecommendationTable, SortKey};
