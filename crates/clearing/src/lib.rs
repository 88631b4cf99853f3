//! Clearing engine crate.
//!
//! Builds the site/bidder catalog, filters and adjusts bids per auction,
//! and selects one winner per unit.

pub mod batch;
pub mod catalog;
pub mod config;
pub mod evaluator;
pub mod selector;

pub use batch::{clear_auction, clear_batch, BatchOutcome, BatchSummary};
pub use catalog::{Catalog, SiteEntry};
pub use config::ClearingConfig;
pub use evaluator::{BidEvaluator, ClearingCandidate, Evaluation, RejectReason, RejectedBid};
pub use selector::WinnerSelector;
