//! Bid evaluator: filters an auction's bids and computes adjusted values.
//!
//! Checks, in order, for each bid:
//! 1. Bidder is in the catalog.
//! 2. Unit is listed by the auction.
//! 3. Bidder is eligible on the auction's site.
//! 4. Adjusted value clears the site floor (inclusive).
//!
//! Bids that pass become clearing candidates for their unit; the rest are
//! recorded with the first check they failed. Nothing here is an error.

use std::collections::{HashMap, HashSet};
use std::fmt;

use common::{Auction, Bid};
use tracing::debug;

use crate::catalog::Catalog;

// ── Public Types ──────────────────────────────────────────────────────

/// A clearing-eligible bid paired with its adjusted value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearingCandidate<'a> {
    pub bid: &'a Bid,
    pub adjusted_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The auction's site is not in the catalog.
    UnknownSite,
    UnknownBidder,
    UnitNotInAuction,
    BidderNotEligible,
    BelowFloor,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSite => write!(f, "unknown_site"),
            Self::UnknownBidder => write!(f, "unknown_bidder"),
            Self::UnitNotInAuction => write!(f, "unit_not_in_auction"),
            Self::BidderNotEligible => write!(f, "bidder_not_eligible"),
            Self::BelowFloor => write!(f, "below_floor"),
        }
    }
}

/// A bid that did not become a candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedBid<'a> {
    pub bid: &'a Bid,
    pub reason: RejectReason,
    /// Set only for `BelowFloor`.
    pub adjusted_value: Option<f64>,
}

/// Result of evaluating one auction.
#[derive(Debug, Clone, Default)]
pub struct Evaluation<'a> {
    /// False when the auction's site is missing from the catalog.
    pub site_known: bool,
    /// Candidates per unit, in bid input order.
    pub candidates: HashMap<&'a str, Vec<ClearingCandidate<'a>>>,
    pub rejected: Vec<RejectedBid<'a>>,
}

impl<'a> Evaluation<'a> {
    pub fn candidates_for(&self, unit: &str) -> &[ClearingCandidate<'a>] {
        self.candidates.get(unit).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.values().map(Vec::len).sum()
    }
}

// ── Evaluator ─────────────────────────────────────────────────────────

pub struct BidEvaluator<'c> {
    catalog: &'c Catalog,
}

impl<'c> BidEvaluator<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Evaluate every bid of `auction` against the catalog.
    pub fn evaluate<'a>(&self, auction: &'a Auction) -> Evaluation<'a> {
        let mut evaluation = Evaluation::default();

        let site = match self.catalog.site(&auction.site_name) {
            Some(site) => site,
            None => {
                debug!(
                    "{}: unknown site, {} bids dropped",
                    auction.site_name,
                    auction.bids.len()
                );
                evaluation.rejected = auction
                    .bids
                    .iter()
                    .map(|bid| RejectedBid {
                        bid,
                        reason: RejectReason::UnknownSite,
                        adjusted_value: None,
                    })
                    .collect();
                return evaluation;
            }
        };
        evaluation.site_known = true;

        let units: HashSet<&str> = auction.units.iter().map(String::as_str).collect();

        for bid in &auction.bids {
            let bidder = match self.catalog.bidder(&bid.bidder) {
                Some(b) => b,
                None => {
                    reject(&mut evaluation, bid, RejectReason::UnknownBidder, None);
                    continue;
                }
            };

            if !units.contains(bid.unit.as_str()) {
                reject(&mut evaluation, bid, RejectReason::UnitNotInAuction, None);
                continue;
            }

            if !site.can_bid(&bid.bidder) {
                reject(&mut evaluation, bid, RejectReason::BidderNotEligible, None);
                continue;
            }

            let adjusted_value = bidder.adjusted_bid(bid.value);
            if adjusted_value < site.floor {
                reject(
                    &mut evaluation,
                    bid,
                    RejectReason::BelowFloor,
                    Some(adjusted_value),
                );
                continue;
            }

            evaluation
                .candidates
                .entry(bid.unit.as_str())
                .or_default()
                .push(ClearingCandidate {
                    bid,
                    adjusted_value,
                });
        }

        evaluation
    }
}

fn reject<'a>(
    evaluation: &mut Evaluation<'a>,
    bid: &'a Bid,
    reason: RejectReason,
    adjusted_value: Option<f64>,
) {
    debug!(
        "{}/{}: bid {} rejected ({})",
        bid.bidder, bid.unit, bid.value, reason
    );
    evaluation.rejected.push(RejectedBid {
        bid,
        reason,
        adjusted_value,
    });
}
