//! Batch clearing: runs evaluator and selector over every auction.
//!
//! Auctions are independent: each one reads only the shared catalog and
//! its own bids. Results keep the batch's input order, with an empty list
//! for auctions that produced no winner.

use std::collections::BTreeMap;

use common::{Auction, WinningBid};
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::ClearingConfig;
use crate::evaluator::{BidEvaluator, ClearingCandidate, Evaluation};
use crate::selector::WinnerSelector;

/// Counters for one cleared batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub auctions: usize,
    pub unknown_sites: usize,
    pub bids: usize,
    pub candidates: usize,
    /// Rejected bid count keyed by reason.
    pub rejected: BTreeMap<String, usize>,
    pub winners: usize,
}

impl BatchSummary {
    fn record(&mut self, evaluation: &Evaluation<'_>, winners: usize) {
        self.auctions += 1;
        if !evaluation.site_known {
            self.unknown_sites += 1;
        }
        self.bids += evaluation.candidate_count() + evaluation.rejected.len();
        self.candidates += evaluation.candidate_count();
        for rejected in &evaluation.rejected {
            *self.rejected.entry(rejected.reason.to_string()).or_default() += 1;
        }
        self.winners += winners;
    }

    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// One winner list per input auction, same order.
    pub results: Vec<Vec<WinningBid>>,
    pub summary: BatchSummary,
}

/// Clear a single auction.
pub fn clear_auction(catalog: &Catalog, auction: &Auction, config: &ClearingConfig) -> Vec<WinningBid> {
    let evaluation = BidEvaluator::new(catalog).evaluate(auction);
    let winners = WinnerSelector::select(&evaluation, &auction.units);
    to_output(&winners, config)
}

/// Clear every auction of the batch, in order.
pub fn clear_batch(catalog: &Catalog, auctions: &[Auction], config: &ClearingConfig) -> BatchOutcome {
    let evaluator = BidEvaluator::new(catalog);
    let mut outcome = BatchOutcome {
        results: Vec::with_capacity(auctions.len()),
        summary: BatchSummary::default(),
    };

    for (idx, auction) in auctions.iter().enumerate() {
        let evaluation = evaluator.evaluate(auction);
        if !evaluation.site_known {
            warn!(
                "Auction #{}: site '{}' not in catalog, no winners",
                idx, auction.site_name
            );
        }

        let winners = WinnerSelector::select(&evaluation, &auction.units);
        outcome.summary.record(&evaluation, winners.len());
        outcome.results.push(to_output(&winners, config));
    }

    let summary = &outcome.summary;
    info!(
        "Batch cleared: auctions={} unknown_sites={} bids={} candidates={} rejected={} winners={}",
        summary.auctions,
        summary.unknown_sites,
        summary.bids,
        summary.candidates,
        summary.rejected_total(),
        summary.winners
    );

    outcome
}

fn to_output(winners: &[ClearingCandidate<'_>], config: &ClearingConfig) -> Vec<WinningBid> {
    winners
        .iter()
        .map(|w| WinningBid {
            bid: w.bid.clone(),
            adjusted: config.include_adjusted_value.then_some(w.adjusted_value),
        })
        .collect()
}
