//! Winner selector: one winner per unit from the evaluated candidates.

use std::collections::HashSet;

use crate::evaluator::{ClearingCandidate, Evaluation};

/// Picks the highest adjusted value per unit.
///
/// Tie-break: among equal adjusted values the candidate encountered LAST in
/// bid input order wins. Winners are emitted in the order units are
/// declared by the auction; a repeated unit declaration is emitted once.
pub struct WinnerSelector;

impl WinnerSelector {
    /// Select winners for `units` from an auction's evaluation.
    pub fn select<'a>(evaluation: &Evaluation<'a>, units: &[String]) -> Vec<ClearingCandidate<'a>> {
        let mut seen = HashSet::with_capacity(units.len());
        let mut winners = Vec::new();
        for unit in units {
            if !seen.insert(unit.as_str()) {
                continue;
            }
            if let Some(winner) = Self::best(evaluation.candidates_for(unit)) {
                winners.push(winner);
            }
        }
        winners
    }

    /// Best candidate of one unit, or `None` when there are no candidates.
    pub fn best<'a>(candidates: &[ClearingCandidate<'a>]) -> Option<ClearingCandidate<'a>> {
        let mut winner: Option<ClearingCandidate<'a>> = None;
        for candidate in candidates {
            match winner {
                Some(current) if candidate.adjusted_value < current.adjusted_value => {}
                _ => winner = Some(*candidate),
            }
        }
        winner
    }
}
