pub mod classify;
pub mod filter;
pub mod query;
pub mod stats;

pub use query::{BetSelection, BetType, FavUnderdog, Query, SpreadOutcome, TotalsOutcome};
pub use stats::Stats;

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use crate::records::Record;

/// Everything the presentation layer shows for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub query: Query,
    pub stats: Stats,
    pub smart_bet: bool,
    pub records: Vec<Record>,
}

/// Filter, summarize and classify in one pass over a read-only record set.
pub fn evaluate(records: &[Record], query: &Query) -> Evaluation {
    let filtered = filter::filter(records, query);
    let stats = stats::summarize(&filtered);
    let smart_bet = classify::classify(&query.selection, &stats);
    debug!(
        "Evaluated {:?} for '{}': {} of {} records kept, {:.2}% wins, smart={}",
        query.selection.bet_type(),
        query.model_name,
        stats.total,
        records.len(),
        stats.win_percentage,
        smart_bet
    );
    Evaluation {
        query: query.clone(),
        stats,
        smart_bet,
        records: filtered,
    }
}

/// Distinct model names, sorted.
pub fn model_names(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.model_name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
