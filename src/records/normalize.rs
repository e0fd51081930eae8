//! Resolve heterogeneous source rows into canonical [`Record`]s.
//!
//! The model exports do not agree on a schema: some carry a `bet type`
//! column, some only a `spread_type`; the spread may live in any of four
//! columns or only inside the free-text bet description. Every fallback is
//! resolved here, once, so the filters never look at column presence.
//!
//! Normalization never fails on a single value. Anything that does not
//! coerce becomes 0.0 (numbers) or a missing value (text).

use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

use super::models::{Column, HomeAway, RawRow, RawTable, Record, TotalsHint};

/// Bet type assumed when a source has neither `bet type` nor `spread_type`.
pub const DEFAULT_BET_TYPE: &str = "Favorite Spreads";

/// Spread columns in priority order; the first one present in the header wins.
const SPREAD_COLUMNS: [Column; 4] = [
    Column::SpreadValue,
    Column::RoundedSpread,
    Column::PredSpread,
    Column::Spread,
];

fn spread_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"-?\d+\.?\d*").expect("spread pattern is valid"))
}

/// Normalize every table and concatenate the results in source order.
pub fn normalize_all(tables: &[RawTable]) -> Vec<Record> {
    tables.iter().flat_map(normalize_table).collect()
}

/// Normalize one source table.
///
/// Logs a warning, naming the model, when the table has no spread column.
pub fn normalize_table(table: &RawTable) -> Vec<Record> {
    let spread_column = SPREAD_COLUMNS.into_iter().find(|c| table.has(*c));
    if spread_column.is_none() {
        if table.has(Column::BetText) {
            warn!(
                "No recognized spread column for '{}'; extracting spread from the bet text",
                table.model_name
            );
        } else {
            warn!(
                "No spread column or bet text for '{}'; every spread is 0",
                table.model_name
            );
        }
    }

    table
        .rows
        .iter()
        .map(|row| normalize_row(table, row, spread_column))
        .collect()
}

fn normalize_row(table: &RawTable, row: &RawRow, spread_column: Option<Column>) -> Record {
    let bet_text = row.text(Column::BetText);

    let bet_type = if table.has(Column::BetType) {
        row.text(Column::BetType)
    } else if table.has(Column::SpreadType) {
        row.text(Column::SpreadType)
    } else {
        None
    }
    .unwrap_or_else(|| DEFAULT_BET_TYPE.to_string());

    let home_away = if table.has(Column::HomeAway) {
        row.text(Column::HomeAway)
    } else if table.has(Column::BetText) {
        Some(infer_home_away(bet_text.as_deref().unwrap_or_default()).label().to_string())
    } else if table.has(Column::HomeTeam) {
        Some(HomeAway::Home.label().to_string())
    } else {
        Some(HomeAway::Both.label().to_string())
    };

    let spread_raw = spread_column.and_then(|c| row.number(c));
    let auto_spread = match spread_column {
        Some(_) => spread_raw.unwrap_or(0.0),
        None => bet_text.as_deref().map(extract_spread).unwrap_or(0.0),
    };

    let pred_total_winner = row.text(Column::PredTotalWinner);
    let totals_source = if table.has(Column::PredTotalWinner) {
        Some(&pred_total_winner)
    } else if table.has(Column::BetText) {
        Some(&bet_text)
    } else {
        None
    };
    let totals_hint = match totals_source {
        Some(Some(text)) => TotalsHint::Text(text.clone()),
        Some(None) => TotalsHint::Missing,
        None => TotalsHint::Untracked,
    };

    Record {
        model_name: table.model_name.clone(),
        bet_type,
        home_away,
        spread_raw,
        auto_spread,
        win_probability: row.number(Column::WinProbability).unwrap_or(0.0),
        dtm: row.number(Column::Dtm).unwrap_or(0.0),
        roi_percent: row.number(Column::RoiPercent).unwrap_or(0.0),
        bet_result: row.text(Column::BetResult).unwrap_or_default(),
        pred_total_winner,
        bet_text,
        totals_hint,
    }
}

/// Best-effort side detection from a bet description. "HOME" wins over
/// "AWAY" when both appear; text mentioning neither is `Both`.
pub fn infer_home_away(text: &str) -> HomeAway {
    let upper = text.to_uppercase();
    if upper.contains("HOME") {
        HomeAway::Home
    } else if upper.contains("AWAY") {
        HomeAway::Away
    } else {
        HomeAway::Both
    }
}

/// First signed decimal in the text, or 0.0 when there is none.
pub fn extract_spread(text: &str) -> f64 {
    spread_pattern()
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}
