//! Smart-bet heuristic.
//!
//! Spread and totals selections need volume and a high hit rate:
//!   - at least 10 bets winning 60% or more, or
//!   - 4 to 9 bets winning 70% or more.
//!
//! Moneyline selections pass on either hit rate or return:
//!   - underdogs: win rate ≥ 50% or mean ROI ≥ 10%
//!   - favorites: win rate ≥ 65% or mean ROI ≥ 10%
//!
//! An empty selection has no mean ROI and is never smart.

use super::query::{BetSelection, FavUnderdog};
use super::stats::Stats;

const SPREAD_TOTALS_MIN_BETS: usize = 4;
const SPREAD_TOTALS_FULL_SAMPLE: usize = 10;
const SPREAD_TOTALS_FULL_SAMPLE_WIN_PCT: f64 = 60.0;
const SPREAD_TOTALS_SMALL_SAMPLE_WIN_PCT: f64 = 70.0;

const MONEYLINE_UNDERDOG_WIN_PCT: f64 = 50.0;
const MONEYLINE_FAVORITE_WIN_PCT: f64 = 65.0;
const MONEYLINE_MIN_MEAN_ROI: f64 = 10.0;

pub fn classify(selection: &BetSelection, stats: &Stats) -> bool {
    match selection {
        BetSelection::SpreadWin { .. } | BetSelection::OverWin { .. } => {
            if stats.total >= SPREAD_TOTALS_FULL_SAMPLE {
                stats.win_percentage >= SPREAD_TOTALS_FULL_SAMPLE_WIN_PCT
            } else if stats.total >= SPREAD_TOTALS_MIN_BETS {
                stats.win_percentage >= SPREAD_TOTALS_SMALL_SAMPLE_WIN_PCT
            } else {
                false
            }
        }
        BetSelection::MoneylineWin { fav_underdog, .. } => {
            let min_win_pct = match fav_underdog {
                FavUnderdog::Underdog => MONEYLINE_UNDERDOG_WIN_PCT,
                FavUnderdog::Favorite => MONEYLINE_FAVORITE_WIN_PCT,
            };
            let roi_ok = stats
                .mean_roi
                .is_some_and(|roi| roi >= MONEYLINE_MIN_MEAN_ROI);
            stats.win_percentage >= min_win_pct || roi_ok
        }
    }
}
