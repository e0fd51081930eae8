use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::records::HomeAway;

/// Allowed span for the win-probability range (percent).
pub const WIN_PROB_BOUNDS: RangeInclusive<f64> = 0.0..=100.0;
/// Allowed span for the DTM range (percent, may be negative).
pub const DTM_BOUNDS: RangeInclusive<f64> = -100.0..=100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BetType {
    SpreadWin,
    MoneylineWin,
    OverWin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SpreadOutcome {
    Favorite,
    Underdog,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FavUnderdog {
    Favorite,
    Underdog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TotalsOutcome {
    Over,
    Under,
}

impl TotalsOutcome {
    pub fn label(self) -> &'static str {
        match self {
            TotalsOutcome::Over => "Over",
            TotalsOutcome::Under => "Under",
        }
    }
}

/// The bet-type specific half of a query. Each variant carries only the
/// options that apply to it: totals bets have no home/away side, and only
/// moneyline bets pick a favorite/underdog by win probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "bet_type", rename_all = "kebab-case")]
pub enum BetSelection {
    SpreadWin {
        spread_outcome: SpreadOutcome,
        home_away: HomeAway,
    },
    MoneylineWin {
        fav_underdog: FavUnderdog,
        home_away: HomeAway,
    },
    OverWin {
        totals_outcome: TotalsOutcome,
    },
}

impl BetSelection {
    /// Assemble a selection from the flat option set a form or CLI provides.
    /// Options irrelevant to `bet_type` are dropped.
    pub fn from_options(
        bet_type: BetType,
        spread_outcome: SpreadOutcome,
        fav_underdog: FavUnderdog,
        totals_outcome: TotalsOutcome,
        home_away: HomeAway,
    ) -> Self {
        match bet_type {
            BetType::SpreadWin => BetSelection::SpreadWin {
                spread_outcome,
                home_away,
            },
            BetType::MoneylineWin => BetSelection::MoneylineWin {
                fav_underdog,
                home_away,
            },
            BetType::OverWin => BetSelection::OverWin { totals_outcome },
        }
    }

    pub fn bet_type(&self) -> BetType {
        match self {
            BetSelection::SpreadWin { .. } => BetType::SpreadWin,
            BetSelection::MoneylineWin { .. } => BetType::MoneylineWin,
            BetSelection::OverWin { .. } => BetType::OverWin,
        }
    }
}

/// One evaluation request. Lives only for the duration of a single evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    pub model_name: String,
    pub selection: BetSelection,
    pub win_prob_range: RangeInclusive<f64>,
    pub dtm_range: RangeInclusive<f64>,
    pub include_spread: bool,
}

impl Query {
    /// Query with full ranges and spread included.
    pub fn new(model_name: impl Into<String>, selection: BetSelection) -> Self {
        Query {
            model_name: model_name.into(),
            selection,
            win_prob_range: WIN_PROB_BOUNDS,
            dtm_range: DTM_BOUNDS,
            include_spread: true,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        validate_range("win probability", &self.win_prob_range, &WIN_PROB_BOUNDS)?;
        validate_range("dtm", &self.dtm_range, &DTM_BOUNDS)?;
        Ok(())
    }
}

/// Check that `range` is a well-formed interval inside `bounds`.
pub fn validate_range(
    name: &str,
    range: &RangeInclusive<f64>,
    bounds: &RangeInclusive<f64>,
) -> anyhow::Result<()> {
    let (low, high) = (*range.start(), *range.end());
    if !low.is_finite() || !high.is_finite() {
        anyhow::bail!("{} range must be finite", name);
    }
    if low > high {
        anyhow::bail!("{} range is inverted ({} > {})", name, low, high);
    }
    if !bounds.contains(&low) || !bounds.contains(&high) {
        anyhow::bail!(
            "{} range must lie within {}..={}",
            name,
            bounds.start(),
            bounds.end()
        );
    }
    Ok(())
}
