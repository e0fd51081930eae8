use clap::Parser;

use crate::engine::query::{validate_range, DTM_BOUNDS, WIN_PROB_BOUNDS};
use crate::engine::{BetSelection, BetType, FavUnderdog, Query, SpreadOutcome, TotalsOutcome};
use crate::records::HomeAway;
use crate::sources::SourceSpec;

/// Filter model bet history and flag smart bets
#[derive(Parser, Debug, Clone)]
#[command(name = "smartbet-calc", version, about)]
pub struct Config {
    /// Record sources as NAME=PATH (.csv, .db, .sqlite, .sqlite3)
    #[arg(
        long = "source",
        env = "SOURCES",
        value_delimiter = ',',
        default_values = [
            "Terry Rozier=data/rozier.csv",
            "BigMoney=data/big_money.csv",
            "Jebron Lames=data/hebron_lames.csv",
        ]
    )]
    pub sources: Vec<SourceSpec>,

    /// Table read from SQLite sources
    #[arg(long, env = "SOURCE_SHEET", default_value = "in")]
    pub sheet: String,

    /// Model to evaluate (defaults to the first model name in sorted order)
    #[arg(long, env = "MODEL")]
    pub model: Option<String>,

    /// Bet type
    #[arg(long, value_enum, default_value_t = BetType::SpreadWin)]
    pub bet_type: BetType,

    /// Spread outcome (spread-win only)
    #[arg(long, value_enum, default_value_t = SpreadOutcome::Both)]
    pub spread_outcome: SpreadOutcome,

    /// Favorite or underdog by win probability (moneyline-win only)
    #[arg(long, value_enum, default_value_t = FavUnderdog::Favorite)]
    pub fav_underdog: FavUnderdog,

    /// Totals outcome (over-win only)
    #[arg(long, value_enum, default_value_t = TotalsOutcome::Over)]
    pub totals_outcome: TotalsOutcome,

    /// Home/away side (ignored for over-win)
    #[arg(long, value_enum, default_value_t = HomeAway::Both)]
    pub home_away: HomeAway,

    /// Lower bound of the win probability range (%)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub win_prob_min: f64,

    /// Upper bound of the win probability range (%)
    #[arg(long, default_value = "100", allow_negative_numbers = true)]
    pub win_prob_max: f64,

    /// Lower bound of the DTM range (%)
    #[arg(long, default_value = "-100", allow_negative_numbers = true)]
    pub dtm_min: f64,

    /// Upper bound of the DTM range (%)
    #[arg(long, default_value = "100", allow_negative_numbers = true)]
    pub dtm_max: f64,

    /// Report every surviving record with a spread of 0
    #[arg(long)]
    pub exclude_spread: bool,

    /// Print the filtered records after the summary
    #[arg(long)]
    pub show_records: bool,

    /// Print the evaluation as JSON
    #[arg(long)]
    pub json: bool,

    /// Serve the dashboard instead of evaluating once
    #[arg(long, env = "SERVE", default_value = "false")]
    pub serve: bool,

    /// Dashboard listen address
    #[arg(long, env = "DASHBOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub dashboard_addr: String,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sources.is_empty() {
            anyhow::bail!("at least one --source NAME=PATH is required");
        }
        validate_range(
            "win probability",
            &(self.win_prob_min..=self.win_prob_max),
            &WIN_PROB_BOUNDS,
        )?;
        validate_range("dtm", &(self.dtm_min..=self.dtm_max), &DTM_BOUNDS)?;
        if self.serve && self.json {
            anyhow::bail!("--json only applies to one-shot evaluation, not --serve");
        }
        Ok(())
    }

    /// Build the query for `model_name` from the command-line options.
    pub fn query(&self, model_name: impl Into<String>) -> Query {
        let selection = BetSelection::from_options(
            self.bet_type,
            self.spread_outcome,
            self.fav_underdog,
            self.totals_outcome,
            self.home_away,
        );
        Query {
            win_prob_range: self.win_prob_min..=self.win_prob_max,
            dtm_range: self.dtm_min..=self.dtm_max,
            include_spread: !self.exclude_spread,
            ..Query::new(model_name, selection)
        }
    }
}
