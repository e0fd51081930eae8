use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Source columns the normalizer knows about. Anything else in a header is
/// ignored at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    BetType,
    SpreadType,
    HomeAway,
    /// Free-text bet description ("bet" in the source sheets)
    BetText,
    HomeTeam,
    SpreadValue,
    RoundedSpread,
    PredSpread,
    Spread,
    Dtm,
    RoiPercent,
    WinProbability,
    BetResult,
    PredTotalWinner,
}

impl Column {
    pub const ALL: [Column; 14] = [
        Column::BetType,
        Column::SpreadType,
        Column::HomeAway,
        Column::BetText,
        Column::HomeTeam,
        Column::SpreadValue,
        Column::RoundedSpread,
        Column::PredSpread,
        Column::Spread,
        Column::Dtm,
        Column::RoiPercent,
        Column::WinProbability,
        Column::BetResult,
        Column::PredTotalWinner,
    ];

    /// Header text used by the model export sheets.
    pub fn header(self) -> &'static str {
        match self {
            Column::BetType => "bet type",
            Column::SpreadType => "spread_type",
            Column::HomeAway => "home/away",
            Column::BetText => "bet",
            Column::HomeTeam => "home team",
            Column::SpreadValue => "spread value",
            Column::RoundedSpread => "rounded_spread",
            Column::PredSpread => "pred_spread",
            Column::Spread => "spread",
            Column::Dtm => "dtm",
            Column::RoiPercent => "roi (%)",
            Column::WinProbability => "win probability",
            Column::BetResult => "bet result",
            Column::PredTotalWinner => "pred_total_winner",
        }
    }

    /// Match a header cell, ignoring surrounding whitespace and ASCII case.
    pub fn from_header(name: &str) -> Option<Column> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.header().eq_ignore_ascii_case(name))
    }
}

/// A single cell as read from a source, before any coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Empty,
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Classify a textual field: blank → `Empty`, anything else → `Text`,
    /// kept exactly as written. Numeric parsing is deferred to [`as_f64`].
    ///
    /// [`as_f64`]: RawValue::as_f64
    pub fn from_field(field: &str) -> Self {
        if field.trim().is_empty() {
            RawValue::Empty
        } else {
            RawValue::Text(field.to_string())
        }
    }

    /// Numeric coercion. Blanks, unparsable text and non-finite values yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Empty => None,
            RawValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
            RawValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// String coercion. Numbers keep their shortest decimal form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Empty => None,
            RawValue::Number(n) => Some(n.to_string()),
            RawValue::Text(s) => Some(s.clone()),
        }
    }
}

/// One source row, keyed by recognised column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: HashMap<Column, RawValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with(mut self, column: Column, value: RawValue) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: Column, value: RawValue) {
        self.cells.insert(column, value);
    }

    pub fn number(&self, column: Column) -> Option<f64> {
        self.cells.get(&column).and_then(RawValue::as_f64)
    }

    pub fn text(&self, column: Column) -> Option<String> {
        self.cells.get(&column).and_then(RawValue::as_text)
    }
}

/// All rows loaded from one source, tagged with the source's model name.
///
/// `columns` records which columns the source header carried, independent of
/// whether a given row has a value for them. Several normalization rules
/// branch on column presence rather than on individual cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub model_name: String,
    pub columns: HashSet<Column>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(model_name: impl Into<String>, columns: impl IntoIterator<Item = Column>) -> Self {
        RawTable {
            model_name: model_name.into(),
            columns: columns.into_iter().collect(),
            rows: Vec::new(),
        }
    }

    pub fn has(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }
}

/// Home/away side of a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HomeAway {
    Home,
    Away,
    Both,
}

impl HomeAway {
    pub fn label(self) -> &'static str {
        match self {
            HomeAway::Home => "Home",
            HomeAway::Away => "Away",
            HomeAway::Both => "Both",
        }
    }
}

/// Where the totals (over/under) sub-filter finds its text for a record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TotalsHint {
    /// Text from `pred_total_winner`, or from the bet text when that column is absent
    Text(String),
    /// The source tracks totals text but this row has none; never matches
    Missing,
    /// The source carries neither column; the totals sub-filter passes everything
    #[default]
    Untracked,
}

/// A normalized bet record. Every field the filters read is resolved here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub model_name: String,
    pub bet_type: String,
    /// Verbatim when the source has a home/away column, otherwise inferred
    pub home_away: Option<String>,
    /// Value of the spread column the source provided, if any
    pub spread_raw: Option<f64>,
    /// Canonical spread used by the filters; 0.0 means "not a spread bet"
    pub auto_spread: f64,
    pub win_probability: f64,
    pub dtm: f64,
    pub roi_percent: f64,
    pub bet_result: String,
    pub pred_total_winner: Option<String>,
    pub bet_text: Option<String>,
    #[serde(skip)]
    pub totals_hint: TotalsHint,
}
