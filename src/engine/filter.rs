//! Record filtering.
//!
//! A record survives when it belongs to the queried model, passes the
//! predicates of the selected bet type, and falls inside both numeric
//! ranges. The bet-type predicates are picked once from the
//! [`BetSelection`] variant:
//!
//! | bet type      | spread present | home/away | sub-filter                       |
//! |---------------|----------------|-----------|----------------------------------|
//! | SpreadWin     | yes            | yes       | spread sign (favorite < 0 < dog) |
//! | MoneylineWin  | no             | yes       | win probability vs. 50           |
//! | OverWin       | no             | no        | over/under text                  |
//!
//! Because every stage is a predicate over an unmodified record, stages
//! commute; only spread exclusion rewrites the (copied) output.

use crate::records::{HomeAway, Record, TotalsHint};

use super::query::{BetSelection, FavUnderdog, Query, SpreadOutcome, TotalsOutcome};

/// Win probability (percent) above which a moneyline bet counts as the favorite.
const MONEYLINE_FAVORITE_ABOVE: f64 = 50.0;

/// Narrow `records` to those matching `query`, preserving input order.
///
/// Returns copies; when the query excludes spread, every returned record has
/// `auto_spread == 0.0`.
pub fn filter(records: &[Record], query: &Query) -> Vec<Record> {
    records
        .iter()
        .filter(|r| r.model_name == query.model_name)
        .filter(|r| admits(&query.selection, r))
        .filter(|r| query.win_prob_range.contains(&r.win_probability))
        .filter(|r| query.dtm_range.contains(&r.dtm))
        .map(|r| {
            let mut r = r.clone();
            if !query.include_spread {
                r.auto_spread = 0.0;
            }
            r
        })
        .collect()
}

/// Bet-type stage: every predicate that depends on the selected bet type.
pub fn admits(selection: &BetSelection, record: &Record) -> bool {
    match *selection {
        BetSelection::SpreadWin {
            spread_outcome,
            home_away,
        } => spread_admits(record, spread_outcome) && side_admits(record, home_away),
        BetSelection::MoneylineWin {
            fav_underdog,
            home_away,
        } => moneyline_admits(record, fav_underdog) && side_admits(record, home_away),
        BetSelection::OverWin { totals_outcome } => totals_admits(record, totals_outcome),
    }
}

fn spread_admits(record: &Record, outcome: SpreadOutcome) -> bool {
    let spread = record.auto_spread;
    if spread == 0.0 {
        return false;
    }
    match outcome {
        SpreadOutcome::Favorite => spread < 0.0,
        SpreadOutcome::Underdog => spread > 0.0,
        SpreadOutcome::Both => true,
    }
}

fn moneyline_admits(record: &Record, side: FavUnderdog) -> bool {
    match side {
        FavUnderdog::Favorite => record.win_probability > MONEYLINE_FAVORITE_ABOVE,
        FavUnderdog::Underdog => record.win_probability <= MONEYLINE_FAVORITE_ABOVE,
    }
}

// OverWin never looks at the record's bet_type column.
fn totals_admits(record: &Record, outcome: TotalsOutcome) -> bool {
    match &record.totals_hint {
        TotalsHint::Text(text) => contains_ignore_case(text, outcome.label()),
        TotalsHint::Missing => false,
        TotalsHint::Untracked => true,
    }
}

fn side_admits(record: &Record, side: HomeAway) -> bool {
    if side == HomeAway::Both {
        return true;
    }
    record
        .home_away
        .as_deref()
        .is_some_and(|value| contains_ignore_case(value, side.label()))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(model: &str, auto_spread: f64, win_probability: f64) -> Record {
        Record {
            model_name: model.into(),
            bet_type: "Favorite Spreads".into(),
            home_away: Some("Both".into()),
            spread_raw: Some(auto_spread),
            auto_spread,
            win_probability,
            dtm: 0.0,
            roi_percent: 0.0,
            bet_result: "LOSS".into(),
            pred_total_winner: None,
            bet_text: None,
            totals_hint: TotalsHint::Untracked,
        }
    }

    fn spread(outcome: SpreadOutcome) -> Query {
        Query::new(
            "X",
            BetSelection::SpreadWin {
                spread_outcome: outcome,
                home_away: HomeAway::Both,
            },
        )
    }

    fn totals(outcome: TotalsOutcome) -> Query {
        Query::new("X", BetSelection::OverWin { totals_outcome: outcome })
    }

    fn moneyline(side: FavUnderdog, home_away: HomeAway) -> Query {
        Query::new(
            "X",
            BetSelection::MoneylineWin {
                fav_underdog: side,
                home_away,
            },
        )
    }

    #[test]
    fn favorite_spread_keeps_negative_spread() {
        let records = vec![record("X", -3.0, 55.0)];
        assert_eq!(filter(&records, &spread(SpreadOutcome::Favorite)).len(), 1);
    }

    #[test]
    fn underdog_spread_drops_negative_spread() {
        let records = vec![record("X", -3.0, 55.0)];
        assert!(filter(&records, &spread(SpreadOutcome::Underdog)).is_empty());
    }

    #[test]
    fn spread_bets_require_nonzero_spread() {
        let records = vec![record("X", 0.0, 55.0), record("X", 2.5, 40.0), record("X", -1.0, 60.0)];
        let out = filter(&records, &spread(SpreadOutcome::Both));
        let spreads: Vec<f64> = out.iter().map(|r| r.auto_spread).collect();
        assert_eq!(spreads, vec![2.5, -1.0]);
    }

    #[test]
    fn model_must_match_exactly() {
        let records = vec![record("X", -3.0, 55.0), record("x", -3.0, 55.0), record("Y", -3.0, 55.0)];
        let out = filter(&records, &spread(SpreadOutcome::Both));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].model_name, "X");
    }

    #[test]
    fn home_away_matches_substring_case_insensitively() {
        let mut a = record("X", -3.0, 55.0);
        a.home_away = Some("HOME".into());
        let mut b = record("X", -3.0, 55.0);
        b.home_away = Some("home/away split".into());
        let mut c = record("X", -3.0, 55.0);
        c.home_away = Some("Away".into());
        let mut d = record("X", -3.0, 55.0);
        d.home_away = None;
        let records = vec![a, b, c, d];

        let mut q = spread(SpreadOutcome::Both);
        q.selection = BetSelection::SpreadWin {
            spread_outcome: SpreadOutcome::Both,
            home_away: HomeAway::Home,
        };
        assert_eq!(filter(&records, &q).len(), 2);

        q.selection = BetSelection::SpreadWin {
            spread_outcome: SpreadOutcome::Both,
            home_away: HomeAway::Away,
        };
        assert_eq!(filter(&records, &q).len(), 2);

        q.selection = BetSelection::SpreadWin {
            spread_outcome: SpreadOutcome::Both,
            home_away: HomeAway::Both,
        };
        assert_eq!(filter(&records, &q).len(), 4);
    }

    #[test]
    fn moneyline_splits_on_fifty_percent() {
        let records = vec![record("X", 0.0, 50.0), record("X", 0.0, 50.5), record("X", -2.0, 30.0)];
        let fav = filter(&records, &moneyline(FavUnderdog::Favorite, HomeAway::Both));
        assert_eq!(fav.len(), 1);
        assert_eq!(fav[0].win_probability, 50.5);

        let dog = filter(&records, &moneyline(FavUnderdog::Underdog, HomeAway::Both));
        let probs: Vec<f64> = dog.iter().map(|r| r.win_probability).collect();
        assert_eq!(probs, vec![50.0, 30.0]);
    }

    #[test]
    fn moneyline_applies_home_away() {
        let mut home = record("X", 0.0, 70.0);
        home.home_away = Some("Home".into());
        let mut away = record("X", 0.0, 70.0);
        away.home_away = Some("Away".into());
        let out = filter(&[home, away], &moneyline(FavUnderdog::Favorite, HomeAway::Away));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].home_away.as_deref(), Some("Away"));
    }

    #[test]
    fn totals_ignore_bet_type_spread_and_side() {
        let mut r = record("X", 0.0, 55.0);
        r.bet_type = "Favorite Spreads".into();
        r.home_away = None;
        r.totals_hint = TotalsHint::Text("OVER".into());
        assert_eq!(filter(&[r], &totals(TotalsOutcome::Over)).len(), 1);
    }

    #[test]
    fn totals_match_hint_text() {
        let mut over = record("X", 0.0, 55.0);
        over.totals_hint = TotalsHint::Text("Over 221.5".into());
        let mut under = record("X", 0.0, 55.0);
        under.totals_hint = TotalsHint::Text("under".into());
        let mut missing = record("X", 0.0, 55.0);
        missing.totals_hint = TotalsHint::Missing;
        let untracked = record("X", 0.0, 55.0);
        let records = vec![over, under, missing, untracked];

        assert_eq!(filter(&records, &totals(TotalsOutcome::Over)).len(), 2);
        let out = filter(&records, &totals(TotalsOutcome::Under));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].totals_hint, TotalsHint::Text("under".into()));
        assert_eq!(out[1].totals_hint, TotalsHint::Untracked);
    }

    // Text matching is a heuristic: "Overtime" contains "over".
    #[test]
    fn totals_text_match_is_best_effort() {
        let mut r = record("X", 0.0, 55.0);
        r.totals_hint = TotalsHint::Text("Under, went to overtime".into());
        assert_eq!(filter(&[r], &totals(TotalsOutcome::Over)).len(), 1);
    }

    #[test]
    fn numeric_ranges_are_closed() {
        let mut records = vec![record("X", -1.0, 40.0), record("X", -1.0, 60.0), record("X", -1.0, 61.0)];
        records[0].dtm = -10.0;
        records[1].dtm = 10.0;
        records[2].dtm = 5.0;
        let mut q = spread(SpreadOutcome::Both);
        q.win_prob_range = 40.0..=60.0;
        assert_eq!(filter(&records, &q).len(), 2);

        q.dtm_range = -10.0..=9.0;
        let out = filter(&records, &q);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].dtm, -10.0);
    }

    #[test]
    fn range_stages_commute() {
        let mut records = Vec::new();
        for i in 0..20 {
            let mut r = record("X", -1.0, i as f64 * 5.0);
            r.dtm = (i as f64 - 10.0) * 7.0;
            records.push(r);
        }
        let mut by_prob = spread(SpreadOutcome::Both);
        by_prob.win_prob_range = 20.0..=70.0;
        let mut by_dtm = spread(SpreadOutcome::Both);
        by_dtm.dtm_range = -30.0..=40.0;
        let mut both = by_prob.clone();
        both.dtm_range = by_dtm.dtm_range.clone();

        let a = filter(&filter(&records, &by_prob), &by_dtm);
        let b = filter(&filter(&records, &by_dtm), &by_prob);
        assert_eq!(a, b);
        assert_eq!(a, filter(&records, &both));
    }

    #[test]
    fn filtering_is_idempotent() {
        let mut records = vec![
            record("X", -3.0, 55.0),
            record("X", 4.0, 45.0),
            record("Y", -2.0, 70.0),
            record("X", 0.0, 80.0),
        ];
        records[1].home_away = Some("Away".into());
        let queries = vec![
            spread(SpreadOutcome::Both),
            spread(SpreadOutcome::Favorite),
            moneyline(FavUnderdog::Favorite, HomeAway::Both),
            totals(TotalsOutcome::Over),
        ];
        for q in queries {
            let once = filter(&records, &q);
            assert_eq!(filter(&once, &q), once, "not idempotent for {:?}", q.selection);
        }
    }

    #[test]
    fn excluding_spread_zeroes_output_only() {
        let records = vec![record("X", -3.0, 55.0), record("X", 6.5, 45.0)];
        let mut q = spread(SpreadOutcome::Both);
        q.include_spread = false;
        let out = filter(&records, &q);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.auto_spread == 0.0));
        assert_eq!(records[0].auto_spread, -3.0);
        assert_eq!(records[1].auto_spread, 6.5);
    }
}
