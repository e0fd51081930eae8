use std::fmt::Write;

use crate::engine::Evaluation;

const NOTES: &str = "\
Notes:
- Spread Win: 'favorite' keeps negative spreads, 'underdog' positive ones; 'both' keeps every nonzero spread.
- Over Win: the totals outcome filters totals bets by predicted winner (or bet text).
- Moneyline Win: 'favorite' means win probability above 50%, 'underdog' 50% or below.
- No spread bets? Check that the source's spread column (or an equivalent) has nonzero values.";

/// Render an evaluation for the terminal.
pub fn render(eval: &Evaluation, show_records: bool) -> String {
    let mut out = String::new();
    let stats = &eval.stats;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Results for {}", eval.query.model_name);
    let _ = writeln!(out, "Total Bets: {}", stats.total);
    let _ = writeln!(out, "Total Wins: {}", stats.wins);
    let _ = writeln!(out, "Total Losses: {}", stats.losses);
    let _ = writeln!(out, "Win Percentage: {:.2}%", stats.win_percentage);
    let _ = writeln!(
        out,
        "{}",
        if eval.smart_bet {
            "Smart Bet!"
        } else {
            "Not a Smart Bet"
        }
    );

    if show_records {
        let _ = writeln!(
            out,
            "\n{:<20} {:<10} {:>8} {:>9} {:>8} {:>8} {:<8} Bet",
            "Bet Type", "Home/Away", "Spread", "Win Prob", "DTM", "ROI %", "Result"
        );
        for r in &eval.records {
            let _ = writeln!(
                out,
                "{:<20} {:<10} {:>8.1} {:>9.1} {:>8.1} {:>8.1} {:<8} {}",
                r.bet_type,
                r.home_away.as_deref().unwrap_or("-"),
                r.auto_spread,
                r.win_probability,
                r.dtm,
                r.roi_percent,
                r.bet_result,
                r.bet_text.as_deref().unwrap_or("")
            );
        }
    }

    let _ = write!(out, "\n{}\n", NOTES);
    out
}
