use serde::Serialize;

use crate::records::Record;

/// Result code counted as a win. Compared exactly, case included.
pub const WIN_RESULT: &str = "WIN";

/// Win/loss summary over a filtered record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    /// 0–100; 0 for an empty set
    pub win_percentage: f64,
    /// Mean `roi_percent`; `None` for an empty set
    pub mean_roi: Option<f64>,
}

pub fn summarize(records: &[Record]) -> Stats {
    let total = records.len();
    let wins = records.iter().filter(|r| r.bet_result == WIN_RESULT).count();
    let win_percentage = if total > 0 {
        wins as f64 * 100.0 / total as f64
    } else {
        0.0
    };
    let mean_roi = if total > 0 {
        Some(records.iter().map(|r| r.roi_percent).sum::<f64>() / total as f64)
    } else {
        None
    };
    Stats {
        total,
        wins,
        losses: total - wins,
        win_percentage,
        mean_roi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::filter::tests::record;
    use approx::assert_relative_eq;

    fn results(codes: &[&str]) -> Vec<Record> {
        codes
            .iter()
            .map(|code| {
                let mut r = record("X", -1.0, 50.0);
                r.bet_result = code.to_string();
                r
            })
            .collect()
    }

    #[test]
    fn empty_set_is_zero_percent() {
        let stats = summarize(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.wins + stats.losses, 0);
        assert_relative_eq!(stats.win_percentage, 0.0);
        assert_eq!(stats.mean_roi, None);
    }

    #[test]
    fn six_of_ten_is_sixty_percent() {
        let mut codes = vec!["WIN"; 6];
        codes.extend(["LOSS"; 4]);
        let stats = summarize(&results(&codes));
        assert_eq!(stats.total, 10);
        assert_eq!(stats.wins, 6);
        assert_eq!(stats.losses, 4);
        assert_relative_eq!(stats.win_percentage, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn win_match_is_exact_and_case_sensitive() {
        let stats = summarize(&results(&["WIN", "win", "Win", " WIN", "PUSH", ""]));
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 5);
        assert_eq!(stats.wins + stats.losses, stats.total);
    }

    #[test]
    fn mean_roi_over_subset() {
        let mut records = results(&["WIN", "LOSS", "LOSS"]);
        records[0].roi_percent = 30.0;
        records[1].roi_percent = -10.0;
        records[2].roi_percent = 10.0;
        let stats = summarize(&records);
        assert_relative_eq!(stats.mean_roi.unwrap(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(stats.win_percentage, 100.0 / 3.0, epsilon = 1e-9);
    }
}
