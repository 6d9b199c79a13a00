//! Plain-text rendering of analysis reports.

use crate::swing::{AnalysisReport, SwingTotals};

/// Fixed sentence used when a report contains no swings.
pub const NO_SWINGS_SUMMARY: &str =
    "No significant evaluation swings were detected in this game.";

/// Render one line per swing, newline-joined. Evals are shown in pawns
/// with two decimals, the way engine GUIs print them.
pub fn render_summary(report: &AnalysisReport) -> String {
    if report.swings.is_empty() {
        return NO_SWINGS_SUMMARY.to_string();
    }

    report
        .swings
        .iter()
        .map(|s| {
            format!(
                "{} by {} (move {}). Eval for White changed from {:.2} to {:.2}. Player's loss: {:.2}cp.",
                s.category,
                s.player,
                s.move_number,
                s.eval_before as f64 / 100.0,
                s.eval_after as f64 / 100.0,
                s.centipawn_loss as f64 / 100.0,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-sentence digest for a batch of games. Category nouns are kept
/// attributive ("blunder swings") so the tip generator's keyword matching
/// sees them regardless of count.
pub fn summarize_batch(totals: &SwingTotals, games_analyzed: usize) -> String {
    let games_word = if games_analyzed == 1 { "game" } else { "games" };

    if totals.total() == 0 {
        return format!(
            "Analyzed {games_analyzed} {games_word} with Stockfish cloud evaluations: no significant swings detected."
        );
    }

    let mut parts = Vec::new();
    if totals.blunders > 0 {
        parts.push(format!("{} blunder {}", totals.blunders, swings_word(totals.blunders)));
    }
    if totals.mistakes > 0 {
        parts.push(format!("{} mistake {}", totals.mistakes, swings_word(totals.mistakes)));
    }
    if totals.inaccuracies > 0 {
        parts.push(format!(
            "{} inaccuracy {}",
            totals.inaccuracies,
            swings_word(totals.inaccuracies)
        ));
    }

    format!(
        "Analyzed {games_analyzed} {games_word} with Stockfish cloud evaluations: {}.",
        parts.join(", ")
    )
}

fn swings_word(count: u32) -> &'static str {
    if count == 1 {
        "swing"
    } else {
        "swings"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::PlyEvaluation;
    use crate::swing::classify;

    fn eval(ply: u32, centipawns: i32) -> PlyEvaluation {
        PlyEvaluation { ply, centipawns }
    }

    #[test]
    fn test_render_single_swing_line() {
        let report = classify(&[eval(1, 20), eval(2, 15), eval(3, -180)]);
        assert_eq!(
            render_summary(&report),
            "Mistake by White (move 2). Eval for White changed from 0.15 to -1.80. Player's loss: 1.95cp."
        );
    }

    #[test]
    fn test_render_empty_report() {
        let report = classify(&[]);
        assert_eq!(render_summary(&report), NO_SWINGS_SUMMARY);
    }

    #[test]
    fn test_render_joins_lines_in_ply_order() {
        let report = classify(&[eval(1, -220), eval(2, 60)]);
        let text = render_summary(&report);
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Blunder by White (move 1)."));
        assert!(lines[1].starts_with("Blunder by Black (move 1)."));
        assert!(lines[0].contains("changed from 0.00 to -2.20"));
        assert!(lines[1].contains("Player's loss: 2.80cp."));
    }

    #[test]
    fn test_batch_summary_zero_counts() {
        let totals = SwingTotals::default();
        assert_eq!(
            summarize_batch(&totals, 3),
            "Analyzed 3 games with Stockfish cloud evaluations: no significant swings detected."
        );
    }

    #[test]
    fn test_batch_summary_counts_and_plurals() {
        let totals = SwingTotals { blunders: 1, mistakes: 2, inaccuracies: 0 };
        assert_eq!(
            summarize_batch(&totals, 1),
            "Analyzed 1 game with Stockfish cloud evaluations: 1 blunder swing, 2 mistake swings."
        );
    }

    #[test]
    fn test_batch_summary_keeps_category_keywords_matchable() {
        let totals = SwingTotals { blunders: 2, mistakes: 1, inaccuracies: 5 };
        let text = summarize_batch(&totals, 4).to_lowercase();
        assert!(text.contains("blunder"));
        assert!(text.contains("mistake"));
        assert!(text.contains("inaccuracy"));
        assert!(text.contains("stockfish"));
    }
}
