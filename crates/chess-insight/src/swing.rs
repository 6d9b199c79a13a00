//! Evaluation swing detection. Pure functions only, no I/O.
//!
//! Consumes per-ply evaluations (White's perspective) and flags the moves
//! where a player gave away a significant amount of advantage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::eval::{Color, PlyEvaluation};

/// Classification thresholds (centipawn loss, inclusive lower bounds)
const THRESHOLD_BLUNDER: i32 = 200;
const THRESHOLD_MISTAKE: i32 = 100;
const THRESHOLD_INACCURACY: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwingCategory {
    Blunder,
    Mistake,
    Inaccuracy,
}

impl SwingCategory {
    /// Icon identifier used by dashboard cards.
    pub fn icon(&self) -> &'static str {
        match self {
            SwingCategory::Blunder => "zap",
            SwingCategory::Mistake => "alert-triangle",
            SwingCategory::Inaccuracy => "help-circle",
        }
    }
}

impl fmt::Display for SwingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SwingCategory::Blunder => "Blunder",
            SwingCategory::Mistake => "Mistake",
            SwingCategory::Inaccuracy => "Inaccuracy",
        };
        write!(f, "{label}")
    }
}

/// Classify a mover's own centipawn loss. Most severe bucket first;
/// losses under the inaccuracy threshold are not events at all.
pub fn classify_loss(cp_loss: i32) -> Option<SwingCategory> {
    if cp_loss >= THRESHOLD_BLUNDER {
        Some(SwingCategory::Blunder)
    } else if cp_loss >= THRESHOLD_MISTAKE {
        Some(SwingCategory::Mistake)
    } else if cp_loss >= THRESHOLD_INACCURACY {
        Some(SwingCategory::Inaccuracy)
    } else {
        None
    }
}

/// One flagged move: who lost how much, and what the eval did.
/// Evaluations stay in White's perspective; `centipawn_loss` is from the
/// mover's own point of view and is never negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignificantSwing {
    pub ply: u32,
    pub player: Color,
    pub move_number: u32,
    pub category: SwingCategory,
    pub centipawn_loss: i32,
    pub eval_before: i32,
    pub eval_after: i32,
}

/// Classifier output for one game. `swings` is ordered by ply; an empty
/// list means the game was clean by these thresholds (or there was
/// nothing to score).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub swings: Vec<SignificantSwing>,
    pub moves_scored: u32,
    pub total_centipawn_loss: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingTotals {
    pub blunders: u32,
    pub mistakes: u32,
    pub inaccuracies: u32,
}

impl SwingTotals {
    pub fn merge(&mut self, other: &SwingTotals) {
        self.blunders += other.blunders;
        self.mistakes += other.mistakes;
        self.inaccuracies += other.inaccuracies;
    }

    pub fn total(&self) -> u32 {
        self.blunders + self.mistakes + self.inaccuracies
    }
}

impl AnalysisReport {
    pub fn is_clean(&self) -> bool {
        self.swings.is_empty()
    }

    pub fn totals(&self) -> SwingTotals {
        let mut totals = SwingTotals::default();
        for swing in &self.swings {
            match swing.category {
                SwingCategory::Blunder => totals.blunders += 1,
                SwingCategory::Mistake => totals.mistakes += 1,
                SwingCategory::Inaccuracy => totals.inaccuracies += 1,
            }
        }
        totals
    }

    /// Mean own-loss per scored move, in centipawns.
    pub fn average_centipawn_loss(&self) -> f64 {
        if self.moves_scored == 0 {
            return 0.0;
        }
        self.total_centipawn_loss as f64 / self.moves_scored as f64
    }

    /// Accuracy score on a 0..100 scale, one decimal place.
    pub fn accuracy(&self) -> f64 {
        let score = (100.0 - self.average_centipawn_loss() / 2.0).max(0.0);
        (score * 10.0).round() / 10.0
    }
}

/// Walk the evaluation sequence and flag every significant swing.
///
/// The provider reports the position after each ply. The first diff is
/// anchored to the level starting position via a synthetic `{ply: 0, cp: 0}`
/// record, unless the feed already begins with a ply-0 entry. Input order is
/// taken as given: entries are not sorted or deduplicated, so a feed that
/// violates the strictly-increasing-ply contract produces garbage diffs
/// rather than an error.
pub fn classify(evals: &[PlyEvaluation]) -> AnalysisReport {
    let mut report = AnalysisReport::default();
    let Some(first) = evals.first() else {
        return report;
    };

    let baseline = PlyEvaluation { ply: 0, centipawns: 0 };
    let (mut prev, rest) = if first.ply >= 1 {
        (baseline, evals)
    } else {
        (*first, &evals[1..])
    };

    for &curr in rest {
        let player = Color::from_ply(curr.ply);
        // Raw delta is the change in White's advantage; the mover's own
        // loss flips sign for Black. Sign handling here is load-bearing.
        let delta = prev.centipawns - curr.centipawns;
        let cp_loss = match player {
            Color::White => delta,
            Color::Black => -delta,
        };

        report.moves_scored += 1;
        report.total_centipawn_loss += i64::from(cp_loss.max(0));

        if let Some(category) = classify_loss(cp_loss) {
            report.swings.push(SignificantSwing {
                ply: curr.ply,
                player,
                move_number: (curr.ply + 1) / 2,
                category,
                centipawn_loss: cp_loss,
                eval_before: prev.centipawns,
                eval_after: curr.centipawns,
            });
        }

        prev = curr;
    }

    report
}
