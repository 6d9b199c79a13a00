//! Rule-based training tips derived from analysis summary text.
//!
//! No model calls here: a fixed keyword catalog drives everything, so the
//! output is fully deterministic and cheap to golden-test.

use serde::Serialize;

/// Upper bound on tips returned for one summary.
pub const MAX_TIPS: usize = 4;

/// Training theme a tip belongs to. Each theme owns exactly one icon, so
/// rendering never has to fall back on a missing-key branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TipTopic {
    Tactics,
    Calculation,
    Openings,
    EngineStudy,
    General,
}

impl TipTopic {
    pub fn icon(&self) -> &'static str {
        match self {
            TipTopic::Tactics => "zap",
            TipTopic::Calculation => "alert-triangle",
            TipTopic::Openings => "book-open",
            TipTopic::EngineStudy => "cpu",
            TipTopic::General => "trending-up",
        }
    }

    /// Parse a topic label coming from stored data or a client. Anything
    /// unrecognized lands on `General` rather than erroring.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "tactics" => TipTopic::Tactics,
            "calculation" => TipTopic::Calculation,
            "openings" => TipTopic::Openings,
            "engine_study" | "engine study" => TipTopic::EngineStudy,
            _ => TipTopic::General,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Tip {
    pub topic: TipTopic,
    pub icon: &'static str,
    pub text: &'static str,
}

/// Keyword catalog, checked in order. Order is part of the contract:
/// the blunder tip always precedes the mistake tip when both match.
const TIP_CATALOG: [(&str, TipTopic, &str); 4] = [
    (
        "blunder",
        TipTopic::Tactics,
        "Your games contain outright blunders. Drill tactical puzzles daily so hanging pieces and mating threats jump out before you commit to a move.",
    ),
    (
        "mistake",
        TipTopic::Calculation,
        "Serious mistakes crept into these games. Slow down at critical moments and re-check every capture, check, and threat before moving.",
    ),
    (
        "inaccuracy",
        TipTopic::Openings,
        "Small inaccuracies are adding up. Review the openings you reach most often and learn the typical middlegame plans behind them.",
    ),
    (
        "stockfish",
        TipTopic::EngineStudy,
        "Step through the engine's suggested lines move by move instead of only reading the final evaluation number.",
    ),
];

const FALLBACK_TEXT: &str =
    "Keep playing and reviewing complete games. Consistent post-game analysis is the fastest road to improvement.";

/// Produce tips for a summary string. Case-insensitive substring matching
/// against the catalog, capped at `MAX_TIPS`, never empty.
pub fn tips_for(summary: &str) -> Vec<Tip> {
    let haystack = summary.to_lowercase();

    let mut tips: Vec<Tip> = TIP_CATALOG
        .iter()
        .filter(|(keyword, _, _)| haystack.contains(keyword))
        .map(|&(_, topic, text)| Tip { topic, icon: topic.icon(), text })
        .collect();

    tips.truncate(MAX_TIPS);

    if tips.is_empty() {
        let topic = TipTopic::General;
        tips.push(Tip { topic, icon: topic.icon(), text: FALLBACK_TEXT });
    }

    tips
}
