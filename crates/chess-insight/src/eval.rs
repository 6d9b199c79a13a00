//! Evaluation primitives shared by the classifier and the wire decoders.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel magnitude for forced-mate scores, in centipawns.
/// Mate evaluations are folded onto the centipawn scale before any
/// classification happens, so downstream code only sees numbers.
pub const MATE_SENTINEL_CP: i32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The side that played a given half-move. Plies are 1-indexed,
    /// odd plies are White's.
    pub fn from_ply(ply: u32) -> Self {
        if ply % 2 == 1 {
            Color::White
        } else {
            Color::Black
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Engine evaluation of the position reached after one half-move,
/// always from White's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlyEvaluation {
    pub ply: u32,
    pub centipawns: i32,
}

/// Map a mate-in-N score onto the centipawn scale.
pub fn mate_to_cp(mate: i64) -> i32 {
    if mate > 0 {
        MATE_SENTINEL_CP
    } else {
        -MATE_SENTINEL_CP
    }
}
