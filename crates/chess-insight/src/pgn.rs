//! PGN parsing utilities, a lightweight regex-based parser.

use regex::Regex;

use crate::game_data::{GameData, GameMetadata};

const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a PGN string into a GameData struct.
/// Returns None for empty input, move-less PGNs, and games that start
/// from a non-standard position (the evaluation pipeline assumes the
/// standard starting position).
pub fn parse_pgn(pgn: &str) -> Option<GameData> {
    // Extract headers
    let header_re = Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#).ok()?;

    let mut white = "Unknown".to_string();
    let mut black = "Unknown".to_string();
    let mut result = "*".to_string();
    let mut date = None;
    let mut time_control = None;
    let mut eco = None;
    let mut opening = None;
    let mut white_elo = None;
    let mut black_elo = None;
    let mut setup = None;
    let mut fen = None;

    for cap in header_re.captures_iter(pgn) {
        let key = &cap[1];
        let value = cap[2].to_string();
        match key {
            "White" => white = value,
            "Black" => black = value,
            "Result" => result = value,
            "Date" | "UTCDate" => date = Some(value),
            "TimeControl" => time_control = Some(value),
            "ECO" => eco = Some(value),
            "Opening" => opening = Some(value),
            "WhiteElo" => white_elo = value.parse().ok(),
            "BlackElo" => black_elo = value.parse().ok(),
            "SetUp" => setup = Some(value),
            "FEN" => fen = Some(value),
            _ => {}
        }
    }

    // Filter non-standard positions
    if setup.as_deref() == Some("1") {
        if let Some(ref f) = fen {
            if f != STANDARD_START_FEN {
                return None;
            }
        }
    }

    let metadata = GameMetadata {
        white,
        black,
        result,
        date,
        time_control,
        eco,
        opening,
        white_elo,
        black_elo,
    };

    // Extract SAN moves
    let moves = extract_moves(pgn);
    if moves.is_empty() {
        return None;
    }

    Some(GameData {
        metadata,
        moves,
        pgn: pgn.to_string(),
    })
}

/// Extract SAN moves from PGN text (after removing headers, comments, variations).
fn extract_moves(pgn: &str) -> Vec<String> {
    // Remove headers
    let header_re = Regex::new(r"\[[^\]]*\]").unwrap();
    let no_headers = header_re.replace_all(pgn, "");

    // Remove comments
    let comment_re = Regex::new(r"\{[^}]*\}").unwrap();
    let no_comments = comment_re.replace_all(&no_headers, "");

    // Remove variations
    let variation_re = Regex::new(r"\([^)]*\)").unwrap();
    let no_variations = variation_re.replace_all(&no_comments, "");

    // Extract moves
    let move_re =
        Regex::new(r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|O-O-O|O-O").unwrap();

    move_re
        .find_iter(&no_variations)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pgn_basic() {
        let pgn = r#"[White "Player1"]
[Black "Player2"]
[Result "1-0"]
[Date "2025.01.15"]
[TimeControl "600"]

1. e4 e5 2. Nf3 Nc6 1-0"#;

        let game = parse_pgn(pgn).unwrap();
        assert_eq!(game.metadata.white, "Player1");
        assert_eq!(game.metadata.black, "Player2");
        assert_eq!(game.metadata.result, "1-0");
        assert_eq!(game.moves.len(), 4);
        assert_eq!(game.moves[0], "e4");
    }

    #[test]
    fn test_parse_pgn_elo_and_opening_headers() {
        let pgn = r#"[White "Player1"]
[Black "Player2"]
[Result "0-1"]
[WhiteElo "1500"]
[BlackElo "1603"]
[ECO "B20"]
[Opening "Sicilian Defense"]

1. e4 c5 0-1"#;

        let game = parse_pgn(pgn).unwrap();
        assert_eq!(game.metadata.white_elo, Some(1500));
        assert_eq!(game.metadata.black_elo, Some(1603));
        assert_eq!(game.metadata.eco.as_deref(), Some("B20"));
        assert_eq!(game.metadata.opening.as_deref(), Some("Sicilian Defense"));
    }

    #[test]
    fn test_parse_pgn_strips_comments_and_variations() {
        let pgn = r#"[White "A"]
[Black "B"]
[Result "1/2-1/2"]

1. d4 {queen's pawn} d5 (1... Nf6 2. c4) 2. c4 e6 1/2-1/2"#;

        let game = parse_pgn(pgn).unwrap();
        assert_eq!(game.moves, vec!["d4", "d5", "c4", "e6"]);
    }

    #[test]
    fn test_parse_pgn_rejects_empty_and_moveless_input() {
        assert!(parse_pgn("").is_none());
        assert!(parse_pgn("   \n  ").is_none());

        let headers_only = r#"[White "A"]
[Black "B"]
[Result "*"]"#;
        assert!(parse_pgn(headers_only).is_none());
    }

    #[test]
    fn test_parse_pgn_rejects_nonstandard_start() {
        let pgn = r#"[White "A"]
[Black "B"]
[SetUp "1"]
[FEN "8/8/8/8/8/4k3/4p3/4K3 b - - 0 1"]

1... Kd3 2. Kd1 e1=Q# 0-1"#;

        assert!(parse_pgn(pgn).is_none());
    }
}
