use reqwest::Client;
use serde_json::Value;

use chess_insight::eval::{mate_to_cp, PlyEvaluation, MATE_SENTINEL_CP};

/// Client for the cloud Stockfish evaluation service.
///
/// Built once at startup and injected into handlers; nothing in the
/// request path constructs its own HTTP client.
#[derive(Clone)]
pub struct EvalClient {
    client: Client,
    base_url: String,
}

impl EvalClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .user_agent("RidgelineChess/1.0")
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Request evaluations for every position of a game.
    /// One POST per game; the response is NDJSON with one object per ply.
    pub async fn evaluate_game(&self, pgn: &str) -> Result<Vec<PlyEvaluation>, String> {
        let resp = self
            .client
            .post(&self.base_url)
            .header("Content-Type", "application/x-chess-pgn")
            .header("Accept", "application/x-ndjson")
            .body(pgn.to_string())
            .send()
            .await
            .map_err(|e| format!("Request error: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("HTTP {}", resp.status()));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| format!("Body read error: {e}"))?;

        Ok(decode_eval_lines(&text))
    }
}

/// Decode an NDJSON evaluation body into per-ply evaluations.
/// Unparsable lines are skipped with a warning; entries with no usable
/// score are dropped silently. The ply fallback is the 1-based position
/// of the line in the body.
pub fn decode_eval_lines(body: &str) -> Vec<PlyEvaluation> {
    let mut evals = Vec::new();

    for (index, line) in body.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(entry) => {
                if let Some(eval) = decode_eval_entry(&entry, index as u32 + 1) {
                    evals.push(eval);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to parse evaluation JSON line: {e}");
            }
        }
    }

    evals
}

/// Decode one evaluation entry. The score lives in `pvs[0]` as `cp`
/// and/or `mate`; `mate` wins when both are present and is folded onto
/// the sentinel centipawn scale. Entries carrying neither are unusable.
///
/// Wire values are not trusted: a ply that does not fit `u32` falls back
/// to line order, a `cp` that does not fit `i32` makes the entry
/// unusable, and anything past the mate sentinels clamps onto them.
pub fn decode_eval_entry(entry: &Value, fallback_ply: u32) -> Option<PlyEvaluation> {
    let ply = entry
        .get("ply")
        .and_then(Value::as_u64)
        .and_then(|p| u32::try_from(p).ok())
        .unwrap_or(fallback_ply);

    let pv = entry
        .get("pvs")
        .and_then(Value::as_array)
        .and_then(|pvs| pvs.first());

    let (cp, mate) = match pv {
        Some(pv) => (
            pv.get("cp").and_then(Value::as_i64),
            pv.get("mate").and_then(Value::as_i64),
        ),
        None => (None, None),
    };

    let centipawns = match (cp, mate) {
        (_, Some(mate)) => mate_to_cp(mate),
        (Some(cp), None) => i32::try_from(cp)
            .ok()?
            .clamp(-MATE_SENTINEL_CP, MATE_SENTINEL_CP),
        (None, None) => return None,
    };

    Some(PlyEvaluation { ply, centipawns })
}
