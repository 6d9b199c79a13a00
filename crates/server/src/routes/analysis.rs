use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use chess_insight::game_data::GameData;
use chess_insight::pgn;
use chess_insight::summary;
use chess_insight::swing::{self, AnalysisReport, SignificantSwing, SwingTotals};
use chess_insight::tips;

use crate::clients::eval_provider::EvalClient;
use crate::clients::lichess::LichessClient;
use crate::config::Config;
use crate::error::AppError;

const ANALYSIS_UNAVAILABLE: &str = "Could not retrieve analysis for this game.";

#[derive(Deserialize)]
pub struct AnalyzeGameRequest {
    pub pgn: String,
}

#[derive(Deserialize)]
pub struct DeepAnalysisRequest {
    /// Explicit PGNs to analyze
    pub pgns: Option<Vec<String>>,
    /// Or fetch the user's recent rated games from Lichess
    pub username: Option<String>,
    pub max_games: Option<usize>,
}

/// POST /api/analysis/game
pub async fn analyze_game(
    Extension(eval_client): Extension<EvalClient>,
    Json(req): Json<AnalyzeGameRequest>,
) -> Result<Json<JsonValue>, AppError> {
    // An empty or unusable PGN never reaches the evaluation step.
    let game = pgn::parse_pgn(&req.pgn)
        .ok_or_else(|| AppError::BadRequest(ANALYSIS_UNAVAILABLE.into()))?;

    let report = evaluate_and_classify(&eval_client, &game).await;
    let summary_text = summary::render_summary(&report);
    let tips = tips::tips_for(&summary_text);

    let swings: Vec<JsonValue> = report
        .swings
        .iter()
        .map(|s| swing_json(s, &game.moves))
        .collect();

    Ok(Json(serde_json::json!({
        "game": {
            "white": game.metadata.white,
            "black": game.metadata.black,
            "result": game.metadata.result,
            "date": game.metadata.date,
            "timeControl": game.metadata.time_control,
            "eco": game.metadata.eco,
            "opening": game.metadata.opening,
            "whiteElo": game.metadata.white_elo,
            "blackElo": game.metadata.black_elo,
            "moveCount": game.moves.len(),
        },
        "swings": swings,
        "totals": report.totals(),
        "movesScored": report.moves_scored,
        "averageCentipawnLoss": round1(report.average_centipawn_loss()),
        "accuracy": report.accuracy(),
        "summary": summary_text,
        "tips": tips,
        "generatedAt": chrono::Utc::now().to_rfc3339(),
    })))
}

/// POST /api/analysis/deep
/// Full pipeline over a set of games, strictly one game at a time. A game
/// that fails to parse or gets no evaluations is skipped; the rest continue.
pub async fn deep_analysis(
    Extension(config): Extension<Config>,
    Extension(eval_client): Extension<EvalClient>,
    Extension(lichess): Extension<LichessClient>,
    Json(req): Json<DeepAnalysisRequest>,
) -> Result<Json<JsonValue>, AppError> {
    let games = resolve_games(&config, &lichess, req).await?;
    let games_requested = games.len();

    let mut aggregate = SwingTotals::default();
    let mut games_analyzed = 0usize;
    let mut games_skipped = 0usize;
    let mut moves_scored: u64 = 0;
    let mut total_loss: i64 = 0;
    let mut game_digests = Vec::new();

    for (game_id, pgn_text) in &games {
        let Some(game) = pgn::parse_pgn(pgn_text) else {
            tracing::warn!(game_id = %game_id, "Skipping game with unusable PGN");
            games_skipped += 1;
            continue;
        };

        let report = evaluate_and_classify(&eval_client, &game).await;
        if report.moves_scored == 0 {
            tracing::warn!(game_id = %game_id, "No usable evaluations for game, skipping");
            games_skipped += 1;
            continue;
        }

        let totals = report.totals();
        aggregate.merge(&totals);
        moves_scored += u64::from(report.moves_scored);
        total_loss += report.total_centipawn_loss;
        games_analyzed += 1;

        game_digests.push(serde_json::json!({
            "id": game_id,
            "white": game.metadata.white,
            "black": game.metadata.black,
            "result": game.metadata.result,
            "totals": totals,
            "swings": totals.total(),
            "accuracy": report.accuracy(),
        }));
    }

    let average_loss = if moves_scored == 0 {
        0.0
    } else {
        total_loss as f64 / moves_scored as f64
    };

    let summary_text = summary::summarize_batch(&aggregate, games_analyzed);
    let tips = tips::tips_for(&summary_text);

    Ok(Json(serde_json::json!({
        "gamesRequested": games_requested,
        "gamesAnalyzed": games_analyzed,
        "gamesSkipped": games_skipped,
        "totals": aggregate,
        "averageCentipawnLoss": round1(average_loss),
        "summary": summary_text,
        "games": game_digests,
        "tips": tips,
        "generatedAt": chrono::Utc::now().to_rfc3339(),
    })))
}

// ---- Internal helpers ----

/// Resolve the deep-analysis request into (game_id, pgn) pairs, from
/// either the inline PGNs or a Lichess username. Exactly one source.
async fn resolve_games(
    config: &Config,
    lichess: &LichessClient,
    req: DeepAnalysisRequest,
) -> Result<Vec<(String, String)>, AppError> {
    match (req.pgns, req.username) {
        (Some(_), Some(_)) => Err(AppError::BadRequest(
            "Provide either pgns or username, not both".into(),
        )),
        (None, None) => Err(AppError::BadRequest(
            "Must provide pgns or a Lichess username".into(),
        )),
        (Some(pgns), None) => {
            if pgns.is_empty() {
                return Err(AppError::BadRequest("pgns must not be empty".into()));
            }
            let mut games: Vec<(String, String)> = pgns
                .into_iter()
                .enumerate()
                .map(|(i, pgn)| (format!("game-{}", i + 1), pgn))
                .collect();
            if games.len() > config.max_deep_games {
                tracing::info!(
                    requested = games.len(),
                    cap = config.max_deep_games,
                    "Capping deep analysis request"
                );
                games.truncate(config.max_deep_games);
            }
            Ok(games)
        }
        (None, Some(username)) => {
            let username = username.trim().to_string();
            if username.is_empty() {
                return Err(AppError::BadRequest("username must not be empty".into()));
            }
            let max_games = req.max_games.unwrap_or(10).clamp(1, config.max_deep_games);
            let fetched = lichess
                .fetch_user_games(&username, max_games)
                .await
                .map_err(|e| {
                    if e == "User not found" {
                        AppError::NotFound(format!("Lichess user '{username}' not found"))
                    } else {
                        AppError::Upstream(e)
                    }
                })?;
            Ok(fetched.into_iter().map(|(pgn, id)| (id, pgn)).collect())
        }
    }
}

/// Run one game through evaluate -> classify. A provider failure is
/// logged and treated as an empty evaluation list, so the caller sees a
/// report with nothing scored rather than an error.
async fn evaluate_and_classify(eval_client: &EvalClient, game: &GameData) -> AnalysisReport {
    let evals = match eval_client.evaluate_game(&game.pgn).await {
        Ok(evals) => evals,
        Err(e) => {
            tracing::warn!("Evaluation provider request failed: {e}");
            Vec::new()
        }
    };
    swing::classify(&evals)
}

fn swing_json(swing: &SignificantSwing, moves: &[String]) -> JsonValue {
    let san = (swing.ply as usize)
        .checked_sub(1)
        .and_then(|i| moves.get(i));

    serde_json::json!({
        "ply": swing.ply,
        "player": swing.player,
        "moveNumber": swing.move_number,
        "category": swing.category,
        "icon": swing.category.icon(),
        "centipawnLoss": swing.centipawn_loss,
        "evalBefore": swing.eval_before,
        "evalAfter": swing.eval_after,
        "san": san,
    })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
