//! Integration tests for the analysis handlers.
//!
//! Runs the handlers in-process against a scripted evaluation provider bound
//! to an ephemeral local port, so no live Stockfish service is needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Extension, Json, Router};
use serde_json::Value;

use server::clients::eval_provider::EvalClient;
use server::clients::lichess::LichessClient;
use server::config::Config;
use server::routes::analysis::{
    analyze_game, deep_analysis, AnalyzeGameRequest, DeepAnalysisRequest,
};

// ---------------------------------------------------------------------------
// Scripted evaluation provider
// ---------------------------------------------------------------------------

/// Cloud evaluations for Alice's game: two quiet moves, then a mistake.
const ALICE_EVALS: &str = r#"{"ply":1,"pvs":[{"cp":20}]}
{"ply":2,"pvs":[{"cp":15}]}
{"ply":3,"pvs":[{"cp":-180}]}"#;

const ALICE_PGN: &str = r#"[White "Alice"]
[Black "Boris"]
[Result "1-0"]

1. e4 e5 2. Nf3 Nc6 1-0"#;

const BORIS_PGN: &str = r#"[White "Boris"]
[Black "Carol"]
[Result "0-1"]

1. d4 d5 2. c4 e6 0-1"#;

/// The provider only knows Alice's game; every other PGN gets a 500.
async fn scripted_eval(body: String) -> (StatusCode, String) {
    if body.contains("Alice") {
        (StatusCode::OK, ALICE_EVALS.to_string())
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "engine offline".to_string())
    }
}

/// Bind the scripted provider on an ephemeral port and return its base URL.
async fn spawn_eval_provider() -> String {
    let app = Router::new().route("/", post(scripted_eval));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind scripted provider");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn test_config(eval_api_url: &str) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        eval_api_url: eval_api_url.to_string(),
        // Never contacted by these tests.
        lichess_api_url: "http://127.0.0.1:9".to_string(),
        max_deep_games: 25,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Deep analysis keeps going past unusable games: one game analyzed, one
/// provider failure and one unparsable PGN both counted as skipped, and the
/// aggregate totals built from the surviving game alone.
#[tokio::test]
async fn deep_analysis_skips_unusable_games_and_continues() {
    let base_url = spawn_eval_provider().await;
    let config = test_config(&base_url);
    let eval_client = EvalClient::new(&base_url);
    let lichess = LichessClient::new(&config.lichess_api_url);

    let req = DeepAnalysisRequest {
        pgns: Some(vec![
            ALICE_PGN.to_string(),
            BORIS_PGN.to_string(),
            "no usable chess content".to_string(),
        ]),
        username: None,
        max_games: None,
    };

    let Json(body) = deep_analysis(
        Extension(config),
        Extension(eval_client),
        Extension(lichess),
        Json(req),
    )
    .await
    .expect("Deep analysis should succeed");

    assert_eq!(body["gamesRequested"], 3);
    assert_eq!(body["gamesAnalyzed"], 1);
    assert_eq!(body["gamesSkipped"], 2);
    assert_eq!(body["totals"]["mistakes"], 1);
    assert_eq!(body["totals"]["blunders"], 0);
    assert_eq!(body["totals"]["inaccuracies"], 0);

    // Only the analyzed game shows up in the per-game digests.
    let digests = body["games"].as_array().unwrap();
    assert_eq!(digests.len(), 1);
    assert_eq!(digests[0]["id"], "game-1");
    assert_eq!(digests[0]["white"], "Alice");

    assert_eq!(
        body["summary"],
        "Analyzed 1 game with Stockfish cloud evaluations: 1 mistake swing."
    );
}

/// One game through the full handler: the swing carries SAN and icon, and
/// the loss math matches the scripted evaluations.
#[tokio::test]
async fn analyze_game_reports_swings_from_provider() {
    let base_url = spawn_eval_provider().await;
    let eval_client = EvalClient::new(&base_url);

    let Json(body) = analyze_game(
        Extension(eval_client),
        Json(AnalyzeGameRequest {
            pgn: ALICE_PGN.to_string(),
        }),
    )
    .await
    .expect("Analysis should succeed");

    assert_eq!(body["game"]["white"], "Alice");
    assert_eq!(body["game"]["moveCount"], 4);
    assert_eq!(body["movesScored"], 3);

    let swings = body["swings"].as_array().unwrap();
    assert_eq!(swings.len(), 1);
    assert_eq!(swings[0]["ply"], 3);
    assert_eq!(swings[0]["category"], "mistake");
    assert_eq!(swings[0]["icon"], "alert-triangle");
    assert_eq!(swings[0]["san"], "Nf3");
    assert_eq!(swings[0]["centipawnLoss"], 195);

    assert_eq!(body["averageCentipawnLoss"], 65.0);
    assert_eq!(body["accuracy"], 67.5);
}

/// An empty PGN is rejected before any provider call, with the detail
/// message the dashboard client shows.
#[tokio::test]
async fn analyze_game_rejects_empty_pgn() {
    // Points at a port that refuses connections; the handler must not get there.
    let eval_client = EvalClient::new("http://127.0.0.1:9");

    let result = analyze_game(
        Extension(eval_client),
        Json(AnalyzeGameRequest { pgn: String::new() }),
    )
    .await;

    let err = match result {
        Err(err) => err,
        Ok(_) => panic!("Empty PGN should be rejected"),
    };

    let resp = err.into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024)
        .await
        .expect("Failed to read error body");
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["detail"], "Could not retrieve analysis for this game.");
}
