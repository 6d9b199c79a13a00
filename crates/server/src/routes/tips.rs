use axum::Json;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use chess_insight::tips;

#[derive(Deserialize)]
pub struct TipsRequest {
    pub summary: String,
}

/// POST /api/tips
/// Summary text in, canned training tips out. The generator guarantees
/// at least one tip, so an empty summary still gets the fallback.
pub async fn get_tips(Json(req): Json<TipsRequest>) -> Json<JsonValue> {
    let tips = tips::tips_for(&req.summary);

    Json(serde_json::json!({
        "tips": tips,
        "count": tips.len(),
    }))
}
