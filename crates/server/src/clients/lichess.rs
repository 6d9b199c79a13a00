use reqwest::Client;
use serde_json::Value;

/// Client for the Lichess game-export API.
#[derive(Clone)]
pub struct LichessClient {
    client: Client,
    base_url: String,
}

impl LichessClient {
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

    /// Fetch recent rated games for a user from Lichess.
    /// Returns a list of (pgn, game_id) tuples, newest first.
    pub async fn fetch_user_games(
        &self,
        username: &str,
        max_games: usize,
    ) -> Result<Vec<(String, String)>, String> {
        let url = format!("{}/games/user/{}", self.base_url, username);

        let params = vec![
            ("pgnInJson", "true".to_string()),
            ("opening", "true".to_string()),
            ("rated", "true".to_string()),
            ("max", max_games.to_string()),
        ];

        let resp = self
            .client
            .get(&url)
            .query(&params)
            .header("Accept", "application/x-ndjson")
            .send()
            .await
            .map_err(|e| format!("Request error: {e}"))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err("User not found".to_string());
        }

        if !resp.status().is_success() {
            return Err(format!("HTTP {}", resp.status()));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| format!("Body read error: {e}"))?;

        let mut results = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<Value>(line) {
                Ok(game_data) => {
                    if let Some(pgn) = game_data.get("pgn").and_then(|v| v.as_str()) {
                        if !pgn.is_empty() {
                            let game_id = game_data
                                .get("id")
                                .and_then(|v| v.as_str())
                                .unwrap_or("")
                                .to_string();
                            results.push((pgn.to_string(), game_id));
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to parse Lichess game JSON: {e}");
                }
            }
        }

        Ok(results)
    }
}
