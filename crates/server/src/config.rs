use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub eval_api_url: String,
    pub lichess_api_url: String,
    pub max_deep_games: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            eval_api_url: env::var("EVAL_API_URL")
                .unwrap_or_else(|_| "https://lichess.org/api/cloud-eval".to_string()),
            lichess_api_url: env::var("LICHESS_API_URL")
                .unwrap_or_else(|_| "https://lichess.org/api".to_string()),
            max_deep_games: env::var("MAX_DEEP_GAMES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(25)
                .max(1),
        }
    }
}
