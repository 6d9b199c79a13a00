pub mod eval_provider;
pub mod lichess;
