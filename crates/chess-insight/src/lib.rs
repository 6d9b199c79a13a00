pub mod eval;
pub mod game_data;
pub mod pgn;
pub mod summary;
pub mod swing;
pub mod tips;
