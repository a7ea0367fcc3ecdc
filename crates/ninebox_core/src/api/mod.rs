pub mod board_json;

pub use board_json::*;
