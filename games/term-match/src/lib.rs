use wasm_bindgen::prelude::*;
use lexi_engine::*;

pub mod board;
pub mod game;
use game::TermMatch;

lexi_web::export_game!(TermMatch, "term-match");
