use wasm_bindgen::prelude::*;
use lexi_engine::*;

pub mod board;
pub mod game;
pub mod session;
pub mod snapshot;
use game::SpellTiles;

lexi_web::export_game!(SpellTiles, "spell-tiles");
