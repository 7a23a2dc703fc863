pub mod runner;

pub use runner::GameRunner;

/// A fresh RNG seed from the browser's `Math.random()`.
pub fn browser_seed() -> u64 {
    lexi_engine::Rng::from_unit_seed(js_sys::Math::random()).next_u64()
}

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers, data accessors)
///
/// The game type must provide `fn new(seed: u64) -> Self`.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use lexi_engine::*;
///
/// mod game;
/// use game::MyGame;
///
/// lexi_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `lexi_engine::Game`
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new($crate::browser_seed());
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_tile_tap(index: u32) {
            with_runner(|r| r.push_input(InputEvent::TileTap { index: index as usize }));
        }

        #[wasm_bindgen]
        pub fn game_slot_tap(index: u32) {
            with_runner(|r| r.push_input(InputEvent::SlotTap { index: index as usize }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        #[wasm_bindgen]
        pub fn game_text_input(kind: u32, text: &str) {
            with_runner(|r| r.push_input(InputEvent::Text { kind, text: text.to_string() }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_frame_buffer_ptr() -> *const f32 {
            with_runner(|r| r.frame_buffer_ptr())
        }

        #[wasm_bindgen]
        pub fn get_frame_buffer_len() -> u32 {
            with_runner(|r| r.frame_buffer_len())
        }

        #[wasm_bindgen]
        pub fn get_snapshot_json() -> String {
            with_runner(|r| r.snapshot_json())
        }

        #[wasm_bindgen]
        pub fn get_speech_text() -> String {
            with_runner(|r| r.speech_text())
        }

        #[wasm_bindgen]
        pub fn take_scores_json() -> String {
            with_runner(|r| r.take_scores_json())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }
    };
}
