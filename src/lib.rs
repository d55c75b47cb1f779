//! Live section synchronization engine for the storefront preview iframe.
//!
//! The editor runs in the parent frame and posts sparse, typed updates on
//! every keystroke; this crate applies them as targeted DOM mutations
//! keyed by stable markers in the markup — no virtual DOM, no re-render.
//! See `channel` for the message shapes, `patchers` for the per-type
//! appliers, `placeholder` for not-yet-persisted sections.

mod channel;
mod config;
mod dom;
mod messages;
mod models;
mod patchers;
mod placeholder;
mod sections;
mod styles;
mod theme;
mod util;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    channel::start();
}
