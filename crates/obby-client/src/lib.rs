//! Browser host for the obby runtime: turns a running game into canvas draw calls and
//! wires DOM input and page callbacks into it.

pub mod bridge;
#[cfg(target_family = "wasm")]
pub mod canvas;
mod diag;
pub mod host;
pub mod renderer;
pub mod scene;
pub mod theme;

use wasm_bindgen::prelude::*;

pub use renderer::Renderer;
pub use scene::{DrawCommand, Layer, Paint, Scene, Shape};
pub use theme::Theme;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        if let Err(e) = host::launch() {
            diag::console_warn!("Failed to start obby: {e:?}");
        }
    }
}
