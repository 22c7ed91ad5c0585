//! Sandfall Engine - camera-driven falling-sand kernel in WASM
//!
//! A toroidal 2-D cellular automaton advanced by a data-parallel
//! per-cell rule over a double-buffered grid, periodically reseeded from
//! a live camera image and from procedural obstacle presets.
//!
//! Architecture:
//! - core/       - grid storage, ping/pong buffers, capture image
//! - domain/     - cell model, field presets, configuration
//! - systems/    - movement rule and lifecycle effects
//! - simulation/ - orchestration core and the wasm facade

// Utils with safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod simulation;
pub mod systems;

pub use domain::cell::{Cell, CellKind};
pub use domain::config::{SimConfig, StepParams};
pub use domain::fields::{FieldCatalog, FieldPreset, Stroke, StrokeKind, FIELD_COUNT};
pub use simulation::{AbiLayout, Simulator, SimulatorCore};

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🦀 Sandfall WASM engine initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Export cell-kind constants for JS
#[wasm_bindgen]
pub fn kind_air() -> u8 { CellKind::Air as u8 }
#[wasm_bindgen]
pub fn kind_sand() -> u8 { CellKind::Sand as u8 }
#[wasm_bindgen]
pub fn kind_wall() -> u8 { CellKind::Wall as u8 }
#[wasm_bindgen]
pub fn kind_sink() -> u8 { CellKind::Sink as u8 }
