//! Simulator - double-buffered kernel orchestration
//!
//! `SimulatorCore` owns the ping/pong buffer pair, the field catalog and
//! the capture image, and runs the parallel per-cell pass. The wasm
//! facade in facade.rs wraps it for the JS host.
//!
//! One step: read every cell's neighborhood from the current buffer,
//! resolve movement, apply lifecycle effects, commit to the staging
//! buffer, swap. Cells never read the staging buffer mid-step.

use std::sync::Arc;

use crate::core::buffers::BufferPair;
use crate::core::image::CaptureImage;
use crate::domain::cell::{Cell, CellKind};
use crate::domain::config::{SimConfig, StepParams};
use crate::domain::fields::FieldCatalog;

#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/kernel.rs"]
mod kernel;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::{AbiLayout, Simulator};

pub(crate) struct AbiLayoutData {
    pub(crate) kinds_ptr: *const u8,
    pub(crate) kinds_len_elements: usize,
    pub(crate) kinds_len_bytes: usize,
    pub(crate) luminance_ptr: *const f32,
    pub(crate) luminance_len_elements: usize,
    pub(crate) luminance_len_bytes: usize,
    pub(crate) ttl_ptr: *const f32,
    pub(crate) ttl_len_elements: usize,
    pub(crate) ttl_len_bytes: usize,
    pub(crate) colors_ptr: *const u32,
    pub(crate) colors_len_elements: usize,
    pub(crate) colors_len_bytes: usize,
}

pub(crate) struct RenderBuffers {
    colors: Vec<u32>,
}

/// The simulation kernel: one instance per visible sand layer. Two
/// instances can coexist so the host can clear one off-screen and
/// cross-fade; nothing here is shared or global.
pub struct SimulatorCore {
    fields: Arc<FieldCatalog>,
    config: SimConfig,
    buffers: BufferPair,
    capture: CaptureImage,
    render: RenderBuffers,
    frame: u64,
}

impl SimulatorCore {
    /// Create a simulator. Fails on zero-sized dimensions - every uv
    /// conversion in the kernel divides by them.
    pub fn new(width: u32, height: u32) -> Result<Self, String> {
        init::create_simulator_core(width, height)
    }

    pub fn width(&self) -> u32 {
        self.buffers.width()
    }

    pub fn height(&self) -> u32 {
        self.buffers.height()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn cell_count(&self) -> usize {
        self.buffers.current().size()
    }

    /// Count of Sand cells in the current buffer.
    pub fn sand_count(&self) -> u32 {
        self.buffers
            .current()
            .kinds
            .iter()
            .filter(|k| **k == CellKind::Sand)
            .count() as u32
    }

    // === Settings ===

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SimConfig) {
        settings::set_config(self, config);
    }

    /// Hold ttl constant instead of decaying it (stress/testing mode).
    pub fn set_ignore_ttl(&mut self, ignore: bool) {
        settings::set_ignore_ttl(self, ignore);
    }

    pub fn load_field_bundle_json(&mut self, json: &str) -> Result<(), String> {
        settings::load_field_bundle_json(self, json)
    }

    pub fn field_manifest_json(&self) -> String {
        self.fields.manifest_json()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Replace the capture image with a fresh RGBA8 camera frame.
    pub fn set_capture_frame(
        &mut self,
        rgba: &[u8],
        width: u32,
        height: u32,
    ) -> Result<(), String> {
        self.capture.update_rgba(rgba, width, height)
    }

    // === Stepping ===

    /// Run one full parallel pass and swap the buffers.
    pub fn step(&mut self, params: StepParams) {
        step::step(self, params);
    }

    /// Run the substeps for one rendered frame at the configured fixed
    /// simulation rate. Only the first substep sees the real elapsed
    /// time and the one-shot capture/clear flags. Returns the number of
    /// substeps executed.
    pub fn run_frame(
        &mut self,
        delta_time: f32,
        is_capturing: bool,
        is_clearing: bool,
        field_index: i32,
    ) -> u32 {
        step::run_frame(self, delta_time, is_capturing, is_clearing, field_index)
    }

    // === Sampling ===

    /// Nearest cell at a normalized coordinate, clamped to the edge
    /// (display sampling does not wrap, unlike simulation lookups).
    pub fn sample(&self, u: f32, v: f32) -> Cell {
        let grid = self.buffers.current();
        grid.get(grid.sample_index(u, v))
    }

    /// Cell at an integer coordinate, toroidally wrapped.
    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        let grid = self.buffers.current();
        grid.get(grid.wrap_index(x, y))
    }

    // === Commands (between steps only) ===

    /// Place one grain of sand into an Air cell of the current buffer.
    pub fn deposit_sand(&mut self, x: u32, y: u32, luminance: f32, ttl: f32) -> bool {
        commands::deposit_sand(self, x, y, luminance, ttl)
    }

    /// Reset both buffers to all-Air.
    pub fn clear_all(&mut self) {
        commands::clear_all(self);
    }

    // === JS render interop ===

    /// Repack the current buffer into the colors array and return its
    /// pointer.
    pub fn extract_colors(&mut self) -> *const u32 {
        render_extract::extract_colors(self)
    }

    pub fn colors_ptr(&self) -> *const u32 {
        self.render.colors.as_ptr()
    }

    pub fn colors_len(&self) -> usize {
        self.render.colors.len()
    }

    pub fn colors_len_bytes(&self) -> usize {
        self.render.colors.len() * std::mem::size_of::<u32>()
    }

    /// Pointer to the current buffer's kinds array (u8 per cell).
    pub fn kinds_ptr(&self) -> *const u8 {
        self.buffers.current().kinds_ptr()
    }

    pub fn luminance_ptr(&self) -> *const f32 {
        self.buffers.current().luminance_ptr()
    }

    pub fn ttl_ptr(&self) -> *const f32 {
        self.buffers.current().ttl_ptr()
    }

    pub(crate) fn abi_layout_data(&self) -> AbiLayoutData {
        let cells = self.cell_count();
        AbiLayoutData {
            kinds_ptr: self.kinds_ptr(),
            kinds_len_elements: cells,
            kinds_len_bytes: cells,
            luminance_ptr: self.luminance_ptr(),
            luminance_len_elements: cells,
            luminance_len_bytes: cells * std::mem::size_of::<f32>(),
            ttl_ptr: self.ttl_ptr(),
            ttl_len_elements: cells,
            ttl_len_bytes: cells * std::mem::size_of::<f32>(),
            colors_ptr: self.colors_ptr(),
            colors_len_elements: self.colors_len(),
            colors_len_bytes: self.colors_len_bytes(),
        }
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
