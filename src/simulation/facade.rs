use wasm_bindgen::prelude::*;

use crate::domain::config::{SimConfig, StepParams};

use super::SimulatorCore;

#[wasm_bindgen]
pub struct AbiLayout {
    kinds_ptr: u32,
    kinds_len_elements: u32,
    kinds_len_bytes: u32,
    luminance_ptr: u32,
    luminance_len_elements: u32,
    luminance_len_bytes: u32,
    ttl_ptr: u32,
    ttl_len_elements: u32,
    ttl_len_bytes: u32,
    colors_ptr: u32,
    colors_len_elements: u32,
    colors_len_bytes: u32,
}

#[wasm_bindgen]
impl AbiLayout {
    #[wasm_bindgen(getter)]
    pub fn kinds_ptr(&self) -> u32 { self.kinds_ptr }
    #[wasm_bindgen(getter)]
    pub fn kinds_len_elements(&self) -> u32 { self.kinds_len_elements }
    #[wasm_bindgen(getter)]
    pub fn kinds_len_bytes(&self) -> u32 { self.kinds_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn luminance_ptr(&self) -> u32 { self.luminance_ptr }
    #[wasm_bindgen(getter)]
    pub fn luminance_len_elements(&self) -> u32 { self.luminance_len_elements }
    #[wasm_bindgen(getter)]
    pub fn luminance_len_bytes(&self) -> u32 { self.luminance_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn ttl_ptr(&self) -> u32 { self.ttl_ptr }
    #[wasm_bindgen(getter)]
    pub fn ttl_len_elements(&self) -> u32 { self.ttl_len_elements }
    #[wasm_bindgen(getter)]
    pub fn ttl_len_bytes(&self) -> u32 { self.ttl_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn colors_ptr(&self) -> u32 { self.colors_ptr }
    #[wasm_bindgen(getter)]
    pub fn colors_len_elements(&self) -> u32 { self.colors_len_elements }
    #[wasm_bindgen(getter)]
    pub fn colors_len_bytes(&self) -> u32 { self.colors_len_bytes }
}

#[wasm_bindgen]
pub struct Simulator {
    core: SimulatorCore,
}

#[wasm_bindgen]
impl Simulator {
    /// Create a simulator with given grid dimensions
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<Simulator, JsValue> {
        let core = SimulatorCore::new(width, height).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn sand_count(&self) -> u32 { self.core.sand_count() }

    #[wasm_bindgen(getter)]
    pub fn cell_count(&self) -> usize { self.core.cell_count() }

    #[wasm_bindgen(getter)]
    pub fn field_count(&self) -> usize { self.core.field_count() }

    /// Run one simulation step
    pub fn step(
        &mut self,
        delta_time: f32,
        is_capturing: bool,
        is_clearing: bool,
        field_index: i32,
    ) {
        self.core.step(StepParams {
            delta_time,
            is_capturing,
            is_clearing,
            field_index,
        });
    }

    /// Run the substeps for one rendered frame at the configured fixed
    /// simulation rate; returns the number of substeps executed
    pub fn run_frame(
        &mut self,
        delta_time: f32,
        is_capturing: bool,
        is_clearing: bool,
        field_index: i32,
    ) -> u32 {
        self.core
            .run_frame(delta_time, is_capturing, is_clearing, field_index)
    }

    /// Hold ttl constant instead of decaying it (stress/testing mode)
    pub fn set_ignore_ttl(&mut self, ignore: bool) {
        self.core.set_ignore_ttl(ignore);
    }

    pub fn load_sim_config(&mut self, json: String) -> Result<(), JsValue> {
        let config = SimConfig::from_json(&json).map_err(|e| JsValue::from_str(&e))?;
        self.core.set_config(config);
        Ok(())
    }

    pub fn load_field_bundle(&mut self, json: String) -> Result<(), JsValue> {
        self.core
            .load_field_bundle_json(&json)
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(())
    }

    pub fn get_field_manifest_json(&self) -> String {
        self.core.field_manifest_json()
    }

    /// Upload a fresh RGBA8 camera frame
    pub fn update_capture_frame(
        &mut self,
        rgba: &[u8],
        width: u32,
        height: u32,
    ) -> Result<(), JsValue> {
        self.core
            .set_capture_frame(rgba, width, height)
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(())
    }

    /// Place one grain of sand (between steps)
    pub fn deposit_sand(&mut self, x: u32, y: u32, luminance: f32, ttl: f32) -> bool {
        self.core.deposit_sand(x, y, luminance, ttl)
    }

    /// Reset the whole grid to Air
    pub fn clear_all(&mut self) {
        self.core.clear_all();
    }

    // === Normalized sampling (clamped, current buffer) ===

    pub fn sample_kind(&self, u: f32, v: f32) -> u8 {
        self.core.sample(u, v).kind as u8
    }

    pub fn sample_luminance(&self, u: f32, v: f32) -> f32 {
        self.core.sample(u, v).luminance
    }

    pub fn sample_ttl(&self, u: f32, v: f32) -> f32 {
        self.core.sample(u, v).ttl
    }

    // === Zero-copy render interop ===

    /// Repack the current buffer into the colors array; returns its pointer
    pub fn extract_colors(&mut self) -> *const u32 {
        self.core.extract_colors()
    }

    pub fn colors_ptr(&self) -> *const u32 {
        self.core.colors_ptr()
    }

    pub fn colors_len(&self) -> usize {
        self.core.colors_len()
    }

    pub fn colors_len_bytes(&self) -> usize {
        self.core.colors_len_bytes()
    }

    /// Pointer to the current buffer's kinds array (u8 per cell)
    pub fn kinds_ptr(&self) -> *const u8 {
        self.core.kinds_ptr()
    }

    pub fn luminance_ptr(&self) -> *const f32 {
        self.core.luminance_ptr()
    }

    pub fn ttl_ptr(&self) -> *const f32 {
        self.core.ttl_ptr()
    }

    pub fn abi_layout(&self) -> AbiLayout {
        let data = self.core.abi_layout_data();
        AbiLayout {
            kinds_ptr: data.kinds_ptr as u32,
            kinds_len_elements: data.kinds_len_elements as u32,
            kinds_len_bytes: data.kinds_len_bytes as u32,
            luminance_ptr: data.luminance_ptr as u32,
            luminance_len_elements: data.luminance_len_elements as u32,
            luminance_len_bytes: data.luminance_len_bytes as u32,
            ttl_ptr: data.ttl_ptr as u32,
            ttl_len_elements: data.ttl_len_elements as u32,
            ttl_len_bytes: data.ttl_len_bytes as u32,
            colors_ptr: data.colors_ptr as u32,
            colors_len_elements: data.colors_len_elements as u32,
            colors_len_bytes: data.colors_len_bytes as u32,
        }
    }
}
