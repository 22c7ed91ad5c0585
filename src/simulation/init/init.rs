use std::sync::Arc;

use crate::core::buffers::BufferPair;
use crate::core::image::CaptureImage;
use crate::domain::config::SimConfig;
use crate::domain::fields::FieldCatalog;

use super::{RenderBuffers, SimulatorCore};

pub(super) fn create_simulator_core(width: u32, height: u32) -> Result<SimulatorCore, String> {
    if width == 0 || height == 0 {
        return Err(format!(
            "grid dimensions must be non-zero, got {}x{}",
            width, height
        ));
    }

    // The capture image starts black at grid size; the host replaces it
    // with real camera frames via set_capture_frame.
    let capture = CaptureImage::new(width, height)?;

    Ok(SimulatorCore {
        fields: Arc::new(FieldCatalog::builtin()),
        config: SimConfig::default(),
        buffers: BufferPair::new(width, height),
        capture,
        render: RenderBuffers {
            colors: vec![0u32; (width * height) as usize],
        },
        frame: 0,
    })
}
