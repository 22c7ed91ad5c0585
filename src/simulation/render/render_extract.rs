//! Render extraction - repack the current buffer as 0xAABBGGRR colors
//! for the JS host to upload without copying.

use super::SimulatorCore;

pub(super) fn extract_colors(core: &mut SimulatorCore) -> *const u32 {
    let SimulatorCore {
        buffers, render, ..
    } = core;
    let grid = buffers.current();
    let colors = &mut render.colors;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        colors
            .par_iter_mut()
            .enumerate()
            .for_each(|(idx, color)| *color = grid.get(idx).packed_color());
    }

    #[cfg(not(feature = "parallel"))]
    {
        colors
            .iter_mut()
            .enumerate()
            .for_each(|(idx, color)| *color = grid.get(idx).packed_color());
    }

    colors.as_ptr()
}
