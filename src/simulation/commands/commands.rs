//! Between-step commands. These mutate the current buffer directly and
//! must never run while a step is in flight; the step pass itself stays
//! the only mid-step write path.

use crate::domain::cell::{Cell, CellKind};

use super::SimulatorCore;

/// Place one grain into an Air cell. Returns false when the coordinate
/// is out of bounds or the cell is occupied.
pub(super) fn deposit_sand(
    core: &mut SimulatorCore,
    x: u32,
    y: u32,
    luminance: f32,
    ttl: f32,
) -> bool {
    let grid = core.buffers.current_mut();
    if x >= grid.width() || y >= grid.height() {
        return false;
    }
    let idx = grid.index(x, y);
    if grid.get(idx).kind != CellKind::Air {
        return false;
    }
    grid.set(idx, Cell::sand(luminance.clamp(0.0, 1.0), ttl.max(0.0)));
    true
}

pub(super) fn clear_all(core: &mut SimulatorCore) {
    core.buffers.fill_air();
}
