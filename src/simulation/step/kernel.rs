use crate::core::grid::Grid;
use crate::domain::cell::Cell;
use crate::systems::lifecycle::{self, LifecycleContext};
use crate::systems::movement::{self, Neighborhood};

/// Compute the committed value for one cell index: movement candidate
/// from the read-only source grid, then lifecycle post-processing.
/// Pure - every write goes to the caller's staging slot.
#[inline]
pub(super) fn update_cell(src: &Grid, ctx: &LifecycleContext, idx: usize, mirror: i32) -> Cell {
    let (x, y) = src.coords(idx);
    let hood = Neighborhood::fetch(src, x as i32, y as i32, mirror);
    let candidate = movement::resolve(&hood);
    lifecycle::apply(ctx, x, y, hood.self_cell, candidate)
}
