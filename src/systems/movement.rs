//! Movement rule - resolves one cell's candidate next state from its
//! neighborhood in the read-only source grid.
//!
//! Every neighbor is fetched through one shared lookup that multiplies
//! the x-offset by a per-step mirror factor: even steps read sides in
//! natural left-to-right order, odd steps mirror it. Without the
//! alternation the first-checked diagonal wins every tie and the pile
//! drifts sideways.
//!
//! The two tie-break predicates below are deliberately asymmetric in
//! where they look for "support" (intake checks below the source side,
//! release checks the up-diagonal on the destination side). They are
//! exact mirror images of each other through the shared lookup; changing
//! either one alone duplicates or destroys grains, because a vacating
//! cell and its receiving neighbor decide independently and must agree.

use crate::core::grid::Grid;
use crate::domain::cell::{Cell, CellKind};

/// +1 reads sides in natural order, -1 mirrors left/right.
#[inline]
pub fn mirror_factor(step: u64) -> i32 {
    if step & 1 == 0 {
        1
    } else {
        -1
    }
}

/// The cells the rule looks at, already fetched through the mirrored
/// toroidal lookup. "up" is +y: sand falls toward y = 0.
pub struct Neighborhood {
    pub self_cell: Cell,
    pub up: Cell,
    pub down: Cell,
    pub left: Cell,
    pub right: Cell,
    pub right_up: Cell,
    pub left_down: Cell,
}

impl Neighborhood {
    pub fn fetch(grid: &Grid, x: i32, y: i32, mirror: i32) -> Self {
        let pick =
            |dx: i32, dy: i32| -> Cell { grid.get(grid.wrap_index(x + dx * mirror, y + dy)) };
        Self {
            self_cell: pick(0, 0),
            up: pick(0, 1),
            down: pick(0, -1),
            left: pick(-1, 0),
            right: pick(1, 0),
            right_up: pick(1, 1),
            left_down: pick(-1, -1),
        }
    }
}

/// One cell's candidate next state.
pub fn resolve(hood: &Neighborhood) -> Cell {
    let mut next = hood.self_cell;

    if hood.self_cell.is_air_like() {
        // Intake: straight fall has priority over the diagonal slide-in.
        if hood.up.kind == CellKind::Sand {
            next = hood.up;
        } else if hood.left.kind == CellKind::Sand
            && !hood.left_down.is_air_like()
            && hood.up.is_air_like()
        {
            // The side grain rests on support (it is not about to fall
            // straight down itself) and nothing hangs directly overhead.
            next = hood.left;
        }
    } else if hood.self_cell.kind == CellKind::Sand {
        // Release: the matching cell below/beside copies us in this same
        // step, so the predicates here mirror the intake ones above.
        if hood.down.is_air_like() {
            next = Cell::AIR;
        } else if hood.right.is_air_like()
            && !hood.down.is_air_like()
            && hood.right_up.is_air_like()
        {
            next = Cell::AIR;
        }
    }
    // Wall and Sink never move.

    // A sink destroys inbound sand: the grain conceptually enters the
    // sink cell for this step and is annihilated instead of shown.
    if next.kind == CellKind::Sand && hood.self_cell.kind == CellKind::Sink {
        next = hood.self_cell;
    }

    next
}
