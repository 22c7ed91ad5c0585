//! Ping/pong buffer pair
//!
//! Two equally shaped grids exist at all times; exactly one is current
//! (readable) and the other is staging (write-only during a step). A step
//! reads only from current and writes only to staging, then the roles
//! swap. The pair is identified by an explicit slot index, not a boolean
//! toggle, so the swap is a single place in the code.

use crate::core::grid::Grid;

pub struct BufferPair {
    grids: [Grid; 2],
    current: usize,
}

impl BufferPair {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grids: [Grid::new(width, height), Grid::new(width, height)],
            current: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.grids[0].width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.grids[0].height()
    }

    /// The authoritative, readable-this-step grid.
    #[inline]
    pub fn current(&self) -> &Grid {
        &self.grids[self.current]
    }

    /// Mutable access to the current grid. Only for between-step
    /// commands (seeding, clearing); never called mid-step.
    #[inline]
    pub fn current_mut(&mut self) -> &mut Grid {
        &mut self.grids[self.current]
    }

    /// Borrow (current, staging) for one step's read/write pass.
    #[inline]
    pub fn split(&mut self) -> (&Grid, &mut Grid) {
        let (a, b) = self.grids.split_at_mut(1);
        if self.current == 0 {
            (&a[0], &mut b[0])
        } else {
            (&b[0], &mut a[0])
        }
    }

    /// Swap current and staging. Call after every cell of the step has
    /// committed - the full barrier between steps.
    #[inline]
    pub fn swap(&mut self) {
        self.current = 1 - self.current;
    }

    /// Reset both grids to Air.
    pub fn fill_air(&mut self) {
        self.grids[0].fill_air();
        self.grids[1].fill_air();
    }
}
