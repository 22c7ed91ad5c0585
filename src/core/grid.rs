//! Grid - Structure of Arrays (SoA) cell storage
//!
//! Instead of: Vec<Cell>            // interleaved, wasted padding
//! We have:    kinds[], luminance[], ttl[]  // linear memory, JS-sharable
//!
//! Neighbor lookups wrap on both axes (the simulation is a torus).
//! Render sampling clamps instead - see `sample_index`. That asymmetry
//! is intentional and must not be "unified".

use crate::domain::cell::{Cell, CellKind};

/// SoA grid - all cell data in separate contiguous arrays.
pub struct Grid {
    width: u32,
    height: u32,
    size: usize,

    pub kinds: Vec<CellKind>,
    pub luminance: Vec<f32>,
    pub ttl: Vec<f32>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            width,
            height,
            size,
            kinds: vec![CellKind::Air; size],
            luminance: vec![0.0; size],
            ttl: vec![0.0; size],
        }
    }

    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    // === Index conversion ===
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let x = (idx as u32) % self.width;
        let y = (idx as u32) / self.width;
        (x, y)
    }

    /// Toroidal index: any signed coordinate maps onto the lattice.
    #[inline]
    pub fn wrap_index(&self, x: i32, y: i32) -> usize {
        let wx = x.rem_euclid(self.width as i32) as u32;
        let wy = y.rem_euclid(self.height as i32) as u32;
        self.index(wx, wy)
    }

    /// Nearest-cell index for render sampling. Coordinates are clamped
    /// to [0, 1), never wrapped.
    #[inline]
    pub fn sample_index(&self, u: f32, v: f32) -> usize {
        let cu = u.clamp(0.0, 0.999_999);
        let cv = v.clamp(0.0, 0.999_999);
        let ix = ((cu * self.width as f32) as u32).min(self.width - 1);
        let iy = ((cv * self.height as f32) as u32).min(self.height - 1);
        self.index(ix, iy)
    }

    // === Cell access ===
    #[inline]
    pub fn get(&self, idx: usize) -> Cell {
        Cell {
            kind: *fast!(self.kinds, [idx]),
            luminance: *fast!(self.luminance, [idx]),
            ttl: *fast!(self.ttl, [idx]),
        }
    }

    #[inline]
    pub fn set(&mut self, idx: usize, cell: Cell) {
        fast!(self.kinds, [idx] = cell.kind);
        fast!(self.luminance, [idx] = cell.luminance);
        fast!(self.ttl, [idx] = cell.ttl);
    }

    /// Reset every cell to Air.
    pub fn fill_air(&mut self) {
        self.kinds.fill(CellKind::Air);
        self.luminance.fill(0.0);
        self.ttl.fill(0.0);
    }

    // === Raw pointers for JS interop ===
    pub fn kinds_ptr(&self) -> *const u8 {
        self.kinds.as_ptr() as *const u8
    }

    pub fn luminance_ptr(&self) -> *const f32 {
        self.luminance.as_ptr()
    }

    pub fn ttl_ptr(&self) -> *const f32 {
        self.ttl.as_ptr()
    }
}
