//! Cell model - the per-cell value type and its classification predicates
//!
//! A cell is a plain value. "Moving" sand copies the whole cell to a new
//! position; there is no identity across steps, only position.

/// Cell classification. The discriminants are part of the JS ABI
/// (the kinds array is exposed to the host as raw u8s).
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CellKind {
    #[default]
    Air = 0,
    Sand = 1,
    Wall = 2,
    Sink = 3,
}

impl CellKind {
    /// Air and Sink are both passable to falling sand.
    #[inline]
    pub fn is_air_like(self) -> bool {
        matches!(self, CellKind::Air | CellKind::Sink)
    }
}

/// One simulation cell.
///
/// `luminance` is meaningful only for Sand (captured brightness);
/// `ttl` is meaningful only for Sand (remaining lifetime in seconds).
/// Both are 0 for every other kind.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Cell {
    pub kind: CellKind,
    pub luminance: f32,
    pub ttl: f32,
}

impl Cell {
    pub const AIR: Cell = Cell {
        kind: CellKind::Air,
        luminance: 0.0,
        ttl: 0.0,
    };
    pub const WALL: Cell = Cell {
        kind: CellKind::Wall,
        luminance: 0.0,
        ttl: 0.0,
    };
    pub const SINK: Cell = Cell {
        kind: CellKind::Sink,
        luminance: 0.0,
        ttl: 0.0,
    };

    #[inline]
    pub fn sand(luminance: f32, ttl: f32) -> Self {
        Self {
            kind: CellKind::Sand,
            luminance,
            ttl,
        }
    }

    #[inline]
    pub fn is_air_like(&self) -> bool {
        self.kind.is_air_like()
    }

    /// Display color as linear RGBA. Sand interpolates a dark-red to
    /// amber ramp by captured luminance; the 2.5 gain is an HDR boost
    /// for the host's bloom pass.
    pub fn display_color(&self) -> [f32; 4] {
        match self.kind {
            CellKind::Wall => [0.3, 0.3, 0.3, 1.0],
            CellKind::Sand => {
                let t = self.luminance;
                let intensity = 2.5;
                [
                    lerp(0.75, 1.0, t) * intensity,
                    lerp(0.05, 0.75, t) * intensity,
                    0.0,
                    1.0,
                ]
            }
            CellKind::Sink => [1.0, 0.0, 0.0, 1.0],
            CellKind::Air => [0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Packed 0xAABBGGRR color for the zero-copy JS render path.
    /// HDR values are clamped to the displayable range.
    pub fn packed_color(&self) -> u32 {
        let [r, g, b, a] = self.display_color();
        pack_channel(a) << 24 | pack_channel(b) << 16 | pack_channel(g) << 8 | pack_channel(r)
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn pack_channel(v: f32) -> u32 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u32
}
