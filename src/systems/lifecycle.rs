//! Lifecycle effects - post-processing applied to the movement rule's
//! candidate before it is committed, in a fixed order:
//!
//! 1. ttl decay (skipped when the originating cell was a Sink, which
//!    already annihilated the grain this step)
//! 2. clear reseed from the active field preset
//! 3. capture spawn from the live camera image

use crate::core::image::CaptureImage;
use crate::domain::cell::{Cell, CellKind};
use crate::domain::config::{SimConfig, StepParams};
use crate::domain::fields::FieldCatalog;

/// Read-only per-step inputs shared by every cell of one pass.
pub struct LifecycleContext<'a> {
    pub config: &'a SimConfig,
    pub fields: &'a FieldCatalog,
    pub capture: &'a CaptureImage,
    pub params: StepParams,
    pub width: u32,
    pub height: u32,
}

/// Finalize one cell: `origin` is the cell's own previous state,
/// `next` the movement candidate. Returns the value to commit.
pub fn apply(ctx: &LifecycleContext, x: u32, y: u32, origin: Cell, mut next: Cell) -> Cell {
    let u = x as f32 / ctx.width as f32;
    let v = y as f32 / ctx.height as f32;

    // === Ttl decay ===
    if next.kind == CellKind::Sand && origin.kind != CellKind::Sink {
        let decay = if ctx.config.ignore_ttl {
            0.0
        } else {
            ctx.params.delta_time.max(0.0)
        };
        let ttl = next.ttl - decay;
        if ttl > 0.0 {
            next.ttl = ttl;
        } else {
            next = Cell::AIR;
        }
    }

    // === Clear reseed ===
    // Discards the candidate outright: the preset decides Wall/Sink and
    // everything else becomes Air, wiping all sand grid-wide.
    if ctx.params.is_clearing {
        next = match ctx
            .fields
            .generate(u, v, ctx.params.field_index, ctx.width)
        {
            CellKind::Wall => Cell::WALL,
            CellKind::Sink => Cell::SINK,
            _ => Cell::AIR,
        };
    }

    // === Capture spawn ===
    if ctx.params.is_capturing && in_capture_region(ctx.config, u, v) && on_spawn_lattice(ctx.config, x, y)
    {
        let ttl = ctx.config.ttl_min
            + (ctx.config.ttl_max - ctx.config.ttl_min) * hash_uv(u * 100.0, v * 100.0);
        let luminance = sample_capture(ctx.capture, ctx.config, u, v);
        next = Cell::sand(luminance, ttl);
    }

    next
}

#[inline]
fn in_capture_region(config: &SimConfig, u: f32, v: f32) -> bool {
    let du = u - config.capture_point[0];
    let dv = v - config.capture_point[1];
    (du * du + dv * dv).sqrt() <= config.capture_radius
}

/// Fixed-stride sublattice keeping spawned sand grainy, not a solid blob.
#[inline]
fn on_spawn_lattice(config: &SimConfig, x: u32, y: u32) -> bool {
    let spacing = config.sand_spacing.max(1);
    x % spacing + y % spacing == 0
}

/// Deterministic coordinate hash in [0, 1): same coordinate, same value
/// within one capture event; neighboring coordinates decorrelated.
#[inline]
pub fn hash_uv(u: f32, v: f32) -> f32 {
    let h = (u * 12.9898 + v * 78.233).sin() * 43758.547;
    h - h.floor()
}

/// Map a grid uv into the capture image: aspect-correct around the
/// center, then zoom about the capture point. The wrap for scale
/// overshoot happens inside `CaptureImage::sample`.
fn sample_capture(image: &CaptureImage, config: &SimConfig, u: f32, v: f32) -> f32 {
    let aspect = image.height() as f32 / image.width() as f32;
    let cu = (u - 0.5) * aspect + 0.5;
    let cv = v;
    let [px, py] = config.capture_point;
    let scale = config.capture_uv_scale;
    image.sample((cu - px) * scale + px, (cv - py) * scale + py)
}
