use crate::domain::config::StepParams;
use crate::systems::lifecycle::LifecycleContext;
use crate::systems::movement;

use super::{kernel, SimulatorCore};

/// One simulation step: an embarrassingly parallel map over all cell
/// indices. Every cell reads only the immutable current buffer and
/// writes only its own staging slot, so the pass needs no locks. The
/// buffer swap afterwards is the barrier between steps.
pub(super) fn step(core: &mut SimulatorCore, params: StepParams) {
    let mirror = movement::mirror_factor(core.frame);
    let width = core.buffers.width();
    let height = core.buffers.height();

    let SimulatorCore {
        fields,
        config,
        buffers,
        capture,
        frame,
        ..
    } = core;

    let ctx = LifecycleContext {
        config: &*config,
        fields: &**fields,
        capture: &*capture,
        params,
        width,
        height,
    };

    let (src, dst) = buffers.split();

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        dst.kinds
            .par_iter_mut()
            .zip(dst.luminance.par_iter_mut())
            .zip(dst.ttl.par_iter_mut())
            .enumerate()
            .for_each(|(idx, ((kind, luminance), ttl))| {
                let cell = kernel::update_cell(src, &ctx, idx, mirror);
                *kind = cell.kind;
                *luminance = cell.luminance;
                *ttl = cell.ttl;
            });
    }

    #[cfg(not(feature = "parallel"))]
    {
        dst.kinds
            .iter_mut()
            .zip(dst.luminance.iter_mut())
            .zip(dst.ttl.iter_mut())
            .enumerate()
            .for_each(|(idx, ((kind, luminance), ttl))| {
                let cell = kernel::update_cell(src, &ctx, idx, mirror);
                *kind = cell.kind;
                *luminance = cell.luminance;
                *ttl = cell.ttl;
            });
    }

    buffers.swap();
    *frame += 1;
}

/// Substeps for one rendered frame: keeps a fixed simulation rate under
/// a variable frame rate. Substeps are strictly sequential - each reads
/// the buffer the previous one committed. The elapsed time and one-shot
/// event flags apply to the first substep only.
pub(super) fn run_frame(
    core: &mut SimulatorCore,
    delta_time: f32,
    is_capturing: bool,
    is_clearing: bool,
    field_index: i32,
) -> u32 {
    let dt = delta_time.max(0.0);
    let cap = core.config.iterations_per_step_max.max(1) as i64;
    let target = (core.config.iterations_per_sec * dt).round() as i64;
    let iterations = target.clamp(1, cap) as u32;

    for i in 0..iterations {
        let params = if i == 0 {
            StepParams {
                delta_time: dt,
                is_capturing,
                is_clearing,
                field_index,
            }
        } else {
            StepParams {
                delta_time: 0.0,
                is_capturing: false,
                is_clearing: false,
                field_index,
            }
        };
        step(core, params);
    }
    iterations
}
