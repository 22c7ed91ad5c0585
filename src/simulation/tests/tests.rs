use super::*;

fn sim(width: u32, height: u32) -> SimulatorCore {
    SimulatorCore::new(width, height).unwrap()
}

fn set_cell(core: &mut SimulatorCore, x: u32, y: u32, cell: Cell) {
    let grid = core.buffers.current_mut();
    let idx = grid.index(x, y);
    grid.set(idx, cell);
}

fn quiet(delta_time: f32) -> StepParams {
    StepParams {
        delta_time,
        ..StepParams::default()
    }
}

#[test]
fn construction_rejects_zero_dimensions() {
    assert!(SimulatorCore::new(0, 8).is_err());
    assert!(SimulatorCore::new(8, 0).is_err());
    assert!(SimulatorCore::new(8, 8).is_ok());
}

#[test]
fn grain_falls_straight_down_and_decays() {
    // The 8x8 reference scenario: one grain, air below, dt=1.
    let mut core = sim(8, 8);
    assert!(core.deposit_sand(4, 4, 0.5, 10.0));

    core.step(quiet(1.0));

    assert_eq!(core.cell_at(4, 4), Cell::AIR);
    let cell = core.cell_at(4, 3);
    assert_eq!(cell.kind, CellKind::Sand);
    assert!((cell.ttl - 9.0).abs() < 1e-6);
    assert!((cell.luminance - 0.5).abs() < 1e-6);
    assert_eq!(core.sand_count(), 1);
}

#[test]
fn ignore_ttl_holds_lifetime_constant() {
    let mut core = sim(8, 8);
    core.set_ignore_ttl(true);
    core.deposit_sand(4, 4, 0.5, 10.0);

    core.step(quiet(1.0));

    assert_eq!(core.cell_at(4, 3).ttl, 10.0);
}

#[test]
fn supported_grain_slides_toward_mirror_side() {
    // Grain resting on a wall, even step: the slide goes in natural
    // reading order, one cell to the right.
    let mut core = sim(8, 8);
    set_cell(&mut core, 4, 3, Cell::WALL);
    core.deposit_sand(4, 4, 0.5, 10.0);

    core.step(quiet(0.0));

    assert_eq!(core.cell_at(4, 4), Cell::AIR);
    assert_eq!(core.cell_at(5, 4).kind, CellKind::Sand);
    assert_eq!(core.sand_count(), 1);
}

#[test]
fn odd_steps_mirror_the_slide_direction() {
    let mut core = sim(8, 8);
    core.frame = 1;
    set_cell(&mut core, 4, 3, Cell::WALL);
    core.deposit_sand(4, 4, 0.5, 10.0);

    core.step(quiet(0.0));

    assert_eq!(core.cell_at(4, 4), Cell::AIR);
    assert_eq!(core.cell_at(3, 4).kind, CellKind::Sand);
    assert_eq!(core.sand_count(), 1);
}

#[test]
fn overhead_obstruction_blocks_the_slide() {
    // Intake requires a clear cell above the destination; release
    // requires a clear up-diagonal. Both fail here, so the grain stays.
    let mut core = sim(8, 8);
    set_cell(&mut core, 4, 3, Cell::WALL);
    set_cell(&mut core, 5, 5, Cell::WALL);
    core.deposit_sand(4, 4, 0.5, 10.0);

    core.step(quiet(0.0));

    assert_eq!(core.cell_at(4, 4).kind, CellKind::Sand);
    assert_eq!(core.sand_count(), 1);
}

#[test]
fn sink_annihilates_an_entering_grain() {
    let mut core = sim(8, 8);
    set_cell(&mut core, 4, 3, Cell::SINK);
    core.deposit_sand(4, 4, 0.5, 10.0);
    assert_eq!(core.sand_count(), 1);

    core.step(quiet(0.0));

    assert_eq!(core.cell_at(4, 4), Cell::AIR);
    assert_eq!(core.cell_at(4, 3), Cell::SINK);
    assert_eq!(core.sand_count(), 0);
}

#[test]
fn expired_grain_becomes_air() {
    let mut core = sim(8, 8);
    core.deposit_sand(4, 4, 0.5, 0.5);

    core.step(quiet(1.0));

    assert_eq!(core.sand_count(), 0);
    assert_eq!(core.cell_at(4, 3), Cell::AIR);
    assert_eq!(core.cell_at(4, 4), Cell::AIR);
}

#[test]
fn ttl_decreases_every_step_until_expiry() {
    let mut core = sim(8, 8);
    core.deposit_sand(4, 7, 0.5, 3.0);

    let mut prev = 3.0;
    for step in 0..2i32 {
        core.step(quiet(1.0));
        let cell = core.cell_at(4, 6 - step);
        assert_eq!(cell.kind, CellKind::Sand);
        assert!(cell.ttl < prev);
        prev = cell.ttl;
    }

    // The third step drains the remaining second; the grain never
    // comes back.
    for _ in 0..3 {
        core.step(quiet(1.0));
        assert_eq!(core.sand_count(), 0);
    }
}

#[test]
fn walls_never_move() {
    let mut core = sim(8, 8);
    set_cell(&mut core, 4, 4, Cell::WALL);

    for _ in 0..4 {
        core.step(quiet(0.016));
    }

    assert_eq!(core.cell_at(4, 4), Cell::WALL);
    let walls = core
        .buffers
        .current()
        .kinds
        .iter()
        .filter(|k| **k == CellKind::Wall)
        .count();
    assert_eq!(walls, 1);
}

#[test]
fn sand_mass_is_conserved_without_events() {
    let mut core = sim(16, 16);
    core.set_ignore_ttl(true);
    let mut deposited = 0;
    for i in 0..24u32 {
        if core.deposit_sand((i * 7) % 16, (i * 5) % 16, 0.3, 10.0) {
            deposited += 1;
        }
    }
    assert!(deposited > 0);

    for _ in 0..50 {
        core.step(quiet(0.016));
        assert_eq!(core.sand_count(), deposited);
    }
}

#[test]
fn slide_wraps_across_the_vertical_seam() {
    // Odd step: the grain at x=0 slides left, onto the opposite edge.
    let mut core = sim(8, 8);
    core.frame = 1;
    set_cell(&mut core, 0, 3, Cell::WALL);
    core.deposit_sand(0, 4, 0.5, 10.0);

    core.step(quiet(0.0));

    assert_eq!(core.cell_at(0, 4), Cell::AIR);
    assert_eq!(core.cell_at(7, 4).kind, CellKind::Sand);
    assert_eq!(core.sand_count(), 1);
}

#[test]
fn fall_wraps_across_the_horizontal_seam() {
    let mut core = sim(8, 8);
    core.deposit_sand(4, 0, 0.5, 10.0);

    core.step(quiet(0.0));

    assert_eq!(core.cell_at(4, 0), Cell::AIR);
    assert_eq!(core.cell_at(4, 7).kind, CellKind::Sand);
}

#[test]
fn clear_wipes_sand_and_is_idempotent() {
    let mut core = sim(32, 32);
    for x in (0..32).step_by(3) {
        core.deposit_sand(x, 20, 0.5, 10.0);
    }
    assert!(core.sand_count() > 0);

    let clearing = StepParams {
        delta_time: 0.0,
        is_capturing: false,
        is_clearing: true,
        field_index: 0,
    };

    core.step(clearing);
    let first = core.buffers.current().kinds.clone();
    assert_eq!(core.sand_count(), 0);
    assert!(first.contains(&CellKind::Wall));
    assert!(first.contains(&CellKind::Sink));

    core.step(clearing);
    assert_eq!(core.buffers.current().kinds, first);
}

#[test]
fn clear_layout_matches_the_field_generator() {
    let mut core = sim(32, 32);
    core.step(StepParams {
        delta_time: 0.0,
        is_capturing: false,
        is_clearing: true,
        field_index: 1,
    });

    let grid = core.buffers.current();
    for idx in 0..grid.size() {
        let (x, y) = grid.coords(idx);
        let u = x as f32 / 32.0;
        let v = y as f32 / 32.0;
        let expected = core.fields.generate(u, v, 1, 32);
        assert_eq!(grid.get(idx).kind, expected, "mismatch at ({x},{y})");
    }
}

#[test]
fn capture_spawns_sparse_grains_inside_the_region() {
    let mut core = sim(64, 64);
    // uniform gray frame: r = 128 everywhere
    core.set_capture_frame(&vec![128u8; 32 * 32 * 4], 32, 32)
        .unwrap();

    core.step(StepParams {
        delta_time: 0.0,
        is_capturing: true,
        is_clearing: false,
        field_index: 0,
    });

    assert!(core.sand_count() > 0);
    let config = *core.config();
    let grid = core.buffers.current();
    for idx in 0..grid.size() {
        let cell = grid.get(idx);
        if cell.kind != CellKind::Sand {
            continue;
        }
        let (x, y) = grid.coords(idx);
        // stride sublattice
        assert_eq!(x % config.sand_spacing + y % config.sand_spacing, 0);
        // inside the capture circle
        let du = x as f32 / 64.0 - config.capture_point[0];
        let dv = y as f32 / 64.0 - config.capture_point[1];
        assert!((du * du + dv * dv).sqrt() <= config.capture_radius + 1e-6);
        // luminance from the uniform frame, ttl from the configured range
        assert!((cell.luminance - 128.0 / 255.0).abs() < 1e-6);
        assert!(cell.ttl >= config.ttl_min && cell.ttl <= config.ttl_max);
    }

    // The lattice point nearest the capture point definitely spawned.
    assert_eq!(core.cell_at(32, 42).kind, CellKind::Sand);
}

#[test]
fn deposit_refuses_occupied_and_out_of_bounds_cells() {
    let mut core = sim(8, 8);
    assert!(core.deposit_sand(2, 2, 0.5, 10.0));
    assert!(!core.deposit_sand(2, 2, 0.5, 10.0));
    assert!(!core.deposit_sand(8, 0, 0.5, 10.0));
    assert!(!core.deposit_sand(0, 99, 0.5, 10.0));
}

#[test]
fn render_sampling_clamps_to_the_edges() {
    let mut core = sim(8, 8);
    set_cell(&mut core, 7, 7, Cell::WALL);
    set_cell(&mut core, 0, 0, Cell::SINK);

    assert_eq!(core.sample(2.0, 2.0).kind, CellKind::Wall);
    assert_eq!(core.sample(-1.0, -1.0).kind, CellKind::Sink);
}

#[test]
fn run_frame_honors_the_substep_cap() {
    let mut core = sim(8, 8);
    // 240 steps/sec, capped at 8 per frame
    assert_eq!(core.run_frame(1.0, false, false, 0), 8);
    assert_eq!(core.frame(), 8);
    // zero elapsed time still advances one step
    assert_eq!(core.run_frame(0.0, false, false, 0), 1);
    assert_eq!(core.frame(), 9);
}

#[test]
fn run_frame_decays_ttl_by_elapsed_time_not_per_substep() {
    let mut core = sim(8, 8);
    core.deposit_sand(4, 4, 0.5, 10.0);

    // 240 steps/sec over 1/60 s -> 4 substeps, but only the first one
    // carries the elapsed time, so the grain ages by dt, not 4*dt.
    let dt = 1.0 / 60.0;
    assert_eq!(core.run_frame(dt, false, false, 0), 4);

    let cell = core.cell_at(4, 0);
    assert_eq!(cell.kind, CellKind::Sand);
    assert!((cell.ttl - (10.0 - dt)).abs() < 1e-6);
}

#[test]
fn run_frame_applies_events_on_the_first_substep_only() {
    let mut core = sim(32, 32);
    core.run_frame(1.0, false, true, 0);

    // The clear stamped the funnel; subsequent quiet substeps left the
    // obstacles in place.
    assert!(core
        .buffers
        .current()
        .kinds
        .iter()
        .any(|k| *k == CellKind::Wall));
    assert_eq!(core.sand_count(), 0);
}

#[test]
fn instances_are_fully_independent() {
    let mut visible = sim(8, 8);
    let mut hidden = sim(8, 8);
    visible.deposit_sand(4, 4, 0.5, 10.0);

    visible.step(quiet(0.016));
    hidden.step(quiet(0.016));

    assert_eq!(visible.sand_count(), 1);
    assert_eq!(hidden.sand_count(), 0);
}

#[test]
fn custom_field_bundle_replaces_the_catalog() {
    let mut core = sim(16, 16);
    let json = r#"{"presets":[{"name":"floor","strokes":[
        {"kind":"wall","a":[0.0,0.25],"b":[1.0,0.25]}
    ]}]}"#;
    core.load_field_bundle_json(json).unwrap();
    assert_eq!(core.field_count(), 1);

    core.step(StepParams {
        delta_time: 0.0,
        is_capturing: false,
        is_clearing: true,
        field_index: 0,
    });

    assert_eq!(core.cell_at(8, 4).kind, CellKind::Wall);
    assert_eq!(core.cell_at(8, 12).kind, CellKind::Air);
}
