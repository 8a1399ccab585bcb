//! Swarm demo: bouncing probes, a seeker pair, and a keyboard-thrust ship
//!
//! Stands in for the external application layer: drives fixed-step ticks
//! from a tick timer, feeds scripted input events, and logs the render
//! submission list instead of drawing it.

mod behaviors;

use behaviors::{BounceBehavior, SeekBehavior, ThrustBehavior, ThrustInput};
use rand::Rng;
use sim_engine::prelude::*;

const WORLD_HALF_EXTENT: f32 = 20.0;
const DEMO_TICKS: u64 = 600;

fn spawn_probes(
    sim: &mut Simulation,
    mesh: MeshHandle,
    count: usize,
) -> Result<(), SimError> {
    let mut rng = rand::thread_rng();
    let bounds = Vec3::new(WORLD_HALF_EXTENT, WORLD_HALF_EXTENT, WORLD_HALF_EXTENT);

    for _ in 0..count {
        let mut state = MotionState::new(ReferenceFrame::Scene);
        state.set_motion_component(
            0,
            Vec3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            ),
            ReferenceFrame::Scene,
        )?;
        state.set_motion_component(
            1,
            Vec3::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            ),
            ReferenceFrame::Scene,
        )?;

        sim.spawn(Entity::new(Box::new(BounceBehavior { bounds }), state).with_mesh(mesh));
    }
    Ok(())
}

fn spawn_seeker_pair(sim: &mut Simulation, mesh: MeshHandle) -> Result<(), SimError> {
    let mut state_a = MotionState::new(ReferenceFrame::Scene);
    state_a.set_motion_component(0, Vec3::new(-8.0, 0.0, 0.0), ReferenceFrame::Scene)?;
    let mut state_b = MotionState::new(ReferenceFrame::Scene);
    state_b.set_motion_component(0, Vec3::new(8.0, 0.0, 0.0), ReferenceFrame::Scene)?;

    let a = sim.spawn(Entity::new(Box::new(SeekBehavior { speed: 2.0 }), state_a).with_mesh(mesh));
    let b = sim.spawn(Entity::new(Box::new(SeekBehavior { speed: 2.0 }), state_b).with_mesh(mesh));

    // Each seeker chases the other's committed position
    if let Some(seeker) = sim.entity_mut(a) {
        seeker.set_attributes(Some(Box::new(b)));
    }
    if let Some(seeker) = sim.entity_mut(b) {
        seeker.set_attributes(Some(Box::new(a)));
    }
    Ok(())
}

fn spawn_ship(sim: &mut Simulation, mesh: MeshHandle) -> Result<EntityKey, SimError> {
    let mut state = MotionState::new(ReferenceFrame::Scene);
    // Cap ship speed at 6 units/s per axis, by magnitude
    state.set_motion_component(1, Vec3::zeros(), ReferenceFrame::Scene)?;
    state.set_absolute_clamp(true);
    if let Some(max) = state.max_constraint_mut(1) {
        max.x = sim_engine::sim::Constraint::enabled(6.0);
        max.y = sim_engine::sim::Constraint::enabled(6.0);
        max.z = sim_engine::sim::Constraint::enabled(6.0);
    }

    let key = sim.spawn(
        Entity::new(Box::new(ThrustBehavior { thrust: 4.0 }), state)
            .with_mesh(mesh)
            .with_attributes(Some(Box::new(ThrustInput::default()))),
    );
    Ok(key)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::default();
    config.validate()?;
    sim_engine::foundation::logging::init_with_level(&config.engine.log_level);

    let mut meshes = MeshRegistry::new();
    let probe_mesh = meshes.insert(Mesh::new("probe"));
    let ship_mesh = meshes.insert(Mesh::new("ship"));

    let mut sim = Simulation::new();
    spawn_probes(&mut sim, probe_mesh, 24)?;
    spawn_seeker_pair(&mut sim, probe_mesh)?;
    let ship = spawn_ship(&mut sim, ship_mesh)?;

    let camera = Camera::look_at(Vec3::new(0.0, 30.0, 60.0), Vec3::zeros());
    log::info!(
        "simulating {} entities at {} us/tick",
        sim.len(),
        config.simulation.step_us
    );

    let mut timer = TickTimer::new(config.simulation.step_us);
    while timer.tick_count() < DEMO_TICKS {
        // Scripted input instead of a real window: thrust forward for the
        // first two seconds, then let go.
        if timer.tick_count() == 0 {
            sim.process_event(&SimEvent::KeyPressed(KeyCode::W));
        } else if timer.tick_count() == 120 {
            sim.process_event(&SimEvent::KeyReleased(KeyCode::W));
        }

        timer.advance(config.simulation.step_us);
        let mut drained = 0;
        while let Some(time_index_us) = timer.consume_tick() {
            sim.update(time_index_us, timer.step_us())?;
            drained += 1;
            if drained >= config.simulation.max_ticks_per_frame {
                break;
            }
        }

        // Render pass stand-in: walk the submission list in order
        if timer.tick_count() % 120 == 0 {
            let renderables = sim.renderables();
            let view = camera.view_matrix();
            let ship_pos = sim
                .entity(ship)
                .map(|e| e.render_transform().position)
                .unwrap_or_else(Vec3::zeros);
            log::info!(
                "t={} us: {} draws queued, ship at ({:.2}, {:.2}, {:.2}), view row0 {:?}",
                timer.time_index_us(),
                renderables.len(),
                ship_pos.x,
                ship_pos.y,
                ship_pos.z,
                view.row(0).iter().copied().collect::<Vec<f32>>()
            );
        }
    }

    log::info!("demo finished after {} ticks", timer.tick_count());
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("demo failed: {error}");
        std::process::exit(1);
    }
}
