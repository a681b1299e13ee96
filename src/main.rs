//! Pawnmotion - headless demo session.
//!
//! Drives the character and the drone through a scripted sequence in the test
//! arena and logs where they end up. Run with `RUST_LOG=debug` (or `trace`)
//! for per-event detail.

use anyhow::{Context, Result};
use glam::Vec3;
use pawnmotion_game::{Level, PawnKind, RawInput, Simulation, SimulationConfig};

/// One stretch of held input.
struct Phase {
    name: &'static str,
    possess: Option<PawnKind>,
    frames: u32,
    input: RawInput,
}

impl Phase {
    fn new(name: &'static str, frames: u32) -> Self {
        Self {
            name,
            possess: None,
            frames,
            input: RawInput::default(),
        }
    }

    fn possessing(mut self, pawn: PawnKind) -> Self {
        self.possess = Some(pawn);
        self
    }

    fn with(mut self, edit: impl FnOnce(&mut RawInput)) -> Self {
        edit(&mut self.input);
        self
    }
}

fn script() -> Vec<Phase> {
    vec![
        Phase::new("settle", 30).possessing(PawnKind::Character),
        Phase::new("walk", 90).with(|i| i.movement.forward = true),
        Phase::new("sprint", 60).with(|i| {
            i.movement.forward = true;
            i.sprint = true;
        }),
        Phase::new("turn", 1).with(|i| i.mouse_delta = (900.0, 0.0)),
        Phase::new("jump", 1).with(|i| i.jump = true),
        Phase::new("airborne", 120),
        Phase::new("climb", 90)
            .possessing(PawnKind::Drone)
            .with(|i| i.movement.ascend = true),
        Phase::new("tilt", 30).with(|i| i.movement.right = true),
        Phase::new("level out", 180),
    ]
}

fn log_state(sim: &Simulation, label: &str) {
    let character = sim.character();
    let drone = sim.drone();
    log::info!(
        "[{:>5}] {:<10} character pos={} vel={} grounded={} | drone pos={} rot=({:.1}, {:.1}, {:.1})",
        sim.frame,
        label,
        fmt_vec(character.position()),
        fmt_vec(character.velocity()),
        character.is_grounded(),
        fmt_vec(drone.position()),
        drone.orientation().pitch,
        drone.orientation().yaw,
        drone.orientation().roll,
    );
}

fn fmt_vec(v: Vec3) -> String {
    format!("({:.1}, {:.1}, {:.1})", v.x, v.y, v.z)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SimulationConfig::default();
    let dt = config.delta_time();
    let mut sim = Simulation::new(config, Level::test_arena()).context("invalid simulation config")?;

    log::info!("Pawnmotion headless session on '{}' at {:.0} Hz", sim.level.name, 1.0 / dt);
    log_state(&sim, "spawn");

    for phase in script() {
        if let Some(pawn) = phase.possess {
            sim.possess(pawn);
        }
        for _ in 0..phase.frames {
            sim.step(&phase.input, dt);
        }
        log_state(&sim, phase.name);
    }

    Ok(())
}
