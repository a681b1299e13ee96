//! Whole-session behavior through the public host API.

use glam::Vec3;
use pawnmotion_game::{Level, PawnKind, RawInput, Simulation, SimulationConfig, SpawnKind, SpawnPoint};

const DT: f32 = 1.0 / 60.0;

fn floor_level(character_at: Vec3, drone_at: Vec3) -> Level {
    let mut level = Level::new("floor", "Floor");
    level
        .collision
        .add_box(Vec3::new(0.0, 0.0, -50.0), Vec3::new(5_000.0, 5_000.0, 50.0));
    level.spawn_points.push(SpawnPoint {
        position: character_at,
        facing: 0.0,
        kind: SpawnKind::Character,
    });
    level.spawn_points.push(SpawnPoint {
        position: drone_at,
        facing: 0.0,
        kind: SpawnKind::Drone,
    });
    level
}

fn run(sim: &mut Simulation, input: &RawInput, frames: usize) {
    for _ in 0..frames {
        sim.step(input, DT);
    }
}

#[test]
fn character_falls_and_lands() {
    let level = floor_level(Vec3::new(0.0, 0.0, 300.0), Vec3::new(1_000.0, 0.0, 300.0));
    let mut sim = Simulation::new(SimulationConfig::default(), level).expect("default config is valid");
    assert!(!sim.character().is_grounded());

    run(&mut sim, &RawInput::default(), 120);

    let character = sim.character();
    assert!(character.is_grounded(), "character should have landed");
    let z = character.position().z;
    assert!(z > 60.0 && z <= 88.5, "character should rest on the floor, z={}", z);
    assert_eq!(character.velocity(), Vec3::ZERO);
}

#[test]
fn idle_drone_holds_position() {
    let mut sim = Simulation::test();
    let start = sim.drone().position();

    run(&mut sim, &RawInput::default(), 120);

    assert_eq!(sim.drone().position(), start);
    assert_eq!(sim.drone().velocity(), Vec3::ZERO);
}

#[test]
fn walk_sprint_and_jump() {
    let mut sim = Simulation::test();
    sim.possess(PawnKind::Character);

    let mut walk = RawInput::default();
    walk.movement.forward = true;
    let start = sim.character().position();
    run(&mut sim, &walk, 20);
    let walked = sim.character().position().x - start.x;

    let mut sprint = walk.clone();
    sprint.sprint = true;
    let before_sprint = sim.character().position();
    run(&mut sim, &sprint, 20);
    assert!(sim.character().is_sprinting());
    let sprinted = sim.character().position().x - before_sprint.x;
    assert!(sprinted > walked, "sprint {} should outpace walk {}", sprinted, walked);

    // Coast to a near stop on ground friction.
    run(&mut sim, &RawInput::default(), 300);
    assert!(!sim.character().is_sprinting());
    assert!(sim.character().velocity().length() < 5.0);

    let mut jump = RawInput::default();
    jump.jump = true;
    let ground_z = sim.character().position().z;
    sim.step(&jump, DT);
    assert!(sim.character().velocity().z > 0.0);

    let mut peak = ground_z;
    for _ in 0..240 {
        sim.step(&RawInput::default(), DT);
        peak = peak.max(sim.character().position().z);
        if sim.character().is_grounded() {
            break;
        }
    }
    assert!(peak > ground_z + 10.0, "jump should leave the floor, peak={}", peak);
    assert!(sim.character().is_grounded(), "character should land again");
}

#[test]
fn switching_to_drone_moves_control() {
    let mut sim = Simulation::test();
    sim.possess(PawnKind::Character);
    sim.possess(PawnKind::Drone);
    assert_eq!(sim.possessed(), Some(PawnKind::Drone));

    let character_start = sim.character().position();
    let drone_start = sim.drone().position();

    let mut climb = RawInput::default();
    climb.movement.forward = true;
    climb.movement.ascend = true;
    run(&mut sim, &climb, 30);

    assert_eq!(sim.character().position(), character_start);
    assert!(sim.drone().position().z > drone_start.z, "drone should climb");
    assert!(sim.drone().orientation().pitch > 0.0, "forward leans the drone");

    // Released drone levels itself out.
    sim.unpossess();
    run(&mut sim, &RawInput::default(), 600);
    assert!(sim.drone().orientation().is_level(0.01));
}

#[test]
fn mouse_turns_the_character() {
    let mut sim = Simulation::test();
    sim.possess(PawnKind::Character);

    let mut look = RawInput::default();
    look.mouse_delta = (900.0, 0.0);
    sim.step(&look, DT);

    // 0.1 degrees per pixel
    assert!((sim.character().look_yaw() - 90.0).abs() < 1.0e-3);
    assert!((sim.character().orientation().yaw - 90.0).abs() < 1.0e-3);

    let mut walk = RawInput::default();
    walk.movement.forward = true;
    let start = sim.character().position();
    run(&mut sim, &walk, 30);
    let moved = sim.character().position() - start;
    assert!(moved.y > 10.0 && moved.x.abs() < 1.0, "moved={:?}", moved);
}
