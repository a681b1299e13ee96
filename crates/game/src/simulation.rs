//! Game simulation - the host loop around the two pawns.
//!
//! Each step translates raw input, hands it to whichever pawn is possessed,
//! then ticks both pawns against the level.

use glam::Vec3;
use pawnmotion_physics::{
    ActorId, CharacterBody, CharacterConfig, ConfigError, DroneBody, DroneConfig, InputEvent, Rotator, Tickable,
};
use serde::{Deserialize, Serialize};

use crate::dispatcher::InputDispatcher;
use crate::input::{InputBindings, InputTranslator, RawInput};
use crate::level::{Level, SpawnKind};

/// Actor id of the character's collision proxy.
pub const CHARACTER_ACTOR: ActorId = 1;

/// Actor id of the drone's collision proxy.
pub const DRONE_ACTOR: ActorId = 2;

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Step rate used by fixed-rate drivers (steps per second).
    pub tick_rate: u32,

    /// Longest frame a single step will simulate (seconds).
    pub max_frame_time: f32,

    pub character: CharacterConfig,
    pub drone: DroneConfig,

    /// Degrees of look per pixel of mouse travel.
    pub mouse_sensitivity: f32,
    pub invert_pitch: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            max_frame_time: 0.25,
            character: CharacterConfig::default(),
            drone: DroneConfig::default(),
            mouse_sensitivity: 0.1,
            invert_pitch: false,
        }
    }
}

impl SimulationConfig {
    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    fn bindings(&self, pawn: PawnKind) -> InputBindings {
        let bindings = match pawn {
            PawnKind::Character => InputBindings::character(),
            PawnKind::Drone => InputBindings::drone(),
        };
        bindings.with_mouse(self.mouse_sensitivity, self.invert_pitch)
    }
}

/// Pawns the player can control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PawnKind {
    Character,
    Drone,
}

/// The host simulation.
#[derive(Debug)]
pub struct Simulation {
    /// Number of steps run so far.
    pub frame: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// Current level.
    pub level: Level,

    character: CharacterBody,
    drone: DroneBody,
    possessed: Option<PawnKind>,

    translator: InputTranslator,
    dispatcher: InputDispatcher,

    /// Brush ids of the pawn proxies in the level's collision world.
    character_proxy: u32,
    drone_proxy: u32,
}

impl Simulation {
    /// Create a simulation, spawning both pawns at the level's spawn points.
    pub fn new(config: SimulationConfig, level: Level) -> Result<Self, ConfigError> {
        let character = CharacterBody::new(config.character.clone(), Vec3::ZERO)?;
        let drone = DroneBody::new(config.drone.clone(), Vec3::ZERO)?;
        Ok(Self::assemble(config, level, character, drone))
    }

    /// Create a simulation with default configuration and the test arena.
    pub fn test() -> Self {
        Self::assemble(
            SimulationConfig::default(),
            Level::test_arena(),
            CharacterBody::with_default_config(Vec3::ZERO),
            DroneBody::with_default_config(Vec3::ZERO),
        )
    }

    fn assemble(config: SimulationConfig, mut level: Level, character: CharacterBody, drone: DroneBody) -> Self {
        let (character_position, character_facing) = level
            .get_spawn(SpawnKind::Character, 0)
            .map(|s| (s.position, s.facing))
            .unwrap_or((Vec3::ZERO, 0.0));
        let (drone_position, drone_facing) = level
            .get_spawn(SpawnKind::Drone, 0)
            .map(|s| (s.position, s.facing))
            .unwrap_or((Vec3::ZERO, 0.0));

        let character_proxy =
            level
                .collision
                .add_capsule(character_position, character.config().capsule, Some(CHARACTER_ACTOR));
        let drone_proxy = level
            .collision
            .add_capsule(drone_position, drone.config().capsule, Some(DRONE_ACTOR));

        let mut character = character.with_actor(CHARACTER_ACTOR);
        character.set_heading(character_facing);
        character.spawn_at(character_position, &level.collision);

        let mut drone = drone.with_actor(DRONE_ACTOR);
        drone.teleport(drone_position);
        drone.set_orientation(Rotator::from_yaw(drone_facing));

        log::debug!(
            "simulation on '{}': character at {:?} (grounded={}), drone at {:?}",
            level.id,
            character_position,
            character.is_grounded(),
            drone_position
        );

        let translator = InputTranslator::new(config.bindings(PawnKind::Character));

        Self {
            frame: 0,
            config,
            level,
            character,
            drone,
            possessed: None,
            translator,
            dispatcher: InputDispatcher::new(),
            character_proxy,
            drone_proxy,
        }
    }

    pub fn character(&self) -> &CharacterBody {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut CharacterBody {
        &mut self.character
    }

    pub fn drone(&self) -> &DroneBody {
        &self.drone
    }

    pub fn drone_mut(&mut self) -> &mut DroneBody {
        &mut self.drone
    }

    pub fn possessed(&self) -> Option<PawnKind> {
        self.possessed
    }

    /// Hand control to `pawn`, releasing whichever pawn had it.
    ///
    /// Events still queued for the previous pawn are dropped.
    pub fn possess(&mut self, pawn: PawnKind) {
        if self.possessed == Some(pawn) {
            return;
        }
        self.release();

        match pawn {
            PawnKind::Character => self.character.set_possessed(true),
            PawnKind::Drone => self.drone.set_possessed(true),
        }
        self.translator.set_bindings(self.config.bindings(pawn));
        self.possessed = Some(pawn);

        log::debug!("possessed {:?}", pawn);
    }

    /// Release control. Both pawns keep simulating.
    pub fn unpossess(&mut self) {
        if self.possessed.is_some() {
            self.release();
            log::debug!("released control");
        }
    }

    fn release(&mut self) {
        self.character.set_possessed(false);
        self.drone.set_possessed(false);
        self.dispatcher.clear();
        self.possessed = None;
    }

    /// Queue an event for the possessed pawn's next dispatch.
    pub fn queue_event(&mut self, event: InputEvent) {
        self.dispatcher.push(event);
    }

    /// Advance the simulation by one frame of `delta_time` seconds.
    ///
    /// Frame time is clamped to `[0, max_frame_time]`.
    pub fn step(&mut self, input: &RawInput, delta_time: f32) {
        let delta_time = if delta_time.is_finite() {
            delta_time.max(0.0).min(self.config.max_frame_time)
        } else {
            0.0
        };

        let events = self.translator.translate(input);
        self.dispatcher.extend(events);

        let delivered = match self.possessed {
            Some(PawnKind::Character) => self.dispatcher.dispatch(&mut self.character),
            Some(PawnKind::Drone) => self.dispatcher.dispatch(&mut self.drone),
            None => {
                self.dispatcher.clear();
                0
            }
        };

        self.character.tick(&self.level.collision, delta_time);
        self.drone.tick(&self.level.collision, delta_time);

        self.level
            .collision
            .set_position(self.character_proxy, self.character.position());
        self.level.collision.set_position(self.drone_proxy, self.drone.position());

        log::trace!("frame {} dt={} events={}", self.frame, delta_time, delivered);

        self.frame += 1;
    }

    /// Get the fixed step length for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn forward() -> RawInput {
        let mut input = RawInput::default();
        input.movement.forward = true;
        input
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::test();
        assert_eq!(sim.frame, 0);
        assert_eq!(sim.possessed(), None);
        assert!(sim.character().is_grounded());
        assert_eq!(sim.drone().orientation().yaw, 90.0);
        // Arena brushes plus the two pawn proxies
        assert_eq!(sim.level.collision.brush_count(), 9);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SimulationConfig {
            drone: DroneConfig {
                mass: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(Simulation::new(config, Level::test_arena()).is_err());
    }

    #[test]
    fn test_step_advances_frame() {
        let mut sim = Simulation::test();
        sim.step(&RawInput::default(), sim.delta_time());
        assert_eq!(sim.frame, 1);
        sim.step(&RawInput::default(), sim.delta_time());
        assert_eq!(sim.frame, 2);
    }

    #[test]
    fn test_input_ignored_without_possession() {
        let mut sim = Simulation::test();
        let start = sim.character().position();
        for _ in 0..30 {
            sim.step(&forward(), sim.delta_time());
        }
        assert_eq!(sim.character().position(), start);
    }

    #[test]
    fn test_movement_input() {
        let mut sim = Simulation::test();
        sim.possess(PawnKind::Character);
        let start = sim.character().position();

        for _ in 0..60 {
            sim.step(&forward(), sim.delta_time());
        }

        let moved = sim.character().position() - start;
        assert!(moved.x > 100.0, "Character should have moved, moved={:?}", moved);
        assert!(sim.character().is_grounded());
    }

    #[test]
    fn test_possession_switch_routes_input() {
        let mut sim = Simulation::test();
        sim.possess(PawnKind::Drone);
        assert!(sim.drone().is_possessed());
        assert!(!sim.character().is_possessed());

        sim.queue_event(InputEvent::MoveAxis3D { x: 0.0, y: 0.0, z: 1.0 });
        sim.step(&RawInput::default(), sim.delta_time());
        assert!(sim.drone().velocity().z > 0.0);

        // Pending events belong to the pawn they were queued for.
        sim.queue_event(InputEvent::JumpPressed);
        sim.possess(PawnKind::Character);
        sim.step(&RawInput::default(), sim.delta_time());
        assert!(sim.character().is_grounded());
        assert_eq!(sim.character().velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_frame_time_is_clamped() {
        let mut sim = Simulation::test();
        sim.possess(PawnKind::Drone);
        sim.queue_event(InputEvent::MoveAxis3D { x: 0.0, y: 0.0, z: 1.0 });
        sim.step(&RawInput::default(), 10.0);

        // 1000 cm/s² of thrust for at most a quarter second.
        assert!(sim.drone().velocity().z <= 250.0);

        let before = sim.drone().position();
        sim.step(&RawInput::default(), f32::NAN);
        assert_eq!(sim.drone().position(), before);
    }

    #[test]
    fn test_proxies_follow_pawns() {
        let mut sim = Simulation::test();
        sim.possess(PawnKind::Drone);
        for _ in 0..30 {
            let mut input = RawInput::default();
            input.movement.ascend = true;
            sim.step(&input, sim.delta_time());
        }

        let drone_z = sim.drone().position().z;
        let hit = sim
            .level
            .collision
            .raycast(Vec3::new(-400.0, 400.0, 1000.0), -Vec3::Z, 2000.0)
            .expect("ray should hit the drone proxy");
        assert!((hit.point.z - (drone_z + 30.0)).abs() < 0.5, "hit={:?} drone_z={}", hit, drone_z);
    }

    #[test]
    fn test_determinism() {
        let inputs: Vec<_> = (0..100)
            .map(|i| {
                let mut input = RawInput::default();
                input.movement.forward = i % 2 == 0;
                input.movement.right = i % 3 == 0;
                input.jump = i % 10 == 0;
                input.mouse_delta = ((i % 7) as f32, 0.0);
                input
            })
            .collect();

        let run = || {
            let mut sim = Simulation::test();
            sim.possess(PawnKind::Character);
            for input in &inputs {
                sim.step(input, 1.0 / 60.0);
            }
            sim.character().position()
        };

        let pos1 = run();
        let pos2 = run();
        assert_eq!(pos1, pos2, "Simulations should be deterministic");
    }
}
