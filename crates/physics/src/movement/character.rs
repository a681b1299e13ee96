//! Walking character body.
//!
//! Moves with planar input forces in its own yaw frame, jumps with a one-shot
//! impulse, and treats ground contact as a state: while grounded, gravity is
//! suppressed and ground drag is applied.

use glam::Vec3;

use crate::collision::{ActorId, CollisionProbe, SweepQuery};
use crate::error::ConfigError;
use crate::rotator::{normalize_axis, Rotator};

use super::body::Body;
use super::config::CharacterConfig;
use super::contact::{is_ground_normal, resolve_contacts};
use super::pawn::{InputReceiver, Tickable};
use super::state::{BodyState, MovementFlags};

/// Camera pitch stays inside (-PITCH_LIMIT, PITCH_LIMIT) degrees.
pub(crate) const PITCH_LIMIT: f32 = 89.0;

/// Ground-walking character.
///
/// # Example
///
/// ```ignore
/// let mut character = CharacterBody::new(CharacterConfig::default(), spawn)?;
/// character.set_possessed(true);
///
/// // Between frames:
/// character.receive(InputEvent::MoveAxis2D { x: 1.0, y: 0.0 });
///
/// // Each frame:
/// character.tick(&world, delta_time);
/// ```
#[derive(Debug, Clone)]
pub struct CharacterBody {
    config: CharacterConfig,
    body: Body,
    /// Heading requested by look input, applied at the start of each tick.
    look_yaw: f32,
    /// Camera arm pitch (degrees).
    camera_pitch: f32,
    actor: Option<ActorId>,
}

impl CharacterBody {
    /// Create a character at `position`, rejecting invalid tuning.
    pub fn new(config: CharacterConfig, position: Vec3) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config, position))
    }

    /// Create a character with default tuning.
    pub fn with_default_config(position: Vec3) -> Self {
        Self::from_valid(CharacterConfig::default(), position)
    }

    fn from_valid(config: CharacterConfig, position: Vec3) -> Self {
        let mut body = Body::new(
            position,
            config.mass,
            config.gravity,
            config.air_drag,
            config.rest_speed_sq,
        );
        body.state.flags.set(MovementFlags::NO_GRAVITY, !config.use_gravity);

        Self {
            config,
            body,
            look_yaw: 0.0,
            camera_pitch: 0.0,
            actor: None,
        }
    }

    /// Tag this body with the host's actor id so its own geometry is ignored.
    pub fn with_actor(mut self, actor: ActorId) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn actor(&self) -> Option<ActorId> {
        self.actor
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    pub fn state(&self) -> &BodyState {
        &self.body.state
    }

    pub fn position(&self) -> Vec3 {
        self.body.state.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.body.state.velocity
    }

    pub fn orientation(&self) -> Rotator {
        self.body.state.orientation
    }

    pub fn look_yaw(&self) -> f32 {
        self.look_yaw
    }

    pub fn camera_pitch(&self) -> f32 {
        self.camera_pitch
    }

    pub fn is_grounded(&self) -> bool {
        self.body.state.flags.on_ground()
    }

    pub fn is_sprinting(&self) -> bool {
        self.body.state.flags.sprinting()
    }

    pub fn is_possessed(&self) -> bool {
        self.body.state.flags.possessed()
    }

    /// Give or take away control. Input handlers do nothing while unpossessed.
    pub fn set_possessed(&mut self, possessed: bool) {
        self.body.state.flags.set(MovementFlags::POSSESSED, possessed);
        if !possessed {
            self.body.state.flags.set(MovementFlags::SPRINTING, false);
        }
    }

    pub fn set_use_gravity(&mut self, enabled: bool) {
        self.body.state.flags.set(MovementFlags::NO_GRAVITY, !enabled);
    }

    /// Face `yaw` degrees immediately, bypassing look input.
    pub fn set_heading(&mut self, yaw: f32) {
        self.look_yaw = normalize_axis(yaw);
        self.body.state.orientation = Rotator::from_yaw(self.look_yaw);
    }

    /// Add an external force for the next integration.
    pub fn add_force(&mut self, force: Vec3) {
        self.body.add_force(force);
    }

    /// Place the character and seed its ground state with one overlap test.
    pub fn spawn_at(&mut self, position: Vec3, probe: &dyn CollisionProbe) {
        let state = &mut self.body.state;
        state.position = position;
        state.velocity = Vec3::ZERO;
        state.force = Vec3::ZERO;
        state.orientation = Rotator::from_yaw(self.look_yaw);

        let query = SweepQuery::overlap(self.config.capsule, position, state.orientation).ignoring(self.actor);
        let grounded = probe
            .sweep(&query)
            .iter()
            .any(|c| is_ground_normal(c.normal, self.config.ground_tolerance));
        self.set_grounded(grounded);
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Planar move force for input `(x forward, y right)` in the current yaw frame.
    pub fn locomotion_force(&self, x: f32, y: f32) -> Vec3 {
        let orientation = Rotator::from_yaw(self.body.state.orientation.yaw);
        let mut force = (orientation.forward() * x + orientation.right() * y) * self.config.move_scalar;
        force.z = 0.0;

        if !self.is_grounded() {
            force *= self.config.air_control;
        }
        if self.is_sprinting() {
            force *= self.config.sprint_multiplier;
        }
        force
    }

    pub fn move_input(&mut self, x: f32, y: f32) {
        if !self.is_possessed() {
            return;
        }
        let dead_zone = self.config.input_dead_zone;
        if x.abs() <= dead_zone && y.abs() <= dead_zone {
            return;
        }
        let force = self.locomotion_force(x, y);
        self.body.add_force(force);
    }

    pub fn jump(&mut self) {
        if !self.is_possessed() || !self.is_grounded() {
            return;
        }
        log::debug!("character jump from {:?}", self.body.state.position);
        self.body.add_force(Vec3::new(0.0, 0.0, self.config.jump_scalar));
    }

    /// Turn by `yaw` degrees and tilt the camera by `pitch` degrees.
    pub fn look(&mut self, yaw: f32, pitch: f32) {
        if !self.is_possessed() {
            return;
        }
        self.look_yaw = normalize_axis(self.look_yaw + yaw);
        self.camera_pitch = (self.camera_pitch + pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn start_sprint(&mut self) {
        if self.is_possessed() {
            self.body.state.flags.set(MovementFlags::SPRINTING, true);
        }
    }

    pub fn stop_sprint(&mut self) {
        if self.is_possessed() {
            self.body.state.flags.set(MovementFlags::SPRINTING, false);
        }
    }

    // ========================================================================
    // Tick phases
    // ========================================================================

    fn add_gravity(&mut self) {
        let flags = self.body.state.flags;
        if !flags.uses_gravity() || flags.on_ground() {
            return;
        }
        self.body.add_gravity();
    }

    fn resolve_collisions(&mut self, probe: &dyn CollisionProbe, delta_time: f32) {
        let contacts = self.body.probe(
            probe,
            self.config.capsule,
            self.config.probe_mode,
            delta_time,
            self.actor,
        );
        let report = resolve_contacts(&mut self.body.state.velocity, &contacts, self.config.ground_tolerance);

        // Touching only walls leaves the ground state as it was.
        if report.ground {
            self.set_grounded(true);
        } else if !report.touched {
            self.set_grounded(false);
        }
    }

    fn set_grounded(&mut self, grounded: bool) {
        if grounded != self.is_grounded() {
            log::debug!(
                "character {} at {:?}",
                if grounded { "landed" } else { "left ground" },
                self.body.state.position
            );
        }
        self.body.state.flags.set(MovementFlags::ON_GROUND, grounded);
    }
}

impl Tickable for CharacterBody {
    fn tick(&mut self, probe: &dyn CollisionProbe, delta_time: f32) {
        self.body.state.orientation = Rotator::from_yaw(self.look_yaw);

        self.add_gravity();

        let ground_drag = self.is_grounded().then_some(self.config.ground_drag);
        self.body.integrate(delta_time, ground_drag);

        self.resolve_collisions(probe, delta_time);

        self.body.commit_position(delta_time);

        log::trace!(
            "character pos={:?} vel={:?} grounded={}",
            self.body.state.position,
            self.body.state.velocity,
            self.is_grounded()
        );
    }
}

impl InputReceiver for CharacterBody {
    fn on_move_axis_2d(&mut self, x: f32, y: f32) {
        self.move_input(x, y);
    }

    fn on_move_axis_3d(&mut self, x: f32, y: f32, _z: f32) {
        self.move_input(x, y);
    }

    fn on_look_axis_2d(&mut self, yaw: f32, pitch: f32) {
        self.look(yaw, pitch);
    }

    fn on_jump_pressed(&mut self) {
        self.jump();
    }

    fn on_sprint_start(&mut self) {
        self.start_sprint();
    }

    fn on_sprint_end(&mut self) {
        self.stop_sprint();
    }
}

// ============================================================================
// Tests
// ============================================================================
