//! Free-flying drone body.
//!
//! The drone always produces lift equal to its weight along its own up axis,
//! so it hovers when level and drifts in the direction it leans. Pitch and
//! roll decay back to level every tick; yaw follows the look target.

use glam::Vec3;

use crate::collision::{ActorId, CollisionProbe};
use crate::error::ConfigError;
use crate::rotator::{interp_angle_to, normalize_axis, Rotator};

use super::body::{decay, Body};
use super::character::PITCH_LIMIT;
use super::config::DroneConfig;
use super::contact::resolve_contacts;
use super::pawn::{InputReceiver, Tickable};
use super::state::{BodyState, MovementFlags};

/// Self-leveling hover drone.
#[derive(Debug, Clone)]
pub struct DroneBody {
    config: DroneConfig,
    body: Body,
    control_yaw: f32,
    /// Heading the body yaw is pulled toward.
    look_target_yaw: f32,
    camera_pitch: f32,
    actor: Option<ActorId>,
}

impl DroneBody {
    pub fn new(config: DroneConfig, position: Vec3) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config, position))
    }

    pub fn with_default_config(position: Vec3) -> Self {
        Self::from_valid(DroneConfig::default(), position)
    }

    fn from_valid(config: DroneConfig, position: Vec3) -> Self {
        let body = Body::new(
            position,
            config.mass,
            config.gravity,
            config.drag,
            config.rest_speed_sq,
        );
        Self {
            config,
            body,
            control_yaw: 0.0,
            look_target_yaw: 0.0,
            camera_pitch: 0.0,
            actor: None,
        }
    }

    pub fn with_actor(mut self, actor: ActorId) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn actor(&self) -> Option<ActorId> {
        self.actor
    }

    pub fn config(&self) -> &DroneConfig {
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

    pub fn look_target_yaw(&self) -> f32 {
        self.look_target_yaw
    }

    pub fn camera_pitch(&self) -> f32 {
        self.camera_pitch
    }

    pub fn is_possessed(&self) -> bool {
        self.body.state.flags.possessed()
    }

    pub fn set_possessed(&mut self, possessed: bool) {
        self.body.state.flags.set(MovementFlags::POSSESSED, possessed);
    }

    /// Snap the orientation, retargeting yaw so it holds the new heading.
    pub fn set_orientation(&mut self, orientation: Rotator) {
        let orientation = orientation.normalized();
        self.body.state.orientation = orientation;
        self.control_yaw = orientation.yaw;
        self.look_target_yaw = orientation.yaw;
    }

    /// Move the drone and bring it to rest.
    pub fn teleport(&mut self, position: Vec3) {
        let state = &mut self.body.state;
        state.position = position;
        state.velocity = Vec3::ZERO;
        state.force = Vec3::ZERO;
    }

    pub fn add_force(&mut self, force: Vec3) {
        self.body.add_force(force);
    }

    /// Lift cancelling the drone's weight, along its current up axis.
    pub fn lift(&self) -> Vec3 {
        self.body.state.orientation.up() * self.body.mass() * self.body.gravity()
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Lean by `x` degrees of pitch and `y` of roll; thrust along up with `z`.
    pub fn move_input(&mut self, x: f32, y: f32, z: f32) {
        if !self.is_possessed() {
            return;
        }
        let dead_zone = self.config.input_dead_zone;
        let mass = self.body.mass();
        let orientation = &mut self.body.state.orientation;

        if x.abs() > dead_zone {
            orientation.pitch = normalize_axis(orientation.pitch + x);
        }
        if y.abs() > dead_zone {
            orientation.roll = normalize_axis(orientation.roll + y);
        }
        if z.abs() > dead_zone {
            let thrust = orientation.up() * mass * self.config.move_scalar * z;
            self.body.add_force(thrust);
        }
    }

    pub fn look(&mut self, yaw: f32, pitch: f32) {
        if !self.is_possessed() {
            return;
        }
        self.control_yaw = normalize_axis(self.control_yaw + yaw);
        self.look_target_yaw = self.control_yaw;
        self.camera_pitch = (self.camera_pitch + pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    // ========================================================================
    // Tick phases
    // ========================================================================

    fn add_lift(&mut self) {
        let lift = self.lift();
        self.body.add_force(lift);
    }

    /// Decay pitch and roll toward level and turn toward the look target.
    fn balance(&mut self, delta_time: f32) {
        let keep = decay(self.config.balance_drag, delta_time);
        let orientation = &mut self.body.state.orientation;
        orientation.pitch *= keep;
        orientation.roll *= keep;
        orientation.yaw = interp_angle_to(
            orientation.yaw,
            self.look_target_yaw,
            delta_time,
            self.config.yaw_interp_speed,
        );
    }

    fn resolve_collisions(&mut self, probe: &dyn CollisionProbe, delta_time: f32) {
        let contacts = self.body.probe(
            probe,
            self.config.capsule,
            self.config.probe_mode,
            delta_time,
            self.actor,
        );
        // Ground contact stops the fall this tick; the drone keeps no ground state.
        resolve_contacts(&mut self.body.state.velocity, &contacts, self.config.ground_tolerance);
    }
}

impl Tickable for DroneBody {
    fn tick(&mut self, probe: &dyn CollisionProbe, delta_time: f32) {
        self.body.add_gravity();
        self.add_lift();
        self.balance(delta_time);

        self.body.integrate(delta_time, None);
        self.resolve_collisions(probe, delta_time);
        self.body.commit_position(delta_time);

        log::trace!(
            "drone pos={:?} vel={:?} rot={:?}",
            self.body.state.position,
            self.body.state.velocity,
            self.body.state.orientation
        );
    }
}

impl InputReceiver for DroneBody {
    fn on_move_axis_2d(&mut self, x: f32, y: f32) {
        self.move_input(x, y, 0.0);
    }

    fn on_move_axis_3d(&mut self, x: f32, y: f32, z: f32) {
        self.move_input(x, y, z);
    }

    fn on_look_axis_2d(&mut self, yaw: f32, pitch: f32) {
        self.look(yaw, pitch);
    }
}
