//! Shared locomotion core: force accumulation, integration, probing and
//! position commit.
//!
//! Both the character and the drone own one [`Body`] and layer their own
//! force rules on top of it.

use glam::Vec3;

use crate::collision::{ActorId, CapsuleShape, CollisionProbe, Contact, SweepQuery};

use super::config::ProbeMode;
use super::state::BodyState;

/// Per-component tolerance below which velocity counts as zero for commit.
pub const COMMIT_EPSILON: f32 = 1.0e-4;

/// Fraction of velocity (or angle) kept after `delta_time` seconds of drag.
///
/// `(1 - drag) ^ dt` composes exactly across sub-steps, so the decay rate
/// does not depend on frame rate.
#[inline]
pub fn decay(drag: f32, delta_time: f32) -> f32 {
    (1.0 - drag).powf(delta_time)
}

/// Point-mass body integrated with semi-implicit Euler.
#[derive(Debug, Clone)]
pub struct Body {
    /// Physical state.
    pub state: BodyState,
    mass: f32,
    gravity: f32,
    drag: f32,
    rest_speed_sq: f32,
}

impl Body {
    /// Create a body at rest. `mass` must already be validated as positive.
    pub(crate) fn new(position: Vec3, mass: f32, gravity: f32, drag: f32, rest_speed_sq: f32) -> Self {
        Self {
            state: BodyState::new(position),
            mass,
            gravity,
            drag,
            rest_speed_sq,
        }
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Add to the force accumulator.
    #[inline]
    pub fn add_force(&mut self, force: Vec3) {
        self.state.force += force;
    }

    /// Weight of the body along world down.
    #[inline]
    pub fn weight(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, -self.mass * self.gravity)
    }

    /// Add the body's weight to the accumulator.
    pub fn add_gravity(&mut self) {
        let weight = self.weight();
        self.add_force(weight);
    }

    /// Integrate accumulated force into velocity and clear the accumulator.
    ///
    /// `extra_drag` stacks on top of the body's own drag (ground friction).
    pub fn integrate(&mut self, delta_time: f32, extra_drag: Option<f32>) {
        let acceleration = self.state.force / self.mass;
        self.state.velocity += acceleration * delta_time;

        self.state.velocity *= decay(self.drag, delta_time);
        if let Some(drag) = extra_drag {
            self.state.velocity *= decay(drag, delta_time);
        }

        if self.state.velocity.length_squared() < self.rest_speed_sq {
            self.state.velocity = Vec3::ZERO;
        }

        self.state.force = Vec3::ZERO;
    }

    /// Build the tick's probe query for the given placement mode.
    pub fn probe_query(
        &self,
        shape: CapsuleShape,
        mode: ProbeMode,
        delta_time: f32,
        ignore: Option<ActorId>,
    ) -> SweepQuery {
        let here = self.state.position;
        let next = here + self.state.velocity * delta_time;
        let (from, to) = match mode {
            ProbeMode::Stationary => (here, here),
            ProbeMode::Predicted => (next, next),
            ProbeMode::Swept => (here, next),
        };

        SweepQuery {
            shape,
            from,
            to,
            orientation: self.state.orientation,
            ignore,
        }
    }

    /// Run the tick's probe.
    pub fn probe(
        &self,
        probe: &dyn CollisionProbe,
        shape: CapsuleShape,
        mode: ProbeMode,
        delta_time: f32,
        ignore: Option<ActorId>,
    ) -> Vec<Contact> {
        probe.sweep(&self.probe_query(shape, mode, delta_time, ignore))
    }

    /// Translate by `velocity * dt`. Returns `false` when the body was at rest.
    pub fn commit_position(&mut self, delta_time: f32) -> bool {
        if self.state.velocity.abs().max_element() <= COMMIT_EPSILON {
            return false;
        }
        self.state.position += self.state.velocity * delta_time;
        true
    }
}

// ============================================================================
// Tests
// ============================================================================
