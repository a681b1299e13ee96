//! Probe queries and contacts.
//!
//! A probe places a capsule in the world (optionally moving it along a
//! segment) and reports every surface it touches. The host owns the actual
//! geometry; bodies only see the [`CollisionProbe`] trait.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rotator::Rotator;

/// Identifier the host assigns to an actor, used to skip its own geometry.
pub type ActorId = u32;

/// Capsule collision shape.
///
/// The capsule is centered on the body position and aligned with the body's
/// up axis. `half_height` runs from the center to the tip of a cap, so it
/// always includes the radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapsuleShape {
    /// Radius of the cylinder and both caps.
    pub radius: f32,
    /// Center to cap tip, radius included.
    pub half_height: f32,
}

impl CapsuleShape {
    /// Walking character capsule.
    pub const CHARACTER: Self = Self {
        radius: 34.0,
        half_height: 88.0,
    };

    /// Compact drone capsule.
    pub const DRONE: Self = Self {
        radius: 30.0,
        half_height: 30.0,
    };

    pub const fn new(radius: f32, half_height: f32) -> Self {
        Self {
            radius,
            half_height,
        }
    }

    /// Half-length of the straight section between the caps.
    pub fn cylinder_half_height(&self) -> f32 {
        (self.half_height - self.radius).max(0.0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = self.radius.is_finite()
            && self.half_height.is_finite()
            && self.radius > 0.0
            && self.half_height >= self.radius;
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidCapsule {
                radius: self.radius,
                half_height: self.half_height,
            })
        }
    }
}

/// One probe request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepQuery {
    pub shape: CapsuleShape,
    /// Capsule center where the query starts.
    pub from: Vec3,
    /// Capsule center where the query ends. Equal to `from` for an overlap test.
    pub to: Vec3,
    pub orientation: Rotator,
    /// Geometry owned by this actor is ignored.
    pub ignore: Option<ActorId>,
}

impl SweepQuery {
    /// Overlap test at a single position.
    pub fn overlap(shape: CapsuleShape, at: Vec3, orientation: Rotator) -> Self {
        Self {
            shape,
            from: at,
            to: at,
            orientation,
            ignore: None,
        }
    }

    pub fn ignoring(mut self, actor: Option<ActorId>) -> Self {
        self.ignore = actor;
        self
    }

    /// True when the query does not move.
    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.from == self.to
    }
}

/// A touched surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Unit surface normal pointing away from the surface, toward the body.
    pub normal: Vec3,
    /// Point on the surface.
    pub point: Vec3,
}

impl Contact {
    pub fn new(normal: Vec3, point: Vec3) -> Self {
        Self { normal, point }
    }
}

/// Host-provided collision query.
///
/// Returns every contact along the query in no particular order. An empty
/// result means open space and is the common case.
pub trait CollisionProbe {
    fn sweep(&self, query: &SweepQuery) -> Vec<Contact>;
}

impl<T: CollisionProbe + ?Sized> CollisionProbe for &T {
    fn sweep(&self, query: &SweepQuery) -> Vec<Contact> {
        (**self).sweep(query)
    }
}

/// Probe that never reports anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSpace;

impl CollisionProbe for OpenSpace {
    fn sweep(&self, _query: &SweepQuery) -> Vec<Contact> {
        Vec::new()
    }
}
