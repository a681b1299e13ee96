//! Pawnmotion physics.
//!
//! Per-frame locomotion for a walking character and a hovering drone:
//! force accumulation, semi-implicit Euler integration with exponential
//! drag, a capsule collision probe, and velocity correction against the
//! contacts it reports.
//!
//! # Architecture
//!
//! - **Collision**: the [`CollisionProbe`] seam and a parry3d-backed [`CollisionWorld`]
//! - **Movement**: the bodies, their tuning and the input events they accept
//!
//! World units are centimeters, Z is up, and angles are in degrees.

pub mod collision;
pub mod error;
pub mod movement;
pub mod rotator;

// Re-export commonly used types
pub use collision::{ActorId, CapsuleShape, CollisionProbe, CollisionWorld, Contact, OpenSpace, SweepQuery};
pub use error::ConfigError;
pub use movement::{
    BodyState, CharacterBody, CharacterConfig, DroneBody, DroneConfig, InputEvent, InputReceiver, MovementFlags,
    ProbeMode, Tickable,
};
pub use rotator::Rotator;
