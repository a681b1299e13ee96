//! Collision probing for locomotion bodies.
//!
//! Bodies never walk world geometry themselves. Once per tick they hand a
//! [`SweepQuery`] to a [`CollisionProbe`] and correct their velocity against
//! the returned contacts.
//!
//! # Key Types
//!
//! - [`CollisionProbe`]: The query seam the host implements
//! - [`SweepQuery`]: Capsule, start/end position, orientation, ignored actor
//! - [`Contact`]: Impact normal and point
//! - [`CollisionWorld`]: A ready-made parry3d probe for hosts and tests

mod probe;
mod world;

pub use probe::{ActorId, CapsuleShape, CollisionProbe, Contact, OpenSpace, SweepQuery};
pub use world::{CollisionBrush, CollisionWorld, RayHit};
