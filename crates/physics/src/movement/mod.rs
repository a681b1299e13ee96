//! Locomotion bodies.
//!
//! Two concrete bodies share one integration core:
//!
//! - [`CharacterBody`] walks, sprints and jumps, and tracks whether it is grounded
//! - [`DroneBody`] hovers on lift equal to its weight and levels itself
//!
//! # Design
//!
//! Input handlers only add to the force accumulator or change orientation
//! targets. Position changes happen in [`Tickable::tick`], which runs
//! gravity, body-specific forces, integration, collision response and the
//! position commit in that order.
//!
//! Drag is applied as `(1 - drag) ^ dt`, so results do not depend on how a
//! span of time is split into frames.

mod body;
mod character;
mod config;
mod contact;
mod drone;
mod pawn;
mod state;

pub use body::{decay, COMMIT_EPSILON};
pub use character::CharacterBody;
pub use config::{
    CharacterConfig, DroneConfig, ProbeMode, DEFAULT_GROUND_TOLERANCE, DEFAULT_INPUT_DEAD_ZONE,
    DEFAULT_REST_SPEED_SQ,
};
pub use contact::{is_ground_normal, remove_penetration, resolve_contacts, ContactReport};
pub use drone::DroneBody;
pub use pawn::{InputEvent, InputReceiver, Tickable};
pub use state::{BodyState, MovementFlags};
