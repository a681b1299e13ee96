//! Body state shared by both locomotion variants.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::rotator::Rotator;

/// Flags describing a body's current movement state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementFlags(pub u16);

impl MovementFlags {
    /// Body touched a walkable surface on its last collision pass.
    pub const ON_GROUND: u16 = 1 << 0;

    /// Sprint is held.
    pub const SPRINTING: u16 = 1 << 1;

    /// Gravity is disabled regardless of ground state.
    pub const NO_GRAVITY: u16 = 1 << 2;

    /// A controller owns this body; input handlers are live.
    pub const POSSESSED: u16 = 1 << 3;

    /// Check if a flag is set.
    #[inline]
    pub fn has(self, flag: u16) -> bool {
        (self.0 & flag) != 0
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u16, value: bool) {
        if value {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    #[inline]
    pub fn on_ground(self) -> bool {
        self.has(Self::ON_GROUND)
    }

    #[inline]
    pub fn sprinting(self) -> bool {
        self.has(Self::SPRINTING)
    }

    #[inline]
    pub fn uses_gravity(self) -> bool {
        !self.has(Self::NO_GRAVITY)
    }

    #[inline]
    pub fn possessed(self) -> bool {
        self.has(Self::POSSESSED)
    }
}

/// Physical state of one body.
///
/// `force` is an accumulator: contributors add into it between ticks and
/// integration consumes and clears it, so it is zero whenever a tick starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    /// Capsule center in world space (Z-up).
    pub position: Vec3,

    /// Velocity in world units per second.
    pub velocity: Vec3,

    /// Force accumulated since the last integration.
    pub force: Vec3,

    /// Body orientation.
    pub orientation: Rotator,

    /// Movement state flags.
    pub flags: MovementFlags,
}

impl BodyState {
    /// Create a resting state at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}
