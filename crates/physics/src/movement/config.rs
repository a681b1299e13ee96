//! Body tuning.
//!
//! Values use centimeters, seconds and kilograms, matching the host
//! engine's world units. Drag coefficients are the fraction of velocity lost
//! per second, applied as `(1 - drag) ^ dt`.

use serde::{Deserialize, Serialize};

use crate::collision::CapsuleShape;
use crate::error::{check_drag, check_finite, check_mass, check_non_negative, ConfigError};

/// Squared speed below which velocity snaps to zero after integration.
pub const DEFAULT_REST_SPEED_SQ: f32 = 0.1;

/// Allowed deviation of `dot(normal, up)` from 1 for a ground contact.
pub const DEFAULT_GROUND_TOLERANCE: f32 = 0.1;

/// Input axes with magnitude at or below this are ignored.
pub const DEFAULT_INPUT_DEAD_ZONE: f32 = 1.0e-4;

/// Where the collision probe is evaluated each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeMode {
    /// Overlap test at the current position, before integration.
    #[default]
    Stationary,
    /// Overlap test at `position + velocity * dt`, both ends of the query
    /// at that next position. This is where a per-frame collision pass that
    /// tests "where the body is about to be" looks.
    Predicted,
    /// Path from the current position to the predicted one.
    Swept,
}

/// Tuning for the walking character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterConfig {
    /// Collision capsule.
    pub capsule: CapsuleShape,

    /// Force per unit of move input.
    pub move_scalar: f32,

    /// Upward force of a jump.
    pub jump_scalar: f32,

    /// Mass (kg). Must be positive.
    pub mass: f32,

    /// Drag applied every tick.
    pub air_drag: f32,

    /// Extra drag applied while grounded.
    pub ground_drag: f32,

    /// Gravity acceleration (cm/s²).
    pub gravity: f32,

    /// Whether gravity starts enabled.
    pub use_gravity: bool,

    /// Move force multiplier while airborne.
    pub air_control: f32,

    /// Move force multiplier while sprinting.
    pub sprint_multiplier: f32,

    pub rest_speed_sq: f32,
    pub ground_tolerance: f32,
    pub input_dead_zone: f32,
    pub probe_mode: ProbeMode,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            capsule: CapsuleShape::CHARACTER,
            move_scalar: 10_000.0,
            jump_scalar: 300_000.0,
            mass: 5.0,
            air_drag: 0.1,
            ground_drag: 0.7,
            gravity: 980.0,
            use_gravity: true,
            air_control: 0.1,
            sprint_multiplier: 1.5,
            rest_speed_sq: DEFAULT_REST_SPEED_SQ,
            ground_tolerance: DEFAULT_GROUND_TOLERANCE,
            input_dead_zone: DEFAULT_INPUT_DEAD_ZONE,
            probe_mode: ProbeMode::Stationary,
        }
    }
}

impl CharacterConfig {
    /// Snappier ground control with stronger air steering.
    pub fn arcade() -> Self {
        Self {
            move_scalar: 14_000.0,
            ground_drag: 0.9,
            air_control: 0.3,
            probe_mode: ProbeMode::Swept,
            ..Default::default()
        }
    }

    /// Moon-like gravity with long, floaty jumps.
    pub fn low_gravity() -> Self {
        Self {
            gravity: 160.0,
            jump_scalar: 120_000.0,
            air_drag: 0.02,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capsule.validate()?;
        check_mass(self.mass)?;
        check_drag("air_drag", self.air_drag)?;
        check_drag("ground_drag", self.ground_drag)?;
        check_finite("move_scalar", self.move_scalar)?;
        check_finite("jump_scalar", self.jump_scalar)?;
        check_finite("gravity", self.gravity)?;
        check_finite("air_control", self.air_control)?;
        check_finite("sprint_multiplier", self.sprint_multiplier)?;
        check_non_negative("rest_speed_sq", self.rest_speed_sq)?;
        check_non_negative("ground_tolerance", self.ground_tolerance)?;
        check_non_negative("input_dead_zone", self.input_dead_zone)?;
        Ok(())
    }
}

/// Tuning for the drone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneConfig {
    /// Collision capsule.
    pub capsule: CapsuleShape,

    /// Thrust per unit of vertical input, per unit of mass.
    pub move_scalar: f32,

    /// Mass (kg). Must be positive.
    pub mass: f32,

    /// Drag applied every tick.
    pub drag: f32,

    /// Pitch/roll decay toward level.
    pub balance_drag: f32,

    /// Gravity acceleration (cm/s²).
    pub gravity: f32,

    /// Yaw approach rate toward the look target (per second).
    pub yaw_interp_speed: f32,

    pub rest_speed_sq: f32,
    pub ground_tolerance: f32,
    pub input_dead_zone: f32,
    pub probe_mode: ProbeMode,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            capsule: CapsuleShape::DRONE,
            move_scalar: 1_000.0,
            mass: 5.0,
            drag: 0.3,
            balance_drag: 0.8,
            gravity: 980.0,
            yaw_interp_speed: 5.0,
            rest_speed_sq: DEFAULT_REST_SPEED_SQ,
            ground_tolerance: DEFAULT_GROUND_TOLERANCE,
            input_dead_zone: DEFAULT_INPUT_DEAD_ZONE,
            probe_mode: ProbeMode::Stationary,
        }
    }
}

impl DroneConfig {
    /// Quicker to turn and to settle.
    pub fn agile() -> Self {
        Self {
            move_scalar: 1_600.0,
            drag: 0.5,
            balance_drag: 0.95,
            yaw_interp_speed: 10.0,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capsule.validate()?;
        check_mass(self.mass)?;
        check_drag("drag", self.drag)?;
        check_drag("balance_drag", self.balance_drag)?;
        check_finite("move_scalar", self.move_scalar)?;
        check_finite("gravity", self.gravity)?;
        check_finite("yaw_interp_speed", self.yaw_interp_speed)?;
        check_non_negative("rest_speed_sq", self.rest_speed_sq)?;
        check_non_negative("ground_tolerance", self.ground_tolerance)?;
        check_non_negative("input_dead_zone", self.input_dead_zone)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(CharacterConfig::default().validate().is_ok());
        assert!(CharacterConfig::arcade().validate().is_ok());
        assert!(CharacterConfig::low_gravity().validate().is_ok());
        assert!(DroneConfig::default().validate().is_ok());
        assert!(DroneConfig::agile().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_mass() {
        let config = CharacterConfig {
            mass: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidMass(0.0)));

        let config = DroneConfig {
            mass: -2.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidMass(-2.0)));
    }

    #[test]
    fn test_rejects_drag_outside_unit_range() {
        let config = DroneConfig {
            balance_drag: 1.2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DragOutOfRange { name: "balance_drag", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_capsule() {
        let config = CharacterConfig {
            capsule: CapsuleShape::new(50.0, 10.0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCapsule { .. })));
    }

    #[test]
    fn test_default_probe_mode_is_stationary() {
        assert_eq!(ProbeMode::default(), ProbeMode::Stationary);
        assert_eq!(CharacterConfig::default().probe_mode, ProbeMode::Stationary);
    }
}
