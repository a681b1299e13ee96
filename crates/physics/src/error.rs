//! Configuration errors.
//!
//! Bodies validate their tuning once at construction. Everything that runs
//! per tick afterwards is total over finite input.

use thiserror::Error;

/// Rejected body or shape configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f32),

    #[error("{name} must be within [0, 1), got {value}")]
    DragOutOfRange { name: &'static str, value: f32 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("invalid capsule (radius={radius}, half_height={half_height}): need 0 < radius <= half_height")]
    InvalidCapsule { radius: f32, half_height: f32 },
}

pub(crate) fn check_mass(mass: f32) -> Result<(), ConfigError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidMass(mass))
    }
}

pub(crate) fn check_drag(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::DragOutOfRange { name, value })
    }
}

pub(crate) fn check_finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

pub(crate) fn check_non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_checks() {
        assert!(check_mass(5.0).is_ok());
        assert_eq!(check_mass(0.0), Err(ConfigError::InvalidMass(0.0)));
        assert!(check_mass(-1.0).is_err());
        assert!(check_mass(f32::NAN).is_err());
        assert!(check_mass(f32::INFINITY).is_err());
    }

    #[test]
    fn test_drag_range_is_half_open() {
        assert!(check_drag("air_drag", 0.0).is_ok());
        assert!(check_drag("air_drag", 0.99).is_ok());
        assert!(check_drag("air_drag", 1.0).is_err());
        assert!(check_drag("air_drag", 1.5).is_err());
        assert!(check_drag("air_drag", f32::NAN).is_err());
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = check_non_negative("rest_speed_sq", -0.5).unwrap_err();
        assert!(err.to_string().contains("rest_speed_sq"));
    }
}
