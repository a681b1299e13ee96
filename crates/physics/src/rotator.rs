//! Euler orientation in degrees.
//!
//! World space is Z-up. Yaw turns about +Z, pitch tilts the nose up, roll
//! banks about the forward axis. Basis vectors follow the usual game-engine
//! rotator matrix, so a level rotator has `forward = +X`, `right = +Y` and
//! `up = +Z`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Differences smaller than this (degrees) snap straight to the target.
const ANGLE_EPSILON: f32 = 1.0e-4;

/// Pitch/yaw/roll orientation, all in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotator {
    /// Nose up/down (degrees).
    pub pitch: f32,
    /// Heading about world up (degrees).
    pub yaw: f32,
    /// Bank about the forward axis (degrees).
    pub roll: f32,
}

impl Rotator {
    /// Level orientation facing +X.
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Level orientation with the given heading.
    pub const fn from_yaw(yaw: f32) -> Self {
        Self {
            pitch: 0.0,
            yaw,
            roll: 0.0,
        }
    }

    fn sin_cos(&self) -> ((f32, f32), (f32, f32), (f32, f32)) {
        (
            self.pitch.to_radians().sin_cos(),
            self.yaw.to_radians().sin_cos(),
            self.roll.to_radians().sin_cos(),
        )
    }

    /// Local +X axis in world space.
    pub fn forward(&self) -> Vec3 {
        let ((sp, cp), (sy, cy), _) = self.sin_cos();
        Vec3::new(cp * cy, cp * sy, sp)
    }

    /// Local +Y axis in world space.
    pub fn right(&self) -> Vec3 {
        let ((sp, cp), (sy, cy), (sr, cr)) = self.sin_cos();
        Vec3::new(sr * sp * cy - cr * sy, sr * sp * sy + cr * cy, -sr * cp)
    }

    /// Local +Z axis in world space.
    pub fn up(&self) -> Vec3 {
        let ((sp, cp), (sy, cy), (sr, cr)) = self.sin_cos();
        Vec3::new(-(cr * sp * cy + sr * sy), cy * sr - cr * sp * sy, cr * cp)
    }

    /// Every axis wrapped into (-180, 180].
    pub fn normalized(self) -> Self {
        Self {
            pitch: normalize_axis(self.pitch),
            yaw: normalize_axis(self.yaw),
            roll: normalize_axis(self.roll),
        }
    }

    /// Whether pitch and roll are both within `tolerance` degrees of zero.
    pub fn is_level(&self, tolerance: f32) -> bool {
        normalize_axis(self.pitch).abs() <= tolerance && normalize_axis(self.roll).abs() <= tolerance
    }
}

/// Wrap an angle in degrees into (-180, 180].
pub fn normalize_axis(angle: f32) -> f32 {
    let mut wrapped = angle % 360.0;
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    if wrapped > 180.0 {
        wrapped -= 360.0;
    }
    wrapped
}

/// Move `current` toward `target` along the shortest arc.
///
/// Covers `clamp(delta_time * speed, 0, 1)` of the remaining difference, so
/// the approach is smooth and never overshoots. A non-positive speed snaps
/// to the target.
pub fn interp_angle_to(current: f32, target: f32, delta_time: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return normalize_axis(target);
    }

    let delta = normalize_axis(target - current);
    if delta.abs() < ANGLE_EPSILON {
        return normalize_axis(target);
    }

    let alpha = (delta_time * speed).clamp(0.0, 1.0);
    normalize_axis(current + delta * alpha)
}
