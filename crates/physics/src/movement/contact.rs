//! Velocity correction against probe contacts.
//!
//! Each contact removes the part of the velocity that points into its
//! surface. Contacts are applied one after another rather than solved
//! together, so a body wedged into a corner can keep a small residual push
//! into one surface after correcting for the other.

use glam::Vec3;

use crate::collision::Contact;

/// What a collision pass saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactReport {
    /// At least one contact was reported.
    pub touched: bool,
    /// At least one contact was walkable ground.
    pub ground: bool,
}

/// Remove the component of `velocity` that points into the surface.
///
/// Moving along or away from the surface is left untouched. This is a hard
/// projection, not a bounce.
pub fn remove_penetration(velocity: Vec3, normal: Vec3) -> Vec3 {
    let into = velocity.dot(normal);
    if into < 0.0 {
        velocity - normal * into
    } else {
        velocity
    }
}

/// Whether a contact normal is close enough to world up to stand on.
pub fn is_ground_normal(normal: Vec3, tolerance: f32) -> bool {
    (normal.dot(Vec3::Z) - 1.0).abs() <= tolerance
}

/// Correct `velocity` against every contact in order.
///
/// On ground contacts any remaining downward velocity is also cleared.
pub fn resolve_contacts(velocity: &mut Vec3, contacts: &[Contact], ground_tolerance: f32) -> ContactReport {
    let mut report = ContactReport {
        touched: !contacts.is_empty(),
        ground: false,
    };

    for contact in contacts {
        *velocity = remove_penetration(*velocity, contact.normal);

        if is_ground_normal(contact.normal, ground_tolerance) {
            report.ground = true;
            if velocity.z < 0.0 {
                velocity.z = 0.0;
            }
        }
    }

    report
}
