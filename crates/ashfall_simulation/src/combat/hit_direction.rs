//! Hit direction classification (which side of the victim was struck).
//!
//! Convention: Y up, `right = forward × Y`. Angle θ between forward and the
//! horizontal direction to the impact, signed negative when the impact lies
//! on the left half-space. Buckets are half-open:
//!
//! | θ (degrees)    | category  |
//! |----------------|-----------|
//! | [-45, 45)      | FromFront |
//! | [-135, -45)    | FromLeft  |
//! | [45, 135)      | FromRight |
//! | otherwise      | FromBack  |

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum HitDirection {
    FromFront,
    FromLeft,
    FromRight,
    FromBack,
}

impl HitDirection {
    pub fn from_angle(theta_degrees: f32) -> Self {
        if (-45.0..45.0).contains(&theta_degrees) {
            HitDirection::FromFront
        } else if (-135.0..-45.0).contains(&theta_degrees) {
            HitDirection::FromLeft
        } else if (45.0..135.0).contains(&theta_degrees) {
            HitDirection::FromRight
        } else {
            HitDirection::FromBack
        }
    }

    /// Hit-reaction animation section name.
    pub fn section_name(&self) -> &'static str {
        match self {
            HitDirection::FromFront => "FromFront",
            HitDirection::FromLeft => "FromLeft",
            HitDirection::FromRight => "FromRight",
            HitDirection::FromBack => "FromBack",
        }
    }
}

/// Signed angle (degrees) between `forward` and the horizontal direction
/// from `position` to `impact`. None for a degenerate input (impact at
/// the victim's own position, or zero forward).
pub fn hit_angle(forward: Vec3, position: Vec3, impact: Vec3) -> Option<f32> {
    let forward = Vec3::new(forward.x, 0.0, forward.z).try_normalize()?;
    // Impact lowered to the victim's height: only yaw matters
    let to_hit = Vec3::new(impact.x - position.x, 0.0, impact.z - position.z).try_normalize()?;

    let cos_theta = forward.dot(to_hit).clamp(-1.0, 1.0);
    let mut theta = cos_theta.acos().to_degrees();

    let right = forward.cross(Vec3::Y);
    if to_hit.dot(right) < 0.0 {
        theta = -theta;
    }
    Some(theta)
}

/// Classify an impact. Degenerate input falls back to `FromFront`.
pub fn classify_hit(forward: Vec3, position: Vec3, impact: Vec3) -> HitDirection {
    hit_angle(forward, position, impact)
        .map(HitDirection::from_angle)
        .unwrap_or(HitDirection::FromFront)
}
