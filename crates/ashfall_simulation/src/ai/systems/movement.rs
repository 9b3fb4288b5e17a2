//! AI movement helpers (motion warp targets).

use bevy::prelude::*;

use crate::ai::{AiBehavior, AiConfig, WarpTargets};

/// Translation warp target: точка на `warp_distance` от цели, со стороны AI.
pub fn translation_warp_target(own: Vec3, target: Vec3, warp_distance: f32) -> Vec3 {
    target + (own - target).normalize_or_zero() * warp_distance
}

/// Система: обновление motion warp targets
///
/// Presentation использует их, чтобы attack animation "доводила" AI до
/// цели и разворачивала к ней.
pub fn update_warp_targets(
    mut ai_query: Query<(&AiBehavior, &AiConfig, &Transform, &mut WarpTargets)>,
    targets: Query<&Transform>,
) {
    for (behavior, config, transform, mut warp) in ai_query.iter_mut() {
        let target_position = behavior
            .combat_target
            .and_then(|target| targets.get(target).ok())
            .map(|target_transform| target_transform.translation);

        let next = match target_position {
            Some(target) if !behavior.is_dead() => WarpTargets {
                translation: Some(translation_warp_target(transform.translation, target, config.warp_distance)),
                rotation: Some(target),
            },
            _ => WarpTargets::default(),
        };
        warp.set_if_neq(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warp_target_between_self_and_target() {
        let own = Vec3::new(300.0, 0.0, 0.0);
        let target = Vec3::ZERO;
        assert_eq!(translation_warp_target(own, target, 70.0), Vec3::new(70.0, 0.0, 0.0));
    }

    #[test]
    fn test_warp_target_degenerate() {
        let position = Vec3::new(5.0, 0.0, 5.0);
        assert_eq!(translation_warp_target(position, position, 70.0), position);
    }
}
