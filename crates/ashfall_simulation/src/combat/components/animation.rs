//! Animation catalogue per combatant.
//!
//! The simulation never plays anything itself: it picks a segment and emits
//! `PlayAnimation`; presentation plays it and answers with `AnimationNotify`.
//! A missing segment (empty list, `None`) means the request is skipped.

use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;

use crate::combat::events::AnimNotify;
use crate::combat::hit_direction::HitDirection;

/// Which montage a section belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum MontageKind {
    Attack,
    Dodge,
    Equip,
    HitReact,
    Death,
}

/// A playable piece of animation (montage + section name).
#[derive(Debug, Clone, PartialEq, Eq, Reflect)]
pub struct AnimationSegment {
    pub montage: MontageKind,
    pub section: String,
}

impl AnimationSegment {
    pub fn new(montage: MontageKind, section: impl Into<String>) -> Self {
        Self {
            montage,
            section: section.into(),
        }
    }
}

#[derive(Component, Debug, Clone, PartialEq, Deserialize, Reflect)]
#[reflect(Component)]
#[serde(default)]
pub struct AnimationSet {
    pub attack_sections: Vec<String>,
    /// Played instead of a random attack while strafing.
    pub strafing_attack_section: Option<String>,
    pub dodge_section: Option<String>,
    pub equip_section: Option<String>,
    pub unequip_section: Option<String>,
    /// Hit-react montage present (sections are named after `HitDirection`).
    pub hit_reactions: bool,
    pub death_sections: Vec<String>,
}

impl Default for AnimationSet {
    fn default() -> Self {
        Self {
            attack_sections: vec!["Attack1".into(), "Attack2".into(), "Attack3".into()],
            strafing_attack_section: Some("AttackStrafe".into()),
            dodge_section: Some("Dodge".into()),
            equip_section: Some("Equip".into()),
            unequip_section: Some("Unequip".into()),
            hit_reactions: true,
            death_sections: (1..=6).map(|i| format!("Death{}", i)).collect(),
        }
    }
}

impl AnimationSet {
    /// Empty catalogue: every request is skipped.
    pub fn empty() -> Self {
        Self {
            attack_sections: Vec::new(),
            strafing_attack_section: None,
            dodge_section: None,
            equip_section: None,
            unequip_section: None,
            hit_reactions: false,
            death_sections: Vec::new(),
        }
    }

    /// Strafing variant when |intent.x| > threshold, otherwise a uniformly
    /// random attack section.
    pub fn attack_segment<R: Rng>(&self, intent: Vec2, strafe_threshold: f32, rng: &mut R) -> Option<AnimationSegment> {
        if intent.x.abs() > strafe_threshold {
            if let Some(section) = &self.strafing_attack_section {
                return Some(AnimationSegment::new(MontageKind::Attack, section.clone()));
            }
        }

        pick(&self.attack_sections, rng).map(|(_, section)| AnimationSegment::new(MontageKind::Attack, section))
    }

    pub fn dodge_segment(&self) -> Option<AnimationSegment> {
        self.dodge_section
            .as_ref()
            .map(|section| AnimationSegment::new(MontageKind::Dodge, section.clone()))
    }

    pub fn equip_segment(&self) -> Option<AnimationSegment> {
        self.equip_section
            .as_ref()
            .map(|section| AnimationSegment::new(MontageKind::Equip, section.clone()))
    }

    pub fn unequip_segment(&self) -> Option<AnimationSegment> {
        self.unequip_section
            .as_ref()
            .map(|section| AnimationSegment::new(MontageKind::Equip, section.clone()))
    }

    /// Socket signal an equip-montage segment emits mid-play: the unequip
    /// section sheathes, any other equip section draws.
    pub fn socket_notify(&self, segment: &AnimationSegment) -> Option<AnimNotify> {
        if segment.montage != MontageKind::Equip {
            return None;
        }
        if self.unequip_section.as_deref() == Some(segment.section.as_str()) {
            Some(AnimNotify::WeaponSheathed)
        } else {
            Some(AnimNotify::WeaponDrawn)
        }
    }

    pub fn hit_react_segment(&self, direction: HitDirection) -> Option<AnimationSegment> {
        self.hit_reactions
            .then(|| AnimationSegment::new(MontageKind::HitReact, direction.section_name()))
    }

    /// Random death variant + its pose index.
    pub fn death_segment<R: Rng>(&self, rng: &mut R) -> Option<(usize, AnimationSegment)> {
        pick(&self.death_sections, rng).map(|(index, section)| (index, AnimationSegment::new(MontageKind::Death, section)))
    }
}

fn pick<R: Rng>(sections: &[String], rng: &mut R) -> Option<(usize, String)> {
    if sections.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..sections.len());
    Some((index, sections[index].clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_strafing_variant_selected_above_threshold() {
        let set = AnimationSet::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let segment = set.attack_segment(Vec2::new(-0.5, 0.0), 0.2, &mut rng);
        assert_eq!(segment.map(|s| s.section), Some("AttackStrafe".to_string()));
    }

    #[test]
    fn test_threshold_is_strict() {
        let set = AnimationSet::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let segment = set.attack_segment(Vec2::new(0.2, 1.0), 0.2, &mut rng).map(|s| s.section);
        assert!(segment.is_some());
        assert!(set.attack_sections.contains(&segment.unwrap_or_default()));
    }

    #[test]
    fn test_missing_sections_yield_none() {
        let set = AnimationSet::empty();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert!(set.attack_segment(Vec2::ZERO, 0.2, &mut rng).is_none());
        assert!(set.dodge_segment().is_none());
        assert!(set.equip_segment().is_none());
        assert!(set.hit_react_segment(HitDirection::FromBack).is_none());
        assert!(set.death_segment(&mut rng).is_none());
    }

    #[test]
    fn test_strafing_falls_back_to_random_attack() {
        let set = AnimationSet {
            strafing_attack_section: None,
            ..AnimationSet::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let segment = set.attack_segment(Vec2::new(1.0, 0.0), 0.2, &mut rng);
        assert_eq!(segment.map(|s| s.montage), Some(MontageKind::Attack));
    }

    #[test]
    fn test_death_pose_index_matches_section() {
        let set = AnimationSet::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..20 {
            let Some((index, segment)) = set.death_segment(&mut rng) else {
                panic!("default set has death sections");
            };
            assert_eq!(segment.section, set.death_sections[index]);
        }
    }

    #[test]
    fn test_hit_react_uses_direction_name() {
        let set = AnimationSet::default();
        let segment = set.hit_react_segment(HitDirection::FromLeft);
        assert_eq!(segment, Some(AnimationSegment::new(MontageKind::HitReact, "FromLeft")));
    }

    #[test]
    fn test_socket_notify_follows_section() {
        let set = AnimationSet::default();

        let equip = set.equip_segment().map(|segment| set.socket_notify(&segment));
        let unequip = set.unequip_segment().map(|segment| set.socket_notify(&segment));
        assert_eq!(equip, Some(Some(AnimNotify::WeaponDrawn)));
        assert_eq!(unequip, Some(Some(AnimNotify::WeaponSheathed)));

        let dodge = AnimationSegment::new(MontageKind::Dodge, "Dodge");
        assert_eq!(set.socket_notify(&dodge), None);
    }
}
