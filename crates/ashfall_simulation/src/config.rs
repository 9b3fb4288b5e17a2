//! Combat profile: all tuning numbers in one TOML document.
//!
//! ```toml
//! [vitals]
//! max_health = 100.0
//!
//! [actions]
//! dodge_cost = 15.0
//! pickup_policy = "require_idle"
//!
//! [ai]
//! attack_radius = 150.0
//! ```
//!
//! Missing sections/fields fall back to defaults. `validate` rejects
//! inverted ranges and nonsensical radii before anything spawns.

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::ai::AiConfig;
use crate::combat::{ActionConfig, AnimationSet, Weapon, WeaponPickup};
use crate::components::{Health, Hurtbox, Stamina};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse combat profile: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field}: min {min} exceeds max {max}")]
    InvertedRange { field: &'static str, min: f32, max: f32 },

    #[error("attack_radius {attack} exceeds combat_radius {combat}")]
    AttackOutsideCombat { attack: f32, combat: f32 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VitalsProfile {
    pub max_health: f32,
    pub max_stamina: f32,
    /// stamina per second
    pub stamina_regen: f32,
    pub hurtbox_radius: f32,
    pub hurtbox_height: f32,
}

impl Default for VitalsProfile {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_stamina: 100.0,
            stamina_regen: 8.0,
            hurtbox_radius: 45.0,
            hurtbox_height: 90.0,
        }
    }
}

impl VitalsProfile {
    pub fn health(&self) -> Health {
        Health::new(self.max_health)
    }

    pub fn stamina(&self) -> Stamina {
        Stamina::new(self.max_stamina).with_regen(self.stamina_regen)
    }

    pub fn hurtbox(&self) -> Hurtbox {
        Hurtbox {
            radius: self.hurtbox_radius,
            height: self.hurtbox_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeaponProfile {
    pub damage: f32,
    /// owner-local sweep segment
    pub trace_start: [f32; 3],
    pub trace_end: [f32; 3],
    pub trace_half_extent: f32,
    pub pickup_radius: f32,
}

impl Default for WeaponProfile {
    fn default() -> Self {
        Self {
            damage: 20.0,
            trace_start: [25.0, 100.0, -30.0],
            trace_end: [25.0, 100.0, -120.0],
            trace_half_extent: 5.0,
            pickup_radius: 60.0,
        }
    }
}

impl WeaponProfile {
    pub fn weapon(&self) -> Weapon {
        Weapon::new(self.damage).with_trace(
            Vec3::from_array(self.trace_start),
            Vec3::from_array(self.trace_end),
            self.trace_half_extent,
        )
    }

    pub fn pickup(&self) -> WeaponPickup {
        WeaponPickup {
            radius: self.pickup_radius,
        }
    }
}

/// Полный профиль боя (resource, читается при спавне).
#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CombatProfile {
    pub vitals: VitalsProfile,
    pub actions: ActionConfig,
    pub animation: AnimationSet,
    pub ai: AiConfig,
    pub weapon: WeaponProfile,
}

impl CombatProfile {
    /// Parse + validate.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let profile: CombatProfile = toml::from_str(source)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("vitals.max_health", self.vitals.max_health)?;
        positive("vitals.max_stamina", self.vitals.max_stamina)?;
        non_negative("vitals.stamina_regen", self.vitals.stamina_regen)?;
        positive("vitals.hurtbox_radius", self.vitals.hurtbox_radius)?;

        non_negative("actions.dodge_cost", self.actions.dodge_cost)?;
        non_negative("actions.strafe_threshold", self.actions.strafe_threshold)?;

        non_negative("weapon.damage", self.weapon.damage)?;
        positive("weapon.trace_half_extent", self.weapon.trace_half_extent)?;
        positive("weapon.pickup_radius", self.weapon.pickup_radius)?;

        let ai = &self.ai;
        positive("ai.combat_radius", ai.combat_radius)?;
        positive("ai.attack_radius", ai.attack_radius)?;
        positive("ai.acceptance_radius", ai.acceptance_radius)?;
        positive("ai.patrol_speed", ai.patrol_speed)?;
        positive("ai.chase_speed", ai.chase_speed)?;
        non_negative("ai.death_lifespan", ai.death_lifespan)?;
        non_negative("ai.patrol_wait_min", ai.patrol_wait_min)?;
        non_negative("ai.attack_delay_min", ai.attack_delay_min)?;
        ordered("ai.patrol_wait", ai.patrol_wait_min, ai.patrol_wait_max)?;
        ordered("ai.attack_delay", ai.attack_delay_min, ai.attack_delay_max)?;

        if ai.attack_radius > ai.combat_radius {
            return Err(ConfigError::AttackOutsideCombat {
                attack: ai.attack_radius,
                combat: ai.combat_radius,
            });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::PickupPolicy;

    #[test]
    fn test_empty_document_gives_defaults() {
        let profile = CombatProfile::from_toml_str("").expect("empty profile is valid");
        assert_eq!(profile, CombatProfile::default());
        assert_eq!(profile.ai.attack_radius, 150.0);
        assert_eq!(profile.actions.dodge_cost, 15.0);
        assert_eq!(profile.weapon.damage, 20.0);
    }

    #[test]
    fn test_partial_override() {
        let source = r#"
            [actions]
            dodge_cost = 25.0
            pickup_policy = "require_idle"

            [ai]
            combat_radius = 800.0
            patrol_wait_min = 1.0
            patrol_wait_max = 2.0

            [weapon]
            trace_end = [0.0, 100.0, -140.0]
        "#;
        let profile = CombatProfile::from_toml_str(source).expect("valid profile");

        assert_eq!(profile.actions.dodge_cost, 25.0);
        assert_eq!(profile.actions.pickup_policy, PickupPolicy::RequireIdle);
        assert_eq!(profile.actions.strafe_threshold, 0.2); // default сохранился
        assert_eq!(profile.ai.combat_radius, 800.0);
        assert_eq!(profile.ai.attack_radius, 150.0);
        assert_eq!(profile.weapon.weapon().trace_end, Vec3::new(0.0, 100.0, -140.0));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let source = r#"
            [ai]
            attack_delay_min = 2.0
            attack_delay_max = 1.0
        "#;
        let err = CombatProfile::from_toml_str(source).unwrap_err();
        assert!(matches!(err, ConfigError::InvertedRange { field: "ai.attack_delay", .. }), "{}", err);
    }

    #[test]
    fn test_attack_radius_outside_combat_rejected() {
        let source = r#"
            [ai]
            combat_radius = 100.0
            attack_radius = 150.0
        "#;
        let err = CombatProfile::from_toml_str(source).unwrap_err();
        assert!(matches!(err, ConfigError::AttackOutsideCombat { .. }));
    }

    #[test]
    fn test_syntax_error_reported_as_parse() {
        let err = CombatProfile::from_toml_str("[ai\nattack_radius = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse combat profile"));
    }

    #[test]
    fn test_zero_health_rejected() {
        let source = "[vitals]\nmax_health = 0.0\n";
        let err = CombatProfile::from_toml_str(source).unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "vitals.max_health", .. }));
    }
}
