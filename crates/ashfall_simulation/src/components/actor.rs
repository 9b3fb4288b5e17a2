//! Базовые компоненты акторов: Actor, Combatant, Health, Stamina, Purse, Hurtbox
//!
//! Health + Stamina + Purse together form the vitals ledger. Combat code
//! mutates them only through their methods (`take_damage`, `consume`,
//! `regenerate`, `add`), never by writing fields directly.

use bevy::prelude::*;

/// Актор: всё, что участвует в бою или может быть поражено.
///
/// `faction_id` decides allegiance: a weapon never damages a candidate of
/// its wielder's faction, and AI only chases pawns of another faction.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct Actor {
    pub faction_id: u64,
}

/// Who drives a combatant's decisions.
///
/// Shared transition logic is identical for both; the strategy only picks
/// variant-specific hooks (death handling, currency reward, stamina HUD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ControlStrategy {
    Player,
    Ai,
}

/// Combatant marker + control strategy.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(
    Actor,
    Health,
    Stamina,
    Purse,
    Hurtbox,
    Transform,
    crate::components::MovementIntent,
    crate::components::MovementCommand,
    crate::components::CombatMovement,
    crate::combat::ActionState,
    crate::combat::EquipState,
    crate::combat::ActionConfig,
    crate::combat::AnimationSet,
    crate::combat::OverlappingItem
)]
pub struct Combatant {
    pub control: ControlStrategy,
}

impl Combatant {
    pub fn player() -> Self {
        Self { control: ControlStrategy::Player }
    }

    pub fn ai() -> Self {
        Self { control: ControlStrategy::Ai }
    }

    pub fn is_ai(&self) -> bool {
        self.control == ControlStrategy::Ai
    }
}

/// Tag: AI sensing may pick this pawn as a chase target.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Engageable;

/// Здоровье
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.current = (self.current - amount.max(0.0)).clamp(0.0, self.max);
    }

    pub fn percent(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }
}

/// Выносливость (dodge cost, regen)
///
/// Инвариант: 0.0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
    pub regen_rate: f32, // units per second
}

impl Default for Stamina {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Stamina {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            regen_rate: 8.0,
        }
    }

    pub fn with_regen(mut self, regen_rate: f32) -> Self {
        self.regen_rate = regen_rate;
        self
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.current >= cost
    }

    pub fn consume(&mut self, cost: f32) -> bool {
        if self.can_afford(cost) {
            self.current -= cost;
            true
        } else {
            false
        }
    }

    pub fn regenerate(&mut self, delta_time: f32) {
        self.current = (self.current + self.regen_rate * delta_time).min(self.max);
    }

    pub fn percent(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum CurrencyKind {
    Gold,
    Souls,
}

/// Accrued currency (gold from breakables, souls from kills).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Purse {
    pub gold: u32,
    pub souls: u32,
}

impl Purse {
    pub fn add(&mut self, kind: CurrencyKind, amount: u32) {
        match kind {
            CurrencyKind::Gold => self.gold = self.gold.saturating_add(amount),
            CurrencyKind::Souls => self.souls = self.souls.saturating_add(amount),
        }
    }

    pub fn get(&self, kind: CurrencyKind) -> u32 {
        match kind {
            CurrencyKind::Gold => self.gold,
            CurrencyKind::Souls => self.souls,
        }
    }
}

/// Vertical capsule approximated as a sphere at `height` above the origin.
///
/// Only entities with a `Hurtbox` are candidates for the weapon sweep;
/// removing it is how death "disables physical collision".
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Hurtbox {
    pub radius: f32,
    pub height: f32,
}

impl Default for Hurtbox {
    fn default() -> Self {
        Self { radius: 45.0, height: 90.0 }
    }
}

impl Hurtbox {
    pub fn center(&self, transform: &Transform) -> Vec3 {
        transform.translation + Vec3::Y * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100.0);
        health.take_damage(30.0);
        assert_eq!(health.current, 70.0);
        assert!(health.is_alive());

        health.take_damage(100.0); // clamp at zero
        assert_eq!(health.current, 0.0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_health_negative_damage_ignored() {
        let mut health = Health::new(50.0);
        health.take_damage(-20.0);
        assert_eq!(health.current, 50.0);
    }

    #[test]
    fn test_health_percent() {
        let mut health = Health::new(200.0);
        health.take_damage(50.0);
        assert_eq!(health.percent(), 0.75);
    }

    #[test]
    fn test_stamina_consume() {
        let mut stamina = Stamina::new(100.0);

        assert!(stamina.consume(30.0));
        assert_eq!(stamina.current, 70.0);

        assert!(!stamina.consume(80.0)); // Недостаточно
        assert_eq!(stamina.current, 70.0); // Не изменилась
    }

    #[test]
    fn test_stamina_regenerate() {
        let mut stamina = Stamina::new(100.0).with_regen(10.0);
        stamina.consume(50.0);

        stamina.regenerate(2.0); // 2 sec × 10 units/sec = +20
        assert_eq!(stamina.current, 70.0);

        stamina.regenerate(10.0); // Clamp to max
        assert_eq!(stamina.current, 100.0);
    }

    #[test]
    fn test_purse_add() {
        let mut purse = Purse::default();
        purse.add(CurrencyKind::Souls, 5);
        purse.add(CurrencyKind::Gold, 12);
        purse.add(CurrencyKind::Souls, 3);

        assert_eq!(purse.get(CurrencyKind::Souls), 8);
        assert_eq!(purse.get(CurrencyKind::Gold), 12);
    }

    #[test]
    fn test_hurtbox_center() {
        let hurtbox = Hurtbox { radius: 40.0, height: 80.0 };
        let transform = Transform::from_xyz(10.0, 0.0, -5.0);
        assert_eq!(hurtbox.center(&transform), Vec3::new(10.0, 80.0, -5.0));
    }
}
