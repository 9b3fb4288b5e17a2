//! Weapon components: the blade itself, who holds it, what can be picked up.

use bevy::prelude::*;

/// Where a held weapon sits on its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum WeaponSocket {
    Hand,
    Back,
    /// Lying in the world (pickup)
    #[default]
    Dropped,
}

/// Melee weapon.
///
/// The swept volume is the segment `trace_start → trace_end` (owner-local
/// space) inflated by `trace_half_extent`. The per-swing ignore list keeps
/// a target from being hit twice in one collision window.
///
/// Инварианты:
/// - `ignore` содержит каждый entity не более одного раза
/// - `ignore` непуст только пока `collision_active`
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    pub damage: f32,
    pub owner: Option<Entity>,
    pub socket: WeaponSocket,
    pub trace_start: Vec3,
    pub trace_end: Vec3,
    pub trace_half_extent: f32,
    collision_active: bool,
    ignore: Vec<Entity>,
}

impl Default for Weapon {
    fn default() -> Self {
        Self::new(20.0)
    }
}

impl Weapon {
    pub fn new(damage: f32) -> Self {
        Self {
            damage,
            owner: None,
            socket: WeaponSocket::Dropped,
            trace_start: Vec3::new(25.0, 100.0, -30.0),
            trace_end: Vec3::new(25.0, 100.0, -120.0),
            trace_half_extent: 5.0,
            collision_active: false,
            ignore: Vec::new(),
        }
    }

    pub fn with_trace(mut self, start: Vec3, end: Vec3, half_extent: f32) -> Self {
        self.trace_start = start;
        self.trace_end = end;
        self.trace_half_extent = half_extent;
        self
    }

    pub fn collision_active(&self) -> bool {
        self.collision_active
    }

    pub fn ignored(&self) -> &[Entity] {
        &self.ignore
    }

    pub fn is_held(&self) -> bool {
        self.owner.is_some()
    }

    /// Toggle the damage window. Returns true if the flag actually flipped;
    /// only a real flip starts a new swing (clears the ignore list).
    pub fn set_collision(&mut self, enabled: bool) -> bool {
        if self.collision_active == enabled {
            return false;
        }
        self.collision_active = enabled;
        self.ignore.clear();
        true
    }

    /// Records a hit for this swing. False if collision is off or the
    /// target was already hit.
    pub fn register_hit(&mut self, target: Entity) -> bool {
        if !self.collision_active || self.ignore.contains(&target) {
            return false;
        }
        self.ignore.push(target);
        true
    }

    pub fn attach(&mut self, owner: Entity, socket: WeaponSocket) {
        self.owner = Some(owner);
        self.socket = socket;
        self.set_collision(false);
    }

    pub fn detach(&mut self) {
        self.owner = None;
        self.socket = WeaponSocket::Dropped;
        self.set_collision(false);
    }

    /// Sweep segment in world space, given the wielder's transform.
    pub fn world_trace(&self, owner_transform: &Transform) -> (Vec3, Vec3) {
        (
            owner_transform.transform_point(self.trace_start),
            owner_transform.transform_point(self.trace_end),
        )
    }
}

/// Weapon currently held by a combatant (hand or back).
///
/// Survives disarm: a sheathed weapon is still "the previously-held weapon"
/// that a later arm request draws again.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct EquippedWeapon(pub Entity);

/// Weapon lying in the world, can be picked up within `radius`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct WeaponPickup {
    pub radius: f32,
}

impl Default for WeaponPickup {
    fn default() -> Self {
        Self { radius: 60.0 }
    }
}

/// Item overlapping the combatant (set by overlap tracking).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct OverlappingItem(pub Option<Entity>);

/// Breakable prop: shatters on the first weapon hit, drops gold for the
/// breaker.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Breakable {
    pub gold: u32,
}
