//! Tests for damage systems (hit reaction, death, breakables, despawn).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::{
        ActionRequest, ActionState, AnimNotify, BreakableShattered, DamageDealt, Dead, DeathPose, DespawnAfter,
        EntityDied, ImpactEffectRequested, MeleeHit, MontageKind, PlayAnimation, Weapon,
    };
    use crate::components::{Health, Hurtbox, MovementCommand, MovementLocked, Purse};
    use crate::spawn::{spawn_breakable, spawn_enemy, spawn_player, spawn_weapon_pickup};
    use crate::test_support::*;

    fn hit(app: &mut App, attacker: Entity, target: Entity, damage: f32, impact_point: Vec3) {
        app.world_mut().send_event(MeleeHit {
            attacker,
            weapon: Entity::PLACEHOLDER,
            target,
            damage,
            impact_point,
        });
        app.update();
    }

    fn two_players(app: &mut App) -> (Entity, Entity) {
        spawn_with(app, |commands, profile| {
            (
                spawn_player(commands, profile, Vec3::new(0.0, 0.0, -500.0)),
                spawn_player(commands, profile, Vec3::ZERO),
            )
        })
    }

    #[test]
    fn test_non_lethal_hit_enters_hit_reaction() {
        let mut app = simulation_app(1);
        let (attacker, target) = two_players(&mut app);

        // Target смотрит в -Z; удар справа (+X)
        hit(&mut app, attacker, target, 20.0, Vec3::new(50.0, 90.0, 0.0));

        assert_eq!(component::<Health>(&app, target).map(|h| h.current), Some(80.0));
        assert_eq!(component::<ActionState>(&app, target), Some(ActionState::HitReaction));

        let played = recent::<PlayAnimation>(&app);
        assert_eq!(played.len(), 1);
        assert_eq!(played[0].segment.montage, MontageKind::HitReact);
        assert_eq!(played[0].segment.section, "FromRight");

        let dealt = recent::<DamageDealt>(&app);
        assert_eq!(dealt.len(), 1);
        assert!(!dealt[0].target_died);
        assert_eq!(recent::<ImpactEffectRequested>(&app).len(), 1);

        notify(&mut app, target, AnimNotify::HitReactionFinished);
        assert_eq!(component::<ActionState>(&app, target), Some(ActionState::Idle));
    }

    #[test]
    fn test_hit_interrupts_attack_and_disables_own_weapon() {
        let mut app = simulation_app(2);
        let (attacker, target) = two_players(&mut app);
        let weapon = spawn_with(&mut app, |commands, profile| spawn_weapon_pickup(commands, profile, Vec3::ZERO));
        request(&mut app, target, ActionRequest::Interact);
        request(&mut app, target, ActionRequest::Attack);
        notify(&mut app, target, AnimNotify::SwingWindowOpened);
        assert_eq!(component::<Weapon>(&app, weapon).map(|w| w.collision_active()), Some(true));

        hit(&mut app, attacker, target, 10.0, Vec3::new(0.0, 90.0, -50.0));

        assert_eq!(component::<ActionState>(&app, target), Some(ActionState::HitReaction));
        assert_eq!(component::<Weapon>(&app, weapon).map(|w| w.collision_active()), Some(false));

        // Запоздалый attack-finished от прерванной атаки игнорируется
        notify(&mut app, target, AnimNotify::AttackFinished);
        assert_eq!(component::<ActionState>(&app, target), Some(ActionState::HitReaction));
    }

    #[test]
    fn test_lethal_hit_kills_player() {
        let mut app = simulation_app(3);
        let (attacker, target) = two_players(&mut app);

        hit(&mut app, attacker, target, 150.0, Vec3::new(0.0, 90.0, -50.0));

        assert_eq!(component::<ActionState>(&app, target), Some(ActionState::Dead));
        assert_eq!(component::<Health>(&app, target).map(|h| h.current), Some(0.0));
        assert!(app.world().get::<Dead>(target).is_some());
        assert!(app.world().get::<Hurtbox>(target).is_none());
        assert!(app.world().get::<DeathPose>(target).is_some());
        assert!(app.world().get::<MovementLocked>(target).is_some());
        assert_eq!(component::<MovementCommand>(&app, target), Some(MovementCommand::Stop));
        // Player не деспавнится
        assert!(app.world().get::<DespawnAfter>(target).is_none());

        let died = recent::<EntityDied>(&app);
        assert_eq!(died.len(), 1);
        assert_eq!(died[0].killer, Some(attacker));

        let played = recent::<PlayAnimation>(&app);
        assert_eq!(played.len(), 1);
        assert_eq!(played[0].segment.montage, MontageKind::Death);
    }

    #[test]
    fn test_lethal_hit_on_ai_leaves_movement_unlocked() {
        let mut app = simulation_app(14);
        let (attacker, enemy) = spawn_with(&mut app, |commands, profile| {
            (
                spawn_player(commands, profile, Vec3::new(0.0, 0.0, -500.0)),
                spawn_enemy(commands, profile, Vec3::ZERO, Vec::new()),
            )
        });

        hit(&mut app, attacker, enemy, 150.0, Vec3::new(0.0, 90.0, -50.0));

        assert_eq!(component::<ActionState>(&app, enemy), Some(ActionState::Dead));
        // Lock только для player; AI останавливается своим death handler
        assert!(app.world().get::<MovementLocked>(enemy).is_none());
        assert!(app.world().get::<DespawnAfter>(enemy).is_some());
    }

    #[test]
    fn test_dead_is_terminal() {
        let mut app = simulation_app(4);
        let (attacker, target) = two_players(&mut app);
        hit(&mut app, attacker, target, 100.0, Vec3::ZERO);

        hit(&mut app, attacker, target, 10.0, Vec3::ZERO);
        assert!(recent::<DamageDealt>(&app).is_empty());

        request(&mut app, target, ActionRequest::Dodge);
        notify(&mut app, target, AnimNotify::HitReactionFinished);
        assert_eq!(component::<ActionState>(&app, target), Some(ActionState::Dead));
    }

    #[test]
    fn test_multiple_hits_same_tick_apply_in_order() {
        let mut app = simulation_app(5);
        let (attacker, target) = two_players(&mut app);

        for _ in 0..3 {
            app.world_mut().send_event(MeleeHit {
                attacker,
                weapon: Entity::PLACEHOLDER,
                target,
                damage: 40.0,
                impact_point: Vec3::ZERO,
            });
        }
        app.update();

        // 40 + 40 + 40 > 100: третий удар по мёртвому отброшен
        let dealt = recent::<DamageDealt>(&app);
        assert_eq!(dealt.len(), 3);
        assert!(!dealt[0].target_died);
        assert!(!dealt[1].target_died);
        assert!(dealt[2].target_died);
        assert_eq!(recent::<EntityDied>(&app).len(), 1);
    }

    #[test]
    fn test_breakable_shatters_once_and_pays_gold() {
        let mut app = simulation_app(6);
        let (attacker, _) = two_players(&mut app);
        let pot = spawn_with(&mut app, |commands, _| spawn_breakable(commands, Vec3::new(0.0, 0.0, -600.0), 12));

        for _ in 0..2 {
            app.world_mut().send_event(MeleeHit {
                attacker,
                weapon: Entity::PLACEHOLDER,
                target: pot,
                damage: 20.0,
                impact_point: Vec3::new(0.0, 40.0, -600.0),
            });
        }
        app.update();

        assert_eq!(component::<Purse>(&app, attacker).map(|p| p.gold), Some(12));
        assert!(app.world().get::<Hurtbox>(pot).is_none());
        let shattered = recent::<BreakableShattered>(&app);
        assert_eq!(shattered.len(), 1);
        assert_eq!(shattered[0].breaker, attacker);
    }

    #[test]
    fn test_despawn_after_timeout() {
        let mut app = simulation_app(7);
        let (_, target) = two_players(&mut app);
        let now = app.world().resource::<Time<Fixed>>().elapsed_secs();
        app.world_mut().entity_mut(target).insert(DespawnAfter {
            despawn_time: now + 0.05,
        });

        // 3 тика = 0.047s < 0.05
        for _ in 0..3 {
            app.update();
        }
        assert!(app.world().get_entity(target).is_ok());

        app.update();
        app.update();
        assert!(app.world().get_entity(target).is_err());
    }
}
