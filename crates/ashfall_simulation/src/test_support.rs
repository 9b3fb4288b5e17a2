//! Helpers для unit tests систем (headless App, events, spawn).

use bevy::prelude::*;

use crate::combat::{ActionIntent, ActionRequest, AnimNotify, AnimationNotify};
use crate::config::CombatProfile;
use crate::{create_headless_app, SimulationPlugin};

/// Headless app с симуляцией; первый (пустой) update уже сделан, дальше
/// каждый `app.update()` = один fixed тик.
pub fn simulation_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    app.update();
    app
}

pub fn profile(app: &App) -> CombatProfile {
    app.world().resource::<CombatProfile>().clone()
}

/// Spawn через Commands + flush.
pub fn spawn_with<T>(app: &mut App, spawn: impl FnOnce(&mut Commands, &CombatProfile) -> T) -> T {
    let profile = profile(app);
    let result = {
        let mut commands = app.world_mut().commands();
        spawn(&mut commands, &profile)
    };
    app.world_mut().flush();
    result
}

pub fn request(app: &mut App, entity: Entity, request: ActionRequest) {
    app.world_mut().send_event(ActionIntent { entity, request });
    app.update();
}

pub fn notify(app: &mut App, entity: Entity, notify: AnimNotify) {
    app.world_mut().send_event(AnimationNotify { entity, notify });
    app.update();
}

/// События, записанные в последнем update.
pub fn recent<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world()
        .resource::<Events<E>>()
        .iter_current_update_events()
        .cloned()
        .collect()
}

pub fn component<C: Component + Clone>(app: &App, entity: Entity) -> Option<C> {
    app.world().get::<C>(entity).cloned()
}
