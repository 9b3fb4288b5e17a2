//! Stamina management система

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::Stamina;

/// Система: regenerate stamina для всех живых entities
///
/// Работает в FixedUpdate для детерминизма.
/// Regen rate берется из Stamina::regen_rate (units/sec).
pub fn regenerate_stamina(mut query: Query<&mut Stamina, Without<Dead>>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut stamina in query.iter_mut() {
        if stamina.current < stamina.max {
            stamina.regenerate(delta);
        }
    }
}
