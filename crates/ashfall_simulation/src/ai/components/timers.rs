//! Single-shot AI timers, polled from the fixed tick.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AiTimer {
    /// Waypoint reached, wait before picking the next one
    PatrolWait,
    /// Target in attack radius, delay before the next swing
    AttackDelay,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ScheduledEvent {
    pub timer: AiTimer,
    pub remaining: f32,
}

/// Armed timers. At most one entry per `AiTimer` kind.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ScheduledEvents {
    entries: Vec<ScheduledEvent>,
}

impl ScheduledEvents {
    /// Arm (or re-arm, overwriting) a timer.
    pub fn arm(&mut self, timer: AiTimer, delay: f32) {
        self.cancel(timer);
        self.entries.push(ScheduledEvent {
            timer,
            remaining: delay.max(0.0),
        });
    }

    pub fn cancel(&mut self, timer: AiTimer) {
        self.entries.retain(|entry| entry.timer != timer);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_armed(&self, timer: AiTimer) -> bool {
        self.entries.iter().any(|entry| entry.timer == timer)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance by `delta`; fired timers are disarmed and returned in
    /// arming order.
    pub fn tick(&mut self, delta: f32) -> Vec<AiTimer> {
        let mut fired = Vec::new();
        self.entries.retain_mut(|entry| {
            entry.remaining -= delta;
            if entry.remaining <= 0.0 {
                fired.push(entry.timer);
                false
            } else {
                true
            }
        });
        fired
    }
}
