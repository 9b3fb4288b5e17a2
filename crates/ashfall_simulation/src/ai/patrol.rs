//! Patrol target selection.

use rand::Rng;

use crate::ai::components::PatrolRoute;

/// Pick the next waypoint index.
///
/// With more than one waypoint the current one is excluded from the draw
/// (no immediate repeat); with exactly one it is re-selected. None for an
/// empty route.
pub fn choose_patrol_target<R: Rng>(route: &PatrolRoute, rng: &mut R) -> Option<usize> {
    let count = route.waypoints.len();
    match count {
        0 => None,
        1 => Some(0),
        _ => {
            let candidates: Vec<usize> = (0..count).filter(|index| Some(*index) != route.current).collect();
            let pick = rng.gen_range(0..candidates.len());
            Some(candidates[pick])
        }
    }
}

/// Uniform draw from `[min, max]` (degenerate range → `min`).
pub fn random_delay<R: Rng>(min: f32, max: f32, rng: &mut R) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::components::Waypoint;
    use bevy::prelude::Vec3;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn route(count: usize) -> PatrolRoute {
        PatrolRoute::new(
            (0..count)
                .map(|i| Waypoint::new(format!("wp{}", i), Vec3::new(i as f32 * 100.0, 0.0, 0.0)))
                .collect(),
        )
    }

    #[test]
    fn test_empty_route() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(choose_patrol_target(&route(0), &mut rng), None);
    }

    #[test]
    fn test_single_waypoint_repeats() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut single = route(1);
        for _ in 0..10 {
            let next = choose_patrol_target(&single, &mut rng);
            assert_eq!(next, Some(0));
            single.current = next;
        }
    }

    #[test]
    fn test_first_pick_can_be_any_waypoint() {
        let mut seen = [false; 3];
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            if let Some(index) = choose_patrol_target(&route(3), &mut rng) {
                seen[index] = true;
            }
        }
        assert!(seen.iter().all(|s| *s), "seen = {:?}", seen);
    }

    #[test]
    fn test_random_delay_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            let delay = random_delay(5.0, 10.0, &mut rng);
            assert!((5.0..=10.0).contains(&delay));
        }
        assert_eq!(random_delay(2.0, 2.0, &mut rng), 2.0);
    }

    proptest! {
        #[test]
        fn prop_never_repeats_with_multiple_candidates(count in 2usize..8, seed in any::<u64>(), steps in 1usize..30) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut patrol = route(count);
            patrol.current = Some(0);

            for _ in 0..steps {
                let next = choose_patrol_target(&patrol, &mut rng);
                prop_assert!(next.is_some());
                prop_assert_ne!(next, patrol.current);
                patrol.current = next;
            }
        }
    }
}
