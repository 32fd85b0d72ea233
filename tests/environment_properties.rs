//! Property tests for the environment contract.
//!
//! Random seeds, action sequences and frame deltas; every transition is
//! checked against the invariants the simulation must keep.

use proptest::prelude::*;
use std::time::Duration;

use snake_sim::game::{Cell, CollisionType, GameConfig, GameError, GameState};
use snake_sim::rl::observation::{BODY, EMPTY, FOOD, HEAD, TAIL};
use snake_sim::rl::SnakeEnvironment;

const MIN_INTERVAL: Duration = Duration::from_millis(50);

fn snapshot(env: &SnakeEnvironment) -> GameState {
    env.state().expect("environment was reset").clone()
}

fn head_hits_body(state: &GameState) -> bool {
    let head = state.snake.head().cell;
    state.snake.segments()[1..].iter().any(|s| s.cell == head)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_over_random_rollouts(
        seed in any::<u64>(),
        steps in prop::collection::vec((0i64..4, 0u64..400), 1..300),
    ) {
        let mut env = SnakeEnvironment::new(GameConfig::new(8, 6)).unwrap();
        env.reset(Some(seed)).unwrap();
        let mut prev = snapshot(&env);

        for (action, delta_ms) in steps {
            let t = env.step_with_delta(action, Duration::from_millis(delta_ms)).unwrap();
            let state = snapshot(&env);
            let grid = state.grid;

            prop_assert!(!t.truncated);

            // Length never shrinks; it grows by exactly one on an eat
            let expected_len = prev.snake.len() + usize::from(t.info.ate_food);
            prop_assert_eq!(state.snake.len(), expected_len);

            // Move interval only shrinks, never below the floor
            prop_assert!(state.snake.move_interval() <= prev.snake.move_interval());
            prop_assert!(state.snake.move_interval() >= MIN_INTERVAL);

            // Food stays off the snake
            if let Some(food) = state.food {
                prop_assert!(!state.is_occupied_by_snake(food));
                prop_assert!(grid.contains(food));
            }

            // Collision kinds match the geometry
            let head = state.snake.head().cell;
            match t.info.collision {
                Some(CollisionType::Wall) => {
                    prop_assert!(!grid.contains(head));
                }
                Some(CollisionType::SelfCollision) => {
                    prop_assert!(head_hits_body(&state));
                }
                None => {
                    prop_assert!(grid.contains(head));
                    prop_assert!(!head_hits_body(&state));
                }
            }

            // Observation codes are in range and the head is unique when on-grid
            let obs = &t.observation;
            prop_assert!(obs.as_slice().iter().all(|v| [EMPTY, HEAD, BODY, TAIL, FOOD].contains(v)));
            if grid.contains(head) {
                prop_assert_eq!(obs.count(HEAD), 1);
                prop_assert_eq!(obs.get(head), Some(HEAD));
            }

            if t.terminated {
                // Absorbing until reset
                let again = env.step_with_delta(action, Duration::from_millis(300)).unwrap();
                prop_assert!(again.terminated);
                prop_assert_eq!(again.reward, 0.0);
                prop_assert_eq!(snapshot(&env), state);
                break;
            }
            prev = state;
        }
    }

    #[test]
    fn same_seed_same_transitions(
        seed in any::<u64>(),
        actions in prop::collection::vec(0i64..4, 1..200),
    ) {
        let run = || {
            let mut env = SnakeEnvironment::new(GameConfig::default()).unwrap();
            let (first, _) = env.reset(Some(seed)).unwrap();
            let mut out = vec![(first, 0.0f32, false)];
            for &a in &actions {
                let t = env.step_with_delta(a, Duration::from_millis(120)).unwrap();
                out.push((t.observation, t.reward, t.terminated));
            }
            out
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn invalid_actions_change_nothing(
        seed in any::<u64>(),
        bad in prop_oneof![i64::MIN..0i64, 4i64..i64::MAX],
    ) {
        let mut env = SnakeEnvironment::new(GameConfig::default()).unwrap();
        env.reset(Some(seed)).unwrap();
        let before = snapshot(&env);

        prop_assert_eq!(env.step(bad), Err(GameError::InvalidAction(bad)));
        prop_assert_eq!(snapshot(&env), before);
    }

    #[test]
    fn reset_places_snake_at_center_and_food_elsewhere(seed in any::<u64>()) {
        let mut env = SnakeEnvironment::new(GameConfig::default()).unwrap();
        let (obs, info) = env.reset(Some(seed)).unwrap();
        let state = snapshot(&env);

        prop_assert_eq!(state.snake.head().cell, Cell::new(10, 7));
        prop_assert_eq!(info.snake_length, 1);
        prop_assert_eq!(obs.count(FOOD), 1);
        prop_assert_ne!(state.food, Some(Cell::new(10, 7)));
    }
}
