//! Unit tests for lift-core primitives.

#[cfg(test)]
mod ids {
    use crate::CarId;

    #[test]
    fn index_roundtrip() {
        let id = CarId(4);
        assert_eq!(id.index(), 4);
        assert_eq!(CarId::try_from(4usize).unwrap(), id);
    }

    #[test]
    fn ordering_follows_inner_value() {
        assert!(CarId(0) < CarId(1));
        let mut ids = vec![CarId(2), CarId(0), CarId(1)];
        ids.sort();
        assert_eq!(ids, [CarId(0), CarId(1), CarId(2)]);
    }

    #[test]
    fn display() {
        assert_eq!(CarId(7).to_string(), "car 7");
    }
}

#[cfg(test)]
mod request {
    use crate::{Direction, LiftError, Request};

    #[test]
    fn direction_between_floors() {
        assert_eq!(Direction::between(0, 5).unwrap(), Direction::Up);
        assert_eq!(Direction::between(5, 0).unwrap(), Direction::Down);
        assert_eq!(Direction::between(-2, -1).unwrap(), Direction::Up);
    }

    #[test]
    fn equal_floors_have_no_direction() {
        assert_eq!(
            Direction::between(3, 3),
            Err(LiftError::InvalidMovementDirection { from: 3, to: 3 })
        );
    }

    #[test]
    fn step_sign() {
        assert_eq!(Direction::Up.step(), 1);
        assert_eq!(Direction::Down.step(), -1);
    }

    #[test]
    fn ground_floor_constructors() {
        let up = Request::up_from_ground(12);
        assert_eq!((up.current_floor, up.destination_floor, up.direction), (0, 12, Direction::Up));

        let down = Request::down_to_ground(9);
        assert_eq!((down.current_floor, down.destination_floor, down.direction), (9, 0, Direction::Down));
    }

    #[test]
    fn between_derives_direction() {
        assert_eq!(Request::between(3, 1).unwrap().direction, Direction::Down);
        assert!(Request::between(4, 4).is_err());
    }

    #[test]
    fn explicit_direction_allows_equal_floors() {
        let r = Request::new(9, 9, Direction::Up);
        assert_eq!(r.current_floor, r.destination_floor);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "contradicts")]
    fn explicit_direction_must_match_floors() {
        let _ = Request::new(5, 0, Direction::Up);
    }

    #[test]
    fn trip_floors_counts_both_legs() {
        // Car at 10 serving 3 → 1: 7 floors empty, 2 floors loaded.
        assert_eq!(Request::new(3, 1, Direction::Down).trip_floors(10), 9);
        assert_eq!(Request::new(0, 5, Direction::Up).trip_floors(0), 5);
    }

    #[test]
    fn display() {
        assert_eq!(Request::new(0, 5, Direction::Up).to_string(), "0→5 (up)");
    }
}

#[cfg(test)]
mod config {
    use std::time::Duration;

    use crate::{LiftError, TowerConfig};

    #[test]
    fn defaults_are_valid() {
        let config = TowerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.car_count, 7);
        assert_eq!(config.top_floor, 54);
        assert_eq!(config.movement_delay(), Duration::from_millis(250));
        assert_eq!(config.request_period(), Duration::from_millis(500));
    }

    #[test]
    fn zero_cars_rejected() {
        let config = TowerConfig { car_count: 0, ..TowerConfig::default() };
        assert!(matches!(config.validate(), Err(LiftError::Config(_))));
    }

    #[test]
    fn initial_floor_must_be_served() {
        let config = TowerConfig { initial_floor: 60, ..TowerConfig::default() };
        assert!(config.validate().is_err());
        let config = TowerConfig { initial_floor: -1, ..TowerConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn flat_building_rejected() {
        let config = TowerConfig { top_floor: 0, ..TowerConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_request_period_rejected() {
        let config = TowerConfig { request_period_ms: 0, ..TowerConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn serves_inclusive_range() {
        let config = TowerConfig::default();
        assert!(config.serves(0));
        assert!(config.serves(config.top_floor));
        assert!(!config.serves(config.top_floor + 1));
    }
}

#[cfg(test)]
mod rng {
    use crate::RequestRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RequestRng::new(99);
        let mut b = RequestRng::new(99);
        let xs: Vec<i32> = (0..20).map(|_| a.gen_range(1..=54)).collect();
        let ys: Vec<i32> = (0..20).map(|_| b.gen_range(1..=54)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = RequestRng::new(1);
        let mut b = RequestRng::new(2);
        let xs: Vec<u32> = (0..20).map(|_| a.gen_range(0..1_000)).collect();
        let ys: Vec<u32> = (0..20).map(|_| b.gen_range(0..1_000)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn gen_bool_clamps_probability() {
        let mut rng = RequestRng::new(5);
        assert!(rng.gen_bool(2.0));
        assert!(!rng.gen_bool(-1.0));
    }
}
