//! Tests for lift-sim.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use lift_core::{CarId, Direction, Floor, Request, TowerConfig};
use lift_fleet::TripObserver;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn req(from: Floor, to: Floor) -> Request {
    let direction = if to >= from { Direction::Up } else { Direction::Down };
    Request::new(from, to, direction)
}

fn test_config(car_count: usize, max_requests: usize) -> TowerConfig {
    TowerConfig {
        car_count,
        top_floor:         15,
        initial_floor:     0,
        movement_delay_ms: 1,
        request_period_ms: 2,
        max_requests,
        seed:              42,
    }
}

/// Counts completed trips.
#[derive(Clone, Default)]
struct CompletionCounter(Arc<AtomicUsize>);

impl TripObserver for CompletionCounter {
    fn on_completed(&mut self, _car: CarId, _request: &Request) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

// ── Sources ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod source_tests {
    use super::*;
    use crate::{RandomRequests, RequestSource, ScriptedRequests};

    fn drain(source: &mut dyn RequestSource) -> Vec<Request> {
        std::iter::from_fn(|| source.next_request()).collect()
    }

    #[test]
    fn random_source_yields_exactly_count() {
        let mut source = RandomRequests::new(1, 54, 21);
        assert_eq!(source.remaining(), Some(21));
        assert_eq!(drain(&mut source).len(), 21);
        assert_eq!(source.remaining(), Some(0));
        assert!(source.next_request().is_none());
    }

    #[test]
    fn random_requests_touch_the_ground_floor() {
        let requests = drain(&mut RandomRequests::new(9, 54, 300));
        for r in &requests {
            match r.direction {
                Direction::Up => {
                    assert_eq!(r.current_floor, 0);
                    assert!((1..=54).contains(&r.destination_floor), "{r}");
                }
                Direction::Down => {
                    assert_eq!(r.destination_floor, 0);
                    assert!((1..=54).contains(&r.current_floor), "{r}");
                }
            }
        }
        assert!(requests.iter().any(|r| r.direction == Direction::Up));
        assert!(requests.iter().any(|r| r.direction == Direction::Down));
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = drain(&mut RandomRequests::new(42, 30, 50));
        let b = drain(&mut RandomRequests::new(42, 30, 50));
        let c = drain(&mut RandomRequests::new(43, 30, 50));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn from_config_uses_seed_top_floor_and_count() {
        let config = test_config(2, 7);
        let a = drain(&mut RandomRequests::from_config(&config));
        let b = drain(&mut RandomRequests::new(config.seed, config.top_floor, config.max_requests));
        assert_eq!(a.len(), 7);
        assert_eq!(a, b);
    }

    #[test]
    fn scripted_source_replays_in_order() {
        let mut source = ScriptedRequests::new([req(0, 5), req(3, 1)]);
        assert_eq!(source.remaining(), Some(2));
        assert_eq!(drain(&mut source), vec![req(0, 5), req(3, 1)]);
    }
}

// ── Requester ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod requester_tests {
    use lift_channel::ShutdownSignal;
    use lift_fleet::Tower;

    use super::*;
    use crate::{submit_at_fixed_rate, ScriptedRequests};

    #[test]
    fn submits_everything_at_the_given_period() {
        let tower = Tower::new(&test_config(1, 0)).unwrap();
        let stop = ShutdownSignal::new();
        let mut source = ScriptedRequests::new([req(0, 1), req(0, 2), req(0, 3), req(0, 4)]);

        let started = Instant::now();
        let n = submit_at_fixed_rate(&tower, &mut source, Duration::from_millis(20), &stop.listener()).unwrap();
        let elapsed = started.elapsed();

        assert_eq!(n, 4);
        assert_eq!(tower.unassigned(), 4);
        // First submit is immediate, three periods follow.
        assert!(elapsed >= Duration::from_millis(60), "{elapsed:?}");
        assert_eq!(tower.shutdown(), vec![req(0, 1), req(0, 2), req(0, 3), req(0, 4)]);
    }

    #[test]
    fn fired_stop_submits_nothing() {
        let tower = Tower::new(&test_config(1, 0)).unwrap();
        let stop = ShutdownSignal::new();
        stop.trigger();
        let mut source = ScriptedRequests::new([req(0, 1), req(0, 2)]);
        let n = submit_at_fixed_rate(&tower, &mut source, Duration::from_millis(5), &stop.listener()).unwrap();
        assert_eq!(n, 0);
        assert_eq!(tower.unassigned(), 0);
    }

    #[test]
    fn shut_down_tower_refuses_production() {
        use lift_fleet::FleetError;

        use crate::{RequestSource, SimError};

        let tower = Tower::new(&test_config(1, 0)).unwrap();
        tower.shutdown();
        let stop = ShutdownSignal::new();
        let mut source = ScriptedRequests::new([req(0, 1), req(0, 2)]);
        let result = submit_at_fixed_rate(&tower, &mut source, Duration::from_millis(5), &stop.listener());
        assert!(matches!(result, Err(SimError::Fleet(FleetError::Stopped))));
        assert_eq!(tower.unassigned(), 0);
        assert_eq!(source.remaining(), Some(1));
    }

    #[test]
    fn stop_cuts_production_short() {
        let tower = Tower::new(&test_config(1, 0)).unwrap();
        let stop = Arc::new(ShutdownSignal::new());
        let mut source = ScriptedRequests::new((1..=50).map(|f| req(0, f)));

        let trigger = {
            let stop = Arc::clone(&stop);
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(60));
                stop.trigger();
            })
        };
        let n = submit_at_fixed_rate(&tower, &mut source, Duration::from_millis(20), &stop.listener()).unwrap();
        trigger.join().unwrap();

        assert!(n >= 1 && n < 50, "submitted {n}");
        assert_eq!(tower.unassigned(), n);
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::{SimBuilder, SimError};

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(test_config(3, 0)).build().unwrap();
        assert_eq!(sim.tower().fleet().len(), 3);
        assert_eq!(sim.config().car_count, 3);
    }

    #[test]
    fn invalid_config_errors() {
        let mut config = test_config(0, 0);
        assert!(matches!(SimBuilder::new(config.clone()).build(), Err(SimError::Config(_))));
        config.car_count = 2;
        config.initial_floor = 99;
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn start_floor_count_mismatch_errors() {
        let result = SimBuilder::new(test_config(3, 0)).start_floors(vec![0, 5]).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn start_floor_out_of_range_errors() {
        let result = SimBuilder::new(test_config(2, 0)).start_floors(vec![0, 16]).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn start_floors_placed_in_fleet() {
        let sim = SimBuilder::new(test_config(3, 0)).start_floors(vec![0, 7, 15]).build().unwrap();
        let floors: Vec<_> = sim.tower().fleet().states().iter().map(|s| s.floor).collect();
        assert_eq!(floors, vec![0, 7, 15]);
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sim_tests {
    use super::*;
    use crate::{ScriptedRequests, SimBuilder};

    #[test]
    fn scripted_run_completes_every_request() {
        let counter = CompletionCounter::default();
        let report = SimBuilder::new(test_config(2, 0))
            .source(ScriptedRequests::new([req(0, 5), req(3, 1), req(9, 0), req(2, 2)]))
            .observer(counter.clone())
            .build()
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(report.submitted, 4);
        assert_eq!(report.dispatched, 4);
        assert_eq!(report.trips_completed, 4);
        assert_eq!(report.stranded, 0);
        assert_eq!(counter.0.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn random_run_uses_max_requests() {
        let report = SimBuilder::new(test_config(3, 6)).build().unwrap().run().unwrap();
        assert_eq!(report.submitted, 6);
        assert_eq!(report.trips_completed, 6);
        assert!(report.floors_travelled > 0);
    }

    #[test]
    fn start_floors_steer_selection() {
        let report = SimBuilder::new(test_config(2, 0))
            .start_floors(vec![0, 10])
            .source(ScriptedRequests::new([req(9, 9)]))
            .build()
            .unwrap()
            .run()
            .unwrap();
        // Car 1 is one floor away; car 0 would have needed nine.
        assert_eq!(report.floors_travelled, 1);
    }

    #[test]
    fn empty_source_finishes_immediately() {
        let report = SimBuilder::new(test_config(2, 0))
            .source(ScriptedRequests::default())
            .build()
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(report.submitted, 0);
        assert_eq!(report.trips_completed, 0);
        assert_eq!(report.floors_travelled, 0);
    }

    #[test]
    fn producer_stop_ends_run_early() {
        let mut config = test_config(2, 0);
        config.request_period_ms = 20;
        let sim = SimBuilder::new(config)
            .source(ScriptedRequests::new((1..=100).map(|f| req(0, f % 15 + 1))))
            .build()
            .unwrap();
        let stop = sim.producer_stop();
        let trigger = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(80));
            stop.trigger();
        });

        let report = sim.run().unwrap();
        trigger.join().unwrap();
        assert!(report.submitted < 100, "{report}");
        assert_eq!(report.trips_completed as usize, report.submitted);
    }

    #[test]
    fn report_display_mentions_totals() {
        let report = crate::SimReport {
            submitted:        3,
            dispatched:       3,
            trips_completed:  2,
            floors_travelled: 17,
            stranded:         1,
            elapsed:          Duration::from_millis(1500),
        };
        let text = report.to_string();
        assert!(text.contains("3 submitted"), "{text}");
        assert!(text.contains("17 floors travelled"), "{text}");
        assert!(text.contains("1 stranded"), "{text}");
    }
}
