//! Tests for the aggregate Monte Carlo forecaster.

use std::f64::consts::E;

use sprintforecast::distribution::{LogNormal, SkewT};
use sprintforecast::{
    CapacityStrategy, ErrorKind, ExecutionStrategy, RandomStream, SprintForecaster, Ticket,
};

fn scenario_tickets() -> Vec<Ticket> {
    vec![
        Ticket::new(1, 1.0, 2.0, 3.0).unwrap(),
        Ticket::new(2, 2.0, 3.0, 4.0).unwrap(),
        Ticket::new(3, 1.5, 2.5, 3.5).unwrap(),
    ]
}

fn degenerate_forecaster() -> SprintForecaster {
    SprintForecaster::new(
        scenario_tickets(),
        ExecutionStrategy::new(LogNormal::new(0.0, 0.0).unwrap()).unwrap(),
        CapacityStrategy::new(LogNormal::new(0.0, 0.0).unwrap()).unwrap(),
    )
    .unwrap()
}

// =============================================================================
// END-TO-END SCENARIO
// =============================================================================

#[test]
fn degenerate_scenario_summary_is_well_formed() {
    let summary = degenerate_forecaster()
        .summary(4.0, 1000, &RandomStream::new(42))
        .unwrap();
    assert!((0.0..=1.0).contains(&summary.p_goal));
    assert!(summary.p50 <= summary.p80 && summary.p80 <= summary.p95);
    assert!(summary.crps >= 0.0);
    assert!(summary.brier >= 0.0 && summary.brier <= 0.25);
}

#[test]
fn degenerate_scenario_completion_equals_total_effort() {
    // unit capacity: completion = sprint_hours × Σ effort
    let f = degenerate_forecaster();
    let stream = RandomStream::new(5);
    let batch = f.simulate_batch(200, &stream).unwrap();
    let times = f.simulate(4.0, 200, &stream).unwrap();
    for (i, t) in times.iter().enumerate() {
        assert!((t - 4.0 * batch.total_effort(i)).abs() < 1e-10);
    }
}

#[test]
fn degenerate_scenario_is_pinned_to_e_scaled_triads() {
    // LogNormal(0, 0) error draws exp(0) = 1, so every effort is e × PERT draw;
    // Σo = 4.5 and Σp = 10.5 for the scenario triads
    let f = degenerate_forecaster();
    let stream = RandomStream::new(42);
    let (lo, hi) = (4.0 * E * 4.5, 4.0 * E * 10.5);

    let times = f.simulate(4.0, 1000, &stream).unwrap();
    for t in &times {
        assert!(*t >= lo - 1e-9 && *t <= hi + 1e-9, "completion {t} outside [{lo}, {hi}]");
    }

    let batch = f.simulate_batch(50, &stream).unwrap();
    for i in 0..50 {
        assert_eq!(batch.capacity(i), 1.0);
        for (x, (o, p)) in batch.effort(i).iter().zip([(1.0, 3.0), (2.0, 4.0), (1.5, 3.5)]) {
            assert!(*x >= E * o - 1e-9 && *x <= E * p + 1e-9);
        }
    }

    let summary = f.summary(4.0, 1000, &stream).unwrap();
    assert_eq!(summary.p_goal, 0.0);
    assert_eq!(summary.brier, 0.0);
    assert!(summary.p50 >= lo && summary.p95 <= hi);
}

// =============================================================================
// DETERMINISM
// =============================================================================

#[test]
fn same_seed_is_bit_reproducible() {
    let f = degenerate_forecaster();
    let a = f.summary(4.0, 1000, &RandomStream::new(7)).unwrap();
    let b = f.summary(4.0, 1000, &RandomStream::new(7)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_seeds_differ() {
    let f = degenerate_forecaster();
    let a = f.simulate(4.0, 100, &RandomStream::new(1)).unwrap();
    let b = f.simulate(4.0, 100, &RandomStream::new(2)).unwrap();
    assert_ne!(a, b);
}

#[test]
fn path_prefix_is_stable() {
    // path i only depends on substream i, so more paths extend the sample
    let f = degenerate_forecaster();
    let stream = RandomStream::new(11);
    let short = f.simulate(4.0, 50, &stream).unwrap();
    let long = f.simulate(4.0, 500, &stream).unwrap();
    assert_eq!(short[..], long[..50]);
}

// =============================================================================
// PROBABILITY AND CARRY-OVER
// =============================================================================

#[test]
fn ample_capacity_meets_the_deadline() {
    let f = SprintForecaster::new(
        scenario_tickets(),
        ExecutionStrategy::new(LogNormal::new(0.0, 0.0).unwrap()).unwrap(),
        CapacityStrategy::new(LogNormal::new(100.0f64.ln(), 0.0).unwrap()).unwrap(),
    )
    .unwrap();
    let stream = RandomStream::new(3);
    let result = f.forecast(4.0, 500, &stream).unwrap();
    assert_eq!(result.probability, 1.0);
    assert_eq!(result.expected_carry, 0.0);
    assert_eq!(f.summary(4.0, 500, &stream).unwrap().p_goal, 1.0);
}

#[test]
fn scarce_capacity_carries_tickets() {
    // capacity 1h against at least e hours per ticket: every ticket is late
    let f = degenerate_forecaster();
    let result = f.forecast(4.0, 300, &RandomStream::new(3)).unwrap();
    assert_eq!(result.probability, 0.0);
    assert_eq!(result.expected_carry, 3.0);
}

#[test]
fn forecast_probability_agrees_with_summary() {
    let f = SprintForecaster::new(
        scenario_tickets(),
        ExecutionStrategy::new(LogNormal::new(0.0, 0.2).unwrap()).unwrap(),
        CapacityStrategy::new(LogNormal::new(7.5f64.ln() + 1.0, 0.2).unwrap()).unwrap(),
    )
    .unwrap();
    let stream = RandomStream::new(21);
    let summary = f.summary(10.0, 2_000, &stream).unwrap();
    let result = f.forecast(10.0, 2_000, &stream).unwrap();
    assert!((summary.p_goal - result.probability).abs() < 1e-12);
}

#[test]
fn heavy_tailed_error_stays_finite() {
    let f = SprintForecaster::new(
        scenario_tickets(),
        ExecutionStrategy::new(SkewT::new(0.0, 0.25, 2.0, 5.0).unwrap()).unwrap(),
        CapacityStrategy::new(LogNormal::new(2.0, 0.1).unwrap()).unwrap(),
    )
    .unwrap();
    let summary = f.summary(8.0, 2_000, &RandomStream::new(9)).unwrap();
    assert!(summary.p95.is_finite());
    assert!(summary.p50 <= summary.p80 && summary.p80 <= summary.p95);
}

// =============================================================================
// ERRORS
// =============================================================================

#[test]
fn zero_paths_is_rejected() {
    let err = degenerate_forecaster()
        .summary(4.0, 0, &RandomStream::new(1))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn non_positive_sprint_is_rejected() {
    let err = degenerate_forecaster()
        .simulate(0.0, 10, &RandomStream::new(1))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}
