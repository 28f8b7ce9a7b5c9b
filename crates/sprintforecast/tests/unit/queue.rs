//! Tests for the queue simulator and forecast engines.

use sprintforecast::distribution::{Empirical, ScaledBeta};
use sprintforecast::{
    build_strategies, EmpiricalEngine, ErrorKind, ExecutionStrategy, ForecastEngine,
    QueueForecastEngine, QueueSimulator, RandomStream, ReviewPool, ReviewStrategy, RunConfig,
    Ticket,
};

fn tickets() -> Vec<Ticket> {
    vec![
        Ticket::new(1, 1.0, 2.0, 3.0).unwrap(),
        Ticket::new(2, 2.0, 3.0, 4.0).unwrap(),
        Ticket::new(3, 1.5, 2.5, 3.5).unwrap(),
    ]
}

fn no_noise() -> (ExecutionStrategy, ReviewStrategy) {
    (
        ExecutionStrategy::new(Empirical::new(vec![0.0]).unwrap()).unwrap(),
        ReviewStrategy::new(ScaledBeta::new(2.0, 5.0, 0.1, 1.5).unwrap()).unwrap(),
    )
}

// =============================================================================
// QUEUE SIMULATOR
// =============================================================================

#[test]
fn enough_workers_finish_everything() {
    // dev ≤ 4h, review ≤ 1.5h, one worker per ticket
    let (e, r) = no_noise();
    let sim = QueueSimulator::new(tickets(), e, r).unwrap().with_workers(3);
    let result = sim.forecast(10.0, 500, &RandomStream::new(1)).unwrap();
    assert_eq!(result.probability, 1.0);
    assert_eq!(result.expected_carry, 0.0);
    assert_eq!(result.draws, 500);
}

#[test]
fn one_worker_is_slower_than_three() {
    let (e, r) = no_noise();
    let stream = RandomStream::new(8);
    let one = QueueSimulator::new(tickets(), e.clone(), r.clone())
        .unwrap()
        .with_workers(1)
        .forecast(8.0, 1_000, &stream)
        .unwrap();
    let three = QueueSimulator::new(tickets(), e, r)
        .unwrap()
        .with_workers(3)
        .forecast(8.0, 1_000, &stream)
        .unwrap();
    assert!(one.probability <= three.probability);
    assert!(one.expected_carry >= three.expected_carry);
}

#[test]
fn dedicated_reviewers_never_hurt() {
    let (e, r) = no_noise();
    let stream = RandomStream::new(4);
    let shared = QueueSimulator::new(tickets(), e.clone(), r.clone())
        .unwrap()
        .with_workers(1)
        .forecast(9.0, 1_000, &stream)
        .unwrap();
    let dedicated = QueueSimulator::new(tickets(), e, r)
        .unwrap()
        .with_workers(1)
        .with_review_pool(ReviewPool::Dedicated(1))
        .forecast(9.0, 1_000, &stream)
        .unwrap();
    assert!(dedicated.probability >= shared.probability);
}

#[test]
fn queue_forecast_is_reproducible() {
    let (e, r) = no_noise();
    let sim = QueueSimulator::new(tickets(), e, r).unwrap().with_workers(2);
    let engine = QueueForecastEngine::new(sim, 6.0, RandomStream::new(99));
    assert_eq!(engine.forecast(300).unwrap(), engine.forecast(300).unwrap());
}

#[test]
fn config_drives_pool_and_horizon() {
    let (e, r) = no_noise();
    let config = RunConfig::new().workers(5).horizon_factor(2.0);
    let sim = QueueSimulator::from_config(tickets(), e, r, &config).unwrap();
    assert_eq!(sim.workers(), 5);
    assert!((sim.horizon_for(10.0) - 20.0).abs() < 1e-12);
}

#[test]
fn quick_config_runs_a_smoke_forecast() {
    let (e, r) = no_noise();
    let config = RunConfig::quick();
    let sim = QueueSimulator::from_config(tickets(), e, r, &config).unwrap();
    let engine = QueueForecastEngine::new(sim, 10.0, config.stream());
    let result = engine.forecast(config.draws).unwrap();
    assert_eq!(result.draws, 200);
    assert_eq!(result.probability, 1.0);
    assert_eq!(result.expected_carry, 0.0);
}

#[test]
fn dependency_chain_serializes_work() {
    let (e, r) = no_noise();
    let chained = vec![
        Ticket::new(1, 1.0, 2.0, 3.0).unwrap(),
        Ticket::new(2, 2.0, 3.0, 4.0).unwrap().with_dependencies([1]),
        Ticket::new(3, 1.5, 2.5, 3.5).unwrap().with_dependencies([2]),
    ];
    let sim = QueueSimulator::new(chained, e, r).unwrap().with_workers(3);
    let mut rng = RandomStream::new(2).substream(0);
    let out = sim.simulate_path(&mut rng, 1_000.0);
    assert!(out.finish[0] < out.finish[1]);
    assert!(out.finish[1] < out.finish[2]);
}

#[test]
fn queue_errors() {
    let (e, r) = no_noise();
    let err = QueueSimulator::new(Vec::new(), e.clone(), r.clone()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Data);

    let sim = QueueSimulator::new(tickets(), e.clone(), r.clone()).unwrap();
    let err = sim.forecast(10.0, 0, &RandomStream::new(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let cyclic = vec![
        Ticket::new(1, 1.0, 2.0, 3.0).unwrap().with_dependencies([3]),
        Ticket::new(2, 1.0, 2.0, 3.0).unwrap().with_dependencies([1]),
        Ticket::new(3, 1.0, 2.0, 3.0).unwrap().with_dependencies([2]),
    ];
    let err = QueueSimulator::new(cyclic, e, r).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

// =============================================================================
// EMPIRICAL ENGINE
// =============================================================================

#[test]
fn empirical_empty_pool_is_data_error() {
    let engine = EmpiricalEngine::new(Vec::new(), 10.0, RandomStream::new(1)).unwrap();
    assert_eq!(engine.forecast(1).unwrap_err().kind(), ErrorKind::Data);
}

#[test]
fn empirical_single_path_scenario() {
    let engine = EmpiricalEngine::new(vec![5.0], 10.0, RandomStream::new(1)).unwrap();
    let result = engine.forecast(1).unwrap();
    assert_eq!(result.probability, 1.0);
    assert_eq!(result.expected_carry, 0.0);
}

#[test]
fn engines_share_one_capability() {
    let (e, r) = no_noise();
    let engines: Vec<Box<dyn ForecastEngine>> = vec![
        Box::new(QueueForecastEngine::new(
            QueueSimulator::new(tickets(), e, r).unwrap(),
            10.0,
            RandomStream::new(3),
        )),
        Box::new(EmpiricalEngine::new(vec![1.0, 2.0, 3.0], 10.0, RandomStream::new(3)).unwrap()),
    ];
    for engine in &engines {
        let result = engine.forecast(200).unwrap();
        assert_eq!(result.probability, 1.0);
    }
}

// =============================================================================
// STRATEGIES FROM HISTORY
// =============================================================================

#[test]
fn strategies_from_observed_history_drive_the_queue() {
    let (exec, review, capacity) =
        build_strategies(&[3.0, 4.0, 5.0, 8.0], &[0.5, 1.0, 2.0], &[40.0, 45.0, 50.0]).unwrap();
    let sim = QueueSimulator::new(tickets(), exec, review).unwrap();
    let result = sim.forecast(12.0, 500, &RandomStream::new(5)).unwrap();
    assert!((0.0..=1.0).contains(&result.probability));
    assert!(result.expected_carry >= 0.0);

    let mut rng = RandomStream::new(5).substream(0);
    assert!(capacity.sample(100, &mut rng).iter().all(|&c| (40.0..=50.0).contains(&c)));
}

#[test]
fn empty_history_is_data_error() {
    let err = build_strategies(&[], &[1.0], &[40.0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Data);
    assert!(ReviewStrategy::new(Empirical::new(Vec::new()).unwrap()).is_err());
}
