//! Tests for the momentum capacity model.

use sprintforecast::{
    CapacityPosterior, CapacityStrategy, ErrorKind, MomentumConfig, MomentumModel, RandomStream,
};

#[test]
fn unanchored_fit_matches_capacity_posterior() {
    let history = [28.0, 35.0, 31.0, 40.0, 26.0, 33.0, 38.0, 29.0];
    let config = MomentumConfig::default().anchor_weight(0.0);
    let m = MomentumModel::fit_with(&history, 30.0, &config).unwrap();
    let posterior = CapacityPosterior::fit(&history).unwrap();
    assert_eq!(m.retained(), history.len());
    assert!((m.mu() - posterior.mu()).abs() < 1e-12);
    assert!((m.sigma() - posterior.sigma()).abs() < 1e-12);
}

#[test]
fn window_keeps_latest_sprints() {
    let history = [28.0, 35.0, 31.0, 40.0, 26.0, 33.0, 38.0, 29.0];
    let config = MomentumConfig::default().window(3).anchor_weight(0.0);
    let m = MomentumModel::fit_with(&history, 30.0, &config).unwrap();
    let posterior = CapacityPosterior::fit(&history[5..]).unwrap();
    assert_eq!(m.retained(), 3);
    assert!((m.mu() - posterior.mu()).abs() < 1e-12);
    assert!((m.sigma() - posterior.sigma()).abs() < 1e-12);
}

#[test]
fn recent_sprints_weigh_more_with_decay() {
    let history = [20.0, 20.0, 20.0, 40.0, 40.0];
    let config = MomentumConfig::default().decay(0.8).anchor_weight(0.0);
    let m = MomentumModel::fit_with(&history, 30.0, &config).unwrap();
    let unweighted = history.iter().map(|x: &f64| x.ln()).sum::<f64>() / 5.0;
    assert!(m.mu() > unweighted);
}

#[test]
fn anchor_pulls_toward_target() {
    let history = [20.0, 22.0, 21.0];
    let free = MomentumModel::fit_with(&history, 40.0, &MomentumConfig::default().anchor_weight(0.0)).unwrap();
    let anchored = MomentumModel::fit(&history, 40.0).unwrap();
    assert!(anchored.mu() > free.mu());
    assert!(anchored.mu() < 40.0f64.ln());
    let expected = 0.75 * free.mu() + 0.25 * 40.0f64.ln();
    assert!((anchored.mu() - expected).abs() < 1e-10);
}

#[test]
fn single_sprint_is_degenerate() {
    let m = MomentumModel::fit(&[30.0], 30.0).unwrap();
    assert_eq!(m.sigma(), 0.0);
    let draws = m.forecast(10, &mut RandomStream::new(1).substream(0));
    assert!(draws.iter().all(|&d| (d - 30.0).abs() < 1e-9));
}

#[test]
fn forecast_draws_are_positive_and_reproducible() {
    let m = MomentumModel::fit(&[30.0, 42.0, 38.0, 45.0, 50.0, 41.0, 39.0], 40.0).unwrap();
    assert_eq!(m.retained(), 7);
    let a = m.forecast(1_000, &mut RandomStream::new(3).substream(0));
    let b = m.forecast(1_000, &mut RandomStream::new(3).substream(0));
    assert_eq!(a, b);
    assert!(a.iter().all(|&d| d > 0.0));
}

#[test]
fn converts_to_capacity_strategy() {
    let m = MomentumModel::fit(&[30.0, 40.0], 35.0).unwrap();
    let strategy = CapacityStrategy::from(m);
    let draws = strategy.sample(100, &mut RandomStream::new(4).substream(0));
    assert!(draws.iter().all(|&d| d > 0.0));
}

#[test]
fn momentum_errors() {
    assert_eq!(MomentumModel::fit(&[], 30.0).unwrap_err().kind(), ErrorKind::Data);
    assert_eq!(MomentumModel::fit(&[30.0], 0.0).unwrap_err().kind(), ErrorKind::Validation);
    assert_eq!(MomentumModel::fit(&[30.0, -1.0], 30.0).unwrap_err().kind(), ErrorKind::Validation);
}

#[test]
#[should_panic(expected = "decay must be in (0, 1]")]
fn zero_decay_panics() {
    let _ = MomentumConfig::default().decay(0.0);
}
