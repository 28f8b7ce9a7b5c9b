//! Tests for run configuration and distribution config parsing.

use sprintforecast::distribution::{Distribution, DistributionConfig};
use sprintforecast::{parse_distribution_config, ErrorKind, RandomStream, ReviewPool, RunConfig};

// =============================================================================
// RUN CONFIG
// =============================================================================

#[test]
fn builder_sets_fields() {
    let c = RunConfig::new()
        .paths(500)
        .draws(50)
        .workers(4)
        .review_pool(ReviewPool::Dedicated(2))
        .seed(17)
        .confidence(0.9)
        .hours_per_dev_day(5.0);
    assert_eq!(c.paths, 500);
    assert_eq!(c.draws, 50);
    assert_eq!(c.workers, 4);
    assert_eq!(c.review_pool, ReviewPool::Dedicated(2));
    assert_eq!(c.stream(), RandomStream::new(17));
    assert!(c.validate().is_ok());
}

#[test]
fn quick_is_a_small_valid_run() {
    let c = RunConfig::quick();
    assert_eq!(c.paths, 1_000);
    assert_eq!(c.draws, 200);
    assert_eq!(c.workers, RunConfig::default().workers);
    assert!(c.validate().is_ok());
}

#[test]
#[should_panic(expected = "workers must be positive")]
fn zero_workers_panics() {
    let _ = RunConfig::new().workers(0);
}

#[test]
#[should_panic(expected = "review_pool must have at least one reviewer")]
fn empty_review_pool_panics() {
    let _ = RunConfig::new().review_pool(ReviewPool::Dedicated(0));
}

#[test]
#[should_panic(expected = "horizon_factor must be >= 1")]
fn short_horizon_panics() {
    let _ = RunConfig::new().horizon_factor(0.5);
}

// =============================================================================
// DISTRIBUTION CONFIG
// =============================================================================

#[test]
fn every_tag_resolves() {
    let cases = [
        (r#"{"type": "lognormal", "params": {"mu": 0.0, "sigma": 0.3}}"#, "lognormal"),
        (r#"{"type": "skewt", "params": {"loc": 0.0, "scale": 0.25, "alpha": 2.0, "df": 5.0}}"#, "skewt"),
        (r#"{"type": "beta", "params": {"a": 2.0, "b": 5.0, "low": 0.1, "high": 1.5}}"#, "beta"),
        (r#"{"type": "empirical", "params": {"pool": [1.0, 2.0, 4.0]}}"#, "empirical"),
    ];
    for (json, tag) in cases {
        let dist = parse_distribution_config(json).unwrap();
        assert_eq!(dist.tag(), tag);
    }
}

#[test]
fn config_round_trips_through_distribution() {
    let json = r#"{"type": "beta", "params": {"a": 8.0, "b": 2.0, "low": 40.0, "high": 55.0}}"#;
    let config: DistributionConfig = serde_json::from_str(json).unwrap();
    let dist = Distribution::from_config(&config).unwrap();
    assert_eq!(dist.to_config(), config);
}

#[test]
fn unknown_tag_is_validation_error() {
    let err = parse_distribution_config(r#"{"type": "weibull", "params": {"k": 1.0}}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn missing_parameter_is_validation_error() {
    let err = parse_distribution_config(r#"{"type": "lognormal", "params": {"mu": 0.0}}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn out_of_domain_parameter_is_validation_error() {
    let err = parse_distribution_config(r#"{"type": "lognormal", "params": {"mu": 0.0, "sigma": -1.0}}"#)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn empty_pool_parses_but_cannot_sample() {
    let dist = parse_distribution_config(r#"{"type": "empirical", "params": {"pool": []}}"#).unwrap();
    let err = dist.sample(3, &mut RandomStream::new(1).substream(0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Data);
}
