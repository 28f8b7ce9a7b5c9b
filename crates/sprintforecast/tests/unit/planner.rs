//! Tests for intake planning.

use proptest::prelude::*;
use sprintforecast::{
    CapacityPosterior, ErrorKind, IntakePlanner, MomentumModel, RandomStream, SizeBucket, Ticket,
    TriadRecord,
};

fn record(n: u64, o: f64, m: f64, p: f64) -> TriadRecord {
    TriadRecord::new(format!("#{n}"), Ticket::new(n, o, m, p).unwrap())
}

fn backlog() -> Vec<TriadRecord> {
    vec![
        record(1, 1.0, 2.0, 3.0),    // 2h, S
        record(2, 0.5, 1.0, 1.5),    // 1h, XS
        record(3, 5.0, 6.0, 7.0),    // 6h, M
        record(4, 30.0, 40.0, 60.0), // ~41.7h, XXL
        record(5, 10.0, 12.0, 14.0), // 12h, L
    ]
}

#[test]
fn shortest_jobs_first() {
    let plan = IntakePlanner::new(backlog(), vec![10.0]).unwrap().plan(0.8).unwrap();
    let numbers: Vec<_> = plan.selected.iter().map(|t| t.number).collect();
    assert_eq!(numbers, vec![2, 1, 3]);
    assert!((plan.committed_hours - 9.0).abs() < 1e-12);
}

#[test]
fn oversized_tickets_never_selected() {
    let plan = IntakePlanner::new(backlog(), vec![1_000.0]).unwrap().plan(0.8).unwrap();
    assert!(plan.selected.iter().all(|t| t.number != 4));
    assert!(!plan.size_mix.contains_key(&SizeBucket::XXL));
    assert_eq!(plan.oversized, vec![4]);
    let total: f64 = plan.size_mix.values().sum();
    assert!((total - 1.0).abs() < 1e-10);
}

#[test]
fn size_mix_is_share_of_hours() {
    let plan = IntakePlanner::new(backlog(), vec![3.0]).unwrap().plan(0.8).unwrap();
    // 1h XS + 2h S reaches the bound exactly
    assert_eq!(plan.selected.len(), 2);
    assert!((plan.size_mix[&SizeBucket::XS] - 1.0 / 3.0).abs() < 1e-12);
    assert!((plan.size_mix[&SizeBucket::S] - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn higher_confidence_commits_less() {
    let posterior = CapacityPosterior::fit(&[12.0, 18.0, 15.0, 22.0, 10.0]).unwrap();
    let draws = posterior.sample(5_000, &mut RandomStream::new(1).substream(0));
    let planner = IntakePlanner::new(backlog(), draws).unwrap();
    let bold = planner.plan(0.2).unwrap();
    let careful = planner.plan(0.95).unwrap();
    assert!(careful.capacity_bound <= bold.capacity_bound);
    assert!(careful.committed_hours <= bold.committed_hours);
}

#[test]
fn momentum_forecast_feeds_planner() {
    let model = MomentumModel::fit(&[20.0, 22.0, 25.0, 24.0], 24.0).unwrap();
    let draws = model.forecast(2_000, &mut RandomStream::new(2).substream(0));
    let plan = IntakePlanner::new(backlog(), draws).unwrap().plan(0.8).unwrap();
    assert!(plan.committed_hours <= plan.capacity_bound);
}

#[test]
fn planner_errors() {
    assert_eq!(IntakePlanner::new(backlog(), Vec::new()).unwrap_err().kind(), ErrorKind::Data);
    let planner = IntakePlanner::new(backlog(), vec![5.0]).unwrap();
    assert_eq!(planner.plan(1.5).unwrap_err().kind(), ErrorKind::Validation);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Committed hours never exceed the capacity bound and XXL is never admitted
    #[test]
    fn prop_plan_respects_bound(
        triads in prop::collection::vec((0.5f64..40.0, 0.1f64..10.0, 0.1f64..10.0), 0..30),
        capacity in prop::collection::vec(1.0f64..200.0, 1..50),
        confidence in 0.0f64..=1.0,
    ) {
        let backlog: Vec<_> = triads
            .iter()
            .enumerate()
            .map(|(i, &(o, dm, dp))| record(i as u64, o, o + dm, o + dm + dp))
            .collect();
        let plan = IntakePlanner::new(backlog, capacity).unwrap().plan(confidence).unwrap();
        prop_assert!(plan.committed_hours <= plan.capacity_bound + 1e-9);
        prop_assert!(plan.selected.iter().all(|t| t.size != SizeBucket::XXL));
        prop_assert!(plan.size_mix.values().all(|&s| s >= 0.0));
        prop_assert!(plan.size_mix.values().sum::<f64>() <= 1.0 + 1e-9);
    }
}
