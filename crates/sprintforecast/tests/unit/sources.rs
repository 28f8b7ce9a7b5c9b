//! Tests for file-backed sources and stage duration extraction.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Duration, TimeZone, Utc};
use sprintforecast::sources::{
    load_capacity_history, load_distribution, load_triads, CapacityFile, CapacityHistorySource,
    ColumnTransitionExtractor, DurationExtractor, LabelEventExtractor, TimelineEvent, TimelineFile,
    TriadFile, TriadSource,
};
use sprintforecast::ErrorKind;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sprintforecast-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap()
}

// =============================================================================
// FILES
// =============================================================================

#[test]
fn triads_csv_with_header_and_deps() {
    let path = temp_file(
        "triads.csv",
        "number,title,optimistic,mode,pessimistic,deps\n\
         # backlog\n\
         101,Login form,1,2,4,\n\
         102,Session store,2,3,5,101\n\
         103,Audit log,1.5,2.5,6,101;102\n",
    );
    let records = TriadFile::new(&path).fetch_triads().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].title, "Login form");
    assert!(records[0].ticket.dependencies().is_empty());
    assert!(records[2].ticket.dependencies().contains(&102));
    assert_eq!(records[2].ticket.dependencies().len(), 2);
}

#[test]
fn unordered_triad_is_validation_error() {
    let path = temp_file("bad_triad.csv", "7,Backwards,3,2,1\n");
    assert_eq!(load_triads(&path).unwrap_err().kind(), ErrorKind::Validation);
}

#[test]
fn malformed_row_is_upstream_error() {
    let path = temp_file("bad_row.csv", "7,Short row,1\n");
    assert_eq!(load_triads(&path).unwrap_err().kind(), ErrorKind::Upstream);
    let path = temp_file("bad_number.csv", "x,Title,1,2,3\n");
    assert_eq!(load_triads(&path).unwrap_err().kind(), ErrorKind::Upstream);
}

#[test]
fn missing_file_is_upstream_error() {
    let path = std::env::temp_dir().join("sprintforecast-does-not-exist.csv");
    assert_eq!(load_triads(&path).unwrap_err().kind(), ErrorKind::Upstream);
}

#[test]
fn empty_triad_file_is_empty_not_an_error() {
    let path = temp_file("empty.csv", "number,title,optimistic,mode,pessimistic\n");
    assert!(load_triads(&path).unwrap().is_empty());
}

#[test]
fn capacity_history_file() {
    let path = temp_file("capacity.txt", "# hours per sprint\n42\n\n38.5\n45\n");
    let history = CapacityFile::new(&path).historical_capacity().unwrap();
    assert_eq!(history, vec![42.0, 38.5, 45.0]);
    let path = temp_file("capacity_bad.txt", "42\nlots\n");
    assert_eq!(load_capacity_history(&path).unwrap_err().kind(), ErrorKind::Upstream);
}

#[test]
fn distribution_file() {
    let path = temp_file("exec.json", r#"{"type": "skewt", "params": {"location": 0, "scale": 0.25, "skew": 2, "df": 5}}"#);
    assert_eq!(load_distribution(&path).unwrap().tag(), "skewt");
}

#[test]
fn timeline_file() {
    let path = temp_file(
        "timelines.json",
        r#"{"5": [
            {"created_at": "2024-05-06T09:00:00Z", "event": "labeled", "label": "Dev"},
            {"created_at": "2024-05-06T15:00:00Z", "event": "unlabeled", "label": "dev"}
        ]}"#,
    );
    let source = TimelineFile::open(&path).unwrap();
    let durations = LabelEventExtractor::new(source).extract(&[5, 6]).unwrap();
    assert_eq!(durations.dev, vec![6.0]);
    assert!(durations.review.is_empty());
}

// =============================================================================
// EXTRACTORS
// =============================================================================

#[test]
fn column_moves_give_stage_hours() {
    let events = vec![
        TimelineEvent::moved(t0(), Some("todo"), Some("dev")),
        TimelineEvent::moved(t0() + Duration::hours(5), Some("dev"), Some("review")),
        TimelineEvent::moved(t0() + Duration::hours(7), Some("review"), Some("done")),
    ];
    let source = TimelineFile::from_map(HashMap::from([(1, events)]));
    let d = ColumnTransitionExtractor::new(&source).extract(&[1]).unwrap();
    assert_eq!(d.dev, vec![5.0]);
    assert_eq!(d.review, vec![2.0]);
}

#[test]
fn events_are_ordered_by_time() {
    let events = vec![
        TimelineEvent::moved(t0() + Duration::hours(3), Some("dev"), Some("done")),
        TimelineEvent::moved(t0(), Some("todo"), Some("dev")),
    ];
    let source = TimelineFile::from_map(HashMap::from([(1, events)]));
    let d = ColumnTransitionExtractor::new(&source).extract(&[1]).unwrap();
    assert_eq!(d.dev, vec![3.0]);
}

#[test]
fn incomplete_stage_is_skipped() {
    let events = vec![
        TimelineEvent::labeled(t0(), "dev"),
        TimelineEvent::labeled(t0() + Duration::hours(1), "review"),
        TimelineEvent::unlabeled(t0() + Duration::hours(4), "review"),
    ];
    let source = TimelineFile::from_map(HashMap::from([(2, events)]));
    let d = LabelEventExtractor::new(&source).extract(&[2]).unwrap();
    assert!(d.dev.is_empty());
    assert_eq!(d.review, vec![3.0]);
}

#[test]
fn extractors_disagree_on_event_kinds() {
    // label events are invisible to the column extractor and vice versa
    let events = vec![
        TimelineEvent::labeled(t0(), "dev"),
        TimelineEvent::unlabeled(t0() + Duration::hours(2), "dev"),
    ];
    let source = TimelineFile::from_map(HashMap::from([(3, events)]));
    assert!(ColumnTransitionExtractor::new(&source).extract(&[3]).unwrap().dev.is_empty());
    assert_eq!(LabelEventExtractor::new(&source).extract(&[3]).unwrap().dev, vec![2.0]);
}

#[test]
fn custom_column_names() {
    let events = vec![
        TimelineEvent::moved(t0(), None, Some("In Progress")),
        TimelineEvent::moved(t0() + Duration::minutes(30), Some("in progress"), Some("Done")),
    ];
    let source = TimelineFile::from_map(HashMap::from([(4, events)]));
    let d = ColumnTransitionExtractor::new(&source)
        .with_columns("In Progress", "Code Review")
        .extract(&[4])
        .unwrap();
    assert_eq!(d.dev, vec![0.5]);
}
