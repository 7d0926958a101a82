use super::common::*;
use crate::matching::recency::{months_between, recency_factor, tenure_months, UNKNOWN_RECENCY};

#[test]
fn recency_is_a_step_function_of_elapsed_months() {
    let today = today();
    assert_eq!(recency_factor(Some(months_ago(3)), today), 1.0);
    assert_eq!(recency_factor(Some(months_ago(10)), today), 0.8);
    assert_eq!(recency_factor(Some(months_ago(20)), today), 0.6);
    assert_eq!(recency_factor(Some(months_ago(30)), today), 0.4);
}

#[test]
fn missing_last_use_is_neither_rewarded_nor_fully_penalized() {
    assert_eq!(recency_factor(None, today()), UNKNOWN_RECENCY);
    assert_eq!(UNKNOWN_RECENCY, 0.5);
}

#[test]
fn step_boundaries_are_inclusive() {
    let today = today();
    assert_eq!(recency_factor(Some(months_ago(6)), today), 1.0);
    assert_eq!(recency_factor(Some(months_ago(7)), today), 0.8);
    assert_eq!(recency_factor(Some(months_ago(12)), today), 0.8);
    assert_eq!(recency_factor(Some(months_ago(13)), today), 0.6);
    assert_eq!(recency_factor(Some(months_ago(24)), today), 0.6);
    assert_eq!(recency_factor(Some(months_ago(25)), today), 0.4);
}

#[test]
fn partial_months_are_ignored() {
    let today = today();
    // Six months and a couple of weeks still counts as six.
    let last_used = date(2024, 12, 1);
    assert_eq!(months_between(last_used, today), 6);
    assert_eq!(recency_factor(Some(last_used), today), 1.0);
}

#[test]
fn future_last_use_counts_as_recent() {
    assert_eq!(recency_factor(Some(date(2026, 1, 1)), today()), 1.0);
}

#[test]
fn months_between_uses_calendar_components() {
    assert_eq!(months_between(date(2020, 3, 1), date(2023, 3, 1)), 36);
    assert_eq!(months_between(date(2024, 1, 15), date(2024, 2, 14)), 0);
    assert_eq!(months_between(date(2024, 1, 15), date(2024, 2, 15)), 1);
    assert_eq!(months_between(date(2023, 1, 31), date(2023, 2, 28)), 1);
    assert_eq!(months_between(date(2023, 1, 31), date(2023, 3, 1)), 1);
}

#[test]
fn end_before_start_is_zero_months() {
    assert_eq!(months_between(date(2024, 5, 1), date(2023, 5, 1)), 0);
    assert_eq!(months_between(date(2024, 5, 1), date(2024, 5, 1)), 0);
}

#[test]
fn open_ended_tenure_runs_until_today() {
    assert_eq!(tenure_months(months_ago(9), None, today()), 9);
    assert_eq!(
        tenure_months(date(2023, 1, 1), Some(date(2024, 7, 1)), today()),
        18
    );
}
