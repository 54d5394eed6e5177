use super::*;
use chrono::TimeZone;

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 5, 0).unwrap()
}

#[test]
fn message_count_label_pluralizes() {
    assert_eq!(message_count_label(0), "0 messages");
    assert_eq!(message_count_label(1), "1 message");
    assert_eq!(message_count_label(12), "12 messages");
}

#[test]
fn created_label_omits_current_year() {
    assert_eq!(created_label(at(2025, 6, 1), at(2025, 12, 31)), "Jun 1");
}

#[test]
fn created_label_includes_other_year() {
    assert_eq!(created_label(at(2024, 11, 23), at(2025, 1, 2)), "Nov 23, 2024");
}

#[test]
fn time_label_is_hours_and_minutes() {
    assert_eq!(time_label(at(2025, 6, 1)), "09:05");
}

#[test]
fn searched_label_hidden_for_zero() {
    assert_eq!(searched_label(0), None);
}

#[test]
fn searched_label_pluralizes() {
    assert_eq!(
        searched_label(1).as_deref(),
        Some("Searched 1 conversation to answer your question")
    );
    assert_eq!(
        searched_label(3).as_deref(),
        Some("Searched 3 conversations to answer your question")
    );
}

#[test]
fn status_label_names_both_states() {
    assert_eq!(status_label(true), "Active");
    assert_eq!(status_label(false), "Ended");
}
