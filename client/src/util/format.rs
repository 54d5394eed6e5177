//! Display labels for cards, bubbles and query results.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use chrono::{DateTime, Datelike, Utc};

pub fn message_count_label(count: u32) -> String {
    if count == 1 {
        "1 message".to_owned()
    } else {
        format!("{count} messages")
    }
}

/// Short card date: `Jun 1`, with the year only outside the current one.
pub fn created_label(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if created_at.year() == now.year() {
        created_at.format("%b %-d").to_string()
    } else {
        created_at.format("%b %-d, %Y").to_string()
    }
}

/// Bubble timestamp, `HH:MM`.
pub fn time_label(created_at: DateTime<Utc>) -> String {
    created_at.format("%H:%M").to_string()
}

/// Footer under a query answer; `None` when nothing was searched.
pub fn searched_label(count: u32) -> Option<String> {
    match count {
        0 => None,
        1 => Some("Searched 1 conversation to answer your question".to_owned()),
        n => Some(format!("Searched {n} conversations to answer your question")),
    }
}

pub fn status_label(active: bool) -> &'static str {
    if active { "Active" } else { "Ended" }
}
