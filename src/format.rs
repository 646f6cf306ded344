//! Display formatting for playback times and session titles.

use chrono::{DateTime, Utc};

/// Format a playback position for the chat list.
///
/// `MM:SS` below one hour, `H:MM:SS` from then on. Negative and
/// non-finite values render as `00:00`.
pub fn format_timestamp(seconds: f64) -> String {
    let total_secs = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// Session title as shown in the player header: `name - YYYY-MM-DD`.
///
/// The date is omitted when the epoch is missing or out of range.
pub fn format_title(name: &str, epoch_millis: Option<i64>) -> String {
    match epoch_millis.and_then(DateTime::<Utc>::from_timestamp_millis) {
        Some(date) => format!("{} - {}", name, date.format("%Y-%m-%d")),
        None => name.to_string(),
    }
}
