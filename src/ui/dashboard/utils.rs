//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::donations::DonationStatus;
use crate::events::Worker;
use chrono::{DateTime, Utc};
use ratatui::prelude::Color;

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::Feed(_) => Color::Cyan,
        Worker::Claims => Color::Yellow,
        Worker::Creations => Color::Green,
    }
}

pub fn get_status_color(status: DonationStatus) -> Color {
    match status {
        DonationStatus::Available => Color::LightGreen,
        DonationStatus::Claimed => Color::Yellow,
        DonationStatus::Expired => Color::DarkGray,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Relative age of a listing, e.g. "12m ago".
pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - created_at).num_seconds().max(0);
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86400)
    }
}

/// Shorten transport errors shown in feed error slots.
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("timed out") || msg.contains("TimedOut") {
        return "Request timed out".to_string();
    }
    if msg.contains("error sending request") || msg.contains("Connect") {
        return "Could not reach the donation service".to_string();
    }
    msg.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_compact_timestamp() {
        assert_eq!(format_compact_timestamp("2026-10-19 14:05:33"), "10-19 14:05");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn test_format_age() {
        let now = Utc::now();
        assert_eq!(format_age(now, now), "just now");
        assert_eq!(format_age(now - Duration::minutes(12), now), "12m ago");
        assert_eq!(format_age(now - Duration::hours(3), now), "3h ago");
        assert_eq!(format_age(now - Duration::days(2), now), "2d ago");
    }
}
