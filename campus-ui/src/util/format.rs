//! Display formatting for dates, times, ratings and wire labels.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::api::{Event, MemberRole, Review, RsvpStatus};

const DAY_SECONDS: f64 = 24.0 * 60.0 * 60.0;

/// Placeholder shown when an event has no image
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400";

/// Parse the date shapes the backend emits: RFC 3339, a bare ISO
/// datetime, or a plain date (midnight).
pub fn parse_api_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Current UTC time without an offset
pub fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

/// "Sat, Oct 19, 2024", or "N/A"
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(parse_api_datetime)
        .map(|dt| dt.format("%a, %b %-d, %Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// "HH:mm[:ss]" as "h:mm AM/PM". Hour 0 reads as 12.
pub fn format_time(raw: &str) -> String {
    let mut parts = raw.trim().split(':');
    let (hours, minutes) = match (parts.next(), parts.next()) {
        (Some(h), Some(m)) => (h, m),
        _ => return "N/A".to_string(),
    };
    let hours: u32 = match hours.trim().parse() {
        Ok(h) => h,
        Err(_) => return "N/A".to_string(),
    };

    let period = if hours >= 12 { "PM" } else { "AM" };
    let display = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{} {}", display, minutes, period)
}

/// Countdown label for an event card
pub fn days_left(raw: Option<&str>, now: NaiveDateTime) -> String {
    let date = match raw.and_then(parse_api_datetime) {
        Some(date) => date,
        None => return "N/A".to_string(),
    };

    let seconds = (date - now).num_milliseconds() as f64 / 1000.0;
    let days = (seconds / DAY_SECONDS).ceil() as i64;
    if days > 0 {
        format!("{} days left", days)
    } else {
        "Event Passed".to_string()
    }
}

/// Whether the event starts after `now`; gates RSVP over Review
pub fn is_upcoming(event: &Event, now: NaiveDateTime) -> bool {
    event
        .date
        .as_deref()
        .and_then(parse_api_datetime)
        .map(|date| date > now)
        .unwrap_or(false)
}

/// Reviews are only accepted once the end date is past. No end date counts
/// as ended.
pub fn has_ended(event: &Event, now: NaiveDateTime) -> bool {
    match event.end_date.as_deref().and_then(parse_api_datetime) {
        Some(end) => end <= now,
        None => true,
    }
}

/// Reviews belonging to one event
pub fn reviews_for(reviews: &[Review], event_id: i64) -> Vec<&Review> {
    reviews.iter().filter(|r| r.event_id == event_id).collect()
}

/// Mean rating, 0 with no reviews
pub fn average_rating(reviews: &[Review], event_id: i64) -> f64 {
    let ratings: Vec<f64> = reviews_for(reviews, event_id)
        .iter()
        .map(|r| f64::from(r.rating))
        .collect();
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().sum::<f64>() / ratings.len() as f64
}

pub fn event_title(events: &[Event], event_id: i64) -> String {
    events
        .iter()
        .find(|e| e.id == event_id)
        .map(|e| e.title.clone())
        .unwrap_or_else(|| "Unknown Event".to_string())
}

pub fn rsvp_label(status: &str) -> &'static str {
    RsvpStatus::from_value(status)
        .map(|s| s.label())
        .unwrap_or("Unknown Status")
}

pub fn role_label(role: &str) -> &'static str {
    match MemberRole::from_value(role) {
        Some(MemberRole::Member) => "Member",
        Some(MemberRole::Admin) => "Admin",
        Some(MemberRole::Approved) => "Approved",
        None => "Unknown Role",
    }
}

/// Table cell date: "2024-10-19 14:30", or the raw text if unparseable
pub fn format_timestamp(raw: &str) -> String {
    parse_api_datetime(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Filled/empty star string for a 0–5 rating, rounded to the nearest star
pub fn stars(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> NaiveDateTime {
        parse_api_datetime(raw).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("2024-10-19")), "Sat, Oct 19, 2024");
        assert_eq!(format_date(Some("2024-10-19T18:00:00")), "Sat, Oct 19, 2024");
        assert_eq!(format_date(Some("2024-10-19T18:00:00Z")), "Sat, Oct 19, 2024");
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("soon")), "N/A");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("14:30:00"), "2:30 PM");
        assert_eq!(format_time("00:05:00"), "12:05 AM");
        assert_eq!(format_time("12:00"), "12:00 PM");
        assert_eq!(format_time("9:15:00"), "9:15 AM");
        assert_eq!(format_time(""), "N/A");
        assert_eq!(format_time("noon"), "N/A");
    }

    #[test]
    fn test_days_left() {
        let now = at("2024-10-19T12:00:00");
        assert_eq!(days_left(Some("2024-10-22"), now), "3 days left");
        // Part of a day rounds up
        assert_eq!(days_left(Some("2024-10-20T00:00:00"), now), "1 days left");
        assert_eq!(days_left(Some("2024-10-19"), now), "Event Passed");
        assert_eq!(days_left(None, now), "N/A");
    }

    #[test]
    fn test_upcoming_and_ended() {
        let now = at("2024-10-19T12:00:00");
        let event = Event {
            date: Some("2024-11-01".into()),
            end_date: Some("2024-11-01T20:00:00".into()),
            ..Default::default()
        };
        assert!(is_upcoming(&event, now));
        assert!(!has_ended(&event, now));

        let undated = Event::default();
        assert!(!is_upcoming(&undated, now));
        assert!(has_ended(&undated, now));
    }

    #[test]
    fn test_average_rating() {
        let reviews = vec![
            Review { event_id: 1, rating: 4, ..Default::default() },
            Review { event_id: 1, rating: 5, ..Default::default() },
            Review { event_id: 2, rating: 1, ..Default::default() },
        ];
        assert_eq!(average_rating(&reviews, 1), 4.5);
        assert_eq!(average_rating(&reviews, 3), 0.0);
        assert_eq!(reviews_for(&reviews, 2).len(), 1);
    }

    #[test]
    fn test_labels() {
        assert_eq!(rsvp_label("not_attending"), "Not Attending");
        assert_eq!(rsvp_label("maybe"), "Unknown Status");
        assert_eq!(role_label("admin"), "Admin");
        assert_eq!(event_title(&[], 3), "Unknown Event");
        assert_eq!(stars(4.5), "★★★★★");
        assert_eq!(stars(0.0), "☆☆☆☆☆");
    }
}
