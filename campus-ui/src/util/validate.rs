//! Form checks run before anything is sent. Errors are the exact text
//! shown to the user.

use chrono::NaiveDateTime;

use crate::api::{Event, MemberRole, RsvpStatus};
use crate::util::format::has_ended;

pub const INVALID_TIME: &str = "Invalid time format. Use HH:mm:ss";
pub const QUICK_RSVP_INCOMPLETE: &str = "Please fill all the fields.";
pub const RSVP_INCOMPLETE: &str = "Please enter your name, select an event, and a status";
pub const REVIEW_INCOMPLETE: &str = "Please complete all fields";
pub const EVENT_NOT_ENDED: &str = "You can only review events that have already ended.";
pub const FIELDS_MISSING: &str = "Please fill out all fields";
pub const EMPTY_MESSAGE: &str = "Please enter a message";
pub const EMPTY_USERNAME: &str = "Username must not be empty";
pub const EMPTY_PASSWORD: &str = "Password must not be empty";

pub type Check = Result<(), &'static str>;

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Normalise to zero-padded `HH:mm:ss`: three numeric parts, hours at most
/// 23, minutes and seconds at most 59
pub fn parse_event_time(raw: &str) -> Result<String, &'static str> {
    let parts: Vec<&str> = raw.trim().split(':').collect();
    if parts.len() != 3 {
        return Err(INVALID_TIME);
    }

    let mut values = [0u32; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        if part.is_empty() || part.len() > 2 || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(INVALID_TIME);
        }
        *slot = part.parse().map_err(|_| INVALID_TIME)?;
    }

    let [h, m, s] = values;
    if h > 23 || m > 59 || s > 59 {
        return Err(INVALID_TIME);
    }
    Ok(format!("{:02}:{:02}:{:02}", h, m, s))
}

pub fn check_quick_rsvp(name: &str, status: Option<RsvpStatus>) -> Check {
    if blank(name) || status.is_none() {
        return Err(QUICK_RSVP_INCOMPLETE);
    }
    Ok(())
}

pub fn check_rsvp(name: &str, event_id: Option<i64>, status: Option<RsvpStatus>) -> Check {
    if blank(name) || event_id.is_none() || status.is_none() {
        return Err(RSVP_INCOMPLETE);
    }
    Ok(())
}

/// Event, rating 1–5 and comment are required, and the event must be over
pub fn check_review(event: Option<&Event>, rating: u8, comments: &str, now: NaiveDateTime) -> Check {
    let event = match event {
        Some(event) if (1..=5).contains(&rating) && !blank(comments) => event,
        _ => return Err(REVIEW_INCOMPLETE),
    };
    if !has_ended(event, now) {
        return Err(EVENT_NOT_ENDED);
    }
    Ok(())
}

pub fn check_chat_room(name: &str, event_id: Option<i64>) -> Check {
    if blank(name) || event_id.is_none() {
        return Err(FIELDS_MISSING);
    }
    Ok(())
}

pub fn check_member_registration(name: &str, role: Option<MemberRole>) -> Check {
    if blank(name) || role.is_none() {
        return Err(FIELDS_MISSING);
    }
    Ok(())
}

pub fn check_message(message: &str) -> Check {
    if blank(message) {
        return Err(EMPTY_MESSAGE);
    }
    Ok(())
}

/// `(field, message)` for every failing login field
pub fn check_login(user_name: &str, password: &str) -> Vec<(&'static str, &'static str)> {
    let mut errors = Vec::new();
    if blank(user_name) {
        errors.push(("userName", EMPTY_USERNAME));
    }
    if password.is_empty() {
        errors.push(("password", EMPTY_PASSWORD));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::format::parse_api_datetime;

    #[test]
    fn test_event_time() {
        assert_eq!(parse_event_time("9:5:0").unwrap(), "09:05:00");
        assert_eq!(parse_event_time("23:59:59").unwrap(), "23:59:59");
        for raw in ["24:00:00", "10:60:00", "10:00:60", "10:00", "a:b:c", "1:2:3:4", "", "-1:00:00"] {
            assert_eq!(parse_event_time(raw), Err(INVALID_TIME), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(check_quick_rsvp("", Some(RsvpStatus::Interested)), Err(QUICK_RSVP_INCOMPLETE));
        assert_eq!(check_rsvp("Sam", Some(1), None), Err(RSVP_INCOMPLETE));
        assert!(check_rsvp("Sam", Some(1), Some(RsvpStatus::Attending)).is_ok());
        assert_eq!(check_chat_room("Room", None), Err(FIELDS_MISSING));
        assert_eq!(check_member_registration(" ", Some(MemberRole::Member)), Err(FIELDS_MISSING));
        assert_eq!(check_message("   "), Err(EMPTY_MESSAGE));
    }

    #[test]
    fn test_review_eligibility() {
        let now = parse_api_datetime("2024-10-19T12:00:00").unwrap();
        let running = Event {
            end_date: Some("2024-10-20T00:00:00".into()),
            ..Default::default()
        };
        let finished = Event {
            end_date: Some("2024-10-18".into()),
            ..Default::default()
        };

        assert_eq!(check_review(None, 5, "great", now), Err(REVIEW_INCOMPLETE));
        assert_eq!(check_review(Some(&finished), 0, "great", now), Err(REVIEW_INCOMPLETE));
        assert_eq!(check_review(Some(&finished), 4, "", now), Err(REVIEW_INCOMPLETE));
        assert_eq!(check_review(Some(&running), 4, "great", now), Err(EVENT_NOT_ENDED));
        assert!(check_review(Some(&finished), 4, "great", now).is_ok());
    }

    #[test]
    fn test_login() {
        assert_eq!(
            check_login("", ""),
            vec![("userName", EMPTY_USERNAME), ("password", EMPTY_PASSWORD)]
        );
        assert!(check_login("sam", "pw").is_empty());
    }
}
