//! Input Validation
//!
//! Client-side checks run before a form is submitted. The `Display` text of
//! each error is the message shown to the user.

use crate::models::{Event, MemberRole, RsvpStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid time format. Use HH:mm:ss")]
    InvalidTime,

    #[error("Please fill all the fields.")]
    QuickRsvpIncomplete,

    #[error("Please enter your name, select an event, and a status")]
    RsvpIncomplete,

    #[error("Please complete all fields")]
    ReviewIncomplete,

    #[error("You can only review events that have already ended.")]
    EventNotEnded,

    #[error("Please fill out all fields")]
    FieldsMissing,

    #[error("Please enter a message")]
    EmptyMessage,

    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("Password must not be empty")]
    EmptyPassword,
}

impl ValidationError {
    /// Form field the message is rendered under; `None` for form-level
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::InvalidTime => Some("time"),
            ValidationError::EmptyUsername => Some("userName"),
            ValidationError::EmptyPassword => Some("password"),
            _ => None,
        }
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Normalise an event start time to zero-padded `HH:mm:ss`.
///
/// Exactly three numeric parts are required with hours at most 23 and
/// minutes and seconds at most 59.
pub fn parse_event_time(raw: &str) -> Result<String, ValidationError> {
    let re = regex::Regex::new(r"^(\d{1,2}):(\d{1,2}):(\d{1,2})$")
        .map_err(|_| ValidationError::InvalidTime)?;

    let caps = re.captures(raw.trim()).ok_or(ValidationError::InvalidTime)?;
    let part = |i: usize| -> Result<u32, ValidationError> {
        caps[i].parse().map_err(|_| ValidationError::InvalidTime)
    };

    let (h, m, s) = (part(1)?, part(2)?, part(3)?);
    if h > 23 || m > 59 || s > 59 {
        return Err(ValidationError::InvalidTime);
    }

    Ok(format!("{:02}:{:02}:{:02}", h, m, s))
}

/// RSVP from an event card: name and status
pub fn check_quick_rsvp(name: &str, status: Option<RsvpStatus>) -> Result<(), ValidationError> {
    if blank(name) || status.is_none() {
        return Err(ValidationError::QuickRsvpIncomplete);
    }
    Ok(())
}

/// RSVP from the participants page: name, event and status
pub fn check_rsvp(
    name: &str,
    event_id: Option<i64>,
    status: Option<RsvpStatus>,
) -> Result<(), ValidationError> {
    if blank(name) || event_id.is_none() || status.is_none() {
        return Err(ValidationError::RsvpIncomplete);
    }
    Ok(())
}

/// A review needs an event, a 1–5 rating and a comment, and the event
/// must have ended
pub fn check_review(
    event: Option<&Event>,
    rating: u8,
    comments: &str,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    let event = match event {
        Some(event) if (1..=5).contains(&rating) && !blank(comments) => event,
        _ => return Err(ValidationError::ReviewIncomplete),
    };

    if !event.has_ended(now) {
        return Err(ValidationError::EventNotEnded);
    }
    Ok(())
}

pub fn check_chat_room(name: &str, event_id: Option<i64>) -> Result<(), ValidationError> {
    if blank(name) || event_id.is_none() {
        return Err(ValidationError::FieldsMissing);
    }
    Ok(())
}

pub fn check_member_registration(
    name: &str,
    role: Option<MemberRole>,
) -> Result<(), ValidationError> {
    if blank(name) || role.is_none() {
        return Err(ValidationError::FieldsMissing);
    }
    Ok(())
}

pub fn check_message(message: &str) -> Result<(), ValidationError> {
    if blank(message) {
        return Err(ValidationError::EmptyMessage);
    }
    Ok(())
}

/// Every failing login field, in form order
pub fn check_login(user_name: &str, password: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if blank(user_name) {
        errors.push(ValidationError::EmptyUsername);
    }
    if password.is_empty() {
        errors.push(ValidationError::EmptyPassword);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_zero_padded() {
        assert_eq!(parse_event_time("9:5:0").unwrap(), "09:05:00");
        assert_eq!(parse_event_time(" 23:59:59 ").unwrap(), "23:59:59");
        assert_eq!(parse_event_time("00:00:00").unwrap(), "00:00:00");
    }

    #[test]
    fn test_time_rejects_bad_input() {
        for raw in ["24:00:00", "12:60:00", "12:00:60", "12:00", "12:00:00:00", "ab:cd:ef", ""] {
            assert_eq!(
                parse_event_time(raw),
                Err(ValidationError::InvalidTime),
                "accepted {:?}",
                raw
            );
        }
        assert_eq!(
            ValidationError::InvalidTime.to_string(),
            "Invalid time format. Use HH:mm:ss"
        );
    }

    #[test]
    fn test_rsvp_checks() {
        assert!(check_quick_rsvp("Sam", Some(RsvpStatus::Attending)).is_ok());
        assert_eq!(
            check_quick_rsvp("  ", Some(RsvpStatus::Attending)),
            Err(ValidationError::QuickRsvpIncomplete)
        );
        assert_eq!(
            check_rsvp("Sam", None, Some(RsvpStatus::Interested)),
            Err(ValidationError::RsvpIncomplete)
        );
        assert!(check_rsvp("Sam", Some(3), Some(RsvpStatus::Interested)).is_ok());
    }

    #[test]
    fn test_review_requires_ended_event() {
        let now = Utc.with_ymd_and_hms(2024, 10, 19, 12, 0, 0).unwrap();
        let upcoming = Event {
            id: 1,
            end_date: Some("2024-11-01T18:00:00".into()),
            ..Default::default()
        };
        let finished = Event {
            id: 2,
            end_date: Some("2024-10-01T18:00:00".into()),
            ..Default::default()
        };

        assert_eq!(
            check_review(Some(&upcoming), 4, "Great", now),
            Err(ValidationError::EventNotEnded)
        );
        assert!(check_review(Some(&finished), 4, "Great", now).is_ok());
        assert_eq!(
            check_review(Some(&finished), 0, "Great", now),
            Err(ValidationError::ReviewIncomplete)
        );
        assert_eq!(
            check_review(None, 5, "Great", now),
            Err(ValidationError::ReviewIncomplete)
        );
    }

    #[test]
    fn test_misc_checks() {
        assert_eq!(check_chat_room("Lobby", None), Err(ValidationError::FieldsMissing));
        assert!(check_chat_room("Lobby", Some(1)).is_ok());
        assert_eq!(
            check_member_registration("", Some(MemberRole::Member)),
            Err(ValidationError::FieldsMissing)
        );
        assert_eq!(check_message(" \n"), Err(ValidationError::EmptyMessage));
    }

    #[test]
    fn test_login_reports_each_field() {
        let errors = check_login("", "");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field(), Some("userName"));
        assert_eq!(errors[1].to_string(), "Password must not be empty");
        assert!(check_login("ada", "secret").is_empty());
    }
}
