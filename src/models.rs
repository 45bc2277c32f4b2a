//! Campus Records
//!
//! Records exchanged with the campus-events REST backend, the response
//! envelope that wraps every payload, and the create/update bodies.
//! Field names follow the backend's camelCase JSON.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Records with a backend identifier.
pub trait HasId {
    fn id(&self) -> i64;
}

/// Deserialize a present-but-null field as its default
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================
// ENVELOPE
// ============================================

/// A single validation failure reported by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldError {
    /// Property the message belongs to; empty for form-level errors
    #[serde(deserialize_with = "null_default")]
    pub property: String,
    #[serde(deserialize_with = "null_default")]
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.property.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.property, self.message)
        }
    }
}

/// `{ data, errors, hasErrors }` wrapper returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
    #[serde(default)]
    pub has_errors: bool,
}

/// Why an envelope did not yield data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeRejection {
    /// `hasErrors` was set (the list may still be empty)
    Errors(Vec<FieldError>),
    /// No errors, but `data` was null or absent
    MissingData,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
            has_errors: false,
        }
    }

    pub fn failed(errors: Vec<FieldError>) -> Self {
        Self {
            data: None,
            errors,
            has_errors: true,
        }
    }

    /// Unwrap the payload. An envelope that reports errors is rejected even
    /// when it also carries data.
    pub fn into_result(self) -> Result<T, EnvelopeRejection> {
        if self.has_errors || !self.errors.is_empty() {
            return Err(EnvelopeRejection::Errors(self.errors));
        }
        self.data.ok_or(EnvelopeRejection::MissingData)
    }
}

/// Group envelope errors by property, keeping the first message per key.
/// Form-level errors land under the empty key.
pub fn field_errors(errors: &[FieldError]) -> std::collections::BTreeMap<String, String> {
    let mut map = std::collections::BTreeMap::new();
    for error in errors {
        map.entry(error.property.clone())
            .or_insert_with(|| error.message.clone());
    }
    map
}

// ============================================
// WIRE ENUMS
// ============================================

/// Error for an unrecognised wire value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

/// Attendance intent recorded by an RSVP
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    Interested,
    Attending,
    NotAttending,
}

impl RsvpStatus {
    pub fn all() -> &'static [RsvpStatus] {
        &[
            RsvpStatus::Interested,
            RsvpStatus::Attending,
            RsvpStatus::NotAttending,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Interested => "interested",
            RsvpStatus::Attending => "attending",
            RsvpStatus::NotAttending => "not_attending",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            RsvpStatus::Interested => "Interested",
            RsvpStatus::Attending => "Attending",
            RsvpStatus::NotAttending => "Not Attending",
        }
    }
}

/// Role of a member inside an organization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Member,
    Admin,
    Approved,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Member => "member",
            MemberRole::Admin => "admin",
            MemberRole::Approved => "approved",
        }
    }
}

/// Account type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    User,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::User => "user",
            UserType::Admin => "admin",
        }
    }
}

/// Account status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

macro_rules! wire_str {
    ($ty:ident, $kind:literal, [$($variant:ident),+]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_lowercase();
                $(
                    if $ty::$variant.as_str() == needle {
                        return Ok($ty::$variant);
                    }
                )+
                Err(UnknownValue { kind: $kind, value: s.to_string() })
            }
        }
    };
}

wire_str!(RsvpStatus, "RSVP status", [Interested, Attending, NotAttending]);
wire_str!(MemberRole, "member role", [Member, Admin, Approved]);
wire_str!(UserType, "user type", [User, Admin]);
wire_str!(UserStatus, "user status", [Active, Inactive]);

// ============================================
// RECORDS
// ============================================

/// Campus event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    pub date: Option<String>,
    /// Start time as `HH:mm:ss`
    #[serde(deserialize_with = "null_default")]
    pub time: String,
    #[serde(deserialize_with = "null_default")]
    pub location: String,
    #[serde(deserialize_with = "null_default")]
    pub organization_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub created_by: i64,
    #[serde(deserialize_with = "null_default")]
    pub image_url: String,
    #[serde(deserialize_with = "null_default")]
    pub created_at: String,
    pub end_date: Option<String>,
}

impl Event {
    /// Start date, if the backend sent a parseable one
    pub fn starts_on(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_api_datetime).map(|dt| dt.date())
    }

    /// Whether the event has finished at `now`. Events without an end date
    /// count as finished.
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        match self.end_date.as_deref().and_then(parse_api_datetime) {
            Some(end) => end <= now.naive_utc(),
            None => true,
        }
    }
}

/// RSVP record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventParticipant {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub user_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub event_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub status: String,
    #[serde(deserialize_with = "null_default")]
    pub created_at: String,
}

impl EventParticipant {
    pub fn rsvp_status(&self) -> Option<RsvpStatus> {
        self.status.parse().ok()
    }
}

/// Student organization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Organization {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    /// Free-text author name
    #[serde(deserialize_with = "null_default")]
    pub created_by: String,
    #[serde(deserialize_with = "null_default")]
    pub created_at: String,
    pub logo_url: Option<String>,
}

/// Organization membership
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Member {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub user_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub organization_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub role: String,
    #[serde(deserialize_with = "null_default")]
    pub joined_at: String,
}

impl Member {
    pub fn member_role(&self) -> Option<MemberRole> {
        self.role.parse().ok()
    }
}

/// Event review
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Review {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub event_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub comments: String,
    #[serde(deserialize_with = "null_default")]
    pub rating: u8,
    #[serde(deserialize_with = "null_default")]
    pub user_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub created_at: String,
}

/// Per-event chat room
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatRoom {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub event_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub created_at: String,
}

/// Message posted in a chat room
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatMessage {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub message: String,
    #[serde(deserialize_with = "null_default")]
    pub user_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub chat_room_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub created_at: String,
}

/// User account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_default")]
    pub email: String,
    #[serde(deserialize_with = "null_default")]
    pub phone: String,
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub user_type: String,
    #[serde(deserialize_with = "null_default")]
    pub user_name: String,
    #[serde(deserialize_with = "null_default")]
    pub image: String,
    #[serde(deserialize_with = "null_default")]
    pub status: String,
    #[serde(deserialize_with = "null_default")]
    pub created_at: String,
    /// Only some backends return this on `/api/users/me`
    pub role: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Admin check used to gate member approval
    pub fn is_admin(&self) -> bool {
        self.user_type.eq_ignore_ascii_case("admin")
            || self
                .role
                .as_deref()
                .map(|r| r.eq_ignore_ascii_case("admin"))
                .unwrap_or(false)
    }
}

macro_rules! has_id {
    ($($ty:ty),+) => {
        $(impl HasId for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })+
    };
}

has_id!(Event, EventParticipant, Organization, Member, Review, ChatRoom, ChatMessage, User);

// ============================================
// REQUEST BODIES
// ============================================

/// Body for creating or updating an event
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub title: String,
    pub description: String,
    pub date: Option<String>,
    pub time: String,
    pub location: String,
    pub organization_id: i64,
    pub created_by: i64,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl From<&Event> for EventInput {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date.clone(),
            time: event.time.clone(),
            location: event.location.clone(),
            organization_id: event.organization_id,
            created_by: event.created_by,
            image_url: event.image_url.clone(),
            end_date: event.end_date.clone(),
        }
    }
}

/// Body for creating an RSVP
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpInput {
    pub user_id: i64,
    pub name: String,
    pub event_id: i64,
    pub status: RsvpStatus,
}

/// Body for updating an RSVP
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpUpdate {
    pub name: String,
    pub status: RsvpStatus,
    pub event_id: i64,
}

/// Body for creating or updating an organization
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationInput {
    pub name: String,
    pub description: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Body for registering a member
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    pub user_id: i64,
    pub organization_id: i64,
    pub name: String,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Body for editing a member
#[derive(Debug, Clone, Serialize)]
pub struct MemberUpdate {
    pub name: String,
    pub role: MemberRole,
}

/// Body for creating or updating a review
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub event_id: i64,
    pub comments: String,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// Body for creating a chat room
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoomInput {
    pub name: String,
    pub event_id: i64,
}

/// Body for renaming a chat room
#[derive(Debug, Clone, Serialize)]
pub struct ChatRoomRename {
    pub name: String,
}

/// Body for posting a chat message
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageInput {
    pub message: String,
    pub user_id: i64,
    pub chat_room_id: i64,
    pub created_by: String,
}

/// Body for editing a chat message
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessageEdit {
    pub message: String,
}

/// Body for creating or updating a user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub user_name: String,
    pub image: String,
    pub status: UserStatus,
    pub password: String,
}

/// Body for `/api/authenticate`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

// ============================================
// TIME HELPERS
// ============================================

/// Parse the timestamp shapes the backend emits: RFC 3339, naive ISO
/// datetimes with optional fraction, or a bare date.
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_envelope_with_data() {
        let env: Envelope<Vec<ChatRoom>> = serde_json::from_str(
            r#"{"data":[{"id":3,"name":"Hackathon","eventId":9,"createdAt":"2024-10-01T10:00:00"}],"errors":[],"hasErrors":false}"#,
        )
        .unwrap();

        let rooms = env.into_result().unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].event_id, 9);
    }

    #[test]
    fn test_envelope_errors_win_over_data() {
        let env: Envelope<bool> = serde_json::from_str(
            r#"{"data":true,"errors":[{"property":"userName","message":"Required"}],"hasErrors":true}"#,
        )
        .unwrap();

        match env.into_result() {
            Err(EnvelopeRejection::Errors(errors)) => {
                assert_eq!(errors[0].property, "userName");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_envelope_null_data() {
        let env: Envelope<Event> = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert_eq!(env.into_result(), Err(EnvelopeRejection::MissingData));
    }

    #[test]
    fn test_missing_fields_default() {
        let event: Event = serde_json::from_str(r#"{"id":1,"title":"Open Mic"}"#).unwrap();
        assert_eq!(event.title, "Open Mic");
        assert!(event.image_url.is_empty());
        assert!(event.end_date.is_none());
    }

    #[test]
    fn test_field_errors_keeps_first_per_property() {
        let errors = vec![
            FieldError { property: "name".into(), message: "Required".into() },
            FieldError { property: "name".into(), message: "Too short".into() },
            FieldError { property: String::new(), message: "Bad request".into() },
        ];
        let map = field_errors(&errors);
        assert_eq!(map["name"], "Required");
        assert_eq!(map[""], "Bad request");
    }

    #[test]
    fn test_rsvp_status_wire_format() {
        let body = RsvpInput {
            user_id: 4,
            name: "Sam".into(),
            event_id: 2,
            status: RsvpStatus::NotAttending,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "not_attending");
        assert_eq!(json["eventId"], 2);
        assert_eq!("Attending".parse::<RsvpStatus>().unwrap(), RsvpStatus::Attending);
        assert!("maybe".parse::<RsvpStatus>().is_err());
    }

    #[test]
    fn test_user_type_renamed() {
        let user: User = serde_json::from_str(
            r#"{"id":7,"firstName":"Ada","lastName":"Lovelace","type":"admin","status":"active"}"#,
        )
        .unwrap();
        assert!(user.is_admin());
        assert_eq!(user.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_event_has_ended() {
        let now = Utc.with_ymd_and_hms(2024, 10, 19, 12, 0, 0).unwrap();
        let mut event = Event {
            end_date: Some("2024-10-18T23:00:00".into()),
            ..Default::default()
        };
        assert!(event.has_ended(now));

        event.end_date = Some("2024-10-20".into());
        assert!(!event.has_ended(now));

        event.end_date = None;
        assert!(event.has_ended(now));
    }

    #[test]
    fn test_parse_api_datetime_shapes() {
        assert!(parse_api_datetime("2024-10-19T08:30:00Z").is_some());
        assert!(parse_api_datetime("2024-10-19T08:30:00.123").is_some());
        assert!(parse_api_datetime("2024-10-19").is_some());
        assert!(parse_api_datetime("soon").is_none());
        assert!(parse_api_datetime("").is_none());
    }
}
