//! API Types
//!
//! Records and request bodies exchanged with the campus-events backend.
//! JSON names are camelCase; missing or null fields fall back to defaults
//! so one odd record never breaks a whole list.

use serde::{Deserialize, Serialize};

/// Records keyed by a backend id
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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldError {
    #[serde(deserialize_with = "null_default")]
    pub property: String,
    #[serde(deserialize_with = "null_default")]
    pub message: String,
}

/// `{ data, errors, hasErrors }` wrapper
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
    #[serde(default)]
    pub has_errors: bool,
}

impl<T> Envelope<T> {
    /// Payload, or the reported errors. Null data without errors yields an
    /// empty error list.
    pub fn into_result(self) -> Result<T, Vec<FieldError>> {
        if self.has_errors || !self.errors.is_empty() {
            return Err(self.errors);
        }
        self.data.ok_or_else(Vec::new)
    }
}

/// Field name to message; the empty key holds form-level errors
pub type FormErrors = std::collections::BTreeMap<String, String>;

/// Group errors by property, keeping the first message for each
pub fn field_errors(errors: &[FieldError]) -> FormErrors {
    let mut map = FormErrors::new();
    for error in errors {
        map.entry(error.property.clone())
            .or_insert_with(|| error.message.clone());
    }
    map
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    pub date: Option<String>,
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

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
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

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Organization {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub created_by: String,
    #[serde(deserialize_with = "null_default")]
    pub created_at: String,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
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

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
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

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
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

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
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

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
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
    pub role: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

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

// ============ Wire enums ============

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    Interested,
    Attending,
    NotAttending,
}

impl RsvpStatus {
    pub fn all() -> &'static [RsvpStatus] {
        &[RsvpStatus::Interested, RsvpStatus::Attending, RsvpStatus::NotAttending]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Interested => "interested",
            RsvpStatus::Attending => "attending",
            RsvpStatus::NotAttending => "not_attending",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RsvpStatus::Interested => "Interested",
            RsvpStatus::Attending => "Attending",
            RsvpStatus::NotAttending => "Not Attending",
        }
    }

    /// Parse a `<select>` value or wire string
    pub fn from_value(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
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

    pub fn from_value(value: &str) -> Option<Self> {
        [MemberRole::Member, MemberRole::Admin, MemberRole::Approved]
            .into_iter()
            .find(|r| r.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    User,
    Admin,
}

impl UserType {
    pub fn from_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("admin") {
            UserType::Admin
        } else {
            UserType::User
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn from_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("inactive") {
            UserStatus::Inactive
        } else {
            UserStatus::Active
        }
    }
}

// ============ Request bodies ============

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

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpInput {
    pub user_id: i64,
    pub name: String,
    pub event_id: i64,
    pub status: RsvpStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpUpdate {
    pub name: String,
    pub status: RsvpStatus,
    pub event_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationInput {
    pub name: String,
    pub description: String,
    pub created_by: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    pub user_id: i64,
    pub organization_id: i64,
    pub name: String,
    pub role: MemberRole,
    pub joined_at: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberUpdate {
    pub name: String,
    pub role: MemberRole,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub event_id: i64,
    pub comments: String,
    pub rating: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoomInput {
    pub name: String,
    pub event_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageInput {
    pub message: String,
    pub user_id: i64,
    pub chat_room_id: i64,
    pub created_by: String,
}

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

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_has_errors() {
        let env: Envelope<Vec<Event>> = serde_json::from_str(
            r#"{"data":[],"errors":[{"property":"","message":"Server down"}],"hasErrors":true}"#,
        )
        .unwrap();
        let errors = env.into_result().unwrap_err();
        assert_eq!(errors[0].message, "Server down");
    }

    #[test]
    fn test_envelope_null_data() {
        let env: Envelope<Organization> = serde_json::from_str(r#"{"data":null,"hasErrors":false}"#).unwrap();
        assert!(env.into_result().unwrap_err().is_empty());
    }

    #[test]
    fn test_null_fields_default() {
        let env: Envelope<Vec<Organization>> = serde_json::from_str(
            r#"{"data":[{"id":2,"name":"Chess Club","description":null,"logoUrl":null}]}"#,
        )
        .unwrap();
        let orgs = env.into_result().unwrap();
        assert_eq!(orgs[0].name, "Chess Club");
        assert!(orgs[0].description.is_empty());
    }

    #[test]
    fn test_status_values() {
        assert_eq!(RsvpStatus::from_value("not_attending"), Some(RsvpStatus::NotAttending));
        assert_eq!(RsvpStatus::from_value(""), None);
        assert_eq!(MemberRole::from_value("admin"), Some(MemberRole::Admin));
        let body = serde_json::to_value(RsvpUpdate {
            name: "Sam".into(),
            status: RsvpStatus::Interested,
            event_id: 3,
        })
        .unwrap();
        assert_eq!(body["status"], "interested");
        assert_eq!(body["eventId"], 3);
    }

    #[test]
    fn test_field_errors_by_property() {
        let map = field_errors(&[
            FieldError { property: "userName".into(), message: "Unknown user".into() },
            FieldError { property: "userName".into(), message: "Second".into() },
            FieldError { property: String::new(), message: "Locked out".into() },
        ]);
        assert_eq!(map["userName"], "Unknown user");
        assert_eq!(map[""], "Locked out");
    }
}
