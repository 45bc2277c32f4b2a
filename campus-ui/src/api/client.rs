//! HTTP API Client
//!
//! Functions for communicating with the campus-events REST API.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::types::*;

/// Default API base URL. Empty means same origin, where `campus-server`
/// answers `/api/*`.
pub const DEFAULT_API_BASE: &str = "";

const API_URL_KEY: &str = "campus_api_url";
const USER_ID_KEY: &str = "userId";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = local_storage()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

/// Id of the signed-in user, if one is stored
pub fn current_user_id() -> Option<i64> {
    local_storage()
        .and_then(|storage| storage.get_item(USER_ID_KEY).ok().flatten())
        .and_then(|raw| parse_user_id(&raw))
}

pub fn set_current_user_id(id: i64) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(USER_ID_KEY, &id.to_string());
    }
}

fn parse_user_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

// ============ Errors ============

/// Why a call produced no data
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFailure {
    /// The request never got an answer
    Network(String),
    /// The backend answered with errors, a null payload or a failing status
    Rejected(Vec<FieldError>),
}

impl ApiFailure {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiFailure::Network(_))
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ApiFailure::Rejected(errors) => errors,
            ApiFailure::Network(_) => &[],
        }
    }

    fn message(message: String) -> Self {
        ApiFailure::Rejected(vec![FieldError {
            property: String::new(),
            message,
        }])
    }
}

// ============ Transport ============

async fn send(request: Request) -> Result<Response, ApiFailure> {
    request
        .send()
        .await
        .map_err(|e| ApiFailure::Network(format!("Network error: {}", e)))
}

/// Status and JSON checks; the envelope's own error flags are left to the
/// caller
async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<Envelope<T>, ApiFailure> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiFailure::Network(format!("Network error: {}", e)))?;

    let envelope: Envelope<T> = match serde_json::from_str(&text) {
        Ok(envelope) => envelope,
        Err(e) if response_ok(status) => {
            return Err(ApiFailure::message(format!("Parse error: {}", e)));
        }
        Err(_) => return Err(ApiFailure::message(format!("HTTP {}", status))),
    };

    if !response_ok(status) && envelope.errors.is_empty() {
        return Err(ApiFailure::message(format!("HTTP {}", status)));
    }

    Ok(envelope)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiFailure> {
    read_envelope(response)
        .await?
        .into_result()
        .map_err(ApiFailure::Rejected)
}

fn response_ok(status: u16) -> bool {
    (200..300).contains(&status)
}

fn url(path: &str) -> String {
    format!("{}{}", get_api_base(), path)
}

fn with_body<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Request, ApiFailure> {
    builder
        .json(body)
        .map_err(|e| ApiFailure::message(format!("Request build error: {}", e)))
}

fn without_body(builder: RequestBuilder) -> Result<Request, ApiFailure> {
    builder
        .build()
        .map_err(|e| ApiFailure::message(format!("Request build error: {}", e)))
}

pub async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiFailure> {
    let response = send(without_body(Request::get(&url(path)))?).await?;
    decode(response).await
}

pub async fn post<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiFailure> {
    let response = send(with_body(Request::post(&url(path)), body)?).await?;
    decode(response).await
}

pub async fn put<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiFailure> {
    let response = send(with_body(Request::put(&url(path)), body)?).await?;
    decode(response).await
}

/// DELETE whose payload is only an acknowledgement
pub async fn delete(path: &str) -> Result<(), ApiFailure> {
    let response = send(without_body(Request::delete(&url(path)))?).await?;
    acknowledge(read_envelope(response).await?)
}

/// Reported errors reject even when the list is empty. Otherwise null data
/// passes and an explicit `false` is a rejection.
fn acknowledge(envelope: Envelope<serde_json::Value>) -> Result<(), ApiFailure> {
    if envelope.has_errors || !envelope.errors.is_empty() {
        return Err(ApiFailure::Rejected(envelope.errors));
    }
    match envelope.data {
        Some(serde_json::Value::Bool(false)) => Err(ApiFailure::Rejected(Vec::new())),
        _ => Ok(()),
    }
}

// ============ Events ============

pub async fn fetch_events() -> Result<Vec<Event>, ApiFailure> {
    get("/api/events").await
}

pub async fn fetch_event(id: i64) -> Result<Event, ApiFailure> {
    get(&format!("/api/events/{}", id)).await
}

pub async fn create_event(input: &EventInput) -> Result<Event, ApiFailure> {
    post("/api/events", input).await
}

pub async fn update_event(id: i64, input: &EventInput) -> Result<Event, ApiFailure> {
    put(&format!("/api/events/{}", id), input).await
}

pub async fn delete_event(id: i64) -> Result<(), ApiFailure> {
    delete(&format!("/api/events/{}", id)).await
}

// ============ RSVPs ============

pub async fn fetch_participants() -> Result<Vec<EventParticipant>, ApiFailure> {
    get("/api/event-participants").await
}

pub async fn create_participant(input: &RsvpInput) -> Result<EventParticipant, ApiFailure> {
    post("/api/event-participants", input).await
}

pub async fn update_participant(id: i64, input: &RsvpUpdate) -> Result<EventParticipant, ApiFailure> {
    put(&format!("/api/event-participants/{}", id), input).await
}

pub async fn delete_participant(id: i64) -> Result<(), ApiFailure> {
    delete(&format!("/api/event-participants/{}", id)).await
}

// ============ Organizations ============

pub async fn fetch_organizations() -> Result<Vec<Organization>, ApiFailure> {
    get("/api/organizations").await
}

pub async fn fetch_organization(id: i64) -> Result<Organization, ApiFailure> {
    get(&format!("/api/organizations/{}", id)).await
}

pub async fn create_organization(input: &OrganizationInput) -> Result<Organization, ApiFailure> {
    post("/api/organizations", input).await
}

pub async fn update_organization(id: i64, input: &OrganizationInput) -> Result<Organization, ApiFailure> {
    put(&format!("/api/organizations/{}", id), input).await
}

pub async fn delete_organization(id: i64) -> Result<(), ApiFailure> {
    delete(&format!("/api/organizations/{}", id)).await
}

// ============ Members ============

pub async fn fetch_members(organization_id: i64) -> Result<Vec<Member>, ApiFailure> {
    get(&format!("/api/member?organizationId={}", organization_id)).await
}

pub async fn register_member(input: &MemberInput) -> Result<Member, ApiFailure> {
    post("/api/member", input).await
}

pub async fn update_member(id: i64, input: &MemberUpdate) -> Result<Member, ApiFailure> {
    put(&format!("/api/member/{}", id), input).await
}

pub async fn delete_member(id: i64) -> Result<(), ApiFailure> {
    delete(&format!("/api/member/{}", id)).await
}

/// PUT with an empty body
pub async fn approve_member(id: i64) -> Result<(), ApiFailure> {
    let request = without_body(Request::put(&url(&format!(
        "/api/organization-members/{}/approve",
        id
    ))))?;
    let response = send(request).await?;
    acknowledge(read_envelope(response).await?)
}

// ============ Reviews ============

pub async fn fetch_reviews() -> Result<Vec<Review>, ApiFailure> {
    get("/api/reviews").await
}

pub async fn create_review(input: &ReviewInput) -> Result<Review, ApiFailure> {
    post("/api/reviews", input).await
}

pub async fn update_review(id: i64, input: &ReviewInput) -> Result<Review, ApiFailure> {
    put(&format!("/api/reviews/{}", id), input).await
}

/// Succeeds only when the backend answers `data: true`
pub async fn delete_review(id: i64) -> Result<(), ApiFailure> {
    let request = without_body(Request::delete(&url(&format!("/api/reviews/{}", id))))?;
    let deleted: bool = decode(send(request).await?).await?;
    if deleted {
        Ok(())
    } else {
        Err(ApiFailure::Rejected(Vec::new()))
    }
}

// ============ Chat ============

pub async fn fetch_chat_rooms() -> Result<Vec<ChatRoom>, ApiFailure> {
    get("/api/chatrooms").await
}

pub async fn fetch_chat_room(id: i64) -> Result<ChatRoom, ApiFailure> {
    get(&format!("/api/chatrooms/{}", id)).await
}

pub async fn create_chat_room(input: &ChatRoomInput) -> Result<ChatRoom, ApiFailure> {
    post("/api/chatrooms", input).await
}

pub async fn rename_chat_room(id: i64, name: &str) -> Result<ChatRoom, ApiFailure> {
    put(&format!("/api/chatrooms/{}", id), &serde_json::json!({ "name": name })).await
}

pub async fn delete_chat_room(id: i64) -> Result<(), ApiFailure> {
    delete(&format!("/api/chatrooms/{}", id)).await
}

pub async fn fetch_messages(chat_room_id: i64) -> Result<Vec<ChatMessage>, ApiFailure> {
    get(&format!("/api/chat-messages?chatRoomId={}", chat_room_id)).await
}

pub async fn send_message(input: &ChatMessageInput) -> Result<ChatMessage, ApiFailure> {
    post("/api/chat-messages", input).await
}

pub async fn edit_message(id: i64, message: &str) -> Result<ChatMessage, ApiFailure> {
    put(&format!("/api/chat-messages/{}", id), &serde_json::json!({ "message": message })).await
}

pub async fn delete_message(id: i64) -> Result<(), ApiFailure> {
    delete(&format!("/api/chat-messages/{}", id)).await
}

// ============ Users ============

pub async fn fetch_users() -> Result<Vec<User>, ApiFailure> {
    get("/api/users").await
}

pub async fn fetch_user(id: i64) -> Result<User, ApiFailure> {
    get(&format!("/api/users/{}", id)).await
}

pub async fn fetch_current_user() -> Result<User, ApiFailure> {
    get("/api/users/me").await
}

pub async fn create_user(input: &UserInput) -> Result<User, ApiFailure> {
    post("/api/users", input).await
}

/// The backend answers with a bool; callers re-fetch the list
pub async fn update_user(id: i64, input: &UserInput) -> Result<(), ApiFailure> {
    let updated: bool = put(&format!("/api/users/{}", id), input).await?;
    if updated {
        Ok(())
    } else {
        Err(ApiFailure::Rejected(Vec::new()))
    }
}

pub async fn delete_user(id: i64) -> Result<(), ApiFailure> {
    delete(&format!("/api/users/{}", id)).await
}

pub async fn authenticate(request: &LoginRequest) -> Result<bool, ApiFailure> {
    post("/api/authenticate", request).await
}

/// Whoever is signed in: `/api/users/me` first, then the stored user id
pub async fn resolve_current_user() -> Option<User> {
    if let Ok(user) = fetch_current_user().await {
        return Some(user);
    }
    fetch_user(current_user_id()?).await.ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("42"), Some(42));
        assert_eq!(parse_user_id(" 7 "), Some(7));
        assert_eq!(parse_user_id("abc"), None);
        assert_eq!(parse_user_id(""), None);
    }

    fn envelope(json: &str) -> Envelope<serde_json::Value> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_acknowledge() {
        assert!(acknowledge(envelope(r#"{"data": null, "errors": [], "hasErrors": false}"#)).is_ok());
        assert!(acknowledge(envelope(r#"{"data": true, "errors": [], "hasErrors": false}"#)).is_ok());
        assert!(acknowledge(envelope(r#"{"hasErrors": false}"#)).is_ok());
        assert_eq!(
            acknowledge(envelope(r#"{"data": false, "errors": [], "hasErrors": false}"#)),
            Err(ApiFailure::Rejected(Vec::new()))
        );
    }

    #[test]
    fn test_acknowledge_rejects_reported_errors() {
        // Flagged without details: still a failure, local state must stay
        assert_eq!(
            acknowledge(envelope(r#"{"data": null, "errors": [], "hasErrors": true}"#)),
            Err(ApiFailure::Rejected(Vec::new()))
        );

        let outcome = acknowledge(envelope(
            r#"{"data": true, "errors": [{"property": "", "message": "Member not found"}], "hasErrors": true}"#,
        ));
        match outcome {
            Err(ApiFailure::Rejected(errors)) => assert_eq!(errors[0].message, "Member not found"),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_helpers() {
        let failure = ApiFailure::message("HTTP 500".into());
        assert!(!failure.is_network());
        assert_eq!(failure.field_errors()[0].message, "HTTP 500");
    }
}
