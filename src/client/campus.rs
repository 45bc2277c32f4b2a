use super::error::ClientError;
use crate::models::*;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Configuration for [`CampusClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin that serves `/api/*` (the backend itself or `campus-server`)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8084".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Typed client for the campus-events REST API
#[derive(Clone)]
pub struct CampusClient {
    client: Client,
    base_url: String,
}

impl CampusClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(method = method.as_str(), path, "campus api request");
        self.client.request(method, self.url(path))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await.map_err(ClientError::from_transport)?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        // Validation failures come back as 4xx with an envelope body
        if let Ok(envelope) = serde_json::from_str::<Envelope<serde_json::Value>>(&text) {
            if !envelope.errors.is_empty() {
                return Err(ClientError::Rejected(envelope.errors));
            }
        }

        Err(ClientError::Status {
            status: status.as_u16(),
            message: text,
        })
    }

    async fn decode<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(builder).await?;
        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.into_result()?)
    }

    /// Like `decode`, for calls whose payload is only an acknowledgement.
    /// Null data passes; an explicit `false` is a rejection.
    async fn acknowledge(&self, builder: RequestBuilder) -> Result<(), ClientError> {
        let response = self.send(builder).await?;
        let envelope: Envelope<serde_json::Value> = response.json().await?;
        if envelope.has_errors || !envelope.errors.is_empty() {
            return Err(ClientError::Rejected(envelope.errors));
        }
        match envelope.data {
            Some(serde_json::Value::Bool(false)) => Err(ClientError::Rejected(Vec::new())),
            _ => Ok(()),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.decode(self.request(Method::GET, path)).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.decode(self.request(Method::POST, path).json(body)).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.decode(self.request(Method::PUT, path).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.acknowledge(self.request(Method::DELETE, path)).await
    }

    // ============================================
    // Events
    // ============================================

    pub async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        self.get("/api/events").await
    }

    pub async fn get_event(&self, id: i64) -> Result<Event, ClientError> {
        self.get(&format!("/api/events/{}", id)).await
    }

    pub async fn create_event(&self, input: &EventInput) -> Result<Event, ClientError> {
        self.post("/api/events", input).await
    }

    pub async fn update_event(&self, id: i64, input: &EventInput) -> Result<Event, ClientError> {
        self.put(&format!("/api/events/{}", id), input).await
    }

    pub async fn delete_event(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/api/events/{}", id)).await
    }

    // ============================================
    // RSVPs
    // ============================================

    pub async fn list_participants(&self) -> Result<Vec<EventParticipant>, ClientError> {
        self.get("/api/event-participants").await
    }

    pub async fn create_participant(
        &self,
        input: &RsvpInput,
    ) -> Result<EventParticipant, ClientError> {
        self.post("/api/event-participants", input).await
    }

    pub async fn update_participant(
        &self,
        id: i64,
        input: &RsvpUpdate,
    ) -> Result<EventParticipant, ClientError> {
        self.put(&format!("/api/event-participants/{}", id), input)
            .await
    }

    pub async fn delete_participant(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/api/event-participants/{}", id)).await
    }

    // ============================================
    // Organizations
    // ============================================

    pub async fn list_organizations(&self) -> Result<Vec<Organization>, ClientError> {
        self.get("/api/organizations").await
    }

    pub async fn get_organization(&self, id: i64) -> Result<Organization, ClientError> {
        self.get(&format!("/api/organizations/{}", id)).await
    }

    pub async fn create_organization(
        &self,
        input: &OrganizationInput,
    ) -> Result<Organization, ClientError> {
        self.post("/api/organizations", input).await
    }

    pub async fn update_organization(
        &self,
        id: i64,
        input: &OrganizationInput,
    ) -> Result<Organization, ClientError> {
        self.put(&format!("/api/organizations/{}", id), input).await
    }

    pub async fn delete_organization(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/api/organizations/{}", id)).await
    }

    /// Members as listed under the organization resource
    pub async fn organization_members(&self, id: i64) -> Result<Vec<Member>, ClientError> {
        self.get(&format!("/api/organizations/{}/member", id)).await
    }

    // ============================================
    // Members
    // ============================================

    pub async fn list_members(&self, organization_id: i64) -> Result<Vec<Member>, ClientError> {
        self.get(&format!("/api/member?organizationId={}", organization_id))
            .await
    }

    pub async fn register_member(&self, input: &MemberInput) -> Result<Member, ClientError> {
        self.post("/api/member", input).await
    }

    pub async fn update_member(
        &self,
        id: i64,
        input: &MemberUpdate,
    ) -> Result<Member, ClientError> {
        self.put(&format!("/api/member/{}", id), input).await
    }

    pub async fn delete_member(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/api/member/{}", id)).await
    }

    /// Approve a pending membership. The body is empty.
    pub async fn approve_member(&self, id: i64) -> Result<(), ClientError> {
        self.acknowledge(self.request(
            Method::PUT,
            &format!("/api/organization-members/{}/approve", id),
        ))
        .await
    }

    pub async fn remove_organization_member(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/api/organization-members/{}", id))
            .await
    }

    // ============================================
    // Reviews
    // ============================================

    pub async fn list_reviews(&self) -> Result<Vec<Review>, ClientError> {
        self.get("/api/reviews").await
    }

    pub async fn create_review(&self, input: &ReviewInput) -> Result<Review, ClientError> {
        self.post("/api/reviews", input).await
    }

    pub async fn update_review(&self, id: i64, input: &ReviewInput) -> Result<Review, ClientError> {
        self.put(&format!("/api/reviews/{}", id), input).await
    }

    /// Succeeds only when the backend answers `data: true`
    pub async fn delete_review(&self, id: i64) -> Result<(), ClientError> {
        let deleted: bool = self
            .decode(self.request(Method::DELETE, &format!("/api/reviews/{}", id)))
            .await?;
        if deleted {
            Ok(())
        } else {
            Err(ClientError::Rejected(Vec::new()))
        }
    }

    // ============================================
    // Chat
    // ============================================

    pub async fn list_chat_rooms(&self) -> Result<Vec<ChatRoom>, ClientError> {
        self.get("/api/chatrooms").await
    }

    pub async fn get_chat_room(&self, id: i64) -> Result<ChatRoom, ClientError> {
        self.get(&format!("/api/chatrooms/{}", id)).await
    }

    pub async fn create_chat_room(&self, input: &ChatRoomInput) -> Result<ChatRoom, ClientError> {
        self.post("/api/chatrooms", input).await
    }

    pub async fn rename_chat_room(&self, id: i64, name: &str) -> Result<ChatRoom, ClientError> {
        let body = ChatRoomRename {
            name: name.to_string(),
        };
        self.put(&format!("/api/chatrooms/{}", id), &body).await
    }

    pub async fn delete_chat_room(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/api/chatrooms/{}", id)).await
    }

    pub async fn list_messages(&self, chat_room_id: i64) -> Result<Vec<ChatMessage>, ClientError> {
        self.get(&format!("/api/chat-messages?chatRoomId={}", chat_room_id))
            .await
    }

    pub async fn send_message(
        &self,
        input: &ChatMessageInput,
    ) -> Result<ChatMessage, ClientError> {
        self.post("/api/chat-messages", input).await
    }

    pub async fn edit_message(&self, id: i64, message: &str) -> Result<ChatMessage, ClientError> {
        let body = ChatMessageEdit {
            message: message.to_string(),
        };
        self.put(&format!("/api/chat-messages/{}", id), &body).await
    }

    pub async fn delete_message(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/api/chat-messages/{}", id)).await
    }

    // ============================================
    // Users
    // ============================================

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.get("/api/users").await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ClientError> {
        self.get(&format!("/api/users/{}", id)).await
    }

    pub async fn current_user(&self) -> Result<User, ClientError> {
        self.get("/api/users/me").await
    }

    pub async fn create_user(&self, input: &UserInput) -> Result<User, ClientError> {
        self.post("/api/users", input).await
    }

    /// The backend answers with a bool, so callers re-fetch afterwards
    pub async fn update_user(&self, id: i64, input: &UserInput) -> Result<(), ClientError> {
        self.acknowledge(
            self.request(Method::PUT, &format!("/api/users/{}", id))
                .json(input),
        )
        .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/api/users/{}", id)).await
    }

    pub async fn authenticate(&self, request: &LoginRequest) -> Result<bool, ClientError> {
        self.post("/api/authenticate", request).await
    }

    // ============================================
    // Dev server
    // ============================================

    /// `/health` of a `campus-server` instance
    pub async fn server_health(&self) -> Result<serde_json::Value, ClientError> {
        let response = self.send(self.request(Method::GET, "/health")).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::{delete, get, put},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Start an in-process fake backend and return its base URL
    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> CampusClient {
        CampusClient::new(ClientConfig {
            base_url,
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn fake_backend() -> Router {
        Router::new()
            .route(
                "/api/events",
                get(|| async {
                    Json(json!({
                        "data": [
                            {"id": 1, "title": "Career Fair", "time": "10:00:00"},
                            {"id": 2, "title": "Open Mic", "imageUrl": null}
                        ],
                        "errors": [],
                        "hasErrors": false
                    }))
                })
                .post(|Json(body): Json<Value>| async move {
                    if body["title"].as_str().unwrap_or_default().is_empty() {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(json!({
                                "data": null,
                                "errors": [{"property": "title", "message": "Title is required"}],
                                "hasErrors": true
                            })),
                        );
                    }
                    let mut created = body.clone();
                    created["id"] = json!(42);
                    (
                        StatusCode::OK,
                        Json(json!({"data": created, "errors": [], "hasErrors": false})),
                    )
                }),
            )
            .route(
                "/api/events/:id",
                delete(|Path(id): Path<i64>| async move {
                    if id == 404 {
                        (StatusCode::NOT_FOUND, "no such event".to_string())
                    } else {
                        (
                            StatusCode::OK,
                            json!({"data": null, "errors": [], "hasErrors": false}).to_string(),
                        )
                    }
                }),
            )
            .route(
                "/api/chat-messages",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    let room: i64 = q.get("chatRoomId").and_then(|v| v.parse().ok()).unwrap_or(0);
                    Json(json!({
                        "data": [{"id": 5, "message": "hi", "userId": 1, "chatRoomId": room}],
                        "hasErrors": false
                    }))
                }),
            )
            .route(
                "/api/reviews/:id",
                delete(|Path(id): Path<i64>| async move {
                    Json(json!({"data": id == 1, "errors": [], "hasErrors": false}))
                }),
            )
            .route(
                "/api/users/:id",
                put(|| async { Json(json!({"data": true, "hasErrors": false})) }),
            )
            .route(
                "/api/users/me",
                get(|| async {
                    Json(json!({
                        "data": null,
                        "errors": [{"property": "", "message": "Not signed in"}],
                        "hasErrors": true
                    }))
                }),
            )
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = client_for("http://localhost:5000/".to_string());
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/api/events"), "http://localhost:5000/api/events");
    }

    #[tokio::test]
    async fn test_list_events_with_null_fields() {
        let client = client_for(spawn_backend(fake_backend()).await);

        let events = client.list_events().await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].time, "10:00:00");
        assert!(events[1].image_url.is_empty());
    }

    #[tokio::test]
    async fn test_create_event_returns_record() {
        let client = client_for(spawn_backend(fake_backend()).await);

        let input = EventInput {
            title: "Hack Night".into(),
            time: "18:00:00".into(),
            ..Default::default()
        };
        let created = client.create_event(&input).await.unwrap();
        assert_eq!(created.id, 42);
        assert_eq!(created.title, "Hack Night");
    }

    #[tokio::test]
    async fn test_validation_errors_surface_as_rejected() {
        let client = client_for(spawn_backend(fake_backend()).await);

        let err = client.create_event(&EventInput::default()).await.unwrap_err();
        match err {
            ClientError::Rejected(errors) => {
                assert_eq!(errors[0].property, "title");
                assert_eq!(errors[0].message, "Title is required");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_envelope_error_status() {
        let client = client_for(spawn_backend(fake_backend()).await);

        let err = client.delete_event(404).await.unwrap_err();
        match err {
            ClientError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "no such event");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        client.delete_event(3).await.unwrap();
    }

    #[tokio::test]
    async fn test_messages_query_string() {
        let client = client_for(spawn_backend(fake_backend()).await);

        let messages = client.list_messages(17).await.unwrap();
        assert_eq!(messages[0].chat_room_id, 17);
    }

    #[tokio::test]
    async fn test_review_delete_requires_true() {
        let client = client_for(spawn_backend(fake_backend()).await);

        client.delete_review(1).await.unwrap();
        assert!(matches!(
            client.delete_review(2).await,
            Err(ClientError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_user_update_acknowledged() {
        let client = client_for(spawn_backend(fake_backend()).await);

        let input = UserInput {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@campus.edu".into(),
            phone: String::new(),
            user_type: UserType::User,
            user_name: "ada".into(),
            image: String::new(),
            status: UserStatus::Active,
            password: String::new(),
        };
        client.update_user(7, &input).await.unwrap();
    }

    #[tokio::test]
    async fn test_envelope_form_error() {
        let client = client_for(spawn_backend(fake_backend()).await);

        let err = client.current_user().await.unwrap_err();
        assert_eq!(err.field_errors()[0].message, "Not signed in");
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}", addr));
        let err = client.list_events().await.unwrap_err();
        assert!(err.is_network());
    }
}
