//! # CampusEvents
//!
//! Native side of the CampusEvents platform. The browser UI lives in the
//! `campus-ui` crate; this crate holds what runs outside the browser.
//!
//! ## Modules
//!
//! - [`models`]: Records, envelope and request bodies of the REST API
//! - [`client`]: Typed REST client
//! - [`validation`]: Form checks shared with the CLI
//! - [`server`]: Dev server serving the UI and proxying `/api`
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use campus_events::client::{CampusClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CampusClient::new(ClientConfig::default())?;
//!
//!     for event in client.list_events().await? {
//!         println!("{} at {}", event.title, event.location);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod models;
pub mod output;
pub mod server;
pub mod telemetry;
pub mod validation;

pub use client::{CampusClient, ClientConfig, ClientError};

pub use config::{BackendConfig, ChatConfig, Config, ConfigError, LoggingConfig, ServerConfig};

pub use models::{
    ChatMessage, ChatRoom, Envelope, Event, EventParticipant, FieldError, HasId, Member,
    MemberRole, Organization, Review, RsvpStatus, User, UserStatus, UserType,
};

pub use server::{build_router, serve, AppState, ServerError};

pub use validation::ValidationError;
