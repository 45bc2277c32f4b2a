//! Campus REST Client
//!
//! Native client for the campus-events REST API. Every response is an
//! [`Envelope`](crate::models::Envelope); the client unwraps it and turns
//! transport failures, error statuses and envelope errors into
//! [`ClientError`]. There are no retries.

mod campus;
mod error;

pub use campus::{CampusClient, ClientConfig};
pub use error::ClientError;
