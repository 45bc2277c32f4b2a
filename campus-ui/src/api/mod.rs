//! Backend access
//!
//! Wire types and the gloo-net client for the campus-events REST API.

pub mod client;
pub mod types;

pub use client::*;
pub use types::*;
