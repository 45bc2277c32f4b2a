//! CampusEvents UI
//!
//! Browser front end for the campus events platform, built with Leptos (WASM).
//!
//! # Features
//!
//! - Event listing with countdowns, ratings and RSVP
//! - Organization and membership management
//! - Reviews for finished events
//! - Chat rooms with periodic refresh
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! All data goes through the REST backend's `{ data, errors, hasErrors }`
//! envelope; see `api::client`.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;
mod util;

fn main() {
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
