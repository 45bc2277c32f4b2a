//! State Management
//!
//! Toast/loading state shared by every page, and the list helpers pages use
//! to keep their local copies in step with the backend.

pub mod global;
pub mod sync;

pub use global::{provide_global_state, GlobalState};
pub use sync::{apply_created, apply_removed, apply_updated, patch_by_id};
