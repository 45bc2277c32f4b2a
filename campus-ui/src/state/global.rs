//! Global Application State
//!
//! Toast and loading signals shared through context.

use leptos::*;

use crate::api::ApiFailure;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Toast a failed call, e.g. `report(&e, "fetching events")`
    pub fn report(&self, failure: &ApiFailure, action: &str) {
        if let ApiFailure::Network(detail) = failure {
            web_sys::console::error_1(&format!("{}: {}", action, detail).into());
        }
        self.show_error(&failure_message(failure, action));
    }
}

/// "Network error while <action>" for transport failures, "Error <action>"
/// for everything the backend refused
pub fn failure_message(failure: &ApiFailure, action: &str) -> String {
    match failure {
        ApiFailure::Network(_) => format!("Network error while {}", action),
        ApiFailure::Rejected(_) => format!("Error {}", action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message() {
        let network = ApiFailure::Network("Network error: refused".into());
        assert_eq!(
            failure_message(&network, "fetching events"),
            "Network error while fetching events"
        );

        let rejected = ApiFailure::Rejected(Vec::new());
        assert_eq!(failure_message(&rejected, "creating event"), "Error creating event");
    }
}
