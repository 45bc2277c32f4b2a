//! Login Page
//!
//! Field errors come either from local checks or from the backend envelope,
//! keyed by property. The empty key is shown as a form-level alert.

use leptos::*;
use leptos_router::use_navigate;

use crate::api::{self, field_errors, ApiFailure, FormErrors, LoginRequest};
use crate::components::modal::BUTTON_PRIMARY;
use crate::components::TextField;
use crate::state::GlobalState;
use crate::util::validate;

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let user_name = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let errors = create_rw_signal(FormErrors::new());
    let (submitting, set_submitting) = create_signal(false);

    let error_for = move |field: &'static str| {
        Signal::derive(move || errors.with(|e| e.get(field).cloned()))
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let local = validate::check_login(&user_name.get(), &password.get());
        if !local.is_empty() {
            errors.set(
                local
                    .into_iter()
                    .map(|(field, message)| (field.to_string(), message.to_string()))
                    .collect(),
            );
            return;
        }
        errors.set(FormErrors::new());

        let request = LoginRequest {
            user_name: user_name.get(),
            password: password.get(),
        };
        set_submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::authenticate(&request).await {
                Ok(true) => {
                    remember_user(&request.user_name).await;
                    state.show_success("Successfully Logged In!");
                    navigate("/home", Default::default());
                }
                Ok(false) => {
                    errors.set(FormErrors::from([(String::new(), LOGIN_FAILED.to_string())]));
                }
                Err(ApiFailure::Rejected(list)) if !list.is_empty() => {
                    errors.set(field_errors(&list));
                }
                Err(_) => {
                    errors.set(FormErrors::from([(String::new(), LOGIN_FAILED.to_string())]));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto bg-gray-800 rounded-xl p-8">
            <h1 class="text-2xl font-bold mb-6">"Login"</h1>

            {move || errors.with(|e| e.get("").cloned()).map(|msg| view! {
                <div class="bg-red-900/50 border border-red-600 text-red-200 rounded-lg px-4 py-3 mb-4">
                    {msg}
                </div>
            })}

            <form on:submit=on_submit class="space-y-4">
                <TextField label="Username" value=user_name error=error_for("userName") />
                <TextField label="Password" value=password input_type="password" error=error_for("password") />
                <button type="submit" class=format!("w-full {}", BUTTON_PRIMARY) disabled=move || submitting.get()>
                    {move || if submitting.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>
        </div>
    }
}

/// Store the signed-in user's id so chat and RSVP pages can attribute
/// their writes
async fn remember_user(user_name: &str) {
    if let Ok(users) = api::fetch_users().await {
        if let Some(user) = users.iter().find(|u| u.user_name.eq_ignore_ascii_case(user_name)) {
            api::set_current_user_id(user.id);
        }
    }
}
