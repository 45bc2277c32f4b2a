//! Sign Up Page

use leptos::*;
use leptos_router::use_navigate;

use crate::api::{self, ApiFailure, UserInput, UserStatus, UserType};
use crate::components::modal::BUTTON_PRIMARY;
use crate::components::TextField;
use crate::state::GlobalState;

#[component]
pub fn SignUp() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let first_name = create_rw_signal(String::new());
    let last_name = create_rw_signal(String::new());
    let user_name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = UserInput {
            first_name: first_name.get(),
            last_name: last_name.get(),
            email: email.get(),
            phone: String::new(),
            user_type: UserType::User,
            user_name: user_name.get(),
            image: String::new(),
            status: UserStatus::Active,
            password: password.get(),
        };

        set_submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::create_user(&input).await {
                Ok(_) => {
                    state.show_success("User created successfully!");
                    navigate("/home", Default::default());
                }
                Err(ApiFailure::Network(_)) => state.show_error("Network error while creating user"),
                Err(ApiFailure::Rejected(_)) => state.show_error("Error creating user"),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto bg-gray-800 rounded-xl p-8">
            <h1 class="text-2xl font-bold mb-6">"Sign Up"</h1>
            <form on:submit=on_submit class="space-y-4">
                <TextField label="First Name" value=first_name />
                <TextField label="Last Name" value=last_name />
                <TextField label="Username" value=user_name />
                <TextField label="Email" value=email input_type="email" />
                <TextField label="Password" value=password input_type="password" />
                <button type="submit" class=format!("w-full {}", BUTTON_PRIMARY) disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing up..." } else { "Sign Up" }}
                </button>
            </form>
        </div>
    }
}
