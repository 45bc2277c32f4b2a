//! Organization Member Page
//!
//! Organization cards; "Register as Member" posts a membership for the
//! current user.

use leptos::*;

use crate::api::{self, MemberInput, MemberRole, Organization};
use crate::components::modal::{BUTTON_PRIMARY, INPUT_CLASS};
use crate::components::{ListSkeleton, Modal, TextField};
use crate::state::GlobalState;
use crate::util::validate;

const DEFAULT_LOGO: &str = "https://images.collegexpress.com/blog/get-involved-unique-clubs-join-school.jpg";

#[component]
pub fn OrgMember() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let organizations = create_rw_signal(Vec::<Organization>::new());
    let (loading, set_loading) = create_signal(true);
    let selected = create_rw_signal(None::<Organization>);
    let name = create_rw_signal(String::new());
    let role = create_rw_signal(MemberRole::Member.as_str().to_string());

    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_organizations().await {
                Ok(list) => organizations.set(list),
                Err(e) => state.report(&e, "fetching organizations"),
            }
            set_loading.set(false);
        });
    });

    let register = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(organization) = selected.get() else { return };
        let member_name = name.get();
        let member_role = MemberRole::from_value(&role.get());
        if let Err(message) = validate::check_member_registration(&member_name, member_role) {
            return state.show_error(message);
        }

        let now = chrono::Utc::now().to_rfc3339();
        let input = MemberInput {
            user_id: api::current_user_id().unwrap_or(1),
            organization_id: organization.id,
            name: member_name,
            role: member_role.unwrap_or(MemberRole::Member),
            joined_at: now.clone(),
            created_at: now,
        };
        spawn_local(async move {
            match api::register_member(&input).await {
                Ok(_) => {
                    state.show_success(&format!(
                        "Successfully registered as a member of {}!",
                        organization.name
                    ));
                    selected.set(None);
                    name.set(String::new());
                }
                Err(e) => state.report(&e, "registering as a member"),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">"Organizations"</h1>

            {move || if loading.get() {
                view! { <ListSkeleton count=3 /> }.into_view()
            } else {
                view! {
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        {move || organizations.get().into_iter().map(|organization| {
                            let logo = organization
                                .logo_url
                                .clone()
                                .filter(|url| !url.is_empty())
                                .unwrap_or_else(|| DEFAULT_LOGO.to_string());
                            let description = if organization.description.is_empty() {
                                "No description available".to_string()
                            } else {
                                organization.description.clone()
                            };
                            let card = organization.clone();
                            view! {
                                <div class="bg-gray-800 rounded-xl overflow-hidden flex flex-col">
                                    <img src=logo alt=organization.name.clone() class="h-40 w-full object-cover" />
                                    <div class="p-4 flex-1 flex flex-col">
                                        <h3 class="font-semibold text-lg">{organization.name.clone()}</h3>
                                        <p class="text-sm text-gray-400 flex-1">{description}</p>
                                        <button
                                            class=format!("mt-4 w-full {}", BUTTON_PRIMARY)
                                            on:click=move |_| {
                                                name.set(String::new());
                                                role.set(MemberRole::Member.as_str().to_string());
                                                selected.set(Some(card.clone()));
                                            }
                                        >
                                            "Register as Member"
                                        </button>
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_view()
            }}

            {move || selected.get().map(|organization| view! {
                <Modal title="Register to an Organization".to_string() on_close=move |_| selected.set(None)>
                    <form on:submit=register class="space-y-4">
                        <p class="text-sm text-gray-400">
                            "Organization: " <strong class="text-white">{organization.name}</strong>
                        </p>
                        <TextField label="Your Name" value=name placeholder="Enter your name" />
                        <div>
                            <label class="block text-sm text-gray-400 mb-2">"Select Role"</label>
                            <select
                                class=INPUT_CLASS
                                prop:value=move || role.get()
                                on:change=move |ev| role.set(event_target_value(&ev))
                            >
                                <option value="member">"Member"</option>
                            </select>
                        </div>
                        <button type="submit" class=format!("w-full {}", BUTTON_PRIMARY)>"Submit"</button>
                    </form>
                </Modal>
            })}
        </div>
    }
}
