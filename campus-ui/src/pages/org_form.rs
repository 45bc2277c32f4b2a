//! Organization create and update forms
//!
//! Backend validation errors are shown under the field they name.

use leptos::*;
use leptos_router::{use_navigate, use_params_map};

use crate::api::{self, field_errors, ApiFailure, FormErrors};
use crate::components::modal::{BUTTON_PRIMARY, BUTTON_SECONDARY};
use crate::components::Loading;
use crate::pages::organizations::{OrganizationFields, OrganizationFormFields};
use crate::state::GlobalState;

/// Route the user back to the manage table
const ORGANIZATION_ROUTE: &str = "/organization";

/// Apply a failed save to the form: field errors inline, anything else as a
/// toast
fn show_failure(state: GlobalState, errors: RwSignal<FormErrors>, failure: &ApiFailure, action: &str) {
    match failure {
        ApiFailure::Rejected(list) if !list.is_empty() => errors.set(field_errors(list)),
        other => state.report(other, action),
    }
}

#[component]
pub fn OrganizationCreate() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let fields = OrganizationFields::new();
    let errors = create_rw_signal(FormErrors::new());

    let on_submit = {
        let navigate = navigate.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            errors.set(FormErrors::new());
            let input = fields.input();
            let navigate = navigate.clone();
            spawn_local(async move {
                match api::create_organization(&input).await {
                    Ok(_) => {
                        state.show_success("Organization successfully created");
                        navigate(ORGANIZATION_ROUTE, Default::default());
                    }
                    Err(e) => show_failure(state, errors, &e, "creating organization"),
                }
            });
        }
    };

    view! {
        <div class="max-w-lg mx-auto bg-gray-800 rounded-xl p-8">
            <h1 class="text-2xl font-bold mb-6">"Create Organization"</h1>
            <FormAlert errors=errors />
            <form on:submit=on_submit class="space-y-4">
                <OrganizationFormFields fields=fields errors=errors />
                <div class="flex justify-end space-x-3 pt-2">
                    <button
                        type="button"
                        class=BUTTON_SECONDARY
                        on:click=move |_| navigate(ORGANIZATION_ROUTE, Default::default())
                    >
                        "Cancel"
                    </button>
                    <button type="submit" class=BUTTON_PRIMARY>"Create"</button>
                </div>
            </form>
        </div>
    }
}

#[component]
pub fn OrganizationUpdate() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let params = use_params_map();

    let fields = OrganizationFields::new();
    let errors = create_rw_signal(FormErrors::new());
    let (loading, set_loading) = create_signal(true);
    let (found, set_found) = create_signal(false);

    let organization_id = move || {
        params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok()))
    };

    create_effect(move |_| {
        let Some(id) = organization_id() else {
            set_loading.set(false);
            return;
        };
        spawn_local(async move {
            match api::fetch_organization(id).await {
                Ok(organization) => {
                    fields.fill(&organization);
                    set_found.set(true);
                }
                Err(ApiFailure::Network(_)) => state.show_error("Network error while fetching organization"),
                Err(ApiFailure::Rejected(_)) => state.show_error("Error finding organization"),
            }
            set_loading.set(false);
        });
    });

    let on_submit = {
        let navigate = navigate.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(id) = organization_id() else { return };
            errors.set(FormErrors::new());
            let input = fields.input();
            let navigate = navigate.clone();
            spawn_local(async move {
                match api::update_organization(id, &input).await {
                    Ok(_) => {
                        state.show_success("Organization successfully updated");
                        navigate(ORGANIZATION_ROUTE, Default::default());
                    }
                    Err(e) => show_failure(state, errors, &e, "updating organization"),
                }
            });
        }
    };

    view! {
        <div class="max-w-lg mx-auto bg-gray-800 rounded-xl p-8">
            <h1 class="text-2xl font-bold mb-6">"Update Organization"</h1>
            {move || if loading.get() {
                view! { <Loading label="Loading..." /> }.into_view()
            } else if !found.get() {
                view! { <p class="text-gray-400">"No organization data available."</p> }.into_view()
            } else {
                let navigate = navigate.clone();
                let on_submit = on_submit.clone();
                view! {
                    <FormAlert errors=errors />
                    <form on:submit=on_submit class="space-y-4">
                        <OrganizationFormFields fields=fields errors=errors />
                        <div class="flex justify-end space-x-3 pt-2">
                            <button
                                type="button"
                                class=BUTTON_SECONDARY
                                on:click=move |_| navigate(ORGANIZATION_ROUTE, Default::default())
                            >
                                "Cancel"
                            </button>
                            <button type="submit" class=BUTTON_PRIMARY>"Update"</button>
                        </div>
                    </form>
                }.into_view()
            }}
        </div>
    }
}

/// Errors without a property
#[component]
fn FormAlert(errors: RwSignal<FormErrors>) -> impl IntoView {
    view! {
        {move || errors.with(|e| e.get("").cloned()).map(|msg| view! {
            <div class="bg-red-900/50 border border-red-600 text-red-200 rounded-lg px-4 py-3 mb-4">
                {msg}
            </div>
        })}
    }
}
