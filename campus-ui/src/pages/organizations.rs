//! Organizations Page
//!
//! Manage table with a create modal, an inline update card and a link to
//! each organization's member dashboard.

use leptos::*;
use leptos_router::use_navigate;

use crate::api::{self, Organization, OrganizationInput};
use crate::components::modal::{BUTTON_DANGER, BUTTON_PRIMARY, BUTTON_SECONDARY, BUTTON_SMALL};
use crate::components::{ListSkeleton, Modal, TextField};
use crate::state::{apply_created, apply_removed, apply_updated, GlobalState};
use crate::util::format;

#[derive(Clone, Copy)]
pub(crate) struct OrganizationFields {
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub created_by: RwSignal<String>,
}

impl OrganizationFields {
    pub fn new() -> Self {
        Self {
            name: create_rw_signal(String::new()),
            description: create_rw_signal(String::new()),
            created_by: create_rw_signal(String::new()),
        }
    }

    pub fn fill(&self, organization: &Organization) {
        self.name.set(organization.name.clone());
        self.description.set(organization.description.clone());
        self.created_by.set(organization.created_by.clone());
    }

    pub fn reset(&self) {
        self.fill(&Organization::default());
    }

    pub fn input(&self) -> OrganizationInput {
        OrganizationInput {
            name: self.name.get(),
            description: self.description.get(),
            created_by: self.created_by.get(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[component]
pub fn Organizations() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let organizations = create_rw_signal(Vec::<Organization>::new());
    let (loading, set_loading) = create_signal(true);
    let show_create = create_rw_signal(false);
    let editing = create_rw_signal(None::<i64>);
    let fields = OrganizationFields::new();

    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_organizations().await {
                Ok(list) => organizations.set(list),
                Err(e) => state.report(&e, "fetching organizations"),
            }
            set_loading.set(false);
        });
    });

    let create_organization = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = fields.input();
        spawn_local(async move {
            match api::create_organization(&input).await {
                Ok(organization) => {
                    organizations.update(|list| apply_created(list, organization));
                    state.show_success("Organization created successfully!");
                    show_create.set(false);
                    fields.reset();
                }
                Err(e) => state.report(&e, "creating organization"),
            }
        });
    };

    let update_organization = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = editing.get() else { return };
        let input = fields.input();
        spawn_local(async move {
            match api::update_organization(id, &input).await {
                Ok(organization) => {
                    organizations.update(|list| apply_updated(list, organization));
                    state.show_success("Organization updated successfully!");
                    editing.set(None);
                }
                Err(e) => state.report(&e, "updating organization"),
            }
        });
    };

    let delete_organization = move |id: i64| {
        spawn_local(async move {
            match api::delete_organization(id).await {
                Ok(()) => {
                    organizations.update(|list| apply_removed(list, id));
                    state.show_success("Organization deleted successfully!");
                }
                Err(e) => state.report(&e, "deleting organization"),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Manage Organizations"</h1>
                <button
                    class=BUTTON_PRIMARY
                    on:click=move |_| {
                        fields.reset();
                        show_create.set(true);
                    }
                >
                    "Create Organization"
                </button>
            </div>

            {move || editing.get().map(|_| view! {
                <div class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Update Organization"</h2>
                    <form on:submit=update_organization class="space-y-4">
                        <OrganizationFormFields fields=fields />
                        <div class="flex justify-end space-x-3">
                            <button type="button" class=BUTTON_SECONDARY on:click=move |_| editing.set(None)>
                                "Cancel"
                            </button>
                            <button type="submit" class=BUTTON_PRIMARY>"Update"</button>
                        </div>
                    </form>
                </div>
            })}

            {move || if loading.get() {
                view! { <ListSkeleton count=4 /> }.into_view()
            } else if organizations.with(Vec::is_empty) {
                view! { <p class="text-gray-400">"No organizations found."</p> }.into_view()
            } else {
                let navigate = navigate.clone();
                view! {
                    <table class="w-full text-left bg-gray-800 rounded-lg overflow-hidden">
                        <thead class="bg-gray-700 text-gray-300 text-sm">
                            <tr>
                                <th class="px-4 py-3">"Name"</th>
                                <th class="px-4 py-3">"Description"</th>
                                <th class="px-4 py-3">"Created By"</th>
                                <th class="px-4 py-3">"Created At"</th>
                                <th class="px-4 py-3">"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let navigate = navigate.clone();
                                organizations.get().into_iter().map(move |organization| {
                                    let id = organization.id;
                                    let row = organization.clone();
                                    let navigate = navigate.clone();
                                    view! {
                                        <tr class="border-t border-gray-700">
                                            <td class="px-4 py-3">{organization.name.clone()}</td>
                                            <td class="px-4 py-3 text-gray-400">{organization.description.clone()}</td>
                                            <td class="px-4 py-3">{organization.created_by.clone()}</td>
                                            <td class="px-4 py-3 text-gray-400">{format::format_timestamp(&organization.created_at)}</td>
                                            <td class="px-4 py-3 space-x-2">
                                                <button
                                                    class=BUTTON_SMALL
                                                    on:click=move |_| navigate(&format!("/memberdashboard/{}", id), Default::default())
                                                >
                                                    "Manage"
                                                </button>
                                                <button
                                                    class=BUTTON_SMALL
                                                    on:click=move |_| {
                                                        fields.fill(&row);
                                                        editing.set(Some(id));
                                                    }
                                                >
                                                    "Update"
                                                </button>
                                                <button class=BUTTON_DANGER on:click=move |_| delete_organization(id)>
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()
                            }}
                        </tbody>
                    </table>
                }.into_view()
            }}

            {move || show_create.get().then(|| view! {
                <Modal title="Create a New Organization".to_string() on_close=move |_| show_create.set(false)>
                    <form on:submit=create_organization class="space-y-4">
                        <OrganizationFormFields fields=fields />
                        <button type="submit" class=format!("w-full {}", BUTTON_PRIMARY)>"Create"</button>
                    </form>
                </Modal>
            })}
        </div>
    }
}

/// Name, description and created-by inputs, with optional per-field errors
#[component]
pub(crate) fn OrganizationFormFields(
    fields: OrganizationFields,
    #[prop(optional)]
    errors: Option<RwSignal<api::FormErrors>>,
) -> impl IntoView {
    let error_for = move |field: &'static str| {
        Signal::derive(move || errors.and_then(|e| e.with(|map| map.get(field).cloned())))
    };

    view! {
        <TextField label="Name" value=fields.name error=error_for("name") />
        <TextField label="Description" value=fields.description error=error_for("description") />
        <TextField label="Created By" value=fields.created_by error=error_for("createdBy") />
    }
}
