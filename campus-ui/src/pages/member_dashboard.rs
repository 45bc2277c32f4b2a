//! Member Dashboard
//!
//! Members of one organization. Admins also get an Approve action for
//! members that are not yet approved.

use leptos::*;
use leptos_router::use_params_map;

use crate::api::{self, Member, MemberRole, MemberUpdate, Organization, User};
use crate::components::modal::{BUTTON_DANGER, BUTTON_PRIMARY, BUTTON_SMALL, INPUT_CLASS};
use crate::components::{ListSkeleton, Modal, TextField};
use crate::state::{apply_removed, apply_updated, patch_by_id, GlobalState};
use crate::util::format;

#[component]
pub fn MemberDashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let params = use_params_map();

    let organization = create_rw_signal(None::<Organization>);
    let members = create_rw_signal(Vec::<Member>::new());
    let viewer = create_rw_signal(None::<User>);
    let (loading, set_loading) = create_signal(true);

    let editing = create_rw_signal(None::<i64>);
    let edit_name = create_rw_signal(String::new());
    let edit_role = create_rw_signal(MemberRole::Member.as_str().to_string());

    let organization_id = move || {
        params.with(|p| p.get("organizationId").and_then(|id| id.parse::<i64>().ok()))
    };

    create_effect(move |_| {
        let Some(id) = organization_id() else {
            set_loading.set(false);
            return;
        };
        spawn_local(async move {
            viewer.set(api::resolve_current_user().await);
        });
        spawn_local(async move {
            match api::fetch_organization(id).await {
                Ok(found) => organization.set(Some(found)),
                Err(e) => state.report(&e, "fetching organization"),
            }
        });
        spawn_local(async move {
            match api::fetch_members(id).await {
                Ok(list) => members.set(list),
                Err(e) => state.report(&e, "fetching members"),
            }
            set_loading.set(false);
        });
    });

    let is_admin = move || viewer.with(|u| u.as_ref().map(User::is_admin).unwrap_or(false));

    let update_member = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = editing.get() else { return };
        let input = MemberUpdate {
            name: edit_name.get(),
            role: MemberRole::from_value(&edit_role.get()).unwrap_or(MemberRole::Member),
        };
        spawn_local(async move {
            match api::update_member(id, &input).await {
                Ok(member) => {
                    members.update(|list| apply_updated(list, member));
                    state.show_success("Member updated successfully!");
                    editing.set(None);
                }
                Err(e) => state.report(&e, "updating member"),
            }
        });
    };

    let delete_member = move |id: i64| {
        spawn_local(async move {
            match api::delete_member(id).await {
                Ok(()) => {
                    members.update(|list| apply_removed(list, id));
                    state.show_success("Member deleted successfully!");
                }
                Err(e) => state.report(&e, "deleting member"),
            }
        });
    };

    let approve_member = move |id: i64| {
        spawn_local(async move {
            match api::approve_member(id).await {
                Ok(()) => {
                    members.update(|list| {
                        patch_by_id(list, id, |m| m.role = MemberRole::Approved.as_str().to_string());
                    });
                    state.show_success("Member approved successfully!");
                }
                Err(e) => state.report(&e, "approving member"),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">
                "Member Dashboard : "
                {move || organization.with(|o| {
                    o.as_ref()
                        .map(|o| o.name.clone())
                        .filter(|name| !name.is_empty())
                        .unwrap_or_else(|| "Unknown Organization".to_string())
                })}
            </h1>

            {move || if loading.get() {
                view! { <ListSkeleton count=3 /> }.into_view()
            } else {
                view! {
                    <table class="w-full text-left bg-gray-800 rounded-lg overflow-hidden">
                        <thead class="bg-gray-700 text-gray-300 text-sm">
                            <tr>
                                <th class="px-4 py-3">"Name"</th>
                                <th class="px-4 py-3">"Role"</th>
                                <th class="px-4 py-3">"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let rows = members.get();
                                if rows.is_empty() {
                                    return view! {
                                        <tr>
                                            <td colspan="3" class="px-4 py-3 text-gray-400">
                                                "No members found for this organization."
                                            </td>
                                        </tr>
                                    }.into_view();
                                }
                                rows.into_iter().map(|member| {
                                    let id = member.id;
                                    let row = member.clone();
                                    let approvable = member.role != MemberRole::Approved.as_str();
                                    view! {
                                        <tr class="border-t border-gray-700">
                                            <td class="px-4 py-3">{member.name.clone()}</td>
                                            <td class="px-4 py-3">{format::role_label(&member.role)}</td>
                                            <td class="px-4 py-3 space-x-2">
                                                <button
                                                    class=BUTTON_SMALL
                                                    on:click=move |_| {
                                                        edit_name.set(row.name.clone());
                                                        edit_role.set(row.role.clone());
                                                        editing.set(Some(id));
                                                    }
                                                >
                                                    "Edit"
                                                </button>
                                                <button class=BUTTON_DANGER on:click=move |_| delete_member(id)>
                                                    "Delete"
                                                </button>
                                                {move || (is_admin() && approvable).then(|| view! {
                                                    <button class=BUTTON_PRIMARY on:click=move |_| approve_member(id)>
                                                        "Approve"
                                                    </button>
                                                })}
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()
                            }}
                        </tbody>
                    </table>
                }.into_view()
            }}

            {move || editing.get().map(|_| view! {
                <Modal title="Edit Member".to_string() on_close=move |_| editing.set(None)>
                    <form on:submit=update_member class="space-y-4">
                        <TextField label="Name" value=edit_name />
                        <div>
                            <label class="block text-sm text-gray-400 mb-2">"Role"</label>
                            <select
                                class=INPUT_CLASS
                                prop:value=move || edit_role.get()
                                on:change=move |ev| edit_role.set(event_target_value(&ev))
                            >
                                <option value="member">"Member"</option>
                                <option value="admin">"Admin"</option>
                            </select>
                        </div>
                        <button type="submit" class=format!("w-full {}", BUTTON_PRIMARY)>"Update"</button>
                    </form>
                </Modal>
            })}
        </div>
    }
}
