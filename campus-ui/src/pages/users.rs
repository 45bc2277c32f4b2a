//! Users Page
//!
//! Admin table of user accounts with create and edit modals.

use leptos::*;

use crate::api::{self, User, UserInput, UserStatus, UserType};
use crate::components::modal::{BUTTON_DANGER, BUTTON_PRIMARY, BUTTON_SECONDARY, BUTTON_SMALL, INPUT_CLASS};
use crate::components::{ListSkeleton, Modal, TextField};
use crate::state::{apply_created, apply_removed, GlobalState};

/// Form fields shared by the create and edit modals
#[derive(Clone, Copy)]
struct UserFields {
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    email: RwSignal<String>,
    phone: RwSignal<String>,
    user_name: RwSignal<String>,
    password: RwSignal<String>,
    image: RwSignal<String>,
    user_type: RwSignal<String>,
    status: RwSignal<String>,
}

impl UserFields {
    fn new() -> Self {
        Self {
            first_name: create_rw_signal(String::new()),
            last_name: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            phone: create_rw_signal(String::new()),
            user_name: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
            image: create_rw_signal(String::new()),
            user_type: create_rw_signal("user".to_string()),
            status: create_rw_signal("active".to_string()),
        }
    }

    fn reset(&self) {
        self.fill(&User {
            user_type: "user".into(),
            status: "active".into(),
            ..Default::default()
        });
    }

    /// Load a row into the form; the password always starts blank
    fn fill(&self, user: &User) {
        self.first_name.set(user.first_name.clone());
        self.last_name.set(user.last_name.clone());
        self.email.set(user.email.clone());
        self.phone.set(user.phone.clone());
        self.user_name.set(user.user_name.clone());
        self.password.set(String::new());
        self.image.set(user.image.clone());
        self.user_type.set(user.user_type.clone());
        self.status.set(user.status.clone());
    }

    fn input(&self) -> UserInput {
        UserInput {
            first_name: self.first_name.get(),
            last_name: self.last_name.get(),
            email: self.email.get(),
            phone: self.phone.get(),
            user_type: UserType::from_value(&self.user_type.get()),
            user_name: self.user_name.get(),
            image: self.image.get(),
            status: UserStatus::from_value(&self.status.get()),
            password: self.password.get(),
        }
    }
}

/// Users admin page component
#[component]
pub fn Users() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let users = create_rw_signal(Vec::<User>::new());
    let (loading, set_loading) = create_signal(true);
    let show_create = create_rw_signal(false);
    let editing = create_rw_signal(None::<i64>);
    let fields = UserFields::new();

    let reload = move || {
        spawn_local(async move {
            match api::fetch_users().await {
                Ok(list) => users.set(list),
                Err(_) => state.show_error("Failed to fetch users"),
            }
            set_loading.set(false);
        });
    };

    create_effect(move |_| reload());

    let create_user = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = fields.input();
        spawn_local(async move {
            match api::create_user(&input).await {
                Ok(user) => {
                    users.update(|list| apply_created(list, user));
                    state.show_success("User created successfully");
                    show_create.set(false);
                    fields.reset();
                }
                Err(_) => state.show_error("Error creating user"),
            }
        });
    };

    let update_user = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = editing.get() else { return };
        let input = fields.input();
        spawn_local(async move {
            match api::update_user(id, &input).await {
                Ok(()) => {
                    // The backend only acknowledges; pull the fresh row
                    reload();
                    state.show_success("User updated");
                    editing.set(None);
                }
                Err(_) => state.show_error("Error updating user"),
            }
        });
    };

    let delete_user = move |id: i64| {
        spawn_local(async move {
            match api::delete_user(id).await {
                Ok(()) => {
                    users.update(|list| apply_removed(list, id));
                    state.show_success("User deleted");
                }
                Err(_) => state.show_error("Error deleting user"),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Users"</h1>
                <button
                    class=BUTTON_PRIMARY
                    on:click=move |_| {
                        fields.reset();
                        show_create.set(true);
                    }
                >
                    "+ Create User"
                </button>
            </div>

            {move || if loading.get() {
                view! { <ListSkeleton count=4 /> }.into_view()
            } else {
                view! {
                    <table class="w-full text-left bg-gray-800 rounded-lg overflow-hidden">
                        <thead class="bg-gray-700 text-gray-300 text-sm">
                            <tr>
                                <th class="px-4 py-3">"Name"</th>
                                <th class="px-4 py-3">"Email"</th>
                                <th class="px-4 py-3">"Type"</th>
                                <th class="px-4 py-3">"Status"</th>
                                <th class="px-4 py-3">"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || users.get()
                                key=|user| (user.id, user.user_name.clone(), user.status.clone())
                                children=move |user| {
                                    let id = user.id;
                                    let row = user.clone();
                                    view! {
                                        <tr class="border-t border-gray-700">
                                            <td class="px-4 py-3">{user.full_name()}</td>
                                            <td class="px-4 py-3">{user.email.clone()}</td>
                                            <td class="px-4 py-3">{user.user_type.clone()}</td>
                                            <td class="px-4 py-3">{user.status.clone()}</td>
                                            <td class="px-4 py-3 space-x-2">
                                                <button
                                                    class=BUTTON_SMALL
                                                    on:click=move |_| {
                                                        fields.fill(&row);
                                                        editing.set(Some(id));
                                                    }
                                                >
                                                    "Edit"
                                                </button>
                                                <button class=BUTTON_DANGER on:click=move |_| delete_user(id)>
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                }.into_view()
            }}

            {move || show_create.get().then(|| view! {
                <Modal title="Create User".to_string() on_close=move |_| show_create.set(false)>
                    <form on:submit=create_user class="space-y-4">
                        <UserFormFields fields=fields password_label="Password" />
                        <div class="flex justify-end space-x-3 pt-2">
                            <button type="button" class=BUTTON_SECONDARY on:click=move |_| show_create.set(false)>
                                "Cancel"
                            </button>
                            <button type="submit" class=BUTTON_PRIMARY>"Create"</button>
                        </div>
                    </form>
                </Modal>
            })}

            {move || editing.get().map(|_| view! {
                <Modal title="Edit User".to_string() on_close=move |_| editing.set(None)>
                    <form on:submit=update_user class="space-y-4">
                        <UserFormFields fields=fields password_label="New Password" />
                        <div class="flex justify-end space-x-3 pt-2">
                            <button type="button" class=BUTTON_SECONDARY on:click=move |_| editing.set(None)>
                                "Cancel"
                            </button>
                            <button type="submit" class=BUTTON_PRIMARY>"Save"</button>
                        </div>
                    </form>
                </Modal>
            })}
        </div>
    }
}

#[component]
fn UserFormFields(fields: UserFields, password_label: &'static str) -> impl IntoView {
    view! {
        <TextField label="First Name" value=fields.first_name />
        <TextField label="Last Name" value=fields.last_name />
        <TextField label="Email" value=fields.email input_type="email" />
        <TextField label="Phone" value=fields.phone />
        <TextField label="Username" value=fields.user_name />
        <TextField label=password_label value=fields.password input_type="password" />
        <TextField label="Image URL" value=fields.image />
        <div>
            <label class="block text-sm text-gray-400 mb-2">"Type"</label>
            <select
                class=INPUT_CLASS
                prop:value=move || fields.user_type.get()
                on:change=move |ev| fields.user_type.set(event_target_value(&ev))
            >
                <option value="user">"User"</option>
                <option value="admin">"Admin"</option>
            </select>
        </div>
        <div>
            <label class="block text-sm text-gray-400 mb-2">"Status"</label>
            <select
                class=INPUT_CLASS
                prop:value=move || fields.status.get()
                on:change=move |ev| fields.status.set(event_target_value(&ev))
            >
                <option value="active">"Active"</option>
                <option value="inactive">"Inactive"</option>
            </select>
        </div>
    }
}
