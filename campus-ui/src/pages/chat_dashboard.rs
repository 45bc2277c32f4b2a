//! Chat Dashboard
//!
//! Management table for chat rooms: enter, rename and delete.

use leptos::*;
use leptos_router::use_navigate;

use crate::api::{self, ChatRoom, Event};
use crate::components::modal::{BUTTON_DANGER, BUTTON_PRIMARY, BUTTON_SMALL};
use crate::components::{ListSkeleton, Modal, TextField};
use crate::pages::chat_rooms::{load_rooms_and_events, submit_chat_room, ChatRoomFields, ChatRoomFormFields};
use crate::state::{apply_removed, apply_updated, GlobalState};
use crate::util::validate;

#[component]
pub fn ChatDashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let rooms = create_rw_signal(Vec::<ChatRoom>::new());
    let events = create_rw_signal(Vec::<Event>::new());
    let (loading, set_loading) = create_signal(true);
    let show_create = create_rw_signal(false);
    let renaming = create_rw_signal(None::<i64>);
    let new_name = create_rw_signal(String::new());
    let fields = ChatRoomFields::new();

    create_effect(move |_| load_rooms_and_events(state, rooms, events, set_loading));

    let create_room = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        submit_chat_room(state, fields, rooms, move || show_create.set(false));
    };

    let rename_room = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = renaming.get() else { return };
        let name = new_name.get();
        if name.trim().is_empty() {
            return state.show_error(validate::FIELDS_MISSING);
        }
        spawn_local(async move {
            match api::rename_chat_room(id, &name).await {
                Ok(room) => {
                    rooms.update(|list| apply_updated(list, room));
                    state.show_success("Chat room updated successfully!");
                    renaming.set(None);
                }
                Err(e) => state.report(&e, "updating chat room"),
            }
        });
    };

    let delete_room = move |id: i64| {
        spawn_local(async move {
            match api::delete_chat_room(id).await {
                Ok(()) => {
                    rooms.update(|list| apply_removed(list, id));
                    state.show_success("Chat room deleted successfully!");
                }
                Err(e) => state.report(&e, "deleting chat room"),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Manage Chat Rooms"</h1>
                <button
                    class=BUTTON_PRIMARY
                    on:click=move |_| {
                        fields.reset();
                        show_create.set(true);
                    }
                >
                    "Create Chat Room"
                </button>
            </div>

            {move || if loading.get() {
                view! { <ListSkeleton count=4 /> }.into_view()
            } else if rooms.with(Vec::is_empty) {
                view! { <p class="text-gray-400">"No chat rooms found"</p> }.into_view()
            } else {
                let navigate = navigate.clone();
                view! {
                    <table class="w-full text-left bg-gray-800 rounded-lg overflow-hidden">
                        <thead class="bg-gray-700 text-gray-300 text-sm">
                            <tr>
                                <th class="px-4 py-3">"Name"</th>
                                <th class="px-4 py-3">"Event"</th>
                                <th class="px-4 py-3">"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let navigate = navigate.clone();
                                rooms.get().into_iter().map(move |room| {
                                    let id = room.id;
                                    let current_name = room.name.clone();
                                    let event = events.with(|list| {
                                        list.iter()
                                            .find(|e| e.id == room.event_id)
                                            .map(|e| e.title.clone())
                                            .unwrap_or_else(|| "Unknown".to_string())
                                    });
                                    let navigate = navigate.clone();
                                    view! {
                                        <tr class="border-t border-gray-700">
                                            <td class="px-4 py-3">{room.name.clone()}</td>
                                            <td class="px-4 py-3 text-gray-400">{event}</td>
                                            <td class="px-4 py-3 space-x-2">
                                                <button
                                                    class=BUTTON_SMALL
                                                    on:click=move |_| navigate(&format!("/chatroom/{}", id), Default::default())
                                                >
                                                    "Enter"
                                                </button>
                                                <button
                                                    class=BUTTON_SMALL
                                                    on:click=move |_| {
                                                        new_name.set(current_name.clone());
                                                        renaming.set(Some(id));
                                                    }
                                                >
                                                    "Update"
                                                </button>
                                                <button class=BUTTON_DANGER on:click=move |_| delete_room(id)>
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
                <Modal title="Create a Chat Room".to_string() on_close=move |_| show_create.set(false)>
                    <form on:submit=create_room class="space-y-4">
                        <ChatRoomFormFields fields=fields events=events />
                        <button type="submit" class=format!("w-full {}", BUTTON_PRIMARY)>"Create"</button>
                    </form>
                </Modal>
            })}

            {move || renaming.get().map(|_| view! {
                <Modal title="Update Chat Room".to_string() on_close=move |_| renaming.set(None)>
                    <form on:submit=rename_room class="space-y-4">
                        <TextField label="Chat Room Name" value=new_name />
                        <button type="submit" class=format!("w-full {}", BUTTON_PRIMARY)>"Update"</button>
                    </form>
                </Modal>
            })}
        </div>
    }
}
