//! Chat Room Detail
//!
//! Messages for one room, re-fetched every 5 seconds while the page is
//! mounted. The send box doubles as the editor when a message is picked
//! for editing.

use gloo_timers::callback::Interval;
use leptos::*;
use leptos_router::use_params_map;

use crate::api::{self, ChatMessage, ChatMessageInput, ChatRoom};
use crate::components::modal::{BUTTON_PRIMARY, BUTTON_SECONDARY, INPUT_CLASS};
use crate::components::Loading;
use crate::state::{apply_created, apply_removed, patch_by_id, GlobalState};
use crate::util::validate;

const POLL_INTERVAL_MS: u32 = 5_000;

const SEND_ACTION: &str = "sending message";
const EDIT_ACTION: &str = "updating message";
const DELETE_ACTION: &str = "deleting message";

#[component]
pub fn ChatRoomDetail() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let params = use_params_map();

    let room = create_rw_signal(None::<ChatRoom>);
    let event_title = create_rw_signal("Unknown Event".to_string());
    let messages = create_rw_signal(Vec::<ChatMessage>::new());
    let draft = create_rw_signal(String::new());
    let editing = create_rw_signal(None::<i64>);
    let author = create_rw_signal(None::<String>);

    let room_id = move || {
        params.with(|p| p.get("chatRoomId").and_then(|id| id.parse::<i64>().ok()))
    };

    let fetch_messages = move |id: i64| {
        spawn_local(async move {
            match api::fetch_messages(id).await {
                Ok(list) => messages.set(list),
                Err(e) => state.report(&e, "fetching chat messages"),
            }
        });
    };

    create_effect(move |_| {
        let Some(id) = room_id() else { return };
        spawn_local(async move {
            match api::fetch_chat_room(id).await {
                Ok(found) => {
                    let event_id = found.event_id;
                    room.set(Some(found));
                    match api::fetch_event(event_id).await {
                        Ok(event) => event_title.set(event.title),
                        Err(e) => state.report(&e, "fetching event name"),
                    }
                }
                Err(e) => state.report(&e, "fetching chat room details"),
            }
        });
        spawn_local(async move {
            author.set(api::resolve_current_user().await.map(|u| u.user_name));
        });
        fetch_messages(id);
    });

    // Poll for new messages; the interval is dropped (and cleared) with the page
    let poll = Interval::new(POLL_INTERVAL_MS, move || {
        if let Some(id) = room_id() {
            fetch_messages(id);
        }
    });
    on_cleanup(move || drop(poll));

    let on_send = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = draft.get();
        if let Err(message) = validate::check_message(&text) {
            return state.show_error(message);
        }

        if let Some(message_id) = editing.get() {
            spawn_local(async move {
                match api::edit_message(message_id, &text).await {
                    Ok(_) => {
                        messages.update(|list| {
                            patch_by_id(list, message_id, |m| m.message = text.clone());
                        });
                        draft.set(String::new());
                        editing.set(None);
                        state.show_success("Message updated!");
                    }
                    Err(e) => state.report(&e, EDIT_ACTION),
                }
            });
            return;
        }

        let Some(chat_room_id) = room_id() else { return };
        let user_id = api::current_user_id().unwrap_or(1);
        let input = ChatMessageInput {
            message: text,
            user_id,
            chat_room_id,
            created_by: author.get().unwrap_or_else(|| format!("User {}", user_id)),
        };
        spawn_local(async move {
            match api::send_message(&input).await {
                Ok(message) => {
                    messages.update(|list| apply_created(list, message));
                    draft.set(String::new());
                    state.show_success("Message sent!");
                }
                Err(e) => state.report(&e, SEND_ACTION),
            }
        });
    };

    let delete_message = move |id: i64| {
        spawn_local(async move {
            match api::delete_message(id).await {
                Ok(()) => {
                    messages.update(|list| apply_removed(list, id));
                    state.show_success("Message deleted!");
                }
                Err(e) => state.report(&e, DELETE_ACTION),
            }
        });
    };

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            {move || match room.get() {
                Some(found) => view! {
                    <div>
                        <h1 class="text-2xl font-semibold">{found.name}</h1>
                        <p class="text-sm text-orange-400">{move || event_title.get()}</p>
                    </div>
                }.into_view(),
                None => view! { <Loading label="Loading chat room details..." /> }.into_view(),
            }}

            <div class="bg-gray-800 rounded-xl p-4 h-[60vh] overflow-y-auto space-y-3">
                <For
                    each=move || messages.get()
                    key=|msg| (msg.id, msg.message.clone())
                    children=move |msg| {
                        let id = msg.id;
                        let body = msg.message.clone();
                        view! {
                            <div class="flex items-start justify-between bg-indigo-100 text-gray-900 rounded-2xl px-4 py-2">
                                <p class="break-words">
                                    <strong>{format!("User {}:", msg.user_id)}</strong> " " {msg.message.clone()}
                                </p>
                                <div class="flex space-x-2 text-xs ml-4 shrink-0">
                                    <button
                                        class="text-indigo-700 hover:underline"
                                        on:click=move |_| {
                                            draft.set(body.clone());
                                            editing.set(Some(id));
                                        }
                                    >
                                        "Edit"
                                    </button>
                                    <button class="text-red-600 hover:underline" on:click=move |_| delete_message(id)>
                                        "Delete"
                                    </button>
                                </div>
                            </div>
                        }
                    }
                />
            </div>

            <form on:submit=on_send class="flex space-x-3">
                <input
                    type="text"
                    placeholder="Type your message"
                    class=INPUT_CLASS
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                {move || editing.get().is_some().then(|| view! {
                    <button
                        type="button"
                        class=BUTTON_SECONDARY
                        on:click=move |_| {
                            editing.set(None);
                            draft.set(String::new());
                        }
                    >
                        "Cancel"
                    </button>
                })}
                <button type="submit" class=BUTTON_PRIMARY>
                    {move || if editing.get().is_some() { "Save" } else { "Send" }}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiFailure;
    use crate::state::global::failure_message;

    #[test]
    fn test_message_failures_name_the_action() {
        let down = ApiFailure::Network("Network error: refused".into());
        assert_eq!(failure_message(&down, SEND_ACTION), "Network error while sending message");
        assert_eq!(failure_message(&down, EDIT_ACTION), "Network error while updating message");

        let refused = ApiFailure::Rejected(Vec::new());
        assert_eq!(failure_message(&refused, DELETE_ACTION), "Error deleting message");
        assert_eq!(failure_message(&refused, SEND_ACTION), "Error sending message");
    }
}
