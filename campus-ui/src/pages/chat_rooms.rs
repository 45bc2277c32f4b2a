//! Chat Rooms Page
//!
//! Create a room for an event, then pick one to enter.

use leptos::*;
use leptos_router::use_navigate;

use crate::api::{self, ChatRoom, ChatRoomInput, Event};
use crate::components::modal::{BUTTON_PRIMARY, INPUT_CLASS};
use crate::components::{ListSkeleton, TextField};
use crate::state::{apply_created, GlobalState};
use crate::util::{format, validate};

/// Name and event pickers shared with the chat dashboard
#[derive(Clone, Copy)]
pub(crate) struct ChatRoomFields {
    pub name: RwSignal<String>,
    pub event_id: RwSignal<String>,
}

impl ChatRoomFields {
    pub fn new() -> Self {
        Self {
            name: create_rw_signal(String::new()),
            event_id: create_rw_signal(String::new()),
        }
    }

    pub fn reset(&self) {
        self.name.set(String::new());
        self.event_id.set(String::new());
    }

    pub fn input(&self) -> Result<ChatRoomInput, &'static str> {
        let name = self.name.get();
        let event_id = self.event_id.get().parse::<i64>().ok();
        validate::check_chat_room(&name, event_id)?;
        Ok(ChatRoomInput {
            name,
            event_id: event_id.unwrap_or_default(),
        })
    }
}

/// Create a room and append it to `rooms`
pub(crate) fn submit_chat_room(
    state: GlobalState,
    fields: ChatRoomFields,
    rooms: RwSignal<Vec<ChatRoom>>,
    on_created: impl FnOnce() + 'static,
) {
    let input = match fields.input() {
        Ok(input) => input,
        Err(message) => return state.show_error(message),
    };
    spawn_local(async move {
        match api::create_chat_room(&input).await {
            Ok(room) => {
                rooms.update(|list| apply_created(list, room));
                state.show_success("Chat room created successfully!");
                fields.reset();
                on_created();
            }
            Err(e) => state.report(&e, "creating chat room"),
        }
    });
}

/// Load rooms and events into the given signals
pub(crate) fn load_rooms_and_events(
    state: GlobalState,
    rooms: RwSignal<Vec<ChatRoom>>,
    events: RwSignal<Vec<Event>>,
    set_loading: WriteSignal<bool>,
) {
    spawn_local(async move {
        match api::fetch_events().await {
            Ok(list) => events.set(list),
            Err(e) => state.report(&e, "fetching events"),
        }
    });
    spawn_local(async move {
        match api::fetch_chat_rooms().await {
            Ok(list) => rooms.set(list),
            Err(e) => state.report(&e, "fetching chat rooms"),
        }
        set_loading.set(false);
    });
}

#[component]
pub(crate) fn ChatRoomFormFields(fields: ChatRoomFields, events: RwSignal<Vec<Event>>) -> impl IntoView {
    view! {
        <TextField label="Chat Room Name" value=fields.name placeholder="Enter chat room name" />
        <div>
            <label class="block text-sm text-gray-400 mb-2">"Event"</label>
            <select
                class=INPUT_CLASS
                prop:value=move || fields.event_id.get()
                on:change=move |ev| fields.event_id.set(event_target_value(&ev))
            >
                <option value="">"Select an event"</option>
                {move || events.get().into_iter().map(|event| view! {
                    <option value=event.id.to_string()>{event.title}</option>
                }).collect_view()}
            </select>
        </div>
    }
}

#[component]
pub fn ChatRooms() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let rooms = create_rw_signal(Vec::<ChatRoom>::new());
    let events = create_rw_signal(Vec::<Event>::new());
    let (loading, set_loading) = create_signal(true);
    let fields = ChatRoomFields::new();

    create_effect(move |_| load_rooms_and_events(state, rooms, events, set_loading));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        submit_chat_room(state, fields, rooms, || {});
    };

    view! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold">"Chat Rooms"</h1>

            <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-4 max-w-xl">
                <ChatRoomFormFields fields=fields events=events />
                <button type="submit" class=BUTTON_PRIMARY>"Create Chat Room"</button>
            </form>

            {move || if loading.get() {
                view! { <ListSkeleton count=3 /> }.into_view()
            } else if rooms.with(Vec::is_empty) {
                view! { <p class="text-gray-400">"No chat rooms found."</p> }.into_view()
            } else {
                let navigate = navigate.clone();
                view! {
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        {move || {
                            let navigate = navigate.clone();
                            rooms.get().into_iter().map(move |room| {
                                let event = events.with(|list| list.iter().find(|e| e.id == room.event_id).cloned());
                                let image = event
                                    .as_ref()
                                    .map(|e| e.image_url.clone())
                                    .filter(|url| !url.is_empty())
                                    .unwrap_or_else(|| format::PLACEHOLDER_IMAGE.to_string());
                                let title = event
                                    .map(|e| e.title)
                                    .unwrap_or_else(|| "Unknown Event".to_string());
                                let id = room.id;
                                let navigate = navigate.clone();
                                view! {
                                    <div
                                        class="rounded-xl overflow-hidden bg-cover bg-center"
                                        style=format!("background-image: url('{}')", image)
                                    >
                                        <div class="bg-black/60 p-5 h-full flex flex-col space-y-2">
                                            <h3 class="text-lg font-semibold">{room.name.clone()}</h3>
                                            <p class="text-sm text-gray-300 flex-1">{title}</p>
                                            <button
                                                class=BUTTON_PRIMARY
                                                on:click=move |_| navigate(&format!("/chatroom/{}", id), Default::default())
                                            >
                                                "Enter Chat Room"
                                            </button>
                                        </div>
                                    </div>
                                }
                            }).collect_view()
                        }}
                    </div>
                }.into_view()
            }}
        </div>
    }
}
