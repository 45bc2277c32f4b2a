//! Event Participants Page
//!
//! RSVP management: create, update, confirm-delete, and a details modal for
//! the event behind each row.

use leptos::*;

use crate::api::{self, Event, EventParticipant, RsvpInput, RsvpStatus, RsvpUpdate, User};
use crate::components::modal::{BUTTON_DANGER, BUTTON_PRIMARY, BUTTON_SECONDARY, BUTTON_SMALL, INPUT_CLASS};
use crate::components::{ListSkeleton, Modal, TextField};
use crate::state::{apply_created, apply_removed, apply_updated, GlobalState};
use crate::util::{format, validate};

#[derive(Clone, Copy)]
struct RsvpFields {
    name: RwSignal<String>,
    event_id: RwSignal<String>,
    status: RwSignal<String>,
}

impl RsvpFields {
    fn new() -> Self {
        Self {
            name: create_rw_signal(String::new()),
            event_id: create_rw_signal(String::new()),
            status: create_rw_signal(RsvpStatus::Interested.as_str().to_string()),
        }
    }

    fn fill(&self, participant: &EventParticipant) {
        self.name.set(participant.name.clone());
        self.event_id.set(participant.event_id.to_string());
        self.status.set(participant.status.clone());
    }

    fn reset(&self) {
        self.name.set(String::new());
        self.event_id.set(String::new());
        self.status.set(RsvpStatus::Interested.as_str().to_string());
    }

    /// Validated `(name, event id, status)`
    fn checked(&self) -> Result<(String, i64, RsvpStatus), &'static str> {
        let name = self.name.get();
        let event_id = self.event_id.get().parse::<i64>().ok();
        let status = RsvpStatus::from_value(&self.status.get());
        validate::check_rsvp(&name, event_id, status)?;
        match (event_id, status) {
            (Some(event_id), Some(status)) => Ok((name, event_id, status)),
            _ => Err(validate::RSVP_INCOMPLETE),
        }
    }
}

#[component]
pub fn Participants() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let participants = create_rw_signal(Vec::<EventParticipant>::new());
    let events = create_rw_signal(Vec::<Event>::new());
    let logged_in = create_rw_signal(None::<User>);
    let (loading, set_loading) = create_signal(true);

    let show_create = create_rw_signal(false);
    let editing = create_rw_signal(None::<i64>);
    let confirm_delete = create_rw_signal(None::<i64>);
    let details = create_rw_signal(None::<Event>);
    let fields = RsvpFields::new();

    create_effect(move |_| {
        spawn_local(async move {
            if let Some(id) = api::current_user_id() {
                match api::fetch_user(id).await {
                    Ok(user) => logged_in.set(Some(user)),
                    Err(_) => state.show_error("Error fetching user data"),
                }
            }
        });
        spawn_local(async move {
            match api::fetch_events().await {
                Ok(list) => events.set(list),
                Err(e) => state.report(&e, "fetching events"),
            }
        });
        spawn_local(async move {
            match api::fetch_participants().await {
                Ok(list) => participants.set(list),
                Err(e) => state.report(&e, "fetching participants"),
            }
            set_loading.set(false);
        });
    });

    let create_rsvp = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (name, event_id, status) = match fields.checked() {
            Ok(values) => values,
            Err(message) => return state.show_error(message),
        };
        let input = RsvpInput {
            user_id: api::current_user_id().unwrap_or(1),
            name,
            event_id,
            status,
        };
        spawn_local(async move {
            match api::create_participant(&input).await {
                Ok(participant) => {
                    participants.update(|list| apply_created(list, participant));
                    state.show_success("RSVP successful!");
                    show_create.set(false);
                    fields.reset();
                }
                Err(e) => state.report(&e, "RSVPing for event"),
            }
        });
    };

    let update_rsvp = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = editing.get() else { return };
        let (name, event_id, status) = match fields.checked() {
            Ok(values) => values,
            Err(message) => return state.show_error(message),
        };
        let input = RsvpUpdate { name, status, event_id };
        spawn_local(async move {
            match api::update_participant(id, &input).await {
                Ok(participant) => {
                    participants.update(|list| apply_updated(list, participant));
                    state.show_success("Participant updated successfully!");
                    editing.set(None);
                }
                Err(e) => state.report(&e, "updating participant"),
            }
        });
    };

    let remove = move |_: web_sys::MouseEvent| {
        let Some(id) = confirm_delete.get() else { return };
        spawn_local(async move {
            match api::delete_participant(id).await {
                Ok(()) => {
                    participants.update(|list| apply_removed(list, id));
                    state.show_success("Participant removed successfully!");
                }
                Err(e) => state.report(&e, "removing participant"),
            }
            confirm_delete.set(None);
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Event RSVPs"</h1>
                    {move || logged_in.get().map(|user| view! {
                        <p class="text-gray-400 mt-1">
                            "Logged in as: " <strong class="text-white">{user.user_name}</strong>
                        </p>
                    })}
                </div>
                <button
                    class=BUTTON_PRIMARY
                    on:click=move |_| {
                        fields.reset();
                        show_create.set(true);
                    }
                >
                    "RSVP to Event"
                </button>
            </div>

            {move || if loading.get() {
                view! { <ListSkeleton count=4 /> }.into_view()
            } else if participants.with(Vec::is_empty) {
                view! { <p class="text-gray-400">"No participants found."</p> }.into_view()
            } else {
                view! {
                    <table class="w-full text-left bg-gray-800 rounded-lg overflow-hidden">
                        <thead class="bg-gray-700 text-gray-300 text-sm">
                            <tr>
                                <th class="px-4 py-3">"Name"</th>
                                <th class="px-4 py-3">"Event"</th>
                                <th class="px-4 py-3">"Status"</th>
                                <th class="px-4 py-3">"Created At"</th>
                                <th class="px-4 py-3">"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || participants.get().into_iter().map(|participant| {
                                let id = participant.id;
                                let event_id = participant.event_id;
                                let row = participant.clone();
                                let title = events.with(|list| format::event_title(list, event_id));
                                view! {
                                    <tr class="border-t border-gray-700">
                                        <td class="px-4 py-3">{participant.name.clone()}</td>
                                        <td class="px-4 py-3">
                                            <button
                                                class="text-indigo-400 hover:underline"
                                                on:click=move |_| {
                                                    let event = events.with(|list| list.iter().find(|e| e.id == event_id).cloned());
                                                    details.set(event);
                                                }
                                            >
                                                {title}
                                            </button>
                                        </td>
                                        <td class="px-4 py-3">{format::rsvp_label(&participant.status)}</td>
                                        <td class="px-4 py-3 text-gray-400">{format::format_timestamp(&participant.created_at)}</td>
                                        <td class="px-4 py-3 space-x-2">
                                            <button
                                                class=BUTTON_SMALL
                                                on:click=move |_| {
                                                    fields.fill(&row);
                                                    editing.set(Some(id));
                                                }
                                            >
                                                "Update"
                                            </button>
                                            <button class=BUTTON_DANGER on:click=move |_| confirm_delete.set(Some(id))>
                                                "Delete"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_view()
            }}

            {move || show_create.get().then(|| view! {
                <Modal title="RSVP to Event".to_string() on_close=move |_| show_create.set(false)>
                    <form on:submit=create_rsvp class="space-y-4">
                        <RsvpFormFields fields=fields events=events />
                        <button type="submit" class=format!("w-full {}", BUTTON_PRIMARY)>"Submit RSVP"</button>
                    </form>
                </Modal>
            })}

            {move || editing.get().map(|_| view! {
                <Modal title="Update Participant".to_string() on_close=move |_| editing.set(None)>
                    <form on:submit=update_rsvp class="space-y-4">
                        <RsvpFormFields fields=fields events=events />
                        <button type="submit" class=format!("w-full {}", BUTTON_PRIMARY)>"Save Changes"</button>
                    </form>
                </Modal>
            })}

            {move || confirm_delete.get().map(|_| view! {
                <Modal title="Confirm Deletion".to_string() on_close=move |_| confirm_delete.set(None)>
                    <p class="mb-6">"Are you sure you want to remove this participant?"</p>
                    <div class="flex justify-end space-x-3">
                        <button class=BUTTON_SECONDARY on:click=move |_| confirm_delete.set(None)>"Cancel"</button>
                        <button class=BUTTON_DANGER on:click=remove>"Delete"</button>
                    </div>
                </Modal>
            })}

            {move || details.get().map(|event| view! {
                <Modal title=event.title.clone() on_close=move |_| details.set(None)>
                    <p class="text-gray-300">{event.description.clone()}</p>
                    <p class="text-sm text-gray-400 mt-4">
                        {format::format_date(event.date.as_deref())} " · " {format::format_time(&event.time)}
                    </p>
                </Modal>
            })}
        </div>
    }
}

#[component]
fn RsvpFormFields(fields: RsvpFields, events: RwSignal<Vec<Event>>) -> impl IntoView {
    view! {
        <TextField label="Your Name" value=fields.name placeholder="Enter your name" />
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
        <div>
            <label class="block text-sm text-gray-400 mb-2">"Status"</label>
            <select
                class=INPUT_CLASS
                prop:value=move || fields.status.get()
                on:change=move |ev| fields.status.set(event_target_value(&ev))
            >
                {RsvpStatus::all().iter().map(|status| view! {
                    <option value=status.as_str()>{status.label()}</option>
                }).collect_view()}
            </select>
        </div>
    }
}
