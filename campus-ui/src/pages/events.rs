//! Events Page
//!
//! Table of events with a create modal and an update card pre-filled from
//! the selected row.

use leptos::*;

use crate::api::{self, Event, EventInput};
use crate::components::modal::{BUTTON_DANGER, BUTTON_PRIMARY, BUTTON_SECONDARY, BUTTON_SMALL, INPUT_CLASS};
use crate::components::{ListSkeleton, Modal, TextField};
use crate::state::{apply_created, apply_removed, apply_updated, GlobalState};
use crate::util::validate;

#[derive(Clone, Copy)]
struct EventFields {
    title: RwSignal<String>,
    description: RwSignal<String>,
    date: RwSignal<String>,
    time: RwSignal<String>,
    location: RwSignal<String>,
    image_url: RwSignal<String>,
    end_date: RwSignal<String>,
    organization_id: RwSignal<i64>,
    created_by: RwSignal<i64>,
}

impl EventFields {
    fn new() -> Self {
        Self {
            title: create_rw_signal(String::new()),
            description: create_rw_signal(String::new()),
            date: create_rw_signal(String::new()),
            time: create_rw_signal(String::new()),
            location: create_rw_signal(String::new()),
            image_url: create_rw_signal(String::new()),
            end_date: create_rw_signal(String::new()),
            organization_id: create_rw_signal(1),
            created_by: create_rw_signal(api::current_user_id().unwrap_or(1)),
        }
    }

    fn reset(&self) {
        self.fill(&Event {
            organization_id: 1,
            created_by: api::current_user_id().unwrap_or(1),
            ..Default::default()
        });
    }

    fn fill(&self, event: &Event) {
        self.title.set(event.title.clone());
        self.description.set(event.description.clone());
        self.date.set(date_part(event.date.as_deref()));
        self.time.set(event.time.clone());
        self.location.set(event.location.clone());
        self.image_url.set(event.image_url.clone());
        self.end_date.set(date_part(event.end_date.as_deref()));
        self.organization_id.set(event.organization_id);
        self.created_by.set(event.created_by);
    }

    /// Build the request body, normalising the time to `HH:mm:ss`
    fn input(&self) -> Result<EventInput, &'static str> {
        let time = validate::parse_event_time(&self.time.get())?;
        let optional = |value: String| (!value.trim().is_empty()).then_some(value);
        Ok(EventInput {
            title: self.title.get(),
            description: self.description.get(),
            date: optional(self.date.get()),
            time,
            location: self.location.get(),
            organization_id: self.organization_id.get(),
            created_by: self.created_by.get(),
            image_url: self.image_url.get(),
            end_date: optional(self.end_date.get()),
        })
    }
}

/// `<input type="date">` wants `YYYY-MM-DD`
fn date_part(raw: Option<&str>) -> String {
    raw.map(|d| d.chars().take(10).collect()).unwrap_or_default()
}

/// Manage events page component
#[component]
pub fn Events() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let events = create_rw_signal(Vec::<Event>::new());
    let (loading, set_loading) = create_signal(true);
    let show_create = create_rw_signal(false);
    let editing = create_rw_signal(None::<i64>);
    let fields = EventFields::new();

    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_events().await {
                Ok(list) => events.set(list),
                Err(e) => state.report(&e, "fetching events"),
            }
            set_loading.set(false);
        });
    });

    let create_event = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = match fields.input() {
            Ok(input) => input,
            Err(message) => return state.show_error(message),
        };
        spawn_local(async move {
            match api::create_event(&input).await {
                Ok(event) => {
                    events.update(|list| apply_created(list, event));
                    state.show_success("Event created successfully!");
                    show_create.set(false);
                    fields.reset();
                }
                Err(e) => state.report(&e, "creating event"),
            }
        });
    };

    let update_event = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = editing.get() else { return };
        let input = match fields.input() {
            Ok(input) => input,
            Err(message) => return state.show_error(message),
        };
        spawn_local(async move {
            match api::update_event(id, &input).await {
                Ok(event) => {
                    events.update(|list| apply_updated(list, event));
                    state.show_success("Event updated successfully!");
                    editing.set(None);
                }
                Err(e) => state.report(&e, "updating event"),
            }
        });
    };

    let delete_event = move |id: i64| {
        spawn_local(async move {
            match api::delete_event(id).await {
                Ok(()) => {
                    events.update(|list| apply_removed(list, id));
                    state.show_success("Event deleted successfully!");
                }
                Err(e) => state.report(&e, "deleting event"),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Manage Events"</h1>
                <button
                    class=BUTTON_PRIMARY
                    on:click=move |_| {
                        fields.reset();
                        show_create.set(true);
                    }
                >
                    "Create Event"
                </button>
            </div>

            // Update card
            {move || editing.get().map(|_| view! {
                <div class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Update Event"</h2>
                    <form on:submit=update_event class="space-y-4">
                        <EventFormFields fields=fields />
                        <div class="flex justify-end space-x-3">
                            <button type="button" class=BUTTON_SECONDARY on:click=move |_| editing.set(None)>
                                "Cancel"
                            </button>
                            <button type="submit" class=BUTTON_PRIMARY>"Update Event"</button>
                        </div>
                    </form>
                </div>
            })}

            {move || if loading.get() {
                view! { <ListSkeleton count=4 /> }.into_view()
            } else {
                view! {
                    <table class="w-full text-left bg-gray-800 rounded-lg overflow-hidden">
                        <thead class="bg-gray-700 text-gray-300 text-sm">
                            <tr>
                                <th class="px-4 py-3">"Title"</th>
                                <th class="px-4 py-3">"Description"</th>
                                <th class="px-4 py-3">"Image"</th>
                                <th class="px-4 py-3">"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || events.get().into_iter().map(|event| {
                                let id = event.id;
                                let row = event.clone();
                                view! {
                                    <tr class="border-t border-gray-700">
                                        <td class="px-4 py-3">{event.title.clone()}</td>
                                        <td class="px-4 py-3 text-gray-400">{event.description.clone()}</td>
                                        <td class="px-4 py-3">
                                            {if event.image_url.is_empty() {
                                                view! { <span class="text-gray-500">"N/A"</span> }.into_view()
                                            } else {
                                                view! {
                                                    <img src=event.image_url.clone() alt=event.title.clone() class="w-12 h-12 object-cover rounded" />
                                                }.into_view()
                                            }}
                                        </td>
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
                                            <button class=BUTTON_DANGER on:click=move |_| delete_event(id)>
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
                <Modal title="Create a New Event".to_string() on_close=move |_| show_create.set(false)>
                    <form on:submit=create_event class="space-y-4">
                        <EventFormFields fields=fields />
                        <button type="submit" class=format!("w-full {}", BUTTON_PRIMARY)>"Create Event"</button>
                    </form>
                </Modal>
            })}
        </div>
    }
}

#[component]
fn EventFormFields(fields: EventFields) -> impl IntoView {
    view! {
        <TextField label="Title" value=fields.title />
        <div>
            <label class="block text-sm text-gray-400 mb-2">"Description"</label>
            <textarea
                rows="3"
                class=INPUT_CLASS
                prop:value=move || fields.description.get()
                on:input=move |ev| fields.description.set(event_target_value(&ev))
            />
        </div>
        <TextField label="Date" value=fields.date input_type="date" />
        <TextField label="Event Time" value=fields.time placeholder="HH:mm:ss" />
        <TextField label="Location" value=fields.location />
        <TextField label="Image URL" value=fields.image_url />
        <TextField label="End Date" value=fields.end_date input_type="date" />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_part() {
        assert_eq!(date_part(Some("2024-10-19T18:00:00")), "2024-10-19");
        assert_eq!(date_part(Some("2024-10-19")), "2024-10-19");
        assert_eq!(date_part(None), "");
    }
}
