//! Landing Page
//!
//! Hero plus a card per event with countdown, average rating, a rotating
//! review quote and RSVP / Review / Share actions.

use std::collections::HashMap;

use gloo_timers::callback::Interval;
use leptos::*;
use leptos_router::use_navigate;

use crate::api::{self, Event, Review, RsvpInput, RsvpStatus};
use crate::components::modal::{BUTTON_PRIMARY, BUTTON_SECONDARY, INPUT_CLASS};
use crate::components::{ListSkeleton, Modal, Stars, TextField};
use crate::state::GlobalState;
use crate::util::{browser, format, validate};

const QUOTE_ROTATION_MS: u32 = 3_000;
const EVENT_LIST_ID: &str = "event-list";

/// Advance every event's quote index, wrapping at its comment count
fn rotate_quotes(indexes: &mut HashMap<i64, usize>, events: &[Event], reviews: &[Review]) {
    for event in events {
        let count = format::reviews_for(reviews, event.id).len();
        if count == 0 {
            continue;
        }
        let index = indexes.entry(event.id).or_insert(0);
        *index = (*index + 1) % count;
    }
}

fn current_quote(indexes: &HashMap<i64, usize>, reviews: &[Review], event_id: i64) -> String {
    let comments = format::reviews_for(reviews, event_id);
    let index = indexes.get(&event_id).copied().unwrap_or(0);
    comments
        .get(index)
        .map(|r| r.comments.clone())
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| "No comments available".to_string())
}

#[component]
pub fn Landing() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let events = create_rw_signal(Vec::<Event>::new());
    let reviews = create_rw_signal(Vec::<Review>::new());
    let quote_index = create_rw_signal(HashMap::<i64, usize>::new());

    let rsvp_event = create_rw_signal(None::<Event>);
    let rsvp_name = create_rw_signal(String::new());
    let rsvp_status = create_rw_signal(RsvpStatus::Interested.as_str().to_string());

    create_effect(move |_| {
        state.loading.set(true);
        spawn_local(async move {
            match api::fetch_events().await {
                Ok(list) => events.set(list),
                Err(e) => state.report(&e, "fetching events"),
            }
            state.loading.set(false);
        });
        spawn_local(async move {
            match api::fetch_reviews().await {
                Ok(list) => reviews.set(list),
                Err(e) => state.report(&e, "fetching reviews"),
            }
        });
    });

    let rotation = Interval::new(QUOTE_ROTATION_MS, move || {
        let (event_list, review_list) = (events.get_untracked(), reviews.get_untracked());
        quote_index.update(|indexes| rotate_quotes(indexes, &event_list, &review_list));
    });
    on_cleanup(move || drop(rotation));

    let submit_rsvp = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(event) = rsvp_event.get() else { return };
        let name = rsvp_name.get();
        let status = RsvpStatus::from_value(&rsvp_status.get());
        if let Err(message) = validate::check_quick_rsvp(&name, status) {
            return state.show_error(message);
        }
        let input = RsvpInput {
            user_id: api::current_user_id().unwrap_or(1),
            name,
            event_id: event.id,
            status: status.unwrap_or(RsvpStatus::Interested),
        };
        spawn_local(async move {
            match api::create_participant(&input).await {
                Ok(_) => {
                    state.show_success("RSVP successful!");
                    rsvp_event.set(None);
                    rsvp_name.set(String::new());
                    rsvp_status.set(RsvpStatus::Interested.as_str().to_string());
                }
                Err(e) => state.report(&e, "RSVPing for event"),
            }
        });
    };

    let share = move |event_id: i64| {
        let url = browser::event_share_url(&browser::origin(), event_id);
        spawn_local(async move {
            match browser::copy_to_clipboard(&url).await {
                Ok(()) => state.show_success("Event URL copied to clipboard!"),
                Err(e) => state.show_error(&format!("Could not copy link: {}", e)),
            }
        });
    };

    let join_navigate = navigate.clone();

    view! {
        <div class="space-y-12">
            // Hero
            <section class="text-center py-24 bg-gradient-to-b from-indigo-950 to-gray-900 rounded-2xl">
                <h1 class="text-5xl font-bold">
                    "Stay Connected with "
                    <span class="bg-gradient-to-r from-pink-500 to-yellow-400 bg-clip-text text-transparent">
                        "CampusEvents"
                    </span>
                </h1>
                <p class="text-gray-300 mt-6 max-w-xl mx-auto">
                    "Discover upcoming campus events, from workshops and social gatherings to key campus announcements."
                </p>
                <div class="flex justify-center space-x-4 mt-8">
                    <button class=BUTTON_PRIMARY on:click=move |_| browser::scroll_to(EVENT_LIST_ID)>
                        "Explore"
                    </button>
                    <button
                        class=BUTTON_SECONDARY
                        on:click=move |_| join_navigate("/orgmember", Default::default())
                    >
                        "Join Organization"
                    </button>
                </div>
            </section>

            // Events
            <section id=EVENT_LIST_ID class="space-y-6">
                <h2 class="text-2xl font-semibold">"Upcoming Events"</h2>
                {move || if state.loading.get() {
                    view! { <ListSkeleton count=3 /> }.into_view()
                } else if events.with(Vec::is_empty) {
                    view! { <p class="text-gray-400">"No upcoming events available."</p> }.into_view()
                } else {
                    let navigate = navigate.clone();
                    view! {
                        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                            {move || {
                                let navigate = navigate.clone();
                                events.get().into_iter().map(move |event| {
                                    let navigate = navigate.clone();
                                    view! {
                                        <EventCard
                                            event=event
                                            reviews=reviews
                                            quote_index=quote_index
                                            on_rsvp=Callback::new(move |event: Event| rsvp_event.set(Some(event)))
                                            on_review=Callback::new(move |_| navigate("/review", Default::default()))
                                            on_share=Callback::new(share)
                                        />
                                    }
                                }).collect_view()
                            }}
                        </div>
                    }.into_view()
                }}
            </section>

            {move || rsvp_event.get().map(|event| {
                let title = if event.title.is_empty() { "Event".to_string() } else { event.title.clone() };
                view! {
                    <Modal title=format!("RSVP to {}", title) on_close=move |_| rsvp_event.set(None)>
                        <form on:submit=submit_rsvp class="space-y-4">
                            <TextField label="Your Name" value=rsvp_name placeholder="Enter your name" />
                            <div>
                                <label class="block text-sm text-gray-400 mb-2">"Status"</label>
                                <select
                                    class=INPUT_CLASS
                                    prop:value=move || rsvp_status.get()
                                    on:change=move |ev| rsvp_status.set(event_target_value(&ev))
                                >
                                    {RsvpStatus::all().iter().map(|status| view! {
                                        <option value=status.as_str()>{status.label()}</option>
                                    }).collect_view()}
                                </select>
                            </div>
                            <button type="submit" class=format!("w-full {}", BUTTON_PRIMARY)>"Submit"</button>
                        </form>
                    </Modal>
                }
            })}
        </div>
    }
}

#[component]
fn EventCard(
    event: Event,
    reviews: RwSignal<Vec<Review>>,
    quote_index: RwSignal<HashMap<i64, usize>>,
    on_rsvp: Callback<Event>,
    on_review: Callback<()>,
    on_share: Callback<i64>,
) -> impl IntoView {
    let now = format::now();
    let id = event.id;
    let upcoming = format::is_upcoming(&event, now);
    let image = if event.image_url.is_empty() {
        format::PLACEHOLDER_IMAGE.to_string()
    } else {
        event.image_url.clone()
    };
    let location = if event.location.is_empty() {
        "Location Unknown".to_string()
    } else {
        event.location.clone()
    };
    let card = event.clone();

    view! {
        <div class="relative bg-gray-800 rounded-2xl shadow-lg overflow-hidden flex flex-col">
            <div class="flex items-center justify-between px-4 pt-3 text-sm">
                <span class="text-gray-400 font-medium">{format::days_left(event.date.as_deref(), now)}</span>
                <button
                    title="Add to calendar"
                    class="text-blue-400 hover:text-blue-300"
                    on:click=move |_| browser::open_in_new_tab(browser::CALENDAR_URL)
                >
                    "📅"
                </button>
            </div>
            <img src=image alt=event.title.clone() class="h-44 w-full object-cover mt-2" />
            <div class="p-4 space-y-3 flex-1 flex flex-col">
                <div class="flex items-center justify-between gap-2">
                    <h3 class="text-lg font-bold truncate">{event.title.clone()}</h3>
                    <span class="text-xs bg-blue-600 rounded-full px-2 py-1 whitespace-nowrap">"📍 " {location}</span>
                </div>
                <p class="text-sm text-gray-400 truncate">{event.description.clone()}</p>
                <div class="flex items-center space-x-2">
                    <Stars rating=Signal::derive(move || reviews.with(|r| format::average_rating(r, id))) />
                    <span class="text-xs text-gray-500">
                        {move || format!("({} reviews)", reviews.with(|r| format::reviews_for(r, id).len()))}
                    </span>
                </div>
                <div class="bg-gray-900 rounded-lg p-3 text-sm text-center italic">
                    {move || {
                        let quote = quote_index.with(|indexes| reviews.with(|r| current_quote(indexes, r, id)));
                        format!("\"{}\"", quote)
                    }}
                </div>
                <div class="flex justify-between text-sm border-t border-gray-700 pt-3">
                    <span>"🗓 " {format::format_date(event.date.as_deref())}</span>
                    <span>"🕒 " {format::format_time(&event.time)}</span>
                </div>
                <div class="flex space-x-3 pt-2 mt-auto">
                    {if upcoming {
                        view! {
                            <button
                                class="flex-1 px-4 py-2 bg-green-600 hover:bg-green-700 rounded-lg font-medium"
                                on:click=move |_| on_rsvp.call(card.clone())
                            >
                                "RSVP"
                            </button>
                        }.into_view()
                    } else {
                        view! {
                            <button
                                class="flex-1 px-4 py-2 bg-orange-600 hover:bg-orange-700 rounded-lg font-medium"
                                on:click=move |_| on_review.call(())
                            >
                                "Review"
                            </button>
                        }.into_view()
                    }}
                    <button
                        class="flex-1 px-4 py-2 bg-blue-900 hover:bg-blue-800 text-blue-200 rounded-lg font-medium"
                        on:click=move |_| on_share.call(id)
                    >
                        "Share"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(event_id: i64, comments: &str) -> Review {
        Review {
            event_id,
            comments: comments.to_string(),
            rating: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_quotes_rotate_and_wrap() {
        let events = vec![
            Event { id: 1, ..Default::default() },
            Event { id: 2, ..Default::default() },
        ];
        let reviews = vec![review(1, "Loved it"), review(1, "Too short")];
        let mut indexes = HashMap::new();

        assert_eq!(current_quote(&indexes, &reviews, 1), "Loved it");
        rotate_quotes(&mut indexes, &events, &reviews);
        assert_eq!(current_quote(&indexes, &reviews, 1), "Too short");
        rotate_quotes(&mut indexes, &events, &reviews);
        assert_eq!(current_quote(&indexes, &reviews, 1), "Loved it");

        // No reviews: no index and the placeholder
        assert!(!indexes.contains_key(&2));
        assert_eq!(current_quote(&indexes, &reviews, 2), "No comments available");
    }
}
