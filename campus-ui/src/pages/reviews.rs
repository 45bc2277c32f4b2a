//! Reviews
//!
//! `/review` shows submitted reviews as cards, `/rdashboard` as a table.
//! Both share the submit form, the edit modal and the rule that only
//! finished events can be reviewed.

use leptos::*;

use crate::api::{self, Event, Review as ReviewRecord, ReviewInput};
use crate::components::modal::{BUTTON_DANGER, BUTTON_PRIMARY, BUTTON_SMALL, INPUT_CLASS};
use crate::components::{ListSkeleton, Modal, StarPicker, Stars};
use crate::state::{apply_created, apply_removed, apply_updated, GlobalState};
use crate::util::{format, validate};

#[derive(Clone, Copy, PartialEq)]
enum Layout {
    Cards,
    Table,
}

#[component]
pub fn Review() -> impl IntoView {
    view! { <ReviewBoard layout=Layout::Cards /> }
}

#[component]
pub fn ReviewDashboard() -> impl IntoView {
    view! { <ReviewBoard layout=Layout::Table /> }
}

fn comment_or_placeholder(comments: &str) -> String {
    if comments.trim().is_empty() {
        "No comments available".to_string()
    } else {
        comments.to_string()
    }
}

#[component]
fn ReviewBoard(layout: Layout) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let events = create_rw_signal(Vec::<Event>::new());
    let reviews = create_rw_signal(Vec::<ReviewRecord>::new());
    let (loading, set_loading) = create_signal(true);

    let event_id = create_rw_signal(String::new());
    let rating = create_rw_signal(0u8);
    let comments = create_rw_signal(String::new());

    let editing = create_rw_signal(None::<ReviewRecord>);
    let edit_rating = create_rw_signal(0u8);
    let edit_comments = create_rw_signal(String::new());

    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_events().await {
                Ok(list) => events.set(list),
                Err(e) => state.report(&e, "fetching events"),
            }
        });
        spawn_local(async move {
            match api::fetch_reviews().await {
                Ok(list) => reviews.set(list),
                Err(e) => state.report(&e, "fetching reviews"),
            }
            set_loading.set(false);
        });
    });

    let submit_review = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let selected_id = event_id.get().parse::<i64>().ok();
        let event = selected_id.and_then(|id| events.with(|list| list.iter().find(|e| e.id == id).cloned()));
        let text = comments.get();
        let stars = rating.get();
        if let Err(message) = validate::check_review(event.as_ref(), stars, &text, format::now()) {
            return state.show_error(message);
        }
        let Some(event) = event else { return };

        let input = ReviewInput {
            event_id: event.id,
            comments: text,
            rating: stars,
        };
        spawn_local(async move {
            match api::create_review(&input).await {
                Ok(review) => {
                    reviews.update(|list| apply_created(list, review));
                    state.show_success("Review submitted successfully!");
                    event_id.set(String::new());
                    rating.set(0);
                    comments.set(String::new());
                }
                Err(e) => state.report(&e, "submitting review"),
            }
        });
    };

    let save_edit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(review) = editing.get() else { return };
        let text = edit_comments.get();
        let stars = edit_rating.get();
        if text.trim().is_empty() || !(1..=5).contains(&stars) {
            return state.show_error(validate::REVIEW_INCOMPLETE);
        }
        let input = ReviewInput {
            event_id: review.event_id,
            comments: text,
            rating: stars,
        };
        spawn_local(async move {
            match api::update_review(review.id, &input).await {
                Ok(updated) => {
                    reviews.update(|list| apply_updated(list, updated));
                    state.show_success("Review updated successfully!");
                    editing.set(None);
                }
                Err(e) => state.report(&e, "updating review"),
            }
        });
    };

    let delete_review = move |id: i64| {
        spawn_local(async move {
            match api::delete_review(id).await {
                Ok(()) => {
                    reviews.update(|list| apply_removed(list, id));
                    state.show_success("Review deleted successfully!");
                }
                Err(e) => state.report(&e, "deleting review"),
            }
        });
    };

    let start_edit = move |review: ReviewRecord| {
        edit_rating.set(review.rating);
        edit_comments.set(review.comments.clone());
        editing.set(Some(review));
    };

    let title_of = move |id: i64| events.with(|list| format::event_title(list, id));

    view! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold">
                {if layout == Layout::Cards { "Review Events" } else { "Manage Reviews" }}
            </h1>

            // Submit form
            <form on:submit=submit_review class="bg-gray-800 rounded-xl p-6 space-y-4 max-w-xl">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Event"</label>
                    <select
                        class=INPUT_CLASS
                        prop:value=move || event_id.get()
                        on:change=move |ev| event_id.set(event_target_value(&ev))
                    >
                        <option value="">"Select an event"</option>
                        {move || events.get().into_iter().map(|event| view! {
                            <option value=event.id.to_string()>{event.title}</option>
                        }).collect_view()}
                    </select>
                </div>
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Rating"</label>
                    <StarPicker value=rating />
                </div>
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Comment"</label>
                    <textarea
                        rows="3"
                        class=INPUT_CLASS
                        prop:value=move || comments.get()
                        on:input=move |ev| comments.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class=BUTTON_PRIMARY>"Submit Review"</button>
            </form>

            {move || if loading.get() {
                view! { <ListSkeleton count=3 /> }.into_view()
            } else if reviews.with(Vec::is_empty) {
                view! { <p class="text-gray-400">"No reviews found."</p> }.into_view()
            } else if layout == Layout::Cards {
                view! {
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        {move || reviews.get().into_iter().map(|review| {
                            let id = review.id;
                            let record = review.clone();
                            view! {
                                <div class="bg-gray-800 rounded-xl p-5 space-y-2">
                                    <h3 class="font-semibold">{title_of(review.event_id)}</h3>
                                    <Stars rating=f64::from(review.rating) />
                                    <p class="text-sm text-gray-300">{comment_or_placeholder(&review.comments)}</p>
                                    <div class="flex space-x-2 pt-2">
                                        <button class=BUTTON_SMALL on:click=move |_| start_edit(record.clone())>"Edit"</button>
                                        <button class=BUTTON_DANGER on:click=move |_| delete_review(id)>"Delete"</button>
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_view()
            } else {
                view! {
                    <table class="w-full text-left bg-gray-800 rounded-lg overflow-hidden">
                        <thead class="bg-gray-700 text-gray-300 text-sm">
                            <tr>
                                <th class="px-4 py-3">"Event"</th>
                                <th class="px-4 py-3">"Comment"</th>
                                <th class="px-4 py-3">"Rating"</th>
                                <th class="px-4 py-3">"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || reviews.get().into_iter().map(|review| {
                                let id = review.id;
                                let record = review.clone();
                                view! {
                                    <tr class="border-t border-gray-700">
                                        <td class="px-4 py-3">{title_of(review.event_id)}</td>
                                        <td class="px-4 py-3 text-gray-300">{comment_or_placeholder(&review.comments)}</td>
                                        <td class="px-4 py-3"><Stars rating=f64::from(review.rating) /></td>
                                        <td class="px-4 py-3 space-x-2">
                                            <button class=BUTTON_SMALL on:click=move |_| start_edit(record.clone())>"Edit"</button>
                                            <button class=BUTTON_DANGER on:click=move |_| delete_review(id)>"Delete"</button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_view()
            }}

            {move || editing.get().map(|_| view! {
                <Modal title="Edit Review".to_string() on_close=move |_| editing.set(None)>
                    <form on:submit=save_edit class="space-y-4">
                        <div>
                            <label class="block text-sm text-gray-400 mb-2">"Edit Comment"</label>
                            <textarea
                                rows="3"
                                class=INPUT_CLASS
                                prop:value=move || edit_comments.get()
                                on:input=move |ev| edit_comments.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label class="block text-sm text-gray-400 mb-2">"Rating"</label>
                            <StarPicker value=edit_rating />
                        </div>
                        <button type="submit" class=format!("w-full {}", BUTTON_PRIMARY)>"Save Changes"</button>
                    </form>
                </Modal>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_placeholder() {
        assert_eq!(comment_or_placeholder(""), "No comments available");
        assert_eq!(comment_or_placeholder("  "), "No comments available");
        assert_eq!(comment_or_placeholder("Great talk"), "Great talk");
    }
}
