//! Star rating display and picker.

use leptos::*;

use crate::util::format;

/// Read-only stars for a 0–5 average
#[component]
pub fn Stars(
    #[prop(into)]
    rating: MaybeSignal<f64>,
) -> impl IntoView {
    view! {
        <span class="text-yellow-400 tracking-wider">{move || format::stars(rating.get())}</span>
    }
}

/// Star `n` is lit once the picked rating reaches it
fn star_class(picked: u8, n: u8) -> &'static str {
    if picked >= n {
        "text-yellow-400"
    } else {
        "text-gray-500 hover:text-yellow-300"
    }
}

/// Clickable 1–5 picker
#[component]
pub fn StarPicker(value: RwSignal<u8>) -> impl IntoView {
    view! {
        <div class="flex space-x-1 text-2xl">
            {(1..=5u8).map(|n| view! {
                <button
                    type="button"
                    on:click=move |_| value.set(n)
                    class=move || { star_class(value.get(), n) }
                >
                    "★"
                </button>
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_class_lights_up_to_pick() {
        assert_eq!(star_class(3, 1), "text-yellow-400");
        assert_eq!(star_class(3, 3), "text-yellow-400");
        assert_eq!(star_class(3, 4), "text-gray-500 hover:text-yellow-300");
        assert_eq!(star_class(0, 1), "text-gray-500 hover:text-yellow-300");
    }
}
