//! Toasts for the success and error messages held in `GlobalState`.
//!
//! Both clear themselves on a timer; the error toast can also be closed.

use leptos::*;

use crate::state::GlobalState;

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="fixed top-20 right-4 z-50 flex flex-col items-end gap-2">
            {move || state.success.get().map(|text| view! {
                <Notice text=text tone=Tone::Success />
            })}
            {move || state.error.get().map(|text| view! {
                <Notice
                    text=text
                    tone=Tone::Error
                    on_dismiss=Callback::new(move |_| state.clear_error())
                />
            })}
        </div>
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Success,
    Error,
}

impl Tone {
    fn classes(self) -> &'static str {
        match self {
            Tone::Success => "bg-green-600",
            Tone::Error => "bg-red-600",
        }
    }
}

#[component]
fn Notice(
    text: String,
    tone: Tone,
    #[prop(optional)]
    on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div
            role="alert"
            class=format!(
                "{} text-white text-sm font-medium px-4 py-3 rounded-lg shadow-lg animate-slide-in flex items-center gap-3",
                tone.classes()
            )
        >
            <span>{text}</span>
            {on_dismiss.map(|dismiss| view! {
                <button
                    aria-label="Dismiss"
                    class="text-white/70 hover:text-white"
                    on:click=move |_| dismiss.call(())
                >
                    "×"
                </button>
            })}
        </div>
    }
}
