//! Modal dialog shell used by every create/edit form.

use leptos::*;

#[component]
pub fn Modal(
    #[prop(into)]
    title: MaybeSignal<String>,
    #[prop(into)]
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-40">
            <div class="bg-gray-800 rounded-xl p-6 w-full max-w-md mx-4 max-h-[90vh] overflow-y-auto">
                <div class="flex items-center justify-between mb-6">
                    <h2 class="text-xl font-semibold">{move || title.get()}</h2>
                    <button
                        type="button"
                        on:click=move |_| on_close.call(())
                        class="text-gray-400 hover:text-white"
                    >
                        "✕"
                    </button>
                </div>
                {children()}
            </div>
        </div>
    }
}

/// Labelled text input bound to a signal
#[component]
pub fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(optional)]
    placeholder: &'static str,
    /// Per-field error text rendered under the input
    #[prop(optional, into)]
    error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            <input
                type=input_type
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                class="w-full bg-gray-700 rounded-lg px-4 py-3
                       border border-gray-600 focus:border-indigo-500 focus:outline-none"
            />
            {move || error.and_then(|e| e.get()).map(|msg| view! {
                <p class="text-red-400 text-sm mt-1">{msg}</p>
            })}
        </div>
    }
}

pub const BUTTON_PRIMARY: &str =
    "px-4 py-2 bg-indigo-600 hover:bg-indigo-700 disabled:bg-gray-600 rounded-lg font-medium transition-colors";
pub const BUTTON_SECONDARY: &str =
    "px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors";
pub const BUTTON_DANGER: &str =
    "px-3 py-1 bg-red-600 hover:bg-red-700 rounded-lg text-sm font-medium transition-colors";
pub const BUTTON_SMALL: &str =
    "px-3 py-1 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm font-medium transition-colors";
pub const INPUT_CLASS: &str =
    "w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 focus:border-indigo-500 focus:outline-none";
