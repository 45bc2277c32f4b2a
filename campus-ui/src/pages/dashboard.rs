//! Dashboard Page
//!
//! Admin landing with one card per management screen.

use leptos::*;
use leptos_router::*;

const CARDS: &[(&str, &str, &str)] = &[
    (
        "Manage Organization",
        "/organization",
        "Manage your organization from creating events to handling other things.",
    ),
    (
        "Manage Events",
        "/events",
        "Register your organization first, and then create events where users can engage.",
    ),
    (
        "Manage ChatRoom",
        "/chatdashboard",
        "Create a chatroom for the events you will be attending to find similar people.",
    ),
    (
        "Manage Event RSVP",
        "/eparticipants",
        "Register yourself to your favourite events now! 😉",
    ),
    (
        "Manage Reviews",
        "/rdashboard",
        "Edit, update, and reviews, nobody gonna know! ⭐",
    ),
];

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold">"Welcome to Dashboard"</h1>

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                {CARDS.iter().map(|(title, href, blurb)| view! {
                    <A
                        href=*href
                        class="block bg-gray-800 rounded-xl p-6 hover:bg-gray-700 hover:scale-105 transition-transform"
                    >
                        <h2 class="text-lg font-semibold">{*title}</h2>
                        <p class="text-sm text-gray-400 mt-4">{*blurb}</p>
                    </A>
                }).collect_view()}
            </div>
        </div>
    }
}
