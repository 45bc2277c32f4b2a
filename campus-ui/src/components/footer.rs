//! Site footer with tagline and link groups.

use leptos::*;

const LINK_GROUPS: &[(&str, &[(&str, &str)])] = &[
    ("Explore", &[("Events", "/home"), ("Chatrooms", "/chatroom")]),
    ("Contribute", &[("Organization", "/orgmember"), ("Review", "/review")]),
    ("Notified", &[("Sign Up", "/signup"), ("Log In", "/login")]),
];

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="bg-gray-800 border-t border-gray-700 mt-16 pt-8 pb-4">
            <div class="container mx-auto px-4">
                <div class="flex flex-col md:flex-row md:justify-between gap-8">
                    <p class="text-gray-400 max-w-sm">
                        "Meet people, and make lifelong connections. Find events that are not only fun but memorable."
                    </p>
                    <div class="flex gap-12">
                        {LINK_GROUPS.iter().map(|(title, links)| view! {
                            <div>
                                <h4 class="text-white font-semibold mb-2">{*title}</h4>
                                <ul class="space-y-1">
                                    {links.iter().map(|(label, href)| view! {
                                        <li>
                                            <a href=*href class="text-sm text-gray-400 hover:text-white">{*label}</a>
                                        </li>
                                    }).collect_view()}
                                </ul>
                            </div>
                        }).collect_view()}
                    </div>
                </div>
                <div class="border-t border-gray-700 mt-8 pt-4 text-sm text-gray-500">
                    "© 2024 CampusEvents. All rights reserved."
                </div>
            </div>
        </footer>
    }
}
