//! App Root Component
//!
//! Global state, the route table and the page chrome.

use leptos::*;
use leptos_router::*;

use crate::components::{Footer, Nav, Toast};
use crate::pages::{
    ChatDashboard, ChatRoomDetail, ChatRooms, Dashboard, Events, Landing, Login, MemberDashboard,
    OrgMember, OrganizationCreate, OrganizationUpdate, Organizations, Participants, Review,
    ReviewDashboard, SignUp, Users,
};
use crate::state::provide_global_state;

#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path="/" view=|| view! { <Redirect path="/home" /> } />
                        <Route path="/home" view=Landing />
                        <Route path="/user" view=Users />
                        <Route path="/signup" view=SignUp />
                        <Route path="/login" view=Login />
                        <Route path="/events" view=Events />
                        <Route path="/eparticipants" view=Participants />
                        <Route path="/organization" view=Organizations />
                        <Route path="/orgupdate/:id" view=OrganizationUpdate />
                        <Route path="/orgupdate" view=OrganizationUpdate />
                        <Route path="/orgcreate" view=OrganizationCreate />
                        <Route path="/orgmember" view=OrgMember />
                        <Route path="/memberdashboard/:organizationId" view=MemberDashboard />
                        <Route path="/review" view=Review />
                        <Route path="/rdashboard" view=ReviewDashboard />
                        <Route path="/chatroom" view=ChatRooms />
                        <Route path="/chatroom/:chatRoomId" view=ChatRoomDetail />
                        <Route path="/dashboard" view=Dashboard />
                        <Route path="/chatdashboard" view=ChatDashboard />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />
                <Toast />
            </div>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/home"
                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium transition-colors"
            >
                "Back to Events"
            </A>
        </div>
    }
}
