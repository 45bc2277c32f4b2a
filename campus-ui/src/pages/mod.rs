//! Pages
//!
//! One component per route.

pub mod chat_dashboard;
pub mod chat_room_detail;
pub mod chat_rooms;
pub mod dashboard;
pub mod events;
pub mod landing;
pub mod login;
pub mod member_dashboard;
pub mod org_form;
pub mod org_member;
pub mod organizations;
pub mod participants;
pub mod reviews;
pub mod signup;
pub mod users;

pub use chat_dashboard::ChatDashboard;
pub use chat_room_detail::ChatRoomDetail;
pub use chat_rooms::ChatRooms;
pub use dashboard::Dashboard;
pub use events::Events;
pub use landing::Landing;
pub use login::Login;
pub use member_dashboard::MemberDashboard;
pub use org_form::{OrganizationCreate, OrganizationUpdate};
pub use org_member::OrgMember;
pub use organizations::Organizations;
pub use participants::Participants;
pub use reviews::{Review, ReviewDashboard};
pub use signup::SignUp;
pub use users::Users;
