//! UI Components
//!
//! Shell pieces and form building blocks shared by the pages.

pub mod footer;
pub mod loading;
pub mod modal;
pub mod nav;
pub mod stars;
pub mod toast;

pub use footer::Footer;
pub use loading::{InlineLoading, ListSkeleton, Loading};
pub use modal::{Modal, TextField};
pub use nav::Nav;
pub use stars::{StarPicker, Stars};
pub use toast::Toast;
