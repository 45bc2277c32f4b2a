//! Pure helpers shared by the pages: display formatting and form checks,
//! plus the few browser calls that are not HTTP.

pub mod browser;
pub mod format;
pub mod validate;
