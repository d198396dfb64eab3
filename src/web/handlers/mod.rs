//! HTML template rendering handlers for the public pages.

mod home;
mod not_found;

pub use home::{home_handler, shorten_form_handler};
pub use not_found::not_found_handler;
