//! Pure view models. Rendering lives in the frontend.

mod form;
mod profile;
mod route;

pub use form::LinkForm;
pub use profile::{APP_NAME, ProfileView};
pub use route::{Route, SearchError, search, share_url};
