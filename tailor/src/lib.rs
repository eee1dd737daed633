#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod dispatch;
pub mod once;
pub mod style;

// Export common structs
pub use dispatch::{installed_interceptions, Class, DispatchKind, Interception};
pub use once::once;
pub use style::{install, install_with_token, SharedStyleSource, Styleable, INIT_TOKEN, WILL_ATTACH};
