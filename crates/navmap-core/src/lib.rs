pub mod config;
pub mod constants;
pub mod error;
pub mod fragment;
pub mod history;
pub mod hooks;
pub mod layout;
pub mod readiness;
pub mod sync;
pub mod view;

pub use config::*;
pub use error::*;
pub use hooks::*;
pub use readiness::*;
pub use sync::*;
pub use view::*;
