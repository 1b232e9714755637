//! Desktop UI: application state, messages and view modules

pub mod app;
pub mod message;
pub mod results;
pub mod toast;
pub mod upload_panel;
pub mod variation;

pub use app::KeyscopeApp;
pub use message::Message;
