// Library interface for huddle (shared by the binary and the tests)
pub mod api;
pub mod app;
pub mod config;

#[macro_use]
pub mod logging;

pub mod mention;
pub mod server_config;
pub mod terminal;
pub mod textarea_text;
pub mod toast;
pub mod ui;
