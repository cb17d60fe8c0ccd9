#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod app;
pub mod commands;
pub mod config;
pub mod database;
pub mod email;
pub mod logging;
pub mod schema;
pub mod store;
pub mod util;

pub use app::App;
