//! Todo Frontend Entry Point

mod app;
mod components;
mod context;
mod models;
mod store;

use app::App;
use console_logger::LoggerConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_logger::init(LoggerConfig::from_build_env()) {
        web_sys::console::warn_1(&format!("[APP] logger not installed: {}", err).into());
    }
    mount_to_body(App);
}
