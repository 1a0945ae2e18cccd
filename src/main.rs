#![allow(warnings)]
//! Job Board Frontend Entry Point

mod models;
mod board;
mod sync;
mod config;
mod logging;
mod commands;
mod context;
mod store;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let loaded = commands::load_config();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::init(config.level_filter());
    if let Err(e) = loaded {
        log::warn!("[APP] using default config: {}", e);
    }

    mount_to_body(move || view! { <App config=config /> });
}
