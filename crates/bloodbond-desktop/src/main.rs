//! Bloodbond Desktop Application
//!
//! Find blood donors, sign up as one, and keep your donor profile current.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod bootstrap_config;
mod components;
mod routes;
mod services;
mod state;
mod theme;
mod views;

use dioxus::desktop::{Config, WindowBuilder};
use tracing_subscriber::EnvFilter;

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bloodbond=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting Bloodbond...");

    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Bloodbond")
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::new()
        .with_cfg(config)
        .launch(app::App);
}
