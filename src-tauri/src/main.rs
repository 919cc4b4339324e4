// Prevents additional console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Pomopip Desktop Application
//!
//! A Tauri-based work/break interval timer with an optional floating
//! always-on-top mirror window. The GUI is a thin skin over the Rust
//! core (pomopip-core).

mod bridge;
mod mirror;

use pomopip_core::Config;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load configuration, using defaults");
        Config::default()
    });

    tauri::Builder::default()
        .manage(bridge::EngineState::new(&config))
        .manage(mirror::MirrorState::new(config.floating))
        .invoke_handler(tauri::generate_handler![
            // Timer commands
            bridge::cmd_timer_status,
            bridge::cmd_timer_toggle,
            bridge::cmd_timer_switch_phase,
            // Mirror (floating window) commands
            mirror::cmd_mirror_toggle,
            mirror::cmd_mirror_status,
            mirror::cmd_start_drag,
        ])
        .run(tauri::generate_context!())
        .unwrap_or_else(|e| {
            eprintln!("Tauri application error: {}", e);
            std::process::exit(1);
        });
}
