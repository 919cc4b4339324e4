//! # Pomopip Core Library
//!
//! Core business logic for the Pomopip interval timer: a work/break
//! countdown with an optional floating mirror window. The desktop
//! application (src-tauri) is a thin GUI layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a synchronous state machine that requires the
//!   caller to invoke `tick()` once per second for progress
//! - **Config**: TOML-based durations and floating-window geometry
//! - **Events**: serializable state-change events consumed by the GUI
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: work/break countdown state machine
//! - [`TimerSnapshot`]: point-in-time view of the engine for rendering
//! - [`Config`]: application configuration management

pub mod config;
pub mod error;
pub mod events;
pub mod timer;

pub use config::Config;
pub use error::ConfigError;
pub use events::Event;
pub use timer::{format_time, Durations, TimerEngine, TimerPhase, TimerRunState, TimerSnapshot};
