//! Tauri commands bridging user actions onto the timer engine.
//!
//! The engine lives in-process behind a mutex; every mutation happens
//! under the lock inside a command or the ticker task, so the frontend
//! only ever observes complete transitions. After each mutation the new
//! snapshot is broadcast to every window (main and, when active, the
//! floating mirror), which repaint from it.

use pomopip_core::{Config, TimerEngine};
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;
use tauri::{AppHandle, Emitter, Manager, State};
use tokio::time::{interval, MissedTickBehavior};

/// Event carrying a `TimerSnapshot`, emitted to all windows on every
/// state change and on every tick.
pub const STATE_EVENT: &str = "timer-state-changed";

/// Shared timer engine state, protected by a Mutex.
///
/// `ticker` holds the handle of the 1 Hz tick task; it is `Some` exactly
/// while the engine is running. Rescheduling aborts the old task before
/// spawning a new one, so at most one ticker exists at a time.
pub struct EngineState {
    pub engine: Mutex<TimerEngine>,
    ticker: Mutex<Option<tauri::async_runtime::JoinHandle<()>>>,
}

impl EngineState {
    pub fn new(config: &Config) -> Self {
        Self {
            engine: Mutex::new(TimerEngine::new(config.durations())),
            ticker: Mutex::new(None),
        }
    }
}

/// Broadcast the current snapshot to every window.
///
/// Also reconciles the mirror first: a mirror whose window vanished
/// without notice is dropped here, within one tick of the loss.
pub fn emit_state(app: &AppHandle) -> Result<(), String> {
    if let Err(e) = crate::mirror::sync_with_window(app) {
        tracing::warn!(error = %e, "mirror window lost, treated as external close");
    }
    let state = app.state::<EngineState>();
    let snapshot = {
        let engine = state.engine.lock().map_err(|e| e.to_string())?;
        engine.snapshot()
    };
    app.emit(STATE_EVENT, &snapshot).map_err(|e| e.to_string())
}

/// Tear down the current ticker and start a fresh one if the engine is
/// running.
///
/// Called on every run-state or phase change so the next tick always
/// lands a full second after the change: pausing cancels the cadence
/// outright, and a manual phase switch restarts it instead of letting a
/// stale tick fire early or twice.
pub fn reschedule_ticker(app: &AppHandle) {
    let state = app.state::<EngineState>();
    let mut ticker = match state.ticker.lock() {
        Ok(guard) => guard,
        Err(e) => {
            tracing::error!(error = %e, "ticker lock poisoned");
            return;
        }
    };
    if let Some(handle) = ticker.take() {
        handle.abort();
    }
    let running = state
        .engine
        .lock()
        .map(|engine| engine.is_running())
        .unwrap_or(false);
    if !running {
        return;
    }

    let app = app.clone();
    *ticker = Some(tauri::async_runtime::spawn(async move {
        // Fixed 1 s cadence. This counts ticks rather than measuring
        // elapsed wall-clock time, so very long sessions can drift
        // slightly behind real time.
        let mut cadence = interval(Duration::from_secs(1));
        cadence.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // A fresh interval completes its first tick immediately;
        // consume it so the first decrement lands a second from now.
        cadence.tick().await;
        loop {
            cadence.tick().await;
            let state = app.state::<EngineState>();
            let event = match state.engine.lock() {
                Ok(mut engine) => engine.tick(),
                Err(e) => {
                    tracing::error!(error = %e, "engine lock poisoned, stopping ticker");
                    break;
                }
            };
            // None means the engine was paused out from under us; the
            // pause path has already aborted or is about to abort this
            // task, so just stop.
            if event.is_none() {
                break;
            }
            if let Err(e) = emit_state(&app) {
                tracing::warn!(error = %e, "failed to broadcast timer state");
            }
        }
    }));
}

// ── Timer commands ──────────────────────────────────────────────────

#[tauri::command]
pub fn cmd_timer_status(state: State<'_, EngineState>) -> Result<Value, String> {
    let engine = state.engine.lock().map_err(|e| e.to_string())?;
    serde_json::to_value(engine.snapshot()).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn cmd_timer_toggle(app: AppHandle, state: State<'_, EngineState>) -> Result<Value, String> {
    let event = {
        let mut engine = state.engine.lock().map_err(|e| e.to_string())?;
        engine.toggle_pause()
    };
    reschedule_ticker(&app);
    emit_state(&app)?;
    serde_json::to_value(event).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn cmd_timer_switch_phase(
    app: AppHandle,
    state: State<'_, EngineState>,
) -> Result<Value, String> {
    let event = {
        let mut engine = state.engine.lock().map_err(|e| e.to_string())?;
        engine.switch_phase()
    };
    reschedule_ticker(&app);
    emit_state(&app)?;
    serde_json::to_value(event).map_err(|e| e.to_string())
}
