//! Floating mirror window management.
//!
//! The mirror is a small undecorated always-on-top window showing the
//! same timer and the same two controls as the main view. It is created
//! on demand through the platform windowing capability and may disappear
//! at any time: the user can close it from the window chrome without
//! going through `cmd_mirror_toggle`.
//!
//! The window handle itself is never stored. Ownership is the fixed
//! window label plus [`MirrorLifecycle`], an explicit inactive / pending /
//! active state machine; the handle is looked up per operation. The
//! close subscription is registered on the window and dies with it, so
//! no listener outlives an activate/deactivate cycle.

use pomopip_core::config::FloatingConfig;
use serde::Serialize;
use std::sync::Mutex;
use tauri::{
    AppHandle, Emitter, Manager, State, WebviewUrl, WebviewWindowBuilder, WindowEvent,
};
use thiserror::Error;

pub const MIRROR_LABEL: &str = "mirror";

/// Event carrying `{ "active": bool }`, emitted to all windows whenever
/// the mirror is activated, deactivated, or lost.
pub const MIRROR_EVENT: &str = "mirror-state-changed";

/// Failures of the floating window capability.
///
/// None of these affect the main timer, which keeps running regardless
/// of mirror state. All are caught at the command boundary, logged, and
/// surfaced to the frontend as a single notification string.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Capability absent on this platform; not recoverable this session.
    #[error("floating windows are not supported on this platform")]
    Unsupported,
    /// A previous activation request is still in flight.
    #[error("a floating window request is already in progress")]
    ActivationPending,
    /// The platform refused to create the window.
    #[error("the platform refused the floating window: {0}")]
    Denied(String),
    /// The window request failed; the user may retry.
    #[error("floating window request failed: {0}")]
    Platform(#[from] tauri::Error),
    /// The window vanished while we believed it was active.
    #[error("floating window content unexpectedly missing")]
    RenderTargetLost,
    #[error("mirror state lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum MirrorPhase {
    #[default]
    Inactive,
    Pending,
    Active,
}

/// Pure lifecycle state machine for the floating window.
///
/// Window creation is asynchronous from the user's point of view, so a
/// Pending state guards against a second activation racing the first.
#[derive(Debug, Default)]
pub struct MirrorLifecycle {
    phase: MirrorPhase,
}

impl MirrorLifecycle {
    pub fn is_active(&self) -> bool {
        self.phase == MirrorPhase::Active
    }

    /// Move Inactive -> Pending; reject anything else.
    pub fn begin_activation(&mut self) -> Result<(), MirrorError> {
        match self.phase {
            MirrorPhase::Inactive => {
                self.phase = MirrorPhase::Pending;
                Ok(())
            }
            MirrorPhase::Pending => Err(MirrorError::ActivationPending),
            MirrorPhase::Active => {
                Err(MirrorError::Denied("floating window already active".into()))
            }
        }
    }

    pub fn activation_succeeded(&mut self) {
        self.phase = MirrorPhase::Active;
    }

    /// Roll a failed activation back to Inactive so the user may retry.
    pub fn activation_failed(&mut self) {
        self.phase = MirrorPhase::Inactive;
    }

    /// Idempotent: covers explicit deactivation and external close alike.
    pub fn deactivated(&mut self) {
        self.phase = MirrorPhase::Inactive;
    }
}

/// Managed mirror state: lifecycle plus the configured window geometry.
pub struct MirrorState {
    pub lifecycle: Mutex<MirrorLifecycle>,
    pub geometry: FloatingConfig,
}

impl MirrorState {
    pub fn new(geometry: FloatingConfig) -> Self {
        Self {
            lifecycle: Mutex::new(MirrorLifecycle::default()),
            geometry,
        }
    }
}

// ── Commands ────────────────────────────────────────────────────────

#[tauri::command]
pub async fn cmd_mirror_toggle(
    app: AppHandle,
    state: State<'_, MirrorState>,
) -> Result<bool, String> {
    let active = state
        .lifecycle
        .lock()
        .map_err(|_| MirrorError::Poisoned.to_string())?
        .is_active();
    let result = if active {
        deactivate(&app, &state).map(|()| false)
    } else {
        activate(&app, &state).map(|()| true)
    };
    result.map_err(|e| {
        tracing::warn!(error = %e, "floating window toggle failed");
        e.to_string()
    })
}

#[tauri::command]
pub fn cmd_mirror_status(state: State<'_, MirrorState>) -> Result<bool, String> {
    Ok(state
        .lifecycle
        .lock()
        .map_err(|_| MirrorError::Poisoned.to_string())?
        .is_active())
}

/// Window dragging for the undecorated mirror chrome.
#[tauri::command]
pub fn cmd_start_drag(window: tauri::WebviewWindow) -> Result<(), String> {
    window.start_dragging().map_err(|e| e.to_string())
}

// ── Lifecycle operations ────────────────────────────────────────────

fn activate(app: &AppHandle, state: &MirrorState) -> Result<(), MirrorError> {
    state
        .lifecycle
        .lock()
        .map_err(|_| MirrorError::Poisoned)?
        .begin_activation()?;

    match build_window(app, &state.geometry) {
        Ok(()) => {
            if let Ok(mut lifecycle) = state.lifecycle.lock() {
                lifecycle.activation_succeeded();
            }
            emit_mirror_state(app, true);
            paint_current_snapshot(app);
            Ok(())
        }
        Err(e) => {
            if let Ok(mut lifecycle) = state.lifecycle.lock() {
                lifecycle.activation_failed();
            }
            Err(e)
        }
    }
}

/// Release the floating window if held; no-op when already inactive.
fn deactivate(app: &AppHandle, state: &MirrorState) -> Result<(), MirrorError> {
    let was_active = {
        let mut lifecycle = state.lifecycle.lock().map_err(|_| MirrorError::Poisoned)?;
        let active = lifecycle.is_active();
        lifecycle.deactivated();
        active
    };
    if let Some(window) = app.get_webview_window(MIRROR_LABEL) {
        if let Err(e) = window.close() {
            tracing::warn!(error = %e, "failed to close floating window");
        }
    }
    if was_active {
        emit_mirror_state(app, false);
    }
    Ok(())
}

fn build_window(app: &AppHandle, geometry: &FloatingConfig) -> Result<(), MirrorError> {
    if !platform_supported() {
        return Err(MirrorError::Unsupported);
    }
    if app.get_webview_window(MIRROR_LABEL).is_some() {
        // A stale window from a half-torn-down previous activation.
        return Err(MirrorError::Denied("a floating window already exists".into()));
    }

    let url = WebviewUrl::App(format!("index.html?window={MIRROR_LABEL}").into());
    let window = WebviewWindowBuilder::new(app, MIRROR_LABEL, url)
        .title("Pomopip Mirror")
        .inner_size(geometry.width, geometry.height)
        .decorations(false)
        .resizable(false)
        .always_on_top(true)
        .skip_taskbar(true)
        .shadow(true)
        .build()?;

    // External close detection: the subscription lives exactly as long
    // as the window, so it cannot leak across activate cycles. It also
    // fires for our own close() in deactivate(), where the lifecycle is
    // already Inactive and the handler does nothing.
    let handle = app.clone();
    window.on_window_event(move |event| {
        if let WindowEvent::Destroyed = event {
            on_window_destroyed(&handle);
        }
    });
    Ok(())
}

fn on_window_destroyed(app: &AppHandle) {
    let state = app.state::<MirrorState>();
    let was_active = match state.lifecycle.lock() {
        Ok(mut lifecycle) => {
            let active = lifecycle.is_active();
            lifecycle.deactivated();
            active
        }
        Err(e) => {
            tracing::error!(error = %e, "mirror lock poisoned in destroy handler");
            false
        }
    };
    if was_active {
        tracing::info!("floating window closed externally");
        emit_mirror_state(app, false);
    }
}

/// Reconcile the lifecycle with the actual window.
///
/// If we believe the mirror is active but its window is gone, the render
/// target is lost: treat it as an external close and report the loss.
pub fn sync_with_window(app: &AppHandle) -> Result<(), MirrorError> {
    let state = app.state::<MirrorState>();
    let mut lifecycle = state.lifecycle.lock().map_err(|_| MirrorError::Poisoned)?;
    if lifecycle.is_active() && app.get_webview_window(MIRROR_LABEL).is_none() {
        lifecycle.deactivated();
        drop(lifecycle);
        emit_mirror_state(app, false);
        return Err(MirrorError::RenderTargetLost);
    }
    Ok(())
}

/// First paint: push the current snapshot to the freshly created window
/// so it does not sit empty until the next tick.
fn paint_current_snapshot(app: &AppHandle) {
    let state = app.state::<crate::bridge::EngineState>();
    if let Ok(engine) = state.engine.lock() {
        if let Err(e) = app.emit_to(MIRROR_LABEL, crate::bridge::STATE_EVENT, &engine.snapshot()) {
            tracing::warn!(error = %e, "failed to paint floating window");
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct MirrorStatePayload {
    active: bool,
}

fn emit_mirror_state(app: &AppHandle, active: bool) {
    if let Err(e) = app.emit(MIRROR_EVENT, MirrorStatePayload { active }) {
        tracing::warn!(error = %e, "failed to broadcast mirror state");
    }
}

fn platform_supported() -> bool {
    cfg!(not(any(target_os = "android", target_os = "ios")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_walks_inactive_pending_active() {
        let mut lifecycle = MirrorLifecycle::default();
        assert!(!lifecycle.is_active());
        lifecycle.begin_activation().unwrap();
        assert!(!lifecycle.is_active());
        lifecycle.activation_succeeded();
        assert!(lifecycle.is_active());
    }

    #[test]
    fn duplicate_activation_while_pending_is_rejected() {
        let mut lifecycle = MirrorLifecycle::default();
        lifecycle.begin_activation().unwrap();
        assert!(matches!(
            lifecycle.begin_activation(),
            Err(MirrorError::ActivationPending)
        ));
    }

    #[test]
    fn failed_activation_rolls_back_for_retry() {
        let mut lifecycle = MirrorLifecycle::default();
        lifecycle.begin_activation().unwrap();
        lifecycle.activation_failed();
        assert!(!lifecycle.is_active());
        // Retry is allowed after a failure.
        lifecycle.begin_activation().unwrap();
    }

    #[test]
    fn deactivate_is_idempotent() {
        let mut lifecycle = MirrorLifecycle::default();
        lifecycle.begin_activation().unwrap();
        lifecycle.activation_succeeded();
        lifecycle.deactivated();
        assert!(!lifecycle.is_active());
        lifecycle.deactivated();
        assert!(!lifecycle.is_active());
    }

    #[test]
    fn external_close_from_active_lands_inactive() {
        let mut lifecycle = MirrorLifecycle::default();
        lifecycle.begin_activation().unwrap();
        lifecycle.activation_succeeded();
        // The destroy handler calls deactivated() with no explicit
        // deactivate command in between.
        lifecycle.deactivated();
        assert!(!lifecycle.is_active());
        lifecycle.begin_activation().unwrap();
    }
}
