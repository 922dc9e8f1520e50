//! PWA install prompt controller.
//!
//! On mount the controller reads two signals: standalone display mode and a persisted
//! dismissal flag. If either is set it stays hidden for its whole lifetime and arms
//! nothing. Otherwise it listens for native install events from the host and shows
//! itself once [`SHOW_DELAY`] has elapsed, unless dismissed in the meantime.
//!
//! Dropping the controller (or calling [`InstallPromptController::teardown`]) cancels the
//! delay timer and closes the capability listener.

mod platform;
mod view;

pub use platform::*;
pub use view::*;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::errors::AppError;
use crate::storage::KeyValueStore;

/// Storage key of the persisted dismissal flag.
pub const DISMISSED_KEY: &str = "pwa-install-modal-dismissed";

/// Delay between mount and the prompt appearing.
pub const SHOW_DELAY: Duration = Duration::from_secs(60);

/// Native install events emitted by the host.
pub type CapabilityEvents = mpsc::UnboundedReceiver<Box<dyn DeferredInstallPrompt>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

struct PromptState {
    visibility: Visibility,
    dismissed: bool,
    platform: Platform,
    deferred: Option<Box<dyn DeferredInstallPrompt>>,
}

impl PromptState {
    fn variant(&self) -> InstallVariant {
        InstallVariant::resolve(self.deferred.is_some(), self.platform)
    }
}

/// One mounted install prompt.
pub struct InstallPromptController {
    state: Arc<Mutex<PromptState>>,
    store: Arc<dyn KeyValueStore>,
    tasks: Vec<JoinHandle<()>>,
}

impl InstallPromptController {
    /// Mount the prompt. Must be called inside a tokio runtime.
    pub async fn mount(
        env: &dyn HostEnvironment,
        store: Arc<dyn KeyValueStore>,
        events: CapabilityEvents,
    ) -> Result<Self, AppError> {
        let standalone = env.is_standalone();
        let dismissed = store
            .get(DISMISSED_KEY)
            .await?
            .is_some_and(|v| !v.is_empty());

        let suppressed = standalone || dismissed;
        let platform = if suppressed {
            Platform::Other
        } else {
            Platform::detect(&env.user_agent())
        };

        let mut controller = Self {
            state: Arc::new(Mutex::new(PromptState {
                visibility: Visibility::Hidden,
                dismissed,
                platform,
                deferred: None,
            })),
            store,
            tasks: Vec::new(),
        };

        if suppressed {
            // `events` is dropped here, so the host sees no listener.
            tracing::debug!(standalone, dismissed, "Install prompt suppressed");
            return Ok(controller);
        }

        controller.tasks.push(tokio::spawn(capture_install_events(
            Arc::clone(&controller.state),
            events,
        )));
        controller.tasks.push(tokio::spawn(show_after_delay(
            Arc::clone(&controller.state),
            SHOW_DELAY,
        )));
        tracing::debug!(?platform, delay_secs = SHOW_DELAY.as_secs(), "Install prompt armed");

        Ok(controller)
    }

    pub fn visibility(&self) -> Visibility {
        self.state.lock().visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility() == Visibility::Visible
    }

    pub fn is_dismissed(&self) -> bool {
        self.state.lock().dismissed
    }

    pub fn has_native_prompt(&self) -> bool {
        self.state.lock().deferred.is_some()
    }

    pub fn variant(&self) -> InstallVariant {
        self.state.lock().variant()
    }

    /// The prompt to render, if visible.
    pub fn view(&self) -> Option<InstallPromptView> {
        let state = self.state.lock();
        (state.visibility == Visibility::Visible)
            .then(|| InstallPromptView::for_variant(state.variant()))
    }

    /// Open the native install dialog with the captured event, consuming it.
    ///
    /// Returns `Ok(None)` without side effects when no event has been captured. An
    /// accepted install dismisses the prompt for good; if the dismissal cannot be
    /// persisted the prompt is still hidden and the outcome returned. A failing `prompt()`
    /// call is returned to the caller; the event is discarded either way.
    pub async fn install(&self) -> Result<Option<InstallOutcome>, AppError> {
        let deferred = self.state.lock().deferred.take();
        let Some(mut prompt) = deferred else {
            tracing::debug!("Install requested without a captured prompt; ignoring");
            return Ok(None);
        };

        prompt.prompt().await?;
        let outcome = prompt.user_choice().await;
        tracing::info!(?outcome, "Native install prompt answered");

        if outcome == InstallOutcome::Accepted {
            if let Err(err) = self.dismiss().await {
                tracing::warn!(error = %err, "Failed to persist install prompt dismissal");
                self.state.lock().visibility = Visibility::Hidden;
            }
        }
        Ok(Some(outcome))
    }

    /// Persist the dismissal, then hide the prompt. Safe to call repeatedly.
    ///
    /// On a storage error the in-memory state is left untouched.
    pub async fn dismiss(&self) -> Result<(), AppError> {
        self.store.set(DISMISSED_KEY, "true").await?;
        {
            let mut state = self.state.lock();
            state.visibility = Visibility::Hidden;
            state.dismissed = true;
        }
        tracing::info!("Install prompt dismissed");
        Ok(())
    }

    /// Unmount: cancel the timer and stop listening for install events.
    pub fn teardown(self) {
        tracing::debug!("Install prompt torn down");
    }
}

impl Drop for InstallPromptController {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

async fn capture_install_events(state: Arc<Mutex<PromptState>>, mut events: CapabilityEvents) {
    while let Some(mut event) = events.recv().await {
        event.prevent_default();
        state.lock().deferred = Some(event);
        tracing::debug!("Captured native install prompt");
    }
}

async fn show_after_delay(state: Arc<Mutex<PromptState>>, delay: Duration) {
    tokio::time::sleep(delay).await;

    let mut state = state.lock();
    if state.dismissed {
        return;
    }
    state.visibility = Visibility::Visible;
    tracing::info!(variant = ?state.variant(), "Showing install prompt");
}
