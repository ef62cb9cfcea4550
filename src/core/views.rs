//! Content panels and the single-flight view switcher.
//!
//! Exactly one `View` is visible at any time. Showing a view flips
//! visibility immediately and starts a `LoadTask`; only the loading
//! indicator and the completion log line wait for that task. Starting a new
//! load cancels the previous one, so the last request always wins.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::core::config::Config;
use crate::core::log_sink::LogSink;
use crate::error::{EkkoError, Result};

pub const STATUS_VIEW: &str = "status-view";
pub const GIT_VIEW: &str = "git-view";
pub const SCRIBE_VIEW: &str = "scribe-view";
pub const ANSIBLE_VIEW: &str = "ansible-view";

/// A content panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub id: String,
    pub label: String,
    pub content: String,
    pub is_visible: bool,
}

impl View {
    pub fn new(id: impl Into<String>, label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            content: content.into(),
            is_visible: false,
        }
    }
}

/// The panels shown by the dashboard, in key order (`1`..`4`).
pub fn default_views() -> Vec<View> {
    vec![
        View::new(STATUS_VIEW, "Status", "Welcome! System monitoring active."),
        View::new(GIT_VIEW, "Git", "Git Panel"),
        View::new(SCRIBE_VIEW, "Scribe", "Scribe Panel"),
        View::new(ANSIBLE_VIEW, "Ansible", "Ansible Panel"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// No views registered.
    Idle,
    Loading(String),
    Active(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Cancelled,
    Completed,
}

/// Result of a finished `LoadTask`, fed back through `ViewController::finish`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub view_id: String,
    pub generation: u64,
    pub state: LoadState,
}

/// Simulated work behind a view switch.
///
/// Cancellation is cooperative: the task checks its token at its only
/// suspension point and reports `Cancelled` instead of completing.
#[derive(Debug)]
pub struct LoadTask {
    view_id: String,
    generation: u64,
    delay: Duration,
    token: CancellationToken,
}

impl LoadTask {
    pub fn view_id(&self) -> &str {
        &self.view_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> LoadState {
        if self.token.is_cancelled() {
            LoadState::Cancelled
        } else {
            LoadState::Pending
        }
    }

    pub async fn run(self) -> LoadOutcome {
        let state = tokio::select! {
            _ = self.token.cancelled() => LoadState::Cancelled,
            _ = tokio::time::sleep(self.delay) => {
                if self.token.is_cancelled() {
                    LoadState::Cancelled
                } else {
                    LoadState::Completed
                }
            }
        };

        LoadOutcome {
            view_id: self.view_id,
            generation: self.generation,
            state,
        }
    }
}

/// The single slot holding the outstanding load, if any.
#[derive(Debug)]
struct PendingLoad {
    generation: u64,
    token: CancellationToken,
}

pub struct ViewController {
    views: Vec<View>,
    state: ViewState,
    load_delay: Duration,
    generation: u64,
    pending: Option<PendingLoad>,
}

impl ViewController {
    /// Build a controller over `views`; the first view starts visible and active.
    pub fn new(mut views: Vec<View>, config: &Config) -> Self {
        for (i, view) in views.iter_mut().enumerate() {
            view.is_visible = i == 0;
        }

        let state = match views.first() {
            Some(view) => ViewState::Active(view.id.clone()),
            None => ViewState::Idle,
        };

        Self {
            views,
            state,
            load_delay: config.load_delay(),
            generation: 0,
            pending: None,
        }
    }

    pub fn with_default_views(config: &Config) -> Self {
        Self::new(default_views(), config)
    }

    /// Switch to `view_id` and return the load task to drive.
    ///
    /// Any outstanding load is cancelled first. An unknown id changes
    /// nothing and is reported both to the log facade and to `log`.
    pub fn request_show(&mut self, view_id: &str, log: &mut LogSink) -> Result<LoadTask> {
        if !self.views.iter().any(|v| v.id == view_id) {
            log::error!("Requested unknown view: {}", view_id);
            log.append(format!("Error: unknown view '{}'", view_id));
            return Err(EkkoError::unknown_view(view_id));
        }

        if let Some(previous) = self.pending.take() {
            previous.token.cancel();
            log::debug!("Cancelled load generation {}", previous.generation);
        }

        for view in &mut self.views {
            view.is_visible = view.id == view_id;
        }

        self.generation += 1;
        let token = CancellationToken::new();
        self.pending = Some(PendingLoad {
            generation: self.generation,
            token: token.clone(),
        });
        self.state = ViewState::Loading(view_id.to_string());

        log::info!("Switching view: {}", view_id);

        Ok(LoadTask {
            view_id: view_id.to_string(),
            generation: self.generation,
            delay: self.load_delay,
            token,
        })
    }

    /// Apply a finished task. Returns true if it was the current load.
    ///
    /// Stale or cancelled outcomes produce no log line.
    pub fn finish(&mut self, outcome: LoadOutcome, log: &mut LogSink) -> bool {
        let is_current = self
            .pending
            .as_ref()
            .is_some_and(|p| p.generation == outcome.generation);

        if !is_current {
            log::debug!(
                "Discarding stale load of {} (generation {})",
                outcome.view_id,
                outcome.generation
            );
            return false;
        }

        self.pending = None;

        match outcome.state {
            LoadState::Completed => {
                let label = self
                    .view(&outcome.view_id)
                    .map(|v| v.label.clone())
                    .unwrap_or_else(|| outcome.view_id.clone());
                log.append(format!("OK: loaded {}", label));
                log::info!("Loaded view: {}", outcome.view_id);
            }
            LoadState::Cancelled | LoadState::Pending => {
                log::debug!("Load of {} cancelled", outcome.view_id);
            }
        }

        self.state = match self.visible() {
            Some(view) => ViewState::Active(view.id.clone()),
            None => ViewState::Idle,
        };

        true
    }

    /// Cancel the outstanding load, if any, and settle on the visible view.
    pub fn cancel_pending(&mut self) {
        if let Some(previous) = self.pending.take() {
            previous.token.cancel();
            log::debug!("Cancelled load generation {}", previous.generation);
        }
        if let Some(view) = self.visible() {
            self.state = ViewState::Active(view.id.clone());
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading(_))
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn view(&self, id: &str) -> Option<&View> {
        self.views.iter().find(|v| v.id == id)
    }

    pub fn visible(&self) -> Option<&View> {
        self.views.iter().find(|v| v.is_visible)
    }

    /// View bound to the 1-based key `n`.
    pub fn view_id_for_key(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.views.get(i))
            .map(|v| v.id.as_str())
    }
}
