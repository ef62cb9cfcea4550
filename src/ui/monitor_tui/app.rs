use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

use crate::core::config::Config;
use crate::core::log_sink::LogSink;
use crate::core::system_monitor::{MetricSampler, MetricSource, RateSample, Sample};
use crate::core::views::{LoadOutcome, LoadTask, ViewController};
use crate::ui::dashboard::{Dashboard, StyledText};

use super::event_handler::{map_key, AppCommand};
use super::render::render_ui;

pub const QUIT_REASON: &str = "User quit.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Dashboard application state.
///
/// Everything here is owned by the control loop; nothing is shared.
pub struct DashboardApp<S> {
    pub sampler: MetricSampler<S>,
    pub dashboard: Dashboard,
    pub views: ViewController,
    pub log: LogSink,
    pub last_sample: Option<Sample>,
    pub show_log_pane: bool,
    pub show_help: bool,
    pub theme: Theme,
    pub interval_ms: u64,
    exit_reason: Option<String>,
}

impl<S: MetricSource> DashboardApp<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            sampler: MetricSampler::new(source, config),
            dashboard: Dashboard::new(config),
            views: ViewController::with_default_views(config),
            log: LogSink::new(),
            last_sample: None,
            show_log_pane: true,
            show_help: false,
            theme: Theme::Dark,
            interval_ms: config.monitor_interval_ms,
            exit_reason: None,
        }
    }

    /// Take a sample. On failure the previous values stay on screen.
    pub fn tick(&mut self) {
        match self.sampler.sample() {
            Ok(sample) => self.last_sample = Some(sample),
            Err(e) => log::warn!("Sampling failed, keeping previous values: {}", e),
        }
    }

    pub fn rate(&self) -> Option<RateSample> {
        self.sampler.rate()
    }

    /// The dashboard block for the latest sample, if one exists yet.
    pub fn rendered_metrics(&self) -> Option<StyledText> {
        let rate = self.rate();
        self.last_sample
            .as_ref()
            .map(|sample| self.dashboard.render(sample, rate.as_ref()))
    }

    /// Apply a command. Returns a load task when a view switch started one.
    pub fn handle_command(&mut self, command: AppCommand) -> Option<LoadTask> {
        match command {
            AppCommand::Quit => {
                log::info!("Quit request.");
                self.exit_reason = Some(QUIT_REASON.to_string());
            }
            AppCommand::ToggleTheme => {
                self.theme = self.theme.toggled();
                log::debug!("Theme: {:?}", self.theme);
            }
            AppCommand::ClearLog => {
                self.log.clear();
                log::info!("Log cleared.");
            }
            AppCommand::ToggleLog => {
                self.show_log_pane = !self.show_log_pane;
                log::info!("Log toggled: {}", self.show_log_pane);
            }
            AppCommand::ToggleHelp => self.show_help = !self.show_help,
            AppCommand::ShowView(slot) => {
                let view_id = match self.views.view_id_for_key(slot) {
                    Some(id) => id.to_string(),
                    None => format!("view-{}", slot),
                };
                // Unknown ids are logged by the controller and change nothing.
                return self.views.request_show(&view_id, &mut self.log).ok();
            }
            AppCommand::None => {}
        }
        None
    }

    pub fn finish_load(&mut self, outcome: LoadOutcome) {
        self.views.finish(outcome, &mut self.log);
    }

    pub fn exit_reason(&self) -> Option<&str> {
        self.exit_reason.as_deref()
    }
}

/// Run the dashboard until the user quits; returns the exit reason.
pub fn run_dashboard_app<S: MetricSource>(
    source: S,
    config: &Config,
    log_path: Option<PathBuf>,
) -> Result<String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;

    let mut app = DashboardApp::new(source, config);
    app.log.append("Ekko TUI Init.");
    if let Some(path) = log_path {
        app.log.append(format!("Log: {}", path.display()));
    }
    app.tick();

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    log::info!("Ekko TUI mounted.");
    let result = runtime.block_on(event_loop(&mut terminal, &mut app));

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Single control loop: sampling timer, key input and load completions.
async fn event_loop<S: MetricSource>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut DashboardApp<S>,
) -> Result<String> {
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<LoadOutcome>();
    let mut events = EventStream::new();

    let mut ticker = interval(app.sampler.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick fires immediately and the app was primed already.
    ticker.tick().await;

    loop {
        terminal.draw(|frame| render_ui(frame, &*app))?;

        tokio::select! {
            _ = ticker.tick() => app.tick(),
            Some(outcome) = outcome_rx.recv() => app.finish_load(outcome),
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if let Some(task) = app.handle_command(map_key(key)) {
                        let tx = outcome_tx.clone();
                        tokio::spawn(async move {
                            // The receiver only goes away when the loop exits.
                            let _ = tx.send(task.run().await);
                        });
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Event read failed"),
                None => {
                    log::warn!("Input stream closed");
                    app.views.cancel_pending();
                    return Ok("Input closed.".to_string());
                }
            },
        }

        if let Some(reason) = app.exit_reason().map(str::to_string) {
            app.views.cancel_pending();
            return Ok(reason);
        }
    }
}
