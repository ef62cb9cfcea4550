use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::core::system_monitor::MetricSource;
use crate::core::views::ViewState;

use super::app::DashboardApp;
use super::widgets::{accent_color, base_style, styled_lines};

const TITLE: &str = "Ekko Control Plane v0.1";
const SUBTITLE: &str = "AI Dev & Deploy Orchestrator";
const SIDEBAR_WIDTH: u16 = 30;
const LOG_PANE_HEIGHT: u16 = 10;

/// Main render function
pub fn render_ui<S: MetricSource>(frame: &mut Frame, app: &DashboardApp<S>) {
    let area = frame.area();
    frame.render_widget(Block::default().style(base_style(app.theme)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Sidebar + main area
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(chunks[1]);

    render_sidebar(frame, body[0], app);
    render_main_area(frame, body[1], app);
    render_footer(frame, chunks[2]);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_header<S: MetricSource>(frame: &mut Frame, area: Rect, app: &DashboardApp<S>) {
    let title = format!(
        " {} │ {} │ Refresh: {}ms ",
        TITLE, SUBTITLE, app.interval_ms
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent_color(app.theme)));

    frame.render_widget(block, area);
}

fn render_sidebar<S: MetricSource>(frame: &mut Frame, area: Rect, app: &DashboardApp<S>) {
    let accent = accent_color(app.theme);

    let mut lines = vec![
        Line::from(Span::styled(
            "Ekko Control",
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::UNDERLINED),
        )),
        Line::default(),
    ];

    for (i, view) in app.views.views().iter().enumerate() {
        let style = if view.is_visible {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{}: ", i + 1)),
            Span::styled(view.label.clone(), style),
        ]));
    }

    lines.push(Line::from("---"));
    lines.push(Line::from(Span::styled(
        "Keys: L:Log D:Dark Q:Quit",
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(accent));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_main_area<S: MetricSource>(frame: &mut Frame, area: Rect, app: &DashboardApp<S>) {
    let log_height = if app.show_log_pane { LOG_PANE_HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),          // System monitor
            Constraint::Min(3),             // Visible view
            Constraint::Length(1),          // Loading indicator
            Constraint::Length(log_height), // Log pane
        ])
        .split(area);

    render_system_monitor(frame, chunks[0], app);
    render_view_content(frame, chunks[1], app);
    render_loading(frame, chunks[2], app);

    if app.show_log_pane {
        render_log_pane(frame, chunks[3], app);
    }
}

fn render_system_monitor<S: MetricSource>(frame: &mut Frame, area: Rect, app: &DashboardApp<S>) {
    let block = Block::default()
        .title(" System ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent_color(app.theme)));

    let paragraph = match app.rendered_metrics() {
        Some(text) => Paragraph::new(styled_lines(&text, app.theme)),
        None => Paragraph::new("Collecting metrics...")
            .style(Style::default().add_modifier(Modifier::DIM)),
    };

    frame.render_widget(paragraph.block(block), area);
}

fn render_view_content<S: MetricSource>(frame: &mut Frame, area: Rect, app: &DashboardApp<S>) {
    let (title, content) = match app.views.visible() {
        Some(view) => (format!(" {} ", view.label), view.content.clone()),
        None => (" Ekko ".to_string(), String::new()),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent_color(app.theme)));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_loading<S: MetricSource>(frame: &mut Frame, area: Rect, app: &DashboardApp<S>) {
    if let ViewState::Loading(view_id) = app.views.state() {
        let indicator = Paragraph::new(format!("Loading {}...", view_id))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(indicator, area);
    }
}

fn render_log_pane<S: MetricSource>(frame: &mut Frame, area: Rect, app: &DashboardApp<S>) {
    let block = Block::default()
        .title(" Log ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent_color(app.theme)));

    // Auto-scroll: only the lines that fit are shown.
    let visible = block.inner(area).height as usize;
    let lines: Vec<Line> = app.log.tail(visible).map(Line::from).collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let help = " 1-4: Views │ d: Theme │ l: Log │ Ctrl+L: Clear log │ ?: Help │ q: Quit ";
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = r#"
    Ekko Control Plane - Help

    Keyboard Shortcuts:
    ─────────────────────────────────────
    1-4         Show Status / Git / Scribe / Ansible
    d           Toggle dark / light theme
    l           Show or hide the log pane
    Ctrl+L      Clear the log
    ? / h       Toggle this help screen
    q / Esc     Quit

    Press ? again to close this help
    "#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::DarkGray));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left);

    // Center the help popup
    let popup_area = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(paragraph, popup_area);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::core::system_monitor::FakeSource;
    use crate::ui::monitor_tui::AppCommand;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(app: &DashboardApp<FakeSource>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render_ui(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_renders_metrics_view_and_log() {
        let mut app = DashboardApp::new(FakeSource::default(), &Config::default());
        app.log.append("Ekko TUI Init.");
        app.tick();

        let text = screen_text(&app);
        assert!(text.contains("Ekko Control Plane"));
        assert!(text.contains("CPU:"));
        assert!(text.contains("Net: N/A"));
        assert!(text.contains("Welcome! System monitoring active."));
        assert!(text.contains("Ekko TUI Init."));
    }

    #[test]
    fn test_loading_indicator_and_hidden_log() {
        let mut app = DashboardApp::new(FakeSource::default(), &Config::default());
        app.log.append("Ekko TUI Init.");
        let _task = app.handle_command(AppCommand::ShowView(2));
        app.handle_command(AppCommand::ToggleLog);

        let text = screen_text(&app);
        assert!(text.contains("Loading git-view..."));
        assert!(text.contains("Git Panel"));
        assert!(!text.contains("Ekko TUI Init."));
    }
}
