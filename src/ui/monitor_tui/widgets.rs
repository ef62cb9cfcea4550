use ratatui::prelude::*;

use crate::core::system_monitor::Severity;
use crate::ui::dashboard::{StyledText, Tag};

use super::app::Theme;

/// Base foreground/background for the whole screen
pub fn base_style(theme: Theme) -> Style {
    match theme {
        Theme::Dark => Style::default().fg(Color::White).bg(Color::Black),
        Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
    }
}

pub fn accent_color(theme: Theme) -> Color {
    match theme {
        Theme::Dark => Color::Cyan,
        Theme::Light => Color::Blue,
    }
}

/// Color for a severity band
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Ok => Color::Green,
        Severity::Warn => Color::Yellow,
        Severity::Critical | Severity::Error => Color::Red,
    }
}

/// Style for an inline dashboard tag
pub fn tag_style(tag: Tag, theme: Theme) -> Style {
    match tag {
        Tag::Severity(severity) => Style::default()
            .fg(severity_color(severity))
            .add_modifier(Modifier::BOLD),
        Tag::Sent => Style::default().fg(Color::Green),
        Tag::Recv => Style::default().fg(accent_color(theme)),
        Tag::Dim => Style::default().add_modifier(Modifier::DIM),
    }
}

/// Convert dashboard output into ratatui lines
pub fn styled_lines(text: &StyledText, theme: Theme) -> Vec<Line<'static>> {
    text.lines
        .iter()
        .map(|line| {
            Line::from(
                line.iter()
                    .map(|span| match span.tag {
                        Some(tag) => Span::styled(span.text.clone(), tag_style(tag, theme)),
                        None => Span::raw(span.text.clone()),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::dashboard::StyledSpan;

    #[test]
    fn test_styled_lines_keep_text_and_color_tags() {
        let text = StyledText {
            lines: vec![vec![
                StyledSpan::tagged("CPU:", Tag::Severity(Severity::Critical)),
                StyledSpan::raw(" 95.0%"),
            ]],
        };

        let lines = styled_lines(&text, Theme::Dark);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[0].content, "CPU:");
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Red));
        assert_eq!(lines[0].spans[1].style, Style::default());
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(severity_color(Severity::Ok), Color::Green);
        assert_eq!(severity_color(Severity::Warn), Color::Yellow);
        assert_eq!(severity_color(Severity::Error), Color::Red);
    }
}
