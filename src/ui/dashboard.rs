//! Resource summary block.
//!
//! `Dashboard::render` is a pure function of the latest sample and rate. It
//! produces terminal-agnostic `StyledText`; the TUI maps tags to colors and
//! the headless sampler prints the inline markup.

use std::fmt;

use humansize::{format_size, BINARY};

use crate::core::config::Config;
use crate::core::system_monitor::{RateSample, Sample, Severity, SeverityBands};

/// Inline style tag attached to a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Severity(Severity),
    Sent,
    Recv,
    Dim,
}

impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Severity(severity) => severity.tag(),
            Tag::Sent => "sent",
            Tag::Recv => "recv",
            Tag::Dim => "dim",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub tag: Option<Tag>,
}

impl StyledSpan {
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: None,
        }
    }

    pub fn tagged(text: impl Into<String>, tag: Tag) -> Self {
        Self {
            text: text.into(),
            tag: Some(tag),
        }
    }
}

/// Plain text lines with inline tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    pub lines: Vec<Vec<StyledSpan>>,
}

impl StyledText {
    /// Text with tags rendered inline as `[tag]text[/tag]`.
    pub fn to_markup(&self) -> String {
        self.join_lines(|span| match span.tag {
            Some(tag) => format!("[{0}]{1}[/{0}]", tag.name(), span.text),
            None => span.text.clone(),
        })
    }

    /// Text with tags dropped.
    pub fn plain(&self) -> String {
        self.join_lines(|span| span.text.clone())
    }

    /// Every tag used, in order of appearance.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.lines.iter().flatten().filter_map(|span| span.tag)
    }

    fn join_lines<F>(&self, fmt_span: F) -> String
    where
        F: Fn(&StyledSpan) -> String,
    {
        self.lines
            .iter()
            .map(|line| line.iter().map(&fmt_span).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}

/// Renders samples; owns the severity thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dashboard {
    bands: SeverityBands,
}

impl Dashboard {
    pub fn new(config: &Config) -> Self {
        Self {
            bands: SeverityBands::from_config(config),
        }
    }

    pub fn bands(&self) -> &SeverityBands {
        &self.bands
    }

    pub fn render(&self, sample: &Sample, rate: Option<&RateSample>) -> StyledText {
        let cpu = self.bands.classify(sample.cpu_pct);
        let mem = self.bands.classify(sample.mem_pct);
        let disk = self.bands.classify(sample.disk_pct);

        let mut usage = vec![
            StyledSpan::tagged("CPU:", Tag::Severity(cpu)),
            StyledSpan::raw(format!("{:>5.1}%", sample.cpu_pct)),
            StyledSpan::tagged(" | MEM:", Tag::Severity(mem)),
            StyledSpan::raw(format!(
                "{:>5.1}% ({}/{})",
                sample.mem_pct,
                format_size(sample.mem_used_bytes(), BINARY),
                format_size(sample.mem_total_bytes, BINARY)
            )),
            StyledSpan::tagged(" | DISK:", Tag::Severity(disk)),
        ];

        if sample.disk_available() {
            usage.push(StyledSpan::raw(format!(
                "{}/{} ({:.1}%)",
                format_size(sample.disk_used_bytes, BINARY),
                format_size(sample.disk_total_bytes, BINARY),
                sample.disk_pct
            )));
        } else {
            usage.push(StyledSpan::tagged("Error", Tag::Severity(Severity::Error)));
        }

        let network = match rate {
            Some(rate) => vec![
                StyledSpan::raw("Net: ↑"),
                StyledSpan::tagged(format!("{:>6.1}", rate.sent_rate_kbps), Tag::Sent),
                StyledSpan::raw(" ↓"),
                StyledSpan::tagged(format!("{:>6.1}", rate.recv_rate_kbps), Tag::Recv),
                StyledSpan::raw(" kB/s"),
            ],
            None => vec![StyledSpan::tagged("Net: N/A", Tag::Dim)],
        };

        StyledText {
            lines: vec![usage, network],
        }
    }
}
