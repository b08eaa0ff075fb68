//! Settings view widget - database info and maintenance actions

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::dashboard::MAX_CONTENT_WIDTH;
use super::tabs::{Tab, TabBar};
use crate::config::Config;
use crate::tui::theme::Theme;

/// Settings view widget
pub struct SettingsView<'a> {
    config: &'a Config,
    status: Option<&'a str>,
    data_error: Option<&'a str>,
    theme: Theme,
}

impl<'a> SettingsView<'a> {
    pub fn new(config: &'a Config, theme: Theme) -> Self {
        Self {
            config,
            status: None,
            data_error: None,
            theme,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }

    /// Show why data failed to load, typically an uninitialized database
    pub fn with_data_error(mut self, error: Option<&'a str>) -> Self {
        self.data_error = error;
        self
    }
}

impl Widget for SettingsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let chunks = Layout::vertical([
            Constraint::Length(1), // Top padding
            Constraint::Length(1), // Tabs
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Blank
            Constraint::Length(4), // Config values
            Constraint::Length(1), // Blank
            Constraint::Length(3), // Actions
            Constraint::Length(1), // Blank
            Constraint::Length(2), // Status / error
            Constraint::Fill(1),
        ])
        .split(centered_area);

        TabBar::new(Tab::Settings, self.theme).render(chunks[1], buf);

        let sep = "─".repeat(chunks[2].width as usize);
        buf.set_string(
            chunks[2].x,
            chunks[2].y,
            &sep,
            Style::default().fg(self.theme.muted()),
        );

        self.render_config(chunks[4], buf);
        self.render_actions(chunks[6], buf);
        self.render_status(chunks[8], buf);
    }
}

impl SettingsView<'_> {
    fn render_config(&self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(vec![
                Span::styled("Database    ", Style::default().fg(self.theme.muted())),
                Span::styled(
                    self.config.db_path.display().to_string(),
                    Style::default().fg(self.theme.text()),
                ),
            ]),
            Line::from(vec![
                Span::styled("Threshold   ", Style::default().fg(self.theme.muted())),
                Span::styled(
                    format!("{:.1} h / day", self.config.threshold_hours),
                    Style::default().fg(self.theme.stat_warm()),
                ),
            ]),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_actions(&self, area: Rect, buf: &mut Buffer) {
        let key = |k: &'static str| {
            Span::styled(
                k,
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            )
        };
        let desc = |d: &'static str| Span::styled(d, Style::default().fg(self.theme.text()));

        let lines = vec![
            Line::from(vec![key("i"), desc("  initialize database schema")]),
            Line::from(vec![key("s"), desc("  load demo data")]),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let mut lines = Vec::new();
        if let Some(err) = self.data_error {
            lines.push(Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(self.theme.alert()),
            )));
        }
        if let Some(status) = self.status {
            lines.push(Line::from(Span::styled(
                status.to_string(),
                Style::default().fg(self.theme.bar()),
            )));
        }
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
