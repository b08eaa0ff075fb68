//! Analysis view widget - category breakdown, weekday pattern, recommendations

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::dashboard::{format_bar, MAX_CONTENT_WIDTH};
use super::tabs::{Tab, TabBar};
use crate::tui::theme::Theme;
use crate::types::SummaryReport;

const NAME_WIDTH: usize = 16;
const BAR_WIDTH: usize = 24;

/// Analysis view widget
pub struct AnalysisView<'a> {
    report: &'a SummaryReport,
    theme: Theme,
}

impl<'a> AnalysisView<'a> {
    pub fn new(report: &'a SummaryReport, theme: Theme) -> Self {
        Self { report, theme }
    }
}

impl Widget for AnalysisView<'_> {
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
            Constraint::Length(2), // Extremes
            Constraint::Length(1), // Blank
            Constraint::Fill(1),   // Columns
            Constraint::Length(1), // Blank
        ])
        .split(centered_area);

        TabBar::new(Tab::Analysis, self.theme).render(chunks[1], buf);

        let sep = "─".repeat(chunks[2].width as usize);
        buf.set_string(
            chunks[2].x,
            chunks[2].y,
            &sep,
            Style::default().fg(self.theme.muted()),
        );

        if self.report.entry_count == 0 {
            Paragraph::new(Line::from(Span::styled(
                "Nothing to analyze yet.",
                Style::default().fg(self.theme.muted()),
            )))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);
            return;
        }

        self.render_extremes(chunks[4], buf);

        let columns = Layout::horizontal([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(chunks[6]);

        self.render_categories(columns[0], buf);
        self.render_right_column(columns[1], buf);
    }
}

impl AnalysisView<'_> {
    fn render_extremes(&self, area: Rect, buf: &mut Buffer) {
        let mut lines = Vec::new();
        if let Some(high) = &self.report.highest_day {
            lines.push(Line::from(vec![
                Span::styled("Highest day  ", Style::default().fg(self.theme.muted())),
                Span::styled(
                    high.date.to_string(),
                    Style::default().fg(self.theme.date()),
                ),
                Span::styled(
                    format!("  {:.1} h", high.hours),
                    Style::default()
                        .fg(self.theme.alert())
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        if let Some(low) = &self.report.lowest_day {
            lines.push(Line::from(vec![
                Span::styled("Lowest day   ", Style::default().fg(self.theme.muted())),
                Span::styled(low.date.to_string(), Style::default().fg(self.theme.date())),
                Span::styled(
                    format!("  {:.1} h", low.hours),
                    Style::default()
                        .fg(self.theme.bar())
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_categories(&self, area: Rect, buf: &mut Buffer) {
        self.render_section_title("By Category", area, buf);

        let max_hours = self
            .report
            .categories
            .iter()
            .map(|c| c.hours)
            .fold(0.0f64, f64::max);

        let line_width = NAME_WIDTH + 2 + BAR_WIDTH + 2 + 12;
        let x = area.x + area.width.saturating_sub(line_width as u16) / 2;

        for (i, cat) in self.report.categories.iter().enumerate() {
            let y = area.y + 2 + i as u16;
            if y >= area.y + area.height {
                break;
            }

            let name: String = if cat.category.chars().count() > NAME_WIDTH {
                cat.category.chars().take(NAME_WIDTH - 1).collect::<String>() + "…"
            } else {
                cat.category.clone()
            };

            let spans = vec![
                Span::styled(
                    format!("{:<width$}", name, width = NAME_WIDTH),
                    Style::default().fg(self.theme.text()),
                ),
                Span::raw("  "),
                Span::styled(
                    format_bar(cat.hours, max_hours, BAR_WIDTH),
                    Style::default().fg(self.theme.stat_blue()),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:>5.1} h {:>5.1}%", cat.hours, cat.percentage),
                    Style::default().fg(self.theme.muted()),
                ),
            ];
            let line = Line::from(spans);
            buf.set_line(x, y, &line, area.width.saturating_sub(x - area.x));
        }
    }

    fn render_right_column(&self, area: Rect, buf: &mut Buffer) {
        let weekday_rows = self.report.weekday_pattern.len() as u16;
        let chunks = Layout::vertical([
            Constraint::Length(2 + weekday_rows),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(area);

        self.render_weekdays(chunks[0], buf);
        self.render_recommendations(chunks[2], buf);
    }

    fn render_weekdays(&self, area: Rect, buf: &mut Buffer) {
        self.render_section_title("Weekday Pattern", area, buf);

        let max_hours = self
            .report
            .weekday_pattern
            .iter()
            .map(|w| w.hours)
            .fold(0.0f64, f64::max);

        let line_width = 9 + 2 + BAR_WIDTH + 2 + 7;
        let x = area.x + area.width.saturating_sub(line_width as u16) / 2;

        for (i, day) in self.report.weekday_pattern.iter().enumerate() {
            let y = area.y + 2 + i as u16;
            if y >= area.y + area.height {
                break;
            }
            let spans = vec![
                Span::styled(
                    format!("{:<9}", day.weekday),
                    Style::default().fg(self.theme.date()),
                ),
                Span::raw("  "),
                Span::styled(
                    format_bar(day.hours, max_hours, BAR_WIDTH),
                    Style::default().fg(self.theme.stat_warm()),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:>5.1} h", day.hours),
                    Style::default().fg(self.theme.muted()),
                ),
            ];
            let line = Line::from(spans);
            buf.set_line(x, y, &line, area.width.saturating_sub(x - area.x));
        }
    }

    fn render_recommendations(&self, area: Rect, buf: &mut Buffer) {
        self.render_section_title("Recommendations", area, buf);

        let x = area.x + 2;
        for (i, rec) in self.report.recommendations.iter().enumerate() {
            let y = area.y + 2 + i as u16;
            if y >= area.y + area.height {
                break;
            }
            let line = Line::from(vec![
                Span::styled("• ", Style::default().fg(self.theme.accent())),
                Span::styled(rec.as_str(), Style::default().fg(self.theme.text())),
            ]);
            buf.set_line(x, y, &line, area.width.saturating_sub(2));
        }
    }

    fn render_section_title(&self, title: &str, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        Paragraph::new(Line::from(Span::styled(
            title,
            Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(
            Rect {
                height: 1,
                ..area
            },
            buf,
        );
    }
}
