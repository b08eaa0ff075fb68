//! Dashboard view widget - metric cards and the per-day usage chart

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::tabs::{Tab, TabBar};
use crate::tui::theme::Theme;
use crate::types::SummaryReport;

/// Maximum content width (keeps layout clean on wide terminals)
pub const MAX_CONTENT_WIDTH: u16 = 120;

/// Card dimensions
const CARD_WIDTH: u16 = 24;
const CARD_HEIGHT: u16 = 5;
const CARD_COUNT: usize = 4;

/// Bar chart geometry
const DATE_WIDTH: usize = 12;
const BAR_WIDTH: usize = 30;

/// Format an hours value for display
pub fn format_hours(hours: f64) -> String {
    format!("{:.1} h", hours)
}

/// Fill a fixed-width bar proportional to `value / max`.
/// Example: value=5, max=10, width=8 → "████░░░░"
pub fn format_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || width == 0 {
        return "░".repeat(width);
    }
    let ratio = (value / max).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let filled = if value > 0.0 { filled.max(1) } else { filled };
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Dashboard view widget
pub struct DashboardView<'a> {
    report: &'a SummaryReport,
    theme: Theme,
}

impl<'a> DashboardView<'a> {
    pub fn new(report: &'a SummaryReport, theme: Theme) -> Self {
        Self { report, theme }
    }
}

impl Widget for DashboardView<'_> {
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
            Constraint::Length(1),           // Top padding
            Constraint::Length(1),           // Tabs
            Constraint::Length(1),           // Separator
            Constraint::Length(CARD_HEIGHT), // Metric cards
            Constraint::Length(1),           // Alert line
            Constraint::Length(1),           // Blank
            Constraint::Length(1),           // Chart title
            Constraint::Fill(1),             // Daily bars
        ])
        .split(centered_area);

        TabBar::new(Tab::Dashboard, self.theme).render(chunks[1], buf);
        self.render_separator(chunks[2], buf);
        self.render_cards(chunks[3], buf);
        self.render_alert_line(chunks[4], buf);
        self.render_chart_title(chunks[6], buf);
        self.render_daily_bars(chunks[7], buf);
    }
}

impl DashboardView<'_> {
    fn render_separator(&self, area: Rect, buf: &mut Buffer) {
        let line = "─".repeat(area.width as usize);
        buf.set_string(
            area.x,
            area.y,
            &line,
            Style::default().fg(self.theme.muted()),
        );
    }

    fn build_cards(&self) -> [MetricCard; CARD_COUNT] {
        let avg = self.report.average_per_day;
        let avg_color = if avg > self.report.threshold_hours {
            self.theme.alert()
        } else {
            self.theme.bar()
        };

        [
            MetricCard {
                title: "Total Hours",
                value: format_hours(self.report.total_hours),
                color: self.theme.stat_warm(),
            },
            MetricCard {
                title: "Entries",
                value: self.report.entry_count.to_string(),
                color: self.theme.stat_blue(),
            },
            MetricCard {
                title: "Avg / Day",
                value: format_hours(avg),
                color: avg_color,
            },
            MetricCard {
                title: "Days Tracked",
                value: self.report.distinct_days.to_string(),
                color: self.theme.date(),
            },
        ]
    }

    fn render_cards(&self, area: Rect, buf: &mut Buffer) {
        let cards = self.build_cards();

        let total_width = CARD_COUNT as u16 * CARD_WIDTH + (CARD_COUNT as u16 - 1) * 2;
        let start_x = area.x + (area.width.saturating_sub(total_width)) / 2;

        for (i, card) in cards.iter().enumerate() {
            let card_x = start_x + i as u16 * (CARD_WIDTH + 2);
            if card_x + CARD_WIDTH > area.x + area.width {
                break;
            }
            let card_area = Rect {
                x: card_x,
                y: area.y,
                width: CARD_WIDTH,
                height: CARD_HEIGHT.min(area.height),
            };
            render_card(card_area, buf, card);
        }
    }

    fn render_alert_line(&self, area: Rect, buf: &mut Buffer) {
        let count = self.report.alert_days.len();
        let (text, color) = if self.report.distinct_days == 0 {
            (
                "No data yet. Add entries or load demo data in Settings.".to_string(),
                self.theme.muted(),
            )
        } else if count == 0 {
            (
                format!(
                    "No days over the {:.1} h threshold.",
                    self.report.threshold_hours
                ),
                self.theme.bar(),
            )
        } else {
            (
                format!(
                    "{} day(s) exceeded the {:.1} h threshold!",
                    count, self.report.threshold_hours
                ),
                self.theme.alert(),
            )
        };

        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_chart_title(&self, area: Rect, buf: &mut Buffer) {
        if self.report.daily.is_empty() {
            return;
        }
        Paragraph::new(Line::from(Span::styled(
            "Daily Screen Time",
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(area, buf);
    }

    fn render_daily_bars(&self, area: Rect, buf: &mut Buffer) {
        if self.report.daily.is_empty() {
            return;
        }

        let max_hours = self
            .report
            .daily
            .iter()
            .map(|d| d.hours)
            .fold(0.0f64, f64::max);

        // Show the most recent days that fit
        let visible = area.height as usize;
        let days = if self.report.daily.len() > visible {
            &self.report.daily[self.report.daily.len() - visible..]
        } else {
            &self.report.daily[..]
        };

        let line_width = DATE_WIDTH + 2 + BAR_WIDTH + 2 + 8;
        let x_offset = area.width.saturating_sub(line_width as u16) / 2;

        for (i, day) in days.iter().enumerate() {
            let y = area.y + i as u16;
            if y >= area.y + area.height {
                break;
            }

            let over = day.hours > self.report.threshold_hours;
            let bar_color = if over { self.theme.alert() } else { self.theme.bar() };

            let bar = format_bar(day.hours, max_hours, BAR_WIDTH);
            let spans = vec![
                Span::styled(
                    format!("{:<width$}", day.date.to_string(), width = DATE_WIDTH),
                    Style::default().fg(self.theme.date()),
                ),
                Span::raw("  "),
                Span::styled(bar, Style::default().fg(bar_color)),
                Span::raw("  "),
                Span::styled(
                    format!("{:>5.1} h", day.hours),
                    Style::default().fg(self.theme.text()),
                ),
            ];

            let line = Line::from(spans);
            buf.set_line(area.x + x_offset, y, &line, area.width - x_offset);
        }
    }
}

struct MetricCard {
    title: &'static str,
    value: String,
    color: Color,
}

fn render_card(area: Rect, buf: &mut Buffer, card: &MetricCard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(card.color));
    block.render(area, buf);

    if area.height > 2 {
        let title_x = area.x + (area.width.saturating_sub(card.title.len() as u16)) / 2;
        buf.set_string(
            title_x,
            area.y + 1,
            card.title,
            Style::default().fg(card.color),
        );
    }

    if area.height > 3 {
        let value_x = area.x + (area.width.saturating_sub(card.value.len() as u16)) / 2;
        buf.set_string(
            value_x,
            area.y + 3,
            &card.value,
            Style::default()
                .fg(card.color)
                .add_modifier(Modifier::BOLD),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== format helpers ==========

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(0.0), "0.0 h");
        assert_eq!(format_hours(2.55), "2.5 h");
        assert_eq!(format_hours(12.0), "12.0 h");
    }

    #[test]
    fn test_format_bar_half() {
        assert_eq!(format_bar(5.0, 10.0, 8), "████░░░░");
    }

    #[test]
    fn test_format_bar_zero_value() {
        assert_eq!(format_bar(0.0, 10.0, 4), "░░░░");
    }

    #[test]
    fn test_format_bar_zero_max() {
        assert_eq!(format_bar(1.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn test_format_bar_small_value_still_visible() {
        // Nonzero values always show at least one filled cell
        assert_eq!(format_bar(0.01, 100.0, 8), "█░░░░░░░");
    }

    #[test]
    fn test_format_bar_clamps_overflow() {
        assert_eq!(format_bar(20.0, 10.0, 4), "████");
    }

    // ========== card building ==========

    #[test]
    fn test_builds_four_cards() {
        let report = SummaryReport {
            total_hours: 22.5,
            entry_count: 10,
            distinct_days: 5,
            average_per_day: 4.5,
            threshold_hours: 6.0,
            ..Default::default()
        };
        let view = DashboardView::new(&report, Theme::Dark);
        let cards = view.build_cards();

        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].value, "22.5 h");
        assert_eq!(cards[1].value, "10");
        assert_eq!(cards[2].value, "4.5 h");
        assert_eq!(cards[3].value, "5");
    }

    #[test]
    fn test_avg_card_turns_alert_over_threshold() {
        let report = SummaryReport {
            average_per_day: 7.0,
            threshold_hours: 6.0,
            ..Default::default()
        };
        let view = DashboardView::new(&report, Theme::Dark);
        let cards = view.build_cards();
        assert_eq!(cards[2].color, Theme::Dark.alert());
    }
}
