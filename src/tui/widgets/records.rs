//! Records view widget - scrollable table of logged entries with an
//! optional date-range filter

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::dashboard::MAX_CONTENT_WIDTH;
use super::tabs::{Tab, TabBar};
use crate::tui::theme::Theme;
use crate::types::{EntryFilter, UsageEntry};

/// Column widths
const ID_WIDTH: usize = 6;
const DATE_WIDTH: usize = 12;
const CATEGORY_WIDTH: usize = 16;
const HOURS_WIDTH: usize = 7;
const REMARKS_WIDTH: usize = 36;

/// Which filter input has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    From,
    To,
}

/// State for the date-range filter inputs.
///
/// Both bounds are optional; an empty input leaves that side unbounded.
#[derive(Debug, Default)]
pub struct FilterForm {
    pub from: String,
    pub to: String,
    pub focus: FilterField,
    pub error: Option<String>,
}

impl FilterForm {
    /// Start editing, prefilled with the currently applied filter
    pub fn new(current: &EntryFilter) -> Self {
        Self {
            from: current.from.map(|d| d.to_string()).unwrap_or_default(),
            to: current.to.map(|d| d.to_string()).unwrap_or_default(),
            focus: FilterField::From,
            error: None,
        }
    }

    fn buffer_mut(&mut self) -> &mut String {
        match self.focus {
            FilterField::From => &mut self.from,
            FilterField::To => &mut self.to,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.error = None;
        self.buffer_mut().push(c);
    }

    pub fn delete_char(&mut self) {
        self.error = None;
        self.buffer_mut().pop();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FilterField::From => FilterField::To,
            FilterField::To => FilterField::From,
        };
    }

    /// Parse both inputs into a filter; empty inputs mean unbounded
    pub fn parse(&self) -> Result<EntryFilter, String> {
        let from = parse_bound(&self.from)?;
        let to = parse_bound(&self.to)?;
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err("range start is after its end".to_string());
            }
        }
        Ok(EntryFilter { from, to })
    }
}

fn parse_bound(raw: &str) -> Result<Option<NaiveDate>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| format!("invalid date '{raw}', expected YYYY-MM-DD"))
}

/// Records view widget
pub struct RecordsView<'a> {
    entries: &'a [UsageEntry],
    selected: usize,
    scroll_offset: usize,
    filter_form: Option<&'a FilterForm>,
    active_filter: EntryFilter,
    theme: Theme,
}

impl<'a> RecordsView<'a> {
    pub fn new(entries: &'a [UsageEntry], selected: usize, scroll_offset: usize, theme: Theme) -> Self {
        Self {
            entries,
            selected,
            scroll_offset,
            filter_form: None,
            active_filter: EntryFilter::all(),
            theme,
        }
    }

    /// Show the filter inputs while the range is being edited
    pub fn with_filter_form(mut self, form: Option<&'a FilterForm>) -> Self {
        self.filter_form = form;
        self
    }

    pub fn with_active_filter(mut self, filter: EntryFilter) -> Self {
        self.active_filter = filter;
        self
    }
}

impl Widget for RecordsView<'_> {
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
            Constraint::Length(1), // Filter line
            Constraint::Length(1), // Header row
            Constraint::Fill(1),   // Table rows
            Constraint::Length(1), // Footer
        ])
        .split(centered_area);

        TabBar::new(Tab::Records, self.theme).render(chunks[1], buf);
        self.render_separator(chunks[2], buf);
        self.render_filter_line(chunks[3], buf);

        if self.entries.is_empty() {
            self.render_empty(chunks[5], buf);
            return;
        }

        self.render_header(chunks[4], buf);
        self.render_rows(chunks[5], buf);
        self.render_footer(chunks[6], buf);
    }
}

impl RecordsView<'_> {
    fn table_x(&self, area: Rect) -> u16 {
        let table_width = 2 + ID_WIDTH + DATE_WIDTH + CATEGORY_WIDTH + HOURS_WIDTH + REMARKS_WIDTH + 8;
        area.x + area.width.saturating_sub(table_width as u16) / 2
    }

    fn render_separator(&self, area: Rect, buf: &mut Buffer) {
        let line = "─".repeat(area.width as usize);
        buf.set_string(
            area.x,
            area.y,
            &line,
            Style::default().fg(self.theme.muted()),
        );
    }

    fn render_filter_line(&self, area: Rect, buf: &mut Buffer) {
        if let Some(form) = self.filter_form {
            let field = |label: &'static str, value: &str, focused: bool| {
                let label_style = if focused {
                    Style::default()
                        .fg(self.theme.accent())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.muted())
                };
                let cursor = if focused { "▏" } else { "" };
                vec![
                    Span::styled(label, label_style),
                    Span::styled(
                        format!("{}{}", value, cursor),
                        Style::default().fg(self.theme.text()),
                    ),
                ]
            };

            let mut spans = field("From: ", &form.from, form.focus == FilterField::From);
            spans.push(Span::raw("   "));
            spans.extend(field("To: ", &form.to, form.focus == FilterField::To));
            spans.push(Span::raw("   "));
            match &form.error {
                Some(err) => spans.push(Span::styled(
                    err.clone(),
                    Style::default().fg(self.theme.alert()),
                )),
                None => spans.push(Span::styled(
                    "↑/↓ switch   Enter apply   Esc cancel",
                    Style::default().fg(self.theme.muted()),
                )),
            }

            Paragraph::new(Line::from(spans))
                .alignment(Alignment::Center)
                .render(area, buf);
        } else if self.active_filter != EntryFilter::all() {
            let text = format!(
                "Showing {} to {}   (a shows all)",
                bound_label(self.active_filter.from),
                bound_label(self.active_filter.to),
            );
            Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().fg(self.theme.accent()),
            )))
            .alignment(Alignment::Center)
            .render(area, buf);
        }
    }

    fn render_empty(&self, area: Rect, buf: &mut Buffer) {
        let text = if self.active_filter != EntryFilter::all() {
            "No entries in the selected range. Press a to show all."
        } else {
            "No entries logged. Press Tab to reach the Add screen."
        };
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(self.theme.muted()),
        )))
        .alignment(Alignment::Center)
        .render(area, buf);
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let header = format!(
            "  {:<id$}  {:<date$}  {:<cat$}  {:>hrs$}  {:<rem$}",
            "ID",
            "Date",
            "Category",
            "Hours",
            "Remarks",
            id = ID_WIDTH,
            date = DATE_WIDTH,
            cat = CATEGORY_WIDTH,
            hrs = HOURS_WIDTH,
            rem = REMARKS_WIDTH,
        );
        buf.set_string(
            self.table_x(area),
            area.y,
            &header,
            Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD),
        );
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        let visible = area.height as usize;
        let x = self.table_x(area);

        for (row, idx) in (self.scroll_offset..self.entries.len()).take(visible).enumerate() {
            let entry = &self.entries[idx];
            let y = area.y + row as u16;
            let is_selected = idx == self.selected;

            let marker = if is_selected { "▸ " } else { "  " };
            let remarks = truncate(&entry.remarks, REMARKS_WIDTH);
            let category = truncate(&entry.category, CATEGORY_WIDTH);

            let row_style = if is_selected {
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.text())
            };

            let spans = vec![
                Span::styled(marker, Style::default().fg(self.theme.accent())),
                Span::styled(
                    format!("{:<width$}", entry.id, width = ID_WIDTH),
                    Style::default().fg(self.theme.muted()),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:<width$}", entry.date.to_string(), width = DATE_WIDTH),
                    Style::default().fg(self.theme.date()),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:<width$}", category, width = CATEGORY_WIDTH),
                    row_style,
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:>width$.1}", entry.hours, width = HOURS_WIDTH),
                    Style::default().fg(self.theme.stat_warm()),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:<width$}", remarks, width = REMARKS_WIDTH),
                    Style::default().fg(self.theme.muted()),
                ),
            ];

            let line = Line::from(spans);
            buf.set_line(x, y, &line, area.width.saturating_sub(x - area.x));
        }
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let text = format!(
            "{} entries   ↑/↓ select   x delete   f filter",
            self.entries.len()
        );
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(self.theme.muted()),
        )))
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}

fn bound_label(bound: Option<NaiveDate>) -> String {
    match bound {
        Some(date) => date.to_string(),
        None => "start".to_string(),
    }
}

/// Truncate a string to `max` display characters, adding an ellipsis
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Clamp a scroll offset so the selected row stays visible
pub fn scroll_to_selection(selected: usize, scroll_offset: usize, visible: usize) -> usize {
    if visible == 0 {
        return scroll_offset;
    }
    if selected < scroll_offset {
        selected
    } else if selected >= scroll_offset + visible {
        selected + 1 - visible
    } else {
        scroll_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_truncate_exact_length_unchanged() {
        assert_eq!(truncate("abcde", 5), "abcde");
    }

    #[test]
    fn test_scroll_keeps_selection_above() {
        // Selection moved above the window, scroll up to it
        assert_eq!(scroll_to_selection(2, 5, 10), 2);
    }

    #[test]
    fn test_scroll_keeps_selection_below() {
        // Selection moved past the bottom, scroll down just enough
        assert_eq!(scroll_to_selection(15, 0, 10), 6);
    }

    #[test]
    fn test_scroll_unchanged_when_visible() {
        assert_eq!(scroll_to_selection(5, 3, 10), 3);
    }

    #[test]
    fn test_scroll_zero_height() {
        assert_eq!(scroll_to_selection(5, 3, 0), 3);
    }

    // ========== filter form ==========

    #[test]
    fn test_filter_empty_inputs_mean_show_all() {
        let form = FilterForm::new(&EntryFilter::all());
        assert_eq!(form.parse().unwrap(), EntryFilter::all());
    }

    #[test]
    fn test_filter_parses_both_bounds() {
        let mut form = FilterForm::new(&EntryFilter::all());
        form.from = "2025-11-01".to_string();
        form.to = "2025-11-30".to_string();

        let filter = form.parse().unwrap();
        assert_eq!(filter.from.unwrap().to_string(), "2025-11-01");
        assert_eq!(filter.to.unwrap().to_string(), "2025-11-30");
    }

    #[test]
    fn test_filter_open_ended_range() {
        let mut form = FilterForm::new(&EntryFilter::all());
        form.from = "2025-11-02".to_string();

        let filter = form.parse().unwrap();
        assert!(filter.from.is_some());
        assert!(filter.to.is_none());
    }

    #[test]
    fn test_filter_rejects_bad_date() {
        let mut form = FilterForm::new(&EntryFilter::all());
        form.from = "last week".to_string();
        assert!(form.parse().unwrap_err().contains("invalid date"));
    }

    #[test]
    fn test_filter_rejects_inverted_range() {
        let mut form = FilterForm::new(&EntryFilter::all());
        form.from = "2025-11-30".to_string();
        form.to = "2025-11-01".to_string();
        assert!(form.parse().is_err());
    }

    #[test]
    fn test_filter_prefills_from_active_filter() {
        let filter = EntryFilter::between(
            "2025-11-01".parse().unwrap(),
            "2025-11-05".parse().unwrap(),
        );
        let form = FilterForm::new(&filter);
        assert_eq!(form.from, "2025-11-01");
        assert_eq!(form.to, "2025-11-05");
    }

    #[test]
    fn test_filter_typing_follows_focus() {
        let mut form = FilterForm::new(&EntryFilter::all());
        form.insert_char('2');
        form.toggle_focus();
        form.insert_char('3');
        assert_eq!(form.from, "2");
        assert_eq!(form.to, "3");
        form.delete_char();
        assert!(form.to.is_empty());
    }
}
