//! Add view widget - interactive entry form

use chrono::{Local, NaiveDate};
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
use crate::types::{NewEntry, SUGGESTED_CATEGORIES};

/// Highest plausible hours for a single day
const MAX_HOURS: f64 = 24.0;

const FIELD_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 10;

/// Which form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Category,
    Hours,
    Remarks,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Date => Field::Category,
            Field::Category => Field::Hours,
            Field::Hours => Field::Remarks,
            Field::Remarks => Field::Remarks,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Date => Field::Date,
            Field::Category => Field::Date,
            Field::Hours => Field::Category,
            Field::Remarks => Field::Hours,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::Category => "Category",
            Field::Hours => "Hours",
            Field::Remarks => "Remarks",
        }
    }
}

const FIELDS: [Field; 4] = [Field::Date, Field::Category, Field::Hours, Field::Remarks];

/// Outcome of a key fed to the form
#[derive(Debug, PartialEq)]
pub enum FormOutcome {
    /// Key consumed, nothing further to do
    Handled,
    /// All fields validated, caller should insert this entry
    Submit(NewEntry),
}

/// State for the entry form
#[derive(Debug)]
pub struct EntryForm {
    pub date: String,
    pub category: String,
    pub hours: String,
    pub remarks: String,
    pub focus: Field,
    pub error: Option<String>,
}

impl EntryForm {
    pub fn new() -> Self {
        Self {
            date: Local::now().date_naive().to_string(),
            category: String::new(),
            hours: String::new(),
            remarks: String::new(),
            focus: Field::Date,
            error: None,
        }
    }

    /// Clear all fields back to defaults
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn buffer_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Date => &mut self.date,
            Field::Category => &mut self.category,
            Field::Hours => &mut self.hours,
            Field::Remarks => &mut self.remarks,
        }
    }

    fn buffer(&self, field: Field) -> &str {
        match field {
            Field::Date => &self.date,
            Field::Category => &self.category,
            Field::Hours => &self.hours,
            Field::Remarks => &self.remarks,
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

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Enter advances focus, or submits from the last field
    pub fn confirm(&mut self) -> FormOutcome {
        if self.focus != Field::Remarks {
            self.focus = self.focus.next();
            return FormOutcome::Handled;
        }
        match self.validate() {
            Ok(entry) => FormOutcome::Submit(entry),
            Err(msg) => {
                self.error = Some(msg);
                FormOutcome::Handled
            }
        }
    }

    fn validate(&self) -> Result<NewEntry, String> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", self.date.trim()))?;

        let category = self.category.trim();
        if category.is_empty() {
            return Err("category must not be empty".to_string());
        }

        let hours: f64 = self
            .hours
            .trim()
            .parse()
            .map_err(|_| format!("invalid hours '{}'", self.hours.trim()))?;
        if !(0.0..=MAX_HOURS).contains(&hours) {
            return Err(format!("hours must be between 0 and {}", MAX_HOURS));
        }

        Ok(NewEntry::new(date, category, hours).with_remarks(self.remarks.trim()))
    }
}

impl Default for EntryForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Add view widget
pub struct AddView<'a> {
    form: &'a EntryForm,
    theme: Theme,
}

impl<'a> AddView<'a> {
    pub fn new(form: &'a EntryForm, theme: Theme) -> Self {
        Self { form, theme }
    }
}

impl Widget for AddView<'_> {
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
            Constraint::Length(8), // Form fields
            Constraint::Length(1), // Error / hint
            Constraint::Length(1), // Blank
            Constraint::Length(1), // Suggestions
            Constraint::Fill(1),
        ])
        .split(centered_area);

        TabBar::new(Tab::Add, self.theme).render(chunks[1], buf);

        let sep = "─".repeat(chunks[2].width as usize);
        buf.set_string(
            chunks[2].x,
            chunks[2].y,
            &sep,
            Style::default().fg(self.theme.muted()),
        );

        self.render_fields(chunks[4], buf);
        self.render_message(chunks[5], buf);
        self.render_suggestions(chunks[7], buf);
    }
}

impl AddView<'_> {
    fn render_fields(&self, area: Rect, buf: &mut Buffer) {
        let form_width = (LABEL_WIDTH + 2 + FIELD_WIDTH) as u16;
        let x = area.x + area.width.saturating_sub(form_width) / 2;

        for (i, field) in FIELDS.iter().enumerate() {
            let y = area.y + (i as u16) * 2;
            if y >= area.y + area.height {
                break;
            }

            let focused = self.form.focus == *field;
            let label_style = if focused {
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted())
            };

            let value = self.form.buffer(*field);
            let cursor = if focused { "▏" } else { "" };
            let value_style = Style::default().fg(self.theme.text());

            let line = Line::from(vec![
                Span::styled(
                    format!("{:>width$}: ", field.label(), width = LABEL_WIDTH),
                    label_style,
                ),
                Span::styled(format!("{}{}", value, cursor), value_style),
            ]);
            buf.set_line(x, y, &line, area.width.saturating_sub(x - area.x));
        }
    }

    fn render_message(&self, area: Rect, buf: &mut Buffer) {
        let (text, color) = match &self.form.error {
            Some(msg) => (msg.clone(), self.theme.alert()),
            None => (
                "↑/↓ move   Enter next field, saves on Remarks   Esc clears".to_string(),
                self.theme.muted(),
            ),
        };
        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_suggestions(&self, area: Rect, buf: &mut Buffer) {
        let text = format!("Categories: {}", SUGGESTED_CATEGORIES.join(", "));
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(self.theme.muted()),
        )))
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}
