//! Application state and event loop

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
    DefaultTerminal, Frame,
};

use crate::config::Config;
use crate::services::{Aggregator, Repository};
use crate::types::{EntryFilter, ScreenlogError, SummaryReport, UsageEntry};

use super::theme::Theme;
use super::widgets::{
    records::scroll_to_selection, AddView, AnalysisView, DashboardView, EntryForm, FilterForm,
    FormOutcome, HelpPopup, RecordsView, SettingsView, Tab,
};

/// Rows assumed visible in the records table for scroll math
const VISIBLE_ROWS: usize = 20;

/// Result of querying the database
pub enum DataState {
    /// Loaded entries and their summary
    Ready(Box<AppData>),
    /// Query failed, typically an uninitialized database
    Error(String),
}

/// Loaded application data
pub struct AppData {
    /// Entries shown on the Records tab, restricted by the active filter
    pub records: Vec<UsageEntry>,
    /// Summary over the full record set, independent of the filter
    pub report: SummaryReport,
}

/// Main application
pub struct App {
    repo: Repository,
    config: Config,
    theme: Theme,
    data: DataState,
    current_tab: Tab,
    records_selected: usize,
    records_scroll: usize,
    records_filter: EntryFilter,
    filter_form: Option<FilterForm>,
    form: EntryForm,
    show_help: bool,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(repo: Repository, config: Config, theme: Theme) -> Self {
        let mut app = Self {
            repo,
            config,
            theme,
            data: DataState::Error(String::new()),
            current_tab: Tab::default(),
            records_selected: 0,
            records_scroll: 0,
            records_filter: EntryFilter::all(),
            filter_form: None,
            form: EntryForm::new(),
            show_help: false,
            status: None,
            should_quit: false,
        };
        app.reload();
        app
    }

    /// Re-query the database and rebuild the summary
    fn reload(&mut self) {
        match self.load_data() {
            Ok(data) => {
                self.data = DataState::Ready(Box::new(data));
                self.clamp_selection();
            }
            Err(e) => {
                self.data = DataState::Error(format!(
                    "{} (press i on the Settings screen to initialize)",
                    e
                ));
            }
        }
    }

    /// The report always covers everything; the records listing narrows to
    /// the active date range
    fn load_data(&self) -> Result<AppData, ScreenlogError> {
        let entries = self.repo.list(&EntryFilter::all())?;
        let report = Aggregator::summarize(&entries, self.config.threshold_hours);
        let records = if self.records_filter == EntryFilter::all() {
            entries
        } else {
            self.repo.list(&self.records_filter)?
        };
        Ok(AppData { records, report })
    }

    fn record_count(&self) -> usize {
        match &self.data {
            DataState::Ready(data) => data.records.len(),
            DataState::Error(_) => 0,
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.record_count();
        if count == 0 {
            self.records_selected = 0;
            self.records_scroll = 0;
        } else {
            self.records_selected = self.records_selected.min(count - 1);
            self.records_scroll =
                scroll_to_selection(self.records_selected, self.records_scroll, VISIBLE_ROWS);
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else { return };
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        // The entry form owns most keys while it has focus
        if self.current_tab == Tab::Add {
            self.handle_form_key(key.code);
            return;
        }

        // Likewise the filter inputs while the date range is being edited
        if self.current_tab == Tab::Records && self.filter_form.is_some() {
            self.handle_filter_key(key.code);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.switch_tab(self.current_tab.next());
            }
            KeyCode::BackTab => {
                self.switch_tab(self.current_tab.prev());
            }
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                    self.switch_tab(tab);
                }
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Up | KeyCode::Char('k') if self.current_tab == Tab::Records => {
                self.records_selected = self.records_selected.saturating_sub(1);
                self.records_scroll =
                    scroll_to_selection(self.records_selected, self.records_scroll, VISIBLE_ROWS);
            }
            KeyCode::Down | KeyCode::Char('j') if self.current_tab == Tab::Records => {
                let count = self.record_count();
                if count > 0 {
                    self.records_selected = (self.records_selected + 1).min(count - 1);
                    self.records_scroll = scroll_to_selection(
                        self.records_selected,
                        self.records_scroll,
                        VISIBLE_ROWS,
                    );
                }
            }
            KeyCode::Char('x') if self.current_tab == Tab::Records => {
                self.delete_selected();
            }
            KeyCode::Char('f') if self.current_tab == Tab::Records => {
                self.filter_form = Some(FilterForm::new(&self.records_filter));
            }
            KeyCode::Char('a') if self.current_tab == Tab::Records => {
                if self.records_filter != EntryFilter::all() {
                    self.records_filter = EntryFilter::all();
                    self.status = Some("Showing all records".to_string());
                    self.reload();
                }
            }
            KeyCode::Char('i') if self.current_tab == Tab::Settings => {
                self.init_database();
            }
            KeyCode::Char('s') if self.current_tab == Tab::Settings => {
                self.load_demo_data();
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Tab => {
                self.switch_tab(self.current_tab.next());
            }
            KeyCode::BackTab => {
                self.switch_tab(self.current_tab.prev());
            }
            KeyCode::Esc => {
                self.form.reset();
            }
            KeyCode::Up => {
                self.form.focus_prev();
            }
            KeyCode::Down => {
                self.form.focus_next();
            }
            KeyCode::Backspace => {
                self.form.delete_char();
            }
            KeyCode::Enter => {
                if let FormOutcome::Submit(entry) = self.form.confirm() {
                    match self.repo.insert(&entry) {
                        Ok(id) => {
                            self.status = Some(format!("Saved entry #{}", id));
                            self.form.reset();
                            self.reload();
                        }
                        Err(e) => {
                            self.form.error = Some(e.to_string());
                        }
                    }
                }
            }
            KeyCode::Char(c) => {
                self.form.insert_char(c);
            }
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, code: KeyCode) {
        let Some(form) = self.filter_form.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.filter_form = None;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                form.toggle_focus();
            }
            KeyCode::Backspace => {
                form.delete_char();
            }
            KeyCode::Enter => match form.parse() {
                Ok(filter) => {
                    self.records_filter = filter;
                    self.filter_form = None;
                    self.records_selected = 0;
                    self.records_scroll = 0;
                    self.reload();
                }
                Err(msg) => {
                    form.error = Some(msg);
                }
            },
            KeyCode::Char(c) => {
                form.insert_char(c);
            }
            _ => {}
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        self.status = None;
    }

    fn delete_selected(&mut self) {
        let id = match &self.data {
            DataState::Ready(data) => match data.records.get(self.records_selected) {
                Some(entry) => entry.id,
                None => return,
            },
            DataState::Error(_) => return,
        };
        match self.repo.delete(id) {
            Ok(true) => {
                self.status = Some(format!("Deleted entry #{}", id));
                self.reload();
            }
            Ok(false) => {
                self.status = Some(format!("Entry #{} was already gone", id));
                self.reload();
            }
            Err(e) => {
                self.status = Some(format!("Delete failed: {}", e));
            }
        }
    }

    fn init_database(&mut self) {
        match self.repo.init_schema() {
            Ok(()) => {
                self.status = Some("Database initialized".to_string());
                self.reload();
            }
            Err(e) => {
                self.status = Some(format!("Init failed: {}", e));
            }
        }
    }

    fn load_demo_data(&mut self) {
        match self.repo.seed() {
            Ok(count) => {
                self.status = Some(format!("Inserted {} demo entries", count));
                self.reload();
            }
            Err(e) => {
                self.status = Some(format!("Demo data failed: {}", e));
            }
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match (&self.data, self.current_tab) {
            // Settings stays usable even when queries fail, so a fresh
            // database can be initialized from inside the dashboard
            (_, Tab::Settings) => {
                let error = match &self.data {
                    DataState::Error(msg) => Some(msg.as_str()),
                    DataState::Ready(_) => None,
                };
                SettingsView::new(&self.config, self.theme)
                    .with_status(self.status.as_deref())
                    .with_data_error(error)
                    .render(area, buf);
            }
            (_, Tab::Add) => {
                AddView::new(&self.form, self.theme).render(area, buf);
            }
            (DataState::Ready(data), Tab::Dashboard) => {
                DashboardView::new(&data.report, self.theme).render(area, buf);
            }
            (DataState::Ready(data), Tab::Records) => {
                RecordsView::new(
                    &data.records,
                    self.records_selected,
                    self.records_scroll,
                    self.theme,
                )
                .with_filter_form(self.filter_form.as_ref())
                .with_active_filter(self.records_filter)
                .render(area, buf);
            }
            (DataState::Ready(data), Tab::Analysis) => {
                AnalysisView::new(&data.report, self.theme).render(area, buf);
            }
            (DataState::Error(message), _) => {
                let y = area.y + area.height / 2;
                let text = format!("Error: {}", message);
                let x = area.x + (area.width.saturating_sub(text.len() as u16)) / 2;
                buf.set_string(x, y, &text, Style::default().fg(self.theme.alert()));
            }
        }

        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }
}

/// Run the TUI application
pub fn run(config: Config) -> anyhow::Result<()> {
    let repo = Repository::open(&config.db_path)?;
    // Query the terminal background before entering the alternate screen
    let theme = Theme::detect();

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, App::new(repo, config, theme));
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, mut app: App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        // No animations, so block until the next key
        let ev = event::read()?;
        app.handle_event(ev);
    }
    Ok(())
}
