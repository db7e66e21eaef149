//! Full-screen job browser.
//!
//! Layout: a filter sidebar on the left, the current page of jobs on the
//! right, a one-line status bar at the bottom. Key bindings:
//!
//! - `j`/`k` select, `n`/`p` (or `→`/`←`) page, `g`/`G` first/last page
//! - `/` edit the keyword, `f` focus the filter sidebar, `x` reset filters
//! - `a` add, `e`/Enter edit, `d` delete, `s` scrape, `r` reload, `q` quit
//!
//! Keyword edits are applied once the keyword has been stable for
//! [`KEYWORD_SETTLE`]; every other filter or page change queries at once.

use super::form_dialog::{FormAction, FormDialog, render_form_modal};
use super::text::{char_len, edit_single_line, with_cursor};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use jobdeck_core::api::JobsApi;
use jobdeck_core::filter::{COUNTRY_CHOICES, FilterUpdate, TAG_CHOICES};
use jobdeck_core::form::FlashKind;
use jobdeck_core::list::{ListStatus, SCRAPE_RUNNING};
use jobdeck_core::model::JobRecord;
use jobdeck_core::session::Session;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use std::time::{Duration, Instant};
use tracing::debug;

/// How long the keyword must stay unchanged before it is queried.
pub const KEYWORD_SETTLE: Duration = Duration::from_millis(300);

const STATUS_TTL: Duration = Duration::from_secs(3);
const SIDEBAR_WIDTH: u16 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Keyword,
    Filters,
    JobType,
    Form,
    ConfirmDelete,
}

/// Focusable rows of the filter sidebar, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarRow {
    Country(usize),
    Tag(usize),
    JobType,
    Sort,
}

impl SidebarRow {
    fn all() -> Vec<Self> {
        (0..COUNTRY_CHOICES.len())
            .map(Self::Country)
            .chain((0..TAG_CHOICES.len()).map(Self::Tag))
            .chain([Self::JobType, Self::Sort])
            .collect()
    }

    fn next(self) -> Self {
        let rows = Self::all();
        let idx = rows.iter().position(|r| *r == self).unwrap_or(0);
        rows[(idx + 1) % rows.len()]
    }

    fn prev(self) -> Self {
        let rows = Self::all();
        let idx = rows.iter().position(|r| *r == self).unwrap_or(0);
        rows[(idx + rows.len() - 1) % rows.len()]
    }
}

/// Work that must run after the next frame is drawn, so the user sees the
/// progress message first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    Scrape,
}

pub struct Browser<A> {
    session: Session<A>,
    input_mode: InputMode,
    table_state: TableState,
    keyword_buf: String,
    keyword_cursor: usize,
    keyword_edited_at: Option<Instant>,
    sidebar: SidebarRow,
    job_type_buf: String,
    job_type_cursor: usize,
    form_dialog: Option<FormDialog>,
    pending_delete: Option<JobRecord>,
    deferred: Option<Deferred>,
    status_msg: Option<(String, Instant)>,
    should_quit: bool,
}

impl<A: JobsApi> Browser<A> {
    /// Wrap a session and load the first page.
    pub fn new(session: Session<A>) -> Self {
        let mut browser = Self {
            session,
            input_mode: InputMode::Normal,
            table_state: TableState::default(),
            keyword_buf: String::new(),
            keyword_cursor: 0,
            keyword_edited_at: None,
            sidebar: SidebarRow::Country(0),
            job_type_buf: String::new(),
            job_type_cursor: 0,
            form_dialog: None,
            pending_delete: None,
            deferred: None,
            status_msg: None,
            should_quit: false,
        };
        browser.reload();
        browser
    }

    pub const fn session(&self) -> &Session<A> {
        &self.session
    }

    pub const fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn selected_job(&self) -> Option<&JobRecord> {
        self.table_state
            .selected()
            .and_then(|idx| self.session.list().jobs().get(idx))
    }

    pub fn set_status(&mut self, msg: impl Into<String>, now: Instant) {
        self.status_msg = Some((msg.into(), now));
    }

    fn reload(&mut self) {
        if let Err(err) = self.session.load() {
            debug!(error = %err, "reload failed");
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.session.list().jobs().len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            let idx = self.table_state.selected().unwrap_or(0).min(len - 1);
            self.table_state.select(Some(idx));
        }
    }

    fn after_query(&mut self, changed: bool) {
        if changed {
            self.table_state.select(Some(0));
        }
        self.clamp_selection();
    }

    fn apply_filter(&mut self, update: FilterUpdate) {
        let changed = match self.session.apply_filter(update) {
            Ok(changed) => changed,
            Err(err) => {
                debug!(error = %err, "filter query failed");
                true
            }
        };
        self.after_query(changed);
    }

    // -----------------------------------------------------------------------
    // Clock-driven work
    // -----------------------------------------------------------------------

    /// Apply a settled keyword and expire timed messages.
    pub fn tick(&mut self, now: Instant) {
        if let Some(edited_at) = self.keyword_edited_at
            && now.saturating_duration_since(edited_at) >= KEYWORD_SETTLE
        {
            self.commit_keyword();
        }
        self.session.tick(now);
        if let Some((_, at)) = self.status_msg
            && now.saturating_duration_since(at) >= STATUS_TTL
        {
            self.status_msg = None;
        }
    }

    /// Time until the pending keyword settles, for the event poll timeout.
    pub fn keyword_deadline(&self, now: Instant) -> Option<Duration> {
        self.keyword_edited_at
            .map(|at| KEYWORD_SETTLE.saturating_sub(now.saturating_duration_since(at)))
    }

    pub const fn has_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Run work queued by the last key press.
    pub fn run_deferred(&mut self, now: Instant) {
        match self.deferred.take() {
            Some(Deferred::Scrape) => {
                if let Err(err) = self.session.scrape() {
                    debug!(error = %err, "scrape failed");
                }
                self.after_query(true);
                if let Some(message) = self.session.list().scrape_message() {
                    let message = message.to_string();
                    self.set_status(message, now);
                }
            }
            None => {}
        }
    }

    fn commit_keyword(&mut self) {
        self.keyword_edited_at = None;
        if self.session.list().filters().keyword != self.keyword_buf {
            self.apply_filter(FilterUpdate::Keyword(self.keyword_buf.clone()));
        }
    }

    // -----------------------------------------------------------------------
    // Keys
    // -----------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.handle_key_at(key, Instant::now());
    }

    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key, now),
            InputMode::Keyword => self.handle_keyword_key(key, now),
            InputMode::Filters => self.handle_filters_key(key),
            InputMode::JobType => self.handle_job_type_key(key),
            InputMode::Form => self.handle_form_key(key, now),
            InputMode::ConfirmDelete => self.handle_confirm_delete_key(key, now),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,

            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),

            KeyCode::Char('n' | 'l') | KeyCode::Right | KeyCode::PageDown => {
                let moved = self.session.next_page().unwrap_or(true);
                self.after_query(moved);
            }
            KeyCode::Char('p' | 'h') | KeyCode::Left | KeyCode::PageUp => {
                let moved = self.session.prev_page().unwrap_or(true);
                self.after_query(moved);
            }
            KeyCode::Char('g') | KeyCode::Home => {
                let moved = self.session.go_to_page(1).unwrap_or(true);
                self.after_query(moved);
            }
            KeyCode::Char('G') | KeyCode::End => {
                let last = self.session.list().pagination().last_page();
                let moved = self.session.go_to_page(last).unwrap_or(true);
                self.after_query(moved);
            }

            KeyCode::Char('/') => {
                self.keyword_buf
                    .clone_from(&self.session.list().filters().keyword);
                self.keyword_cursor = char_len(&self.keyword_buf);
                self.input_mode = InputMode::Keyword;
            }
            KeyCode::Char('f') => self.input_mode = InputMode::Filters,
            KeyCode::Char('x') => {
                self.keyword_buf.clear();
                self.keyword_edited_at = None;
                self.apply_filter(FilterUpdate::Reset);
            }
            KeyCode::Char('r') => self.reload(),

            KeyCode::Char('a') => {
                self.session.open_for_create();
                self.form_dialog = Some(FormDialog::new(self.session.form().draft()));
                self.input_mode = InputMode::Form;
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(job) = self.selected_job().cloned() {
                    self.session.open_for_edit(job);
                    self.form_dialog = Some(FormDialog::new(self.session.form().draft()));
                    self.input_mode = InputMode::Form;
                }
            }
            KeyCode::Char('d') => {
                if let Some(job) = self.selected_job().cloned() {
                    self.pending_delete = Some(job);
                    self.input_mode = InputMode::ConfirmDelete;
                }
            }
            KeyCode::Char('s') => {
                if self.session.list().scraping() || self.deferred.is_some() {
                    self.set_status("A scrape is already running", now);
                } else {
                    self.deferred = Some(Deferred::Scrape);
                }
            }
            KeyCode::Esc => {
                self.session.dismiss_messages();
                self.status_msg = None;
            }
            _ => {}
        }
    }

    fn handle_keyword_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Enter => {
                self.commit_keyword();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Esc => {
                self.keyword_buf
                    .clone_from(&self.session.list().filters().keyword);
                self.keyword_edited_at = None;
                self.input_mode = InputMode::Normal;
            }
            _ => {
                if edit_single_line(&mut self.keyword_buf, &mut self.keyword_cursor, key) {
                    self.keyword_edited_at = Some(now);
                }
            }
        }
    }

    fn handle_filters_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('f' | 'q') => self.input_mode = InputMode::Normal,
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => self.sidebar = self.sidebar.next(),
            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => {
                self.sidebar = self.sidebar.prev();
            }
            KeyCode::Char('x') => {
                self.keyword_buf.clear();
                self.keyword_edited_at = None;
                self.apply_filter(FilterUpdate::Reset);
            }
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                self.activate_sidebar_row(true, key.code == KeyCode::Enter);
            }
            KeyCode::Left | KeyCode::Char('h') => self.activate_sidebar_row(false, false),
            _ => {}
        }
    }

    fn activate_sidebar_row(&mut self, forward: bool, enter: bool) {
        match self.sidebar {
            SidebarRow::Country(idx) => {
                self.apply_filter(FilterUpdate::ToggleCountry(COUNTRY_CHOICES[idx].to_string()));
            }
            SidebarRow::Tag(idx) => {
                self.apply_filter(FilterUpdate::ToggleTag(TAG_CHOICES[idx].to_string()));
            }
            SidebarRow::JobType => {
                if enter || forward {
                    self.job_type_buf
                        .clone_from(&self.session.list().filters().job_type);
                    self.job_type_cursor = char_len(&self.job_type_buf);
                    self.input_mode = InputMode::JobType;
                }
            }
            SidebarRow::Sort => {
                let current = self.session.list().filters().sort;
                let sort = if forward { current.next() } else { current.prev() };
                self.apply_filter(FilterUpdate::Sort(sort));
            }
        }
    }

    fn handle_job_type_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let job_type = self.job_type_buf.trim().to_string();
                self.input_mode = InputMode::Filters;
                self.apply_filter(FilterUpdate::JobType(job_type));
            }
            KeyCode::Esc => self.input_mode = InputMode::Filters,
            _ => {
                edit_single_line(&mut self.job_type_buf, &mut self.job_type_cursor, key);
            }
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(dialog) = self.form_dialog.as_mut() else {
            self.input_mode = InputMode::Normal;
            return;
        };

        match dialog.handle_key(self.session.form_mut().draft_mut(), key) {
            FormAction::None => {}
            FormAction::Cancel => {
                self.session.close_form();
                self.session.form_mut().dismiss_message();
                self.form_dialog = None;
                self.input_mode = InputMode::Normal;
            }
            FormAction::Submit => {
                if self.session.submit_form(now).is_ok() {
                    self.form_dialog = None;
                    self.input_mode = InputMode::Normal;
                    self.clamp_selection();
                }
            }
        }
    }

    fn handle_confirm_delete_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('y' | 'Y') => {
                self.input_mode = InputMode::Normal;
                if let Some(job) = self.pending_delete.take() {
                    match self.session.delete(&job.id) {
                        Ok(()) => self.set_status(format!("Deleted {}", job.display_title()), now),
                        Err(err) => self.set_status(format!("Delete failed: {err}"), now),
                    }
                    self.clamp_selection();
                }
            }
            KeyCode::Char('n' | 'N' | 'q') | KeyCode::Esc => {
                self.pending_delete = None;
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn select_next(&mut self) {
        let len = self.session.list().jobs().len();
        if len == 0 {
            return;
        }
        let idx = self.table_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.table_state.select(Some(idx));
    }

    fn select_prev(&mut self) {
        if self.session.list().jobs().is_empty() {
            return;
        }
        let idx = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(idx));
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    pub fn render(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        frame.render_widget(Paragraph::new(self.header_line()), chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(chunks[1]);

        self.render_sidebar(frame, body[0]);
        self.render_table(frame, body[1]);
        frame.render_widget(Paragraph::new(self.status_line()), chunks[2]);

        match self.input_mode {
            InputMode::Form => {
                if let Some(dialog) = &self.form_dialog {
                    render_form_modal(frame, self.session.form(), dialog, area);
                }
            }
            InputMode::ConfirmDelete => self.render_confirm_delete(frame, area),
            _ => {}
        }
    }

    fn header_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            " jobdeck ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )];

        let keyword = if self.input_mode == InputMode::Keyword {
            with_cursor(&self.keyword_buf, self.keyword_cursor)
        } else {
            self.session.list().filters().keyword.clone()
        };
        spans.push(Span::styled(" search: ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            if keyword.is_empty() { "(any)".to_string() } else { keyword },
            Style::default().fg(Color::White),
        ));

        let scrape = if self.deferred == Some(Deferred::Scrape) || self.session.list().scraping() {
            Some(SCRAPE_RUNNING)
        } else {
            self.session.list().scrape_message()
        };
        if let Some(message) = scrape {
            spans.push(Span::styled("   ", Style::default()));
            spans.push(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Yellow),
            ));
        }
        Line::from(spans)
    }

    fn render_sidebar(&self, frame: &mut Frame<'_>, area: Rect) {
        let focused = matches!(self.input_mode, InputMode::Filters | InputMode::JobType);
        let filters = self.session.list().filters();
        let focus_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let normal_style = Style::default().fg(Color::White);
        let heading_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let val_style = Style::default().fg(Color::Green);

        let row_style = |row: SidebarRow| {
            if focused && self.sidebar == row {
                focus_style
            } else {
                normal_style
            }
        };
        let prefix = |row: SidebarRow| if focused && self.sidebar == row { "► " } else { "  " };
        let checkbox = |checked: bool| if checked { "[x] " } else { "[ ] " };

        let mut lines = vec![Line::from(Span::styled("Country", heading_style))];
        for (idx, country) in COUNTRY_CHOICES.iter().enumerate() {
            let row = SidebarRow::Country(idx);
            lines.push(Line::from(Span::styled(
                format!("{}{}{country}", prefix(row), checkbox(filters.country.contains(country))),
                row_style(row),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Tags", heading_style)));
        for (idx, tag) in TAG_CHOICES.iter().enumerate() {
            let row = SidebarRow::Tag(idx);
            lines.push(Line::from(Span::styled(
                format!("{}{}{tag}", prefix(row), checkbox(filters.tag.contains(tag))),
                row_style(row),
            )));
        }
        lines.push(Line::from(""));

        let job_type = if self.input_mode == InputMode::JobType {
            with_cursor(&self.job_type_buf, self.job_type_cursor)
        } else if filters.job_type.is_empty() {
            "(any)".to_string()
        } else {
            filters.job_type.clone()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}Job type: ", prefix(SidebarRow::JobType)),
                row_style(SidebarRow::JobType),
            ),
            Span::styled(job_type, val_style),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}Sort: ", prefix(SidebarRow::Sort)),
                row_style(SidebarRow::Sort),
            ),
            Span::styled(filters.sort.label().to_string(), val_style),
        ]));

        let border_color = if focused { Color::Green } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(border_color))
            .title(" Filters ");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_table(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let list = self.session.list();
        let pagination = list.pagination();

        let header = Row::new(["Title", "Company", "Country", "Posted", "Tags"]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        let rows: Vec<Row<'static>> = list.jobs().iter().map(build_row).collect();
        let widths = [
            Constraint::Percentage(32),
            Constraint::Percentage(22),
            Constraint::Percentage(12),
            Constraint::Percentage(12),
            Constraint::Percentage(22),
        ];

        let title = if list.is_loading() {
            " Jobs (loading) ".to_string()
        } else {
            format!(" Jobs [{}] ", list.filters().summary())
        };
        let footer = format!(
            " Page {} of {}  ({} jobs) ",
            pagination.page(),
            pagination.last_page(),
            pagination.total_items()
        );
        let border_color = if matches!(list.status(), ListStatus::Error(_)) {
            Color::Red
        } else if self.input_mode == InputMode::Normal {
            Color::Green
        } else {
            Color::DarkGray
        };

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_set(border::ROUNDED)
                    .border_style(Style::default().fg(border_color))
                    .title(title)
                    .title_bottom(Line::from(footer))
                    .title_style(
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .row_highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(" ");

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn status_line(&self) -> Line<'static> {
        let key_style = Style::default().fg(Color::Cyan);
        let dim_style = Style::default().fg(Color::DarkGray);

        if let Some(message) = self.session.list().error_message() {
            return Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Red),
            ));
        }
        if self.input_mode == InputMode::Normal
            && let Some(flash) = self.session.form().flash()
        {
            let color = match flash.kind {
                FlashKind::Success => Color::Green,
                FlashKind::Error => Color::Red,
            };
            return Line::from(Span::styled(flash.text.clone(), Style::default().fg(color)));
        }
        if let Some((msg, _)) = &self.status_msg {
            return Line::from(Span::styled(msg.clone(), key_style));
        }

        let hints: &[(&str, &str)] = match self.input_mode {
            InputMode::Normal => &[
                ("j/k", "select"),
                ("n/p", "page"),
                ("/", "search"),
                ("f", "filters"),
                ("a", "add"),
                ("e", "edit"),
                ("d", "delete"),
                ("s", "scrape"),
                ("q", "quit"),
            ],
            InputMode::Keyword => &[("TYPE", "search"), ("ENTER", "apply"), ("ESC", "cancel")],
            InputMode::Filters => &[
                ("j/k", "move"),
                ("SPACE", "toggle"),
                ("←/→", "sort"),
                ("x", "reset"),
                ("ESC", "close"),
            ],
            InputMode::JobType => &[("ENTER", "apply"), ("ESC", "cancel")],
            InputMode::Form => &[
                ("TAB", "next field"),
                ("SHIFT+TAB", "prev field"),
                ("CTRL+S", "save"),
                ("ESC", "cancel"),
            ],
            InputMode::ConfirmDelete => &[("y", "delete"), ("n", "keep")],
        };

        let mut spans = Vec::with_capacity(hints.len() * 2);
        for (key, label) in hints {
            spans.push(Span::styled((*key).to_string(), key_style));
            spans.push(Span::styled(format!(" {label}  "), dim_style));
        }
        Line::from(spans)
    }

    fn render_confirm_delete(&self, frame: &mut Frame<'_>, area: Rect) {
        let Some(job) = &self.pending_delete else {
            return;
        };
        let popup_w: u16 = 52.min(area.width);
        let popup_h: u16 = 6.min(area.height);
        let popup_area = Rect {
            x: area.x + area.width.saturating_sub(popup_w) / 2,
            y: area.y + area.height.saturating_sub(popup_h) / 2,
            width: popup_w,
            height: popup_h,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(Color::Red))
            .title(" Delete ")
            .title_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        let text = vec![
            Line::from("Are you sure you want to delete this job?"),
            Line::from(Span::styled(
                job.display_title().to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("[y] delete   [n] keep", Style::default().fg(Color::DarkGray))),
        ];
        frame.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
            popup_area,
        );
    }
}

fn build_row(job: &JobRecord) -> Row<'static> {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    Row::new([
        Cell::from(job.display_title().to_string()),
        Cell::from(text(&job.company)),
        Cell::from(text(&job.country)),
        Cell::from(text(&job.posted)),
        Cell::from(job.tag_list().join(", ")),
    ])
}
