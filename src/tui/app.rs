//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::model::LogisticModel;
use crate::adapters::pdf::PdfReportWriter;
use crate::adapters::sqlite::SqliteStorage;
use crate::application::{storage_message, AssessmentService, HistoryService, Notice};
use crate::config::AppConfig;
use crate::ports::RECENT_LIMIT;
use crate::AgewellError;

use super::ui::{
    form::{render_form, FormState},
    history::{render_history, HistoryState},
    render_caption,
    result::{render_result, ResultState},
};

/// Warning shown when the last report is requested before any submission.
pub const NO_REPORT_WARNING: &str = "No report generated yet. Submit the form first.";

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Result,
    History,
}

type Assessment = AssessmentService<LogisticModel, SqliteStorage, PdfReportWriter>;

/// Main application state
pub struct App {
    screen: Screen,
    should_quit: bool,

    assessment_service: Assessment,
    history_service: HistoryService<SqliteStorage>,

    form_state: FormState,
    result_state: ResultState,
    history_state: HistoryState,

    /// Path of the most recent PDF written this session.
    last_report: Option<PathBuf>,

    /// Notices raised outside a submission (last-report lookups).
    extra_notices: Vec<Notice>,
}

impl App {
    /// Create a new application from configuration.
    ///
    /// # Errors
    /// Returns error if the classifier cannot be loaded.
    pub fn new(config: AppConfig) -> Result<Self> {
        let model_path = config.model_path.as_path();
        if !model_path.exists() {
            return Err(anyhow!(
                "Model path not found at {:?}. Set AGEWELL_MODEL_PATH to a directory containing agewell_model.json.",
                model_path
            ));
        }

        // Every submission needs the classifier: refuse to start without it.
        let mut model = LogisticModel::new();
        model
            .load_model(model_path)
            .map_err(|e| anyhow!("Failed to load model from {:?}: {}", model_path, e))?;

        let storage = Arc::new(SqliteStorage::new(&config.db_path));
        let reports = Arc::new(PdfReportWriter::new(&config.report_dir));

        let assessment_service = AssessmentService::new(Arc::new(model), storage.clone(), reports);
        let history_service = HistoryService::new(storage);

        Ok(Self::with_services(
            assessment_service,
            history_service,
            config.insert_to_db,
        ))
    }

    /// Create application with injected services.
    #[must_use]
    pub fn with_services(
        assessment_service: Assessment,
        history_service: HistoryService<SqliteStorage>,
        insert_to_db: bool,
    ) -> Self {
        Self {
            screen: Screen::Form,
            should_quit: false,
            assessment_service,
            history_service,
            form_state: FormState::new(insert_to_db),
            result_state: ResultState::default(),
            history_state: HistoryState::default(),
            last_report: None,
            extra_notices: Vec::new(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Draw the current screen and the caption below it.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        match self.screen {
            Screen::Form => render_form(f, chunks[0], &self.form_state),
            Screen::Result => {
                render_result(f, chunks[0], &self.result_state, &self.extra_notices);
            }
            Screen::History => render_history(f, chunks[0], &mut self.history_state),
        }

        render_caption(f, chunks[1]);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Form => self.handle_form_key(key),
            Screen::Result => self.handle_result_key(key),
            Screen::History => self.handle_history_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::BackTab => self.form_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form_state.next_field(),
            KeyCode::Char('i') | KeyCode::Char('I') => self.form_state.toggle_insert(),
            KeyCode::Char('d') | KeyCode::Char('D') => self.show_last_report(),
            KeyCode::Char('h') | KeyCode::Char('H') => self.open_history(),
            KeyCode::Char(c) => self.form_state.input_char(c),
            KeyCode::Backspace => self.form_state.delete_char(),
            KeyCode::Delete => self.form_state.clear_field(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Esc => self.form_state.error_message = None,
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter => self.screen = Screen::Form,
            KeyCode::Char('d') | KeyCode::Char('D') => self.show_last_report(),
            KeyCode::Char('h') | KeyCode::Char('H') => self.open_history(),
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.screen = Screen::Form,
            KeyCode::Up => self.history_state.prev_row(),
            KeyCode::Down => self.history_state.next_row(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.load_history(),
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let (vitals, body) = match self.form_state.to_inputs() {
            Ok(inputs) => inputs,
            Err(e) => {
                self.form_state.error_message = Some(e.to_string());
                return;
            }
        };

        let persist = self.form_state.insert_to_db;
        self.extra_notices.clear();

        self.result_state = match self.assessment_service.submit(vitals, body, persist) {
            Ok(outcome) => {
                if let Some(path) = &outcome.report_path {
                    self.last_report = Some(path.clone());
                }
                ResultState::Complete(outcome)
            }
            Err(e) => {
                tracing::error!("Submission failed: {}", e);
                ResultState::Failed(e.to_string())
            }
        };

        // Clear entered values from the UI once they have been consumed.
        self.form_state.clear_sensitive();
        self.screen = Screen::Result;
    }

    fn show_last_report(&mut self) {
        let notice = last_report_notice(self.last_report.as_deref());
        self.extra_notices.clear();
        self.extra_notices.push(notice);
        self.screen = Screen::Result;
    }

    fn open_history(&mut self) {
        self.load_history();
        self.screen = Screen::History;
    }

    fn load_history(&mut self) {
        match self.history_service.latest(RECENT_LIMIT) {
            Ok(history) => self.history_state.set_history(history),
            Err(AgewellError::Storage(e)) => {
                tracing::error!("Failed to load history: {}", e);
                self.history_state.set_error(storage_message(&e, "Query"));
            }
            Err(e) => self.history_state.set_error(e.to_string()),
        }
    }
}

/// Notice for the "last report" action.
fn last_report_notice(last_report: Option<&std::path::Path>) -> Notice {
    match last_report {
        Some(path) => Notice::info(format!("Last report: {}", path.display())),
        None => Notice::warning(NO_REPORT_WARNING),
    }
}
