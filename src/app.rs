//! Application state and lifecycle management.
//!
//! This module contains the core `App` struct that holds all interactive
//! state and coordinates between the TUI, the roster store, and the
//! workflow session.

use crate::ai::GeminiProvider;
use crate::config::Config;
use crate::team::{Experience, MemberProfile, RosterStore, TeamOverview};
use crate::tui::Theme;
use crate::workflow::{WorkflowError, WorkflowSession};

/// Main application state.
///
/// Holds one workflow session, the roster store, and the input state for
/// the active tab. Stage actions block until the model call completes;
/// there is no background work and no cancellation of an in-flight call.
pub struct App {
    /// Application configuration
    pub config: Config,

    /// Current UI theme
    pub theme: Theme,

    /// Persisted team roster
    pub store: RosterStore,

    /// This session's workflow progress (reset on restart)
    pub session: WorkflowSession,

    /// Active tab
    pub tab: Tab,

    /// Project description being edited on the Analyze tab
    pub description: String,

    /// Cursor position in the description field
    pub cursor_position: usize,

    /// Add-member form state on the Team tab
    pub form: MemberForm,

    /// Scroll offset for the active tab's result text
    pub result_scroll: u16,

    /// Status message to display (if any)
    pub status: Option<StatusMessage>,

    /// Whether the application should quit
    pub should_quit: bool,

    /// Model provider; None when the credential was missing at startup
    provider: Option<GeminiProvider>,

    /// Initialization failure shown instead of calling the model
    init_error: Option<String>,

    /// Runtime that drives the blocking model calls
    runtime: tokio::runtime::Runtime,
}

/// Top-level tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Analyze,
    Tasks,
    Assign,
    Overview,
    Team,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Self; 5] =
        [Self::Analyze, Self::Tasks, Self::Assign, Self::Overview, Self::Team];

    /// Tab title for the tab bar.
    pub fn title(self) -> &'static str {
        match self {
            Self::Analyze => "Project Analysis",
            Self::Tasks => "Tasks",
            Self::Assign => "Assignment",
            Self::Overview => "Team Overview",
            Self::Team => "Team",
        }
    }

    /// Next tab, wrapping.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping.
    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Fields of the add-member form, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Skills,
    Experience,
    Role,
    Availability,
}

impl FormField {
    /// Next field, stopping at the last.
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Skills,
            Self::Skills => Self::Experience,
            Self::Experience => Self::Role,
            Self::Role | Self::Availability => Self::Availability,
        }
    }

    /// Previous field, stopping at the first.
    pub fn previous(self) -> Self {
        match self {
            Self::Name | Self::Skills => Self::Name,
            Self::Experience => Self::Skills,
            Self::Role => Self::Experience,
            Self::Availability => Self::Role,
        }
    }
}

/// Add-member form state.
#[derive(Debug)]
pub struct MemberForm {
    /// Focused field
    pub field: FormField,
    pub name: String,
    /// Comma-separated skills, as typed
    pub skills: String,
    /// Index into [`Experience::ALL`]
    pub experience: usize,
    pub role: String,
    /// Hours per week, 0-40
    pub availability: u32,
}

impl Default for MemberForm {
    fn default() -> Self {
        Self {
            field: FormField::default(),
            name: String::new(),
            skills: String::new(),
            experience: 0,
            role: String::new(),
            availability: crate::team::DEFAULT_AVAILABILITY,
        }
    }
}

impl MemberForm {
    /// Selected experience level.
    pub fn experience_level(&self) -> Experience {
        Experience::ALL[self.experience.min(Experience::ALL.len() - 1)]
    }

    /// Mutable access to the text of the focused field, if it is a text
    /// field.
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Name => Some(&mut self.name),
            FormField::Skills => Some(&mut self.skills),
            FormField::Role => Some(&mut self.role),
            FormField::Experience | FormField::Availability => None,
        }
    }

    fn reset_inputs(&mut self) {
        *self = Self { field: self.field, ..Self::default() };
    }
}

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A status line entry.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl App {
    /// Create a new application instance.
    ///
    /// Opens and migrates the roster, and tries to construct the model
    /// provider; a missing credential is remembered and surfaced when a
    /// stage is attempted, not fatal here.
    pub fn new() -> anyhow::Result<Self> {
        let config = Config::load()?;
        let theme = Theme::by_name(&config.ui.theme).unwrap_or_default();
        let runtime = tokio::runtime::Runtime::new()?;

        let mut store = RosterStore::open(&config.team.data_file);
        let mut status = None;
        if let Err(e) = store.migrate() {
            tracing::error!("roster migration failed to persist: {e}");
            status = Some(StatusMessage {
                text: format!("Failed to save migrated roster: {e}"),
                kind: StatusKind::Error,
            });
        }

        let (provider, init_error) = match GeminiProvider::new() {
            Ok(p) => (Some(p.with_model(config.model.model.clone())), None),
            Err(e) => {
                tracing::error!("model provider initialization failed: {e}");
                (None, Some(format!("Failed to initialize model provider: {e}")))
            }
        };
        if status.is_none() {
            if let Some(message) = &init_error {
                status =
                    Some(StatusMessage { text: message.clone(), kind: StatusKind::Error });
            }
        }

        Ok(Self {
            config,
            theme,
            store,
            session: WorkflowSession::new(),
            tab: Tab::default(),
            description: String::new(),
            cursor_position: 0,
            form: MemberForm::default(),
            result_scroll: 0,
            status,
            should_quit: false,
            provider,
            init_error,
            runtime,
        })
    }

    /// Create an instance for testing, with a roster at the given path and
    /// no model provider.
    #[cfg(test)]
    pub fn new_test(roster_path: std::path::PathBuf) -> Self {
        Self {
            config: Config::default(),
            theme: Theme::default(),
            store: RosterStore::open(roster_path),
            session: WorkflowSession::new(),
            tab: Tab::default(),
            description: String::new(),
            cursor_position: 0,
            form: MemberForm::default(),
            result_scroll: 0,
            status: None,
            should_quit: false,
            provider: None,
            init_error: Some("no provider in tests".to_string()),
            runtime: tokio::runtime::Runtime::new().expect("test runtime"),
        }
    }

    // --- Stage actions ---

    /// Run the analyze stage against the current description.
    pub fn run_analyze(&mut self) {
        let Some(provider) = self.provider.as_ref() else {
            self.report_init_error();
            return;
        };

        self.status =
            Some(StatusMessage { text: "Analyzing project...".to_string(), kind: StatusKind::Info });

        let result = self
            .runtime
            .block_on(self.session.analyze(provider, &self.description))
            .map(|_| ());
        self.finish_stage(result, "Project analysis complete");
    }

    /// Run the task-generation stage.
    pub fn run_generate_tasks(&mut self) {
        let Some(provider) = self.provider.as_ref() else {
            self.report_init_error();
            return;
        };

        self.status =
            Some(StatusMessage { text: "Generating tasks...".to_string(), kind: StatusKind::Info });

        let result = self.runtime.block_on(self.session.generate_tasks(provider)).map(|_| ());
        self.finish_stage(result, "Tasks generated");
    }

    /// Run the assignment stage against the current roster.
    pub fn run_assign(&mut self) {
        let Some(provider) = self.provider.as_ref() else {
            self.report_init_error();
            return;
        };

        self.status = Some(StatusMessage {
            text: "Matching tasks to team members...".to_string(),
            kind: StatusKind::Info,
        });

        let Self { runtime, session, store, .. } = self;
        let result = runtime.block_on(session.assign(provider, store.roster())).map(|_| ());
        self.finish_stage(result, "Tasks assigned");
    }

    fn finish_stage(&mut self, result: Result<(), WorkflowError>, success: &str) {
        match result {
            Ok(()) => {
                self.result_scroll = 0;
                self.set_status(success, StatusKind::Success);
            }
            Err(e) if e.is_validation() => self.set_status(e.to_string(), StatusKind::Warning),
            Err(e) => {
                tracing::error!("stage action failed: {e}");
                self.set_status(e.to_string(), StatusKind::Error);
            }
        }
    }

    fn report_init_error(&mut self) {
        let text = self
            .init_error
            .clone()
            .unwrap_or_else(|| "Model provider is not available".to_string());
        self.set_status(text, StatusKind::Error);
    }

    // --- Team actions ---

    /// Submit the add-member form.
    pub fn add_member_from_form(&mut self) {
        let name = self.form.name.trim().to_string();
        let skills = MemberProfile::parse_skills(&self.form.skills);

        if name.is_empty() {
            self.set_status("Please enter a name", StatusKind::Warning);
            return;
        }
        if skills.is_empty() {
            self.set_status("Please enter at least one skill", StatusKind::Warning);
            return;
        }

        let role = self.form.role.trim();
        let profile = MemberProfile::new(skills, self.form.experience_level())
            .with_role(if role.is_empty() { crate::team::DEFAULT_ROLE } else { role })
            .with_availability(self.form.availability);

        match self.store.add(&name, profile) {
            Ok(()) => {
                self.form.reset_inputs();
                self.set_status(format!("Added {name} to the team"), StatusKind::Success);
            }
            Err(e) => self.set_status(e.to_string(), StatusKind::Warning),
        }
    }

    /// Remove the member whose name is in the form's name field.
    pub fn remove_member_from_form(&mut self) {
        let name = self.form.name.trim().to_string();
        if name.is_empty() {
            self.set_status("Type the member's name, then remove", StatusKind::Warning);
            return;
        }

        match self.store.remove(&name) {
            Ok(()) => {
                self.form.name.clear();
                self.set_status(format!("Removed {name} from the team"), StatusKind::Success);
            }
            Err(e) => self.set_status(e.to_string(), StatusKind::Warning),
        }
    }

    /// Overview aggregates for the current roster.
    pub fn overview(&self) -> TeamOverview {
        TeamOverview::from_roster(self.store.roster())
    }

    // --- Input editing (Analyze tab description) ---

    /// Insert a character at the cursor.
    pub fn enter_char(&mut self, c: char) {
        self.description.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let prev = self.description[..self.cursor_position]
                .chars()
                .next_back()
                .map_or(0, char::len_utf8);
            self.cursor_position -= prev;
            self.description.remove(self.cursor_position);
        }
    }

    /// Move cursor left one character.
    pub fn move_cursor_left(&mut self) {
        let prev = self.description[..self.cursor_position]
            .chars()
            .next_back()
            .map_or(0, char::len_utf8);
        self.cursor_position -= prev;
    }

    /// Move cursor right one character.
    pub fn move_cursor_right(&mut self) {
        let next =
            self.description[self.cursor_position..].chars().next().map_or(0, char::len_utf8);
        self.cursor_position += next;
    }

    /// Clear the description input.
    pub fn clear_description(&mut self) {
        self.description.clear();
        self.cursor_position = 0;
    }

    // --- Navigation & status ---

    /// Switch to the next tab.
    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
        self.result_scroll = 0;
    }

    /// Switch to the previous tab.
    pub fn previous_tab(&mut self) {
        self.tab = self.tab.previous();
        self.result_scroll = 0;
    }

    /// Scroll the active result text up.
    pub fn scroll_up(&mut self, lines: u16) {
        self.result_scroll = self.result_scroll.saturating_sub(lines);
    }

    /// Scroll the active result text down.
    pub fn scroll_down(&mut self, lines: u16) {
        self.result_scroll = self.result_scroll.saturating_add(lines);
    }

    /// Set a status message.
    pub fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage { text: text.into(), kind });
    }

    /// Clear the status message.
    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Request the application to quit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Periodic tick; nothing scheduled right now.
    pub fn tick(&mut self) {}
}
