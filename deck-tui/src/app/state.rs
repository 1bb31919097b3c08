//! Screen-local state for the terminal UI.
//!
//! Server data (user, courses, modules, profile) lives in the
//! libcoursedeck store; this is everything else a frame needs: the
//! active route, form fields mid-edit, the search box, the card cursor.
//! All transitions happen through the reducer (see `reducer.rs`).

use crate::router::Route;

/// Shell state for the whole application.
///
/// State transitions are pure functions that return new state values.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Current route
    pub route: Route,

    /// Help overlay visible?
    pub help_visible: bool,

    /// Sign-in form fields
    pub login: LoginForm,

    /// Registration form fields
    pub register: RegisterForm,

    /// Dashboard search box content
    pub search: String,

    /// Is the search box capturing keys?
    pub search_active: bool,

    /// Card cursor position within the filtered module list
    pub cursor: usize,

    /// Add/edit dialog, when open
    pub form: Option<ModuleForm>,

    /// Transient status line message
    pub status: Option<String>,

    /// UI configuration
    pub config: UiConfig,
}

/// Sign-in form
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Registration form
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub focus: RegisterField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterField {
    #[default]
    Name,
    Email,
    Password,
}

/// Add/edit dialog for a module.
///
/// The single-line title lives here; the multi-line content lives in
/// the textarea owned by the event loop.
#[derive(Debug, Clone)]
pub struct ModuleForm {
    pub mode: FormMode,
    pub title: String,
    pub focus: FormField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit { module_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Content,
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            should_quit: false,
            route: Route::Home,
            help_visible: false,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            search: String::new(),
            search_active: false,
            cursor: 0,
            form: None,
            status: None,
            config: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err()
            && std::env::var("DECK_TUI_NO_COLOR").is_err();

        let tick_rate_ms = std::env::var("DECK_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            colors_enabled,
            tick_rate_ms,
        }
    }
}

impl AppState {
    /// Create new shell state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create shell state opened on a specific route.
    pub fn at_route(route: Route) -> Self {
        Self {
            route,
            ..Self::default()
        }
    }
}
