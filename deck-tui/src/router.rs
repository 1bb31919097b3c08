//! Path-based navigation between the four screens.

use std::fmt;

use tracing::warn;

/// A navigable screen, addressed by a path string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Login,
    Register,
    Dashboard,
}

impl Route {
    /// Parses a path into a route. Trailing slashes are tolerated.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let trimmed = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        match trimmed {
            "/" | "" => Some(Route::Home),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/dashboard" => Some(Route::Dashboard),
            _ => None,
        }
    }

    /// Parses a path, falling back to the home screen for anything unknown.
    pub fn parse_or_home(path: &str) -> Self {
        Route::parse(path).unwrap_or_else(|| {
            warn!(path, "unknown route; falling back to home");
            Route::Home
        })
    }

    /// The canonical path for this route.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Screen title shown in the frame border.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Coursedeck",
            Route::Login => "Sign in",
            Route::Register => "Create account",
            Route::Dashboard => "Dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
