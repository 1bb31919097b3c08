//! deck-tui library
//!
//! Exports types and modules for testing and potential reuse.

pub mod app;
pub mod error;
pub mod router;
pub mod services;
pub mod terminal;
pub mod ui;

// Re-export commonly used types
pub use app::{keymap, reduce, textarea_captures, Action, AppState};
pub use error::{Result, TuiError};
pub use router::Route;
pub use services::StoreHandle;
