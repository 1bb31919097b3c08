//! Application module
//!
//! Contains the core application architecture:
//! - Actions: what can happen
//! - State: what is true right now on screen
//! - Reducer + keymap: pure functions from input to new state
//!
//! Server data lives in the libcoursedeck store; everything here is
//! shell state with immutable transitions.

pub mod actions;
pub mod event;
pub mod reducer;
pub mod state;

// Re-export commonly used types
pub use actions::Action;
pub use reducer::{keymap, reduce, textarea_captures};
pub use state::{
    AppState, FormField, FormMode, LoginField, LoginForm, ModuleForm, RegisterField, RegisterForm,
    UiConfig,
};
