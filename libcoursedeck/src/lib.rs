//! Coursedeck - course management tools for teachers
//!
//! This library provides the state store, REST gateway, and session
//! handling behind the coursedeck terminal UI and command-line tools.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use api::{CourseServiceApi, HttpApi, MockApi};
pub use config::Config;
pub use error::{ApiError, CoursedeckError, Result};
pub use session::SessionStore;
pub use store::{Action, Dispatcher, RootState, Store};
pub use types::{Course, Module, ModuleDraft, ModuleUpdate, Profile, UserInfo};
