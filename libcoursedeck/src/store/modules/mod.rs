//! The course-module slice
//!
//! State, actions, pure reducer, and async operations for the module
//! collection shown on the dashboard.

pub mod actions;
pub mod ops;
pub mod reducer;
pub mod state;

pub use actions::ModulesAction;
pub use reducer::reduce;
pub use state::ModulesState;
