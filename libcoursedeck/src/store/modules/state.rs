//! State for the course-module collection

use crate::error::ApiError;
use crate::types::Module;

/// Slice state for the modules of the currently selected course.
///
/// `loading`, `error`, and `success` are status fields: they describe the
/// most recently issued request, identified by `issued`. The collection
/// itself reflects every settled outcome regardless of order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModulesState {
    /// Modules for the selected course.
    pub modules: Vec<Module>,

    /// True while the most recently issued request is in flight.
    pub loading: bool,

    /// Error from the most recently issued request, if it failed.
    pub error: Option<ApiError>,

    /// Banner text from the last settled mutation.
    pub success: Option<String>,

    /// Highest request sequence issued against this slice.
    pub issued: u64,
}

impl ModulesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a module by its backend id.
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle_and_empty() {
        let state = ModulesState::new();
        assert!(state.modules.is_empty());
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(state.success.is_none());
        assert_eq!(state.issued, 0);
    }

    #[test]
    fn test_module_lookup() {
        let mut state = ModulesState::new();
        state.modules.push(Module {
            id: "m1".to_string(),
            course_id: "c1".to_string(),
            teacher_id: "t1".to_string(),
            title: "Intro".to_string(),
            content: None,
            extra: Default::default(),
        });

        assert_eq!(state.module("m1").map(|m| m.title.as_str()), Some("Intro"));
        assert!(state.module("missing").is_none());
    }
}
