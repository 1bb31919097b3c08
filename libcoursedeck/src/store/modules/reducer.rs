//! Pure reducer for the course-module collection
//!
//! `(State, Action) -> State` with no side effects. All I/O lives in
//! [`super::ops`]; its outcomes arrive here as actions.
//!
//! Two rules govern every case:
//!
//! - Collection effects (append, replace, remove, swap-in-place) apply for
//!   every settled outcome, whatever its age.
//! - Status fields (`loading`, `error`, `success`) belong to the most
//!   recently issued request. An outcome whose stamp is older than
//!   `issued` leaves them alone.

use super::actions::ModulesAction;
use super::state::ModulesState;
use crate::error::ApiError;

/// Pure reducer function
///
/// Takes current state and an action, returns new state. No network
/// requests, no file I/O, deterministic.
pub fn reduce(state: ModulesState, action: ModulesAction) -> ModulesState {
    match action {
        // === Add ===
        ModulesAction::AddPending { seq } => begin(state, seq, false),

        ModulesAction::AddFulfilled { seq, module } => {
            let mut modules = state.modules.clone();
            modules.push(module);
            let state = ModulesState { modules, ..state };
            if settled(&state, seq) {
                ModulesState {
                    loading: false,
                    success: Some("Module added successfully!".to_string()),
                    ..state
                }
            } else {
                state
            }
        }

        ModulesAction::AddRejected { seq, error } => reject(state, seq, error),

        // === Fetch by course ===
        // A fetch keeps whatever success banner a mutation put up.
        ModulesAction::FetchPending { seq } => begin(state, seq, true),

        ModulesAction::FetchFulfilled { seq, modules } => {
            let state = ModulesState { modules, ..state };
            if settled(&state, seq) {
                ModulesState {
                    loading: false,
                    ..state
                }
            } else {
                state
            }
        }

        ModulesAction::FetchRejected { seq, error } => reject(state, seq, error),

        // === Delete ===
        ModulesAction::DeletePending { seq } => begin(state, seq, false),

        ModulesAction::DeleteFulfilled { seq, module_id } => {
            let mut modules = state.modules.clone();
            modules.retain(|m| m.id != module_id);
            let state = ModulesState { modules, ..state };
            if settled(&state, seq) {
                ModulesState {
                    loading: false,
                    success: Some("Module deleted successfully!".to_string()),
                    ..state
                }
            } else {
                state
            }
        }

        ModulesAction::DeleteRejected { seq, error } => reject(state, seq, error),

        // === Update ===
        ModulesAction::UpdatePending { seq } => begin(state, seq, false),

        ModulesAction::UpdateFulfilled { seq, module } => {
            let mut modules = state.modules.clone();
            if let Some(existing) = modules.iter_mut().find(|m| m.id == module.id) {
                *existing = module;
            }
            // The banner goes up even when the module is not in the local
            // list; the backend accepted the update either way.
            let state = ModulesState { modules, ..state };
            if settled(&state, seq) {
                ModulesState {
                    loading: false,
                    success: Some("Module updated successfully!".to_string()),
                    ..state
                }
            } else {
                state
            }
        }

        ModulesAction::UpdateRejected { seq, error } => reject(state, seq, error),
    }
}

/// Record a newly issued request: spinner on, stale error cleared.
/// Mutations also take down the success banner; a fetch leaves it up.
fn begin(state: ModulesState, seq: u64, keep_success: bool) -> ModulesState {
    ModulesState {
        issued: state.issued.max(seq),
        loading: true,
        error: None,
        success: if keep_success { state.success.clone() } else { None },
        ..state
    }
}

/// Whether this outcome belongs to the most recently issued request.
fn settled(state: &ModulesState, seq: u64) -> bool {
    seq == state.issued
}

fn reject(state: ModulesState, seq: u64, error: ApiError) -> ModulesState {
    if settled(&state, seq) {
        ModulesState {
            loading: false,
            error: Some(error),
            ..state
        }
    } else {
        state
    }
}
