//! Actions for the course-module collection
//!
//! Each async operation dispatches one `*Pending` followed by exactly one
//! `*Fulfilled` or `*Rejected`, all stamped with the sequence number the
//! dispatcher issued for that request. The reducer uses the stamp to keep
//! stale outcomes from clobbering the status of a newer request.

use crate::error::ApiError;
use crate::types::Module;

/// Lifecycle actions for the module collection.
#[derive(Debug, Clone, PartialEq)]
pub enum ModulesAction {
    // === Add ===
    AddPending { seq: u64 },
    AddFulfilled { seq: u64, module: Module },
    AddRejected { seq: u64, error: ApiError },

    // === Fetch by course ===
    FetchPending { seq: u64 },
    FetchFulfilled { seq: u64, modules: Vec<Module> },
    FetchRejected { seq: u64, error: ApiError },

    // === Delete ===
    DeletePending { seq: u64 },
    /// Carries the id the caller asked to delete, not anything the
    /// backend returned.
    DeleteFulfilled { seq: u64, module_id: String },
    DeleteRejected { seq: u64, error: ApiError },

    // === Update ===
    UpdatePending { seq: u64 },
    UpdateFulfilled { seq: u64, module: Module },
    UpdateRejected { seq: u64, error: ApiError },
}

impl ModulesAction {
    /// The request sequence this action belongs to.
    pub fn seq(&self) -> u64 {
        match self {
            ModulesAction::AddPending { seq }
            | ModulesAction::AddFulfilled { seq, .. }
            | ModulesAction::AddRejected { seq, .. }
            | ModulesAction::FetchPending { seq }
            | ModulesAction::FetchFulfilled { seq, .. }
            | ModulesAction::FetchRejected { seq, .. }
            | ModulesAction::DeletePending { seq }
            | ModulesAction::DeleteFulfilled { seq, .. }
            | ModulesAction::DeleteRejected { seq, .. }
            | ModulesAction::UpdatePending { seq }
            | ModulesAction::UpdateFulfilled { seq, .. }
            | ModulesAction::UpdateRejected { seq, .. } => *seq,
        }
    }
}
