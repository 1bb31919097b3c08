//! Async operations for the course-module collection
//!
//! Each op issues a request sequence, announces itself with a pending
//! action, performs the request, and dispatches exactly one outcome.
//! Failures are folded into slice state, not returned; the caller only
//! gets the sequence number back for correlation.

use tracing::{debug, warn};

use crate::api::ModulesApi;
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::store::Dispatcher;
use crate::types::{ModuleDraft, ModuleUpdate};

use super::actions::ModulesAction;

/// Create a module and append it to the collection.
pub async fn add_module<A>(dispatcher: &Dispatcher, api: &A, draft: ModuleDraft) -> u64
where
    A: ModulesApi + ?Sized,
{
    let seq = dispatcher.issue_modules_seq();
    dispatcher.dispatch(ModulesAction::AddPending { seq });

    match api.create_module(&draft).await {
        Ok(module) => dispatcher.dispatch(ModulesAction::AddFulfilled { seq, module }),
        Err(error) => {
            warn!(seq, %error, "module creation failed");
            dispatcher.dispatch(ModulesAction::AddRejected { seq, error });
        }
    }
    seq
}

/// Replace the collection with the modules of one course.
///
/// The teacher identity comes from the session cache. Without it the op
/// rejects immediately and never touches the network.
pub async fn fetch_modules_by_course<A>(
    dispatcher: &Dispatcher,
    api: &A,
    session: &SessionStore,
    course_id: &str,
) -> u64
where
    A: ModulesApi + ?Sized,
{
    let seq = dispatcher.issue_modules_seq();
    dispatcher.dispatch(ModulesAction::FetchPending { seq });

    let teacher_id = match session.teacher_id() {
        Some(id) => id,
        None => {
            warn!(seq, "no teacher identity in session; refusing to fetch modules");
            dispatcher.dispatch(ModulesAction::FetchRejected {
                seq,
                error: ApiError::MissingTeacherId,
            });
            return seq;
        }
    };

    debug!(seq, course_id, "fetching modules");
    match api.modules_by_course(course_id, &teacher_id).await {
        Ok(modules) => dispatcher.dispatch(ModulesAction::FetchFulfilled { seq, modules }),
        Err(error) => {
            warn!(seq, %error, "module fetch failed");
            dispatcher.dispatch(ModulesAction::FetchRejected { seq, error });
        }
    }
    seq
}

/// Delete a module and drop it from the collection.
///
/// The fulfilled action carries the id the caller passed in; whatever the
/// backend answers with is ignored.
pub async fn delete_module<A>(dispatcher: &Dispatcher, api: &A, module_id: &str) -> u64
where
    A: ModulesApi + ?Sized,
{
    let seq = dispatcher.issue_modules_seq();
    dispatcher.dispatch(ModulesAction::DeletePending { seq });

    match api.delete_module(module_id).await {
        Ok(()) => dispatcher.dispatch(ModulesAction::DeleteFulfilled {
            seq,
            module_id: module_id.to_string(),
        }),
        Err(error) => {
            warn!(seq, %error, "module deletion failed");
            dispatcher.dispatch(ModulesAction::DeleteRejected { seq, error });
        }
    }
    seq
}

/// Update a module and swap the returned record into the collection.
pub async fn update_module<A>(
    dispatcher: &Dispatcher,
    api: &A,
    module_id: &str,
    update: ModuleUpdate,
) -> u64
where
    A: ModulesApi + ?Sized,
{
    let seq = dispatcher.issue_modules_seq();
    dispatcher.dispatch(ModulesAction::UpdatePending { seq });

    match api.update_module(module_id, &update).await {
        Ok(module) => dispatcher.dispatch(ModulesAction::UpdateFulfilled { seq, module }),
        Err(error) => {
            warn!(seq, %error, "module update failed");
            dispatcher.dispatch(ModulesAction::UpdateRejected { seq, error });
        }
    }
    seq
}
