//! The user-profile slice

use tracing::warn;

use crate::api::ProfileApi;
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::store::Dispatcher;
use crate::types::Profile;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileState {
    pub profile: Option<Profile>,
    pub loading: bool,
    pub error: Option<ApiError>,
    /// Highest request sequence issued against this slice.
    pub issued: u64,
}

impl ProfileState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileAction {
    FetchPending { seq: u64 },
    FetchFulfilled { seq: u64, profile: Profile },
    FetchRejected { seq: u64, error: ApiError },
}

pub fn reduce(state: ProfileState, action: ProfileAction) -> ProfileState {
    match action {
        ProfileAction::FetchPending { seq } => ProfileState {
            issued: state.issued.max(seq),
            loading: true,
            error: None,
            ..state
        },

        ProfileAction::FetchFulfilled { seq, profile } => {
            let state = ProfileState {
                profile: Some(profile),
                ..state
            };
            if seq == state.issued {
                ProfileState {
                    loading: false,
                    ..state
                }
            } else {
                state
            }
        }

        ProfileAction::FetchRejected { seq, error } => {
            if seq == state.issued {
                ProfileState {
                    loading: false,
                    error: Some(error),
                    ..state
                }
            } else {
                state
            }
        }
    }
}

/// Fetch the profile of the user in the session cache.
pub async fn fetch_profile<A>(dispatcher: &Dispatcher, api: &A, session: &SessionStore) -> u64
where
    A: ProfileApi + ?Sized,
{
    let seq = dispatcher.issue_profile_seq();
    dispatcher.dispatch(ProfileAction::FetchPending { seq });

    let user_id = match session.teacher_id() {
        Some(id) => id,
        None => {
            warn!(seq, "no identity in session; refusing to fetch profile");
            dispatcher.dispatch(ProfileAction::FetchRejected {
                seq,
                error: ApiError::MissingTeacherId,
            });
            return seq;
        }
    };

    match api.profile(&user_id).await {
        Ok(profile) => dispatcher.dispatch(ProfileAction::FetchFulfilled { seq, profile }),
        Err(error) => {
            warn!(seq, %error, "profile fetch failed");
            dispatcher.dispatch(ProfileAction::FetchRejected { seq, error });
        }
    }
    seq
}
