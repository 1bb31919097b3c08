//! The authenticated-user slice
//!
//! Login, registration, and logout. A successful login also writes the
//! session cache so scoped fetches in other slices can pick up the
//! teacher identity; that side effect lives in the op, never in the
//! reducer.

use tracing::warn;

use crate::api::AuthApi;
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::store::Dispatcher;
use crate::types::{Credentials, Registration, UserInfo};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserState {
    /// The logged-in user, exactly as the backend returned it.
    pub user_info: Option<UserInfo>,
    pub loading: bool,
    pub error: Option<ApiError>,
    pub success: Option<String>,
    /// Highest request sequence issued against this slice.
    pub issued: u64,
}

impl UserState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_info.is_some()
    }

    /// The teacher identity of the logged-in user.
    pub fn teacher_id(&self) -> Option<&str> {
        self.user_info.as_ref().map(|info| info.data.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    LoginPending { seq: u64 },
    LoginFulfilled { seq: u64, info: UserInfo },
    LoginRejected { seq: u64, error: ApiError },

    RegisterPending { seq: u64 },
    RegisterFulfilled { seq: u64 },
    RegisterRejected { seq: u64, error: ApiError },

    /// Local action; no request involved.
    LoggedOut,

    /// Identity picked up from the session cache at startup. No
    /// request, no banners.
    Restored { info: UserInfo },
}

pub fn reduce(state: UserState, action: UserAction) -> UserState {
    match action {
        UserAction::LoginPending { seq } | UserAction::RegisterPending { seq } => UserState {
            issued: state.issued.max(seq),
            loading: true,
            error: None,
            success: None,
            ..state
        },

        UserAction::LoginFulfilled { seq, info } => {
            // The identity always lands; the status belongs to the
            // newest request.
            let state = UserState {
                user_info: Some(info),
                ..state
            };
            if seq == state.issued {
                UserState {
                    loading: false,
                    success: Some("Login successful!".to_string()),
                    ..state
                }
            } else {
                state
            }
        }

        UserAction::RegisterFulfilled { seq } => {
            if seq == state.issued {
                UserState {
                    loading: false,
                    success: Some("Registration successful!".to_string()),
                    ..state
                }
            } else {
                state
            }
        }

        UserAction::LoginRejected { seq, error } | UserAction::RegisterRejected { seq, error } => {
            if seq == state.issued {
                UserState {
                    loading: false,
                    error: Some(error),
                    ..state
                }
            } else {
                state
            }
        }

        UserAction::LoggedOut => UserState {
            user_info: None,
            error: None,
            success: None,
            ..state
        },

        UserAction::Restored { info } => UserState {
            user_info: Some(info),
            ..state
        },
    }
}

/// Log in and cache the returned record in the session store.
///
/// A cache write failure does not fail the login; later scoped fetches
/// will reject with a missing-identity error instead.
pub async fn login<A>(
    dispatcher: &Dispatcher,
    api: &A,
    session: &SessionStore,
    credentials: Credentials,
) -> u64
where
    A: AuthApi + ?Sized,
{
    let seq = dispatcher.issue_user_seq();
    dispatcher.dispatch(UserAction::LoginPending { seq });

    match api.login(&credentials).await {
        Ok(info) => {
            if let Err(error) = session.store(&info) {
                warn!(%error, "login succeeded but the session cache write failed");
            }
            dispatcher.dispatch(UserAction::LoginFulfilled { seq, info });
        }
        Err(error) => {
            warn!(seq, %error, "login failed");
            dispatcher.dispatch(UserAction::LoginRejected { seq, error });
        }
    }
    seq
}

pub async fn register<A>(dispatcher: &Dispatcher, api: &A, registration: Registration) -> u64
where
    A: AuthApi + ?Sized,
{
    let seq = dispatcher.issue_user_seq();
    dispatcher.dispatch(UserAction::RegisterPending { seq });

    match api.register(&registration).await {
        Ok(()) => dispatcher.dispatch(UserAction::RegisterFulfilled { seq }),
        Err(error) => {
            warn!(seq, %error, "registration failed");
            dispatcher.dispatch(UserAction::RegisterRejected { seq, error });
        }
    }
    seq
}

/// Drop the cached session and the in-memory identity.
pub fn logout(dispatcher: &Dispatcher, session: &SessionStore) {
    if let Err(error) = session.clear() {
        warn!(%error, "session cache clear failed");
    }
    dispatcher.dispatch(UserAction::LoggedOut);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApi;
    use crate::store::Store;
    use crate::types::UserRecord;
    use tempfile::tempdir;

    fn info(id: &str) -> UserInfo {
        UserInfo {
            data: UserRecord {
                id: id.to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                extra: Default::default(),
            },
            extra: Default::default(),
        }
    }

    #[test]
    fn test_login_lifecycle() {
        let mut state = UserState::new();

        state = reduce(state, UserAction::LoginPending { seq: 1 });
        assert!(state.loading);

        state = reduce(
            state,
            UserAction::LoginFulfilled {
                seq: 1,
                info: info("t1"),
            },
        );
        assert!(!state.loading);
        assert!(state.is_authenticated());
        assert_eq!(state.teacher_id(), Some("t1"));
        assert_eq!(state.success.as_deref(), Some("Login successful!"));
    }

    #[test]
    fn test_login_rejected_records_error() {
        let mut state = UserState::new();

        state = reduce(state, UserAction::LoginPending { seq: 1 });
        state = reduce(
            state,
            UserAction::LoginRejected {
                seq: 1,
                error: ApiError::fallback(),
            },
        );

        assert!(!state.loading);
        assert!(!state.is_authenticated());
        assert_eq!(state.error, Some(ApiError::fallback()));
    }

    #[test]
    fn test_logged_out_clears_identity_and_banners() {
        let mut state = UserState {
            user_info: Some(info("t1")),
            success: Some("Login successful!".to_string()),
            ..UserState::new()
        };

        state = reduce(state, UserAction::LoggedOut);
        assert!(!state.is_authenticated());
        assert!(state.success.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_restored_identity_raises_no_banner() {
        let mut state = UserState::new();

        state = reduce(state, UserAction::Restored { info: info("t1") });

        assert!(state.is_authenticated());
        assert_eq!(state.teacher_id(), Some("t1"));
        assert!(state.success.is_none());
        assert!(!state.loading);
    }

    #[test]
    fn test_stale_login_rejection_does_not_raise_error() {
        let mut state = UserState::new();

        state = reduce(state, UserAction::LoginPending { seq: 1 });
        state = reduce(state, UserAction::LoginPending { seq: 2 });

        state = reduce(
            state,
            UserAction::LoginRejected {
                seq: 1,
                error: ApiError::fallback(),
            },
        );
        assert!(state.error.is_none());
        assert!(state.loading);

        state = reduce(
            state,
            UserAction::LoginFulfilled {
                seq: 2,
                info: info("t1"),
            },
        );
        assert!(!state.loading);
        assert!(state.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_op_caches_session() {
        let dir = tempdir().unwrap();
        let session = SessionStore::new(dir.path().join("session.json"));

        let mut store = Store::new();
        let dispatcher = store.dispatcher();
        let api = MockApi::new().with_login(info("t1"));

        login(
            &dispatcher,
            &api,
            &session,
            Credentials::new("ada@example.com", "pw"),
        )
        .await;
        store.drain();

        assert!(store.state().user.is_authenticated());
        assert_eq!(session.teacher_id().as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_empty() {
        let dir = tempdir().unwrap();
        let session = SessionStore::new(dir.path().join("session.json"));

        let mut store = Store::new();
        let dispatcher = store.dispatcher();
        let api = MockApi::new();
        api.fail_with(ApiError::fallback());

        login(
            &dispatcher,
            &api,
            &session,
            Credentials::new("ada@example.com", "pw"),
        )
        .await;
        store.drain();

        assert!(!store.state().user.is_authenticated());
        assert!(session.teacher_id().is_none());
    }

    #[tokio::test]
    async fn test_logout_op_clears_cache_and_state() {
        let dir = tempdir().unwrap();
        let session = SessionStore::new(dir.path().join("session.json"));

        let mut store = Store::new();
        let dispatcher = store.dispatcher();
        let api = MockApi::new().with_login(info("t1"));

        login(
            &dispatcher,
            &api,
            &session,
            Credentials::new("ada@example.com", "pw"),
        )
        .await;
        logout(&dispatcher, &session);
        store.drain();

        assert!(!store.state().user.is_authenticated());
        assert!(session.teacher_id().is_none());
    }

    #[tokio::test]
    async fn test_register_op_reports_banner() {
        let mut store = Store::new();
        let dispatcher = store.dispatcher();
        let api = MockApi::new();

        register(
            &dispatcher,
            &api,
            Registration::new("Ada", "ada@example.com", "pw"),
        )
        .await;
        store.drain();

        let user = &store.state().user;
        assert!(!user.loading);
        assert_eq!(user.success.as_deref(), Some("Registration successful!"));
        assert!(!user.is_authenticated());
    }
}
