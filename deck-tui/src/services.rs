//! Store adapter for the TUI
//!
//! The store and its reducers are synchronous, but every operation that
//! talks to the course service is async. This module bridges the two:
//!
//! - `StoreHandle`: owns a tokio runtime and spawns operations on it
//! - Operations dispatch their outcomes into the store's inbox; the
//!   event loop drains it once per tick
//! - `bridge_events` forwards the store's applied-action broadcast to a
//!   crossbeam channel the sync event loop can poll
//!
//! # Example
//!
//! ```no_run
//! use deck_tui::services::StoreHandle;
//! use libcoursedeck::{Config, Store};
//!
//! # fn example() -> deck_tui::error::Result<()> {
//! let mut store = Store::new();
//! let config = Config::default_config();
//! let handle = StoreHandle::new(store.dispatcher(), &config)?;
//! let events = handle.bridge_events(&store);
//!
//! handle.fetch_courses();
//! // ...later, in the event loop...
//! store.drain();
//! if let Ok(action) = events.try_recv() {
//!     // React to the applied action
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver};
use tracing::warn;

use libcoursedeck::api::CourseServiceApi;
use libcoursedeck::store::courses::{self, CoursesAction};
use libcoursedeck::store::modules::ops;
use libcoursedeck::store::profile;
use libcoursedeck::store::user;
use libcoursedeck::types::{Credentials, ModuleDraft, ModuleUpdate, Registration, UserInfo};
use libcoursedeck::{Action, Config, Dispatcher, HttpApi, SessionStore, Store};

use crate::error::Result;

/// Handle for running store operations from the sync event loop
///
/// Owns the tokio runtime. Each method clones what the operation needs
/// and spawns it; outcomes arrive through the store's inbox.
pub struct StoreHandle {
    runtime: tokio::runtime::Runtime,
    api: Arc<dyn CourseServiceApi + Send + Sync>,
    session: SessionStore,
    dispatcher: Dispatcher,
}

impl StoreHandle {
    /// Create a handle talking to the configured course service.
    pub fn new(dispatcher: Dispatcher, config: &Config) -> Result<Self> {
        let api = Arc::new(HttpApi::new(&config.api)?);
        let session = SessionStore::from_config(config)?;
        Self::with_api(dispatcher, api, session)
    }

    /// Create a handle over any API implementation.
    pub fn with_api(
        dispatcher: Dispatcher,
        api: Arc<dyn CourseServiceApi + Send + Sync>,
        session: SessionStore,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            runtime,
            api,
            session,
            dispatcher,
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Load the cached identity, if any.
    pub fn restore_session(&self) -> Option<UserInfo> {
        match self.session.load() {
            Ok(info) => info,
            Err(error) => {
                warn!(%error, "session cache unreadable; starting signed out");
                None
            }
        }
    }

    /// Forward the store's applied-action broadcast to a crossbeam
    /// channel for the sync event loop.
    pub fn bridge_events(&self, store: &Store) -> Receiver<Action> {
        let (tx, rx) = unbounded();
        let mut events = store.subscribe();

        self.runtime.spawn(async move {
            loop {
                match events.recv().await {
                    Ok(action) => {
                        // Receiver dropped means the loop is gone.
                        if tx.send(action).is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "event bridge lagged");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        rx
    }

    // === Operations ===

    pub fn login(&self, credentials: Credentials) {
        let dispatcher = self.dispatcher.clone();
        let api = Arc::clone(&self.api);
        let session = self.session.clone();
        self.runtime.spawn(async move {
            user::login(&dispatcher, api.as_ref(), &session, credentials).await;
        });
    }

    pub fn register(&self, registration: Registration) {
        let dispatcher = self.dispatcher.clone();
        let api = Arc::clone(&self.api);
        self.runtime.spawn(async move {
            user::register(&dispatcher, api.as_ref(), registration).await;
        });
    }

    /// Clear the session cache and sign out. Synchronous; no request.
    pub fn logout(&self) {
        user::logout(&self.dispatcher, &self.session);
    }

    pub fn fetch_courses(&self) {
        let dispatcher = self.dispatcher.clone();
        let api = Arc::clone(&self.api);
        let session = self.session.clone();
        self.runtime.spawn(async move {
            courses::fetch_courses(&dispatcher, api.as_ref(), &session).await;
        });
    }

    pub fn fetch_profile(&self) {
        let dispatcher = self.dispatcher.clone();
        let api = Arc::clone(&self.api);
        let session = self.session.clone();
        self.runtime.spawn(async move {
            profile::fetch_profile(&dispatcher, api.as_ref(), &session).await;
        });
    }

    pub fn fetch_modules(&self, course_id: &str) {
        let dispatcher = self.dispatcher.clone();
        let api = Arc::clone(&self.api);
        let session = self.session.clone();
        let course_id = course_id.to_string();
        self.runtime.spawn(async move {
            ops::fetch_modules_by_course(&dispatcher, api.as_ref(), &session, &course_id).await;
        });
    }

    pub fn add_module(&self, draft: ModuleDraft) {
        let dispatcher = self.dispatcher.clone();
        let api = Arc::clone(&self.api);
        self.runtime.spawn(async move {
            ops::add_module(&dispatcher, api.as_ref(), draft).await;
        });
    }

    pub fn update_module(&self, module_id: &str, update: ModuleUpdate) {
        let dispatcher = self.dispatcher.clone();
        let api = Arc::clone(&self.api);
        let module_id = module_id.to_string();
        self.runtime.spawn(async move {
            ops::update_module(&dispatcher, api.as_ref(), &module_id, update).await;
        });
    }

    pub fn delete_module(&self, module_id: &str) {
        let dispatcher = self.dispatcher.clone();
        let api = Arc::clone(&self.api);
        let module_id = module_id.to_string();
        self.runtime.spawn(async move {
            ops::delete_module(&dispatcher, api.as_ref(), &module_id).await;
        });
    }

    /// Mark a course as selected. Local; no request.
    pub fn select_course(&self, course_id: &str) {
        self.dispatcher.dispatch(CoursesAction::CourseSelected {
            course_id: course_id.to_string(),
        });
    }
}
