//! Store assembly
//!
//! Four slices composed into one root state behind a single dispatch
//! channel. Async operations run wherever the caller spawns them and
//! report back through a [`Dispatcher`]; the store owner applies queued
//! actions with the pure root reducer and re-broadcasts every applied
//! action as a change signal for subscribers.
//!
//! # Example
//!
//! ```no_run
//! use libcoursedeck::api::MockApi;
//! use libcoursedeck::store::{modules, Store};
//! use libcoursedeck::types::ModuleDraft;
//!
//! # async fn example() {
//! let mut store = Store::new();
//! let dispatcher = store.dispatcher();
//! let api = MockApi::new();
//!
//! modules::ops::add_module(&dispatcher, &api, ModuleDraft::new("c1", "t1", "Intro")).await;
//! store.drain();
//!
//! assert_eq!(store.state().modules.modules.len(), 1);
//! # }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::warn;

pub mod courses;
pub mod modules;
pub mod profile;
pub mod user;

pub use courses::{CoursesAction, CoursesState};
pub use modules::{ModulesAction, ModulesState};
pub use profile::{ProfileAction, ProfileState};
pub use user::{UserAction, UserState};

/// Per-subscriber buffer for the change-signal channel.
const EVENT_CAPACITY: usize = 100;

/// The whole application state, one field per slice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RootState {
    pub user: UserState,
    pub courses: CoursesState,
    pub modules: ModulesState,
    pub profile: ProfileState,
}

impl RootState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Every action the store understands, routed by slice.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    User(UserAction),
    Courses(CoursesAction),
    Modules(ModulesAction),
    Profile(ProfileAction),
}

impl From<UserAction> for Action {
    fn from(action: UserAction) -> Self {
        Action::User(action)
    }
}

impl From<CoursesAction> for Action {
    fn from(action: CoursesAction) -> Self {
        Action::Courses(action)
    }
}

impl From<ModulesAction> for Action {
    fn from(action: ModulesAction) -> Self {
        Action::Modules(action)
    }
}

impl From<ProfileAction> for Action {
    fn from(action: ProfileAction) -> Self {
        Action::Profile(action)
    }
}

/// Pure root reducer: hands each action to the slice it belongs to.
pub fn reduce(state: RootState, action: Action) -> RootState {
    let RootState {
        user,
        courses,
        modules,
        profile,
    } = state;

    match action {
        Action::User(a) => RootState {
            user: user::reduce(user, a),
            courses,
            modules,
            profile,
        },
        Action::Courses(a) => RootState {
            user,
            courses: courses::reduce(courses, a),
            modules,
            profile,
        },
        Action::Modules(a) => RootState {
            user,
            courses,
            modules: modules::reduce(modules, a),
            profile,
        },
        Action::Profile(a) => RootState {
            user,
            courses,
            modules,
            profile: profile::reduce(profile, a),
        },
    }
}

/// Per-slice monotonic request counters, shared by every dispatcher
/// clone so concurrent ops never reuse a sequence.
#[derive(Debug, Default)]
struct Sequences {
    user: AtomicU64,
    courses: AtomicU64,
    modules: AtomicU64,
    profile: AtomicU64,
}

/// Cheap cloneable handle for dispatching actions from any task.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Action>,
    sequences: Arc<Sequences>,
}

impl Dispatcher {
    /// Queue an action for the store owner to apply.
    ///
    /// Dispatching after the store is gone is not an error; the action
    /// is simply discarded.
    pub fn dispatch(&self, action: impl Into<Action>) {
        if self.tx.send(action.into()).is_err() {
            warn!("store is gone; action discarded");
        }
    }

    pub fn issue_user_seq(&self) -> u64 {
        Self::issue(&self.sequences.user)
    }

    pub fn issue_courses_seq(&self) -> u64 {
        Self::issue(&self.sequences.courses)
    }

    pub fn issue_modules_seq(&self) -> u64 {
        Self::issue(&self.sequences.modules)
    }

    pub fn issue_profile_seq(&self) -> u64 {
        Self::issue(&self.sequences.profile)
    }

    // Sequences start at 1; a fresh slice carries issued = 0.
    fn issue(counter: &AtomicU64) -> u64 {
        counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Owner of the state and the single point where actions are applied.
///
/// The store itself is not shared. Ops hold a [`Dispatcher`] and queue
/// actions; whoever owns the store drains the queue from its own loop.
pub struct Store {
    state: RootState,
    inbox: mpsc::UnboundedReceiver<Action>,
    actions_tx: mpsc::UnboundedSender<Action>,
    events: broadcast::Sender<Action>,
    sequences: Arc<Sequences>,
}

impl Store {
    pub fn new() -> Self {
        let (actions_tx, inbox) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: RootState::new(),
            inbox,
            actions_tx,
            events,
            sequences: Arc::new(Sequences::default()),
        }
    }

    pub fn state(&self) -> &RootState {
        &self.state
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher {
            tx: self.actions_tx.clone(),
            sequences: Arc::clone(&self.sequences),
        }
    }

    /// Subscribe to applied actions. Every action the store applies is
    /// re-broadcast here so renderers know state changed. Laggy
    /// subscribers miss old signals rather than blocking the store.
    pub fn subscribe(&self) -> broadcast::Receiver<Action> {
        self.events.subscribe()
    }

    /// Apply one action and announce it.
    pub fn apply(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action.clone());
        // send() fails only when nobody is subscribed, which is fine.
        let _ = self.events.send(action);
    }

    /// Apply everything queued without blocking. Returns how many
    /// actions were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.inbox.try_recv() {
            self.apply(action);
            applied += 1;
        }
        applied
    }

    /// Wait for the next dispatched action, apply it, and return it.
    ///
    /// Returns `None` once every dispatcher has been dropped and the
    /// queue is empty.
    pub async fn process_next(&mut self) -> Option<Action> {
        let action = self.inbox.recv().await?;
        self.apply(action.clone());
        Some(action)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
