//! Gateways to the course service
//!
//! One trait per feature area, so each state slice depends only on the
//! operations it dispatches. `HttpApi` implements all of them against the
//! real REST service; `MockApi` implements them in memory for tests and
//! offline demos.
//!
//! # Examples
//!
//! ```no_run
//! use libcoursedeck::api::{HttpApi, ModulesApi};
//! use libcoursedeck::config::Config;
//!
//! # async fn example() -> libcoursedeck::error::Result<()> {
//! let config = Config::load_or_default()?;
//! let api = HttpApi::new(&config.api)?;
//!
//! let modules = api.modules_by_course("course-1", "teacher-1").await?;
//! println!("{} modules", modules.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{
    Course, Credentials, Module, ModuleDraft, ModuleUpdate, Profile, Registration, UserInfo,
};

pub mod http;
pub mod mock;

pub use http::HttpApi;
pub use mock::MockApi;

/// Result of one gateway operation. Failures are already normalized into
/// the shape slice state stores; nothing here retries or rethrows.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// CRUD operations on course-content modules.
#[async_trait]
pub trait ModulesApi: Send + Sync {
    /// Create a module and return the record the service stored.
    async fn create_module(&self, draft: &ModuleDraft) -> ApiResult<Module>;

    /// List the modules of one course, scoped to the owning teacher.
    async fn modules_by_course(&self, course_id: &str, teacher_id: &str)
        -> ApiResult<Vec<Module>>;

    /// Delete a module. Only the status matters; the response body is
    /// not consulted.
    async fn delete_module(&self, module_id: &str) -> ApiResult<()>;

    /// Update a module and return the record the service now holds.
    async fn update_module(&self, module_id: &str, update: &ModuleUpdate) -> ApiResult<Module>;
}

/// Account operations.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Authenticate and return the full response envelope, which callers
    /// persist verbatim to the session cache.
    async fn login(&self, credentials: &Credentials) -> ApiResult<UserInfo>;

    /// Create an account. The caller signs in separately afterwards.
    async fn register(&self, registration: &Registration) -> ApiResult<()>;
}

/// Course listing for the dashboard.
#[async_trait]
pub trait CoursesApi: Send + Sync {
    async fn courses_by_teacher(&self, teacher_id: &str) -> ApiResult<Vec<Course>>;
}

/// Profile lookup.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn profile(&self, user_id: &str) -> ApiResult<Profile>;
}

/// Everything the store's operations need, as one object-safe bound.
pub trait CourseServiceApi: ModulesApi + AuthApi + CoursesApi + ProfileApi {}

impl<T: ModulesApi + AuthApi + CoursesApi + ProfileApi> CourseServiceApi for T {}
