//! Mock gateway implementation for testing
//!
//! Configurable in-memory stand-in for the course service: seeded data,
//! simulated failures and delays, and call recording so tests can verify
//! store behavior without network access.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::error::ApiError;
use crate::types::{
    Course, Credentials, Module, ModuleDraft, ModuleUpdate, Profile, Registration, UserInfo,
    UserRecord,
};

use super::{ApiResult, AuthApi, CoursesApi, ModulesApi, ProfileApi};

/// Mock course service gateway. Clones share the same underlying state,
/// so tests can keep a handle while the store owns another.
#[derive(Debug, Clone, Default)]
pub struct MockApi {
    modules: Arc<Mutex<Vec<Module>>>,
    courses: Arc<Mutex<Vec<Course>>>,
    login_result: Arc<Mutex<Option<UserInfo>>>,
    profile_result: Arc<Mutex<Option<Profile>>>,
    failure: Arc<Mutex<Option<ApiError>>>,
    delay: Arc<Mutex<Duration>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the gateway with existing modules.
    pub fn with_modules(self, modules: Vec<Module>) -> Self {
        *self.modules.lock().unwrap() = modules;
        self
    }

    /// Seed the gateway with existing courses.
    pub fn with_courses(self, courses: Vec<Course>) -> Self {
        *self.courses.lock().unwrap() = courses;
        self
    }

    /// Fix the record the next login returns.
    pub fn with_login(self, info: UserInfo) -> Self {
        *self.login_result.lock().unwrap() = Some(info);
        self
    }

    /// Fix the record profile lookups return.
    pub fn with_profile(self, profile: Profile) -> Self {
        *self.profile_result.lock().unwrap() = Some(profile);
        self
    }

    /// Make every call fail with the given error until cleared.
    pub fn fail_with(&self, error: ApiError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// Delay every call, simulating network latency. Useful for
    /// exercising overlapping requests.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    /// Names of the calls made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == name)
            .count()
    }

    /// Snapshot of the stored modules, for verifying effects.
    pub fn stored_modules(&self) -> Vec<Module> {
        self.modules.lock().unwrap().clone()
    }

    async fn begin(&self, call: &str) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call.to_string());

        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            sleep(delay).await;
        }

        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ModulesApi for MockApi {
    async fn create_module(&self, draft: &ModuleDraft) -> ApiResult<Module> {
        self.begin("create_module").await?;

        let mut extra = draft.extra.clone();
        extra.insert(
            "createdAt".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        let module = Module {
            id: format!("mock-{}", uuid::Uuid::new_v4()),
            course_id: draft.course_id.clone(),
            teacher_id: draft.teacher_id.clone(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            extra,
        };
        self.modules.lock().unwrap().push(module.clone());
        Ok(module)
    }

    async fn modules_by_course(
        &self,
        course_id: &str,
        teacher_id: &str,
    ) -> ApiResult<Vec<Module>> {
        self.begin("modules_by_course").await?;

        let modules = self.modules.lock().unwrap();
        Ok(modules
            .iter()
            .filter(|m| m.course_id == course_id && m.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    async fn delete_module(&self, module_id: &str) -> ApiResult<()> {
        self.begin("delete_module").await?;

        self.modules.lock().unwrap().retain(|m| m.id != module_id);
        Ok(())
    }

    async fn update_module(&self, module_id: &str, update: &ModuleUpdate) -> ApiResult<Module> {
        self.begin("update_module").await?;

        let mut modules = self.modules.lock().unwrap();
        match modules.iter_mut().find(|m| m.id == module_id) {
            Some(module) => {
                if let Some(title) = &update.title {
                    module.title = title.clone();
                }
                if let Some(content) = &update.content {
                    module.content = Some(content.clone());
                }
                for (key, value) in &update.extra {
                    module.extra.insert(key.clone(), value.clone());
                }
                Ok(module.clone())
            }
            // The service upserts nothing, but it still answers with the
            // shape a caller sent. Keeps the no-local-match path reachable.
            None => Ok(Module {
                id: module_id.to_string(),
                course_id: update.course_id.clone(),
                teacher_id: update.teacher_id.clone(),
                title: update.title.clone().unwrap_or_default(),
                content: update.content.clone(),
                extra: update.extra.clone(),
            }),
        }
    }
}

#[async_trait]
impl AuthApi for MockApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<UserInfo> {
        self.begin("login").await?;

        let configured = self.login_result.lock().unwrap().clone();
        Ok(configured.unwrap_or_else(|| UserInfo {
            data: UserRecord {
                id: "mock-teacher".to_string(),
                name: "Mock Teacher".to_string(),
                email: credentials.email.clone(),
                extra: Default::default(),
            },
            extra: Default::default(),
        }))
    }

    async fn register(&self, _registration: &Registration) -> ApiResult<()> {
        self.begin("register").await?;
        Ok(())
    }
}

#[async_trait]
impl CoursesApi for MockApi {
    async fn courses_by_teacher(&self, teacher_id: &str) -> ApiResult<Vec<Course>> {
        self.begin("courses_by_teacher").await?;

        let courses = self.courses.lock().unwrap();
        Ok(courses
            .iter()
            .filter(|c| c.teacher_id == teacher_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProfileApi for MockApi {
    async fn profile(&self, user_id: &str) -> ApiResult<Profile> {
        self.begin("profile").await?;

        let configured = self.profile_result.lock().unwrap().clone();
        Ok(configured.unwrap_or_else(|| Profile {
            id: user_id.to_string(),
            name: "Mock Teacher".to_string(),
            email: "teacher@example.com".to_string(),
            extra: Default::default(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(id: &str, course_id: &str, title: &str) -> Module {
        Module {
            id: id.to_string(),
            course_id: course_id.to_string(),
            teacher_id: "t1".to_string(),
            title: title.to_string(),
            content: None,
            extra: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_stores() {
        let api = MockApi::new();
        let draft = ModuleDraft::new("c1", "t1", "Intro");

        let created = api.create_module(&draft).await.unwrap();
        assert!(created.id.starts_with("mock-"));
        assert!(created.extra.contains_key("createdAt"));

        let stored = api.stored_modules();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Intro");
    }

    #[tokio::test]
    async fn test_fetch_filters_by_course_and_teacher() {
        let mut other = module("m2", "c1", "Other teacher");
        other.teacher_id = "t2".to_string();
        let api = MockApi::new().with_modules(vec![
            module("m1", "c1", "Mine"),
            module("m3", "c2", "Different course"),
            other,
        ]);

        let found = api.modules_by_course("c1", "t1").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "m1");
    }

    #[tokio::test]
    async fn test_delete_removes_stored_module() {
        let api =
            MockApi::new().with_modules(vec![module("m1", "c1", "A"), module("m2", "c1", "B")]);

        api.delete_module("m1").await.unwrap();
        let stored = api.stored_modules();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "m2");

        // Deleting an unknown id is not an error.
        api.delete_module("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_update_applies_changed_fields() {
        let api = MockApi::new().with_modules(vec![module("m1", "c1", "Old title")]);

        let mut update = ModuleUpdate::new("c1", "t1");
        update.title = Some("New title".to_string());
        let updated = api.update_module("m1", &update).await.unwrap();
        assert_eq!(updated.title, "New title");
        assert_eq!(api.stored_modules()[0].title, "New title");
    }

    #[tokio::test]
    async fn test_configured_failure_applies_to_every_call() {
        let api = MockApi::new();
        api.fail_with(ApiError::fallback());

        let err = api.modules_by_course("c1", "t1").await.unwrap_err();
        assert_eq!(err, ApiError::fallback());
        let err = api.delete_module("m1").await.unwrap_err();
        assert_eq!(err, ApiError::fallback());

        api.clear_failure();
        assert!(api.modules_by_course("c1", "t1").await.is_ok());
    }

    #[tokio::test]
    async fn test_calls_are_recorded_in_order() {
        let api = MockApi::new();
        let _ = api.modules_by_course("c1", "t1").await;
        let _ = api.create_module(&ModuleDraft::new("c1", "t1", "A")).await;
        let _ = api.modules_by_course("c1", "t1").await;

        assert_eq!(
            api.calls(),
            vec!["modules_by_course", "create_module", "modules_by_course"]
        );
        assert_eq!(api.call_count("modules_by_course"), 2);
    }

    #[tokio::test]
    async fn test_delay_is_observable() {
        let api = MockApi::new();
        api.set_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        api.delete_module("m1").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_login_synthesizes_record_when_unconfigured() {
        let api = MockApi::new();
        let info = api
            .login(&Credentials::new("ada@example.com", "pw"))
            .await
            .unwrap();
        assert_eq!(info.data.id, "mock-teacher");
        assert_eq!(info.data.email, "ada@example.com");
    }
}
