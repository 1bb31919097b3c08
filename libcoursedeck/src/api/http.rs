//! REST gateway backed by the course service
//!
//! Failure normalization follows one rule everywhere: a failed response
//! whose body parses as JSON is a backend error stored verbatim; anything
//! else becomes the generic transport failure, with the real cause logged
//! rather than stored.

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{ApiError, ConfigError, Result};
use crate::types::{
    Course, Credentials, Envelope, Module, ModuleDraft, ModuleUpdate, Profile, Registration,
    UserInfo,
};

use super::{ApiResult, AuthApi, CoursesApi, ModulesApi, ProfileApi};

/// HTTP gateway to the course service. Cheap to clone; one shared
/// connection pool underneath.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and unwrap the `data` field of the envelope.
    async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ApiResult<T> {
        let body = self.execute_raw(request).await?;
        parse_data(&body)
    }

    /// Send a request where only the status matters.
    async fn execute_unit(&self, request: reqwest::RequestBuilder) -> ApiResult<()> {
        self.execute_raw(request).await?;
        Ok(())
    }

    async fn execute_raw(&self, request: reqwest::RequestBuilder) -> ApiResult<String> {
        let response = request.send().await.map_err(|e| transport_failure(&e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| transport_failure(&e))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(parse_failure(status, &body))
        }
    }
}

#[async_trait]
impl ModulesApi for HttpApi {
    async fn create_module(&self, draft: &ModuleDraft) -> ApiResult<Module> {
        debug!(course_id = %draft.course_id, "creating module");
        self.execute(self.client.post(self.endpoint("modules/create")).json(draft))
            .await
    }

    async fn modules_by_course(
        &self,
        course_id: &str,
        teacher_id: &str,
    ) -> ApiResult<Vec<Module>> {
        debug!(%course_id, "fetching modules");
        let url = self.endpoint(&format!("modules/course/{}", course_id));
        self.execute(self.client.get(url).query(&[("teacherId", teacher_id)]))
            .await
    }

    async fn delete_module(&self, module_id: &str) -> ApiResult<()> {
        debug!(%module_id, "deleting module");
        let url = self.endpoint(&format!("modules/delete/{}", module_id));
        self.execute_unit(self.client.delete(url)).await
    }

    async fn update_module(&self, module_id: &str, update: &ModuleUpdate) -> ApiResult<Module> {
        debug!(%module_id, "updating module");
        let url = self.endpoint(&format!("modules/update/{}", module_id));
        self.execute(self.client.put(url).json(update)).await
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<UserInfo> {
        debug!(email = %credentials.email, "logging in");
        let body = json!({
            "email": credentials.email,
            "password": credentials.password.expose_secret(),
        });
        // The session cache keeps the whole envelope, so the body is
        // parsed as-is rather than unwrapped.
        let raw = self
            .execute_raw(self.client.post(self.endpoint("users/login")).json(&body))
            .await?;
        parse_whole(&raw)
    }

    async fn register(&self, registration: &Registration) -> ApiResult<()> {
        debug!(email = %registration.email, "registering account");
        let body = json!({
            "name": registration.name,
            "email": registration.email,
            "password": registration.password.expose_secret(),
        });
        self.execute_unit(self.client.post(self.endpoint("users/register")).json(&body))
            .await
    }
}

#[async_trait]
impl CoursesApi for HttpApi {
    async fn courses_by_teacher(&self, teacher_id: &str) -> ApiResult<Vec<Course>> {
        debug!(%teacher_id, "fetching courses");
        let url = self.endpoint(&format!("courses/teacher/{}", teacher_id));
        self.execute(self.client.get(url)).await
    }
}

#[async_trait]
impl ProfileApi for HttpApi {
    async fn profile(&self, user_id: &str) -> ApiResult<Profile> {
        debug!(%user_id, "fetching profile");
        let url = self.endpoint(&format!("users/profile/{}", user_id));
        self.execute(self.client.get(url)).await
    }
}

fn parse_data<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    match serde_json::from_str::<Envelope<T>>(body) {
        Ok(envelope) => Ok(envelope.data),
        Err(e) => {
            warn!(error = %e, "course service sent an unreadable envelope");
            Err(ApiError::fallback())
        }
    }
}

fn parse_whole<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    match serde_json::from_str::<T>(body) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(error = %e, "course service sent an unreadable body");
            Err(ApiError::fallback())
        }
    }
}

fn parse_failure(status: StatusCode, body: &str) -> ApiError {
    match serde_json::from_str::<Value>(body) {
        Ok(payload) => ApiError::Backend(payload),
        Err(_) => {
            warn!(%status, "course service failed without a structured payload");
            ApiError::fallback()
        }
    }
}

fn transport_failure(err: &reqwest::Error) -> ApiError {
    warn!(error = %err, "transport failure talking to the course service");
    ApiError::fallback()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api() -> HttpApi {
        HttpApi::new(&ApiConfig {
            base_url: "http://localhost:5000/api/v1/".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joining_normalizes_slashes() {
        let api = api();
        assert_eq!(
            api.endpoint("modules/create"),
            "http://localhost:5000/api/v1/modules/create"
        );
        assert_eq!(
            api.endpoint("/modules/delete/m1"),
            "http://localhost:5000/api/v1/modules/delete/m1"
        );
    }

    #[test]
    fn test_parse_data_unwraps_envelope() {
        let body = r#"{"data": [{"_id": "m1", "courseId": "c1", "teacherId": "t1", "title": "A"}]}"#;
        let modules: Vec<Module> = parse_data(body).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].id, "m1");
    }

    #[test]
    fn test_parse_data_missing_envelope_is_fallback() {
        let err = parse_data::<Vec<Module>>(r#"{"modules": []}"#).unwrap_err();
        assert_eq!(err, ApiError::fallback());
    }

    #[test]
    fn test_parse_failure_keeps_json_payload() {
        let body = r#"{"message": "Module not found", "statusCode": 404}"#;
        match parse_failure(StatusCode::NOT_FOUND, body) {
            ApiError::Backend(payload) => {
                assert_eq!(payload, json!({"message": "Module not found", "statusCode": 404}));
            }
            other => panic!("expected backend error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_failure_html_body_is_fallback() {
        let err = parse_failure(StatusCode::BAD_GATEWAY, "<html>502</html>");
        assert_eq!(err, ApiError::fallback());
    }

    #[test]
    fn test_parse_whole_reads_login_envelope() {
        let body = r#"{"data": {"_id": "t1", "name": "Ada", "email": "a@b.c"}, "token": "jwt"}"#;
        let info: UserInfo = parse_whole(body).unwrap();
        assert_eq!(info.data.id, "t1");
        assert_eq!(info.extra["token"], json!("jwt"));
    }
}
