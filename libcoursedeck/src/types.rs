//! Core types for Coursedeck
//!
//! Records mirror the course service's wire format: Mongo-style `_id`
//! identifiers, camelCase field names, and free-form extra fields this
//! layer carries but never interprets.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope the course service wraps every response payload in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A course-content module record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[serde(rename = "_id")]
    pub id: String,
    pub course_id: String,
    pub teacher_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Anything else the service sends (timestamps, ordering hints, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields for a module that does not exist yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDraft {
    pub course_id: String,
    pub teacher_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModuleDraft {
    pub fn new(course_id: &str, teacher_id: &str, title: &str) -> Self {
        Self {
            course_id: course_id.to_string(),
            teacher_id: teacher_id.to_string(),
            title: title.to_string(),
            content: None,
            extra: Map::new(),
        }
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }
}

/// Changes for an existing module. The module id rides in the URL; the
/// course and teacher ids are re-sent in the body the way the service
/// expects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleUpdate {
    pub course_id: String,
    pub teacher_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModuleUpdate {
    pub fn new(course_id: &str, teacher_id: &str) -> Self {
        Self {
            course_id: course_id.to_string(),
            teacher_id: teacher_id.to_string(),
            title: None,
            content: None,
            extra: Map::new(),
        }
    }
}

/// A course record, as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub teacher_id: String,
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The authenticated-user record the login endpoint returns and the
/// session cache persists verbatim. The teacher identity every scoped
/// request needs lives at `data._id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub data: UserRecord,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A user profile record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Login form payload. The password never appears in logs or debug output.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string().into(),
        }
    }
}

/// Registration form payload.
#[derive(Debug)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

impl Registration {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string().into(),
        }
    }
}
