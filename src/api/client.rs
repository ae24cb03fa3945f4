use serde::Deserialize;
use serde_json::json;

use crate::model::filter::TaskFilter;
use crate::model::session::{Role, Session};
use crate::model::task::{Status, Task, TaskDraft};

/// Error type for backend calls
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status. Carries the `message`
    /// field from the response body when one was present.
    #[error("request rejected: {}", message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    /// The request never produced a usable response (connection refused,
    /// malformed body, ...). Rendered to users as "Server error".
    #[error("server error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// The banner text for this error: the server's message if it sent one,
    /// otherwise the operation-specific fallback; transport failures are
    /// always the generic "Server error".
    pub fn banner(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected {
                message: Some(msg), ..
            } => msg.clone(),
            ApiError::Rejected { message: None, .. } => fallback.to_string(),
            ApiError::Transport(_) => "Server error".to_string(),
        }
    }
}

/// Credentials returned by a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    pub username: String,
}

/// The REST surface the client consumes. A trait so controllers can be
/// exercised against an in-memory backend in tests.
pub trait Backend {
    fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;
    fn register(&self, username: &str, password: &str, role: Role) -> Result<(), ApiError>;
    fn list_tasks(&self, session: &Session, filter: &TaskFilter) -> Result<Vec<Task>, ApiError>;
    fn create_task(&self, session: &Session, draft: &TaskDraft) -> Result<Task, ApiError>;
    fn update_task(&self, session: &Session, id: &str, draft: &TaskDraft)
    -> Result<Task, ApiError>;
    /// Partial update: the body carries only `{"status": ...}`.
    fn set_status(&self, session: &Session, id: &str, status: Status) -> Result<Task, ApiError>;
    fn delete_task(&self, session: &Session, id: &str) -> Result<(), ApiError>;
}

/// Backend over HTTP. One-shot blocking requests, no timeout, no retry.
pub struct HttpBackend {
    base_url: String,
    http: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        HttpBackend {
            base_url,
            http: reqwest::blocking::Client::builder()
                .http1_title_case_headers()
                .build()
                .expect("default reqwest client"),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check the response status, extracting `{message}` from error bodies.
    fn reject_on_error(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorBody>()
            .ok()
            .and_then(|body| body.message);
        Err(ApiError::Rejected { status, message })
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .query(query)
            .send()?;
        Ok(Self::reject_on_error(response)?.json()?)
    }

    fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        token: Option<&str>,
        body: &impl serde::Serialize,
    ) -> Result<T, ApiError> {
        let mut request = self.http.request(method, self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Ok(Self::reject_on_error(request.send()?)?.json()?)
    }
}

impl Backend for HttpBackend {
    fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = json!({ "username": username, "password": password });
        self.send_json(reqwest::Method::POST, "/api/auth/login", None, &body)
    }

    fn register(&self, username: &str, password: &str, role: Role) -> Result<(), ApiError> {
        let body = json!({ "username": username, "password": password, "role": role });
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&body)
            .send()?;
        Self::reject_on_error(response)?;
        Ok(())
    }

    fn list_tasks(&self, session: &Session, filter: &TaskFilter) -> Result<Vec<Task>, ApiError> {
        self.get_json("/api/tasks", &session.token, &filter.query_pairs())
    }

    fn create_task(&self, session: &Session, draft: &TaskDraft) -> Result<Task, ApiError> {
        self.send_json(
            reqwest::Method::POST,
            "/api/tasks",
            Some(&session.token),
            draft,
        )
    }

    fn update_task(
        &self,
        session: &Session,
        id: &str,
        draft: &TaskDraft,
    ) -> Result<Task, ApiError> {
        self.send_json(
            reqwest::Method::PUT,
            &format!("/api/tasks/{}", id),
            Some(&session.token),
            draft,
        )
    }

    fn set_status(&self, session: &Session, id: &str, status: Status) -> Result<Task, ApiError> {
        let body = json!({ "status": status });
        self.send_json(
            reqwest::Method::PUT,
            &format!("/api/tasks/{}", id),
            Some(&session.token),
            &body,
        )
    }

    fn delete_task(&self, session: &Session, id: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/tasks/{}", id)))
            .bearer_auth(&session.token)
            .send()?;
        Self::reject_on_error(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_prefers_server_message() {
        let err = ApiError::Rejected {
            status: 403,
            message: Some("Not allowed".into()),
        };
        assert_eq!(err.banner("Failed to save task"), "Not allowed");
    }

    #[test]
    fn banner_falls_back_per_operation() {
        let err = ApiError::Rejected {
            status: 500,
            message: None,
        };
        assert_eq!(err.banner("Failed to delete task"), "Failed to delete task");
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let backend = HttpBackend::new("http://localhost:5000/");
        assert_eq!(backend.url("/api/tasks"), "http://localhost:5000/api/tasks");
    }
}
