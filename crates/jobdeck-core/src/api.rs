//! Transport contract between the state machines and the jobs API.
//!
//! [`JobsApi`] is the only thing the controllers know about the network.
//! [`crate::http::HttpJobsApi`] implements it over HTTP; tests substitute
//! in-memory fakes.

use crate::error::ErrorCode;
use crate::model::{JobForm, JobId, JobRecord};
use crate::query::JobQuery;
use serde::Serialize;
use serde_json::Value;

/// Failure of a single API request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request could not be completed (connection refused, DNS, reset).
    #[error("request to {url} failed: {detail}")]
    Transport { url: String, detail: String },

    /// The server answered with a non-success status.
    #[error("server returned {status}: {}", message.as_deref().unwrap_or("no error message"))]
    Server {
        status: u16,
        /// The `error` field of the JSON body, when there is one.
        message: Option<String>,
    },

    /// A success response whose body could not be understood.
    #[error("could not decode response from {url}: {detail}")]
    Decode { url: String, detail: String },
}

impl ApiError {
    /// Machine-readable code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Transport { .. } => ErrorCode::TransportFailed,
            Self::Server { status: 404, .. } => ErrorCode::JobNotFound,
            Self::Server { .. } => ErrorCode::ServerRejected,
            Self::Decode { .. } => ErrorCode::ResponseDecodeFailed,
        }
    }

    /// Returns true for failures where no response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// The server-reported message, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// One page of results from the collection endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPage {
    pub jobs: Vec<JobRecord>,
    /// Total matching jobs across all pages.
    pub total: u64,
}

impl JobPage {
    /// Interpret a collection response body.
    ///
    /// Accepts `{"jobs": [...], "total": n}` or a bare array. When `total`
    /// is missing (or not a non-negative integer) the array length is used.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the body is neither shape
    /// or a record fails to parse.
    pub fn from_body(body: Value) -> Result<Self, String> {
        let (jobs, total) = match body {
            Value::Array(items) => (items, None),
            Value::Object(mut map) => {
                let total = map.get("total").and_then(Value::as_u64);
                match map.remove("jobs") {
                    Some(Value::Array(items)) => (items, total),
                    Some(other) => return Err(format!("`jobs` is not an array: {other}")),
                    None => return Err("object body has no `jobs` array".to_string()),
                }
            }
            other => return Err(format!("unexpected body: {other}")),
        };

        let jobs = jobs
            .into_iter()
            .map(serde_json::from_value::<JobRecord>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid job record: {e}"))?;
        let total = total.unwrap_or(jobs.len() as u64);
        Ok(Self { jobs, total })
    }
}

/// Body of a scrape trigger response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScrapeReply {
    pub message: Option<String>,
}

/// Operations the jobs API offers.
///
/// Calls block until the response arrives. There is no cancellation and
/// no retry; callers decide how to surface failures.
pub trait JobsApi {
    /// `GET /api/jobs` with the query parameters of `query`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or an
    /// unreadable body.
    fn list_jobs(&self, query: &JobQuery) -> Result<JobPage, ApiError>;

    /// `POST /api/jobs`. Returns the created record when the server echoes it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-2xx status.
    fn create_job(&self, form: &JobForm) -> Result<Option<JobRecord>, ApiError>;

    /// `PATCH /api/jobs/{id}`. Returns the updated record when echoed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-2xx status.
    fn update_job(&self, id: &JobId, form: &JobForm) -> Result<Option<JobRecord>, ApiError>;

    /// `DELETE /api/jobs/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-2xx status.
    fn delete_job(&self, id: &JobId) -> Result<(), ApiError>;

    /// `POST /api/jobs/scrape`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-2xx status.
    fn trigger_scrape(&self) -> Result<ScrapeReply, ApiError>;
}

impl<T: JobsApi + ?Sized> JobsApi for &T {
    fn list_jobs(&self, query: &JobQuery) -> Result<JobPage, ApiError> {
        (**self).list_jobs(query)
    }

    fn create_job(&self, form: &JobForm) -> Result<Option<JobRecord>, ApiError> {
        (**self).create_job(form)
    }

    fn update_job(&self, id: &JobId, form: &JobForm) -> Result<Option<JobRecord>, ApiError> {
        (**self).update_job(id, form)
    }

    fn delete_job(&self, id: &JobId) -> Result<(), ApiError> {
        (**self).delete_job(id)
    }

    fn trigger_scrape(&self) -> Result<ScrapeReply, ApiError> {
        (**self).trigger_scrape()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrapped_body_uses_reported_total() {
        let page = JobPage::from_body(json!({
            "jobs": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}],
            "total": 42,
        }))
        .expect("wrapped body");
        assert_eq!(page.jobs.len(), 2);
        assert_eq!(page.total, 42);
    }

    #[test]
    fn wrapped_body_without_total_falls_back_to_length() {
        let page = JobPage::from_body(json!({"jobs": [{"id": 1}]})).expect("wrapped body");
        assert_eq!(page.total, 1);
    }

    #[test]
    fn bare_array_uses_length_as_total() {
        let page = JobPage::from_body(json!([{"id": 1}, {"id": 2}, {"id": 3}])).expect("array");
        assert_eq!(page.total, 3);
        assert_eq!(page.jobs[2].id, JobId::Number(3));
    }

    #[test]
    fn empty_array_is_zero_total() {
        let page = JobPage::from_body(json!([])).expect("array");
        assert!(page.jobs.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(JobPage::from_body(json!("nope")).is_err());
        assert!(JobPage::from_body(json!({"items": []})).is_err());
        assert!(JobPage::from_body(json!({"jobs": 3})).is_err());
        assert!(JobPage::from_body(json!([{"title": "no id"}])).is_err());
    }

    #[test]
    fn error_codes_follow_taxonomy() {
        let transport = ApiError::Transport {
            url: "http://x".into(),
            detail: "refused".into(),
        };
        assert!(transport.is_transport());
        assert_eq!(transport.code(), ErrorCode::TransportFailed);

        let missing = ApiError::Server {
            status: 404,
            message: None,
        };
        assert_eq!(missing.code(), ErrorCode::JobNotFound);
        assert_eq!(missing.to_string(), "server returned 404: no error message");

        let rejected = ApiError::Server {
            status: 400,
            message: Some("duplicate job_url".into()),
        };
        assert_eq!(rejected.server_message(), Some("duplicate job_url"));
        assert_eq!(rejected.code(), ErrorCode::ServerRejected);
    }
}
