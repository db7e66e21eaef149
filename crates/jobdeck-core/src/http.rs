//! Blocking HTTP implementation of [`JobsApi`] on top of `ureq`.

use crate::api::{ApiError, JobPage, JobsApi, ScrapeReply};
use crate::model::{JobForm, JobId, JobRecord};
use crate::query::JobQuery;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Base URL used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

const USER_AGENT: &str = concat!("jobdeck/", env!("CARGO_PKG_VERSION"));

/// Client for the jobs API rooted at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpJobsApi {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpJobsApi {
    /// Build a client. `timeout` of `None` waits indefinitely.
    #[must_use]
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/jobs", self.base_url)
    }

    /// `/api/jobs/<id>` with the id percent-encoded as a single path segment.
    fn resource_url(&self, id: &JobId) -> String {
        let collection = self.collection_url();
        let id = id.to_string();
        let Ok(mut url) = url::Url::parse(&collection) else {
            // Unparseable base; the request itself reports the transport error.
            return format!("{collection}/{id}");
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id);
        }
        url.into()
    }

    fn scrape_url(&self) -> String {
        format!("{}/api/jobs/scrape", self.base_url)
    }
}

impl JobsApi for HttpJobsApi {
    fn list_jobs(&self, query: &JobQuery) -> Result<JobPage, ApiError> {
        let url = self.collection_url();
        debug!(%url, query = %query.to_query_string(), "GET jobs");

        let mut request = self.agent.get(&url).set("Accept", "application/json");
        for (key, value) in query.pairs() {
            request = request.query(key, &value);
        }
        let response = request.call().map_err(|err| map_error(&url, err))?;
        let body: Value = response.into_json().map_err(|err| ApiError::Decode {
            url: url.clone(),
            detail: err.to_string(),
        })?;
        JobPage::from_body(body).map_err(|detail| ApiError::Decode { url, detail })
    }

    fn create_job(&self, form: &JobForm) -> Result<Option<JobRecord>, ApiError> {
        let url = self.collection_url();
        debug!(%url, "POST job");
        let response = self
            .agent
            .post(&url)
            .send_json(form)
            .map_err(|err| map_error(&url, err))?;
        Ok(echoed_record(response))
    }

    fn update_job(&self, id: &JobId, form: &JobForm) -> Result<Option<JobRecord>, ApiError> {
        let url = self.resource_url(id);
        debug!(%url, "PATCH job");
        let response = self
            .agent
            .request("PATCH", &url)
            .send_json(form)
            .map_err(|err| map_error(&url, err))?;
        Ok(echoed_record(response))
    }

    fn delete_job(&self, id: &JobId) -> Result<(), ApiError> {
        let url = self.resource_url(id);
        debug!(%url, "DELETE job");
        self.agent
            .delete(&url)
            .call()
            .map_err(|err| map_error(&url, err))?;
        Ok(())
    }

    fn trigger_scrape(&self) -> Result<ScrapeReply, ApiError> {
        let url = self.scrape_url();
        debug!(%url, "POST scrape");
        let response = self
            .agent
            .post(&url)
            .call()
            .map_err(|err| map_error(&url, err))?;
        let message = response
            .into_json::<Value>()
            .ok()
            .and_then(|body| text_field(&body, "message"));
        Ok(ScrapeReply { message })
    }
}

/// Turn a `ureq` failure into the transport/server split of [`ApiError`].
fn map_error(url: &str, err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, response) => {
            let message = response
                .into_json::<Value>()
                .ok()
                .and_then(|body| text_field(&body, "error").or_else(|| text_field(&body, "message")));
            warn!(%url, status, message = message.as_deref().unwrap_or(""), "jobs API rejected request");
            ApiError::Server { status, message }
        }
        ureq::Error::Transport(transport) => {
            warn!(%url, error = %transport, "jobs API unreachable");
            ApiError::Transport {
                url: url.to_string(),
                detail: transport.to_string(),
            }
        }
    }
}

/// Parse the body of a create/update response as a record, if it is one.
fn echoed_record(response: ureq::Response) -> Option<JobRecord> {
    let body = response.into_string().ok()?;
    if body.trim().is_empty() {
        return None;
    }
    let value: Value = serde_json::from_str(&body).ok()?;
    let candidate = value.get("job").cloned().unwrap_or(value);
    serde_json::from_value(candidate).ok()
}

fn text_field(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterState, FilterUpdate, SortOrder};
    use crate::model::FormField;
    use crate::pagination::PaginationState;
    use httpmock::prelude::*;
    use serde_json::json;

    fn api(server: &MockServer) -> HttpJobsApi {
        HttpJobsApi::new(&server.base_url(), Some(Duration::from_secs(5)))
    }

    #[test]
    fn list_sends_every_query_parameter() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/jobs")
                .query_param("keyword", "actuary")
                .query_param("location", "USA,UK")
                .query_param("tag", "")
                .query_param("job_type", "")
                .query_param("sort", "title_asc")
                .query_param("page", "2")
                .query_param("limit", "15");
            then.status(200)
                .json_body(json!({"jobs": [{"id": 16, "title": "Actuary"}], "total": 16}));
        });

        let mut filters = FilterState::default();
        filters.apply(FilterUpdate::Keyword("actuary".into()));
        filters.apply(FilterUpdate::ToggleCountry("USA".into()));
        filters.apply(FilterUpdate::ToggleCountry("UK".into()));
        filters.apply(FilterUpdate::Sort(SortOrder::TitleAsc));
        let mut pagination = PaginationState::new(15);
        pagination.go_to(2);

        let page = api(&server)
            .list_jobs(&JobQuery::build(&filters, &pagination))
            .expect("list succeeds");
        mock.assert();
        assert_eq!(page.total, 16);
        assert_eq!(page.jobs[0].title.as_deref(), Some("Actuary"));
    }

    #[test]
    fn list_accepts_bare_array() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/jobs");
            then.status(200).json_body(json!([{"id": 1}, {"id": 2}]));
        });
        let query = JobQuery::build(&FilterState::default(), &PaginationState::default());
        let page = api(&server).list_jobs(&query).expect("list succeeds");
        assert_eq!(page.total, 2);
    }

    #[test]
    fn non_success_status_carries_server_error_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/jobs");
            then.status(400).json_body(json!({"error": "job_url already exists"}));
        });
        let err = api(&server)
            .create_job(&JobForm::blank())
            .expect_err("create rejected");
        assert_eq!(
            err,
            ApiError::Server {
                status: 400,
                message: Some("job_url already exists".into()),
            }
        );
    }

    #[test]
    fn unparseable_list_body_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/jobs");
            then.status(200).body("<html>not json</html>");
        });
        let query = JobQuery::build(&FilterState::default(), &PaginationState::default());
        let err = api(&server).list_jobs(&query).expect_err("decode fails");
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn create_posts_form_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/jobs")
                .json_body_partial(r#"{"title": "Pricing Actuary", "company": "Acme"}"#);
            then.status(201).json_body(json!({"id": 9, "title": "Pricing Actuary"}));
        });
        let mut form = JobForm::blank();
        form.set(FormField::Title, "Pricing Actuary");
        form.set(FormField::Company, "Acme");
        form.set(FormField::JobUrl, "http://x");
        let created = api(&server).create_job(&form).expect("create succeeds");
        mock.assert();
        assert_eq!(created.map(|r| r.id), Some(JobId::Number(9)));
    }

    #[test]
    fn create_without_echo_returns_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/jobs");
            then.status(201).json_body(json!({"message": "Job added"}));
        });
        let created = api(&server).create_job(&JobForm::blank()).expect("create succeeds");
        assert!(created.is_none());
    }

    #[test]
    fn update_patches_resource_with_supplied_fields_only() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("PATCH")
                .path("/api/jobs/12")
                .json_body(json!({"salary": "90k"}));
            then.status(200);
        });
        let mut form = JobForm::default();
        form.set(FormField::Salary, "90k");
        api(&server)
            .update_job(&JobId::Number(12), &form)
            .expect("update succeeds");
        mock.assert();
    }

    #[test]
    fn delete_addresses_resource() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/api/jobs/7");
            then.status(204);
        });
        api(&server)
            .delete_job(&JobId::Number(7))
            .expect("delete succeeds");
        mock.assert();
    }

    #[test]
    fn delete_with_spaced_text_id_hits_the_resource() {
        let server = MockServer::start();
        // Matched whether or not the mock server decodes the path.
        let encoded = server.mock(|when, then| {
            when.method(DELETE).path("/api/jobs/a%20b");
            then.status(204);
        });
        let decoded = server.mock(|when, then| {
            when.method(DELETE).path("/api/jobs/a b");
            then.status(204);
        });
        api(&server)
            .delete_job(&JobId::Text("a b".into()))
            .expect("delete succeeds");
        assert_eq!(encoded.hits() + decoded.hits(), 1);
    }

    #[test]
    fn scrape_reads_message_or_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/jobs/scrape");
            then.status(200).json_body(json!({"message": "Scraped 12 jobs"}));
        });
        let reply = api(&server).trigger_scrape().expect("scrape succeeds");
        assert_eq!(reply.message.as_deref(), Some("Scraped 12 jobs"));

        let quiet = MockServer::start();
        quiet.mock(|when, then| {
            when.method(POST).path("/api/jobs/scrape");
            then.status(200).body("");
        });
        let reply = api(&quiet).trigger_scrape().expect("scrape succeeds");
        assert_eq!(reply.message, None);
    }

    #[test]
    fn unreachable_server_is_transport_error() {
        let api = HttpJobsApi::new("http://127.0.0.1:1", Some(Duration::from_secs(2)));
        let err = api.delete_job(&JobId::Number(1)).expect_err("nothing listens on port 1");
        assert!(err.is_transport());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpJobsApi::new("http://localhost:5000/", None);
        assert_eq!(api.base_url(), "http://localhost:5000");
        assert_eq!(
            api.resource_url(&JobId::Text("a b".into())),
            "http://localhost:5000/api/jobs/a%20b"
        );
    }

    #[test]
    fn resource_id_is_a_single_path_segment() {
        let api = HttpJobsApi::new("http://localhost:5000", None);
        assert_eq!(
            api.resource_url(&JobId::Text("x/y?z#1".into())),
            "http://localhost:5000/api/jobs/x%2Fy%3Fz%231"
        );
        assert_eq!(
            api.resource_url(&JobId::Text("a+b".into())),
            "http://localhost:5000/api/jobs/a+b"
        );
    }
}
