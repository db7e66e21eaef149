//! Add/edit form lifecycle: visibility, draft values, submit and flash
//! messages.

use crate::api::{ApiError, JobsApi};
use crate::error::ErrorCode;
use crate::model::{FormField, JobForm, JobRecord};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long a success message stays up.
pub const SUCCESS_FLASH_TTL: Duration = Duration::from_secs(3);

pub const ADDED_MESSAGE: &str = "Job added successfully!";
pub const UPDATED_MESSAGE: &str = "Job updated successfully!";
const FALLBACK_SERVER_MESSAGE: &str = "Something went wrong.";

/// Why a submit did not go through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// A required field is blank. Nothing was sent.
    #[error("Title, Company, and Job URL are required.")]
    Validation { missing: Vec<FormField> },

    /// The server rejected the request.
    #[error("Error: {0}")]
    Server(String),

    /// The request never got a response.
    #[error("Network error. Check backend server.")]
    Network,

    #[error("no form is open")]
    NotOpen,
}

impl FormError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::ValidationFailed,
            Self::Server(_) => ErrorCode::ServerRejected,
            Self::Network => ErrorCode::TransportFailed,
            Self::NotOpen => ErrorCode::InternalUnexpected,
        }
    }
}

impl From<ApiError> for FormError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport { .. } => Self::Network,
            ApiError::Server { message, .. } => {
                Self::Server(message.unwrap_or_else(|| FALLBACK_SERVER_MESSAGE.to_string()))
            }
            ApiError::Decode { .. } => Self::Server(FALLBACK_SERVER_MESSAGE.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

/// A user-facing message with the moment it was set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
    pub set_at: Instant,
}

/// A successful submit. The caller should refresh the list.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Option<JobRecord>),
    Updated(Option<JobRecord>),
}

impl SubmitOutcome {
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Created(_) => ADDED_MESSAGE,
            Self::Updated(_) => UPDATED_MESSAGE,
        }
    }

    /// The record the server echoed back, if any.
    #[must_use]
    pub const fn record(&self) -> Option<&JobRecord> {
        match self {
            Self::Created(record) | Self::Updated(record) => record.as_ref(),
        }
    }
}

/// State of the add/edit form.
///
/// Hidden by default. `editing` set means edit mode, unset means create.
/// A successful submit or [`FormSession::close`] hides the form and clears
/// `editing`; a failed submit leaves both and the draft untouched.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    visible: bool,
    editing: Option<JobRecord>,
    draft: JobForm,
    flash: Option<Flash>,
}

impl FormSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an empty form in create mode.
    pub fn open_for_create(&mut self) {
        self.visible = true;
        self.editing = None;
        self.draft = JobForm::blank();
    }

    /// Show the form pre-filled from `record`, in edit mode.
    pub fn open_for_edit(&mut self, record: JobRecord) {
        self.visible = true;
        self.draft = JobForm::from_record(&record);
        self.editing = Some(record);
    }

    /// Edit mode with an empty draft: only fields set afterwards are sent.
    pub fn open_for_patch(&mut self, record: JobRecord) {
        self.visible = true;
        self.draft = JobForm::default();
        self.editing = Some(record);
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.editing = None;
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub const fn editing(&self) -> Option<&JobRecord> {
        self.editing.as_ref()
    }

    #[must_use]
    pub const fn draft(&self) -> &JobForm {
        &self.draft
    }

    pub const fn draft_mut(&mut self) -> &mut JobForm {
        &mut self.draft
    }

    #[must_use]
    pub const fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    pub fn dismiss_message(&mut self) {
        self.flash = None;
    }

    /// Drop a success message once it has been up for [`SUCCESS_FLASH_TTL`].
    /// Returns `true` if something was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self.flash.as_ref().is_some_and(|flash| {
            flash.kind == FlashKind::Success
                && now.saturating_duration_since(flash.set_at) >= SUCCESS_FLASH_TTL
        });
        if expired {
            self.flash = None;
        }
        expired
    }

    /// Replace the draft with `values` and submit.
    ///
    /// # Errors
    ///
    /// See [`Self::submit`].
    pub fn submit_values<A: JobsApi>(
        &mut self,
        api: &A,
        values: JobForm,
        now: Instant,
    ) -> Result<SubmitOutcome, FormError> {
        self.draft = values;
        self.submit(api, now)
    }

    /// Validate the draft and send it: `PATCH` in edit mode, `POST`
    /// otherwise.
    ///
    /// # Errors
    ///
    /// [`FormError::Validation`] without touching the network when a
    /// required field is blank; [`FormError::Server`] or
    /// [`FormError::Network`] when the request fails; [`FormError::NotOpen`]
    /// when the form is hidden. The error text is also set as the flash.
    pub fn submit<A: JobsApi>(
        &mut self,
        api: &A,
        now: Instant,
    ) -> Result<SubmitOutcome, FormError> {
        if !self.visible {
            return Err(FormError::NotOpen);
        }
        self.flash = None;

        let missing = self.draft.missing_required(self.editing.is_some());
        if !missing.is_empty() {
            debug!(?missing, "form submit blocked by validation");
            return Err(self.fail(FormError::Validation { missing }, now));
        }

        let result = match &self.editing {
            Some(record) => api
                .update_job(&record.id, &self.draft)
                .map(SubmitOutcome::Updated),
            None => api.create_job(&self.draft).map(SubmitOutcome::Created),
        };

        match result {
            Ok(outcome) => {
                let id = self.editing.as_ref().map(|r| r.id.to_string());
                info!(id = id.as_deref().unwrap_or("new"), "{}", outcome.message());
                self.close();
                self.flash = Some(Flash {
                    kind: FlashKind::Success,
                    text: outcome.message().to_string(),
                    set_at: now,
                });
                Ok(outcome)
            }
            Err(err) => {
                warn!(error = %err, "form submit failed");
                Err(self.fail(FormError::from(err), now))
            }
        }
    }

    fn fail(&mut self, err: FormError, now: Instant) -> FormError {
        self.flash = Some(Flash {
            kind: FlashKind::Error,
            text: err.to_string(),
            set_at: now,
        });
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::tests::{transport_error, FakeApi};
    use crate::model::JobId;
    use serde_json::json;

    fn filled() -> JobForm {
        let mut form = JobForm::blank();
        form.set(FormField::Title, "Pricing Actuary");
        form.set(FormField::Company, "Acme Re");
        form.set(FormField::JobUrl, "https://jobs.example/1");
        form
    }

    fn record() -> JobRecord {
        serde_json::from_value(json!({
            "id": 12,
            "title": "Actuary",
            "company": "Acme",
            "job_url": "https://jobs.example/12",
        }))
        .expect("valid record")
    }

    #[test]
    fn hidden_by_default_and_open_close_cycle() {
        let mut form = FormSession::new();
        assert!(!form.is_visible());
        assert!(form.editing().is_none());

        form.open_for_edit(record());
        assert!(form.is_visible());
        assert_eq!(form.draft().get(FormField::Title), "Actuary");
        assert_eq!(form.editing().map(|r| &r.id), Some(&JobId::Number(12)));

        form.open_for_create();
        assert!(form.is_visible());
        assert!(form.editing().is_none());
        assert_eq!(form.draft().get(FormField::Title), "");

        form.close();
        assert!(!form.is_visible());
    }

    #[test]
    fn blank_title_is_rejected_without_network() {
        let api = FakeApi::default();
        let mut form = FormSession::new();
        form.open_for_create();
        let mut values = filled();
        values.set(FormField::Title, "");

        let err = form
            .submit_values(&api, values, Instant::now())
            .expect_err("validation fails");
        assert_eq!(err.to_string(), "Title, Company, and Job URL are required.");
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(api.calls().is_empty());
        assert!(form.is_visible());
        assert_eq!(
            form.flash().map(|f| (f.kind, f.text.as_str())),
            Some((FlashKind::Error, "Title, Company, and Job URL are required."))
        );
    }

    #[test]
    fn create_success_closes_and_flash_clears_after_three_seconds() {
        let api = FakeApi::default();
        let mut form = FormSession::new();
        form.open_for_create();
        let t0 = Instant::now();

        let outcome = form.submit_values(&api, filled(), t0).expect("created");
        assert_eq!(outcome, SubmitOutcome::Created(None));
        assert_eq!(api.calls(), ["create"]);
        assert!(!form.is_visible());
        assert!(form.editing().is_none());
        assert_eq!(form.flash().map(|f| f.text.as_str()), Some(ADDED_MESSAGE));

        assert!(!form.tick(t0 + Duration::from_millis(2999)));
        assert!(form.flash().is_some());
        assert!(form.tick(t0 + SUCCESS_FLASH_TTL));
        assert!(form.flash().is_none());
    }

    #[test]
    fn edit_sends_patch_for_record_id() {
        let api = FakeApi::default();
        let mut form = FormSession::new();
        form.open_for_edit(record());
        form.draft_mut().set(FormField::Salary, "90k");

        let outcome = form.submit(&api, Instant::now()).expect("updated");
        assert_eq!(outcome.message(), UPDATED_MESSAGE);
        assert_eq!(api.calls(), ["update 12"]);
        let sent = api.written.borrow()[0].clone();
        assert_eq!(sent.get(FormField::Company), "Acme");
        assert_eq!(sent.get(FormField::Salary), "90k");
    }

    #[test]
    fn edit_keeps_the_records_job_type() {
        let api = FakeApi::default();
        let mut form = FormSession::new();
        let mut job = record();
        job.job_type = Some("Full-time".into());
        form.open_for_edit(job);
        form.draft_mut().set(FormField::Title, "Senior Actuary");

        form.submit(&api, Instant::now()).expect("updated");
        assert_eq!(api.written.borrow()[0].job_type.as_deref(), Some("Full-time"));
    }

    #[test]
    fn patch_mode_accepts_absent_required_fields() {
        let api = FakeApi::default();
        let mut form = FormSession::new();
        form.open_for_patch(JobRecord::new(JobId::Number(4)));
        form.draft_mut().set(FormField::Posted, "1d ago");
        form.submit(&api, Instant::now()).expect("updated");
        assert_eq!(api.calls(), ["update 4"]);
        assert_eq!(api.written.borrow()[0], {
            let mut only = JobForm::default();
            only.set(FormField::Posted, "1d ago");
            only
        });
    }

    #[test]
    fn server_error_keeps_form_open_with_message() {
        let api = FakeApi {
            fail_writes: Some(ApiError::Server {
                status: 409,
                message: Some("Job URL already exists".into()),
            }),
            ..FakeApi::default()
        };
        let mut form = FormSession::new();
        form.open_for_create();
        let now = Instant::now();
        let err = form.submit_values(&api, filled(), now).expect_err("rejected");
        assert_eq!(err.to_string(), "Error: Job URL already exists");
        assert!(form.is_visible());
        assert_eq!(form.draft(), &filled());

        assert!(!form.tick(now + Duration::from_secs(60)), "errors do not expire");
        form.dismiss_message();
        assert!(form.flash().is_none());
    }

    #[test]
    fn server_error_without_body_and_network_error_messages() {
        let bare = FakeApi {
            fail_writes: Some(ApiError::Server {
                status: 500,
                message: None,
            }),
            ..FakeApi::default()
        };
        let mut form = FormSession::new();
        form.open_for_create();
        let err = form
            .submit_values(&bare, filled(), Instant::now())
            .expect_err("rejected");
        assert_eq!(err.to_string(), "Error: Something went wrong.");

        let offline = FakeApi {
            fail_writes: Some(transport_error()),
            ..FakeApi::default()
        };
        let err = form.submit(&offline, Instant::now()).expect_err("offline");
        assert_eq!(err, FormError::Network);
        assert_eq!(
            form.flash().map(|f| f.text.as_str()),
            Some("Network error. Check backend server.")
        );
    }

    #[test]
    fn submit_on_hidden_form_is_refused() {
        let api = FakeApi::default();
        let mut form = FormSession::new();
        assert_eq!(
            form.submit(&api, Instant::now()),
            Err(FormError::NotOpen)
        );
        assert!(api.calls().is_empty());
    }
}
