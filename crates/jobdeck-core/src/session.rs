//! One owned container for the listing and form state.
//!
//! Front ends hold a [`Session`] and route every user action through it.
//! Form submits that succeed refresh the list with the current filters and
//! page.

use crate::api::{ApiError, JobsApi, ScrapeReply};
use crate::filter::{FilterField, FilterUpdate};
use crate::form::{FormError, FormSession, SubmitOutcome};
use crate::list::ListController;
use crate::model::{JobId, JobRecord};
use std::time::Instant;
use tracing::debug;

#[derive(Debug)]
pub struct Session<A> {
    api: A,
    list: ListController,
    form: FormSession,
}

impl<A: JobsApi> Session<A> {
    #[must_use]
    pub fn new(api: A, page_size: u32) -> Self {
        Self {
            api,
            list: ListController::new(page_size),
            form: FormSession::new(),
        }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn list(&self) -> &ListController {
        &self.list
    }

    pub const fn form(&self) -> &FormSession {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut FormSession {
        &mut self.form
    }

    /// Fetch the current page.
    ///
    /// # Errors
    ///
    /// Returns the failed query's [`ApiError`]; the list keeps its contents.
    pub fn load(&mut self) -> Result<(), ApiError> {
        self.list.refresh(&self.api)
    }

    /// # Errors
    ///
    /// Returns the failed query's [`ApiError`].
    pub fn apply_filter(&mut self, update: FilterUpdate) -> Result<bool, ApiError> {
        self.list.update_filter(&self.api, update)
    }

    /// String-keyed filter edit for command-line style input.
    ///
    /// # Errors
    ///
    /// Fails on an unknown sort value or a failed query.
    pub fn set_filter(&mut self, field: FilterField, value: &str) -> anyhow::Result<bool> {
        match self.list.begin_set_filter(field, value)? {
            Some(pending) => {
                self.list.execute(&self.api, pending)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// # Errors
    ///
    /// Returns the failed query's [`ApiError`].
    pub fn next_page(&mut self) -> Result<bool, ApiError> {
        self.list.next_page(&self.api)
    }

    /// # Errors
    ///
    /// Returns the failed query's [`ApiError`].
    pub fn prev_page(&mut self) -> Result<bool, ApiError> {
        self.list.prev_page(&self.api)
    }

    /// # Errors
    ///
    /// Returns the failed query's [`ApiError`].
    pub fn go_to_page(&mut self, page: u32) -> Result<bool, ApiError> {
        self.list.go_to_page(&self.api, page)
    }

    /// # Errors
    ///
    /// Returns the delete's [`ApiError`]; the list is refreshed either way.
    pub fn delete(&mut self, id: &JobId) -> Result<(), ApiError> {
        self.list.delete(&self.api, id)
    }

    /// # Errors
    ///
    /// Returns the scrape's [`ApiError`]; the list is refreshed either way.
    pub fn scrape(&mut self) -> Result<ScrapeReply, ApiError> {
        self.list.scrape(&self.api)
    }

    pub fn open_for_create(&mut self) {
        self.form.open_for_create();
    }

    pub fn open_for_edit(&mut self, record: JobRecord) {
        self.form.open_for_edit(record);
    }

    pub fn close_form(&mut self) {
        self.form.close();
    }

    /// Submit the form draft. On success the list is refreshed without
    /// touching filters or the page.
    ///
    /// # Errors
    ///
    /// See [`FormSession::submit`].
    pub fn submit_form(&mut self, now: Instant) -> Result<SubmitOutcome, FormError> {
        let outcome = self.form.submit(&self.api, now)?;
        if let Err(err) = self.list.refresh(&self.api) {
            debug!(error = %err, "refresh after submit failed");
        }
        Ok(outcome)
    }

    /// Clear the form flash and any finished scrape message.
    pub fn dismiss_messages(&mut self) {
        self.form.dismiss_message();
        self.list.clear_scrape_message();
    }

    /// Expire timed messages. Returns `true` if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.form.tick(now)
    }
}
