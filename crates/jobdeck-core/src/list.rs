//! Fetch-on-change controller for the job listing.
//!
//! Every observed change to the filters or the page cursor issues exactly
//! one query. Queries carry a [`Ticket`]; only the response to the most
//! recently issued ticket is applied, so a slow response to an older query
//! can never overwrite a newer one.
//!
//! Two ways to drive it:
//!
//! - `begin_*` returns a [`PendingQuery`] and [`ListController::complete`]
//!   applies the matching response. Front ends that run requests elsewhere
//!   use this pair.
//! - The blocking helpers ([`ListController::refresh`],
//!   [`ListController::update_filter`], ...) do both against a [`JobsApi`].

use crate::api::{ApiError, JobPage, JobsApi, ScrapeReply};
use crate::filter::{FilterField, FilterState, FilterUpdate, ParseSortError};
use crate::model::{JobId, JobRecord};
use crate::pagination::PaginationState;
use crate::query::JobQuery;
use tracing::{debug, info, warn};

/// Message shown while a scrape is outstanding.
pub const SCRAPE_RUNNING: &str = "Scraping jobs, please wait...";
/// Message shown after a scrape succeeds without a server message.
pub const SCRAPE_DONE: &str = "Scraping completed!";
/// Message shown after a scrape fails.
pub const SCRAPE_FAILED: &str = "Scraping failed. Check backend.";

/// Identifies one issued query. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// A query that has been issued and is awaiting its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub ticket: Ticket,
    pub query: JobQuery,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    Idle,
    Loading,
    /// Last query failed; the message is meant for the user.
    Error(String),
}

/// What [`ListController::complete`] did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The ticket was superseded; nothing changed.
    Stale,
    /// The list and total were replaced.
    Applied,
    /// The query failed; the previous list is kept.
    Failed,
    /// The page fell past the last page and was clamped. The list was
    /// replaced and a follow-up query for the clamped page was issued.
    Requery(PendingQuery),
}

/// Displayed list, cursor and filters, plus the scrape indicator.
#[derive(Debug, Clone)]
pub struct ListController {
    filters: FilterState,
    pagination: PaginationState,
    jobs: Vec<JobRecord>,
    status: ListStatus,
    issued: u64,
    scraping: bool,
    scrape_message: Option<String>,
}

impl Default for ListController {
    fn default() -> Self {
        Self::new(PaginationState::default().page_size())
    }
}

impl ListController {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            filters: FilterState::default(),
            pagination: PaginationState::new(page_size),
            jobs: Vec::new(),
            status: ListStatus::Idle,
            issued: 0,
            scraping: false,
            scrape_message: None,
        }
    }

    /// Start from known criteria and page, e.g. from command-line flags.
    #[must_use]
    pub fn with_state(filters: FilterState, page_size: u32, page: u32) -> Self {
        let mut list = Self::new(page_size);
        list.filters = filters;
        list.pagination.go_to(page);
        list
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub const fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    #[must_use]
    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    #[must_use]
    pub const fn status(&self) -> &ListStatus {
        &self.status
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, ListStatus::Loading)
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            ListStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub const fn scraping(&self) -> bool {
        self.scraping
    }

    #[must_use]
    pub fn scrape_message(&self) -> Option<&str> {
        self.scrape_message.as_deref()
    }

    pub fn clear_scrape_message(&mut self) {
        if !self.scraping {
            self.scrape_message = None;
        }
    }

    /// The query the current state maps to, without issuing it.
    #[must_use]
    pub fn current_query(&self) -> JobQuery {
        JobQuery::build(&self.filters, &self.pagination)
    }

    // -----------------------------------------------------------------------
    // Ticketed transitions
    // -----------------------------------------------------------------------

    /// Issue a query for the current filters and page.
    pub fn begin_refresh(&mut self) -> PendingQuery {
        self.issued += 1;
        let pending = PendingQuery {
            ticket: Ticket(self.issued),
            query: self.current_query(),
        };
        self.status = ListStatus::Loading;
        debug!(
            ticket = self.issued,
            query = %pending.query.to_query_string(),
            "issued job query"
        );
        pending
    }

    /// Apply a filter edit. A change resets the page to 1 and issues a
    /// query; an edit that changes nothing issues none.
    pub fn begin_filter_update(&mut self, update: FilterUpdate) -> Option<PendingQuery> {
        if !self.filters.apply(update) {
            return None;
        }
        self.pagination.reset_page();
        Some(self.begin_refresh())
    }

    /// String-keyed variant of [`Self::begin_filter_update`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseSortError`] for an unknown sort value; nothing is
    /// issued in that case.
    pub fn begin_set_filter(
        &mut self,
        field: FilterField,
        value: &str,
    ) -> Result<Option<PendingQuery>, ParseSortError> {
        if !self.filters.set(field, value)? {
            return Ok(None);
        }
        self.pagination.reset_page();
        Ok(Some(self.begin_refresh()))
    }

    /// Advance one page, if there is one.
    pub fn begin_next_page(&mut self) -> Option<PendingQuery> {
        self.pagination.next().then(|| self.begin_refresh())
    }

    /// Go back one page, unless already on the first.
    pub fn begin_prev_page(&mut self) -> Option<PendingQuery> {
        self.pagination.prev().then(|| self.begin_refresh())
    }

    /// Jump to `page`. Filters are left alone.
    pub fn begin_go_to_page(&mut self, page: u32) -> Option<PendingQuery> {
        self.pagination.go_to(page).then(|| self.begin_refresh())
    }

    /// Apply the response to `ticket`.
    pub fn complete(&mut self, ticket: Ticket, result: Result<JobPage, ApiError>) -> Completion {
        if ticket.0 != self.issued {
            debug!(
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale job query response"
            );
            return Completion::Stale;
        }

        match result {
            Ok(page) => {
                debug!(
                    ticket = ticket.0,
                    count = page.jobs.len(),
                    total = page.total,
                    "job query succeeded"
                );
                self.jobs = page.jobs;
                self.pagination.set_total(page.total);
                self.status = ListStatus::Idle;
                if self.pagination.clamp_to_last_page() {
                    debug!(page = self.pagination.page(), "page past end; re-querying");
                    return Completion::Requery(self.begin_refresh());
                }
                Completion::Applied
            }
            Err(err) => {
                warn!(ticket = ticket.0, error = %err, "job query failed");
                self.status = ListStatus::Error(load_failure_message(&err));
                Completion::Failed
            }
        }
    }

    // -----------------------------------------------------------------------
    // Blocking helpers
    // -----------------------------------------------------------------------

    /// Re-run the current query and apply the result.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the failed query. The displayed list is
    /// kept and the status moves to [`ListStatus::Error`].
    pub fn refresh<A: JobsApi>(&mut self, api: &A) -> Result<(), ApiError> {
        let pending = self.begin_refresh();
        self.execute(api, pending)
    }

    /// Apply a filter edit and, if it changed anything, fetch page 1.
    ///
    /// Returns `true` if a query was issued.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the failed query.
    pub fn update_filter<A: JobsApi>(
        &mut self,
        api: &A,
        update: FilterUpdate,
    ) -> Result<bool, ApiError> {
        self.run_optional(api, |list| list.begin_filter_update(update))
    }

    /// Advance one page and fetch it.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the failed query.
    pub fn next_page<A: JobsApi>(&mut self, api: &A) -> Result<bool, ApiError> {
        self.run_optional(api, Self::begin_next_page)
    }

    /// Go back one page and fetch it.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the failed query.
    pub fn prev_page<A: JobsApi>(&mut self, api: &A) -> Result<bool, ApiError> {
        self.run_optional(api, Self::begin_prev_page)
    }

    /// Jump to `page` and fetch it.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the failed query.
    pub fn go_to_page<A: JobsApi>(&mut self, api: &A, page: u32) -> Result<bool, ApiError> {
        self.run_optional(api, |list| list.begin_go_to_page(page))
    }

    /// Delete one job, then re-run the current query whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns the delete's [`ApiError`]. A failed refresh is reflected in
    /// [`Self::status`] only.
    pub fn delete<A: JobsApi>(&mut self, api: &A, id: &JobId) -> Result<(), ApiError> {
        let outcome = api.delete_job(id);
        match &outcome {
            Ok(()) => info!(%id, "deleted job"),
            Err(err) => warn!(%id, error = %err, "delete failed"),
        }
        if let Err(err) = self.refresh(api) {
            debug!(error = %err, "refresh after delete failed");
        }
        outcome
    }

    /// Mark a scrape as outstanding. Returns `false` if one already is.
    pub fn begin_scrape(&mut self) -> bool {
        if self.scraping {
            return false;
        }
        self.scraping = true;
        self.scrape_message = Some(SCRAPE_RUNNING.to_string());
        true
    }

    /// Record the scrape outcome and return the message now shown.
    pub fn finish_scrape(&mut self, result: &Result<ScrapeReply, ApiError>) -> &str {
        self.scraping = false;
        let message = match result {
            Ok(reply) => {
                info!(message = reply.message.as_deref().unwrap_or(""), "scrape finished");
                reply
                    .message
                    .clone()
                    .unwrap_or_else(|| SCRAPE_DONE.to_string())
            }
            Err(err) => {
                warn!(error = %err, "scrape failed");
                SCRAPE_FAILED.to_string()
            }
        };
        self.scrape_message.insert(message)
    }

    /// Trigger a scrape and refresh the list afterwards.
    ///
    /// # Errors
    ///
    /// Returns the scrape's [`ApiError`]. A failed refresh is reflected in
    /// [`Self::status`] only.
    pub fn scrape<A: JobsApi>(&mut self, api: &A) -> Result<ScrapeReply, ApiError> {
        self.begin_scrape();
        let result = api.trigger_scrape();
        self.finish_scrape(&result);
        if let Err(err) = self.refresh(api) {
            debug!(error = %err, "refresh after scrape failed");
        }
        result
    }

    fn run_optional<A: JobsApi>(
        &mut self,
        api: &A,
        begin: impl FnOnce(&mut Self) -> Option<PendingQuery>,
    ) -> Result<bool, ApiError> {
        match begin(self) {
            Some(pending) => self.execute(api, pending).map(|()| true),
            None => Ok(false),
        }
    }

    /// Run an issued query to completion, following any clamp re-query.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the failed query.
    pub fn execute<A: JobsApi>(&mut self, api: &A, mut pending: PendingQuery) -> Result<(), ApiError> {
        loop {
            let result = api.list_jobs(&pending.query);
            let failure = result.as_ref().err().cloned();
            match self.complete(pending.ticket, result) {
                Completion::Requery(next) => pending = next,
                Completion::Applied | Completion::Stale => return Ok(()),
                Completion::Failed => {
                    return failure.map_or(Ok(()), Err);
                }
            }
        }
    }
}

fn load_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Transport { .. } => "Network error. Check backend server.".to_string(),
        ApiError::Server {
            message: Some(message),
            ..
        } => format!("Failed to load jobs: {message}"),
        other => format!("Failed to load jobs: {other}"),
    }
}
