//! jobdeck-core library.
//!
//! State machines behind the job listing client: filter criteria, the
//! checkbox codec, the page cursor, query composition, the list and form
//! controllers, and the HTTP transport they talk through.
//!
//! # Conventions
//!
//! - **Errors**: Typed `thiserror` enums at the transport and form seams;
//!   `anyhow::Result` for configuration loading.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod api;
pub mod checkbox;
pub mod config;
pub mod error;
pub mod filter;
pub mod form;
pub mod http;
pub mod list;
pub mod model;
pub mod pagination;
pub mod query;
pub mod session;

pub use api::{ApiError, JobPage, JobsApi};
pub use filter::{FilterState, FilterUpdate, SortOrder};
pub use http::HttpJobsApi;
pub use list::ListController;
pub use pagination::PaginationState;
pub use query::JobQuery;
pub use session::Session;
