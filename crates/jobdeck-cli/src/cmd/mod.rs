//! Subcommand handlers.
//!
//! Each handler takes its parsed args, the resolved [`OutputMode`](crate::output::OutputMode)
//! and a shared [`Context`].

pub mod browse;
pub mod completions;
pub mod config;
pub mod create;
pub mod delete;
pub mod list;
pub mod scrape;
pub mod update;

use crate::output::{CliError, OutputMode, render_error};
use jobdeck_core::api::ApiError;
use jobdeck_core::config::{CliOverrides, EffectiveConfig, resolve_config};
use jobdeck_core::form::FormError;
use jobdeck_core::http::HttpJobsApi;
use tracing::debug;

/// Resolved settings and a transport built from them.
#[derive(Debug)]
pub struct Context {
    pub config: EffectiveConfig,
    pub api: HttpJobsApi,
}

impl Context {
    /// Load configuration and build the HTTP transport.
    ///
    /// # Errors
    ///
    /// Fails on an unreadable config file or an invalid setting.
    pub fn resolve(overrides: &CliOverrides) -> anyhow::Result<Self> {
        let config = resolve_config(overrides)?;
        debug!(api_url = %config.api_url, page_size = config.page_size, "resolved config");
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: EffectiveConfig) -> Self {
        let api = HttpJobsApi::new(&config.api_url, config.timeout());
        Self { config, api }
    }
}

/// Render an API failure and turn it into the command's error.
pub fn fail_api(output: OutputMode, context: &str, err: &ApiError) -> anyhow::Error {
    if let Err(render_err) = render_error(output, &CliError::from(err)) {
        debug!(error = %render_err, "could not render error");
    }
    anyhow::anyhow!("{context}: {err}")
}

/// Render a form failure and turn it into the command's error.
pub fn fail_form(output: OutputMode, err: &FormError) -> anyhow::Error {
    if let Err(render_err) = render_error(output, &CliError::from(err)) {
        debug!(error = %render_err, "could not render error");
    }
    anyhow::anyhow!("{err}")
}
