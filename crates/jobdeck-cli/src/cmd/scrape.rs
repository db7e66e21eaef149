//! `jobdeck scrape`: ask the backend to fetch new postings.

use crate::cmd::{Context, fail_api};
use crate::output::{OutputMode, render};
use clap::Args;
use jobdeck_core::list::{ListController, SCRAPE_RUNNING};
use serde::Serialize;
use std::io::{IsTerminal, Write};

#[derive(Args, Debug)]
pub struct ScrapeArgs {}

#[derive(Debug, Serialize)]
struct ScrapeOutput {
    ok: bool,
    message: String,
    /// Total jobs after the follow-up query, when it succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<u64>,
}

pub fn run_scrape(_args: &ScrapeArgs, output: OutputMode, ctx: &Context) -> anyhow::Result<()> {
    let mut list = ListController::new(ctx.config.page_size);

    if !output.is_json() && std::io::stderr().is_terminal() {
        eprintln!("{SCRAPE_RUNNING}");
    }

    if let Err(err) = list.scrape(&ctx.api) {
        let context = list.scrape_message().unwrap_or("scrape failed");
        return Err(fail_api(output, context, &err));
    }

    let result = ScrapeOutput {
        ok: true,
        message: list.scrape_message().unwrap_or_default().to_string(),
        total: list
            .error_message()
            .is_none()
            .then(|| list.pagination().total_items()),
    };

    render(output, &result, |r, w| {
        writeln!(w, "✓ {}", r.message)?;
        if let Some(total) = r.total {
            writeln!(w, "  {total} jobs listed")?;
        }
        Ok(())
    })
}
