//! `jobdeck delete`: remove one job, then report what the listing looks like.
//!
//! The current (default) listing is re-queried whether or not the delete
//! succeeded, matching the browser.

use crate::cmd::{Context, fail_api};
use crate::output::{OutputMode, render, render_success};
use clap::Args;
use jobdeck_core::list::ListController;
use jobdeck_core::model::JobId;
use serde::Serialize;
use std::io::{IsTerminal, Write};
use tracing::debug;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// ID of the job to delete.
    pub id: String,

    /// Skip interactive confirmation prompt.
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct DeleteOutput {
    ok: bool,
    id: String,
    /// Total jobs after the follow-up query, when it succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    remaining: Option<u64>,
}

fn confirm_delete(id: &str) -> anyhow::Result<bool> {
    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        return Ok(true);
    }

    eprint!("Are you sure you want to delete job {id}? [y/N] ");
    std::io::stderr().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(is_yes(&input))
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim().to_ascii_lowercase();
    answer == "y" || answer == "yes"
}

pub fn run_delete(args: &DeleteArgs, output: OutputMode, ctx: &Context) -> anyhow::Result<()> {
    if !args.force && !confirm_delete(&args.id)? {
        render_success(output, "Delete cancelled")?;
        return Ok(());
    }

    let id = JobId::from(args.id.as_str());
    let mut list = ListController::new(ctx.config.page_size);
    if let Err(err) = list.delete(&ctx.api, &id) {
        return Err(fail_api(output, &format!("failed to delete job {id}"), &err));
    }

    let remaining = if list.error_message().is_some() {
        debug!("listing refresh after delete failed");
        None
    } else {
        Some(list.pagination().total_items())
    };
    let result = DeleteOutput {
        ok: true,
        id: id.to_string(),
        remaining,
    };

    render(output, &result, |r, w| {
        writeln!(w, "✓ Deleted job {}", r.id)?;
        if let Some(total) = r.remaining {
            writeln!(w, "  {total} jobs remaining")?;
        }
        Ok(())
    })
}
