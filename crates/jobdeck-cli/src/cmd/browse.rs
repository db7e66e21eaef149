use crate::cmd::Context;
use crate::tui;
use anyhow::Result;
use clap::Args;
use std::io::IsTerminal;
use tracing::info;

#[derive(Args, Debug, Default)]
pub struct BrowseArgs {}

/// Open the full-screen browser against the configured backend.
///
/// # Errors
///
/// Fails when stdout is not a terminal or the terminal cannot be driven.
pub fn run_browse(_args: &BrowseArgs, ctx: &Context) -> Result<()> {
    if !std::io::stdout().is_terminal() {
        anyhow::bail!("browse needs an interactive terminal; use `jobdeck list` instead");
    }
    info!(api_url = %ctx.config.api_url, "opening browser");
    tui::run_browser(&ctx.api, ctx.config.page_size)
}
