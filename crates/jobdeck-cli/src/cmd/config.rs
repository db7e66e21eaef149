use crate::cmd::Context;
use crate::output::{OutputMode, pretty_kv, pretty_section, render};
use anyhow::{Result, anyhow};
use clap::Args;
use jobdeck_core::config::{EffectiveConfig, user_config_path};
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the config file location and exit.
    #[arg(long)]
    pub path: bool,
}

/// Print where the user config file lives (whether or not it exists).
///
/// # Errors
///
/// Returns an error if no config directory can be determined.
pub fn print_config_path() -> Result<()> {
    let path = user_config_path().ok_or_else(|| anyhow!("no config directory on this platform"))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", path.display())?;
    Ok(())
}

pub fn run_config(_args: &ConfigArgs, output: OutputMode, ctx: &Context) -> Result<()> {
    render(output, &ctx.config, |cfg, w| render_config_human(cfg, output, w))
}

fn render_config_human(cfg: &EffectiveConfig, output: OutputMode, w: &mut dyn Write) -> io::Result<()> {
    let file = cfg
        .config_file
        .as_ref()
        .map_or_else(|| "(none)".to_string(), |p| p.display().to_string());
    let timeout = cfg
        .timeout_secs
        .map_or_else(|| "off".to_string(), |secs| format!("{secs}s"));

    if output == OutputMode::Pretty {
        pretty_section(w, "Effective configuration")?;
        pretty_kv(w, "api_url", &cfg.api_url)?;
        pretty_kv(w, "page_size", cfg.page_size.to_string())?;
        pretty_kv(w, "timeout", timeout)?;
        pretty_kv(w, "output", &cfg.resolved_output)?;
        pretty_kv(w, "file", file)?;
    } else {
        writeln!(w, "api_url={}", cfg.api_url)?;
        writeln!(w, "page_size={}", cfg.page_size)?;
        writeln!(w, "timeout={timeout}")?;
        writeln!(w, "output={}", cfg.resolved_output)?;
        writeln!(w, "file={file}")?;
    }
    Ok(())
}
