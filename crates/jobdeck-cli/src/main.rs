#![forbid(unsafe_code)]

mod cmd;
mod output;
mod tui;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "jobdeck: browse and curate job listings from the terminal",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format (pretty, text, json).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Base URL of the jobs API (overrides JOBDECK_API_URL and config).
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Resolve the output mode against what configuration already decided.
    fn output_mode(&self, configured: &str) -> OutputMode {
        output::resolve_output_mode(self.format, self.json, configured)
    }

    const fn wants_json_flag(&self) -> bool {
        self.json || matches!(self.format, Some(OutputMode::Json))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "List jobs",
        long_about = "List one page of jobs matching the given filters and sort order.",
        after_help = "EXAMPLES:\n    # First page, newest first\n    jobdeck list\n\n    # Filter by keyword and two countries, sorted by title\n    jobdeck list actuary --country USA,UK --sort title_asc\n\n    # Second page as JSON\n    jobdeck list --page 2 --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Write",
        about = "Add a job",
        long_about = "Add a job. Title, company and URL are required.",
        after_help = "EXAMPLES:\n    # Add a job\n    jobdeck create --title \"Pricing Actuary\" --company \"Acme Re\" --url https://jobs.example/1\n\n    # With tags and country\n    jobdeck create --title \"Analyst\" --company Initech --url https://jobs.example/2 --country UK --tags Remote,Graduate"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        next_help_heading = "Write",
        about = "Edit a job",
        long_about = "Change fields of an existing job. Only the fields given are sent.",
        after_help = "EXAMPLES:\n    # Change the salary\n    jobdeck update 42 --salary \"£60k\"\n\n    # Retitle and emit JSON\n    jobdeck update 42 --title \"Senior Actuary\" --json"
    )]
    Update(cmd::update::UpdateArgs),

    #[command(
        next_help_heading = "Write",
        about = "Delete a job",
        long_about = "Delete a job by ID. Asks for confirmation on a terminal unless --force is given.",
        after_help = "EXAMPLES:\n    # Delete with a prompt\n    jobdeck delete 42\n\n    # Delete without asking\n    jobdeck delete 42 --force"
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(
        next_help_heading = "Write",
        about = "Trigger a scrape",
        long_about = "Ask the backend to scrape new jobs, then show the refreshed first page count.",
        after_help = "EXAMPLES:\n    # Run a scrape\n    jobdeck scrape\n\n    # Emit machine-readable output\n    jobdeck scrape --json"
    )]
    Scrape(cmd::scrape::ScrapeArgs),

    #[command(
        next_help_heading = "Interactive",
        about = "Open the terminal browser",
        long_about = "Open a full-screen browser with filters, paging, and the add/edit form.",
        after_help = "EXAMPLES:\n    # Browse against the default backend\n    jobdeck browse\n\n    # Browse another backend\n    jobdeck --api-url http://jobs.internal:8080 browse"
    )]
    Browse(cmd::browse::BrowseArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Show effective configuration",
        long_about = "Show the settings in effect after flags, environment and config file are applied.",
        after_help = "EXAMPLES:\n    # Show settings\n    jobdeck config\n\n    # Print the config file location\n    jobdeck config --path"
    )]
    Config(cmd::config::ConfigArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate zsh completions\n    jobdeck completions zsh > ~/.zfunc/_jobdeck"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("JOBDECK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "jobdeck=debug,info"
        } else {
            "jobdeck=info,warn"
        })
    });

    let format = env::var("JOBDECK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The browser owns the terminal; logging there only on request.
    if !matches!(cli.command, Commands::Browse(_)) || env::var_os("JOBDECK_LOG").is_some() {
        init_tracing();
    }

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    if matches!(&cli.command, Commands::Config(args) if args.path) {
        return cmd::config::print_config_path();
    }

    let overrides = jobdeck_core::config::CliOverrides {
        api_url: cli.api_url.clone(),
        json: cli.wants_json_flag(),
    };
    let ctx = match cmd::Context::resolve(&overrides) {
        Ok(ctx) => ctx,
        Err(err) => {
            let mode = cli.output_mode("text");
            output::render_error(
                mode,
                &output::CliError::with_details(
                    format!("{err:#}"),
                    "Run `jobdeck config --path` to locate the config file.",
                    jobdeck_core::error::ErrorCode::InvalidConfigValue.code(),
                ),
            )?;
            return Err(err);
        }
    };
    let output = cli.output_mode(&ctx.config.resolved_output);

    match cli.command {
        Commands::List(ref args) => cmd::list::run_list(args, output, &ctx),
        Commands::Create(ref args) => cmd::create::run_create(args, output, &ctx),
        Commands::Update(ref args) => cmd::update::run_update(args, output, &ctx),
        Commands::Delete(ref args) => cmd::delete::run_delete(args, output, &ctx),
        Commands::Scrape(ref args) => cmd::scrape::run_scrape(args, output, &ctx),
        Commands::Browse(ref args) => cmd::browse::run_browse(args, &ctx),
        Commands::Config(ref args) => cmd::config::run_config(args, output, &ctx),
        Commands::Completions(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_sets_output_mode() {
        let cli = Cli::parse_from(["jobdeck", "--json", "list"]);
        assert!(cli.json);
        assert!(cli.output_mode("pretty").is_json());
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from(["jobdeck", "list", "--json"]);
        assert!(cli.output_mode("text").is_json());
    }

    #[test]
    fn format_flag_overrides_config() {
        let cli = Cli::parse_from(["jobdeck", "list", "--format", "pretty"]);
        assert_eq!(cli.output_mode("json"), OutputMode::Pretty);
        assert!(!cli.wants_json_flag());

        let cli = Cli::parse_from(["jobdeck", "--format", "json", "list"]);
        assert!(cli.wants_json_flag());
    }

    #[test]
    fn default_output_follows_config() {
        let cli = Cli::parse_from(["jobdeck", "list"]);
        assert_eq!(cli.output_mode("text"), OutputMode::Text);
        assert_eq!(cli.output_mode("pretty"), OutputMode::Pretty);
    }

    #[test]
    fn api_url_is_global() {
        let cli = Cli::parse_from(["jobdeck", "scrape", "--api-url", "http://x:1"]);
        assert_eq!(cli.api_url.as_deref(), Some("http://x:1"));
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["jobdeck", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
            })
        ));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["jobdeck", "list"],
            vec!["jobdeck", "list", "actuary", "--country", "USA,UK"],
            vec!["jobdeck", "create", "--title", "t", "--company", "c", "--url", "u"],
            vec!["jobdeck", "create"],
            vec!["jobdeck", "update", "7", "--title", "t"],
            vec!["jobdeck", "delete", "7", "--force"],
            vec!["jobdeck", "scrape"],
            vec!["jobdeck", "browse"],
            vec!["jobdeck", "config"],
            vec!["jobdeck", "completions", "zsh"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(
                result.is_ok(),
                "Failed to parse: {:?} error: {:?}",
                args,
                result.err()
            );
        }
    }

    #[test]
    fn unknown_sort_is_rejected_at_parse() {
        let result = Cli::try_parse_from(["jobdeck", "list", "--sort", "salary_desc"]);
        assert!(result.is_err());
    }

    #[test]
    fn clap_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
