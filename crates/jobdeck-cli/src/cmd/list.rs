//! `jobdeck list`: fetch one page of jobs for the given filters.

use crate::cmd::{Context, fail_api};
use crate::output::{
    OutputMode, Renderable, pretty_kv, pretty_rule, pretty_section, render, render_list_to,
};
use clap::Args;
use jobdeck_core::checkbox::CheckboxSet;
use jobdeck_core::filter::{FilterState, SortOrder};
use jobdeck_core::list::ListController;
use jobdeck_core::model::JobRecord;
use jobdeck_core::query::JobQuery;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Free-text search over title and company.
    pub keyword: Option<String>,

    /// Country to include. Repeat or separate with commas.
    #[arg(short, long, value_delimiter = ',')]
    pub country: Vec<String>,

    /// Tag to include. Repeat or separate with commas.
    #[arg(short, long, value_delimiter = ',')]
    pub tag: Vec<String>,

    /// Job type, e.g. "Full-time".
    #[arg(long)]
    pub job_type: Option<String>,

    /// Sort order: posting_date_desc, posting_date_asc, company_asc,
    /// company_desc, title_asc, title_desc.
    #[arg(short, long, default_value_t = SortOrder::PostingDateDesc)]
    pub sort: SortOrder,

    /// Page to fetch (1-based).
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Jobs per page (defaults to the configured page size).
    #[arg(short = 'n', long)]
    pub limit: Option<u32>,
}

impl ListArgs {
    fn filters(&self) -> FilterState {
        FilterState {
            keyword: self.keyword.clone().unwrap_or_default(),
            country: self.country.iter().map(|c| c.trim()).collect::<CheckboxSet>(),
            tag: self.tag.iter().map(|t| t.trim()).collect::<CheckboxSet>(),
            job_type: self.job_type.clone().unwrap_or_default(),
            sort: self.sort,
        }
    }
}

#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    jobs: &'a [JobRecord],
    total: u64,
    page: u32,
    last_page: u32,
    page_size: u32,
    query: JobQuery,
}

pub fn run_list(args: &ListArgs, output: OutputMode, ctx: &Context) -> anyhow::Result<()> {
    let page_size = args.limit.unwrap_or(ctx.config.page_size).max(1);
    let mut list = ListController::with_state(args.filters(), page_size, args.page);

    if let Err(err) = list.refresh(&ctx.api) {
        return Err(fail_api(output, "failed to load jobs", &err));
    }

    let pagination = list.pagination();
    let result = ListOutput {
        jobs: list.jobs(),
        total: pagination.total_items(),
        page: pagination.page(),
        last_page: pagination.last_page(),
        page_size: pagination.page_size(),
        query: list.current_query(),
    };

    render(output, &result, |r, w| render_list_human(r, list.filters(), output, w))
}

fn render_list_human(
    result: &ListOutput<'_>,
    filters: &FilterState,
    output: OutputMode,
    w: &mut dyn Write,
) -> io::Result<()> {
    if result.jobs.is_empty() {
        writeln!(w, "No jobs found.")?;
        return Ok(());
    }

    if output == OutputMode::Pretty {
        pretty_section(w, &format!("Jobs  [{}]", filters.summary()))?;
    }
    render_list_to(w, result.jobs, output)?;
    writeln!(w, "{}", page_footer(result))
}

fn page_footer(result: &ListOutput<'_>) -> String {
    format!(
        "Page {} of {} ({} jobs)",
        result.page, result.last_page, result.total
    )
}

impl Renderable for JobRecord {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "#{}  {}", self.id, self.display_title())?;
        let subtitle = self.subtitle();
        if !subtitle.is_empty() {
            writeln!(w, "  {subtitle}")?;
        }
        if let Some(salary) = self.salary.as_deref().filter(|s| !s.is_empty()) {
            pretty_kv(w, "  Salary", salary)?;
        }
        let tags = self.tag_list();
        if !tags.is_empty() {
            pretty_kv(w, "  Tags", tags.join(", "))?;
        }
        if let Some(url) = self.job_url.as_deref().filter(|s| !s.is_empty()) {
            pretty_kv(w, "  URL", url)?;
        }
        if let Some(posted) = self.posted.as_deref().filter(|s| !s.is_empty()) {
            pretty_kv(w, "  Posted", posted)?;
        }
        pretty_rule(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(&mut *w, self).map_err(io::Error::other)?;
        writeln!(w)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {}  {}",
            self.id,
            self.display_title(),
            self.company.as_deref().unwrap_or("-"),
            self.country.as_deref().unwrap_or("-"),
            self.posted.as_deref().unwrap_or("-"),
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["ID", "TITLE", "COMPANY", "COUNTRY", "POSTED"]
    }
}
