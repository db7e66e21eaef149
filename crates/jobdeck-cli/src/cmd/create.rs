//! `jobdeck create`: add a job through the same form flow the browser uses.

use crate::cmd::{Context, fail_form};
use crate::output::{OutputMode, Renderable, render};
use clap::Args;
use jobdeck_core::form::{FormSession, SubmitOutcome};
use jobdeck_core::model::{FormField, JobForm, JobRecord};
use serde::Serialize;
use std::io::{self, Write};
use std::time::Instant;

/// Editable job fields shared by `create` and `update`.
#[derive(Args, Debug, Default, Clone)]
pub struct JobFieldArgs {
    /// Job title.
    #[arg(long)]
    pub title: Option<String>,

    /// Hiring company.
    #[arg(long)]
    pub company: Option<String>,

    /// Country, e.g. USA.
    #[arg(long)]
    pub country: Option<String>,

    /// Free-text locations.
    #[arg(long)]
    pub locations: Option<String>,

    /// Salary as advertised.
    #[arg(long)]
    pub salary: Option<String>,

    /// Comma-separated tags.
    #[arg(long)]
    pub tags: Option<String>,

    /// Link to the posting.
    #[arg(long = "url", value_name = "URL")]
    pub job_url: Option<String>,

    /// Posting age, e.g. "2d ago".
    #[arg(long)]
    pub posted: Option<String>,
}

impl JobFieldArgs {
    /// Copy every supplied field into `form`.
    pub fn apply_to(&self, form: &mut JobForm) {
        for (field, value) in self.supplied() {
            form.set(field, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.supplied().next().is_none()
    }

    fn supplied(&self) -> impl Iterator<Item = (FormField, &str)> {
        [
            (FormField::Title, &self.title),
            (FormField::Company, &self.company),
            (FormField::Country, &self.country),
            (FormField::Locations, &self.locations),
            (FormField::Salary, &self.salary),
            (FormField::Tags, &self.tags),
            (FormField::JobUrl, &self.job_url),
            (FormField::Posted, &self.posted),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    }
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub fields: JobFieldArgs,
}

/// Result of a create or update, shared with `jobdeck update`.
#[derive(Debug, Serialize)]
pub struct SubmitOutput {
    pub ok: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<JobRecord>,
}

impl SubmitOutput {
    pub fn from_outcome(outcome: &SubmitOutcome) -> Self {
        Self {
            ok: true,
            message: outcome.message().to_string(),
            job: outcome.record().cloned(),
        }
    }
}

pub fn render_submit_human(
    result: &SubmitOutput,
    output: OutputMode,
    w: &mut dyn Write,
) -> io::Result<()> {
    writeln!(w, "✓ {}", result.message)?;
    if let Some(job) = &result.job {
        match output {
            OutputMode::Pretty => job.render_human(w)?,
            _ => job.render_table(w)?,
        }
    }
    Ok(())
}

pub fn run_create(args: &CreateArgs, output: OutputMode, ctx: &Context) -> anyhow::Result<()> {
    let mut form = FormSession::new();
    form.open_for_create();
    args.fields.apply_to(form.draft_mut());

    let outcome = match form.submit(&ctx.api, Instant::now()) {
        Ok(outcome) => outcome,
        Err(err) => return Err(fail_form(output, &err)),
    };

    let result = SubmitOutput::from_outcome(&outcome);
    render(output, &result, |r, w| render_submit_human(r, output, w))
}
