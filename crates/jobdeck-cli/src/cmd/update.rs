//! `jobdeck update`: change selected fields of an existing job.

use crate::cmd::create::{JobFieldArgs, SubmitOutput, render_submit_human};
use crate::cmd::{Context, fail_form};
use crate::output::{CliError, OutputMode, render, render_error};
use clap::Args;
use jobdeck_core::error::ErrorCode;
use jobdeck_core::form::FormSession;
use jobdeck_core::model::{JobId, JobRecord};
use std::time::Instant;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// ID of the job to change.
    pub id: String,

    #[command(flatten)]
    pub fields: JobFieldArgs,
}

pub fn run_update(args: &UpdateArgs, output: OutputMode, ctx: &Context) -> anyhow::Result<()> {
    if args.fields.is_empty() {
        render_error(
            output,
            &CliError::with_details(
                "nothing to update",
                "Pass at least one field, e.g. --title or --salary.",
                ErrorCode::ValidationFailed.code(),
            ),
        )?;
        anyhow::bail!("nothing to update");
    }

    let mut form = FormSession::new();
    form.open_for_patch(JobRecord::new(JobId::from(args.id.as_str())));
    args.fields.apply_to(form.draft_mut());

    let outcome = match form.submit(&ctx.api, Instant::now()) {
        Ok(outcome) => outcome,
        Err(err) => return Err(fail_form(output, &err)),
    };

    let result = SubmitOutput::from_outcome(&outcome);
    render(output, &result, |r, w| render_submit_human(r, output, w))
}
