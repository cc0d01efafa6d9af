//! Run command - merge the event's release branch forward

use crate::cli::style::{CHECK, CROSS, Stylize, arrow};
use crate::cli::{Cli, RunContext};
use anstream::println;
use chrono::Utc;
use release_automerge::error::Result;
use release_automerge::report::TracingReporter;
use release_automerge::workflow::{RunOptions, RunOutcome, run};
use tracing::info;

/// Run one automerge pass and print a summary
pub async fn run_automerge(cli: &Cli) -> Result<()> {
    info!(started_at = %Utc::now().to_rfc3339(), "release automerge started");

    let ctx = RunContext::new(cli)?;
    let options = RunOptions {
        dry_run: cli.dry_run,
    };
    let outcome = run(
        ctx.platform.as_ref(),
        &ctx.unit,
        &ctx.config,
        options,
        &TracingReporter,
    )
    .await?;

    print_outcome(&outcome);
    Ok(())
}

/// `::error::` workflow command for a failed run.
///
/// Command data ends at the first line break, so `%`, CR and LF are
/// percent-encoded.
pub fn error_command(message: &str) -> String {
    let data = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{data}")
}

fn print_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Skipped { branch } => {
            println!(
                "{} {}",
                branch.accent(),
                "is not a release branch, nothing to do".muted()
            );
        }
        RunOutcome::Planned { source, targets } => {
            println!("{}:", "Merge plan".emphasis());
            for target in targets {
                println!("  {} {} {}", source.accent(), arrow(), target.accent());
            }
            println!("{}", "Dry run complete".muted());
        }
        RunOutcome::Completed(report) => {
            for target in &report.merged {
                println!("{} {}", format!("{CHECK} Merged into").success(), target.accent());
            }
            if let Some(target) = &report.conflicted {
                println!(
                    "{} {} {}",
                    format!("{CROSS} Conflict with").warn(),
                    target.accent(),
                    "(pull request opened)".muted()
                );
            }
        }
    }
}
