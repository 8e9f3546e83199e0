//! `freightdesk` command-line tool: assess intake files with the readiness engine.

pub mod args;
pub mod config;
pub mod report;

use std::process::ExitCode;

use anyhow::Context;

use freightdesk_core::SystemClock;
use freightdesk_jobs::IntakeData;

use crate::args::{AssessArgs, Command, USAGE};

/// Exit code when the intake is not ready to advance.
pub const NOT_READY: u8 = 2;

/// Execute one command, writing results to stdout.
pub fn run<I>(args: I) -> anyhow::Result<ExitCode>
where
    I: IntoIterator<Item = String>,
{
    match args::parse_args(args)? {
        Command::Assess(assess) => run_assess(&assess),
        Command::Params { params } => {
            let params = config::load_parameters(params.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&params)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Help => {
            println!("{USAGE}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_assess(args: &AssessArgs) -> anyhow::Result<ExitCode> {
    let params = config::load_parameters(args.params.as_deref())?;

    let raw = std::fs::read_to_string(&args.intake)
        .with_context(|| format!("reading intake from {}", args.intake.display()))?;
    let intake: IntakeData = serde_json::from_str(&raw)
        .with_context(|| format!("parsing intake in {}", args.intake.display()))?;

    let report = report::assess(&intake, args.phase, args.sequence, &params, &SystemClock);
    tracing::info!(
        reference = %report.reference,
        completeness = report.completeness,
        ready = report.advance.ok(),
        "intake assessed"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(if report.advance.ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(NOT_READY)
    })
}
