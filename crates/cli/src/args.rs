//! Command-line argument parsing.

use std::path::PathBuf;

use anyhow::{Context, bail};

use freightdesk_jobs::JobPhase;

pub const USAGE: &str = "\
usage:
  freightdesk assess <intake.json> [--params <file>] [--phase <PHASE>] [--sequence <n>]
  freightdesk params [--params <file>]
  freightdesk help";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Assess(AssessArgs),
    Params { params: Option<PathBuf> },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessArgs {
    pub intake: PathBuf,
    pub params: Option<PathBuf>,
    /// Phase the job is currently in (default DRAFT).
    pub phase: JobPhase,
    /// Sequence number stamped into the reference (default 1).
    pub sequence: u64,
}

pub fn parse_args<I>(args: I) -> anyhow::Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        return Ok(Command::Help);
    };

    let mut positional = Vec::new();
    let mut params = None;
    let mut phase = JobPhase::Draft;
    let mut sequence = 1;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--params" => params = Some(PathBuf::from(value_of(&mut args, "--params")?)),
            "--phase" => {
                phase = value_of(&mut args, "--phase")?
                    .parse()
                    .context("invalid --phase")?;
            }
            "--sequence" => {
                sequence = value_of(&mut args, "--sequence")?
                    .parse()
                    .context("--sequence must be a non-negative integer")?;
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            _ => positional.push(arg),
        }
    }

    match command.as_str() {
        "assess" => {
            let [intake] = positional.as_slice() else {
                bail!("assess takes exactly one intake file\n{USAGE}");
            };
            Ok(Command::Assess(AssessArgs {
                intake: PathBuf::from(intake),
                params,
                phase,
                sequence,
            }))
        }
        "params" => Ok(Command::Params { params }),
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => bail!("unknown command {other}\n{USAGE}"),
    }
}

fn value_of(args: &mut impl Iterator<Item = String>, flag: &str) -> anyhow::Result<String> {
    args.next()
        .with_context(|| format!("{flag} needs a value"))
}
