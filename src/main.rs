mod commands;
mod context;
mod diff;
mod error;
mod logging;
mod output;
mod plan;
#[cfg(test)]
mod test_helpers;
mod traits;

use clap::Parser;
use clap::error::ErrorKind;
use commands::{ShowCommand, ShowOptions};
use context::Context;
use error::ShowError;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "tfshow")]
#[command(about = "Render a Terraform JSON plan the way `terraform show` does", long_about = None)]
#[command(version)]
struct Cli {
    /// Plan JSON file (output of `terraform show -json`)
    #[arg(value_name = "PLAN", conflicts_with = "input")]
    plan: Option<PathBuf>,

    /// Plan JSON file, alternative to the positional argument
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write the rendered plan to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Number of resources rendered concurrently
    #[arg(short, long, env = "TFSHOW_JOBS", default_value_t = 1)]
    jobs: usize,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_options(self) -> Result<ShowOptions, ShowError> {
        let input = self
            .plan
            .or(self.input)
            .ok_or_else(|| ShowError::Usage("--input is required.".to_string()))?;

        Ok(ShowOptions {
            input,
            output: self.output,
            color: !self.no_color,
            jobs: self.jobs,
        })
    }
}

const USAGE_HINT: &str = "Use --help for usage information.";

fn main() -> ExitCode {
    let ctx = Context::new();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let rendered = e.to_string();
            let message = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ");
            ctx.output.error(message);
            ctx.output.hint(USAGE_HINT);
            return ExitCode::from(1);
        }
    };

    logging::init(cli.verbose);

    let result = cli
        .into_options()
        .and_then(|options| ShowCommand::execute(&ctx, &options));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            ctx.output.error(&e.to_string());
            if matches!(e, ShowError::Usage(_)) {
                ctx.output.hint(USAGE_HINT);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
