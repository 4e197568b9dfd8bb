//! Gatecheck binary: run the local quality gates and propagate the verdict.

use anyhow::Context;
use clap::Parser;
use gatecheck::gates::default_pipeline;
use gatecheck::pipeline::StageRunner;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Run the local quality gates: tests with coverage and doctests, then mypy.
///
/// Stages run strictly in order and the first failure aborts the run; the
/// failing tool's exit code becomes this process's exit code.
#[derive(Parser, Debug)]
#[command(name = "gatecheck", version, about, long_about = None)]
struct Cli {
    /// Package path the gates target.
    #[arg(default_value = ".")]
    package: String,

    /// Suppress the `+ command` echo lines.
    #[arg(short, long)]
    quiet: bool,

    /// Print a JSON run report to stdout after the run.
    #[arg(long)]
    report_json: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "gatecheck=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("gatecheck: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let pipeline = default_pipeline(&cli.package).context("invalid gate pipeline")?;

    let mut runner = StageRunner::new();
    if cli.quiet {
        runner = runner.quiet();
    }
    let report = runner.run(&pipeline);

    if cli.report_json {
        let rendered =
            serde_json::to_string_pretty(&report).context("failed to render run report")?;
        println!("{rendered}");
    }

    Ok(ExitCode::from(clamp_exit_code(report.outcome.exit_code())))
}

/// Clamps a stage exit code into the range the OS can report, never
/// collapsing a failure to 0.
fn clamp_exit_code(code: i32) -> u8 {
    if code == 0 {
        return 0;
    }
    match u8::try_from(code) {
        Ok(c) if c != 0 => c,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["gatecheck"]);
        assert_eq!(cli.package, ".");
        assert!(!cli.quiet);
        assert!(!cli.report_json);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["gatecheck", "mypackage", "--quiet", "--report-json"]);
        assert_eq!(cli.package, "mypackage");
        assert!(cli.quiet);
        assert!(cli.report_json);
    }

    #[test]
    fn test_exit_code_clamping() {
        assert_eq!(clamp_exit_code(0), 0);
        assert_eq!(clamp_exit_code(2), 2);
        assert_eq!(clamp_exit_code(137), 137);
        assert_eq!(clamp_exit_code(300), 1);
        assert_eq!(clamp_exit_code(-1), 1);
    }
}
