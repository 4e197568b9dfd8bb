//! Sequential fail-fast execution of a pipeline.

use crate::pipeline::Pipeline;
use crate::stages::{ExecutionResult, Stage};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};
use std::time::Instant;

/// Exit code reported when a stage's command cannot be launched at all.
///
/// Matches the shell convention for "command not found". Launch failure is
/// deliberately not a distinct error class: at the pipeline level it is just
/// a failed stage.
pub const LAUNCH_FAILURE_CODE: i32 = 127;

/// Terminal verdict for one full run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Every stage exited zero.
    Succeeded,
    /// The stage at `index` failed with `exit_code`; later stages never ran.
    FailedAt {
        /// Position of the failing stage (0-indexed).
        index: usize,
        /// Exit code reported by the failing stage.
        exit_code: i32,
    },
}

impl Outcome {
    /// Returns true if every stage succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Returns the process exit code to surface for this outcome.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Succeeded => 0,
            Self::FailedAt { exit_code, .. } => *exit_code,
        }
    }
}

/// Progress of a runner through its pipeline.
///
/// Transitions: `NotStarted → Running(0)`, `Running(i) → Running(i + 1)` on
/// stage success, `Running(last) → Succeeded`, `Running(i) → Failed(i)` on
/// stage failure. `Succeeded` and `Failed` are terminal for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No stage has launched yet.
    NotStarted,
    /// The stage at this index is executing.
    Running(usize),
    /// Every stage succeeded.
    Succeeded,
    /// The stage at this index failed.
    Failed(usize),
}

/// Aggregate report for one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Name of the pipeline that ran.
    pub pipeline: String,
    /// Terminal verdict.
    pub outcome: Outcome,
    /// Per-stage results, in launch order. Stages after a failure are absent.
    pub results: Vec<ExecutionResult>,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: f64,
}

/// Executes a pipeline of external processes in declaration order.
///
/// Execution is single-threaded and blocking: the runner suspends until each
/// stage's process terminates before evaluating its result, so a later stage
/// never starts until its predecessor has fully settled. There is no timeout
/// or cancellation; a hung stage hangs the invocation.
///
/// Child stdout/stderr are inherited, so each tool's native diagnostics
/// appear unmodified and interleaved in execution order.
pub struct StageRunner {
    echo: bool,
    state: RunState,
    echo_sink: Box<dyn Write + Send>,
}

impl std::fmt::Debug for StageRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageRunner")
            .field("echo", &self.echo)
            .field("state", &self.state)
            .finish()
    }
}

impl StageRunner {
    /// Creates a runner that echoes each command line to stderr before
    /// launching it.
    #[must_use]
    pub fn new() -> Self {
        Self {
            echo: true,
            state: RunState::NotStarted,
            echo_sink: Box::new(std::io::stderr()),
        }
    }

    /// Suppresses the `+ command` echo lines. Child streams still pass
    /// through.
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    /// Redirects the `+ command` echo lines to `sink` instead of stderr.
    #[must_use]
    pub fn with_echo_sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.echo_sink = Box::new(sink);
        self
    }

    /// Returns the runner's current state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Runs every stage in order, stopping at the first failure.
    pub fn run(&mut self, pipeline: &Pipeline) -> RunReport {
        let start = Instant::now();
        let mut results = Vec::with_capacity(pipeline.stage_count());

        for (index, stage) in pipeline.stages().iter().enumerate() {
            self.state = RunState::Running(index);
            let result = self.launch(stage, index);

            if result.is_failure() {
                let exit_code = result.exit_code;
                // The failing tool's own diagnostics must stay the last
                // output a user sees, so this event is info-level and
                // opt-in via RUST_LOG.
                tracing::info!(
                    stage = %stage.name,
                    index,
                    exit_code,
                    duration_ms = result.duration_ms(),
                    "stage.failed"
                );
                results.push(result);
                self.state = RunState::Failed(index);

                return RunReport {
                    pipeline: pipeline.name().to_string(),
                    outcome: Outcome::FailedAt { index, exit_code },
                    results,
                    duration_ms: start.elapsed().as_secs_f64() * 1000.0,
                };
            }

            tracing::info!(
                stage = %stage.name,
                index,
                duration_ms = result.duration_ms(),
                "stage.completed"
            );
            results.push(result);
        }

        self.state = RunState::Succeeded;
        RunReport {
            pipeline: pipeline.name().to_string(),
            outcome: Outcome::Succeeded,
            results,
            duration_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }

    fn launch(&mut self, stage: &Stage, index: usize) -> ExecutionResult {
        if self.echo {
            // Echo failures never abort the run.
            let _ = writeln!(self.echo_sink, "+ {}", stage.command_line());
        }
        tracing::info!(stage = %stage.name, index, "stage.started");

        let started_at = Utc::now();
        let status = Command::new(&stage.program)
            .args(&stage.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        match status {
            Ok(status) if status.success() => {
                ExecutionResult::succeeded(&stage.name, index, started_at)
            }
            Ok(status) => {
                ExecutionResult::failed(&stage.name, index, exit_code_of(status), started_at)
            }
            Err(err) => {
                tracing::error!(stage = %stage.name, index, error = %err, "stage.launch_failed");
                ExecutionResult::failed(&stage.name, index, LAUNCH_FAILURE_CODE, started_at)
            }
        }
    }
}

impl Default for StageRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a terminated process status to an exit code.
///
/// A process killed by a signal has no exit code; it is reported as
/// `128 + signal` on Unix (shell convention) and `1` elsewhere.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
