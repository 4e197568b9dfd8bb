//! Results observed when stage processes terminate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Termination status of a launched stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    /// Stage exited zero.
    Success,
    /// Stage exited non-zero, died to a signal, or never launched.
    Failure,
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// Typed result produced when one stage's process terminates.
///
/// Created by the runner, consumed immediately by its control loop and kept
/// only in the run report. Nothing persists across invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Name of the originating stage.
    pub stage: String,
    /// Position of the stage in the pipeline (0-indexed).
    pub index: usize,
    /// Termination status.
    pub status: StageStatus,
    /// Exit code observed (0 on success).
    pub exit_code: i32,
    /// When the stage was launched.
    pub started_at: DateTime<Utc>,
    /// When the stage terminated.
    pub ended_at: DateTime<Utc>,
}

impl ExecutionResult {
    /// Creates a result for a stage that exited zero.
    #[must_use]
    pub fn succeeded(stage: impl Into<String>, index: usize, started_at: DateTime<Utc>) -> Self {
        Self {
            stage: stage.into(),
            index,
            status: StageStatus::Success,
            exit_code: 0,
            started_at,
            ended_at: Utc::now(),
        }
    }

    /// Creates a result for a stage that failed with `exit_code`.
    #[must_use]
    pub fn failed(
        stage: impl Into<String>,
        index: usize,
        exit_code: i32,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            stage: stage.into(),
            index,
            status: StageStatus::Failure,
            exit_code,
            started_at,
            ended_at: Utc::now(),
        }
    }

    /// Returns the duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        (self.ended_at - self.started_at).num_milliseconds() as f64
    }

    /// Returns true if the stage succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, StageStatus::Success)
    }

    /// Returns true if the stage failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.status, StageStatus::Failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_succeeded() {
        let started = Utc::now();
        let result = ExecutionResult::succeeded("tests", 0, started);

        assert_eq!(result.stage, "tests");
        assert_eq!(result.index, 0);
        assert_eq!(result.exit_code, 0);
        assert!(result.is_success());
        assert!(!result.is_failure());
    }

    #[test]
    fn test_result_failed() {
        let started = Utc::now();
        let result = ExecutionResult::failed("typecheck", 1, 2, started);

        assert_eq!(result.stage, "typecheck");
        assert_eq!(result.index, 1);
        assert_eq!(result.exit_code, 2);
        assert!(!result.is_success());
        assert!(result.is_failure());
    }

    #[test]
    fn test_result_duration() {
        let started = Utc::now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let result = ExecutionResult::succeeded("tests", 0, started);

        assert!(result.duration_ms() >= 10.0);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", StageStatus::Success), "success");
        assert_eq!(format!("{}", StageStatus::Failure), "failure");
    }

    #[test]
    fn test_result_serialization() {
        let result = ExecutionResult::failed("tests", 0, 1, Utc::now());

        let json = serde_json::to_string(&result).unwrap();
        let back: ExecutionResult = serde_json::from_str(&json).unwrap();

        assert_eq!(result.stage, back.stage);
        assert_eq!(result.status, back.status);
        assert_eq!(result.exit_code, back.exit_code);
    }
}
