//! Error types for gatecheck.
//!
//! Stage failures are not errors in this taxonomy: a launched gate that
//! exits non-zero (or cannot be launched at all) is an ordinary
//! [`ExecutionResult`](crate::stages::ExecutionResult). The types here cover
//! what can go wrong before a run starts.

use thiserror::Error;

/// The main error type for gatecheck operations.
#[derive(Debug, Error)]
pub enum GateError {
    /// A pipeline validation error occurred.
    #[error("{0}")]
    Validation(#[from] PipelineValidationError),
}

/// Error raised when a pipeline definition is rejected.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PipelineValidationError {
    /// The error message.
    pub message: String,
    /// The stages involved in the error.
    pub stages: Vec<String>,
}

impl PipelineValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stages: Vec::new(),
        }
    }

    /// Sets the stages involved.
    #[must_use]
    pub fn with_stages(mut self, stages: Vec<String>) -> Self {
        self.stages = stages;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = PipelineValidationError::new("Pipeline must contain at least one stage");
        assert_eq!(err.to_string(), "Pipeline must contain at least one stage");
        assert!(err.stages.is_empty());
    }

    #[test]
    fn test_validation_error_with_stages() {
        let err = PipelineValidationError::new("Stage name cannot be blank")
            .with_stages(vec!["tests".to_string()]);
        assert_eq!(err.stages, vec!["tests".to_string()]);
    }

    #[test]
    fn test_gate_error_from_validation() {
        let err: GateError = PipelineValidationError::new("bad pipeline").into();
        assert_eq!(err.to_string(), "bad pipeline");
    }
}
