//! Pipeline definition and execution.
//!
//! This module provides:
//! - The validated, ordered [`Pipeline`] of stages
//! - The sequential fail-fast [`StageRunner`]

mod runner;

pub use runner::{Outcome, RunReport, RunState, StageRunner, LAUNCH_FAILURE_CODE};

use crate::errors::PipelineValidationError;
use crate::stages::Stage;
use serde::{Deserialize, Serialize};

/// The fixed, ordered list of stages executed by one invocation.
///
/// Order is significant: stages run strictly in declaration order, and
/// reordering changes which feedback a user sees first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    name: String,
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Creates a validated pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the pipeline name is blank, the stage list is
    /// empty, or any stage has a blank name or program.
    pub fn new(
        name: impl Into<String>,
        stages: Vec<Stage>,
    ) -> Result<Self, PipelineValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PipelineValidationError::new(
                "Pipeline name cannot be empty or whitespace-only",
            ));
        }
        if stages.is_empty() {
            return Err(PipelineValidationError::new(
                "Pipeline must contain at least one stage",
            ));
        }
        for stage in &stages {
            if stage.name.trim().is_empty() {
                return Err(PipelineValidationError::new("Stage name cannot be blank"));
            }
            if stage.program.trim().is_empty() {
                return Err(
                    PipelineValidationError::new("Stage program cannot be blank")
                        .with_stages(vec![stage.name.clone()]),
                );
            }
        }
        Ok(Self { name, stages })
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stages in execution order.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}
