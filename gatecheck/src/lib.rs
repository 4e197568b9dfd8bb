//! # Gatecheck
//!
//! A fail-fast runner for local quality gates.
//!
//! Gatecheck executes an ordered pipeline of verification stages as external
//! processes and aborts on the first failure:
//!
//! - **Stage-based execution**: each gate is a discrete external command
//! - **Fail-fast**: the first non-zero stage stops the pipeline
//! - **Exit-code propagation**: the failing stage's exit code becomes the
//!   invocation's exit code
//! - **Transparent output**: each command line is echoed before it runs, and
//!   child streams pass through untouched
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gatecheck::prelude::*;
//!
//! // The built-in gates: tests with coverage and doctests, then mypy.
//! let pipeline = default_pipeline("mypackage")?;
//!
//! // Execute the pipeline.
//! let report = StageRunner::new().run(&pipeline);
//! std::process::exit(report.outcome.exit_code());
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod errors;
pub mod gates;
pub mod pipeline;
pub mod stages;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::{GateError, PipelineValidationError};
    pub use crate::gates::{default_pipeline, tests_stage, typecheck_stage};
    pub use crate::pipeline::{
        Outcome, Pipeline, RunReport, RunState, StageRunner,
    };
    pub use crate::stages::{ExecutionResult, Stage, StageStatus};
}
