//! The built-in verification gates.
//!
//! Two gates, always in this order: the test suite first (with coverage
//! instrumentation and doctest execution), then the static type checker.
//! Tests run first deliberately, so a broken suite is the first feedback a
//! user sees; type errors are only reported once the tests pass.

use crate::errors::PipelineValidationError;
use crate::pipeline::Pipeline;
use crate::stages::Stage;

/// Name of the test & coverage stage.
pub const TESTS_STAGE: &str = "tests";

/// Name of the static type-check stage.
pub const TYPECHECK_STAGE: &str = "typecheck";

/// Builds the test & coverage stage for `package`.
///
/// Runs the suite under coverage measurement, producing a machine-readable
/// XML report and a human-readable terminal report, and executes embedded
/// documentation examples as additional test cases.
#[must_use]
pub fn tests_stage(package: &str) -> Stage {
    Stage::new(TESTS_STAGE, "py.test")
        .arg("--doctest-modules")
        .args(["--cov", package])
        .arg("--cov-report=xml")
        .arg("--cov-report=term")
        .arg(package)
}

/// Builds the static type-check stage for `package`.
///
/// A suppression annotation that no longer applies to real code is escalated
/// to an error.
#[must_use]
pub fn typecheck_stage(package: &str) -> Stage {
    Stage::new(TYPECHECK_STAGE, "mypy")
        .arg("--warn-unused-ignores")
        .arg(package)
}

/// The default two-gate pipeline for `package`.
///
/// # Errors
///
/// Returns an error if `package` is blank.
pub fn default_pipeline(package: &str) -> Result<Pipeline, PipelineValidationError> {
    if package.trim().is_empty() {
        return Err(PipelineValidationError::new(
            "Target package path cannot be blank",
        ));
    }
    Pipeline::new(
        "gatecheck",
        vec![tests_stage(package), typecheck_stage(package)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_pipeline_order() {
        let pipeline = default_pipeline("mypackage").unwrap();

        let names: Vec<&str> = pipeline.stages().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![TESTS_STAGE, TYPECHECK_STAGE]);
    }

    #[test]
    fn test_tests_stage_contract() {
        let stage = tests_stage("mypackage");

        assert_eq!(stage.program, "py.test");
        assert!(stage.args.iter().any(|a| a == "--doctest-modules"));
        assert!(stage.args.iter().any(|a| a == "--cov"));
        assert!(stage.args.iter().any(|a| a == "--cov-report=xml"));
        assert!(stage.args.iter().any(|a| a == "--cov-report=term"));
        // The package path is both the coverage target and the test target.
        assert_eq!(stage.args.iter().filter(|a| *a == "mypackage").count(), 2);
    }

    #[test]
    fn test_typecheck_stage_contract() {
        let stage = typecheck_stage("mypackage");

        assert_eq!(stage.program, "mypy");
        assert_eq!(stage.args, vec!["--warn-unused-ignores", "mypackage"]);
    }

    #[test]
    fn test_default_pipeline_rejects_blank_package() {
        assert!(default_pipeline("").is_err());
        assert!(default_pipeline("   ").is_err());
    }

    #[test]
    fn test_gate_command_lines() {
        assert_eq!(
            tests_stage("pkg").command_line(),
            "py.test --doctest-modules --cov pkg --cov-report=xml --cov-report=term pkg"
        );
        assert_eq!(
            typecheck_stage("pkg").command_line(),
            "mypy --warn-unused-ignores pkg"
        );
    }
}
