//! Stage definitions.
//!
//! Stages are the fundamental units of work in a gatecheck pipeline: one
//! external command per verification step, fully specified before the run
//! begins and immutable afterwards.

mod result;

pub use result::{ExecutionResult, StageStatus};

use serde::{Deserialize, Serialize};

/// One verification step, executed as an external process.
///
/// A stage is declared once at startup and never mutated. Its configuration
/// flags are ordinary arguments fixed at definition time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Human-readable stage name.
    pub name: String,
    /// Program to launch.
    pub program: String,
    /// Arguments passed to the program.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Stage {
    /// Creates a new stage running `program` with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Renders the resolved command line, shell-quoted where needed.
    ///
    /// This is the line echoed before the stage launches, so a human or a
    /// log scraper can see exactly what ran.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut rendered = shell_quote(&self.program);
        for arg in &self.args {
            rendered.push(' ');
            rendered.push_str(&shell_quote(arg));
        }
        rendered
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@+,".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
