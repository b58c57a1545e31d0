//! Subject invocation
//!
//! Each test runs the subject once as a child process:
//!
//! `<subject> --script <script> [--json-file <fixture>]`
//!
//! The call blocks until the child exits. There is no timeout.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("Failed to execute subject {program}: {source}")]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },
}

/// Captured result of one subject run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Exit status, or `None` if the process was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    /// Kept for logging only; never part of the verdict
    pub stderr: String,
}

impl Invocation {
    pub fn from_output(output: Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Runs the subject for a single test.
///
/// The process-backed implementation is [`SubjectProcess`]; tests swap in a
/// scripted one.
pub trait Invoker {
    fn invoke(&self, script: &Path, fixture: Option<&Path>) -> Result<Invocation, InvokeError>;
}

/// Build the subject's argument list
pub fn subject_args(script: &Path, fixture: Option<&Path>) -> Vec<OsString> {
    let mut args = vec![OsString::from("--script"), script.as_os_str().to_os_string()];
    if let Some(fixture) = fixture {
        args.push(OsString::from("--json-file"));
        args.push(fixture.as_os_str().to_os_string());
    }
    args
}

/// Invokes a subject executable as a child process
#[derive(Debug, Clone)]
pub struct SubjectProcess {
    program: PathBuf,
}

impl SubjectProcess {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Invoker for SubjectProcess {
    fn invoke(&self, script: &Path, fixture: Option<&Path>) -> Result<Invocation, InvokeError> {
        let args = subject_args(script, fixture);
        tracing::debug!(program = %self.program.display(), ?args, "spawning subject");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| InvokeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let invocation = Invocation::from_output(output);
        if invocation.exit_code.is_none() {
            tracing::warn!(script = %script.display(), "subject terminated by signal");
        }
        if !invocation.stderr.trim().is_empty() {
            tracing::debug!(stderr = %invocation.stderr.trim(), "subject stderr");
        }
        Ok(invocation)
    }
}
