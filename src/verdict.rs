//! Verdict interpretation
//!
//! A test passes only when the subject exits with status 0 and prints
//! `true` (surrounding whitespace ignored). A nonzero exit fails the test
//! without looking at stdout, so a crashing subject and one that exits
//! nonzero on purpose look the same here.

use crate::invoke::Invocation;
use std::fmt;

const PASS_TOKEN: &str = "true";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(FailReason),
}

/// Why a test failed. Diagnostic only; any reason is a plain failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailReason {
    /// Nonzero exit status, or `None` when killed by a signal
    Exit(Option<i32>),
    /// Exit status 0 but the trimmed output was not `true`
    Output(String),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailReason::Exit(Some(code)) => write!(f, "exit code {}", code),
            FailReason::Exit(None) => write!(f, "terminated by signal"),
            FailReason::Output(out) if out.is_empty() => write!(f, "no output"),
            FailReason::Output(out) => write!(f, "printed {:?}", out),
        }
    }
}

/// Map an invocation to pass/fail
pub fn interpret(invocation: &Invocation) -> Verdict {
    if invocation.exit_code != Some(0) {
        return Verdict::Fail(FailReason::Exit(invocation.exit_code));
    }

    let out = invocation.stdout.trim();
    if out == PASS_TOKEN {
        Verdict::Pass
    } else {
        Verdict::Fail(FailReason::Output(out.to_string()))
    }
}
