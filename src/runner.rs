//! Run coordination
//!
//! Drives each test unit through fixture lookup, subject invocation and
//! verdict interpretation, one at a time, and collects the failures.
//! Every requested test is attempted; a failing test never stops the run.
//! Only configuration, discovery and spawn errors abort it.

use crate::config::{ConfigError, HarnessConfig};
use crate::discover::{self, DiscoverError, TestUnit};
use crate::fixture::FixtureResolver;
use crate::invoke::{InvokeError, Invoker};
use crate::verdict::{self, FailReason, Verdict};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Discover(#[from] DiscoverError),

    #[error(transparent)]
    Invoke(#[from] InvokeError),
}

/// What to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// One named test script
    Single(PathBuf),
    /// Every script in the scripts directory
    Suite,
}

/// A failing test and why it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub test: TestUnit,
    pub reason: FailReason,
}

/// Outcome of one run. Failures are kept in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub total: usize,
    pub failures: Vec<Failure>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn passed(&self) -> usize {
        self.total - self.failures.len()
    }

    /// Process exit status for this report
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }

    fn record(&mut self, test: TestUnit, verdict: Verdict) {
        self.total += 1;
        if let Verdict::Fail(reason) = verdict {
            self.failures.push(Failure { test, reason });
        }
    }
}

/// A test unit paired with its fixture, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTest {
    pub test: TestUnit,
    pub fixture: Option<PathBuf>,
}

pub struct Runner<I> {
    config: HarnessConfig,
    fixtures: FixtureResolver,
    invoker: I,
}

impl<I: Invoker> Runner<I> {
    pub fn new(config: HarnessConfig, invoker: I) -> Self {
        let fixtures = FixtureResolver::new(&config.layout);
        Self {
            config,
            fixtures,
            invoker,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Discover the suite and resolve each test's fixture without running anything
    pub fn plan(&self) -> Result<Vec<PlannedTest>, HarnessError> {
        let units = self.discover()?;
        Ok(units
            .into_iter()
            .map(|test| {
                let fixture = self.fixtures.resolve(&test.script_path);
                PlannedTest { test, fixture }
            })
            .collect())
    }

    pub fn run(&self, mode: &RunMode) -> Result<RunReport, HarnessError> {
        let units = match mode {
            RunMode::Single(path) => vec![TestUnit::new(self.locate_single(path))],
            RunMode::Suite => self.discover()?,
        };

        let mut report = RunReport::default();
        for unit in units {
            let verdict = self.run_one(&unit)?;
            if let Verdict::Fail(reason) = &verdict {
                tracing::info!(test = %unit, %reason, "FAILED");
            }
            report.record(unit, verdict);
        }

        tracing::debug!(
            total = report.total,
            failed = report.failures.len(),
            "run complete"
        );
        Ok(report)
    }

    /// Run a single test unit and interpret the result
    pub fn run_one(&self, unit: &TestUnit) -> Result<Verdict, HarnessError> {
        tracing::info!("Running test: {}", unit);
        let fixture = self.fixtures.resolve(&unit.script_path);
        let invocation = self.invoker.invoke(&unit.script_path, fixture.as_deref())?;
        tracing::debug!(test = %unit, exit_code = ?invocation.exit_code, "subject exited");
        Ok(verdict::interpret(&invocation))
    }

    fn discover(&self) -> Result<Vec<TestUnit>, HarnessError> {
        let layout = &self.config.layout;
        Ok(discover::discover(&layout.scripts_dir, &layout.script_extension)?)
    }

    /// Use the path as given, falling back to the scripts directory for bare names.
    /// A script that exists in neither place is still handed to the subject.
    fn locate_single(&self, path: &Path) -> PathBuf {
        if path.exists() {
            return path.to_path_buf();
        }
        let in_scripts = self.config.layout.scripts_dir.join(path);
        if in_scripts.exists() {
            tracing::debug!(
                given = %path.display(),
                resolved = %in_scripts.display(),
                "test found in scripts directory"
            );
            in_scripts
        } else {
            path.to_path_buf()
        }
    }
}
