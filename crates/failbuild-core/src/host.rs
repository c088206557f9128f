//! Host adapter: applies resolutions to a live build.
//!
//! [`BuildHost`] is the seam to the job-orchestration platform. [`ResultStep`]
//! reads the build's state through it, runs the [`ResolutionEngine`], and
//! writes the merged status and console lines back. [`SimulatedJob`] is an
//! in-memory host that numbers builds consecutively from 1.

use crate::config::Configuration;
use crate::engine::{Resolution, ResolutionEngine};
use crate::error::Result;
use crate::status::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A build in progress, as seen by a result step.
pub trait BuildHost {
    /// 1-based build number.
    fn ordinal(&self) -> i64;

    /// Status recorded so far, if any.
    fn current_status(&self) -> Option<StatusCode>;

    fn set_status(&mut self, status: StatusCode);

    /// Write a line to the build's console.
    fn console(&mut self, line: &str);
}

/// A configured result step attached to a job.
#[derive(Debug)]
pub struct ResultStep {
    engine: ResolutionEngine,
}

impl ResultStep {
    pub fn new(config: impl Into<Arc<Configuration>>) -> Self {
        Self {
            engine: ResolutionEngine::new(config),
        }
    }

    pub fn engine(&self) -> &ResolutionEngine {
        &self.engine
    }

    /// Resolve the host build and apply the decision. Returns whether the
    /// build passed.
    pub fn perform(&self, host: &mut dyn BuildHost) -> Result<bool> {
        let resolution = self.apply(host)?;
        Ok(resolution.passed)
    }

    /// Like [`ResultStep::perform`] but tolerates a missing build, which
    /// counts as not passed.
    pub fn perform_optional(&self, host: Option<&mut dyn BuildHost>) -> Result<bool> {
        match host {
            Some(host) => self.perform(host),
            None => Ok(false),
        }
    }

    /// Resolve the host build, apply the decision, and return it.
    pub fn apply(&self, host: &mut dyn BuildHost) -> Result<Resolution> {
        let current = host.current_status();
        let resolution = self.engine.resolve(host.ordinal(), current)?;

        for line in &resolution.log_lines {
            host.console(line);
        }
        if current != Some(resolution.merged) {
            host.set_status(resolution.merged);
        }
        Ok(resolution)
    }
}

/// In-memory build used by [`SimulatedJob`] and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedBuild {
    pub ordinal: i64,
    pub status: Option<StatusCode>,
    pub console: Vec<String>,
}

impl SimulatedBuild {
    pub fn new(ordinal: i64) -> Self {
        Self {
            ordinal,
            status: None,
            console: Vec::new(),
        }
    }

    /// A build whose earlier steps already recorded `status`.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }
}

impl BuildHost for SimulatedBuild {
    fn ordinal(&self) -> i64 {
        self.ordinal
    }

    fn current_status(&self) -> Option<StatusCode> {
        self.status
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    fn console(&mut self, line: &str) {
        self.console.push(line.to_string());
    }
}

/// Record of one finished simulated build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub ordinal: i64,
    pub policy: String,
    pub status: StatusCode,
    pub passed: bool,
    pub console: Vec<String>,
}

/// A job with one result step whose builds are numbered 1, 2, 3, ...
#[derive(Debug)]
pub struct SimulatedJob {
    step: ResultStep,
    history: Vec<BuildRecord>,
}

impl SimulatedJob {
    pub fn new(config: impl Into<Arc<Configuration>>) -> Self {
        Self {
            step: ResultStep::new(config),
            history: Vec::new(),
        }
    }

    /// Number the next build will get.
    pub fn next_ordinal(&self) -> i64 {
        self.history.len() as i64 + 1
    }

    /// Run the next build with no prior status.
    pub fn run_build(&mut self) -> Result<&BuildRecord> {
        let build = SimulatedBuild::new(self.next_ordinal());
        self.run(build)
    }

    /// Run the next build whose earlier steps already recorded `status`.
    pub fn run_build_with_status(&mut self, status: StatusCode) -> Result<&BuildRecord> {
        let build = SimulatedBuild::new(self.next_ordinal()).with_status(status);
        self.run(build)
    }

    /// Run `count` consecutive builds with no prior status.
    pub fn run_builds(&mut self, count: usize) -> Result<&[BuildRecord]> {
        let start = self.history.len();
        for _ in 0..count {
            self.run_build()?;
        }
        Ok(&self.history[start..])
    }

    fn run(&mut self, mut build: SimulatedBuild) -> Result<&BuildRecord> {
        let resolution = self.step.apply(&mut build)?;
        let record = BuildRecord {
            ordinal: build.ordinal,
            policy: resolution.policy,
            status: resolution.merged,
            passed: resolution.passed,
            console: build.console,
        };
        self.history.push(record);
        Ok(&self.history[self.history.len() - 1])
    }

    pub fn history(&self) -> &[BuildRecord] {
        &self.history
    }

    pub fn step(&self) -> &ResultStep {
        &self.step
    }
}
