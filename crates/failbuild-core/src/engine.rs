//! Resolution engine: decides the result a build ends up with.
//!
//! The decision is pure: given a build number and the build's current status
//! it returns the merged status, whether the build passed, and the console
//! lines describing the decision. Writing the result back to a build is the
//! job of [`crate::host`].

use crate::config::Configuration;
use crate::error::Result;
use crate::index::BuildNumberIndex;
use crate::obs;
use crate::policy::Policy;
use crate::status::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// Outcome of merging a target status into a build's current status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merge {
    /// Status the build should carry afterwards.
    pub status: StatusCode,

    /// Console line describing the decision.
    pub line: String,
}

/// Merge `target` into `current`. The result is never better than `current`.
pub fn merge_status(current: Option<StatusCode>, target: StatusCode) -> Merge {
    match current {
        None => Merge {
            status: target,
            line: setting_result_line(target),
        },
        Some(current) if current.is_better_than(target) => Merge {
            status: current.combine(target),
            line: setting_result_line(target),
        },
        Some(current) if current.is_worse_than(target) => Merge {
            status: current,
            line: format!(
                "Build result is already {}, which is worse than {}; keeping it",
                current.description(),
                target.description()
            ),
        },
        Some(current) => Merge {
            status: current,
            line: format!("Build result is already {}", target.description()),
        },
    }
}

fn setting_result_line(target: StatusCode) -> String {
    format!("Setting build result to {}", target.description())
}

/// Full decision for one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Build number resolved.
    pub ordinal: i64,

    /// Name of the policy that produced the target.
    pub policy: String,

    /// Status the policy asked for.
    pub target: StatusCode,

    /// Status after merging with the build's current status.
    pub merged: StatusCode,

    /// Whether `merged` is at least UNSTABLE.
    pub passed: bool,

    /// Console lines describing the decision.
    pub log_lines: Vec<String>,
}

/// Resolves build results for one configuration.
///
/// The build-number index is built on first use and then reused for the
/// lifetime of the engine. Concurrent first calls build it once.
#[derive(Debug)]
pub struct ResolutionEngine {
    config: Arc<Configuration>,
    index: Mutex<Option<Arc<BuildNumberIndex>>>,
}

impl ResolutionEngine {
    /// Create an engine whose index is built lazily.
    pub fn new(config: impl Into<Arc<Configuration>>) -> Self {
        Self {
            config: config.into(),
            index: Mutex::new(None),
        }
    }

    /// Create an engine and build its index up front, surfacing list errors
    /// immediately.
    pub fn prepare(config: impl Into<Arc<Configuration>>) -> Result<Self> {
        let engine = Self::new(config);
        engine.index()?;
        Ok(engine)
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Whether the index has been built.
    pub fn is_index_built(&self) -> bool {
        self.index
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn index(&self) -> Result<Arc<BuildNumberIndex>> {
        let mut slot = self.index.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = slot.as_ref() {
            return Ok(Arc::clone(index));
        }

        let index = Arc::new(BuildNumberIndex::from_config(&self.config)?);
        obs::emit_index_built(&self.config.digest(), index.len());
        *slot = Some(Arc::clone(&index));
        Ok(index)
    }

    /// Policy applying to build `ordinal`: its override, else the default.
    pub fn target_policy(&self, ordinal: i64) -> Result<Policy> {
        match self.index()?.get(ordinal) {
            Some(policy) => Ok(policy),
            None => self.config.default_policy(),
        }
    }

    /// Decide the result of build `ordinal` given its current status.
    pub fn resolve(&self, ordinal: i64, current: Option<StatusCode>) -> Result<Resolution> {
        let _span = obs::ResolutionSpan::enter(ordinal);

        let policy = match self.target_policy(ordinal) {
            Ok(policy) => policy,
            Err(e) => {
                obs::emit_resolution_failed(ordinal, &e);
                return Err(e);
            }
        };

        let target = policy.resolve(ordinal, current);
        let merge = merge_status(current, target);
        let passed = merge.status.is_passing();

        obs::emit_resolution_decided(ordinal, policy.name(), target, merge.status, passed);

        Ok(Resolution {
            ordinal,
            policy: policy.name().to_string(),
            target,
            merged: merge.status,
            passed,
            log_lines: vec![merge.line],
        })
    }
}
