//! Build result simulator core.
//!
//! Decides, from a build's number, which result the build should report:
//! - `StatusCode`: SUCCESS / UNSTABLE / FAILURE / ABORTED with severity order
//! - `Policy`: a fixed status, or a cycle through all four by build number
//! - `BuildNumberIndex`: per-build-number overrides parsed from four lists
//! - `ResolutionEngine`: picks the policy, merges its target into the build's
//!   current status (never improving it) and reports whether the build passed
//! - `ResultStep` / `BuildHost`: applies decisions to a live build

pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod index;
pub mod obs;
pub mod policy;
pub mod status;
pub mod telemetry;

pub use config::Configuration;
pub use engine::{merge_status, Merge, Resolution, ResolutionEngine};
pub use error::{FailBuildError, Result};
pub use host::{BuildHost, BuildRecord, ResultStep, SimulatedBuild, SimulatedJob};
pub use index::{parse_build_numbers, BuildNumberIndex};
pub use policy::{policy_options, Policy, PolicyOption, CYCLE_NAME};
pub use status::StatusCode;
pub use telemetry::init_tracing;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
