//! Structured observability hooks for build result resolution.
//!
//! Events are emitted at `info!` level with an `event` field naming the
//! lifecycle point; failures use `warn!`.

use crate::status::StatusCode;
use tracing::info;

/// RAII guard that enters a span tagged with the build number being resolved.
///
/// # Example
///
/// ```ignore
/// let _span = ResolutionSpan::enter(7);
/// // tracing calls below carry build = 7
/// ```
pub struct ResolutionSpan {
    _span: tracing::span::EnteredSpan,
}

impl ResolutionSpan {
    pub fn enter(ordinal: i64) -> Self {
        let span = tracing::info_span!("failbuild.resolve", build = ordinal);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: build-number index built for a configuration.
pub fn emit_index_built(config_digest: &str, entries: usize) {
    info!(
        event = "index.built",
        config_digest = %config_digest,
        entries = entries,
    );
}

/// Emit event: a build's result was decided.
pub fn emit_resolution_decided(
    ordinal: i64,
    policy: &str,
    target: StatusCode,
    merged: StatusCode,
    passed: bool,
) {
    info!(
        event = "resolution.decided",
        build = ordinal,
        policy = %policy,
        target = %target,
        merged = %merged,
        passed = passed,
    );
}

/// Emit event: resolution failed (warning level).
pub fn emit_resolution_failed(ordinal: i64, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "resolution.failed", build = ordinal, error = %error);
}
