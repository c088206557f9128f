//! Step configuration: default policy plus per-status build-number lists.

use crate::error::Result;
use crate::policy::Policy;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Immutable configuration of one result step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Name of the policy used when a build number has no override.
    pub default_policy: String,

    /// Build numbers forced to SUCCESS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,

    /// Build numbers forced to UNSTABLE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unstable: Option<String>,

    /// Build numbers forced to FAILURE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,

    /// Build numbers forced to ABORTED.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
}

impl Configuration {
    /// Configuration with only a default policy and no overrides.
    pub fn new(default_policy: impl Into<String>) -> Self {
        Self {
            default_policy: default_policy.into(),
            success: None,
            unstable: None,
            failure: None,
            aborted: None,
        }
    }

    pub fn with_success(mut self, list: impl Into<String>) -> Self {
        self.success = Some(list.into());
        self
    }

    pub fn with_unstable(mut self, list: impl Into<String>) -> Self {
        self.unstable = Some(list.into());
        self
    }

    pub fn with_failure(mut self, list: impl Into<String>) -> Self {
        self.failure = Some(list.into());
        self
    }

    pub fn with_aborted(mut self, list: impl Into<String>) -> Self {
        self.aborted = Some(list.into());
        self
    }

    /// Parse from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn default_policy_name(&self) -> &str {
        &self.default_policy
    }

    /// Resolve the default policy name against the known policies.
    pub fn default_policy(&self) -> Result<Policy> {
        Policy::from_name(&self.default_policy)
    }

    /// The four fixed policies paired with their lists, in storage order.
    pub fn ordinal_lists(&self) -> [(Policy, Option<&str>); 4] {
        [
            (Policy::SUCCESS, self.success.as_deref()),
            (Policy::UNSTABLE, self.unstable.as_deref()),
            (Policy::FAILURE, self.failure.as_deref()),
            (Policy::ABORTED, self.aborted.as_deref()),
        ]
    }

    /// SHA-256 over the default policy and the four raw lists.
    ///
    /// Absent and empty lists hash differently.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.default_policy.as_bytes());
        hasher.update(b"\0");
        for (_, list) in self.ordinal_lists() {
            match list {
                Some(s) => {
                    hasher.update(b"\x01");
                    hasher.update(s.as_bytes());
                }
                None => hasher.update(b"\x00"),
            }
            hasher.update(b"\0");
        }
        hex::encode(hasher.finalize())
    }
}
