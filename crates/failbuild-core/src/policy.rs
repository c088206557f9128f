//! Result policies: how a build number maps to a target status.

use crate::error::{FailBuildError, Result};
use crate::status::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the cycling policy.
pub const CYCLE_NAME: &str = "CYCLE";

/// A named strategy producing a target status for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Always reports the wrapped status.
    Fixed(StatusCode),

    /// Cycles through [`Policy::FIXED`] by build number, starting at build 1.
    Cycle,
}

/// An entry in a selectable policy list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyOption {
    /// Label shown to operators.
    pub display_name: String,

    /// Value stored in configuration.
    pub value: String,
}

impl Policy {
    pub const SUCCESS: Policy = Policy::Fixed(StatusCode::Success);
    pub const UNSTABLE: Policy = Policy::Fixed(StatusCode::Unstable);
    pub const FAILURE: Policy = Policy::Fixed(StatusCode::Failure);
    pub const ABORTED: Policy = Policy::Fixed(StatusCode::Aborted);

    /// The fixed policies, in cycle order.
    pub const FIXED: [Policy; 4] = [
        Policy::SUCCESS,
        Policy::UNSTABLE,
        Policy::FAILURE,
        Policy::ABORTED,
    ];

    /// Every known policy, in option-list order.
    pub const ALL: [Policy; 5] = [
        Policy::SUCCESS,
        Policy::UNSTABLE,
        Policy::FAILURE,
        Policy::ABORTED,
        Policy::Cycle,
    ];

    /// Stable identifier used for configuration matching.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fixed(code) => code.name(),
            Policy::Cycle => CYCLE_NAME,
        }
    }

    /// Human label.
    pub fn display_name(&self) -> &'static str {
        match self {
            Policy::Fixed(code) => code.description(),
            Policy::Cycle => "Cycle",
        }
    }

    /// Look up a policy by its exact name.
    pub fn from_name(name: &str) -> Result<Policy> {
        Policy::ALL
            .into_iter()
            .find(|policy| policy.name() == name)
            .ok_or_else(|| FailBuildError::UnknownPolicy {
                name: name.to_string(),
            })
    }

    /// Target status for build `ordinal`. Built-in policies ignore `current`.
    pub fn resolve(&self, ordinal: i64, current: Option<StatusCode>) -> StatusCode {
        match self {
            Policy::Fixed(code) => *code,
            Policy::Cycle => {
                let len = Policy::FIXED.len() as i64;
                let index = ordinal.wrapping_sub(1).rem_euclid(len) as usize;
                Policy::FIXED[index].resolve(ordinal, current)
            }
        }
    }

    /// Option-list entry for this policy.
    pub fn option(&self) -> PolicyOption {
        PolicyOption {
            display_name: self.display_name().to_string(),
            value: self.name().to_string(),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Selectable default-policy options, in fixed order.
pub fn policy_options() -> Vec<PolicyOption> {
    Policy::ALL.iter().map(Policy::option).collect()
}
