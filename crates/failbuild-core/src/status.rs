//! Build status codes and their severity ordering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome reported for a build.
///
/// Severity runs `Success < Unstable < Failure`, with `Aborted` sharing
/// `Failure`'s rank: neither of the two is better than the other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusCode {
    Success,
    Unstable,
    Failure,
    Aborted,
}

impl StatusCode {
    /// All status codes, in cycle order.
    pub const ALL: [StatusCode; 4] = [
        StatusCode::Success,
        StatusCode::Unstable,
        StatusCode::Failure,
        StatusCode::Aborted,
    ];

    /// Severity rank. `Failure` and `Aborted` share rank 2.
    pub fn severity(&self) -> u8 {
        match self {
            StatusCode::Success => 0,
            StatusCode::Unstable => 1,
            StatusCode::Failure | StatusCode::Aborted => 2,
        }
    }

    pub fn is_better_than(&self, other: StatusCode) -> bool {
        self.severity() < other.severity()
    }

    pub fn is_worse_than(&self, other: StatusCode) -> bool {
        self.severity() > other.severity()
    }

    pub fn is_better_or_equal_to(&self, other: StatusCode) -> bool {
        self.severity() <= other.severity()
    }

    /// Whether a build with this status counts as passed.
    pub fn is_passing(&self) -> bool {
        self.is_better_or_equal_to(StatusCode::Unstable)
    }

    /// Return the worse of the two statuses.
    ///
    /// On the `Failure`/`Aborted` tie `Aborted` is returned regardless of
    /// argument order, so the operation stays commutative.
    pub fn combine(&self, other: StatusCode) -> StatusCode {
        if self.is_worse_than(other) {
            *self
        } else if other.is_worse_than(*self) {
            other
        } else if *self == StatusCode::Aborted || other == StatusCode::Aborted {
            StatusCode::Aborted
        } else {
            *self
        }
    }

    /// Stable upper-case name, as used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            StatusCode::Success => "SUCCESS",
            StatusCode::Unstable => "UNSTABLE",
            StatusCode::Failure => "FAILURE",
            StatusCode::Aborted => "ABORTED",
        }
    }

    /// Human description used in console lines.
    pub fn description(&self) -> &'static str {
        match self {
            StatusCode::Success => "Success",
            StatusCode::Unstable => "Unstable",
            StatusCode::Failure => "Failed",
            StatusCode::Aborted => "Aborted",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatusCode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        StatusCode::ALL
            .into_iter()
            .find(|code| code.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown status code: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_order() {
        assert!(StatusCode::Success.is_better_than(StatusCode::Unstable));
        assert!(StatusCode::Unstable.is_better_than(StatusCode::Failure));
        assert!(StatusCode::Unstable.is_better_than(StatusCode::Aborted));
        assert!(StatusCode::Failure.is_worse_than(StatusCode::Success));
        assert!(!StatusCode::Success.is_worse_than(StatusCode::Success));
    }

    #[test]
    fn test_failure_and_aborted_are_tied() {
        let (f, a) = (StatusCode::Failure, StatusCode::Aborted);
        assert!(!f.is_better_than(a));
        assert!(!a.is_better_than(f));
        assert!(!f.is_worse_than(a));
        assert!(!a.is_worse_than(f));
        assert!(f.is_better_or_equal_to(a));
        assert!(a.is_better_or_equal_to(f));
    }

    #[test]
    fn test_combine_is_idempotent() {
        for code in StatusCode::ALL {
            assert_eq!(code.combine(code), code);
        }
    }

    #[test]
    fn test_combine_is_commutative_and_picks_worse() {
        for a in StatusCode::ALL {
            for b in StatusCode::ALL {
                let ab = a.combine(b);
                assert_eq!(ab, b.combine(a), "combine({a}, {b})");
                assert_eq!(ab.severity(), a.severity().max(b.severity()));
            }
        }
        assert_eq!(
            StatusCode::Failure.combine(StatusCode::Aborted),
            StatusCode::Aborted
        );
    }

    #[test]
    fn test_passing_predicate() {
        assert!(StatusCode::Success.is_passing());
        assert!(StatusCode::Unstable.is_passing());
        assert!(!StatusCode::Failure.is_passing());
        assert!(!StatusCode::Aborted.is_passing());
    }

    #[test]
    fn test_serde_uses_upper_case_names() {
        let json = serde_json::to_string(&StatusCode::Unstable).unwrap();
        assert_eq!(json, "\"UNSTABLE\"");
        let back: StatusCode = serde_json::from_str("\"ABORTED\"").unwrap();
        assert_eq!(back, StatusCode::Aborted);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("failure".parse::<StatusCode>().unwrap(), StatusCode::Failure);
        assert_eq!(" SUCCESS ".parse::<StatusCode>().unwrap(), StatusCode::Success);
        assert!("CYCLE".parse::<StatusCode>().is_err());
    }
}
