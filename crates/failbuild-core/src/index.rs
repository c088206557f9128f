//! Per-build-number policy overrides.

use crate::config::Configuration;
use crate::error::{FailBuildError, Result};
use crate::policy::Policy;
use std::collections::HashMap;

/// Parse a comma/whitespace separated list of build numbers.
///
/// A blank or absent list yields no numbers. Trailing separators are
/// ignored; a leading comma yields an empty token, which is rejected.
pub fn parse_build_numbers(list: Option<&str>) -> Result<Vec<i64>> {
    let trimmed = match list.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(Vec::new()),
    };

    let is_separator = |c: char| c == ',' || c.is_whitespace();
    let leading = trimmed.starts_with(is_separator).then_some("");

    leading
        .into_iter()
        .chain(trimmed.split(is_separator).filter(|token| !token.is_empty()))
        .map(|token| {
            token.parse::<i64>().map_err(|source| FailBuildError::Parse {
                token: token.to_string(),
                list: list.unwrap_or_default().to_string(),
                source,
            })
        })
        .collect()
}

/// Map from build number to the policy forced for that build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildNumberIndex {
    entries: HashMap<i64, Policy>,
}

impl BuildNumberIndex {
    /// Build the index from the four configured lists.
    ///
    /// Lists are stored in the order success, unstable, failure, aborted; a
    /// number present in several lists keeps the last assignment.
    pub fn from_config(config: &Configuration) -> Result<Self> {
        let mut index = Self::default();
        for (policy, list) in config.ordinal_lists() {
            index.parse_and_store(policy, list)?;
        }
        Ok(index)
    }

    fn parse_and_store(&mut self, policy: Policy, list: Option<&str>) -> Result<()> {
        for number in parse_build_numbers(list)? {
            self.entries.insert(number, policy);
        }
        Ok(())
    }

    pub fn get(&self, ordinal: i64) -> Option<Policy> {
        self.entries.get(&ordinal).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let numbers = parse_build_numbers(Some("1,2, 4, 6 7 ")).unwrap();
        assert_eq!(numbers, vec![1, 2, 4, 6, 7]);
    }

    #[test]
    fn test_parse_blank_and_absent() {
        assert!(parse_build_numbers(None).unwrap().is_empty());
        assert!(parse_build_numbers(Some("")).unwrap().is_empty());
        assert!(parse_build_numbers(Some("  \t ")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_surrounding_whitespace() {
        assert_eq!(parse_build_numbers(Some(" 1 ")).unwrap(), vec![1]);
        assert_eq!(parse_build_numbers(Some("2,\n7,,8")).unwrap(), vec![2, 7, 8]);
    }

    #[test]
    fn test_parse_bad_token() {
        let err = parse_build_numbers(Some("1,x,2")).unwrap_err();
        match err {
            FailBuildError::Parse { token, list, .. } => {
                assert_eq!(token, "x");
                assert_eq!(list, "1,x,2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_leading_comma_is_empty_token() {
        let err = parse_build_numbers(Some(",1")).unwrap_err();
        match err {
            FailBuildError::Parse { token, list, .. } => {
                assert_eq!(token, "");
                assert_eq!(list, ",1");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(parse_build_numbers(Some(" , 2")).is_err());
    }

    #[test]
    fn test_parse_trailing_separators_ignored() {
        assert_eq!(parse_build_numbers(Some("1,2,")).unwrap(), vec![1, 2]);
        assert_eq!(parse_build_numbers(Some("3 ,, ")).unwrap(), vec![3]);
    }

    #[test]
    fn test_later_list_wins() {
        let config = Configuration::new("FAILURE")
            .with_unstable("3, 9")
            .with_aborted("9");
        let index = BuildNumberIndex::from_config(&config).unwrap();
        assert_eq!(index.get(3), Some(Policy::UNSTABLE));
        assert_eq!(index.get(9), Some(Policy::ABORTED));
        assert_eq!(index.get(4), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_bad_list_aborts_build() {
        let config = Configuration::new("SUCCESS").with_failure("2 three");
        let err = BuildNumberIndex::from_config(&config).unwrap_err();
        assert!(matches!(err, FailBuildError::Parse { token, .. } if token == "three"));
    }

    #[test]
    fn test_empty_config_empty_index() {
        let index = BuildNumberIndex::from_config(&Configuration::new("CYCLE")).unwrap();
        assert!(index.is_empty());
    }
}
