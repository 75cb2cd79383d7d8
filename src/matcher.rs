//! Output classification by substring matching
//!
//! Failure substrings always override success substrings: output containing
//! both is a failure. Positive mode flags any output free of failure
//! substrings as a success.

use crate::config::MatchConfig;

/// Classification of one command's combined output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Reported as a successful combination
    Success,
    /// A failure substring matched
    Failure,
    /// Neither classification applies
    Neutral,
}

impl Outcome {
    /// Whether the combination is reported as successful
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Applies the configured success/failure substring sets to command output
#[derive(Clone, Debug, Default)]
pub struct OutcomeMatcher {
    success: Vec<String>,
    failure: Vec<String>,
    positive: bool,
}

impl OutcomeMatcher {
    /// Build a matcher from the match configuration
    pub fn new(matching: &MatchConfig) -> Self {
        Self {
            success: matching.success.clone(),
            failure: matching.failure.clone(),
            positive: matching.positive,
        }
    }

    /// Classify one command's combined output
    pub fn classify(&self, output: &str) -> Outcome {
        let found_failure = self.failure.iter().any(|s| output.contains(s.as_str()));
        if found_failure {
            return Outcome::Failure;
        }
        let found_success = self.success.iter().any(|s| output.contains(s.as_str()));
        if found_success || self.positive {
            Outcome::Success
        } else {
            Outcome::Neutral
        }
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(success: &[&str], failure: &[&str], positive: bool) -> OutcomeMatcher {
        OutcomeMatcher::new(&MatchConfig {
            success: success.iter().map(|s| s.to_string()).collect(),
            failure: failure.iter().map(|s| s.to_string()).collect(),
            positive,
        })
    }

    #[test]
    fn test_success_substring_matches() {
        let m = matcher(&["Success"], &[], false);
        assert_eq!(m.classify("login Success for user"), Outcome::Success);
    }

    #[test]
    fn test_no_match_is_neutral() {
        let m = matcher(&["Success"], &["denied"], false);
        assert_eq!(m.classify("nothing of note"), Outcome::Neutral);
    }

    #[test]
    fn test_failure_overrides_success() {
        let m = matcher(&["Success"], &["denied"], false);
        let outcome = m.classify("Access denied, Success anyway");
        assert_eq!(outcome, Outcome::Failure);
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_failure_overrides_positive_mode() {
        let m = matcher(&[], &["denied"], true);
        assert_eq!(m.classify("Access denied"), Outcome::Failure);
    }

    #[test]
    fn test_positive_mode_flags_absence_of_failure() {
        let positive = matcher(&[], &["denied"], true);
        let plain = matcher(&[], &["denied"], false);
        assert_eq!(positive.classify("welcome"), Outcome::Success);
        assert_eq!(plain.classify("welcome"), Outcome::Neutral);
    }

    #[test]
    fn test_any_of_several_success_substrings_matches() {
        let m = matcher(&["IP", "Success"], &[], false);
        assert_eq!(m.classify("host IP 10.0.0.1"), Outcome::Success);
    }

    #[test]
    fn test_empty_sets_without_positive_are_neutral() {
        let m = matcher(&[], &[], false);
        assert_eq!(m.classify("anything"), Outcome::Neutral);
    }
}
