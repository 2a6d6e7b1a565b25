//! Baseline hash embedded at build time.

use std::fmt;

const BASELINE: &str = include_str!("../../signature.baseline");

/// Outcome of comparing a computed hash with the embedded baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineStatus<'a> {
    /// The hash equals the baseline.
    Match,
    /// The hash differs from the registered `baseline`.
    Differs {
        /// The registered hash.
        baseline: &'a str,
    },
    /// No baseline is registered.
    Unregistered,
}

impl fmt::Display for BaselineStatus<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match => f.write_str("baseline: match"),
            Self::Differs { baseline } => write!(f, "baseline: differs ({baseline})"),
            Self::Unregistered => f.write_str("baseline: none registered"),
        }
    }
}

/// Returns the embedded baseline hash, if one is registered.
#[must_use]
pub fn registered_baseline() -> Option<&'static str> {
    first_entry(BASELINE)
}

/// Compares `hash` with the embedded baseline.
///
/// Reporting only; callers decide whether a difference matters.
#[must_use]
pub fn compare_baseline(hash: &str) -> BaselineStatus<'static> {
    compare_with(registered_baseline(), hash)
}

fn compare_with<'a>(baseline: Option<&'a str>, hash: &str) -> BaselineStatus<'a> {
    match baseline {
        None => BaselineStatus::Unregistered,
        Some(registered) if registered == hash => BaselineStatus::Match,
        Some(registered) => BaselineStatus::Differs {
            baseline: registered,
        },
    }
}

/// First line that is neither blank nor a `#` comment.
fn first_entry(text: &str) -> Option<&str> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", None)]
    #[case("# comment only\n\n", None)]
    #[case("# header\n  abc123  \nlater\n", Some("abc123"))]
    fn first_entry_skips_comments_and_blanks(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(first_entry(text), expected);
    }

    #[rstest]
    fn comparison_reports_each_outcome() {
        assert_eq!(compare_with(None, "abc"), BaselineStatus::Unregistered);
        assert_eq!(compare_with(Some("abc"), "abc"), BaselineStatus::Match);
        assert_eq!(
            compare_with(Some("abc"), "def"),
            BaselineStatus::Differs { baseline: "abc" }
        );
    }

    #[rstest]
    fn status_renders_report_lines() {
        assert_eq!(BaselineStatus::Match.to_string(), "baseline: match");
        assert_eq!(
            BaselineStatus::Differs { baseline: "abc" }.to_string(),
            "baseline: differs (abc)"
        );
        assert_eq!(
            BaselineStatus::Unregistered.to_string(),
            "baseline: none registered"
        );
    }
}
