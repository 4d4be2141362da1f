use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// Header variants that mark a comment as a QA report.
pub const DEFAULT_QA_MARKERS: &[&str] = &[
    "QA Report",
    "Quality Assurance Tester Report",
    "Quality Assurance Trainee Report",
];

/// Phrases that mark a comment as a ready-to-test notice.
pub const DEFAULT_RTT_MARKERS: &[&str] = &[
    "Ready to Test",
    "Ready for Testing",
    "Ready for QA",
    "Ready for Quality Assurance",
    "Ready for Quality Assurance Testing",
    "RTT",
];

/// Section header that must precede the verdict in a QA report. Case-sensitive.
pub const RESULTS_MARKER: &str = "Testing Results";

// A failing verdict matches in any case; a bare pass only as "Passed" or "passed".
static NOT_PASSED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)not passed").unwrap());
static PASSED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[Pp]assed").unwrap());

/// Kind of comment, decided from header keywords alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Qa,
    ReadyToTest,
    Invalid,
}

/// Pass/fail outcome stated in a QA report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    NotPassed,
    Unknown,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Passed => write!(f, "passed"),
            Verdict::NotPassed => write!(f, "not passed"),
            Verdict::Unknown => write!(f, "unknown"),
        }
    }
}

/// Which part of the body the verdict scan looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerdictScope {
    /// Scan the whole comment body.
    #[default]
    Body,
    /// Scan only the text after the first results marker.
    AfterMarker,
}

/// Full classification of a single comment body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Qa { has_results: bool, verdict: Verdict },
    ReadyToTest,
    Invalid,
}

/// Keyword sets the classifier matches against.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct KeywordRules {
    pub qa_markers: Vec<String>,
    pub rtt_markers: Vec<String>,
    #[serde(skip)]
    pub results_marker: String,
}

impl Default for KeywordRules {
    fn default() -> Self {
        Self {
            qa_markers: DEFAULT_QA_MARKERS.iter().map(|s| s.to_string()).collect(),
            rtt_markers: DEFAULT_RTT_MARKERS.iter().map(|s| s.to_string()).collect(),
            results_marker: RESULTS_MARKER.to_string(),
        }
    }
}

fn contains_any(body: &str, markers: &[String]) -> bool {
    markers.iter().any(|m| body.contains(m.as_str()))
}

/// Decide the comment kind. QA markers win when both sets match.
pub fn classify_kind(body: &str, rules: &KeywordRules) -> CommentKind {
    if contains_any(body, &rules.qa_markers) {
        CommentKind::Qa
    } else if contains_any(body, &rules.rtt_markers) {
        CommentKind::ReadyToTest
    } else {
        CommentKind::Invalid
    }
}

/// True when the body carries the results section header.
pub fn has_testing_results(body: &str, rules: &KeywordRules) -> bool {
    body.contains(rules.results_marker.as_str())
}

/// Extract the verdict from `body`.
///
/// "Not Passed" (in any case) always wins over a bare "Passed",
/// wherever each appears in the scanned text.
pub fn extract_verdict(body: &str) -> Verdict {
    if NOT_PASSED_RE.is_match(body) {
        Verdict::NotPassed
    } else if PASSED_RE.is_match(body) {
        Verdict::Passed
    } else {
        Verdict::Unknown
    }
}

/// Extract the verdict from the part of `body` selected by `scope`.
pub fn extract_scoped_verdict(body: &str, rules: &KeywordRules, scope: VerdictScope) -> Verdict {
    match scope {
        VerdictScope::Body => extract_verdict(body),
        VerdictScope::AfterMarker => match body.find(rules.results_marker.as_str()) {
            Some(idx) => extract_verdict(&body[idx + rules.results_marker.len()..]),
            None => Verdict::Unknown,
        },
    }
}

pub fn classify(body: &str, rules: &KeywordRules, scope: VerdictScope) -> Classification {
    match classify_kind(body, rules) {
        CommentKind::Qa => Classification::Qa {
            has_results: has_testing_results(body, rules),
            verdict: extract_scoped_verdict(body, rules, scope),
        },
        CommentKind::ReadyToTest => Classification::ReadyToTest,
        CommentKind::Invalid => Classification::Invalid,
    }
}
