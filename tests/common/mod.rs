#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use qa_report::classifier::{KeywordRules, VerdictScope};
use qa_report::config::{Config, DEFAULT_API_URL};
use qa_report::error::{Error, Result};
use qa_report::sources::{Comment, PullRequestRef, PullRequestSource};

/// Sensible default `Config` for tests. Callers can override fields via struct update syntax.
pub fn default_test_config() -> Config {
    Config {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        pr_number: 42,
        token: "ghp_test".to_string(),
        label_pass: Some("qa-passed".to_string()),
        label_fail: Some("qa-failed".to_string()),
        label_rtt: Some("ready-to-test".to_string()),
        api_url: DEFAULT_API_URL.to_string(),
        verdict_scope: VerdictScope::Body,
        dry_run: false,
        keywords: KeywordRules::default(),
    }
}

pub fn comment(author: &str, body: &str) -> Comment {
    Comment {
        body: body.to_string(),
        author: author.to_string(),
    }
}

#[derive(Default)]
pub struct SourceTracker {
    pub listed: Vec<PullRequestRef>,
    pub labels: Vec<(u64, String)>,
}

/// In-memory pull request with a fixed comment list.
pub struct MockSource {
    comments: std::result::Result<Vec<Comment>, String>,
    fail_labels: bool,
    pub tracker: Arc<Mutex<SourceTracker>>,
}

impl MockSource {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self {
            comments: Ok(comments),
            fail_labels: false,
            tracker: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            comments: Err(message.to_string()),
            fail_labels: false,
            tracker: Arc::default(),
        }
    }

    pub fn with_failing_labels(mut self) -> Self {
        self.fail_labels = true;
        self
    }
}

impl PullRequestSource for MockSource {
    fn list_comments(&self, pr: &PullRequestRef) -> Result<Vec<Comment>> {
        self.tracker.lock().unwrap().listed.push(pr.clone());
        match &self.comments {
            Ok(comments) => Ok(comments.clone()),
            Err(message) => Err(Error::Api(message.clone())),
        }
    }

    fn add_label(&self, pr: &PullRequestRef, label: &str) -> Result<()> {
        if self.fail_labels {
            return Err(Error::Api("HTTP 403: Resource not accessible by integration".into()));
        }
        self.tracker
            .lock()
            .unwrap()
            .labels
            .push((pr.number, label.to_string()));
        Ok(())
    }
}
