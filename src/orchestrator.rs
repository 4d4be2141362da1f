use tracing::{info, warn};

use crate::classifier::{Classification, Verdict, classify};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::sources::{PullRequestRef, PullRequestSource};

/// Successful end state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// QA report with a passing verdict.
    Passed { label: Option<String> },
    /// Ready-to-test notice; no verdict is processed.
    ReadyToTest { label: Option<String> },
}

impl Outcome {
    /// Value published under the `QA-Report` step output.
    pub fn result_value(&self) -> &'static str {
        match self {
            Outcome::Passed { .. } => "PASSED",
            Outcome::ReadyToTest { .. } => "RTT",
        }
    }

    /// Label that was applied, if one was configured.
    pub fn label(&self) -> Option<&str> {
        match self {
            Outcome::Passed { label } | Outcome::ReadyToTest { label } => label.as_deref(),
        }
    }
}

pub struct Orchestrator<S: PullRequestSource> {
    source: S,
    config: Config,
}

impl<S: PullRequestSource> Orchestrator<S> {
    pub fn new(source: S, config: Config) -> Self {
        Self { source, config }
    }

    /// Inspect the latest comment on the configured PR and label it.
    ///
    /// Returns an error for every condition that should fail the pipeline,
    /// including a QA report that did not pass (after its fail label is applied).
    pub fn run(&self) -> Result<Outcome> {
        let pr = self.config.pull_request();
        info!(pr = %pr, "fetching comments");

        let comments = self.source.list_comments(&pr)?;
        let Some(comment) = comments.last() else {
            return Err(Error::NoComments(pr.number));
        };
        info!(author = %comment.author, total = comments.len(), "last comment");

        match classify(
            &comment.body,
            &self.config.keywords,
            self.config.verdict_scope,
        ) {
            Classification::Invalid => Err(Error::NotQaComment),
            Classification::ReadyToTest => {
                info!("PR marked ready to test");
                let label = self.apply_label(&pr, self.config.label_rtt.as_deref())?;
                Ok(Outcome::ReadyToTest { label })
            }
            Classification::Qa {
                has_results: false, ..
            } => Err(Error::NoTestingResults),
            Classification::Qa { verdict, .. } => {
                info!(%verdict, "QA report found");
                self.finish_qa(&pr, verdict)
            }
        }
    }

    fn finish_qa(&self, pr: &PullRequestRef, verdict: Verdict) -> Result<Outcome> {
        match verdict {
            Verdict::Passed => {
                info!("QA Reported as PASSED");
                let label = self.apply_label(pr, self.config.label_pass.as_deref())?;
                Ok(Outcome::Passed { label })
            }
            Verdict::NotPassed => {
                warn!("QA Reported as NOT PASSED");
                self.apply_label(pr, self.config.label_fail.as_deref())?;
                Err(Error::NotPassed)
            }
            Verdict::Unknown => Err(Error::NoVerdict),
        }
    }

    fn apply_label(&self, pr: &PullRequestRef, label: Option<&str>) -> Result<Option<String>> {
        let Some(label) = label else {
            info!("no label configured for this result");
            return Ok(None);
        };

        if self.config.dry_run {
            info!(label, pr = %pr, "[dry-run] would add label");
        } else {
            self.source.add_label(pr, label)?;
            info!(label, pr = %pr, "label added");
        }
        Ok(Some(label.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_values() {
        assert_eq!(Outcome::Passed { label: None }.result_value(), "PASSED");
        assert_eq!(
            Outcome::ReadyToTest {
                label: Some("rtt".to_string())
            }
            .result_value(),
            "RTT"
        );
    }

    #[test]
    fn test_outcome_label() {
        let outcome = Outcome::Passed {
            label: Some("qa-passed".to_string()),
        };
        assert_eq!(outcome.label(), Some("qa-passed"));
        assert_eq!(Outcome::ReadyToTest { label: None }.label(), None);
    }
}
