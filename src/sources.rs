pub mod github;

use crate::error::Result;

/// A single pull request comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub body: String,
    pub author: String,
}

/// Identifies one pull request on the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl std::fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

pub trait PullRequestSource {
    /// List the pull request's comments, oldest first.
    fn list_comments(&self, pr: &PullRequestRef) -> Result<Vec<Comment>>;

    /// Add a label to the pull request.
    fn add_label(&self, pr: &PullRequestRef, label: &str) -> Result<()>;
}
