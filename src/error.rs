use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    ConfigValidation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GitHub API error: {0}")]
    Api(String),

    #[error("no comments found on PR #{0}")]
    NoComments(u64),

    #[error("Not a QA comment")]
    NotQaComment,

    #[error("No testing results found")]
    NoTestingResults,

    #[error("QA Reported as NOT PASSED")]
    NotPassed,

    #[error("QA report has no verdict (expected \"Passed\" or \"Not Passed\")")]
    NoVerdict,

    #[error("output error: {0}")]
    Output(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, Error>;
