use clap::Parser;

/// Label pull requests from their latest QA comment
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "qa-report", version, about)]
pub struct Cli {
    /// GitHub token used for the REST API
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository owner (default: from $GITHUB_REPOSITORY)
    #[arg(long, env = "INPUT_REPO-OWNER")]
    pub repo_owner: Option<String>,

    /// Repository name (default: from $GITHUB_REPOSITORY)
    #[arg(long, env = "INPUT_REPO-NAME")]
    pub repo_name: Option<String>,

    /// Pull request number to inspect
    #[arg(long, env = "INPUT_PR-NUMBER")]
    pub pr_number: Option<String>,

    /// Label to add when QA passed
    #[arg(long, env = "INPUT_LABEL-PASS")]
    pub label_pass: Option<String>,

    /// Label to add when QA did not pass
    #[arg(long, env = "INPUT_LABEL-FAIL")]
    pub label_fail: Option<String>,

    /// Label to add when the PR is ready to test
    #[arg(long, env = "INPUT_LABEL-RTT")]
    pub label_rtt: Option<String>,

    /// GitHub REST API base URL (default: $GITHUB_API_URL, then https://api.github.com)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Only look for the verdict after the "Testing Results" marker
    #[arg(long)]
    pub strict_verdict: bool,

    /// Classify and report without adding labels
    #[arg(long)]
    pub dry_run: bool,

    /// Path to config file (default: .qa-report.toml, if present)
    #[arg(long)]
    pub config: Option<String>,
}
