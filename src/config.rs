use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::classifier::{KeywordRules, VerdictScope};
use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::sources::PullRequestRef;

pub const DEFAULT_CONFIG_PATH: &str = ".qa-report.toml";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub repo_owner: Option<String>,
    pub repo_name: Option<String>,
    pub label_pass: Option<String>,
    pub label_fail: Option<String>,
    pub label_rtt: Option<String>,
    pub api_url: Option<String>,
    pub strict_verdict: Option<bool>,
    pub dry_run: Option<bool>,
    pub keywords: Option<KeywordRules>,
}

/// Values GitHub Actions provides to every step, used as fallbacks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionEnv {
    /// `$GITHUB_REPOSITORY`, in `owner/name` form.
    pub repository: Option<String>,
    /// `$GITHUB_TOKEN`.
    pub token: Option<String>,
    /// `$GITHUB_API_URL`, set by the runner on every step.
    pub api_url: Option<String>,
}

impl ActionEnv {
    pub fn from_env() -> Self {
        Self {
            repository: std::env::var("GITHUB_REPOSITORY").ok(),
            token: std::env::var("GITHUB_TOKEN").ok(),
            api_url: std::env::var("GITHUB_API_URL").ok(),
        }
    }

    fn owner_and_name(&self) -> Option<(String, String)> {
        let repository = non_empty(self.repository.clone())?;
        let (owner, name) = repository.split_once('/')?;
        Some((owner.to_string(), name.to_string()))
    }
}

#[derive(Clone, PartialEq)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
    pub token: String,
    pub label_pass: Option<String>,
    pub label_fail: Option<String>,
    pub label_rtt: Option<String>,
    pub api_url: String,
    pub verdict_scope: VerdictScope,
    pub dry_run: bool,
    pub keywords: KeywordRules,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("pr_number", &self.pr_number)
            .field("token", &"<redacted>")
            .field("label_pass", &self.label_pass)
            .field("label_fail", &self.label_fail)
            .field("label_rtt", &self.label_rtt)
            .field("api_url", &self.api_url)
            .field("verdict_scope", &self.verdict_scope)
            .field("dry_run", &self.dry_run)
            .field("keywords", &self.keywords)
            .finish()
    }
}

impl Config {
    pub fn load(cli: &Cli) -> Result<Self> {
        let file_config = match cli.config.as_deref() {
            Some(path) => {
                let config_path = Path::new(path);
                if !config_path.exists() {
                    return Err(Error::ConfigNotFound(config_path.to_path_buf()));
                }
                parse_config(&std::fs::read_to_string(config_path)?)?
            }
            None => {
                let config_path = Path::new(DEFAULT_CONFIG_PATH);
                if config_path.exists() {
                    parse_config(&std::fs::read_to_string(config_path)?)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        merge(file_config, cli, &ActionEnv::from_env())
    }

    pub fn pull_request(&self) -> PullRequestRef {
        PullRequestRef {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            number: self.pr_number,
        }
    }
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ConfigFile) -> Result<()> {
    if let Some(ref url) = config.api_url {
        validate_api_url(url)?;
    }
    if let Some(ref keywords) = config.keywords {
        validate_markers("qa_markers", &keywords.qa_markers)?;
        validate_markers("rtt_markers", &keywords.rtt_markers)?;
    }
    Ok(())
}

fn validate_api_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(Error::ConfigValidation(format!(
            "api_url must start with http:// or https:// (got: {url})"
        )))
    }
}

fn validate_markers(name: &str, markers: &[String]) -> Result<()> {
    if markers.is_empty() {
        return Err(Error::ConfigValidation(format!(
            "keywords.{name} must not be empty"
        )));
    }
    if markers.iter().any(|m| m.is_empty()) {
        return Err(Error::ConfigValidation(format!(
            "keywords.{name} must not contain empty strings"
        )));
    }
    Ok(())
}

/// GitHub passes unset action inputs as empty strings.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn pick(cli: &Option<String>, file: Option<String>) -> Option<String> {
    non_empty(cli.clone()).or_else(|| non_empty(file))
}

fn parse_pr_number(raw: &str) -> Result<u64> {
    match raw.trim().trim_start_matches('#').parse::<u64>() {
        Ok(0) | Err(_) => Err(Error::ConfigValidation(format!(
            "pr number must be a positive integer (got: {raw})"
        ))),
        Ok(n) => Ok(n),
    }
}

/// Combine CLI/input values, the config file, and the Actions environment.
///
/// Precedence is CLI > file > environment > built-in default.
pub fn merge(file: ConfigFile, cli: &Cli, env: &ActionEnv) -> Result<Config> {
    let env_repo = env.owner_and_name();

    let owner = pick(&cli.repo_owner, file.repo_owner)
        .or_else(|| env_repo.as_ref().map(|(owner, _)| owner.clone()))
        .ok_or_else(|| Error::ConfigValidation("repo owner is required".to_string()))?;
    let repo = pick(&cli.repo_name, file.repo_name)
        .or_else(|| env_repo.as_ref().map(|(_, name)| name.clone()))
        .ok_or_else(|| Error::ConfigValidation("repo name is required".to_string()))?;

    let pr_number = match non_empty(cli.pr_number.clone()) {
        Some(raw) => parse_pr_number(&raw)?,
        None => {
            return Err(Error::ConfigValidation(
                "pr number is required".to_string(),
            ));
        }
    };

    let token = non_empty(cli.github_token.clone())
        .or_else(|| non_empty(env.token.clone()))
        .ok_or_else(|| Error::ConfigValidation("github token is required".to_string()))?;

    let api_url = pick(&cli.api_url, file.api_url)
        .or_else(|| non_empty(env.api_url.clone()))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    validate_api_url(&api_url)?;

    let strict = cli.strict_verdict || file.strict_verdict.unwrap_or(false);

    Ok(Config {
        owner,
        repo,
        pr_number,
        token,
        label_pass: pick(&cli.label_pass, file.label_pass),
        label_fail: pick(&cli.label_fail, file.label_fail),
        label_rtt: pick(&cli.label_rtt, file.label_rtt),
        api_url,
        verdict_scope: if strict {
            VerdictScope::AfterMarker
        } else {
            VerdictScope::Body
        },
        dry_run: cli.dry_run || file.dry_run.unwrap_or(false),
        keywords: file.keywords.unwrap_or_default(),
    })
}
