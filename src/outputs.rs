//! GitHub Actions workflow commands: step outputs and failure annotations.

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Name of the step output carrying the run result.
pub const RESULT_OUTPUT: &str = "QA-Report";

const HEREDOC_DELIMITER: &str = "QA_REPORT_EOF";

/// Escape a value for use in a `::command::` line.
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Render the workflow command that marks the step as failed.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Render one `$GITHUB_OUTPUT` entry, switching to heredoc syntax for multiline values.
pub fn format_output(name: &str, value: &str) -> Result<String> {
    if name.is_empty() || name.contains(['=', '\n', '\r']) {
        return Err(Error::Output(format!(
            "invalid output name: {name:?}"
        )));
    }
    if !value.contains(['\n', '\r']) {
        return Ok(format!("{name}={value}\n"));
    }
    if value.lines().any(|l| l == HEREDOC_DELIMITER) {
        return Err(Error::Output(format!(
            "output {name} contains the heredoc delimiter"
        )));
    }
    Ok(format!(
        "{name}<<{HEREDOC_DELIMITER}\n{value}\n{HEREDOC_DELIMITER}\n"
    ))
}

/// Destination for step outputs.
#[derive(Debug, Clone, Default)]
pub struct ActionOutput {
    output_file: Option<PathBuf>,
}

impl ActionOutput {
    pub fn new(output_file: Option<PathBuf>) -> Self {
        Self { output_file }
    }

    /// Use `$GITHUB_OUTPUT` when set, stdout otherwise.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var_os("GITHUB_OUTPUT")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        )
    }

    pub fn set_output(&self, name: &str, value: &str) -> Result<()> {
        let entry = format_output(name, value)?;
        match &self.output_file {
            Some(path) => {
                let mut f = std::fs::OpenOptions::new()
                    .append(true)
                    .create(true)
                    .open(path)?;
                f.write_all(entry.as_bytes())?;
                debug!(name, value, path = %path.display(), "wrote step output");
            }
            None => {
                warn!("GITHUB_OUTPUT not set, writing output to stdout");
                print!("{entry}");
            }
        }
        Ok(())
    }
}

/// Report a failure to the runner. The caller is responsible for the exit code.
pub fn set_failed(message: &str) {
    println!("{}", error_command(message));
}
