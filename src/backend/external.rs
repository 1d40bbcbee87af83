//! External CLI backend.
//!
//! Writes the prompt to a scratch file, feeds that file to the helper
//! command on stdin and returns whatever the command prints on stdout.
//! `{prompt_file}` inside a tool argument is replaced by the scratch file's
//! path for tools that want a path instead of stdin.
//!
//! The scratch file is a `NamedTempFile` owned by `invoke`, so it is removed
//! when `invoke` returns on every path.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::{prompt, Backend, BackendError};
use crate::artifact::ArtifactSet;
use crate::parse::OutputFormat;

/// Placeholder replaced by the scratch file path in tool arguments.
pub const PROMPT_FILE_PLACEHOLDER: &str = "{prompt_file}";

pub struct ExternalCliBackend {
    command: String,
    args: Vec<String>,
}

impl ExternalCliBackend {
    pub fn new(command: &str, args: Vec<String>) -> Self {
        Self {
            command: command.to_string(),
            args,
        }
    }

    fn write_prompt(&self, artifacts: &ArtifactSet) -> Result<NamedTempFile, BackendError> {
        let mut file = tempfile::Builder::new()
            .prefix("crosscheck-prompt-")
            .suffix(".txt")
            .tempfile()?;
        file.write_all(prompt::build(artifacts, self.output_format()).as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

impl Backend for ExternalCliBackend {
    fn name(&self) -> &'static str {
        "external-cli"
    }

    fn output_format(&self) -> OutputFormat {
        OutputFormat::Lines
    }

    fn invoke(&self, artifacts: &ArtifactSet) -> Result<String, BackendError> {
        let scratch = self.write_prompt(artifacts)?;
        let prompt_path = scratch.path().to_string_lossy().to_string();

        let args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.replace(PROMPT_FILE_PLACEHOLDER, &prompt_path))
            .collect();

        debug!(command = %self.command, ?args, prompt = %prompt_path, "running external tool");

        let output = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::from(scratch.reopen()?))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    BackendError::ToolUnavailable(self.command.clone())
                }
                _ => BackendError::Io(e),
            })?;

        if !output.status.success() {
            return Err(BackendError::ToolFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        info!(bytes = stdout.len(), "received external tool output");
        Ok(stdout)
    }
}
