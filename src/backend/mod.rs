//! Reasoning backends.
//!
//! A backend turns an artifact set into free-form text describing
//! contradictions. It never parses its own output: the raw text is handed to
//! `crate::parse` together with the backend's declared output format.
//!
//! - `mock`: deterministic rule-based backend for tests
//! - `remote`: chat-completions API call, JSON output contract
//! - `external`: local helper command, line output contract

mod external;
mod mock;
pub mod prompt;
mod remote;

pub use external::ExternalCliBackend;
pub use mock::MockBackend;
pub use remote::RemoteApiBackend;

use thiserror::Error;

use crate::artifact::ArtifactSet;
use crate::config::{Config, Mode};
use crate::parse::OutputFormat;

/// A backend was requested that cannot run with the given configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set")]
    MissingCredential,
    #[error("external tool backend requested but USE_EXTERNAL_TOOL is not enabled")]
    ExternalToolDisabled,
}

/// Errors that can occur while invoking a backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("external tool '{0}' is not available")]
    ToolUnavailable(String),
    #[error("external tool exited with {status}: {stderr}")]
    ToolFailed { status: String, stderr: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },
    #[error("malformed API response: {0}")]
    MalformedResponse(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError {
    /// True when the external mechanism could not be reached at all, as
    /// opposed to failing after it was invoked.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            BackendError::Configuration(_) | BackendError::ToolUnavailable(_)
        )
    }
}

/// A pluggable reasoning backend.
pub trait Backend {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// The output contract this backend asks for. Fixed per backend.
    fn output_format(&self) -> OutputFormat;

    /// Produce the raw response for `artifacts`.
    fn invoke(&self, artifacts: &ArtifactSet) -> Result<String, BackendError>;
}

/// Pick the backend for `config.mode`.
///
/// Only checks that the credential or tool gate the mode needs is present;
/// nothing is contacted.
pub fn select(config: &Config) -> Result<Box<dyn Backend>, ConfigError> {
    match config.mode {
        Mode::Mock => Ok(Box::new(MockBackend)),
        Mode::RemoteApi => {
            let api_key = config.api_key().ok_or(ConfigError::MissingCredential)?;
            Ok(Box::new(RemoteApiBackend::new(api_key, config)))
        }
        Mode::ExternalCli => {
            if !config.use_external_tool {
                return Err(ConfigError::ExternalToolDisabled);
            }
            Ok(Box::new(ExternalCliBackend::new(
                &config.tool_command,
                config.tool_args.clone(),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_defaults_to_mock() {
        let backend = select(&Config::default()).unwrap();
        assert_eq!(backend.name(), "mock");
        assert_eq!(backend.output_format(), OutputFormat::Lines);
    }

    #[test]
    fn test_select_remote_requires_credential() {
        let config = Config {
            mode: Mode::RemoteApi,
            ..Default::default()
        };
        assert_eq!(select(&config).err(), Some(ConfigError::MissingCredential));

        let config = Config {
            mode: Mode::RemoteApi,
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let backend = select(&config).unwrap();
        assert_eq!(backend.name(), "remote-api");
        assert_eq!(backend.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_select_external_requires_flag() {
        let config = Config {
            mode: Mode::ExternalCli,
            ..Default::default()
        };
        assert_eq!(
            select(&config).err(),
            Some(ConfigError::ExternalToolDisabled)
        );

        let config = Config {
            mode: Mode::ExternalCli,
            use_external_tool: true,
            ..Default::default()
        };
        let backend = select(&config).unwrap();
        assert_eq!(backend.name(), "external-cli");
        assert_eq!(backend.output_format(), OutputFormat::Lines);
    }

    #[test]
    fn test_unavailable_classification() {
        assert!(BackendError::from(ConfigError::MissingCredential).is_unavailable());
        assert!(BackendError::ToolUnavailable("llm".to_string()).is_unavailable());
        assert!(!BackendError::Api {
            status: 500,
            body: String::new()
        }
        .is_unavailable());
    }
}
