//! Runtime configuration.
//!
//! Assembled once at startup (see `cli::Cli::config`) and passed by value to
//! the backend selector. Nothing downstream reads the process environment.

use clap::ValueEnum;
pub const DEFAULT_LOCALE: &str = "ja_JP.UTF-8";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TOOL_COMMAND: &str = "llm";

/// Which reasoning backend to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Deterministic rule-based backend
    #[default]
    Mock,
    /// Chat-completions API call
    #[value(alias = "openai")]
    RemoteApi,
    /// Local helper command fed the prompt on stdin
    #[value(alias = "cli")]
    ExternalCli,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Mock => "mock",
            Mode::RemoteApi => "remote-api",
            Mode::ExternalCli => "external-cli",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What an infrastructure failure (missing credential, missing tool,
/// transport error) turns into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FailurePolicy {
    /// Report a synthetic contradiction so the run fails
    #[default]
    FailClosed,
    /// Report nothing so the run passes
    FailOpen,
}

/// What to do when every contradiction a backend reported names a file
/// outside the supplied set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutOfSetPolicy {
    /// Surface it as a synthetic contradiction
    #[default]
    Report,
    /// Treat it as no contradiction
    Ignore,
}

/// Complete configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    /// Credential for the remote API backend
    pub api_key: Option<String>,
    /// Gate for the external CLI backend
    pub use_external_tool: bool,
    /// Reply-language hint passed to the remote backend
    pub locale: String,
    pub model: String,
    pub api_base: String,
    pub max_tokens: u32,
    pub tool_command: String,
    pub tool_args: Vec<String>,
    pub failure_policy: FailurePolicy,
    pub out_of_set: OutOfSetPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            api_key: None,
            use_external_tool: false,
            locale: DEFAULT_LOCALE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            tool_command: DEFAULT_TOOL_COMMAND.to_string(),
            tool_args: Vec::new(),
            failure_policy: FailurePolicy::default(),
            out_of_set: OutOfSetPolicy::default(),
        }
    }
}

impl Config {
    /// The API key, treating an empty value as unset.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}
