//! Command-line interface for crosscheck.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use crate::analyze;
use crate::artifact::{ArtifactSet, MIN_ARTIFACTS};
use crate::config::{self, Config, FailurePolicy, Mode, OutOfSetPolicy};
use crate::report::{self, Signal};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
/// Usage and I/O errors share the failure code.
pub const EXIT_ERROR: i32 = 1;

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `file1,file2:description` lines
    #[default]
    Text,
    /// Structured JSON report
    Json,
}

/// Detect contradictions between implementation files and their documentation.
///
/// Prints one `file1,file2:description` line per contradiction and exits 1,
/// or prints nothing and exits 0 when the files agree.
#[derive(Parser, Debug)]
#[command(name = "crosscheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files to compare (two or more)
    pub files: Vec<PathBuf>,

    /// Backend used to analyze the files
    #[arg(short, long, env = "LLM_MODE", value_enum, default_value_t = Mode::Mock)]
    pub mode: Mode,

    /// API key for the remote-api backend
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Allow the external-cli backend to run a local command
    #[arg(
        long,
        env = "USE_EXTERNAL_TOOL",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub use_external_tool: bool,

    /// Locale hint for the language of the remote backend's replies
    #[arg(long, env = "LANG", default_value = config::DEFAULT_LOCALE)]
    pub locale: String,

    /// Model requested from the remote API
    #[arg(long, env = "OPENAI_MODEL", default_value = config::DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the chat-completions API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = config::DEFAULT_API_BASE)]
    pub api_base: String,

    /// Upper bound on tokens in the remote reply
    #[arg(long, default_value_t = config::DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Command run by the external-cli backend
    #[arg(long, env = "CROSSCHECK_TOOL", default_value = config::DEFAULT_TOOL_COMMAND)]
    pub tool_command: String,

    /// Argument passed to the external command ({prompt_file} expands to the prompt path)
    #[arg(long = "tool-arg", allow_hyphen_values = true)]
    pub tool_args: Vec<String>,

    /// How backend failures are reported
    #[arg(long, env = "CROSSCHECK_FAILURE_POLICY", value_enum, default_value_t = FailurePolicy::FailClosed)]
    pub failure_policy: FailurePolicy,

    /// How contradictions naming files outside the input are reported
    #[arg(long, env = "CROSSCHECK_OUT_OF_SET", value_enum, default_value_t = OutOfSetPolicy::Report)]
    pub out_of_set: OutOfSetPolicy,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Assemble the runtime configuration. This is the only place options
    /// coming from the environment are read.
    pub fn config(&self) -> Config {
        Config {
            mode: self.mode,
            api_key: self.api_key.clone(),
            use_external_tool: self.use_external_tool,
            locale: self.locale.clone(),
            model: self.model.clone(),
            api_base: self.api_base.clone(),
            max_tokens: self.max_tokens,
            tool_command: self.tool_command.clone(),
            tool_args: self.tool_args.clone(),
            failure_policy: self.failure_policy,
            out_of_set: self.out_of_set,
        }
    }
}

/// Usage text for too few files.
pub fn usage(config: &Config) -> String {
    let key_state = if config.api_key().is_some() {
        "set"
    } else {
        "not set"
    };
    format!(
        "Usage: crosscheck <file1> <file2> [<file3>...]\n\
         Environment:\n  \
         LLM_MODE          backend to use: mock, remote-api, external-cli (current: {})\n  \
         OPENAI_API_KEY    API key for remote-api ({})\n  \
         USE_EXTERNAL_TOOL enable the external-cli backend (current: {})\n  \
         LANG              reply language hint (current: {})",
        config.mode, key_state, config.use_external_tool, config.locale
    )
}

/// Run a check and return the exit code.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.config();

    if cli.files.len() < MIN_ARTIFACTS {
        eprintln!("{}", usage(&config));
        return Ok(EXIT_ERROR);
    }

    let artifacts = match ArtifactSet::read_paths(&cli.files) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    info!(mode = %config.mode, "selected backend mode");
    let analysis = analyze::analyze(&config, &artifacts);

    let signal = match cli.format {
        Format::Json => report::write_json(&artifacts, &analysis)?,
        Format::Text => report::write_text(&analysis.result),
    };

    Ok(match signal {
        Signal::Success => EXIT_SUCCESS,
        Signal::Failure => EXIT_FAILED,
    })
}
