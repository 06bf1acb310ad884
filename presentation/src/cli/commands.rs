//! CLI command definitions

use clap::{Parser, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

/// Output format for coordinated results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Primary message, every advisor, consensus, conflicts and actions
    Full,
    /// Primary message and ranked actions
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormatArg> for council_domain::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Full => Self::Full,
            OutputFormatArg::Summary => Self::Summary,
            OutputFormatArg::Json => Self::Json,
        }
    }
}

/// CLI arguments for advisor-council
#[derive(Parser, Debug)]
#[command(name = "advisor-council")]
#[command(author, version, about = "Advisor Council - specialist advisors answer together")]
#[command(long_about = r#"
Advisor Council routes a training question to the right specialist advisors,
asks them in parallel under one deadline, and merges their answers.

A round has four stages:
1. Routing: pick advisors from keywords, context flags and (optionally) the head coach
2. Gathering: every selected advisor answers in parallel; late ones are replaced
3. Resolving: shared recommendations become consensus, contested ones are resolved
4. Extracting: concrete, ranked action items are lifted out of the answers

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables (e.g. COUNCIL_CACHE__ENABLED=false)
2. --config <path>      Explicit config file
3. ./council.toml       Project-level config
4. ~/.config/advisor-council/config.toml   Global config

Example:
  advisor-council "my knee hurts during squats"
  advisor-council -a nutrition -a recovery "what should I eat after a long run?"
  advisor-council -c pain_reported=true -c days_to_race=12 "should I train today?"
  advisor-council --emergency --severity high "sharp pain in my ankle mid-run"
"#)]
pub struct Cli {
    /// The question for the advisors
    pub query: Option<String>,

    /// Consult exactly these advisors (can be specified multiple times)
    #[arg(short, long = "advisor", value_name = "ID")]
    pub advisors: Vec<String>,

    /// Context entry; the value is parsed as JSON when possible
    #[arg(short, long = "context", value_name = "KEY=VALUE", value_parser = parse_context_entry)]
    pub context: Vec<(String, Value)>,

    /// Emergency round: safety, recovery and head coach only
    #[arg(long)]
    pub emergency: bool,

    /// Severity recorded with an emergency round (default: high)
    #[arg(long, value_name = "LEVEL", requires = "emergency")]
    pub severity: Option<String>,

    /// Disable the assisted routing call
    #[arg(long)]
    pub no_assist: bool,

    /// Output format (defaults to the configured format, then summary)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormatArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Parse `KEY=VALUE`, reading the value as JSON and falling back to a string
pub fn parse_context_entry(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty context key in '{}'", raw));
    }
    let value = serde_json::from_str(value.trim())
        .unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
