//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use localcrew_domain::OutputFormat;
use std::path::PathBuf;

/// Output format for tool results and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Colored, human-readable output
    Pretty,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pretty => OutputFormat::Pretty,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

/// CLI arguments for localcrew
#[derive(Parser, Debug)]
#[command(name = "localcrew")]
#[command(author, version, about = "Local LLM analysis tools and inbox classifier")]
#[command(long_about = r#"
localcrew runs structured analysis tools against a local Ollama server and
watches an inbox directory, classifying new files by hashtags and frontmatter.

Every tool renders a prompt, asks the model for a completion and extracts a
JSON object from the reply. When the model does not cooperate the tool still
answers, with empty fallback fields and an "error" message.

Configuration files are loaded from (in priority order):
1. LOCALCREW_* environment variables (e.g. LOCALCREW_OLLAMA__BASE_URL)
2. --config <path>     Explicit config file
3. ./localcrew.toml    Project-level config
4. ~/.config/localcrew/config.toml   Global config

Example:
  localcrew tools
  localcrew run extract_keywords --file notes.md
  cat report.txt | localcrew run generate_summary --variant technical
  localcrew models --export models.yaml
  localcrew watch --dir ~/Documents/Inbox
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (overrides [output].format)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<FormatArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run an analysis tool
    Run {
        /// Tool name (see `localcrew tools`)
        tool: String,

        /// Content to analyze
        #[arg(short, long, conflicts_with = "file")]
        content: Option<String>,

        /// Read the content from a file (stdin when neither is given)
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Prompt variant for template-backed tools
        #[arg(long)]
        variant: Option<String>,
    },

    /// List available tools
    Tools {
        /// Print the JSON schema of every tool
        #[arg(long)]
        schema: bool,
    },

    /// List prompt templates
    Prompts {
        /// Only show variants of this tool type
        tool_type: Option<String>,
    },

    /// Show the models the backend serves and which ones would be used
    Models {
        /// Only list models of this family
        #[arg(long)]
        family: Option<String>,

        /// Write the report to a YAML file
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,
    },

    /// Send a raw prompt to the model
    Generate {
        prompt: String,

        /// Model to use instead of the configured default
        #[arg(short, long)]
        model: Option<String>,

        /// Sampling temperature
        #[arg(short, long)]
        temperature: Option<f64>,

        /// Ask for JSON and extract it from the reply
        #[arg(long)]
        json: bool,
    },

    /// Compute an embedding vector
    Embed {
        text: String,

        /// Embedding model to use instead of the detected one
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Watch a directory and classify new files
    Watch {
        /// Directory to watch (overrides [watcher].dir)
        #[arg(long, value_name = "PATH")]
        dir: Option<PathBuf>,

        /// Seconds between scans (overrides [watcher].poll_interval_secs)
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,

        /// Scan once and exit
        #[arg(long)]
        once: bool,
    },
}
