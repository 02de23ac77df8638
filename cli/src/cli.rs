use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "threat-intel")]
#[command(
    author,
    version,
    about = "Query the FalconFeeds threat intelligence API and render security report prompts"
)]
pub struct Cli {
    /// Configuration file (defaults to threat-intel.toml when present)
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `threat_intel=trace` (overrides RUST_LOG and the config file)
    #[clap(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Where to write the file
        #[clap(short, long, default_value = threat_intel::DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file without asking
        #[clap(long, default_value_t = false)]
        force: bool,
    },

    /// Print every tool definition as JSON
    Tools,

    /// Run a tool and print its output
    Call {
        /// Tool name, as listed by `tools`
        tool: String,

        /// Tool arguments as a JSON object
        #[clap(short, long, default_value = "{}")]
        args: String,
    },

    /// List the report prompt templates and their arguments
    Prompts,

    /// Render a report prompt
    Render {
        /// Prompt name, as listed by `prompts`
        prompt: String,

        /// Prompt argument as `name=value`; repeat for several arguments
        #[clap(short = 'a', long = "arg", value_parser = parse_key_value)]
        args: Vec<(String, String)>,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))
}
