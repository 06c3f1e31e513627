use crate::config::DEFAULT_OUTPUT_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clawcfg", version, about = "OpenClaw configuration generator")]
pub struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build openclaw.json from a state file
    Build(BuildOpts),
    /// Validate a state file and list its issues
    Check(CheckOpts),
    /// Suggest token limits for a model id
    Limits(LimitsOpts),
    /// Write a default state file
    Init(InitOpts),
    Version,
}

#[derive(clap::Args)]
pub struct BuildOpts {
    /// State file (JSON, JSON5, YAML or TOML); defaults are used when absent
    #[arg(short, long, env = "CLAWCFG_STATE")]
    pub state: Option<PathBuf>,
    /// Output file; `-` writes to stdout
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,
    /// Write the document even if it has errors
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct CheckOpts {
    #[arg(short, long, env = "CLAWCFG_STATE")]
    pub state: Option<PathBuf>,
    /// Print the full build result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct LimitsOpts {
    /// openai-completions, openai-responses or anthropic-messages
    pub api: String,
    pub model_id: String,
}

#[derive(clap::Args)]
pub struct InitOpts {
    #[arg(default_value = "clawcfg.json")]
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_build_flags() {
        let cli = Cli::parse_from(["clawcfg", "build", "-s", "state.yaml", "-o", "out.json", "--force"]);
        match cli.command {
            Commands::Build(opts) => {
                assert_eq!(opts.state, Some(PathBuf::from("state.yaml")));
                assert_eq!(opts.output, PathBuf::from("out.json"));
                assert!(opts.force);
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn build_writes_openclaw_json_by_default() {
        let cli = Cli::parse_from(["clawcfg", "build"]);
        match cli.command {
            Commands::Build(opts) => {
                assert_eq!(opts.output, PathBuf::from("openclaw.json"));
                assert!(!opts.force);
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn init_has_default_path() {
        let cli = Cli::parse_from(["clawcfg", "init"]);
        match cli.command {
            Commands::Init(opts) => assert_eq!(opts.path, PathBuf::from("clawcfg.json")),
            _ => panic!("expected init"),
        }
    }
}
