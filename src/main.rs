use anyhow::{anyhow, Context};
use clap::Parser;
use clawcfg::cli::{BuildOpts, CheckOpts, Cli, Commands, InitOpts, LimitsOpts};
use clawcfg::config::{read_state_file, write_default_state, write_document, IssueLevel, ModelApi};
use clawcfg::{build_config, infer_limits, logging, BuildResult, GeneratorState};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.log_json);

    match cli.command {
        Commands::Build(opts) => build(opts),
        Commands::Check(opts) => check(opts),
        Commands::Limits(opts) => limits(opts),
        Commands::Init(opts) => init(opts),
        Commands::Version => {
            println!("clawcfg {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_state(path: Option<&Path>) -> anyhow::Result<GeneratorState> {
    match path {
        Some(path) => {
            let state = read_state_file(path)
                .with_context(|| format!("Failed to load state from '{}'", path.display()))?;
            info!(path = %path.display(), "Loaded generator state");
            Ok(state)
        }
        None => {
            info!("No state file given, using defaults");
            Ok(GeneratorState::default())
        }
    }
}

fn log_issues(result: &BuildResult) {
    for issue in &result.issues {
        match issue.level {
            IssueLevel::Error => error!(path = %issue.path, "{}", issue.message),
            IssueLevel::Warning => warn!(path = %issue.path, "{}", issue.message),
            IssueLevel::Info => info!(path = %issue.path, "{}", issue.message),
        }
    }
}

fn build(opts: BuildOpts) -> anyhow::Result<ExitCode> {
    let state = load_state(opts.state.as_deref())?;
    let result = build_config(&state);
    log_issues(&result);

    if result.has_errors() && !opts.force {
        error!(
            errors = result.errors().count(),
            "Refusing to export a config with errors (use --force to override)"
        );
        return Ok(ExitCode::FAILURE);
    }

    if opts.output.as_os_str() == "-" {
        print!("{}", result.json);
    } else {
        write_document(&opts.output, &result.json)?;
        info!(path = %opts.output.display(), "Config written");
    }

    if !result.required_env_vars.is_empty() {
        info!(
            vars = %result.required_env_vars.join(", "),
            "Set these environment variables before starting the gateway"
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn check(opts: CheckOpts) -> anyhow::Result<ExitCode> {
    let state = load_state(opts.state.as_deref())?;
    let result = build_config(&state);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.issues.is_empty() {
        println!("No issues.");
    } else {
        for issue in &result.issues {
            println!("{issue}");
        }
    }

    Ok(if result.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn limits(opts: LimitsOpts) -> anyhow::Result<ExitCode> {
    let api: ModelApi = opts.api.parse().map_err(|e: String| anyhow!(e))?;
    let limits = infer_limits(api, &opts.model_id);
    if limits.is_none() {
        info!(api = api.as_str(), model = %opts.model_id, "No known model family");
    }
    println!("{}", serde_json::to_string_pretty(&limits)?);
    Ok(ExitCode::SUCCESS)
}

fn init(opts: InitOpts) -> anyhow::Result<ExitCode> {
    write_default_state(&opts.path)?;
    info!(path = %opts.path.display(), "State template created");
    Ok(ExitCode::SUCCESS)
}
