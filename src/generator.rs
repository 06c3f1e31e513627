//! Turns a [`GeneratorState`] into an OpenClaw config document.
//!
//! Rules run in a fixed order (models, gateway, channels) and every problem is
//! collected; an error never stops the build, so callers always get a partial
//! document alongside the issues that block exporting it.

use crate::agents::{build_agents, resolve_primary_model, sandbox_tool_policy};
use crate::channels::build_channels;
use crate::config::{count_level, ConfigIssue, IssueLevel, Issues, OpenClawConfig};
use crate::gateway::build_gateway;
use crate::infra::secrets::{resolve_secret, RequiredEnvVars, SecretField};
use crate::providers::build_models;
use crate::state::GeneratorState;
use serde::Serialize;
use tracing::debug;

/// Mutable accumulator threaded through the section builders.
pub(crate) struct BuildContext<'a> {
    pub(crate) state: &'a GeneratorState,
    pub(crate) issues: Issues,
    pub(crate) env: RequiredEnvVars,
}

impl<'a> BuildContext<'a> {
    pub(crate) fn new(state: &'a GeneratorState) -> Self {
        Self {
            state,
            issues: Issues::new(),
            env: RequiredEnvVars::new(),
        }
    }

    /// Resolve a fixed-name secret under the state's secrets mode.
    pub(crate) fn secret(&mut self, field: &SecretField, literal: &str) -> Option<String> {
        resolve_secret(
            self.state.secrets_mode,
            field,
            literal,
            &mut self.env,
            &mut self.issues,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResult {
    pub config: OpenClawConfig,
    /// `config` rendered as pretty JSON with a trailing newline.
    pub json: String,
    pub issues: Vec<ConfigIssue>,
    /// Sorted, deduplicated names of env vars referenced by placeholders.
    pub required_env_vars: Vec<String>,
}

impl BuildResult {
    pub fn errors(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.issues.iter().filter(|i| i.level == IssueLevel::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.issues.iter().filter(|i| i.level == IssueLevel::Warning)
    }

    /// Export is blocked while this is true.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// Build the config document, its JSON text, validation issues and the env
/// vars it expects.
///
/// Pure and deterministic: the same state always yields the same result.
pub fn build_config(state: &GeneratorState) -> BuildResult {
    let mut ctx = BuildContext::new(state);

    let primary = resolve_primary_model(&state.ai);
    let agents = build_agents(&mut ctx, &primary);
    let models = build_models(&mut ctx, &primary);
    let gateway = build_gateway(&mut ctx);
    let tools = state.safe_mode.then(sandbox_tool_policy);
    let channels = build_channels(&mut ctx);

    if !state.channels.any_enabled() {
        ctx.issues.info(
            "channels",
            "No channels enabled; the agent is only reachable through the gateway UI.",
        );
    }
    if !state.safe_mode {
        ctx.issues.warning(
            "agents.defaults.sandbox.mode",
            "Safe mode is off; non-main sessions run tools without a sandbox.",
        );
    }

    let config = OpenClawConfig {
        agents,
        gateway,
        tools,
        models,
        channels,
    };
    let json = config.to_json();
    let issues = ctx.issues.into_vec();
    let required_env_vars = ctx.env.into_vec();

    debug!(
        primary = %primary,
        errors = count_level(&issues, IssueLevel::Error),
        warnings = count_level(&issues, IssueLevel::Warning),
        env_vars = required_env_vars.len(),
        "config built"
    );

    BuildResult {
        config,
        json,
        issues,
        required_env_vars,
    }
}
