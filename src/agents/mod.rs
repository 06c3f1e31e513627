pub mod model_fallback;

use crate::config::{
    AgentDefaultsConfig, AgentModelConfig, AgentSandboxConfig, AgentsConfig, ToolPolicyConfig,
    ToolsConfig, ToolsSandboxConfig, SANDBOX_MODE_NON_MAIN, SANDBOX_TOOLS_ALLOW,
    SANDBOX_TOOLS_DENY,
};
use crate::generator::BuildContext;
use crate::state::{AiMode, AiState};

pub use model_fallback::{derive_fallbacks, FallbackChain};

/// Resolve the primary model id.
///
/// Custom providers are addressed as `provider/model`; the id is empty when
/// either half is missing.
pub fn resolve_primary_model(ai: &AiState) -> String {
    match ai.mode {
        AiMode::Custom => {
            let provider = ai.custom.provider_id.trim();
            let model = ai.custom.model.id.trim();
            if provider.is_empty() || model.is_empty() {
                String::new()
            } else {
                format!("{provider}/{model}")
            }
        }
        AiMode::BuiltIn => ai.built_in.primary_model.trim().to_string(),
    }
}

/// Build `agents.defaults`: primary model, fallbacks and the sandbox default.
pub(crate) fn build_agents(ctx: &mut BuildContext<'_>, primary: &str) -> AgentsConfig {
    if primary.is_empty() {
        ctx.issues.error(
            "agents.defaults.model.primary",
            "Primary model is required.",
        );
    }

    let chain = derive_fallbacks(&ctx.state.model_fallbacks_raw, primary);
    if chain.removed_primary > 0 {
        ctx.issues.info(
            "agents.defaults.model.fallbacks",
            "Removed the primary model from the fallback list; a model cannot fall back to itself.",
        );
    }

    let sandbox = ctx.state.safe_mode.then(|| AgentSandboxConfig {
        mode: SANDBOX_MODE_NON_MAIN.to_string(),
    });

    AgentsConfig {
        defaults: AgentDefaultsConfig {
            model: AgentModelConfig {
                primary: primary.to_string(),
                fallbacks: chain.models,
            },
            sandbox,
        },
    }
}

/// Fixed tool policy for sandboxed sessions.
pub fn sandbox_tool_policy() -> ToolsConfig {
    ToolsConfig {
        sandbox: ToolsSandboxConfig {
            tools: ToolPolicyConfig {
                allow: SANDBOX_TOOLS_ALLOW.iter().map(|t| t.to_string()).collect(),
                deny: SANDBOX_TOOLS_DENY.iter().map(|t| t.to_string()).collect(),
            },
        },
    }
}
