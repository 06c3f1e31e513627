pub mod custom;
pub mod limits;

pub use limits::{infer_limits, ModelLimits};

use crate::config::ModelsConfig;
use crate::generator::BuildContext;
use crate::state::{AiMode, SecretsMode};
use std::collections::BTreeMap;

/// API-key env var read by the gateway for a built-in provider.
///
/// `provider` is the leading segment of a model ref such as
/// `anthropic/claude-opus-4-6`.
pub fn provider_env_var(provider: &str) -> Option<&'static str> {
    match provider.trim().to_ascii_lowercase().as_str() {
        "openai" => Some("OPENAI_API_KEY"),
        "anthropic" => Some("ANTHROPIC_API_KEY"),
        "openrouter" => Some("OPENROUTER_API_KEY"),
        "groq" => Some("GROQ_API_KEY"),
        "gemini" | "google" => Some("GEMINI_API_KEY"),
        "opencode" => Some("OPENCODE_API_KEY"),
        "zai" => Some("ZAI_API_KEY"),
        _ => None,
    }
}

/// Build the `models` section.
///
/// Custom mode validates the provider form and emits a single provider.
/// Built-in mode emits nothing, but with env secrets the provider's API-key
/// variable is registered when the model prefix is recognised.
pub(crate) fn build_models(ctx: &mut BuildContext<'_>, primary: &str) -> Option<ModelsConfig> {
    match ctx.state.ai.mode {
        AiMode::Custom => {
            let (id, provider) = custom::build_custom_provider(ctx)?;
            Some(ModelsConfig {
                providers: BTreeMap::from([(id, provider)]),
            })
        }
        AiMode::BuiltIn => {
            if ctx.state.secrets_mode == SecretsMode::Env {
                let prefix = primary.split('/').next().unwrap_or_default();
                if let Some(var) = provider_env_var(prefix) {
                    ctx.env.insert(var);
                }
            }
            None
        }
    }
}
