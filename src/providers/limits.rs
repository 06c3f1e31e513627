//! Default token limits for well-known model families.
//!
//! Used to pre-fill the custom model form. The builder never consults this
//! table: whatever limits the user ends up with are what gets validated.

use crate::config::ModelApi;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelLimits {
    pub context_window: u64,
    pub max_tokens: u64,
}

/// Which APIs can serve a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApiScope {
    Any,
    OpenAiOnly,
}

struct Family {
    /// Normalized id prefix (lowercase, dots replaced by dashes).
    prefix: &'static str,
    scope: ApiScope,
    limits: ModelLimits,
}

const fn family(prefix: &'static str, scope: ApiScope, context_window: u64, max_tokens: u64) -> Family {
    Family {
        prefix,
        scope,
        limits: ModelLimits {
            context_window,
            max_tokens,
        },
    }
}

const FAMILIES: &[Family] = &[
    // Zhipu GLM
    family("glm-4-7", ApiScope::Any, 204_800, 131_072),
    family("glm-4-6", ApiScope::Any, 204_800, 131_072),
    family("glm-4-5", ApiScope::Any, 131_072, 98_304),
    family("glm", ApiScope::Any, 128_000, 32_768),
    // Moonshot / Kimi
    family("kimi-k2-5", ApiScope::Any, 262_144, 32_768),
    family("kimi-k2", ApiScope::Any, 262_144, 16_384),
    family("moonshot-v1-128k", ApiScope::Any, 131_072, 8192),
    family("moonshot-v1-32k", ApiScope::Any, 32_768, 8192),
    family("moonshot-v1-8k", ApiScope::Any, 8192, 4096),
    // OpenAI
    family("gpt-5-2", ApiScope::OpenAiOnly, 400_000, 128_000),
    family("gpt-5-1", ApiScope::OpenAiOnly, 400_000, 128_000),
    family("gpt-5", ApiScope::OpenAiOnly, 400_000, 128_000),
    family("gpt-4-1", ApiScope::OpenAiOnly, 1_047_576, 32_768),
    family("gpt-4o", ApiScope::OpenAiOnly, 128_000, 16_384),
    family("o4-mini", ApiScope::OpenAiOnly, 200_000, 100_000),
    family("o3", ApiScope::OpenAiOnly, 200_000, 100_000),
    // Anthropic
    family("claude-opus-4-6", ApiScope::Any, 200_000, 128_000),
    family("claude-opus-4-5", ApiScope::Any, 200_000, 64_000),
    family("claude-opus-4-1", ApiScope::Any, 200_000, 32_000),
    family("claude-opus-4", ApiScope::Any, 200_000, 32_000),
    family("claude-sonnet-4-5", ApiScope::Any, 200_000, 64_000),
    family("claude-sonnet-4", ApiScope::Any, 200_000, 64_000),
    family("claude-haiku-4-5", ApiScope::Any, 200_000, 64_000),
    family("claude-3-7-sonnet", ApiScope::Any, 200_000, 64_000),
    family("claude-3-5-sonnet", ApiScope::Any, 200_000, 8192),
    family("claude-3-5-haiku", ApiScope::Any, 200_000, 8192),
];

/// Reduce a model ref to the bare, comparable model name.
///
/// `openrouter/moonshotai/kimi-k2.5:free` becomes `kimi-k2-5`.
fn normalize_model_id(model_id: &str) -> String {
    let last = model_id.trim().rsplit('/').next().unwrap_or("");
    let bare = match last.rfind(':') {
        Some(idx) => &last[..idx],
        None => last,
    };
    bare.to_ascii_lowercase().replace('.', "-")
}

fn matches_family(id: &str, prefix: &str) -> bool {
    match id.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('-'),
        None => false,
    }
}

/// Suggest default limits for a model id, or `None` for unknown families.
///
/// The most specific (longest) matching family wins.
pub fn infer_limits(api: ModelApi, model_id: &str) -> Option<ModelLimits> {
    let id = normalize_model_id(model_id);
    if id.is_empty() {
        return None;
    }

    FAMILIES
        .iter()
        .filter(|f| f.scope == ApiScope::Any || api.is_openai_compatible())
        .filter(|f| matches_family(&id, f.prefix))
        .max_by_key(|f| f.prefix.len())
        .map(|f| f.limits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(context_window: u64, max_tokens: u64) -> Option<ModelLimits> {
        Some(ModelLimits {
            context_window,
            max_tokens,
        })
    }

    #[test]
    fn normalizes_provider_prefix_and_tag() {
        assert_eq!(normalize_model_id("openrouter/moonshotai/Kimi-K2.5:free"), "kimi-k2-5");
        assert_eq!(normalize_model_id("gpt-4.1"), "gpt-4-1");
        assert_eq!(normalize_model_id("a/b/"), "");
    }

    #[test]
    fn most_specific_family_wins() {
        assert_eq!(
            infer_limits(ModelApi::OpenaiCompletions, "openai/gpt-5.2"),
            limits(400_000, 128_000)
        );
        assert_eq!(
            infer_limits(ModelApi::OpenaiCompletions, "glm-4.5-air"),
            limits(131_072, 98_304)
        );
        assert_eq!(infer_limits(ModelApi::OpenaiCompletions, "chatglm3"), None);
        assert_eq!(
            infer_limits(ModelApi::OpenaiCompletions, "glm-4-flash"),
            limits(128_000, 32_768)
        );
    }

    #[test]
    fn dated_claude_ids_match_their_family() {
        assert_eq!(
            infer_limits(ModelApi::AnthropicMessages, "claude-sonnet-4-5-20250929"),
            limits(200_000, 64_000)
        );
        assert_eq!(
            infer_limits(ModelApi::AnthropicMessages, "anthropic/claude-opus-4.6"),
            limits(200_000, 128_000)
        );
        assert_eq!(
            infer_limits(ModelApi::AnthropicMessages, "claude-3-5-haiku-latest"),
            limits(200_000, 8192)
        );
    }

    #[test]
    fn ollama_style_tags_are_stripped() {
        assert_eq!(
            infer_limits(ModelApi::OpenaiCompletions, "ollama/kimi-k2:latest"),
            limits(262_144, 16_384)
        );
    }

    #[test]
    fn openai_families_need_openai_api() {
        assert!(infer_limits(ModelApi::OpenaiResponses, "gpt-4.1-mini").is_some());
        assert_eq!(infer_limits(ModelApi::AnthropicMessages, "gpt-4.1-mini"), None);
        // Kimi is served over Anthropic-compatible endpoints too
        assert!(infer_limits(ModelApi::AnthropicMessages, "kimi-k2.5").is_some());
    }

    #[test]
    fn unknown_models_have_no_limits() {
        assert_eq!(infer_limits(ModelApi::OpenaiCompletions, "llama-3.3-70b"), None);
        assert_eq!(infer_limits(ModelApi::OpenaiCompletions, ""), None);
        // prefix must end on a segment boundary
        assert_eq!(infer_limits(ModelApi::OpenaiCompletions, "o300"), None);
    }
}
