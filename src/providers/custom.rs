//! Custom (OpenAI- or Anthropic-compatible) provider validation and emission.

use crate::config::{
    ModelApi, ModelCostConfig, ModelDefinitionConfig, ModelProviderConfig, ZERO_COST,
};
use crate::generator::BuildContext;
use crate::infra::secrets::{env_placeholder, is_valid_env_var_name};
use crate::state::SecretsMode;
use once_cell::sync::Lazy;
use regex::Regex;

static PROVIDER_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z0-9][a-z0-9_-]*$").expect("provider id pattern is valid"));

/// Whether `id` is usable as a `models.providers` key and model-ref prefix.
pub fn is_valid_provider_id(id: &str) -> bool {
    PROVIDER_ID.is_match(id)
}

/// Validate the custom provider form and build its `models.providers` entry.
///
/// The entry is emitted whenever provider id, base URL and model id are all
/// present, even if other fields produced errors.
pub(crate) fn build_custom_provider(
    ctx: &mut BuildContext<'_>,
) -> Option<(String, ModelProviderConfig)> {
    let state = ctx.state;
    let custom = &state.ai.custom;
    let provider_id = custom.provider_id.trim();
    let base_url = custom.base_url.trim();
    let model = &custom.model;
    let model_id = model.id.trim();

    if provider_id.is_empty() {
        ctx.issues
            .error("ai.custom.providerId", "Provider id is required.");
    } else if !is_valid_provider_id(provider_id) {
        ctx.issues.error(
            "ai.custom.providerId",
            "Provider id must start with a letter or digit and contain only letters, digits, '_' or '-'.",
        );
    }

    check_base_url(ctx, custom.api, base_url);

    if model_id.is_empty() {
        ctx.issues.error("ai.custom.model.id", "Model id is required.");
    }

    if !model.input_text && !model.input_image {
        ctx.issues.error(
            "ai.custom.model.input",
            "Select at least one input type (text or image).",
        );
    }

    let context_window = token_limit(
        ctx,
        "ai.custom.model.contextWindow",
        "Context window",
        model.context_window,
    );
    let max_tokens = token_limit(
        ctx,
        "ai.custom.model.maxTokens",
        "Max tokens",
        model.max_tokens,
    );

    if let (Some(window), Some(max)) = (context_window, max_tokens) {
        if max > window {
            ctx.issues.warning(
                "ai.custom.model.maxTokens",
                "Max tokens exceeds the context window; it will be clamped to the context window.",
            );
        }
    }

    let api_key = resolve_api_key(ctx);

    if provider_id.is_empty() || base_url.is_empty() || model_id.is_empty() {
        return None;
    }

    let mut input = Vec::new();
    if model.input_text {
        input.push("text".to_string());
    }
    if model.input_image {
        input.push("image".to_string());
    }

    let name = match model.name.trim() {
        "" => model_id,
        name => name,
    };

    let definition = ModelDefinitionConfig {
        id: model_id.to_string(),
        name: name.to_string(),
        reasoning: model.reasoning,
        input,
        cost: ModelCostConfig {
            input: ZERO_COST,
            output: ZERO_COST,
            cache_read: ZERO_COST,
            cache_write: ZERO_COST,
        },
        context_window,
        max_tokens: max_tokens.map(|m| context_window.map_or(m, |c| m.min(c))),
    };

    Some((
        provider_id.to_string(),
        ModelProviderConfig {
            base_url: base_url.to_string(),
            api_key,
            api: custom.api,
            models: vec![definition],
        },
    ))
}

fn check_base_url(ctx: &mut BuildContext<'_>, api: ModelApi, base_url: &str) {
    const PATH: &str = "ai.custom.baseUrl";

    if base_url.is_empty() {
        ctx.issues.error(PATH, "Base URL is required.");
        return;
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        ctx.issues
            .error(PATH, "Base URL must start with http:// or https://.");
        return;
    }

    let ends_with_v1 = base_url.trim_end_matches('/').ends_with("/v1");
    if api.is_openai_compatible() && !ends_with_v1 {
        ctx.issues.warning(
            PATH,
            "OpenAI-compatible base URLs usually end in /v1.",
        );
    }
    if api == ModelApi::AnthropicMessages && ends_with_v1 {
        ctx.issues.warning(
            PATH,
            "Anthropic-compatible clients append /v1 themselves; drop it from the base URL.",
        );
    }
}

/// Accept a finite positive limit, rounded to a whole token count.
fn token_limit(ctx: &mut BuildContext<'_>, path: &str, label: &str, value: f64) -> Option<u64> {
    if value.is_finite() && value > 0.0 {
        Some(value.round().max(1.0) as u64)
    } else {
        ctx.issues
            .error(path, format!("{label} must be a positive number."));
        None
    }
}

fn resolve_api_key(ctx: &mut BuildContext<'_>) -> Option<String> {
    let state = ctx.state;
    let custom = &state.ai.custom;
    match state.secrets_mode {
        SecretsMode::Inline => {
            let key = custom.api_key.trim();
            if key.is_empty() {
                ctx.issues.error(
                    "ai.custom.apiKey",
                    "API key is required when secrets are inlined.",
                );
                None
            } else {
                Some(key.to_string())
            }
        }
        SecretsMode::Env => {
            let name = custom.api_key_env_var.trim();
            if name.is_empty() {
                ctx.issues.error(
                    "ai.custom.apiKeyEnvVar",
                    "API key env var name is required.",
                );
                None
            } else if !is_valid_env_var_name(name) {
                ctx.issues.error(
                    "ai.custom.apiKeyEnvVar",
                    "Env var name must use uppercase letters, digits and '_' (e.g. CUSTOM_PROVIDER_API_KEY); only uppercase names are substituted.",
                );
                None
            } else {
                ctx.env.insert(name);
                Some(env_placeholder(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IssueLevel;
    use crate::state::{AiMode, GeneratorState};

    fn custom_state() -> GeneratorState {
        let mut state = GeneratorState::default();
        state.ai.mode = AiMode::Custom;
        state.ai.custom.provider_id = "local".into();
        state.ai.custom.base_url = "http://127.0.0.1:1234/v1".into();
        state.ai.custom.model.id = "qwen3-32b".into();
        state
    }

    fn run(state: &GeneratorState) -> (Option<(String, ModelProviderConfig)>, BuildContext<'_>) {
        let mut ctx = BuildContext::new(state);
        let provider = build_custom_provider(&mut ctx);
        (provider, ctx)
    }

    fn paths(ctx: BuildContext<'_>, level: IssueLevel) -> Vec<String> {
        ctx.issues
            .into_vec()
            .into_iter()
            .filter(|i| i.level == level)
            .map(|i| i.path)
            .collect()
    }

    #[test]
    fn provider_id_pattern() {
        assert!(is_valid_provider_id("lm-studio_2"));
        assert!(is_valid_provider_id("Ollama"));
        assert!(!is_valid_provider_id("-local"));
        assert!(!is_valid_provider_id("my provider"));
        assert!(!is_valid_provider_id("a/b"));
    }

    #[test]
    fn valid_provider_emits_entry() {
        let state = custom_state();
        let (provider, ctx) = run(&state);
        let (id, provider) = provider.unwrap();

        assert_eq!(id, "local");
        assert_eq!(provider.api_key.as_deref(), Some("${CUSTOM_PROVIDER_API_KEY}"));
        assert_eq!(provider.models[0].name, "qwen3-32b");
        assert_eq!(provider.models[0].input, vec!["text"]);
        assert_eq!(provider.models[0].context_window, Some(128_000));
        assert_eq!(provider.models[0].max_tokens, Some(8192));
        assert!(ctx.env.contains("CUSTOM_PROVIDER_API_KEY"));
        assert!(ctx.issues.is_empty());
    }

    #[test]
    fn invalid_provider_id_is_error_but_entry_still_emitted() {
        let mut state = custom_state();
        state.ai.custom.provider_id = "_bad".into();
        let (provider, ctx) = run(&state);
        assert!(provider.is_some());
        assert_eq!(paths(ctx, IssueLevel::Error), vec!["ai.custom.providerId"]);
    }

    #[test]
    fn missing_fields_suppress_entry() {
        let mut state = custom_state();
        state.ai.custom.base_url = String::new();
        state.ai.custom.model.id = String::new();
        let (provider, ctx) = run(&state);
        assert!(provider.is_none());
        assert_eq!(
            paths(ctx, IssueLevel::Error),
            vec!["ai.custom.baseUrl", "ai.custom.model.id"]
        );
    }

    #[test]
    fn base_url_scheme_and_suffix_rules() {
        let mut state = custom_state();
        state.ai.custom.base_url = "ftp://host/v1".into();
        let (_, ctx) = run(&state);
        assert_eq!(paths(ctx, IssueLevel::Error), vec!["ai.custom.baseUrl"]);

        state.ai.custom.base_url = "https://llm.example.com/api".into();
        let (_, ctx) = run(&state);
        assert_eq!(paths(ctx, IssueLevel::Warning), vec!["ai.custom.baseUrl"]);

        state.ai.custom.api = ModelApi::AnthropicMessages;
        state.ai.custom.base_url = "https://llm.example.com/v1/".into();
        let (_, ctx) = run(&state);
        assert_eq!(paths(ctx, IssueLevel::Warning), vec!["ai.custom.baseUrl"]);

        state.ai.custom.base_url = "https://llm.example.com".into();
        let (_, ctx) = run(&state);
        assert!(ctx.issues.is_empty());
    }

    #[test]
    fn no_input_types_is_error() {
        let mut state = custom_state();
        state.ai.custom.model.input_text = false;
        let (_, ctx) = run(&state);
        assert_eq!(paths(ctx, IssueLevel::Error), vec!["ai.custom.model.input"]);
    }

    #[test]
    fn input_order_is_text_then_image() {
        let mut state = custom_state();
        state.ai.custom.model.input_image = true;
        let (provider, _) = run(&state);
        assert_eq!(provider.unwrap().1.models[0].input, vec!["text", "image"]);
    }

    #[test]
    fn non_positive_limits_are_errors() {
        let mut state = custom_state();
        state.ai.custom.model.context_window = f64::NAN;
        state.ai.custom.model.max_tokens = -5.0;
        let (provider, ctx) = run(&state);
        let model = &provider.unwrap().1.models[0];
        assert_eq!(model.context_window, None);
        assert_eq!(model.max_tokens, None);
        assert_eq!(
            paths(ctx, IssueLevel::Error),
            vec!["ai.custom.model.contextWindow", "ai.custom.model.maxTokens"]
        );
    }

    #[test]
    fn max_tokens_clamped_to_context_window() {
        let mut state = custom_state();
        state.ai.custom.model.context_window = 100.0;
        state.ai.custom.model.max_tokens = 500.0;
        let (provider, ctx) = run(&state);
        assert_eq!(provider.unwrap().1.models[0].max_tokens, Some(100));
        assert_eq!(paths(ctx, IssueLevel::Warning), vec!["ai.custom.model.maxTokens"]);
    }

    #[test]
    fn limits_equal_after_rounding_are_not_clamped() {
        let mut state = custom_state();
        state.ai.custom.model.context_window = 100.6;
        state.ai.custom.model.max_tokens = 100.7;
        let (provider, ctx) = run(&state);
        let model = &provider.unwrap().1.models[0];
        assert_eq!(model.context_window, Some(101));
        assert_eq!(model.max_tokens, Some(101));
        assert!(ctx.issues.is_empty());
    }

    #[test]
    fn lowercase_env_var_name_is_rejected() {
        let mut state = custom_state();
        state.ai.custom.api_key_env_var = "custom_provider_api_key".into();
        let (provider, ctx) = run(&state);
        assert_eq!(provider.unwrap().1.api_key, None);
        assert!(!ctx.env.contains("custom_provider_api_key"));
        assert_eq!(paths(ctx, IssueLevel::Error), vec!["ai.custom.apiKeyEnvVar"]);
    }

    #[test]
    fn inline_key_is_required_and_literal() {
        let mut state = custom_state();
        state.secrets_mode = SecretsMode::Inline;
        let (_, ctx) = run(&state);
        assert_eq!(paths(ctx, IssueLevel::Error), vec!["ai.custom.apiKey"]);

        state.ai.custom.api_key = "sk-local".into();
        let (provider, ctx) = run(&state);
        assert_eq!(provider.unwrap().1.api_key.as_deref(), Some("sk-local"));
        assert!(ctx.env.into_vec().is_empty());
    }
}
