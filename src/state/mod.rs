//! Generator form state.
//!
//! This is the input contract of the builder: a snapshot of every control of
//! the configuration form. Every field has a default so that partial state
//! files load cleanly.

mod channels;

pub use channels::*;

use crate::config::{
    GatewayAuthMode, GatewayBindMode, ModelApi, DEFAULT_CUSTOM_API_KEY_ENV,
    DEFAULT_CUSTOM_CONTEXT_WINDOW, DEFAULT_CUSTOM_MAX_TOKENS, DEFAULT_GATEWAY_PORT,
    DEFAULT_PRIMARY_MODEL,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SecretsMode {
    /// Secrets are emitted as `${ENV_VAR}` placeholders.
    #[default]
    Env,
    /// Secrets are emitted as literal strings.
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AiMode {
    #[default]
    BuiltIn,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorState {
    pub safe_mode: bool,
    pub secrets_mode: SecretsMode,
    pub model_fallbacks_raw: String,
    pub ai: AiState,
    pub gateway: GatewayState,
    pub channels: ChannelsState,
}

impl Default for GeneratorState {
    fn default() -> Self {
        Self {
            safe_mode: true,
            secrets_mode: SecretsMode::Env,
            model_fallbacks_raw: String::new(),
            ai: AiState::default(),
            gateway: GatewayState::default(),
            channels: ChannelsState::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AiState {
    pub mode: AiMode,
    pub built_in: BuiltInModelState,
    pub custom: CustomProviderState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuiltInModelState {
    pub primary_model: String,
}

impl Default for BuiltInModelState {
    fn default() -> Self {
        Self {
            primary_model: DEFAULT_PRIMARY_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomProviderState {
    pub provider_id: String,
    pub api: ModelApi,
    pub base_url: String,
    pub api_key_env_var: String,
    pub api_key: String,
    pub model: CustomModelState,
}

impl Default for CustomProviderState {
    fn default() -> Self {
        Self {
            provider_id: String::new(),
            api: ModelApi::OpenaiCompletions,
            base_url: String::new(),
            api_key_env_var: DEFAULT_CUSTOM_API_KEY_ENV.to_string(),
            api_key: String::new(),
            model: CustomModelState::default(),
        }
    }
}

/// Model definition for a custom provider.
///
/// Token limits are kept as raw numbers because the form can hand over
/// anything, including `NaN` or negatives; validation decides what is usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomModelState {
    pub id: String,
    pub name: String,
    pub reasoning: bool,
    pub input_text: bool,
    pub input_image: bool,
    pub context_window: f64,
    pub max_tokens: f64,
}

impl Default for CustomModelState {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            reasoning: false,
            input_text: true,
            input_image: false,
            context_window: DEFAULT_CUSTOM_CONTEXT_WINDOW as f64,
            max_tokens: DEFAULT_CUSTOM_MAX_TOKENS as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GatewayState {
    pub port: i64,
    pub bind: GatewayBindMode,
    pub custom_bind_host: String,
    pub auth_mode: GatewayAuthMode,
    pub auth_token: String,
    pub auth_password: String,
}

impl Default for GatewayState {
    fn default() -> Self {
        Self {
            port: i64::from(DEFAULT_GATEWAY_PORT),
            bind: GatewayBindMode::Loopback,
            custom_bind_host: String::new(),
            auth_mode: GatewayAuthMode::Token,
            auth_token: String::new(),
            auth_password: String::new(),
        }
    }
}

/// Split a free-form list on commas and newlines, trimming entries and
/// dropping empties.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
