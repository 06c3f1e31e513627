use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Shared enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayBindMode {
    #[default]
    Loopback,
    Auto,
    Lan,
    Tailnet,
    Custom,
}

impl GatewayBindMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loopback => "loopback",
            Self::Auto => "auto",
            Self::Lan => "lan",
            Self::Tailnet => "tailnet",
            Self::Custom => "custom",
        }
    }

    /// Whether the bind exposes the gateway beyond the local machine.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Lan | Self::Tailnet | Self::Custom)
    }
}

/// Gateway auth selection in the form. `Off` never reaches the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayAuthMode {
    Off,
    #[default]
    Token,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ModelApi {
    #[default]
    OpenaiCompletions,
    OpenaiResponses,
    AnthropicMessages,
}

impl ModelApi {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenaiCompletions => "openai-completions",
            Self::OpenaiResponses => "openai-responses",
            Self::AnthropicMessages => "anthropic-messages",
        }
    }

    pub fn is_openai_compatible(&self) -> bool {
        matches!(self, Self::OpenaiCompletions | Self::OpenaiResponses)
    }
}

impl std::str::FromStr for ModelApi {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai-completions" => Ok(Self::OpenaiCompletions),
            "openai-responses" => Ok(Self::OpenaiResponses),
            "anthropic-messages" => Ok(Self::AnthropicMessages),
            _ => Err(format!("invalid model api: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DmPolicy {
    #[default]
    Pairing,
    Allowlist,
    Open,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupPolicy {
    Open,
    #[default]
    Allowlist,
    Disabled,
}

// ============================================================================
// Generated document
// ============================================================================

/// The generated `openclaw.json` document.
///
/// Field order is the serialization order; every optional section is skipped
/// when absent so the output stays minimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OpenClawConfig {
    pub agents: AgentsConfig,
    pub gateway: GatewayConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<ModelsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<ChannelsConfig>,
}

// ============================================================================
// Agents
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AgentsConfig {
    pub defaults: AgentDefaultsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AgentDefaultsConfig {
    pub model: AgentModelConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox: Option<AgentSandboxConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AgentModelConfig {
    pub primary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AgentSandboxConfig {
    pub mode: String,
}

// ============================================================================
// Gateway
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    pub mode: String,
    pub port: i64,
    pub bind: GatewayBindMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_bind_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<GatewayAuthConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            mode: super::GATEWAY_MODE_LOCAL.to_string(),
            port: i64::from(super::DEFAULT_GATEWAY_PORT),
            bind: GatewayBindMode::Loopback,
            custom_bind_host: None,
            auth: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayAuthConfig {
    pub mode: GatewayAuthMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// ============================================================================
// Tools
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ToolsConfig {
    pub sandbox: ToolsSandboxConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ToolsSandboxConfig {
    pub tools: ToolPolicyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ToolPolicyConfig {
    pub allow: Vec<String>,
    pub deny: Vec<String>,
}

// ============================================================================
// Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModelsConfig {
    pub providers: BTreeMap<String, ModelProviderConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProviderConfig {
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub api: ModelApi,
    pub models: Vec<ModelDefinitionConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDefinitionConfig {
    pub id: String,
    pub name: String,
    pub reasoning: bool,
    pub input: Vec<String>,
    pub cost: ModelCostConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_window: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
}

/// Per-token pricing. Generated models are always free of charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModelCostConfig {
    pub input: u64,
    pub output: u64,
    pub cache_read: u64,
    pub cache_write: u64,
}

// ============================================================================
// Channels
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChannelsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<TelegramConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<WhatsAppConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord: Option<DiscordConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack: Option<SlackConfig>,
}

impl ChannelsConfig {
    pub fn is_empty(&self) -> bool {
        self.telegram.is_none()
            && self.whatsapp.is_none()
            && self.discord.is_none()
            && self.slack.is_none()
    }
}

/// Per-group (or guild, or Slack channel) override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionConfig {
    pub require_mention: bool,
}

/// Nested DM block used by Discord and Slack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmConfig {
    pub policy: DmPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_from: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramConfig {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
    pub dm_policy: DmPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_from: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_policy: Option<GroupPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<BTreeMap<String, MentionConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppConfig {
    pub enabled: bool,
    pub dm_policy: DmPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_from: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_chat_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_policy: Option<GroupPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<BTreeMap<String, MentionConfig>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordConfig {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub dm: DmConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_policy: Option<GroupPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guilds: Option<BTreeMap<String, MentionConfig>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackConfig {
    pub enabled: bool,
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_token: Option<String>,
    pub dm: DmConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_policy: Option<GroupPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<BTreeMap<String, MentionConfig>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&ModelApi::AnthropicMessages).unwrap(),
            "\"anthropic-messages\""
        );
        assert_eq!(
            serde_json::to_string(&GatewayBindMode::Tailnet).unwrap(),
            "\"tailnet\""
        );
        assert_eq!(
            serde_json::to_string(&DmPolicy::Pairing).unwrap(),
            "\"pairing\""
        );
        assert_eq!(
            serde_json::to_string(&GroupPolicy::Disabled).unwrap(),
            "\"disabled\""
        );
    }

    #[test]
    fn only_exposed_binds_require_auth() {
        assert!(!GatewayBindMode::Loopback.requires_auth());
        assert!(!GatewayBindMode::Auto.requires_auth());
        assert!(GatewayBindMode::Lan.requires_auth());
        assert!(GatewayBindMode::Tailnet.requires_auth());
        assert!(GatewayBindMode::Custom.requires_auth());
    }

    #[test]
    fn empty_sections_are_skipped() {
        let value = serde_json::to_value(OpenClawConfig::default()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("agents"));
        assert!(obj.contains_key("gateway"));
        assert!(!obj.contains_key("tools"));
        assert!(!obj.contains_key("models"));
        assert!(!obj.contains_key("channels"));
        assert!(value["agents"]["defaults"]["model"]
            .get("fallbacks")
            .is_none());
    }

    #[test]
    fn nested_dm_serializes_camel_case() {
        let dm = DmConfig {
            policy: DmPolicy::Allowlist,
            allow_from: Some(vec!["123".into()]),
        };
        let value = serde_json::to_value(&dm).unwrap();
        assert_eq!(value["policy"], "allowlist");
        assert_eq!(value["allowFrom"][0], "123");
    }
}
