use crate::config::{DmPolicy, GroupPolicy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelsState {
    pub telegram: TelegramState,
    pub whatsapp: WhatsAppState,
    pub discord: DiscordState,
    pub slack: SlackState,
}

impl ChannelsState {
    pub fn any_enabled(&self) -> bool {
        self.telegram.enabled || self.whatsapp.enabled || self.discord.enabled || self.slack.enabled
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TelegramState {
    pub enabled: bool,
    pub dm_policy: DmPolicy,
    pub allow_from_raw: String,
    pub bot_token: String,
    pub group_policy: GroupPolicy,
    pub group_ids_raw: String,
    pub group_require_mention: bool,
    pub webhook_url: String,
    pub webhook_secret: String,
    pub webhook_path: String,
}

impl Default for TelegramState {
    fn default() -> Self {
        Self {
            enabled: false,
            dm_policy: DmPolicy::Pairing,
            allow_from_raw: String::new(),
            bot_token: String::new(),
            group_policy: GroupPolicy::Allowlist,
            group_ids_raw: String::new(),
            group_require_mention: true,
            webhook_url: String::new(),
            webhook_secret: String::new(),
            webhook_path: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WhatsAppState {
    pub enabled: bool,
    pub dm_policy: DmPolicy,
    pub allow_from_raw: String,
    /// Treat the linked number's own chat as the agent's inbox.
    pub self_chat_mode: bool,
    pub group_policy: GroupPolicy,
    pub group_ids_raw: String,
    pub group_require_mention: bool,
}

impl Default for WhatsAppState {
    fn default() -> Self {
        Self {
            enabled: false,
            dm_policy: DmPolicy::Pairing,
            allow_from_raw: String::new(),
            self_chat_mode: false,
            group_policy: GroupPolicy::Allowlist,
            group_ids_raw: String::new(),
            group_require_mention: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscordState {
    pub enabled: bool,
    pub dm_policy: DmPolicy,
    pub allow_from_raw: String,
    pub token: String,
    pub group_policy: GroupPolicy,
    pub guild_ids_raw: String,
    pub guild_require_mention: bool,
}

impl Default for DiscordState {
    fn default() -> Self {
        Self {
            enabled: false,
            dm_policy: DmPolicy::Pairing,
            allow_from_raw: String::new(),
            token: String::new(),
            group_policy: GroupPolicy::Allowlist,
            guild_ids_raw: String::new(),
            guild_require_mention: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlackState {
    pub enabled: bool,
    pub dm_policy: DmPolicy,
    pub allow_from_raw: String,
    pub bot_token: String,
    pub app_token: String,
    pub group_policy: GroupPolicy,
    pub channel_ids_raw: String,
    pub channel_require_mention: bool,
}

impl Default for SlackState {
    fn default() -> Self {
        Self {
            enabled: false,
            dm_policy: DmPolicy::Pairing,
            allow_from_raw: String::new(),
            bot_token: String::new(),
            app_token: String::new(),
            group_policy: GroupPolicy::Allowlist,
            channel_ids_raw: String::new(),
            channel_require_mention: true,
        }
    }
}
