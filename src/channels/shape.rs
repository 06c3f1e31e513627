//! Shape adapters: per-channel state in, per-channel config block out.

use super::policy::{evaluate, rule, ChannelInput, ChannelKind, PolicyOutput};
use crate::config::{
    DiscordConfig, DmConfig, SlackConfig, TelegramConfig, WhatsAppConfig, SLACK_SOCKET_MODE,
};
use crate::generator::BuildContext;
use crate::state::{DiscordState, SlackState, TelegramState, WhatsAppState};

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn nested_dm(policy: &PolicyOutput) -> DmConfig {
    DmConfig {
        policy: policy.dm_policy,
        allow_from: policy.allow_from.clone(),
    }
}

pub(crate) fn telegram(ctx: &mut BuildContext<'_>, state: &TelegramState) -> TelegramConfig {
    let input = ChannelInput {
        dm_policy: state.dm_policy,
        allow_from_raw: &state.allow_from_raw,
        group_policy: state.group_policy,
        group_ids_raw: &state.group_ids_raw,
        require_mention: state.group_require_mention,
        secrets: vec![&state.bot_token],
    };
    let mut policy = evaluate(ctx, rule(ChannelKind::Telegram), &input);

    let webhook_url = non_empty(&state.webhook_url);
    let webhook_secret = non_empty(&state.webhook_secret);
    if webhook_url.is_some() && webhook_secret.is_none() {
        ctx.issues.error(
            "channels.telegram.webhookSecret",
            "Webhook mode requires a webhook secret.",
        );
    }
    let webhook_path = webhook_url
        .as_ref()
        .and_then(|_| non_empty(&state.webhook_path));

    TelegramConfig {
        enabled: true,
        bot_token: policy.secrets.pop().flatten(),
        dm_policy: policy.dm_policy,
        allow_from: policy.allow_from,
        group_policy: policy.group_policy,
        groups: policy.groups,
        webhook_secret: webhook_url.as_ref().and(webhook_secret),
        webhook_url,
        webhook_path,
    }
}

pub(crate) fn whatsapp(ctx: &mut BuildContext<'_>, state: &WhatsAppState) -> WhatsAppConfig {
    let input = ChannelInput {
        dm_policy: state.dm_policy,
        allow_from_raw: &state.allow_from_raw,
        group_policy: state.group_policy,
        group_ids_raw: &state.group_ids_raw,
        require_mention: state.group_require_mention,
        secrets: vec![],
    };
    let policy = evaluate(ctx, rule(ChannelKind::WhatsApp), &input);

    WhatsAppConfig {
        enabled: true,
        dm_policy: policy.dm_policy,
        allow_from: policy.allow_from,
        self_chat_mode: state.self_chat_mode.then_some(true),
        group_policy: policy.group_policy,
        groups: policy.groups,
    }
}

pub(crate) fn discord(ctx: &mut BuildContext<'_>, state: &DiscordState) -> DiscordConfig {
    let input = ChannelInput {
        dm_policy: state.dm_policy,
        allow_from_raw: &state.allow_from_raw,
        group_policy: state.group_policy,
        group_ids_raw: &state.guild_ids_raw,
        require_mention: state.guild_require_mention,
        secrets: vec![&state.token],
    };
    let mut policy = evaluate(ctx, rule(ChannelKind::Discord), &input);

    DiscordConfig {
        enabled: true,
        token: policy.secrets.pop().flatten(),
        dm: nested_dm(&policy),
        group_policy: policy.group_policy,
        guilds: policy.groups,
    }
}

pub(crate) fn slack(ctx: &mut BuildContext<'_>, state: &SlackState) -> SlackConfig {
    let input = ChannelInput {
        dm_policy: state.dm_policy,
        allow_from_raw: &state.allow_from_raw,
        group_policy: state.group_policy,
        group_ids_raw: &state.channel_ids_raw,
        require_mention: state.channel_require_mention,
        secrets: vec![&state.bot_token, &state.app_token],
    };
    let policy = evaluate(ctx, rule(ChannelKind::Slack), &input);
    let mut secrets = policy.secrets.iter().cloned();

    SlackConfig {
        enabled: true,
        mode: SLACK_SOCKET_MODE.to_string(),
        bot_token: secrets.next().flatten(),
        app_token: secrets.next().flatten(),
        dm: nested_dm(&policy),
        group_policy: policy.group_policy,
        channels: policy.groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DmPolicy, GroupPolicy, IssueLevel};
    use crate::state::{GeneratorState, SecretsMode};
    use serde_json::json;

    #[test]
    fn telegram_flat_shape() {
        let state = GeneratorState::default();
        let mut tg = TelegramState::default();
        tg.allow_from_raw = "42".into();
        tg.group_ids_raw = "-1001".into();
        let mut ctx = BuildContext::new(&state);

        let value = serde_json::to_value(telegram(&mut ctx, &tg)).unwrap();
        assert_eq!(
            value,
            json!({
                "enabled": true,
                "botToken": "${TELEGRAM_BOT_TOKEN}",
                "dmPolicy": "pairing",
                "allowFrom": ["42"],
                "groups": { "-1001": { "requireMention": true } }
            })
        );
        assert!(ctx.issues.is_empty());
    }

    #[test]
    fn telegram_webhook_requires_secret() {
        let state = GeneratorState::default();
        let mut tg = TelegramState::default();
        tg.group_ids_raw = "-1001".into();
        tg.webhook_url = "https://bot.example.com/tg".into();
        tg.webhook_path = "/tg".into();
        let mut ctx = BuildContext::new(&state);

        let config = telegram(&mut ctx, &tg);
        assert_eq!(config.webhook_url.as_deref(), Some("https://bot.example.com/tg"));
        assert_eq!(config.webhook_path.as_deref(), Some("/tg"));
        assert_eq!(config.webhook_secret, None);
        let issues = ctx.issues.into_vec();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].level, IssueLevel::Error);
        assert_eq!(issues[0].path, "channels.telegram.webhookSecret");

        tg.webhook_secret = "hook-secret".into();
        let mut ctx = BuildContext::new(&state);
        let config = telegram(&mut ctx, &tg);
        assert_eq!(config.webhook_secret.as_deref(), Some("hook-secret"));
        assert!(ctx.issues.is_empty());
    }

    #[test]
    fn telegram_webhook_fields_ignored_without_url() {
        let state = GeneratorState::default();
        let mut tg = TelegramState::default();
        tg.webhook_secret = "orphan".into();
        tg.webhook_path = "/tg".into();
        let mut ctx = BuildContext::new(&state);

        let config = telegram(&mut ctx, &tg);
        assert_eq!(config.webhook_secret, None);
        assert_eq!(config.webhook_path, None);
    }

    #[test]
    fn whatsapp_self_chat_and_wildcard() {
        let state = GeneratorState::default();
        let mut wa = WhatsAppState::default();
        wa.self_chat_mode = true;
        wa.group_require_mention = false;
        let mut ctx = BuildContext::new(&state);

        let value = serde_json::to_value(whatsapp(&mut ctx, &wa)).unwrap();
        assert_eq!(
            value,
            json!({
                "enabled": true,
                "dmPolicy": "pairing",
                "selfChatMode": true,
                "groups": { "*": { "requireMention": false } }
            })
        );
    }

    #[test]
    fn discord_nested_dm_shape() {
        let state = GeneratorState::default();
        let mut dc = DiscordState::default();
        dc.dm_policy = DmPolicy::Allowlist;
        dc.allow_from_raw = "user1,user2".into();
        dc.group_policy = GroupPolicy::Disabled;
        let mut ctx = BuildContext::new(&state);

        let value = serde_json::to_value(discord(&mut ctx, &dc)).unwrap();
        assert_eq!(
            value,
            json!({
                "enabled": true,
                "token": "${DISCORD_BOT_TOKEN}",
                "dm": { "policy": "allowlist", "allowFrom": ["user1", "user2"] },
                "groupPolicy": "disabled"
            })
        );
        assert!(ctx.issues.is_empty());
    }

    #[test]
    fn slack_socket_mode_with_inline_tokens() {
        let mut state = GeneratorState::default();
        state.secrets_mode = SecretsMode::Inline;
        let mut sl = SlackState::default();
        sl.bot_token = "xoxb-1".into();
        sl.app_token = "xapp-1".into();
        sl.channel_ids_raw = "C01".into();
        let mut ctx = BuildContext::new(&state);

        let value = serde_json::to_value(slack(&mut ctx, &sl)).unwrap();
        assert_eq!(
            value,
            json!({
                "enabled": true,
                "mode": "socket",
                "botToken": "xoxb-1",
                "appToken": "xapp-1",
                "dm": { "policy": "pairing" },
                "channels": { "C01": { "requireMention": true } }
            })
        );
        assert!(ctx.env.into_vec().is_empty());
    }
}
