//! Channel access rules shared by every messaging channel.
//!
//! Each channel is described once in [`RULES`]; [`evaluate`] applies the DM,
//! group and secret rules to a [`ChannelInput`] and returns the
//! channel-agnostic [`PolicyOutput`] that the shape adapters turn into the
//! per-channel config block.

use crate::config::{
    DmPolicy, GroupPolicy, MentionConfig, DISCORD_BOT_TOKEN_ENV, SLACK_APP_TOKEN_ENV,
    SLACK_BOT_TOKEN_ENV, TELEGRAM_BOT_TOKEN_ENV,
};
use crate::generator::BuildContext;
use crate::infra::secrets::SecretField;
use crate::state::parse_list;
use std::collections::BTreeMap;

/// Sender id that admits everyone.
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Telegram,
    WhatsApp,
    Discord,
    Slack,
}

/// Where the DM policy lives in the emitted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmShape {
    /// `dmPolicy` / `allowFrom` on the channel itself.
    Flat,
    /// `dm.policy` / `dm.allowFrom`.
    Nested,
}

/// How disabling mention gating is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionRule {
    /// Without explicit ids, a `"*"` entry carries `requireMention: false`.
    Wildcard,
    /// Explicit ids with mentions off are flagged at `<groups>.*.requireMention`.
    PerId,
}

#[derive(Debug)]
pub struct ChannelRule {
    pub name: &'static str,
    pub dm_shape: DmShape,
    /// Key of the group/guild/channel map.
    pub group_key: &'static str,
    pub warn_open_dm: bool,
    pub mention: MentionRule,
    pub secrets: &'static [SecretField],
}

impl ChannelRule {
    fn allow_from_path(&self) -> String {
        match self.dm_shape {
            DmShape::Flat => format!("channels.{}.allowFrom", self.name),
            DmShape::Nested => format!("channels.{}.dm.allowFrom", self.name),
        }
    }

    fn dm_policy_path(&self) -> String {
        match self.dm_shape {
            DmShape::Flat => format!("channels.{}.dmPolicy", self.name),
            DmShape::Nested => format!("channels.{}.dm.policy", self.name),
        }
    }

    fn group_policy_path(&self) -> String {
        format!("channels.{}.groupPolicy", self.name)
    }

    fn groups_path(&self) -> String {
        format!("channels.{}.{}", self.name, self.group_key)
    }
}

pub const RULES: &[ChannelRule] = &[
    ChannelRule {
        name: "telegram",
        dm_shape: DmShape::Flat,
        group_key: "groups",
        warn_open_dm: false,
        mention: MentionRule::Wildcard,
        secrets: &[SecretField {
            path: "channels.telegram.botToken",
            label: "Telegram bot token",
            env_var: TELEGRAM_BOT_TOKEN_ENV,
        }],
    },
    ChannelRule {
        name: "whatsapp",
        dm_shape: DmShape::Flat,
        group_key: "groups",
        warn_open_dm: true,
        mention: MentionRule::Wildcard,
        secrets: &[],
    },
    ChannelRule {
        name: "discord",
        dm_shape: DmShape::Nested,
        group_key: "guilds",
        warn_open_dm: true,
        mention: MentionRule::PerId,
        secrets: &[SecretField {
            path: "channels.discord.token",
            label: "Discord bot token",
            env_var: DISCORD_BOT_TOKEN_ENV,
        }],
    },
    ChannelRule {
        name: "slack",
        dm_shape: DmShape::Nested,
        group_key: "channels",
        warn_open_dm: true,
        mention: MentionRule::PerId,
        secrets: &[
            SecretField {
                path: "channels.slack.botToken",
                label: "Slack bot token",
                env_var: SLACK_BOT_TOKEN_ENV,
            },
            SecretField {
                path: "channels.slack.appToken",
                label: "Slack app token",
                env_var: SLACK_APP_TOKEN_ENV,
            },
        ],
    },
];

/// Rule for a channel. `RULES` holds one entry per kind, in declaration order.
pub fn rule(kind: ChannelKind) -> &'static ChannelRule {
    &RULES[kind as usize]
}

/// Channel-agnostic view of one channel's form.
#[derive(Debug, Clone)]
pub struct ChannelInput<'a> {
    pub dm_policy: DmPolicy,
    pub allow_from_raw: &'a str,
    pub group_policy: GroupPolicy,
    pub group_ids_raw: &'a str,
    pub require_mention: bool,
    /// Literal secret values, aligned with [`ChannelRule::secrets`].
    pub secrets: Vec<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolicyOutput {
    pub dm_policy: DmPolicy,
    pub allow_from: Option<Vec<String>>,
    /// Only `open` and `disabled` are written; `allowlist` is the default.
    pub group_policy: Option<GroupPolicy>,
    pub groups: Option<BTreeMap<String, MentionConfig>>,
    /// Resolved secrets, aligned with [`ChannelRule::secrets`].
    pub secrets: Vec<Option<String>>,
}

pub(crate) fn evaluate(
    ctx: &mut BuildContext<'_>,
    rule: &ChannelRule,
    input: &ChannelInput<'_>,
) -> PolicyOutput {
    let allow_from = parse_list(input.allow_from_raw);
    check_dm_policy(ctx, rule, input.dm_policy, &allow_from);

    let ids = parse_list(input.group_ids_raw);
    let groups = group_map(ctx, rule, input, &ids);

    let secrets = rule
        .secrets
        .iter()
        .enumerate()
        .map(|(i, field)| ctx.secret(field, input.secrets.get(i).copied().unwrap_or_default()))
        .collect();

    PolicyOutput {
        dm_policy: input.dm_policy,
        allow_from: (!allow_from.is_empty()).then_some(allow_from),
        group_policy: match input.group_policy {
            GroupPolicy::Allowlist => None,
            other => Some(other),
        },
        groups,
        secrets,
    }
}

fn check_dm_policy(
    ctx: &mut BuildContext<'_>,
    rule: &ChannelRule,
    policy: DmPolicy,
    allow_from: &[String],
) {
    match policy {
        DmPolicy::Open => {
            if !allow_from.iter().any(|id| id == WILDCARD) {
                ctx.issues.error(
                    rule.allow_from_path(),
                    "Open DMs require \"*\" in the allow list.",
                );
            }
            if rule.warn_open_dm {
                ctx.issues.warning(
                    rule.dm_policy_path(),
                    "Open DMs let anyone message the agent.",
                );
            }
        }
        DmPolicy::Allowlist if allow_from.is_empty() => {
            ctx.issues.error(
                rule.allow_from_path(),
                "Allowlist DMs need at least one allowed sender.",
            );
        }
        _ => {}
    }
}

fn group_map(
    ctx: &mut BuildContext<'_>,
    rule: &ChannelRule,
    input: &ChannelInput<'_>,
    ids: &[String],
) -> Option<BTreeMap<String, MentionConfig>> {
    match input.group_policy {
        GroupPolicy::Open => {
            ctx.issues.warning(
                rule.group_policy_path(),
                "Open group policy lets the agent respond in any group.",
            );
        }
        GroupPolicy::Allowlist if ids.is_empty() => {
            ctx.issues.info(
                rule.groups_path(),
                format!("No {} allowlisted; group messages will be ignored.", rule.group_key),
            );
        }
        _ => {}
    }

    if ids.is_empty() {
        if rule.mention == MentionRule::Wildcard && !input.require_mention {
            ctx.issues.warning(
                rule.groups_path(),
                "Mention gating is off; the agent will answer every group message.",
            );
            return Some(BTreeMap::from([(
                WILDCARD.to_string(),
                MentionConfig {
                    require_mention: false,
                },
            )]));
        }
        return None;
    }

    if rule.mention == MentionRule::PerId && !input.require_mention {
        ctx.issues.warning(
            format!("{}.*.requireMention", rule.groups_path()),
            "Mention gating is off; the agent will answer every message in these channels.",
        );
    }

    Some(
        ids.iter()
            .map(|id| {
                (
                    id.clone(),
                    MentionConfig {
                        require_mention: input.require_mention,
                    },
                )
            })
            .collect(),
    )
}
