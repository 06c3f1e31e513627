pub mod policy;
mod shape;

pub use policy::{rule, ChannelInput, ChannelKind, ChannelRule, DmShape, MentionRule, RULES};

use crate::config::ChannelsConfig;
use crate::generator::BuildContext;
use tracing::debug;

/// Build `channels` from every enabled channel, or `None` when none is.
pub(crate) fn build_channels(ctx: &mut BuildContext<'_>) -> Option<ChannelsConfig> {
    let state = ctx.state;
    let channels = &state.channels;

    let config = ChannelsConfig {
        telegram: channels
            .telegram
            .enabled
            .then(|| shape::telegram(ctx, &channels.telegram)),
        whatsapp: channels
            .whatsapp
            .enabled
            .then(|| shape::whatsapp(ctx, &channels.whatsapp)),
        discord: channels
            .discord
            .enabled
            .then(|| shape::discord(ctx, &channels.discord)),
        slack: channels
            .slack
            .enabled
            .then(|| shape::slack(ctx, &channels.slack)),
    };

    if config.is_empty() {
        return None;
    }
    debug!(
        telegram = config.telegram.is_some(),
        whatsapp = config.whatsapp.is_some(),
        discord = config.discord.is_some(),
        slack = config.slack.is_some(),
        "channels assembled"
    );
    Some(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GeneratorState;

    #[test]
    fn disabled_channels_are_omitted() {
        let state = GeneratorState::default();
        let mut ctx = BuildContext::new(&state);
        assert!(build_channels(&mut ctx).is_none());
        assert!(ctx.issues.is_empty());
    }

    #[test]
    fn only_enabled_channels_are_emitted() {
        let mut state = GeneratorState::default();
        state.channels.discord.enabled = true;
        state.channels.discord.guild_ids_raw = "g1".into();
        let mut ctx = BuildContext::new(&state);

        let channels = build_channels(&mut ctx).unwrap();
        assert!(channels.discord.is_some());
        assert!(channels.telegram.is_none());
        assert!(channels.whatsapp.is_none());
        assert!(channels.slack.is_none());
        assert!(ctx.env.contains("DISCORD_BOT_TOKEN"));
        assert!(!ctx.env.contains("SLACK_BOT_TOKEN"));
    }
}
