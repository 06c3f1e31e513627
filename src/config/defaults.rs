/// Default configuration constants used across the generator.

/// Default gateway port.
pub const DEFAULT_GATEWAY_PORT: u16 = 18789;

/// Gateway mode written into every generated document.
pub const GATEWAY_MODE_LOCAL: &str = "local";

/// Default built-in primary model.
pub const DEFAULT_PRIMARY_MODEL: &str = "anthropic/claude-opus-4-6";

/// Default file name for the exported document.
pub const DEFAULT_OUTPUT_FILE: &str = "openclaw.json";

/// Sandbox mode emitted when safe mode is on.
pub const SANDBOX_MODE_NON_MAIN: &str = "non-main";

/// Tools permitted inside sandboxed sessions.
pub const SANDBOX_TOOLS_ALLOW: &[&str] = &[
    "bash",
    "process",
    "read",
    "write",
    "edit",
    "sessions_list",
    "sessions_history",
    "sessions_send",
    "sessions_spawn",
];

/// Tools denied inside sandboxed sessions.
pub const SANDBOX_TOOLS_DENY: &[&str] = &["browser", "canvas", "nodes", "cron", "discord", "gateway"];

/// Gateway credential env vars.
pub const GATEWAY_TOKEN_ENV: &str = "OPENCLAW_GATEWAY_TOKEN";
pub const GATEWAY_PASSWORD_ENV: &str = "OPENCLAW_GATEWAY_PASSWORD";

/// Channel credential env vars.
pub const TELEGRAM_BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
pub const DISCORD_BOT_TOKEN_ENV: &str = "DISCORD_BOT_TOKEN";
pub const SLACK_BOT_TOKEN_ENV: &str = "SLACK_BOT_TOKEN";
pub const SLACK_APP_TOKEN_ENV: &str = "SLACK_APP_TOKEN";

/// Default env var for a custom provider API key.
pub const DEFAULT_CUSTOM_API_KEY_ENV: &str = "CUSTOM_PROVIDER_API_KEY";

/// Default custom model limits.
pub const DEFAULT_CUSTOM_CONTEXT_WINDOW: u64 = 128_000;
pub const DEFAULT_CUSTOM_MAX_TOKENS: u64 = 8192;

/// Zero price applied to generated custom models.
pub const ZERO_COST: u64 = 0;

/// Slack connection mode used with an app-level token.
pub const SLACK_SOCKET_MODE: &str = "socket";
