mod auth;

use crate::config::{GatewayBindMode, GatewayConfig, GATEWAY_MODE_LOCAL};
use crate::generator::BuildContext;

/// Build the `gateway` section.
///
/// The document always pins `mode: "local"`; the generator only targets
/// self-hosted gateways.
pub(crate) fn build_gateway(ctx: &mut BuildContext<'_>) -> GatewayConfig {
    let state = ctx.state;
    let gateway = &state.gateway;

    if !(1..=i64::from(u16::MAX)).contains(&gateway.port) {
        ctx.issues.error(
            "gateway.port",
            format!("Port must be between 1 and 65535 (got {}).", gateway.port),
        );
    }

    let host = gateway.custom_bind_host.trim();
    if gateway.bind == GatewayBindMode::Custom && host.is_empty() {
        ctx.issues.error(
            "gateway.customBindHost",
            "Custom bind requires a host address.",
        );
    }

    let auth = auth::build_gateway_auth(ctx);

    GatewayConfig {
        mode: GATEWAY_MODE_LOCAL.to_string(),
        port: gateway.port,
        bind: gateway.bind,
        custom_bind_host: (gateway.bind == GatewayBindMode::Custom && !host.is_empty())
            .then(|| host.to_string()),
        auth,
    }
}
