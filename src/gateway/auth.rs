use crate::config::{
    GatewayAuthConfig, GatewayAuthMode, GatewayBindMode, GATEWAY_PASSWORD_ENV, GATEWAY_TOKEN_ENV,
};
use crate::generator::BuildContext;
use crate::infra::secrets::SecretField;

const TOKEN_FIELD: SecretField = SecretField {
    path: "gateway.auth.token",
    label: "Gateway token",
    env_var: GATEWAY_TOKEN_ENV,
};

const PASSWORD_FIELD: SecretField = SecretField {
    path: "gateway.auth.password",
    label: "Gateway password",
    env_var: GATEWAY_PASSWORD_ENV,
};

/// Check the bind/auth combination and build the `gateway.auth` block.
///
/// Any bind that can be reached from another machine needs credentials;
/// `auto` may fall back to a LAN bind, so running it without auth is only a
/// warning.
pub(crate) fn build_gateway_auth(ctx: &mut BuildContext<'_>) -> Option<GatewayAuthConfig> {
    let state = ctx.state;
    let gateway = &state.gateway;

    if gateway.auth_mode == GatewayAuthMode::Off {
        if gateway.bind.requires_auth() {
            ctx.issues.error(
                "gateway.auth",
                format!(
                    "Bind '{}' exposes the gateway beyond loopback; enable token or password auth.",
                    gateway.bind.as_str()
                ),
            );
        } else if gateway.bind == GatewayBindMode::Auto {
            ctx.issues.warning(
                "gateway.auth",
                "Bind 'auto' may fall back to a non-loopback address; consider enabling auth.",
            );
        }
        return None;
    }

    let mut auth = GatewayAuthConfig {
        mode: gateway.auth_mode,
        token: None,
        password: None,
    };

    match gateway.auth_mode {
        GatewayAuthMode::Token => {
            auth.token = ctx.secret(&TOKEN_FIELD, &gateway.auth_token);
        }
        GatewayAuthMode::Password => {
            auth.password = ctx.secret(&PASSWORD_FIELD, &gateway.auth_password);
        }
        GatewayAuthMode::Off => {}
    }

    Some(auth)
}
