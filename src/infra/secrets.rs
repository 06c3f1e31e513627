//! Secret emission.
//!
//! A secret either lands in the document as a literal or as a `${NAME}`
//! placeholder that the gateway substitutes from its environment at startup.
//! Only uppercase names are substituted, so placeholders are restricted to
//! `[A-Z_][A-Z0-9_]*`.

use crate::config::Issues;
use crate::state::SecretsMode;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static ENV_VAR_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z_][A-Z0-9_]*$").expect("env var pattern is valid"));

/// Whether `name` can be substituted as `${name}` by the gateway.
pub fn is_valid_env_var_name(name: &str) -> bool {
    ENV_VAR_NAME.is_match(name)
}

/// Render the placeholder for an env var.
pub fn env_placeholder(name: &str) -> String {
    format!("${{{name}}}")
}

/// Environment variables the generated document depends on.
///
/// Deduplicated; iteration is sorted so output is deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequiredEnvVars(BTreeSet<String>);

impl RequiredEnvVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.0.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

/// A credential field whose env var name is fixed by the gateway.
#[derive(Debug, Clone, Copy)]
pub struct SecretField {
    /// Issue path of the field.
    pub path: &'static str,
    /// Human label used in messages.
    pub label: &'static str,
    /// Env var the gateway reads the value from.
    pub env_var: &'static str,
}

/// Resolve a fixed-name secret.
///
/// Env mode always succeeds: the variable is registered and the placeholder
/// returned. Inline mode needs a non-blank literal; a blank one is reported
/// at the field path and nothing is emitted.
pub fn resolve_secret(
    mode: SecretsMode,
    field: &SecretField,
    literal: &str,
    env: &mut RequiredEnvVars,
    issues: &mut Issues,
) -> Option<String> {
    match mode {
        SecretsMode::Env => {
            env.insert(field.env_var);
            Some(env_placeholder(field.env_var))
        }
        SecretsMode::Inline => {
            let value = literal.trim();
            if value.is_empty() {
                issues.error(
                    field.path,
                    format!(
                        "{} is required when secrets are inlined (or switch to env mode and set {}).",
                        field.label, field.env_var
                    ),
                );
                None
            } else {
                Some(value.to_string())
            }
        }
    }
}
