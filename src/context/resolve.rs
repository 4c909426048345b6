//! Credential resolution from the context and token stores

use log::debug;
use std::fmt;

use crate::config::env;
use crate::error::{Result, ZedError};

use super::models::{mask_secret, ContextConfig};

/// Endpoint, tenant and secret for one client; never persisted
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    pub endpoint: String,
    pub tenant: String,
    pub secret: String,
}

impl fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("endpoint", &self.endpoint)
            .field("tenant", &self.tenant)
            .field("secret", &mask_secret(&self.secret))
            .finish()
    }
}

/// Explicit tenant/token values from `--tenant` / `--token`
#[derive(Debug, Default, Clone)]
pub struct CredentialOverrides {
    pub tenant: Option<String>,
    pub token: Option<String>,
}

/// Tenant/token defaults from ZED_TENANT / ZED_TOKEN.
/// Only consulted when no context is selected.
#[derive(Default, Clone)]
pub struct CredentialDefaults {
    pub tenant: Option<String>,
    pub token: Option<String>,
}

impl fmt::Debug for CredentialDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialDefaults")
            .field("tenant", &self.tenant)
            .field("token", &self.token.as_deref().map(mask_secret))
            .finish()
    }
}

impl CredentialDefaults {
    /// Read defaults from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read defaults through `lookup` (env var name -> value)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            tenant: lookup(env::TENANT),
            token: lookup(env::TOKEN),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Context names are exact keys; blank means "not given"
fn given_name(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolve the credential for `context_name`, or for the active context when
/// no name is given. Reads `config` only.
///
/// Errors:
/// - `NoContextSelected` if no name is given and none is active
/// - `NotFound` if the context does not exist
/// - `DanglingTokenReference` if the context's token is gone
pub fn resolve(
    config: &ContextConfig,
    context_name: Option<&str>,
    endpoint: &str,
) -> Result<ResolvedCredential> {
    let name = match given_name(context_name) {
        Some(name) => {
            debug!("Using explicitly named context: {}", name);
            name
        }
        None => {
            let name = config
                .active_context_name()
                .ok_or(ZedError::NoContextSelected)?;
            debug!("Using active context: {}", name);
            name
        }
    };

    let context = config.context(name)?;

    let secret = config
        .tokens
        .get(&context.token_name)
        .ok_or_else(|| ZedError::DanglingTokenReference {
            context: name.to_string(),
            token: context.token_name.clone(),
        })?;

    debug!(
        "Resolved context '{}': tenant={}, token={}",
        name, context.tenant, context.token_name
    );

    Ok(ResolvedCredential {
        endpoint: endpoint.to_string(),
        tenant: context.tenant.clone(),
        secret: secret.clone(),
    })
}

/// Resolve with explicit tenant/token values layered on top:
/// 1. Stored context (explicit name, then active), with `overrides` replacing
///    individual fields. `defaults` are ignored here.
/// 2. With no context selected, a complete tenant + token pair taken from
///    `overrides`, falling back to `defaults` per field
pub fn resolve_with_overrides(
    config: &ContextConfig,
    context_name: Option<&str>,
    overrides: &CredentialOverrides,
    defaults: &CredentialDefaults,
    endpoint: &str,
) -> Result<ResolvedCredential> {
    let tenant = non_empty(overrides.tenant.as_deref());
    let token = non_empty(overrides.token.as_deref());

    match resolve(config, context_name, endpoint) {
        Ok(mut credential) => {
            if let Some(tenant) = tenant {
                debug!("Overriding context tenant with explicit value");
                credential.tenant = tenant.to_string();
            }
            if let Some(token) = token {
                debug!("Overriding context token with explicit value");
                credential.secret = token.to_string();
            }
            Ok(credential)
        }
        Err(ZedError::NoContextSelected) => {
            let tenant = tenant.or_else(|| non_empty(defaults.tenant.as_deref()));
            let token = token.or_else(|| non_empty(defaults.token.as_deref()));
            match (tenant, token) {
                (Some(tenant), Some(token)) => {
                    debug!("No context selected, using tenant and token from flags/environment");
                    Ok(ResolvedCredential {
                        endpoint: endpoint.to_string(),
                        tenant: tenant.to_string(),
                        secret: token.to_string(),
                    })
                }
                _ => Err(ZedError::NoContextSelected),
            }
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "grpc.example.com:443";

    fn prod_config() -> ContextConfig {
        let mut config = ContextConfig::default();
        config.set_token("prod-key", "abc123").unwrap();
        config.set_context("prod", "acme-tenant", "prod-key").unwrap();
        config
    }

    #[test]
    fn test_no_name_and_no_active_is_no_context_selected() {
        let config = prod_config();
        assert!(matches!(
            resolve(&config, None, ENDPOINT),
            Err(ZedError::NoContextSelected)
        ));
        assert!(matches!(
            resolve(&config, Some(""), ENDPOINT),
            Err(ZedError::NoContextSelected)
        ));
    }

    #[test]
    fn test_active_context_resolves() {
        let mut config = prod_config();
        config.use_context("prod").unwrap();
        let cred = resolve(&config, Some(""), ENDPOINT).unwrap();
        assert_eq!(
            cred,
            ResolvedCredential {
                endpoint: ENDPOINT.to_string(),
                tenant: "acme-tenant".to_string(),
                secret: "abc123".to_string(),
            }
        );
    }

    #[test]
    fn test_explicit_name_wins_over_active() {
        let mut config = prod_config();
        config.set_token("dev-key", "dev-secret").unwrap();
        config.set_context("dev", "acme-dev", "dev-key").unwrap();
        config.use_context("prod").unwrap();

        let cred = resolve(&config, Some("dev"), ENDPOINT).unwrap();
        assert_eq!(cred.tenant, "acme-dev");
        assert_eq!(cred.secret, "dev-secret");
    }

    #[test]
    fn test_missing_context_is_not_found() {
        let config = prod_config();
        assert!(matches!(
            resolve(&config, Some("ghost"), ENDPOINT),
            Err(ZedError::NotFound { what: "context", .. })
        ));
    }

    #[test]
    fn test_active_pointer_to_deleted_context_is_not_found() {
        let mut config = prod_config();
        config.current_context = Some("deleted".to_string());
        assert!(matches!(
            resolve(&config, None, ENDPOINT),
            Err(ZedError::NotFound { what: "context", .. })
        ));
    }

    #[test]
    fn test_removed_token_is_dangling_reference() {
        let mut config = ContextConfig::default();
        config.set_token("t", "s").unwrap();
        config.set_context("c", "tenant1", "t").unwrap();
        config.remove_token("t").unwrap();

        match resolve(&config, Some("c"), ENDPOINT) {
            Err(ZedError::DanglingTokenReference { context, token }) => {
                assert_eq!(context, "c");
                assert_eq!(token, "t");
            }
            other => panic!("Expected DanglingTokenReference, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_does_not_mutate() {
        let mut config = prod_config();
        config.use_context("prod").unwrap();
        let before = config.clone();
        let _ = resolve(&config, None, ENDPOINT);
        let _ = resolve(&config, Some("ghost"), ENDPOINT);
        assert_eq!(config, before);
    }

    #[test]
    fn test_debug_masks_secret() {
        let cred = ResolvedCredential {
            endpoint: ENDPOINT.to_string(),
            tenant: "t".to_string(),
            secret: "very-secret-token-value".to_string(),
        };
        let debug = format!("{:?}", cred);
        assert!(!debug.contains("very-secret-token-value"));
        assert!(debug.contains("****alue"));
    }

    #[test]
    fn test_overrides_replace_context_fields() {
        let mut config = prod_config();
        config.use_context("prod").unwrap();
        let overrides = CredentialOverrides {
            tenant: None,
            token: Some("cli-token".to_string()),
        };
        let cred = resolve_with_overrides(
            &config,
            None,
            &overrides,
            &CredentialDefaults::default(),
            ENDPOINT,
        )
        .unwrap();
        assert_eq!(cred.tenant, "acme-tenant");
        assert_eq!(cred.secret, "cli-token");
    }

    #[test]
    fn test_complete_overrides_without_context() {
        let config = ContextConfig::default();
        let overrides = CredentialOverrides {
            tenant: Some("env-tenant".to_string()),
            token: Some("env-token".to_string()),
        };
        let cred = resolve_with_overrides(
            &config,
            None,
            &overrides,
            &CredentialDefaults::default(),
            ENDPOINT,
        )
        .unwrap();
        assert_eq!(cred.tenant, "env-tenant");
        assert_eq!(cred.secret, "env-token");
        assert_eq!(cred.endpoint, ENDPOINT);
    }

    #[test]
    fn test_partial_overrides_without_context_fail() {
        let config = ContextConfig::default();
        let overrides = CredentialOverrides {
            tenant: Some("env-tenant".to_string()),
            token: Some("   ".to_string()),
        };
        assert!(matches!(
            resolve_with_overrides(
                &config,
                None,
                &overrides,
                &CredentialDefaults::default(),
                ENDPOINT
            ),
            Err(ZedError::NoContextSelected)
        ));
    }

    #[test]
    fn test_overrides_do_not_mask_dangling_reference() {
        let mut config = ContextConfig::default();
        config.set_context("c", "tenant1", "gone").unwrap();
        let overrides = CredentialOverrides {
            tenant: Some("x".to_string()),
            token: Some("y".to_string()),
        };
        assert!(matches!(
            resolve_with_overrides(
                &config,
                Some("c"),
                &overrides,
                &CredentialDefaults::default(),
                ENDPOINT
            ),
            Err(ZedError::DanglingTokenReference { .. })
        ));
    }

    fn env_defaults() -> CredentialDefaults {
        CredentialDefaults::from_lookup(|key| match key {
            "ZED_TENANT" => Some("env-tenant".to_string()),
            "ZED_TOKEN" => Some("env-default-token".to_string()),
            _ => None,
        })
    }

    #[test]
    fn test_env_defaults_do_not_replace_active_context() {
        let mut config = prod_config();
        config.use_context("prod").unwrap();
        let cred = resolve_with_overrides(
            &config,
            None,
            &CredentialOverrides::default(),
            &env_defaults(),
            ENDPOINT,
        )
        .unwrap();
        assert_eq!(cred.tenant, "acme-tenant");
        assert_eq!(cred.secret, "abc123");
    }

    #[test]
    fn test_env_defaults_used_without_context() {
        let config = ContextConfig::default();
        let cred = resolve_with_overrides(
            &config,
            None,
            &CredentialOverrides::default(),
            &env_defaults(),
            ENDPOINT,
        )
        .unwrap();
        assert_eq!(cred.tenant, "env-tenant");
        assert_eq!(cred.secret, "env-default-token");
    }

    #[test]
    fn test_flags_win_over_env_defaults_without_context() {
        let config = ContextConfig::default();
        let overrides = CredentialOverrides {
            tenant: None,
            token: Some("cli-token".to_string()),
        };
        let cred =
            resolve_with_overrides(&config, None, &overrides, &env_defaults(), ENDPOINT).unwrap();
        assert_eq!(cred.tenant, "env-tenant");
        assert_eq!(cred.secret, "cli-token");
    }

    #[test]
    fn test_defaults_debug_masks_token() {
        let debug = format!("{:?}", env_defaults());
        assert!(!debug.contains("env-default-token"));
        assert!(debug.contains("env-tenant"));
    }

    #[test]
    fn test_explicit_name_is_matched_exactly() {
        let mut config = ContextConfig::default();
        config.set_token("k", "s").unwrap();
        config.set_context(" prod ", "t", "k").unwrap();
        config.use_context(" prod ").unwrap();

        assert_eq!(resolve(&config, None, ENDPOINT).unwrap().tenant, "t");
        assert_eq!(resolve(&config, Some(" prod "), ENDPOINT).unwrap().tenant, "t");
        assert!(matches!(
            resolve(&config, Some("prod"), ENDPOINT),
            Err(ZedError::NotFound { what: "context", .. })
        ));
        assert!(matches!(
            resolve(&config, Some("   "), ENDPOINT),
            Err(ZedError::NoContextSelected)
        ));
    }
}
