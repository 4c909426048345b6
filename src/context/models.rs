//! Context configuration data models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, ZedError};

/// Top-level store document: tokens, contexts and the active pointer
#[derive(Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ContextConfig {
    /// Name of the currently active context
    #[serde(rename = "current-context", skip_serializing_if = "Option::is_none")]
    pub current_context: Option<String>,
    /// Map of context name to context configuration
    #[serde(default)]
    pub contexts: BTreeMap<String, Context>,
    /// Map of token name to secret
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
}

/// A named context: tenant plus a reference to a stored token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Context {
    /// Tenant the context addresses
    pub tenant: String,
    /// Name of the token in the token store (may dangle)
    #[serde(rename = "token")]
    pub token_name: String,
}

/// A context together with its name, as returned by listings
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContextEntry {
    pub name: String,
    pub tenant: String,
    pub token_name: String,
}

impl fmt::Debug for ContextConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextConfig")
            .field("current_context", &self.current_context)
            .field("contexts", &self.contexts)
            .field("tokens", &self.tokens.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Reject empty (or whitespace-only) names
pub(crate) fn validate_name(what: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ZedError::InvalidArgument(format!(
            "{} name must not be empty",
            what
        )));
    }
    Ok(())
}

impl ContextConfig {
    /// Insert or overwrite a token
    pub fn set_token(&mut self, name: &str, secret: &str) -> Result<()> {
        validate_name("token", name)?;
        self.tokens.insert(name.to_string(), secret.to_string());
        Ok(())
    }

    /// Token names in lexicographic order (never secrets)
    pub fn token_names(&self) -> Vec<String> {
        self.tokens.keys().cloned().collect()
    }

    /// Secret for a token name
    pub fn secret(&self, name: &str) -> Result<&str> {
        self.tokens
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ZedError::token_not_found(name))
    }

    /// Remove a token; contexts referencing it are left dangling
    pub fn remove_token(&mut self, name: &str) -> Result<()> {
        self.tokens
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ZedError::token_not_found(name))
    }

    /// Insert or overwrite a context. The token reference is not checked.
    pub fn set_context(&mut self, name: &str, tenant: &str, token_name: &str) -> Result<()> {
        validate_name("context", name)?;
        self.contexts.insert(
            name.to_string(),
            Context {
                tenant: tenant.to_string(),
                token_name: token_name.to_string(),
            },
        );
        Ok(())
    }

    /// All contexts in lexicographic name order
    pub fn context_entries(&self) -> Vec<ContextEntry> {
        self.contexts
            .iter()
            .map(|(name, ctx)| ContextEntry {
                name: name.clone(),
                tenant: ctx.tenant.clone(),
                token_name: ctx.token_name.clone(),
            })
            .collect()
    }

    /// Look up a context by name
    pub fn context(&self, name: &str) -> Result<&Context> {
        self.contexts
            .get(name)
            .ok_or_else(|| ZedError::context_not_found(name))
    }

    /// Remove a context, clearing the active pointer if it named it
    pub fn remove_context(&mut self, name: &str) -> Result<()> {
        if self.contexts.remove(name).is_none() {
            return Err(ZedError::context_not_found(name));
        }
        if self.current_context.as_deref() == Some(name) {
            self.current_context = None;
        }
        Ok(())
    }

    /// Point the active context at an existing context
    pub fn use_context(&mut self, name: &str) -> Result<()> {
        if !self.contexts.contains_key(name) {
            return Err(ZedError::context_not_found(name));
        }
        self.current_context = Some(name.to_string());
        Ok(())
    }

    /// Name of the active context, if any
    pub fn active_context_name(&self) -> Option<&str> {
        self.current_context.as_deref().filter(|n| !n.is_empty())
    }

    /// Copy of the document with every secret replaced by its mask
    pub fn masked(&self) -> ContextConfig {
        let mut copy = self.clone();
        for secret in copy.tokens.values_mut() {
            *secret = mask_secret(secret);
        }
        copy
    }
}

/// Mask a secret for display, keeping at most the last 4 chars
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() >= 8 {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    } else {
        "****".to_string()
    }
}
