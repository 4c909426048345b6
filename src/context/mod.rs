//! Context management module
//!
//! Provides named tokens and contexts (tenant + token reference) persisted in
//! one JSON store, the active-context pointer, and credential resolution for
//! switching between tenants of the policy service.

mod commands;
mod lock;
mod models;
mod resolve;
mod store;

pub use commands::run_config_command;
pub use models::{mask_secret, Context, ContextConfig, ContextEntry};
pub use resolve::{
    resolve, resolve_with_overrides, CredentialDefaults, CredentialOverrides, ResolvedCredential,
};
pub use store::ContextStore;
