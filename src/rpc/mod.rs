//! Policy service client module
//!
//! Builds encrypted, per-call authenticated clients from the context store
//! and carries the namespace RPCs.

mod auth;
mod client;
pub mod namespaces;

use log::debug;

use crate::context::{
    resolve_with_overrides, ContextStore, CredentialDefaults, CredentialOverrides,
};
use crate::error::Result;

pub use auth::{BearerCredentials, CallCredentials};
pub use client::{ClientOptions, PolicyClient};
pub use namespaces::{run_describe_command, NamespaceDefinition, Relation};

/// Resolve credentials for `context` (or the active context) and build a client.
///
/// The store is only read. The returned client has not contacted the
/// endpoint yet.
pub fn new_client(
    store: &ContextStore,
    context: Option<&str>,
    overrides: &CredentialOverrides,
    defaults: &CredentialDefaults,
    endpoint: &str,
    options: &ClientOptions,
) -> Result<PolicyClient> {
    let config = store.load()?;
    let credential = resolve_with_overrides(&config, context, overrides, defaults, endpoint)?;
    debug!("Resolved credential: {:?}", credential);
    PolicyClient::new(&credential, options)
}
