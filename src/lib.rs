//! zed - command-line client for the authzed authorization-policy service
//!
//! Manages named tokens and contexts (tenant + token reference), tracks the
//! active context, and issues TLS-secured RPCs that carry the context's token
//! as a bearer credential on every call.
//!
//! # Example
//!
//! ```bash
//! # Store a token and a context that uses it
//! zed config set-token prod-key tc_secret
//! zed config set-context prod acme-tenant prod-key
//!
//! # Make it the active context
//! zed config use-context prod
//!
//! # Describe a namespace of the active tenant
//! zed describe document
//!
//! # Use another context for one call, as JSON
//! zed --context staging describe document --json
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod output;
pub mod rpc;
pub mod ui;

pub use cli::{Cli, Command, ConfigAction, DescribeArgs, OutputFormat};
pub use context::{
    resolve, resolve_with_overrides, run_config_command, Context, ContextConfig, ContextEntry,
    ContextStore, CredentialDefaults, CredentialOverrides, ResolvedCredential,
};
pub use error::{ErrorKind, Result, ZedError};
pub use rpc::{
    new_client, run_describe_command, BearerCredentials, CallCredentials, ClientOptions,
    PolicyClient,
};
