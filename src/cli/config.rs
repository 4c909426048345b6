//! Config management CLI arguments (kubectl-style)

use clap::{Parser, Subcommand};

/// Config subcommands for managing tokens and contexts
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Store a named token
    #[command(name = "set-token")]
    SetToken(SetTokenArgs),

    /// List stored token names
    #[command(name = "get-tokens")]
    GetTokens,

    /// Delete a stored token (contexts referencing it are kept)
    #[command(name = "delete-token")]
    DeleteToken(NameArgs),

    /// Set a context entry in the config file
    #[command(name = "set-context")]
    SetContext(SetContextArgs),

    /// Describe all contexts
    #[command(name = "get-contexts")]
    GetContexts,

    /// Set the current-context in the config file
    #[command(name = "use-context")]
    UseContext(NameArgs),

    /// Display the current-context
    #[command(name = "current-context")]
    CurrentContext,

    /// Delete the specified context from the config file
    #[command(name = "delete-context")]
    DeleteContext(NameArgs),

    /// Display config file contents with secrets masked
    View,
}

/// Arguments for 'config set-token'
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        zed config set-token prod-key tc_my_secret_token\n  \
        zed config set-token prod-key tc_rotated_token   # overwrite")]
pub struct SetTokenArgs {
    /// Token name
    pub name: String,
    /// Secret value
    pub secret: String,
}

/// Arguments for 'config set-context'
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        zed config set-context prod acme-tenant prod-key\n  \
        zed config set-context staging acme-staging key-added-later")]
pub struct SetContextArgs {
    /// Context name
    pub name: String,
    /// Tenant the context addresses
    pub tenant: String,
    /// Name of a token stored with 'set-token'
    pub token_name: String,
}

/// A single name argument
#[derive(Parser, Debug)]
pub struct NameArgs {
    /// Name of the entry
    pub name: String,
}
