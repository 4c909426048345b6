//! CLI argument parsing

mod common;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{context as context_config, defaults, env};

pub use common::OutputFormat;
pub use config::{ConfigAction, NameArgs, SetContextArgs, SetTokenArgs};

/// Authzed client
#[derive(Parser, Debug)]
#[command(name = "zed")]
#[command(version)]
#[command(about = "A client for managing authzed from your command line", long_about = None)]
pub struct Cli {
    /// Policy service endpoint (host:port)
    #[arg(long, global = true, env = env::ENDPOINT, default_value = defaults::ENDPOINT)]
    pub endpoint: String,

    /// Tenant to query (overrides the context's tenant; ZED_TENANT applies only without a context)
    #[arg(long, global = true)]
    pub tenant: Option<String>,

    /// Token used to authenticate (overrides the context's token; ZED_TOKEN applies only without a context)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Context to use instead of the current-context
    #[arg(long, global = true, env = context_config::ENV_VAR)]
    pub context: Option<String>,

    /// Path to the config store (default: ~/.zed/config.json)
    #[arg(long, global = true, env = context_config::PATH_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configure client contexts and credentials
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Describe the relations that form the provided namespace
    Describe(DescribeArgs),
}

/// Arguments for 'describe'
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        zed describe document\n  \
        zed describe document --json\n  \
        zed --context staging describe other-tenant/document -o yaml")]
pub struct DescribeArgs {
    /// Namespace to describe (prefixed with the tenant unless it contains '/')
    pub namespace: String,

    /// Output as JSON (same as -o json)
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl DescribeArgs {
    /// Format after applying the --json shorthand
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.output
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_defaults() {
        let cli = Cli::parse_from(["zed", "describe", "document"]);
        assert_eq!(cli.log_level, defaults::LOG_LEVEL);
        assert!(cli.timeout.is_none());
        match cli.command {
            Command::Describe(args) => {
                assert_eq!(args.namespace, "document");
                assert_eq!(args.format(), OutputFormat::Text);
            }
            _ => panic!("Expected describe"),
        }
    }

    #[test]
    fn test_describe_json_shorthand() {
        let cli = Cli::parse_from(["zed", "describe", "document", "--json"]);
        match cli.command {
            Command::Describe(args) => assert_eq!(args.format(), OutputFormat::Json),
            _ => panic!("Expected describe"),
        }
    }

    #[test]
    fn test_describe_json_conflicts_with_output() {
        let result = Cli::try_parse_from(["zed", "describe", "d", "--json", "-o", "yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "zed",
            "describe",
            "document",
            "--context",
            "prod",
            "--endpoint",
            "policy.example.com:443",
            "--timeout",
            "5",
        ]);
        assert_eq!(cli.context, Some("prod".to_string()));
        assert_eq!(cli.endpoint, "policy.example.com:443");
        assert_eq!(cli.timeout, Some(5));
    }

    #[test]
    fn test_config_set_context() {
        let cli = Cli::parse_from(["zed", "config", "set-context", "prod", "acme", "prod-key"]);
        match cli.command {
            Command::Config {
                action: ConfigAction::SetContext(args),
            } => {
                assert_eq!(args.name, "prod");
                assert_eq!(args.tenant, "acme");
                assert_eq!(args.token_name, "prod-key");
            }
            _ => panic!("Expected config set-context"),
        }
    }

    #[test]
    fn test_config_set_token_requires_secret() {
        assert!(Cli::try_parse_from(["zed", "config", "set-token", "prod-key"]).is_err());
    }

    #[test]
    fn test_config_use_context() {
        let cli = Cli::parse_from(["zed", "config", "use-context", "prod"]);
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::UseContext(NameArgs { ref name })
            } if name == "prod"
        ));
    }
}
