//! Describe command handler

use log::debug;
use std::time::Duration;

use crate::cli::{Cli, DescribeArgs, OutputFormat};
use crate::context::{ContextStore, CredentialDefaults, CredentialOverrides};
use crate::error::Result;
use crate::output::output_namespace;
use crate::rpc::{new_client, ClientOptions};
use crate::ui::{create_spinner, finish_spinner};

/// Client options from the global CLI flags
pub fn client_options(cli: &Cli) -> ClientOptions {
    let options = ClientOptions::default();
    match cli.timeout {
        Some(secs) if secs > 0 => options.with_request_timeout(Duration::from_secs(secs)),
        _ => options,
    }
}

/// Resolve credentials, issue one namespace read and render the result
pub async fn run_describe_command(
    cli: &Cli,
    args: &DescribeArgs,
    store: &ContextStore,
) -> Result<()> {
    let overrides = CredentialOverrides {
        tenant: cli.tenant.clone(),
        token: cli.token.clone(),
    };
    let client = new_client(
        store,
        cli.context.as_deref(),
        &overrides,
        &CredentialDefaults::from_env(),
        &cli.endpoint,
        &client_options(cli),
    )?;

    let format = args.format();
    let spinner = create_spinner(
        &format!("Describing namespace '{}'...", args.namespace),
        format != OutputFormat::Text,
    );

    let result = client.read_namespace(&args.namespace).await;
    finish_spinner(spinner);

    let (definition, raw) = result?;
    debug!(
        "Namespace '{}' has {} relations",
        definition.name,
        definition.relations.len()
    );
    output_namespace(&definition, &raw, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_client_options_default_timeout() {
        let cli = Cli::parse_from(["zed", "describe", "document"]);
        assert_eq!(
            client_options(&cli).request_timeout,
            ClientOptions::default().request_timeout
        );
    }

    #[test]
    fn test_client_options_custom_timeout() {
        let cli = Cli::parse_from(["zed", "--timeout", "3", "describe", "document"]);
        assert_eq!(client_options(&cli).request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_client_options_zero_timeout_keeps_default() {
        let cli = Cli::parse_from(["zed", "--timeout", "0", "describe", "document"]);
        assert_eq!(
            client_options(&cli).request_timeout,
            ClientOptions::default().request_timeout
        );
    }
}
