//! Policy service client: encrypted transport, per-call bearer metadata

use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::config::api;
use crate::context::ResolvedCredential;
use crate::error::{Result, ZedError};

use super::auth::{BearerCredentials, CallCredentials};

/// Transport settings for a client; all timeouts are finite
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(api::CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(api::REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientOptions {
    /// Options with the request timeout replaced
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Authorization-policy service client
pub struct PolicyClient {
    client: Client,
    base_url: String,
    tenant: String,
    credentials: Arc<dyn CallCredentials>,
}

/// Turn an endpoint (`host:port` or `https://host:port`) into a base URL.
/// Plaintext endpoints are refused.
pub(crate) fn endpoint_url(endpoint: &str) -> Result<String> {
    let endpoint = endpoint.trim().trim_end_matches('/');
    if endpoint.is_empty() {
        return Err(ZedError::InvalidArgument("endpoint must not be empty".to_string()));
    }
    let (scheme, rest) = match endpoint.split_once("://") {
        Some(parts) => parts,
        None => return Ok(format!("https://{}", endpoint)),
    };
    match scheme.to_ascii_lowercase().as_str() {
        "https" => Ok(format!("https://{}", rest)),
        "http" => Err(ZedError::TlsSetup(format!(
            "refusing plaintext endpoint '{}'; transport encryption is required",
            endpoint
        ))),
        _ => Err(ZedError::InvalidArgument(format!(
            "unsupported endpoint scheme '{}' in '{}'",
            scheme, endpoint
        ))),
    }
}

impl PolicyClient {
    /// Build a client for a resolved credential.
    ///
    /// No connection is made here; reachability problems surface on the
    /// first call.
    pub fn new(credential: &ResolvedCredential, options: &ClientOptions) -> Result<Self> {
        Self::with_credentials(
            &credential.endpoint,
            &credential.tenant,
            Arc::new(BearerCredentials::new(credential.secret.clone())),
            options,
        )
    }

    /// Build a client with arbitrary per-call credentials
    pub fn with_credentials(
        endpoint: &str,
        tenant: &str,
        credentials: Arc<dyn CallCredentials>,
        options: &ClientOptions,
    ) -> Result<Self> {
        let base_url = endpoint_url(endpoint)?;
        if !credentials.require_transport_security() {
            debug!("Credentials do not demand transport security; TLS is used regardless");
        }

        // The rustls backend verifies against the platform trust store
        let client = Client::builder()
            .https_only(true)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(options.connect_timeout)
            .timeout(options.request_timeout)
            .build()
            .map_err(|e| {
                ZedError::TlsSetup(format!("could not initialise TLS with system trust roots: {}", e))
            })?;

        debug!(
            "Built client for {} (tenant={}, connect_timeout={:?}, timeout={:?})",
            base_url, tenant, options.connect_timeout, options.request_timeout
        );

        Ok(Self {
            client,
            base_url,
            tenant: tenant.to_string(),
            credentials,
        })
    }

    /// Create a client against a plain mock server
    #[cfg(test)]
    pub(crate) fn with_base_url(
        base_url: String,
        tenant: &str,
        credentials: Arc<dyn CallCredentials>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url,
            tenant: tenant.to_string(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Tenant this client addresses
    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// Create a POST request with fresh credential metadata
    pub(crate) fn post(&self, path: &str) -> Result<reqwest::RequestBuilder> {
        let metadata = self.credentials.request_metadata()?;
        let url = format!("{}{}", self.base_url, path);
        Ok(self
            .client
            .post(url)
            .headers(metadata)
            .header(CONTENT_TYPE, "application/json"))
    }
}
