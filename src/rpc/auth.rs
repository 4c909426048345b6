//! Per-call credentials attached to every outbound request

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;

use crate::config::api;
use crate::context::mask_secret;
use crate::error::{Result, ZedError};

/// Produces request metadata for each call.
///
/// Implementations must be stateless: the client invokes them once per
/// request, possibly from several tasks at once.
pub trait CallCredentials: Send + Sync {
    /// Header-like key/value pairs to attach to the next request
    fn request_metadata(&self) -> Result<HeaderMap>;

    /// Whether these credentials may only travel over an encrypted transport
    fn require_transport_security(&self) -> bool {
        true
    }
}

/// `authorization: Bearer <token>` credentials
#[derive(Clone)]
pub struct BearerCredentials {
    token: String,
}

impl BearerCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for BearerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerCredentials")
            .field("token", &mask_secret(&self.token))
            .finish()
    }
}

impl CallCredentials for BearerCredentials {
    fn request_metadata(&self) -> Result<HeaderMap> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|_| {
            ZedError::InvalidArgument(
                "token contains characters that cannot be sent in request metadata".to_string(),
            )
        })?;
        value.set_sensitive(true);

        let mut metadata = HeaderMap::new();
        metadata.insert(
            HeaderName::from_static(api::AUTHORIZATION_HEADER),
            value,
        );
        Ok(metadata)
    }
}
