//! Namespace RPCs

use log::debug;

use crate::config::api;
use crate::error::{Result, ZedError};
use crate::rpc::client::PolicyClient;

use super::models::{
    qualify_namespace, NamespaceDefinition, ReadNamespaceRequest, ReadNamespaceResponse,
};

impl PolicyClient {
    /// Read a namespace definition, qualified with this client's tenant.
    ///
    /// Returns the typed definition and the raw response JSON.
    pub async fn read_namespace(
        &self,
        namespace: &str,
    ) -> Result<(NamespaceDefinition, serde_json::Value)> {
        let qualified = qualify_namespace(self.tenant(), namespace);
        debug!("Reading namespace '{}' from {}", qualified, self.base_url());

        let response = self
            .post(api::READ_NAMESPACE_PATH)?
            .json(&ReadNamespaceRequest {
                namespace: qualified.clone(),
            })
            .send()
            .await?;

        match response.status().as_u16() {
            200 => {
                let raw: serde_json::Value = response.json().await?;
                let parsed: ReadNamespaceResponse =
                    serde_json::from_value(raw.clone()).map_err(|e| ZedError::Api {
                        status: 200,
                        message: format!("Failed to parse namespace '{}': {}", qualified, e),
                    })?;
                Ok((parsed.config, raw))
            }
            404 => Err(ZedError::NotFound {
                what: "namespace",
                name: qualified,
            }),
            status => Err(ZedError::Api {
                status,
                message: format!("Failed to read namespace '{}'", qualified),
            }),
        }
    }
}
