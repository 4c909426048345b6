//! Namespace data models

use serde::{Deserialize, Serialize};

/// Request body of the namespace read RPC
#[derive(Serialize, Debug)]
pub struct ReadNamespaceRequest {
    pub namespace: String,
}

/// Response of the namespace read RPC
#[derive(Deserialize, Debug, Clone)]
pub struct ReadNamespaceResponse {
    pub namespace: String,
    pub config: NamespaceDefinition,
}

/// Relations that make up a namespace
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct NamespaceDefinition {
    pub name: String,
    #[serde(default, rename = "relation")]
    pub relations: Vec<Relation>,
}

/// A single relation; the rewrite is kept opaque
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Relation {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub userset_rewrite: Option<serde_json::Value>,
}

impl Relation {
    pub fn has_rewrite(&self) -> bool {
        self.userset_rewrite.as_ref().is_some_and(|v| !v.is_null())
    }
}

/// Prefix `namespace` with the tenant unless it is already qualified
pub fn qualify_namespace(tenant: &str, namespace: &str) -> String {
    if namespace.contains('/') || tenant.is_empty() {
        namespace.to_string()
    } else {
        format!("{}/{}", tenant, namespace)
    }
}
