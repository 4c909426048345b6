//! Namespace reads and the describe command

mod api;
mod commands;
mod models;

pub use commands::{client_options, run_describe_command};
pub use models::{qualify_namespace, NamespaceDefinition, Relation};
