//! Error type shared by the tree, the translator and the dispatcher.
//!
//! Callable errors are never wrapped here: they travel as `anyhow::Error`
//! straight back to whoever invoked the dispatch entry point.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EndpointError {
    /// The parsed path reached a node with no bound callable.
    #[error("invalid endpoint: '{0}' has no callable bound")]
    UnrecognizedEndpoint(String),

    /// A variadic keyword token without `=`.
    #[error("malformed keyword argument '{0}' (expected KEY=VALUE)")]
    MalformedKeyValue(String),

    /// Automatic path derivation needs a qualified name on the signature.
    #[error("cannot derive endpoint path: '{0}' has no qualified name")]
    MissingQualname(String),

    /// `call_with` targeted a path that was never registered.
    #[error("unknown endpoint path: '{0}'")]
    UnknownPath(String),

    #[error("failed to decode YAML endpoint manifest")]
    ManifestYaml(#[from] serde_yaml::Error),

    #[error("failed to decode JSON endpoint manifest")]
    ManifestJson(#[from] serde_json::Error),
}

pub type Result<T, E = EndpointError> = std::result::Result<T, E>;
