use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// TLS is enabled but no trusted root certificates are provided.
    #[error("Invalid TLS config: `trusted_root_certs` must be set when `enabled` is true")]
    MissingTrustedRootCerts,

    /// A configured name cannot be used as a SQL identifier.
    #[error(
        "Invalid identifier `{0}`: must start with a letter or underscore and contain only letters, digits and underscores"
    )]
    InvalidIdentifier(String),
}
