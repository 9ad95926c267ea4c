use aws_smithy_types::DateTime;

pub mod cognito;
pub mod console;
pub mod credentials;

/// AWS temporary credentials structure
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime,
    /// Cognito identity the credentials were issued for
    pub identity_id: String,
}

// Re-export commonly used types (functions should be accessed via module path)
pub use cognito::ExchangeRequest;
