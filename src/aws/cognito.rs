use std::collections::HashMap;

use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cognitoidentity::Client as CognitoClient;
use tracing::{debug, info};

use super::Credentials;

/// Parameters of the identity-pool credential exchange: the region the pool
/// lives in, the pool id, and the provider-name-to-token login map.
#[derive(Debug, Clone)]
pub struct ExchangeRequest {
    pub region: String,
    pub identity_pool_id: String,
    pub logins: HashMap<String, String>,
}

impl ExchangeRequest {
    /// Build the exchange parameters for a single provider token
    pub fn new(region: &str, identity_pool_id: &str, provider: &str, id_token: &str) -> Self {
        let mut logins = HashMap::new();
        logins.insert(provider.to_string(), id_token.to_string());

        Self {
            region: region.to_string(),
            identity_pool_id: identity_pool_id.to_string(),
            logins,
        }
    }
}

/// Exchange a provider ID token for temporary AWS credentials
pub async fn get_credentials_for_identity(request: &ExchangeRequest) -> Result<Credentials> {
    info!("Resolving temporary credentials through Cognito identity pool");
    debug!("Region: {}", request.region);
    debug!("Identity pool: {}", request.identity_pool_id);

    // GetId and GetCredentialsForIdentity are unsigned operations, so the
    // client is configured without a credentials provider
    let config = aws_config::defaults(BehaviorVersion::latest())
        .no_credentials()
        .region(Region::new(request.region.clone()))
        .load()
        .await;

    let client = CognitoClient::new(&config);

    let identity = client
        .get_id()
        .identity_pool_id(&request.identity_pool_id)
        .set_logins(Some(request.logins.clone()))
        .send()
        .await
        .context("Failed to resolve an identity from the identity pool")?;

    let identity_id = identity
        .identity_id()
        .context("Cognito returned no identity id")?
        .to_string();

    debug!("Identity id: {}", identity_id);

    let response = client
        .get_credentials_for_identity()
        .identity_id(&identity_id)
        .set_logins(Some(request.logins.clone()))
        .send()
        .await
        .context("Failed to get credentials for identity")?;

    let cognito_creds = response
        .credentials()
        .context("Cognito returned no credentials")?;

    let credentials = Credentials {
        access_key_id: cognito_creds
            .access_key_id()
            .context("Cognito credentials missing access key id")?
            .to_string(),
        secret_access_key: cognito_creds
            .secret_key()
            .context("Cognito credentials missing secret key")?
            .to_string(),
        session_token: cognito_creds
            .session_token()
            .context("Cognito credentials missing session token")?
            .to_string(),
        expiration: *cognito_creds
            .expiration()
            .context("Cognito credentials missing expiration")?,
        identity_id,
    };

    info!("Successfully obtained AWS credentials");
    Ok(credentials)
}
