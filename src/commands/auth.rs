use anyhow::{Context, Result, bail};
use aws_smithy_types::date_time::Format;
use clap::Args;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::{
    aws::{self, ExchangeRequest},
    browser, config,
    constants::OAUTH_REDIRECT_URI,
    idp::{IdentityProvider, google::GoogleProvider},
    oidc::{AuthRequest, IdToken},
};

#[derive(Debug, Clone, Args)]
pub struct AuthCommand {
    #[arg(
        short = 't',
        long,
        help = "Use an already-issued Google ID token instead of signing in"
    )]
    pub token: Option<String>,
}

impl AuthCommand {
    pub async fn execute(self, profile: &str) -> Result<()> {
        info!("Starting authentication for profile: {}", profile);

        // Load configuration
        let config = config::load(profile)
            .await
            .with_context(|| format!("Failed to load configuration for profile '{profile}'. Please run 'gognito configure' first."))?;

        // Create IdP instance (currently only Google is supported)
        let idp = IdentityProvider::Google(GoogleProvider::new(OAUTH_REDIRECT_URI.to_string()));

        let id_token = match self.token {
            // A pre-issued token skips the browser flow entirely; it carries
            // no nonce from this process, so only its shape is checked
            Some(raw) => IdToken::from_raw(&raw).context("Failed to parse the provided ID token")?,
            None => {
                let auth_request = AuthRequest {
                    client_id: config.google_client_id.clone(),
                    redirect_uri: OAUTH_REDIRECT_URI.to_string(),
                };
                let params = auth_request.generate();
                let auth_url = idp.build_auth_url(&params.query);

                info!("Opening browser for authentication...");
                println!("Please complete sign-in in the browser window.");

                let raw = browser::authenticate(
                    &auth_url,
                    OAUTH_REDIRECT_URI,
                    &config.chrome_user_data_dir,
                )
                .await
                .context("Failed to complete browser sign-in")?;

                let token =
                    IdToken::from_raw(&raw).context("Failed to parse captured ID token")?;
                token
                    .verify_nonce(&params.nonce)
                    .context("Captured ID token does not belong to this sign-in")?;
                token
            }
        };

        let now_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System clock is before the Unix epoch")?
            .as_secs() as i64;

        if id_token.is_expired(now_secs) {
            bail!("The Google ID token has expired. Please sign in again.");
        }

        if let Some(email) = &id_token.claims().email {
            info!("Signed in as {}", email);
        }

        // Exchange the token through the identity pool
        let region = config.resolve_region();
        let request = ExchangeRequest::new(
            &region,
            &config.identity_pool_id,
            idp.login_provider_name(),
            id_token.as_str(),
        );

        info!(
            "Requesting AWS credentials from identity pool: {}",
            config.identity_pool_id
        );

        let credentials = aws::cognito::get_credentials_for_identity(&request)
            .await
            .context("Failed to exchange the ID token for AWS credentials")?;

        // Save credentials
        aws::credentials::save_credentials(profile, &credentials)
            .await
            .context("Failed to save AWS credentials")?;

        println!("\nAWS credentials saved to {profile} profile.");
        println!("Cognito identity: {}", credentials.identity_id);
        println!(
            "Credentials will expire at: {}",
            credentials
                .expiration
                .fmt(Format::DateTime)
                .unwrap_or_else(|_| "unknown".to_string())
        );

        Ok(())
    }
}
