pub mod google;

use self::google::GoogleProvider;

/// Identity Provider enum using composition pattern
/// Each variant contains a provider-specific struct with its own implementation
#[derive(Debug, Clone)]
pub enum IdentityProvider {
    Google(GoogleProvider),
    // Future: Facebook(facebook::FacebookProvider),
    // Future: Apple(apple::AppleProvider),
}

impl IdentityProvider {
    /// Build the authorization URL for the provided request query string
    pub fn build_auth_url(&self, auth_query: &str) -> String {
        match self {
            Self::Google(provider) => provider.build_auth_url(auth_query),
            // Future: Self::Facebook(provider) => provider.build_auth_url(auth_query),
        }
    }

    /// Check if the URL is the redirect endpoint the ID token is posted to
    pub fn is_callback(&self, url: &str) -> bool {
        match self {
            Self::Google(provider) => provider.is_callback(url),
            // Future: Self::Facebook(provider) => provider.is_callback(url),
        }
    }

    /// Login-map key Cognito identifies this provider by
    pub fn login_provider_name(&self) -> &'static str {
        match self {
            Self::Google(_) => crate::constants::GOOGLE_LOGIN_PROVIDER,
        }
    }
}
