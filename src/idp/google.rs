use crate::constants::GOOGLE_AUTH_ENDPOINT;

/// Google sign-in provider implementation
#[derive(Debug, Clone)]
pub struct GoogleProvider {
    redirect_uri: String,
}

impl GoogleProvider {
    /// Create a new Google provider posting the sign-in response to the given URI
    pub fn new(redirect_uri: String) -> Self {
        Self { redirect_uri }
    }

    /// Build the authorization URL for the provided request query string
    pub fn build_auth_url(&self, auth_query: &str) -> String {
        format!("{GOOGLE_AUTH_ENDPOINT}?{auth_query}")
    }

    /// Check if the URL is the redirect endpoint the ID token is posted to
    pub fn is_callback(&self, url: &str) -> bool {
        url == self.redirect_uri
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_auth_url() {
        let provider = GoogleProvider::new("http://localhost:8400/oauth2/idpresponse".to_string());
        let url = provider.build_auth_url("client_id=test-client&response_type=id_token");

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("client_id=test-client"));
        assert!(url.contains("response_type=id_token"));
    }

    #[test]
    fn test_is_callback() {
        let provider = GoogleProvider::new("http://localhost:8400/oauth2/idpresponse".to_string());

        assert!(provider.is_callback("http://localhost:8400/oauth2/idpresponse"));
        assert!(!provider.is_callback("http://localhost:8400/oauth2/other"));
        assert!(!provider.is_callback("https://accounts.google.com/o/oauth2/v2/auth"));
    }
}
