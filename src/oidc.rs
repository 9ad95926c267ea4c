use anyhow::{Context, Result, bail};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;
use url::form_urlencoded;
use uuid::Uuid;

/// OpenID Connect authentication request configuration
#[derive(Debug, Clone)]
pub struct AuthRequest {
    /// OAuth client id the sign-in is performed for
    pub client_id: String,
    /// The URL where the ID token is posted (form_post response mode)
    pub redirect_uri: String,
}

/// Generated request parameters. The nonce must be checked against the
/// returned token; the state ties the callback to this request.
#[derive(Debug, Clone)]
pub struct AuthParams {
    pub query: String,
    pub nonce: String,
    pub state: String,
}

impl AuthRequest {
    /// Generate the authorization request query string with fresh nonce and state
    pub fn generate(&self) -> AuthParams {
        let nonce = Uuid::new_v4().to_string();
        let state = Uuid::new_v4().to_string();

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "id_token")
            .append_pair("response_mode", "form_post")
            .append_pair("scope", "openid email")
            .append_pair("nonce", &nonce)
            .append_pair("state", &state)
            .finish();

        AuthParams {
            query,
            nonce,
            state,
        }
    }
}

/// Claims carried in a Google ID token. Only the claims this tool acts on
/// are modeled; everything else in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct IdTokenClaims {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nonce: Option<String>,
}

/// A captured ID token: the raw compact JWT plus its decoded claims.
///
/// The signature is not verified here. The token is handed to Cognito, which
/// verifies it against Google's keys; local decoding exists to check the
/// nonce, reject an already-expired token before the exchange, and show which
/// account signed in.
#[derive(Debug, Clone)]
pub struct IdToken {
    raw: String,
    claims: IdTokenClaims,
}

impl IdToken {
    /// Parse a compact JWT and decode its payload
    pub fn from_raw(raw: &str) -> Result<Self> {
        let segments: Vec<&str> = raw.split('.').collect();
        if segments.len() != 3 {
            bail!(
                "ID token is not a compact JWT (expected 3 segments, got {})",
                segments.len()
            );
        }

        let payload = URL_SAFE_NO_PAD
            .decode(segments[1])
            .context("Failed to decode ID token payload from base64")?;

        let claims: IdTokenClaims =
            serde_json::from_slice(&payload).context("Failed to parse ID token claims")?;

        Ok(Self {
            raw: raw.to_string(),
            claims,
        })
    }

    /// The raw compact JWT, as sent to Cognito in the login map
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn claims(&self) -> &IdTokenClaims {
        &self.claims
    }

    /// Check the nonce claim against the nonce sent in the auth request
    pub fn verify_nonce(&self, expected: &str) -> Result<()> {
        match self.claims.nonce.as_deref() {
            Some(nonce) if nonce == expected => Ok(()),
            Some(_) => bail!("ID token nonce does not match the authentication request"),
            None => bail!("ID token carries no nonce claim"),
        }
    }

    /// Whether the token's exp claim has passed at the given Unix time
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.claims.exp <= now_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode_token(claims: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.signature")
    }

    fn sample_claims() -> serde_json::Value {
        json!({
            "iss": "https://accounts.google.com",
            "aud": "1234567890-abcdef.apps.googleusercontent.com",
            "sub": "110169484474386276334",
            "exp": 1754500000,
            "iat": 1754496400,
            "email": "user@example.com",
            "nonce": "test-nonce"
        })
    }

    #[test]
    fn test_auth_request_generate() {
        let request = AuthRequest {
            client_id: "1234567890-abcdef.apps.googleusercontent.com".to_string(),
            redirect_uri: "http://localhost:8400/oauth2/idpresponse".to_string(),
        };
        let params = request.generate();

        assert!(params.query.contains("response_type=id_token"));
        assert!(params.query.contains("response_mode=form_post"));
        assert!(params.query.contains("scope=openid+email"));
        assert!(
            params
                .query
                .contains("client_id=1234567890-abcdef.apps.googleusercontent.com")
        );
        assert!(params.query.contains(&format!("nonce={}", params.nonce)));
        assert!(params.query.contains(&format!("state={}", params.state)));
    }

    #[test]
    fn test_auth_request_fresh_nonce_per_request() {
        let request = AuthRequest {
            client_id: "client".to_string(),
            redirect_uri: "http://localhost:8400/oauth2/idpresponse".to_string(),
        };
        let first = request.generate();
        let second = request.generate();

        assert_ne!(first.nonce, second.nonce);
        assert_ne!(first.state, second.state);
    }

    #[test]
    fn test_id_token_from_raw() {
        let token = IdToken::from_raw(&encode_token(&sample_claims())).unwrap();

        assert_eq!(token.claims().iss, "https://accounts.google.com");
        assert_eq!(token.claims().sub, "110169484474386276334");
        assert_eq!(token.claims().email.as_deref(), Some("user@example.com"));
        assert_eq!(token.claims().nonce.as_deref(), Some("test-nonce"));
    }

    #[test]
    fn test_id_token_preserves_raw_form() {
        let raw = encode_token(&sample_claims());
        let token = IdToken::from_raw(&raw).unwrap();
        assert_eq!(token.as_str(), raw);
    }

    #[test]
    fn test_id_token_rejects_malformed_jwt() {
        assert!(IdToken::from_raw("").is_err());
        assert!(IdToken::from_raw("only-one-segment").is_err());
        assert!(IdToken::from_raw("two.segments").is_err());
        assert!(IdToken::from_raw("a.b.c.d").is_err());
        assert!(IdToken::from_raw("header.!!!not-base64!!!.signature").is_err());
    }

    #[test]
    fn test_id_token_rejects_non_json_payload() {
        let payload = URL_SAFE_NO_PAD.encode("not json at all");
        assert!(IdToken::from_raw(&format!("h.{payload}.s")).is_err());
    }

    #[test]
    fn test_verify_nonce() {
        let token = IdToken::from_raw(&encode_token(&sample_claims())).unwrap();

        assert!(token.verify_nonce("test-nonce").is_ok());
        assert!(token.verify_nonce("other-nonce").is_err());
    }

    #[test]
    fn test_verify_nonce_missing_claim() {
        let mut claims = sample_claims();
        claims.as_object_mut().unwrap().remove("nonce");
        let token = IdToken::from_raw(&encode_token(&claims)).unwrap();

        assert!(token.verify_nonce("test-nonce").is_err());
    }

    #[test]
    fn test_is_expired() {
        let token = IdToken::from_raw(&encode_token(&sample_claims())).unwrap();

        assert!(!token.is_expired(1754496400));
        assert!(token.is_expired(1754500000));
        assert!(token.is_expired(1754503600));
    }

    #[test]
    fn test_optional_email_claim() {
        let mut claims = sample_claims();
        claims.as_object_mut().unwrap().remove("email");
        let token = IdToken::from_raw(&encode_token(&claims)).unwrap();

        assert_eq!(token.claims().email, None);
    }
}
