use std::{env, path::PathBuf};

use dirs;

/// Default configuration directory name under user's config directory
pub const CONFIG_DIR_NAME: &str = "gognito";

/// Chrome user data directory name
pub const CHROME_USER_DATA_DIR_NAME: &str = "chrome-user-data";

/// AWS configuration directory name
pub const AWS_CONFIG_DIR_NAME: &str = ".aws";

/// AWS configuration file name
pub const AWS_CONFIG_FILE_NAME: &str = "config";

/// Google OAuth 2.0 authorization endpoint
pub const GOOGLE_AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Login-map key Cognito expects for Google-issued ID tokens
pub const GOOGLE_LOGIN_PROVIDER: &str = "accounts.google.com";

/// Redirect URI the sign-in response is posted to. Nothing listens on this
/// address; the POST is captured from browser network traffic, not served.
pub const OAUTH_REDIRECT_URI: &str = "http://localhost:8400/oauth2/idpresponse";

/// Default AWS region for Cognito operations when no region is configured
/// and none can be derived from the identity pool id
pub const DEFAULT_AWS_REGION: &str = "us-west-2";

/// Get the default Chrome user data directory path
/// Always returns: ~/.config/gognito/chrome-user-data (on all platforms)
pub fn default_chrome_user_data_dir() -> PathBuf {
    // Always use home directory with .config, regardless of platform
    // This ensures consistent behavior across all OSes
    let home_dir = dirs::home_dir()
        .or_else(|| {
            // Fallback to environment variables if dirs crate fails
            env::var("HOME")
                .or_else(|_| env::var("USERPROFILE"))
                .ok()
                .map(PathBuf::from)
        })
        .expect("Could not determine home directory. Please set HOME environment variable.");

    home_dir
        .join(".config")
        .join(CONFIG_DIR_NAME)
        .join(CHROME_USER_DATA_DIR_NAME)
}

/// Get the AWS config file path
/// Respects AWS_CONFIG_FILE environment variable if set
pub fn get_aws_config_path() -> Option<PathBuf> {
    // Check environment variable first
    if let Ok(path) = env::var("AWS_CONFIG_FILE") {
        return Some(PathBuf::from(path));
    }

    // Use default AWS config location
    dirs::home_dir().map(|home| home.join(AWS_CONFIG_DIR_NAME).join(AWS_CONFIG_FILE_NAME))
}

/// Get the AWS credentials file path
/// Respects AWS_SHARED_CREDENTIALS_FILE environment variable if set
pub fn get_aws_credentials_path() -> Option<PathBuf> {
    // Check environment variable first
    if let Ok(path) = env::var("AWS_SHARED_CREDENTIALS_FILE") {
        return Some(PathBuf::from(path));
    }

    // Use default AWS credentials location
    dirs::home_dir().map(|home| home.join(AWS_CONFIG_DIR_NAME).join("credentials"))
}
