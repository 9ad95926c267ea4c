use crate::constants;
use anyhow::{Context, Result};
use dialoguer::{Input, theme::ColorfulTheme};
use ini::{Ini, Properties};
use std::path::PathBuf;
use tokio::fs;

#[derive(Debug, Clone)]
pub struct Config {
    pub identity_pool_id: String,
    pub google_client_id: String,
    pub aws_region: Option<String>,
    pub chrome_user_data_dir: PathBuf,
}

impl Config {
    fn from_ini_section(section: &Properties) -> Self {
        Self {
            identity_pool_id: section.get("identity_pool_id").unwrap_or("").to_string(),
            google_client_id: section.get("google_client_id").unwrap_or("").to_string(),
            aws_region: section.get("aws_region").map(String::from),
            chrome_user_data_dir: section
                .get("chrome_user_data_dir")
                .map_or_else(constants::default_chrome_user_data_dir, PathBuf::from),
        }
    }

    fn save_to_ini(&self, ini: &mut Ini, profile: &str) {
        let section_name = if profile == "default" {
            profile.to_string()
        } else {
            format!("profile {profile}")
        };

        let mut section = ini.with_section(Some(section_name));
        let setter = section
            .set("identity_pool_id", &self.identity_pool_id)
            .set("google_client_id", &self.google_client_id)
            .set(
                "chrome_user_data_dir",
                self.chrome_user_data_dir.to_string_lossy(),
            );

        if let Some(region) = &self.aws_region {
            setter.set("aws_region", region);
        }
    }

    /// Region the Cognito calls run in. An explicit aws_region wins,
    /// otherwise the region prefix of the identity pool id is used.
    pub fn resolve_region(&self) -> String {
        self.aws_region
            .clone()
            .or_else(|| region_of_pool_id(&self.identity_pool_id).map(String::from))
            .unwrap_or_else(|| constants::DEFAULT_AWS_REGION.to_string())
    }
}

pub async fn load(profile: &str) -> Result<Config> {
    let path = get_config_path()?;
    let ini = Ini::load_from_file(&path)
        .context("Failed to load config file. Please run `gognito configure` first")?;

    let section_name = if profile == "default" {
        profile.to_string()
    } else {
        format!("profile {profile}")
    };

    let section = ini
        .section(Some(&section_name))
        .with_context(|| format!("Profile '{profile}' not found in config"))?;

    Ok(Config::from_ini_section(section))
}

pub async fn save(profile: &str, config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut ini = if path.exists() {
        Ini::load_from_file(&path).unwrap_or_else(|_| Ini::new())
    } else {
        Ini::new()
    };

    config.save_to_ini(&mut ini, profile);

    ini.write_to_file(&path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

pub async fn configure_interactive(profile: &str) -> Result<()> {
    println!("Configuring gognito for profile: {profile}");

    let existing_config = load(profile).await.ok();

    if existing_config.is_some() {
        println!("Press Enter to keep current values, or type new values.");
    }
    println!();

    let theme = ColorfulTheme::default();

    let default_config = existing_config.unwrap_or(Config {
        identity_pool_id: String::new(),
        google_client_id: String::new(),
        aws_region: None,
        chrome_user_data_dir: constants::default_chrome_user_data_dir(),
    });

    let identity_pool_id = Input::<String>::with_theme(&theme)
        .with_prompt("Cognito Identity Pool ID")
        .default(default_config.identity_pool_id.clone())
        .allow_empty(!default_config.identity_pool_id.is_empty())
        .validate_with(|input: &String| {
            if input.is_empty() {
                Err("Identity Pool ID is required")
            } else if !is_valid_identity_pool_id(input) {
                Err("Identity Pool ID must look like <region>:<uuid> (e.g. us-west-2:xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx)")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .context("Failed to read Identity Pool ID")?;

    let google_client_id = Input::<String>::with_theme(&theme)
        .with_prompt("Google OAuth Client ID")
        .default(default_config.google_client_id.clone())
        .allow_empty(!default_config.google_client_id.is_empty())
        .validate_with(|input: &String| {
            if input.is_empty() {
                Err("Google OAuth Client ID is required")
            } else if !is_valid_google_client_id(input) {
                Err("Google OAuth Client ID must end with .apps.googleusercontent.com")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .context("Failed to read Google OAuth Client ID")?;

    let aws_region = Input::<String>::with_theme(&theme)
        .with_prompt("AWS Region (empty to use the pool's region)")
        .default(default_config.aws_region.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()
        .context("Failed to read AWS region")?;

    let chrome_user_data_dir = Input::<String>::with_theme(&theme)
        .with_prompt("Chrome User Data Directory")
        .default(
            default_config
                .chrome_user_data_dir
                .to_string_lossy()
                .to_string(),
        )
        .interact_text()
        .context("Failed to read Chrome user data directory")?;

    let config = Config {
        identity_pool_id,
        google_client_id,
        aws_region: (!aws_region.is_empty()).then_some(aws_region),
        chrome_user_data_dir: PathBuf::from(chrome_user_data_dir),
    };

    save(profile, &config).await?;

    println!("\nConfiguration saved successfully.");
    Ok(())
}

fn get_config_path() -> Result<PathBuf> {
    constants::get_aws_config_path().context("Failed to determine AWS config path")
}

/// Region prefix of an identity pool id ("us-west-2:uuid" -> "us-west-2")
pub fn region_of_pool_id(pool_id: &str) -> Option<&str> {
    pool_id
        .split_once(':')
        .map(|(region, _)| region)
        .filter(|region| !region.is_empty())
}

/// Identity pool ids are "<region>:<uuid>"
fn is_valid_identity_pool_id(s: &str) -> bool {
    match s.split_once(':') {
        Some((region, uuid)) => !region.is_empty() && is_valid_uuid(uuid),
        None => false,
    }
}

fn is_valid_google_client_id(s: &str) -> bool {
    s.ends_with(".apps.googleusercontent.com") && s.len() > ".apps.googleusercontent.com".len()
}

fn is_valid_uuid(s: &str) -> bool {
    let parts: Vec<&str> = s.split('-').collect();

    if parts.len() != 5 {
        return false;
    }

    let expected_lengths = [8, 4, 4, 4, 12];

    parts
        .iter()
        .zip(expected_lengths.iter())
        .all(|(part, &expected_len)| {
            part.len() == expected_len && part.chars().all(|c| c.is_ascii_hexdigit())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_valid_uuid() {
        assert!(is_valid_uuid("12345678-1234-1234-1234-123456789abc"));
        assert!(is_valid_uuid("abcdef01-2345-6789-abcd-ef0123456789"));
        assert!(is_valid_uuid("00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn test_invalid_uuid() {
        assert!(!is_valid_uuid(""));
        assert!(!is_valid_uuid("not-a-uuid"));
        assert!(!is_valid_uuid("12345678-1234-1234-1234"));
        assert!(!is_valid_uuid("12345678-1234-1234-1234-123456789abcd"));
        assert!(!is_valid_uuid("12345678-1234-1234-1234-123456789ab"));
        assert!(!is_valid_uuid("12345678_1234_1234_1234_123456789abc"));
        assert!(!is_valid_uuid("1234567g-1234-1234-1234-123456789abc"));
    }

    #[test]
    fn test_valid_identity_pool_id() {
        assert!(is_valid_identity_pool_id(
            "us-west-2:0f3bf9b3-701d-47b6-a1bb-f634fdb21fbc"
        ));
        assert!(is_valid_identity_pool_id(
            "eu-central-1:00000000-0000-0000-0000-000000000000"
        ));
    }

    #[test]
    fn test_invalid_identity_pool_id() {
        assert!(!is_valid_identity_pool_id(""));
        assert!(!is_valid_identity_pool_id("us-west-2"));
        assert!(!is_valid_identity_pool_id(
            ":0f3bf9b3-701d-47b6-a1bb-f634fdb21fbc"
        ));
        assert!(!is_valid_identity_pool_id("us-west-2:not-a-uuid"));
    }

    #[test]
    fn test_valid_google_client_id() {
        assert!(is_valid_google_client_id(
            "1234567890-abcdef.apps.googleusercontent.com"
        ));
        assert!(!is_valid_google_client_id(".apps.googleusercontent.com"));
        assert!(!is_valid_google_client_id("1234567890-abcdef"));
        assert!(!is_valid_google_client_id(""));
    }

    #[test]
    fn test_region_of_pool_id() {
        assert_eq!(
            region_of_pool_id("us-west-2:0f3bf9b3-701d-47b6-a1bb-f634fdb21fbc"),
            Some("us-west-2")
        );
        assert_eq!(region_of_pool_id("no-colon-here"), None);
        assert_eq!(region_of_pool_id(":uuid"), None);
    }

    #[test]
    fn test_resolve_region_prefers_explicit() {
        let config = Config {
            identity_pool_id: "us-west-2:0f3bf9b3-701d-47b6-a1bb-f634fdb21fbc".to_string(),
            google_client_id: "x.apps.googleusercontent.com".to_string(),
            aws_region: Some("eu-west-1".to_string()),
            chrome_user_data_dir: PathBuf::from("/tmp"),
        };
        assert_eq!(config.resolve_region(), "eu-west-1");
    }

    #[test]
    fn test_resolve_region_from_pool_id() {
        let config = Config {
            identity_pool_id: "ap-northeast-1:0f3bf9b3-701d-47b6-a1bb-f634fdb21fbc".to_string(),
            google_client_id: "x.apps.googleusercontent.com".to_string(),
            aws_region: None,
            chrome_user_data_dir: PathBuf::from("/tmp"),
        };
        assert_eq!(config.resolve_region(), "ap-northeast-1");
    }

    #[test]
    fn test_config_from_ini_section() {
        let mut props = Properties::new();
        props.insert(
            "identity_pool_id".to_string(),
            "us-west-2:0f3bf9b3-701d-47b6-a1bb-f634fdb21fbc".to_string(),
        );
        props.insert(
            "google_client_id".to_string(),
            "1234567890-abcdef.apps.googleusercontent.com".to_string(),
        );
        props.insert("aws_region".to_string(), "us-east-1".to_string());
        props.insert(
            "chrome_user_data_dir".to_string(),
            "/custom/path".to_string(),
        );

        let config = Config::from_ini_section(&props);

        assert_eq!(
            config.identity_pool_id,
            "us-west-2:0f3bf9b3-701d-47b6-a1bb-f634fdb21fbc"
        );
        assert_eq!(
            config.google_client_id,
            "1234567890-abcdef.apps.googleusercontent.com"
        );
        assert_eq!(config.aws_region.as_deref(), Some("us-east-1"));
        assert_eq!(config.chrome_user_data_dir, PathBuf::from("/custom/path"));
    }

    #[test]
    #[serial]
    fn test_config_from_ini_section_with_defaults() {
        let props = Properties::new();
        let config = Config::from_ini_section(&props);

        assert_eq!(config.identity_pool_id, "");
        assert_eq!(config.google_client_id, "");
        assert_eq!(config.aws_region, None);
        assert!(
            config
                .chrome_user_data_dir
                .to_string_lossy()
                .contains("chrome-user-data")
        );
    }
}
