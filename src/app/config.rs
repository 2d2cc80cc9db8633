//! Configuration loading: optional TOML settings file plus environment.

use std::fs;
use std::io;
use std::path::Path;

use crate::domain::{AppError, Credentials, NotifierConfig, NotifierSettings};

/// Load non-secret settings from `path` (if given) and apply environment overrides.
pub fn load_settings<F>(path: Option<&Path>, lookup: F) -> Result<NotifierSettings, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = match path {
        Some(path) => parse_settings_file(path)?,
        None => NotifierSettings::default(),
    };

    settings.apply_overrides(&lookup)?;
    settings.normalize();
    settings.validate()?;
    Ok(settings)
}

/// Load the full configuration. Fails before any event is read when a value is missing.
pub fn load_config<F>(path: Option<&Path>, lookup: F) -> Result<NotifierConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let credentials = Credentials::from_lookup(&lookup)?;
    let settings = load_settings(path, &lookup)?;
    Ok(NotifierConfig { settings, credentials })
}

/// Read a variable from the process environment.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_settings_file(path: &Path) -> Result<NotifierSettings, AppError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            AppError::config_error(format!("Settings file not found: {}", path.display()))
        }
        _ => AppError::Io(e),
    })?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::TempDir;

    use super::*;
    use crate::domain::StoreBackend;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    const FULL_ENV: &[(&str, &str)] = &[
        ("SLACK_BOT_TOKEN", "xoxb"),
        ("SLACK_CHANNEL", "#reviews"),
        ("SLACK_CHANNEL_ID", "C1"),
        ("GH_TOKEN", "ghp"),
    ];

    #[test]
    fn defaults_without_file() {
        let config = load_config(None, env(FULL_ENV)).unwrap();
        assert_eq!(config.settings.review.quorum, 2);
        assert_eq!(config.credentials.slack_channel_id, "C1");
    }

    #[test]
    fn missing_credentials_fail() {
        let err = load_config(None, env(&[])).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn reads_settings_file_and_env_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notifier.toml");
        fs::write(
            &path,
            "[review]\nquorum = 3\n\n[github]\nweb_url = \"https://ghe.example.com\"\n\n[store]\nbackend = \"file\"\npath = \"c.json\"\n",
        )
        .unwrap();

        let mut pairs = FULL_ENV.to_vec();
        pairs.push(("PR_NOTIFIER_QUORUM", "4"));
        let config = load_config(Some(&path), env(&pairs)).unwrap();

        assert_eq!(config.settings.review.quorum, 4);
        assert_eq!(config.settings.github.web_url.as_str(), "https://ghe.example.com/");
        assert_eq!(config.settings.store.backend, StoreBackend::File);
    }

    #[test]
    fn missing_settings_file_is_configuration_error() {
        let err = load_settings(Some(Path::new("/nonexistent/notifier.toml")), env(&[]))
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(msg) if msg.contains("not found")));
    }

    #[test]
    fn invalid_settings_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notifier.toml");
        fs::write(&path, "[review]\nquorum = \"two\"\n").unwrap();

        let err = load_settings(Some(&path), env(&[])).unwrap_err();
        assert!(matches!(err, AppError::TomlParseError(_)));
    }
}
