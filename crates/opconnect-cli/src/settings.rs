//! CLI settings: command-line flags and environment over a TOML file.
//!
//! The file lives at `~/.opconnect/config.toml` or `$OPCONNECT_CONFIG`.
//! A missing file is the same as an empty one.

use std::path::{Path, PathBuf};

use opconnect::TOKEN_ENV;
use serde::Deserialize;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "OPCONNECT_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("no Connect endpoint configured (use --endpoint or OPCONNECT_URL)")]
    MissingEndpoint,

    #[error("no vault selected (use --vault, --vault-id or OPCONNECT_VAULT)")]
    MissingVault,
}

/// Contents of the config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Name of the environment variable holding the access token.
    #[serde(default)]
    pub token_env: Option<String>,

    /// Default vault name.
    #[serde(default)]
    pub vault: Option<String>,
}

/// Values taken from flags (clap fills these from the environment too).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub token_env: Option<String>,
}

/// Effective settings after layering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub token_env: String,
    pub vault: Option<String>,
}

/// How the command picks its vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultSelector {
    Name(String),
    Id(String),
}

impl Settings {
    pub fn resolve(overrides: Overrides, file: FileSettings) -> Result<Self, SettingsError> {
        let endpoint = overrides
            .endpoint
            .or(file.endpoint)
            .filter(|e| !e.trim().is_empty())
            .ok_or(SettingsError::MissingEndpoint)?;
        let token_env = overrides
            .token_env
            .or(file.token_env)
            .unwrap_or_else(|| TOKEN_ENV.to_owned());
        Ok(Self {
            endpoint,
            token_env,
            vault: file.vault,
        })
    }

    /// Pick the vault: an explicit id, then an explicit name, then the
    /// file's default name.
    pub fn vault_selector(
        &self,
        name: Option<String>,
        id: Option<String>,
    ) -> Result<VaultSelector, SettingsError> {
        if let Some(id) = id {
            return Ok(VaultSelector::Id(id));
        }
        name.or_else(|| self.vault.clone())
            .map(VaultSelector::Name)
            .ok_or(SettingsError::MissingVault)
    }
}

/// Return the config path: `$OPCONNECT_CONFIG` or `~/.opconnect/config.toml`.
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".opconnect").join("config.toml")
        })
}

/// Load the config file at `path`. A missing file yields defaults.
pub fn load_file(path: &Path) -> Result<FileSettings, SettingsError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config file at {}", path.display());
            return Ok(FileSettings::default());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };
    parse_file(&contents).map_err(|message| SettingsError::Parse {
        path: path.display().to_string(),
        message,
    })
}

fn parse_file(contents: &str) -> Result<FileSettings, String> {
    toml_edit::de::from_str::<FileSettings>(contents).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_file() {
        let file = parse_file(
            r#"
endpoint = "http://localhost:8080"
token_env = "MY_TOKEN"
vault = "UIO"
"#,
        )
        .unwrap();
        assert_eq!(file.endpoint.as_deref(), Some("http://localhost:8080"));
        assert_eq!(file.token_env.as_deref(), Some("MY_TOKEN"));
        assert_eq!(file.vault.as_deref(), Some("UIO"));
    }

    #[test]
    fn parse_empty_file() {
        assert_eq!(parse_file("").unwrap(), FileSettings::default());
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        let err = parse_file("token = \"inline-secret\"").unwrap_err();
        assert!(err.contains("token"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = load_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(file, FileSettings::default());
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "endpoint = [").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(format!("{err}").contains("config.toml"));
    }

    #[test]
    fn load_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "vault = \"Personal\"\n").unwrap();
        let file = load_file(&path).unwrap();
        assert_eq!(file.vault.as_deref(), Some("Personal"));
    }

    #[test]
    fn flags_override_file() {
        let file = FileSettings {
            endpoint: Some("http://localhost:1".into()),
            token_env: Some("FILE_TOKEN".into()),
            vault: None,
        };
        let overrides = Overrides {
            endpoint: Some("http://localhost:2".into()),
            token_env: None,
        };
        let settings = Settings::resolve(overrides, file).unwrap();
        assert_eq!(settings.endpoint, "http://localhost:2");
        assert_eq!(settings.token_env, "FILE_TOKEN");
    }

    #[test]
    fn token_env_defaults_to_access_token_var() {
        let overrides = Overrides {
            endpoint: Some("http://localhost:8080".into()),
            token_env: None,
        };
        let settings = Settings::resolve(overrides, FileSettings::default()).unwrap();
        assert_eq!(settings.token_env, "OPASSWORD_ACCESS_TOKEN");
    }

    #[test]
    fn missing_endpoint_is_an_error() {
        let err = Settings::resolve(Overrides::default(), FileSettings::default()).unwrap_err();
        assert!(matches!(err, SettingsError::MissingEndpoint));
    }

    #[test]
    fn vault_selector_precedence() {
        let settings = Settings {
            endpoint: "http://localhost:8080".into(),
            token_env: TOKEN_ENV.into(),
            vault: Some("FromFile".into()),
        };
        assert_eq!(
            settings.vault_selector(Some("Flag".into()), Some("id-1".into())).unwrap(),
            VaultSelector::Id("id-1".into())
        );
        assert_eq!(
            settings.vault_selector(Some("Flag".into()), None).unwrap(),
            VaultSelector::Name("Flag".into())
        );
        assert_eq!(
            settings.vault_selector(None, None).unwrap(),
            VaultSelector::Name("FromFile".into())
        );
    }

    #[test]
    fn no_vault_anywhere_is_an_error() {
        let settings = Settings {
            endpoint: "http://localhost:8080".into(),
            token_env: TOKEN_ENV.into(),
            vault: None,
        };
        assert!(matches!(
            settings.vault_selector(None, None),
            Err(SettingsError::MissingVault)
        ));
    }
}
