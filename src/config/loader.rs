//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{LogFormat, StorefrontConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to read .env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("Invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a `.env` file from the working directory (or a parent) into the
/// process environment. Variables already set in the process are kept.
///
/// Returns the file that was loaded, or `None` when there is no file.
pub fn load_env_file() -> Result<Option<PathBuf>, ConfigError> {
    env_file_outcome(dotenvy::dotenv())
}

fn env_file_outcome(result: Result<PathBuf, dotenvy::Error>) -> Result<Option<PathBuf>, ConfigError> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(ConfigError::EnvFile(e)),
    }
}

/// Load configuration: defaults, then the optional TOML file, then the
/// environment. The result is validated before it is returned.
///
/// Call [`load_env_file`] first so `.env` entries take part in the
/// environment overlay.
pub fn load_config(path: Option<&Path>) -> Result<StorefrontConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => StorefrontConfig::default(),
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay environment variables onto a configuration.
///
/// `lookup` abstracts `std::env::var` so the mapping can be tested without
/// touching the real process environment.
pub fn apply_env_overrides<F>(config: &mut StorefrontConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let db = &mut config.database;
    if let Some(v) = lookup("DB_SERVER") {
        db.host = v;
    }
    if let Some(v) = lookup("DB_USER") {
        db.user = v;
    }
    if let Some(v) = lookup("DB_PASS") {
        db.password = v;
    }
    if let Some(v) = lookup("DB_NAME") {
        db.name = v;
    }
    if let Some(v) = lookup("DB_PORT") {
        db.port = parse_var("DB_PORT", v)?;
    }
    if let Some(v) = lookup("DB_ENCRYPT") {
        db.encrypt = parse_flag("DB_ENCRYPT", v)?;
    }
    if let Some(v) = lookup("DB_TRUST_SERVER_CERTIFICATE") {
        db.trust_server_certificate = parse_flag("DB_TRUST_SERVER_CERTIFICATE", v)?;
    }
    if let Some(v) = lookup("DB_POOL_SIZE") {
        db.pool_max_size = parse_var("DB_POOL_SIZE", v)?;
    }

    if let Some(v) = lookup("PORT") {
        config.listener.port = parse_var("PORT", v)?;
    }

    if let Some(v) = lookup("LOG_FORMAT") {
        config.observability.log_format = match v.to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => return Err(ConfigError::Env { var: "LOG_FORMAT", value: v }),
        };
    }

    Ok(())
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { var, value })
}

fn parse_flag(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Env { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_env_overrides_database_and_port() {
        let mut config = StorefrontConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("DB_SERVER", "db.internal"),
                ("DB_USER", "shop"),
                ("DB_PASS", "secret"),
                ("DB_NAME", "shopdb"),
                ("DB_PORT", "1433"),
                ("PORT", "8080"),
            ]),
        )
        .unwrap();

        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.user, "shop");
        assert_eq!(config.database.password, "secret");
        assert_eq!(config.database.name, "shopdb");
        assert_eq!(config.database.port, 1433);
        assert_eq!(config.listener.port, 8080);
    }

    #[test]
    fn test_db_port_defaults_to_1434() {
        let mut config = StorefrontConfig::default();
        apply_env_overrides(&mut config, env(&[])).unwrap();
        assert_eq!(config.database.port, 1434);
        assert_eq!(config.listener.port, 3000);
    }

    #[test]
    fn test_bad_port_is_reported() {
        let mut config = StorefrontConfig::default();
        let err = apply_env_overrides(&mut config, env(&[("DB_PORT", "abc")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for DB_PORT: 'abc'");
    }

    #[test]
    fn test_flags_and_log_format() {
        let mut config = StorefrontConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[("DB_ENCRYPT", "false"), ("LOG_FORMAT", "JSON")]),
        )
        .unwrap();
        assert!(!config.database.encrypt);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    fn temp_env_file(contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("storefront-env-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(".env");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_env_file_entries_override_defaults() {
        let path = temp_env_file(
            "# local SQL Server\nDB_SERVER=sql.local\nDB_PASS=\"p@ss word\"\nDB_PORT=1433\nPORT=4000\n",
        );
        let vars: HashMap<String, String> = dotenvy::from_path_iter(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        fs::remove_dir_all(path.parent().unwrap()).unwrap();

        let mut config = StorefrontConfig::default();
        apply_env_overrides(&mut config, |k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.database.host, "sql.local");
        assert_eq!(config.database.password, "p@ss word");
        assert_eq!(config.database.port, 1433);
        assert_eq!(config.listener.port, 4000);
        assert_eq!(config.database.user, StorefrontConfig::default().database.user);
    }

    #[test]
    fn test_missing_env_file_is_not_an_error() {
        let missing = dotenvy::Error::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(env_file_outcome(Err(missing)).unwrap(), None);

        let loaded = PathBuf::from("/srv/storefront/.env");
        assert_eq!(env_file_outcome(Ok(loaded.clone())).unwrap(), Some(loaded));
    }

    #[test]
    fn test_malformed_env_file_is_reported() {
        let bad = dotenvy::Error::LineParse("DB_PASS='open".to_string(), 8);
        let err = env_file_outcome(Err(bad)).unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile(_)));
        assert!(err.to_string().starts_with("Failed to read .env file"));
    }

    #[test]
    fn test_toml_sections_are_optional() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [database]
            host = "sql.example"
            pool_max_size = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.database.host, "sql.example");
        assert_eq!(config.database.pool_max_size, 4);
        assert_eq!(config.database.port, 1434);
        assert_eq!(config.listener.port, 3000);
        assert_eq!(config.security.max_body_size, 2 * 1024 * 1024);
    }

    #[test]
    fn test_partial_security_section() {
        let config: StorefrontConfig = toml::from_str("[security]\n").unwrap();
        assert_eq!(config.security.max_body_size, 2 * 1024 * 1024);

        let config: StorefrontConfig = toml::from_str("[security]\nmax_body_size = 4096\n").unwrap();
        assert_eq!(config.security.max_body_size, 4096);
    }
}
