use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::ApplicationError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub shop: ShopConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ShopConfig {
    pub store_name: String,
    pub currency_label: String,
    pub catalog_path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub store_name: Option<String>,
    pub currency_label: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl From<ConfigError> for ApplicationError {
    fn from(value: ConfigError) -> Self {
        Self::Configuration(value.to_string())
    }
}

pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["shopcart.toml", "config/shopcart.toml"];

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shop: ShopConfig {
                store_name: "ONLINE SHOPPING SYSTEM".to_string(),
                currency_label: "Shs".to_string(),
                catalog_path: None,
            },
            logging: LoggingConfig { level: "warn".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file || options.config_path.is_some() {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATHS[0]));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.normalize();
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(shop) = patch.shop {
            if let Some(store_name) = shop.store_name {
                self.shop.store_name = store_name;
            }
            if let Some(currency_label) = shop.currency_label {
                self.shop.currency_label = currency_label;
            }
            if let Some(catalog_path) = shop.catalog_path {
                self.shop.catalog_path = Some(catalog_path);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("SHOPCART_SHOP_STORE_NAME") {
            self.shop.store_name = value;
        }
        if let Some(value) = read_env("SHOPCART_SHOP_CURRENCY_LABEL") {
            self.shop.currency_label = value;
        }
        if let Some(value) = read_env("SHOPCART_SHOP_CATALOG_PATH") {
            self.shop.catalog_path = Some(PathBuf::from(value));
        }

        let log_level =
            read_env("SHOPCART_LOGGING_LEVEL").or_else(|| read_env("SHOPCART_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("SHOPCART_LOGGING_FORMAT").or_else(|| read_env("SHOPCART_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse().map_err(|_| ConfigError::InvalidEnvOverride {
                key: "SHOPCART_LOGGING_FORMAT".to_string(),
                value,
            })?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(store_name) = overrides.store_name {
            self.shop.store_name = store_name;
        }
        if let Some(currency_label) = overrides.currency_label {
            self.shop.currency_label = currency_label;
        }
        if let Some(catalog_path) = overrides.catalog_path {
            self.shop.catalog_path = Some(catalog_path);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    /// Level names are stored in the lowercase form the log filter parses.
    fn normalize(&mut self) {
        self.logging.level = self.logging.level.trim().to_ascii_lowercase();
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_shop(&self.shop)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    DEFAULT_CONFIG_PATHS.into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_shop(shop: &ShopConfig) -> Result<(), ConfigError> {
    if shop.store_name.trim().is_empty() {
        return Err(ConfigError::Validation("shop.store_name must not be empty".to_string()));
    }

    if shop.currency_label.trim().is_empty() {
        return Err(ConfigError::Validation(
            "shop.currency_label must not be empty (e.g. `Shs`, `USD`)".to_string(),
        ));
    }

    if let Some(path) = &shop.catalog_path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "shop.catalog_path must point to a TOML catalog file when set".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    shop: Option<ShopPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ShopPatch {
    store_name: Option<String>,
    currency_label: Option<String>,
    catalog_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    const SHOPCART_VARS: [&str; 7] = [
        "SHOPCART_SHOP_STORE_NAME",
        "SHOPCART_SHOP_CURRENCY_LABEL",
        "SHOPCART_SHOP_CATALOG_PATH",
        "SHOPCART_LOGGING_LEVEL",
        "SHOPCART_LOGGING_FORMAT",
        "SHOPCART_LOG_LEVEL",
        "SHOPCART_LOG_FORMAT",
    ];

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_match_the_sample_shop() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&SHOPCART_VARS);

        let config = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.shop.store_name == "ONLINE SHOPPING SYSTEM", "default store name")?;
        ensure(config.shop.currency_label == "Shs", "default currency label")?;
        ensure(config.shop.catalog_path.is_none(), "sample catalog is the default")?;
        ensure(config.logging.level == "warn", "default log level")?;
        ensure(matches!(config.logging.format, LogFormat::Compact), "default log format")
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&SHOPCART_VARS);

        env::set_var("TEST_SHOPCART_CURRENCY", "KES");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("shopcart.toml");
            fs::write(
                &path,
                r#"
[shop]
currency_label = "${TEST_SHOPCART_CURRENCY}"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.shop.currency_label == "KES",
                "currency label should be interpolated from environment",
            )
        })();

        clear_vars(&["TEST_SHOPCART_CURRENCY"]);
        result
    }

    #[test]
    fn missing_interpolation_variable_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&SHOPCART_VARS);
        env::remove_var("TEST_SHOPCART_UNSET");

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("shopcart.toml");
        fs::write(&path, "[shop]\nstore_name = \"${TEST_SHOPCART_UNSET}\"\n")
            .map_err(|err| err.to_string())?;

        let result =
            AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() });
        ensure(
            matches!(
                result,
                Err(ConfigError::MissingEnvInterpolation { ref var }) if var == "TEST_SHOPCART_UNSET"
            ),
            "unset interpolation variable should fail the load",
        )
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&SHOPCART_VARS);

        env::set_var("SHOPCART_LOG_LEVEL", "debug");
        env::set_var("SHOPCART_LOG_FORMAT", "json");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "debug", "debug log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Json),
                "json logging format should be set from env var",
            )
        })();

        clear_vars(&SHOPCART_VARS);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&SHOPCART_VARS);

        env::set_var("SHOPCART_SHOP_CURRENCY_LABEL", "USD");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("shopcart.toml");
            fs::write(
                &path,
                r#"
[shop]
store_name = "Corner Shop"
currency_label = "EUR"
catalog_path = "catalog.toml"

[logging]
level = "info"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    log_level: Some("error".to_string()),
                    log_format: Some(LogFormat::Pretty),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.shop.store_name == "Corner Shop", "file store name should apply")?;
            ensure(config.shop.currency_label == "USD", "env currency should win over file")?;
            ensure(
                config.shop.catalog_path == Some(PathBuf::from("catalog.toml")),
                "file catalog path should apply",
            )?;
            ensure(config.logging.level == "error", "override log level should win")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "override log format should win",
            )
        })();

        clear_vars(&SHOPCART_VARS);
        result
    }

    #[test]
    fn explicit_missing_config_file_fails() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&SHOPCART_VARS);

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("nope.toml");

        let result =
            AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() });
        ensure(
            matches!(result, Err(ConfigError::MissingConfigFile(_))),
            "an explicitly named config file must exist",
        )
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&SHOPCART_VARS);

        let result = AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                currency_label: Some("  ".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        });

        ensure(
            matches!(
                result,
                Err(ConfigError::Validation(ref message)) if message.contains("shop.currency_label")
            ),
            "validation failure should mention shop.currency_label",
        )
    }

    #[test]
    fn invalid_log_format_env_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&SHOPCART_VARS);
        env::set_var("SHOPCART_LOGGING_FORMAT", "xml");

        let result = AppConfig::load(LoadOptions::default());
        clear_vars(&SHOPCART_VARS);

        ensure(
            matches!(
                result,
                Err(ConfigError::InvalidEnvOverride { ref key, ref value })
                    if key == "SHOPCART_LOGGING_FORMAT" && value == "xml"
            ),
            "unsupported log format should be reported with its env key",
        )
    }

    #[test]
    fn invalid_log_level_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&SHOPCART_VARS);

        let result = AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                log_level: Some("loud".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        });

        ensure(
            matches!(result, Err(ConfigError::Validation(ref message)) if message.contains("logging.level")),
            "validation failure should mention logging.level",
        )
    }

    #[test]
    fn store_name_override_wins_over_env() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&SHOPCART_VARS);
        env::set_var("SHOPCART_SHOP_STORE_NAME", "Env Shop");

        let result = AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                store_name: Some("Flag Shop".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        });
        clear_vars(&SHOPCART_VARS);

        let config = result.map_err(|err| format!("config load failed: {err}"))?;
        ensure(config.shop.store_name == "Flag Shop", "override store name should win")
    }

    #[test]
    fn log_level_is_stored_normalized() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&SHOPCART_VARS);
        env::set_var("SHOPCART_LOG_LEVEL", " Debug ");

        let result = AppConfig::load(LoadOptions::default());
        clear_vars(&SHOPCART_VARS);

        let config = result.map_err(|err| format!("config load failed: {err}"))?;
        ensure(config.logging.level == "debug", "level should be trimmed and lowercased")
    }
}
