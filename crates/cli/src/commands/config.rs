use std::env;
use std::fs;
use std::path::Path;

use shopcart_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

pub fn run(options: LoadOptions) -> String {
    let config_file_path = resolve_config_path(options.config_path.as_deref());
    let store_name_flag = options.overrides.store_name.is_some();
    let catalog_flag = options.overrides.catalog_path.is_some();
    let log_format_flag = options.overrides.log_format.is_some();

    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let mut lines =
        vec!["effective config (source precedence: flag > env > file > default):".to_string()];

    let store_name_source = if store_name_flag {
        "flag (--store-name)".to_string()
    } else {
        source("shop.store_name", &["SHOPCART_SHOP_STORE_NAME"])
    };
    lines.push(render_line("shop.store_name", &config.shop.store_name, store_name_source));
    lines.push(render_line(
        "shop.currency_label",
        &config.shop.currency_label,
        source("shop.currency_label", &["SHOPCART_SHOP_CURRENCY_LABEL"]),
    ));

    let catalog_path = config
        .shop
        .catalog_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<built-in sample>".to_string());
    let catalog_source = if catalog_flag {
        "flag (--catalog)".to_string()
    } else {
        source("shop.catalog_path", &["SHOPCART_SHOP_CATALOG_PATH"])
    };
    lines.push(render_line("shop.catalog_path", &catalog_path, catalog_source));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source("logging.level", &["SHOPCART_LOGGING_LEVEL", "SHOPCART_LOG_LEVEL"]),
    ));
    let log_format_source = if log_format_flag {
        "flag (--log-format)".to_string()
    } else {
        source("logging.format", &["SHOPCART_LOGGING_FORMAT", "SHOPCART_LOG_FORMAT"])
    };
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        log_format_source,
    ));

    lines.join("\n")
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) =
        env_keys.iter().find(|key| env::var(key).is_ok_and(|value| !value.trim().is_empty()))
    {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
