pub mod checkout;
pub mod config;
pub mod products;
pub mod shop;

use serde::Serialize;
use shopcart_core::config::{AppConfig, LoadOptions};
use shopcart_core::{ApplicationError, Catalog, InterfaceError};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_interface(command: &str, error: &InterfaceError) -> Self {
        Self::failure(command, error.error_class(), error.message(), error.exit_code())
    }

    pub fn raw(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }
}

pub fn load_config(command: &str, options: LoadOptions) -> Result<AppConfig, CommandResult> {
    AppConfig::load(options).map_err(|error| {
        let error = InterfaceError::from(ApplicationError::from(error));
        CommandResult::from_interface(command, &error)
    })
}

/// Catalog named by `shop.catalog_path`, or the built-in sample when unset.
pub fn load_catalog(command: &str, config: &AppConfig) -> Result<Catalog, CommandResult> {
    let Some(path) = &config.shop.catalog_path else {
        debug!(event_name = "shop.catalog.sample_selected", "using built-in sample catalog");
        return Ok(Catalog::sample());
    };

    Catalog::from_toml_file(path).map_err(|error| {
        let error = InterfaceError::from(ApplicationError::from(error));
        CommandResult::from_interface(command, &error)
    })
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
