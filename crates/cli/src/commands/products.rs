use shopcart_core::config::AppConfig;
use shopcart_core::Catalog;

use crate::commands::CommandResult;
use crate::render;

pub fn run(config: &AppConfig, catalog: &Catalog, json_output: bool) -> CommandResult {
    if json_output {
        return match serde_json::to_string_pretty(catalog.list()) {
            Ok(output) => CommandResult::raw(output),
            Err(error) => CommandResult::failure(
                "products",
                "serialization",
                format!("failed to serialize catalog: {error}"),
                1,
            ),
        };
    }

    let mut output = String::from("--- Available Products ---\n");
    output.push_str(&render::product_blocks(catalog.list(), &config.shop.currency_label));
    CommandResult::raw(output.trim_end().to_string())
}
