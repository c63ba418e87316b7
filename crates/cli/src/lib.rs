pub mod commands;
pub mod logging;
pub mod render;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shopcart_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};
use shopcart_core::{Catalog, ShopSession};
use tracing::info;

use crate::commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "shopcart",
    about = "Shopping catalog and cart console",
    long_about = "Browse the product catalog, fill a cart and check out from an interactive menu, or run one-shot catalog and checkout commands.",
    after_help = "Examples:\n  shopcart\n  shopcart products --json\n  shopcart checkout 1 2\n  shopcart --catalog catalog.toml shop"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a shopcart.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Load products from a TOML catalog file instead of the sample")]
    catalog: Option<PathBuf>,
    #[arg(long, global = true, help = "Store name shown in the menu header")]
    store_name: Option<String>,
    #[arg(long, global = true, value_name = "FORMAT", help = "Log format: compact, pretty or json")]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Start the interactive shopping menu (default)")]
    Shop,
    #[command(about = "List catalog products")]
    Products {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Add the given product IDs to a fresh cart and check out")]
    Checkout {
        #[arg(
            value_name = "ID",
            allow_hyphen_values = true,
            help = "Product IDs; repeat an ID to buy it more than once"
        )]
        ids: Vec<String>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: false,
            overrides: ConfigOverrides {
                store_name: self.store_name.clone(),
                catalog_path: self.catalog.clone(),
                log_format: self.log_format,
                ..ConfigOverrides::default()
            },
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = cli.load_options();

    let result = match cli.command.unwrap_or(Command::Shop) {
        Command::Config => CommandResult::raw(commands::config::run(options)),
        Command::Shop => with_catalog("shop", options, run_interactive),
        Command::Products { json } => with_catalog("products", options, |config, catalog| {
            commands::products::run(config, &catalog, json)
        }),
        Command::Checkout { ids } => with_catalog("checkout", options, |config, catalog| {
            commands::checkout::run(config, catalog, &ids)
        }),
    };

    if !result.output.is_empty() {
        println!("{}", result.output);
    }
    ExitCode::from(result.exit_code)
}

fn with_catalog(
    command: &str,
    options: LoadOptions,
    run_command: impl FnOnce(&AppConfig, Catalog) -> CommandResult,
) -> CommandResult {
    let config = match commands::load_config(command, options) {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    logging::init(&config);

    match commands::load_catalog(command, &config) {
        Ok(catalog) => run_command(&config, catalog),
        Err(failure) => failure,
    }
}

fn run_interactive(config: &AppConfig, catalog: Catalog) -> CommandResult {
    info!(
        event_name = "shop.session.started",
        product_count = catalog.len(),
        "interactive session started"
    );
    let mut session = ShopSession::new(catalog);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let outcome = commands::shop::run(&mut session, &config.shop, stdin.lock(), &mut stdout)
        .context("interactive console I/O failed");
    drop(session);
    info!(event_name = "shop.session.ended", "interactive session ended");

    match outcome {
        Ok(()) => CommandResult::raw(String::new()),
        Err(error) => CommandResult::failure("shop", "console_io", format!("{error:#}"), 1),
    }
}
