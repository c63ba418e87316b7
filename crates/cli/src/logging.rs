use shopcart_core::config::{AppConfig, LogFormat};
use tracing::Level;

/// Installs the global subscriber. Events go to stderr so the menu on stdout
/// is never interleaved with log lines.
pub fn init(config: &AppConfig) {
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(max_level(&config.logging.level))
        .with_writer(std::io::stderr);

    let result = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if let Err(error) = result {
        eprintln!("logging already initialized: {error}");
    }
}

fn max_level(level: &str) -> Level {
    level.trim().parse::<Level>().unwrap_or(Level::WARN)
}
