mod compare;
mod config;
mod errors;
mod file_ops;
mod hashers;
mod models;
mod session;

use anyhow::Result;
use log::info;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::io;

use config::Settings;
use session::Session;

fn setup_logging(settings: &Settings) -> Result<()> {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_location_level(LevelFilter::Debug)
        .build();

    TermLogger::init(
        settings.log_level,
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env();
    setup_logging(&settings)?;
    info!("hashcheck starting, log level {}", settings.log_level);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), settings);
    session.run().await
}
