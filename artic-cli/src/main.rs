mod app;
mod command;
mod error;
mod paths;
mod render;
mod settings;

use std::fs::File;
use std::sync::Arc;

use artic_lib::ArticClient;
use artic_lib::retry::RetryConfig;
use artic_lib::session::BrowseSession;
use clap::Parser;
use simplelog::Config;
use simplelog::WriteLogger;

use crate::app::App;
use crate::error::CliError;
use crate::settings::Settings;

fn init_logging(settings: &Settings) -> Result<(), CliError> {
    let path = paths::log_file();
    let log_file = File::create(&path)?;
    WriteLogger::init(settings.log_level(), Config::default(), log_file)?;
    log::info!("logging to {}", path.display());
    Ok(())
}

fn build_client(settings: &Settings) -> Result<ArticClient, CliError> {
    let mut builder = ArticClient::builder()
        .base_url(settings.base_url.clone())
        .retry(RetryConfig::default().max_retries(settings.retries));
    builder = match settings.timeout() {
        Some(timeout) => builder.timeout(timeout),
        None => builder.no_timeout(),
    };
    Ok(builder.build()?)
}

async fn run(settings: Settings) -> Result<(), CliError> {
    init_logging(&settings)?;

    let client = build_client(&settings)?;
    log::info!("starting with {:?}", client);

    let session = BrowseSession::new(settings.page_size).map_err(artic_lib::error::Error::from)?;
    App::new(Arc::new(client), session).run().await
}

#[tokio::main]
async fn main() {
    let settings = Settings::parse();

    if let Err(e) = run(settings).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
