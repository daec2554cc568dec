mod app;
mod client;
mod commands;
mod config;
mod image;
mod media;
mod messages;
mod prompts;
mod script;
mod session;
mod speech;

use app::App;
use config::Config;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Starting channelkit content assistant");

    // Load configuration
    let config = Config::load()?;
    config.validate()?;

    let app = App::new(config)?;
    app.run().await?;

    tracing::info!("channelkit shutdown complete");
    Ok(())
}
