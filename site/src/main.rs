use anyhow::Context;
use clap::Parser;

use deanwaringdev_lib::{Cli, SiteConfig, SiteModel, logging};
use sitekit_core::{App, AppConfig};
use sitekit_crossterm::CrosstermDriver;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::resolve(&cli).context("loading configuration")?;
    logging::init(&config)?;
    log::info!(
        "starting at {}x{}, breakpoint {}",
        config.width,
        config.height,
        config.breakpoint
    );

    let model = SiteModel::new(config.breakpoint, config.width, config.height);
    let driver = CrosstermDriver::new().with_mouse(config.mouse);
    let mut app = App::new(AppConfig {
        model,
        driver,
        width: config.width,
        height: config.height,
    });
    app.run().context("terminal UI failed")?;
    log::info!("bye");
    Ok(())
}
