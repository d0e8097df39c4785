#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod batch;
mod error;
mod extract;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Extract titles and heading outlines from parsed document layouts"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "DOCTOC_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Extract the outline of a single layout dump
    Extract(crate::extract::App),

    /// Process every layout dump in a directory
    Batch(crate::batch::App),
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let app = App::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if app.global.verbose {
        logger.filter_level(log::LevelFilter::Info);
    }
    logger.init();

    match app.command {
        SubCommands::Extract(sub_app) => crate::extract::run(sub_app, app.global),
        SubCommands::Batch(sub_app) => crate::batch::run(sub_app, app.global),
    }
}
