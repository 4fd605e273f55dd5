extern crate env_logger;
#[macro_use]
extern crate log;

use anyhow::Result;
use clap::Parser;

mod boxplot;
mod cli;
mod error;
mod gc_content;
mod metrics;
mod quality;
mod render;

use cli::{Cli, Commands};

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    info!("qcplot v{}", cli::VERSION);

    match &cli.command {
        Commands::Quality {
            input,
            output_prefix,
        } => {
            let table = quality::parse_positional_quality(input)?;

            // mock up a sample per position to summarise as a box
            let samples = boxplot::mock_dataset(&table)?;

            render::quality::box_and_whisker_plot(&samples, output_prefix)?;
        }
        Commands::GcContent {
            input,
            output_prefix,
        } => {
            let distribution = gc_content::parse_gc_content(input)?;

            render::gc_content::gc_content_plot(&distribution, output_prefix)?;
        }
    };

    info!("Completed successfully.");
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
