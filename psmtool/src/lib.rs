use clap::Parser;
use std::{io::Write as _, path::PathBuf};

mod io;
pub use io::*;

mod commands;
pub use commands::*;

mod config;
pub use config::{AppConfig, AxisKind, IntersectionMethod, MeterArgs, PairingFlag, ReportConfig};

mod report;
pub use report::*;

pub mod survey;

// The top-level arguments: an optional configuration file and the subcommand to execute
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// A TOML configuration file, layered between the defaults and the environment
    #[arg(short, long, global = true, env = "PSM_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub async fn evaluate(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Analyze {
                io,
                output_dir,
                flags,
            } => {
                let config = AppConfig::load(self.config.as_deref())?.with_overrides(&flags)?;

                let blocks = survey::read_survey(io.read()?)?;
                let analyses = config.intersection.analyze(config.meter, blocks).await?;

                let report = Report {
                    config,
                    products: analyses
                        .into_iter()
                        .map(|(block, analysis)| {
                            ProductReport::new(block, analysis, config.report.include_curves)
                        })
                        .collect(),
                };

                if let Some(dir) = output_dir {
                    report.write_products(&dir)?;
                }

                let mut output = io.write()?;
                serde_json::to_writer_pretty(&mut output, &report)?;
                output.flush()?;
            }
            Commands::Schema { output } => {
                let schema = schemars::schema_for!(Report);
                let mut output = output.write()?;
                serde_json::to_writer_pretty(&mut output, &schema)?;
                output.flush()?;
            }
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CliError {
    #[error("--grid-points cannot be combined with --axis observed")]
    GridPointsWithObserved,
}
