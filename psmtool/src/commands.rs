use super::{IOArgs, MeterArgs, OutputArgs};
use clap::Subcommand;
use std::path::PathBuf;

mod analyze;

#[derive(Subcommand)]
pub enum Commands {
    /// Analyse every product of a survey export and report its price points
    Analyze {
        #[command(flatten)]
        io: IOArgs,

        /// Additionally write one `<product>.json` per product into this directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        flags: MeterArgs,
    },

    /// Write the JSON schema of the analysis report
    Schema {
        #[command(flatten)]
        output: OutputArgs,
    },
}
