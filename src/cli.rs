use std::path::PathBuf;

use clap::Parser;

use crate::domain::CourtFamily;
use crate::infrastructure::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "court-catalog",
    version,
    about = "Export the court.gov.ua court registry to CSV"
)]
pub struct Cli {
    #[arg(
        value_name = "OUTPUT",
        help = "CSV file to append to [default: courts.csv]"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "TOML/JSON/YAML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", help = "error, warn, info, debug or trace")]
    pub log_level: Option<String>,

    #[arg(
        long = "family",
        value_name = "FAMILY",
        help = "Only export this family: regional, district or city-district (repeatable)"
    )]
    pub families: Vec<CourtFamily>,
}

impl Cli {
    /// Command line values override file and environment settings
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(output) = &self.output {
            config.output.csv_path.clone_from(output);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}
