#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::{ApertureError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "mlc-aperture")]
#[command(about = "Normalize MLC control points into apertures")]
pub struct CliConfig {
    /// JSON file with one beam or an array of beams
    #[arg(long)]
    pub beams: PathBuf,

    /// TOML device catalog; the built-in catalog is used when omitted
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Write apertures here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Pretty-print the JSON output")]
    pub pretty: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.output.as_ref() == Some(&self.beams) {
            return Err(ApertureError::InvalidConfigValueError {
                field: "output".to_string(),
                value: self.beams.display().to_string(),
                reason: "Output would overwrite the beam input".to_string(),
            });
        }
        Ok(())
    }
}
