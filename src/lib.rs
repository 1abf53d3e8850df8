pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::JsonFileBeamSource, CliConfig};

pub use crate::config::toml_config::CatalogConfig;
pub use crate::core::{
    assembler::ApertureAssembler,
    device::{DeviceCatalog, DeviceClass, DeviceProfile},
    engine::{ApertureEngine, BatchReport},
};
pub use crate::domain::model::{
    Aperture, Beam, BeamApertures, ControlPoint, Jaw, JawPositions, LeafBanks,
};
pub use crate::domain::ports::{BeamSource, InMemoryBeamSource};
pub use crate::utils::error::{ApertureError, ResolutionError, Result};
