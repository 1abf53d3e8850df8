use crate::core::device::DeviceClass;
use thiserror::Error;

/// Why a beam's device could not be mapped to a leaf-width profile.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("beam has no treatment unit identity")]
    MissingDeviceId,

    #[error("no device profile configured for class {0}")]
    ProfileMissing(DeviceClass),

    #[error("device profile for class {0} has no leaf widths")]
    EmptyProfile(DeviceClass),
}

#[derive(Error, Debug)]
pub enum ApertureError {
    #[error("Unable to obtain leaf widths for beam {beam_id}: {source}")]
    LeafWidthsNotFound {
        beam_id: String,
        #[source]
        source: ResolutionError,
    },

    #[error(
        "Beam {beam_id}, control point {control_point}: expected {expected} leaf slots per bank, got {actual}"
    )]
    LeafCountMismatch {
        beam_id: String,
        control_point: usize,
        expected: usize,
        actual: usize,
    },

    #[error(
        "Beam {beam_id}, control point {control_point}: bank A has {bank_a} leaves but bank B has {bank_b}"
    )]
    BankLengthMismatch {
        beam_id: String,
        control_point: usize,
        bank_a: usize,
        bank_b: usize,
    },

    #[error("Unknown consolidation geometry: {name} v{version}")]
    UnknownGeometry { name: String, version: u32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Device,
    Input,
    Configuration,
    System,
}

impl ApertureError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApertureError::LeafWidthsNotFound { .. } => ErrorCategory::Device,
            ApertureError::LeafCountMismatch { .. } | ApertureError::BankLengthMismatch { .. } => {
                ErrorCategory::Input
            }
            ApertureError::UnknownGeometry { .. }
            | ApertureError::TomlError(_)
            | ApertureError::ConfigError { .. }
            | ApertureError::InvalidConfigValueError { .. }
            | ApertureError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ApertureError::IoError(_) | ApertureError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// The beam an error belongs to, when it was raised at beam granularity.
    pub fn beam_id(&self) -> Option<&str> {
        match self {
            ApertureError::LeafWidthsNotFound { beam_id, .. }
            | ApertureError::LeafCountMismatch { beam_id, .. }
            | ApertureError::BankLengthMismatch { beam_id, .. } => Some(beam_id),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ApertureError::LeafWidthsNotFound { source, .. } => match source {
                ResolutionError::MissingDeviceId => {
                    "Check that the beam record carries its treatment unit identity"
                }
                ResolutionError::ProfileMissing(_) | ResolutionError::EmptyProfile(_) => {
                    "Add a profile with leaf widths for this device class to the catalog"
                }
            },
            ApertureError::LeafCountMismatch { .. } => {
                "Verify the treatment unit is assigned to the correct device class"
            }
            ApertureError::BankLengthMismatch { .. } => {
                "Both leaf banks of a control point must report the same number of leaves"
            }
            ApertureError::UnknownGeometry { .. } => {
                "Use a consolidation geometry name and version known to this build"
            }
            ApertureError::TomlError(_)
            | ApertureError::ConfigError { .. }
            | ApertureError::InvalidConfigValueError { .. }
            | ApertureError::MissingConfigError { .. } => {
                "Review the device catalog configuration file"
            }
            ApertureError::IoError(_) => "Check that the file exists and is readable",
            ApertureError::SerializationError(_) => "Check that the beam input is valid JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, ApertureError>;
