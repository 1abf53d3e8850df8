use crate::core::device::DeviceCatalog;
use crate::core::jaw::extract_jaw;
use crate::core::leaf_positions::{canonical_leaf_positions, LeafShapeError};
use crate::core::leaf_widths::LeafWidthResolver;
use crate::domain::model::{Aperture, Beam};
use crate::utils::error::{ApertureError, Result};
use std::sync::Arc;

/// Builds one aperture per control point of a beam.
#[derive(Debug, Clone)]
pub struct ApertureAssembler {
    catalog: Arc<DeviceCatalog>,
}

impl ApertureAssembler {
    pub fn new(catalog: Arc<DeviceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &DeviceCatalog {
        &self.catalog
    }

    /// Leaf widths are resolved once and shared by every aperture of the beam.
    /// The first failing control point aborts the whole beam.
    pub fn assemble(&self, beam: &Beam) -> Result<Vec<Aperture>> {
        let profile = LeafWidthResolver::new(&self.catalog).resolve(beam)?;
        tracing::debug!(
            "Beam {} on '{}' resolved to {} ({} leaf pairs)",
            beam.id,
            beam.device_id.as_deref().unwrap_or_default(),
            profile.class,
            profile.leaf_pair_count()
        );

        let apertures = beam
            .control_points
            .iter()
            .enumerate()
            .map(|(position, control_point)| -> Result<Aperture> {
                let control_point_index = control_point.index.unwrap_or(position);
                let leaf_positions =
                    canonical_leaf_positions(&control_point.leaf_positions, profile)
                        .map_err(|e| shape_error(&beam.id, control_point_index, e))?;

                Ok(Aperture {
                    leaf_positions,
                    leaf_widths: Arc::clone(&profile.leaf_widths),
                    jaw: extract_jaw(&control_point.jaw),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Beam {}: assembled {} apertures", beam.id, apertures.len());
        Ok(apertures)
    }
}

impl Default for ApertureAssembler {
    fn default() -> Self {
        Self::new(Arc::new(DeviceCatalog::builtin()))
    }
}

fn shape_error(beam_id: &str, control_point: usize, error: LeafShapeError) -> ApertureError {
    match error {
        LeafShapeError::BankLengthMismatch { bank_a, bank_b } => {
            ApertureError::BankLengthMismatch {
                beam_id: beam_id.to_string(),
                control_point,
                bank_a,
                bank_b,
            }
        }
        LeafShapeError::SlotCountMismatch { expected, actual } => {
            ApertureError::LeafCountMismatch {
                beam_id: beam_id.to_string(),
                control_point,
                expected,
                actual,
            }
        }
    }
}
