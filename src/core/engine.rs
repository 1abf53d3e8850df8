use crate::core::assembler::ApertureAssembler;
use crate::domain::model::BeamApertures;
use crate::domain::ports::BeamSource;
use crate::utils::error::{ApertureError, Result};

#[derive(Debug)]
pub struct BeamFailure {
    pub beam_id: String,
    pub error: ApertureError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub completed: Vec<BeamApertures>,
    pub failures: Vec<BeamFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn aperture_count(&self) -> usize {
        self.completed.iter().map(|b| b.apertures.len()).sum()
    }
}

pub struct ApertureEngine<S: BeamSource> {
    source: S,
    assembler: ApertureAssembler,
}

impl<S: BeamSource> ApertureEngine<S> {
    pub fn new(source: S, assembler: ApertureAssembler) -> Self {
        Self { source, assembler }
    }

    /// A source failure aborts the run. A beam failure only drops that beam.
    pub fn run(&self) -> Result<BatchReport> {
        tracing::info!("Extracting beams...");
        let beams = self.source.beams()?;
        tracing::info!("Extracted {} beams", beams.len());

        let mut report = BatchReport::default();
        for beam in &beams {
            match self.assembler.assemble(beam) {
                Ok(apertures) => report.completed.push(BeamApertures {
                    beam_id: beam.id.clone(),
                    apertures,
                }),
                Err(error) => {
                    tracing::warn!("Beam {} skipped: {}", beam.id, error);
                    report.failures.push(BeamFailure {
                        beam_id: beam.id.clone(),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            "Built {} apertures for {} beams ({} failed)",
            report.aperture_count(),
            report.completed.len(),
            report.failures.len()
        );
        Ok(report)
    }
}
