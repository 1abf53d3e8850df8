use crate::domain::model::Beam;
use crate::utils::error::Result;

/// The external delivery-record source beams are extracted from.
pub trait BeamSource: Send + Sync {
    fn beams(&self) -> Result<Vec<Beam>>;
}

/// Source over beams already loaded by the host application.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBeamSource {
    beams: Vec<Beam>,
}

impl InMemoryBeamSource {
    pub fn new(beams: Vec<Beam>) -> Self {
        Self { beams }
    }
}

impl BeamSource for InMemoryBeamSource {
    fn beams(&self) -> Result<Vec<Beam>> {
        Ok(self.beams.clone())
    }
}
