use crate::core::{Beam, BeamSource};
use crate::utils::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// A beam file holds either one beam object or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum BeamDocument {
    Many(Vec<Beam>),
    One(Beam),
}

#[derive(Debug, Clone)]
pub struct JsonFileBeamSource {
    path: PathBuf,
}

impl JsonFileBeamSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(data: &[u8]) -> Result<Vec<Beam>> {
        let beams = match serde_json::from_slice::<BeamDocument>(data)? {
            BeamDocument::Many(beams) => beams,
            BeamDocument::One(beam) => vec![beam],
        };
        Ok(beams)
    }
}

impl BeamSource for JsonFileBeamSource {
    fn beams(&self) -> Result<Vec<Beam>> {
        tracing::debug!("Reading beams from {}", self.path.display());
        let data = fs::read(&self.path)?;
        Self::parse(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ApertureError;

    const SINGLE_BEAM: &str = r#"{
        "id": "Arc 1",
        "device_id": "Linac4",
        "control_points": [
            {
                "leaf_positions": { "bank_a": [-1.0, -2.0], "bank_b": [1.0, 2.0] },
                "jaw": { "x1": -5.0, "x2": 5.0, "y1": -3.0, "y2": 3.0 }
            }
        ]
    }"#;

    #[test]
    fn test_parse_single_beam_and_array() {
        let one = JsonFileBeamSource::parse(SINGLE_BEAM.as_bytes()).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].device_id.as_deref(), Some("Linac4"));
        assert_eq!(one[0].control_points[0].index, None);

        let array = format!("[{0}, {0}]", SINGLE_BEAM);
        let many = JsonFileBeamSource::parse(array.as_bytes()).unwrap();
        assert_eq!(many.len(), 2);
    }

    #[test]
    fn test_missing_device_id_is_allowed_at_parse_time() {
        let beams = JsonFileBeamSource::parse(br#"{"id": "B", "control_points": []}"#).unwrap();
        assert_eq!(beams[0].device_id, None);
    }

    #[test]
    fn test_read_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("beams.json");
        fs::write(&path, SINGLE_BEAM).unwrap();

        let beams = JsonFileBeamSource::new(&path).beams().unwrap();
        assert_eq!(beams[0].id, "Arc 1");

        let missing = JsonFileBeamSource::new(dir.path().join("nope.json")).beams();
        assert!(matches!(missing, Err(ApertureError::IoError(_))));
    }
}
