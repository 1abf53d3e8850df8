use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Two opposing leaf banks. Raw input uses the source's slot order; canonical
/// output is ordered top-to-bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafBanks {
    pub bank_a: Vec<f64>,
    pub bank_b: Vec<f64>,
}

impl LeafBanks {
    pub fn new(bank_a: Vec<f64>, bank_b: Vec<f64>) -> Self {
        Self { bank_a, bank_b }
    }

    pub fn filled(len: usize, a: f64, b: f64) -> Self {
        Self {
            bank_a: vec![a; len],
            bank_b: vec![b; len],
        }
    }

    /// Leaf-pair count, taken from bank A.
    pub fn len(&self) -> usize {
        self.bank_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bank_a.is_empty()
    }
}

/// Raw jaw boundaries in the delivery system's coordinate convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JawPositions {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub leaf_positions: LeafBanks,
    pub jaw: JawPositions,
}

impl ControlPoint {
    pub fn new(leaf_positions: LeafBanks, jaw: JawPositions) -> Self {
        Self {
            index: None,
            leaf_positions,
            jaw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    pub id: String,
    /// Treatment unit identity. Source records may omit it.
    #[serde(default)]
    pub device_id: Option<String>,
    pub control_points: Vec<ControlPoint>,
}

impl Beam {
    pub fn new(id: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            device_id: Some(device_id.into()),
            control_points: Vec::new(),
        }
    }

    pub fn with_control_point(mut self, control_point: ControlPoint) -> Self {
        self.control_points.push(control_point);
        self
    }
}

/// Canonical jaw: vertical axis inverted so `top` is the Y2 edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jaw {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Jaw {
    pub fn to_array(&self) -> [f64; 4] {
        [self.left, self.top, self.right, self.bottom]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aperture {
    pub leaf_positions: LeafBanks,
    /// Shared by every aperture of the same beam.
    pub leaf_widths: Arc<[f64]>,
    pub jaw: Jaw,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamApertures {
    pub beam_id: String,
    pub apertures: Vec<Aperture>,
}
