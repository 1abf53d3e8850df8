//! Consolidation geometries for dual-layer collimators.
//!
//! Some devices report more raw leaf slots than the virtual leaf pairs an
//! aperture is described with. Each virtual leaf straddles two physical leaves,
//! one from the proximal ("near") layer and one from the distal ("far") layer.
//! A geometry lists that `(near, far)` raw-slot pairing per virtual leaf, in
//! the source's bottom-to-top order.

use crate::utils::error::{ApertureError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsolidationGeometry {
    pub name: &'static str,
    pub version: u32,
    /// Slots per bank the raw matrix must carry.
    pub raw_leaf_slots: usize,
    pub pairs: &'static [(usize, usize)],
}

impl ConsolidationGeometry {
    pub fn virtual_leaf_count(&self) -> usize {
        self.pairs.len()
    }
}

/// Halcyon: 28 proximal slots followed by the distal layer starting at slot 28.
#[rustfmt::skip]
pub const HALCYON_DUAL_LAYER_V1: ConsolidationGeometry = ConsolidationGeometry {
    name: "halcyon-dual-layer",
    version: 1,
    raw_leaf_slots: 58,
    pairs: &[
        (0, 28), (0, 29), (1, 29), (1, 30), (2, 30), (2, 31), (3, 31), (3, 32),
        (4, 32), (4, 33), (5, 33), (5, 34), (6, 34), (6, 35), (7, 35), (7, 36),
        (8, 36), (8, 37), (9, 37), (9, 38), (10, 38), (10, 39), (11, 39), (11, 40),
        (12, 40), (12, 41), (13, 41), (13, 42), (14, 42), (14, 43), (15, 43), (15, 44),
        (16, 44), (16, 45), (17, 45), (17, 46), (18, 46), (18, 47), (19, 47), (19, 48),
        (20, 48), (20, 49), (21, 49), (21, 50), (22, 50), (22, 51), (23, 51), (23, 52),
        (24, 52), (24, 53), (25, 53), (25, 54), (26, 54), (26, 55), (27, 55), (27, 56),
    ],
};

const KNOWN_GEOMETRIES: &[ConsolidationGeometry] = &[HALCYON_DUAL_LAYER_V1];

pub fn lookup_geometry(name: &str, version: u32) -> Result<ConsolidationGeometry> {
    KNOWN_GEOMETRIES
        .iter()
        .find(|g| g.name == name && g.version == version)
        .copied()
        .ok_or_else(|| ApertureError::UnknownGeometry {
            name: name.to_string(),
            version,
        })
}
