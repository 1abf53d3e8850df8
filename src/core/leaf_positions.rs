//! Raw leaf slots to canonical top-to-bottom leaf pairs.
//!
//! The delivery system reports leaf slots bottom-to-top. Direct layouts are
//! simply reversed. Consolidated layouts first merge each virtual leaf's two
//! physical slots, then reverse, closing any pair whose banks have crossed.

use crate::core::device::{DeviceProfile, LeafLayout};
use crate::core::geometry::ConsolidationGeometry;
use crate::domain::model::LeafBanks;

/// Shape problem found in a raw leaf matrix, before beam context is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafShapeError {
    BankLengthMismatch { bank_a: usize, bank_b: usize },
    SlotCountMismatch { expected: usize, actual: usize },
}

/// `canonical[bank][j] = raw[bank][n - 1 - j]`, for any n.
pub fn reverse_leaf_order(raw: &LeafBanks) -> LeafBanks {
    LeafBanks {
        bank_a: raw.bank_a.iter().rev().copied().collect(),
        bank_b: raw.bank_b.iter().rev().copied().collect(),
    }
}

/// Per virtual leaf, in source (bottom-to-top) order: bank A keeps the larger
/// of its two slots, bank B the smaller. Caller guarantees slot indices exist.
///
/// Unordered (NaN) pairs keep the near slot for bank A and the far slot for
/// bank B.
pub fn merge_virtual_pairs(raw: &LeafBanks, geometry: &ConsolidationGeometry) -> LeafBanks {
    let (bank_a, bank_b) = geometry
        .pairs
        .iter()
        .map(|&(near, far)| {
            let (a_near, a_far) = (raw.bank_a[near], raw.bank_a[far]);
            let (b_near, b_far) = (raw.bank_b[near], raw.bank_b[far]);
            (
                if a_near < a_far { a_far } else { a_near },
                if b_near < b_far { b_near } else { b_far },
            )
        })
        .unzip();

    LeafBanks { bank_a, bank_b }
}

/// Merge, reverse to top-to-bottom, and close crossed pairs to `(0, 0)`.
pub fn consolidate(
    raw: &LeafBanks,
    geometry: &ConsolidationGeometry,
) -> Result<LeafBanks, LeafShapeError> {
    check_shape(raw, geometry.raw_leaf_slots)?;

    let merged = merge_virtual_pairs(raw, geometry);
    let (bank_a, bank_b) = merged
        .bank_a
        .iter()
        .zip(&merged.bank_b)
        .rev()
        .map(|(&a, &b)| if a > b { (0.0, 0.0) } else { (a, b) })
        .unzip();

    Ok(LeafBanks { bank_a, bank_b })
}

/// Canonical positions for a control point of a device with `profile`.
pub fn canonical_leaf_positions(
    raw: &LeafBanks,
    profile: &DeviceProfile,
) -> Result<LeafBanks, LeafShapeError> {
    match &profile.layout {
        LeafLayout::Direct => {
            check_shape(raw, profile.leaf_pair_count())?;
            Ok(reverse_leaf_order(raw))
        }
        LeafLayout::Consolidated(geometry) => consolidate(raw, geometry),
    }
}

fn check_shape(raw: &LeafBanks, expected: usize) -> Result<(), LeafShapeError> {
    if raw.bank_a.len() != raw.bank_b.len() {
        return Err(LeafShapeError::BankLengthMismatch {
            bank_a: raw.bank_a.len(),
            bank_b: raw.bank_b.len(),
        });
    }
    if raw.len() != expected {
        return Err(LeafShapeError::SlotCountMismatch {
            expected,
            actual: raw.len(),
        });
    }
    Ok(())
}
