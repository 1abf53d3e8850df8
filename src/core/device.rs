//! Device classes and the catalog that maps treatment-unit identities to them.

use crate::core::geometry::{ConsolidationGeometry, HALCYON_DUAL_LAYER_V1};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    #[serde(rename = "millennium-120")]
    Millennium120,
    #[serde(rename = "millennium-120-hd")]
    Millennium120Hd,
    #[serde(rename = "halcyon")]
    Halcyon,
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceClass::Millennium120 => "millennium-120",
            DeviceClass::Millennium120Hd => "millennium-120-hd",
            DeviceClass::Halcyon => "halcyon",
        };
        f.write_str(name)
    }
}

pub const MILLENNIUM_120_WIDTHS: [f64; 60] = [
    14.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, //
    5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, //
    5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, //
    5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, //
    5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, //
    10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 14.0,
];

pub const MILLENNIUM_120_HD_WIDTHS: [f64; 60] = [
    5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, //
    2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, //
    2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, //
    5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0,
];

pub const HALCYON_WIDTHS: [f64; 56] = [5.0; 56];

/// How raw leaf slots map onto the canonical leaf pairs of a profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeafLayout {
    /// One raw slot per leaf pair, reported bottom-to-top.
    Direct,
    /// Dual-layer slots merged into virtual leaf pairs.
    Consolidated(ConsolidationGeometry),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProfile {
    pub class: DeviceClass,
    pub leaf_widths: Arc<[f64]>,
    pub layout: LeafLayout,
}

impl DeviceProfile {
    pub fn direct(class: DeviceClass, leaf_widths: &[f64]) -> Self {
        Self {
            class,
            leaf_widths: Arc::from(leaf_widths),
            layout: LeafLayout::Direct,
        }
    }

    pub fn consolidated(
        class: DeviceClass,
        leaf_widths: &[f64],
        geometry: ConsolidationGeometry,
    ) -> Self {
        Self {
            class,
            leaf_widths: Arc::from(leaf_widths),
            layout: LeafLayout::Consolidated(geometry),
        }
    }

    /// Canonical leaf-pair count L.
    pub fn leaf_pair_count(&self) -> usize {
        self.leaf_widths.len()
    }

    /// Raw slots per bank a control point must report for this profile.
    pub fn expected_raw_slots(&self) -> usize {
        match self.layout {
            LeafLayout::Direct => self.leaf_pair_count(),
            LeafLayout::Consolidated(geometry) => geometry.raw_leaf_slots,
        }
    }
}

/// Fallback classification for identities not listed explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRule {
    pub contains: String,
    pub class: DeviceClass,
}

/// Immutable device table: profiles per class, exact identity lists and
/// substring markers. Membership lists are checked in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceCatalog {
    default_class: DeviceClass,
    profiles: Vec<DeviceProfile>,
    memberships: Vec<(DeviceClass, Vec<String>)>,
    markers: Vec<MarkerRule>,
}

impl DeviceCatalog {
    pub fn new(default_class: DeviceClass) -> Self {
        Self {
            default_class,
            profiles: Vec::new(),
            memberships: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(DeviceClass::Millennium120)
            .with_profile(
                DeviceProfile::direct(DeviceClass::Millennium120Hd, &MILLENNIUM_120_HD_WIDTHS),
                ["Linac3", "Linac4"],
            )
            .with_profile(
                DeviceProfile::consolidated(
                    DeviceClass::Halcyon,
                    &HALCYON_WIDTHS,
                    HALCYON_DUAL_LAYER_V1,
                ),
                ["HalcyonSN1386"],
            )
            .with_profile(
                DeviceProfile::direct(DeviceClass::Millennium120, &MILLENNIUM_120_WIDTHS),
                ["TrueBeamSN4831", "TRILOGY6085", "TR-SN5387"],
            )
            .with_marker("Halcyon", DeviceClass::Halcyon)
    }

    pub fn with_profile<I, S>(mut self, profile: DeviceProfile, machines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let class = profile.class;
        self.profiles.retain(|p| p.class != class);
        self.profiles.push(profile);
        self.memberships
            .push((class, machines.into_iter().map(Into::into).collect()));
        self
    }

    pub fn with_marker(mut self, contains: impl Into<String>, class: DeviceClass) -> Self {
        self.markers.push(MarkerRule {
            contains: contains.into(),
            class,
        });
        self
    }

    pub fn default_class(&self) -> DeviceClass {
        self.default_class
    }

    pub fn profiles(&self) -> &[DeviceProfile] {
        &self.profiles
    }

    pub fn machines(&self, class: DeviceClass) -> impl Iterator<Item = &str> {
        self.memberships
            .iter()
            .filter(move |(c, _)| *c == class)
            .flat_map(|(_, machines)| machines.iter().map(String::as_str))
    }

    /// Exact membership first, then marker rules, then the default class.
    pub fn classify(&self, device_id: &str) -> DeviceClass {
        if let Some((class, _)) = self
            .memberships
            .iter()
            .find(|(_, machines)| machines.iter().any(|m| m == device_id))
        {
            return *class;
        }

        self.markers
            .iter()
            .find(|rule| device_id.contains(rule.contains.as_str()))
            .map(|rule| rule.class)
            .unwrap_or(self.default_class)
    }

    pub fn profile(&self, class: DeviceClass) -> Option<&DeviceProfile> {
        self.profiles.iter().find(|p| p.class == class)
    }
}

impl Default for DeviceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
