use crate::core::device::{
    DeviceCatalog, DeviceClass, DeviceProfile, HALCYON_WIDTHS, MILLENNIUM_120_HD_WIDTHS,
    MILLENNIUM_120_WIDTHS,
};
use crate::core::geometry::{lookup_geometry, HALCYON_DUAL_LAYER_V1};
use crate::utils::error::{ApertureError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Device catalog as written in TOML.
///
/// ```toml
/// default_class = "millennium-120"
///
/// [[profiles]]
/// class = "halcyon"
/// machines = ["HalcyonSN1386"]
/// leaf_widths = [5.0, 5.0]  # one entry per virtual leaf pair
/// consolidation = { name = "halcyon-dual-layer", version = 1 }
///
/// [[markers]]
/// contains = "Halcyon"
/// class = "halcyon"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub default_class: DeviceClass,
    pub profiles: Vec<ProfileConfig>,
    #[serde(default)]
    pub markers: Vec<MarkerConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub class: DeviceClass,
    #[serde(default)]
    pub machines: Vec<String>,
    pub leaf_widths: Vec<f64>,
    pub consolidation: Option<GeometryRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryRef {
    pub name: String,
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub contains: String,
    pub class: DeviceClass,
}

impl CatalogConfig {
    /// Load from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// The built-in device table, in profile-list precedence order.
    pub fn builtin() -> Self {
        let geometry = HALCYON_DUAL_LAYER_V1;
        Self {
            default_class: DeviceClass::Millennium120,
            profiles: vec![
                ProfileConfig {
                    class: DeviceClass::Millennium120Hd,
                    machines: vec!["Linac3".to_string(), "Linac4".to_string()],
                    leaf_widths: MILLENNIUM_120_HD_WIDTHS.to_vec(),
                    consolidation: None,
                },
                ProfileConfig {
                    class: DeviceClass::Halcyon,
                    machines: vec!["HalcyonSN1386".to_string()],
                    leaf_widths: HALCYON_WIDTHS.to_vec(),
                    consolidation: Some(GeometryRef {
                        name: geometry.name.to_string(),
                        version: geometry.version,
                    }),
                },
                ProfileConfig {
                    class: DeviceClass::Millennium120,
                    machines: vec![
                        "TrueBeamSN4831".to_string(),
                        "TRILOGY6085".to_string(),
                        "TR-SN5387".to_string(),
                    ],
                    leaf_widths: MILLENNIUM_120_WIDTHS.to_vec(),
                    consolidation: None,
                },
            ],
            markers: vec![MarkerConfig {
                contains: "Halcyon".to_string(),
                class: DeviceClass::Halcyon,
            }],
        }
    }

    /// Validate and build the immutable catalog.
    pub fn to_catalog(&self) -> Result<DeviceCatalog> {
        self.validate()?;

        let mut catalog = DeviceCatalog::new(self.default_class);
        for profile in &self.profiles {
            let device_profile = match &profile.consolidation {
                Some(geometry) => DeviceProfile::consolidated(
                    profile.class,
                    &profile.leaf_widths,
                    lookup_geometry(&geometry.name, geometry.version)?,
                ),
                None => DeviceProfile::direct(profile.class, &profile.leaf_widths),
            };
            catalog = catalog.with_profile(device_profile, profile.machines.iter().cloned());
        }
        for marker in &self.markers {
            catalog = catalog.with_marker(marker.contains.clone(), marker.class);
        }

        tracing::debug!(
            "Device catalog ready: {} profiles, {} markers, default {}",
            self.profiles.len(),
            self.markers.len(),
            self.default_class
        );
        Ok(catalog)
    }

    fn has_profile(&self, class: DeviceClass) -> bool {
        self.profiles.iter().any(|p| p.class == class)
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_list("profiles", &self.profiles)?;
        validation::validate_unique("profiles.class", self.profiles.iter().map(|p| &p.class))?;
        validation::validate_unique(
            "profiles.machines",
            self.profiles.iter().flat_map(|p| p.machines.iter()),
        )?;

        if !self.has_profile(self.default_class) {
            return Err(ApertureError::InvalidConfigValueError {
                field: "default_class".to_string(),
                value: self.default_class.to_string(),
                reason: "No profile configured for the default class".to_string(),
            });
        }

        for profile in &self.profiles {
            let field = format!("profiles.{}", profile.class);
            validation::validate_leaf_widths(
                &format!("{}.leaf_widths", field),
                &profile.leaf_widths,
            )?;
            for machine in &profile.machines {
                validation::validate_non_empty_string(&format!("{}.machines", field), machine)?;
            }

            if let Some(geometry_ref) = &profile.consolidation {
                let geometry = lookup_geometry(&geometry_ref.name, geometry_ref.version)?;
                if geometry.virtual_leaf_count() != profile.leaf_widths.len() {
                    return Err(ApertureError::InvalidConfigValueError {
                        field: format!("{}.leaf_widths", field),
                        value: profile.leaf_widths.len().to_string(),
                        reason: format!(
                            "Geometry {} v{} defines {} virtual leaf pairs",
                            geometry.name,
                            geometry.version,
                            geometry.virtual_leaf_count()
                        ),
                    });
                }
            }
        }

        for marker in &self.markers {
            validation::validate_non_empty_string("markers.contains", &marker.contains)?;
            if !self.has_profile(marker.class) {
                return Err(ApertureError::InvalidConfigValueError {
                    field: "markers.class".to_string(),
                    value: marker.class.to_string(),
                    reason: "Marker refers to a class with no profile".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config_matches_builtin_catalog() {
        let catalog = CatalogConfig::builtin().to_catalog().unwrap();
        assert_eq!(catalog, DeviceCatalog::builtin());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config = CatalogConfig::from_toml_str(
            r#"
            default_class = "millennium-120"

            [[profiles]]
            class = "millennium-120"
            machines = ["Bench1"]
            leaf_widths = [10.0, 5.0, 10.0]
            "#,
        )
        .unwrap();

        assert!(config.markers.is_empty());
        let catalog = config.to_catalog().unwrap();
        assert_eq!(catalog.classify("Bench1"), DeviceClass::Millennium120);
        let profile = catalog.profile(DeviceClass::Millennium120).unwrap();
        assert_eq!(profile.leaf_widths.to_vec(), vec![10.0, 5.0, 10.0]);
    }

    #[test]
    fn test_unknown_class_is_a_parse_error() {
        let result = CatalogConfig::from_toml_str(
            r#"
            default_class = "agility"
            profiles = []
            "#,
        );
        assert!(matches!(result, Err(ApertureError::TomlError(_))));
    }

    #[test]
    fn test_validation_failures() {
        let mut missing_default = CatalogConfig::builtin();
        missing_default.profiles.retain(|p| p.class != DeviceClass::Millennium120);
        assert!(missing_default.validate().is_err());

        let mut bad_width = CatalogConfig::builtin();
        bad_width.profiles[0].leaf_widths[3] = -1.0;
        assert!(bad_width.validate().is_err());

        let mut short_halcyon = CatalogConfig::builtin();
        short_halcyon.profiles[1].leaf_widths.pop();
        assert!(short_halcyon.validate().is_err());

        let mut duplicate_machine = CatalogConfig::builtin();
        duplicate_machine.profiles[2].machines.push("Linac3".to_string());
        assert!(duplicate_machine.validate().is_err());

        let mut unknown_geometry = CatalogConfig::builtin();
        unknown_geometry.profiles[1].consolidation = Some(GeometryRef {
            name: "halcyon-dual-layer".to_string(),
            version: 9,
        });
        assert!(matches!(
            unknown_geometry.validate(),
            Err(ApertureError::UnknownGeometry { .. })
        ));

        let mut blank_marker = CatalogConfig::builtin();
        blank_marker.markers[0].contains = " ".to_string();
        assert!(blank_marker.validate().is_err());
    }
}
