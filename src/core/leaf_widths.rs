use crate::core::device::{DeviceCatalog, DeviceProfile};
use crate::domain::model::Beam;
use crate::utils::error::{ApertureError, ResolutionError};

pub struct LeafWidthResolver<'a> {
    catalog: &'a DeviceCatalog,
}

impl<'a> LeafWidthResolver<'a> {
    pub fn new(catalog: &'a DeviceCatalog) -> Self {
        Self { catalog }
    }

    /// Profile for a device identity. Any identity classifies to some class,
    /// so failure here only means the catalog cannot serve that class.
    pub fn resolve_device(
        &self,
        device_id: Option<&str>,
    ) -> std::result::Result<&'a DeviceProfile, ResolutionError> {
        let device_id = device_id.ok_or(ResolutionError::MissingDeviceId)?;
        let class = self.catalog.classify(device_id);
        let profile = self
            .catalog
            .profile(class)
            .ok_or(ResolutionError::ProfileMissing(class))?;

        if profile.leaf_widths.is_empty() {
            return Err(ResolutionError::EmptyProfile(class));
        }
        Ok(profile)
    }

    /// Same as [`resolve_device`](Self::resolve_device), with the beam attached
    /// to any failure.
    pub fn resolve(&self, beam: &Beam) -> crate::Result<&'a DeviceProfile> {
        self.resolve_device(beam.device_id.as_deref())
            .map_err(|source| ApertureError::LeafWidthsNotFound {
                beam_id: beam.id.clone(),
                source,
            })
    }
}
