use crate::error::GeometryError;
use crate::extension::VolumeExtension;
use crate::geometry::{GeometryStore, MaterialId, VolumeData, VolumeKind};

use super::volume::Volume;

/// Handle to a division volume.
///
/// Division volumes are the product of [`Volume::divide`]; they share
/// one section solid across all their placements. This handle only
/// certifies the classification; all operations live on the wrapped
/// [`Volume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeMulti {
    vol: Volume,
}

impl VolumeMulti {
    /// Creates a new, empty division volume and attaches its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the material is not found in the store.
    pub fn new(
        store: &mut GeometryStore,
        name: &str,
        material: MaterialId,
    ) -> crate::error::Result<Self> {
        store.material(material)?;
        let id = store.add_volume(VolumeData::new(
            name,
            None,
            Some(material),
            VolumeKind::Division,
        ));
        store.attach_volume_extension(id, VolumeExtension::new())?;
        Ok(Self {
            vol: Volume::from_id(id),
        })
    }

    /// Certifies that a volume is a division volume and wraps it.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume is dead or not a division volume.
    pub fn from_volume(store: &GeometryStore, vol: Volume) -> crate::error::Result<Self> {
        let data = store.volume(vol.id())?;
        if data.kind != VolumeKind::Division {
            return Err(GeometryError::InvalidDivision(format!(
                "volume '{}' is not a division volume",
                data.name
            ))
            .into());
        }
        Ok(Self { vol })
    }

    /// The wrapped volume handle.
    #[must_use]
    pub fn as_volume(&self) -> Volume {
        self.vol
    }
}

impl From<VolumeMulti> for Volume {
    fn from(multi: VolumeMulti) -> Self {
        multi.vol
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DetgeoError;
    use crate::geometry::{MaterialData, MaterialState, Shape, SolidData};

    #[test]
    fn regular_volume_is_not_a_division() {
        let mut store = GeometryStore::new();
        let solid = store.add_solid(SolidData::new(
            "s",
            Shape::Box {
                dx: 1.0,
                dy: 1.0,
                dz: 1.0,
            },
        ));
        let material = store.add_material(MaterialData::new("Iron", 7.87, MaterialState::Solid));
        let vol = Volume::new(&mut store, "plain", solid, material).unwrap();

        let err = VolumeMulti::from_volume(&store, vol);
        assert!(matches!(
            err,
            Err(DetgeoError::Geometry(GeometryError::InvalidDivision(_)))
        ));
    }

    #[test]
    fn fresh_multi_is_instrumented() {
        let mut store = GeometryStore::new();
        let material = store.add_material(MaterialData::new("Iron", 7.87, MaterialState::Solid));
        let multi = VolumeMulti::new(&mut store, "wheel_sections", material).unwrap();

        assert!(store.is_volume_instrumented(multi.as_volume().id()).unwrap());
        assert!(VolumeMulti::from_volume(&store, multi.as_volume()).is_ok());
    }
}
