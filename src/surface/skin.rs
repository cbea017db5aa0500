use tracing::debug;

use crate::description::{DetElement, Detector};
use crate::error::SurfaceError;
use crate::geometry::GeometryStore;
use crate::handle::Volume;

use super::optical::OpticalSurface;
use super::{SkinSurfaceData, SkinSurfaceId};

/// Handle to a registered skin surface.
///
/// A skin surface applies one optical surface description to every
/// boundary of one volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinSurface {
    id: SkinSurfaceId,
}

impl SkinSurface {
    /// Creates the skin surface and registers it with the surface
    /// manager of the detector description.
    ///
    /// The registered name is `<element-path>#<name>`.
    ///
    /// # Errors
    ///
    /// Returns an error, registering nothing, if the detector element is
    /// not connected to the world, the volume is not live in the store,
    /// or the optical surface is not registered.
    pub fn new(
        detector: &mut Detector,
        store: &GeometryStore,
        element: DetElement,
        name: &str,
        surface: OpticalSurface,
        volume: Volume,
    ) -> crate::error::Result<Self> {
        if !element.is_valid(detector) {
            return Err(SurfaceError::UnconnectedDetElement {
                kind: "skin surface",
                name: name.to_owned(),
            }
            .into());
        }
        let full = format!("{}#{name}", element.path(detector)?);
        if !volume.is_valid(store) {
            return Err(SurfaceError::InvalidVolume {
                kind: "skin surface",
                name: full,
            }
            .into());
        }
        if !surface.is_valid(detector) {
            return Err(SurfaceError::InvalidOpticalSurface {
                kind: "skin surface",
                name: full,
            }
            .into());
        }
        let id = detector.surfaces_mut().add_skin(SkinSurfaceData {
            name: full.clone(),
            surface: surface.id(),
            volume: volume.id(),
        })?;
        debug!(surface = %full, "registered skin surface");
        Ok(Self { id })
    }

    /// The underlying registry ID.
    #[must_use]
    pub fn id(&self) -> SkinSurfaceId {
        self.id
    }

    /// The optical surface description applied by this skin surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface is not registered.
    pub fn surface(&self, detector: &Detector) -> crate::error::Result<super::OpticalSurfaceId> {
        Ok(detector.surfaces().skin(self.id)?.surface)
    }

    /// The volume carrying this skin surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface is not registered.
    pub fn volume(&self, detector: &Detector) -> crate::error::Result<Volume> {
        Ok(Volume::from_id(detector.surfaces().skin(self.id)?.volume))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DetgeoError;
    use crate::geometry::{MaterialData, MaterialState, Shape, SolidData};
    use crate::surface::optical::{SurfaceFinish, SurfaceModel, SurfaceType};

    fn fixture() -> (Detector, GeometryStore, Volume, OpticalSurface) {
        let mut det = Detector::new();
        let mut store = GeometryStore::new();
        let solid = store.add_solid(SolidData::new(
            "crystal_shape",
            Shape::Box {
                dx: 1.0,
                dy: 1.0,
                dz: 10.0,
            },
        ));
        let material = store.add_material(MaterialData::new("PbWO4", 8.28, MaterialState::Solid));
        let vol = Volume::new(&mut store, "crystal", solid, material).unwrap();
        let surf = OpticalSurface::new(
            &mut det,
            "crystal_wrap",
            SurfaceModel::Unified,
            SurfaceFinish::Ground,
            SurfaceType::DielectricDielectric,
            1.0,
        )
        .unwrap();
        (det, store, vol, surf)
    }

    #[test]
    fn registers_under_element_path() {
        let (mut det, store, vol, surf) = fixture();
        let calo = det.add_element(det.world(), "calo").unwrap();

        let skin = SkinSurface::new(&mut det, &store, calo, "wrap", surf, vol).unwrap();

        let data = det.surfaces().skin(skin.id()).unwrap();
        assert_eq!(data.name, "/world/calo#wrap");
        assert_eq!(skin.volume(&det).unwrap(), vol);
        assert_eq!(skin.surface(&det).unwrap(), surf.id());
    }

    #[test]
    fn unconnected_element_registers_nothing() {
        let (mut det, store, vol, surf) = fixture();
        // An element from a different description is unknown here.
        let mut other = Detector::new();
        let stray = other.add_element(other.world(), "stray").unwrap();

        let err = SkinSurface::new(&mut det, &store, stray, "wrap", surf, vol);
        match err {
            Err(DetgeoError::Surface(SurfaceError::UnconnectedDetElement { name, .. })) => {
                assert_eq!(name, "wrap");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(det.surfaces().skin_count(), 0);
    }

    #[test]
    fn dead_volume_is_rejected() {
        let (mut det, _, vol, surf) = fixture();
        let calo = det.add_element(det.world(), "calo").unwrap();
        let empty_store = GeometryStore::new();

        let err = SkinSurface::new(&mut det, &empty_store, calo, "wrap", surf, vol);
        match err {
            Err(DetgeoError::Surface(SurfaceError::InvalidVolume { name, .. })) => {
                assert_eq!(name, "/world/calo#wrap");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(det.surfaces().skin_count(), 0);
    }
}
