use tracing::debug;

use crate::description::{DetElement, Detector};
use crate::error::SurfaceError;
use crate::geometry::GeometryStore;
use crate::handle::PlacedVolume;

use super::optical::OpticalSurface;
use super::{BorderSurfaceData, BorderSurfaceId};

/// Handle to a registered border surface.
///
/// A border surface applies one optical surface description to the
/// boundary between two specific placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSurface {
    id: BorderSurfaceId,
}

impl BorderSurface {
    /// Creates the border surface and registers it with the surface
    /// manager of the detector description.
    ///
    /// The registered name is `<element-path>#<name>`.
    ///
    /// # Errors
    ///
    /// Returns an error, registering nothing, if the detector element is
    /// not connected to the world, either placement is not live in the
    /// store, or the optical surface is not registered.
    pub fn new(
        detector: &mut Detector,
        store: &GeometryStore,
        element: DetElement,
        name: &str,
        surface: OpticalSurface,
        left: PlacedVolume,
        right: PlacedVolume,
    ) -> crate::error::Result<Self> {
        if !element.is_valid(detector) {
            return Err(SurfaceError::UnconnectedDetElement {
                kind: "border surface",
                name: name.to_owned(),
            }
            .into());
        }
        let full = format!("{}#{name}", element.path(detector)?);
        if !left.is_valid(store) || !right.is_valid(store) {
            return Err(SurfaceError::InvalidPlacement {
                kind: "border surface",
                name: full,
            }
            .into());
        }
        if !surface.is_valid(detector) {
            return Err(SurfaceError::InvalidOpticalSurface {
                kind: "border surface",
                name: full,
            }
            .into());
        }
        let id = detector.surfaces_mut().add_border(BorderSurfaceData {
            name: full.clone(),
            surface: surface.id(),
            left: left.id(),
            right: right.id(),
        })?;
        debug!(surface = %full, "registered border surface");
        Ok(Self { id })
    }

    /// The underlying registry ID.
    #[must_use]
    pub fn id(&self) -> BorderSurfaceId {
        self.id
    }

    /// The optical surface description applied by this border surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface is not registered.
    pub fn surface(&self, detector: &Detector) -> crate::error::Result<super::OpticalSurfaceId> {
        Ok(detector.surfaces().border(self.id)?.surface)
    }

    /// Placement on the incident side.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface is not registered.
    pub fn left(&self, detector: &Detector) -> crate::error::Result<PlacedVolume> {
        Ok(PlacedVolume::from_id(detector.surfaces().border(self.id)?.left))
    }

    /// Placement on the far side.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface is not registered.
    pub fn right(&self, detector: &Detector) -> crate::error::Result<PlacedVolume> {
        Ok(PlacedVolume::from_id(detector.surfaces().border(self.id)?.right))
    }
}
