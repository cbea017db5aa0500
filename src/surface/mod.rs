pub mod border;
pub mod optical;
pub mod skin;

pub use border::BorderSurface;
pub use optical::{OpticalSurface, SurfaceFinish, SurfaceModel, SurfaceType};
pub use skin::SkinSurface;

use slotmap::SlotMap;

use crate::error::{GeometryError, SurfaceError};
use crate::geometry::{NodeId, VolumeId};

use optical::OpticalSurfaceData;

slotmap::new_key_type! {
    /// Unique identifier for an optical surface description.
    pub struct OpticalSurfaceId;
}

slotmap::new_key_type! {
    /// Unique identifier for a registered skin surface.
    pub struct SkinSurfaceId;
}

slotmap::new_key_type! {
    /// Unique identifier for a registered border surface.
    pub struct BorderSurfaceId;
}

/// A skin surface: optical properties applied to every boundary of one
/// volume.
#[derive(Debug, Clone)]
pub struct SkinSurfaceData {
    /// Registered name, `<element-path>#<surface-name>`.
    pub name: String,
    /// The optical surface description applied.
    pub surface: OpticalSurfaceId,
    /// The volume whose boundaries carry the surface.
    pub volume: VolumeId,
}

/// A border surface: optical properties applied to the boundary between
/// two specific placements.
#[derive(Debug, Clone)]
pub struct BorderSurfaceData {
    /// Registered name, `<element-path>#<surface-name>`.
    pub name: String,
    /// The optical surface description applied.
    pub surface: OpticalSurfaceId,
    /// Placement on the incident side.
    pub left: NodeId,
    /// Placement on the far side.
    pub right: NodeId,
}

/// Registry of all surface descriptions known to the detector.
#[derive(Debug, Default)]
pub struct SurfaceManager {
    optical: SlotMap<OpticalSurfaceId, OpticalSurfaceData>,
    skin: SlotMap<SkinSurfaceId, SkinSurfaceData>,
    border: SlotMap<BorderSurfaceId, BorderSurfaceData>,
}

impl SurfaceManager {
    /// Creates an empty surface manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_optical(
        &mut self,
        data: OpticalSurfaceData,
    ) -> Result<OpticalSurfaceId, SurfaceError> {
        if self.find_optical(&data.name).is_some() {
            return Err(SurfaceError::DuplicateSurface(data.name));
        }
        Ok(self.optical.insert(data))
    }

    pub(crate) fn add_skin(&mut self, data: SkinSurfaceData) -> Result<SkinSurfaceId, SurfaceError> {
        if self.find_skin(&data.name).is_some() {
            return Err(SurfaceError::DuplicateSurface(data.name));
        }
        Ok(self.skin.insert(data))
    }

    pub(crate) fn add_border(
        &mut self,
        data: BorderSurfaceData,
    ) -> Result<BorderSurfaceId, SurfaceError> {
        if self.find_border(&data.name).is_some() {
            return Err(SurfaceError::DuplicateSurface(data.name));
        }
        Ok(self.border.insert(data))
    }

    /// Returns a reference to an optical surface, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not registered.
    pub fn optical(&self, id: OpticalSurfaceId) -> Result<&OpticalSurfaceData, GeometryError> {
        self.optical
            .get(id)
            .ok_or_else(|| GeometryError::EntityNotFound("optical surface".into()))
    }

    /// Returns a reference to a skin surface, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not registered.
    pub fn skin(&self, id: SkinSurfaceId) -> Result<&SkinSurfaceData, GeometryError> {
        self.skin
            .get(id)
            .ok_or_else(|| GeometryError::EntityNotFound("skin surface".into()))
    }

    /// Returns a reference to a border surface, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not registered.
    pub fn border(&self, id: BorderSurfaceId) -> Result<&BorderSurfaceData, GeometryError> {
        self.border
            .get(id)
            .ok_or_else(|| GeometryError::EntityNotFound("border surface".into()))
    }

    /// Looks up an optical surface by name.
    #[must_use]
    pub fn find_optical(&self, name: &str) -> Option<OpticalSurfaceId> {
        self.optical.iter().find(|(_, s)| s.name == name).map(|(id, _)| id)
    }

    /// Looks up a skin surface by registered name.
    #[must_use]
    pub fn find_skin(&self, name: &str) -> Option<SkinSurfaceId> {
        self.skin.iter().find(|(_, s)| s.name == name).map(|(id, _)| id)
    }

    /// Looks up a border surface by registered name.
    #[must_use]
    pub fn find_border(&self, name: &str) -> Option<BorderSurfaceId> {
        self.border.iter().find(|(_, s)| s.name == name).map(|(id, _)| id)
    }

    /// Whether an optical surface ID refers to a registered entry.
    #[must_use]
    pub fn contains_optical(&self, id: OpticalSurfaceId) -> bool {
        self.optical.contains_key(id)
    }

    /// Number of registered skin surfaces.
    #[must_use]
    pub fn skin_count(&self) -> usize {
        self.skin.len()
    }

    /// Number of registered border surfaces.
    #[must_use]
    pub fn border_count(&self) -> usize {
        self.border.len()
    }
}
