pub mod attributes;
pub mod element;

pub use attributes::{
    Limit, LimitSet, LimitSetId, Region, RegionId, SensitiveDetector, SensitiveDetectorId, VisAttr,
    VisAttrId,
};
pub use element::{DetElement, DetElementData, DetElementId};

use slotmap::SlotMap;

use crate::error::{AttributeError, GeometryError};
use crate::surface::SurfaceManager;

/// Root of the detector description.
///
/// Owns the detector-element tree, the name-keyed attribute registries
/// the handle layer resolves setter names against, and the surface
/// manager.
#[derive(Debug)]
pub struct Detector {
    elements: SlotMap<DetElementId, DetElementData>,
    world: DetElementId,
    regions: SlotMap<RegionId, Region>,
    limit_sets: SlotMap<LimitSetId, LimitSet>,
    vis_attrs: SlotMap<VisAttrId, VisAttr>,
    sensitive_detectors: SlotMap<SensitiveDetectorId, SensitiveDetector>,
    surfaces: SurfaceManager,
}

impl Detector {
    /// Creates a description holding only the world element.
    #[must_use]
    pub fn new() -> Self {
        let mut elements = SlotMap::with_key();
        let world = elements.insert(DetElementData {
            name: "world".into(),
            parent: None,
            children: Vec::new(),
            placement: None,
        });
        Self {
            elements,
            world,
            regions: SlotMap::with_key(),
            limit_sets: SlotMap::with_key(),
            vis_attrs: SlotMap::with_key(),
            sensitive_detectors: SlotMap::with_key(),
            surfaces: SurfaceManager::new(),
        }
    }

    /// The world detector element.
    #[must_use]
    pub fn world(&self) -> DetElement {
        DetElement { id: self.world }
    }

    // --- Detector elements ---

    /// Adds a child element under a parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent is missing or already has a child
    /// of the same name.
    pub fn add_element(
        &mut self,
        parent: DetElement,
        name: &str,
    ) -> Result<DetElement, crate::error::DetgeoError> {
        let parent_data = self.element(parent.id)?;
        for &child in &parent_data.children {
            if self.element(child)?.name == name {
                return Err(AttributeError::Duplicate {
                    kind: "detector element",
                    name: name.to_owned(),
                }
                .into());
            }
        }
        let id = self.elements.insert(DetElementData {
            name: name.to_owned(),
            parent: Some(parent.id),
            children: Vec::new(),
            placement: None,
        });
        if let Some(data) = self.elements.get_mut(parent.id) {
            data.children.push(id);
        }
        Ok(DetElement { id })
    }

    /// Returns a reference to the element data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the description.
    pub fn element(&self, id: DetElementId) -> Result<&DetElementData, GeometryError> {
        self.elements
            .get(id)
            .ok_or_else(|| GeometryError::EntityNotFound("detector element".into()))
    }

    /// Returns a mutable reference to the element data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the description.
    pub fn element_mut(&mut self, id: DetElementId) -> Result<&mut DetElementData, GeometryError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| GeometryError::EntityNotFound("detector element".into()))
    }

    // --- Regions ---

    /// Registers a region.
    ///
    /// # Errors
    ///
    /// Returns an error if a region of the same name exists.
    pub fn add_region(&mut self, region: Region) -> Result<RegionId, AttributeError> {
        if self.find_region(&region.name).is_some() {
            return Err(AttributeError::Duplicate {
                kind: "region",
                name: region.name,
            });
        }
        Ok(self.regions.insert(region))
    }

    /// Looks up a region by name.
    #[must_use]
    pub fn find_region(&self, name: &str) -> Option<RegionId> {
        self.regions.iter().find(|(_, r)| r.name == name).map(|(id, _)| id)
    }

    /// Returns a reference to a region, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the description.
    pub fn region(&self, id: RegionId) -> Result<&Region, GeometryError> {
        self.regions
            .get(id)
            .ok_or_else(|| GeometryError::EntityNotFound("region".into()))
    }

    // --- Limit sets ---

    /// Registers a limit set.
    ///
    /// # Errors
    ///
    /// Returns an error if a limit set of the same name exists.
    pub fn add_limit_set(&mut self, limits: LimitSet) -> Result<LimitSetId, AttributeError> {
        if self.find_limit_set(&limits.name).is_some() {
            return Err(AttributeError::Duplicate {
                kind: "limit set",
                name: limits.name,
            });
        }
        Ok(self.limit_sets.insert(limits))
    }

    /// Looks up a limit set by name.
    #[must_use]
    pub fn find_limit_set(&self, name: &str) -> Option<LimitSetId> {
        self.limit_sets
            .iter()
            .find(|(_, l)| l.name == name)
            .map(|(id, _)| id)
    }

    /// Returns a reference to a limit set, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the description.
    pub fn limit_set(&self, id: LimitSetId) -> Result<&LimitSet, GeometryError> {
        self.limit_sets
            .get(id)
            .ok_or_else(|| GeometryError::EntityNotFound("limit set".into()))
    }

    // --- Visualization attributes ---

    /// Registers visualization attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if attributes of the same name exist.
    pub fn add_vis_attr(&mut self, vis: VisAttr) -> Result<VisAttrId, AttributeError> {
        if self.find_vis_attr(&vis.name).is_some() {
            return Err(AttributeError::Duplicate {
                kind: "visualization attributes",
                name: vis.name,
            });
        }
        Ok(self.vis_attrs.insert(vis))
    }

    /// Looks up visualization attributes by name.
    #[must_use]
    pub fn find_vis_attr(&self, name: &str) -> Option<VisAttrId> {
        self.vis_attrs
            .iter()
            .find(|(_, v)| v.name == name)
            .map(|(id, _)| id)
    }

    /// Returns a reference to visualization attributes, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the description.
    pub fn vis_attr(&self, id: VisAttrId) -> Result<&VisAttr, GeometryError> {
        self.vis_attrs
            .get(id)
            .ok_or_else(|| GeometryError::EntityNotFound("visualization attributes".into()))
    }

    // --- Sensitive detectors ---

    /// Registers a sensitive detector.
    ///
    /// # Errors
    ///
    /// Returns an error if a detector of the same name exists.
    pub fn add_sensitive_detector(
        &mut self,
        det: SensitiveDetector,
    ) -> Result<SensitiveDetectorId, AttributeError> {
        if self.find_sensitive_detector(&det.name).is_some() {
            return Err(AttributeError::Duplicate {
                kind: "sensitive detector",
                name: det.name,
            });
        }
        Ok(self.sensitive_detectors.insert(det))
    }

    /// Looks up a sensitive detector by name.
    #[must_use]
    pub fn find_sensitive_detector(&self, name: &str) -> Option<SensitiveDetectorId> {
        self.sensitive_detectors
            .iter()
            .find(|(_, s)| s.name == name)
            .map(|(id, _)| id)
    }

    /// Returns a reference to a sensitive detector, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the description.
    pub fn sensitive_detector(
        &self,
        id: SensitiveDetectorId,
    ) -> Result<&SensitiveDetector, GeometryError> {
        self.sensitive_detectors
            .get(id)
            .ok_or_else(|| GeometryError::EntityNotFound("sensitive detector".into()))
    }

    // --- Surfaces ---

    /// The registered surfaces.
    #[must_use]
    pub fn surfaces(&self) -> &SurfaceManager {
        &self.surfaces
    }

    pub(crate) fn surfaces_mut(&mut self) -> &mut SurfaceManager {
        &mut self.surfaces
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}
