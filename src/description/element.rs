use crate::error::GeometryError;
use crate::geometry::NodeId;

use super::Detector;

slotmap::new_key_type! {
    /// Unique identifier for a detector element in the description tree.
    pub struct DetElementId;
}

/// Data associated with a detector element.
///
/// Detector elements form a tree rooted at the world element and map the
/// experiment's logical structure onto placements in the geometry.
#[derive(Debug, Clone)]
pub struct DetElementData {
    /// Element name, unique among siblings.
    pub name: String,
    /// Parent element; `None` only for the world.
    pub parent: Option<DetElementId>,
    /// Child elements.
    pub children: Vec<DetElementId>,
    /// Placement node realizing this element in the geometry.
    pub placement: Option<NodeId>,
}

/// Handle to a detector element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetElement {
    pub(crate) id: DetElementId,
}

impl DetElement {
    /// The underlying element ID.
    #[must_use]
    pub fn id(&self) -> DetElementId {
        self.id
    }

    /// The element name.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found in the description.
    pub fn name<'a>(&self, detector: &'a Detector) -> Result<&'a str, GeometryError> {
        Ok(&detector.element(self.id)?.name)
    }

    /// Absolute path of the element, `/world/...`.
    ///
    /// # Errors
    ///
    /// Returns an error if the element or one of its ancestors is not
    /// found in the description.
    pub fn path(&self, detector: &Detector) -> Result<String, GeometryError> {
        let mut names = Vec::new();
        let mut current = Some(self.id);
        while let Some(id) = current {
            let data = detector.element(id)?;
            names.push(data.name.clone());
            current = data.parent;
        }
        names.reverse();
        Ok(format!("/{}", names.join("/")))
    }

    /// Whether the element exists and its parent chain reaches the
    /// world element.
    #[must_use]
    pub fn is_valid(&self, detector: &Detector) -> bool {
        let mut current = self.id;
        loop {
            let Ok(data) = detector.element(current) else {
                return false;
            };
            match data.parent {
                Some(parent) => current = parent,
                None => return current == detector.world().id,
            }
        }
    }

    /// The world element this element belongs to.
    #[must_use]
    pub fn world(&self, detector: &Detector) -> DetElement {
        detector.world()
    }

    /// Placement node realizing this element in the geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found in the description.
    pub fn placement(&self, detector: &Detector) -> Result<Option<NodeId>, GeometryError> {
        Ok(detector.element(self.id)?.placement)
    }

    /// Assigns the placement node realizing this element.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found in the description.
    pub fn set_placement(
        &self,
        detector: &mut Detector,
        node: NodeId,
    ) -> Result<(), GeometryError> {
        detector.element_mut(self.id)?.placement = Some(node);
        Ok(())
    }
}
