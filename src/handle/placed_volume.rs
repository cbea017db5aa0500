use crate::extension::{PlacedVolumeExtension, VolIds};
use crate::geometry::{GeometryStore, MaterialId, NodeId};
use crate::math::{Point3, Transform3};

use super::volume::Volume;

/// Handle to a placement node (a physical volume).
///
/// The handle is a non-owning typed reference; all operations borrow the
/// geometry store explicitly. Metadata lives in the node's attached
/// [`PlacedVolumeExtension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedVolume {
    id: NodeId,
}

impl PlacedVolume {
    /// Wraps an existing placement node.
    ///
    /// The node need not be instrumented yet; accessors that require the
    /// extension fail until it is (see [`Volume::import`]).
    #[must_use]
    pub fn from_id(id: NodeId) -> Self {
        Self { id }
    }

    /// The underlying node ID.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Whether the handle refers to a live node.
    #[must_use]
    pub fn is_valid(&self, store: &GeometryStore) -> bool {
        store.contains_node(self.id)
    }

    /// The attached extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is dead, uninstrumented, or the
    /// extension is corrupt.
    pub fn data<'a>(&self, store: &'a GeometryStore) -> crate::error::Result<&'a PlacedVolumeExtension> {
        store.node_extension(self.id)
    }

    /// Appends a named identifier to the placement.
    ///
    /// # Errors
    ///
    /// Returns an error if an identifier of the same name is already
    /// present, or if the extension is missing or corrupt.
    pub fn add_phys_vol_id(
        &self,
        store: &mut GeometryStore,
        name: &str,
        value: i64,
    ) -> crate::error::Result<&Self> {
        store.node_extension_mut(self.id)?.vol_ids.insert(name, value)?;
        Ok(self)
    }

    /// The identifiers attached to the placement.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is dead, uninstrumented, or the
    /// extension is corrupt.
    pub fn vol_ids<'a>(&self, store: &'a GeometryStore) -> crate::error::Result<&'a VolIds> {
        Ok(&self.data(store)?.vol_ids)
    }

    /// The placed daughter volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not found in the store.
    pub fn volume(&self, store: &GeometryStore) -> crate::error::Result<Volume> {
        Ok(Volume::from_id(store.node(self.id)?.volume))
    }

    /// The mother volume holding the placement.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not found in the store.
    pub fn mother_vol(&self, store: &GeometryStore) -> crate::error::Result<Volume> {
        Ok(Volume::from_id(store.node(self.id)?.mother))
    }

    /// Material of the placed volume. Assemblies carry none.
    ///
    /// # Errors
    ///
    /// Returns an error if the node or its volume is not found.
    pub fn material(&self, store: &GeometryStore) -> crate::error::Result<Option<MaterialId>> {
        let volume = store.node(self.id)?.volume;
        Ok(store.volume(volume)?.material)
    }

    /// Transform from the daughter frame into the mother frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not found in the store.
    pub fn transform(&self, store: &GeometryStore) -> crate::error::Result<Transform3> {
        Ok(store.node(self.id)?.transform)
    }

    /// Translation part of the placement transform.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not found in the store.
    pub fn position(&self, store: &GeometryStore) -> crate::error::Result<Point3> {
        let t = store.node(self.id)?.transform.translation;
        Ok(Point3::new(t.x, t.y, t.z))
    }

    /// The node name.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not found in the store.
    pub fn name<'a>(&self, store: &'a GeometryStore) -> crate::error::Result<&'a str> {
        Ok(&store.node(self.id)?.name)
    }

    /// Copy number of the placement.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not found in the store.
    pub fn copy_number(&self, store: &GeometryStore) -> crate::error::Result<i32> {
        Ok(store.node(self.id)?.copy_no)
    }

    /// One-line dump of the placement and its identifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is dead, uninstrumented, or the
    /// extension is corrupt.
    pub fn describe(&self, store: &GeometryStore) -> crate::error::Result<String> {
        let data = store.node(self.id)?;
        let ids = self.vol_ids(store)?;
        Ok(format!("{} [{ids}]", data.name))
    }
}
