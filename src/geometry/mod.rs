pub mod material;
pub mod node;
pub mod solid;
pub mod volume;

pub use material::{MaterialData, MaterialId, MaterialState};
pub use node::{NodeData, NodeId};
pub use solid::{DivisionAxis, Shape, SolidData, SolidId};
pub use volume::{VolumeData, VolumeId, VolumeKind};

use slotmap::SlotMap;
use tracing::{debug, info, warn};

use crate::error::{ExtensionError, GeometryError};
use crate::extension::{Lease, PlacedVolumeExtension, VolumeExtension};
use crate::math::{Position, Transform3, Vector3, TOLERANCE};

/// Central arena that owns all geometry entities.
///
/// Entities reference each other via typed IDs (generational indices),
/// avoiding self-referential structures and enabling safe mutation.
///
/// The store plays the role of the native geometry manager: it exposes
/// the raw, extension-blind operations ([`GeometryStore::add_node_raw`],
/// [`GeometryStore::divide_raw`]) that the handle layer wraps. Creating
/// placements or divisions through the raw calls leaves the products
/// without extensions; [`GeometryStore::close_geometry`] rejects such
/// trees.
#[derive(Debug, Default)]
pub struct GeometryStore {
    solids: SlotMap<SolidId, SolidData>,
    materials: SlotMap<MaterialId, MaterialData>,
    volumes: SlotMap<VolumeId, VolumeData>,
    nodes: SlotMap<NodeId, NodeData>,
}

impl GeometryStore {
    /// Creates a new, empty geometry store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Solid operations ---

    /// Inserts a solid and returns its ID.
    pub fn add_solid(&mut self, data: SolidData) -> SolidId {
        self.solids.insert(data)
    }

    /// Returns a reference to the solid data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn solid(&self, id: SolidId) -> Result<&SolidData, GeometryError> {
        self.solids
            .get(id)
            .ok_or_else(|| GeometryError::EntityNotFound("solid".into()))
    }

    // --- Material operations ---

    /// Inserts a material and returns its ID.
    pub fn add_material(&mut self, data: MaterialData) -> MaterialId {
        self.materials.insert(data)
    }

    /// Returns a reference to the material data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn material(&self, id: MaterialId) -> Result<&MaterialData, GeometryError> {
        self.materials
            .get(id)
            .ok_or_else(|| GeometryError::EntityNotFound("material".into()))
    }

    /// Looks up a material by name.
    #[must_use]
    pub fn find_material(&self, name: &str) -> Option<MaterialId> {
        self.materials.iter().find(|(_, m)| m.name == name).map(|(id, _)| id)
    }

    // --- Volume operations ---

    /// Inserts a volume and returns its ID.
    pub fn add_volume(&mut self, data: VolumeData) -> VolumeId {
        self.volumes.insert(data)
    }

    /// Returns a reference to the volume data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn volume(&self, id: VolumeId) -> Result<&VolumeData, GeometryError> {
        self.volumes
            .get(id)
            .ok_or_else(|| GeometryError::EntityNotFound("volume".into()))
    }

    /// Returns a mutable reference to the volume data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn volume_mut(&mut self, id: VolumeId) -> Result<&mut VolumeData, GeometryError> {
        self.volumes
            .get_mut(id)
            .ok_or_else(|| GeometryError::EntityNotFound("volume".into()))
    }

    /// Whether a volume ID refers to a live entity.
    #[must_use]
    pub fn contains_volume(&self, id: VolumeId) -> bool {
        self.volumes.contains_key(id)
    }

    // --- Node operations ---

    /// Returns a reference to the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn node(&self, id: NodeId) -> Result<&NodeData, GeometryError> {
        self.nodes
            .get(id)
            .ok_or_else(|| GeometryError::EntityNotFound("node".into()))
    }

    /// Returns a mutable reference to the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, GeometryError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| GeometryError::EntityNotFound("node".into()))
    }

    /// Whether a node ID refers to a live entity.
    #[must_use]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    // --- Native-level placement ---

    /// Creates a placement node without instrumenting it.
    ///
    /// This is the native-level call; placements created here carry no
    /// extension and will fail [`GeometryStore::close_geometry`] unless
    /// repaired through the handle layer.
    ///
    /// # Errors
    ///
    /// Returns an error if either volume is missing or a volume would be
    /// placed into itself.
    pub fn add_node_raw(
        &mut self,
        mother: VolumeId,
        daughter: VolumeId,
        copy_no: i32,
        transform: Transform3,
    ) -> Result<NodeId, GeometryError> {
        if mother == daughter {
            let name = self.volume(mother)?.name.clone();
            return Err(GeometryError::InvalidPlacement(format!(
                "volume '{name}' cannot be placed into itself"
            )));
        }
        let daughter_name = self.volume(daughter)?.name.clone();
        self.volume(mother)?;

        let node = self.nodes.insert(NodeData {
            name: format!("{daughter_name}_{copy_no}"),
            volume: daughter,
            mother,
            transform,
            copy_no,
            extension: None,
        });
        if let Some(data) = self.volumes.get_mut(mother) {
            data.daughters.push(node);
        }
        Ok(node)
    }

    /// Removes a placement node, detaching it from its mother and
    /// releasing its extension slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing or its extension is
    /// corrupt.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), crate::error::DetgeoError> {
        let data = self
            .nodes
            .remove(id)
            .ok_or_else(|| GeometryError::EntityNotFound("node".into()))?;
        if let Some(mother) = self.volumes.get_mut(data.mother) {
            mother.daughters.retain(|&n| n != id);
        }
        let mut slot = data.extension;
        drop_slot(&mut slot, &data.name)?;
        Ok(())
    }

    // --- Native-level division ---

    /// Divides a volume into `ndiv` equal sections along an axis,
    /// starting at `start` with section width `step`.
    ///
    /// This is the native-level call: it creates the division volume and
    /// its placements without extensions. Frameworks must divide through
    /// the handle layer instead, which instruments every product.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume has no solid, the solid cannot be
    /// divided along `axis`, or the requested range leaves the solid.
    pub fn divide_raw(
        &mut self,
        volume: VolumeId,
        name: &str,
        axis: DivisionAxis,
        ndiv: i32,
        start: f64,
        step: f64,
    ) -> Result<VolumeId, GeometryError> {
        let data = self.volume(volume)?;
        let mother_name = data.name.clone();
        let material = data.material;
        let solid_id = data.solid.ok_or_else(|| {
            GeometryError::InvalidDivision(format!("volume '{mother_name}' has no solid"))
        })?;
        let shape = self.solid(solid_id)?.shape;

        if ndiv <= 0 {
            return Err(GeometryError::InvalidDivision(format!(
                "division '{name}': section count {ndiv} must be positive"
            )));
        }
        let (min, max) = shape.axis_extent(axis).ok_or_else(|| {
            GeometryError::InvalidDivision(format!(
                "division '{name}': solid of volume '{mother_name}' cannot be divided along {}",
                axis.letter()
            ))
        })?;
        let end = start + f64::from(ndiv) * step;
        if step <= 0.0 || start < min - TOLERANCE || end > max + TOLERANCE {
            return Err(GeometryError::InvalidDivision(format!(
                "division '{name}': range [{start}, {end}] leaves the solid extent [{min}, {max}]"
            )));
        }

        let section = shape.section(axis, step).ok_or_else(|| {
            GeometryError::InvalidDivision(format!(
                "division '{name}': solid of volume '{mother_name}' cannot be divided along {}",
                axis.letter()
            ))
        })?;
        let section_solid = self.add_solid(SolidData::new(name, section));
        let division = self.add_volume(VolumeData::new(
            name,
            Some(section_solid),
            material,
            VolumeKind::Division,
        ));

        let dir = match axis {
            DivisionAxis::X => Vector3::x(),
            DivisionAxis::Y => Vector3::y(),
            DivisionAxis::Z => Vector3::z(),
        };
        for i in 0..ndiv {
            let center = start + step / 2.0 + f64::from(i) * step;
            let transform = crate::math::transform::from_position(Position::from(dir * center));
            self.add_node_raw(volume, division, i, transform)?;
        }
        debug!(
            mother = %mother_name,
            division = %name,
            axis = %axis.letter(),
            sections = ndiv,
            "divided volume"
        );
        Ok(division)
    }

    // --- Extension plumbing ---

    /// Attaches an extension to a volume's slot, leasing it to the store.
    ///
    /// An extension already in the slot is released first.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume is missing or the displaced
    /// extension is corrupt.
    pub fn attach_volume_extension(
        &mut self,
        id: VolumeId,
        extension: VolumeExtension,
    ) -> Result<(), crate::error::DetgeoError> {
        let name = self.volume(id)?.name.clone();
        let lease = Lease::new(extension);
        lease.grab()?;
        let data = self.volume_mut(id)?;
        drop_slot(&mut data.extension, &name)?;
        data.extension = Some(lease);
        Ok(())
    }

    /// Attaches an extension to a node's slot, leasing it to the store.
    ///
    /// An extension already in the slot is released first.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing or the displaced
    /// extension is corrupt.
    pub fn attach_node_extension(
        &mut self,
        id: NodeId,
        extension: PlacedVolumeExtension,
    ) -> Result<(), crate::error::DetgeoError> {
        let name = self.node(id)?.name.clone();
        let lease = Lease::new(extension);
        lease.grab()?;
        let data = self.node_mut(id)?;
        drop_slot(&mut data.extension, &name)?;
        data.extension = Some(lease);
        Ok(())
    }

    /// Integrity-checked access to a volume's extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume is missing, uninstrumented, or the
    /// extension magic word does not match.
    pub fn volume_extension(&self, id: VolumeId) -> Result<&VolumeExtension, crate::error::DetgeoError> {
        let data = self.volume(id)?;
        let lease = data.extension.as_ref().ok_or_else(|| ExtensionError::Missing {
            kind: "volume",
            name: data.name.clone(),
        })?;
        Ok(lease.get()?)
    }

    /// Integrity-checked mutable access to a volume's extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume is missing, uninstrumented, or the
    /// extension magic word does not match.
    pub fn volume_extension_mut(
        &mut self,
        id: VolumeId,
    ) -> Result<&mut VolumeExtension, crate::error::DetgeoError> {
        let data = self.volume_mut(id)?;
        let name = data.name.clone();
        let lease = data.extension.as_mut().ok_or(ExtensionError::Missing {
            kind: "volume",
            name,
        })?;
        Ok(lease.get_mut()?)
    }

    /// Integrity-checked access to a node's extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing, uninstrumented, or the
    /// extension magic word does not match.
    pub fn node_extension(&self, id: NodeId) -> Result<&PlacedVolumeExtension, crate::error::DetgeoError> {
        let data = self.node(id)?;
        let lease = data.extension.as_ref().ok_or_else(|| ExtensionError::Missing {
            kind: "placement",
            name: data.name.clone(),
        })?;
        Ok(lease.get()?)
    }

    /// Integrity-checked mutable access to a node's extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing, uninstrumented, or the
    /// extension magic word does not match.
    pub fn node_extension_mut(
        &mut self,
        id: NodeId,
    ) -> Result<&mut PlacedVolumeExtension, crate::error::DetgeoError> {
        let data = self.node_mut(id)?;
        let name = data.name.clone();
        let lease = data.extension.as_mut().ok_or(ExtensionError::Missing {
            kind: "placement",
            name,
        })?;
        Ok(lease.get_mut()?)
    }

    /// Whether a volume carries an extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume is not found.
    pub fn is_volume_instrumented(&self, id: VolumeId) -> Result<bool, GeometryError> {
        Ok(self.volume(id)?.extension.is_some())
    }

    /// Whether a node carries an extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not found.
    pub fn is_node_instrumented(&self, id: NodeId) -> Result<bool, GeometryError> {
        Ok(self.node(id)?.extension.is_some())
    }

    // --- Closing ---

    /// Verifies that every volume and placement carries a valid
    /// extension.
    ///
    /// Entities created through the raw store calls and never repaired
    /// via the handle layer surface here, not at creation time.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first uninstrumented entity, or an
    /// integrity error if an extension is corrupt.
    pub fn close_geometry(&self) -> Result<(), crate::error::DetgeoError> {
        for (_, data) in &self.volumes {
            match &data.extension {
                None => {
                    return Err(GeometryError::NotInstrumented {
                        kind: "volume",
                        name: data.name.clone(),
                    }
                    .into())
                }
                Some(lease) => {
                    lease.get()?;
                }
            }
        }
        for (_, data) in &self.nodes {
            match &data.extension {
                None => {
                    return Err(GeometryError::NotInstrumented {
                        kind: "placement",
                        name: data.name.clone(),
                    }
                    .into())
                }
                Some(lease) => {
                    lease.get()?;
                }
            }
        }
        info!(
            volumes = self.volumes.len(),
            placements = self.nodes.len(),
            "geometry closed"
        );
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn corrupt_volume_extension(&mut self, id: VolumeId) {
        if let Some(lease) = self.volumes.get_mut(id).and_then(|v| v.extension.as_mut()) {
            lease.corrupt_magic();
        }
    }

    #[cfg(test)]
    pub(crate) fn corrupt_node_extension(&mut self, id: NodeId) {
        if let Some(lease) = self.nodes.get_mut(id).and_then(|n| n.extension.as_mut()) {
            lease.corrupt_magic();
        }
    }
}

/// Releases and drops whatever lease a slot holds.
fn drop_slot<T>(slot: &mut Option<Lease<T>>, entity: &str) -> Result<(), ExtensionError> {
    if let Some(lease) = slot.take() {
        if !lease.release()? {
            warn!(
                entity,
                outstanding = lease.ref_count(),
                "dropping extension with outstanding grabs"
            );
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DetgeoError;

    fn boxed_volume(store: &mut GeometryStore, name: &str, dx: f64, dy: f64, dz: f64) -> VolumeId {
        let solid = store.add_solid(SolidData::new(format!("{name}_shape"), Shape::Box { dx, dy, dz }));
        let material = store.add_material(MaterialData::new("Air", 1.2e-3, MaterialState::Gas));
        store.add_volume(VolumeData::new(name, Some(solid), Some(material), VolumeKind::Regular))
    }

    #[test]
    fn raw_placement_updates_mother() {
        let mut store = GeometryStore::new();
        let world = boxed_volume(&mut store, "world", 100.0, 100.0, 100.0);
        let layer = boxed_volume(&mut store, "layer", 10.0, 10.0, 1.0);

        let node = store
            .add_node_raw(world, layer, 0, Transform3::identity())
            .unwrap();
        assert_eq!(store.volume(world).unwrap().daughters, vec![node]);
        assert_eq!(store.node(node).unwrap().name, "layer_0");
        assert!(!store.is_node_instrumented(node).unwrap());
    }

    #[test]
    fn self_placement_is_rejected() {
        let mut store = GeometryStore::new();
        let world = boxed_volume(&mut store, "world", 1.0, 1.0, 1.0);
        let result = store.add_node_raw(world, world, 0, Transform3::identity());
        assert!(matches!(result, Err(GeometryError::InvalidPlacement(_))));
    }

    #[test]
    fn raw_division_creates_uninstrumented_sections() {
        let mut store = GeometryStore::new();
        let slab = boxed_volume(&mut store, "slab", 4.0, 1.0, 1.0);

        let division = store
            .divide_raw(slab, "slab_div", DivisionAxis::X, 4, -4.0, 2.0)
            .unwrap();

        let daughters = store.volume(slab).unwrap().daughters.clone();
        assert_eq!(daughters.len(), 4);
        for (i, &node) in daughters.iter().enumerate() {
            let data = store.node(node).unwrap();
            assert_eq!(data.volume, division);
            assert_eq!(data.copy_no, i32::try_from(i).unwrap());
            let x = data.transform.translation.x;
            let expected = -4.0 + 1.0 + 2.0 * f64::from(i32::try_from(i).unwrap());
            assert!((x - expected).abs() < TOLERANCE);
            assert!(!store.is_node_instrumented(node).unwrap());
        }
        assert!(!store.is_volume_instrumented(division).unwrap());
        assert_eq!(store.volume(division).unwrap().kind, VolumeKind::Division);
    }

    #[test]
    fn division_outside_extent_is_rejected() {
        let mut store = GeometryStore::new();
        let slab = boxed_volume(&mut store, "slab", 4.0, 1.0, 1.0);
        let result = store.divide_raw(slab, "bad", DivisionAxis::X, 5, -4.0, 2.0);
        assert!(matches!(result, Err(GeometryError::InvalidDivision(_))));
    }

    #[test]
    fn division_along_unsupported_axis_is_rejected() {
        let mut store = GeometryStore::new();
        let solid = store.add_solid(SolidData::new(
            "pipe",
            Shape::Tube {
                rmin: 0.0,
                rmax: 1.0,
                dz: 5.0,
            },
        ));
        let vol = store.add_volume(VolumeData::new("pipe", Some(solid), None, VolumeKind::Regular));
        let result = store.divide_raw(vol, "bad", DivisionAxis::X, 2, -1.0, 1.0);
        assert!(matches!(result, Err(GeometryError::InvalidDivision(_))));
    }

    #[test]
    fn close_geometry_names_uninstrumented_volume() {
        let mut store = GeometryStore::new();
        boxed_volume(&mut store, "bare", 1.0, 1.0, 1.0);
        let err = store.close_geometry();
        match err {
            Err(DetgeoError::Geometry(GeometryError::NotInstrumented { kind, name })) => {
                assert_eq!(kind, "volume");
                assert_eq!(name, "bare");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn close_geometry_rejects_corrupt_extension() {
        let mut store = GeometryStore::new();
        let vol = boxed_volume(&mut store, "v", 1.0, 1.0, 1.0);
        store
            .attach_volume_extension(vol, VolumeExtension::new())
            .unwrap();
        store.corrupt_volume_extension(vol);
        assert!(matches!(
            store.close_geometry(),
            Err(DetgeoError::Extension(ExtensionError::IntegrityViolation { .. }))
        ));
    }

    #[test]
    fn attach_grabs_once() {
        let mut store = GeometryStore::new();
        let vol = boxed_volume(&mut store, "v", 1.0, 1.0, 1.0);
        store
            .attach_volume_extension(vol, VolumeExtension::new())
            .unwrap();
        let lease = store.volume(vol).unwrap().extension.as_ref().unwrap();
        assert_eq!(lease.ref_count(), 1);
    }

    #[test]
    fn remove_node_releases_extension() {
        let mut store = GeometryStore::new();
        let world = boxed_volume(&mut store, "world", 10.0, 10.0, 10.0);
        let layer = boxed_volume(&mut store, "layer", 1.0, 1.0, 1.0);
        let node = store
            .add_node_raw(world, layer, 0, Transform3::identity())
            .unwrap();
        store
            .attach_node_extension(node, PlacedVolumeExtension::new())
            .unwrap();

        store.remove_node(node).unwrap();
        assert!(!store.contains_node(node));
        assert!(store.volume(world).unwrap().daughters.is_empty());
    }
}
