use tracing::debug;

use crate::description::attributes::{LimitSetId, RegionId, SensitiveDetectorId, VisAttrId};
use crate::description::Detector;
use crate::error::AttributeError;
use crate::extension::{PlacedVolumeExtension, VolumeExtension};
use crate::geometry::{
    DivisionAxis, GeometryStore, MaterialId, SolidId, VolumeData, VolumeId, VolumeKind,
};
use crate::math::{transform, Position, RotationZyx, Transform3};

use super::multi::VolumeMulti;
use super::placed_volume::PlacedVolume;

/// Handle to a logical volume.
///
/// The handle is a non-owning typed reference; all operations borrow the
/// geometry store explicitly. Creating a volume through this handle
/// attaches its extension; every placement and division made through it
/// instruments the products as well. Placements made through the raw
/// store calls stay uninstrumented until repaired with
/// [`Volume::import`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volume {
    id: VolumeId,
}

impl Volume {
    /// Creates a new logical volume with a solid and a material, and
    /// attaches a fresh extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or material is not found in the
    /// store.
    pub fn new(
        store: &mut GeometryStore,
        name: &str,
        solid: SolidId,
        material: MaterialId,
    ) -> crate::error::Result<Self> {
        store.solid(solid)?;
        store.material(material)?;
        let id = store.add_volume(VolumeData::new(
            name,
            Some(solid),
            Some(material),
            VolumeKind::Regular,
        ));
        store.attach_volume_extension(id, VolumeExtension::new())?;
        Ok(Self { id })
    }

    /// Wraps an existing volume, e.g. one created through the raw store
    /// calls or found by traversal.
    ///
    /// The volume need not be instrumented yet; accessors that require
    /// the extension fail until it is (see [`Volume::import`]).
    #[must_use]
    pub fn from_id(id: VolumeId) -> Self {
        Self { id }
    }

    /// The underlying volume ID.
    #[must_use]
    pub fn id(&self) -> VolumeId {
        self.id
    }

    /// Whether the handle refers to a live volume.
    #[must_use]
    pub fn is_valid(&self, store: &GeometryStore) -> bool {
        store.contains_volume(self.id)
    }

    /// The volume name.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume is not found in the store.
    pub fn name<'a>(&self, store: &'a GeometryStore) -> crate::error::Result<&'a str> {
        Ok(&store.volume(self.id)?.name)
    }

    /// The attached extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume is dead, uninstrumented, or the
    /// extension is corrupt.
    pub fn data<'a>(&self, store: &'a GeometryStore) -> crate::error::Result<&'a VolumeExtension> {
        store.volume_extension(self.id)
    }

    /// Attaches extensions to this volume and its whole daughter
    /// subtree wherever they are missing.
    ///
    /// Use this after wiring in geometry created outside the
    /// description layer.
    ///
    /// # Errors
    ///
    /// Returns an error if a traversed entity is missing or an existing
    /// extension is corrupt.
    pub fn import(&self, store: &mut GeometryStore) -> crate::error::Result<Self> {
        let mut pending = vec![self.id];
        while let Some(vid) = pending.pop() {
            if !store.is_volume_instrumented(vid)? {
                store.attach_volume_extension(vid, VolumeExtension::new())?;
                debug!(volume = %store.volume(vid)?.name, "imported volume");
            }
            let daughters = store.volume(vid)?.daughters.clone();
            for nid in daughters {
                if !store.is_node_instrumented(nid)? {
                    store.attach_node_extension(nid, PlacedVolumeExtension::new())?;
                }
                pending.push(store.node(nid)?.volume);
            }
        }
        Ok(*self)
    }

    // --- Placement ---

    fn place(
        &self,
        store: &mut GeometryStore,
        daughter: Volume,
        copy_no: Option<i32>,
        transform: Transform3,
    ) -> crate::error::Result<PlacedVolume> {
        let copy = match copy_no {
            Some(n) => n,
            None => {
                let data = store.volume_mut(self.id)?;
                let n = data.next_copy_no;
                data.next_copy_no = n + 1;
                n
            }
        };
        let node = store.add_node_raw(self.id, daughter.id, copy, transform)?;
        store.attach_node_extension(node, PlacedVolumeExtension::new())?;
        debug!(
            mother = %store.volume(self.id)?.name,
            daughter = %store.volume(daughter.id)?.name,
            copy,
            "placed volume"
        );
        Ok(PlacedVolume::from_id(node))
    }

    /// Places a daughter volume at the identity transform with an
    /// auto-generated copy number.
    ///
    /// Auto-generated copy numbers are handed out sequentially per
    /// mother volume, starting at 0.
    ///
    /// # Errors
    ///
    /// Returns an error if either volume is missing or the placement is
    /// invalid.
    pub fn place_volume(
        &self,
        store: &mut GeometryStore,
        daughter: Volume,
    ) -> crate::error::Result<PlacedVolume> {
        self.place(store, daughter, None, Transform3::identity())
    }

    /// Places an un-rotated daughter volume at a position, with an
    /// auto-generated copy number.
    ///
    /// # Errors
    ///
    /// Returns an error if either volume is missing or the placement is
    /// invalid.
    pub fn place_volume_at(
        &self,
        store: &mut GeometryStore,
        daughter: Volume,
        pos: Position,
    ) -> crate::error::Result<PlacedVolume> {
        self.place(store, daughter, None, transform::from_position(pos))
    }

    /// Places a rotated daughter volume at the identity position, with
    /// an auto-generated copy number.
    ///
    /// # Errors
    ///
    /// Returns an error if either volume is missing or the placement is
    /// invalid.
    pub fn place_volume_rotated(
        &self,
        store: &mut GeometryStore,
        daughter: Volume,
        rot: RotationZyx,
    ) -> crate::error::Result<PlacedVolume> {
        self.place(store, daughter, None, rot.to_transform())
    }

    /// Places a daughter volume at a generic transform, with an
    /// auto-generated copy number.
    ///
    /// # Errors
    ///
    /// Returns an error if either volume is missing or the placement is
    /// invalid.
    pub fn place_volume_transformed(
        &self,
        store: &mut GeometryStore,
        daughter: Volume,
        tr: Transform3,
    ) -> crate::error::Result<PlacedVolume> {
        self.place(store, daughter, None, tr)
    }

    /// Places a daughter volume at the identity transform with a
    /// caller-supplied copy number.
    ///
    /// # Errors
    ///
    /// Returns an error if either volume is missing or the placement is
    /// invalid.
    pub fn place_volume_with_id(
        &self,
        store: &mut GeometryStore,
        daughter: Volume,
        copy_no: i32,
    ) -> crate::error::Result<PlacedVolume> {
        self.place(store, daughter, Some(copy_no), Transform3::identity())
    }

    /// Places an un-rotated daughter volume at a position with a
    /// caller-supplied copy number.
    ///
    /// # Errors
    ///
    /// Returns an error if either volume is missing or the placement is
    /// invalid.
    pub fn place_volume_at_with_id(
        &self,
        store: &mut GeometryStore,
        daughter: Volume,
        copy_no: i32,
        pos: Position,
    ) -> crate::error::Result<PlacedVolume> {
        self.place(store, daughter, Some(copy_no), transform::from_position(pos))
    }

    /// Places a rotated daughter volume with a caller-supplied copy
    /// number.
    ///
    /// # Errors
    ///
    /// Returns an error if either volume is missing or the placement is
    /// invalid.
    pub fn place_volume_rotated_with_id(
        &self,
        store: &mut GeometryStore,
        daughter: Volume,
        copy_no: i32,
        rot: RotationZyx,
    ) -> crate::error::Result<PlacedVolume> {
        self.place(store, daughter, Some(copy_no), rot.to_transform())
    }

    /// Places a daughter volume at a generic transform with a
    /// caller-supplied copy number.
    ///
    /// # Errors
    ///
    /// Returns an error if either volume is missing or the placement is
    /// invalid.
    pub fn place_volume_transformed_with_id(
        &self,
        store: &mut GeometryStore,
        daughter: Volume,
        copy_no: i32,
        tr: Transform3,
    ) -> crate::error::Result<PlacedVolume> {
        self.place(store, daughter, Some(copy_no), tr)
    }

    // --- Parametrized placement ---

    /// Places `count` copies of a daughter entity; copy `i` sits at
    /// `start` composed with `i` applications of `inc`.
    ///
    /// # Errors
    ///
    /// Returns an error if a placement fails; placements made before
    /// the failure remain.
    pub fn param_volume_1d(
        &self,
        store: &mut GeometryStore,
        start: Transform3,
        count: usize,
        entity: Volume,
        inc: &Transform3,
    ) -> crate::error::Result<Vec<PlacedVolume>> {
        let mut placements = Vec::with_capacity(count);
        let mut tr = start;
        for _ in 0..count {
            placements.push(self.place(store, entity, None, tr)?);
            tr *= *inc;
        }
        Ok(placements)
    }

    /// Parametrized placement starting at the identity transform.
    ///
    /// # Errors
    ///
    /// Returns an error if a placement fails.
    pub fn param_volume_1d_steps(
        &self,
        store: &mut GeometryStore,
        count: usize,
        entity: Volume,
        inc: &Transform3,
    ) -> crate::error::Result<Vec<PlacedVolume>> {
        self.param_volume_1d(store, Transform3::identity(), count, entity, inc)
    }

    /// Parametrized placement with a pure-translation increment.
    ///
    /// # Errors
    ///
    /// Returns an error if a placement fails.
    pub fn param_volume_1d_positions(
        &self,
        store: &mut GeometryStore,
        count: usize,
        entity: Volume,
        inc: Position,
    ) -> crate::error::Result<Vec<PlacedVolume>> {
        self.param_volume_1d_steps(store, count, entity, &transform::from_position(inc))
    }

    /// Parametrized placement with a pure-rotation increment.
    ///
    /// # Errors
    ///
    /// Returns an error if a placement fails.
    pub fn param_volume_1d_rotations(
        &self,
        store: &mut GeometryStore,
        count: usize,
        entity: Volume,
        inc: RotationZyx,
    ) -> crate::error::Result<Vec<PlacedVolume>> {
        self.param_volume_1d_steps(store, count, entity, &inc.to_transform())
    }

    // --- Division ---

    /// Divides the volume into `ndiv` equal sections along an axis and
    /// instruments the division volume and every section placement.
    ///
    /// Divisions must go through this call: the raw store division
    /// leaves its products without extensions, which only surfaces when
    /// the geometry is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the division is geometrically invalid.
    pub fn divide(
        &self,
        store: &mut GeometryStore,
        name: &str,
        axis: DivisionAxis,
        ndiv: i32,
        start: f64,
        step: f64,
    ) -> crate::error::Result<VolumeMulti> {
        let division = store.divide_raw(self.id, name, axis, ndiv, start, step)?;
        store.attach_volume_extension(division, VolumeExtension::new())?;
        let daughters = store.volume(self.id)?.daughters.clone();
        for nid in daughters {
            let placed = store.node(nid)?.volume;
            if placed == division && !store.is_node_instrumented(nid)? {
                store.attach_node_extension(nid, PlacedVolumeExtension::new())?;
            }
        }
        VolumeMulti::from_volume(store, Self::from_id(division))
    }

    // --- Attributes ---

    /// Assigns a region to the volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or corrupt.
    pub fn set_region(
        &self,
        store: &mut GeometryStore,
        region: RegionId,
    ) -> crate::error::Result<&Self> {
        store.volume_extension_mut(self.id)?.region = Some(region);
        Ok(self)
    }

    /// Assigns a region looked up by name. An empty name is accepted
    /// and ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown to the description.
    pub fn set_region_by_name(
        &self,
        store: &mut GeometryStore,
        detector: &Detector,
        name: &str,
    ) -> crate::error::Result<&Self> {
        if name.is_empty() {
            return Ok(self);
        }
        let region = detector
            .find_region(name)
            .ok_or_else(|| AttributeError::UnknownName {
                kind: "region",
                name: name.to_owned(),
            })?;
        self.set_region(store, region)
    }

    /// The region assigned to the volume, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or corrupt.
    pub fn region(&self, store: &GeometryStore) -> crate::error::Result<Option<RegionId>> {
        Ok(self.data(store)?.region)
    }

    /// Assigns a limit set to the volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or corrupt.
    pub fn set_limit_set(
        &self,
        store: &mut GeometryStore,
        limits: LimitSetId,
    ) -> crate::error::Result<&Self> {
        store.volume_extension_mut(self.id)?.limits = Some(limits);
        Ok(self)
    }

    /// Assigns a limit set looked up by name. An empty name is accepted
    /// and ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown to the description.
    pub fn set_limit_set_by_name(
        &self,
        store: &mut GeometryStore,
        detector: &Detector,
        name: &str,
    ) -> crate::error::Result<&Self> {
        if name.is_empty() {
            return Ok(self);
        }
        let limits = detector
            .find_limit_set(name)
            .ok_or_else(|| AttributeError::UnknownName {
                kind: "limit set",
                name: name.to_owned(),
            })?;
        self.set_limit_set(store, limits)
    }

    /// The limit set assigned to the volume, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or corrupt.
    pub fn limit_set(&self, store: &GeometryStore) -> crate::error::Result<Option<LimitSetId>> {
        Ok(self.data(store)?.limits)
    }

    /// Assigns visualization attributes to the volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or corrupt.
    pub fn set_vis_attributes(
        &self,
        store: &mut GeometryStore,
        vis: VisAttrId,
    ) -> crate::error::Result<&Self> {
        store.volume_extension_mut(self.id)?.vis = Some(vis);
        Ok(self)
    }

    /// Assigns visualization attributes looked up by name. An empty
    /// name is accepted and ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown to the description.
    pub fn set_vis_attributes_by_name(
        &self,
        store: &mut GeometryStore,
        detector: &Detector,
        name: &str,
    ) -> crate::error::Result<&Self> {
        if name.is_empty() {
            return Ok(self);
        }
        let vis = detector
            .find_vis_attr(name)
            .ok_or_else(|| AttributeError::UnknownName {
                kind: "visualization attributes",
                name: name.to_owned(),
            })?;
        self.set_vis_attributes(store, vis)
    }

    /// The visualization attributes assigned to the volume, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or corrupt.
    pub fn vis_attributes(&self, store: &GeometryStore) -> crate::error::Result<Option<VisAttrId>> {
        Ok(self.data(store)?.vis)
    }

    /// Wires the volume to a sensitive detector.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or corrupt.
    pub fn set_sensitive_detector(
        &self,
        store: &mut GeometryStore,
        det: SensitiveDetectorId,
    ) -> crate::error::Result<&Self> {
        store.volume_extension_mut(self.id)?.sens_det = Some(det);
        Ok(self)
    }

    /// The sensitive detector the volume is wired to, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or corrupt.
    pub fn sensitive_detector(
        &self,
        store: &GeometryStore,
    ) -> crate::error::Result<Option<SensitiveDetectorId>> {
        Ok(self.data(store)?.sens_det)
    }

    /// Whether the volume is wired to a sensitive detector.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or corrupt.
    pub fn is_sensitive(&self, store: &GeometryStore) -> crate::error::Result<bool> {
        Ok(self.data(store)?.sens_det.is_some())
    }

    /// Assigns region, limit set and visualization attributes in one
    /// call, each looked up by name. Empty names are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-empty name is unknown to the
    /// description.
    pub fn set_attributes(
        &self,
        store: &mut GeometryStore,
        detector: &Detector,
        region: &str,
        limits: &str,
        vis: &str,
    ) -> crate::error::Result<&Self> {
        self.set_region_by_name(store, detector, region)?;
        self.set_limit_set_by_name(store, detector, limits)?;
        self.set_vis_attributes_by_name(store, detector, vis)?;
        Ok(self)
    }

    // --- Native attributes ---

    /// Replaces the volume's material.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume or material is missing.
    pub fn set_material(
        &self,
        store: &mut GeometryStore,
        material: MaterialId,
    ) -> crate::error::Result<&Self> {
        store.material(material)?;
        store.volume_mut(self.id)?.material = Some(material);
        Ok(self)
    }

    /// The volume's material. Assemblies carry none.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume is not found in the store.
    pub fn material(&self, store: &GeometryStore) -> crate::error::Result<Option<MaterialId>> {
        Ok(store.volume(self.id)?.material)
    }

    /// Replaces the volume's solid.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume or solid is missing.
    pub fn set_solid(&self, store: &mut GeometryStore, solid: SolidId) -> crate::error::Result<&Self> {
        store.solid(solid)?;
        store.volume_mut(self.id)?.solid = Some(solid);
        Ok(self)
    }

    /// The volume's solid. Assemblies carry none.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume is not found in the store.
    pub fn solid(&self, store: &GeometryStore) -> crate::error::Result<Option<SolidId>> {
        Ok(store.volume(self.id)?.solid)
    }

    // --- Flag bits ---

    /// Sets a bit in the extension's usage field. Bits 0..=15 are
    /// reserved, 16..=31 are user space.
    ///
    /// # Errors
    ///
    /// Returns an error if the bit is out of range or the extension is
    /// missing or corrupt.
    pub fn set_flag_bit(&self, store: &mut GeometryStore, bit: u32) -> crate::error::Result<()> {
        store.volume_extension_mut(self.id)?.set_flag_bit(bit)?;
        Ok(())
    }

    /// Tests a bit in the extension's usage field.
    ///
    /// # Errors
    ///
    /// Returns an error if the bit is out of range or the extension is
    /// missing or corrupt.
    pub fn test_flag_bit(&self, store: &GeometryStore, bit: u32) -> crate::error::Result<bool> {
        Ok(self.data(store)?.test_flag_bit(bit)?)
    }
}
