use crate::extension::{Lease, VolumeExtension};

use super::material::MaterialId;
use super::node::NodeId;
use super::solid::SolidId;

slotmap::new_key_type! {
    /// Unique identifier for a logical volume in the geometry store.
    pub struct VolumeId;
}

/// Classification of a logical volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeKind {
    /// Ordinary volume with a solid and a material.
    Regular,
    /// Envelope without own solid or material; daughters are placed
    /// directly into the grandmother frame.
    Assembly,
    /// Product of a division; shares one section solid across all
    /// placements.
    Division,
}

/// Data associated with a logical volume.
///
/// A logical volume describes shape and material once; placement nodes
/// instantiate it under mother volumes with concrete transforms.
#[derive(Debug, Clone)]
pub struct VolumeData {
    /// Volume name.
    pub name: String,
    /// Shape of the volume. Assemblies have none.
    pub solid: Option<SolidId>,
    /// Fill material. Assemblies have none.
    pub material: Option<MaterialId>,
    /// Classification.
    pub kind: VolumeKind,
    /// Placement nodes of daughter volumes, in placement order.
    pub daughters: Vec<NodeId>,
    /// Sequential counter handing out auto-generated copy numbers for
    /// daughter placements. Starts at 0.
    pub(crate) next_copy_no: i32,
    /// Extension slot. `None` until the description layer instruments
    /// the volume.
    pub(crate) extension: Option<Lease<VolumeExtension>>,
}

impl VolumeData {
    /// Creates a new, uninstrumented volume record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        solid: Option<SolidId>,
        material: Option<MaterialId>,
        kind: VolumeKind,
    ) -> Self {
        Self {
            name: name.into(),
            solid,
            material,
            kind,
            daughters: Vec::new(),
            next_copy_no: 0,
            extension: None,
        }
    }
}
