use crate::extension::{Lease, PlacedVolumeExtension};
use crate::math::Transform3;

use super::volume::VolumeId;

slotmap::new_key_type! {
    /// Unique identifier for a placement node in the geometry store.
    pub struct NodeId;
}

/// Data associated with a placement node.
///
/// A node places one daughter volume inside a mother volume at a local
/// transform. The same daughter volume may be placed many times; copy
/// numbers distinguish the instances.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Node name, `<daughter-volume>_<copy>` by convention.
    pub name: String,
    /// The placed daughter volume.
    pub volume: VolumeId,
    /// The mother volume holding the placement.
    pub mother: VolumeId,
    /// Transform from the daughter frame into the mother frame.
    pub transform: Transform3,
    /// Copy number of this placement.
    pub copy_no: i32,
    /// Extension slot. `None` until the description layer instruments
    /// the node.
    pub(crate) extension: Option<Lease<PlacedVolumeExtension>>,
}
