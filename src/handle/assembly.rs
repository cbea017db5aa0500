use crate::extension::VolumeExtension;
use crate::geometry::{GeometryStore, VolumeData, VolumeKind};

use super::volume::Volume;

/// Handle to an assembly volume.
///
/// Assemblies are envelopes without a solid or material of their own;
/// their daughters end up placed directly in the grandmother frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assembly {
    vol: Volume,
}

impl Assembly {
    /// Creates a new, empty assembly and attaches its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if attaching the extension fails.
    pub fn new(store: &mut GeometryStore, name: &str) -> crate::error::Result<Self> {
        let id = store.add_volume(VolumeData::new(name, None, None, VolumeKind::Assembly));
        store.attach_volume_extension(id, VolumeExtension::new())?;
        Ok(Self {
            vol: Volume::from_id(id),
        })
    }

    /// The wrapped volume handle.
    #[must_use]
    pub fn as_volume(&self) -> Volume {
        self.vol
    }
}

impl From<Assembly> for Volume {
    fn from(assembly: Assembly) -> Self {
        assembly.vol
    }
}
