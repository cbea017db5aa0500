pub mod lease;
pub mod placed;
pub mod volume;

pub use lease::{Lease, EXTENSION_MAGIC};
pub use placed::{PlacedVolumeExtension, VolIds};
pub use volume::{VolumeExtension, FIRST_USER_FLAG_BIT, VETO_DISPLAY, VETO_RECO, VETO_SIMU};
