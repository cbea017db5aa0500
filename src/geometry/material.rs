slotmap::new_key_type! {
    /// Unique identifier for a material in the geometry store.
    pub struct MaterialId;
}

/// Physical state of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialState {
    #[default]
    Solid,
    Liquid,
    Gas,
}

/// Data associated with a material.
///
/// Materials are opaque collaborators here: the description layer only
/// references them by identity and name.
#[derive(Debug, Clone)]
pub struct MaterialData {
    /// Material name, e.g. `"Air"` or `"Silicon"`.
    pub name: String,
    /// Density in g/cm^3.
    pub density: f64,
    /// Physical state.
    pub state: MaterialState,
}

impl MaterialData {
    /// Creates a new material record.
    #[must_use]
    pub fn new(name: impl Into<String>, density: f64, state: MaterialState) -> Self {
        Self {
            name: name.into(),
            density,
            state,
        }
    }
}
