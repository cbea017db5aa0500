use thiserror::Error;

/// Top-level error type for the detgeo description layer.
#[derive(Debug, Error)]
pub enum DetgeoError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Extension(#[from] ExtensionError),

    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Errors related to the geometry store and placement hierarchy.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("invalid division: {0}")]
    InvalidDivision(String),

    #[error("{kind} '{name}' carries no extension; it was created outside the description layer")]
    NotInstrumented { kind: &'static str, name: String },
}

/// Errors related to extension objects attached to volumes and placements.
#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("extension integrity violation: magic word {found:#018x} does not match the sentinel")]
    IntegrityViolation { found: u64 },

    #[error("{kind} '{name}' has no extension attached")]
    Missing { kind: &'static str, name: String },

    #[error("duplicate volume ID '{0}'")]
    DuplicateVolId(String),

    #[error("flag bit {0} is out of range 0..=31")]
    FlagBitOutOfRange(u32),
}

/// Errors related to named attribute lookup on the detector description.
#[derive(Debug, Error)]
pub enum AttributeError {
    #[error("unknown {kind} '{name}'")]
    UnknownName { kind: &'static str, name: String },

    #[error("duplicate {kind} '{name}'")]
    Duplicate { kind: &'static str, name: String },
}

/// Errors raised while constructing and registering optical surfaces.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("cannot create {kind} '{name}': not connected to a valid detector element")]
    UnconnectedDetElement { kind: &'static str, name: String },

    #[error("cannot create {kind} '{name}': no valid volume")]
    InvalidVolume { kind: &'static str, name: String },

    #[error("cannot create {kind} '{name}': no valid placements")]
    InvalidPlacement { kind: &'static str, name: String },

    #[error("cannot create {kind} '{name}': no valid optical surface")]
    InvalidOpticalSurface { kind: &'static str, name: String },

    #[error("a surface named '{0}' is already registered")]
    DuplicateSurface(String),
}

/// Convenience type alias for results using [`DetgeoError`].
pub type Result<T> = std::result::Result<T, DetgeoError>;
