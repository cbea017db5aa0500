slotmap::new_key_type! {
    /// Unique identifier for a production-cuts region.
    pub struct RegionId;
}

slotmap::new_key_type! {
    /// Unique identifier for a simulation limit set.
    pub struct LimitSetId;
}

slotmap::new_key_type! {
    /// Unique identifier for a set of visualization attributes.
    pub struct VisAttrId;
}

slotmap::new_key_type! {
    /// Unique identifier for a sensitive detector.
    pub struct SensitiveDetectorId;
}

/// Production-cuts region applied to a volume subtree in simulation.
#[derive(Debug, Clone)]
pub struct Region {
    /// Region name.
    pub name: String,
    /// Production cut, in mm.
    pub cut: f64,
    /// Energy threshold, in MeV.
    pub threshold: f64,
}

impl Region {
    /// Creates a new region.
    #[must_use]
    pub fn new(name: impl Into<String>, cut: f64, threshold: f64) -> Self {
        Self {
            name: name.into(),
            cut,
            threshold,
        }
    }
}

/// A single named limit within a limit set.
#[derive(Debug, Clone)]
pub struct Limit {
    /// Limit name, e.g. `"step_length_max"`.
    pub name: String,
    /// Limit value.
    pub value: f64,
    /// Unit the value is expressed in.
    pub unit: String,
}

/// Named collection of simulation limits.
#[derive(Debug, Clone)]
pub struct LimitSet {
    /// Limit-set name.
    pub name: String,
    /// The limits in the set.
    pub limits: Vec<Limit>,
}

impl LimitSet {
    /// Creates an empty limit set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            limits: Vec::new(),
        }
    }
}

/// Visualization attributes for a volume.
#[derive(Debug, Clone)]
pub struct VisAttr {
    /// Attribute name.
    pub name: String,
    /// Display color as RGB in `[0, 1]`.
    pub rgb: (f32, f32, f32),
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
    /// Whether the volume itself is drawn.
    pub visible: bool,
    /// Whether daughter volumes are drawn.
    pub show_daughters: bool,
}

impl VisAttr {
    /// Creates visible attributes with the given color.
    #[must_use]
    pub fn new(name: impl Into<String>, rgb: (f32, f32, f32)) -> Self {
        Self {
            name: name.into(),
            rgb,
            alpha: 1.0,
            visible: true,
            show_daughters: true,
        }
    }
}

/// A sensitive detector a volume can be wired to.
#[derive(Debug, Clone)]
pub struct SensitiveDetector {
    /// Detector name.
    pub name: String,
    /// Detector kind, e.g. `"tracker"` or `"calorimeter"`.
    pub kind: String,
    /// Readout description the detector publishes hits to.
    pub readout: Option<String>,
}

impl SensitiveDetector {
    /// Creates a new sensitive detector record.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            readout: None,
        }
    }
}
