pub mod transform;

pub use transform::RotationZyx;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Pure translation in 3D space.
pub type Position = nalgebra::Translation3<f64>;

/// Rigid-body transform (rotation followed by translation).
pub type Transform3 = nalgebra::Isometry3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
