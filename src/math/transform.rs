use nalgebra::UnitQuaternion;

use super::{Position, Transform3};

/// Euler-angle rotation applied about Z, then the rotated Y, then the
/// twice-rotated X.
///
/// `R = Rz(phi) * Ry(theta) * Rx(psi)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationZyx {
    /// Rotation angle about Z, in radians.
    pub phi: f64,
    /// Rotation angle about the rotated Y, in radians.
    pub theta: f64,
    /// Rotation angle about the twice-rotated X, in radians.
    pub psi: f64,
}

impl RotationZyx {
    /// Creates a new Z-Y-X Euler rotation.
    #[must_use]
    pub fn new(phi: f64, theta: f64, psi: f64) -> Self {
        Self { phi, theta, psi }
    }

    /// Converts the rotation into a rigid transform with no translation.
    #[must_use]
    pub fn to_transform(self) -> Transform3 {
        Transform3::from_parts(
            Position::identity(),
            UnitQuaternion::from_euler_angles(self.psi, self.theta, self.phi),
        )
    }
}

/// Builds a pure-translation transform from a position.
#[must_use]
pub fn from_position(pos: Position) -> Transform3 {
    Transform3::from_parts(pos, UnitQuaternion::identity())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, TOLERANCE};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn zero_angles_give_identity() {
        let tr = RotationZyx::new(0.0, 0.0, 0.0).to_transform();
        let p = tr * Point3::new(1.0, 2.0, 3.0);
        assert!((p - Point3::new(1.0, 2.0, 3.0)).norm() < TOLERANCE);
    }

    #[test]
    fn phi_rotates_about_z() {
        let tr = RotationZyx::new(FRAC_PI_2, 0.0, 0.0).to_transform();
        let p = tr * Point3::new(1.0, 0.0, 0.0);
        assert!((p - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn psi_rotates_about_x() {
        let tr = RotationZyx::new(0.0, 0.0, FRAC_PI_2).to_transform();
        let p = tr * Point3::new(0.0, 1.0, 0.0);
        assert!((p - Point3::new(0.0, 0.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn position_transform_translates() {
        let tr = from_position(Position::new(1.0, -2.0, 0.5));
        let p = tr * Point3::origin();
        assert!((p - Point3::new(1.0, -2.0, 0.5)).norm() < TOLERANCE);
    }
}
