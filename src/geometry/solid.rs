slotmap::new_key_type! {
    /// Unique identifier for a solid in the geometry store.
    pub struct SolidId;
}

/// Axis along which a solid may be divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivisionAxis {
    X,
    Y,
    Z,
}

impl DivisionAxis {
    /// Lower-case axis letter, used when naming division products.
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::X => 'x',
            Self::Y => 'y',
            Self::Z => 'z',
        }
    }
}

/// Shape parameterization of a solid.
///
/// All linear dimensions are half-lengths, following the convention of
/// the geometry managers this layer models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned box with half-lengths `dx`, `dy`, `dz`.
    Box { dx: f64, dy: f64, dz: f64 },
    /// Cylindrical tube segment along Z.
    Tube { rmin: f64, rmax: f64, dz: f64 },
    /// Trapezoid with X half-lengths at -z/+z, Y half-lengths at -z/+z.
    Trapezoid {
        dx1: f64,
        dx2: f64,
        dy1: f64,
        dy2: f64,
        dz: f64,
    },
}

impl Shape {
    /// Extent `[min, max]` of the shape along a division axis, or `None`
    /// if the shape cannot be divided along that axis.
    #[must_use]
    pub fn axis_extent(&self, axis: DivisionAxis) -> Option<(f64, f64)> {
        match (self, axis) {
            (Self::Box { dx, .. }, DivisionAxis::X) => Some((-dx, *dx)),
            (Self::Box { dy, .. }, DivisionAxis::Y) => Some((-dy, *dy)),
            (Self::Box { dz, .. } | Self::Tube { dz, .. } | Self::Trapezoid { dz, .. }, DivisionAxis::Z) => {
                Some((-dz, *dz))
            }
            _ => None,
        }
    }

    /// Shape of one equal section of width `step` along `axis`, or `None`
    /// if the shape cannot be divided along that axis.
    ///
    /// Trapezoid sections keep the full cross-section; the taper is
    /// resolved per section by the placement offsets.
    #[must_use]
    pub fn section(&self, axis: DivisionAxis, step: f64) -> Option<Shape> {
        let half = step / 2.0;
        match (self, axis) {
            (Self::Box { dy, dz, .. }, DivisionAxis::X) => Some(Self::Box {
                dx: half,
                dy: *dy,
                dz: *dz,
            }),
            (Self::Box { dx, dz, .. }, DivisionAxis::Y) => Some(Self::Box {
                dx: *dx,
                dy: half,
                dz: *dz,
            }),
            (Self::Box { dx, dy, .. }, DivisionAxis::Z) => Some(Self::Box {
                dx: *dx,
                dy: *dy,
                dz: half,
            }),
            (Self::Tube { rmin, rmax, .. }, DivisionAxis::Z) => Some(Self::Tube {
                rmin: *rmin,
                rmax: *rmax,
                dz: half,
            }),
            (
                Self::Trapezoid {
                    dx1, dx2, dy1, dy2, ..
                },
                DivisionAxis::Z,
            ) => Some(Self::Trapezoid {
                dx1: *dx1,
                dx2: *dx2,
                dy1: *dy1,
                dy2: *dy2,
                dz: half,
            }),
            _ => None,
        }
    }
}

/// Data associated with a solid.
#[derive(Debug, Clone)]
pub struct SolidData {
    /// Solid name, unique by convention but not enforced.
    pub name: String,
    /// Shape parameterization.
    pub shape: Shape,
}

impl SolidData {
    /// Creates a new solid record.
    #[must_use]
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn box_divides_along_all_axes() {
        let shape = Shape::Box {
            dx: 1.0,
            dy: 2.0,
            dz: 3.0,
        };
        assert_eq!(shape.axis_extent(DivisionAxis::X), Some((-1.0, 1.0)));
        assert_eq!(shape.axis_extent(DivisionAxis::Y), Some((-2.0, 2.0)));
        assert_eq!(shape.axis_extent(DivisionAxis::Z), Some((-3.0, 3.0)));
    }

    #[test]
    fn tube_divides_only_along_z() {
        let shape = Shape::Tube {
            rmin: 0.5,
            rmax: 1.0,
            dz: 4.0,
        };
        assert!(shape.axis_extent(DivisionAxis::X).is_none());
        assert!(shape.axis_extent(DivisionAxis::Y).is_none());
        assert_eq!(shape.axis_extent(DivisionAxis::Z), Some((-4.0, 4.0)));
    }

    #[test]
    fn box_section_halves_the_divided_axis() {
        let shape = Shape::Box {
            dx: 4.0,
            dy: 1.0,
            dz: 1.0,
        };
        let section = shape.section(DivisionAxis::X, 2.0).unwrap();
        assert_eq!(
            section,
            Shape::Box {
                dx: 1.0,
                dy: 1.0,
                dz: 1.0
            }
        );
    }
}
