use tracing::debug;

use crate::description::Detector;
use crate::error::GeometryError;

use super::OpticalSurfaceId;

/// Reflectance model of an optical surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceModel {
    #[default]
    Glisur,
    Unified,
    Lut,
    DichroicData,
}

/// Finish of an optical surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceFinish {
    #[default]
    Polished,
    PolishedFrontPainted,
    PolishedBackPainted,
    Ground,
    GroundFrontPainted,
    GroundBackPainted,
}

/// Boundary type of an optical surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceType {
    #[default]
    DielectricDielectric,
    DielectricMetal,
    DielectricLut,
    DielectricDichroic,
    Firsov,
    XRay,
}

/// Property record for an optical surface description.
#[derive(Debug, Clone)]
pub struct OpticalSurfaceData {
    /// Surface name.
    pub name: String,
    /// Reflectance model.
    pub model: SurfaceModel,
    /// Surface finish.
    pub finish: SurfaceFinish,
    /// Boundary type.
    pub typ: SurfaceType,
    /// Model-dependent value, e.g. the Glisur polish parameter.
    pub value: f64,
}

/// Handle to a registered optical surface description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpticalSurface {
    id: OpticalSurfaceId,
}

impl OpticalSurface {
    /// Creates the surface description and registers it with the
    /// surface manager.
    ///
    /// # Errors
    ///
    /// Returns an error if a surface of the same name is already
    /// registered.
    pub fn new(
        detector: &mut Detector,
        name: &str,
        model: SurfaceModel,
        finish: SurfaceFinish,
        typ: SurfaceType,
        value: f64,
    ) -> crate::error::Result<Self> {
        let id = detector.surfaces_mut().add_optical(OpticalSurfaceData {
            name: name.to_owned(),
            model,
            finish,
            typ,
            value,
        })?;
        debug!(surface = name, "registered optical surface");
        Ok(Self { id })
    }

    /// The underlying registry ID.
    #[must_use]
    pub fn id(&self) -> OpticalSurfaceId {
        self.id
    }

    /// Whether the handle refers to a registered surface.
    #[must_use]
    pub fn is_valid(&self, detector: &Detector) -> bool {
        detector.surfaces().contains_optical(self.id)
    }

    /// The surface name.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface is not registered.
    pub fn name<'a>(&self, detector: &'a Detector) -> Result<&'a str, GeometryError> {
        Ok(&detector.surfaces().optical(self.id)?.name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{DetgeoError, SurfaceError};

    #[test]
    fn construction_registers_with_the_manager() {
        let mut det = Detector::new();
        let surf = OpticalSurface::new(
            &mut det,
            "mirror",
            SurfaceModel::Unified,
            SurfaceFinish::Polished,
            SurfaceType::DielectricMetal,
            1.0,
        )
        .unwrap();

        assert!(surf.is_valid(&det));
        assert_eq!(surf.name(&det).unwrap(), "mirror");
        assert_eq!(det.surfaces().find_optical("mirror"), Some(surf.id()));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut det = Detector::new();
        OpticalSurface::new(
            &mut det,
            "mirror",
            SurfaceModel::default(),
            SurfaceFinish::default(),
            SurfaceType::default(),
            1.0,
        )
        .unwrap();
        let err = OpticalSurface::new(
            &mut det,
            "mirror",
            SurfaceModel::default(),
            SurfaceFinish::default(),
            SurfaceType::default(),
            0.5,
        );
        assert!(matches!(
            err,
            Err(DetgeoError::Surface(SurfaceError::DuplicateSurface(n))) if n == "mirror"
        ));
    }
}
