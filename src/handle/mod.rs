pub mod assembly;
pub mod multi;
pub mod placed_volume;
pub mod volume;

pub use assembly::Assembly;
pub use multi::VolumeMulti;
pub use placed_volume::PlacedVolume;
pub use volume::Volume;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{AttributeError, DetgeoError, ExtensionError};
    use crate::description::{Detector, Region, SensitiveDetector, VisAttr};
    use crate::extension::VETO_SIMU;
    use crate::geometry::{
        DivisionAxis, GeometryStore, MaterialData, MaterialState, Shape, SolidData,
    };
    use crate::math::{Position, Transform3, TOLERANCE};

    fn fixture() -> (GeometryStore, Volume, Volume) {
        let mut store = GeometryStore::new();
        let world_solid = store.add_solid(SolidData::new(
            "world_shape",
            Shape::Box {
                dx: 100.0,
                dy: 100.0,
                dz: 100.0,
            },
        ));
        let module_solid = store.add_solid(SolidData::new(
            "module_shape",
            Shape::Box {
                dx: 4.0,
                dy: 4.0,
                dz: 1.0,
            },
        ));
        let air = store.add_material(MaterialData::new("Air", 1.2e-3, MaterialState::Gas));
        let silicon = store.add_material(MaterialData::new("Silicon", 2.33, MaterialState::Solid));
        let world = Volume::new(&mut store, "world", world_solid, air).unwrap();
        let module = Volume::new(&mut store, "module", module_solid, silicon).unwrap();
        (store, world, module)
    }

    #[test]
    fn auto_copy_numbers_increase_from_zero() {
        let (mut store, world, module) = fixture();

        let first = world.place_volume(&mut store, module).unwrap();
        let second = world.place_volume(&mut store, module).unwrap();
        let third = world.place_volume(&mut store, module).unwrap();

        assert_eq!(first.copy_number(&store).unwrap(), 0);
        assert_eq!(second.copy_number(&store).unwrap(), 1);
        assert_eq!(third.copy_number(&store).unwrap(), 2);
    }

    #[test]
    fn user_copy_numbers_are_taken_verbatim() {
        let (mut store, world, module) = fixture();
        let pv = world
            .place_volume_with_id(&mut store, module, 42)
            .unwrap();
        assert_eq!(pv.copy_number(&store).unwrap(), 42);
        assert_eq!(pv.name(&store).unwrap(), "module_42");
    }

    #[test]
    fn param_volume_composes_transform_progression() {
        let (mut store, world, module) = fixture();
        let start = Transform3::translation(0.0, 0.0, 1.0);
        let inc = Transform3::translation(0.0, 0.0, 2.0);

        let placements = world
            .param_volume_1d(&mut store, start, 3, module, &inc)
            .unwrap();

        assert_eq!(placements.len(), 3);
        let expected = [1.0, 3.0, 5.0];
        for (pv, z) in placements.iter().zip(expected) {
            let position = pv.position(&store).unwrap();
            assert!((position.z - z).abs() < TOLERANCE);
            assert!(position.x.abs() < TOLERANCE);
        }
    }

    #[test]
    fn param_volume_position_increment_starts_at_identity() {
        let (mut store, world, module) = fixture();
        let placements = world
            .param_volume_1d_positions(&mut store, 2, module, Position::new(5.0, 0.0, 0.0))
            .unwrap();
        assert!(placements[0].position(&store).unwrap().x.abs() < TOLERANCE);
        assert!((placements[1].position(&store).unwrap().x - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn empty_region_name_is_ignored() {
        let (mut store, world, _) = fixture();
        let det = Detector::new();

        world.set_region_by_name(&mut store, &det, "").unwrap();
        assert!(world.region(&store).unwrap().is_none());
    }

    #[test]
    fn unknown_region_name_is_an_error() {
        let (mut store, world, _) = fixture();
        let det = Detector::new();

        let err = world.set_region_by_name(&mut store, &det, "nowhere");
        assert!(matches!(
            err,
            Err(DetgeoError::Attribute(AttributeError::UnknownName { .. }))
        ));
        assert!(world.region(&store).unwrap().is_none());
    }

    #[test]
    fn known_region_name_is_resolved_and_assigned() {
        let (mut store, world, _) = fixture();
        let mut det = Detector::new();
        let id = det.add_region(Region::new("tracking", 0.05, 0.5)).unwrap();

        world.set_region_by_name(&mut store, &det, "tracking").unwrap();
        assert_eq!(world.region(&store).unwrap(), Some(id));
    }

    #[test]
    fn combined_attribute_setter_skips_empty_names() {
        let (mut store, world, _) = fixture();
        let mut det = Detector::new();
        let vis = det.add_vis_attr(VisAttr::new("grey", (0.5, 0.5, 0.5))).unwrap();

        world
            .set_attributes(&mut store, &det, "", "", "grey")
            .unwrap();
        assert!(world.region(&store).unwrap().is_none());
        assert!(world.limit_set(&store).unwrap().is_none());
        assert_eq!(world.vis_attributes(&store).unwrap(), Some(vis));
    }

    #[test]
    fn sensitive_detector_wiring() {
        let (mut store, _, module) = fixture();
        let mut det = Detector::new();
        let sd = det
            .add_sensitive_detector(SensitiveDetector::new("si_tracker", "tracker"))
            .unwrap();

        assert!(!module.is_sensitive(&store).unwrap());
        module.set_sensitive_detector(&mut store, sd).unwrap();
        assert!(module.is_sensitive(&store).unwrap());
        assert_eq!(module.sensitive_detector(&store).unwrap(), Some(sd));
    }

    #[test]
    fn flag_bits_travel_through_the_handle() {
        let (mut store, _, module) = fixture();
        module.set_flag_bit(&mut store, VETO_SIMU).unwrap();
        assert!(module.test_flag_bit(&store, VETO_SIMU).unwrap());
        assert!(!module.test_flag_bit(&store, 16).unwrap());
    }

    #[test]
    fn divide_instruments_every_product() {
        let (mut store, _, module) = fixture();

        let multi = module
            .divide(&mut store, "module_slice", DivisionAxis::X, 4, -4.0, 2.0)
            .unwrap();

        assert!(store
            .is_volume_instrumented(multi.as_volume().id())
            .unwrap());
        for &node in &store.volume(module.id()).unwrap().daughters.clone() {
            assert!(store.is_node_instrumented(node).unwrap());
        }
    }

    #[test]
    fn close_geometry_passes_after_wrapped_construction() {
        let (mut store, world, module) = fixture();
        world.place_volume(&mut store, module).unwrap();
        module
            .divide(&mut store, "module_slice", DivisionAxis::Z, 2, -1.0, 1.0)
            .unwrap();
        store.close_geometry().unwrap();
    }

    #[test]
    fn raw_division_bypass_fails_at_closing_until_imported() {
        let (mut store, world, module) = fixture();
        world.place_volume(&mut store, module).unwrap();
        store
            .divide_raw(module.id(), "bypass_slice", DivisionAxis::Z, 2, -1.0, 1.0)
            .unwrap();

        // The bypass is invisible at division time and surfaces at closing.
        assert!(store.close_geometry().is_err());

        world.import(&mut store).unwrap();
        store.close_geometry().unwrap();
    }

    #[test]
    fn corrupted_volume_extension_fails_loudly() {
        let (mut store, world, _) = fixture();
        store.corrupt_volume_extension(world.id());
        assert!(matches!(
            world.data(&store),
            Err(DetgeoError::Extension(ExtensionError::IntegrityViolation { .. }))
        ));
    }

    #[test]
    fn material_and_solid_reassignment() {
        let (mut store, _, module) = fixture();
        let lead = store.add_material(MaterialData::new("Lead", 11.35, MaterialState::Solid));
        let slab = store.add_solid(SolidData::new(
            "slab_shape",
            Shape::Box {
                dx: 2.0,
                dy: 2.0,
                dz: 2.0,
            },
        ));

        module.set_material(&mut store, lead).unwrap();
        module.set_solid(&mut store, slab).unwrap();
        assert_eq!(module.material(&store).unwrap(), Some(lead));
        assert_eq!(module.solid(&store).unwrap(), Some(slab));
    }
}
