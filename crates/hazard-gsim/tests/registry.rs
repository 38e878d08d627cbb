mod common;

use std::sync::Arc;

use common::FakeGsim;
use hazard_core::HazardError;
use hazard_gsim::{GroundMotionModel, GsimRegistry};

fn plain() -> Arc<dyn GroundMotionModel> {
    Arc::new(FakeGsim::new("Plain"))
}

fn deprecated() -> Arc<dyn GroundMotionModel> {
    let mut gsim = FakeGsim::new("OldGMPE");
    gsim.superseded_by = Some("Plain");
    Arc::new(gsim)
}

fn bad_distance() -> Arc<dyn GroundMotionModel> {
    Arc::new(FakeGsim::requiring("Broken", &["jump height"], &[], &[]))
}

#[test]
fn builtin_registry_instantiates_models() {
    let registry = GsimRegistry::builtin().unwrap();
    assert!(registry.contains("VacareanuEtAl2015"));
    assert_eq!(registry.names().collect::<Vec<_>>(), ["VacareanuEtAl2015"]);

    let gsim = registry.instantiate("VacareanuEtAl2015").unwrap();
    assert_eq!(gsim.name(), "VacareanuEtAl2015");
    assert!(gsim.advisories().is_empty());
}

#[test]
fn unknown_name_is_a_lookup_error() {
    let err = GsimRegistry::builtin()
        .unwrap()
        .instantiate("NoSuchGMPE")
        .unwrap_err();
    assert!(matches!(err, HazardError::Lookup(_)));
    assert_eq!(err.info().code, "gsim-unknown");
}

#[test]
fn registration_rejects_duplicates_and_mismatches() {
    let mut registry = GsimRegistry::new();
    registry.register("Plain", plain).unwrap();

    let err = registry.register("Plain", plain).unwrap_err();
    assert_eq!(err.info().code, "gsim-duplicate");

    let err = registry.register("Other", plain).unwrap_err();
    assert_eq!(err.info().code, "gsim-name-mismatch");
}

#[test]
fn registration_validates_capabilities() {
    let err = GsimRegistry::new().register("Broken", bad_distance).unwrap_err();
    assert!(matches!(err, HazardError::Config(_)));
    assert_eq!(err.message(), "Unknown distance measure 'jump height'");
    assert_eq!(err.info().context.get("gsim").map(String::as_str), Some("Broken"));
    assert!(err.info().hint.is_some());
}

#[test]
fn instantiation_reports_advisories() {
    let mut registry = GsimRegistry::new();
    registry.register("OldGMPE", deprecated).unwrap();
    let gsim = registry.instantiate("OldGMPE").unwrap();
    assert_eq!(
        gsim.advisories()[0].to_string(),
        "OldGMPE is deprecated - use Plain instead"
    );
}
