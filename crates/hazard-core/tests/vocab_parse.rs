use hazard_core::{DistanceMeasure, HazardError, RuptureParam, SiteParam};

#[test]
fn distance_names_resolve() {
    for measure in DistanceMeasure::ALL {
        let parsed: DistanceMeasure = measure.as_str().parse().expect("known distance");
        assert_eq!(parsed, measure);
    }
}

#[test]
fn unknown_distance_message_is_exact() {
    let err = "jump height".parse::<DistanceMeasure>().unwrap_err();
    assert!(matches!(err, HazardError::Config(_)));
    assert_eq!(err.message(), "Unknown distance measure 'jump height'");
}

#[test]
fn invalid_site_param_message() {
    let err = "colour".parse::<SiteParam>().unwrap_err();
    assert_eq!(err.message(), "colour is not a valid site parameter");
    assert_eq!("vs30measured".parse::<SiteParam>().unwrap(), SiteParam::Vs30Measured);
}

#[test]
fn invalid_rupture_param_message() {
    let err = "moment".parse::<RuptureParam>().unwrap_err();
    assert_eq!(err.message(), "moment is not a valid rupture parameter");
    assert_eq!("hypo_depth".parse::<RuptureParam>().unwrap(), RuptureParam::HypoDepth);
}
