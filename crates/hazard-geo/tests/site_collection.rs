use hazard_core::{ContextValue, SiteParam};
use hazard_geo::{Point, Site, SiteCollection};

fn three_sites() -> SiteCollection {
    SiteCollection::new(vec![
        Site::new(Point::new(1.0, 2.0), 456.0, false, 12.1, 15.1),
        Site::new(Point::new(-2.0, -3.0), 1456.0, true, 112.1, 115.1).with_backarc(true),
        Site::new(Point::at_depth(0.5, 0.5, 0.2), 300.0, true, 50.0, 1.0),
    ])
}

#[test]
fn params_follow_site_order() {
    let sites = three_sites();
    assert_eq!(
        sites.param(SiteParam::Vs30),
        ContextValue::Floats(vec![456.0, 1456.0, 300.0])
    );
    assert_eq!(
        sites.param(SiteParam::Vs30Measured),
        ContextValue::Bools(vec![false, true, true])
    );
    assert_eq!(
        sites.param(SiteParam::Backarc),
        ContextValue::Bools(vec![false, true, false])
    );
    assert_eq!(
        sites.param(SiteParam::Lons),
        ContextValue::Floats(vec![1.0, -2.0, 0.5])
    );
    assert_eq!(
        sites.param(SiteParam::Depths),
        ContextValue::Floats(vec![0.0, 0.0, 0.2])
    );
    assert_eq!(
        sites.param(SiteParam::Sids),
        ContextValue::Floats(vec![0.0, 1.0, 2.0])
    );
}

#[test]
fn filter_keeps_order_and_ids() {
    let sites = three_sites();
    let kept = sites.filter(&[true, false, true]);
    assert_eq!(kept.len(), 2);
    assert_eq!(kept.sids(), &[0, 2]);
    assert_eq!(kept.param(SiteParam::Vs30), ContextValue::Floats(vec![456.0, 300.0]));
}

#[test]
fn split_produces_consecutive_blocks() {
    let sites = three_sites();
    let blocks = sites.split(2);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].sids(), &[0, 1]);
    assert_eq!(blocks[1].sids(), &[2]);
    assert_eq!(sites.split(0).len(), 3);
}

#[test]
fn mesh_mirrors_locations() {
    let mesh = three_sites().mesh();
    assert_eq!(mesh.len(), 3);
    assert_eq!(mesh.lats, vec![2.0, -3.0, 0.5]);
    assert_eq!(mesh.points().nth(2), Some(Point::at_depth(0.5, 0.5, 0.2)));
}

#[test]
fn sites_deserialize_with_default_backarc() {
    let site: Site = serde_json::from_str(
        r#"{"location": {"longitude": 26.5, "latitude": 45.7}, "vs30": 400.0,
            "vs30measured": true, "z1pt0": 30.0, "z2pt5": 0.8}"#,
    )
    .expect("site json");
    assert!(!site.backarc);
    assert_eq!(site.location.depth, 0.0);
}
