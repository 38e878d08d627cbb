#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use hazard_core::errors::HazardError;
use hazard_core::{Imc, Imt, ImtKind, StdDev, Trt};
use hazard_geo::{Mesh, Point, Rupture, Site, SiteCollection, Surface};
use hazard_gsim::{
    Capabilities, DistancesContext, GroundMotionModel, IntensityScale, Prediction,
    RuptureContext, SitesContext,
};

pub fn assert_allclose(actual: &[f64], expected: &[f64], rtol: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            (a - e).abs() <= rtol * e.abs().max(1e-12),
            "expected {expected:?}, got {actual:?}"
        );
    }
}

#[derive(Debug, Default)]
struct CallLog(Mutex<BTreeMap<&'static str, usize>>);

impl CallLog {
    fn record(&self, name: &'static str) {
        let mut calls = self.0.lock().unwrap();
        *calls.entry(name).or_default() += 1;
    }

    fn counts(&self) -> BTreeMap<&'static str, usize> {
        self.0.lock().unwrap().clone()
    }
}

/// Surface returning fixed geometry for the two reference sites and
/// recording every call.
#[derive(Debug, Default)]
pub struct FakeSurface {
    calls: CallLog,
}

impl FakeSurface {
    pub fn call_counts(&self) -> BTreeMap<&'static str, usize> {
        self.calls.counts()
    }

    fn distances(&self, name: &'static str, mesh: &Mesh, values: [f64; 2]) -> Vec<f64> {
        assert_eq!(mesh.lons, vec![1.0, -2.0]);
        assert_eq!(mesh.lats, vec![2.0, -3.0]);
        self.calls.record(name);
        values.to_vec()
    }
}

impl Surface for FakeSurface {
    fn strike(&self) -> f64 {
        self.calls.record("strike");
        60.123
    }

    fn dip(&self) -> f64 {
        self.calls.record("dip");
        45.4545
    }

    fn top_edge_depth(&self) -> f64 {
        self.calls.record("top_edge_depth");
        30.0
    }

    fn width(&self) -> f64 {
        self.calls.record("width");
        15.0
    }

    fn min_distance(&self, mesh: &Mesh) -> Vec<f64> {
        self.distances("min_distance", mesh, [10.0, 11.0])
    }

    fn joyner_boore_distance(&self, mesh: &Mesh) -> Vec<f64> {
        self.distances("joyner_boore_distance", mesh, [6.0, 7.0])
    }

    fn rx_distance(&self, mesh: &Mesh) -> Vec<f64> {
        self.distances("rx_distance", mesh, [4.0, 5.0])
    }

    fn ry0_distance(&self, mesh: &Mesh) -> Vec<f64> {
        self.distances("ry0_distance", mesh, [8.0, 9.0])
    }

    fn azimuth(&self, mesh: &Mesh) -> Vec<f64> {
        self.distances("azimuth", mesh, [12.0, 34.0])
    }

    fn cdpp(&self, mesh: &Mesh, _hypocenter: &Point) -> Result<Vec<f64>, HazardError> {
        Ok(self.distances("cdpp", mesh, [0.5, 0.7]))
    }
}

/// Decorator counting calls made to a real surface.
#[derive(Debug)]
pub struct CountingSurface<S: Surface> {
    inner: S,
    calls: CallLog,
}

impl<S: Surface> CountingSurface<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: CallLog::default(),
        }
    }

    pub fn call_counts(&self) -> BTreeMap<&'static str, usize> {
        self.calls.counts()
    }
}

impl<S: Surface> Surface for CountingSurface<S> {
    fn strike(&self) -> f64 {
        self.calls.record("strike");
        self.inner.strike()
    }

    fn dip(&self) -> f64 {
        self.calls.record("dip");
        self.inner.dip()
    }

    fn top_edge_depth(&self) -> f64 {
        self.calls.record("top_edge_depth");
        self.inner.top_edge_depth()
    }

    fn width(&self) -> f64 {
        self.calls.record("width");
        self.inner.width()
    }

    fn min_distance(&self, mesh: &Mesh) -> Vec<f64> {
        self.calls.record("min_distance");
        self.inner.min_distance(mesh)
    }

    fn joyner_boore_distance(&self, mesh: &Mesh) -> Vec<f64> {
        self.calls.record("joyner_boore_distance");
        self.inner.joyner_boore_distance(mesh)
    }

    fn rx_distance(&self, mesh: &Mesh) -> Vec<f64> {
        self.calls.record("rx_distance");
        self.inner.rx_distance(mesh)
    }

    fn ry0_distance(&self, mesh: &Mesh) -> Vec<f64> {
        self.calls.record("ry0_distance");
        self.inner.ry0_distance(mesh)
    }

    fn azimuth(&self, mesh: &Mesh) -> Vec<f64> {
        self.calls.record("azimuth");
        self.inner.azimuth(mesh)
    }
}

pub fn reference_sites() -> SiteCollection {
    SiteCollection::new(vec![
        Site::new(Point::new(1.0, 2.0), 456.0, false, 12.1, 15.1),
        Site::new(Point::new(-2.0, -3.0), 1456.0, true, 112.1, 115.1),
    ])
}

pub fn reference_rupture(surface: Arc<dyn Surface>) -> Rupture {
    Rupture::new(
        123.45,
        123.56,
        Some(Trt::Volcanic),
        Point::at_depth(2.0, 3.0, 40.0),
        surface,
    )
}

/// Configurable model double: returns zero means and unit stddevs.
#[derive(Debug, Clone)]
pub struct FakeGsim {
    pub name: &'static str,
    pub capabilities: Capabilities,
    pub scale: IntensityScale,
    pub superseded_by: Option<&'static str>,
    pub non_verified: bool,
}

impl FakeGsim {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            capabilities: Capabilities::new()
                .with_trt(Trt::Volcanic)
                .with_imts([ImtKind::Pga, ImtKind::Sa])
                .with_component(Imc::GmRotI50)
                .with_stddevs([StdDev::Total]),
            scale: IntensityScale::LogNormal,
            superseded_by: None,
            non_verified: false,
        }
    }

    pub fn requiring(
        name: &'static str,
        distances: &[&str],
        site_params: &[&str],
        rupture_params: &[&str],
    ) -> Self {
        let mut gsim = Self::new(name);
        gsim.capabilities = gsim
            .capabilities
            .with_distances(distances.iter().copied())
            .with_sites_parameters(site_params.iter().copied())
            .with_rupture_parameters(rupture_params.iter().copied());
        gsim
    }
}

impl GroundMotionModel for FakeGsim {
    fn name(&self) -> &'static str {
        self.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn scale(&self) -> IntensityScale {
        self.scale
    }

    fn superseded_by(&self) -> Option<&'static str> {
        self.superseded_by
    }

    fn non_verified(&self) -> bool {
        self.non_verified
    }

    fn get_mean_and_stddevs(
        &self,
        sites: &SitesContext,
        _rup: &RuptureContext,
        dists: &DistancesContext,
        _imt: &Imt,
        stddev_types: &[StdDev],
    ) -> Result<Prediction, HazardError> {
        let n = sites.num_sites().or_else(|| dists.num_sites()).unwrap_or(0);
        Ok(Prediction {
            mean: vec![0.0; n],
            stddevs: stddev_types.iter().map(|_| vec![1.0; n]).collect(),
        })
    }
}
