use std::fmt::Debug;

use hazard_core::errors::{ErrorInfo, HazardError};
use serde::{Deserialize, Serialize};

use crate::geodetic;
use crate::point::{Mesh, Point};

/// Geometry queries a rupture surface answers.
///
/// Every distance method returns one value per mesh point, in mesh order.
/// Implementations may be expensive; callers are expected to ask each
/// question once per context assembly.
pub trait Surface: Debug + Send + Sync {
    /// Strike angle in degrees.
    fn strike(&self) -> f64;

    /// Dip angle in degrees.
    fn dip(&self) -> f64;

    /// Depth of the shallowest part of the surface, km.
    fn top_edge_depth(&self) -> f64;

    /// Down-dip width, km.
    fn width(&self) -> f64;

    /// Closest distance from each point to the surface (rrup).
    fn min_distance(&self, mesh: &Mesh) -> Vec<f64>;

    /// Closest distance to the surface projection (rjb).
    fn joyner_boore_distance(&self, mesh: &Mesh) -> Vec<f64>;

    /// Signed distance to the top edge, perpendicular to strike (rx).
    fn rx_distance(&self, mesh: &Mesh) -> Vec<f64>;

    /// Distance beyond the along-strike extent of the surface (ry0).
    fn ry0_distance(&self, mesh: &Mesh) -> Vec<f64>;

    /// Source-to-site azimuth relative to strike, degrees.
    fn azimuth(&self, mesh: &Mesh) -> Vec<f64>;

    /// Directivity predictor for a rupture nucleating at `hypocenter`.
    fn cdpp(&self, mesh: &Mesh, hypocenter: &Point) -> Result<Vec<f64>, HazardError> {
        let _ = (mesh, hypocenter);
        Err(HazardError::Geometry(
            ErrorInfo::new(
                "unsupported-distance",
                "surface does not provide the rcdpp directivity predictor",
            )
            .with_context("surface", format!("{self:?}")),
        ))
    }
}

/// Degenerate surface collapsed onto a single point.
///
/// Used for point sources: the rupture has an orientation but no extent, so
/// Joyner-Boore distance equals epicentral distance and closest distance
/// equals hypocentral distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSurface {
    /// Location of the point rupture.
    pub location: Point,
    /// Strike, degrees.
    pub strike: f64,
    /// Dip, degrees.
    pub dip: f64,
}

impl PointSurface {
    /// Creates a point surface.
    pub fn new(location: Point, strike: f64, dip: f64) -> Self {
        Self {
            location,
            strike,
            dip,
        }
    }

    fn along_arc(&self, mesh: &Mesh, arc_azimuth: f64) -> Vec<f64> {
        mesh.lons
            .iter()
            .zip(&mesh.lats)
            .map(|(lon, lat)| {
                geodetic::distance_to_arc(
                    self.location.longitude,
                    self.location.latitude,
                    arc_azimuth,
                    *lon,
                    *lat,
                )
            })
            .collect()
    }
}

impl Surface for PointSurface {
    fn strike(&self) -> f64 {
        self.strike
    }

    fn dip(&self) -> f64 {
        self.dip
    }

    fn top_edge_depth(&self) -> f64 {
        self.location.depth
    }

    fn width(&self) -> f64 {
        0.0
    }

    fn min_distance(&self, mesh: &Mesh) -> Vec<f64> {
        mesh.points()
            .map(|point| point.distance(&self.location))
            .collect()
    }

    fn joyner_boore_distance(&self, mesh: &Mesh) -> Vec<f64> {
        mesh.points()
            .map(|point| point.epicentral_distance(&self.location))
            .collect()
    }

    fn rx_distance(&self, mesh: &Mesh) -> Vec<f64> {
        self.along_arc(mesh, self.strike)
    }

    fn ry0_distance(&self, mesh: &Mesh) -> Vec<f64> {
        // along-strike offset is the distance to the arc normal to strike
        self.along_arc(mesh, self.strike + 90.0)
            .into_iter()
            .map(f64::abs)
            .collect()
    }

    fn azimuth(&self, mesh: &Mesh) -> Vec<f64> {
        mesh.lons
            .iter()
            .zip(&mesh.lats)
            .map(|(lon, lat)| {
                let azim = geodetic::azimuth(
                    self.location.longitude,
                    self.location.latitude,
                    *lon,
                    *lat,
                );
                (azim - self.strike + 360.0).rem_euclid(360.0)
            })
            .collect()
    }
}
