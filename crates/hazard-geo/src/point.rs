use serde::{Deserialize, Serialize};

use crate::geodetic;

/// Geographic point with depth (km, positive down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Depth in kilometres.
    #[serde(default)]
    pub depth: f64,
}

impl Point {
    /// Creates a point at the surface.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            depth: 0.0,
        }
    }

    /// Creates a point at depth.
    pub fn at_depth(longitude: f64, latitude: f64, depth: f64) -> Self {
        Self {
            longitude,
            latitude,
            depth,
        }
    }

    /// Great-circle distance to another point, ignoring depth.
    pub fn epicentral_distance(&self, other: &Point) -> f64 {
        geodetic::geodetic_distance(
            self.longitude,
            self.latitude,
            other.longitude,
            other.latitude,
        )
    }

    /// Straight-line distance to another point, including depth.
    pub fn distance(&self, other: &Point) -> f64 {
        geodetic::distance(
            self.longitude,
            self.latitude,
            self.depth,
            other.longitude,
            other.latitude,
            other.depth,
        )
    }
}

/// Column-oriented collection of points, the shape surfaces compute against.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    /// Longitudes of each point.
    pub lons: Vec<f64>,
    /// Latitudes of each point.
    pub lats: Vec<f64>,
    /// Depths of each point.
    pub depths: Vec<f64>,
}

impl Mesh {
    /// Builds a mesh from a sequence of points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut mesh = Mesh::default();
        for point in points {
            mesh.lons.push(point.longitude);
            mesh.lats.push(point.latitude);
            mesh.depths.push(point.depth);
        }
        mesh
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.lons.len()
    }

    /// Whether the mesh has no points.
    pub fn is_empty(&self) -> bool {
        self.lons.is_empty()
    }

    /// Iterates over the points of the mesh.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.lons
            .iter()
            .zip(&self.lats)
            .zip(&self.depths)
            .map(|((lon, lat), depth)| Point::at_depth(*lon, *lat, *depth))
    }
}
