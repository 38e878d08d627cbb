use std::sync::Arc;

use hazard_core::Trt;

use crate::point::Point;
use crate::surface::Surface;

/// Single earthquake rupture.
///
/// The surface is shared behind an `Arc` so a rupture can be cloned into
/// parallel site batches without copying geometry.
#[derive(Debug, Clone)]
pub struct Rupture {
    /// Moment magnitude.
    pub mag: f64,
    /// Rake angle, degrees.
    pub rake: f64,
    /// Tectonic region the rupture belongs to, if known.
    pub tectonic_region_type: Option<Trt>,
    /// Nucleation point.
    pub hypocenter: Point,
    /// Rupture surface.
    pub surface: Arc<dyn Surface>,
}

impl Rupture {
    /// Creates a rupture.
    pub fn new(
        mag: f64,
        rake: f64,
        tectonic_region_type: Option<Trt>,
        hypocenter: Point,
        surface: Arc<dyn Surface>,
    ) -> Self {
        Self {
            mag,
            rake,
            tectonic_region_type,
            hypocenter,
            surface,
        }
    }

    /// Surface projection of the hypocenter.
    pub fn epicenter(&self) -> Point {
        Point::new(self.hypocenter.longitude, self.hypocenter.latitude)
    }
}
