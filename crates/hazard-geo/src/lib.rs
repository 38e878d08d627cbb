#![deny(missing_docs)]
#![doc = "Sites, ruptures and surface geometry consumed by the hazard context maker."]

pub mod geodetic;
mod point;
mod rupture;
mod site;
mod surface;

pub use point::{Mesh, Point};
pub use rupture::Rupture;
pub use site::{Site, SiteCollection};
pub use surface::{PointSurface, Surface};
