use hazard_core::{ContextValue, SiteParam};
use serde::{Deserialize, Serialize};

use crate::point::{Mesh, Point};

/// Observation site with its geotechnical parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Site location.
    pub location: Point,
    /// Average shear-wave velocity in the top 30 m, m/s.
    pub vs30: f64,
    /// Whether `vs30` was measured.
    pub vs30measured: bool,
    /// Depth to the 1.0 km/s velocity horizon, m.
    pub z1pt0: f64,
    /// Depth to the 2.5 km/s velocity horizon, km.
    pub z2pt5: f64,
    /// Whether the site is in the back-arc region of a subduction zone.
    #[serde(default)]
    pub backarc: bool,
}

impl Site {
    /// Creates a fore-arc (or arc-agnostic) site.
    pub fn new(location: Point, vs30: f64, vs30measured: bool, z1pt0: f64, z2pt5: f64) -> Self {
        Self {
            location,
            vs30,
            vs30measured,
            z1pt0,
            z2pt5,
            backarc: false,
        }
    }

    /// Marks the site as back-arc (or not).
    pub fn with_backarc(mut self, backarc: bool) -> Self {
        self.backarc = backarc;
        self
    }
}

/// Ordered collection of sites.
///
/// Site order is the only ordering key: every per-site vector produced from
/// a collection is aligned to it. Each site keeps the id it had in the
/// collection it was first built into, so subsets produced by
/// [`SiteCollection::filter`] and [`SiteCollection::split`] can be mapped
/// back.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SiteCollection {
    sites: Vec<Site>,
    sids: Vec<usize>,
}

impl SiteCollection {
    /// Creates a collection; site ids are the positions in `sites`.
    pub fn new(sites: Vec<Site>) -> Self {
        let sids = (0..sites.len()).collect();
        Self { sites, sids }
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether the collection has no sites.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Sites in collection order.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Site ids in collection order.
    pub fn sids(&self) -> &[usize] {
        &self.sids
    }

    /// Locations of all sites as a mesh.
    pub fn mesh(&self) -> Mesh {
        Mesh::from_points(self.sites.iter().map(|site| &site.location))
    }

    /// Extracts one parameter as a per-site vector, in site order.
    pub fn param(&self, param: SiteParam) -> ContextValue {
        let floats = |f: fn(&Site) -> f64| ContextValue::Floats(self.sites.iter().map(f).collect());
        let flags = |f: fn(&Site) -> bool| ContextValue::Bools(self.sites.iter().map(f).collect());
        match param {
            SiteParam::Vs30 => floats(|site| site.vs30),
            SiteParam::Vs30Measured => flags(|site| site.vs30measured),
            SiteParam::Z1pt0 => floats(|site| site.z1pt0),
            SiteParam::Z2pt5 => floats(|site| site.z2pt5),
            SiteParam::Backarc => flags(|site| site.backarc),
            SiteParam::Lons => floats(|site| site.location.longitude),
            SiteParam::Lats => floats(|site| site.location.latitude),
            SiteParam::Depths => floats(|site| site.location.depth),
            SiteParam::Sids => ContextValue::Floats(self.sids.iter().map(|sid| *sid as f64).collect()),
        }
    }

    /// Great-circle distances from every site to `epicenter`.
    pub fn epicentral_distances(&self, epicenter: &Point) -> Vec<f64> {
        self.sites
            .iter()
            .map(|site| site.location.epicentral_distance(epicenter))
            .collect()
    }

    /// Straight-line distances from every site to `hypocenter`.
    pub fn hypocentral_distances(&self, hypocenter: &Point) -> Vec<f64> {
        self.sites
            .iter()
            .map(|site| site.location.distance(hypocenter))
            .collect()
    }

    /// Keeps the sites whose mask entry is `true`, preserving order and ids.
    pub fn filter(&self, mask: &[bool]) -> SiteCollection {
        let (sites, sids) = self
            .sites
            .iter()
            .zip(&self.sids)
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .map(|((site, sid), _)| (site.clone(), *sid))
            .unzip();
        SiteCollection { sites, sids }
    }

    /// Splits the collection into consecutive blocks of at most `block_size` sites.
    pub fn split(&self, block_size: usize) -> Vec<SiteCollection> {
        let block_size = block_size.max(1);
        self.sites
            .chunks(block_size)
            .zip(self.sids.chunks(block_size))
            .map(|(sites, sids)| SiteCollection {
                sites: sites.to_vec(),
                sids: sids.to_vec(),
            })
            .collect()
    }
}

impl FromIterator<Site> for SiteCollection {
    fn from_iter<I: IntoIterator<Item = Site>>(iter: I) -> Self {
        SiteCollection::new(iter.into_iter().collect())
    }
}
