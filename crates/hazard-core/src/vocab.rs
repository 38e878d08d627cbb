//! Closed vocabularies for model capability declarations.
//!
//! Models declare their requirements as plain names so that a declaration
//! can never fail to construct. Names are resolved against the enums below
//! when contexts are assembled; anything outside them is a configuration
//! error at that point.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HazardError};

/// Distance measures a context maker knows how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMeasure {
    /// Joyner-Boore distance to the surface projection of the rupture.
    Rjb,
    /// Horizontal distance to the top edge, measured perpendicular to strike.
    Rx,
    /// Horizontal distance beyond the rupture ends, measured along strike.
    Ry0,
    /// Closest distance to the rupture.
    Rrup,
    /// Hypocentral distance.
    Rhypo,
    /// Epicentral distance.
    Repi,
    /// Source-to-site azimuth relative to strike.
    Azimuth,
    /// Directivity predictor.
    Rcdpp,
    /// Path length through volcanic zones.
    Rvolc,
}

impl DistanceMeasure {
    /// Every distance measure in declaration order.
    pub const ALL: [DistanceMeasure; 9] = [
        DistanceMeasure::Rjb,
        DistanceMeasure::Rx,
        DistanceMeasure::Ry0,
        DistanceMeasure::Rrup,
        DistanceMeasure::Rhypo,
        DistanceMeasure::Repi,
        DistanceMeasure::Azimuth,
        DistanceMeasure::Rcdpp,
        DistanceMeasure::Rvolc,
    ];

    /// Returns the canonical field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceMeasure::Rjb => "rjb",
            DistanceMeasure::Rx => "rx",
            DistanceMeasure::Ry0 => "ry0",
            DistanceMeasure::Rrup => "rrup",
            DistanceMeasure::Rhypo => "rhypo",
            DistanceMeasure::Repi => "repi",
            DistanceMeasure::Azimuth => "azimuth",
            DistanceMeasure::Rcdpp => "rcdpp",
            DistanceMeasure::Rvolc => "rvolc",
        }
    }
}

impl FromStr for DistanceMeasure {
    type Err = HazardError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        DistanceMeasure::ALL
            .into_iter()
            .find(|measure| measure.as_str() == name)
            .ok_or_else(|| {
                HazardError::Config(
                    ErrorInfo::new(
                        "unknown-distance",
                        format!("Unknown distance measure '{name}'"),
                    )
                    .with_context("name", name),
                )
            })
    }
}

impl fmt::Display for DistanceMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-site parameters a site collection can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteParam {
    /// Average shear-wave velocity in the top 30 m.
    Vs30,
    /// Whether vs30 was measured rather than inferred.
    Vs30Measured,
    /// Depth to the 1.0 km/s velocity horizon, in metres.
    Z1pt0,
    /// Depth to the 2.5 km/s velocity horizon, in kilometres.
    Z2pt5,
    /// Whether the site lies in the back-arc region.
    Backarc,
    /// Site longitudes.
    Lons,
    /// Site latitudes.
    Lats,
    /// Site depths.
    Depths,
    /// Site identifiers.
    Sids,
}

impl SiteParam {
    /// Every site parameter in declaration order.
    pub const ALL: [SiteParam; 9] = [
        SiteParam::Vs30,
        SiteParam::Vs30Measured,
        SiteParam::Z1pt0,
        SiteParam::Z2pt5,
        SiteParam::Backarc,
        SiteParam::Lons,
        SiteParam::Lats,
        SiteParam::Depths,
        SiteParam::Sids,
    ];

    /// Returns the canonical field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteParam::Vs30 => "vs30",
            SiteParam::Vs30Measured => "vs30measured",
            SiteParam::Z1pt0 => "z1pt0",
            SiteParam::Z2pt5 => "z2pt5",
            SiteParam::Backarc => "backarc",
            SiteParam::Lons => "lons",
            SiteParam::Lats => "lats",
            SiteParam::Depths => "depths",
            SiteParam::Sids => "sids",
        }
    }
}

impl FromStr for SiteParam {
    type Err = HazardError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        SiteParam::ALL
            .into_iter()
            .find(|param| param.as_str() == name)
            .ok_or_else(|| {
                HazardError::Config(
                    ErrorInfo::new(
                        "invalid-site-param",
                        format!("{name} is not a valid site parameter"),
                    )
                    .with_context("name", name),
                )
            })
    }
}

impl fmt::Display for SiteParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar rupture parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuptureParam {
    /// Moment magnitude.
    Mag,
    /// Rake angle in degrees.
    Rake,
    /// Surface strike in degrees.
    Strike,
    /// Surface dip in degrees.
    Dip,
    /// Depth to the top of the rupture.
    Ztor,
    /// Hypocenter longitude.
    HypoLon,
    /// Hypocenter latitude.
    HypoLat,
    /// Hypocenter depth.
    HypoDepth,
    /// Down-dip rupture width.
    Width,
}

impl RuptureParam {
    /// Every rupture parameter in declaration order.
    pub const ALL: [RuptureParam; 9] = [
        RuptureParam::Mag,
        RuptureParam::Rake,
        RuptureParam::Strike,
        RuptureParam::Dip,
        RuptureParam::Ztor,
        RuptureParam::HypoLon,
        RuptureParam::HypoLat,
        RuptureParam::HypoDepth,
        RuptureParam::Width,
    ];

    /// Returns the canonical field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuptureParam::Mag => "mag",
            RuptureParam::Rake => "rake",
            RuptureParam::Strike => "strike",
            RuptureParam::Dip => "dip",
            RuptureParam::Ztor => "ztor",
            RuptureParam::HypoLon => "hypo_lon",
            RuptureParam::HypoLat => "hypo_lat",
            RuptureParam::HypoDepth => "hypo_depth",
            RuptureParam::Width => "width",
        }
    }
}

impl FromStr for RuptureParam {
    type Err = HazardError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        RuptureParam::ALL
            .into_iter()
            .find(|param| param.as_str() == name)
            .ok_or_else(|| {
                HazardError::Config(
                    ErrorInfo::new(
                        "invalid-rupture-param",
                        format!("{name} is not a valid rupture parameter"),
                    )
                    .with_context("name", name),
                )
            })
    }
}

impl fmt::Display for RuptureParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decomposition of prediction uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StdDev {
    /// Total standard deviation.
    Total,
    /// Between-event component.
    InterEvent,
    /// Within-event component.
    IntraEvent,
}

impl fmt::Display for StdDev {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StdDev::Total => "Total",
            StdDev::InterEvent => "Inter event",
            StdDev::IntraEvent => "Intra event",
        })
    }
}

/// Seismotectonic settings a model can be calibrated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Trt {
    /// Active shallow crust.
    ActiveShallowCrust,
    /// Stable continental region.
    StableContinental,
    /// Subduction interface.
    SubductionInterface,
    /// Subduction in-slab.
    SubductionIntraslab,
    /// Volcanic.
    Volcanic,
    /// Geothermal.
    Geothermal,
    /// Induced seismicity.
    Induced,
}

impl Trt {
    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Trt::ActiveShallowCrust => "Active Shallow Crust",
            Trt::StableContinental => "Stable Continental Crust",
            Trt::SubductionInterface => "Subduction Interface",
            Trt::SubductionIntraslab => "Subduction IntraSlab",
            Trt::Volcanic => "Volcanic",
            Trt::Geothermal => "Geothermal",
            Trt::Induced => "Induced",
        }
    }
}

impl fmt::Display for Trt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Horizontal or vertical component convention of the predicted IMT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Imc {
    /// Geometric mean of the two horizontal components.
    AverageHorizontal,
    /// Orientation-independent geometric mean, 50th percentile.
    GmRotI50,
    /// Median of rotated components.
    RotD50,
    /// Larger of the two horizontal components.
    GreaterOfTwoHorizontal,
    /// Randomly chosen horizontal component.
    Horizontal,
    /// Vertical component.
    Vertical,
}
