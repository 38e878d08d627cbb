//! Vacareanu et al. (2015) in-slab model for the Vrancea subduction zone.

use std::sync::OnceLock;

use hazard_core::errors::HazardError;
use hazard_core::{Imc, Imt, ImtKind, StdDev, Trt};

use crate::capabilities::Capabilities;
use crate::coeffs::{Coeffs, CoeffsTable};
use crate::contexts::{DistancesContext, RuptureContext, SitesContext};
use crate::gsim::{GroundMotionModel, Prediction};

/// Standard gravity, m/s².
const G: f64 = 9.81;

/// Period-dependent coefficients (table 3). Amplitudes are in cm/s² for
/// PGA and SA and in cm/s for PGV.
const COEFFS_TABLE: &str = "\
imt     c1      c2      c3      c4      c5      c6      c7      c8      c9      c10     sigma   tau     phi
pgv     10.2438 1.8264  -0.0522 -3.6280 0.0036  0.0101  0.0017  6.6201  6.9340  0       0.751   0.334   0.672
pga     9.6231  1.4232  -0.1555 -1.1316 -0.0114 -0.0024 -0.0007 -0.0835 0.1589  0.0488  0.698   0.406   0.568
0.1     9.6981  1.3679  -0.1423 -0.9889 -0.0135 -0.0026 -0.0017 -0.1965 0.167   0.002   0.806   0.468   0.656
0.2     10.009  1.362   -0.1138 -1.0371 -0.0127 -0.0032 -0.0004 -0.1547 0.2861  0.086   0.792   0.469   0.638
0.3     10.7033 1.458   -0.1187 -1.234  -0.0106 -0.0026 0       -0.1014 0.2659  0.0991  0.783   0.48    0.619
0.4     10.7701 1.5748  -0.1439 -1.3207 -0.0093 -0.0022 0.0005  -0.1076 0.3062  0.1183  0.81    0.519   0.622
0.5     9.2327  1.6739  -0.1664 -1.0022 -0.01   -0.0041 0.0007  -0.0259 0.2576  0.0722  0.767   0.461   0.613
0.6     8.6445  1.7672  -0.1925 -0.8938 -0.0099 -0.0045 -0.0004 -0.1038 0.2181  0.0179  0.74    0.429   0.603
0.7     8.7134  1.85    -0.199  -0.978  -0.0088 -0.0039 0.0002  -0.1867 0.1564  0.0006  0.735   0.426   0.599
0.8     9.0835  1.9066  -0.2022 -1.1044 -0.0078 -0.0031 0.0005  -0.2901 0.0546  -0.1019 0.726   0.417   0.594
0.9     9.1274  1.9662  -0.2465 -1.1437 -0.0074 -0.0031 0.0001  -0.2804 0.0884  -0.079  0.719   0.403   0.596
1       8.9987  1.9964  -0.2658 -1.1226 -0.0071 -0.0031 -0.0009 -0.2992 0.0739  -0.0955 0.715   0.4     0.592
1.2     8.0465  2.0432  -0.2241 -0.9654 -0.0072 -0.0041 -0.0013 -0.2681 0.1476  -0.0412 0.713   0.392   0.595
1.4     7.0585  2.1148  -0.2167 -0.8011 -0.0078 -0.0049 -0.0013 -0.2566 0.2009  -0.0068 0.714   0.392   0.597
1.6     6.8329  2.1668  -0.2418 -0.8036 -0.0075 -0.0047 -0.0018 -0.2268 0.2272  0.0211  0.732   0.418   0.601
1.8     6.4292  2.1988  -0.2468 -0.7625 -0.0073 -0.0047 -0.002  -0.2464 0.22    0.0082  0.745   0.427   0.611
2       6.3876  2.2151  -0.2289 -0.8004 -0.0066 -0.0043 -0.0024 -0.2767 0.2134  -0.0091 0.744   0.425   0.611
2.5     4.4248  2.2541  -0.2144 -0.428  -0.0079 -0.0061 -0.0031 -0.2924 0.2108  -0.0177 0.75    0.42    0.622
3       4.5395  2.2812  -0.2256 -0.534  -0.0072 -0.0054 -0.0034 -0.3066 0.184   -0.0387 0.765   0.436   0.629
3.5     4.7407  2.2803  -0.2456 -0.625  -0.0065 -0.0045 -0.0041 -0.3728 0.0918  -0.1192 0.778   0.436   0.645
";

fn coeffs_table() -> Result<&'static CoeffsTable, HazardError> {
    static TABLE: OnceLock<Result<CoeffsTable, HazardError>> = OnceLock::new();
    TABLE
        .get_or_init(|| CoeffsTable::from_text(5.0, COEFFS_TABLE))
        .as_ref()
        .map_err(Clone::clone)
}

fn capabilities() -> &'static Capabilities {
    static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();
    CAPABILITIES.get_or_init(|| {
        Capabilities::new()
            .with_trt(Trt::SubductionIntraslab)
            .with_imts([ImtKind::Pga, ImtKind::Pgv, ImtKind::Sa])
            .with_component(Imc::AverageHorizontal)
            .with_stddevs([StdDev::Total, StdDev::InterEvent, StdDev::IntraEvent])
            .with_sites_parameters(["vs30", "backarc"])
            .with_rupture_parameters(["mag", "hypo_depth"])
            .with_distances(["rhypo"])
    })
}

/// Site class indicators `(S_B, S_C, S_D)` for one vs30 value.
/// Sites at or above 800 m/s are the reference rock.
fn site_class(vs30: f64) -> (f64, f64, f64) {
    if (360.0..800.0).contains(&vs30) {
        (1.0, 0.0, 0.0)
    } else if (180.0..360.0).contains(&vs30) {
        (0.0, 1.0, 0.0)
    } else if vs30 < 180.0 {
        (0.0, 0.0, 1.0)
    } else {
        (0.0, 0.0, 0.0)
    }
}

/// Intermediate-depth Vrancea model of Vacareanu, Radulian, Iancovici,
/// Pavel and Neagu (2015).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VacareanuEtAl2015;

impl VacareanuEtAl2015 {
    fn magnitude_term(c: &Coeffs, mag: f64) -> Result<f64, HazardError> {
        let dm = mag - 6.0;
        Ok(c.get("c1")? + c.get("c2")? * dm + c.get("c3")? * dm * dm)
    }

    fn distance_term(c: &Coeffs, rhypo: f64) -> Result<f64, HazardError> {
        Ok(c.get("c4")? * rhypo.ln())
    }

    fn forearc_backarc_term(c: &Coeffs, backarc: bool, rhypo: f64) -> Result<f64, HazardError> {
        let arc = if backarc { 1.0 } else { 0.0 };
        Ok(c.get("c5")? * (1.0 - arc) * rhypo + c.get("c6")? * arc * rhypo)
    }

    fn focal_depth_term(c: &Coeffs, hypo_depth: f64) -> Result<f64, HazardError> {
        Ok(c.get("c7")? * hypo_depth)
    }

    fn site_response_term(c: &Coeffs, vs30: f64) -> Result<f64, HazardError> {
        let (sb, sc, sd) = site_class(vs30);
        Ok(sb * c.get("c8")? + sc * c.get("c9")? + sd * c.get("c10")?)
    }

    fn stddevs(
        c: &Coeffs,
        stddev_types: &[StdDev],
        num_sites: usize,
    ) -> Result<Vec<Vec<f64>>, HazardError> {
        stddev_types
            .iter()
            .map(|stddev| {
                let value = match stddev {
                    StdDev::Total => c.get("sigma")?,
                    StdDev::InterEvent => c.get("tau")?,
                    StdDev::IntraEvent => c.get("phi")?,
                };
                Ok(vec![value; num_sites])
            })
            .collect()
    }
}

impl GroundMotionModel for VacareanuEtAl2015 {
    fn name(&self) -> &'static str {
        "VacareanuEtAl2015"
    }

    fn capabilities(&self) -> &Capabilities {
        capabilities()
    }

    fn get_mean_and_stddevs(
        &self,
        sites: &SitesContext,
        rup: &RuptureContext,
        dists: &DistancesContext,
        imt: &Imt,
        stddev_types: &[StdDev],
    ) -> Result<Prediction, HazardError> {
        let c = coeffs_table()?.get(imt)?;
        let vs30 = sites.floats("vs30")?;
        let backarc = sites.bools("backarc")?;
        let rhypo = dists.floats("rhypo")?;
        let mag = rup.scalar("mag")?;
        let hypo_depth = rup.scalar("hypo_depth")?;

        let event_terms =
            Self::magnitude_term(&c, mag)? + Self::focal_depth_term(&c, hypo_depth)?;
        // PGA and SA are tabulated in cm/s²
        let unit_shift = match imt {
            Imt::Pgv => 0.0,
            _ => (100.0 * G).ln(),
        };
        let mean = vs30
            .iter()
            .zip(backarc)
            .zip(rhypo)
            .map(|((vs30, backarc), rhypo)| {
                Ok(event_terms
                    + Self::distance_term(&c, *rhypo)?
                    + Self::forearc_backarc_term(&c, *backarc, *rhypo)?
                    + Self::site_response_term(&c, *vs30)?
                    - unit_shift)
            })
            .collect::<Result<Vec<_>, HazardError>>()?;
        let stddevs = Self::stddevs(&c, stddev_types, mean.len())?;
        Ok(Prediction { mean, stddevs })
    }
}
