//! Context assembly for a set of candidate models.

use std::collections::{BTreeMap, BTreeSet};

use hazard_core::errors::{ErrorInfo, HazardError};
use hazard_core::{DistanceMeasure, Imt, RuptureParam, SiteParam, StdDev};
use hazard_geo::{Mesh, Rupture, SiteCollection};
use serde::{Deserialize, Serialize};

use crate::contexts::{DistancesContext, RuptureContext, SitesContext};
use crate::gsim::{Gsim, Prediction};
use crate::params::ContextMakerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SurfaceScalar {
    Strike,
    Dip,
    TopEdgeDepth,
    Width,
}

/// Geometry answers for one rupture and one site collection.
///
/// Lives for a single assembly call: each surface query and each distance
/// vector is computed at most once and dropped with the cache.
struct GeometryCache<'a> {
    sites: &'a SiteCollection,
    rupture: &'a Rupture,
    mesh: Mesh,
    scalars: BTreeMap<SurfaceScalar, f64>,
    distances: BTreeMap<DistanceMeasure, Vec<f64>>,
}

impl<'a> GeometryCache<'a> {
    fn new(sites: &'a SiteCollection, rupture: &'a Rupture) -> Self {
        Self {
            sites,
            rupture,
            mesh: sites.mesh(),
            scalars: BTreeMap::new(),
            distances: BTreeMap::new(),
        }
    }

    fn surface_scalar(&mut self, query: SurfaceScalar) -> f64 {
        let surface = &self.rupture.surface;
        *self.scalars.entry(query).or_insert_with(|| {
            tracing::trace!(?query, "surface query");
            match query {
                SurfaceScalar::Strike => surface.strike(),
                SurfaceScalar::Dip => surface.dip(),
                SurfaceScalar::TopEdgeDepth => surface.top_edge_depth(),
                SurfaceScalar::Width => surface.width(),
            }
        })
    }

    fn rupture_param(&mut self, param: RuptureParam) -> f64 {
        let hypocenter = self.rupture.hypocenter;
        match param {
            RuptureParam::Mag => self.rupture.mag,
            RuptureParam::Rake => self.rupture.rake,
            RuptureParam::Strike => self.surface_scalar(SurfaceScalar::Strike),
            RuptureParam::Dip => self.surface_scalar(SurfaceScalar::Dip),
            RuptureParam::Ztor => self.surface_scalar(SurfaceScalar::TopEdgeDepth),
            RuptureParam::Width => self.surface_scalar(SurfaceScalar::Width),
            RuptureParam::HypoLon => hypocenter.longitude,
            RuptureParam::HypoLat => hypocenter.latitude,
            RuptureParam::HypoDepth => hypocenter.depth,
        }
    }

    fn seed_distance(&mut self, measure: DistanceMeasure, values: Vec<f64>) {
        self.distances.insert(measure, values);
    }

    fn distance(&mut self, measure: DistanceMeasure) -> Result<&[f64], HazardError> {
        if !self.distances.contains_key(&measure) {
            let values = self.compute_distance(measure)?;
            if values.len() != self.sites.len() {
                return Err(HazardError::Geometry(
                    ErrorInfo::new(
                        "distance-misaligned",
                        format!("{measure} has {} values for {} sites", values.len(), self.sites.len()),
                    )
                    .with_context("distance", measure.as_str()),
                ));
            }
            self.distances.insert(measure, values);
        }
        Ok(self.distances.get(&measure).map(Vec::as_slice).unwrap_or_default())
    }

    fn compute_distance(&self, measure: DistanceMeasure) -> Result<Vec<f64>, HazardError> {
        tracing::trace!(distance = measure.as_str(), sites = self.sites.len(), "distance query");
        let surface = &self.rupture.surface;
        let hypocenter = &self.rupture.hypocenter;
        Ok(match measure {
            DistanceMeasure::Rjb => surface.joyner_boore_distance(&self.mesh),
            DistanceMeasure::Rx => surface.rx_distance(&self.mesh),
            DistanceMeasure::Ry0 => surface.ry0_distance(&self.mesh),
            DistanceMeasure::Rrup => surface.min_distance(&self.mesh),
            DistanceMeasure::Azimuth => surface.azimuth(&self.mesh),
            DistanceMeasure::Repi => self.sites.epicentral_distances(&self.rupture.epicenter()),
            DistanceMeasure::Rhypo => self.sites.hypocentral_distances(hypocenter),
            DistanceMeasure::Rcdpp => surface.cdpp(&self.mesh, hypocenter)?,
            DistanceMeasure::Rvolc => vec![0.0; self.sites.len()],
        })
    }
}

/// Contexts for the sites that survived maximum-distance filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredContexts {
    /// Ids of the surviving sites, in site order.
    pub sids: Vec<usize>,
    /// Site parameters of the surviving sites.
    pub sites: SitesContext,
    /// Rupture parameters.
    pub rupture: RuptureContext,
    /// Distances of the surviving sites.
    pub distances: DistancesContext,
}

/// Prediction of one model for one IMT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GsimOutput {
    /// Model name.
    pub gsim: String,
    /// Intensity-measure type.
    pub imt: Imt,
    /// Mean and standard deviations per site.
    pub prediction: Prediction,
}

/// Builds the contexts required by a set of candidate models.
///
/// The requirements are the unions, over every candidate, of the declared
/// distances, site parameters and rupture parameters, so the resulting
/// field sets do not depend on the order models are given in.
#[derive(Debug, Clone)]
pub struct ContextMaker {
    trt: String,
    gsims: Vec<Gsim>,
    config: ContextMakerConfig,
    requires_distances: BTreeSet<String>,
    requires_sites_parameters: BTreeSet<String>,
    requires_rupture_parameters: BTreeSet<String>,
}

impl ContextMaker {
    /// Creates a context maker with the default configuration.
    pub fn new(trt: impl Into<String>, gsims: impl IntoIterator<Item = Gsim>) -> Self {
        Self::with_config(trt, gsims, ContextMakerConfig::default())
    }

    /// Creates a context maker with an explicit configuration.
    pub fn with_config(
        trt: impl Into<String>,
        gsims: impl IntoIterator<Item = Gsim>,
        config: ContextMakerConfig,
    ) -> Self {
        let mut gsims: Vec<Gsim> = gsims.into_iter().collect();
        gsims.sort();
        gsims.dedup();
        let union = |select: fn(&Gsim) -> &BTreeSet<String>| -> BTreeSet<String> {
            gsims.iter().flat_map(|gsim| select(gsim).iter().cloned()).collect()
        };
        let requires_distances = union(|gsim| &gsim.capabilities().requires_distances);
        let requires_sites_parameters =
            union(|gsim| &gsim.capabilities().requires_sites_parameters);
        let requires_rupture_parameters =
            union(|gsim| &gsim.capabilities().requires_rupture_parameters);
        Self {
            trt: trt.into(),
            gsims,
            config: config.sanitised(),
            requires_distances,
            requires_sites_parameters,
            requires_rupture_parameters,
        }
    }

    /// Tectonic region type this maker serves.
    pub fn trt(&self) -> &str {
        &self.trt
    }

    /// Candidate models, sorted by name.
    pub fn gsims(&self) -> &[Gsim] {
        &self.gsims
    }

    /// Active configuration.
    pub fn config(&self) -> &ContextMakerConfig {
        &self.config
    }

    /// Union of required distance names.
    pub fn requires_distances(&self) -> &BTreeSet<String> {
        &self.requires_distances
    }

    /// Union of required site parameter names.
    pub fn requires_sites_parameters(&self) -> &BTreeSet<String> {
        &self.requires_sites_parameters
    }

    /// Union of required rupture parameter names.
    pub fn requires_rupture_parameters(&self) -> &BTreeSet<String> {
        &self.requires_rupture_parameters
    }

    /// Assembles site, rupture and distance contexts for every site.
    ///
    /// Fails on the first required name outside the vocabularies, or when
    /// the surface cannot answer a required distance.
    pub fn make_contexts(
        &self,
        sites: &SiteCollection,
        rupture: &Rupture,
    ) -> Result<(SitesContext, RuptureContext, DistancesContext), HazardError> {
        let mut cache = GeometryCache::new(sites, rupture);
        self.assemble(&mut cache)
    }

    /// Assembles contexts for the sites within the configured maximum
    /// distance of the rupture.
    ///
    /// Without a maximum distance for this maker's region every site is
    /// kept. The filter distance is computed once and reused if a model also
    /// requires it. Fails with a filter error when no site is close enough.
    pub fn make_filtered_contexts(
        &self,
        sites: &SiteCollection,
        rupture: &Rupture,
    ) -> Result<FilteredContexts, HazardError> {
        let Some(maximum_distance) = self.config.maximum_distance_for(&self.trt) else {
            let (sctx, rctx, dctx) = self.make_contexts(sites, rupture)?;
            return Ok(FilteredContexts {
                sids: sites.sids().to_vec(),
                sites: sctx,
                rupture: rctx,
                distances: dctx,
            });
        };

        let filter_distance = self.config.filter_distance;
        let mut cache = GeometryCache::new(sites, rupture);
        let mask: Vec<bool> = cache
            .distance(filter_distance)?
            .iter()
            .map(|distance| *distance <= maximum_distance)
            .collect();
        let kept = mask.iter().filter(|keep| **keep).count();
        tracing::debug!(
            trt = %self.trt,
            maximum_distance,
            filter = filter_distance.as_str(),
            kept,
            total = sites.len(),
            "filtered sites"
        );
        if kept == 0 {
            return Err(HazardError::Filter(
                ErrorInfo::new(
                    "far-away-rupture",
                    format!("no sites within {maximum_distance} km of the rupture"),
                )
                .with_context("trt", self.trt.clone())
                .with_context("sites", sites.len().to_string())
                .with_context("filter_distance", filter_distance.as_str()),
            ));
        }

        if kept == sites.len() {
            let (sctx, rctx, dctx) = self.assemble(&mut cache)?;
            return Ok(FilteredContexts {
                sids: sites.sids().to_vec(),
                sites: sctx,
                rupture: rctx,
                distances: dctx,
            });
        }

        let filtered_distance: Vec<f64> = cache
            .distance(filter_distance)?
            .iter()
            .zip(&mask)
            .filter(|(_, keep)| **keep)
            .map(|(distance, _)| *distance)
            .collect();
        let filtered = sites.filter(&mask);
        let mut filtered_cache = GeometryCache::new(&filtered, rupture);
        filtered_cache.scalars = cache.scalars;
        filtered_cache.seed_distance(filter_distance, filtered_distance);
        let (sctx, rctx, dctx) = self.assemble(&mut filtered_cache)?;
        Ok(FilteredContexts {
            sids: filtered.sids().to_vec(),
            sites: sctx,
            rupture: rctx,
            distances: dctx,
        })
    }

    fn assemble(
        &self,
        cache: &mut GeometryCache<'_>,
    ) -> Result<(SitesContext, RuptureContext, DistancesContext), HazardError> {
        let mut sctx = SitesContext::new();
        for name in &self.requires_sites_parameters {
            let param: SiteParam = name.parse()?;
            sctx.set(param.as_str(), cache.sites.param(param));
        }

        let mut rctx = RuptureContext::new();
        for name in &self.requires_rupture_parameters {
            let param: RuptureParam = name.parse()?;
            rctx.set(param.as_str(), cache.rupture_param(param));
        }

        let mut dctx = DistancesContext::new();
        for name in &self.requires_distances {
            let measure: DistanceMeasure = name.parse()?;
            dctx.set(measure.as_str(), cache.distance(measure)?.to_vec());
        }

        tracing::debug!(
            trt = %self.trt,
            sites = cache.sites.len(),
            site_params = sctx.len(),
            rupture_params = rctx.len(),
            distances = dctx.len(),
            "assembled contexts"
        );
        Ok((sctx, rctx, dctx))
    }

    /// Evaluates every candidate model for every IMT.
    ///
    /// Outputs are ordered by model name, then by the order of `imts`.
    pub fn get_mean_std(
        &self,
        sites: &SitesContext,
        rupture: &RuptureContext,
        distances: &DistancesContext,
        imts: &[Imt],
        stddev_types: &[StdDev],
    ) -> Result<Vec<GsimOutput>, HazardError> {
        let mut outputs = Vec::with_capacity(self.gsims.len() * imts.len());
        for gsim in &self.gsims {
            for imt in imts {
                let prediction =
                    gsim.get_mean_and_stddevs(sites, rupture, distances, imt, stddev_types)?;
                outputs.push(GsimOutput {
                    gsim: gsim.name().to_string(),
                    imt: *imt,
                    prediction,
                });
            }
        }
        Ok(outputs)
    }
}
