//! Static capability declarations attached to each model.

use std::collections::BTreeSet;

use hazard_core::errors::HazardError;
use hazard_core::{DistanceMeasure, Imc, ImtKind, RuptureParam, SiteParam, StdDev, Trt};

/// What a model needs as input and what it can predict.
///
/// Requirement sets hold plain names so a model may declare anything;
/// names are resolved against the vocabularies when contexts are assembled
/// (see [`Capabilities::validate`]).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Tectonic region the model is calibrated for.
    pub tectonic_region_type: Option<Trt>,
    /// Intensity-measure families the model predicts.
    pub intensity_measure_types: BTreeSet<ImtKind>,
    /// Component convention of the predictions.
    pub intensity_measure_component: Option<Imc>,
    /// Standard deviation kinds the model can return.
    pub standard_deviation_types: BTreeSet<StdDev>,
    /// Site parameter names the model reads.
    pub requires_sites_parameters: BTreeSet<String>,
    /// Rupture parameter names the model reads.
    pub requires_rupture_parameters: BTreeSet<String>,
    /// Distance measure names the model reads.
    pub requires_distances: BTreeSet<String>,
}

fn names<I, S>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl Capabilities {
    /// An empty declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tectonic region type.
    pub fn with_trt(mut self, trt: Trt) -> Self {
        self.tectonic_region_type = Some(trt);
        self
    }

    /// Sets the supported IMT families.
    pub fn with_imts(mut self, imts: impl IntoIterator<Item = ImtKind>) -> Self {
        self.intensity_measure_types = imts.into_iter().collect();
        self
    }

    /// Sets the component convention.
    pub fn with_component(mut self, component: Imc) -> Self {
        self.intensity_measure_component = Some(component);
        self
    }

    /// Sets the supported standard deviation kinds.
    pub fn with_stddevs(mut self, stddevs: impl IntoIterator<Item = StdDev>) -> Self {
        self.standard_deviation_types = stddevs.into_iter().collect();
        self
    }

    /// Sets the required site parameter names.
    pub fn with_sites_parameters<S: Into<String>>(
        mut self,
        params: impl IntoIterator<Item = S>,
    ) -> Self {
        self.requires_sites_parameters = names(params);
        self
    }

    /// Sets the required rupture parameter names.
    pub fn with_rupture_parameters<S: Into<String>>(
        mut self,
        params: impl IntoIterator<Item = S>,
    ) -> Self {
        self.requires_rupture_parameters = names(params);
        self
    }

    /// Sets the required distance names.
    pub fn with_distances<S: Into<String>>(mut self, params: impl IntoIterator<Item = S>) -> Self {
        self.requires_distances = names(params);
        self
    }

    /// Resolved site parameters.
    pub fn site_params(&self) -> Result<BTreeSet<SiteParam>, HazardError> {
        self.requires_sites_parameters
            .iter()
            .map(|name| name.parse())
            .collect()
    }

    /// Resolved rupture parameters.
    pub fn rupture_params(&self) -> Result<BTreeSet<RuptureParam>, HazardError> {
        self.requires_rupture_parameters
            .iter()
            .map(|name| name.parse())
            .collect()
    }

    /// Resolved distance measures.
    pub fn distances(&self) -> Result<BTreeSet<DistanceMeasure>, HazardError> {
        self.requires_distances
            .iter()
            .map(|name| name.parse())
            .collect()
    }

    /// Checks every declared name against the vocabularies, reporting the
    /// first offending name.
    pub fn validate(&self) -> Result<(), HazardError> {
        self.distances()?;
        self.site_params()?;
        self.rupture_params()?;
        Ok(())
    }

    /// Whether the model can predict an IMT of this family.
    pub fn supports_imt(&self, kind: ImtKind) -> bool {
        self.intensity_measure_types.contains(&kind)
    }
}
