//! The ground-motion model contract and the shared handle around it.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use hazard_core::errors::{ErrorInfo, HazardError};
use hazard_core::{Imt, StdDev};
use serde::{Deserialize, Serialize};

use crate::capabilities::Capabilities;
use crate::contexts::{DistancesContext, RuptureContext, SitesContext};

/// Scale in which a model's mean is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntensityScale {
    /// Natural log of the intensity (GMPEs).
    LogNormal,
    /// The intensity itself (intensity prediction equations).
    Identity,
}

/// Mean and standard deviations for one IMT over a batch of sites.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Prediction {
    /// Mean per site, in the model's distribution scale.
    pub mean: Vec<f64>,
    /// One vector per requested standard deviation kind, in request order.
    pub stddevs: Vec<Vec<f64>>,
}

/// A published ground-motion prediction equation.
pub trait GroundMotionModel: Send + Sync {
    /// Stable identifier of the model; also its registry key and sort key.
    fn name(&self) -> &'static str;

    /// Static declaration of inputs and outputs.
    fn capabilities(&self) -> &Capabilities;

    /// Scale of the returned mean.
    fn scale(&self) -> IntensityScale {
        IntensityScale::LogNormal
    }

    /// Name of the model that supersedes this one, if any.
    fn superseded_by(&self) -> Option<&'static str> {
        None
    }

    /// Whether the implementation lacks independent verification.
    fn non_verified(&self) -> bool {
        false
    }

    /// Computes the mean and the requested standard deviations.
    ///
    /// `stddev_types` has already been checked against
    /// [`Capabilities::standard_deviation_types`] when called through [`Gsim`].
    fn get_mean_and_stddevs(
        &self,
        sites: &SitesContext,
        rup: &RuptureContext,
        dists: &DistancesContext,
        imt: &Imt,
        stddev_types: &[StdDev],
    ) -> Result<Prediction, HazardError>;
}

/// Non-fatal notice produced when a model is instantiated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advisory {
    /// The model has been replaced by a newer implementation.
    Deprecated {
        /// Instantiated model.
        model: String,
        /// Model to use instead.
        replacement: String,
    },
    /// The implementation has not been independently verified.
    NotVerified {
        /// Instantiated model.
        model: String,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::Deprecated { model, replacement } => {
                write!(f, "{model} is deprecated - use {replacement} instead")
            }
            Advisory::NotVerified { model } => write!(
                f,
                "{model} is not independently verified - the user is liable for their application"
            ),
        }
    }
}

/// Shared handle to an instantiated model.
///
/// Cloning is cheap. Handles compare and sort by model name, so two handles
/// to the same concrete model are equal and heterogeneous collections sort
/// deterministically.
#[derive(Clone)]
pub struct Gsim {
    model: Arc<dyn GroundMotionModel>,
    advisories: Vec<Advisory>,
}

impl Gsim {
    /// Instantiates a model, emitting its advisories as warnings.
    pub fn new(model: impl GroundMotionModel + 'static) -> Self {
        Self::from_arc(Arc::new(model))
    }

    /// Instantiates an already shared model.
    pub fn from_arc(model: Arc<dyn GroundMotionModel>) -> Self {
        let mut advisories = Vec::new();
        if let Some(replacement) = model.superseded_by() {
            advisories.push(Advisory::Deprecated {
                model: model.name().to_string(),
                replacement: replacement.to_string(),
            });
        }
        if model.non_verified() {
            advisories.push(Advisory::NotVerified {
                model: model.name().to_string(),
            });
        }
        for advisory in &advisories {
            tracing::warn!(gsim = model.name(), "{advisory}");
        }
        Self { model, advisories }
    }

    /// Model name.
    pub fn name(&self) -> &'static str {
        self.model.name()
    }

    /// Model capabilities.
    pub fn capabilities(&self) -> &Capabilities {
        self.model.capabilities()
    }

    /// Scale of the model's mean.
    pub fn scale(&self) -> IntensityScale {
        self.model.scale()
    }

    /// Advisories raised when this handle was created.
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// Evaluates the model.
    ///
    /// # Panics
    ///
    /// Panics if a requested standard deviation kind is not declared by the
    /// model; that is a mismatch between caller and model, not an input
    /// condition.
    pub fn get_mean_and_stddevs(
        &self,
        sites: &SitesContext,
        rup: &RuptureContext,
        dists: &DistancesContext,
        imt: &Imt,
        stddev_types: &[StdDev],
    ) -> Result<Prediction, HazardError> {
        let declared = &self.capabilities().standard_deviation_types;
        for stddev in stddev_types {
            assert!(
                declared.contains(stddev),
                "{} does not define the '{stddev}' standard deviation",
                self.name()
            );
        }
        if !self.capabilities().supports_imt(imt.kind()) {
            return Err(HazardError::Lookup(
                ErrorInfo::new(
                    "imt-unsupported",
                    format!("{} does not predict {imt}", self.name()),
                )
                .with_context("imt", imt.to_string()),
            ));
        }
        let prediction = self
            .model
            .get_mean_and_stddevs(sites, rup, dists, imt, stddev_types)?;

        let num_sites = sites.num_sites().or_else(|| dists.num_sites());
        let shape_ok = prediction.stddevs.len() == stddev_types.len()
            && num_sites.map_or(true, |n| {
                prediction.mean.len() == n && prediction.stddevs.iter().all(|s| s.len() == n)
            });
        if !shape_ok {
            return Err(HazardError::Model(
                ErrorInfo::new(
                    "prediction-shape",
                    format!("{} returned output misaligned with its sites", self.name()),
                )
                .with_context("imt", imt.to_string())
                .with_context("mean", prediction.mean.len().to_string())
                .with_context("stddevs", prediction.stddevs.len().to_string()),
            ));
        }
        Ok(prediction)
    }

    /// Converts intensity values (g, cm/s, MMI) into the distribution scale.
    pub fn to_distribution_values(&self, values: &[f64]) -> Vec<f64> {
        match self.scale() {
            IntensityScale::LogNormal => values.iter().map(|value| value.ln()).collect(),
            IntensityScale::Identity => values.to_vec(),
        }
    }

    /// Inverse of [`Gsim::to_distribution_values`].
    pub fn to_imt_unit_values(&self, values: &[f64]) -> Vec<f64> {
        match self.scale() {
            IntensityScale::LogNormal => values.iter().map(|value| value.exp()).collect(),
            IntensityScale::Identity => values.to_vec(),
        }
    }
}

impl fmt::Debug for Gsim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gsim")
            .field("name", &self.name())
            .field("advisories", &self.advisories)
            .finish()
    }
}

impl fmt::Display for Gsim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PartialEq for Gsim {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Gsim {}

impl PartialOrd for Gsim {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Gsim {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name().cmp(other.name())
    }
}
