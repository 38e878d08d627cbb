use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use hazard_core::errors::{ErrorInfo, HazardError};
use hazard_core::DistanceMeasure;
use serde::{Deserialize, Serialize};

use crate::serde_io::{from_json_str, from_yaml_str};

/// Key of the fallback entry in [`ContextMakerConfig::maximum_distance`].
pub const DEFAULT_TRT_KEY: &str = "default";

fn default_filter_distance() -> DistanceMeasure {
    DistanceMeasure::Rrup
}

fn default_batch_size() -> usize {
    1000
}

fn default_concurrency() -> usize {
    1
}

/// Options controlling context assembly and batched evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextMakerConfig {
    /// Integration distance in km per tectonic region type, with an optional
    /// `default` entry. Empty means no site filtering.
    #[serde(default)]
    pub maximum_distance: BTreeMap<String, f64>,
    /// Distance measure compared against the maximum distance.
    #[serde(default = "default_filter_distance")]
    pub filter_distance: DistanceMeasure,
    /// Number of sites per evaluation batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Number of worker threads used for batched evaluation.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for ContextMakerConfig {
    fn default() -> Self {
        Self {
            maximum_distance: BTreeMap::new(),
            filter_distance: default_filter_distance(),
            batch_size: default_batch_size(),
            concurrency: default_concurrency(),
        }
    }
}

impl ContextMakerConfig {
    /// Returns a copy with positive batch size and concurrency and without
    /// non-positive or non-finite distances.
    pub fn sanitised(&self) -> Self {
        Self {
            maximum_distance: self
                .maximum_distance
                .iter()
                .filter(|(_, distance)| distance.is_finite() && **distance > 0.0)
                .map(|(trt, distance)| (trt.clone(), *distance))
                .collect(),
            filter_distance: self.filter_distance,
            batch_size: self.batch_size.max(1),
            concurrency: self.concurrency.max(1),
        }
    }

    /// Builder setting the integration distance for one region.
    pub fn with_maximum_distance(mut self, trt: impl Into<String>, distance: f64) -> Self {
        self.maximum_distance.insert(trt.into(), distance);
        self
    }

    /// Integration distance for `trt`, falling back to the `default` entry.
    pub fn maximum_distance_for(&self, trt: &str) -> Option<f64> {
        self.maximum_distance
            .get(trt)
            .or_else(|| self.maximum_distance.get(DEFAULT_TRT_KEY))
            .copied()
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, HazardError> {
        from_yaml_str::<Self>(text).map(|config| config.sanitised())
    }

    /// Parses a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, HazardError> {
        from_json_str::<Self>(text).map(|config| config.sanitised())
    }

    /// Loads a configuration file; `.json` files are read as JSON, anything
    /// else as YAML.
    pub fn load(path: &Path) -> Result<Self, HazardError> {
        let text = fs::read_to_string(path).map_err(|err| {
            HazardError::Serde(
                ErrorInfo::new("config-read", "failed to read context maker config")
                    .with_context("path", path.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }
}
