#![deny(missing_docs)]
#![doc = "Error model and fixed vocabularies shared by the hazard context engine."]

pub mod errors;
pub mod imt;
mod types;
pub mod vocab;

pub use errors::{ErrorInfo, HazardError};
pub use imt::{Imt, ImtKind, DEFAULT_SA_DAMPING};
pub use types::ContextValue;
pub use vocab::{DistanceMeasure, Imc, RuptureParam, SiteParam, StdDev, Trt};
