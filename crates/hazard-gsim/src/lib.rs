#![deny(missing_docs)]
#![doc = "Context assembly and ground-motion model evaluation for seismic hazard."]

//! A [`ContextMaker`] takes the union of what its candidate models declare
//! in their [`Capabilities`], pulls each requirement from a site collection
//! or a rupture, and hands the resulting contexts to every model's
//! [`GroundMotionModel::get_mean_and_stddevs`].

/// Site-batched parallel evaluation.
pub mod batch;
/// Capability declarations.
pub mod capabilities;
/// Coefficient tables.
pub mod coeffs;
/// Context containers.
pub mod contexts;
/// Model contract and shared handle.
pub mod gsim;
/// Context assembly.
pub mod maker;
/// Published models.
pub mod models;
/// Context maker configuration.
pub mod params;
/// Model registry.
pub mod registry;
/// Serde helpers for configuration documents.
#[path = "serde.rs"]
pub mod serde_io;

pub use batch::{compute_batched, BatchOutput};
pub use capabilities::Capabilities;
pub use coeffs::{Coeffs, CoeffsTable};
pub use contexts::{Context, ContextKind, DistancesContext, RuptureContext, SitesContext};
pub use gsim::{Advisory, GroundMotionModel, Gsim, IntensityScale, Prediction};
pub use maker::{ContextMaker, FilteredContexts, GsimOutput};
pub use models::VacareanuEtAl2015;
pub use params::ContextMakerConfig;
pub use registry::{GsimConstructor, GsimRegistry};
