//! Model identifier to implementation mapping.

use std::collections::BTreeMap;
use std::sync::Arc;

use hazard_core::errors::{ErrorInfo, HazardError};

use crate::gsim::{GroundMotionModel, Gsim};
use crate::models::VacareanuEtAl2015;

/// Constructor stored in a [`GsimRegistry`].
pub type GsimConstructor = fn() -> Arc<dyn GroundMotionModel>;

fn vacareanu_2015() -> Arc<dyn GroundMotionModel> {
    Arc::new(VacareanuEtAl2015)
}

/// Registry of instantiable models keyed by name.
#[derive(Debug, Clone, Default)]
pub struct GsimRegistry {
    constructors: BTreeMap<String, GsimConstructor>,
}

impl GsimRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every model shipped with this crate.
    pub fn builtin() -> Result<Self, HazardError> {
        let mut registry = Self::new();
        registry.register("VacareanuEtAl2015", vacareanu_2015)?;
        Ok(registry)
    }

    /// Adds a model after checking its capability declaration.
    ///
    /// Fails if the name is taken, if the model reports a different name,
    /// or if it declares a requirement outside the vocabularies.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        constructor: GsimConstructor,
    ) -> Result<(), HazardError> {
        let name = name.into();
        if self.constructors.contains_key(&name) {
            return Err(HazardError::Config(
                ErrorInfo::new("gsim-duplicate", format!("{name} is already registered"))
                    .with_context("gsim", name),
            ));
        }
        let model = constructor();
        if model.name() != name {
            return Err(HazardError::Config(
                ErrorInfo::new(
                    "gsim-name-mismatch",
                    format!("{name} constructs a model named {}", model.name()),
                )
                .with_context("gsim", name),
            ));
        }
        model.capabilities().validate().map_err(|err| {
            let mut info = err.info().clone().with_context("gsim", name.clone());
            info.hint = Some("fix the model's capability declaration".to_string());
            HazardError::Config(info)
        })?;
        self.constructors.insert(name, constructor);
        Ok(())
    }

    /// Instantiates a registered model.
    pub fn instantiate(&self, name: &str) -> Result<Gsim, HazardError> {
        let constructor = self.constructors.get(name).ok_or_else(|| {
            HazardError::Lookup(
                ErrorInfo::new("gsim-unknown", format!("unknown GSIM {name}"))
                    .with_context("gsim", name),
            )
        })?;
        Ok(Gsim::from_arc(constructor()))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.constructors.keys().map(String::as_str)
    }

    /// Whether a model is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }
}
