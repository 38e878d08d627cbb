//! Named-field containers handed to ground-motion models.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use hazard_core::errors::{ErrorInfo, HazardError};
use hazard_core::ContextValue;

/// Marker distinguishing the three context kinds.
pub trait ContextKind: Send + Sync + 'static {
    /// Kind label used in error messages and equality.
    const KIND: &'static str;
}

/// Marker for per-site parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitesKind {}

/// Marker for scalar rupture parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuptureKind {}

/// Marker for per-site distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistancesKind {}

impl ContextKind for SitesKind {
    const KIND: &'static str = "sites";
}

impl ContextKind for RuptureKind {
    const KIND: &'static str = "rupture";
}

impl ContextKind for DistancesKind {
    const KIND: &'static str = "distances";
}

/// Per-site parameters, one vector per field.
pub type SitesContext = Context<SitesKind>;
/// Scalar rupture parameters.
pub type RuptureContext = Context<RuptureKind>;
/// Per-site distances, one vector per field.
pub type DistancesContext = Context<DistancesKind>;

/// Mapping from field name to value.
///
/// Two contexts are equal when they are of the same kind and hold the same
/// field names with equal values. Contexts of different kinds can be
/// compared and are never equal.
pub struct Context<K: ContextKind> {
    fields: BTreeMap<String, ContextValue>,
    kind: PhantomData<K>,
}

impl<K: ContextKind> Context<K> {
    /// An empty context.
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            kind: PhantomData,
        }
    }

    /// Kind label of this context.
    pub fn kind(&self) -> &'static str {
        K::KIND
    }

    /// Sets a field, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ContextValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder form of [`Context::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Raw field lookup.
    pub fn get(&self, name: &str) -> Option<&ContextValue> {
        self.fields.get(name)
    }

    /// Whether the field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn field(&self, name: &str) -> Result<&ContextValue, HazardError> {
        self.fields.get(name).ok_or_else(|| {
            HazardError::Lookup(
                ErrorInfo::new(
                    "context-missing-field",
                    format!("{} context has no field '{name}'", K::KIND),
                )
                .with_context("field", name),
            )
        })
    }

    fn wrong_shape(&self, name: &str, expected: &str) -> HazardError {
        HazardError::Type(
            ErrorInfo::new(
                "context-field-shape",
                format!("{} context field '{name}' is not {expected}", K::KIND),
            )
            .with_context("field", name),
        )
    }

    /// A float vector field.
    pub fn floats(&self, name: &str) -> Result<&[f64], HazardError> {
        match self.field(name)? {
            ContextValue::Floats(values) => Ok(values),
            _ => Err(self.wrong_shape(name, "a float vector")),
        }
    }

    /// A flag vector field.
    pub fn bools(&self, name: &str) -> Result<&[bool], HazardError> {
        match self.field(name)? {
            ContextValue::Bools(values) => Ok(values),
            _ => Err(self.wrong_shape(name, "a flag vector")),
        }
    }

    /// A scalar field, flags coerced to `0.0`/`1.0`.
    pub fn scalar(&self, name: &str) -> Result<f64, HazardError> {
        self.field(name)?
            .as_f64()
            .ok_or_else(|| self.wrong_shape(name, "a scalar"))
    }

    /// Length shared by the vector fields, or `None` if there are none.
    pub fn num_sites(&self) -> Option<usize> {
        self.fields.values().find_map(ContextValue::len)
    }

    /// Keeps the entries of every vector field whose mask entry is `true`.
    pub fn select(&self, mask: &[bool]) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|(name, value)| (name.clone(), value.select(mask)))
                .collect(),
            kind: PhantomData,
        }
    }
}

impl<K: ContextKind> Default for Context<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ContextKind> Clone for Context<K> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            kind: PhantomData,
        }
    }
}

impl<K: ContextKind> fmt::Debug for Context<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("kind", &K::KIND)
            .field("fields", &self.fields)
            .finish()
    }
}

impl<A: ContextKind, B: ContextKind> PartialEq<Context<B>> for Context<A> {
    fn eq(&self, other: &Context<B>) -> bool {
        A::KIND == B::KIND && self.fields == other.fields
    }
}
