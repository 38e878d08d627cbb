use serde::{Deserialize, Serialize};

/// Value stored under a context field.
///
/// Site and distance fields are per-site vectors; rupture fields are scalars.
/// Scalars are still accepted in every context so callers can build
/// contexts by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// Single floating point value.
    Float(f64),
    /// Single boolean flag.
    Bool(bool),
    /// Per-site floating point values.
    Floats(Vec<f64>),
    /// Per-site boolean flags.
    Bools(Vec<bool>),
}

impl ContextValue {
    /// Number of entries for vector values, `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            ContextValue::Float(_) | ContextValue::Bool(_) => None,
            ContextValue::Floats(values) => Some(values.len()),
            ContextValue::Bools(values) => Some(values.len()),
        }
    }

    /// Whether this is an empty vector value.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Returns the scalar as `f64`, coercing flags to `0.0`/`1.0`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ContextValue::Float(value) => Some(*value),
            ContextValue::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Returns the vector as floats, coercing flags to `0.0`/`1.0`.
    pub fn to_floats(&self) -> Option<Vec<f64>> {
        match self {
            ContextValue::Floats(values) => Some(values.clone()),
            ContextValue::Bools(flags) => Some(
                flags
                    .iter()
                    .map(|flag| if *flag { 1.0 } else { 0.0 })
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Keeps the entries of a vector value whose mask entry is `true`.
    /// Scalars are returned unchanged.
    pub fn select(&self, mask: &[bool]) -> ContextValue {
        fn pick<T: Clone>(values: &[T], mask: &[bool]) -> Vec<T> {
            values
                .iter()
                .zip(mask)
                .filter(|(_, keep)| **keep)
                .map(|(value, _)| value.clone())
                .collect()
        }
        match self {
            ContextValue::Floats(values) => ContextValue::Floats(pick(values, mask)),
            ContextValue::Bools(values) => ContextValue::Bools(pick(values, mask)),
            scalar => scalar.clone(),
        }
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        ContextValue::Float(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<Vec<f64>> for ContextValue {
    fn from(values: Vec<f64>) -> Self {
        ContextValue::Floats(values)
    }
}

impl From<Vec<bool>> for ContextValue {
    fn from(values: Vec<bool>) -> Self {
        ContextValue::Bools(values)
    }
}
