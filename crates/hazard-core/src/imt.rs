//! Intensity-measure types.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HazardError};

/// Damping ratio (percent of critical) assumed when an SA is written without one.
pub const DEFAULT_SA_DAMPING: f64 = 5.0;

/// Family of an intensity-measure type, as used in capability declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImtKind {
    /// Peak ground acceleration.
    Pga,
    /// Peak ground velocity.
    Pgv,
    /// Spectral acceleration.
    Sa,
    /// Macroseismic intensity.
    Mmi,
}

/// A concrete intensity-measure type.
///
/// `SA` carries a period in seconds and a damping ratio. Equality, ordering
/// and hashing use the bit patterns of both floats so the type can key maps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum Imt {
    /// Peak ground acceleration, in g.
    #[serde(rename = "PGA")]
    Pga,
    /// Peak ground velocity, in cm/s.
    #[serde(rename = "PGV")]
    Pgv,
    /// Spectral acceleration, in g.
    #[serde(rename = "SA")]
    Sa {
        /// Oscillator period in seconds.
        period: f64,
        /// Damping ratio, percent of critical.
        damping: f64,
    },
    /// Modified Mercalli intensity.
    #[serde(rename = "MMI")]
    Mmi,
}

impl Imt {
    /// Spectral acceleration at `period` with the default damping.
    pub fn sa(period: f64) -> Self {
        Imt::Sa {
            period,
            damping: DEFAULT_SA_DAMPING,
        }
    }

    /// Spectral acceleration at `period` with an explicit damping ratio.
    pub fn sa_damped(period: f64, damping: f64) -> Self {
        Imt::Sa { period, damping }
    }

    /// Returns the family of this IMT.
    pub fn kind(&self) -> ImtKind {
        match self {
            Imt::Pga => ImtKind::Pga,
            Imt::Pgv => ImtKind::Pgv,
            Imt::Sa { .. } => ImtKind::Sa,
            Imt::Mmi => ImtKind::Mmi,
        }
    }

    /// Returns the SA period, if any.
    pub fn period(&self) -> Option<f64> {
        match self {
            Imt::Sa { period, .. } => Some(*period),
            _ => None,
        }
    }

    fn sort_key(&self) -> (u8, u64, u64) {
        match self {
            Imt::Pga => (0, 0, 0),
            Imt::Pgv => (1, 0, 0),
            Imt::Sa { period, damping } => (2, period.to_bits(), damping.to_bits()),
            Imt::Mmi => (3, 0, 0),
        }
    }
}

impl PartialEq for Imt {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Imt {}

impl Hash for Imt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}

impl PartialOrd for Imt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Imt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                Imt::Sa {
                    period: p1,
                    damping: d1,
                },
                Imt::Sa {
                    period: p2,
                    damping: d2,
                },
            ) => p1.total_cmp(p2).then(d1.total_cmp(d2)),
            _ => self.sort_key().cmp(&other.sort_key()),
        }
    }
}

impl fmt::Display for Imt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Imt::Pga => f.write_str("PGA"),
            Imt::Pgv => f.write_str("PGV"),
            Imt::Mmi => f.write_str("MMI"),
            Imt::Sa { period, damping } if *damping == DEFAULT_SA_DAMPING => {
                write!(f, "SA({period})")
            }
            Imt::Sa { period, damping } => write!(f, "SA({period}, {damping})"),
        }
    }
}

fn parse_error(text: &str) -> HazardError {
    HazardError::Parse(
        ErrorInfo::new("imt-parse", format!("unknown IMT {text:?}"))
            .with_hint("expected PGA, PGV, MMI, SA(<period>) or SA(<period>, <damping>)"),
    )
}

impl FromStr for Imt {
    type Err = HazardError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let upper = trimmed.to_ascii_uppercase();
        match upper.as_str() {
            "PGA" => return Ok(Imt::Pga),
            "PGV" => return Ok(Imt::Pgv),
            "MMI" => return Ok(Imt::Mmi),
            _ => {}
        }
        let inner = upper
            .strip_prefix("SA(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| parse_error(text))?;
        let mut parts = inner.split(',').map(str::trim);
        let period = parts
            .next()
            .and_then(|raw| raw.parse::<f64>().ok())
            .ok_or_else(|| parse_error(text))?;
        let damping = match parts.next() {
            Some(raw) => raw.parse::<f64>().map_err(|_| parse_error(text))?,
            None => DEFAULT_SA_DAMPING,
        };
        if parts.next().is_some() || !(period >= 0.0) {
            return Err(parse_error(text));
        }
        Ok(Imt::Sa { period, damping })
    }
}
