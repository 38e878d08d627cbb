//! Period-dependent coefficient tables.

use std::collections::BTreeMap;

use hazard_core::errors::{ErrorInfo, HazardError};
use hazard_core::Imt;
use serde_json::Value;

/// Named coefficients for a single intensity-measure type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Coeffs(BTreeMap<String, f64>);

impl Coeffs {
    /// Looks up a coefficient by name.
    pub fn get(&self, name: &str) -> Result<f64, HazardError> {
        self.0.get(name).copied().ok_or_else(|| {
            HazardError::Lookup(
                ErrorInfo::new("coeff-missing", format!("no coefficient named '{name}'"))
                    .with_context("name", name),
            )
        })
    }

    /// Coefficient names and values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Number of coefficients.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no coefficients.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Coeffs {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Coeffs(iter.into_iter().map(|(name, value)| (name.into(), value)).collect())
    }
}

/// Immutable lookup from IMT to coefficients.
///
/// PGA, PGV and other non-SA rows are stored apart from SA rows. SA rows are
/// keyed by period at the table's damping; SA periods that fall between two
/// rows are interpolated linearly in log-period.
#[derive(Debug, Clone, PartialEq)]
pub struct CoeffsTable {
    sa_damping: f64,
    sa_coeffs: BTreeMap<Imt, Coeffs>,
    non_sa_coeffs: BTreeMap<Imt, Coeffs>,
}

fn parse_error(code: &str, message: String, line: usize) -> HazardError {
    HazardError::Parse(ErrorInfo::new(code, message).with_context("line", line.to_string()))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_i64() || number.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn input_type_error(value: &Value) -> HazardError {
    let type_name = json_type_name(value);
    HazardError::Type(
        ErrorInfo::new(
            "coeffs-input-type",
            format!("CoeffsTable cannot be constructed with inputs of the form '{type_name}'"),
        )
        .with_hint("pass a whitespace-delimited table string or an IMT -> coefficients mapping"),
    )
}

impl CoeffsTable {
    /// Parses a whitespace-delimited table.
    ///
    /// The first non-blank line is the header: `imt` followed by the
    /// coefficient names. Each following line starts with `pga`, `pgv`
    /// (case-insensitive) or an SA period in seconds.
    pub fn from_text(sa_damping: f64, text: &str) -> Result<Self, HazardError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());
        let (header_line, header) = lines.next().ok_or_else(|| {
            HazardError::Parse(ErrorInfo::new("coeffs-empty", "coefficient table is empty"))
        })?;
        let mut header = header.split_whitespace();
        if !header
            .next()
            .is_some_and(|first| first.eq_ignore_ascii_case("imt"))
        {
            return Err(parse_error(
                "coeffs-header",
                "first column of the header must be 'imt'".to_string(),
                header_line,
            ));
        }
        let names: Vec<&str> = header.collect();

        let mut table = CoeffsTable {
            sa_damping,
            sa_coeffs: BTreeMap::new(),
            non_sa_coeffs: BTreeMap::new(),
        };
        for (line_no, line) in lines {
            let mut cells = line.split_whitespace();
            let label = cells.next().unwrap_or_default();
            let values = cells
                .map(|cell| {
                    cell.parse::<f64>().map_err(|_| {
                        parse_error(
                            "coeffs-value",
                            format!("cannot parse coefficient value {cell:?}"),
                            line_no,
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if values.len() != names.len() {
                return Err(parse_error(
                    "coeffs-row-width",
                    format!(
                        "row '{label}' has {} values, header declares {}",
                        values.len(),
                        names.len()
                    ),
                    line_no,
                ));
            }
            let coeffs: Coeffs = names.iter().copied().zip(values).collect();
            match label.to_ascii_lowercase().as_str() {
                "pga" => {
                    table.non_sa_coeffs.insert(Imt::Pga, coeffs);
                }
                "pgv" => {
                    table.non_sa_coeffs.insert(Imt::Pgv, coeffs);
                }
                _ => {
                    let period = label.parse::<f64>().map_err(|_| {
                        parse_error(
                            "coeffs-imt",
                            format!("row label {label:?} is neither pga, pgv nor a period"),
                            line_no,
                        )
                    })?;
                    table
                        .sa_coeffs
                        .insert(Imt::sa_damped(period, sa_damping), coeffs);
                }
            }
        }
        Ok(table)
    }

    /// Builds a table from already parsed rows.
    pub fn from_mapping(sa_damping: f64, mapping: BTreeMap<Imt, Coeffs>) -> Self {
        let (sa_coeffs, non_sa_coeffs) = mapping
            .into_iter()
            .partition(|(imt, _)| matches!(imt, Imt::Sa { .. }));
        CoeffsTable {
            sa_damping,
            sa_coeffs,
            non_sa_coeffs,
        }
    }

    /// Builds a table from a dynamically typed value.
    ///
    /// A string is parsed with [`CoeffsTable::from_text`]; an object maps IMT
    /// strings (`"PGA"`, `"SA(0.1)"`) to objects of numeric coefficients.
    /// SA keys written without a damping take the table's `sa_damping`.
    /// Any other input is a type error naming the input's type.
    pub fn from_value(sa_damping: f64, value: &Value) -> Result<Self, HazardError> {
        let object = match value {
            Value::String(text) => return Self::from_text(sa_damping, text),
            Value::Object(object) => object,
            other => return Err(input_type_error(other)),
        };
        let mut mapping = BTreeMap::new();
        for (key, row) in object {
            let imt = match key.parse::<Imt>()? {
                Imt::Sa { period, .. } if !key.contains(',') => {
                    Imt::sa_damped(period, sa_damping)
                }
                other => other,
            };
            let row = row.as_object().ok_or_else(|| input_type_error(row))?;
            let coeffs = row
                .iter()
                .map(|(name, value)| {
                    value
                        .as_f64()
                        .map(|number| (name.clone(), number))
                        .ok_or_else(|| input_type_error(value))
                })
                .collect::<Result<Coeffs, _>>()?;
            mapping.insert(imt, coeffs);
        }
        Ok(Self::from_mapping(sa_damping, mapping))
    }

    /// Damping ratio of the SA rows.
    pub fn sa_damping(&self) -> f64 {
        self.sa_damping
    }

    /// SA rows keyed by `SA(period, damping)`.
    pub fn sa_coeffs(&self) -> &BTreeMap<Imt, Coeffs> {
        &self.sa_coeffs
    }

    /// Non-SA rows (PGA, PGV, ...).
    pub fn non_sa_coeffs(&self) -> &BTreeMap<Imt, Coeffs> {
        &self.non_sa_coeffs
    }

    /// Coefficients for `imt`, interpolating SA periods between rows.
    pub fn get(&self, imt: &Imt) -> Result<Coeffs, HazardError> {
        let unknown = |reason: &str| {
            HazardError::Lookup(
                ErrorInfo::new("coeffs-unknown-imt", format!("no coefficients for {imt}"))
                    .with_context("imt", imt.to_string())
                    .with_context("reason", reason),
            )
        };
        let (period, damping) = match imt {
            Imt::Sa { period, damping } => (*period, *damping),
            other => {
                return self
                    .non_sa_coeffs
                    .get(other)
                    .cloned()
                    .ok_or_else(|| unknown("not in table"))
            }
        };
        if let Some(coeffs) = self.sa_coeffs.get(imt) {
            return Ok(coeffs.clone());
        }

        let rows: Vec<(f64, &Coeffs)> = self
            .sa_coeffs
            .iter()
            .filter_map(|(key, coeffs)| match key {
                Imt::Sa {
                    period: row_period,
                    damping: row_damping,
                } if *row_damping == damping => Some((*row_period, coeffs)),
                _ => None,
            })
            .collect();
        if rows.is_empty() {
            return Err(unknown("no SA rows at this damping"));
        }
        // ln(0) has no interpolation anchor
        let below = rows
            .iter()
            .rev()
            .find(|(row_period, _)| *row_period < period)
            .filter(|(row_period, _)| *row_period > 0.0);
        let above = rows.iter().find(|(row_period, _)| *row_period > period);
        let (Some((period_below, coeffs_below)), Some((period_above, coeffs_above))) =
            (below, above)
        else {
            return Err(unknown("period outside tabulated range"));
        };

        let ratio = (period / period_below).ln() / (period_above / period_below).ln();
        coeffs_below
            .iter()
            .map(|(name, low)| {
                let high = coeffs_above.get(name)?;
                Ok((name.to_string(), low + (high - low) * ratio))
            })
            .collect()
    }
}
