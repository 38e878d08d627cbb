use hazard_core::errors::{ErrorInfo, HazardError};
use serde::{de::DeserializeOwned, Serialize};

fn serde_error(code: &str, err: impl ToString) -> HazardError {
    HazardError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Serializes a value into pretty JSON.
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String, HazardError> {
    serde_json::to_string_pretty(value).map_err(|err| serde_error("json-serialize", err))
}

/// Deserializes a value from JSON text.
pub fn from_json_str<T: DeserializeOwned>(text: &str) -> Result<T, HazardError> {
    serde_json::from_str(text).map_err(|err| serde_error("json-deserialize", err))
}

/// Serializes a value into YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, HazardError> {
    serde_yaml::to_string(value).map_err(|err| serde_error("yaml-serialize", err))
}

/// Deserializes a value from YAML text.
pub fn from_yaml_str<T: DeserializeOwned>(text: &str) -> Result<T, HazardError> {
    serde_yaml::from_str(text).map_err(|err| serde_error("yaml-deserialize", err))
}
