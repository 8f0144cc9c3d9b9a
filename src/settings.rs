use std::str::FromStr;

use fuzzy_logic::{config::UnknownMethod, InferenceConfig};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("Invalid value \"{value}\" for {key}")]
    InvalidValue { key: String, value: String },

    #[error("{key}: {source}")]
    UnknownMethod {
        key: String,
        #[source]
        source: UnknownMethod,
    },
}

/// Runtime settings read from the environment (and `.env` when present).
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub inference: InferenceConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let mut inference = InferenceConfig::default();

        if let Some(and_method) = method(&lookup, "FUZZY_AND_METHOD")? {
            inference.and_method = and_method;
        }
        if let Some(or_method) = method(&lookup, "FUZZY_OR_METHOD")? {
            inference.or_method = or_method;
        }
        if let Some(defuzzify_method) = method(&lookup, "FUZZY_DEFUZZ_METHOD")? {
            inference.defuzzify_method = defuzzify_method;
        }
        if let Some(value) = lookup("FUZZY_CLIP_TO_BOUNDS") {
            inference.clip_to_bounds = parse_bool("FUZZY_CLIP_TO_BOUNDS", &value)?;
        }

        Ok(Settings { inference })
    }
}

fn method<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, SettingsError>
where
    T: FromStr<Err = UnknownMethod>,
{
    lookup(key)
        .map(|value| {
            value.parse().map_err(|source| SettingsError::UnknownMethod {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_f64(key: &str, value: Option<String>, default: f64) -> Result<f64, SettingsError> {
    match value {
        None => Ok(default),
        Some(value) => match value.trim().parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(x),
            _ => Err(SettingsError::InvalidValue {
                key: key.to_string(),
                value,
            }),
        },
    }
}

/// Crisp input from the environment, `default` when unset.
pub fn var_f64(key: &str, default: f64) -> Result<f64, SettingsError> {
    parse_f64(key, dotenvy::var(key).ok(), default)
}
