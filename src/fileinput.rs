//! Reads queries and evaluation settings from YAML or JSON files.
//!
//! Files ending in `.json` are parsed as JSON, everything else as YAML.

use crate::config::EvaluationConfig;
use crate::error::FieldError;
use crate::input::FieldQuery;
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

fn is_json(path: &Path) -> bool {
    path.extension()
        .map_or(false, |extension| extension.eq_ignore_ascii_case("json"))
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T, FieldError> {
    let contents = fs::read_to_string(path)?;
    info!("loading {}", path.display());
    if is_json(path) {
        Ok(serde_json::from_str(&contents)?)
    } else {
        Ok(serde_yaml::from_str(&contents)?)
    }
}

fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), FieldError> {
    let contents = if is_json(path) {
        serde_json::to_string_pretty(value)?
    } else {
        serde_yaml::to_string(value)?
    };
    fs::write(path, contents)?;
    Ok(())
}

/// Loads a keyword query.
pub fn load_query<P: AsRef<Path>>(path: P) -> Result<FieldQuery, FieldError> {
    load(path.as_ref())
}

/// Loads evaluation settings, missing keys take their default values.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EvaluationConfig, FieldError> {
    load(path.as_ref())
}

/// Writes a keyword query, e.g. to create a template for later edits.
pub fn save_query<P: AsRef<Path>>(path: P, query: &FieldQuery) -> Result<(), FieldError> {
    save(path.as_ref(), query)
}
