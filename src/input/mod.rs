use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod scenario;

pub use scenario::{Scenario, Settings};

use crate::model::TreeError;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid scenario: {0}")]
    Invalid(String),
    #[error("invalid scenario: {0}")]
    Tree(#[from] TreeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Yaml,
    Json,
}

impl ScenarioFormat {
    /// Picks the format from the file name, looking through a trailing `.gz`.
    /// Anything that is not `.json` is read as YAML, which also accepts JSON.
    pub fn from_path(path: &Path) -> Self {
        let mut name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        if let Some(stripped) = name.strip_suffix(".gz") {
            name = stripped.to_string();
        }
        if name.ends_with(".json") {
            ScenarioFormat::Json
        } else {
            ScenarioFormat::Yaml
        }
    }
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn load_scenario(path: &Path) -> Result<Scenario, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let scenario = parse_scenario(&text, ScenarioFormat::from_path(path)).map_err(|e| match e {
        InputError::Parse { message, .. } => InputError::Parse {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })?;
    tracing::info!(
        path = %path.display(),
        alternatives = scenario.alternatives.len(),
        axes = scenario.axes.len(),
        "loaded scenario"
    );
    Ok(scenario)
}

pub fn parse_scenario(text: &str, format: ScenarioFormat) -> Result<Scenario, InputError> {
    let parsed: Result<Scenario, String> = match format {
        ScenarioFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        ScenarioFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
    };
    let scenario = parsed.map_err(|message| InputError::Parse {
        path: PathBuf::from("<memory>"),
        message,
    })?;
    scenario.validate()?;
    Ok(scenario)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
