//! Run configuration for a quantification

use crate::error::{OntologyError, OntologyResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Everything a quantification run needs to know
///
/// Loaded from YAML (`.yaml`, `.yml`) or JSON (anything else); command-line
/// flags may override individual fields afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantConfig {
    /// Ontology graph document (JSON)
    pub graph: PathBuf,
    /// Slim vocabulary: an array of term ids or a slim graph document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slim: Option<PathBuf>,
    /// Peptide observations (JSON array)
    pub observations: PathBuf,
    /// Where the report is written
    pub output: PathBuf,
    /// Sample names in intensity-slot order. Fixes the expected vector length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<String>>,
    /// Upper bound on slim search generations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_slim_depth: Option<usize>,
    /// Worker threads for aggregation (1 = single-threaded)
    #[serde(default = "default_threads")]
    pub threads: usize,
}

fn default_threads() -> usize {
    1
}

impl QuantConfig {
    /// Load a configuration file, picking the format from its extension
    pub fn load(path: impl AsRef<Path>) -> OntologyResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let config: QuantConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_reader(file)?,
            _ => serde_json::from_reader(file)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that can never produce a run
    pub fn validate(&self) -> OntologyResult<()> {
        if self.threads == 0 {
            return Err(OntologyError::Config("threads must be at least 1".into()));
        }
        if self.max_slim_depth == Some(0) {
            return Err(OntologyError::Config(
                "max_slim_depth must be at least 1".into(),
            ));
        }
        if matches!(&self.samples, Some(samples) if samples.is_empty()) {
            return Err(OntologyError::Config("samples must not be empty".into()));
        }
        Ok(())
    }
}
