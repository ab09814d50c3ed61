use std::fs;
use std::path::Path;

use dslo_core::errors::{DsloError, ErrorInfo};
use dslo_graph::{DerivationMode, LoadOptions};
use serde::{Deserialize, Serialize};

use crate::extract::{ExtractParams, ExtractionMode};

/// YAML-configurable parameters of an extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Control loop used to build the output family.
    #[serde(default)]
    pub mode: ExtractionMode,
    /// Maximum number of subgraphs to extract.
    #[serde(default = "default_k")]
    pub k: usize,
    /// Overlap fraction in `[0, 1]`.
    #[serde(default)]
    pub alpha: f64,
    /// Derivation used by the overlap-limiting pass.
    #[serde(default)]
    pub derivation: DerivationMode,
    /// Master seed for every random choice.
    #[serde(default)]
    pub seed: u64,
    /// Forces every node and edge weight to one while loading.
    #[serde(default)]
    pub unweighted: bool,
    /// Writes one dump line per subgraph in the result file.
    #[serde(default = "default_write_subgraphs")]
    pub write_subgraphs: bool,
}

fn default_k() -> usize {
    10
}

fn default_write_subgraphs() -> bool {
    true
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: ExtractionMode::default(),
            k: default_k(),
            alpha: 0.0,
            derivation: DerivationMode::default(),
            seed: 0,
            unweighted: false,
            write_subgraphs: default_write_subgraphs(),
        }
    }
}

impl RunConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, DsloError> {
        serde_yaml::from_str(text)
            .map_err(|err| DsloError::Serde(ErrorInfo::new("parse-config", err.to_string())))
    }

    /// Reads and parses a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, DsloError> {
        let text = fs::read_to_string(path)
            .map_err(|err| DsloError::io("read-config", path.display(), err))?;
        Self::from_yaml_str(&text).map_err(|err| match err {
            DsloError::Serde(info) => DsloError::Serde(info.with_context("path", path.display())),
            other => other,
        })
    }

    /// Rejects parameters outside their domains.
    pub fn validate(&self) -> Result<(), DsloError> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(DsloError::Config(
                ErrorInfo::new("invalid-alpha", "alpha must lie in [0, 1]")
                    .with_context("alpha", self.alpha),
            ));
        }
        if self.k == 0 {
            return Err(DsloError::Config(
                ErrorInfo::new("invalid-k", "k must be positive").with_hint("request at least one subgraph"),
            ));
        }
        Ok(())
    }

    /// Extraction parameters described by this configuration.
    pub fn extract_params(&self) -> ExtractParams {
        ExtractParams {
            mode: self.mode,
            k: self.k,
            alpha: self.alpha,
            derivation: self.derivation,
        }
    }

    /// Loader options described by this configuration.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            unweighted: self.unweighted,
        }
    }
}
