use std::path::{Path, PathBuf};

use dcmetrics_core::DEFAULT_RELATION;
use dcmetrics_eval::{CoverageSemantics, EvaluateOptions, LoadOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Evaluation settings read from a TOML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalSettings {
    pub relation: Option<String>,
    pub coverage: bool,
    pub coverage_semantics: CoverageSemantics,
    pub coverage_timeout_secs: Option<u64>,
    pub max_reports: Option<usize>,
    pub skip_unsupported: bool,
    pub out_dir: Option<PathBuf>,
}

/// Values given on the command line; `Some`/`true` wins over the file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub relation: Option<String>,
    pub coverage: bool,
    pub coverage_semantics: Option<CoverageSemantics>,
    pub coverage_timeout_secs: Option<u64>,
    pub max_reports: Option<usize>,
    pub skip_unsupported: bool,
    pub out_dir: Option<PathBuf>,
}

impl EvalSettings {
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply(mut self, overrides: SettingsOverrides) -> Self {
        if overrides.relation.is_some() {
            self.relation = overrides.relation;
        }
        self.coverage |= overrides.coverage;
        if let Some(semantics) = overrides.coverage_semantics {
            self.coverage_semantics = semantics;
        }
        if overrides.coverage_timeout_secs.is_some() {
            self.coverage_timeout_secs = overrides.coverage_timeout_secs;
        }
        if overrides.max_reports.is_some() {
            self.max_reports = overrides.max_reports;
        }
        self.skip_unsupported |= overrides.skip_unsupported;
        if overrides.out_dir.is_some() {
            self.out_dir = overrides.out_dir;
        }
        self
    }

    pub fn evaluate_options(&self) -> EvaluateOptions {
        EvaluateOptions {
            coverage: self.coverage,
            coverage_semantics: self.coverage_semantics,
            relation: self.relation().to_string(),
            max_reports: self.max_reports,
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            skip_unsupported: self.skip_unsupported,
        }
    }

    pub fn relation(&self) -> &str {
        self.relation.as_deref().unwrap_or(DEFAULT_RELATION)
    }

    pub fn out_dir(&self) -> PathBuf {
        self.out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("runs"))
    }
}

/// Load settings from `path`, or defaults when no path is given.
pub fn load_settings(path: Option<&Path>) -> Result<EvalSettings, SettingsError> {
    let Some(path) = path else {
        return Ok(EvalSettings::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    EvalSettings::from_toml(&content)
}
