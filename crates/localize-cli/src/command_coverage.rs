use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use localize_runtime::LocalizeState;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::error::CliError;
use crate::project::load_project;

#[derive(Debug, Error)]
pub enum CoverageCommandError {
    #[error("config error: {0}")]
    Config(#[from] CliError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct CoverageOptions {
    pub out_path: PathBuf,
    pub config_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct CoverageReport {
    total_keys: usize,
    languages: BTreeMap<String, LanguageCoverage>,
}

#[derive(Debug, Serialize)]
struct LanguageCoverage {
    present: usize,
    missing: usize,
    percent: f64,
    missing_keys: Vec<String>,
}

pub fn run_coverage(options: &CoverageOptions) -> Result<(), CoverageCommandError> {
    let project = load_project(&options.config_path)?;
    let state = project.state()?;
    let report = coverage_report(&state);
    for (code, coverage) in &report.languages {
        info!(
            language = %code,
            present = coverage.present,
            missing = coverage.missing,
            "coverage"
        );
    }
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(&options.out_path, json)?;
    Ok(())
}

fn coverage_report(state: &LocalizeState) -> CoverageReport {
    let total = state.translations.len();
    let mut languages = BTreeMap::new();
    for (index, language) in state.languages.iter().enumerate() {
        let missing_keys: Vec<String> = state
            .translations
            .keys()
            .filter(|key| state.translations.value(key, index).is_none())
            .map(str::to_string)
            .collect();
        let present = total - missing_keys.len();
        let percent = if total == 0 {
            100.0
        } else {
            (present as f64 / total as f64) * 100.0
        };
        languages.insert(
            language.code.clone(),
            LanguageCoverage {
                present,
                missing: missing_keys.len(),
                percent,
                missing_keys,
            },
        );
    }
    CoverageReport {
        total_keys: total,
        languages,
    }
}
