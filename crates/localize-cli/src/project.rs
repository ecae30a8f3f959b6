use std::path::{Path, PathBuf};
use std::sync::Arc;

use localize_runtime::{
    LocalizeConfig, LocalizeState, TransformRegistry, TranslationSource, build_state,
    load_config_or_default,
};

use crate::error::CliError;

/// A config file together with the directory its sources are relative to.
#[derive(Debug)]
pub struct Project {
    pub config: LocalizeConfig,
    pub base_dir: PathBuf,
    pub registry: TransformRegistry,
}

pub fn load_project(config_path: &Path) -> Result<Project, CliError> {
    let config = load_config_or_default(config_path)?;
    let base_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    Ok(Project {
        config,
        base_dir,
        registry: TransformRegistry::with_builtins(),
    })
}

impl Project {
    pub fn state(&self) -> Result<Arc<LocalizeState>, CliError> {
        Ok(build_state(&self.config, &self.base_dir, &self.registry)?)
    }

    pub fn source_path(&self, source: &TranslationSource) -> PathBuf {
        resolve_path(&self.base_dir, &source.path)
    }
}

fn resolve_path(base_dir: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        return path;
    }
    base_dir.join(path)
}
