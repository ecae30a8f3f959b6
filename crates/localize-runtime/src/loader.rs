use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use localize_core::index_of;
use serde_json::Value;
use tracing::info;

use crate::action::{add_translation, add_translation_for_language, initialize};
use crate::config::{LocalizeConfig, SourceKind, TranslationSource, load_config};
use crate::error::{RuntimeError, RuntimeResult};
use crate::reducer::try_localize_reducer;
use crate::state::{AddTranslationOptions, LocalizeState};
use crate::transform::TransformRegistry;

/// Reads a JSON translation file, checking its digest when one is given.
pub fn load_translation_file(path: &Path, expected_hash: Option<&str>) -> RuntimeResult<Value> {
    let bytes = fs::read(path)?;
    if let Some(hash) = expected_hash {
        let expected = parse_sha256(hash)?;
        if sha256(&bytes) != expected {
            return Err(RuntimeError::HashMismatch(path.display().to_string()));
        }
    }
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn parse_sha256(value: &str) -> RuntimeResult<[u8; 32]> {
    let trimmed = value.trim();
    let hex = trimmed.strip_prefix("sha256:").unwrap_or(trimmed);
    let bytes = hex::decode(hex).map_err(|_| RuntimeError::InvalidHash)?;
    if bytes.len() != 32 {
        return Err(RuntimeError::InvalidHash);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Loads the config at `config_path` and every translation file it lists.
pub fn load_state(
    config_path: &Path,
    registry: &TransformRegistry,
) -> RuntimeResult<Arc<LocalizeState>> {
    let config = load_config(config_path)?;
    let base_dir = config_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    build_state(&config, &base_dir, registry)
}

/// Initializes a state from `config`, then adds each translation source in
/// order. Source paths are resolved against `base_dir`.
pub fn build_state(
    config: &LocalizeConfig,
    base_dir: &Path,
    registry: &TransformRegistry,
) -> RuntimeResult<Arc<LocalizeState>> {
    let empty = Arc::new(LocalizeState::default());
    let mut state = try_localize_reducer(&empty, &initialize(config.initialize_payload(registry)))?;
    for source in &config.translations {
        let data = load_translation_file(&base_dir.join(&source.path), source.hash.as_deref())?;
        let action = match source.kind {
            SourceKind::Multi => add_translation(data, AddTranslationOptions::default()),
            SourceKind::Single => {
                add_translation_for_language(data, source_language(&state, source)?)
            }
        };
        state = try_localize_reducer(&state, &action)?;
        info!(path = %source.path, keys = state.translations.len(), "loaded translations");
    }
    Ok(state)
}

fn source_language<'a>(
    state: &LocalizeState,
    source: &'a TranslationSource,
) -> RuntimeResult<&'a str> {
    let language = source
        .language
        .as_deref()
        .ok_or_else(|| RuntimeError::MissingSourceLanguage(source.path.clone()))?;
    if index_of(language, &state.languages).is_none() {
        return Err(RuntimeError::UnknownLanguage(language.to_string()));
    }
    Ok(language)
}

pub(crate) fn sha256(bytes: &[u8]) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}
