use std::collections::BTreeSet;
use std::path::PathBuf;

use localize_core::validate;
use localize_runtime::{
    SourceKind, TranslationSource, flatten_nested, load_translation_file,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::diagnostic::Diagnostic;
use crate::error::CliError;
use crate::project::{Project, load_project};

#[derive(Debug, Error)]
pub enum ValidateCommandError {
    #[error("config error: {0}")]
    Config(#[from] CliError),
    #[error("validation failed with {0} diagnostics")]
    Failed(usize),
}

#[derive(Debug, Clone)]
pub struct ValidateOptions {
    pub config_path: PathBuf,
}

pub fn run_validate(options: &ValidateOptions) -> Result<Vec<Diagnostic>, ValidateCommandError> {
    let project = load_project(&options.config_path)?;
    let diagnostics = validate_project(&project);
    for diagnostic in &diagnostics {
        warn!("{diagnostic}");
    }
    if diagnostics.is_empty() {
        info!(
            sources = project.config.translations.len(),
            "translation sources are valid"
        );
        Ok(diagnostics)
    } else {
        Err(ValidateCommandError::Failed(diagnostics.len()))
    }
}

fn validate_project(project: &Project) -> Vec<Diagnostic> {
    let config = &project.config;
    let codes = config.language_codes();
    let mut diagnostics = Vec::new();

    if codes.is_empty() {
        diagnostics.push(Diagnostic::new("LOC001", "no languages registered"));
    }
    let mut seen = BTreeSet::new();
    for code in &codes {
        if !seen.insert(*code) {
            diagnostics.push(Diagnostic::new(
                "LOC002",
                format!("language {code} is registered more than once"),
            ));
        }
    }
    if let Some(default_language) = &config.default_language {
        if !codes.contains(&default_language.as_str()) {
            diagnostics.push(Diagnostic::new(
                "LOC003",
                format!("default language {default_language} is not registered"),
            ));
        }
    }
    let options = config.initialize_options(&project.registry).options;
    let transformed = options.translation_transform.is_some();
    if let Err(err) = validate(options) {
        diagnostics.push(Diagnostic::new("LOC004", err.to_string()));
    }

    for source in &config.translations {
        diagnostics.extend(validate_source(project, source, &codes, transformed));
    }
    diagnostics
}

fn validate_source(
    project: &Project,
    source: &TranslationSource,
    codes: &[&str],
    transformed: bool,
) -> Vec<Diagnostic> {
    let path = project.source_path(source);
    let data = match load_translation_file(&path, source.hash.as_deref()) {
        Ok(data) => data,
        Err(err) => {
            return vec![Diagnostic::new("LOC006", err.to_string()).with_file(source.path.clone())];
        }
    };
    match source.kind {
        SourceKind::Single => match source.language.as_deref() {
            None => vec![
                Diagnostic::new("LOC007", "single-language source does not name a language")
                    .with_file(source.path.clone()),
            ],
            Some(code) if !codes.contains(&code) => vec![
                Diagnostic::new("LOC008", format!("language {code} is not registered"))
                    .with_file(source.path.clone()),
            ],
            Some(_) => Vec::new(),
        },
        // Transformed data has its own shape.
        SourceKind::Multi if transformed => Vec::new(),
        SourceKind::Multi => validate_multi_language(source, &data, codes.len()),
    }
}

fn validate_multi_language(
    source: &TranslationSource,
    data: &Value,
    width: usize,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for (key, leaf) in flatten_nested(data) {
        match leaf {
            Value::Array(values) if values.len() != width => diagnostics.push(
                Diagnostic::new(
                    "LOC005",
                    format!("expected {width} values, found {}", values.len()),
                )
                .with_file(source.path.clone())
                .with_key(key),
            ),
            Value::Array(_) => {}
            _ => diagnostics.push(
                Diagnostic::new("LOC009", "expected an array of per-language values")
                    .with_file(source.path.clone())
                    .with_key(key),
            ),
        }
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::{ValidateCommandError, ValidateOptions, run_validate};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        path.push(format!("localize_validate_{nanos}"));
        fs::create_dir_all(&path).expect("dir");
        path
    }

    fn write_config(dir: &PathBuf, contents: &str) -> PathBuf {
        let config_path = dir.join("localize.toml");
        fs::write(&config_path, contents).expect("config");
        config_path
    }

    #[test]
    fn accepts_consistent_sources() {
        let dir = temp_dir();
        fs::write(
            dir.join("global.json"),
            r#"{"home": {"title": ["Home", "Accueil"]}}"#,
        )
        .expect("write");
        fs::write(dir.join("fr.json"), r#"{"nav": "Retour"}"#).expect("write");
        let config_path = write_config(
            &dir,
            r#"
languages = ["en", "fr"]
default_language = "en"

[[translations]]
path = "global.json"

[[translations]]
path = "fr.json"
kind = "single"
language = "fr"
"#,
        );
        let diagnostics = run_validate(&ValidateOptions { config_path }).expect("valid");
        assert!(diagnostics.is_empty());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn omitted_default_language_is_not_reported() {
        let dir = temp_dir();
        fs::write(dir.join("global.json"), r#"{"title": ["Titre", "Titel"]}"#).expect("write");
        let config_path = write_config(
            &dir,
            "languages = [\"fr\", \"de\"]\n\n[[translations]]\npath = \"global.json\"\n",
        );
        let diagnostics = run_validate(&ValidateOptions { config_path }).expect("valid");
        assert!(diagnostics.is_empty());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn reports_length_mismatch_and_unknown_language() {
        let dir = temp_dir();
        fs::write(dir.join("global.json"), r#"{"title": ["Home"]}"#).expect("write");
        fs::write(dir.join("de.json"), r#"{"title": "Start"}"#).expect("write");
        let config_path = write_config(
            &dir,
            r#"
languages = ["en", "fr"]
default_language = "de"

[[translations]]
path = "global.json"

[[translations]]
path = "de.json"
kind = "single"
language = "de"
"#,
        );
        let err = run_validate(&ValidateOptions { config_path }).expect_err("invalid");
        match err {
            ValidateCommandError::Failed(count) => assert_eq!(count, 3),
            _ => panic!("unexpected error"),
        }
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn reports_unbound_transform() {
        let dir = temp_dir();
        let config_path = write_config(
            &dir,
            "languages = [\"en\"]\ntranslation_transform = \"shout\"\n",
        );
        let err = run_validate(&ValidateOptions { config_path }).expect_err("invalid");
        assert!(matches!(err, ValidateCommandError::Failed(1)));
        fs::remove_dir_all(&dir).ok();
    }
}
