use std::path::PathBuf;

use localize_core::{Args, HtmlMarkup, Localized, Value};
use localize_runtime::{Translate, TranslateOverrides};
use thiserror::Error;

use crate::error::CliError;
use crate::project::load_project;

#[derive(Debug, Error)]
pub enum TranslateCommandError {
    #[error("config error: {0}")]
    Config(#[from] CliError),
    #[error("invalid {flag} entry {entry}, expected name=value")]
    InvalidData { flag: &'static str, entry: String },
    #[error("invalid --number entry {0}, value is not a finite number")]
    InvalidNumber(String),
}

#[derive(Debug, Clone)]
pub struct TranslateOptions {
    pub key: String,
    pub language: Option<String>,
    /// Raw `name=value` pairs in command-line order. Values stay strings.
    pub data: Vec<String>,
    /// `name=value` pairs whose value is parsed as a number.
    pub numbers: Vec<String>,
    pub config_path: PathBuf,
}

/// Resolves one key and renders it as an HTML string.
pub fn run_translate(options: &TranslateOptions) -> Result<String, TranslateCommandError> {
    let data = parse_data(&options.data, &options.numbers)?;
    let project = load_project(&options.config_path)?;
    let translate = Translate::new(project.state()?);
    let overrides = TranslateOverrides {
        language: options.language.clone(),
        ..TranslateOverrides::default()
    };
    let localized = translate
        .translate(options.key.as_str(), &data, &overrides)
        .into_single()
        .unwrap_or_else(|| Localized::Text(String::new()));
    Ok(localized.into_node(&HtmlMarkup))
}

fn parse_data(
    strings: &[String],
    numbers: &[String],
) -> Result<Args<String>, TranslateCommandError> {
    let mut data = Args::new();
    for entry in strings {
        let (name, raw) = split_entry("--data", entry)?;
        data.insert(name, Value::Str(raw.to_string()));
    }
    for entry in numbers {
        let (name, raw) = split_entry("--number", entry)?;
        let number = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .ok_or_else(|| TranslateCommandError::InvalidNumber(entry.clone()))?;
        data.insert(name, Value::Num(number));
    }
    Ok(data)
}

fn split_entry<'a>(
    flag: &'static str,
    entry: &'a str,
) -> Result<(&'a str, &'a str), TranslateCommandError> {
    let invalid = || TranslateCommandError::InvalidData {
        flag,
        entry: entry.to_string(),
    };
    let (name, raw) = entry.split_once('=').ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }
    Ok((name, raw))
}
