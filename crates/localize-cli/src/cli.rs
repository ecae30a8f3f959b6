use std::path::PathBuf;

use localize_runtime::DEFAULT_CONFIG_FILE;
use thiserror::Error;

use crate::command_coverage::{CoverageCommandError, CoverageOptions, run_coverage};
use crate::command_translate::{TranslateCommandError, TranslateOptions, run_translate};
use crate::command_validate::{ValidateCommandError, ValidateOptions, run_validate};

#[derive(Debug, Error)]
pub enum CliAppError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Validate(#[from] ValidateCommandError),
    #[error(transparent)]
    Coverage(#[from] CoverageCommandError),
    #[error(transparent)]
    Translate(#[from] TranslateCommandError),
}

pub fn run() -> Result<(), CliAppError> {
    let mut args = std::env::args().skip(1);
    let command = args.next().ok_or_else(|| CliAppError::Usage(usage()))?;
    match command.as_str() {
        "validate" => {
            let options = parse_validate_options(args.collect())?;
            run_validate(&options)?;
            Ok(())
        }
        "coverage" => {
            let options = parse_coverage_options(args.collect())?;
            run_coverage(&options)?;
            Ok(())
        }
        "translate" => {
            let options = parse_translate_options(args.collect())?;
            println!("{}", run_translate(&options)?);
            Ok(())
        }
        _ => Err(CliAppError::Usage(usage())),
    }
}

fn next_value(flag: &str, iter: &mut impl Iterator<Item = String>) -> Result<String, CliAppError> {
    iter.next()
        .ok_or_else(|| CliAppError::Usage(format!("{flag} requires a value\n\n{}", usage())))
}

fn usage() -> String {
    "usage: localize validate [--config <path>]\n       localize coverage [--out <path>] [--config <path>]\n       localize translate --key <key> [--language <code>] [--data <name=value>...] [--number <name=value>...] [--config <path>]".to_string()
}

fn parse_validate_options(args: Vec<String>) -> Result<ValidateOptions, CliAppError> {
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => config_path = PathBuf::from(next_value("--config", &mut iter)?),
            "--help" | "-h" => return Err(CliAppError::Usage(usage())),
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    Ok(ValidateOptions { config_path })
}

fn parse_coverage_options(args: Vec<String>) -> Result<CoverageOptions, CliAppError> {
    let mut out_path = PathBuf::from("coverage.json");
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--out" => out_path = PathBuf::from(next_value("--out", &mut iter)?),
            "--config" => config_path = PathBuf::from(next_value("--config", &mut iter)?),
            "--help" | "-h" => return Err(CliAppError::Usage(usage())),
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    Ok(CoverageOptions {
        out_path,
        config_path,
    })
}

fn parse_translate_options(args: Vec<String>) -> Result<TranslateOptions, CliAppError> {
    let mut key = None;
    let mut language = None;
    let mut data = Vec::new();
    let mut numbers = Vec::new();
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--key" => key = Some(next_value("--key", &mut iter)?),
            "--language" => language = Some(next_value("--language", &mut iter)?),
            "--data" => data.push(next_value("--data", &mut iter)?),
            "--number" => numbers.push(next_value("--number", &mut iter)?),
            "--config" => config_path = PathBuf::from(next_value("--config", &mut iter)?),
            "--help" | "-h" => return Err(CliAppError::Usage(usage())),
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    let key = key.ok_or_else(|| CliAppError::Usage(usage()))?;
    Ok(TranslateOptions {
        key,
        language,
        data,
        numbers,
        config_path,
    })
}

#[cfg(test)]
mod tests {
    use super::{CliAppError, parse_coverage_options, parse_translate_options, parse_validate_options};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_validate_options() {
        let options = parse_validate_options(Vec::new()).expect("options");
        assert!(options.config_path.ends_with("localize.toml"));
        let options =
            parse_validate_options(args(&["--config", "site/i18n.toml"])).expect("options");
        assert!(options.config_path.ends_with("i18n.toml"));
    }

    #[test]
    fn parses_coverage_options() {
        let options = parse_coverage_options(Vec::new()).expect("options");
        assert!(options.out_path.ends_with("coverage.json"));
    }

    #[test]
    fn parses_translate_options() {
        let options = parse_translate_options(args(&[
            "--key",
            "home.title",
            "--language",
            "fr",
            "--data",
            "name=Ana",
            "--data",
            "code=007",
            "--number",
            "n=2",
        ]))
        .expect("options");
        assert_eq!(options.key, "home.title");
        assert_eq!(options.language.as_deref(), Some("fr"));
        assert_eq!(options.data, vec!["name=Ana", "code=007"]);
        assert_eq!(options.numbers, vec!["n=2"]);
    }

    #[test]
    fn translate_requires_key() {
        let err = parse_translate_options(args(&["--language", "fr"])).expect_err("usage");
        assert!(matches!(err, CliAppError::Usage(_)));
    }

    #[test]
    fn flag_without_value_is_usage_error() {
        let err = parse_validate_options(args(&["--config"])).expect_err("usage");
        match err {
            CliAppError::Usage(message) => assert!(message.starts_with("--config requires a value")),
            _ => panic!("unexpected error"),
        }
    }
}
