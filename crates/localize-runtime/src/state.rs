use localize_core::{Language, Options, TransformSetting, Translations};
use serde::{Deserialize, Serialize};

/// A language as supplied to `initialize`: a bare code or a code with a label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LanguageInput {
    Code(String),
    Named { code: String, name: String },
}

impl LanguageInput {
    pub fn code(&self) -> &str {
        match self {
            LanguageInput::Code(code) => code,
            LanguageInput::Named { code, .. } => code,
        }
    }

    pub fn into_language(self) -> Language {
        match self {
            LanguageInput::Code(code) => Language::new(code),
            LanguageInput::Named { code, name } => Language::named(code, name),
        }
    }
}

impl From<&str> for LanguageInput {
    fn from(code: &str) -> Self {
        LanguageInput::Code(code.to_string())
    }
}

impl From<(&str, &str)> for LanguageInput {
    fn from((code, name): (&str, &str)) -> Self {
        LanguageInput::Named {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

/// Options stored with the localize state.
#[derive(Clone, Debug, Default)]
pub struct InitializeOptions {
    /// Language made active by `initialize`; the first language otherwise.
    pub default_language: Option<String>,
    pub options: Options,
}

impl InitializeOptions {
    pub fn with_default_language(mut self, code: impl Into<String>) -> Self {
        self.default_language = Some(code.into());
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct AddTranslationOptions {
    pub translation_transform: Option<TransformSetting>,
}

impl AddTranslationOptions {
    pub fn with_transform(setting: TransformSetting) -> Self {
        Self {
            translation_transform: Some(setting),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LocalizeState {
    pub languages: Vec<Language>,
    pub translations: Translations,
    pub options: InitializeOptions,
}

impl LocalizeState {
    pub fn active_language(&self) -> Option<&Language> {
        self.languages.iter().find(|language| language.active)
    }

    pub fn language_codes(&self) -> Vec<String> {
        self.languages
            .iter()
            .map(|language| language.code.clone())
            .collect()
    }
}
