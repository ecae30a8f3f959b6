use crate::state::{AddTranslationOptions, InitializeOptions, LanguageInput};

#[derive(Clone, Debug, Default)]
pub struct InitializePayload {
    pub languages: Vec<LanguageInput>,
    /// Multi-language translation data added right after registration.
    pub translation: Option<serde_json::Value>,
    pub options: Option<InitializeOptions>,
}

#[derive(Clone, Debug)]
pub enum Action {
    Initialize(InitializePayload),
    AddTranslation {
        translation: serde_json::Value,
        options: AddTranslationOptions,
    },
    AddTranslationForLanguage {
        translation: serde_json::Value,
        language: String,
    },
    SetActiveLanguage {
        language_code: String,
    },
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Initialize(_) => "@@localize/INITIALIZE",
            Action::AddTranslation { .. } => "@@localize/ADD_TRANSLATION",
            Action::AddTranslationForLanguage { .. } => "@@localize/ADD_TRANSLATION_FOR_LANGUAGE",
            Action::SetActiveLanguage { .. } => "@@localize/SET_ACTIVE_LANGUAGE",
        }
    }
}

pub fn initialize(payload: InitializePayload) -> Action {
    Action::Initialize(payload)
}

pub fn add_translation(translation: serde_json::Value, options: AddTranslationOptions) -> Action {
    Action::AddTranslation {
        translation,
        options,
    }
}

pub fn add_translation_for_language(
    translation: serde_json::Value,
    language: impl Into<String>,
) -> Action {
    Action::AddTranslationForLanguage {
        translation,
        language: language.into(),
    }
}

pub fn set_active_language(language_code: impl Into<String>) -> Action {
    Action::SetActiveLanguage {
        language_code: language_code.into(),
    }
}
