use std::sync::Arc;

use localize_core::{Language, TransformSetting, Translations, index_of, validate};
use tracing::{debug, warn};

use crate::action::{Action, InitializePayload};
use crate::error::RuntimeResult;
use crate::state::{AddTranslationOptions, LocalizeState};
use crate::translation::{fit_width, multi_language_table, single_language_entries};

/// Applies `action`, logging and discarding actions with invalid options.
///
/// Actions that change nothing return the same snapshot so identity-based
/// change detection stays quiet.
pub fn localize_reducer(state: &Arc<LocalizeState>, action: &Action) -> Arc<LocalizeState> {
    match try_localize_reducer(state, action) {
        Ok(next) => next,
        Err(err) => {
            warn!(action = action.kind(), error = %err, "rejected localize action");
            Arc::clone(state)
        }
    }
}

pub fn try_localize_reducer(
    state: &Arc<LocalizeState>,
    action: &Action,
) -> RuntimeResult<Arc<LocalizeState>> {
    debug!(action = action.kind(), "reducing localize action");
    match action {
        Action::Initialize(payload) => Ok(Arc::new(initialize_state(payload)?)),
        Action::AddTranslation {
            translation,
            options,
        } => add_translation(state, translation, options),
        Action::AddTranslationForLanguage {
            translation,
            language,
        } => Ok(add_translation_for_language(state, translation, language)),
        Action::SetActiveLanguage { language_code } => {
            Ok(set_active_language(state, language_code))
        }
    }
}

fn initialize_state(payload: &InitializePayload) -> RuntimeResult<LocalizeState> {
    let mut options = payload.options.clone().unwrap_or_default();
    options.options = validate(options.options)?;

    let mut languages: Vec<Language> = payload
        .languages
        .iter()
        .cloned()
        .map(|input| input.into_language())
        .collect();
    let requested = options
        .default_language
        .as_deref()
        .and_then(|code| index_of(code, &languages));
    if requested.is_none() {
        if let Some(code) = options.default_language.as_deref() {
            warn!(language = code, "default language is not registered, using the first language");
        }
    }
    let active = requested.or(if languages.is_empty() { None } else { Some(0) });
    if let Some(index) = active {
        languages[index].active = true;
    }

    let mut state = LocalizeState {
        languages,
        translations: Translations::new(),
        options,
    };
    if let Some(translation) = &payload.translation {
        let transform = state.options.options.translation_transform.clone();
        let table = build_table(&state.languages, translation, transform.as_ref())?;
        state.translations.merge(table);
    }
    Ok(state)
}

fn add_translation(
    state: &Arc<LocalizeState>,
    translation: &serde_json::Value,
    options: &AddTranslationOptions,
) -> RuntimeResult<Arc<LocalizeState>> {
    let transform = options
        .translation_transform
        .as_ref()
        .or(state.options.options.translation_transform.as_ref());
    let table = build_table(&state.languages, translation, transform)?;
    let mut next = LocalizeState::clone(state);
    next.translations.merge(table);
    Ok(Arc::new(next))
}

fn build_table(
    languages: &[Language],
    translation: &serde_json::Value,
    transform: Option<&TransformSetting>,
) -> RuntimeResult<Translations> {
    let width = languages.len();
    let Some(setting) = transform else {
        return Ok(multi_language_table(translation, width));
    };
    let codes: Vec<String> = languages.iter().map(|l| l.code.clone()).collect();
    let transformed = setting.callable()?.transform(translation, &codes);
    Ok(transformed
        .iter()
        .map(|(key, values)| {
            let mut values = values.clone();
            fit_width(key, &mut values, width);
            (key.clone(), values)
        })
        .collect())
}

fn add_translation_for_language(
    state: &Arc<LocalizeState>,
    translation: &serde_json::Value,
    language: &str,
) -> Arc<LocalizeState> {
    let Some(index) = index_of(language, &state.languages) else {
        warn!(language, "cannot add translations for an unregistered language");
        return Arc::clone(state);
    };
    let width = state.languages.len();
    let mut next = LocalizeState::clone(state);
    for (key, text) in single_language_entries(translation) {
        let slots = next.translations.slots_mut(&key, width);
        if slots.len() < width {
            slots.resize(width, None);
        }
        slots[index] = Some(text);
    }
    Arc::new(next)
}

fn set_active_language(state: &Arc<LocalizeState>, language_code: &str) -> Arc<LocalizeState> {
    if index_of(language_code, &state.languages).is_none() {
        warn!(language = language_code, "active language is not registered");
    }
    let languages: Vec<Language> = state
        .languages
        .iter()
        .map(|language| {
            language
                .clone()
                .activated(language.code == language_code)
        })
        .collect();
    if languages == state.languages {
        return Arc::clone(state);
    }
    Arc::new(LocalizeState {
        languages,
        ..LocalizeState::clone(state)
    })
}
