use std::sync::Arc;

use localize_core::{FlatTable, Language, Translations, flatten};

use crate::state::{InitializeOptions, LocalizeState};
use crate::translate::Translate;

pub fn get_languages(state: &LocalizeState) -> &[Language] {
    &state.languages
}

pub fn get_translations(state: &LocalizeState) -> &Translations {
    &state.translations
}

pub fn get_options(state: &LocalizeState) -> &InitializeOptions {
    &state.options
}

pub fn get_active_language(state: &LocalizeState) -> Option<&Language> {
    state.active_language()
}

pub fn get_translations_for_active_language(state: &LocalizeState) -> FlatTable {
    flatten(state.active_language(), &state.languages, &state.translations)
}

pub fn get_translations_for_language(state: &LocalizeState, code: &str) -> FlatTable {
    let language = Language::new(code);
    flatten(Some(&language), &state.languages, &state.translations)
}

pub fn get_translate(state: &Arc<LocalizeState>) -> Translate {
    Translate::new(Arc::clone(state))
}
