#![forbid(unsafe_code)]

mod action;
mod config;
mod error;
mod loader;
mod reducer;
mod selectors;
mod state;
mod store;
mod transform;
mod translate;
mod translation;

pub use crate::action::{
    Action, InitializePayload, add_translation, add_translation_for_language, initialize,
    set_active_language,
};
pub use crate::config::{
    DEFAULT_CONFIG_FILE, LocalizeConfig, SourceKind, TranslationSource, load_config,
    load_config_or_default,
};
pub use crate::error::{RuntimeError, RuntimeResult};
pub use crate::loader::{build_state, load_state, load_translation_file, parse_sha256};
pub use crate::reducer::{localize_reducer, try_localize_reducer};
pub use crate::selectors::{
    get_active_language, get_languages, get_options, get_translate, get_translations,
    get_translations_for_active_language, get_translations_for_language,
};
pub use crate::state::{AddTranslationOptions, InitializeOptions, LanguageInput, LocalizeState};
pub use crate::store::{LocalizeStore, Store, Subscription, store_did_change};
pub use crate::transform::{SINGLE_LANGUAGE_TRANSFORM, TransformRegistry, single_language_transform};
pub use crate::translate::{Translate, TranslateOverrides, TranslateValue, Translated};
pub use crate::translation::{flatten_nested, multi_language_table, single_language_entries};
