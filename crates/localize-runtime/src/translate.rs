use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use localize_core::{
    Args, FlatTable, Language, Localized, MarkupFactory, MissingTranslationFallback, Options,
    StaticRenderer, flatten, resolve_with_default,
};
use tracing::warn;

use crate::state::LocalizeState;

/// One key or a list of keys to translate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TranslateValue {
    Key(String),
    Keys(Vec<String>),
}

impl From<&str> for TranslateValue {
    fn from(key: &str) -> Self {
        TranslateValue::Key(key.to_string())
    }
}

impl From<String> for TranslateValue {
    fn from(key: String) -> Self {
        TranslateValue::Key(key)
    }
}

impl From<Vec<String>> for TranslateValue {
    fn from(keys: Vec<String>) -> Self {
        TranslateValue::Keys(keys)
    }
}

impl From<&[&str]> for TranslateValue {
    fn from(keys: &[&str]) -> Self {
        TranslateValue::Keys(keys.iter().map(|key| key.to_string()).collect())
    }
}

impl<const LEN: usize> From<[&str; LEN]> for TranslateValue {
    fn from(keys: [&str; LEN]) -> Self {
        TranslateValue::Keys(keys.iter().map(|key| key.to_string()).collect())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Translated<N> {
    Single(Localized<N>),
    Map(BTreeMap<String, Localized<N>>),
}

impl<N> Translated<N> {
    pub fn into_single(self) -> Option<Localized<N>> {
        match self {
            Translated::Single(value) => Some(value),
            Translated::Map(_) => None,
        }
    }

    pub fn into_map(self) -> Option<BTreeMap<String, Localized<N>>> {
        match self {
            Translated::Single(_) => None,
            Translated::Map(values) => Some(values),
        }
    }
}

/// Per-call adjustments to the stored options.
#[derive(Clone, Default)]
pub struct TranslateOverrides {
    /// Translate into this language instead of the active one.
    pub language: Option<String>,
    pub render_inner_html: Option<bool>,
    pub on_missing_translation: Option<Arc<dyn MissingTranslationFallback>>,
}

impl TranslateOverrides {
    pub fn with_on_missing_translation(
        mut self,
        fallback: impl MissingTranslationFallback + 'static,
    ) -> Self {
        self.on_missing_translation = Some(Arc::new(fallback));
        self
    }
}

impl fmt::Debug for TranslateOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslateOverrides")
            .field("language", &self.language)
            .field("render_inner_html", &self.render_inner_html)
            .field(
                "on_missing_translation",
                &self.on_missing_translation.is_some(),
            )
            .finish()
    }
}

/// Translation entry points bound to one state snapshot.
#[derive(Clone, Debug)]
pub struct Translate {
    state: Arc<LocalizeState>,
}

struct ResolveContext {
    language: Language,
    flat: FlatTable,
    /// Default language table, only built when a fallback hook needs it.
    defaults: FlatTable,
    options: Options,
}

impl ResolveContext {
    fn resolve<N: Clone>(&self, key: &str, data: &Args<N>) -> Localized<N> {
        if !self.flat.get(key).is_some_and(|value| !value.is_empty()) {
            warn!(key, language = %self.language.code, "missing translation");
        }
        let default_translation = self.defaults.get(key).map(String::as_str);
        resolve_with_default(
            key,
            &self.flat,
            data,
            &self.language,
            &self.options,
            default_translation,
        )
    }
}

impl Translate {
    pub fn new(state: Arc<LocalizeState>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &Arc<LocalizeState> {
        &self.state
    }

    pub fn translate<N: Clone>(
        &self,
        value: impl Into<TranslateValue>,
        data: &Args<N>,
        overrides: &TranslateOverrides,
    ) -> Translated<N> {
        let context = self.context(overrides);
        match value.into() {
            TranslateValue::Key(key) => Translated::Single(context.resolve(&key, data)),
            TranslateValue::Keys(keys) => Translated::Map(
                keys.into_iter()
                    .map(|key| {
                        let value = context.resolve(&key, data);
                        (key, value)
                    })
                    .collect(),
            ),
        }
    }

    pub fn translate_key<N: Clone>(&self, key: &str, data: &Args<N>) -> Localized<N> {
        self.context(&TranslateOverrides::default())
            .resolve(key, data)
    }

    /// Resolves `prefix` itself and every key nested under `prefix.`.
    pub fn translate_subtree<N: Clone>(
        &self,
        prefix: &str,
        data: &Args<N>,
        overrides: &TranslateOverrides,
    ) -> BTreeMap<String, Localized<N>> {
        let context = self.context(overrides);
        let nested = format!("{prefix}.");
        self.state
            .translations
            .keys()
            .filter(|key| *key == prefix || key.starts_with(&nested))
            .map(|key| (key.to_string(), context.resolve(key, data)))
            .collect()
    }

    /// Renders `key` to a string. Plain text is returned as is; markup needs
    /// `renderer`, and without one nothing is returned.
    pub fn translate_static<F>(
        &self,
        key: &str,
        data: &Args<F::Node>,
        factory: &F,
        renderer: Option<&dyn StaticRenderer<F::Node>>,
    ) -> Option<String>
    where
        F: MarkupFactory,
        F::Node: Clone,
    {
        match self.translate_key(key, data) {
            Localized::Text(text) => Some(text),
            markup => match renderer {
                Some(renderer) => {
                    Some(renderer.render_to_static_markup(&markup.into_node(factory)))
                }
                None => {
                    warn!(
                        key,
                        "no static markup renderer supplied, markup translations cannot be rendered to strings"
                    );
                    None
                }
            },
        }
    }

    fn context(&self, overrides: &TranslateOverrides) -> ResolveContext {
        let language = match &overrides.language {
            Some(code) => Language::new(code.as_str()).activated(true),
            None => match self.state.active_language() {
                Some(language) => language.clone(),
                None => {
                    warn!("no active language, translations are unavailable");
                    Language::new("")
                }
            },
        };
        let flat = flatten(
            Some(&language),
            &self.state.languages,
            &self.state.translations,
        );
        let mut options = self.state.options.options.clone();
        if let Some(render_inner_html) = overrides.render_inner_html {
            options.render_inner_html = render_inner_html;
        }
        if let Some(fallback) = &overrides.on_missing_translation {
            options.on_missing_translation = Some(Arc::clone(fallback));
        }
        let defaults = match (&options.on_missing_translation, self.default_language()) {
            (Some(_), Some(default)) => flatten(
                Some(&default),
                &self.state.languages,
                &self.state.translations,
            ),
            _ => FlatTable::new(),
        };
        ResolveContext {
            language,
            flat,
            defaults,
            options,
        }
    }

    /// The configured default language, or the first registered one.
    fn default_language(&self) -> Option<Language> {
        match self.state.options.default_language.as_deref() {
            Some(code) => Some(Language::new(code)),
            None => self.state.languages.first().cloned(),
        }
    }
}
