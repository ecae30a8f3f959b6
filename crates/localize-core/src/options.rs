use std::fmt;
use std::sync::Arc;

use crate::{CoreError, CoreResult, Translations};

pub const DEFAULT_MISSING_TRANSLATION_MSG: &str =
    "Missing translationId: ${key} for language: ${code}";

/// Observer notified with `(key, language_code)` when a key has no translation.
pub trait MissingTranslationHandler: Send + Sync {
    fn on_missing_translation(&self, key: &str, language_code: &str);
}

impl<F> MissingTranslationHandler for F
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn on_missing_translation(&self, key: &str, language_code: &str) {
        self(key, language_code)
    }
}

/// A key that has no translation in the requested language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MissingTranslation<'a> {
    pub translation_id: &'a str,
    pub language_code: &'a str,
    /// The key's value in the default language, when one is configured and
    /// translated.
    pub default_translation: Option<&'a str>,
}

/// Supplies the text used in place of a missing translation.
///
/// The returned string is templated with the caller's data like any other
/// translation.
pub trait MissingTranslationFallback: Send + Sync {
    fn fallback(&self, missing: &MissingTranslation<'_>) -> String;
}

impl<F> MissingTranslationFallback for F
where
    F: Fn(&MissingTranslation<'_>) -> String + Send + Sync,
{
    fn fallback(&self, missing: &MissingTranslation<'_>) -> String {
        self(missing)
    }
}

/// Reshapes arbitrary translation data into a [`Translations`] table laid out
/// for `language_codes`.
pub trait TranslationTransform: Send + Sync {
    fn transform(&self, data: &serde_json::Value, language_codes: &[String]) -> Translations;
}

impl<F> TranslationTransform for F
where
    F: Fn(&serde_json::Value, &[String]) -> Translations + Send + Sync,
{
    fn transform(&self, data: &serde_json::Value, language_codes: &[String]) -> Translations {
        self(data, language_codes)
    }
}

/// A configured translation transform.
#[derive(Clone)]
pub enum TransformSetting {
    /// Bound to a callable.
    Bound(Arc<dyn TranslationTransform>),
    /// Named in configuration but never bound to a callable.
    Declared(String),
}

impl TransformSetting {
    pub fn bound(transform: impl TranslationTransform + 'static) -> Self {
        TransformSetting::Bound(Arc::new(transform))
    }

    /// The callable behind this setting, or `InvalidConfiguration` when the
    /// transform was only declared.
    pub fn callable(&self) -> CoreResult<&dyn TranslationTransform> {
        match self {
            TransformSetting::Bound(transform) => Ok(transform.as_ref()),
            TransformSetting::Declared(_) => Err(CoreError::InvalidConfiguration(
                "translation_transform is not a callable transform",
            )),
        }
    }
}

impl fmt::Debug for TransformSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformSetting::Bound(_) => f.write_str("Bound(..)"),
            TransformSetting::Declared(name) => f.debug_tuple("Declared").field(name).finish(),
        }
    }
}

/// Resolution settings.
#[derive(Clone)]
pub struct Options {
    /// Hand strings that look like markup to the host as raw HTML.
    pub render_inner_html: bool,
    /// When false, missing keys resolve to an empty string.
    pub show_missing_translation_msg: bool,
    /// Fallback template, rendered with `key` and `code` placeholders.
    pub missing_translation_msg: String,
    pub missing_translation_callback: Option<Arc<dyn MissingTranslationHandler>>,
    /// Replaces `missing_translation_msg` and its suppression flag when set.
    pub on_missing_translation: Option<Arc<dyn MissingTranslationFallback>>,
    pub translation_transform: Option<TransformSetting>,
}

impl Options {
    pub fn with_render_inner_html(mut self, enabled: bool) -> Self {
        self.render_inner_html = enabled;
        self
    }

    pub fn with_show_missing_translation_msg(mut self, enabled: bool) -> Self {
        self.show_missing_translation_msg = enabled;
        self
    }

    pub fn with_missing_translation_msg(mut self, template: impl Into<String>) -> Self {
        self.missing_translation_msg = template.into();
        self
    }

    pub fn with_missing_translation_callback(
        mut self,
        handler: impl MissingTranslationHandler + 'static,
    ) -> Self {
        self.missing_translation_callback = Some(Arc::new(handler));
        self
    }

    pub fn with_on_missing_translation(
        mut self,
        fallback: impl MissingTranslationFallback + 'static,
    ) -> Self {
        self.on_missing_translation = Some(Arc::new(fallback));
        self
    }

    pub fn with_translation_transform(mut self, setting: TransformSetting) -> Self {
        self.translation_transform = Some(setting);
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            render_inner_html: false,
            show_missing_translation_msg: true,
            missing_translation_msg: DEFAULT_MISSING_TRANSLATION_MSG.to_string(),
            missing_translation_callback: None,
            on_missing_translation: None,
            translation_transform: None,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("render_inner_html", &self.render_inner_html)
            .field(
                "show_missing_translation_msg",
                &self.show_missing_translation_msg,
            )
            .field("missing_translation_msg", &self.missing_translation_msg)
            .field(
                "missing_translation_callback",
                &self.missing_translation_callback.is_some(),
            )
            .field(
                "on_missing_translation",
                &self.on_missing_translation.is_some(),
            )
            .field("translation_transform", &self.translation_transform)
            .finish()
    }
}

/// Rejects a transform that cannot be invoked; otherwise returns `options`
/// untouched.
pub fn validate(options: Options) -> CoreResult<Options> {
    if let Some(setting) = &options.translation_transform {
        setting.callable()?;
    }
    Ok(options)
}
