#![forbid(unsafe_code)]

mod args;
mod error;
mod html;
mod language;
mod markup;
mod options;
mod resolver;
mod table;
mod templater;

pub use args::{Args, Value};
pub use error::{CoreError, CoreResult};
pub use html::has_html_tags;
pub use language::{Language, index_of};
pub use markup::{
    Child, HtmlMarkup, Localized, MarkupFactory, StaticRenderer, WRAPPER_TAG, escape_html,
};
pub use options::{
    DEFAULT_MISSING_TRANSLATION_MSG, MissingTranslation, MissingTranslationFallback,
    MissingTranslationHandler, Options, TransformSetting, TranslationTransform, validate,
};
pub use resolver::{resolve, resolve_with_default};
pub use table::{FlatTable, Translations, flatten};
pub use templater::{Segment, Templated, templater};
