use std::borrow::Cow;
use std::convert::Infallible;

use crate::{
    Args, Child, FlatTable, Language, Localized, MissingTranslation, Options, Segment, Templated,
    has_html_tags, templater,
};

/// Resolves `key` to a renderable value for `active`.
///
/// Missing or empty translations fall back to the text returned by
/// `on_missing_translation`, or else to the templated
/// `missing_translation_msg` (an empty string when
/// `show_missing_translation_msg` is off), after notifying
/// `missing_translation_callback`. Text that contains markup is returned as
/// [`Localized::Html`] only when `render_inner_html` is set. A result that
/// contains a node is always wrapped in a [`Localized::Fragment`], even when
/// the node is the only child.
pub fn resolve<N: Clone>(
    key: &str,
    flat: &FlatTable,
    data: &Args<N>,
    active: &Language,
    options: &Options,
) -> Localized<N> {
    resolve_with_default(key, flat, data, active, options, None)
}

/// Like [`resolve`], but hands `default_translation` to
/// `on_missing_translation` when the key is missing.
pub fn resolve_with_default<N: Clone>(
    key: &str,
    flat: &FlatTable,
    data: &Args<N>,
    active: &Language,
    options: &Options,
    default_translation: Option<&str>,
) -> Localized<N> {
    let source = match flat.get(key).filter(|value| !value.is_empty()) {
        Some(value) => Cow::Borrowed(value.as_str()),
        None => Cow::Owned(missing_translation(
            key,
            active,
            options,
            default_translation,
        )),
    };

    match templater(&source, data) {
        Templated::Text(text) => {
            if is_markup(&text, options) {
                Localized::Html(text)
            } else {
                Localized::Text(text)
            }
        }
        Templated::Segments(segments) => {
            let children = segments
                .into_iter()
                .map(|segment| match segment {
                    Segment::Text(text) if is_markup(&text, options) => Child::Html(text),
                    Segment::Text(text) => Child::Text(text),
                    Segment::Node(node) => Child::Node(node),
                })
                .collect();
            Localized::Fragment(children)
        }
    }
}

fn missing_translation(
    key: &str,
    active: &Language,
    options: &Options,
    default_translation: Option<&str>,
) -> String {
    if let Some(callback) = &options.missing_translation_callback {
        callback.on_missing_translation(key, &active.code);
    }
    if let Some(fallback) = &options.on_missing_translation {
        return fallback.fallback(&MissingTranslation {
            translation_id: key,
            language_code: &active.code,
            default_translation,
        });
    }
    if !options.show_missing_translation_msg {
        return String::new();
    }
    let data: Args<Infallible> = Args::new()
        .with("key", key)
        .with("code", active.code.as_str());
    templater(&options.missing_translation_msg, &data)
        .into_text()
        .unwrap_or_default()
}

fn is_markup(text: &str, options: &Options) -> bool {
    options.render_inner_html && !text.is_empty() && has_html_tags(text)
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::sync::{Arc, Mutex};

    use super::{resolve, resolve_with_default};
    use crate::{Args, Child, FlatTable, HtmlMarkup, Language, Localized, MissingTranslation, Options};

    fn flat(pairs: &[(&str, &str)]) -> FlatTable {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn english() -> Language {
        Language::new("en").activated(true)
    }

    fn no_data() -> Args<Infallible> {
        Args::new()
    }

    #[test]
    fn substitutes_translated_value() {
        let table = flat(&[("greeting", "Hello ${name}")]);
        let data: Args<Infallible> = Args::new().with("name", "Nova");
        let out = resolve("greeting", &table, &data, &english(), &Options::default());
        assert_eq!(out, Localized::Text("Hello Nova".to_string()));
    }

    #[test]
    fn missing_key_uses_fallback_template() {
        let options = Options::default().with_missing_translation_msg("Missing ${key} for ${code}");
        let out = resolve("greeting", &FlatTable::new(), &no_data(), &english(), &options);
        assert_eq!(out.as_text(), Some("Missing greeting for en"));
    }

    #[test]
    fn suppressed_fallback_is_empty() {
        let options = Options::default()
            .with_missing_translation_msg("Missing ${key} for ${code}")
            .with_show_missing_translation_msg(false);
        let out = resolve("greeting", &FlatTable::new(), &no_data(), &english(), &options);
        assert_eq!(out, Localized::Text(String::new()));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let table = flat(&[("greeting", "")]);
        let options = Options::default().with_missing_translation_msg("?${key}");
        let out = resolve("greeting", &table, &no_data(), &english(), &options);
        assert_eq!(out.as_text(), Some("?greeting"));
    }

    #[test]
    fn callback_sees_key_and_code() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let options = Options::default().with_missing_translation_callback(
            move |key: &str, code: &str| {
                sink.lock()
                    .expect("lock")
                    .push(format!("{key}:{code}"));
            },
        );
        resolve("title", &FlatTable::new(), &no_data(), &english(), &options);
        resolve("title", &flat(&[("title", "T")]), &no_data(), &english(), &options);
        assert_eq!(*seen.lock().expect("lock"), vec!["title:en".to_string()]);
    }

    #[test]
    fn callback_runs_even_when_message_is_suppressed() {
        let seen = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&seen);
        let options = Options::default()
            .with_show_missing_translation_msg(false)
            .with_missing_translation_callback(move |_: &str, _: &str| {
                *sink.lock().expect("lock") += 1;
            });
        resolve("title", &FlatTable::new(), &no_data(), &english(), &options);
        assert_eq!(*seen.lock().expect("lock"), 1);
    }

    #[test]
    fn markup_stays_text_without_inner_html() {
        let table = flat(&[("bold", "<b>hi</b>")]);
        let data: Args<String> = Args::new();
        let out = resolve("bold", &table, &data, &english(), &Options::default());
        assert_eq!(out, Localized::Text("<b>hi</b>".to_string()));
        assert_eq!(out.into_node(&HtmlMarkup), "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[test]
    fn fragment_text_stays_text_without_inner_html() {
        let table = flat(&[("help", "<b>Note</b>: see ${link}")]);
        let data = Args::new().with_node("link", "<a>docs</a>".to_string());
        let out = resolve("help", &table, &data, &english(), &Options::default());
        assert_eq!(
            out,
            Localized::Fragment(vec![
                Child::Text("<b>Note</b>: see ".to_string()),
                Child::Node("<a>docs</a>".to_string()),
            ])
        );
        assert_eq!(
            out.into_node(&HtmlMarkup),
            "<span>&lt;b&gt;Note&lt;/b&gt;: see <a>docs</a></span>"
        );
    }

    #[test]
    fn markup_becomes_html_with_inner_html() {
        let table = flat(&[("bold", "<b>hi</b>")]);
        let options = Options::default().with_render_inner_html(true);
        let out = resolve("bold", &table, &no_data(), &english(), &options);
        assert_eq!(out, Localized::Html("<b>hi</b>".to_string()));
    }

    #[test]
    fn plain_text_ignores_inner_html_flag() {
        let table = flat(&[("plain", "hi there")]);
        let options = Options::default().with_render_inner_html(true);
        let out = resolve("plain", &table, &no_data(), &english(), &options);
        assert!(out.is_text());
    }

    #[test]
    fn nodes_produce_fragment_with_marked_children() {
        let table = flat(&[("help", "<b>Note</b>: see ${link}")]);
        let data = Args::new().with_node("link", "<a>docs</a>".to_string());
        let options = Options::default().with_render_inner_html(true);
        let out = resolve("help", &table, &data, &english(), &options);
        assert_eq!(
            out,
            Localized::Fragment(vec![
                Child::Html("<b>Note</b>: see ".to_string()),
                Child::Node("<a>docs</a>".to_string()),
            ])
        );
    }

    #[test]
    fn lone_node_is_not_collapsed() {
        let table = flat(&[("icon", "${icon}")]);
        let data = Args::new().with_node("icon", "<svg/>".to_string());
        let out = resolve("icon", &table, &data, &english(), &Options::default());
        assert_eq!(
            out,
            Localized::Fragment(vec![Child::Node("<svg/>".to_string())])
        );
    }

    #[test]
    fn text_only_segments_collapse_to_text() {
        let table = flat(&[("count", "${n} items")]);
        let data: Args<String> = Args::new().with("n", 4);
        let out = resolve("count", &table, &data, &english(), &Options::default());
        assert_eq!(out, Localized::Text("4 items".to_string()));
    }

    #[test]
    fn fallback_message_is_templated_with_data_too() {
        let options = Options::default().with_missing_translation_msg("No ${key}, ${name}");
        let data: Args<Infallible> = Args::new().with("name", "Nova");
        let out = resolve("title", &FlatTable::new(), &data, &english(), &options);
        assert_eq!(out.as_text(), Some("No title, Nova"));
    }

    #[test]
    fn fallback_hook_replaces_missing_message() {
        let options = Options::default()
            .with_show_missing_translation_msg(false)
            .with_on_missing_translation(|missing: &MissingTranslation<'_>| {
                format!(
                    "{}/{}: {}",
                    missing.translation_id,
                    missing.language_code,
                    missing.default_translation.unwrap_or("-")
                )
            });
        let out = resolve_with_default(
            "title",
            &FlatTable::new(),
            &no_data(),
            &english(),
            &options,
            Some("Titre"),
        );
        assert_eq!(out.as_text(), Some("title/en: Titre"));
        let out = resolve("title", &FlatTable::new(), &no_data(), &english(), &options);
        assert_eq!(out.as_text(), Some("title/en: -"));
    }

    #[test]
    fn fallback_hook_output_is_templated() {
        let options = Options::default()
            .with_on_missing_translation(|_: &MissingTranslation<'_>| "Hi ${name}".to_string());
        let data: Args<Infallible> = Args::new().with("name", "Nova");
        let out = resolve("greeting", &FlatTable::new(), &data, &english(), &options);
        assert_eq!(out.as_text(), Some("Hi Nova"));
    }

    #[test]
    fn fallback_hook_is_not_called_for_translated_keys() {
        let options = Options::default()
            .with_on_missing_translation(|_: &MissingTranslation<'_>| "fallback".to_string());
        let table = flat(&[("title", "Home")]);
        let out = resolve_with_default("title", &table, &no_data(), &english(), &options, Some("x"));
        assert_eq!(out.as_text(), Some("Home"));
    }
}
