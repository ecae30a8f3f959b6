use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(&[^\s]*;|</?\w+((\s+\w+(\s*=\s*(?:".*?"|'.*?'|[^'">\s]+))?)+\s*|\s*)/?>)"#,
    )
    .expect("markup pattern is valid")
});

/// Heuristic check for tags or entity references in `value`.
///
/// Not a parser: it only gates whether a translated string may be handed to
/// the host as raw markup.
pub fn has_html_tags(value: &str) -> bool {
    MARKUP.is_match(value)
}
