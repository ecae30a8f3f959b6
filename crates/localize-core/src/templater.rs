//! `${name}` placeholder substitution.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Args, Value};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{\s*([^\s}]+)\s*\}").expect("placeholder pattern is valid")
});

/// Result of running a template against placeholder data.
#[derive(Clone, Debug, PartialEq)]
pub enum Templated<N> {
    /// Every segment reduced to text.
    Text(String),
    /// At least one segment is an opaque node; segments are kept in order.
    Segments(Vec<Segment<N>>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Segment<N> {
    Text(String),
    Node(N),
}

impl<N> Templated<N> {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Templated::Text(text) => Some(text),
            Templated::Segments(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Templated::Text(text) => Some(text),
            Templated::Segments(_) => None,
        }
    }
}

enum Piece<'a, N> {
    Text(&'a str),
    Num(f64),
    Node(&'a N),
}

/// Substitutes `${name}` placeholders in `template` with values from `data`.
///
/// A placeholder takes the value of the first entry in `data` whose name
/// matches its token, compared ASCII case-insensitively. Unmatched
/// placeholders are left in place verbatim. When every piece is text or a
/// number the pieces are joined into [`Templated::Text`]; a single node
/// anywhere keeps the ordered pieces as [`Templated::Segments`].
pub fn templater<N: Clone>(template: &str, data: &Args<N>) -> Templated<N> {
    if template.is_empty() {
        return Templated::Text(String::new());
    }

    let mut pieces: Vec<Piece<'_, N>> = Vec::new();
    let mut cursor = 0;
    for captures in PLACEHOLDER.captures_iter(template) {
        let (Some(whole), Some(token)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if whole.start() > cursor {
            pieces.push(Piece::Text(&template[cursor..whole.start()]));
        }
        pieces.push(substitute(whole.as_str(), token.as_str(), data));
        cursor = whole.end();
    }
    if cursor < template.len() {
        pieces.push(Piece::Text(&template[cursor..]));
    }

    if pieces.iter().any(|piece| matches!(piece, Piece::Node(_))) {
        let segments = pieces
            .into_iter()
            .map(|piece| match piece {
                Piece::Text(text) => Segment::Text(text.to_string()),
                Piece::Num(number) => Segment::Text(number.to_string()),
                Piece::Node(node) => Segment::Node(node.clone()),
            })
            .collect();
        return Templated::Segments(segments);
    }

    let mut output = String::with_capacity(template.len());
    for piece in pieces {
        match piece {
            Piece::Text(text) => output.push_str(text),
            Piece::Num(number) => output.push_str(&number.to_string()),
            Piece::Node(_) => {}
        }
    }
    Templated::Text(output)
}

fn substitute<'a, N>(raw: &'a str, token: &str, data: &'a Args<N>) -> Piece<'a, N> {
    let matched = data
        .iter()
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(token));
    match matched {
        Some((_, Value::Str(text))) => Piece::Text(text),
        Some((_, Value::Num(number))) => Piece::Num(*number),
        Some((_, Value::Node(node))) => Piece::Node(node),
        None => Piece::Text(raw),
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::{Segment, Templated, templater};
    use crate::Args;

    fn text_args() -> Args<Infallible> {
        Args::new()
    }

    #[test]
    fn empty_template_is_empty_text() {
        let out = templater("", &text_args().with("a", "x"));
        assert_eq!(out, Templated::Text(String::new()));
    }

    #[test]
    fn replaces_every_occurrence() {
        let data = text_args().with("name", "Nova");
        let out = templater("${name}, hello ${name}!", &data);
        assert_eq!(out.as_text(), Some("Nova, hello Nova!"));
    }

    #[test]
    fn leaves_unknown_placeholders() {
        let data = text_args().with("name", "Nova");
        let out = templater("Hi ${name}, see ${other}", &data);
        assert_eq!(out.as_text(), Some("Hi Nova, see ${other}"));
    }

    #[test]
    fn exact_token_beats_prefix() {
        let data = text_args().with("a", "1").with("ab", "2");
        assert_eq!(templater("${ab}", &data).as_text(), Some("2"));
        assert_eq!(templater("${a}", &data).as_text(), Some("1"));
    }

    #[test]
    fn first_matching_name_wins() {
        let data = text_args().with("Name", "first").with("name", "second");
        assert_eq!(templater("${name}", &data).as_text(), Some("first"));
    }

    #[test]
    fn tolerates_whitespace_inside_braces() {
        let data = text_args().with("key", "home.title");
        let out = templater("Missing ${ key }", &data);
        assert_eq!(out.as_text(), Some("Missing home.title"));
    }

    #[test]
    fn adjacent_placeholders_stay_separate() {
        let data = text_args().with("a", "x").with("b", "y");
        assert_eq!(templater("${a}${b}", &data).as_text(), Some("xy"));
    }

    #[test]
    fn numbers_are_stringified() {
        let data = text_args().with("count", 3).with("ratio", 0.5).with("zero", 0);
        let out = templater("${count} at ${ratio}, ${zero} left", &data);
        assert_eq!(out.as_text(), Some("3 at 0.5, 0 left"));
    }

    #[test]
    fn template_without_placeholders_is_unchanged() {
        let out = templater("plain $ {text}", &text_args());
        assert_eq!(out.as_text(), Some("plain $ {text}"));
    }

    #[test]
    fn nodes_keep_segments_in_order() {
        let data = Args::new()
            .with("name", "Nova")
            .with_node("link", "<a>docs</a>".to_string());
        let out = templater("Hi ${name}, read ${link} now", &data);
        assert_eq!(
            out,
            Templated::Segments(vec![
                Segment::Text("Hi ".to_string()),
                Segment::Text("Nova".to_string()),
                Segment::Text(", read ".to_string()),
                Segment::Node("<a>docs</a>".to_string()),
                Segment::Text(" now".to_string()),
            ])
        );
    }

    #[test]
    fn lone_node_stays_a_segment_list() {
        let data = Args::new().with_node("icon", 7u8);
        let out = templater("${icon}", &data);
        assert_eq!(out, Templated::Segments(vec![Segment::Node(7u8)]));
    }

    #[test]
    fn unused_node_still_reduces_to_text() {
        let data = Args::new().with_node("icon", 7u8).with("name", "Nova");
        let out = templater("Hi ${name}", &data);
        assert_eq!(out, Templated::Text("Hi Nova".to_string()));
    }
}
