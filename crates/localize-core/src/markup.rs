//! Localized output and the seam to the host's node constructors.

/// Tag used when a localized value has to be wrapped in an element.
pub const WRAPPER_TAG: &str = "span";

/// A resolved translation.
///
/// Consumers must branch on the variant: only [`Localized::Text`] is safe to
/// render as plain escaped text without a [`MarkupFactory`].
#[derive(Clone, Debug, PartialEq)]
pub enum Localized<N> {
    /// Plain text, rendered escaped.
    Text(String),
    /// A single string to be inserted as raw markup inside a wrapper element.
    Html(String),
    /// A wrapper element holding ordered children.
    Fragment(Vec<Child<N>>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Child<N> {
    Text(String),
    Html(String),
    Node(N),
}

impl<N> Localized<N> {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Localized::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Localized::Text(_))
    }

    /// Builds a host node through `factory`.
    pub fn into_node<F>(self, factory: &F) -> N
    where
        F: MarkupFactory<Node = N> + ?Sized,
    {
        match self {
            Localized::Text(text) => factory.text(&text),
            Localized::Html(html) => factory.raw_html(WRAPPER_TAG, &html),
            Localized::Fragment(children) => {
                let children = children
                    .into_iter()
                    .map(|child| match child {
                        Child::Text(text) => factory.text(&text),
                        Child::Html(html) => factory.raw_html(WRAPPER_TAG, &html),
                        Child::Node(node) => node,
                    })
                    .collect();
                factory.element(WRAPPER_TAG, children)
            }
        }
    }
}

/// Host-side constructors for renderable nodes.
pub trait MarkupFactory {
    type Node;

    /// A text node whose content is escaped when rendered.
    fn text(&self, text: &str) -> Self::Node;

    /// An element whose inner markup is `html`, inserted without escaping.
    fn raw_html(&self, tag: &str, html: &str) -> Self::Node;

    fn element(&self, tag: &str, children: Vec<Self::Node>) -> Self::Node;
}

/// Converts a host node to a markup string outside a live component tree.
pub trait StaticRenderer<N> {
    fn render_to_static_markup(&self, node: &N) -> String;
}

impl<N, F> StaticRenderer<N> for F
where
    F: Fn(&N) -> String,
{
    fn render_to_static_markup(&self, node: &N) -> String {
        self(node)
    }
}

/// A [`MarkupFactory`] whose nodes are HTML strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlMarkup;

impl MarkupFactory for HtmlMarkup {
    type Node = String;

    fn text(&self, text: &str) -> String {
        escape_html(text)
    }

    fn raw_html(&self, tag: &str, html: &str) -> String {
        format!("<{tag}>{html}</{tag}>")
    }

    fn element(&self, tag: &str, children: Vec<String>) -> String {
        let mut output = format!("<{tag}>");
        for child in children {
            output.push_str(&child);
        }
        output.push_str(&format!("</{tag}>"));
        output
    }
}

impl StaticRenderer<String> for HtmlMarkup {
    fn render_to_static_markup(&self, node: &String) -> String {
        node.clone()
    }
}

pub fn escape_html(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(ch),
        }
    }
    output
}
