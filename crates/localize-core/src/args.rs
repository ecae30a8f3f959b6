use std::fmt;

/// A placeholder substitution value.
///
/// `Node` carries an opaque renderable fragment owned by the host runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum Value<N> {
    Str(String),
    Num(f64),
    Node(N),
}

impl<N> Value<N> {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Value::Node(_))
    }
}

impl<N> From<&str> for Value<N> {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl<N> From<String> for Value<N> {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<N> From<f64> for Value<N> {
    fn from(value: f64) -> Self {
        Value::Num(value)
    }
}

impl<N> From<i64> for Value<N> {
    fn from(value: i64) -> Self {
        Value::Num(value as f64)
    }
}

impl<N> From<i32> for Value<N> {
    fn from(value: i32) -> Self {
        Value::Num(f64::from(value))
    }
}

impl<N> From<u32> for Value<N> {
    fn from(value: u32) -> Self {
        Value::Num(f64::from(value))
    }
}

/// Placeholder data, kept in insertion order.
///
/// Lookups during templating scan entries in this order, so the first
/// inserted name that matches a placeholder wins.
#[derive(Clone, PartialEq)]
pub struct Args<N> {
    values: Vec<(String, Value<N>)>,
}

impl<N> Args<N> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Inserts or replaces `name`, keeping its original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value<N>>) -> Option<Value<N>> {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.values.push((name, value));
                None
            }
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value<N>>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn with_node(mut self, name: impl Into<String>, node: N) -> Self {
        self.insert(name, Value::Node(node));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value<N>> {
        self.values
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value<N>)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<N> Default for Args<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: fmt::Debug> fmt::Debug for Args<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.values.iter().map(|(name, value)| (name, value)))
            .finish()
    }
}

impl<N, K, V> FromIterator<(K, V)> for Args<N>
where
    K: Into<String>,
    V: Into<Value<N>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Args::new();
        for (name, value) in iter {
            args.insert(name, value);
        }
        args
    }
}
