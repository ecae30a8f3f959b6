use std::fmt;

use serde::{Deserialize, Serialize};

/// A registered display language.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub active: bool,
}

impl Language {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: None,
            active: false,
        }
    }

    pub fn named(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: Some(name.into()),
            active: false,
        }
    }

    pub fn activated(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Display label, falling back to the code.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Position of the first language whose code equals `code`.
///
/// Duplicate codes are not rejected here; the first occurrence wins.
pub fn index_of(code: &str, languages: &[Language]) -> Option<usize> {
    languages.iter().position(|language| language.code == code)
}
