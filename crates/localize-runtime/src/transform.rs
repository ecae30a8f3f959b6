use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use localize_core::{TransformSetting, TranslationTransform, Translations};
use serde_json::Value;

pub const SINGLE_LANGUAGE_TRANSFORM: &str = "single-language";

/// Named transforms that configuration files may refer to.
#[derive(Clone, Default)]
pub struct TransformRegistry {
    transforms: BTreeMap<String, Arc<dyn TranslationTransform>>,
}

impl TransformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(SINGLE_LANGUAGE_TRANSFORM, single_language_transform);
        registry
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        transform: impl TranslationTransform + 'static,
    ) {
        self.transforms.insert(name.into(), Arc::new(transform));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn TranslationTransform>> {
        self.transforms.get(name).cloned()
    }

    /// Binds `name` to a registered transform. Unknown names stay declared so
    /// that option validation rejects them.
    pub fn bind(&self, name: &str) -> TransformSetting {
        match self.get(name) {
            Some(transform) => TransformSetting::Bound(transform),
            None => TransformSetting::Declared(name.to_string()),
        }
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.transforms.keys()).finish()
    }
}

/// Turns `{ key: { code: value } }` data into per-language arrays.
///
/// Objects whose keys are all registered codes and whose values are not
/// objects are treated as language maps; other objects nest keys with dots.
pub fn single_language_transform(data: &Value, language_codes: &[String]) -> Translations {
    let mut table = Translations::new();
    if let Value::Object(_) = data {
        collect_language_maps("", data, language_codes, &mut table);
    }
    table
}

fn collect_language_maps(
    prefix: &str,
    value: &Value,
    language_codes: &[String],
    table: &mut Translations,
) {
    let Value::Object(map) = value else {
        return;
    };
    let is_language_map = !prefix.is_empty()
        && !map.is_empty()
        && map.iter().all(|(code, leaf)| {
            language_codes.iter().any(|known| known == code) && !leaf.is_object()
        });
    if is_language_map {
        let values: Vec<Option<String>> = language_codes
            .iter()
            .map(|code| map.get(code).and_then(Value::as_str).map(str::to_string))
            .collect();
        table.insert(prefix, values);
        return;
    }
    for (name, child) in map {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        collect_language_maps(&key, child, language_codes, table);
    }
}

#[cfg(test)]
mod tests {
    use localize_core::TransformSetting;
    use serde_json::json;

    use super::{SINGLE_LANGUAGE_TRANSFORM, TransformRegistry, single_language_transform};

    fn codes() -> Vec<String> {
        vec!["en".to_string(), "fr".to_string()]
    }

    #[test]
    fn reshapes_language_maps() {
        let data = json!({
            "greeting": { "en": "Hello", "fr": "Bonjour" },
            "nav": { "home": { "en": "Home" } }
        });
        let table = single_language_transform(&data, &codes());
        assert_eq!(table.value("greeting", 1), Some("Bonjour"));
        assert_eq!(table.value("nav.home", 0), Some("Home"));
        assert_eq!(table.value("nav.home", 1), None);
        assert_eq!(table.get("nav.home").map(<[_]>::len), Some(2));
    }

    #[test]
    fn builtins_bind_by_name() {
        let registry = TransformRegistry::with_builtins();
        assert!(matches!(
            registry.bind(SINGLE_LANGUAGE_TRANSFORM),
            TransformSetting::Bound(_)
        ));
    }

    #[test]
    fn unknown_names_stay_declared() {
        let registry = TransformRegistry::with_builtins();
        match registry.bind("upper-case") {
            TransformSetting::Declared(name) => assert_eq!(name, "upper-case"),
            TransformSetting::Bound(_) => panic!("unknown transform should not bind"),
        }
    }
}
