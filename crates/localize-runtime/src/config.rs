use std::fs;
use std::path::Path;

use localize_core::{DEFAULT_MISSING_TRANSLATION_MSG, Options};
use serde::{Deserialize, Serialize};

use crate::action::InitializePayload;
use crate::error::RuntimeResult;
use crate::state::{InitializeOptions, LanguageInput};
use crate::transform::TransformRegistry;

pub const DEFAULT_CONFIG_FILE: &str = "localize.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizeConfig {
    pub languages: Vec<LanguageInput>,
    /// Absent means the first registered language.
    #[serde(default)]
    pub default_language: Option<String>,
    pub render_inner_html: bool,
    pub show_missing_translation_msg: bool,
    pub missing_translation_msg: String,
    /// Name of a transform in the [`TransformRegistry`].
    pub translation_transform: Option<String>,
    pub translations: Vec<TranslationSource>,
}

impl Default for LocalizeConfig {
    fn default() -> Self {
        Self {
            languages: vec![LanguageInput::from("en")],
            default_language: Some("en".to_string()),
            render_inner_html: false,
            show_missing_translation_msg: true,
            missing_translation_msg: DEFAULT_MISSING_TRANSLATION_MSG.to_string(),
            translation_transform: None,
            translations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `{ key: [value per language] }`
    #[default]
    Multi,
    /// `{ key: value }` for the source's `language`.
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationSource {
    /// Relative to the config file's directory.
    pub path: String,
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default)]
    pub language: Option<String>,
    /// `sha256:<hex>` digest of the file contents.
    #[serde(default)]
    pub hash: Option<String>,
}

impl LocalizeConfig {
    pub fn initialize_options(&self, registry: &TransformRegistry) -> InitializeOptions {
        let mut options = Options::default()
            .with_render_inner_html(self.render_inner_html)
            .with_show_missing_translation_msg(self.show_missing_translation_msg)
            .with_missing_translation_msg(self.missing_translation_msg.as_str());
        if let Some(name) = &self.translation_transform {
            options = options.with_translation_transform(registry.bind(name));
        }
        InitializeOptions {
            default_language: self.default_language.clone(),
            options,
        }
    }

    pub fn initialize_payload(&self, registry: &TransformRegistry) -> InitializePayload {
        InitializePayload {
            languages: self.languages.clone(),
            translation: None,
            options: Some(self.initialize_options(registry)),
        }
    }

    pub fn language_codes(&self) -> Vec<&str> {
        self.languages.iter().map(LanguageInput::code).collect()
    }
}

pub fn load_config(path: &Path) -> RuntimeResult<LocalizeConfig> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn load_config_or_default(path: &Path) -> RuntimeResult<LocalizeConfig> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(LocalizeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{LocalizeConfig, SourceKind, load_config_or_default};
    use crate::state::LanguageInput;
    use crate::transform::TransformRegistry;
    use localize_core::TransformSetting;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        path.push(format!("localize_{name}_{nanos}.toml"));
        path
    }

    #[test]
    fn uses_default_when_missing() {
        let path = temp_path("missing");
        let config = load_config_or_default(&path).expect("config");
        assert_eq!(config.default_language.as_deref(), Some("en"));
        assert!(config.show_missing_translation_msg);
    }

    #[test]
    fn loads_from_file() {
        let path = temp_path("config");
        let contents = r#"
languages = ["en", { code = "fr", name = "Français" }]
default_language = "fr"
render_inner_html = true
translation_transform = "single-language"

[[translations]]
path = "translations/global.json"

[[translations]]
path = "translations/fr.json"
kind = "single"
language = "fr"
"#;
        fs::write(&path, contents).expect("write");
        let config = load_config_or_default(&path).expect("config");
        assert_eq!(config.language_codes(), vec!["en", "fr"]);
        assert_eq!(config.languages[1], LanguageInput::from(("fr", "Français")));
        assert_eq!(config.translations[0].kind, SourceKind::Multi);
        assert_eq!(config.translations[1].kind, SourceKind::Single);
        assert!(config.show_missing_translation_msg);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn omitted_default_language_stays_unset() {
        let path = temp_path("no_default");
        fs::write(&path, "languages = [\"fr\", \"de\"]\n").expect("write");
        let config = load_config_or_default(&path).expect("config");
        assert_eq!(config.language_codes(), vec!["fr", "de"]);
        assert_eq!(config.default_language, None);
        assert_eq!(
            config
                .initialize_options(&TransformRegistry::new())
                .default_language,
            None
        );
        fs::remove_file(&path).ok();
    }

    #[test]
    fn binds_named_transform() {
        let config = LocalizeConfig {
            translation_transform: Some("single-language".to_string()),
            ..LocalizeConfig::default()
        };
        let options = config.initialize_options(&TransformRegistry::with_builtins());
        assert!(matches!(
            options.options.translation_transform,
            Some(TransformSetting::Bound(_))
        ));
    }

    #[test]
    fn unknown_transform_stays_declared() {
        let config = LocalizeConfig {
            translation_transform: Some("shout".to_string()),
            ..LocalizeConfig::default()
        };
        let options = config.initialize_options(&TransformRegistry::new());
        assert!(matches!(
            options.options.translation_transform,
            Some(TransformSetting::Declared(_))
        ));
    }
}
