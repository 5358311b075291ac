//! Translation lookup.
//!
//! All user-facing text goes through a [`TranslationsProvider`]. Strings are looked up by a dotted
//! key inside a named bundle, for a locale, with `{0}`, `{1}`, ... ordinal placeholders.

use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;

use anyhow::{Context, bail};
use tracing::{debug, info};
use twex_common::config::CONFIG;

pub mod keys;

/// The bundle holding the framework's own strings.
pub const DEFAULT_BUNDLE: &str = "twex";

static BUILTIN_ENGLISH: &str = include_str!("../../translations/twex.en.toml");

pub trait TranslationsProvider: Send + Sync {
    /// The locale used when a string is missing for the requested one.
    fn default_locale(&self) -> &str;

    /// Raw lookup, without fallback or formatting.
    fn get(&self, key: &str, bundle: &str, locale: &str) -> Option<String>;

    /// Looks `key` up in `locale`, then in the locale's base language (`en` for `en-GB`), then in
    /// the default locale. Falls back to the key itself.
    fn translate(&self, key: &str, bundle: &str, locale: &str, replacements: &[&dyn Display]) -> String {
        let base_language = locale.split(['-', '_']).next().unwrap_or(locale);

        let raw = self
            .get(key, bundle, locale)
            .or_else(|| self.get(key, bundle, base_language))
            .or_else(|| self.get(key, bundle, self.default_locale()))
            .unwrap_or_else(|| {
                debug!("missing translation: {bundle}/{locale}/{key}");
                key.to_owned()
            });

        format_ordinal(&raw, replacements)
    }
}

/// Replaces `{n}` with the n-th replacement. Unknown indices are left as-is.
pub fn format_ordinal(template: &str, replacements: &[&dyn Display]) -> String {
    if replacements.is_empty() {
        return template.to_owned();
    }

    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let replaced = after.find('}').and_then(|end| {
            let index = after[..end].parse::<usize>().ok()?;
            let value = replacements.get(index)?;
            Some((value.to_string(), end))
        });

        match replaced {
            Some((value, end)) => {
                output.push_str(&value);
                rest = &after[end + 1..];
            },
            None => {
                output.push('{');
                rest = after;
            },
        }
    }

    output.push_str(rest);
    output
}

/// Translations loaded from TOML files, one file per bundle and locale.
///
/// Nested tables are flattened into dotted keys, so `[converters.number] signature_type = ".."`
/// is found under `converters.number.signature_type`. Non-string values are ignored.
pub struct BundledTranslations {
    default_locale: String,
    /// (bundle, locale) => key => string
    strings: HashMap<(String, String), HashMap<String, String>>,
}

impl BundledTranslations {
    /// The built-in English bundle only.
    pub fn new(default_locale: impl Into<String>) -> Self {
        let mut translations = Self {
            default_locale: default_locale.into(),
            strings: HashMap::new(),
        };

        // the built-in file is part of the crate, a parse failure is caught by the tests
        if let Err(e) = translations.register(DEFAULT_BUNDLE, "en", BUILTIN_ENGLISH) {
            tracing::error!("Failed to load built-in translations: {e:?}");
        }

        translations
    }

    /// The built-in bundle plus everything in the configured translations directory.
    pub fn from_config() -> anyhow::Result<Self> {
        let mut translations = Self::new(CONFIG.i18n.default_locale.clone());

        if let Some(dir) = &CONFIG.i18n.translations_dir {
            let count = translations.load_dir(dir)?;
            info!("Loaded {count} translation files from {}", dir.display());
        }

        Ok(translations)
    }

    /// Adds (or overrides) strings for `bundle` in `locale`.
    pub fn register(&mut self, bundle: &str, locale: &str, source: &str) -> anyhow::Result<()> {
        let table: toml::Table = toml::from_str(source).context("Failed to parse translation file")?;

        let entry = self
            .strings
            .entry((bundle.to_owned(), locale.to_lowercase()))
            .or_default();
        flatten(&table, "", entry);

        Ok(())
    }

    /// Loads every `<bundle>.<locale>.toml` file in `dir`, returning how many were loaded.
    pub fn load_dir(&mut self, dir: &Path) -> anyhow::Result<usize> {
        let mut count = 0;

        for entry in std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
            let path = entry?.path();

            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let Some((bundle, locale)) = stem.rsplit_once('.') else {
                bail!("Translation file {} is not named <bundle>.<locale>.toml", path.display());
            };

            let source = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            self.register(bundle, locale, &source)
                .with_context(|| format!("Failed to load {}", path.display()))?;

            count += 1;
        }

        Ok(count)
    }
}

impl Default for BundledTranslations {
    fn default() -> Self {
        Self::new("en")
    }
}

impl TranslationsProvider for BundledTranslations {
    fn default_locale(&self) -> &str {
        &self.default_locale
    }

    fn get(&self, key: &str, bundle: &str, locale: &str) -> Option<String> {
        self.strings
            .get(&(bundle.to_owned(), locale.to_lowercase()))?
            .get(key)
            .cloned()
    }
}

fn flatten(table: &toml::Table, prefix: &str, out: &mut HashMap<String, String>) {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            toml::Value::String(s) => {
                out.insert(full_key, s.clone());
            },
            toml::Value::Table(inner) => flatten(inner, &full_key, out),
            _ => {},
        }
    }
}
