use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use lazy_static::lazy_static;
use moka::sync::Cache;
use tracing::debug;

use super::TimeUnit;
use crate::i18n::{DEFAULT_BUNDLE, TranslationsProvider, keys};

lazy_static! {
    pub static ref TIME_UNITS: TimeUnitCache = TimeUnitCache::new();
}

fn unit_key(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Seconds => keys::DURATIONS_SECONDS,
        TimeUnit::Minutes => keys::DURATIONS_MINUTES,
        TimeUnit::Hours => keys::DURATIONS_HOURS,
        TimeUnit::Days => keys::DURATIONS_DAYS,
        TimeUnit::Weeks => keys::DURATIONS_WEEKS,
        TimeUnit::Months => keys::DURATIONS_MONTHS,
        TimeUnit::Years => keys::DURATIONS_YEARS,
    }
}

fn split_list(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// The unit names and filler words of one locale.
#[derive(Debug, Default)]
pub struct LocaleUnits {
    units: HashMap<String, TimeUnit>,
    ignored_words: HashSet<String>,
}

impl LocaleUnits {
    pub fn load(translations: &dyn TranslationsProvider, locale: &str) -> Self {
        let mut units = HashMap::new();

        for unit in TimeUnit::ALL {
            let names = translations.translate(unit_key(unit), DEFAULT_BUNDLE, locale, &[]);

            for name in split_list(&names) {
                units.insert(name, unit);
            }
        }

        let ignored = translations.translate(keys::DURATIONS_IGNORED_WORDS, DEFAULT_BUNDLE, locale, &[]);
        let ignored_words = split_list(&ignored).collect();

        debug!("loaded {} time unit names for {locale}", units.len());

        Self { units, ignored_words }
    }

    /// Case-insensitive unit lookup.
    pub fn unit(&self, name: &str) -> Option<TimeUnit> {
        self.units.get(&name.to_lowercase()).copied()
    }

    pub fn is_ignored(&self, word: &str) -> bool {
        self.ignored_words.contains(&word.to_lowercase())
    }
}

/// Unit names per locale, built on first use from the translations.
pub struct TimeUnitCache(Cache<String, Arc<LocaleUnits>>);

impl TimeUnitCache {
    pub fn new() -> Self {
        Self(Cache::builder().max_capacity(100).build())
    }

    pub fn get(&self, translations: &dyn TranslationsProvider, locale: &str) -> Arc<LocaleUnits> {
        self.0
            .get_with(locale.to_owned(), || Arc::new(LocaleUnits::load(translations, locale)))
    }

    /// Drops every cached locale. Call after the translations change.
    pub fn invalidate_all(&self) {
        self.0.invalidate_all();
    }
}

impl Default for TimeUnitCache {
    fn default() -> Self {
        Self::new()
    }
}
