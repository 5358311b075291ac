//! Calendar-style durations, as typed by users ("1d 12h", "2 weeks and 3 days").

use std::fmt::Display;

use crate::i18n::{DEFAULT_BUNDLE, TranslationsProvider, keys};

pub mod parser;
pub mod units;

pub use parser::{DurationError, DurationParser};
pub use units::{LocaleUnits, TIME_UNITS, TimeUnitCache};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
// Months and years only have a length relative to a date. These are used to compare and apply
// periods without one.
const APPROXIMATE_DAYS_PER_MONTH: i64 = 30;
const APPROXIMATE_DAYS_PER_YEAR: i64 = 365;

pub const DAYS_PER_WEEK: i64 = 7;

/// The units a duration can be written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 7] = [
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
        Self::Days,
        Self::Weeks,
        Self::Months,
        Self::Years,
    ];
}

/// A span of time in calendar units. Weeks are folded into days.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Period {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Period {
    /// Splits a number of seconds into days, hours, minutes and seconds.
    pub fn from_seconds(total: i64) -> Self {
        Self {
            days: total / SECONDS_PER_DAY,
            hours: total % SECONDS_PER_DAY / SECONDS_PER_HOUR,
            minutes: total % SECONDS_PER_HOUR / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
            ..Default::default()
        }
    }

    /// Adds `value` of `unit`, saturating on overflow.
    pub fn add(&mut self, unit: TimeUnit, value: i64) {
        let (field, value) = match unit {
            TimeUnit::Seconds => (&mut self.seconds, value),
            TimeUnit::Minutes => (&mut self.minutes, value),
            TimeUnit::Hours => (&mut self.hours, value),
            TimeUnit::Days => (&mut self.days, value),
            TimeUnit::Weeks => (&mut self.days, value.saturating_mul(DAYS_PER_WEEK)),
            TimeUnit::Months => (&mut self.months, value),
            TimeUnit::Years => (&mut self.years, value),
        };

        *field = field.saturating_add(value);
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Length in seconds, with 30-day months and 365-day years.
    pub fn approximate_seconds(&self) -> i64 {
        [
            (self.years, APPROXIMATE_DAYS_PER_YEAR * SECONDS_PER_DAY),
            (self.months, APPROXIMATE_DAYS_PER_MONTH * SECONDS_PER_DAY),
            (self.days, SECONDS_PER_DAY),
            (self.hours, SECONDS_PER_HOUR),
            (self.minutes, SECONDS_PER_MINUTE),
            (self.seconds, 1),
        ]
        .into_iter()
        .fold(0i64, |acc, (value, factor)| acc.saturating_add(value.saturating_mul(factor)))
    }

    pub fn approximate_duration(&self) -> time::Duration {
        time::Duration::seconds(self.approximate_seconds())
    }

    /// Whether applying this period would move a date backwards.
    pub fn is_negative(&self) -> bool {
        self.approximate_seconds() < 0
    }
}

impl Period {
    fn parts(&self) -> [(i64, TimeUnit); 6] {
        [
            (self.years, TimeUnit::Years),
            (self.months, TimeUnit::Months),
            (self.days, TimeUnit::Days),
            (self.hours, TimeUnit::Hours),
            (self.minutes, TimeUnit::Minutes),
            (self.seconds, TimeUnit::Seconds),
        ]
    }

    /// Renders the period in words, for showing to users.
    ///
    /// Each non-zero unit is looked up as `utils.durations.format.<unit>.one` or `.other`, then
    /// the parts are joined with `utils.durations.format.separator`.
    pub fn localized(&self, translations: &dyn TranslationsProvider, locale: &str) -> String {
        let translate = |value: i64, unit: TimeUnit| {
            let (one, other) = format_keys(unit);
            let key = if value.unsigned_abs() == 1 { one } else { other };
            translations.translate(key, DEFAULT_BUNDLE, locale, &[&value])
        };

        let parts = self
            .parts()
            .into_iter()
            .filter(|(value, _)| *value != 0)
            .map(|(value, unit)| translate(value, unit))
            .collect::<Vec<_>>();

        if parts.is_empty() {
            return translate(0, TimeUnit::Seconds);
        }

        let separator = translations.translate(keys::DURATIONS_FORMAT_SEPARATOR, DEFAULT_BUNDLE, locale, &[]);
        parts.join(&separator)
    }
}

fn format_keys(unit: TimeUnit) -> (&'static str, &'static str) {
    match unit {
        TimeUnit::Seconds => (keys::DURATIONS_FORMAT_SECONDS_ONE, keys::DURATIONS_FORMAT_SECONDS_OTHER),
        TimeUnit::Minutes => (keys::DURATIONS_FORMAT_MINUTES_ONE, keys::DURATIONS_FORMAT_MINUTES_OTHER),
        TimeUnit::Hours => (keys::DURATIONS_FORMAT_HOURS_ONE, keys::DURATIONS_FORMAT_HOURS_OTHER),
        TimeUnit::Days => (keys::DURATIONS_FORMAT_DAYS_ONE, keys::DURATIONS_FORMAT_DAYS_OTHER),
        TimeUnit::Weeks => (keys::DURATIONS_FORMAT_WEEKS_ONE, keys::DURATIONS_FORMAT_WEEKS_OTHER),
        TimeUnit::Months => (keys::DURATIONS_FORMAT_MONTHS_ONE, keys::DURATIONS_FORMAT_MONTHS_OTHER),
        TimeUnit::Years => (keys::DURATIONS_FORMAT_YEARS_ONE, keys::DURATIONS_FORMAT_YEARS_OTHER),
    }
}

/// The compact form users type, like `1d 2h`. Use [`Period::localized`] for messages.
impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return f.write_str("0s");
        }

        let mut first = true;
        for (value, unit) in self.parts().into_iter().filter(|(value, _)| *value != 0) {
            let suffix = match unit {
                TimeUnit::Years => "y",
                TimeUnit::Months => "mo",
                TimeUnit::Weeks => "w",
                TimeUnit::Days => "d",
                TimeUnit::Hours => "h",
                TimeUnit::Minutes => "m",
                TimeUnit::Seconds => "s",
            };

            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{value}{suffix}")?;
            first = false;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::BundledTranslations;

    #[test]
    fn from_seconds_splits_into_units() {
        let period = Period::from_seconds(SECONDS_PER_DAY + 2 * SECONDS_PER_HOUR + 5);

        assert_eq!(period.days, 1);
        assert_eq!(period.hours, 2);
        assert_eq!(period.minutes, 0);
        assert_eq!(period.seconds, 5);
        assert_eq!(period.approximate_seconds(), SECONDS_PER_DAY + 2 * SECONDS_PER_HOUR + 5);
    }

    #[test]
    fn negative_seconds_keep_their_sign() {
        let period = Period::from_seconds(-90);

        assert_eq!(period.minutes, -1);
        assert_eq!(period.seconds, -30);
        assert!(period.is_negative());
    }

    #[test]
    fn weeks_fold_into_days() {
        let mut period = Period::default();
        period.add(TimeUnit::Weeks, 2);
        period.add(TimeUnit::Days, 1);

        assert_eq!(period.days, 15);
    }

    #[test]
    fn display_is_compact() {
        let mut period = Period::default();
        assert_eq!(period.to_string(), "0s");

        period.add(TimeUnit::Days, 1);
        period.add(TimeUnit::Hours, 2);
        period.add(TimeUnit::Months, -3);
        assert_eq!(period.to_string(), "-3mo 1d 2h");
    }

    #[test]
    fn localized_uses_the_locale() {
        let mut translations = BundledTranslations::new("en");
        translations
            .register(
                DEFAULT_BUNDLE,
                "fr",
                r#"
                [utils.durations.format]
                separator = " et "
                days.one = "{0} jour"
                hours.other = "{0} heures"
                "#,
            )
            .unwrap();

        let period = Period {
            days: 1,
            hours: 2,
            ..Default::default()
        };

        assert_eq!(period.localized(&translations, "en"), "1 day, 2 hours");
        assert_eq!(period.localized(&translations, "fr"), "1 jour et 2 heures");
        assert_eq!(Period::default().localized(&translations, "en"), "0 seconds");
        assert_eq!(Period::from_seconds(-1).localized(&translations, "en"), "-1 second");
    }

    #[test]
    fn extreme_values_render() {
        let translations = BundledTranslations::new("en");
        let period = Period {
            seconds: i64::MIN,
            ..Default::default()
        };

        assert_eq!(period.to_string(), format!("{}s", i64::MIN));
        assert_eq!(period.localized(&translations, "en"), format!("{} seconds", i64::MIN));
    }

    #[test]
    fn mixed_signs_compare_by_length() {
        let period = Period {
            days: 1,
            hours: -3,
            ..Default::default()
        };

        assert!(!period.is_negative());
        assert_eq!(period.approximate_duration(), time::Duration::hours(21));
    }
}
