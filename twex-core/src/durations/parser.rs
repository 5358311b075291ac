use std::fmt::Display;

use super::units::LocaleUnits;
use super::Period;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// The number of values and units differ.
    BadUnitPairs,
    /// A unit that isn't known in the locale.
    InvalidUnit(String),
    /// A value that doesn't fit in an integer, or is just a sign.
    InvalidValue(String),
}

impl Display for DurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadUnitPairs => f.write_str("every value needs exactly one unit"),
            Self::InvalidUnit(unit) => write!(f, "unknown time unit: {unit}"),
            Self::InvalidValue(value) => write!(f, "invalid duration value: {value}"),
        }
    }
}
impl std::error::Error for DurationError {}

enum Run<'a> {
    Value(&'a str),
    Unit(&'a str),
}

fn is_value_char(c: char) -> bool {
    c.is_ascii_digit() || c == '-'
}

/// Splits into alternating runs of value characters and unit characters.
fn runs(input: &str) -> impl Iterator<Item = Run<'_>> {
    let mut rest = input;

    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let value = is_value_char(first);
        let end = rest
            .find(|c: char| is_value_char(c) != value)
            .unwrap_or(rest.len());

        let (run, remaining) = rest.split_at(end);
        rest = remaining;

        Some(if value { Run::Value(run) } else { Run::Unit(run) })
    })
}

fn strip_separators(input: &str) -> String {
    input.chars().filter(|c| !matches!(c, ',' | '+') && !c.is_whitespace()).collect()
}

pub struct DurationParser;

impl DurationParser {
    /// Parses value/unit pairs like `1d12h` or `2 weeks, 3 days`. Separators (`,`, `+` and
    /// whitespace) are ignored, and repeated units add up.
    pub fn parse(input: &str, units: &LocaleUnits) -> Result<Period, DurationError> {
        let input = strip_separators(input);

        let mut values = Vec::new();
        let mut names = Vec::new();

        for run in runs(&input) {
            match run {
                Run::Value(v) => values.push(v),
                Run::Unit(u) => names.push(u),
            }
        }

        if values.len() != names.len() {
            return Err(DurationError::BadUnitPairs);
        }

        let mut period = Period::default();

        for (value, name) in values.into_iter().zip(names) {
            let unit = units
                .unit(name)
                .ok_or_else(|| DurationError::InvalidUnit(name.to_owned()))?;
            let value = value
                .parse::<i64>()
                .map_err(|_| DurationError::InvalidValue(value.to_owned()))?;

            period.add(unit, value);
        }

        Ok(period)
    }

    /// Whether `token` could be (part of) a duration: only values and known unit names.
    ///
    /// Unlike [`DurationParser::parse`] this doesn't require values and units to pair up, so `1`
    /// and `day` are both accepted on their own.
    pub fn is_duration_token(token: &str, units: &LocaleUnits) -> bool {
        let token = strip_separators(token);

        !token.is_empty()
            && runs(&token).all(|run| match run {
                Run::Value(_) => true,
                Run::Unit(name) => units.unit(name).is_some(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::BundledTranslations;

    fn english() -> LocaleUnits {
        LocaleUnits::load(&BundledTranslations::default(), "en")
    }

    #[test]
    fn compact_and_spaced_forms() {
        let units = english();

        let compact = DurationParser::parse("1d12h", &units).unwrap();
        let spaced = DurationParser::parse("1 day, 12 hours", &units).unwrap();

        assert_eq!(compact, spaced);
        assert_eq!(compact.days, 1);
        assert_eq!(compact.hours, 12);
    }

    #[test]
    fn weeks_become_days_and_units_add_up() {
        let period = DurationParser::parse("2w 1d 3d", &english()).unwrap();

        assert_eq!(period.days, 18);
    }

    #[test]
    fn negative_values() {
        let period = DurationParser::parse("-5m", &english()).unwrap();

        assert_eq!(period.minutes, -5);
        assert!(period.is_negative());
    }

    #[test]
    fn errors() {
        let units = english();

        assert_eq!(DurationParser::parse("12", &units), Err(DurationError::BadUnitPairs));
        assert_eq!(DurationParser::parse("h", &units), Err(DurationError::BadUnitPairs));
        assert_eq!(
            DurationParser::parse("3 apples", &units),
            Err(DurationError::InvalidUnit("apples".to_owned()))
        );
        assert_eq!(
            DurationParser::parse("1-2h", &units),
            Err(DurationError::InvalidValue("1-2".to_owned()))
        );
    }

    #[test]
    fn empty_input_is_zero() {
        assert!(DurationParser::parse("", &english()).unwrap().is_zero());
    }

    #[test]
    fn duration_tokens() {
        let units = english();

        assert!(DurationParser::is_duration_token("1", &units));
        assert!(DurationParser::is_duration_token("day", &units));
        assert!(DurationParser::is_duration_token("2h30m", &units));
        assert!(!DurationParser::is_duration_token("apples", &units));
        assert!(!DurationParser::is_duration_token("", &units));
    }
}
