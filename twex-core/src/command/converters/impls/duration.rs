use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use twex_common::util::discord::parse_discord_timestamp;
use twilight_model::application::command::CommandOption;
use twilight_util::builder::command::StringBuilder;

use crate::command::CommandCtxt;
use crate::command::converters::coalescing::CoalescingParse;
use crate::command::converters::ConverterResult;
use crate::command::converters::single::SingleParse;
use crate::command::errors::ConverterError;
use crate::durations::{DurationError, DurationParser, LocaleUnits, Period, TIME_UNITS};
use crate::i18n::keys;

fn units(cx: &CommandCtxt<'_>) -> Arc<LocaleUnits> {
    TIME_UNITS.get(cx.data.translations.as_ref(), cx.locale())
}

/// The time between now and a `<t:...>` timestamp.
fn period_until_timestamp(token: &str) -> Option<Period> {
    let timestamp = parse_discord_timestamp(token)?;
    let now = OffsetDateTime::now_utc().unix_timestamp();

    Some(Period::from_seconds(timestamp.unix_seconds.saturating_sub(now)))
}

fn error_message(cx: &CommandCtxt<'_>, error: &DurationError, long_help: bool) -> String {
    match error {
        DurationError::BadUnitPairs => cx.translate(keys::DURATION_BAD_UNIT_PAIRS, &[]),
        DurationError::InvalidValue(value) => cx.translate(keys::DURATION_INVALID_VALUE, &[value]),
        DurationError::InvalidUnit(unit) => {
            let message = cx.translate(keys::DURATION_INVALID_UNIT, &[unit]);

            if long_help {
                let help = cx.translate(keys::DURATION_HELP, &[]);
                cx.translate(keys::PARAGRAPH_JOINER, &[&message, &help])
            } else {
                message
            }
        },
    }
}

fn localized(cx: &CommandCtxt<'_>, period: &Period) -> String {
    period.localized(cx.data.translations.as_ref(), cx.locale())
}

fn check_positive(cx: &CommandCtxt<'_>, period: &Period, positive_only: bool) -> ConverterResult<()> {
    if positive_only && period.is_negative() {
        Err(ConverterError::Relayed(cx.translate(keys::DURATION_POSITIVE_ONLY, &[])))
    } else {
        Ok(())
    }
}

/// A duration written as one token, like `1d12h`, or a Discord timestamp.
#[derive(Clone, Debug)]
pub struct DurationConverter {
    long_help: bool,
    positive_only: bool,
}

impl DurationConverter {
    pub fn new() -> Self {
        Self {
            long_help: true,
            positive_only: true,
        }
    }

    /// Explain how durations are written when a unit isn't recognised.
    pub fn long_help(mut self, long_help: bool) -> Self {
        self.long_help = long_help;
        self
    }

    pub fn positive_only(mut self, positive_only: bool) -> Self {
        self.positive_only = positive_only;
        self
    }
}

impl Default for DurationConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SingleParse for DurationConverter {
    type Output = Period;

    fn signature_type(&self) -> &str {
        keys::DURATION_SIGNATURE_TYPE
    }

    async fn parse_token(&self, cx: &CommandCtxt<'_>, token: &str) -> ConverterResult<Option<Period>> {
        let period = match period_until_timestamp(token) {
            Some(period) => period,
            None => DurationParser::parse(token, &units(cx))
                .map_err(|e| ConverterError::Relayed(error_message(cx, &e, self.long_help)))?,
        };

        check_positive(cx, &period, self.positive_only)?;

        Ok(Some(period))
    }

    fn display_value(&self, cx: &CommandCtxt<'_>, value: &Period) -> String {
        localized(cx, value)
    }

    fn slash_option(&self, name: &str, description: &str) -> CommandOption {
        StringBuilder::new(name, description).required(true).build()
    }
}

/// A duration spread over several tokens, like `1 day and 2 hours`, or a Discord timestamp.
///
/// Filler words (`and` in English) are skipped, but never end a duration.
#[derive(Clone, Debug)]
pub struct DurationCoalescingConverter {
    long_help: bool,
    positive_only: bool,
}

impl DurationCoalescingConverter {
    pub fn new() -> Self {
        Self {
            long_help: true,
            positive_only: true,
        }
    }

    pub fn long_help(mut self, long_help: bool) -> Self {
        self.long_help = long_help;
        self
    }

    pub fn positive_only(mut self, positive_only: bool) -> Self {
        self.positive_only = positive_only;
        self
    }

    fn relay(&self, cx: &CommandCtxt<'_>, error: &DurationError) -> ConverterError {
        ConverterError::Relayed(error_message(cx, error, self.long_help))
    }
}

impl Default for DurationCoalescingConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CoalescingParse for DurationCoalescingConverter {
    type Output = Period;

    fn signature_type(&self) -> &str {
        keys::DURATION_SIGNATURE_TYPE
    }

    fn accepts_token(&self, cx: &CommandCtxt<'_>, token: &str) -> bool {
        let units = units(cx);

        units.is_ignored(token)
            || parse_discord_timestamp(token).is_some()
            || DurationParser::is_duration_token(token, &units)
    }

    async fn convert(&self, cx: &CommandCtxt<'_>, tokens: &[String]) -> ConverterResult<Period> {
        let units = units(cx);

        if let [token] = tokens {
            if let Some(period) = period_until_timestamp(token) {
                return Ok(period);
            }
        }

        if tokens.last().is_some_and(|t| units.is_ignored(t)) {
            return Err(self.relay(cx, &DurationError::BadUnitPairs));
        }

        let joined = tokens
            .iter()
            .filter(|t| !units.is_ignored(t))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        DurationParser::parse(&joined, &units).map_err(|e| self.relay(cx, &e))
    }

    async fn check(&self, cx: &CommandCtxt<'_>, value: &Period) -> ConverterResult<()> {
        check_positive(cx, value, self.positive_only)
    }

    fn display_value(&self, cx: &CommandCtxt<'_>, value: &Period) -> String {
        localized(cx, value)
    }
}

#[cfg(test)]
mod tests {
    use twex_parser::StringParser;

    use super::*;
    use crate::command::converters::{Converter, ParseResult, ParsedValue};
    use crate::command::test_util::command_data;
    use crate::command::{CommandCtxt, Source};

    #[tokio::test]
    async fn single_token_durations() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);

        let converter = DurationConverter::new();
        let period = converter.parse_token(&cx, "1d12h").await.unwrap().unwrap();

        assert_eq!(period.to_string(), "1d 12h");
        assert_eq!(converter.display_value(&cx, &period), "1 day, 12 hours");
    }

    #[tokio::test]
    async fn long_help_is_appended() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);

        let short = DurationConverter::new()
            .long_help(false)
            .parse_token(&cx, "3apples")
            .await
            .unwrap_err()
            .to_string();
        assert_eq!(short, "`apples` is not a unit of time.");

        let long = DurationConverter::new()
            .parse_token(&cx, "3apples")
            .await
            .unwrap_err()
            .to_string();
        assert!(long.starts_with("`apples` is not a unit of time.\n\nDurations are made of"));
    }

    #[tokio::test]
    async fn negative_durations_are_refused_by_default() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);

        let error = DurationConverter::new().parse_token(&cx, "-1h").await.unwrap_err();
        assert_eq!(error.to_string(), "The duration must be positive.");

        assert!(
            DurationConverter::new()
                .positive_only(false)
                .parse_token(&cx, "-1h")
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn timestamps_count_from_now() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);
        let in_an_hour = OffsetDateTime::now_utc().unix_timestamp() + 3600;

        let period = DurationConverter::new()
            .parse_token(&cx, &format!("<t:{in_an_hour}:R>"))
            .await
            .unwrap()
            .unwrap();

        // allow for the clock ticking over between the two reads
        assert!((3599..=3600).contains(&period.approximate_seconds()));
    }

    #[tokio::test]
    async fn coalescing_stops_before_the_next_argument() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);
        let mut parser = StringParser::new("1 day 2 hours take out the bins");
        let mut converter = DurationCoalescingConverter::new().coalescing();

        let result = converter.parse(Some(&mut parser), &cx, None).await.unwrap();

        assert_eq!(result, ParseResult::Multi(4));
        assert_eq!(converter.value().unwrap().to_string(), "1d 2h");
        assert_eq!(parser.peek_remaining(), "take out the bins");
    }

    #[tokio::test]
    async fn coalescing_skips_filler_but_does_not_end_on_it() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);
        let mut parser = StringParser::new("2h and 30m and 5 minutes");
        let mut converter = DurationCoalescingConverter::new().coalescing();

        let result = converter.parse(Some(&mut parser), &cx, None).await.unwrap();

        assert_eq!(result, ParseResult::Multi(6));
        assert_eq!(converter.value().unwrap().minutes, 35);

        let mut parser = StringParser::new("2h and then");
        let mut converter = DurationCoalescingConverter::new().coalescing();
        let result = converter.parse(Some(&mut parser), &cx, None).await.unwrap();

        assert_eq!(result, ParseResult::Multi(1));
        assert_eq!(parser.peek_remaining(), "and then");
    }

    #[tokio::test]
    async fn coalescing_dangling_number_is_left_alone() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);
        let mut parser = StringParser::new("1 day 2");
        let mut converter = DurationCoalescingConverter::new().coalescing();

        let result = converter.parse(Some(&mut parser), &cx, None).await.unwrap();

        assert_eq!(result, ParseResult::Multi(2));
        assert_eq!(parser.peek_remaining(), "2");
    }

    #[tokio::test]
    async fn coalescing_positive_check_is_final() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);
        let mut parser = StringParser::new("-2 hours");
        let mut converter = DurationCoalescingConverter::new().coalescing();

        let error = converter.parse(Some(&mut parser), &cx, None).await.unwrap_err();

        assert_eq!(error.to_string(), "The duration must be positive.");
    }
}
