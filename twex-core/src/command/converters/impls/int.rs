use async_trait::async_trait;
use twilight_model::application::command::CommandOption;
use twilight_model::application::interaction::application_command::CommandOptionValue;
use twilight_util::builder::command::IntegerBuilder;

use crate::command::CommandCtxt;
use crate::command::converters::ConverterResult;
use crate::command::converters::single::SingleParse;
use crate::command::errors::ConverterError;
use crate::i18n::keys;

const DEFAULT_RADIX: u32 = 10;

/// Whole numbers, in any radix from 2 to 36, with optional bounds.
#[derive(Clone, Debug)]
pub struct IntConverter {
    radix: u32,
    min: Option<i64>,
    max: Option<i64>,
}

impl IntConverter {
    pub fn new() -> Self {
        Self {
            radix: DEFAULT_RADIX,
            min: None,
            max: None,
        }
    }

    /// Panics if `radix` isn't in `2..=36`, as [`i64::from_str_radix`] would.
    pub fn radix(mut self, radix: u32) -> Self {
        assert!((2..=36).contains(&radix), "radix must be in 2..=36, got {radix}");
        self.radix = radix;
        self
    }

    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    fn check_bounds(&self, cx: &CommandCtxt<'_>, value: i64) -> ConverterResult<i64> {
        if let Some(min) = self.min.filter(|min| value < *min) {
            return Err(ConverterError::Relayed(cx.translate(keys::NUMBER_TOO_SMALL, &[&value, &min])));
        }

        if let Some(max) = self.max.filter(|max| value > *max) {
            return Err(ConverterError::Relayed(cx.translate(keys::NUMBER_TOO_LARGE, &[&value, &max])));
        }

        Ok(value)
    }
}

impl Default for IntConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SingleParse for IntConverter {
    type Output = i64;

    fn signature_type(&self) -> &str {
        keys::NUMBER_SIGNATURE_TYPE
    }

    async fn parse_token(&self, cx: &CommandCtxt<'_>, token: &str) -> ConverterResult<Option<i64>> {
        let Ok(value) = i64::from_str_radix(token, self.radix) else {
            let reason = if self.radix == DEFAULT_RADIX {
                cx.translate(keys::NUMBER_INVALID_DEFAULT_BASE, &[&token])
            } else {
                cx.translate(keys::NUMBER_INVALID_OTHER_BASE, &[&token, &self.radix])
            };

            return Err(ConverterError::Relayed(reason));
        };

        self.check_bounds(cx, value).map(Some)
    }

    async fn parse_option(&self, cx: &CommandCtxt<'_>, option: &CommandOptionValue) -> ConverterResult<Option<i64>> {
        match option {
            CommandOptionValue::Integer(value) => self.check_bounds(cx, *value).map(Some),
            CommandOptionValue::String(value) => self.parse_token(cx, value).await,
            _ => Ok(None),
        }
    }

    fn slash_option(&self, name: &str, description: &str) -> CommandOption {
        let mut builder = IntegerBuilder::new(name, description).required(true);

        if let Some(min) = self.min {
            builder = builder.min_value(min);
        }

        if let Some(max) = self.max {
            builder = builder.max_value(max);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::test_util::command_data;
    use crate::command::{CommandCtxt, Source};

    #[tokio::test]
    async fn decimal_and_other_bases() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);

        assert_eq!(IntConverter::new().parse_token(&cx, "-12").await.unwrap(), Some(-12));
        assert_eq!(IntConverter::new().radix(16).parse_token(&cx, "ff").await.unwrap(), Some(255));
    }

    #[tokio::test]
    async fn errors_name_the_token() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);

        let error = IntConverter::new().parse_token(&cx, "apples").await.unwrap_err();
        assert_eq!(error.to_string(), "`apples` is not a valid integer.");

        let error = IntConverter::new().radix(2).parse_token(&cx, "12").await.unwrap_err();
        assert_eq!(error.to_string(), "`12` is not a valid integer in base 2.");
    }

    #[tokio::test]
    async fn bounds_apply_to_chat_and_slash() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);
        let converter = IntConverter::new().min(1).max(10);

        let error = converter.parse_token(&cx, "0").await.unwrap_err();
        assert_eq!(error.to_string(), "`0` is too small, the minimum is 1.");

        let error = converter
            .parse_option(&cx, &CommandOptionValue::Integer(11))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "`11` is too large, the maximum is 10.");

        assert_eq!(
            converter
                .parse_option(&cx, &CommandOptionValue::Integer(5))
                .await
                .unwrap(),
            Some(5)
        );
    }

    #[test]
    fn slash_option_carries_bounds() {
        let option = IntConverter::new().min(1).slash_option("count", "how many");

        assert_eq!(option.name, "count");
        assert_eq!(option.required, Some(true));
        assert!(option.min_value.is_some());
        assert!(option.max_value.is_none());
    }
}
