use async_trait::async_trait;
use twilight_model::application::command::CommandOption;
use twilight_model::application::interaction::application_command::CommandOptionValue;
use twilight_util::builder::command::NumberBuilder;

use crate::command::CommandCtxt;
use crate::command::converters::ConverterResult;
use crate::command::converters::single::SingleParse;
use crate::command::errors::ConverterError;
use crate::i18n::keys;

/// Finite decimal numbers, with optional bounds.
#[derive(Clone, Debug, Default)]
pub struct DecimalConverter {
    min: Option<f64>,
    max: Option<f64>,
}

impl DecimalConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    fn check_bounds(&self, cx: &CommandCtxt<'_>, value: f64) -> ConverterResult<f64> {
        if let Some(min) = self.min.filter(|min| value < *min) {
            return Err(ConverterError::Relayed(cx.translate(keys::DECIMAL_TOO_SMALL, &[&value, &min])));
        }

        if let Some(max) = self.max.filter(|max| value > *max) {
            return Err(ConverterError::Relayed(cx.translate(keys::DECIMAL_TOO_LARGE, &[&value, &max])));
        }

        Ok(value)
    }
}

#[async_trait]
impl SingleParse for DecimalConverter {
    type Output = f64;

    fn signature_type(&self) -> &str {
        keys::DECIMAL_SIGNATURE_TYPE
    }

    async fn parse_token(&self, cx: &CommandCtxt<'_>, token: &str) -> ConverterResult<Option<f64>> {
        // "inf" and "NaN" parse, but aren't numbers anyone types on purpose
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => self.check_bounds(cx, value).map(Some),
            _ => Err(ConverterError::Relayed(cx.translate(keys::DECIMAL_INVALID, &[&token]))),
        }
    }

    async fn parse_option(&self, cx: &CommandCtxt<'_>, option: &CommandOptionValue) -> ConverterResult<Option<f64>> {
        match option {
            CommandOptionValue::Number(value) => self.check_bounds(cx, *value).map(Some),
            CommandOptionValue::Integer(value) => self.check_bounds(cx, *value as f64).map(Some),
            CommandOptionValue::String(value) => self.parse_token(cx, value).await,
            _ => Ok(None),
        }
    }

    fn slash_option(&self, name: &str, description: &str) -> CommandOption {
        let mut builder = NumberBuilder::new(name, description).required(true);

        if let Some(min) = self.min {
            builder = builder.min_value(min);
        }

        if let Some(max) = self.max {
            builder = builder.max_value(max);
        }

        builder.build()
    }
}
