use async_trait::async_trait;
use twilight_model::application::command::CommandOption;
use twilight_model::application::interaction::application_command::CommandOptionValue;
use twilight_util::builder::command::BooleanBuilder;

use crate::command::CommandCtxt;
use crate::command::converters::single::SingleParse;
use crate::command::converters::{ConverterKind, ConverterResult};
use crate::command::errors::ConverterError;
use crate::i18n::keys;

fn word_list_contains(cx: &CommandCtxt<'_>, key: &str, word: &str) -> bool {
    cx.translate(key, &[])
        .split(',')
        .any(|w| w.trim().eq_ignore_ascii_case(word))
}

/// Yes/no values, using the locale's words for each.
#[derive(Clone, Debug, Default)]
pub struct BooleanConverter;

impl BooleanConverter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SingleParse for BooleanConverter {
    type Output = bool;

    fn signature_type(&self) -> &str {
        keys::BOOLEAN_SIGNATURE_TYPE
    }

    /// A list of booleans would swallow every "yes" and "no" in a sentence.
    fn supports(&self, kind: ConverterKind) -> bool {
        kind != ConverterKind::List
    }

    async fn parse_token(&self, cx: &CommandCtxt<'_>, token: &str) -> ConverterResult<Option<bool>> {
        if word_list_contains(cx, keys::BOOLEANS_TRUE, token) {
            Ok(Some(true))
        } else if word_list_contains(cx, keys::BOOLEANS_FALSE, token) {
            Ok(Some(false))
        } else {
            Err(ConverterError::Relayed(cx.translate(keys::BOOLEAN_INVALID, &[&token])))
        }
    }

    /// The first of the locale's words for the value.
    fn display_value(&self, cx: &CommandCtxt<'_>, value: &bool) -> String {
        let key = if *value { keys::BOOLEANS_TRUE } else { keys::BOOLEANS_FALSE };
        let words = cx.translate(key, &[]);

        words.split(',').next().unwrap_or(&words).trim().to_owned()
    }

    async fn parse_option(&self, cx: &CommandCtxt<'_>, option: &CommandOptionValue) -> ConverterResult<Option<bool>> {
        match option {
            CommandOptionValue::Boolean(value) => Ok(Some(*value)),
            CommandOptionValue::String(value) => self.parse_token(cx, value).await,
            _ => Ok(None),
        }
    }

    fn slash_option(&self, name: &str, description: &str) -> CommandOption {
        BooleanBuilder::new(name, description).required(true).build()
    }
}
