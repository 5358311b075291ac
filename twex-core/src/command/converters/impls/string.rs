use async_trait::async_trait;
use twilight_model::application::command::CommandOption;
use twilight_util::builder::command::StringBuilder;

use crate::command::CommandCtxt;
use crate::command::converters::ConverterResult;
use crate::command::converters::single::SingleParse;
use crate::command::errors::ConverterError;
use crate::i18n::keys;

/// A single token of text, optionally length-limited. Lengths are counted in characters.
#[derive(Clone, Debug, Default)]
pub struct StringConverter {
    min_length: Option<u16>,
    max_length: Option<u16>,
}

impl StringConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, min_length: u16) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn max_length(mut self, max_length: u16) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

#[async_trait]
impl SingleParse for StringConverter {
    type Output = String;

    fn signature_type(&self) -> &str {
        keys::STRING_SIGNATURE_TYPE
    }

    fn show_type_in_signature(&self) -> bool {
        false
    }

    async fn parse_token(&self, cx: &CommandCtxt<'_>, token: &str) -> ConverterResult<Option<String>> {
        let length = token.chars().count();

        if let Some(min) = self.min_length.filter(|min| length < usize::from(*min)) {
            return Err(ConverterError::Relayed(cx.translate(keys::STRING_TOO_SHORT, &[&token, &min])));
        }

        if let Some(max) = self.max_length.filter(|max| length > usize::from(*max)) {
            return Err(ConverterError::Relayed(cx.translate(keys::STRING_TOO_LONG, &[&token, &max])));
        }

        Ok(Some(token.to_owned()))
    }

    fn slash_option(&self, name: &str, description: &str) -> CommandOption {
        let mut builder = StringBuilder::new(name, description).required(true);

        if let Some(min) = self.min_length {
            builder = builder.min_length(min);
        }

        if let Some(max) = self.max_length {
            builder = builder.max_length(max);
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
    async fn length_limits() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);
        let converter = StringConverter::new().min_length(2).max_length(4);

        assert_eq!(converter.parse_token(&cx, "abc").await.unwrap().as_deref(), Some("abc"));
        assert_eq!(
            converter.parse_token(&cx, "a").await.unwrap_err().to_string(),
            "`a` is too short, it must be at least 2 characters."
        );
        assert_eq!(
            converter.parse_token(&cx, "abcde").await.unwrap_err().to_string(),
            "`abcde` is too long, it must be at most 4 characters."
        );
        // characters, not bytes
        assert!(converter.parse_token(&cx, "ééé").await.is_ok());
    }
}
