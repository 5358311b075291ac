use async_trait::async_trait;
use twex_common::util::regex::EMAIL;
use twilight_model::application::command::CommandOption;
use twilight_util::builder::command::StringBuilder;

use crate::command::CommandCtxt;
use crate::command::converters::ConverterResult;
use crate::command::converters::single::SingleParse;
use crate::command::errors::ConverterError;
use crate::i18n::keys;

/// An email address. Only the shape is checked.
#[derive(Clone, Debug, Default)]
pub struct EmailConverter;

#[async_trait]
impl SingleParse for EmailConverter {
    type Output = String;

    fn signature_type(&self) -> &str {
        keys::EMAIL_SIGNATURE_TYPE
    }

    async fn parse_token(&self, cx: &CommandCtxt<'_>, token: &str) -> ConverterResult<Option<String>> {
        if EMAIL.is_match(token) {
            Ok(Some(token.to_owned()))
        } else {
            Err(ConverterError::Relayed(cx.translate(keys::EMAIL_INVALID, &[&token])))
        }
    }

    fn slash_option(&self, name: &str, description: &str) -> CommandOption {
        StringBuilder::new(name, description).required(true).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::test_util::command_data;
    use crate::command::{CommandCtxt, Source};

    #[tokio::test]
    async fn checks_shape() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);

        assert!(EmailConverter.parse_token(&cx, "someone@example.co.uk").await.is_ok());
        assert_eq!(
            EmailConverter
                .parse_token(&cx, "someone@localhost")
                .await
                .unwrap_err()
                .to_string(),
            "`someone@localhost` is not a valid email address."
        );
    }
}
