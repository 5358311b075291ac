use async_trait::async_trait;
use twex_common::util::discord::{DiscordTimestamp, parse_discord_timestamp};
use twilight_model::application::command::CommandOption;
use twilight_util::builder::command::StringBuilder;

use crate::command::CommandCtxt;
use crate::command::converters::ConverterResult;
use crate::command::converters::single::SingleParse;
use crate::command::errors::ConverterError;
use crate::i18n::keys;

/// A Discord timestamp, as written by `<t:1700000000:R>`. The style is optional.
#[derive(Clone, Debug, Default)]
pub struct TimestampConverter;

impl TimestampConverter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SingleParse for TimestampConverter {
    type Output = DiscordTimestamp;

    fn signature_type(&self) -> &str {
        keys::TIMESTAMP_SIGNATURE_TYPE
    }

    async fn parse_token(&self, cx: &CommandCtxt<'_>, token: &str) -> ConverterResult<Option<DiscordTimestamp>> {
        parse_discord_timestamp(token)
            .filter(|timestamp| timestamp.datetime().is_some())
            .map(Some)
            .ok_or_else(|| ConverterError::Relayed(cx.translate(keys::TIMESTAMP_INVALID, &[&token])))
    }

    fn slash_option(&self, name: &str, description: &str) -> CommandOption {
        StringBuilder::new(name, description).required(true).build()
    }
}
