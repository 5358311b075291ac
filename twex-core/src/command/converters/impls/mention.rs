//! Users, channels and roles, given as mentions or raw IDs.
//!
//! These only resolve IDs. Fetching the entities behind them needs an HTTP client, which is up to
//! the command.

use async_trait::async_trait;
use twex_common::util::discord::{channel_mention_to_id, role_mention_to_id, user_mention_to_id};
use twilight_model::application::command::CommandOption;
use twilight_model::application::interaction::application_command::CommandOptionValue;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, RoleMarker, UserMarker};
use twilight_util::builder::command::{ChannelBuilder, RoleBuilder, UserBuilder};

use crate::command::CommandCtxt;
use crate::command::converters::ConverterResult;
use crate::command::converters::single::SingleParse;
use crate::command::errors::ConverterError;
use crate::i18n::keys;

fn invalid(cx: &CommandCtxt<'_>, key: &str, token: &str) -> ConverterError {
    ConverterError::Relayed(cx.translate(key, &[&token]))
}

#[derive(Clone, Debug, Default)]
pub struct UserConverter;

#[async_trait]
impl SingleParse for UserConverter {
    type Output = Id<UserMarker>;

    fn signature_type(&self) -> &str {
        keys::USER_SIGNATURE_TYPE
    }

    async fn parse_token(&self, cx: &CommandCtxt<'_>, token: &str) -> ConverterResult<Option<Id<UserMarker>>> {
        user_mention_to_id(token)
            .map(Some)
            .ok_or_else(|| invalid(cx, keys::USER_INVALID, token))
    }

    async fn parse_option(
        &self,
        cx: &CommandCtxt<'_>,
        option: &CommandOptionValue,
    ) -> ConverterResult<Option<Id<UserMarker>>> {
        match option {
            CommandOptionValue::User(id) => Ok(Some(*id)),
            CommandOptionValue::String(value) => self.parse_token(cx, value).await,
            _ => Ok(None),
        }
    }

    fn slash_option(&self, name: &str, description: &str) -> CommandOption {
        UserBuilder::new(name, description).required(true).build()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ChannelConverter;

#[async_trait]
impl SingleParse for ChannelConverter {
    type Output = Id<ChannelMarker>;

    fn signature_type(&self) -> &str {
        keys::CHANNEL_SIGNATURE_TYPE
    }

    async fn parse_token(&self, cx: &CommandCtxt<'_>, token: &str) -> ConverterResult<Option<Id<ChannelMarker>>> {
        channel_mention_to_id(token)
            .map(Some)
            .ok_or_else(|| invalid(cx, keys::CHANNEL_INVALID, token))
    }

    async fn parse_option(
        &self,
        cx: &CommandCtxt<'_>,
        option: &CommandOptionValue,
    ) -> ConverterResult<Option<Id<ChannelMarker>>> {
        match option {
            CommandOptionValue::Channel(id) => Ok(Some(*id)),
            CommandOptionValue::String(value) => self.parse_token(cx, value).await,
            _ => Ok(None),
        }
    }

    fn slash_option(&self, name: &str, description: &str) -> CommandOption {
        ChannelBuilder::new(name, description).required(true).build()
    }
}

#[derive(Clone, Debug, Default)]
pub struct RoleConverter;

#[async_trait]
impl SingleParse for RoleConverter {
    type Output = Id<RoleMarker>;

    fn signature_type(&self) -> &str {
        keys::ROLE_SIGNATURE_TYPE
    }

    async fn parse_token(&self, cx: &CommandCtxt<'_>, token: &str) -> ConverterResult<Option<Id<RoleMarker>>> {
        role_mention_to_id(token)
            .map(Some)
            .ok_or_else(|| invalid(cx, keys::ROLE_INVALID, token))
    }

    async fn parse_option(
        &self,
        cx: &CommandCtxt<'_>,
        option: &CommandOptionValue,
    ) -> ConverterResult<Option<Id<RoleMarker>>> {
        match option {
            CommandOptionValue::Role(id) => Ok(Some(*id)),
            CommandOptionValue::String(value) => self.parse_token(cx, value).await,
            _ => Ok(None),
        }
    }

    fn slash_option(&self, name: &str, description: &str) -> CommandOption {
        RoleBuilder::new(name, description).required(true).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::test_util::command_data;
    use crate::command::{CommandCtxt, Source};

    const ID: u64 = 233667448887312385;

    #[tokio::test]
    async fn mentions_and_ids() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);

        assert_eq!(
            UserConverter.parse_token(&cx, &format!("<@!{ID}>")).await.unwrap(),
            Some(Id::new(ID))
        );
        assert_eq!(
            ChannelConverter.parse_token(&cx, &ID.to_string()).await.unwrap(),
            Some(Id::new(ID))
        );
        assert_eq!(
            RoleConverter.parse_token(&cx, &format!("<@&{ID}>")).await.unwrap(),
            Some(Id::new(ID))
        );
    }

    #[tokio::test]
    async fn wrong_mention_kind_is_rejected() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);

        let error = RoleConverter.parse_token(&cx, &format!("<#{ID}>")).await.unwrap_err();
        assert_eq!(error.to_string(), format!("`<#{ID}>` is not a role mention or ID."));
    }

    #[tokio::test]
    async fn slash_options_resolve_directly() {
        let data = command_data(Source::Interaction);
        let cx = CommandCtxt::new(&data);

        assert_eq!(
            UserConverter
                .parse_option(&cx, &CommandOptionValue::User(Id::new(ID)))
                .await
                .unwrap(),
            Some(Id::new(ID))
        );
        assert_eq!(
            UserConverter
                .parse_option(&cx, &CommandOptionValue::Boolean(true))
                .await
                .unwrap(),
            None
        );
    }
}
