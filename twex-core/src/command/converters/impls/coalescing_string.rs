use async_trait::async_trait;
use twilight_model::application::interaction::application_command::CommandOptionValue;

use crate::command::CommandCtxt;
use crate::command::converters::ConverterResult;
use crate::command::converters::coalescing::CoalescingParse;
use crate::i18n::keys;

/// All remaining tokens, joined with single spaces. Slash command text is kept as typed.
#[derive(Clone, Debug, Default)]
pub struct CoalescingStringConverter;

impl CoalescingStringConverter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CoalescingParse for CoalescingStringConverter {
    type Output = String;

    fn signature_type(&self) -> &str {
        keys::STRING_SIGNATURE_TYPE
    }

    fn show_type_in_signature(&self) -> bool {
        false
    }

    async fn convert(&self, _cx: &CommandCtxt<'_>, tokens: &[String]) -> ConverterResult<String> {
        Ok(tokens.join(" "))
    }

    async fn parse_option(
        &self,
        _cx: &CommandCtxt<'_>,
        option: &CommandOptionValue,
    ) -> ConverterResult<Option<String>> {
        match option {
            CommandOptionValue::String(text) if !text.trim().is_empty() => Ok(Some(text.clone())),
            _ => Ok(None),
        }
    }
}
