use std::any::Any;

use async_trait::async_trait;
use tracing::trace;
use twex_parser::StringParser;
use twilight_model::application::command::CommandOption;
use twilight_model::application::interaction::application_command::CommandOptionValue;

use super::single::{SingleConverter, SingleParse};
use super::{Converter, ConverterHooks, ConverterKind, ConverterResult, ParseResult, ParsedValue, WithHooks};
use crate::command::CommandCtxt;
use crate::command::errors::{ArgumentsError, ConverterError, ValueError};

/// Zero or more values, each parsed by the wrapped single converter.
///
/// Consumes tokens until one fails to convert. The failing token is left for the next argument.
pub struct SingleToListConverter<C: SingleParse> {
    inner: SingleConverter<C>,
    required: bool,
    parsed: Vec<C::Output>,
    parse_success: bool,
    hooks: ConverterHooks<Vec<C::Output>>,
}

impl<C: SingleParse> SingleToListConverter<C> {
    pub(crate) fn new(inner: SingleConverter<C>, required: bool) -> Self {
        Self {
            inner,
            required,
            parsed: Vec::new(),
            parse_success: false,
            hooks: ConverterHooks::default(),
        }
    }

    /// Parses one element, returning whether it converted. Relayed errors count as "didn't
    /// convert", anything else is propagated.
    async fn parse_element(
        &mut self,
        parser: Option<&mut StringParser>,
        cx: &CommandCtxt<'_>,
        named: Option<&[String]>,
    ) -> ConverterResult<bool> {
        match self.inner.parse(parser, cx, named).await {
            Ok(result) if result.converted() => {
                let value = self.inner.value().map_err(|e| ConverterError::Other(e.into()))?;
                self.parsed.push(value);
                Ok(true)
            },
            Ok(_) => Ok(false),
            Err(ConverterError::Relayed(reason)) => {
                trace!("list element stopped: {reason}");
                Ok(false)
            },
            Err(e) => Err(e),
        }
    }
}

impl<C: SingleParse> WithHooks for SingleToListConverter<C> {
    type Value = Vec<C::Output>;

    fn hooks_mut(&mut self) -> &mut ConverterHooks<Vec<C::Output>> {
        &mut self.hooks
    }
}

impl<C: SingleParse> ParsedValue for SingleToListConverter<C> {
    type Value = Vec<C::Output>;

    fn value(&self) -> Result<Vec<C::Output>, ValueError> {
        Ok(self.hooks.mutate(self.parsed.clone()))
    }
}

#[async_trait]
impl<C: SingleParse> Converter for SingleToListConverter<C> {
    fn kind(&self) -> ConverterKind {
        ConverterKind::List
    }

    fn required(&self) -> bool {
        self.required
    }

    fn parse_success(&self) -> bool {
        self.parse_success
    }

    fn set_parse_success(&mut self, success: bool) {
        self.parse_success = success;
    }

    fn signature_type(&self) -> &str {
        self.hooks
            .signature_type
            .as_deref()
            .unwrap_or_else(|| self.inner.signature_type())
    }

    fn error_type(&self) -> Option<&str> {
        self.hooks.error_type.as_deref().or_else(|| self.inner.error_type())
    }

    fn show_type_in_signature(&self) -> bool {
        self.hooks
            .show_type_in_signature
            .unwrap_or_else(|| self.inner.show_type_in_signature())
    }

    fn bundle(&self) -> Option<&str> {
        self.inner.bundle()
    }

    async fn parse(
        &mut self,
        parser: Option<&mut StringParser>,
        cx: &CommandCtxt<'_>,
        named: Option<&[String]>,
    ) -> ConverterResult<ParseResult> {
        self.parsed.clear();

        if let Some(values) = named {
            for value in values {
                if !self.parse_element(None, cx, Some(std::slice::from_ref(value))).await? {
                    break;
                }
            }
        } else if let Some(parser) = parser {
            while parser.has_next() {
                let mut fork = parser.clone();

                if !self.parse_element(Some(&mut fork), cx, None).await? {
                    break;
                }

                *parser = fork;
            }
        }

        Ok(ParseResult::Multi(self.parsed.len()))
    }

    async fn parse_option(&mut self, cx: &CommandCtxt<'_>, option: &CommandOptionValue) -> ConverterResult<bool> {
        let converted = self.inner.parse_option(cx, option).await?;

        if converted {
            let value = self.inner.value().map_err(|e| ConverterError::Other(e.into()))?;
            self.parsed = vec![value];
        }

        Ok(converted)
    }

    async fn validate(&self, cx: &CommandCtxt<'_>, argument: &str) -> ConverterResult<()> {
        self.hooks.validate(cx, argument, &self.parsed).await
    }

    fn handle_error(&self, error: ConverterError, cx: &CommandCtxt<'_>) -> anyhow::Result<String> {
        self.inner.handle_error(error, cx)
    }

    fn to_slash_option(&self, name: &str, _description: &str) -> Result<CommandOption, ArgumentsError> {
        Err(ArgumentsError::ListInSlashCommand(name.to_owned()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
