use std::any::Any;
use std::fmt::{Debug, Display};

use async_trait::async_trait;
use twex_parser::StringParser;
use twilight_model::application::command::{CommandOption, CommandOptionChoice};
use twilight_model::application::interaction::application_command::CommandOptionValue;

use super::list::SingleToListConverter;
use super::wrappers::{SingleToDefaultingConverter, SingleToOptionalConverter};
use super::{Converter, ConverterHooks, ConverterKind, ConverterResult, ParseResult, ParsedValue, WithHooks};
use crate::command::CommandCtxt;
use crate::command::errors::{ArgumentsError, ValueError};

/// Conversion of one token into one value.
///
/// This is what a converter author writes. [`SingleParse::single`] turns it into a
/// [`SingleConverter`], which can then be wrapped into the optional, defaulting and list shapes.
#[async_trait]
pub trait SingleParse: Send + Sync + 'static {
    type Output: Clone + Debug + Display + Send + Sync + 'static;

    fn signature_type(&self) -> &str;

    fn error_type(&self) -> Option<&str> {
        None
    }

    fn show_type_in_signature(&self) -> bool {
        true
    }

    fn bundle(&self) -> Option<&str> {
        None
    }

    /// Whether this conversion may be wrapped into `kind`.
    fn supports(&self, _kind: ConverterKind) -> bool {
        true
    }

    /// Converts one token. `Ok(None)` means "not convertible" with nothing more specific to say.
    async fn parse_token(&self, cx: &CommandCtxt<'_>, token: &str) -> ConverterResult<Option<Self::Output>>;

    /// Converts a slash command option value. By default, string options go through
    /// [`parse_token`](Self::parse_token) and anything else is rejected.
    async fn parse_option(
        &self,
        cx: &CommandCtxt<'_>,
        option: &CommandOptionValue,
    ) -> ConverterResult<Option<Self::Output>> {
        match option {
            CommandOptionValue::String(value) => self.parse_token(cx, value).await,
            _ => Ok(None),
        }
    }

    /// The slash command option, marked as required.
    fn slash_option(&self, name: &str, description: &str) -> CommandOption;

    /// Renders a value for users, as in a signature's default.
    fn display_value(&self, _cx: &CommandCtxt<'_>, value: &Self::Output) -> String {
        value.to_string()
    }

    fn autocomplete(&self, _cx: &CommandCtxt<'_>, _current: &str) -> Vec<CommandOptionChoice> {
        Vec::new()
    }

    fn single(self) -> SingleConverter<Self>
    where
        Self: Sized,
    {
        SingleConverter::new(self)
    }
}

/// A required converter taking exactly one token.
pub struct SingleConverter<C: SingleParse> {
    logic: C,
    parsed: Option<C::Output>,
    parse_success: bool,
    hooks: ConverterHooks<C::Output>,
}

impl<C: SingleParse> SingleConverter<C> {
    pub fn new(logic: C) -> Self {
        Self {
            logic,
            parsed: None,
            parse_success: false,
            hooks: ConverterHooks::default(),
        }
    }

    pub fn logic(&self) -> &C {
        &self.logic
    }

    fn check_shape(&self, kind: ConverterKind) -> Result<(), ArgumentsError> {
        if self.logic.supports(kind) {
            Ok(())
        } else {
            Err(ArgumentsError::UnsupportedConversion {
                converter: std::any::type_name::<C>().to_owned(),
                shape: kind.name(),
            })
        }
    }

    pub fn to_optional(self) -> Result<SingleToOptionalConverter<C>, ArgumentsError> {
        self.check_shape(ConverterKind::Optional)?;
        Ok(SingleToOptionalConverter::new(self))
    }

    pub fn to_defaulting(self, default: C::Output) -> Result<SingleToDefaultingConverter<C>, ArgumentsError> {
        self.check_shape(ConverterKind::Defaulting)?;
        Ok(SingleToDefaultingConverter::new(self, default))
    }

    pub fn to_list(self, required: bool) -> Result<SingleToListConverter<C>, ArgumentsError> {
        self.check_shape(ConverterKind::List)?;
        Ok(SingleToListConverter::new(self, required))
    }
}

impl<C: SingleParse> WithHooks for SingleConverter<C> {
    type Value = C::Output;

    fn hooks_mut(&mut self) -> &mut ConverterHooks<C::Output> {
        &mut self.hooks
    }
}

impl<C: SingleParse> ParsedValue for SingleConverter<C> {
    type Value = C::Output;

    fn value(&self) -> Result<C::Output, ValueError> {
        self.parsed
            .clone()
            .map(|v| self.hooks.mutate(v))
            .ok_or(ValueError::NotParsed)
    }
}

#[async_trait]
impl<C: SingleParse> Converter for SingleConverter<C> {
    fn kind(&self) -> ConverterKind {
        ConverterKind::Single
    }

    fn required(&self) -> bool {
        true
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
            .unwrap_or_else(|| self.logic.signature_type())
    }

    fn error_type(&self) -> Option<&str> {
        self.hooks.error_type.as_deref().or_else(|| self.logic.error_type())
    }

    fn show_type_in_signature(&self) -> bool {
        self.hooks
            .show_type_in_signature
            .unwrap_or_else(|| self.logic.show_type_in_signature())
    }

    fn bundle(&self) -> Option<&str> {
        self.logic.bundle()
    }

    async fn parse(
        &mut self,
        parser: Option<&mut StringParser>,
        cx: &CommandCtxt<'_>,
        named: Option<&[String]>,
    ) -> ConverterResult<ParseResult> {
        let token = match named {
            Some(values) => values.first().cloned(),
            None => parser.and_then(StringParser::parse_next).map(|t| t.data),
        };

        let Some(token) = token else {
            return Ok(ParseResult::Single(false));
        };

        match self.logic.parse_token(cx, &token).await? {
            Some(value) => {
                self.parsed = Some(value);
                Ok(ParseResult::Single(true))
            },
            None => Ok(ParseResult::Single(false)),
        }
    }

    async fn parse_option(&mut self, cx: &CommandCtxt<'_>, option: &CommandOptionValue) -> ConverterResult<bool> {
        match self.logic.parse_option(cx, option).await? {
            Some(value) => {
                self.parsed = Some(value);
                Ok(true)
            },
            None => Ok(false),
        }
    }

    async fn validate(&self, cx: &CommandCtxt<'_>, argument: &str) -> ConverterResult<()> {
        match &self.parsed {
            Some(value) => self.hooks.validate(cx, argument, value).await,
            None => Ok(()),
        }
    }

    fn to_slash_option(&self, name: &str, description: &str) -> Result<CommandOption, ArgumentsError> {
        Ok(self.logic.slash_option(name, description))
    }

    fn autocomplete(&self, cx: &CommandCtxt<'_>, current: &str) -> Vec<CommandOptionChoice> {
        self.logic.autocomplete(cx, current)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
