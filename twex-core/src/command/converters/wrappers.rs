//! The optional and defaulting shapes of single and coalescing converters.
//!
//! Wrappers delegate all parsing to the converter they wrap and only change what happens when
//! nothing was parsed.

use std::any::Any;

use async_trait::async_trait;
use twex_parser::StringParser;
use twilight_model::application::command::{CommandOption, CommandOptionChoice};
use twilight_model::application::interaction::application_command::CommandOptionValue;

use super::coalescing::{CoalescingConverter, CoalescingParse};
use super::single::{SingleConverter, SingleParse};
use super::{
    Converter, ConverterHooks, ConverterKind, ConverterResult, ParseResult, ParsedValue, WithHooks, not_required,
};
use crate::command::CommandCtxt;
use crate::command::errors::{ArgumentsError, ConverterError, ValueError};

/// Forwards the display accessors to `inner`, unless overridden through the wrapper's hooks.
macro_rules! delegate_display {
    () => {
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

        fn output_error(&self) -> bool {
            self.output_error
        }

        fn parse_success(&self) -> bool {
            self.parse_success
        }

        fn set_parse_success(&mut self, success: bool) {
            self.parse_success = success;
        }

        fn handle_error(&self, error: ConverterError, cx: &CommandCtxt<'_>) -> anyhow::Result<String> {
            self.inner.handle_error(error, cx)
        }

        fn autocomplete(&self, cx: &CommandCtxt<'_>, current: &str) -> Vec<CommandOptionChoice> {
            self.inner.autocomplete(cx, current)
        }

        fn to_slash_option(&self, name: &str, description: &str) -> Result<CommandOption, ArgumentsError> {
            self.inner.to_slash_option(name, description).map(not_required)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    };
}

/// Reads the inner value after a successful parse. The inner converter just stored it, so a
/// missing value is a bug rather than bad input.
fn take_inner<P: ParsedValue>(inner: &P) -> ConverterResult<P::Value> {
    inner.value().map_err(|e| ConverterError::Other(e.into()))
}

/// Zero or one value: `None` when nothing was given or nothing converted.
pub struct SingleToOptionalConverter<C: SingleParse> {
    inner: SingleConverter<C>,
    parsed: Option<C::Output>,
    parse_success: bool,
    output_error: bool,
    hooks: ConverterHooks<Option<C::Output>>,
}

impl<C: SingleParse> SingleToOptionalConverter<C> {
    pub(crate) fn new(inner: SingleConverter<C>) -> Self {
        Self {
            inner,
            parsed: None,
            parse_success: false,
            output_error: false,
            hooks: ConverterHooks::default(),
        }
    }

    /// Surface conversion errors instead of silently falling back to `None`.
    pub fn with_output_error(mut self, output_error: bool) -> Self {
        self.output_error = output_error;
        self
    }
}

impl<C: SingleParse> WithHooks for SingleToOptionalConverter<C> {
    type Value = Option<C::Output>;

    fn hooks_mut(&mut self) -> &mut ConverterHooks<Option<C::Output>> {
        &mut self.hooks
    }
}

impl<C: SingleParse> ParsedValue for SingleToOptionalConverter<C> {
    type Value = Option<C::Output>;

    fn value(&self) -> Result<Option<C::Output>, ValueError> {
        Ok(self.hooks.mutate(self.parsed.clone()))
    }
}

#[async_trait]
impl<C: SingleParse> Converter for SingleToOptionalConverter<C> {
    delegate_display!();

    fn kind(&self) -> ConverterKind {
        ConverterKind::Optional
    }

    fn required(&self) -> bool {
        false
    }

    async fn parse(
        &mut self,
        parser: Option<&mut StringParser>,
        cx: &CommandCtxt<'_>,
        named: Option<&[String]>,
    ) -> ConverterResult<ParseResult> {
        let result = self.inner.parse(parser, cx, named).await?;

        if result.converted() {
            self.parsed = Some(take_inner(&self.inner)?);
        }

        Ok(result)
    }

    async fn parse_option(&mut self, cx: &CommandCtxt<'_>, option: &CommandOptionValue) -> ConverterResult<bool> {
        let converted = self.inner.parse_option(cx, option).await?;

        if converted {
            self.parsed = Some(take_inner(&self.inner)?);
        }

        Ok(converted)
    }

    async fn validate(&self, cx: &CommandCtxt<'_>, argument: &str) -> ConverterResult<()> {
        self.inner.validate(cx, argument).await?;
        self.hooks.validate(cx, argument, &self.parsed).await
    }
}

/// Zero or one value: a fixed default when nothing was given or nothing converted.
pub struct SingleToDefaultingConverter<C: SingleParse> {
    inner: SingleConverter<C>,
    default: C::Output,
    parsed: Option<C::Output>,
    parse_success: bool,
    output_error: bool,
    hooks: ConverterHooks<C::Output>,
}

impl<C: SingleParse> SingleToDefaultingConverter<C> {
    pub(crate) fn new(inner: SingleConverter<C>, default: C::Output) -> Self {
        Self {
            inner,
            default,
            parsed: None,
            parse_success: false,
            output_error: false,
            hooks: ConverterHooks::default(),
        }
    }

    pub fn with_output_error(mut self, output_error: bool) -> Self {
        self.output_error = output_error;
        self
    }

    fn current(&self) -> &C::Output {
        self.parsed.as_ref().unwrap_or(&self.default)
    }
}

impl<C: SingleParse> WithHooks for SingleToDefaultingConverter<C> {
    type Value = C::Output;

    fn hooks_mut(&mut self) -> &mut ConverterHooks<C::Output> {
        &mut self.hooks
    }
}

impl<C: SingleParse> ParsedValue for SingleToDefaultingConverter<C> {
    type Value = C::Output;

    fn value(&self) -> Result<C::Output, ValueError> {
        Ok(self.hooks.mutate(self.current().clone()))
    }
}

#[async_trait]
impl<C: SingleParse> Converter for SingleToDefaultingConverter<C> {
    delegate_display!();

    fn kind(&self) -> ConverterKind {
        ConverterKind::Defaulting
    }

    fn required(&self) -> bool {
        false
    }

    fn default_display(&self, cx: &CommandCtxt<'_>) -> Option<String> {
        Some(self.inner.logic().display_value(cx, &self.default))
    }

    async fn parse(
        &mut self,
        parser: Option<&mut StringParser>,
        cx: &CommandCtxt<'_>,
        named: Option<&[String]>,
    ) -> ConverterResult<ParseResult> {
        let result = self.inner.parse(parser, cx, named).await?;

        if result.converted() {
            self.parsed = Some(take_inner(&self.inner)?);
        }

        Ok(result)
    }

    async fn parse_option(&mut self, cx: &CommandCtxt<'_>, option: &CommandOptionValue) -> ConverterResult<bool> {
        let converted = self.inner.parse_option(cx, option).await?;

        if converted {
            self.parsed = Some(take_inner(&self.inner)?);
        }

        Ok(converted)
    }

    async fn validate(&self, cx: &CommandCtxt<'_>, argument: &str) -> ConverterResult<()> {
        self.inner.validate(cx, argument).await?;
        self.hooks.validate(cx, argument, self.current()).await
    }
}

/// A coalescing converter that yields `None` when no run converts.
pub struct CoalescingToOptionalConverter<C: CoalescingParse> {
    inner: CoalescingConverter<C>,
    parsed: Option<C::Output>,
    parse_success: bool,
    output_error: bool,
    hooks: ConverterHooks<Option<C::Output>>,
}

impl<C: CoalescingParse> CoalescingToOptionalConverter<C> {
    pub(crate) fn new(inner: CoalescingConverter<C>) -> Self {
        Self {
            inner,
            parsed: None,
            parse_success: false,
            output_error: false,
            hooks: ConverterHooks::default(),
        }
    }

    /// Surface conversion errors instead of falling back to `None`. This also makes the wrapped
    /// converter report why its longest run failed.
    pub fn with_output_error(mut self, output_error: bool) -> Self {
        self.output_error = output_error;
        self.inner.set_should_throw(output_error);
        self
    }
}

impl<C: CoalescingParse> WithHooks for CoalescingToOptionalConverter<C> {
    type Value = Option<C::Output>;

    fn hooks_mut(&mut self) -> &mut ConverterHooks<Option<C::Output>> {
        &mut self.hooks
    }
}

impl<C: CoalescingParse> ParsedValue for CoalescingToOptionalConverter<C> {
    type Value = Option<C::Output>;

    fn value(&self) -> Result<Option<C::Output>, ValueError> {
        Ok(self.hooks.mutate(self.parsed.clone()))
    }
}

#[async_trait]
impl<C: CoalescingParse> Converter for CoalescingToOptionalConverter<C> {
    delegate_display!();

    fn kind(&self) -> ConverterKind {
        ConverterKind::OptionalCoalescing
    }

    fn required(&self) -> bool {
        false
    }

    async fn parse(
        &mut self,
        parser: Option<&mut StringParser>,
        cx: &CommandCtxt<'_>,
        named: Option<&[String]>,
    ) -> ConverterResult<ParseResult> {
        let result = self.inner.parse(parser, cx, named).await?;

        if result.converted() {
            self.parsed = Some(take_inner(&self.inner)?);
        }

        Ok(result)
    }

    async fn parse_option(&mut self, cx: &CommandCtxt<'_>, option: &CommandOptionValue) -> ConverterResult<bool> {
        let converted = self.inner.parse_option(cx, option).await?;

        if converted {
            self.parsed = Some(take_inner(&self.inner)?);
        }

        Ok(converted)
    }

    async fn validate(&self, cx: &CommandCtxt<'_>, argument: &str) -> ConverterResult<()> {
        self.inner.validate(cx, argument).await?;
        self.hooks.validate(cx, argument, &self.parsed).await
    }
}

/// A coalescing converter that yields a fixed default when no run converts.
pub struct CoalescingToDefaultingConverter<C: CoalescingParse> {
    inner: CoalescingConverter<C>,
    default: C::Output,
    parsed: Option<C::Output>,
    parse_success: bool,
    output_error: bool,
    hooks: ConverterHooks<C::Output>,
}

impl<C: CoalescingParse> CoalescingToDefaultingConverter<C> {
    pub(crate) fn new(inner: CoalescingConverter<C>, default: C::Output) -> Self {
        Self {
            inner,
            default,
            parsed: None,
            parse_success: false,
            output_error: false,
            hooks: ConverterHooks::default(),
        }
    }

    pub fn with_output_error(mut self, output_error: bool) -> Self {
        self.output_error = output_error;
        self.inner.set_should_throw(output_error);
        self
    }

    fn current(&self) -> &C::Output {
        self.parsed.as_ref().unwrap_or(&self.default)
    }
}

impl<C: CoalescingParse> WithHooks for CoalescingToDefaultingConverter<C> {
    type Value = C::Output;

    fn hooks_mut(&mut self) -> &mut ConverterHooks<C::Output> {
        &mut self.hooks
    }
}

impl<C: CoalescingParse> ParsedValue for CoalescingToDefaultingConverter<C> {
    type Value = C::Output;

    fn value(&self) -> Result<C::Output, ValueError> {
        Ok(self.hooks.mutate(self.current().clone()))
    }
}

#[async_trait]
impl<C: CoalescingParse> Converter for CoalescingToDefaultingConverter<C> {
    delegate_display!();

    fn kind(&self) -> ConverterKind {
        ConverterKind::DefaultingCoalescing
    }

    fn required(&self) -> bool {
        false
    }

    fn default_display(&self, cx: &CommandCtxt<'_>) -> Option<String> {
        Some(self.inner.logic().display_value(cx, &self.default))
    }

    async fn parse(
        &mut self,
        parser: Option<&mut StringParser>,
        cx: &CommandCtxt<'_>,
        named: Option<&[String]>,
    ) -> ConverterResult<ParseResult> {
        let result = self.inner.parse(parser, cx, named).await?;

        if result.converted() {
            self.parsed = Some(take_inner(&self.inner)?);
        }

        Ok(result)
    }

    async fn parse_option(&mut self, cx: &CommandCtxt<'_>, option: &CommandOptionValue) -> ConverterResult<bool> {
        let converted = self.inner.parse_option(cx, option).await?;

        if converted {
            self.parsed = Some(take_inner(&self.inner)?);
        }

        Ok(converted)
    }

    async fn validate(&self, cx: &CommandCtxt<'_>, argument: &str) -> ConverterResult<()> {
        self.inner.validate(cx, argument).await?;
        self.hooks.validate(cx, argument, self.current()).await
    }
}
