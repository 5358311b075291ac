use std::any::Any;
use std::fmt::{Debug, Display};

use async_trait::async_trait;
use tracing::trace;
use twex_parser::StringParser;
use twilight_model::application::command::CommandOption;
use twilight_model::application::interaction::application_command::CommandOptionValue;
use twilight_util::builder::command::StringBuilder;

use super::wrappers::{CoalescingToDefaultingConverter, CoalescingToOptionalConverter};
use super::{Converter, ConverterHooks, ConverterKind, ConverterResult, ParseResult, ParsedValue, WithHooks};
use crate::command::CommandCtxt;
use crate::command::errors::{ArgumentsError, ConverterError, ValueError};

/// Conversion of a run of tokens into one value.
#[async_trait]
pub trait CoalescingParse: Send + Sync + 'static {
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

    fn supports(&self, _kind: ConverterKind) -> bool {
        true
    }

    /// Whether `token` may be part of a run at all. The run ends at the first token that isn't.
    fn accepts_token(&self, _cx: &CommandCtxt<'_>, _token: &str) -> bool {
        true
    }

    /// Converts a whole run. A relayed error means this run doesn't convert, and a shorter one
    /// will be tried.
    async fn convert(&self, cx: &CommandCtxt<'_>, tokens: &[String]) -> ConverterResult<Self::Output>;

    /// Checks the value a run converted to. Failures here are final.
    async fn check(&self, _cx: &CommandCtxt<'_>, _value: &Self::Output) -> ConverterResult<()> {
        Ok(())
    }

    /// String options are split on whitespace and converted as one run.
    async fn parse_option(
        &self,
        cx: &CommandCtxt<'_>,
        option: &CommandOptionValue,
    ) -> ConverterResult<Option<Self::Output>> {
        let CommandOptionValue::String(text) = option else {
            return Ok(None);
        };

        let tokens = text.split_whitespace().map(ToOwned::to_owned).collect::<Vec<_>>();
        if tokens.is_empty() {
            return Ok(None);
        }

        let value = self.convert(cx, &tokens).await?;
        self.check(cx, &value).await?;

        Ok(Some(value))
    }

    fn slash_option(&self, name: &str, description: &str) -> CommandOption {
        StringBuilder::new(name, description).required(true).build()
    }

    /// Renders a value for users, as in a signature's default.
    fn display_value(&self, _cx: &CommandCtxt<'_>, value: &Self::Output) -> String {
        value.to_string()
    }

    fn coalescing(self) -> CoalescingConverter<Self>
    where
        Self: Sized,
    {
        CoalescingConverter::new(self)
    }
}

/// A required converter consuming as long a run of tokens as converts.
///
/// Runs are tried longest first: every token the logic accepts is collected, then the whole run
/// is tried, then the run minus its last token, and so on. The first run that converts wins, and
/// only its tokens are consumed.
pub struct CoalescingConverter<C: CoalescingParse> {
    logic: C,
    parsed: Option<C::Output>,
    parse_success: bool,
    should_throw: bool,
    hooks: ConverterHooks<C::Output>,
}

impl<C: CoalescingParse> CoalescingConverter<C> {
    pub fn new(logic: C) -> Self {
        Self {
            logic,
            parsed: None,
            parse_success: false,
            should_throw: false,
            hooks: ConverterHooks::default(),
        }
    }

    pub fn logic(&self) -> &C {
        &self.logic
    }

    /// Return the error of the longest run instead of "nothing converted" when no run converts.
    pub fn with_should_throw(mut self, should_throw: bool) -> Self {
        self.should_throw = should_throw;
        self
    }

    pub(crate) fn set_should_throw(&mut self, should_throw: bool) {
        self.should_throw = should_throw;
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

    pub fn to_optional(self) -> Result<CoalescingToOptionalConverter<C>, ArgumentsError> {
        self.check_shape(ConverterKind::OptionalCoalescing)?;
        Ok(CoalescingToOptionalConverter::new(self))
    }

    pub fn to_defaulting(self, default: C::Output) -> Result<CoalescingToDefaultingConverter<C>, ArgumentsError> {
        self.check_shape(ConverterKind::DefaultingCoalescing)?;
        Ok(CoalescingToDefaultingConverter::new(self, default))
    }

    /// Finds the longest convertible prefix of `tokens` (or only tries all of them, if
    /// `whole_only`), returning its length and value.
    async fn longest_run(
        &self,
        cx: &CommandCtxt<'_>,
        tokens: &[String],
        whole_only: bool,
    ) -> ConverterResult<Option<(usize, C::Output)>> {
        if tokens.is_empty() {
            return Ok(None);
        }

        let shortest = if whole_only { tokens.len() } else { 1 };
        let mut longest_error = None;

        for len in (shortest..=tokens.len()).rev() {
            match self.logic.convert(cx, &tokens[..len]).await {
                Ok(value) => {
                    self.logic.check(cx, &value).await?;
                    return Ok(Some((len, value)));
                },
                Err(ConverterError::Relayed(reason)) => {
                    trace!("run of {len} tokens didn't convert: {reason}");
                    longest_error.get_or_insert(reason);
                },
                Err(e) => return Err(e),
            }
        }

        match longest_error {
            Some(reason) if self.should_throw => Err(ConverterError::Relayed(reason)),
            _ => Ok(None),
        }
    }
}

impl<C: CoalescingParse> WithHooks for CoalescingConverter<C> {
    type Value = C::Output;

    fn hooks_mut(&mut self) -> &mut ConverterHooks<C::Output> {
        &mut self.hooks
    }
}

impl<C: CoalescingParse> ParsedValue for CoalescingConverter<C> {
    type Value = C::Output;

    fn value(&self) -> Result<C::Output, ValueError> {
        self.parsed
            .clone()
            .map(|v| self.hooks.mutate(v))
            .ok_or(ValueError::NotParsed)
    }
}

#[async_trait]
impl<C: CoalescingParse> Converter for CoalescingConverter<C> {
    fn kind(&self) -> ConverterKind {
        ConverterKind::Coalescing
    }

    fn required(&self) -> bool {
        true
    }

    fn output_error(&self) -> bool {
        self.should_throw
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
        if let Some(values) = named {
            return match self.longest_run(cx, values, true).await? {
                Some((len, value)) => {
                    self.parsed = Some(value);
                    Ok(ParseResult::Multi(len))
                },
                None => Ok(ParseResult::Multi(0)),
            };
        }

        let Some(parser) = parser else {
            return Ok(ParseResult::Multi(0));
        };

        let mut candidates = Vec::new();
        let mut lookahead = parser.clone();

        while let Some(token) = lookahead.parse_next() {
            if !self.logic.accepts_token(cx, &token.data) {
                break;
            }

            candidates.push(token.data);
        }

        match self.longest_run(cx, &candidates, false).await? {
            Some((len, value)) => {
                for _ in 0..len {
                    parser.parse_next();
                }

                self.parsed = Some(value);
                Ok(ParseResult::Multi(len))
            },
            None => Ok(ParseResult::Multi(0)),
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

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Display;

    use twex_parser::StringParser;

    use super::*;
    use crate::command::test_util::command_data;
    use crate::command::{CommandCtxt, Source};

    /// Sums a run of digits, but only runs of even length convert.
    struct EvenRunSum;

    #[derive(Clone, Debug, PartialEq)]
    struct Sum(u32);

    impl Display for Sum {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    #[async_trait]
    impl CoalescingParse for EvenRunSum {
        type Output = Sum;

        fn signature_type(&self) -> &str {
            "even run"
        }

        fn accepts_token(&self, _cx: &CommandCtxt<'_>, token: &str) -> bool {
            token.chars().all(|c| c.is_ascii_digit())
        }

        async fn convert(&self, _cx: &CommandCtxt<'_>, tokens: &[String]) -> ConverterResult<Sum> {
            if tokens.len() % 2 != 0 {
                return Err(ConverterError::relayed(format!("odd run of {}", tokens.len())));
            }

            Ok(Sum(tokens.iter().map(|t| t.parse::<u32>().unwrap_or(0)).sum()))
        }
    }

    #[tokio::test]
    async fn longest_run_first_then_backs_off() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);
        let mut parser = StringParser::new("1 2 3 word");
        let mut converter = EvenRunSum.coalescing();

        let result = converter.parse(Some(&mut parser), &cx, None).await.unwrap();

        assert_eq!(result, ParseResult::Multi(2));
        assert_eq!(converter.value().unwrap(), Sum(3));
        assert_eq!(parser.peek_remaining(), "3 word");
    }

    #[tokio::test]
    async fn nothing_converts_consumes_nothing() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);
        let mut parser = StringParser::new("5 word");
        let mut converter = EvenRunSum.coalescing();

        let result = converter.parse(Some(&mut parser), &cx, None).await.unwrap();

        assert_eq!(result, ParseResult::Multi(0));
        assert_eq!(parser.peek_remaining(), "5 word");
        assert_eq!(converter.value(), Err(ValueError::NotParsed));
    }

    #[tokio::test]
    async fn should_throw_surfaces_longest_error() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);
        let mut parser = StringParser::new("5 6 7");
        let mut converter = EvenRunSum.coalescing().with_should_throw(true);

        // "5 6" converts, so backing off succeeds before any error matters
        assert_eq!(
            converter.parse(Some(&mut parser), &cx, None).await.unwrap(),
            ParseResult::Multi(2)
        );

        let mut parser = StringParser::new("5");
        let mut converter = EvenRunSum.coalescing().with_should_throw(true);
        let error = converter.parse(Some(&mut parser), &cx, None).await.unwrap_err();

        assert_eq!(error.to_string(), "odd run of 1");
    }

    #[tokio::test]
    async fn named_values_convert_as_a_whole() {
        let data = command_data(Source::RawMessage);
        let cx = CommandCtxt::new(&data);
        let mut converter = EvenRunSum.coalescing();

        let named = ["1", "2", "3"].map(String::from);
        assert_eq!(
            converter.parse(None, &cx, Some(&named)).await.unwrap(),
            ParseResult::Multi(0)
        );

        let named = ["1", "2", "3", "4"].map(String::from);
        assert_eq!(
            converter.parse(None, &cx, Some(&named)).await.unwrap(),
            ParseResult::Multi(4)
        );
        assert_eq!(converter.value().unwrap(), Sum(10));
    }

    #[tokio::test]
    async fn slash_option_splits_on_whitespace() {
        let data = command_data(Source::Interaction);
        let cx = CommandCtxt::new(&data);
        let mut converter = EvenRunSum.coalescing();

        let option = CommandOptionValue::String("4 6".to_owned());
        assert!(converter.parse_option(&cx, &option).await.unwrap());
        assert_eq!(converter.value().unwrap(), Sum(10));
    }
}
