use std::collections::HashMap;

use tracing::{debug, trace};
use twex_common::config::CONFIG;
use twex_parser::StringParser;

use super::{argument_error, handled_reason, invalid_value, unexpected, validate};
use crate::command::CommandCtxt;
use crate::command::arguments::{Argument, Arguments, CommandArguments, ParsedArguments};
use crate::command::converters::{ConverterKind, ParseResult};
use crate::command::errors::{ArgumentParsingError, ArgumentsError, ConverterError, ParseError};
use crate::i18n::keys;

/// Parses message content into arguments.
///
/// Arguments take positional tokens in declaration order. With keyword arguments enabled,
/// `name=value` and `--name value` pairs anywhere in the input are given to the argument with
/// that (case-insensitive) name instead. Tokens left over at the end are ignored.
pub struct ChatCommandParser {
    allow_keyword_arguments: bool,
}

impl Default for ChatCommandParser {
    fn default() -> Self {
        Self::new(CONFIG.parser.allow_keyword_arguments)
    }
}

impl ChatCommandParser {
    pub fn new(allow_keyword_arguments: bool) -> Self {
        Self {
            allow_keyword_arguments,
        }
    }

    pub async fn parse<A: CommandArguments>(
        &self,
        cx: &CommandCtxt<'_>,
        input: &str,
    ) -> Result<ParsedArguments<A>, ParseError> {
        let mut parser = StringParser::new(input);
        self.parse_with_parser(cx, &mut parser).await
    }

    pub async fn parse_with_parser<A: CommandArguments>(
        &self,
        cx: &CommandCtxt<'_>,
        parser: &mut StringParser,
    ) -> Result<ParsedArguments<A>, ParseError> {
        let (keys, mut arguments) = Arguments::declare::<A>()?;
        self.parse_arguments(cx, &mut arguments, parser).await?;

        Ok(ParsedArguments::new(keys, arguments))
    }

    /// Fills `arguments` from `parser`, leaving unused trailing tokens in the parser.
    pub async fn parse_arguments(
        &self,
        cx: &CommandCtxt<'_>,
        arguments: &mut Arguments,
        parser: &mut StringParser,
    ) -> Result<(), ParseError> {
        arguments.validate()?;

        let mut keyword_args: HashMap<String, Vec<String>> = HashMap::new();
        if self.allow_keyword_arguments {
            for token in parser.parse_named() {
                keyword_args.entry(token.name.to_lowercase()).or_default().push(token.data);
            }
        }

        for argument in arguments.iter_mut() {
            let named = keyword_args.get(&argument.lookup_name()).map(Vec::as_slice);

            if !parser.has_next() && named.is_none() {
                trace!("no input left for argument {}", argument.display_name);

                if argument.converter.kind().validates_fallback() {
                    validate(cx, argument).await?;
                }

                continue;
            }

            let result = Self::parse_argument(cx, argument, parser, named).await?;
            trace!("argument {} parsed: {result:?}", argument.display_name);

            Self::check_result(cx, argument, result, named).await?;
        }

        let required = arguments.iter().filter(|a| a.converter.required()).count();
        let filled = arguments
            .iter()
            .filter(|a| a.converter.required() && a.converter.parse_success())
            .count();

        if filled < required {
            let reason = if filled == 0 {
                cx.translate(keys::NO_FILLED_ARGUMENTS, &[&required])
            } else {
                cx.translate(keys::SOME_FILLED_ARGUMENTS, &[&required, &filled])
            };

            return Err(ArgumentParsingError::new(reason, None).into());
        }

        Ok(())
    }

    /// Runs the converter on a fork of `parser`, committing the fork only if something converted.
    async fn parse_argument(
        cx: &CommandCtxt<'_>,
        argument: &mut Argument,
        parser: &mut StringParser,
        named: Option<&[String]>,
    ) -> Result<ParseResult, ParseError> {
        let kind = argument.converter.kind();

        if let Some(values) = named.filter(|values| kind.is_single_valued() && values.len() != 1) {
            let reason = cx.translate(keys::REQUIRES_ONE_VALUE, &[&argument.display_name, &values.len()]);
            return Err(argument_error(argument, reason));
        }

        let mut fork = parser.clone();
        let outcome = match named {
            Some(_) => argument.converter.parse(None, cx, named).await,
            None => argument.converter.parse(Some(&mut fork), cx, None).await,
        };

        match outcome {
            Ok(result) => {
                if named.is_none() && result.converted() {
                    *parser = fork;
                }

                Ok(result)
            },
            Err(ConverterError::Other(e)) => Err(unexpected(argument, e)),
            Err(error) if Self::should_relay(argument, named.is_some()) => {
                let reason = handled_reason(cx, argument, error)?;
                let reason = cx.translate(keys::ERROR_IN_ARGUMENT, &[&argument.display_name, &reason]);

                Err(argument_error(argument, reason))
            },
            Err(error) => {
                debug!("ignoring error in argument {}: {error}", argument.display_name);
                Ok(ParseResult::failed(kind))
            },
        }
    }

    /// Whether a relayed converter error is shown to the user rather than treated as "absent".
    fn should_relay(argument: &Argument, has_keyword_values: bool) -> bool {
        let converter = &argument.converter;

        match converter.kind() {
            ConverterKind::Single => true,
            ConverterKind::Optional
            | ConverterKind::Defaulting
            | ConverterKind::OptionalCoalescing
            | ConverterKind::DefaultingCoalescing => {
                converter.required() || converter.output_error() || has_keyword_values
            },
            ConverterKind::List | ConverterKind::Coalescing => converter.required(),
        }
    }

    async fn check_result(
        cx: &CommandCtxt<'_>,
        argument: &mut Argument,
        result: ParseResult,
        named: Option<&[String]>,
    ) -> Result<(), ParseError> {
        let kind = argument.converter.kind();
        let must_convert = argument.converter.required() || named.is_some();

        match kind {
            ConverterKind::Single => {
                if must_convert && !result.converted() {
                    return Err(invalid_value(cx, argument));
                }

                if result.converted() {
                    argument.converter.set_parse_success(true);
                    validate(cx, argument).await?;
                }
            },

            ConverterKind::Optional | ConverterKind::Defaulting => {
                if result.converted() {
                    argument.converter.set_parse_success(true);
                }

                validate(cx, argument).await?;
            },

            ConverterKind::List
            | ConverterKind::Coalescing
            | ConverterKind::OptionalCoalescing
            | ConverterKind::DefaultingCoalescing => {
                let consumed = result.consumed();

                if must_convert && consumed < 1 {
                    return Err(invalid_value(cx, argument));
                }

                match named {
                    Some(values) if consumed < values.len() => {
                        let converter = &argument.converter;
                        let accepts = cx.translate_in(converter.signature_type(), converter.bundle(), &[]);
                        let reason = cx.translate(
                            keys::NOT_ALL_VALID,
                            &[&argument.display_name, &values.len(), &consumed, &accepts],
                        );

                        return Err(argument_error(argument, reason));
                    },
                    Some(_) => argument.converter.set_parse_success(true),
                    None if consumed > 0 => argument.converter.set_parse_success(true),
                    None => {},
                }

                if kind != ConverterKind::Coalescing || argument.converter.parse_success() {
                    validate(cx, argument).await?;
                }
            },
        }

        Ok(())
    }

    /// The usage line for `A`, like `<name: text> [count: number=1]`.
    pub fn signature<A: CommandArguments>(cx: &CommandCtxt<'_>) -> Result<String, ArgumentsError> {
        let (_, arguments) = Arguments::declare::<A>()?;
        Ok(Self::signature_of(cx, &arguments))
    }

    pub fn signature_of(cx: &CommandCtxt<'_>, arguments: &Arguments) -> String {
        arguments
            .iter()
            .map(|argument| {
                let converter = &argument.converter;
                let (open, close) = if converter.required() { ('<', '>') } else { ('[', ']') };

                let mut part = format!("{open}{}", argument.display_name);

                if converter.show_type_in_signature() {
                    part.push_str(": ");
                    part.push_str(&cx.translate_in(converter.signature_type(), converter.bundle(), &[]));

                    if let Some(default) = converter.default_display(cx) {
                        part.push('=');
                        part.push_str(&default);
                    }
                }

                if converter.kind() == ConverterKind::List {
                    part.push_str("...");
                }

                part.push(close);
                part
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
