use std::collections::HashMap;

use tracing::{debug, trace};
use twilight_model::application::command::{CommandOption, CommandOptionChoice};
use twilight_model::application::interaction::application_command::{CommandDataOption, CommandOptionValue};

use super::{argument_error, handled_reason, invalid_value, unexpected, validate};
use crate::command::CommandCtxt;
use crate::command::arguments::{Argument, Arguments, CommandArguments, ParsedArguments};
use crate::command::converters::ConverterKind;
use crate::command::errors::{ArgumentsError, ConverterError, ParseError};

/// Option values by lowercased name. String values are trimmed.
fn option_values(options: &[CommandDataOption]) -> HashMap<String, CommandOptionValue> {
    options
        .iter()
        .map(|option| {
            let value = match &option.value {
                CommandOptionValue::String(value) => CommandOptionValue::String(value.trim().to_owned()),
                other => other.clone(),
            };

            (option.name.to_lowercase(), value)
        })
        .collect()
}

/// The focused option's name and what has been typed into it so far.
fn focused(options: &[CommandDataOption]) -> Option<(String, &str)> {
    options.iter().find_map(|option| match &option.value {
        CommandOptionValue::Focused(current, _) => Some((option.name.to_lowercase(), current.as_str())),
        _ => None,
    })
}

/// Parses the options of an application command interaction into arguments.
pub struct SlashCommandParser;

impl SlashCommandParser {
    pub async fn parse<A: CommandArguments>(
        cx: &CommandCtxt<'_>,
        options: &[CommandDataOption],
    ) -> Result<ParsedArguments<A>, ParseError> {
        let (keys, mut arguments) = Arguments::declare::<A>()?;
        Self::parse_arguments(cx, &mut arguments, options).await?;

        Ok(ParsedArguments::new(keys, arguments))
    }

    pub async fn parse_arguments(
        cx: &CommandCtxt<'_>,
        arguments: &mut Arguments,
        options: &[CommandDataOption],
    ) -> Result<(), ParseError> {
        arguments.validate()?;
        arguments.validate_for_slash()?;

        let values = option_values(options);

        for argument in arguments.iter_mut() {
            let value = values.get(&argument.lookup_name());
            trace!("filling argument {} from {value:?}", argument.display_name);

            Self::fill(cx, argument, value).await?;
        }

        Ok(())
    }

    async fn fill(
        cx: &CommandCtxt<'_>,
        argument: &mut Argument,
        value: Option<&CommandOptionValue>,
    ) -> Result<(), ParseError> {
        let kind = argument.converter.kind();
        let required = argument.converter.required();

        let surface_errors = match kind {
            ConverterKind::Single | ConverterKind::Coalescing => required,
            _ => required || argument.converter.output_error(),
        };

        let parsed = match value {
            Some(value) => match argument.converter.parse_option(cx, value).await {
                Ok(parsed) => parsed,
                Err(ConverterError::Other(e)) => return Err(unexpected(argument, e)),
                Err(error) if surface_errors => {
                    let reason = handled_reason(cx, argument, error)?;
                    return Err(argument_error(argument, reason));
                },
                Err(error) => {
                    debug!("ignoring error in option {}: {error}", argument.display_name);
                    false
                },
            },
            None => false,
        };

        match kind {
            ConverterKind::Single | ConverterKind::Coalescing => {
                if required && !parsed {
                    return Err(invalid_value(cx, argument));
                }

                if parsed {
                    argument.converter.set_parse_success(true);
                    validate(cx, argument).await?;
                }
            },
            ConverterKind::Optional
            | ConverterKind::Defaulting
            | ConverterKind::List
            | ConverterKind::OptionalCoalescing
            | ConverterKind::DefaultingCoalescing => {
                if parsed {
                    argument.converter.set_parse_success(true);
                }

                validate(cx, argument).await?;
            },
        }

        Ok(())
    }

    /// Declares `A` for an autocomplete interaction.
    ///
    /// If the arguments opted in with [`Arguments::set_parse_for_autocomplete`], the options
    /// before the focused one are filled on a best-effort basis: values that don't convert are
    /// left unset and validators don't run.
    pub async fn parse_for_autocomplete<A: CommandArguments>(
        cx: &CommandCtxt<'_>,
        options: &[CommandDataOption],
    ) -> Result<ParsedArguments<A>, ParseError> {
        let (keys, mut arguments) = Arguments::declare::<A>()?;

        if arguments.parse_for_autocomplete() {
            Self::fill_for_autocomplete(cx, &mut arguments, options).await?;
        }

        Ok(ParsedArguments::new(keys, arguments))
    }

    async fn fill_for_autocomplete(
        cx: &CommandCtxt<'_>,
        arguments: &mut Arguments,
        options: &[CommandDataOption],
    ) -> Result<(), ParseError> {
        arguments.validate_for_slash()?;

        let values = option_values(options);

        for argument in arguments.iter_mut() {
            let Some(value) = values.get(&argument.lookup_name()) else {
                continue;
            };

            if matches!(value, CommandOptionValue::Focused(..)) {
                break;
            }

            match argument.converter.parse_option(cx, value).await {
                Ok(parsed) => argument.converter.set_parse_success(parsed),
                Err(ConverterError::Relayed(reason)) => {
                    trace!("skipping option {} while autocompleting: {reason}", argument.display_name);
                },
                Err(ConverterError::Other(e)) => return Err(unexpected(argument, e)),
            }
        }

        Ok(())
    }

    /// Suggestions for the focused option, from its converter.
    pub async fn autocomplete<A: CommandArguments>(
        cx: &CommandCtxt<'_>,
        options: &[CommandDataOption],
    ) -> Result<Vec<CommandOptionChoice>, ParseError> {
        let Some((name, current)) = focused(options) else {
            return Ok(Vec::new());
        };

        let parsed = Self::parse_for_autocomplete::<A>(cx, options).await?;

        Ok(parsed
            .arguments()
            .iter()
            .find(|argument| argument.lookup_name() == name)
            .map(|argument| argument.converter.autocomplete(cx, current))
            .unwrap_or_default())
    }
}

/// The options to register for a command taking `A`.
pub fn slash_command_options<A: CommandArguments>() -> Result<Vec<CommandOption>, ArgumentsError> {
    let (_, arguments) = Arguments::declare::<A>()?;
    arguments.validate_for_slash()?;

    arguments
        .iter()
        .map(|argument| {
            argument
                .converter
                .to_slash_option(&argument.lookup_name(), &argument.description)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fmt::Display;

    use twilight_model::application::command::{CommandOptionChoiceValue, CommandOptionType};

    use super::*;
    use crate::command::arguments::ArgumentKey;
    use crate::command::converters::coalescing::{CoalescingConverter, CoalescingParse};
    use crate::command::converters::impls::{
        ChoiceEnum, CoalescingStringConverter, EnumConverter, IntConverter, StringConverter,
    };
    use crate::command::converters::list::SingleToListConverter;
    use crate::command::converters::single::{SingleConverter, SingleParse};
    use crate::command::converters::wrappers::{SingleToDefaultingConverter, SingleToOptionalConverter};
    use crate::command::errors::{ArgumentParsingError, ValueError};
    use crate::command::parsers::chat::ChatCommandParser;
    use crate::command::test_util::command_data;
    use crate::command::{CommandCtxt, Source};

    fn option(name: &str, value: CommandOptionValue) -> CommandDataOption {
        CommandDataOption {
            name: name.to_owned(),
            value,
        }
    }

    fn reason(error: ParseError) -> ArgumentParsingError {
        match error {
            ParseError::Argument(e) => e,
            other => panic!("expected a user-facing error, got {other:?}"),
        }
    }

    struct CountAndName {
        count: ArgumentKey<SingleConverter<IntConverter>>,
        name: ArgumentKey<SingleConverter<StringConverter>>,
    }

    impl CommandArguments for CountAndName {
        fn declare(args: &mut Arguments) -> Result<Self, ArgumentsError> {
            Ok(Self {
                count: args.arg("count", "how many", IntConverter::new().single()),
                name: args.arg("Name", "what of", StringConverter::new().single()),
            })
        }
    }

    #[tokio::test]
    async fn slash_and_chat_agree() {
        let data = command_data(Source::Interaction);
        let cx = CommandCtxt::new(&data);

        let options = [
            option("count", CommandOptionValue::Integer(3)),
            option("name", CommandOptionValue::String("  red ".to_owned())),
        ];
        let slash = SlashCommandParser::parse::<CountAndName>(&cx, &options).await.unwrap();
        let chat = ChatCommandParser::new(true)
            .parse::<CountAndName>(&cx, "3 red")
            .await
            .unwrap();

        assert_eq!(slash.get(&slash.count), chat.get(&chat.count));
        assert_eq!(slash.get(&slash.name), chat.get(&chat.name));
        assert_eq!(slash.get(&slash.name).unwrap(), "red");
    }

    #[tokio::test]
    async fn missing_required_option() {
        let data = command_data(Source::Interaction);
        let cx = CommandCtxt::new(&data);

        let options = [option("count", CommandOptionValue::Integer(3))];
        let error = reason(SlashCommandParser::parse::<CountAndName>(&cx, &options).await.unwrap_err());

        assert_eq!(error.reason, "Invalid value for argument `Name` (which accepts: text)");
        assert_eq!(error.argument.as_deref(), Some("Name"));
    }

    #[tokio::test]
    async fn required_option_errors_are_shown_as_is() {
        let data = command_data(Source::Interaction);
        let cx = CommandCtxt::new(&data);

        let options = [
            option("count", CommandOptionValue::String("lots".to_owned())),
            option("name", CommandOptionValue::String("red".to_owned())),
        ];
        let error = reason(SlashCommandParser::parse::<CountAndName>(&cx, &options).await.unwrap_err());

        assert_eq!(error.reason, "`lots` is not a valid integer.");
        assert_eq!(error.argument.as_deref(), Some("count"));
    }

    struct Counts {
        count: ArgumentKey<SingleToOptionalConverter<IntConverter>>,
        fallback: ArgumentKey<SingleToDefaultingConverter<IntConverter>>,
    }

    impl CommandArguments for Counts {
        fn declare(args: &mut Arguments) -> Result<Self, ArgumentsError> {
            Ok(Self {
                count: args.arg("count", "", IntConverter::new().single().to_optional()?),
                fallback: args.arg("fallback", "", IntConverter::new().single().to_defaulting(0)?),
            })
        }
    }

    #[tokio::test]
    async fn optional_and_defaulting_options() {
        let data = command_data(Source::Interaction);
        let cx = CommandCtxt::new(&data);

        let parsed = SlashCommandParser::parse::<Counts>(&cx, &[]).await.unwrap();
        assert_eq!(parsed.get(&parsed.count), Ok(None));
        assert_eq!(parsed.get(&parsed.fallback), Ok(0));

        let options = [option("COUNT", CommandOptionValue::Integer(5))];
        let parsed = SlashCommandParser::parse::<Counts>(&cx, &options).await.unwrap();
        assert_eq!(parsed.get(&parsed.count), Ok(Some(5)));
        assert_eq!(parsed.get(&parsed.fallback), Ok(0));
    }

    #[tokio::test]
    async fn optional_option_errors_are_ignored() {
        let data = command_data(Source::Interaction);
        let cx = CommandCtxt::new(&data);

        let options = [option("count", CommandOptionValue::String("lots".to_owned()))];
        let parsed = SlashCommandParser::parse::<Counts>(&cx, &options).await.unwrap();

        assert_eq!(parsed.get(&parsed.count), Ok(None));
    }

    struct LoudCounts {
        count: ArgumentKey<SingleToOptionalConverter<IntConverter>>,
        fallback: ArgumentKey<SingleToDefaultingConverter<IntConverter>>,
    }

    impl CommandArguments for LoudCounts {
        fn declare(args: &mut Arguments) -> Result<Self, ArgumentsError> {
            Ok(Self {
                count: args.arg(
                    "count",
                    "",
                    IntConverter::new().single().to_optional()?.with_output_error(true),
                ),
                fallback: args.arg(
                    "fallback",
                    "",
                    IntConverter::new().single().to_defaulting(0)?.with_output_error(true),
                ),
            })
        }
    }

    #[tokio::test]
    async fn output_error_surfaces_optional_option_errors() {
        let data = command_data(Source::Interaction);
        let cx = CommandCtxt::new(&data);

        let options = [option("count", CommandOptionValue::String("lots".to_owned()))];
        let error = reason(SlashCommandParser::parse::<LoudCounts>(&cx, &options).await.unwrap_err());
        assert_eq!(error.reason, "`lots` is not a valid integer.");
        assert_eq!(error.argument.as_deref(), Some("count"));

        let options = [option("fallback", CommandOptionValue::String("heaps".to_owned()))];
        let error = reason(SlashCommandParser::parse::<LoudCounts>(&cx, &options).await.unwrap_err());
        assert_eq!(error.reason, "`heaps` is not a valid integer.");
        assert_eq!(error.argument.as_deref(), Some("fallback"));

        let options = [
            option("count", CommandOptionValue::Integer(2)),
            option("fallback", CommandOptionValue::Integer(4)),
        ];
        let parsed = SlashCommandParser::parse::<LoudCounts>(&cx, &options).await.unwrap();
        assert_eq!(parsed.get(&parsed.count), Ok(Some(2)));
        assert_eq!(parsed.get(&parsed.fallback), Ok(4));
    }

    struct Note {
        text: ArgumentKey<CoalescingConverter<CoalescingStringConverter>>,
    }

    impl CommandArguments for Note {
        fn declare(args: &mut Arguments) -> Result<Self, ArgumentsError> {
            Ok(Self {
                text: args.arg("text", "", CoalescingStringConverter::new().coalescing()),
            })
        }
    }

    #[tokio::test]
    async fn text_options_keep_inner_whitespace() {
        let data = command_data(Source::Interaction);
        let cx = CommandCtxt::new(&data);

        let options = [option("text", CommandOptionValue::String("  a  b\n\n  c ".to_owned()))];
        let parsed = SlashCommandParser::parse::<Note>(&cx, &options).await.unwrap();

        assert_eq!(parsed.get(&parsed.text).unwrap(), "a  b\n\n  c");
    }

    struct Numbers {
        _numbers: ArgumentKey<SingleToListConverter<IntConverter>>,
    }

    impl CommandArguments for Numbers {
        fn declare(args: &mut Arguments) -> Result<Self, ArgumentsError> {
            Ok(Self {
                _numbers: args.arg("numbers", "", IntConverter::new().single().to_list(true)?),
            })
        }
    }

    #[tokio::test]
    async fn lists_are_rejected() {
        let data = command_data(Source::Interaction);
        let cx = CommandCtxt::new(&data);

        let error = SlashCommandParser::parse::<Numbers>(&cx, &[]).await.unwrap_err();
        assert!(matches!(
            error,
            ParseError::InvalidArguments(ArgumentsError::ListInSlashCommand(_))
        ));

        assert_eq!(
            slash_command_options::<Numbers>().unwrap_err(),
            ArgumentsError::ListInSlashCommand("numbers".to_owned())
        );
    }

    #[test]
    fn option_schema() {
        let options = slash_command_options::<Counts>().unwrap();

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].name, "count");
        assert_eq!(options[0].kind, CommandOptionType::Integer);
        assert_eq!(options[0].required, Some(false));
        assert_eq!(options[1].name, "fallback");

        let options = slash_command_options::<CountAndName>().unwrap();
        assert_eq!(options[1].name, "name");
        assert_eq!(options[1].description, "what of");
        assert_eq!(options[1].required, Some(true));
    }

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Colour {
        Red,
        Green,
        Grey,
    }

    impl Display for Colour {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(match self {
                Self::Red => "red",
                Self::Green => "green",
                Self::Grey => "grey",
            })
        }
    }

    impl ChoiceEnum for Colour {
        fn choices() -> &'static [Self] {
            &[Self::Red, Self::Green, Self::Grey]
        }
    }

    struct Paint {
        count: ArgumentKey<SingleConverter<IntConverter>>,
        colour: ArgumentKey<SingleConverter<EnumConverter<Colour>>>,
    }

    impl CommandArguments for Paint {
        fn declare(args: &mut Arguments) -> Result<Self, ArgumentsError> {
            args.set_parse_for_autocomplete(true);

            Ok(Self {
                count: args.arg("count", "", IntConverter::new().single()),
                colour: args.arg("colour", "", EnumConverter::<Colour>::new("colour").single()),
            })
        }
    }

    #[tokio::test]
    async fn autocomplete_the_focused_option() {
        let data = command_data(Source::Interaction);
        let cx = CommandCtxt::new(&data);

        let options = [
            option("count", CommandOptionValue::Integer(2)),
            option(
                "colour",
                CommandOptionValue::Focused("gr".to_owned(), CommandOptionType::String),
            ),
        ];

        let choices = SlashCommandParser::autocomplete::<Paint>(&cx, &options).await.unwrap();
        let values = choices.into_iter().map(|c| c.value).collect::<Vec<_>>();
        assert_eq!(
            values,
            vec![
                CommandOptionChoiceValue::String("green".to_owned()),
                CommandOptionChoiceValue::String("grey".to_owned()),
            ]
        );

        let parsed = SlashCommandParser::parse_for_autocomplete::<Paint>(&cx, &options)
            .await
            .unwrap();
        assert_eq!(parsed.get(&parsed.count), Ok(2));
        assert_eq!(parsed.get(&parsed.colour), Err(ValueError::NotParsed));
    }

    #[tokio::test]
    async fn autocomplete_fills_nothing_unless_asked() {
        let data = command_data(Source::Interaction);
        let cx = CommandCtxt::new(&data);

        let options = [
            option("count", CommandOptionValue::Integer(2)),
            option("name", CommandOptionValue::Focused(String::new(), CommandOptionType::String)),
        ];

        let parsed = SlashCommandParser::parse_for_autocomplete::<CountAndName>(&cx, &options)
            .await
            .unwrap();
        assert_eq!(parsed.get(&parsed.count), Err(ValueError::NotParsed));

        let choices = SlashCommandParser::autocomplete::<CountAndName>(&cx, &options)
            .await
            .unwrap();
        assert!(choices.is_empty());
    }
}
