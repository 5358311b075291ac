//! Typed argument parsing for Discord bot commands.
//!
//! Commands declare their arguments once (see [`command::arguments::CommandArguments`]) and get
//! them parsed from either message text ([`command::parsers::chat::ChatCommandParser`]) or
//! slash command options ([`command::parsers::slash::SlashCommandParser`]).

pub mod command;
pub mod durations;
pub mod i18n;

pub use command::arguments::{ArgumentKey, Arguments, CommandArguments, ParsedArguments};
pub use command::errors::{ArgumentParsingError, ArgumentsError, ParseError};
pub use command::parsers::chat::ChatCommandParser;
pub use command::parsers::slash::{SlashCommandParser, slash_command_options};
pub use command::{CommandCtxt, CommandData, Source};
