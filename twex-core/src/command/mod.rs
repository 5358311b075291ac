//! Command arguments.
//!
//! The key things that make up the argument system are:
//!
//! - The [`converters::Converter`] trait: a unit of conversion from raw input to one typed value.
//!   Converters come in a closed set of shapes ([`converters::ConverterKind`]): single, optional,
//!   defaulting, list and coalescing (the latter also in optional and defaulting forms).
//!
//!   Converter authors normally don't implement `Converter` directly. They implement
//!   [`converters::single::SingleParse`] or [`converters::coalescing::CoalescingParse`] and get
//!   every other shape for free through the `to_optional`, `to_defaulting` and `to_list` wrappers,
//!   which reuse the wrapped converter's parsing as-is.
//!
//! - [`arguments::Arguments`]: the ordered list of arguments for one command invocation, declared
//!   fresh every time by a [`arguments::CommandArguments`] implementation.
//!
//! - The parsers: [`parsers::chat::ChatCommandParser`] walks a tokenized message, and
//!   [`parsers::slash::SlashCommandParser`] walks the named options of an interaction. Both
//!   produce a [`arguments::ParsedArguments`] or a single user-facing error.

use std::fmt::Display;
use std::sync::Arc;

use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, UserMarker};

use crate::i18n::{DEFAULT_BUNDLE, TranslationsProvider};

pub mod arguments;
pub mod converters;
pub mod errors;
pub mod parsers;

/// Where the invocation came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    RawMessage,
    Interaction,
}

/// Everything known about a command invocation that converters might need.
pub struct CommandData {
    pub source: Source,
    pub command_name: String,
    pub locale: String,
    pub translations: Arc<dyn TranslationsProvider>,
    pub guild_id: Option<Id<GuildMarker>>,
    pub channel_id: Option<Id<ChannelMarker>>,
    pub author: Option<Id<UserMarker>>,
}

impl CommandData {
    pub fn new(source: Source, command_name: impl Into<String>, translations: Arc<dyn TranslationsProvider>) -> Self {
        let locale = translations.default_locale().to_owned();

        Self {
            source,
            command_name: command_name.into(),
            locale,
            translations,
            guild_id: None,
            channel_id: None,
            author: None,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_guild(mut self, guild_id: Id<GuildMarker>) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    pub fn with_channel(mut self, channel_id: Id<ChannelMarker>) -> Self {
        self.channel_id = Some(channel_id);
        self
    }

    pub fn with_author(mut self, author: Id<UserMarker>) -> Self {
        self.author = Some(author);
        self
    }
}

#[derive(Clone, Copy)]
pub struct CommandCtxt<'a> {
    pub data: &'a CommandData,
}

impl<'a> CommandCtxt<'a> {
    pub fn new(data: &'a CommandData) -> Self {
        Self { data }
    }

    pub fn locale(&self) -> &'a str {
        &self.data.locale
    }

    /// Translates a key of the built-in bundle.
    pub fn translate(&self, key: &str, replacements: &[&dyn Display]) -> String {
        self.translate_in(key, None, replacements)
    }

    /// Translates a key of `bundle`, or of the built-in bundle if `None`.
    pub fn translate_in(&self, key: &str, bundle: Option<&str>, replacements: &[&dyn Display]) -> String {
        self.data.translations.translate(
            key,
            bundle.unwrap_or(DEFAULT_BUNDLE),
            &self.data.locale,
            replacements,
        )
    }
}
