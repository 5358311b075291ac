use std::fmt::{Debug, Display};
use std::marker::PhantomData;

use async_trait::async_trait;
use twilight_model::application::command::{CommandOption, CommandOptionChoice, CommandOptionChoiceValue};
use twilight_model::application::interaction::application_command::CommandOptionValue;
use twilight_util::builder::command::StringBuilder;

use crate::command::CommandCtxt;
use crate::command::converters::single::SingleParse;
use crate::command::converters::{ConverterResult, SUGGESTION_LIMIT, get_autocomplete_suggestions};
use crate::command::errors::ConverterError;
use crate::i18n::keys;

/// A closed set of values, matched by their `Display` form.
pub trait ChoiceEnum: Clone + Debug + Display + Send + Sync + 'static {
    fn choices() -> &'static [Self];
}

/// One of the values of a [`ChoiceEnum`], matched case-insensitively.
///
/// Slash commands get the values as static choices, or as autocomplete suggestions when there are
/// more than Discord allows.
pub struct EnumConverter<E> {
    type_name: String,
    bundle: Option<String>,
    _marker: PhantomData<fn() -> E>,
}

impl<E: ChoiceEnum> EnumConverter<E> {
    /// `type_name` is the signature type: a translation key, or the text itself.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            bundle: None,
            _marker: PhantomData,
        }
    }

    /// Looks `type_name` up in `bundle` instead of the built-in one.
    pub fn with_bundle(mut self, bundle: impl Into<String>) -> Self {
        self.bundle = Some(bundle.into());
        self
    }

    fn find(token: &str) -> Option<E> {
        let token = token.to_lowercase();

        E::choices()
            .iter()
            .find(|choice| choice.to_string().to_lowercase() == token)
            .cloned()
    }

    fn names() -> Vec<String> {
        E::choices().iter().map(ToString::to_string).collect()
    }
}

#[async_trait]
impl<E: ChoiceEnum> SingleParse for EnumConverter<E> {
    type Output = E;

    fn signature_type(&self) -> &str {
        &self.type_name
    }

    fn bundle(&self) -> Option<&str> {
        self.bundle.as_deref()
    }

    async fn parse_token(&self, _cx: &CommandCtxt<'_>, token: &str) -> ConverterResult<Option<E>> {
        Ok(Self::find(token))
    }

    /// Autocompleted options can hold anything the user typed, so say what the choices are.
    async fn parse_option(&self, cx: &CommandCtxt<'_>, option: &CommandOptionValue) -> ConverterResult<Option<E>> {
        let CommandOptionValue::String(value) = option else {
            return Ok(None);
        };

        match Self::find(value) {
            Some(choice) => Ok(Some(choice)),
            None => {
                let names = Self::names().join(", ");
                Err(ConverterError::Relayed(
                    cx.translate(keys::CHOICE_INVALID, &[value, &names]),
                ))
            },
        }
    }

    fn slash_option(&self, name: &str, description: &str) -> CommandOption {
        let mut option = StringBuilder::new(name, description).required(true).build();
        let names = Self::names();

        if names.len() <= SUGGESTION_LIMIT {
            option.choices = Some(
                names
                    .into_iter()
                    .map(|name| CommandOptionChoice {
                        name: name.clone(),
                        name_localizations: None,
                        value: CommandOptionChoiceValue::String(name),
                    })
                    .collect(),
            );
        } else {
            option.autocomplete = Some(true);
        }

        option
    }

    fn autocomplete(&self, _cx: &CommandCtxt<'_>, current: &str) -> Vec<CommandOptionChoice> {
        get_autocomplete_suggestions(current, &Self::names())
    }
}
