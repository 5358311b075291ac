use std::any::Any;
use std::fmt::Display;

use async_trait::async_trait;
use twex_parser::StringParser;
use twilight_model::application::command::{CommandOption, CommandOptionChoice, CommandOptionChoiceValue};
use twilight_model::application::interaction::application_command::CommandOptionValue;

use super::CommandCtxt;
use super::errors::{ArgumentsError, ConverterError, ValueError};
use crate::i18n::keys;

pub mod coalescing;
pub mod impls;
pub mod list;
pub mod single;
pub mod wrappers;

pub type ConverterResult<T> = Result<T, ConverterError>;

/// Discord caps autocomplete responses and static choice lists at this many entries.
pub const SUGGESTION_LIMIT: usize = 25;

/// The closed set of converter shapes the parsers know how to drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConverterKind {
    /// Exactly one value, always required.
    Single,
    /// Zero or one value, `None` when absent.
    Optional,
    /// Zero or one value, a default when absent.
    Defaulting,
    /// Zero or more values from consecutive tokens.
    List,
    /// One value built from a run of tokens.
    Coalescing,
    OptionalCoalescing,
    DefaultingCoalescing,
}

impl ConverterKind {
    /// Whether a parse reports success as [`ParseResult::Single`].
    pub fn is_single_valued(self) -> bool {
        matches!(self, Self::Single | Self::Optional | Self::Defaulting)
    }

    /// Whether the validator runs even when nothing was parsed (against the fallback value).
    pub fn validates_fallback(self) -> bool {
        !matches!(self, Self::Single | Self::Coalescing)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Optional => "optional",
            Self::Defaulting => "defaulting",
            Self::List => "list",
            Self::Coalescing => "coalescing",
            Self::OptionalCoalescing => "optional coalescing",
            Self::DefaultingCoalescing => "defaulting coalescing",
        }
    }
}

impl Display for ConverterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of [`Converter::parse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// Single-valued shapes: whether the one value converted.
    Single(bool),
    /// List and coalescing shapes: how many input units were consumed. `0` means nothing converted.
    Multi(usize),
}

impl ParseResult {
    /// The "nothing converted" result for a shape.
    pub fn failed(kind: ConverterKind) -> Self {
        if kind.is_single_valued() {
            Self::Single(false)
        } else {
            Self::Multi(0)
        }
    }

    pub fn converted(self) -> bool {
        match self {
            Self::Single(ok) => ok,
            Self::Multi(n) => n > 0,
        }
    }

    pub fn consumed(self) -> usize {
        match self {
            Self::Single(ok) => usize::from(ok),
            Self::Multi(n) => n,
        }
    }
}

/// A converter, as the parsers see it.
///
/// Every converter is created fresh for one invocation (as part of an
/// [`Arguments`](super::arguments::Arguments)), parsed at most once, then dropped.
#[async_trait]
pub trait Converter: Send + Sync + 'static {
    fn kind(&self) -> ConverterKind;

    /// Whether failing to parse aborts the invocation.
    fn required(&self) -> bool;

    /// Surface parse errors even though the converter isn't required.
    fn output_error(&self) -> bool {
        false
    }

    fn parse_success(&self) -> bool;
    fn set_parse_success(&mut self, success: bool);

    /// Translation key describing the accepted input, shown in signatures.
    fn signature_type(&self) -> &str;

    /// Translation key used in errors instead of the signature type.
    fn error_type(&self) -> Option<&str> {
        None
    }

    fn show_type_in_signature(&self) -> bool {
        true
    }

    /// Bundle the type keys are looked up in. `None` is the built-in bundle.
    fn bundle(&self) -> Option<&str> {
        None
    }

    /// The fallback value, rendered for signatures in the context's locale.
    fn default_display(&self, _cx: &CommandCtxt<'_>) -> Option<String> {
        None
    }

    /// Converts positional input from `parser`, or the keyword values in `named` if given.
    ///
    /// Single-valued converters take exactly one named value. The converter stores what it
    /// parsed itself.
    async fn parse(
        &mut self,
        parser: Option<&mut StringParser>,
        cx: &CommandCtxt<'_>,
        named: Option<&[String]>,
    ) -> ConverterResult<ParseResult>;

    /// Converts a slash command option value.
    async fn parse_option(&mut self, cx: &CommandCtxt<'_>, option: &CommandOptionValue) -> ConverterResult<bool>;

    /// Runs the validator (if any) against the current value.
    async fn validate(&self, cx: &CommandCtxt<'_>, argument: &str) -> ConverterResult<()>;

    /// Relayed errors yield their reason. Anything else is handed back to be propagated.
    fn handle_error(&self, error: ConverterError, _cx: &CommandCtxt<'_>) -> anyhow::Result<String> {
        match error {
            ConverterError::Relayed(reason) => Ok(reason),
            ConverterError::Other(e) => Err(e),
        }
    }

    /// The error type (or signature type), translated.
    fn get_error_string(&self, cx: &CommandCtxt<'_>) -> String {
        let key = self.error_type().unwrap_or(self.signature_type());
        cx.translate_in(key, self.bundle(), &[])
    }

    /// The slash command option for an argument using this converter.
    fn to_slash_option(&self, name: &str, description: &str) -> Result<CommandOption, ArgumentsError>;

    /// Suggestions for a partially typed slash command option.
    fn autocomplete(&self, _cx: &CommandCtxt<'_>, _current: &str) -> Vec<CommandOptionChoice> {
        Vec::new()
    }

    fn as_any(&self) -> &dyn Any;
}

/// Read access to a converter's parsed value.
pub trait ParsedValue {
    type Value;

    fn value(&self) -> Result<Self::Value, ValueError>;
}

/// What a validator gets to look at.
pub struct ValidationCtxt<'a, V> {
    pub cx: &'a CommandCtxt<'a>,
    /// Display name of the argument being validated.
    pub argument: &'a str,
    pub value: &'a V,
}

impl<V> ValidationCtxt<'_, V> {
    /// Rejects the value with a user-facing message.
    pub fn fail(&self, message: impl Display) -> ConverterResult<()> {
        Err(ConverterError::Relayed(
            self.cx.translate(keys::CHECKS_RESPONSE_TEMPLATE, &[&message]),
        ))
    }

    pub fn fail_if(&self, condition: bool, message: impl Display) -> ConverterResult<()> {
        if condition { self.fail(message) } else { Ok(()) }
    }

    pub fn fail_if_not(&self, condition: bool, message: impl Display) -> ConverterResult<()> {
        self.fail_if(!condition, message)
    }
}

/// A post-parse check. Plain closures can be used through [`WithHooks::validator`]; implement
/// this for validators that need to await something.
#[async_trait]
pub trait Validate<V>: Send + Sync {
    async fn validate(&self, ctxt: ValidationCtxt<'_, V>) -> ConverterResult<()>;
}

struct FnValidator<F>(F);

#[async_trait]
impl<V, F> Validate<V> for FnValidator<F>
where
    V: Send + Sync + 'static,
    F: Fn(ValidationCtxt<'_, V>) -> ConverterResult<()> + Send + Sync + 'static,
{
    async fn validate(&self, ctxt: ValidationCtxt<'_, V>) -> ConverterResult<()> {
        (self.0)(ctxt)
    }
}

type Mutator<V> = Box<dyn Fn(V) -> V + Send + Sync>;

/// Per-converter user hooks: validator, mutator and display overrides.
pub struct ConverterHooks<V> {
    validator: Option<Box<dyn Validate<V>>>,
    mutator: Option<Mutator<V>>,
    pub(crate) signature_type: Option<String>,
    pub(crate) error_type: Option<String>,
    pub(crate) show_type_in_signature: Option<bool>,
}

impl<V> Default for ConverterHooks<V> {
    fn default() -> Self {
        Self {
            validator: None,
            mutator: None,
            signature_type: None,
            error_type: None,
            show_type_in_signature: None,
        }
    }
}

impl<V: Send + Sync + 'static> ConverterHooks<V> {
    pub async fn validate(&self, cx: &CommandCtxt<'_>, argument: &str, value: &V) -> ConverterResult<()> {
        match &self.validator {
            Some(validator) => validator.validate(ValidationCtxt { cx, argument, value }).await,
            None => Ok(()),
        }
    }

    /// Applies the mutator, if any, to a value being read.
    pub fn mutate(&self, value: V) -> V {
        match &self.mutator {
            Some(mutator) => mutator(value),
            None => value,
        }
    }
}

/// Builder methods shared by every converter.
pub trait WithHooks: Sized {
    type Value: Send + Sync + 'static;

    fn hooks_mut(&mut self) -> &mut ConverterHooks<Self::Value>;

    fn validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(ValidationCtxt<'_, Self::Value>) -> ConverterResult<()> + Send + Sync + 'static,
    {
        self.hooks_mut().validator = Some(Box::new(FnValidator(validator)));
        self
    }

    fn validate_with(mut self, validator: impl Validate<Self::Value> + 'static) -> Self {
        self.hooks_mut().validator = Some(Box::new(validator));
        self
    }

    /// Transforms the value whenever it is read.
    fn mutator(mut self, mutator: impl Fn(Self::Value) -> Self::Value + Send + Sync + 'static) -> Self {
        self.hooks_mut().mutator = Some(Box::new(mutator));
        self
    }

    fn with_signature_type(mut self, key: impl Into<String>) -> Self {
        self.hooks_mut().signature_type = Some(key.into());
        self
    }

    fn with_error_type(mut self, key: impl Into<String>) -> Self {
        self.hooks_mut().error_type = Some(key.into());
        self
    }

    fn with_show_type_in_signature(mut self, show: bool) -> Self {
        self.hooks_mut().show_type_in_signature = Some(show);
        self
    }
}

/// Case-insensitive prefix matches, as slash command choices.
pub fn get_autocomplete_suggestions(text_to_autocomplete: &str, options: &[String]) -> Vec<CommandOptionChoice> {
    let text = text_to_autocomplete.to_lowercase();

    options
        .iter()
        .filter(|x| x.to_lowercase().starts_with(&text))
        .take(SUGGESTION_LIMIT)
        .map(|x| CommandOptionChoice {
            name: x.clone(),
            name_localizations: None,
            value: CommandOptionChoiceValue::String(x.clone()),
        })
        .collect::<Vec<_>>()
}

/// Marks a built option as optional.
pub(crate) fn not_required(mut option: CommandOption) -> CommandOption {
    option.required = Some(false);
    option
}
