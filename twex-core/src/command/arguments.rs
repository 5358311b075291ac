use std::collections::HashSet;
use std::marker::PhantomData;
use std::ops::Deref;

use tracing::trace;

use super::converters::{Converter, ConverterKind, ParsedValue};
use super::errors::{ArgumentsError, ValueError};

/// One declared argument.
pub struct Argument {
    pub display_name: String,
    pub description: String,
    pub converter: Box<dyn Converter>,
}

impl Argument {
    pub fn new(display_name: impl Into<String>, description: impl Into<String>, converter: Box<dyn Converter>) -> Self {
        Self {
            display_name: display_name.into(),
            description: description.into(),
            converter,
        }
    }

    /// The name keyword arguments and slash command options are matched by.
    pub fn lookup_name(&self) -> String {
        self.display_name.to_lowercase()
    }
}

/// A typed handle to an argument, returned when declaring it.
pub struct ArgumentKey<C> {
    index: usize,
    _marker: PhantomData<fn() -> C>,
}

impl<C> ArgumentKey<C> {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<C> Clone for ArgumentKey<C> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<C> Copy for ArgumentKey<C> {}

impl<C> std::fmt::Debug for ArgumentKey<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentKey").field("index", &self.index).finish()
    }
}

/// The arguments of one command invocation, in declaration order.
///
/// Converters hold per-invocation state, so a fresh `Arguments` is declared for every
/// invocation.
#[derive(Default)]
pub struct Arguments {
    args: Vec<Argument>,
    parse_for_autocomplete: bool,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and validates the arguments of `A`.
    pub fn declare<A: CommandArguments>() -> Result<(A, Arguments), ArgumentsError> {
        let mut arguments = Arguments::new();
        let keys = A::declare(&mut arguments)?;
        arguments.validate()?;

        trace!("declared {} arguments", arguments.len());

        Ok((keys, arguments))
    }

    pub fn arg<C: Converter>(
        &mut self,
        display_name: impl Into<String>,
        description: impl Into<String>,
        converter: C,
    ) -> ArgumentKey<C> {
        self.args
            .push(Argument::new(display_name, description, Box::new(converter)));

        ArgumentKey {
            index: self.args.len() - 1,
            _marker: PhantomData,
        }
    }

    /// The converter behind `key`.
    pub fn converter<C: Converter>(&self, key: &ArgumentKey<C>) -> Result<&C, ValueError> {
        self.args
            .get(key.index)
            .and_then(|arg| arg.converter.as_any().downcast_ref::<C>())
            .ok_or(ValueError::Mismatched)
    }

    /// The parsed value behind `key`.
    pub fn get<C: Converter + ParsedValue>(&self, key: &ArgumentKey<C>) -> Result<C::Value, ValueError> {
        self.converter(key)?.value()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.args.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Argument> {
        self.args.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Whether earlier options are parsed before autocompleting a later one, so the autocomplete
    /// can depend on them.
    pub fn parse_for_autocomplete(&self) -> bool {
        self.parse_for_autocomplete
    }

    pub fn set_parse_for_autocomplete(&mut self, parse_for_autocomplete: bool) {
        self.parse_for_autocomplete = parse_for_autocomplete;
    }

    /// Checks names are unique (ignoring case) and no required argument follows an optional one.
    pub fn validate(&self) -> Result<(), ArgumentsError> {
        let mut names = HashSet::new();
        let mut first_optional: Option<&str> = None;

        for arg in &self.args {
            if !names.insert(arg.lookup_name()) {
                return Err(ArgumentsError::DuplicateName(arg.display_name.clone()));
            }

            match (arg.converter.required(), first_optional) {
                (true, Some(optional)) => {
                    return Err(ArgumentsError::RequiredAfterOptional {
                        required: arg.display_name.clone(),
                        optional: optional.to_owned(),
                    });
                },
                (false, None) => first_optional = Some(arg.display_name.as_str()),
                _ => {},
            }
        }

        Ok(())
    }

    /// Lists have no slash command option type.
    pub fn validate_for_slash(&self) -> Result<(), ArgumentsError> {
        match self.args.iter().find(|arg| arg.converter.kind() == ConverterKind::List) {
            Some(arg) => Err(ArgumentsError::ListInSlashCommand(arg.display_name.clone())),
            None => Ok(()),
        }
    }
}

/// A command's argument declaration.
///
/// Implementors are structs of [`ArgumentKey`]s:
///
/// ```ignore
/// struct Args {
///     count: ArgumentKey<SingleConverter<IntConverter>>,
/// }
///
/// impl CommandArguments for Args {
///     fn declare(args: &mut Arguments) -> Result<Self, ArgumentsError> {
///         Ok(Self {
///             count: args.arg("count", "how many", IntConverter::new().single()),
///         })
///     }
/// }
/// ```
pub trait CommandArguments: Sized + Send + 'static {
    fn declare(args: &mut Arguments) -> Result<Self, ArgumentsError>;
}

/// Parsed arguments, with the declaration's keys available through `Deref`.
pub struct ParsedArguments<A> {
    keys: A,
    arguments: Arguments,
}

impl<A> ParsedArguments<A> {
    pub(crate) fn new(keys: A, arguments: Arguments) -> Self {
        Self { keys, arguments }
    }

    pub fn get<C: Converter + ParsedValue>(&self, key: &ArgumentKey<C>) -> Result<C::Value, ValueError> {
        self.arguments.get(key)
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn into_inner(self) -> (A, Arguments) {
        (self.keys, self.arguments)
    }
}

impl<A> std::fmt::Debug for ParsedArguments<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedArguments")
            .field("arguments", &self.arguments.len())
            .finish_non_exhaustive()
    }
}

impl<A> Deref for ParsedArguments<A> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.keys
    }
}
