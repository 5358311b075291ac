//! Turning raw input into parsed [`Arguments`](super::arguments::Arguments).

use tracing::warn;

use super::CommandCtxt;
use super::arguments::Argument;
use super::errors::{ArgumentParsingError, ConverterError, ParseError};
use crate::i18n::keys;

pub mod chat;
pub mod slash;

/// Logs and wraps an unexpected converter error.
fn unexpected(argument: &Argument, error: anyhow::Error) -> ParseError {
    warn!("Unexpected error in argument {}: {error:?}", argument.display_name);
    ParseError::Converter(error)
}

fn argument_error(argument: &Argument, reason: String) -> ParseError {
    ArgumentParsingError::new(reason, Some(&argument.display_name)).into()
}

/// "Invalid value for argument ..., which accepts ...".
fn invalid_value(cx: &CommandCtxt<'_>, argument: &Argument) -> ParseError {
    let accepts = argument.converter.get_error_string(cx);
    let reason = cx.translate(keys::INVALID_VALUE, &[&argument.display_name, &accepts]);

    argument_error(argument, reason)
}

/// The converter's own message for a relayed error, or the unexpected error it turned out to be.
fn handled_reason(cx: &CommandCtxt<'_>, argument: &Argument, error: ConverterError) -> Result<String, ParseError> {
    argument
        .converter
        .handle_error(error, cx)
        .map_err(|e| unexpected(argument, e))
}

/// Runs the argument's validator. Validator messages are shown as they are.
async fn validate(cx: &CommandCtxt<'_>, argument: &Argument) -> Result<(), ParseError> {
    match argument.converter.validate(cx, &argument.display_name).await {
        Ok(()) => Ok(()),
        Err(ConverterError::Relayed(reason)) => Err(argument_error(argument, reason)),
        Err(ConverterError::Other(e)) => Err(unexpected(argument, e)),
    }
}
