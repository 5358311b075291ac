use std::fmt::Display;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ErrorSeverity {
    /// Caused by user input. The message can be shown to the user as-is.
    Low,
    /// Unexpected, should be logged and reported.
    High,
}

pub trait GetErrorSeverity {
    fn get_severity(&self) -> ErrorSeverity;
}

/// An error raised by a converter while parsing or validating.
#[derive(Debug)]
pub enum ConverterError {
    /// A user-facing message, already translated, to be shown verbatim.
    Relayed(String),
    /// Anything else. Never swallowed by the parsers.
    Other(anyhow::Error),
}

impl ConverterError {
    pub fn relayed(reason: impl Into<String>) -> Self {
        Self::Relayed(reason.into())
    }
}

impl Display for ConverterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Relayed(reason) => f.write_str(reason),
            Self::Other(e) => write!(f, "converter failure: {e}"),
        }
    }
}
impl std::error::Error for ConverterError {}

impl GetErrorSeverity for ConverterError {
    fn get_severity(&self) -> ErrorSeverity {
        match self {
            Self::Relayed(_) => ErrorSeverity::Low,
            Self::Other(_) => ErrorSeverity::High,
        }
    }
}

impl From<anyhow::Error> for ConverterError {
    fn from(value: anyhow::Error) -> Self {
        Self::Other(value)
    }
}

/// The one user-facing error a failed parse produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentParsingError {
    pub reason: String,
    /// Display name of the argument at fault, if the failure was about one argument.
    pub argument: Option<String>,
}

impl ArgumentParsingError {
    pub fn new(reason: impl Into<String>, argument: Option<&str>) -> Self {
        Self {
            reason: reason.into(),
            argument: argument.map(ToOwned::to_owned),
        }
    }
}

impl Display for ArgumentParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason)
    }
}
impl std::error::Error for ArgumentParsingError {}

/// A mistake in how a command declared its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentsError {
    /// A required argument was declared after an optional one.
    RequiredAfterOptional { required: String, optional: String },
    /// Two arguments share a (case-insensitive) name.
    DuplicateName(String),
    /// List converters have no slash command representation.
    ListInSlashCommand(String),
    /// The converter can't be turned into the requested shape.
    UnsupportedConversion { converter: String, shape: &'static str },
}

impl Display for ArgumentsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequiredAfterOptional { required, optional } => write!(
                f,
                "required argument `{required}` is declared after optional argument `{optional}`"
            ),
            Self::DuplicateName(name) => write!(f, "duplicate argument name `{name}`"),
            Self::ListInSlashCommand(name) => {
                write!(f, "argument `{name}` uses a list converter, which slash commands don't support")
            },
            Self::UnsupportedConversion { converter, shape } => {
                write!(f, "converter `{converter}` can't be used as a {shape} converter")
            },
        }
    }
}
impl std::error::Error for ArgumentsError {}

/// What the command parsers return.
#[derive(Debug)]
pub enum ParseError {
    /// Bad user input.
    Argument(ArgumentParsingError),
    /// The command's argument declaration is broken.
    InvalidArguments(ArgumentsError),
    /// A converter failed unexpectedly.
    Converter(anyhow::Error),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Argument(e) => write!(f, "{e}"),
            Self::InvalidArguments(e) => write!(f, "invalid argument declaration: {e}"),
            Self::Converter(e) => write!(f, "converter failure: {e}"),
        }
    }
}
impl std::error::Error for ParseError {}

impl GetErrorSeverity for ParseError {
    fn get_severity(&self) -> ErrorSeverity {
        match self {
            Self::Argument(_) => ErrorSeverity::Low,
            Self::InvalidArguments(_) | Self::Converter(_) => ErrorSeverity::High,
        }
    }
}

impl From<ArgumentParsingError> for ParseError {
    fn from(value: ArgumentParsingError) -> Self {
        Self::Argument(value)
    }
}

impl From<ArgumentsError> for ParseError {
    fn from(value: ArgumentsError) -> Self {
        Self::InvalidArguments(value)
    }
}

/// Reading an argument's value failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueError {
    /// The value was read before it was parsed.
    NotParsed,
    /// The key doesn't belong to the converter at its position.
    Mismatched,
}

impl Display for ValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotParsed => f.write_str(
                "argument value accessed before it was parsed (if this happened during autocomplete, \
                 enable parse_for_autocomplete on the arguments)",
            ),
            Self::Mismatched => f.write_str("argument key does not match the converter it points at"),
        }
    }
}
impl std::error::Error for ValueError {}
