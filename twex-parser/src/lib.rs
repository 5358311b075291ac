//! Tokenizer for chat command input.
//!
//! The input is split into positional tokens (whitespace separated, with `"quoted runs"` kept
//! together) and named tokens (`key=value` and `--key value`). Named tokens can appear anywhere
//! in the input and are pulled out up front by [`StringParser::parse_named`].

pub mod cursor;
pub mod parser;
pub mod tokens;

pub use cursor::Cursor;
pub use parser::StringParser;
pub use tokens::{NamedToken, PositionalToken};
