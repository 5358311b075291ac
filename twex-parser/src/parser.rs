use tracing::trace;

use crate::cursor::Cursor;
use crate::tokens::{NamedToken, PositionalToken};

/// Tokenizer over a command's argument string.
///
/// Forking (cloning) a parser is cheap. The chat command parser hands each converter a fork and
/// only keeps it if the conversion succeeded, so failed conversions never consume input.
#[derive(Debug, Clone)]
pub struct StringParser {
    input: String,
    cursor: Cursor,
}

impl StringParser {
    pub fn new(input: impl Into<String>) -> Self {
        let input = input.into();
        let cursor = Cursor::new(&input);

        Self { input, cursor }
    }

    /// The string this parser was created with.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn has_next(&self) -> bool {
        self.cursor.has_next()
    }

    /// Extracts every `key=value` and `--key value` pair from the remaining input.
    ///
    /// The cursor is replaced with one over the positional text only. Quoted positional tokens
    /// stay quoted (with their quotes re-escaped) so that later calls to
    /// [`parse_next`](Self::parse_next) see the same tokens.
    pub fn parse_named(&mut self) -> Vec<NamedToken> {
        let mut tokens = Vec::new();

        let mut buffer = String::new();
        let mut output = String::new();

        let mut is_quoted = false;

        let mut is_flag = false;
        let mut is_flag_value = false;
        let mut flag_name = String::new();

        let mut is_keyword = false;
        let mut keyword_name = String::new();

        while let Some(c) = self.cursor.next() {
            trace!("character: {c:?}");

            let can_be_quoted = !is_quoted && (!(is_flag && !is_flag_value) || is_keyword);

            if c == '"' && buffer.is_empty() && can_be_quoted {
                is_quoted = true;
                continue;
            }

            if c == '-' && self.cursor.peek_next() == Some('-') && buffer.is_empty() && !is_flag && !is_keyword {
                self.cursor.next();
                is_flag = true;
                continue;
            }

            if c == '=' && !buffer.is_empty() && !is_keyword && !is_flag {
                keyword_name = std::mem::take(&mut buffer);
                is_keyword = true;
                continue;
            }

            if c == '\\' && self.cursor.peek_next() == Some('"') && is_quoted {
                buffer.push('"');
                self.cursor.next();
                continue;
            }

            if c == '"' && is_quoted {
                if is_flag_value {
                    trace!("quoted flag value: {flag_name}={buffer}");
                    tokens.push(NamedToken::new(std::mem::take(&mut flag_name), buffer.clone()));

                    is_flag = false;
                    is_flag_value = false;
                } else if is_keyword {
                    trace!("quoted keyword value: {keyword_name}={buffer}");
                    tokens.push(NamedToken::new(std::mem::take(&mut keyword_name), buffer.clone()));

                    is_keyword = false;
                } else {
                    output.push('"');
                    output.push_str(&buffer.replace('"', "\\\""));
                    output.push_str("\" ");
                    self.cursor.skip_whitespace();
                }

                buffer.clear();
                is_quoted = false;
                continue;
            }

            if c == ' ' && !is_quoted {
                if is_flag {
                    if !is_flag_value {
                        flag_name = buffer.clone();
                        is_flag_value = true;
                    } else {
                        trace!("flag value: {flag_name}={buffer}");
                        tokens.push(NamedToken::new(std::mem::take(&mut flag_name), buffer.clone()));
                        self.cursor.skip_whitespace();

                        is_flag = false;
                        is_flag_value = false;
                    }
                } else if is_keyword {
                    trace!("keyword value: {keyword_name}={buffer}");
                    tokens.push(NamedToken::new(std::mem::take(&mut keyword_name), buffer.clone()));
                    self.cursor.skip_whitespace();

                    is_keyword = false;
                } else {
                    output.push_str(&buffer);
                    output.push(' ');
                }

                buffer.clear();
                continue;
            }

            buffer.push(c);
        }

        if !buffer.is_empty() {
            if is_flag {
                if is_flag_value {
                    tokens.push(NamedToken::new(flag_name, buffer));
                } else {
                    // `--name` with no value
                    trace!("dropping flag with no value: {buffer}");
                }
            } else if is_keyword {
                tokens.push(NamedToken::new(keyword_name, buffer));
            } else {
                output.push_str(&buffer);
            }
        }

        self.cursor = Cursor::new(output.trim());

        tokens
    }

    /// Parses the next token without consuming it.
    pub fn peek_next(&mut self) -> Option<PositionalToken> {
        let position = self.cursor.position();
        let token = self.parse_next();
        self.cursor.set_position(position);

        token
    }

    /// Parses the next positional token, or `None` at the end of the input.
    pub fn parse_next(&mut self) -> Option<PositionalToken> {
        let mut buffer = String::new();
        let mut is_quoted = false;

        while let Some(c) = self.cursor.next() {
            if c == '"' && buffer.is_empty() && !is_quoted {
                is_quoted = true;
                continue;
            }

            if c == '\\' && self.cursor.peek_next() == Some('"') && is_quoted {
                buffer.push('"');
                self.cursor.next();
                continue;
            }

            if (c == '"' && is_quoted) || (c == ' ' && !is_quoted) {
                self.cursor.skip_whitespace();
                trace!("token: {buffer:?}");
                return Some(PositionalToken::new(buffer));
            }

            buffer.push(c);
        }

        if buffer.is_empty() {
            None
        } else {
            Some(PositionalToken::new(buffer))
        }
    }

    /// Consumes everything left in the input.
    pub fn consume_remaining(&mut self) -> String {
        self.cursor.consume_remaining()
    }

    /// Consumes characters while `predicate` holds, then skips any following whitespace.
    /// Returns `None` if the first character didn't match.
    pub fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> Option<String> {
        let result = self.cursor.consume_while(predicate);

        if result.is_some() {
            self.cursor.skip_whitespace();
        }

        result
    }

    pub fn peek_remaining(&self) -> String {
        self.cursor.clone().consume_remaining()
    }

    pub fn peek_while(&self, predicate: impl Fn(char) -> bool) -> Option<String> {
        self.cursor.clone().consume_while(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVERYTHING_INPUT: &str = r#"single "with quotes" --key "value with quotes" name=value"#;
    const EVERYTHING_INPUT_NAMED_FIRST: &str = r#"--key "value with quotes" name=value single "with quotes" "#;
    const NAMED_INPUT: &str = r#"--one one two=two --three "three three" four="four four""#;
    const SINGLE_INPUT: &str = "one two three four five";
    const QUOTED_INPUT: &str = r#""one one" "two two" "three three" "four four" "five five""#;
    const NUMBERS: &str = "12345";

    fn positional(parser: &mut StringParser) -> Vec<String> {
        std::iter::from_fn(|| parser.parse_next()).map(|t| t.data).collect()
    }

    #[test]
    fn consume_everything() {
        let mut parser = StringParser::new(NUMBERS);

        assert_eq!(parser.consume_remaining(), NUMBERS);
        assert_eq!(parser.consume_remaining(), "");
        assert_eq!(parser.parse_next(), None);
    }

    #[test]
    fn consume_with_predicates() {
        let mut parser = StringParser::new(NUMBERS);

        assert_eq!(parser.consume_while(|c| c == '1').as_deref(), Some("1"));
        assert_eq!(parser.consume_while(|c| c == '2').as_deref(), Some("2"));
        assert_eq!(parser.consume_while(|c| c == '2'), None);
        assert_eq!(parser.parse_next().map(|t| t.data).as_deref(), Some("345"));
        assert_eq!(parser.consume_remaining(), "");
        assert_eq!(parser.parse_next(), None);
    }

    #[test]
    fn everything_natural_order() {
        let mut parser = StringParser::new(EVERYTHING_INPUT);

        let named = parser.parse_named();
        assert_eq!(
            named,
            vec![
                NamedToken::new("key", "value with quotes"),
                NamedToken::new("name", "value")
            ]
        );
        assert_eq!(positional(&mut parser), vec!["single", "with quotes"]);
    }

    #[test]
    fn everything_named_first() {
        let mut parser = StringParser::new(EVERYTHING_INPUT_NAMED_FIRST);

        let named = parser.parse_named();
        assert_eq!(
            named,
            vec![
                NamedToken::new("key", "value with quotes"),
                NamedToken::new("name", "value")
            ]
        );
        assert_eq!(positional(&mut parser), vec!["single", "with quotes"]);
    }

    #[test]
    fn single_positional_arguments() {
        let mut parser = StringParser::new(SINGLE_INPUT);

        assert!(parser.parse_named().is_empty());
        assert_eq!(positional(&mut parser), vec!["one", "two", "three", "four", "five"]);
    }

    #[test]
    fn quoted_positional_arguments() {
        let mut parser = StringParser::new(QUOTED_INPUT);

        assert!(parser.parse_named().is_empty());
        assert_eq!(
            positional(&mut parser),
            vec!["one one", "two two", "three three", "four four", "five five"]
        );
    }

    #[test]
    fn named_arguments_only() {
        let mut parser = StringParser::new(NAMED_INPUT);

        assert_eq!(
            parser.parse_named(),
            vec![
                NamedToken::new("one", "one"),
                NamedToken::new("two", "two"),
                NamedToken::new("three", "three three"),
                NamedToken::new("four", "four four"),
            ]
        );
        assert_eq!(parser.parse_next(), None);
    }

    #[test]
    fn escaped_quotes_survive_parse_named() {
        let mut parser = StringParser::new(r#""say \"hi\"" after"#);

        assert!(parser.parse_named().is_empty());
        assert_eq!(positional(&mut parser), vec![r#"say "hi""#, "after"]);
    }

    #[test]
    fn peeking_does_not_consume() {
        let mut parser = StringParser::new("first second");

        assert_eq!(parser.peek_next().map(|t| t.data).as_deref(), Some("first"));
        assert_eq!(parser.peek_remaining(), "first second");
        assert_eq!(parser.peek_while(|c| c != ' ').as_deref(), Some("first"));
        assert_eq!(parser.parse_next().map(|t| t.data).as_deref(), Some("first"));
        assert_eq!(parser.peek_remaining(), "second");
    }

    #[test]
    fn forks_are_independent() {
        let mut parser = StringParser::new("a b c");
        let mut fork = parser.clone();

        fork.parse_next();
        fork.parse_next();

        assert_eq!(parser.parse_next().map(|t| t.data).as_deref(), Some("a"));
        assert_eq!(fork.parse_next().map(|t| t.data).as_deref(), Some("c"));
    }
}
