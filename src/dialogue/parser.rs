// Delimited key/value line parser

/// Delimiter used by the shipped dialogue files
pub const DEFAULT_DELIMITER: char = '*';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed line {line:?}: expected KEY{delimiter}VALUE, found {tokens} token(s)")]
    MalformedLine {
        line: String,
        delimiter: char,
        tokens: usize,
    },
}

/// Splits `KEY<delim>VALUE` lines.
///
/// Empty tokens between consecutive delimiters are skipped, so `**a**b`
/// yields `("a", "b")`. Tokens past the second are ignored. No trimming is
/// done; whitespace inside a token is part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyValueParser {
    delimiter: char,
}

impl KeyValueParser {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn parse<'a>(&self, line: &'a str) -> Result<(&'a str, &'a str), ParseError> {
        let mut tokens = line.split(self.delimiter).filter(|t| !t.is_empty());
        match (tokens.next(), tokens.next()) {
            (Some(key), Some(value)) => Ok((key, value)),
            (first, _) => Err(ParseError::MalformedLine {
                line: line.to_string(),
                delimiter: self.delimiter,
                tokens: usize::from(first.is_some()),
            }),
        }
    }
}

impl Default for KeyValueParser {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}
