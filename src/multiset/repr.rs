//! Canonical textual representation of [`OrderedMultiset`].
//!
//! `Debug` renders a multiset as its type name wrapping the ordered list of
//! `(key, count)` pairs, each key formatted with its own `Debug`:
//!
//! ```text
//! OrderedMultiset([('a', 1), ('b', 4), ('d', 1), ('c', 2)])
//! ```
//!
//! [`FromStr`] reads the same form back for keys implementing `FromStr`.
//! Quoted string literals (`"..."`) and char literals (`'x'`) are unescaped
//! before being handed to the key's parser; any other key token is passed
//! through as written. Parsing goes through
//! [`OrderedMultiset::from_pairs`], so the result has the same order as the
//! text.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use super::ordered_multiset::OrderedMultiset;

const TYPE_NAME: &str = "OrderedMultiset";

impl<K: fmt::Debug> fmt::Debug for OrderedMultiset<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{TYPE_NAME}([")?;
        for (index, (key, count)) in self.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "({key:?}, {count})")?;
        }
        formatter.write_str("])")
    }
}

impl<K: fmt::Debug> OrderedMultiset<K> {
    /// Returns the canonical representation, identical to the `Debug` output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let tally: OrderedMultiset<char> = "abbbd".chars().collect();
    /// assert_eq!(tally.repr(), "OrderedMultiset([('a', 1), ('b', 3), ('d', 1)])");
    /// ```
    #[must_use]
    pub fn repr(&self) -> String {
        format!("{self:?}")
    }
}

/// Errors produced while parsing the canonical representation.
///
/// Positions are byte offsets into the parsed text.
///
/// # Examples
///
/// ```rust
/// use ordered_counter::multiset::{OrderedMultiset, ReprError};
///
/// let error = "Counter([])".parse::<OrderedMultiset<char>>().unwrap_err();
/// assert_eq!(error, ReprError::MissingPrefix { expected: "OrderedMultiset" });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReprError {
    /// The text does not start with the type name.
    MissingPrefix {
        /// The type name that was expected.
        expected: &'static str,
    },
    /// The text ended while more input was required.
    UnexpectedEnd {
        /// Offset at which the input ran out.
        position: usize,
        /// What the parser was looking for.
        expected: &'static str,
    },
    /// A character other than the required one was found.
    UnexpectedCharacter {
        /// Offset of the offending character.
        position: usize,
        /// The character found.
        found: char,
        /// What the parser was looking for.
        expected: &'static str,
    },
    /// A backslash escape inside a literal is not recognised.
    InvalidEscape {
        /// Offset of the backslash.
        position: usize,
    },
    /// The key's own parser rejected the key text.
    InvalidKey {
        /// Offset of the key token.
        position: usize,
        /// The key parser's error message.
        reason: String,
    },
    /// The count is not an integer that fits in `i64`.
    InvalidCount {
        /// Offset of the count token.
        position: usize,
        /// The rejected text.
        text: String,
    },
    /// Extra text follows the closing parenthesis.
    TrailingInput {
        /// Offset of the first extra character.
        position: usize,
    },
}

impl fmt::Display for ReprError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPrefix { expected } => {
                write!(formatter, "representation must start with `{expected}`")
            }
            Self::UnexpectedEnd { position, expected } => {
                write!(formatter, "unexpected end of input at {position}, expected {expected}")
            }
            Self::UnexpectedCharacter {
                position,
                found,
                expected,
            } => write!(
                formatter,
                "unexpected {found:?} at {position}, expected {expected}"
            ),
            Self::InvalidEscape { position } => {
                write!(formatter, "invalid escape sequence at {position}")
            }
            Self::InvalidKey { position, reason } => {
                write!(formatter, "invalid key at {position}: {reason}")
            }
            Self::InvalidCount { position, text } => {
                write!(formatter, "invalid count {text:?} at {position}")
            }
            Self::TrailingInput { position } => {
                write!(formatter, "unexpected trailing input at {position}")
            }
        }
    }
}

impl std::error::Error for ReprError {}

impl<K> FromStr for OrderedMultiset<K>
where
    K: FromStr + Hash + Eq,
    K::Err: fmt::Display,
{
    type Err = ReprError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        ReprParser::new(text)
            .parse_pairs()
            .map(Self::from_pairs)
            .inspect_err(|error| log::debug!("rejected multiset representation: {error}"))
    }
}

// =============================================================================
// Parser
// =============================================================================

struct ReprParser<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> ReprParser<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text, position: 0 }
    }

    fn parse_pairs<K>(mut self) -> Result<Vec<(K, i64)>, ReprError>
    where
        K: FromStr,
        K::Err: fmt::Display,
    {
        self.skip_whitespace();
        if !self.rest().starts_with(TYPE_NAME) {
            return Err(ReprError::MissingPrefix {
                expected: TYPE_NAME,
            });
        }
        self.position += TYPE_NAME.len();
        self.expect('(', "`(`")?;
        self.expect('[', "`[`")?;

        let mut pairs = Vec::new();
        self.skip_whitespace();
        if !self.consume(']') {
            loop {
                pairs.push(self.parse_pair()?);
                self.skip_whitespace();
                if self.consume(',') {
                    self.skip_whitespace();
                    if self.consume(']') {
                        break;
                    }
                    continue;
                }
                self.expect(']', "`,` or `]`")?;
                break;
            }
        }

        self.expect(')', "`)`")?;
        self.skip_whitespace();
        if self.position < self.text.len() {
            return Err(ReprError::TrailingInput {
                position: self.position,
            });
        }
        Ok(pairs)
    }

    fn parse_pair<K>(&mut self) -> Result<(K, i64), ReprError>
    where
        K: FromStr,
        K::Err: fmt::Display,
    {
        self.expect('(', "`(`")?;
        self.skip_whitespace();
        let key_position = self.position;
        let key_text = self.key_token()?;
        let key = key_text
            .parse::<K>()
            .map_err(|error| ReprError::InvalidKey {
                position: key_position,
                reason: error.to_string(),
            })?;
        self.expect(',', "`,`")?;
        self.skip_whitespace();
        let count = self.count()?;
        self.expect(')', "`)`")?;
        Ok((key, count))
    }

    fn key_token(&mut self) -> Result<String, ReprError> {
        match self.peek() {
            Some('"') => self.string_literal(),
            Some('\'') => self.char_literal(),
            Some(_) => self.bare_token(),
            None => Err(self.end_error("a key")),
        }
    }

    fn string_literal(&mut self) -> Result<String, ReprError> {
        self.bump();
        let mut value = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    self.bump();
                    return Ok(value);
                }
                Some('\\') => value.push(self.escape()?),
                Some(character) => {
                    self.bump();
                    value.push(character);
                }
                None => return Err(self.end_error("closing `\"`")),
            }
        }
    }

    fn char_literal(&mut self) -> Result<String, ReprError> {
        self.bump();
        let character = match self.peek() {
            Some('\\') => self.escape()?,
            Some(character) => {
                self.bump();
                character
            }
            None => return Err(self.end_error("a character")),
        };
        match self.peek() {
            Some('\'') => {
                self.bump();
                Ok(character.to_string())
            }
            Some(found) => Err(ReprError::UnexpectedCharacter {
                position: self.position,
                found,
                expected: "closing `'`",
            }),
            None => Err(self.end_error("closing `'`")),
        }
    }

    /// Reads an unquoted key up to the `,` that separates it from its count,
    /// skipping over commas nested inside brackets.
    fn bare_token(&mut self) -> Result<String, ReprError> {
        let start = self.position;
        let mut depth = 0_usize;
        while let Some(character) = self.peek() {
            match character {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' if depth > 0 => depth -= 1,
                ',' | ')' if depth == 0 => break,
                _ => {}
            }
            self.bump();
        }
        let token = self.text[start..self.position].trim_end();
        if token.is_empty() {
            return Err(ReprError::InvalidKey {
                position: start,
                reason: "empty key".to_string(),
            });
        }
        Ok(token.to_string())
    }

    fn escape(&mut self) -> Result<char, ReprError> {
        let start = self.position;
        self.bump();
        let invalid = ReprError::InvalidEscape { position: start };
        let escaped = match self.bump() {
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('0') => '\0',
            Some('\\') => '\\',
            Some('"') => '"',
            Some('\'') => '\'',
            Some('u') => {
                if !self.consume('{') {
                    return Err(invalid);
                }
                let digits_start = self.position;
                while self.peek().is_some_and(|character| character.is_ascii_hexdigit()) {
                    self.bump();
                }
                let digits = &self.text[digits_start..self.position];
                if !self.consume('}') {
                    return Err(invalid);
                }
                u32::from_str_radix(digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(invalid)?
            }
            Some(_) => return Err(invalid),
            None => return Err(self.end_error("an escape character")),
        };
        Ok(escaped)
    }

    fn count(&mut self) -> Result<i64, ReprError> {
        let start = self.position;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }
        while self.peek().is_some_and(|character| character.is_ascii_digit()) {
            self.bump();
        }
        let text = &self.text[start..self.position];
        text.parse::<i64>().map_err(|_| ReprError::InvalidCount {
            position: start,
            text: text.to_string(),
        })
    }

    fn expect(&mut self, expected: char, description: &'static str) -> Result<(), ReprError> {
        self.skip_whitespace();
        match self.peek() {
            Some(found) if found == expected => {
                self.bump();
                Ok(())
            }
            Some(found) => Err(ReprError::UnexpectedCharacter {
                position: self.position,
                found,
                expected: description,
            }),
            None => Err(self.end_error(description)),
        }
    }

    fn consume(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let character = self.peek()?;
        self.position += character.len_utf8();
        Some(character)
    }

    const fn end_error(&self, expected: &'static str) -> ReprError {
        ReprError::UnexpectedEnd {
            position: self.position,
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_debug_of_empty_multiset() {
        let multiset: OrderedMultiset<char> = OrderedMultiset::new();
        assert_eq!(format!("{multiset:?}"), "OrderedMultiset([])");
    }

    #[rstest]
    fn test_debug_lists_pairs_in_first_seen_order() {
        let multiset: OrderedMultiset<char> = "abbbd".chars().chain("bcc".chars()).collect();
        assert_eq!(
            format!("{multiset:?}"),
            "OrderedMultiset([('a', 1), ('b', 4), ('d', 1), ('c', 2)])"
        );
    }

    #[rstest]
    fn test_debug_uses_key_debug_for_strings() {
        let multiset = OrderedMultiset::from_pairs([("say \"hi\"".to_string(), -2)]);
        assert_eq!(
            multiset.repr(),
            r#"OrderedMultiset([("say \"hi\"", -2)])"#
        );
    }

    #[rstest]
    fn test_parse_empty() {
        let multiset: OrderedMultiset<i32> = "OrderedMultiset([])".parse().unwrap();
        assert!(multiset.is_empty());
    }

    #[rstest]
    fn test_parse_tolerates_whitespace_and_trailing_comma() {
        let multiset: OrderedMultiset<i32> =
            "  OrderedMultiset( [ ( 3 , -1 ) ,(1,2), ] )  ".parse().unwrap();
        assert_eq!(multiset.into_pairs(), vec![(3, -1), (1, 2)]);
    }

    #[rstest]
    #[case("'\\n'", '\n')]
    #[case("'\\''", '\'')]
    #[case("'\"'", '"')]
    #[case("'\\u{e9}'", 'é')]
    #[case("'é'", 'é')]
    fn test_parse_char_literals(#[case] literal: &str, #[case] expected: char) {
        let text = format!("OrderedMultiset([({literal}, 1)])");
        let multiset: OrderedMultiset<char> = text.parse().unwrap();
        assert_eq!(multiset.into_pairs(), vec![(expected, 1)]);
    }

    #[rstest]
    fn test_parse_string_literal_with_escapes() {
        let text = r#"OrderedMultiset([("tab\there, \"quoted\", back\\slash", 4)])"#;
        let multiset: OrderedMultiset<String> = text.parse().unwrap();
        assert_eq!(
            multiset.into_pairs(),
            vec![("tab\there, \"quoted\", back\\slash".to_string(), 4)]
        );
    }

    #[rstest]
    fn test_parse_repeated_key_keeps_first_position() {
        let multiset: OrderedMultiset<i32> =
            "OrderedMultiset([(1, 1), (2, 2), (1, 5)])".parse().unwrap();
        assert_eq!(multiset.into_pairs(), vec![(1, 5), (2, 2)]);
    }

    #[rstest]
    #[case("Counter([])", ReprError::MissingPrefix { expected: TYPE_NAME })]
    #[case("OrderedMultiset([", ReprError::UnexpectedEnd { position: 17, expected: "`(`" })]
    #[case(
        "OrderedMultiset{[]}",
        ReprError::UnexpectedCharacter { position: 15, found: '{', expected: "`(`" }
    )]
    #[case(
        "OrderedMultiset([(1, x)])",
        ReprError::InvalidCount { position: 21, text: String::new() }
    )]
    #[case(
        "OrderedMultiset([(1, 99999999999999999999)])",
        ReprError::InvalidCount { position: 21, text: "99999999999999999999".to_string() }
    )]
    #[case("OrderedMultiset([]) extra", ReprError::TrailingInput { position: 20 })]
    #[case(
        "OrderedMultiset([(, 1)])",
        ReprError::InvalidKey { position: 18, reason: "empty key".to_string() }
    )]
    fn test_parse_errors(#[case] text: &str, #[case] expected: ReprError) {
        let result = text.parse::<OrderedMultiset<i32>>();
        assert_eq!(result.unwrap_err(), expected);
    }

    #[rstest]
    fn test_parse_reports_key_parser_failure() {
        let error = "OrderedMultiset([(abc, 1)])"
            .parse::<OrderedMultiset<i32>>()
            .unwrap_err();
        assert!(matches!(error, ReprError::InvalidKey { position: 18, .. }));
        assert!(error.to_string().starts_with("invalid key at 18:"));
    }

    #[rstest]
    #[case(r"OrderedMultiset([('\q', 1)])", 19)]
    #[case(r"OrderedMultiset([('\u{110000}', 1)])", 19)]
    #[case(r"OrderedMultiset([('\u41', 1)])", 19)]
    fn test_parse_rejects_bad_escapes(#[case] text: &str, #[case] position: usize) {
        let error = text.parse::<OrderedMultiset<char>>().unwrap_err();
        assert_eq!(error, ReprError::InvalidEscape { position });
    }

    #[rstest]
    fn test_parse_rejects_unterminated_string() {
        let error = r#"OrderedMultiset([("open, 1)])"#
            .parse::<OrderedMultiset<String>>()
            .unwrap_err();
        assert!(matches!(error, ReprError::UnexpectedEnd { .. }));
    }

    #[rstest]
    fn test_error_display() {
        let error = ReprError::UnexpectedCharacter {
            position: 3,
            found: '}',
            expected: "`)`",
        };
        assert_eq!(error.to_string(), "unexpected '}' at 3, expected `)`");
    }

    #[rstest]
    fn test_round_trip_preserves_order_for_integer_keys() {
        let original = OrderedMultiset::from_pairs([(42_i64, 1), (-7, -3), (0, 0)]);
        let parsed: OrderedMultiset<i64> = original.repr().parse().unwrap();
        assert!(parsed.eq_ordered(&original));
    }
}
