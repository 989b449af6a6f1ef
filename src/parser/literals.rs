//! Literal and operand parsing
//!
//! These parsers only ever consume forward from the cursor. Operands that may
//! refer to the working register (`w`) are returned as tokens; the interpreter
//! resolves them against its state.

use super::cursor::Cursor;
use crate::interpreter::constants::{ESCAPE, REGISTER_MARKER, STRING_CLOSE};
use crate::interpreter::errors::RuntimeError;

/// A parsed number operand
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberToken {
    Literal(f64),
    /// `w`: use the working register as-is
    Register,
}

/// The leading part of a slot operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotToken {
    Digits(String),
    /// `w`: the key starts with the stringified working register
    Register,
}

impl Cursor {
    /// Parse `-?digits(.digits)?` (a leading `.` is allowed) or `w`.
    pub fn number(&mut self) -> Result<NumberToken, RuntimeError> {
        let first = self.eat()?;
        if first == REGISTER_MARKER {
            return Ok(NumberToken::Register);
        }

        let mut text = String::new();
        let mut has_decimal = false;
        match first {
            '0'..='9' | '-' => text.push(first),
            '.' => {
                text.push(first);
                has_decimal = true;
            }
            _ => {
                return Err(RuntimeError::ExpectedNumeric {
                    found: first.to_string(),
                })
            }
        }

        loop {
            match self.peek() {
                Some('.') => {
                    if has_decimal {
                        return Err(RuntimeError::MultipleDecimalPoints);
                    }
                    has_decimal = true;
                }
                Some(c) if c.is_ascii_digit() => {}
                _ => break,
            }
            text.push(self.eat()?);
        }

        text.parse::<f64>()
            .map(NumberToken::Literal)
            .map_err(|_| RuntimeError::ExpectedNumeric { found: text })
    }

    /// Parse the body of a string literal whose opening quote was consumed,
    /// up to and including the closing `:`.
    pub fn string(&mut self) -> Result<String, RuntimeError> {
        let mut s = String::new();
        loop {
            match self.peek() {
                Some(ESCAPE) => {
                    self.eat()?;
                    match self.eat()? {
                        'n' => s.push('\n'),
                        'r' => s.push('\r'),
                        't' => s.push('\t'),
                        ESCAPE => s.push(ESCAPE),
                        STRING_CLOSE => s.push(STRING_CLOSE),
                        // unknown escapes are dropped
                        _ => {}
                    }
                }
                Some(STRING_CLOSE) => {
                    self.eat()?;
                    return Ok(s);
                }
                _ => s.push(self.eat()?),
            }
        }
    }

    /// Consume the first character of a slot operand plus any digits after it.
    pub fn slot(&mut self) -> Result<SlotToken, RuntimeError> {
        let first = self.eat()?;
        if first == REGISTER_MARKER {
            return Ok(SlotToken::Register);
        }
        if !first.is_ascii_digit() {
            return Err(RuntimeError::InvalidSlot {
                found: first.to_string(),
            });
        }

        let mut digits = first.to_string();
        digits.push_str(&self.digits());
        Ok(SlotToken::Digits(digits))
    }

    /// Greedily consume decimal digits.
    pub fn digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            self.skip_to(self.position() + 1);
            digits.push(c);
        }
        digits
    }

    /// Parse a one-character split delimiter, honouring `\n`, `\r`, `\t`, `\\`.
    pub fn delimiter(&mut self) -> Result<char, RuntimeError> {
        let c = self.eat()?;
        if c != ESCAPE {
            return Ok(c);
        }
        match self.eat()? {
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            ESCAPE => Ok(ESCAPE),
            _ => Err(RuntimeError::BadDelimiterEscape),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cursor positioned on an operator character, operands following.
    fn at_operator(operands: &str) -> Cursor {
        Cursor::new(&format!("#{}", operands))
    }

    #[test]
    fn test_numbers() {
        assert_eq!(at_operator("42").number(), Ok(NumberToken::Literal(42.0)));
        assert_eq!(at_operator("-0.2").number(), Ok(NumberToken::Literal(-0.2)));
        assert_eq!(at_operator("-.2").number(), Ok(NumberToken::Literal(-0.2)));
        assert_eq!(at_operator(".2!").number(), Ok(NumberToken::Literal(0.2)));
        assert_eq!(at_operator("w").number(), Ok(NumberToken::Register));
    }

    #[test]
    fn test_number_stops_at_operator() {
        let mut cursor = at_operator("15{!");
        assert_eq!(cursor.number(), Ok(NumberToken::Literal(15.0)));
        assert_eq!(cursor.peek(), Some('{'));
    }

    #[test]
    fn test_number_errors() {
        assert_eq!(
            at_operator("1.2.3").number(),
            Err(RuntimeError::MultipleDecimalPoints)
        );
        assert_eq!(
            at_operator("H").number().unwrap_err().to_string(),
            "Got `H`, expected numeric."
        );
        assert_eq!(at_operator("").number(), Err(RuntimeError::Eof));
        assert!(at_operator("-!").number().is_err());
    }

    #[test]
    fn test_strings_and_escapes() {
        let mut cursor = at_operator("Hello\\nWorld!:rest");
        assert_eq!(cursor.string(), Ok("Hello\nWorld!".to_string()));
        assert_eq!(cursor.peek(), Some('r'));

        assert_eq!(at_operator("a\\:b:").string(), Ok("a:b".to_string()));
        assert_eq!(at_operator("a\\\\b:").string(), Ok("a\\b".to_string()));
        assert_eq!(at_operator("\\t\\r:").string(), Ok("\t\r".to_string()));
        assert_eq!(at_operator("unterminated").string(), Err(RuntimeError::Eof));
    }

    #[test]
    fn test_slots() {
        let mut cursor = at_operator("12!");
        assert_eq!(cursor.slot(), Ok(SlotToken::Digits("12".to_string())));
        assert_eq!(cursor.peek(), Some('!'));

        assert_eq!(at_operator("w3").slot(), Ok(SlotToken::Register));
        assert_eq!(
            at_operator("x").slot().unwrap_err().to_string(),
            "Expected slot (number 0-9), got `x`."
        );
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(at_operator(" ").delimiter(), Ok(' '));
        assert_eq!(at_operator("\\n").delimiter(), Ok('\n'));
        assert_eq!(at_operator("\\\\").delimiter(), Ok('\\'));
        assert_eq!(
            at_operator("\\q").delimiter(),
            Err(RuntimeError::BadDelimiterEscape)
        );
    }
}
