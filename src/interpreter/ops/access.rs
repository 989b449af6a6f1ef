//! Register, slot and container access operators
//!
//! `w s > < v` move values between the register, slots and literals.
//! `| @ $` split text into lists and look items up in text or lists.

use crate::interpreter::constants::STRING_OPEN;
use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;

impl Interpreter {
    /// `w` on its own does nothing.
    pub(crate) fn op_register(&mut self) -> Result<(), RuntimeError> {
        Ok(())
    }

    /// `sN`: exchange the register with slot N.
    pub(crate) fn op_swap(&mut self) -> Result<(), RuntimeError> {
        let slot = self.slot_operand()?;
        let value = std::mem::take(&mut self.register);
        self.register = self.slots.replace(slot, value);
        Ok(())
    }

    /// `>N`: copy the register into slot N.
    pub(crate) fn op_store(&mut self) -> Result<(), RuntimeError> {
        let slot = self.slot_operand()?;
        self.slots.set(slot, self.register.clone());
        Ok(())
    }

    /// `<N`: copy slot N into the register.
    pub(crate) fn op_load_slot(&mut self) -> Result<(), RuntimeError> {
        let slot = self.slot_operand()?;
        self.register = self.slots.get(slot);
        Ok(())
    }

    /// `v`: load a string or number literal. Whitespace may separate `v`
    /// from a string literal.
    pub(crate) fn op_load_literal(&mut self) -> Result<(), RuntimeError> {
        self.register = match self.cursor.peek_past_whitespace() {
            Some((quote, STRING_OPEN)) => {
                self.cursor.skip_to(quote);
                Value::Text(self.cursor.string()?)
            }
            _ => self.number_operand()?,
        };
        Ok(())
    }

    /// `|D`: split text on a one-character delimiter. Text that does not
    /// contain the delimiter is left as it is.
    pub(crate) fn op_split(&mut self) -> Result<(), RuntimeError> {
        let delimiter = self.cursor.delimiter()?;
        let parts = match &self.register {
            Value::Text(text) if text.contains(delimiter) => {
                text.split(delimiter).map(Value::text).collect()
            }
            Value::Text(_) => return Ok(()),
            other => {
                return Err(RuntimeError::TypeError {
                    operation: "|".to_string(),
                    left: other.type_name(),
                    right: "text",
                })
            }
        };
        self.register = Value::List(parts);
        Ok(())
    }

    /// `@X`: position of X in the register's text (in characters) or list.
    pub(crate) fn op_index_of(&mut self) -> Result<(), RuntimeError> {
        let item = match self.cursor.peek() {
            Some(STRING_OPEN) => self.string_operand()?,
            Some('<') => self.slot_reference()?,
            Some(c) if c.is_ascii_digit() || c == '-' || c == '.' => self.number_operand()?,
            _ => {
                return Err(RuntimeError::InvalidIndexItem {
                    position: self.cursor.position(),
                })
            }
        };

        let index = match (&self.register, &item) {
            (Value::Text(haystack), Value::Text(needle)) => haystack
                .find(needle.as_str())
                .map(|byte| haystack[..byte].chars().count())
                .ok_or(RuntimeError::SubstringNotFound)?,
            (Value::List(items), _) => items
                .iter()
                .position(|candidate| *candidate == item)
                .ok_or_else(|| RuntimeError::ItemNotInList { item: item.repr() })?,
            (register, item) => {
                return Err(RuntimeError::TypeError {
                    operation: "@".to_string(),
                    left: register.type_name(),
                    right: item.type_name(),
                })
            }
        };
        self.register = Value::int(index as i64);
        Ok(())
    }

    /// `$N`: element N of the register's text or list. Negative indices
    /// count from the end.
    pub(crate) fn op_index_at(&mut self) -> Result<(), RuntimeError> {
        let index = match self.cursor.peek() {
            Some('<') => self.slot_reference()?.as_integer()?,
            _ => self.number_operand()?.as_integer()?,
        };

        let element = match &self.register {
            Value::Text(text) => {
                let chars: Vec<char> = text.chars().collect();
                let i = resolve_index(index, chars.len())
                    .ok_or(RuntimeError::IndexOutOfRange { container: "string" })?;
                Value::Text(chars[i].to_string())
            }
            Value::List(items) => {
                let i = resolve_index(index, items.len())
                    .ok_or(RuntimeError::IndexOutOfRange { container: "list" })?;
                items[i].clone()
            }
            other => {
                return Err(RuntimeError::TypeError {
                    operation: "$".to_string(),
                    left: other.type_name(),
                    right: "number",
                })
            }
        };
        self.register = element;
        Ok(())
    }
}

/// Resolve a possibly negative index against a container of length `len`.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 { index + len } else { index };
    (0..len).contains(&resolved).then_some(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::config::{RunConfig, Streams};
    use std::io;

    fn register_after(source: &str) -> Result<Value, RuntimeError> {
        let streams = Streams {
            input: Box::new(io::empty()),
            output: Box::new(io::sink()),
            error: Box::new(io::sink()),
        };
        let mut interp = Interpreter::with_streams(source, streams, RunConfig::embedded());
        interp.run()?;
        Ok(interp.register().clone())
    }

    fn words(items: &[&str]) -> Value {
        Value::List(items.iter().map(|s| Value::text(*s)).collect())
    }

    #[test]
    fn test_swap_store_load() {
        assert_eq!(register_after("v1>0v2s0"), Ok(Value::float(1.0)));
        assert_eq!(register_after("v1s4<4"), Ok(Value::float(1.0)));
        assert_eq!(register_after("v5s9s9"), Ok(Value::float(5.0)));
        assert_eq!(register_after("v5<3"), Ok(Value::int(0)));
    }

    #[test]
    fn test_load_literal_skips_whitespace_before_string() {
        assert_eq!(register_after("v  'hi:"), Ok(Value::text("hi")));
        assert_eq!(register_after("v-4"), Ok(Value::float(-4.0)));
    }

    #[test]
    fn test_split() {
        assert_eq!(
            register_after("v'a b c:| "),
            Ok(words(&["a", "b", "c"]))
        );
        assert_eq!(register_after("v'abc:|,"), Ok(Value::text("abc")));
        assert_eq!(
            register_after("v'x\\ny:|\\n"),
            Ok(words(&["x", "y"]))
        );
        assert!(register_after("v1|,").is_err());
    }

    #[test]
    fn test_index_of() {
        assert_eq!(register_after("v'hello:@'ll:"), Ok(Value::int(2)));
        assert_eq!(register_after("v'a,b,c:|,@'c:"), Ok(Value::int(2)));
        assert_eq!(
            register_after("v'hello:@'z:"),
            Err(RuntimeError::SubstringNotFound)
        );
        assert_eq!(
            register_after("v'a,b:|,@'z:").unwrap_err().to_string(),
            "'z' is not in list"
        );
        assert_eq!(
            register_after("v'abc:@x"),
            Err(RuntimeError::InvalidIndexItem { position: 6 })
        );
    }

    #[test]
    fn test_index_at() {
        assert_eq!(register_after("v'hello:$1"), Ok(Value::text("e")));
        assert_eq!(register_after("v'hello:$-1"), Ok(Value::text("o")));
        assert_eq!(register_after("v'a,b,c:|,$2"), Ok(Value::text("c")));
        assert_eq!(register_after("v1i>3v'a,b:|,$<3"), Ok(Value::text("b")));
        assert_eq!(
            register_after("v'abc:$5").unwrap_err().to_string(),
            "string index out of range"
        );
        assert_eq!(
            register_after("v'a,b:|,$-3"),
            Err(RuntimeError::IndexOutOfRange { container: "list" })
        );
    }
}
