//! Loop condition evaluation
//!
//! A condition is `operand relop operand`, where `relop` is one of `=`, `!=`,
//! `<=` or `>=`. An operand is either a string literal, a number, or one of the
//! operators in [`CONDITION_OPERATORS`] run for its effect on the register.

use crate::interpreter::constants::{CONDITION_OPERATORS, STRING_OPEN};
use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Equal,
    NotEqual,
    LessOrEqual,
    GreaterOrEqual,
}

impl Relation {
    fn holds(self, left: &Value, right: &Value) -> Result<bool, RuntimeError> {
        Ok(match self {
            Relation::Equal => left == right,
            Relation::NotEqual => left != right,
            Relation::LessOrEqual => matches!(
                left.compare(right)?,
                Some(Ordering::Less | Ordering::Equal)
            ),
            Relation::GreaterOrEqual => matches!(
                left.compare(right)?,
                Some(Ordering::Greater | Ordering::Equal)
            ),
        })
    }
}

impl Interpreter {
    /// Parse and evaluate the condition after a loop's `{`.
    pub(crate) fn evaluate_condition(&mut self) -> Result<bool, RuntimeError> {
        let left = self.condition_operand()?;
        let relation = self.relation()?;
        let right = self.condition_operand()?;
        relation.holds(&left, &right)
    }

    fn condition_operand(&mut self) -> Result<Value, RuntimeError> {
        match self.cursor.peek() {
            Some(c) if CONDITION_OPERATORS.contains(&c) => {
                self.cursor.eat()?;
                if let Some(operator) = self.operator(c) {
                    operator(self)?;
                }
                Ok(self.register.clone())
            }
            Some(STRING_OPEN) => self.string_operand(),
            _ => self.number_operand(),
        }
    }

    fn relation(&mut self) -> Result<Relation, RuntimeError> {
        let first = self.cursor.eat()?;
        if first == '=' {
            return Ok(Relation::Equal);
        }

        let relation = match first {
            '!' => Relation::NotEqual,
            '<' => Relation::LessOrEqual,
            '>' => Relation::GreaterOrEqual,
            other => return Err(RuntimeError::ExpectedComparison { found: other }),
        };
        match self.cursor.eat()? {
            '=' => Ok(relation),
            _ => Err(RuntimeError::ExpectedEquals { found: first }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::config::{RunConfig, Streams};
    use crate::snapshot::MockTerminal;
    use std::io;

    /// Evaluate `condition` with the register preset by `setup`.
    fn evaluate(setup: &str, condition: &str) -> Result<bool, RuntimeError> {
        let streams = Streams {
            input: Box::new(io::Cursor::new(b"typed\n".to_vec())),
            output: Box::new(MockTerminal::new()),
            error: Box::new(MockTerminal::new()),
        };
        let mut interp =
            Interpreter::with_streams(&format!("{{{}", condition), streams, RunConfig::embedded());
        if !setup.is_empty() {
            let quiet = Streams {
                input: Box::new(io::empty()),
                output: Box::new(io::sink()),
                error: Box::new(io::sink()),
            };
            let mut prelude = Interpreter::with_streams(setup, quiet, RunConfig::embedded());
            prelude.run()?;
            interp.register = prelude.register.clone();
            interp.slots = prelude.slots.clone();
        }
        interp.evaluate_condition()
    }

    #[test]
    fn test_relations() {
        assert_eq!(evaluate("", "1=1"), Ok(true));
        assert_eq!(evaluate("", "1!=1"), Ok(false));
        assert_eq!(evaluate("", "1<=2"), Ok(true));
        assert_eq!(evaluate("", "3>=2.5"), Ok(true));
        assert_eq!(evaluate("", "'a:='a:"), Ok(true));
        assert_eq!(evaluate("", "'a:<='b:"), Ok(true));
    }

    #[test]
    fn test_register_operands() {
        assert_eq!(evaluate("v4", "w=4"), Ok(true));
        assert_eq!(evaluate("v4>3v0", "<3>=4"), Ok(true));
        assert_eq!(evaluate("v'x:", "w!='y:"), Ok(true));
        assert_eq!(evaluate("", ".='typed:"), Ok(true));
    }

    #[test]
    fn test_int_equals_float() {
        assert_eq!(evaluate("v2i", "w=2"), Ok(true));
    }

    #[test]
    fn test_relation_errors() {
        assert_eq!(
            evaluate("", "1<2"),
            Err(RuntimeError::ExpectedEquals { found: '<' })
        );
        assert_eq!(
            evaluate("", "1?2"),
            Err(RuntimeError::ExpectedComparison { found: '?' })
        );
        assert!(matches!(
            evaluate("v'a:", "w<=1"),
            Err(RuntimeError::Incomparable { .. })
        ));
    }
}
