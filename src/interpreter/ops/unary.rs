use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;

impl Interpreter {
    /// `i`: truncate to an integer, parsing text if needed
    pub(crate) fn op_to_integer(&mut self) -> Result<(), RuntimeError> {
        self.register = Value::int(self.register.as_integer()?);
        Ok(())
    }

    /// `f`: convert to a float, parsing text if needed
    pub(crate) fn op_to_float(&mut self) -> Result<(), RuntimeError> {
        self.register = Value::float(self.register.as_float()?);
        Ok(())
    }

    /// `c`: code point to single-character text
    pub(crate) fn op_to_character(&mut self) -> Result<(), RuntimeError> {
        self.register = self.register.to_character()?;
        Ok(())
    }

    /// `o`: single-character text to code point
    pub(crate) fn op_to_ordinal(&mut self) -> Result<(), RuntimeError> {
        self.register = self.register.to_ordinal()?;
        Ok(())
    }
}
