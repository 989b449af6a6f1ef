use crate::interpreter::constants::STRING_OPEN;
use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinOp {
    fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::Modulo => "%",
        }
    }
}

impl Interpreter {
    /// `+` also accepts a string literal or a `<N` slot reference, so that
    /// text and lists can be concatenated.
    pub(crate) fn op_add(&mut self) -> Result<(), RuntimeError> {
        let rhs = match self.cursor.peek() {
            Some(STRING_OPEN) => self.string_operand()?,
            Some('<') => self.slot_reference()?,
            _ => self.number_operand()?,
        };
        self.apply_binary(BinOp::Add, rhs)
    }

    pub(crate) fn op_subtract(&mut self) -> Result<(), RuntimeError> {
        let rhs = self.number_operand()?;
        self.apply_binary(BinOp::Subtract, rhs)
    }

    pub(crate) fn op_multiply(&mut self) -> Result<(), RuntimeError> {
        let rhs = self.number_operand()?;
        self.apply_binary(BinOp::Multiply, rhs)
    }

    pub(crate) fn op_divide(&mut self) -> Result<(), RuntimeError> {
        let rhs = self.number_operand()?;
        self.apply_binary(BinOp::Divide, rhs)
    }

    pub(crate) fn op_modulo(&mut self) -> Result<(), RuntimeError> {
        let rhs = self.number_operand()?;
        self.apply_binary(BinOp::Modulo, rhs)
    }

    fn apply_binary(&mut self, op: BinOp, rhs: Value) -> Result<(), RuntimeError> {
        self.register = evaluate_binary_op(op, &self.register, rhs)?;
        Ok(())
    }
}

/// `lhs op rhs` with the register on the left
pub(crate) fn evaluate_binary_op(op: BinOp, lhs: &Value, rhs: Value) -> Result<Value, RuntimeError> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => {
            let result = match op {
                BinOp::Add => a.add(b),
                BinOp::Subtract => a.sub(b),
                BinOp::Multiply => a.mul(b),
                BinOp::Divide => a.div(b).ok_or(RuntimeError::DivisionByZero)?,
                BinOp::Modulo => a.rem(b).ok_or(RuntimeError::DivisionByZero)?,
            };
            Ok(Value::Number(result))
        }
        (Value::Text(a), Value::Text(b)) if op == BinOp::Add => Ok(Value::Text(format!("{}{}", a, b))),
        (Value::List(a), Value::List(b)) if op == BinOp::Add => {
            let mut items = a.clone();
            items.extend(b);
            Ok(Value::List(items))
        }
        (lhs, rhs) => Err(RuntimeError::TypeError {
            operation: op.symbol().to_string(),
            left: lhs.type_name(),
            right: rhs.type_name(),
        }),
    }
}
