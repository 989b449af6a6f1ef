//! Runtime value representation
//!
//! This module defines the [`Value`] enum, which every register and slot holds.
//! Values are tagged: operators check the variant they receive and fail with a
//! [`RuntimeError`] instead of silently coercing.
//!
//! # Value Types
//!
//! - [`Value::Number`]: an integer or a double-precision float (see [`Number`])
//! - [`Value::Text`]: a string
//! - [`Value::List`]: an ordered sequence of values, produced by splitting text
//! - [`Value::Resource`]: a shared handle to a readable/writable stream
//!
//! # Rendering
//!
//! [`fmt::Display`] gives the text `!` writes: floats always carry a fractional
//! part (`2.0`), integers never do (`2`), lists render bracketed with quoted
//! elements (`['a', 'b']`). [`Value::repr`] gives the quoted form used for
//! list elements and error messages.

use crate::interpreter::errors::RuntimeError;
use crate::resource::ResourceHandle;
use std::cmp::Ordering;
use std::fmt;

/// Numeric payload of [`Value::Number`]
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    /// Truncate toward zero, failing for NaN and infinities.
    pub fn truncate(self) -> Option<i64> {
        match self {
            Number::Int(n) => Some(n),
            Number::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Number::Float(_) => None,
        }
    }

    /// The exact integer this number holds, if it holds one.
    pub fn as_exact_int(self) -> Option<i64> {
        match self {
            Number::Int(n) => Some(n),
            Number::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
            Number::Float(_) => None,
        }
    }

    pub fn add(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_add(b)
                .map(Number::Int)
                .unwrap_or(Number::Float(a as f64 + b as f64)),
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }

    pub fn sub(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_sub(b)
                .map(Number::Int)
                .unwrap_or(Number::Float(a as f64 - b as f64)),
            (a, b) => Number::Float(a.as_f64() - b.as_f64()),
        }
    }

    pub fn mul(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_mul(b)
                .map(Number::Int)
                .unwrap_or(Number::Float(a as f64 * b as f64)),
            (a, b) => Number::Float(a.as_f64() * b.as_f64()),
        }
    }

    /// True division: the result is always a float. `None` on a zero divisor.
    pub fn div(self, rhs: Number) -> Option<Number> {
        let divisor = rhs.as_f64();
        if divisor == 0.0 {
            return None;
        }
        Some(Number::Float(self.as_f64() / divisor))
    }

    /// Remainder taking the sign of the divisor. `None` on a zero divisor.
    pub fn rem(self, rhs: Number) -> Option<Number> {
        match (self, rhs) {
            (Number::Int(_), Number::Int(0)) => None,
            (Number::Int(a), Number::Int(b)) => {
                let r = a.wrapping_rem(b);
                if r != 0 && (r < 0) != (b < 0) {
                    Some(Number::Int(r + b))
                } else {
                    Some(Number::Int(r))
                }
            }
            (a, b) => {
                let (a, b) = (a.as_f64(), b.as_f64());
                if b == 0.0 {
                    return None;
                }
                let r = a % b;
                if r != 0.0 && (r < 0.0) != (b < 0.0) {
                    Some(Number::Float(r + b))
                } else {
                    Some(Number::Float(r))
                }
            }
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(x) => write!(f, "{}", format_float(*x)),
        }
    }
}

/// Shortest round-tripping rendering of a float, always marked as a float:
/// `2.0`, `-0.2`, `1e+16`, `1.5e-05`, `inf`, `nan`.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = x.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let scientific = format!("{:e}", x);
        let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
    }

    let plain = x.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}

/// Runtime values in the interpreter
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(Number),
    Text(String),
    List(Vec<Value>),
    Resource(ResourceHandle),
}

impl Default for Value {
    fn default() -> Self {
        Value::Number(Number::Int(0))
    }
}

impl Value {
    pub fn int(n: i64) -> Self {
        Value::Number(Number::Int(n))
    }

    pub fn float(x: f64) -> Self {
        Value::Number(Number::Float(x))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Resource(_) => "resource",
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&ResourceHandle> {
        match self {
            Value::Resource(handle) => Some(handle),
            _ => None,
        }
    }

    /// Quoted rendering: text gets quotes and escapes, everything else
    /// renders as with [`fmt::Display`].
    pub fn repr(&self) -> String {
        match self {
            Value::Text(s) => quote_text(s),
            other => other.to_string(),
        }
    }

    /// Parse a number out of a number or numeric text.
    fn numeric(&self, target: &'static str) -> Result<f64, RuntimeError> {
        match self {
            Value::Number(n) => Ok(n.as_f64()),
            Value::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| self.conversion_error(target)),
            _ => Err(self.conversion_error(target)),
        }
    }

    /// Coerce to an integer, truncating floats and parsing numeric text.
    pub fn as_integer(&self) -> Result<i64, RuntimeError> {
        if let Value::Number(Number::Int(n)) = self {
            return Ok(*n);
        }
        Number::Float(self.numeric("integer")?)
            .truncate()
            .ok_or_else(|| self.conversion_error("integer"))
    }

    pub fn as_float(&self) -> Result<f64, RuntimeError> {
        self.numeric("float")
    }

    /// Single-character text from an integral code point.
    pub fn to_character(&self) -> Result<Value, RuntimeError> {
        self.as_number()
            .and_then(Number::as_exact_int)
            .and_then(|n| u32::try_from(n).ok())
            .and_then(char::from_u32)
            .map(|c| Value::Text(c.to_string()))
            .ok_or_else(|| self.conversion_error("character"))
    }

    /// Code point of single-character text.
    pub fn to_ordinal(&self) -> Result<Value, RuntimeError> {
        let mut chars = self.as_text().map(str::chars).into_iter().flatten();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Value::int(c as i64)),
            _ => Err(self.conversion_error("code point")),
        }
    }

    fn conversion_error(&self, target: &'static str) -> RuntimeError {
        RuntimeError::InvalidConversion {
            value: self.repr(),
            target,
        }
    }

    /// Ordering used by `<=` and `>=`. `Ok(None)` means unordered (NaN).
    pub fn compare(&self, other: &Value) -> Result<Option<Ordering>, RuntimeError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(a.partial_cmp(b)),
            (Value::Text(a), Value::Text(b)) => Ok(Some(a.cmp(b))),
            (Value::List(a), Value::List(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    if x != y {
                        return x.compare(y);
                    }
                }
                Ok(Some(a.len().cmp(&b.len())))
            }
            _ => Err(RuntimeError::Incomparable {
                left: self.type_name(),
                right: other.type_name(),
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item.repr())?;
                }
                write!(f, "]")
            }
            Value::Resource(handle) => write!(f, "{}", handle.describe()),
        }
    }
}

fn quote_text(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
