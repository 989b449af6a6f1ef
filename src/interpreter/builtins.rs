//! Input, output and resource operators
//!
//! - `!`: print the register, optionally converted first by one of the
//!   modifiers `i`, `f`, `c`, `o`, and optionally redirected with `&N` to the
//!   resource held in slot `N`
//! - `.`: read a line from standard input, or with `&` read from the resource
//!   in the register (`.&`) or in a slot (`.&<N`)
//! - `&`: open the file named by the register, using slot 0 as the mode, or a
//!   TCP listener when the register holds `__SOCKET`
//!
//! Output to the default sink is buffered and flushed before every read from
//! standard input, so prompts appear before the program blocks.

use crate::interpreter::constants::{REDIRECT, SOCKET_SENTINEL};
use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::resource::{FileMode, FileResource, ResourceHandle, SocketResource};
use std::io::{BufRead, Write};

impl Interpreter {
    pub(crate) fn op_output(&mut self) -> Result<(), RuntimeError> {
        let value = match self.cursor.peek() {
            Some('i') => {
                self.cursor.eat()?;
                Value::int(self.register.as_integer()?)
            }
            Some('f') => {
                self.cursor.eat()?;
                Value::float(self.register.as_float()?)
            }
            Some('c') => {
                self.cursor.eat()?;
                self.register.to_character()?
            }
            Some('o') => {
                self.cursor.eat()?;
                self.register.to_ordinal()?
            }
            _ => self.register.clone(),
        };

        if self.cursor.peek() == Some(REDIRECT) {
            self.cursor.eat()?;
            let slot = self.slot_operand()?;
            let target = self.slots.get(slot);
            let handle = target.as_resource().ok_or(RuntimeError::NotWritable)?;
            return handle.write(&resource_text(&value));
        }

        self.write_output(&value.to_string())
    }

    pub(crate) fn op_input(&mut self) -> Result<(), RuntimeError> {
        if self.cursor.peek() == Some(REDIRECT) {
            self.cursor.eat()?;
            let source = if self.cursor.peek() == Some('<') {
                self.slot_reference()?
            } else {
                self.register.clone()
            };
            let handle = source.as_resource().ok_or(RuntimeError::NotReadable)?;
            self.register = Value::Text(handle.read()?);
            return Ok(());
        }

        self.streams.output.flush()?;
        let mut line = String::new();
        self.streams.input.read_line(&mut line)?;
        self.register = Value::Text(line.trim_matches('\n').to_string());
        Ok(())
    }

    pub(crate) fn op_open(&mut self) -> Result<(), RuntimeError> {
        let name = self
            .register
            .as_text()
            .ok_or_else(|| RuntimeError::InvalidConversion {
                value: self.register.repr(),
                target: "filename",
            })?
            .to_string();

        let handle = if name == SOCKET_SENTINEL {
            let host_value = self.slots.get(0);
            let host = host_value
                .as_text()
                .ok_or_else(|| RuntimeError::InvalidHost {
                    host: host_value.repr(),
                })?;
            let port_value = self.slots.get(1);
            let port = port_value
                .as_integer()
                .ok()
                .and_then(|port| u16::try_from(port).ok())
                .ok_or_else(|| RuntimeError::InvalidPort {
                    port: port_value.to_string(),
                })?;
            ResourceHandle::new(SocketResource::bind(host, port)?)
        } else {
            let mode_value = self.slots.get(0);
            let mode = mode_value
                .as_integer()
                .ok()
                .and_then(FileMode::from_index)
                .ok_or_else(|| RuntimeError::InvalidMode {
                    mode: mode_value.to_string(),
                })?;
            ResourceHandle::new(FileResource::open(&name, mode)?)
        };

        self.register = Value::Resource(handle);
        Ok(())
    }
}

/// Text written to a resource: list elements are joined with no separator
fn resource_text(value: &Value) -> String {
    match value {
        Value::List(items) => items.iter().map(|item| item.to_string()).collect(),
        other => other.to_string(),
    }
}
