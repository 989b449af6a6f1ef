//! Byte-stream resources reachable from a program
//!
//! A program obtains a resource with the `&` operator and then reads from it
//! with `.&` or writes to it with `!&`. The interpreter only depends on the
//! [`Resource`] trait; two implementations ship with the crate:
//!
//! - [`file`]: a file opened in one of four modes selected by index
//! - [`socket`]: a one-shot TCP listener where every read accepts a new
//!   connection and every write answers and closes it
//!
//! Resources live inside [`ResourceHandle`]s, which are shared by reference:
//! pushing a handle into a slot and pulling it back yields the same stream.

pub mod file;
pub mod socket;

use crate::interpreter::errors::RuntimeError;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub use file::{FileMode, FileResource};
pub use socket::SocketResource;

/// A readable and writable stream of text
pub trait Resource: fmt::Debug {
    /// Read whatever the resource yields for one read request.
    fn read(&mut self) -> Result<String, RuntimeError>;

    fn write(&mut self, text: &str) -> Result<(), RuntimeError>;

    fn flush(&mut self) -> Result<(), RuntimeError>;

    /// Short human-readable description used when the value is printed.
    fn describe(&self) -> String;
}

/// Shared handle to a [`Resource`]
#[derive(Clone)]
pub struct ResourceHandle(Rc<RefCell<dyn Resource>>);

impl ResourceHandle {
    pub fn new<R: Resource + 'static>(resource: R) -> Self {
        ResourceHandle(Rc::new(RefCell::new(resource)))
    }

    pub fn read(&self) -> Result<String, RuntimeError> {
        self.0.borrow_mut().read()
    }

    /// Write `text` and flush it straight away.
    pub fn write(&self, text: &str) -> Result<(), RuntimeError> {
        let mut resource = self.0.borrow_mut();
        resource.write(text)?;
        resource.flush()
    }

    pub fn describe(&self) -> String {
        self.0.borrow().describe()
    }
}

impl PartialEq for ResourceHandle {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.0) as *const (),
            Rc::as_ptr(&other.0) as *const (),
        )
    }
}

impl fmt::Debug for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceHandle({})", self.describe())
    }
}
