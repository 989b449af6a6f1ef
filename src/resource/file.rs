//! File resources

use super::Resource;
use crate::interpreter::errors::RuntimeError;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};

/// Mode a file is opened in, selected by the integer held in slot 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    Read,
    Write,
    ReadWrite,
    Append,
}

impl FileMode {
    /// Map a mode index (0-3) to a mode.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(FileMode::Read),
            1 => Some(FileMode::Write),
            2 => Some(FileMode::ReadWrite),
            3 => Some(FileMode::Append),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileMode::Read => "r",
            FileMode::Write => "w",
            FileMode::ReadWrite => "r+",
            FileMode::Append => "a",
        }
    }

    fn options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            FileMode::Read => options.read(true),
            FileMode::Write => options.write(true).create(true).truncate(true),
            FileMode::ReadWrite => options.read(true).write(true),
            FileMode::Append => options.append(true).create(true),
        };
        options
    }
}

#[derive(Debug)]
pub struct FileResource {
    path: String,
    mode: FileMode,
    file: File,
}

impl FileResource {
    pub fn open(path: &str, mode: FileMode) -> Result<Self, RuntimeError> {
        let file = mode.options().open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RuntimeError::FileNotFound {
                filename: path.to_string(),
            },
            _ => RuntimeError::from(e),
        })?;

        Ok(FileResource {
            path: path.to_string(),
            mode,
            file,
        })
    }
}

impl Resource for FileResource {
    /// Reads from the current file offset to the end of the file.
    fn read(&mut self) -> Result<String, RuntimeError> {
        let mut text = String::new();
        self.file.read_to_string(&mut text)?;
        Ok(text)
    }

    fn write(&mut self, text: &str) -> Result<(), RuntimeError> {
        self.file.write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RuntimeError> {
        self.file.flush()?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("<file '{}' mode='{}'>", self.path, self.mode.as_str())
    }
}
