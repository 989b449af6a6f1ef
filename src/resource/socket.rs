//! One-shot TCP listener resource
//!
//! Each read closes whatever connection is still open, blocks until a single
//! new client connects and returns the first chunk it sends. Each write sends
//! the reply over that connection and closes it. A read/write pair therefore
//! forms one request/response cycle; nothing persists between cycles.

use super::Resource;
use crate::interpreter::constants::RECV_BUFFER_SIZE;
use crate::interpreter::errors::RuntimeError;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};

#[derive(Debug)]
pub struct SocketResource {
    host: String,
    port: u16,
    listener: TcpListener,
    connection: Option<TcpStream>,
}

impl SocketResource {
    pub fn bind(host: &str, port: u16) -> Result<Self, RuntimeError> {
        let listener = TcpListener::bind((host, port))?;
        Ok(SocketResource {
            host: host.to_string(),
            port,
            listener,
            connection: None,
        })
    }

    /// Address the listener actually bound to (useful when port 0 was requested).
    pub fn local_port(&self) -> Result<u16, RuntimeError> {
        Ok(self.listener.local_addr()?.port())
    }
}

impl Resource for SocketResource {
    fn read(&mut self) -> Result<String, RuntimeError> {
        if let Some(previous) = self.connection.take() {
            let _ = previous.shutdown(Shutdown::Both);
        }

        let (mut stream, _) = self.listener.accept()?;
        let mut buffer = [0u8; RECV_BUFFER_SIZE];
        let received = stream.read(&mut buffer)?;
        self.connection = Some(stream);

        Ok(String::from_utf8_lossy(&buffer[..received]).into_owned())
    }

    fn write(&mut self, text: &str) -> Result<(), RuntimeError> {
        let mut stream = self.connection.take().ok_or(RuntimeError::SocketWrite)?;
        stream
            .write_all(text.as_bytes())
            .map_err(|_| RuntimeError::SocketWrite)?;
        let _ = stream.shutdown(Shutdown::Both);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RuntimeError> {
        Ok(())
    }

    fn describe(&self) -> String {
        format!("<socket {}:{}>", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_request_response_cycle() {
        let mut socket = SocketResource::bind("127.0.0.1", 0).unwrap();
        let port = socket.local_port().unwrap();

        let client = thread::spawn(move || {
            let mut stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
            stream.write_all(b"ping").unwrap();
            let mut reply = String::new();
            stream.read_to_string(&mut reply).unwrap();
            reply
        });

        assert_eq!(socket.read().unwrap(), "ping");
        socket.write("pong").unwrap();
        assert_eq!(client.join().unwrap(), "pong");
    }

    #[test]
    fn test_write_without_connection() {
        let mut socket = SocketResource::bind("127.0.0.1", 0).unwrap();
        assert_eq!(socket.write("x"), Err(RuntimeError::SocketWrite));
    }
}
