//! Output destinations
//!
//! The algorithms never touch the file system directly. They ask a
//! [`SinkProvider`] for a fresh [`Sink`] per output unit, write into it,
//! close it, and ask the provider to delete names that must not survive
//! (empty trailing outputs, or every output after suffix exhaustion).

use std::io;

pub mod file;
pub mod memory;

pub use file::{FileSink, FileSinks};
pub use memory::{MemorySink, MemorySinks, SinkEvent};

/// One output unit opened for writing
pub trait Sink {
    /// Append `buf` in full
    fn write(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Flush and release the output
    fn close(self) -> io::Result<()>;
}

/// Creates and removes named sinks
pub trait SinkProvider {
    /// Sink type handed out by this provider
    type Sink: Sink;

    /// Open `name` for writing, creating it or truncating an existing one
    fn create(&mut self, name: &str) -> io::Result<Self::Sink>;

    /// Remove `name`. A name that does not exist is not an error.
    fn delete(&mut self, name: &str) -> io::Result<()>;
}

impl<P: SinkProvider + ?Sized> SinkProvider for &mut P {
    type Sink = P::Sink;

    fn create(&mut self, name: &str) -> io::Result<Self::Sink> {
        (**self).create(name)
    }

    fn delete(&mut self, name: &str) -> io::Result<()> {
        (**self).delete(name)
    }
}
