//! File-system sinks

use super::{Sink, SinkProvider};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Creates output files inside one directory
#[derive(Debug, Clone)]
pub struct FileSinks {
    dir: PathBuf,
}

impl FileSinks {
    /// Write outputs into `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path for an output name
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

/// A buffered output file
#[derive(Debug)]
pub struct FileSink {
    writer: BufWriter<File>,
}

impl Sink for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer.write_all(buf)
    }

    fn close(self) -> io::Result<()> {
        let mut file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.flush()
    }
}

impl SinkProvider for FileSinks {
    type Sink = FileSink;

    fn create(&mut self, name: &str) -> io::Result<FileSink> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path_for(name))?;

        Ok(FileSink {
            writer: BufWriter::new(file),
        })
    }

    fn delete(&mut self, name: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(name)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
