//! File-like inputs.
//!
//! An [`InputFile`] is one of three explicit variants: a path given as text,
//! a structured [`PathBuf`], or a reader the caller already opened. Opening a
//! path variant yields an [`OwnedFile`] that this module closes; opening the
//! stream variant only lends the caller's reader back and never closes it.

use std::any::Any;
use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::QiwiError;

pub enum InputFile<'a> {
    /// Unopened path given as plain text.
    PlainPath(String),
    /// Unopened path given as a structured path value.
    StructuredPath(PathBuf),
    /// Reader opened by the caller.
    Stream(Box<dyn Read + 'a>),
}

impl fmt::Debug for InputFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlainPath(p) => f.debug_tuple("PlainPath").field(p).finish(),
            Self::StructuredPath(p) => f.debug_tuple("StructuredPath").field(p).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl<'a> InputFile<'a> {
    pub fn from_path(path: impl Into<String>) -> Self {
        Self::PlainPath(path.into())
    }

    pub fn from_structured_path(path: impl Into<PathBuf>) -> Self {
        Self::StructuredPath(path.into())
    }

    /// Wrap a reader the caller opened. Pass `&mut reader` to keep ownership.
    pub fn from_stream<R: Read + 'a>(reader: R) -> Self {
        Self::Stream(Box::new(reader))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::Stream(Box::new(Cursor::new(bytes)))
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::PlainPath(_) => "PlainPathInput",
            Self::StructuredPath(_) => "StructuredPathInput",
            Self::Stream(_) => "StreamInput",
        }
    }

    /// Logical path of the input.
    ///
    /// A plain path is returned as given; a structured path is made absolute.
    pub fn path(&self) -> Result<String, QiwiError> {
        match self {
            Self::PlainPath(p) => Ok(p.clone()),
            Self::StructuredPath(p) => {
                let abs = std::path::absolute(p).map_err(|e| QiwiError::Resource {
                    path: p.display().to_string(),
                    reason: e.to_string(),
                })?;
                Ok(abs.display().to_string())
            }
            Self::Stream(_) => Err(self.unsupported("path")),
        }
    }

    /// Final component of the path, or an empty string if there is none.
    pub fn filename(&self) -> Result<String, QiwiError> {
        let path = match self {
            Self::PlainPath(p) => Path::new(p),
            Self::StructuredPath(p) => p.as_path(),
            Self::Stream(_) => return Err(self.unsupported("filename")),
        };
        Ok(path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default())
    }

    /// Open the input for reading.
    ///
    /// Path variants must point at a regular file. The stream variant is
    /// returned as-is.
    pub fn open(&mut self) -> Result<OpenedInput<'_>, QiwiError> {
        match self {
            Self::PlainPath(p) => Ok(OpenedInput::Owned(OwnedFile::open(Path::new(p))?)),
            Self::StructuredPath(p) => Ok(OpenedInput::Owned(OwnedFile::open(p)?)),
            Self::Stream(reader) => Ok(OpenedInput::Borrowed(reader.as_mut())),
        }
    }

    /// Open the input, run `f` on the reader, and release whatever was opened.
    ///
    /// Owned files are closed on every exit path; a caller's stream is left open.
    pub fn with_reader<T>(
        &mut self,
        f: impl FnOnce(&mut dyn Read) -> Result<T, QiwiError>,
    ) -> Result<T, QiwiError> {
        let mut opened = self.open()?;
        let result = f(&mut opened);
        opened.release();
        result
    }

    pub fn read_all(&mut self) -> Result<Vec<u8>, QiwiError> {
        self.with_reader(|reader| {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf)?;
            Ok(buf)
        })
    }

    fn unsupported(&self, operation: &'static str) -> QiwiError {
        QiwiError::UnsupportedOperation {
            variant: self.variant_name(),
            operation,
        }
    }
}

impl InputFile<'static> {
    /// Pick a variant from a value's runtime type.
    ///
    /// Text becomes a plain path and `PathBuf` a structured path. An open
    /// `File`, in-memory cursor or boxed reader becomes a stream. The
    /// filesystem is not touched, so a missing path only fails on [`open`].
    ///
    /// Prefer the typed constructors; this exists for callers holding
    /// type-erased values.
    ///
    /// [`open`]: InputFile::open
    pub fn autodetect<T: Any>(value: T) -> Result<Self, QiwiError> {
        let type_name = std::any::type_name::<T>();
        let value: Box<dyn Any> = Box::new(value);

        let value = match take::<String>(value) {
            Ok(p) => return Ok(Self::PlainPath(p)),
            Err(v) => v,
        };
        let value = match take::<&'static str>(value) {
            Ok(p) => return Ok(Self::PlainPath(p.to_string())),
            Err(v) => v,
        };
        let value = match take::<PathBuf>(value) {
            Ok(p) => return Ok(Self::StructuredPath(p)),
            Err(v) => v,
        };
        let value = match take::<File>(value) {
            Ok(f) => return Ok(Self::from_stream(f)),
            Err(v) => v,
        };
        let value = match take::<Cursor<Vec<u8>>>(value) {
            Ok(c) => return Ok(Self::from_stream(c)),
            Err(v) => v,
        };
        let value = match take::<Cursor<&'static [u8]>>(value) {
            Ok(c) => return Ok(Self::from_stream(c)),
            Err(v) => v,
        };
        match take::<Box<dyn Read>>(value) {
            Ok(r) => Ok(Self::Stream(r)),
            Err(_) => Err(QiwiError::Discovery { type_name }),
        }
    }
}

fn take<T: Any>(value: Box<dyn Any>) -> Result<T, Box<dyn Any>> {
    value.downcast::<T>().map(|b| *b)
}

impl From<String> for InputFile<'_> {
    fn from(path: String) -> Self {
        Self::PlainPath(path)
    }
}

impl From<&str> for InputFile<'_> {
    fn from(path: &str) -> Self {
        Self::PlainPath(path.to_string())
    }
}

impl From<PathBuf> for InputFile<'_> {
    fn from(path: PathBuf) -> Self {
        Self::StructuredPath(path)
    }
}

impl From<&Path> for InputFile<'_> {
    fn from(path: &Path) -> Self {
        Self::StructuredPath(path.to_path_buf())
    }
}

/// A file this crate opened and is responsible for closing.
#[derive(Debug)]
pub struct OwnedFile {
    path: PathBuf,
    file: Option<File>,
}

impl OwnedFile {
    fn open(path: &Path) -> Result<Self, QiwiError> {
        let resource_error = |reason: String| QiwiError::Resource {
            path: path.display().to_string(),
            reason,
        };
        let meta = std::fs::metadata(path).map_err(|e| resource_error(e.to_string()))?;
        if !meta.is_file() {
            return Err(resource_error("not a regular file".into()));
        }
        let file = File::open(path).map_err(|e| resource_error(e.to_string()))?;
        debug!(path = %path.display(), "opened input file");
        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    /// Close the handle. Returns `true` only on the call that actually closed it.
    pub fn close(&mut self) -> bool {
        match self.file.take() {
            Some(file) => {
                drop(file);
                debug!(path = %self.path.display(), "closed input file");
                true
            }
            None => false,
        }
    }
}

impl Read for OwnedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.file.as_mut() {
            Some(file) => file.read(buf),
            None => Err(io::Error::other("input file already closed")),
        }
    }
}

impl Drop for OwnedFile {
    fn drop(&mut self) {
        self.close();
    }
}

/// Readable view returned by [`InputFile::open`].
pub enum OpenedInput<'s> {
    Owned(OwnedFile),
    Borrowed(&'s mut dyn Read),
}

impl fmt::Debug for OpenedInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owned(file) => f.debug_tuple("Owned").field(file).finish(),
            Self::Borrowed(_) => f.write_str("Borrowed(..)"),
        }
    }
}

impl OpenedInput<'_> {
    pub fn owns_handle(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Close an owned file; a borrowed stream is left untouched.
    pub fn release(&mut self) {
        if let Self::Owned(file) = self {
            file.close();
        }
    }
}

impl Read for OpenedInput<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Owned(file) => file.read(buf),
            Self::Borrowed(reader) => reader.read(buf),
        }
    }
}
