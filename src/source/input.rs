//! File, memory-mapped and in-memory stream sources.

use std::{
    fmt::{self, Display, Formatter},
    fs::{self, File},
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

use memmap2::Mmap;

use super::{BytesReader, MmapReader, Session, StreamSource};
use crate::{Config, ChannelError, options::io::Io};

/// `Input` to reopen from a file, a memory-mapped file, or bytes.
#[derive(Clone, Debug)]
pub enum Input {
    /// A file reopened for every session.
    File(PathBuf),
    /// A file mapped once and viewed by every session.
    Mmap(Arc<Mmap>, PathBuf),
    /// Bytes held in memory.
    Bytes(Arc<[u8]>),
}

impl Input {
    /// Construct an `Input` from a file path or stdin (designated by "-").
    ///
    /// Stdin can only be read once, so it is drained into memory up front.
    ///
    /// # Errors
    ///
    /// - `ChannelError::MmapStdin` for `Io::MemoryMapped` with stdin
    /// - `ChannelError::Usage` for `Io::Bytes`, which takes `Input::from_bytes()`
    /// - `ChannelError::Io` if the file cannot be read or mapped
    pub fn new<P: AsRef<Path>>(p: P, io: Io) -> Result<Self, ChannelError> {
        let path = p.as_ref();
        if path.as_os_str() == "-" {
            return match io {
                Io::MemoryMapped => Err(ChannelError::MmapStdin),
                _ => Self::from_stdin(),
            };
        }

        match io {
            Io::Streamed => Ok(Self::File(path.to_path_buf())),
            Io::Buffered => {
                let bytes = fs::read(path).map_err(|source| io_error(path, source))?;

                Ok(Self::Bytes(bytes.into()))
            }
            Io::MemoryMapped => {
                let file = File::open(path).map_err(|source| io_error(path, source))?;
                let mmap = map_file(&file).map_err(|source| ChannelError::Io {
                    path: path.display().to_string(),
                    message: "failed to memory map file".to_string(),
                    source,
                })?;

                Ok(Self::Mmap(Arc::new(mmap), path.to_path_buf()))
            }
            Io::Bytes => Err(ChannelError::Usage(
                "byte I/O mode requires `Input::from_bytes()`".to_string(),
            )),
        }
    }

    /// Create an `Input` from byte data.
    pub fn from_bytes<B: AsRef<[u8]>>(bytes: B) -> Self {
        Self::Bytes(bytes.as_ref().into())
    }

    fn from_stdin() -> Result<Self, ChannelError> {
        let mut buffer = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .map_err(|source| ChannelError::Io {
                path: "-".to_string(),
                message: "failed to read stdin".to_string(),
                source,
            })?;

        Ok(Self::Bytes(buffer.into()))
    }

    /// Returns the file name of the input or `"<bytes>"` for in-memory data.
    pub fn source(&self) -> String {
        match self {
            Self::File(path) | Self::Mmap(_, path) => path.file_name().map_or_else(
                || format!("No filename: {}", path.display()),
                |name| {
                    name.to_str().map_or_else(
                        || format!("Non-UTF-8 filename: {name:?}"),
                        ToString::to_string,
                    )
                },
            ),
            Self::Bytes(_) => "<bytes>".to_string(),
        }
    }

    /// Get the size of the input in bytes, if available.
    /// Returns `None` when a file size can't be determined.
    pub fn size(&self) -> Option<u64> {
        match self {
            Self::File(path) => fs::metadata(path).map(|metadata| metadata.len()).ok(),
            Self::Mmap(mmap, _) => Some(mmap.len() as u64),
            Self::Bytes(bytes) => Some(bytes.len() as u64),
        }
    }
}

impl StreamSource for Input {
    fn open(&self) -> io::Result<Session> {
        match self {
            Self::File(path) => {
                let file = File::open(path).map_err(|e| {
                    let message = match e.kind() {
                        io::ErrorKind::NotFound => format!("no such file: {}", path.display()),
                        io::ErrorKind::PermissionDenied => {
                            format!("permission denied: {}", path.display())
                        }
                        _ => format!("failed to open file: {} ({e})", path.display()),
                    };
                    io::Error::new(e.kind(), message)
                })?;

                let capacity = Config::from_env().buffer_size();
                Ok(Box::new(BufReader::with_capacity(capacity, file)))
            }
            Self::Mmap(mmap, _) => Ok(Box::new(MmapReader::new(Arc::clone(mmap)))),
            Self::Bytes(bytes) => Ok(Box::new(BytesReader::new(Arc::clone(bytes)))),
        }
    }

    fn name(&self) -> String {
        self.source()
    }

    fn size_hint(&self) -> Option<u64> {
        self.size()
    }
}

impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "File({})", path.display()),
            Self::Mmap(_, path) => write!(f, "Mmap({})", path.display()),
            Self::Bytes(_) => write!(f, "Bytes"),
        }
    }
}

#[allow(unsafe_code)]
fn map_file(file: &File) -> io::Result<Mmap> {
    // Safety: the map is read-only; concurrent truncation of the file by another
    // process is outside what this crate can guard against.
    unsafe { Mmap::map(file) }
}

/// Wraps a file error with a message for the common failure kinds.
fn io_error(path: &Path, source: io::Error) -> ChannelError {
    let message = match source.kind() {
        io::ErrorKind::NotFound => "no such file",
        io::ErrorKind::PermissionDenied => "permission denied",
        _ => "failed to open file",
    };

    ChannelError::Io {
        path: path.display().to_string(),
        message: message.to_string(),
        source,
    }
}
