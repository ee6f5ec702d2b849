//! Size resolution for channel factories.
//!
//! A factory learns its size once. A trusted declared size is taken as is.
//! Otherwise a single throwaway session is drained to count the bytes that are
//! really there. When both are known the smaller one wins, so the readable
//! prefix of a truncated source is still served. A failed probe never fails the
//! factory: the error is kept and replayed by every later size query.

use std::{io, sync::Arc};

use log::{debug, warn};

use crate::{ChannelError, session, source::StreamSource};

/// The outcome of resolving a source's size.
#[derive(Clone, Debug)]
pub struct ResolvedSize {
    size: Option<u64>,
    deferred: Option<Arc<io::Error>>,
}

impl ResolvedSize {
    /// Resolves the size of `source`.
    ///
    /// - `declared` known and `force_probe` false: `declared`, no I/O.
    /// - otherwise one session is opened and drained:
    ///   - unknown `declared`: the drained count
    ///   - known `declared`: `min(declared, drained)`
    ///   - probe failure: `declared` (or unknown), with the error deferred
    pub fn resolve(declared: Option<u64>, source: &dyn StreamSource, force_probe: bool) -> Self {
        if let (Some(size), false) = (declared, force_probe) {
            return Self::known(size);
        }

        debug!("probing size of {}", source.name());
        match probe(source) {
            Ok(available) => Self::known(declared.map_or(available, |size| size.min(available))),
            Err(e) => {
                warn!("size probe of {} failed, deferring error: {e}", source.name());
                Self {
                    size: declared,
                    deferred: Some(Arc::new(e)),
                }
            }
        }
    }

    /// A resolved, trusted size.
    pub const fn known(size: u64) -> Self {
        Self {
            size: Some(size),
            deferred: None,
        }
    }

    /// The resolved size, or `None` when it is unknown.
    ///
    /// This ignores any deferred error; reads are still bounded by a declared
    /// size even when the probe failed.
    pub const fn bound(&self) -> Option<u64> {
        self.size
    }

    /// The deferred probe error, if the probe failed.
    pub fn deferred_error(&self) -> Option<&io::Error> {
        self.deferred.as_deref()
    }

    /// The size as reported to callers.
    ///
    /// # Errors
    ///
    /// `ChannelError::SizeUnresolved` carrying the probe error, on every call,
    /// if the probe failed.
    pub fn size(&self, source: &dyn StreamSource) -> Result<u64, ChannelError> {
        match (&self.deferred, self.size) {
            (Some(e), _) => Err(ChannelError::SizeUnresolved {
                source_name: source.name(),
                source: Arc::clone(e),
            }),
            (None, Some(size)) => Ok(size),
            // Unreachable by construction: an unknown size always carries its error.
            (None, None) => Err(ChannelError::SizeUnresolved {
                source_name: source.name(),
                source: Arc::new(io::Error::other("size unknown")),
            }),
        }
    }
}

/// Opens, drains and drops one session, returning its byte count.
fn probe(source: &dyn StreamSource) -> io::Result<u64> {
    let mut reader = source.open()?;

    session::drain(&mut reader)
}
