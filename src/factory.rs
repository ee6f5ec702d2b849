//! Immutable factories that hand out independent channels.

use std::sync::Arc;

use crate::{
    Channel, ChannelError, Input,
    size::ResolvedSize,
    source::StreamSource,
};

/// A reusable descriptor of one logical byte source.
///
/// The size is resolved once, when the factory is built, and never changes.
/// Cloning a factory is cheap and shares the same source and resolved size,
/// which is how documents pass a data handle around without copying bytes.
///
/// # Examples
///
/// ```
/// use stream_channel::ChannelFactory;
///
/// # fn main() -> Result<(), stream_channel::ChannelError> {
/// let factory = ChannelFactory::from_bytes(b"abcdefghij");
/// let mut channel = factory.create();
///
/// let mut buf = [0u8; 5];
/// assert_eq!(channel.read_at(&mut buf, 5)?, 5);
/// assert_eq!(&buf, b"fghij");
/// assert_eq!(channel.length()?, 10);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ChannelFactory {
    shared: Arc<Shared>,
}

/// State shared read-only by a factory and every channel it creates.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) resolved: ResolvedSize,
    pub(crate) source: Arc<dyn StreamSource>,
}

impl ChannelFactory {
    /// Creates a factory over `source`.
    ///
    /// A known `declared` size is trusted as is; `None` makes the factory
    /// probe the source once to count its bytes.
    pub fn new<S: StreamSource + 'static>(declared: Option<u64>, source: S) -> Self {
        Self::with_probe(declared, source, false)
    }

    /// Creates a factory over `source`, optionally probing even a declared size.
    ///
    /// With `force_probe`, the size becomes the smaller of `declared` and the
    /// bytes actually available, which salvages the readable part of a
    /// truncated source.
    pub fn with_probe<S: StreamSource + 'static>(
        declared: Option<u64>,
        source: S,
        force_probe: bool,
    ) -> Self {
        Self::from_shared(declared, Arc::new(source), force_probe)
    }

    /// Creates a factory over a source that is already shared.
    pub fn from_shared(
        declared: Option<u64>,
        source: Arc<dyn StreamSource>,
        force_probe: bool,
    ) -> Self {
        let resolved = ResolvedSize::resolve(declared, source.as_ref(), force_probe);

        Self {
            shared: Arc::new(Shared { resolved, source }),
        }
    }

    /// Creates a factory whose declared size is the source's own size hint.
    pub fn from_source<S: StreamSource + 'static>(source: S) -> Self {
        let declared = source.size_hint();
        Self::new(declared, source)
    }

    /// Creates a factory over bytes held in memory.
    pub fn from_bytes<B: AsRef<[u8]>>(bytes: B) -> Self {
        let input = Input::from_bytes(bytes);
        let size = input.size();
        Self::new(size, input)
    }

    /// Returns a new channel over the source. Never performs I/O.
    pub fn create(&self) -> Channel {
        Channel::new(Arc::clone(&self.shared))
    }

    /// The resolved size, as every channel of this factory reports it.
    ///
    /// # Errors
    ///
    /// `ChannelError::SizeUnresolved` if the size probe failed.
    pub fn size(&self) -> Result<u64, ChannelError> {
        self.shared.resolved.size(self.shared.source.as_ref())
    }

    /// The resolved size and any deferred error.
    pub fn resolved(&self) -> &ResolvedSize {
        &self.shared.resolved
    }

    /// Describes the underlying source.
    pub fn source_name(&self) -> String {
        self.shared.source.name()
    }

    /// Whether two factories are handles to the same descriptor.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}
