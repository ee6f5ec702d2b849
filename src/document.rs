//! The slice of a document object that the channel layer serves.
//!
//! A document holds its data as a [`ChannelFactory`] handle. Cloning a document,
//! shallow or full, shares that handle; the bytes behind it are never copied.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{ChannelError, ChannelFactory};

/// Parameter recording the size of a child's data when it was attached.
pub const ORIG_DOC_SIZE_KEY: &str = "ORIG_DOC_SIZE";

/// Parameter values keyed by name, in insertion-independent order.
pub type Parameters = BTreeMap<String, Vec<String>>;

/// A document with a data handle and the metadata that travels with it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DataObject {
    /// Name the data arrived under.
    filename: Option<String>,

    /// Identified type of the data, if any.
    file_type: Option<String>,

    /// Stack of current forms; the last entry is the current one.
    current_forms: Vec<String>,

    /// Metadata parameters.
    parameters: Parameters,

    /// Processing errors recorded against this document.
    processing_errors: Vec<String>,

    /// Data handle, shared across clones.
    #[serde(skip)]
    channel_factory: Option<ChannelFactory>,
}

impl DataObject {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document whose data is served by `factory`.
    pub fn with_channel_factory(factory: ChannelFactory) -> Self {
        Self {
            channel_factory: Some(factory),
            ..Self::default()
        }
    }

    /// The data handle, if one is set.
    pub const fn channel_factory(&self) -> Option<&ChannelFactory> {
        self.channel_factory.as_ref()
    }

    /// Replaces the data handle.
    pub fn set_channel_factory(&mut self, factory: ChannelFactory) {
        self.channel_factory = Some(factory);
    }

    /// The size of the document's data.
    ///
    /// # Errors
    ///
    /// - `ChannelError::SizeUnresolved` if the factory's size probe failed
    /// - `ChannelError::Usage` if the document has no data handle
    pub fn channel_size(&self) -> Result<u64, ChannelError> {
        self.channel_factory
            .as_ref()
            .ok_or_else(|| ChannelError::Usage("document has no channel factory".to_string()))?
            .create()
            .length()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = Some(filename.into());
    }

    pub fn file_type(&self) -> Option<&str> {
        self.file_type.as_deref()
    }

    pub fn set_file_type(&mut self, file_type: Option<String>) {
        self.file_type = file_type;
    }

    pub fn current_forms(&self) -> &[String] {
        &self.current_forms
    }

    pub fn push_current_form(&mut self, form: impl Into<String>) {
        self.current_forms.push(form.into());
    }

    pub const fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The values of parameter `key`, if present.
    pub fn parameter(&self, key: &str) -> Option<&[String]> {
        self.parameters.get(key).map(Vec::as_slice)
    }

    /// Appends `value` to parameter `key`.
    pub fn put_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.parameters
            .entry(key.into())
            .or_default()
            .push(value.into());
    }

    /// Replaces parameter `key` with `value`.
    pub fn set_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(key.into(), vec![value.into()]);
    }

    pub fn processing_errors(&self) -> &[String] {
        &self.processing_errors
    }

    pub fn add_processing_error(&mut self, error: impl Into<String>) {
        self.processing_errors.push(error.into());
    }

    /// Copies this document.
    ///
    /// Both kinds share the data handle and copy forms and parameters. A full
    /// clone also carries per-instance state (file type, processing errors);
    /// a shallow clone starts those fresh.
    pub fn clone_object(&self, full_clone: bool) -> Self {
        let mut copy = Self {
            filename: self.filename.clone(),
            current_forms: self.current_forms.clone(),
            parameters: self.parameters.clone(),
            channel_factory: self.channel_factory.clone(),
            ..Self::default()
        };

        if full_clone {
            copy.file_type.clone_from(&self.file_type);
            copy.processing_errors.clone_from(&self.processing_errors);
        }

        copy
    }
}

/// Carries parent metadata onto an extracted child.
///
/// - clears the child's file type when `nullify_file_type` is set
/// - copies every parent parameter named in `always_copy_keys`
/// - records `place_key` as the child's origin
/// - records [`ORIG_DOC_SIZE_KEY`] only when the child's size can be resolved
pub fn add_parent_information_to_child(
    parent: &DataObject,
    child: &mut DataObject,
    nullify_file_type: bool,
    always_copy_keys: &BTreeSet<String>,
    place_key: &str,
) {
    if nullify_file_type {
        child.set_file_type(None);
    }

    for key in always_copy_keys {
        if let Some(values) = parent.parameter(key) {
            child.parameters.insert(key.clone(), values.to_vec());
        }
    }
    child.put_parameter("PARENT_PLACE", place_key);

    match child.channel_size() {
        Ok(size) => child.set_parameter(ORIG_DOC_SIZE_KEY, size.to_string()),
        Err(e) => debug!("not recording {ORIG_DOC_SIZE_KEY}: {e}"),
    }
}

/// Applies [`add_parent_information_to_child`] to each child.
pub fn add_parent_information_to_children<'a>(
    parent: &DataObject,
    children: impl IntoIterator<Item = &'a mut DataObject>,
    nullify_file_type: bool,
    always_copy_keys: &BTreeSet<String>,
    place_key: &str,
) {
    for child in children {
        add_parent_information_to_child(
            parent,
            child,
            nullify_file_type,
            always_copy_keys,
            place_key,
        );
    }
}
