//! Stateful cursor over a settings document
//!
//! A [`Cursor`] owns a [`Document`] and a current position inside it. Tag
//! operations address children of the current node by name and ordinal
//! (`which`, the zero-based index among same-named siblings in document
//! order). Attribute helpers always address the *first* child with the given
//! name, whatever ordinal was used to navigate.
//!
//! ```
//! use xmlsettings::{Cursor, Vec2};
//!
//! let mut cursor = Cursor::new();
//! cursor.add_tag("window");
//! assert!(cursor.push_tag("window", 0));
//! cursor.set_value("title", "main".to_string());
//! cursor.encode("size", &Vec2::new(800.0, 600.0));
//! cursor.pop_tag();
//!
//! assert!(cursor.push_tag("window", 0));
//! let mut size = Vec2::default();
//! assert!(cursor.decode("size", &mut size, None));
//! assert_eq!(size, Vec2::new(800.0, 600.0));
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace, warn};

use crate::codec::{self, node as value_node, AttributeValue, Composite};
use crate::config::{Config, MissPolicy};
use crate::dom::{Document, NodeId, Parser};
use crate::error::{Error, ErrorKind, Result, Span};
use crate::input::{self, Input};
use crate::text::TextValue;

/// What a successful load read
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadSummary {
    pub bytes: usize,
    /// Live nodes, the document node included
    pub nodes: usize,
}

/// Document plus a current position
#[derive(Clone, Debug)]
pub struct Cursor {
    document: Document,
    current: NodeId,
    /// Positions to return to on `pop_tag`, innermost last
    stack: Vec<NodeId>,
    path: Option<PathBuf>,
    config: Config,
    loaded: bool,
    last_error: Option<Error>,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor {
    /// Cursor over an empty document
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::from_document(Document::new(), config)
    }

    /// Cursor positioned at the root of an existing document
    pub fn from_document(document: Document, config: Config) -> Self {
        let current = document.root();
        Self {
            document,
            current,
            stack: Vec::new(),
            path: None,
            config,
            loaded: false,
            last_error: None,
        }
    }

    /// Load `path` with the default configuration
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut cursor = Self::new();
        cursor.load_file(path)?;
        Ok(cursor)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Path used by [`save`](Self::save)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Whether the most recent load succeeded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Diagnostic of the most recent failed load
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    // ---- load / save ----

    /// Read and parse `path`, replacing the document on success
    ///
    /// `path` becomes the default save path even when loading fails, so a
    /// missing settings file can be filled with defaults and saved in place.
    /// On failure the previous document and position are kept.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<LoadSummary> {
        self.load_path(path.as_ref())
    }

    #[instrument(skip(self, path), fields(path = %path.display()))]
    fn load_path(&mut self, path: &Path) -> Result<LoadSummary> {
        self.path = Some(path.to_path_buf());
        let bytes = match input::read_file(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(error = %err, "failed to read settings file");
                return Err(self.record_failure(err));
            }
        };
        let filename = path.display().to_string();
        self.load_input(Input::from_bytes(&bytes).with_filename(&filename))
    }

    /// Parse `text`, replacing the document on success
    pub fn load_str(&mut self, text: &str) -> Result<LoadSummary> {
        self.load_input(Input::from(text))
    }

    /// Parse `bytes`, replacing the document on success
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<LoadSummary> {
        self.load_input(Input::from(bytes))
    }

    fn load_input(&mut self, input: Input<'_>) -> Result<LoadSummary> {
        let source = input.filename().unwrap_or("<memory>");
        match Parser::with_max_depth(input.as_bytes(), self.config.max_depth).parse() {
            Ok(document) => {
                let summary = LoadSummary {
                    bytes: input.len(),
                    nodes: document.node_count(),
                };
                self.document = document;
                self.reset();
                self.loaded = true;
                self.last_error = None;
                debug!(source, bytes = summary.bytes, nodes = summary.nodes, "loaded document");
                Ok(summary)
            }
            Err(err) => {
                warn!(source, offset = err.offset(), error = %err, "failed to parse document");
                Err(self.record_failure(err))
            }
        }
    }

    fn record_failure(&mut self, err: Error) -> Error {
        self.loaded = false;
        self.last_error = Some(err.clone());
        err
    }

    /// Serialize the whole document into `path`
    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_path(path.as_ref())
    }

    /// Serialize into the path of the last load (or [`set_path`](Self::set_path))
    pub fn save(&self) -> Result<()> {
        match self.path.as_deref() {
            Some(path) => self.save_path(path),
            None => Err(Error::new(ErrorKind::NoPath, Span::empty())),
        }
    }

    #[instrument(skip(self, path), fields(path = %path.display()))]
    fn save_path(&self, path: &Path) -> Result<()> {
        let text = self.to_xml_string();
        match input::write_file(path, text.as_bytes()) {
            Ok(()) => {
                debug!(bytes = text.len(), "saved document");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to save document");
                Err(err)
            }
        }
    }

    /// The document serialized with the configured write options
    pub fn to_xml_string(&self) -> String {
        self.document.to_xml_string(&self.config.write)
    }

    // ---- navigation ----

    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Name of the current node; empty at the document root
    pub fn current_name(&self) -> &str {
        self.document.name(self.current)
    }

    /// Number of pushes not yet popped
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_at_root(&self) -> bool {
        self.current == self.document.root()
    }

    /// Return to the document root and forget every pushed position
    pub fn reset(&mut self) {
        self.current = self.document.root();
        self.stack.clear();
    }

    /// Enter the `which`-th child named `tag`
    ///
    /// Returns `false` and stays put when there is no such child.
    pub fn push_tag(&mut self, tag: &str, which: usize) -> bool {
        match self.document.nth_child(self.current, tag, which) {
            Some(child) => {
                self.stack.push(self.current);
                self.current = child;
                true
            }
            None => {
                trace!(tag, which, "push_tag found no match");
                false
            }
        }
    }

    /// Return to the position before the matching `push_tag`
    ///
    /// At the document root this does nothing.
    pub fn pop_tag(&mut self) {
        match self.stack.pop() {
            Some(previous) => self.current = previous,
            None => trace!("pop_tag at document root"),
        }
    }

    /// Append an empty child `tag`; returns its ordinal among same-named siblings
    pub fn add_tag(&mut self, tag: &str) -> usize {
        self.document.append_child(self.current, tag);
        self.num_tags(tag).saturating_sub(1)
    }

    /// Remove the `which`-th child `tag` and everything under it
    pub fn remove_tag(&mut self, tag: &str, which: usize) {
        if let Some(child) = self.document.nth_child(self.current, tag, which) {
            self.document.remove_child(self.current, child);
        }
    }

    pub fn num_tags(&self, tag: &str) -> usize {
        self.document.count_children(self.current, tag)
    }

    pub fn tag_exists(&self, tag: &str, which: usize) -> bool {
        self.document.nth_child(self.current, tag, which).is_some()
    }

    fn first_child(&self, tag: &str) -> Option<NodeId> {
        self.document.first_child(self.current, tag)
    }

    fn on_miss<T: TextValue>(&self, default: T) -> T {
        match self.config.miss_policy {
            MissPolicy::UseDefault => default,
            MissPolicy::ZeroValue => T::default(),
        }
    }

    // ---- text values ----

    /// Text of the `which`-th child `tag`
    ///
    /// A missing child resolves through the configured [`MissPolicy`]. A
    /// child without text reads as empty text.
    pub fn get_value<T: TextValue>(&self, tag: &str, default: T, which: usize) -> T {
        match self.node_text_raw(tag, which) {
            Some(text) => T::parse_text(text),
            None => self.on_miss(default),
        }
    }

    /// Set the text of the first child `tag`, creating the child if needed
    pub fn set_value<T: TextValue>(&mut self, tag: &str, value: T) {
        let target = match self.first_child(tag) {
            Some(id) => Some(id),
            None => self.document.append_child(self.current, tag),
        };
        if let Some(id) = target {
            self.document.set_text(id, value.to_text());
        }
    }

    /// Text of the `which`-th child `tag`, or `None` when there is no such child
    pub fn node_text<T: TextValue>(&self, tag: &str, which: usize) -> Option<T> {
        self.node_text_raw(tag, which).map(T::parse_text)
    }

    /// Text of the `which`-th child `tag`; empty when it has none
    fn node_text_raw(&self, tag: &str, which: usize) -> Option<&str> {
        self.document
            .nth_child(self.current, tag, which)
            .map(|id| self.document.text(id).unwrap_or_default())
    }

    // ---- raw attributes on the first child `tag` ----

    /// Append `attribute` without checking for an existing one
    pub fn add_attribute<T: TextValue>(&mut self, tag: &str, attribute: &str, value: T) {
        match self.first_child(tag) {
            Some(id) => {
                self.document.append_attribute(id, attribute, value.to_text());
            }
            None => trace!(tag, attribute, "add_attribute found no tag"),
        }
    }

    pub fn remove_attribute(&mut self, tag: &str, attribute: &str) {
        if let Some(id) = self.first_child(tag) {
            self.document.remove_attribute(id, attribute);
        }
    }

    /// Attribute count of the `which`-th child `tag`
    pub fn num_attributes(&self, tag: &str, which: usize) -> usize {
        self.document
            .nth_child(self.current, tag, which)
            .map_or(0, |id| self.document.attributes(id).len())
    }

    pub fn attribute_exists(&self, tag: &str, attribute: &str) -> bool {
        self.first_child(tag)
            .and_then(|id| self.document.attribute(id, attribute))
            .is_some()
    }

    /// Read `attribute`; a miss resolves through the configured [`MissPolicy`]
    pub fn get_attribute<T: TextValue>(&self, tag: &str, attribute: &str, default: T) -> T {
        match self
            .first_child(tag)
            .and_then(|id| self.document.attribute(id, attribute))
        {
            Some(text) => T::parse_text(text),
            None => self.on_miss(default),
        }
    }

    /// Update or create `attribute`; does nothing when there is no child `tag`
    pub fn set_attribute<T: TextValue>(&mut self, tag: &str, attribute: &str, value: T) {
        match self.first_child(tag) {
            Some(id) => {
                self.document.set_attribute(id, attribute, value.to_text());
            }
            None => trace!(tag, attribute, "set_attribute found no tag"),
        }
    }

    // ---- typed codec on the current node ----

    /// Write `value` into the slots under `base` on the current node
    pub fn encode<T: AttributeValue>(&mut self, base: &str, value: &T) {
        codec::encode(
            &mut self.document,
            self.current,
            base,
            value,
            self.config.check_duplicates,
        );
    }

    /// Read the slots under `base` on the current node into `out`
    ///
    /// See [`AttributeValue::decode`] for the meaning of the result.
    pub fn decode<T: AttributeValue>(&self, base: &str, out: &mut T, default: Option<&T>) -> bool {
        let found = codec::decode(&self.document, self.current, base, out, default);
        if !found {
            trace!(base, kind = ?T::KIND, "decode incomplete");
        }
        found
    }

    /// Whether every slot of a `T` under `base` exists on the current node
    pub fn encoded_exists<T: AttributeValue>(&self, base: &str) -> bool {
        codec::exists::<T>(&self.document, self.current, base)
    }

    /// Remove the slots of a `T` under `base`; returns how many existed
    pub fn remove_encoded<T: AttributeValue>(&mut self, base: &str) -> usize {
        codec::remove::<T>(&mut self.document, self.current, base)
    }

    /// Append a child `name` whose attributes are the fields of `value`
    pub fn add_value_node<C: Composite>(&mut self, name: &str, value: &C) {
        value_node::append_value_node(&mut self.document, self.current, name, value);
    }

    /// Read the first child `name` written by [`add_value_node`](Self::add_value_node)
    pub fn read_value_node<C: Composite>(&self, name: &str, out: &mut C) -> bool {
        value_node::read_value_node(&self.document, self.current, name, out)
    }
}
