// File: src/vault/mod.rs
//! Note storage used by the capture commands.
//!
//! A vault is addressed with `/`-separated paths relative to its root, the
//! way notes link to each other. `LocalVault` maps it onto a directory.
pub mod frontmatter;
pub mod local;

pub use local::LocalVault;

use anyhow::Result;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Text(String),
    Date(NaiveDate),
    List(Vec<String>),
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<NaiveDate> for PropertyValue {
    fn from(value: NaiveDate) -> Self {
        PropertyValue::Date(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(value: Vec<String>) -> Self {
        PropertyValue::List(value)
    }
}

/// Ordered key/value metadata attached to a note.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Properties {
    entries: Vec<(String, PropertyValue)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, keeping its original position if it was already present.
    pub fn insert(&mut self, key: &str, value: impl Into<PropertyValue>) {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Storage operations the note commands rely on.
pub trait Vault {
    fn folder_exists(&self, path: &str) -> bool;
    fn create_folder(&self, path: &str) -> Result<()>;
    fn file_exists(&self, path: &str) -> bool;
    /// Create a new file. Fails if `path` already exists.
    fn create(&self, path: &str, content: &str) -> Result<()>;
    /// Append to an existing file.
    fn append(&self, path: &str, text: &str) -> Result<()>;
    /// Merge `properties` into the file's frontmatter block.
    fn process_front_matter(&self, path: &str, properties: &Properties) -> Result<()>;

    fn ensure_folder(&self, path: &str) -> Result<()> {
        if !self.folder_exists(path) {
            self.create_folder(path)?;
        }
        Ok(())
    }

    fn create_note(&self, path: &str, content: &str, properties: Option<&Properties>) -> Result<()> {
        self.create(path, content)?;
        if let Some(props) = properties {
            self.process_front_matter(path, props)?;
            log::debug!("Applied {} properties to '{}'", props.len(), path);
        }
        Ok(())
    }
}
