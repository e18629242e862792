use std::fmt;

/// Prefix applied to every store entry that belongs to a file document
pub const FILE_PREFIX: &str = "file-";

/// Suffix of the companion entry holding a file document's content type
pub const TYPE_SUFFIX: &str = "-type";

/// Logical identifier of a stored document
///
/// This is the short key handed back to clients. It is the same for text and
/// file documents; the storage layout for files is derived from it with
/// [`DocumentKey::file_key`] and [`DocumentKey::file_type_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey(String);

impl DocumentKey {
    /// Wrap an existing key string
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Store key of a file document's base64 payload entry
    pub fn file_key(&self) -> String {
        format!("{}{}", FILE_PREFIX, self.0)
    }

    /// Store key of a file document's content-type entry
    pub fn file_type_key(&self) -> String {
        format!("{}{}{}", FILE_PREFIX, self.0, TYPE_SUFFIX)
    }

    /// Consume the key and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
