use std::collections::HashMap;

use crate::error::ProtocolError;

/// Response headers with case-insensitive names.
///
/// Names are folded to ASCII lowercase on insertion and lookup. On duplicate
/// names the first occurrence wins; later duplicates are ignored.
#[derive(Debug, Clone, Default)]
pub struct ResponseHeaders {
    entries: HashMap<String, String>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header unless a header with the same (case-insensitive)
    /// name is already present.
    pub fn insert(&mut self, name: &str, value: &str) {
        self.entries
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| value.to_string());
    }

    /// Retrieves a header value by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Retrieves the content-length header and parses it.
    ///
    /// Returns `Ok(None)` if the header is absent; a present but unparsable
    /// value is a protocol error, not a silent zero.
    pub fn content_length(&self) -> Result<Option<usize>, ProtocolError> {
        match self.get("content-length") {
            Some(v) => v
                .parse::<usize>()
                .map(Some)
                .map_err(|_| ProtocolError::InvalidContentLength),
            None => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
