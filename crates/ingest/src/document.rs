use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source: String,
    pub filename: String,
    pub subject: String,
    pub file_type: String,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl DocumentMetadata {
    /// Look up a field by key, named fields first, then extras.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "source" => Some(&self.source),
            "filename" => Some(&self.filename),
            "subject" => Some(&self.subject),
            "file_type" => Some(&self.file_type),
            "content_type" => Some(&self.content_type),
            _ => self.extra.get(key).map(String::as_str),
        }
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).filter(|v| !v.is_empty()).unwrap_or(default)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extra.insert(key.into(), value.into());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub page_content: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn new(page_content: String, metadata: DocumentMetadata) -> Self {
        Self {
            page_content,
            metadata,
        }
    }

    /// First `max_chars` characters of the content, cut on a char boundary.
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.page_content.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.page_content[..idx],
            None => &self.page_content,
        }
    }

    pub fn char_count(&self) -> usize {
        self.page_content.chars().count()
    }
}
