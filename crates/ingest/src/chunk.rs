use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::document::DocumentMetadata;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub doc_id: String,
    pub chunk_id: String,
    pub text: String,
    pub metadata: DocumentMetadata,
    pub offset: (usize, usize), // [start, end) character positions in page_content
}

impl Chunk {
    pub fn new(
        doc_id: String,
        text: String,
        metadata: DocumentMetadata,
        offset: (usize, usize),
    ) -> Self {
        let chunk_id = Self::generate_chunk_id(&doc_id, &text, offset);

        Self {
            doc_id,
            chunk_id,
            text,
            metadata,
            offset,
        }
    }

    fn generate_chunk_id(doc_id: &str, text: &str, offset: (usize, usize)) -> String {
        let mut hasher = Sha256::new();
        hasher.update(doc_id.as_bytes());
        hasher.update(text.as_bytes());
        hasher.update(offset.0.to_string().as_bytes());
        hasher.update(offset.1.to_string().as_bytes());
        let result = hasher.finalize();
        hex::encode(&result[..16])
    }

    /// Estimate token count (rough: 1.3 tokens per word)
    pub fn estimated_tokens(&self) -> usize {
        crate::chunker::estimate_tokens(&self.text)
    }
}
