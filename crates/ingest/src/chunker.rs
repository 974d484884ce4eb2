use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::chunk::Chunk;
use crate::document::Document;
use crate::generate_doc_id;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChunkerConfig {
    pub target_tokens_max: usize,
    pub overlap_tokens: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            target_tokens_max: 900,
            overlap_tokens: 100,
        }
    }
}

/// Rough token estimate: 1.3 tokens per whitespace-separated word.
pub fn estimate_tokens(text: &str) -> usize {
    let word_count = text.split_whitespace().count();
    (word_count as f64 * 1.3) as usize
}

pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    pub fn new(config: ChunkerConfig) -> Self {
        Self { config }
    }

    pub fn split_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        documents
            .iter()
            .flat_map(|doc| self.chunk_document(doc))
            .collect()
    }

    /// Split one document. Every chunk is a contiguous slice of `page_content`.
    pub fn chunk_document(&self, doc: &Document) -> Vec<Chunk> {
        let content = doc.page_content.as_str();
        let doc_id = doc
            .metadata
            .get("doc_id")
            .map(str::to_string)
            .unwrap_or_else(|| generate_doc_id(&doc.metadata.source));

        let mut ranges = Vec::new();

        for section in split_by_headings(content) {
            let Some(section) = trim_range(content, section) else {
                continue;
            };

            if estimate_tokens(&content[section.clone()]) <= self.config.target_tokens_max {
                ranges.push(section);
                continue;
            }

            // Pack paragraphs; trailing paragraphs are carried over as overlap
            let mut buffer: Vec<Range<usize>> = Vec::new();
            let mut buffer_tokens = 0;

            for para in split_by_paragraphs(content, section) {
                let para_tokens = estimate_tokens(&content[para.clone()]);

                if !buffer.is_empty() && buffer_tokens + para_tokens > self.config.target_tokens_max {
                    ranges.push(span(&buffer));

                    let mut kept = 0;
                    let mut kept_tokens = 0;
                    for p in buffer.iter().rev() {
                        let tokens = estimate_tokens(&content[p.clone()]);
                        if kept_tokens + tokens > self.config.overlap_tokens {
                            break;
                        }
                        kept_tokens += tokens;
                        kept += 1;
                    }
                    buffer.drain(..buffer.len() - kept);
                    buffer_tokens = kept_tokens;

                    if buffer_tokens + para_tokens > self.config.target_tokens_max {
                        buffer.clear();
                        buffer_tokens = 0;
                    }
                }

                buffer.push(para);
                buffer_tokens += para_tokens;
            }

            if !buffer.is_empty() {
                ranges.push(span(&buffer));
            }
        }

        ranges
            .into_iter()
            .map(|r| {
                let offset = (char_offset(content, r.start), char_offset(content, r.end));
                Chunk::new(
                    doc_id.clone(),
                    content[r].to_string(),
                    doc.metadata.clone(),
                    offset,
                )
            })
            .collect()
    }
}

/// Byte ranges of sections, each starting at a markdown heading line.
fn split_by_headings(text: &str) -> Vec<Range<usize>> {
    let mut sections = Vec::new();
    let mut section_start = 0;
    let mut pos = 0;

    for line in text.split_inclusive('\n') {
        if line.trim_start().starts_with('#') && pos > section_start {
            sections.push(section_start..pos);
            section_start = pos;
        }
        pos += line.len();
    }

    if section_start < text.len() {
        sections.push(section_start..text.len());
    }

    sections
}

fn split_by_paragraphs(text: &str, section: Range<usize>) -> Vec<Range<usize>> {
    let mut paragraphs = Vec::new();
    let mut pos = section.start;

    for part in text[section].split("\n\n") {
        if let Some(range) = trim_range(text, pos..pos + part.len()) {
            paragraphs.push(range);
        }
        pos += part.len() + 2;
    }

    paragraphs
}

fn trim_range(text: &str, range: Range<usize>) -> Option<Range<usize>> {
    let slice = &text[range.clone()];
    let lead = slice.len() - slice.trim_start().len();
    let trail = slice.len() - slice.trim_end().len();
    if lead == slice.len() {
        return None;
    }
    Some(range.start + lead..range.end - trail)
}

fn span(ranges: &[Range<usize>]) -> Range<usize> {
    ranges[0].start..ranges[ranges.len() - 1].end
}

fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentMetadata;

    fn make_doc(content: &str) -> Document {
        Document::new(
            content.to_string(),
            DocumentMetadata {
                source: "exams/history/midterm.md".to_string(),
                filename: "midterm.md".to_string(),
                subject: "history".to_string(),
                file_type: "md".to_string(),
                content_type: "text/markdown".to_string(),
                ..Default::default()
            },
        )
    }

    fn char_slice(text: &str, offset: (usize, usize)) -> String {
        text.chars().skip(offset.0).take(offset.1 - offset.0).collect()
    }

    #[test]
    fn test_basic_chunking() {
        let chunker = Chunker::new(ChunkerConfig::default());
        let doc = make_doc("This is a test paragraph.\n\nThis is another paragraph.");
        let chunks = chunker.chunk_document(&doc);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].doc_id, generate_doc_id("exams/history/midterm.md"));
        assert_eq!(chunks[0].metadata.subject, "history");
    }

    #[test]
    fn test_split_at_headings() {
        let chunker = Chunker::new(ChunkerConfig::default());
        let doc = make_doc("# الجزء الأول\nسؤال واحد\n\n# Part two\nQuestion two\n");
        let chunks = chunker.chunk_document(&doc);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "# الجزء الأول\nسؤال واحد");
        assert_eq!(chunks[1].text, "# Part two\nQuestion two");
        for chunk in &chunks {
            assert_eq!(char_slice(&doc.page_content, chunk.offset), chunk.text);
        }
    }

    #[test]
    fn test_large_section_packs_paragraphs_with_overlap() {
        let chunker = Chunker::new(ChunkerConfig {
            target_tokens_max: 10,
            overlap_tokens: 4,
        });
        let doc = make_doc(
            "alpha beta gamma\n\ndelta epsilon zeta\n\neta theta iota\n\nkappa lambda mu",
        );
        let chunks = chunker.chunk_document(&doc);

        assert_eq!(chunks.len(), 2);
        assert_eq!(
            chunks[0].text,
            "alpha beta gamma\n\ndelta epsilon zeta\n\neta theta iota"
        );
        assert_eq!(chunks[1].text, "eta theta iota\n\nkappa lambda mu");
        for chunk in &chunks {
            assert_eq!(char_slice(&doc.page_content, chunk.offset), chunk.text);
        }
    }

    #[test]
    fn test_blank_document_has_no_chunks() {
        let chunker = Chunker::new(ChunkerConfig::default());
        assert!(chunker.chunk_document(&make_doc("  \n\n \n")).is_empty());
        assert!(chunker.chunk_document(&make_doc("")).is_empty());
    }

    #[test]
    fn test_chunk_ids_are_stable() {
        let chunker = Chunker::new(ChunkerConfig::default());
        let doc = make_doc("# One\nfirst\n# Two\nsecond");

        let first = chunker.split_documents(std::slice::from_ref(&doc));
        let second = chunker.split_documents(&[doc]);

        let ids: Vec<_> = first.iter().map(|c| c.chunk_id.clone()).collect();
        assert_eq!(ids, second.iter().map(|c| c.chunk_id.clone()).collect::<Vec<_>>());
        assert_ne!(ids[0], ids[1]);
        assert_eq!(ids[0].len(), 32);
    }
}
