use anyhow::Result;
use ingest::ExamDocumentLoader;
use std::io::Write;
use std::path::Path;

pub const SAMPLE_TEXT: &str = "هذا نص تجريبي باللغة العربية This is English text";
pub const PUNCTUATION_TEXT: &str = ":::::---()()()";
pub const PREVIEW_CHARS: usize = 200;
pub const SAMPLE_DOCUMENTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeSummary {
    pub sample_meaningful: bool,
    pub punctuation_meaningful: bool,
    pub documents_loaded: usize,
}

impl SmokeSummary {
    /// The mixed sample must be meaningful and the punctuation string must not.
    pub fn verdicts_hold(&self) -> bool {
        self.sample_meaningful && !self.punctuation_meaningful
    }
}

/// Drive the loader end to end and print what it finds to `out`.
pub async fn run_smoke_test<W: Write>(
    loader: &ExamDocumentLoader,
    out: &mut W,
) -> Result<SmokeSummary> {
    writeln!(out, "Testing text analysis function...")?;
    let analysis = loader.analyze_text(SAMPLE_TEXT, Path::new("test.txt"));
    writeln!(out, "Analysis result: {}", analysis)?;

    writeln!(out, "\nTesting meaningful text detection...")?;
    let sample_meaningful = loader.is_meaningful_text(SAMPLE_TEXT);
    writeln!(out, "Is meaningful: {}", sample_meaningful)?;

    let punctuation_meaningful = loader.is_meaningful_text(PUNCTUATION_TEXT);
    writeln!(out, "Is punctuation meaningful: {}", punctuation_meaningful)?;

    writeln!(out, "\nLoading documents...")?;
    let documents = loader.load_documents().await?;
    writeln!(out, "Loaded {} documents", documents.len())?;

    for (i, doc) in documents.iter().take(SAMPLE_DOCUMENTS).enumerate() {
        writeln!(out, "\nDocument {}:", i + 1)?;
        writeln!(out, "Subject: {}", doc.metadata.get_or("subject", "Unknown"))?;
        writeln!(out, "Filename: {}", doc.metadata.get_or("filename", "Unknown"))?;
        writeln!(out, "Content preview: {}...", doc.preview(PREVIEW_CHARS))?;

        let analysis = loader.analyze_text(&doc.page_content, Path::new(&doc.metadata.source));
        writeln!(out, "Content analysis: {}", analysis)?;
    }

    Ok(SmokeSummary {
        sample_meaningful,
        punctuation_meaningful,
        documents_loaded: documents.len(),
    })
}
