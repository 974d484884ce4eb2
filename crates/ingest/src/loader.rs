use analysis::{TextAnalysis, TextAnalyzer};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::config::LoaderConfig;
use crate::document::{Document, DocumentMetadata};
use crate::error::LoaderError;
use crate::generate_doc_id;
use crate::reader::{DocumentFormat, FileReader, SUPPORTED_EXTENSIONS, extension_of};
use crate::report::{LoadReport, TimedOperation};

/// Subject assigned to files that sit directly in the source directory.
pub const DEFAULT_SUBJECT: &str = "general";

/// Loads exam documents from a directory laid out as `<source>/<subject>/...`.
pub struct ExamDocumentLoader {
    config: LoaderConfig,
    analyzer: TextAnalyzer,
    reader: FileReader,
}

impl ExamDocumentLoader {
    /// Does not touch the file system; the directory is checked on load.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(LoaderConfig::new(source_dir))
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        let analyzer = TextAnalyzer::new(config.analysis.clone());
        let reader = FileReader::new(config.max_file_size);
        Self {
            config,
            analyzer,
            reader,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn source_dir(&self) -> &Path {
        &self.config.source_dir
    }

    pub fn supported_extensions(&self) -> &'static [&'static str] {
        SUPPORTED_EXTENSIONS
    }

    pub fn analyze_text(&self, text: &str, path_hint: &Path) -> TextAnalysis {
        self.analyzer.analyze(text, path_hint)
    }

    pub fn is_meaningful_text(&self, text: &str) -> bool {
        self.analyzer.is_meaningful(text)
    }

    /// Load every supported file under the source directory, in path order.
    pub async fn load_documents(&self) -> Result<Vec<Document>, LoaderError> {
        let (documents, _) = self.load_documents_with_report().await?;
        Ok(documents)
    }

    pub async fn load_documents_with_report(
        &self,
    ) -> Result<(Vec<Document>, LoadReport), LoaderError> {
        let timer = TimedOperation::start();
        self.check_source_dir().await?;

        let listing = self
            .reader
            .list_directory(self.source_dir(), self.config.recursive)?;
        info!(
            source = %self.source_dir().display(),
            files = listing.files.len(),
            unsupported = listing.unsupported,
            "Loading exam documents"
        );

        let mut report = LoadReport {
            unsupported_files: listing.unsupported,
            ..LoadReport::default()
        };
        let mut documents = Vec::with_capacity(listing.files.len());

        for path in &listing.files {
            let (document, analysis) = self.load_analyzed(path).await?;
            let meaningful = analysis.is_meaningful;
            let kept = meaningful || !self.config.skip_meaningless;

            report.record_document(&document.metadata.subject, meaningful, kept);
            if kept {
                documents.push(document);
            } else {
                debug!(path = %path.display(), "Dropping document without meaningful text");
            }
        }

        report.finish(timer.elapsed());
        info!(
            documents = report.documents_loaded,
            meaningless = report.meaningless_documents,
            dropped = report.dropped_documents,
            elapsed_ms = report.elapsed_ms,
            "Finished loading exam documents"
        );

        Ok((documents, report))
    }

    /// Load a single file into a document.
    pub async fn load_document(&self, path: &Path) -> Result<Document, LoaderError> {
        let (document, _) = self.load_analyzed(path).await?;
        Ok(document)
    }

    async fn load_analyzed(&self, path: &Path) -> Result<(Document, TextAnalysis), LoaderError> {
        let raw = self.reader.read_file(path).await?;
        let page_content = self.analyzer.normalizer().normalize(&raw);
        let analysis = self.analyzer.analyze(&page_content, path);

        if !analysis.is_meaningful {
            warn!(
                path = %path.display(),
                chars = analysis.counts.total,
                letter_ratio = analysis.letter_ratio,
                warnings = ?analysis.warnings,
                "Extracted text does not look meaningful"
            );
        }

        let source = path.display().to_string();
        let content_type = DocumentFormat::from_path(path)
            .map(|f| f.content_type())
            .unwrap_or("application/octet-stream");

        let mut metadata = DocumentMetadata {
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| source.clone()),
            subject: self.subject_for(path),
            file_type: extension_of(path),
            content_type: content_type.to_string(),
            source,
            ..DocumentMetadata::default()
        };
        metadata.insert("doc_id", generate_doc_id(&metadata.source));
        metadata.insert("char_count", analysis.counts.total.to_string());
        metadata.insert("word_count", analysis.word_count.to_string());
        metadata.insert("dominant_script", analysis.dominant_script.as_str());
        metadata.insert("meaningful", analysis.is_meaningful.to_string());

        Ok((Document::new(page_content, metadata), analysis))
    }

    /// Subject of a file: the first directory below the source directory.
    pub fn subject_for(&self, path: &Path) -> String {
        let relative = match path.strip_prefix(self.source_dir()) {
            Ok(relative) => relative,
            Err(_) => {
                return path
                    .parent()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
            }
        };

        let mut components = relative.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(dir)), Some(_)) => dir.to_string_lossy().into_owned(),
            _ => DEFAULT_SUBJECT.to_string(),
        }
    }

    /// Subject directories directly under the source directory, sorted.
    pub async fn subjects(&self) -> Result<Vec<String>, LoaderError> {
        self.check_source_dir().await?;

        let dir = self.source_dir();
        let mut entries = fs::read_dir(dir)
            .await
            .map_err(|e| LoaderError::io(dir, e))?;

        let mut subjects = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| LoaderError::io(dir, e))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            // metadata follows symlinks, matching the directory walk
            let is_dir = fs::metadata(entry.path())
                .await
                .map_err(|e| LoaderError::io(entry.path(), e))?
                .is_dir();
            if is_dir && !name.starts_with('.') {
                subjects.push(name);
            }
        }

        subjects.sort();
        Ok(subjects)
    }

    async fn check_source_dir(&self) -> Result<(), LoaderError> {
        let dir = self.source_dir();
        match fs::metadata(dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(LoaderError::NotADirectory(dir.to_path_buf())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LoaderError::SourceNotFound(dir.to_path_buf()))
            }
            Err(e) => Err(LoaderError::io(dir, e)),
        }
    }
}
