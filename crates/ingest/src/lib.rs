pub mod chunk;
pub mod chunker;
pub mod config;
pub mod document;
pub mod error;
pub mod loader;
pub mod reader;
pub mod report;

pub use analysis::{AnalysisConfig, Script, TextAnalysis};
pub use chunk::Chunk;
pub use chunker::{Chunker, ChunkerConfig};
pub use config::LoaderConfig;
pub use document::{Document, DocumentMetadata};
pub use error::LoaderError;
pub use loader::ExamDocumentLoader;
pub use reader::{DocumentFormat, FileReader};
pub use report::LoadReport;

use sha2::{Digest, Sha256};

/// Generate a stable document ID from file path
pub fn generate_doc_id(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..16])
}

/// Load the configured exams directory and split it into chunks
pub async fn ingest_directory(config: LoaderConfig) -> Result<Vec<Chunk>, LoaderError> {
    let chunker = Chunker::new(config.chunking.clone());
    let loader = ExamDocumentLoader::with_config(config);
    let documents = loader.load_documents().await?;

    Ok(chunker.split_documents(&documents))
}
