use anyhow::{Context, Result, ensure};
use harness::{logging, resolve_config_path, run_smoke_test};
use ingest::{ExamDocumentLoader, LoaderConfig};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config_path = resolve_config_path();
    let config = LoaderConfig::load(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    tracing::info!(source = %config.source_dir.display(), "Starting document loader smoke test");

    let loader = ExamDocumentLoader::with_config(config);
    let mut stdout = std::io::stdout().lock();
    let summary = run_smoke_test(&loader, &mut stdout).await?;

    ensure!(
        summary.verdicts_hold(),
        "meaningful text detection disagrees with expectations: sample={}, punctuation={}",
        summary.sample_meaningful,
        summary.punctuation_meaningful
    );

    Ok(())
}
