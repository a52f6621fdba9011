use std::path::PathBuf;
use watchdesk_core::{Dataset, LoadError, MockSource, RecordSource};

/// Reads a JSON dataset (`{"summary": [...], "records": [...], "subjects": [...]}`).
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RecordSource for JsonFileSource {
    async fn fetch_dataset(&self) -> Result<Dataset, LoadError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::Io {
                path: self.path.clone(),
                source: e,
            })?;
        let dataset = Dataset::from_json(&content)?;
        tracing::info!("Read {} records from {:?}", dataset.records.len(), self.path);
        Ok(dataset)
    }
}

/// Source selected on the command line.
#[derive(Debug, Clone)]
pub enum DataSource {
    Builtin(MockSource),
    File(JsonFileSource),
}

impl DataSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => DataSource::File(JsonFileSource::new(p)),
            None => DataSource::Builtin(MockSource),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Builtin(_) => "built-in".to_string(),
            DataSource::File(f) => f.path.display().to_string(),
        }
    }
}

impl RecordSource for DataSource {
    async fn fetch_dataset(&self) -> Result<Dataset, LoadError> {
        match self {
            DataSource::Builtin(s) => s.fetch_dataset().await,
            DataSource::File(s) => s.fetch_dataset().await,
        }
    }
}
