use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use sortiment_catalog::{Catalog, NegativeList, negative_list_from_table};
use sortiment_document::{AssembledDocument, DocumentError, assemble, negative_list_xlsx};
use sortiment_infra::{LoadError, SpreadsheetBytes, TableSource};

use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("generation exceeded {0:?}")]
    Timeout(Duration),

    #[error("generation task failed: {0}")]
    Task(String),
}

/// Everything a request needs: the read-only master catalog and settings.
#[derive(Debug, Clone)]
pub struct AppServices {
    master: Arc<Catalog>,
    settings: Arc<Settings>,
}

impl AppServices {
    pub fn new(master: Catalog, settings: Settings) -> Self {
        Self {
            master: Arc::new(master),
            settings: Arc::new(settings),
        }
    }

    pub fn master(&self) -> &Catalog {
        &self.master
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Compare an uploaded xlsx positive list against the master catalog.
    pub async fn negative_list(&self, upload: Vec<u8>) -> Result<NegativeList, ServiceError> {
        let services = self.clone();
        self.run_blocking(move || services.compare(&upload)).await
    }

    pub async fn negative_list_pdf(&self, upload: Vec<u8>) -> Result<AssembledDocument, ServiceError> {
        let services = self.clone();
        self.run_blocking(move || {
            let list = services.compare(&upload)?;
            let config = services.settings.document_for_today();
            Ok(assemble(list.entries(), &config)?)
        })
        .await
    }

    pub async fn negative_list_xlsx(&self, upload: Vec<u8>) -> Result<Vec<u8>, ServiceError> {
        let services = self.clone();
        self.run_blocking(move || {
            let list = services.compare(&upload)?;
            Ok(negative_list_xlsx(
                list.entries(),
                services.master.columns(),
                &services.settings.schema,
            )?)
        })
        .await
    }

    fn compare(&self, upload: &[u8]) -> Result<NegativeList, ServiceError> {
        let table = SpreadsheetBytes::new(upload).read_table()?;
        let list = negative_list_from_table(&self.master, &table, &self.settings.schema)
            .map_err(LoadError::from)?;
        tracing::info!(
            master = list.master_size(),
            positive = list.positive_size(),
            missing = list.len(),
            "{}",
            list.message()
        );
        Ok(list)
    }

    /// CPU-bound work goes to the blocking pool, bounded by the configured
    /// timeout. The current span is carried over so logs keep the request id.
    async fn run_blocking<T, F>(&self, work: F) -> Result<T, ServiceError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    {
        let limit = self.settings.generation_timeout();
        let span = tracing::Span::current();
        let task = tokio::task::spawn_blocking(move || span.in_scope(work));

        match tokio::time::timeout(limit, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join)) => Err(ServiceError::Task(join.to_string())),
            Err(_) => {
                tracing::warn!(timeout_secs = limit.as_secs(), "generation timed out");
                Err(ServiceError::Timeout(limit))
            }
        }
    }
}
