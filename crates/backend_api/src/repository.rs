use async_trait::async_trait;
use dashboard_engine::{EngineError, Page, PageKind, PageSource};
use models::{ReportingYears, Settings};

use crate::error::Result;

/// Source of the four statement documents.
///
/// Documents are fetched on every call, so edits to the files show up on the
/// next request without a restart.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Fetches and parses the document `kind` is built from.
    async fn fetch(&self, kind: PageKind) -> Result<PageSource>;

    async fn page(&self, kind: PageKind, years: &ReportingYears) -> Result<Page> {
        Ok(self.fetch(kind).await?.build(years)?)
    }
}

/// Reads the documents from the data directory named in the settings.
pub struct FileDocumentRepository {
    settings: Settings,
}

impl FileDocumentRepository {
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }
}

#[async_trait]
impl DocumentRepository for FileDocumentRepository {
    async fn fetch(&self, kind: PageKind) -> Result<PageSource> {
        let Some(path) = PageSource::document_path(kind, &self.settings) else {
            return Ok(PageSource::Agent);
        };
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| EngineError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::debug!("Read {} ({} bytes)", path.display(), raw.len());
        Ok(PageSource::parse(kind, &raw, &path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn settings_in(dir: &Path) -> Settings {
        Settings {
            data_dir: dir.to_path_buf(),
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn test_reads_documents_from_data_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("employee_chart1.json"),
            r#"{
                "employees": [],
                "differently_abled_employees": [],
                "women_representation": [],
                "turnover_rate_permanent_employees": {"FY24": {"male": 1, "female": 1, "others": 0, "total": 2}}
            }"#,
        )
        .unwrap();

        let repo = FileDocumentRepository::new(&settings_in(tmp.path()));
        let PageSource::Employees(doc) = repo.fetch(PageKind::Employees).await.unwrap() else {
            panic!("expected the employee document");
        };

        assert_eq!(doc.turnover_rate_permanent_employees.get_index(0).map(|(fy, _)| fy.as_str()), Some("FY24"));
    }

    #[tokio::test]
    async fn test_missing_document_keeps_engine_error() {
        let tmp = TempDir::new().unwrap();
        let repo = FileDocumentRepository::new(&settings_in(tmp.path()));

        let err = repo.fetch(PageKind::ProfitAndLoss).await.unwrap_err();

        assert!(matches!(&err, ApiError::Engine(e) if e.is_missing_file()));
        assert!(err.to_string().contains("profitAndLoss.json"));
    }

    #[tokio::test]
    async fn test_agent_page_reads_nothing() {
        let tmp = TempDir::new().unwrap();
        let repo = FileDocumentRepository::new(&settings_in(tmp.path()));

        let page = repo.page(PageKind::Agent, &ReportingYears::default()).await.unwrap();

        assert_eq!(page.kind, PageKind::Agent);
    }
}
