use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::RenderedDocument;

#[derive(Error, Debug)]
pub enum PresentationError {
    /// The target refused to open the document, e.g. a blocked new tab.
    #[error("Document could not be opened: {0}")]
    Blocked(String),

    #[error("Document could not be written: {0}")]
    Io(#[from] std::io::Error),
}

/// Hands a rendered document to the user. Returns where it can be found.
#[async_trait]
pub trait DocumentPresenter: Send + Sync {
    async fn present(&self, document: &RenderedDocument) -> Result<String, PresentationError>;
}

/// Writes each document as a file inside a directory.
#[derive(Debug, Clone)]
pub struct DirectoryPresenter {
    directory: PathBuf,
}

impl DirectoryPresenter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[async_trait]
impl DocumentPresenter for DirectoryPresenter {
    async fn present(&self, document: &RenderedDocument) -> Result<String, PresentationError> {
        // Keep generated names from escaping the output directory.
        let file_name = Path::new(&document.file_name)
            .file_name()
            .ok_or_else(|| PresentationError::Blocked(format!("invalid file name '{}'", document.file_name)))?;
        tokio::fs::create_dir_all(&self.directory).await?;
        let path = self.directory.join(file_name);
        tokio::fs::write(&path, document.html.as_bytes()).await?;
        debug!(path = %path.display(), "document written");
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn document(file_name: &str) -> RenderedDocument {
        RenderedDocument {
            file_name: file_name.to_string(),
            title: "Reporte".to_string(),
            html: "<!DOCTYPE html><p>ok</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_directory_presenter_writes_file() {
        let dir = std::env::temp_dir().join(format!("asistepro-{}", Uuid::new_v4()));
        let presenter = DirectoryPresenter::new(&dir);

        let location = presenter.present(&document("reporte.html")).await.unwrap();
        assert_eq!(location, dir.join("reporte.html").display().to_string());
        let written = tokio::fs::read_to_string(dir.join("reporte.html")).await.unwrap();
        assert_eq!(written, "<!DOCTYPE html><p>ok</p>");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_directory_presenter_strips_path_components() {
        let dir = std::env::temp_dir().join(format!("asistepro-{}", Uuid::new_v4()));
        let presenter = DirectoryPresenter::new(&dir);

        let location = presenter.present(&document("../../reporte.html")).await.unwrap();
        assert_eq!(location, dir.join("reporte.html").display().to_string());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
