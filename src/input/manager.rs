//! Input manager for resume and job description documents

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Loads documents as lowercased text, caching by path
pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        let text = load_document(path).await?;

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }
        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

/// Read one document and lowercase it; no caching, safe to call from many tasks
pub async fn load_document(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ScreenerError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    let text = match FileType::from_path(path) {
        FileType::Pdf => {
            info!("Extracting text from PDF: {}", path.display());
            PdfExtractor.extract(path).await?
        }
        FileType::Text => {
            info!("Reading plain text file: {}", path.display());
            PlainTextExtractor.extract(path).await?
        }
        FileType::Markdown => {
            info!("Processing markdown file: {}", path.display());
            MarkdownExtractor.extract(path).await?
        }
        FileType::Unknown => {
            return Err(ScreenerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            )));
        }
    };

    Ok(text.to_lowercase())
}

/// Supported documents directly inside `dir`, sorted by path
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ScreenerError::InvalidInput(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let mut documents = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && FileType::from_path(&path).is_supported() {
            documents.push(path);
        }
    }
    documents.sort();
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_text_is_lowercased_and_cached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "EXPERIENCE\nJan 2019 - Present").unwrap();

        let mut manager = InputManager::new();
        let text = manager.extract_text(&path).await.unwrap();
        assert_eq!(text, "experience\njan 2019 - present");
        assert_eq!(manager.cache_size(), 1);

        std::fs::remove_file(&path).unwrap();
        assert_eq!(manager.extract_text(&path).await.unwrap(), text);
    }

    #[tokio::test]
    async fn test_unsupported_and_missing_files() {
        let dir = TempDir::new().unwrap();
        let docx = dir.path().join("resume.docx");
        std::fs::write(&docx, "binary").unwrap();

        assert!(matches!(load_document(&docx).await, Err(ScreenerError::UnsupportedFormat(_))));
        assert!(matches!(
            load_document(&dir.path().join("missing.txt")).await,
            Err(ScreenerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_list_documents_filters_extensions() {
        let dir = TempDir::new().unwrap();
        for name in ["b.txt", "a.md", "c.docx", "d.pdf"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let names: Vec<String> = list_documents(dir.path())
            .unwrap()
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(names, vec!["a.md", "b.txt", "d.pdf"]);
    }
}
