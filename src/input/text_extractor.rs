//! Text extraction from resume and job description files

use crate::error::{Result, ScreenerError};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        // pdf-extract can panic on malformed documents
        let extracted = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes)).map_err(|_| {
            ScreenerError::PdfExtraction(format!("Malformed PDF '{}'", path.display()))
        })?;

        extracted.map_err(|e| {
            ScreenerError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown))
    }
}

/// Plain text of a markdown document, one line per heading, paragraph and list item.
///
/// Headings stay on their own line so section lookup still finds them.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::with_capacity(markdown.len());

    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::End(Tag::Heading(..) | Tag::Paragraph | Tag::Item | Tag::TableRow) => text.push('\n'),
            Event::End(Tag::TableCell) => text.push(' '),
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_headings_and_lists_become_lines() {
        let markdown = "# Jane Doe\n\n## Experience\n\n- **Acme** Jan 2019 - Dec 2021\n- Beta 2022 - Present\n\n## Education\n\nB.Tech in *Civil* Engineering";
        let text = markdown_to_text(markdown);
        assert_eq!(
            text,
            "Jane Doe\nExperience\nAcme Jan 2019 - Dec 2021\nBeta 2022 - Present\nEducation\nB.Tech in Civil Engineering"
        );
    }
}
