use std::fmt::{self, Display};

use mime::Mime;
use serde::{Deserialize, Serialize};

const PDF: &str = "application/pdf";
const DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const XLSX: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const XLS: &str = "application/vnd.ms-excel";

/// The kinds of report files the product accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MimeCategory {
    /// Portable Document Format.
    #[serde(rename = "PDF")]
    Pdf,
    /// Word document.
    #[serde(rename = "DOCX")]
    Docx,
    /// Excel workbook, either the modern or the legacy format.
    #[serde(rename = "XLSX")]
    Xlsx,
}

impl MimeCategory {
    /// Classifies a parsed MIME type. Parameters such as `charset` are
    /// ignored.
    pub fn from_mime(mime: &Mime) -> Option<Self> {
        match mime.essence_str() {
            PDF => Some(Self::Pdf),
            DOCX => Some(Self::Docx),
            XLSX | XLS => Some(Self::Xlsx),
            _ => None,
        }
    }

    /// Classifies a file extension, without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "xlsx" | "xls" => Some(Self::Xlsx),
            _ => None,
        }
    }

    /// The MIME type a browser would report for this category.
    #[inline]
    pub fn canonical_mime(&self) -> &'static str {
        match self {
            Self::Pdf => PDF,
            Self::Docx => DOCX,
            Self::Xlsx => XLSX,
        }
    }

    /// Short label for display.
    #[inline]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Xlsx => "XLSX",
        }
    }
}

impl Display for MimeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metadata about a file the visitor has uploaded.
///
/// Produced by the upload flow. Chat surfaces only read it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadDescriptor {
    /// Original file name.
    pub file_name: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of pages, when known.
    pub page_count: Option<u32>,
    /// What kind of document this is.
    pub mime_category: MimeCategory,
}

impl UploadDescriptor {
    /// Creates a descriptor with an unknown page count.
    #[inline]
    pub fn new<S: Into<String>>(
        file_name: S,
        size_bytes: u64,
        mime_category: MimeCategory,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
            page_count: None,
            mime_category,
        }
    }

    /// Sets the page count.
    #[inline]
    pub fn with_page_count(mut self, page_count: u32) -> Self {
        self.page_count = Some(page_count);
        self
    }

    /// The size in megabytes with two decimals, e.g. `2.40 MB`.
    pub fn size_label(&self) -> String {
        let megabytes = self.size_bytes as f64 / (1024.0 * 1024.0);
        format!("{megabytes:.2} MB")
    }

    /// The one-line summary shown under the file name, e.g.
    /// `PDF • 2.40 MB • 45 pages`.
    pub fn summary(&self) -> String {
        let mut summary =
            format!("{} • {}", self.mime_category, self.size_label());
        if let Some(pages) = self.page_count {
            summary.push_str(&format!(" • {pages} pages"));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_mime() {
        let pdf: Mime = "application/pdf".parse().unwrap();
        assert_eq!(MimeCategory::from_mime(&pdf), Some(MimeCategory::Pdf));

        let legacy_excel: Mime = XLS.parse().unwrap();
        assert_eq!(
            MimeCategory::from_mime(&legacy_excel),
            Some(MimeCategory::Xlsx)
        );

        let with_params: Mime = "application/pdf; name=q4".parse().unwrap();
        assert_eq!(
            MimeCategory::from_mime(&with_params),
            Some(MimeCategory::Pdf)
        );

        assert_eq!(MimeCategory::from_mime(&mime::IMAGE_PNG), None);
    }

    #[test]
    fn test_classify_extension() {
        assert_eq!(
            MimeCategory::from_extension("DOCX"),
            Some(MimeCategory::Docx)
        );
        assert_eq!(
            MimeCategory::from_extension("xls"),
            Some(MimeCategory::Xlsx)
        );
        assert_eq!(MimeCategory::from_extension("txt"), None);
    }

    #[test]
    fn test_summary() {
        let report = UploadDescriptor::new(
            "TATASTEEL_Q4_2024.pdf",
            2_516_582,
            MimeCategory::Pdf,
        );
        assert_eq!(report.summary(), "PDF • 2.40 MB");

        let report = report.with_page_count(45);
        assert_eq!(report.summary(), "PDF • 2.40 MB • 45 pages");
    }
}
