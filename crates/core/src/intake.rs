//! Validation for files entering the upload flow.

mod error;

use mime::Mime;
use reportlens_model::{MimeCategory, UploadDescriptor};

pub use error::{Error, ErrorKind};

/// Largest accepted upload: 50 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// A file the visitor picked, before it is accepted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FileCandidate {
    /// File name as reported by the picker.
    pub name: String,
    /// MIME type as reported by the picker.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
}

impl FileCandidate {
    /// Creates a candidate.
    #[inline]
    pub fn new<S1: Into<String>, S2: Into<String>>(
        name: S1,
        mime_type: S2,
        size_bytes: u64,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }
}

/// Checks the type and then the size of `candidate`.
///
/// On success the candidate becomes an [`UploadDescriptor`] with an
/// unknown page count.
pub fn validate(candidate: &FileCandidate) -> Result<UploadDescriptor, Error> {
    let mime: Mime = candidate.mime_type.parse().map_err(|err| {
        let mime_type = &candidate.mime_type;
        Error::unsupported_type()
            .with_reason(format!("bad MIME type {mime_type:?}: {err}"))
    })?;
    let category = MimeCategory::from_mime(&mime).ok_or_else(|| {
        Error::unsupported_type()
            .with_reason(format!("{} is not accepted", mime.essence_str()))
    })?;

    if candidate.size_bytes > MAX_UPLOAD_BYTES {
        return Err(Error::too_large().with_reason(format!(
            "{} bytes exceeds the limit of {MAX_UPLOAD_BYTES}",
            candidate.size_bytes
        )));
    }

    Ok(UploadDescriptor::new(
        candidate.name.clone(),
        candidate.size_bytes,
        category,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCX: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    #[test]
    fn test_accepts_supported_types() {
        let descriptor = validate(&FileCandidate::new(
            "RELIANCE_AR_2024.pdf",
            "application/pdf",
            4_200_000,
        ))
        .unwrap();
        assert_eq!(descriptor.file_name, "RELIANCE_AR_2024.pdf");
        assert_eq!(descriptor.mime_category, MimeCategory::Pdf);
        assert_eq!(descriptor.page_count, None);

        let descriptor =
            validate(&FileCandidate::new("notes.docx", DOCX, 10)).unwrap();
        assert_eq!(descriptor.mime_category, MimeCategory::Docx);

        let descriptor = validate(&FileCandidate::new(
            "old.xls",
            "application/vnd.ms-excel",
            10,
        ))
        .unwrap();
        assert_eq!(descriptor.mime_category, MimeCategory::Xlsx);
    }

    #[test]
    fn test_rejects_other_types() {
        for mime_type in ["image/png", "text/plain", "", "not a mime"] {
            let err = validate(&FileCandidate::new("x", mime_type, 10))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedType);
            assert_eq!(
                err.to_string(),
                "Please upload a PDF, DOCX, or Excel file."
            );
        }
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let at_limit =
            FileCandidate::new("big.pdf", "application/pdf", MAX_UPLOAD_BYTES);
        assert!(validate(&at_limit).is_ok());

        let over_limit = FileCandidate::new(
            "big.pdf",
            "application/pdf",
            MAX_UPLOAD_BYTES + 1,
        );
        let err = validate(&over_limit).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TooLarge);
        assert_eq!(err.to_string(), "File size must be less than 50MB.");
        assert!(err.reason().contains("exceeds"));
    }

    #[test]
    fn test_type_is_checked_before_size() {
        let err = validate(&FileCandidate::new(
            "huge.png",
            "image/png",
            MAX_UPLOAD_BYTES * 2,
        ))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    }
}
